//! Recoverable-condition diagnostics.
//!
//! Loading and ingestion never fail on a single bad entry, record, or
//! file. Instead each condition becomes a [`Diagnostic`] that is
//! accumulated into [`Diagnostics`] and returned next to the good data.

use std::fmt;

use crate::domain::InvalidCoordinate;

/// Why a stop entry was left out of the registry.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StopDefect {
    #[error("missing identifier")]
    MissingId,

    #[error("missing location")]
    MissingLocation,

    #[error("missing {0}")]
    MissingCoordinate(&'static str),

    #[error(transparent)]
    InvalidCoordinate(#[from] InvalidCoordinate),

    /// An earlier entry with the same identifier was kept
    #[error("duplicate identifier, first entry kept")]
    Duplicate,
}

/// Why a record inside an otherwise readable file was discarded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordDefect {
    #[error("missing line identifier")]
    MissingLine,

    #[error("missing destination label")]
    MissingDestination,

    #[error("missing {0}")]
    MissingField(&'static str),

    #[error("malformed record: {0}")]
    Malformed(String),
}

/// Why a whole pattern file was skipped.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FileFailure {
    #[error("unreadable: {0}")]
    Unreadable(String),

    #[error("neither XML nor JSON")]
    Unrecognized,

    #[error("invalid JSON: {0}")]
    Json(String),

    #[error("invalid XML: {0}")]
    Xml(String),

    #[error("unexpected JSON shape: {0}")]
    UnexpectedShape(&'static str),
}

/// Coarse classification used for the report counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    SkippedStop,
    SkippedRecord,
    SkippedFile,
    Warning,
}

/// A single recoverable condition met while reading input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Diagnostic {
    /// A stop entry that did not make it into the registry
    #[error("stop {entry}: {reason}")]
    SkippedStop { entry: String, reason: StopDefect },

    /// A record discarded from a file that was otherwise read
    #[error("{origin}: record #{position}: {reason}")]
    SkippedRecord {
        origin: String,
        position: usize,
        reason: RecordDefect,
    },

    /// A file that contributed nothing
    #[error("{file}: {reason}")]
    SkippedFile { file: String, reason: FileFailure },

    /// Input bytes were not valid UTF-8 and were decoded as ISO-8859-1
    #[error("{origin}: invalid UTF-8, decoded as ISO-8859-1")]
    LossyDecode { origin: String },
}

impl Diagnostic {
    pub fn kind(&self) -> DiagnosticKind {
        match self {
            Diagnostic::SkippedStop { .. } => DiagnosticKind::SkippedStop,
            Diagnostic::SkippedRecord { .. } => DiagnosticKind::SkippedRecord,
            Diagnostic::SkippedFile { .. } => DiagnosticKind::SkippedFile,
            Diagnostic::LossyDecode { .. } => DiagnosticKind::Warning,
        }
    }
}

/// An ordered list of diagnostics, in the order they were met.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.items.push(diagnostic);
    }

    /// Number of diagnostics of the given kind.
    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.items.iter().filter(|d| d.kind() == kind).count()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Extend<Diagnostic> for Diagnostics {
    fn extend<T: IntoIterator<Item = Diagnostic>>(&mut self, iter: T) {
        self.items.extend(iter);
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for diagnostic in &self.items {
            writeln!(f, "{diagnostic}")?;
        }
        Ok(())
    }
}
