//! Line definitions.
//!
//! The line-definition document lists every line the agency runs. It
//! drives the pattern fetch (one request per line id) and the line
//! listing report.

mod listing;

use roxmltree::{Document, Node};
use tracing::debug;

use crate::diagnostics::{Diagnostic, Diagnostics, RecordDefect};
use crate::domain::LineId;
use crate::netex;

pub use listing::{LineListing, categorize};

/// Errors reading the line-definition document.
#[derive(Debug, thiserror::Error)]
pub enum LinesError {
    #[error("failed to read line definitions: {0}")]
    Io(#[from] std::io::Error),

    #[error("line definitions are not well-formed XML: {0}")]
    Xml(#[from] roxmltree::Error),
}

/// A line as described by the line-definition document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub id: LineId,
    pub name: String,
    pub transport_mode: String,
    pub public_code: String,
}

/// Parse every complete NeTEx `Line`.
///
/// Lines missing a name, transport mode, or public code are skipped
/// with a diagnostic.
pub fn parse(text: &str) -> Result<(Vec<Line>, Diagnostics), LinesError> {
    let doc = Document::parse(text)?;
    let mut lines = Vec::new();
    let mut diagnostics = Diagnostics::new();

    for (index, node) in doc.descendants().filter(|n| netex::is(*n, "Line")).enumerate() {
        match parse_line(node) {
            Ok(line) => lines.push(line),
            Err(reason) => {
                let diagnostic = Diagnostic::SkippedRecord {
                    origin: "line definitions".to_string(),
                    position: index + 1,
                    reason,
                };
                debug!(%diagnostic, "Skipping incomplete line");
                diagnostics.push(diagnostic);
            }
        }
    }

    Ok((lines, diagnostics))
}

/// Identifiers of every NeTEx `Line` that has one, in document order.
pub fn line_ids(text: &str) -> Result<Vec<LineId>, LinesError> {
    let doc = Document::parse(text)?;
    Ok(doc
        .descendants()
        .filter(|n| netex::is(*n, "Line"))
        .filter_map(|n| n.attribute("id"))
        .filter_map(|id| LineId::parse(id).ok())
        .collect())
}

fn parse_line(node: Node<'_, '_>) -> Result<Line, RecordDefect> {
    let id = node
        .attribute("id")
        .and_then(|id| LineId::parse(id).ok())
        .ok_or(RecordDefect::MissingLine)?;
    let field = |name: &'static str| {
        netex::descendant(node, name)
            .and_then(netex::text)
            .map(str::to_string)
            .ok_or(RecordDefect::MissingField(name))
    };

    Ok(Line {
        id,
        name: field("Name")?,
        transport_mode: field("TransportMode")?,
        public_code: field("PublicCode")?,
    })
}
