//! Pattern ingestion.
//!
//! Reads a directory of per-line pattern files, each either NeTEx XML or
//! transit-patterns JSON, and normalizes them into [`PatternRecord`]s.
//!
//! Ingestion is best-effort and always completes:
//! - files are processed in filename order, so output is reproducible
//! - a file that cannot be read, decoded, or parsed is skipped with a
//!   diagnostic and never stops the remaining files
//! - within a readable file, incomplete records are skipped individually

mod error;
mod json;
mod record;
mod sniff;
mod xml;

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::decode::decode;
use crate::diagnostics::{Diagnostic, Diagnostics, FileFailure};
use crate::domain::PatternRecord;

pub use error::IngestError;
pub use sniff::{Format, classify};

/// Everything ingested from one pattern directory.
#[derive(Debug, Clone, Default)]
pub struct Ingest {
    /// Records from every successfully parsed file, in file order.
    pub records: Vec<PatternRecord>,
    /// File- and record-level diagnostics, in file order.
    pub diagnostics: Diagnostics,
    /// Number of candidate files found.
    pub files_seen: usize,
    /// Number of files that parsed (possibly yielding zero records).
    pub files_parsed: usize,
}

/// Ingest every pattern file in `dir`.
///
/// Fails only if the directory itself cannot be listed.
pub fn ingest(dir: &Path) -> Result<Ingest, IngestError> {
    let list_error = |source| IngestError::ListDirectory {
        path: dir.to_path_buf(),
        source,
    };

    let mut result = Ingest::default();
    let mut files: Vec<(String, PathBuf)> = Vec::new();

    for entry in std::fs::read_dir(dir).map_err(list_error)? {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(error = %e, "Failed to read directory entry");
                result.diagnostics.push(Diagnostic::SkippedFile {
                    file: dir.display().to_string(),
                    reason: FileFailure::Unreadable(e.to_string()),
                });
                continue;
            }
        };

        let name = entry.file_name().to_string_lossy().into_owned();
        let path = entry.path();
        if name.starts_with('.') || !path.is_file() {
            continue;
        }
        files.push((name, path));
    }

    files.sort();
    result.files_seen = files.len();

    for (name, path) in files {
        match std::fs::read(&path) {
            Ok(bytes) => {
                if let Some(records) = ingest_bytes(&name, &bytes, &mut result.diagnostics) {
                    result.files_parsed += 1;
                    result.records.extend(records);
                }
            }
            Err(e) => {
                warn!(file = %name, error = %e, "Skipping unreadable pattern file");
                result.diagnostics.push(Diagnostic::SkippedFile {
                    file: name,
                    reason: FileFailure::Unreadable(e.to_string()),
                });
            }
        }
    }

    info!(
        files = result.files_seen,
        parsed = result.files_parsed,
        records = result.records.len(),
        diagnostics = result.diagnostics.len(),
        "Ingested pattern directory"
    );

    Ok(result)
}

/// Decode, classify, and parse one pattern file.
///
/// Returns `None` when the whole file is skipped; the reason is pushed
/// onto `diagnostics` either way.
pub fn ingest_bytes(
    name: &str,
    bytes: &[u8],
    diagnostics: &mut Diagnostics,
) -> Option<Vec<PatternRecord>> {
    let decoded = decode(bytes);
    if decoded.lossy {
        debug!(file = %name, "Pattern file is not valid UTF-8, decoded as ISO-8859-1");
        diagnostics.push(Diagnostic::LossyDecode {
            origin: name.to_string(),
        });
    }

    let format = classify(&decoded.text);
    let parsed = match format {
        Format::Json => json::parse(&decoded.text, name, diagnostics),
        Format::Xml => xml::parse(&decoded.text, name, diagnostics),
        Format::Unrecognized => Err(FileFailure::Unrecognized),
    };

    match parsed {
        Ok(records) => {
            debug!(file = %name, ?format, records = records.len(), "Parsed pattern file");
            Some(records)
        }
        Err(reason) => {
            warn!(file = %name, %reason, "Skipping pattern file");
            diagnostics.push(Diagnostic::SkippedFile {
                file: name.to_string(),
                reason,
            });
            None
        }
    }
}
