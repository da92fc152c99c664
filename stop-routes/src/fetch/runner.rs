//! Sequential, rate-limited fetch loop.

use std::future::Future;
use std::path::PathBuf;

use tracing::{info, warn};

use crate::domain::LineId;

use super::client::FetchConfig;
use super::error::FetchError;

/// Source of raw pattern documents, one per line.
pub trait PatternSource {
    fn fetch(&self, line: &LineId) -> impl Future<Output = Result<Vec<u8>, FetchError>> + Send;
}

/// Outcome of a fetch run.
#[derive(Debug, Default)]
pub struct FetchSummary {
    /// Files written, in line order.
    pub saved: Vec<PathBuf>,
    /// Lines that could not be fetched or saved.
    pub failed: Vec<(LineId, FetchError)>,
}

/// File name for a line's pattern document.
///
/// Bytes that are not safe in file names are percent-encoded, as is a
/// leading `.` so the file is never hidden from ingestion. Distinct line
/// ids always get distinct names.
pub fn pattern_file_name(line: &LineId) -> String {
    let mut stem = String::with_capacity(line.as_str().len());
    for (i, b) in line.as_str().bytes().enumerate() {
        let keep = b.is_ascii_alphanumeric() || b == b'-' || b == b'_' || (b == b'.' && i > 0);
        if keep {
            stem.push(char::from(b));
        } else {
            stem.push_str(&format!("%{b:02X}"));
        }
    }
    format!("{stem}.xml")
}

/// Fetch every line's pattern document into `config.output_dir`.
///
/// Waits `config.delay` between requests (not after the last). A failure
/// for one line is recorded in the summary and does not stop the run;
/// only failing to create the output directory is fatal.
pub async fn fetch_all<S: PatternSource>(
    source: &S,
    lines: &[LineId],
    config: &FetchConfig,
) -> Result<FetchSummary, FetchError> {
    tokio::fs::create_dir_all(&config.output_dir)
        .await
        .map_err(|source| FetchError::Write {
            path: config.output_dir.clone(),
            source,
        })?;

    let mut summary = FetchSummary::default();

    for (index, line) in lines.iter().enumerate() {
        info!(line = %line, n = index + 1, total = lines.len(), "Fetching patterns");

        match fetch_one(source, line, config).await {
            Ok(path) => {
                info!(path = %path.display(), "Saved");
                summary.saved.push(path);
            }
            Err(e) => {
                warn!(line = %line, error = %e, "Failed to fetch line");
                summary.failed.push((line.clone(), e));
            }
        }

        if index + 1 < lines.len() && !config.delay.is_zero() {
            info!(secs = config.delay.as_secs(), "Waiting before next request");
            tokio::time::sleep(config.delay).await;
        }
    }

    Ok(summary)
}

async fn fetch_one<S: PatternSource>(
    source: &S,
    line: &LineId,
    config: &FetchConfig,
) -> Result<PathBuf, FetchError> {
    let body = source.fetch(line).await?;
    let path = config.output_dir.join(pattern_file_name(line));
    tokio::fs::write(&path, body)
        .await
        .map_err(|source| FetchError::Write {
            path: path.clone(),
            source,
        })?;
    Ok(path)
}
