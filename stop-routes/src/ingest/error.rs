//! Pattern ingestion error types.

use std::path::PathBuf;

/// Fatal ingestion errors.
///
/// Only an unlistable directory is fatal; problems with individual files
/// are diagnostics.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("failed to list pattern directory {}: {source}", path.display())]
    ListDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
