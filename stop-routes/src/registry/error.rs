//! Stop registry error types.

use std::path::PathBuf;

/// Fatal errors loading the stop dataset.
///
/// Without a parseable stop document there is no registry, so these
/// abort the run.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// The stop dataset could not be read
    #[error("failed to read stop dataset {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The stop dataset is not well-formed XML
    #[error("stop dataset is not well-formed XML: {0}")]
    Xml(#[from] roxmltree::Error),
}
