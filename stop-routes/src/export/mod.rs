//! Export sinks for a correlation.
//!
//! - [`write_csv`]: one row per registered stop for spreadsheet analysis
//! - [`render_map`]: a Leaflet page with one marker per registered stop

mod map;
mod table;

use std::path::{Path, PathBuf};

pub use map::{MapOptions, render_map, write_map_file};
pub use table::{write_csv, write_csv_file};

/// Errors writing export artifacts.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("template error: {0}")]
    Template(#[from] askama::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ExportError {
    fn write(path: &Path) -> impl FnOnce(std::io::Error) -> Self + '_ {
        move |source| ExportError::Write {
            path: path.to_path_buf(),
            source,
        }
    }
}
