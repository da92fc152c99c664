//! Run configuration.

use std::path::PathBuf;

use crate::export::MapOptions;
use crate::registry::DEFAULT_STOP_NAME;

/// Input and output locations for a correlation run.
#[derive(Debug, Clone)]
pub struct Config {
    /// NeTEx stop dataset.
    pub stops_path: PathBuf,

    /// Directory of per-line pattern files.
    pub routes_dir: PathBuf,

    /// Where the map page is written.
    pub map_output: PathBuf,

    /// Where the CSV export is written.
    pub csv_output: PathBuf,

    /// Name given to stops without one.
    pub stop_name_placeholder: String,

    pub map: MapOptions,
}

impl Config {
    pub fn with_stops_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.stops_path = path.into();
        self
    }

    pub fn with_routes_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.routes_dir = dir.into();
        self
    }

    pub fn with_map_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.map_output = path.into();
        self
    }

    pub fn with_csv_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.csv_output = path.into();
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            stops_path: PathBuf::from("stops.xml"),
            routes_dir: PathBuf::from("Routes"),
            map_output: PathBuf::from("stops_routes_map.html"),
            csv_output: PathBuf::from("stops_routes_data.csv"),
            stop_name_placeholder: DEFAULT_STOP_NAME.to_string(),
            map: MapOptions::default(),
        }
    }
}
