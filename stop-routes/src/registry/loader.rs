//! Stop dataset parsing.

use std::path::Path;

use roxmltree::{Document, Node};
use tracing::{debug, info, warn};

use crate::decode::decode;
use crate::diagnostics::{Diagnostic, Diagnostics, StopDefect};
use crate::domain::{Coordinates, Stop, StopId};
use crate::netex;

use super::StopRegistry;
use super::error::RegistryError;

/// Name given to stops whose entry carries no name.
pub const DEFAULT_STOP_NAME: &str = "Unknown";

/// Parse a stop dataset document.
///
/// Every NeTEx `ScheduledStopPoint` with an `id`, a `Location` holding
/// valid `Latitude`/`Longitude`, and an optional `Name` is registered.
/// Anything else is skipped with a diagnostic.
pub fn load(text: &str) -> Result<(StopRegistry, Diagnostics), RegistryError> {
    load_with_placeholder(text, DEFAULT_STOP_NAME)
}

/// Like [`load`], naming unnamed stops `placeholder`.
pub fn load_with_placeholder(
    text: &str,
    placeholder: &str,
) -> Result<(StopRegistry, Diagnostics), RegistryError> {
    let doc = Document::parse(text)?;

    let mut registry = StopRegistry::new();
    let mut diagnostics = Diagnostics::new();

    let entries = doc
        .descendants()
        .filter(|n| netex::is(*n, "ScheduledStopPoint"));

    for (index, node) in entries.enumerate() {
        let position = index + 1;
        let result = parse_stop(node, position, placeholder).and_then(|stop| {
            let id = stop.id.clone();
            if registry.insert(stop) {
                Ok(())
            } else {
                Err(Diagnostic::SkippedStop {
                    entry: id.to_string(),
                    reason: StopDefect::Duplicate,
                })
            }
        });

        if let Err(diagnostic) = result {
            debug!(%diagnostic, "Skipping stop entry");
            diagnostics.push(diagnostic);
        }
    }

    info!(
        stops = registry.len(),
        skipped = diagnostics.len(),
        "Loaded stop registry"
    );

    Ok((registry, diagnostics))
}

/// Read and parse a stop dataset file.
///
/// A file that is not valid UTF-8 is read as ISO-8859-1 rather than
/// rejected; a `LossyDecode` diagnostic is recorded when that happens.
pub fn load_file(
    path: &Path,
    placeholder: &str,
) -> Result<(StopRegistry, Diagnostics), RegistryError> {
    let bytes = std::fs::read(path).map_err(|source| RegistryError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let decoded = decode(&bytes);
    let (registry, mut diagnostics) = load_with_placeholder(&decoded.text, placeholder)?;

    if decoded.lossy {
        warn!(path = %path.display(), "Stop dataset is not valid UTF-8");
        diagnostics.push(Diagnostic::LossyDecode {
            origin: path.display().to_string(),
        });
    }

    Ok((registry, diagnostics))
}

fn parse_stop(node: Node<'_, '_>, position: usize, placeholder: &str) -> Result<Stop, Diagnostic> {
    let id = node
        .attribute("id")
        .and_then(|id| StopId::parse(id).ok())
        .ok_or_else(|| Diagnostic::SkippedStop {
            entry: format!("#{position}"),
            reason: StopDefect::MissingId,
        })?;

    let skipped = |reason: StopDefect| Diagnostic::SkippedStop {
        entry: id.to_string(),
        reason,
    };

    let name = netex::child(node, "Name")
        .and_then(netex::text)
        .unwrap_or(placeholder);

    let location =
        netex::child(node, "Location").ok_or_else(|| skipped(StopDefect::MissingLocation))?;
    let lat = netex::child(location, "Latitude")
        .and_then(|n| n.text())
        .ok_or_else(|| skipped(StopDefect::MissingCoordinate("latitude")))?;
    let lon = netex::child(location, "Longitude")
        .and_then(|n| n.text())
        .ok_or_else(|| skipped(StopDefect::MissingCoordinate("longitude")))?;

    let coordinates = Coordinates::parse(lat, lon).map_err(|e| skipped(e.into()))?;

    Ok(Stop::new(id, coordinates, name))
}
