//! Map (HTML) export.
//!
//! Renders a self-contained Leaflet page. Marker data is embedded as a
//! JSON array and the popups are built client-side with `textContent`,
//! so stop names never reach the page as markup.

use std::path::Path;

use askama::Template;
use serde::Serialize;

use crate::correlate::Correlation;
use crate::domain::Coordinates;
use crate::registry::StopRegistry;

use super::ExportError;

/// Map page template.
#[derive(Template)]
#[template(path = "stop_map.html")]
struct StopMapTemplate<'a> {
    title: &'a str,
    center_lat: f64,
    center_lon: f64,
    zoom: u8,
    markers_json: String,
}

/// One marker as embedded in the page.
#[derive(Debug, Serialize)]
struct MarkerView<'a> {
    id: &'a str,
    name: &'a str,
    lat: f64,
    lon: f64,
    /// "<line> to <destination>" per serving pair.
    lines: Vec<String>,
}

/// Map presentation options.
#[derive(Debug, Clone)]
pub struct MapOptions {
    pub title: String,
    /// Centre used when there are no stops to average.
    pub default_center: Coordinates,
    pub zoom: u8,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            title: "Stops and Routes".to_string(),
            default_center: Coordinates::SAN_FRANCISCO,
            zoom: 12,
        }
    }
}

/// Render the map page for every registered stop.
pub fn render_map(
    registry: &StopRegistry,
    correlation: &Correlation,
    options: &MapOptions,
) -> Result<String, ExportError> {
    let markers: Vec<MarkerView<'_>> = registry
        .stops()
        .map(|stop| MarkerView {
            id: stop.id.as_str(),
            name: &stop.name,
            lat: stop.coordinates.lat(),
            lon: stop.coordinates.lon(),
            lines: correlation
                .serving(&stop.id)
                .map(|pairs| pairs.iter().map(ToString::to_string).collect())
                .unwrap_or_default(),
        })
        .collect();

    let center = mean_center(registry).unwrap_or(options.default_center);

    let template = StopMapTemplate {
        title: &options.title,
        center_lat: center.lat(),
        center_lon: center.lon(),
        zoom: options.zoom,
        markers_json: script_safe_json(&markers)?,
    };

    Ok(template.render()?)
}

/// Render the map page to `path`.
pub fn write_map_file(
    path: &Path,
    registry: &StopRegistry,
    correlation: &Correlation,
    options: &MapOptions,
) -> Result<(), ExportError> {
    let html = render_map(registry, correlation, options)?;
    std::fs::write(path, html).map_err(ExportError::write(path))
}

fn mean_center(registry: &StopRegistry) -> Option<Coordinates> {
    if registry.is_empty() {
        return None;
    }
    let n = registry.len() as f64;
    let (lat, lon) = registry.stops().fold((0.0, 0.0), |(lat, lon), stop| {
        (lat + stop.coordinates.lat(), lon + stop.coordinates.lon())
    });
    Coordinates::new(lat / n, lon / n).ok()
}

/// JSON that can sit inside a `<script>` element.
fn script_safe_json<T: Serialize>(value: &T) -> Result<String, ExportError> {
    Ok(serde_json::to_string(value)?.replace("</", "<\\/"))
}
