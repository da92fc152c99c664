//! Tabular (CSV) export.

use std::io;
use std::path::Path;

use crate::correlate::Correlation;
use crate::registry::StopRegistry;

use super::ExportError;

/// Leading columns before the per-route columns.
const FIXED_COLUMNS: [&str; 3] = ["Stop Number", "Total Routes", "Description"];

/// Write one row per registered stop, in identifier order.
///
/// Each row holds the stop id, the number of distinct lines serving it,
/// its name, and those line ids. The header has one `Route N` column per
/// line of the busiest stop; shorter rows are padded with empty cells.
pub fn write_csv<W: io::Write>(
    registry: &StopRegistry,
    correlation: &Correlation,
    writer: W,
) -> Result<(), ExportError> {
    let rows: Vec<Vec<String>> = registry
        .stops()
        .map(|stop| {
            let lines = correlation.lines_at(&stop.id);
            let mut row = vec![
                stop.id.to_string(),
                lines.len().to_string(),
                stop.name.clone(),
            ];
            row.extend(lines.into_iter().map(ToString::to_string));
            row
        })
        .collect();

    let max_routes = rows
        .iter()
        .map(|row| row.len() - FIXED_COLUMNS.len())
        .max()
        .unwrap_or(0);
    let width = FIXED_COLUMNS.len() + max_routes;

    let mut out = csv::Writer::from_writer(writer);

    let header = FIXED_COLUMNS
        .iter()
        .map(|c| c.to_string())
        .chain((1..=max_routes).map(|i| format!("Route {i}")));
    out.write_record(header)?;

    for mut row in rows {
        row.resize(width, String::new());
        out.write_record(&row)?;
    }

    out.flush()?;
    Ok(())
}

/// Write the CSV export to `path`.
pub fn write_csv_file(
    path: &Path,
    registry: &StopRegistry,
    correlation: &Correlation,
) -> Result<(), ExportError> {
    let file = std::fs::File::create(path).map_err(ExportError::write(path))?;
    write_csv(registry, correlation, io::BufWriter::new(file))
}
