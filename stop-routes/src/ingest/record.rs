//! Field extraction shared by the JSON and XML readers.

use crate::diagnostics::RecordDefect;
use crate::domain::{LineId, PatternRecord, StopId};

/// Build a record from raw fields, applying the discard rule.
///
/// Line and destination are both required. Blank stop references are
/// dropped; the rest keep their order.
pub(super) fn build<'a>(
    line: Option<&str>,
    destination: Option<&str>,
    stops: impl IntoIterator<Item = &'a str>,
) -> Result<PatternRecord, RecordDefect> {
    let line = line
        .and_then(|l| LineId::parse(l).ok())
        .ok_or(RecordDefect::MissingLine)?;

    let destination = destination
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .ok_or(RecordDefect::MissingDestination)?;

    let stops = stops
        .into_iter()
        .filter_map(|s| StopId::parse(s).ok())
        .collect();

    Ok(PatternRecord::new(line, destination, stops))
}
