//! JSON pattern documents.
//!
//! These DTOs mirror the transit-patterns API JSON. Everything is
//! optional because the feed omits fields rather than sending nulls.

use serde::Deserialize;
use serde_json::Value;

use crate::diagnostics::{Diagnostic, Diagnostics, FileFailure, RecordDefect};
use crate::domain::PatternRecord;

use super::record;

/// A journey pattern object.
#[derive(Debug, Clone, Deserialize)]
pub struct JourneyPatternDto {
    #[serde(rename = "LineRef")]
    pub line_ref: Option<Scalar>,

    #[serde(rename = "DestinationDisplayView")]
    pub destination_display_view: Option<DestinationDisplayDto>,

    #[serde(rename = "PointsInSequence")]
    pub points_in_sequence: Option<PointsInSequenceDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DestinationDisplayDto {
    #[serde(rename = "FontText")]
    pub font_text: Option<String>,
}

/// Stop points are kept as raw values so one odd element cannot discard
/// the whole pattern.
#[derive(Debug, Clone, Deserialize)]
pub struct PointsInSequenceDto {
    #[serde(rename = "StopPointInJourneyPattern")]
    pub stop_points: Option<OneOrMany<Value>>,
}

/// A reference that may arrive as a string or a bare number.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Text(String),
    Number(serde_json::Number),
}

impl Scalar {
    fn into_string(self) -> String {
        match self {
            Scalar::Text(s) => s,
            Scalar::Number(n) => n.to_string(),
        }
    }
}

/// A list the feed collapses to a single object when it has one element.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::Many(v) => v,
            OneOrMany::One(t) => vec![t],
        }
    }
}

/// Parse a JSON pattern document.
///
/// Accepts either an object with a `journeyPatterns` list or a bare list
/// of journey patterns. Each pattern is read independently: a pattern
/// that is incomplete or of the wrong shape becomes a diagnostic.
pub(super) fn parse(
    text: &str,
    file: &str,
    diagnostics: &mut Diagnostics,
) -> Result<Vec<PatternRecord>, FileFailure> {
    let document: Value =
        serde_json::from_str(text).map_err(|e| FileFailure::Json(e.to_string()))?;

    let patterns = match document {
        Value::Array(items) => items,
        Value::Object(mut fields) => match fields.remove("journeyPatterns") {
            Some(Value::Array(items)) => items,
            None | Some(Value::Null) => {
                tracing::debug!(file, "No journeyPatterns in JSON document");
                Vec::new()
            }
            Some(_) => {
                return Err(FileFailure::UnexpectedShape(
                    "journeyPatterns is not a list",
                ));
            }
        },
        _ => return Err(FileFailure::UnexpectedShape("top level is not an object")),
    };

    let mut records = Vec::with_capacity(patterns.len());
    for (index, value) in patterns.into_iter().enumerate() {
        match convert(value) {
            Ok(record) => records.push(record),
            Err(reason) => diagnostics.push(Diagnostic::SkippedRecord {
                origin: file.to_string(),
                position: index + 1,
                reason,
            }),
        }
    }

    Ok(records)
}

fn convert(value: Value) -> Result<PatternRecord, RecordDefect> {
    let dto: JourneyPatternDto =
        serde_json::from_value(value).map_err(|e| RecordDefect::Malformed(e.to_string()))?;

    let line = dto.line_ref.map(Scalar::into_string);
    let destination = dto.destination_display_view.and_then(|d| d.font_text);
    let stops: Vec<String> = dto
        .points_in_sequence
        .and_then(|p| p.stop_points)
        .map(OneOrMany::into_vec)
        .unwrap_or_default()
        .into_iter()
        .filter_map(stop_point_ref)
        .collect();

    record::build(
        line.as_deref(),
        destination.as_deref(),
        stops.iter().map(String::as_str),
    )
}

/// The `ScheduledStopPointRef` of a stop point, if it has a usable one.
fn stop_point_ref(stop_point: Value) -> Option<String> {
    match stop_point {
        Value::Object(mut fields) => match fields.remove("ScheduledStopPointRef")? {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::DiagnosticKind;

    fn stop_ids(record: &PatternRecord) -> Vec<&str> {
        record.stops.iter().map(|s| s.as_str()).collect()
    }

    const SAMPLE: &str = r#"{
        "journeyPatterns": [
            {
                "serviceJourneyPatternRef": "1:5:IB",
                "LineRef": "5",
                "Name": "Inbound",
                "DestinationDisplayView": { "FontText": "Downtown" },
                "PointsInSequence": {
                    "StopPointInJourneyPattern": [
                        { "Order": "1", "ScheduledStopPointRef": "10001" },
                        { "Order": "2", "ScheduledStopPointRef": "10002" },
                        { "Order": "3" }
                    ],
                    "TimingPointInJourneyPattern": []
                }
            },
            {
                "LineRef": "5",
                "DestinationDisplayView": { "FontText": "" },
                "PointsInSequence": { "StopPointInJourneyPattern": [] }
            },
            {
                "LineRef": 38,
                "DestinationDisplayView": { "FontText": "Ocean Beach" },
                "PointsInSequence": {
                    "StopPointInJourneyPattern": { "ScheduledStopPointRef": 13338 }
                }
            },
            "not a pattern"
        ]
    }"#;

    #[test]
    fn extracts_patterns() {
        let mut diagnostics = Diagnostics::new();
        let records = parse(SAMPLE, "5.json", &mut diagnostics).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].line.as_str(), "5");
        assert_eq!(records[0].destination, "Downtown");
        assert_eq!(stop_ids(&records[0]), vec!["10001", "10002"]);

        assert_eq!(records[1].line.as_str(), "38");
        assert_eq!(stop_ids(&records[1]), vec!["13338"]);
    }

    #[test]
    fn incomplete_and_malformed_patterns_are_diagnosed() {
        let mut diagnostics = Diagnostics::new();
        parse(SAMPLE, "5.json", &mut diagnostics).unwrap();

        assert_eq!(diagnostics.count(DiagnosticKind::SkippedRecord), 2);
        let mut iter = diagnostics.iter();
        assert_eq!(
            iter.next(),
            Some(&Diagnostic::SkippedRecord {
                origin: "5.json".into(),
                position: 2,
                reason: RecordDefect::MissingDestination,
            })
        );
        assert!(matches!(
            iter.next(),
            Some(Diagnostic::SkippedRecord {
                position: 4,
                reason: RecordDefect::Malformed(_),
                ..
            })
        ));
    }

    #[test]
    fn odd_stop_points_are_ignored() {
        let text = r#"[{
            "LineRef": "5",
            "DestinationDisplayView": { "FontText": "Downtown" },
            "PointsInSequence": {
                "StopPointInJourneyPattern": [
                    { "ScheduledStopPointRef": "10001" },
                    "10009",
                    { "ScheduledStopPointRef": { "ref": "10010" } },
                    { "ScheduledStopPointRef": null },
                    42,
                    { "ScheduledStopPointRef": 10002 }
                ]
            }
        }]"#;
        let mut diagnostics = Diagnostics::new();
        let records = parse(text, "5.json", &mut diagnostics).unwrap();

        assert!(diagnostics.is_empty());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].destination, "Downtown");
        assert_eq!(stop_ids(&records[0]), vec!["10001", "10002"]);
    }

    #[test]
    fn stop_point_list_length_does_not_change_parsing() {
        for stop_points in [r#"["10001"]"#, r#"["10001", "10002"]"#] {
            let text = format!(
                r#"[{{"LineRef": "5", "DestinationDisplayView": {{"FontText": "Downtown"}},
                    "PointsInSequence": {{"StopPointInJourneyPattern": {stop_points}}}}}]"#
            );
            let mut diagnostics = Diagnostics::new();
            let records = parse(&text, "5.json", &mut diagnostics).unwrap();
            assert_eq!(records.len(), 1, "{stop_points}");
            assert!(records[0].stops.is_empty());
            assert!(diagnostics.is_empty());
        }
    }

    #[test]
    fn missing_line_ref_is_discarded() {
        let text = r#"{"journeyPatterns": [{"DestinationDisplayView": {"FontText": "Downtown"}}]}"#;
        let mut diagnostics = Diagnostics::new();
        let records = parse(text, "x", &mut diagnostics).unwrap();
        assert!(records.is_empty());
        assert_eq!(
            diagnostics.iter().next(),
            Some(&Diagnostic::SkippedRecord {
                origin: "x".into(),
                position: 1,
                reason: RecordDefect::MissingLine,
            })
        );
    }

    #[test]
    fn bare_list_is_accepted() {
        let text = r#"[{"LineRef": "N", "DestinationDisplayView": {"FontText": "Judah"}}]"#;
        let mut diagnostics = Diagnostics::new();
        let records = parse(text, "N", &mut diagnostics).unwrap();
        assert_eq!(records.len(), 1);
        assert!(records[0].stops.is_empty());
    }

    #[test]
    fn missing_journey_patterns_yields_nothing() {
        let mut diagnostics = Diagnostics::new();
        let records = parse(r#"{"Contents": {}}"#, "x", &mut diagnostics).unwrap();
        assert!(records.is_empty());
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn wrong_shape_fails_file() {
        let mut diagnostics = Diagnostics::new();
        assert_eq!(
            parse(r#"{"journeyPatterns": {}}"#, "x", &mut diagnostics),
            Err(FileFailure::UnexpectedShape("journeyPatterns is not a list"))
        );
        assert!(matches!(
            parse("42", "x", &mut diagnostics),
            Err(FileFailure::UnexpectedShape(_))
        ));
    }

    #[test]
    fn malformed_json_fails_file() {
        let mut diagnostics = Diagnostics::new();
        let result = parse(r#"{"journeyPatterns": [ {"LineRef": "5"  "#, "x", &mut diagnostics);
        assert!(matches!(result, Err(FileFailure::Json(_))));
    }
}
