//! The correlation fold and its result.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::domain::{LineId, PatternRecord, Serving, StopId};
use crate::registry::StopRegistry;

/// Immutable result of correlating patterns with the stop registry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Correlation {
    /// Every registered stop, with the pairs serving it (possibly none).
    per_stop: BTreeMap<StopId, BTreeSet<Serving>>,
    /// Registered stops with no serving pair.
    unserved_stops: BTreeSet<StopId>,
    /// Referenced stop identifiers that are not registered.
    orphan_references: BTreeSet<StopId>,
}

impl Correlation {
    /// Per-stop serving pairs, keyed by registered stop.
    ///
    /// Orphan references never appear as keys.
    pub fn per_stop(&self) -> &BTreeMap<StopId, BTreeSet<Serving>> {
        &self.per_stop
    }

    /// Pairs serving `stop`, or `None` if the stop is not registered.
    pub fn serving(&self, stop: &StopId) -> Option<&BTreeSet<Serving>> {
        self.per_stop.get(stop)
    }

    /// Distinct lines serving `stop`, in order.
    pub fn lines_at(&self, stop: &StopId) -> BTreeSet<&LineId> {
        self.per_stop
            .get(stop)
            .map(|pairs| pairs.iter().map(|s| &s.line).collect())
            .unwrap_or_default()
    }

    pub fn unserved_stops(&self) -> &BTreeSet<StopId> {
        &self.unserved_stops
    }

    pub fn orphan_references(&self) -> &BTreeSet<StopId> {
        &self.orphan_references
    }

    /// Number of registered stops with at least one serving pair.
    pub fn served_count(&self) -> usize {
        self.per_stop.len() - self.unserved_stops.len()
    }
}

/// Correlate pattern records with the registry.
///
/// For each record, each referenced stop either gains the record's
/// (line, destination) pair or, if unregistered, is noted as an orphan
/// reference. Stops are never fabricated.
pub fn correlate<'r>(
    registry: &StopRegistry,
    records: impl IntoIterator<Item = &'r PatternRecord>,
) -> Correlation {
    let mut per_stop: BTreeMap<StopId, BTreeSet<Serving>> = registry
        .ids()
        .map(|id| (id.clone(), BTreeSet::new()))
        .collect();
    let mut orphan_references = BTreeSet::new();

    for record in records {
        if record.stops.is_empty() {
            continue;
        }
        let serving = record.serving();
        for stop in &record.stops {
            match per_stop.get_mut(stop) {
                Some(pairs) => {
                    pairs.insert(serving.clone());
                }
                None => {
                    orphan_references.insert(stop.clone());
                }
            }
        }
    }

    let unserved_stops: BTreeSet<StopId> = per_stop
        .iter()
        .filter(|(_, pairs)| pairs.is_empty())
        .map(|(id, _)| id.clone())
        .collect();

    debug!(
        stops = per_stop.len(),
        unserved = unserved_stops.len(),
        orphans = orphan_references.len(),
        "Correlation complete"
    );

    Correlation {
        per_stop,
        unserved_stops,
        orphan_references,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Coordinates, Stop};

    fn id(s: &str) -> StopId {
        StopId::parse(s).unwrap()
    }

    fn registry(ids: &[&str]) -> StopRegistry {
        ids.iter()
            .map(|s| Stop::new(id(s), Coordinates::new(37.77, -122.41).unwrap(), "Stop"))
            .collect()
    }

    fn record(line: &str, destination: &str, stops: &[&str]) -> PatternRecord {
        PatternRecord::new(
            LineId::parse(line).unwrap(),
            destination,
            stops.iter().map(|s| id(s)).collect(),
        )
    }

    fn serving(line: &str, destination: &str) -> Serving {
        Serving {
            line: LineId::parse(line).unwrap(),
            destination: destination.to_string(),
        }
    }

    #[test]
    fn single_stop_with_orphan() {
        let registry = registry(&["10001"]);
        let records = vec![record("5", "Downtown", &["10001", "99999"])];

        let result = correlate(&registry, &records);

        assert_eq!(
            result.serving(&id("10001")),
            Some(&BTreeSet::from([serving("5", "Downtown")]))
        );
        assert_eq!(result.orphan_references(), &BTreeSet::from([id("99999")]));
        assert!(result.unserved_stops().is_empty());
        assert!(result.serving(&id("99999")).is_none());
        assert_eq!(result.served_count(), 1);
    }

    #[test]
    fn repeated_pairs_are_not_duplicated() {
        let registry = registry(&["1", "2"]);
        let records = vec![
            record("5", "Downtown", &["1", "2"]),
            record("5", "Downtown", &["2", "1"]),
            record("5", "Beach", &["1"]),
        ];

        let result = correlate(&registry, &records);

        assert_eq!(result.serving(&id("1")).unwrap().len(), 2);
        assert_eq!(result.serving(&id("2")).unwrap().len(), 1);
    }

    #[test]
    fn stop_repeated_within_pattern() {
        let registry = registry(&["1"]);
        let records = vec![record("L", "Loop", &["1", "1", "1"])];
        let result = correlate(&registry, &records);
        assert_eq!(result.serving(&id("1")).unwrap().len(), 1);
    }

    #[test]
    fn unserved_stops_are_reported() {
        let registry = registry(&["1", "2", "3"]);
        let records = vec![record("5", "Downtown", &["2"])];

        let result = correlate(&registry, &records);

        assert_eq!(result.unserved_stops(), &BTreeSet::from([id("1"), id("3")]));
        assert_eq!(result.per_stop().len(), 3);
        assert!(result.serving(&id("1")).unwrap().is_empty());
    }

    #[test]
    fn empty_pattern_contributes_nothing() {
        let registry = registry(&["1"]);
        let records = vec![record("5", "Downtown", &[])];
        let result = correlate(&registry, &records);
        assert_eq!(result.unserved_stops(), &BTreeSet::from([id("1")]));
        assert!(result.orphan_references().is_empty());
    }

    #[test]
    fn lines_at_deduplicates_destinations() {
        let registry = registry(&["1"]);
        let records = vec![
            record("5", "Downtown", &["1"]),
            record("5", "Beach", &["1"]),
            record("38", "Ocean Beach", &["1"]),
        ];
        let result = correlate(&registry, &records);

        let lines: Vec<_> = result.lines_at(&id("1")).into_iter().map(LineId::as_str).collect();
        assert_eq!(lines, vec!["38", "5"]);
        assert!(result.lines_at(&id("nope")).is_empty());
    }

    #[test]
    fn empty_inputs() {
        let result = correlate(&StopRegistry::new(), &Vec::<PatternRecord>::new());
        assert_eq!(result, Correlation::default());
    }
}
