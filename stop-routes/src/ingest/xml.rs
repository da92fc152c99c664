//! NeTEx XML pattern documents.
//!
//! A pattern document carries `ServiceJourneyPattern` (or plain
//! `JourneyPattern`) elements. The line and destination are either
//! inline or reachable through `RouteRef` / `DestinationDisplayRef`, so
//! the referenced `Route` and `DestinationDisplay` elements are indexed
//! by `id` first.

use std::collections::HashMap;

use roxmltree::{Document, Node};

use crate::diagnostics::{Diagnostic, Diagnostics, FileFailure};
use crate::domain::PatternRecord;
use crate::netex;

use super::record;

struct Index<'a, 'input> {
    routes: HashMap<&'a str, Node<'a, 'input>>,
    destinations: HashMap<&'a str, Node<'a, 'input>>,
}

impl<'a, 'input> Index<'a, 'input> {
    fn build(doc: &'a Document<'input>) -> Self {
        let mut routes = HashMap::new();
        let mut destinations = HashMap::new();
        for node in doc.descendants() {
            let Some(id) = node.attribute("id") else {
                continue;
            };
            if netex::is(node, "Route") {
                routes.entry(id).or_insert(node);
            } else if netex::is(node, "DestinationDisplay") {
                destinations.entry(id).or_insert(node);
            }
        }
        Self {
            routes,
            destinations,
        }
    }

    fn line(&self, pattern: Node<'a, 'input>) -> Option<&'a str> {
        netex::descendant(pattern, "LineRef")
            .and_then(netex::reference)
            .or_else(|| {
                let route_ref = netex::child(pattern, "RouteRef").and_then(netex::reference)?;
                let route = self.routes.get(route_ref)?;
                netex::descendant(*route, "LineRef").and_then(netex::reference)
            })
            .or_else(|| {
                pattern
                    .ancestors()
                    .find(|n| netex::is(*n, "Line"))
                    .and_then(|line| line.attribute("id"))
            })
    }

    fn destination(&self, pattern: Node<'a, 'input>) -> Option<&'a str> {
        netex::descendant(pattern, "DestinationDisplayView")
            .and_then(|view| netex::child(view, "FontText"))
            .and_then(netex::text)
            .or_else(|| {
                let display_ref =
                    netex::descendant(pattern, "DestinationDisplayRef").and_then(netex::reference)?;
                let display = *self.destinations.get(display_ref)?;
                netex::child(display, "FrontText")
                    .and_then(netex::text)
                    .or_else(|| netex::child(display, "Name").and_then(netex::text))
            })
    }
}

fn is_pattern(node: Node<'_, '_>) -> bool {
    netex::is(node, "ServiceJourneyPattern") || netex::is(node, "JourneyPattern")
}

/// Stop references listed in a pattern's `pointsInSequence`, in document
/// order.
fn stop_refs<'a>(pattern: Node<'a, '_>) -> impl Iterator<Item = &'a str> {
    netex::child(pattern, "pointsInSequence")
        .into_iter()
        .flat_map(|points| points.children())
        .filter(|n| netex::is(*n, "StopPointInJourneyPattern"))
        .filter_map(|sp| netex::child(sp, "ScheduledStopPointRef").and_then(netex::reference))
}

/// Parse a NeTEx XML pattern document.
pub(super) fn parse(
    text: &str,
    file: &str,
    diagnostics: &mut Diagnostics,
) -> Result<Vec<PatternRecord>, FileFailure> {
    let doc = Document::parse(text).map_err(|e| FileFailure::Xml(e.to_string()))?;
    let index = Index::build(&doc);

    let mut records = Vec::new();
    for (i, pattern) in doc.descendants().filter(|n| is_pattern(*n)).enumerate() {
        let result = record::build(
            index.line(pattern),
            index.destination(pattern),
            stop_refs(pattern),
        );
        match result {
            Ok(record) => records.push(record),
            Err(reason) => diagnostics.push(Diagnostic::SkippedRecord {
                origin: file.to_string(),
                position: i + 1,
                reason,
            }),
        }
    }

    Ok(records)
}
