//! End-to-end runs over fixture datasets written to a temp directory.

use std::collections::BTreeSet;
use std::path::Path;

use stop_routes::config::Config;
use stop_routes::diagnostics::{Diagnostic, FileFailure};
use stop_routes::domain::{LineId, Serving, StopId};
use stop_routes::export;
use stop_routes::pipeline::{self, PipelineError};
use stop_routes::registry::RegistryError;

const STOPS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Siri xmlns="http://www.siri.org.uk/siri" xmlns:netex="http://www.netex.org.uk/netex">
  <netex:dataObjects>
    <netex:SiteFrame>
      <netex:scheduledStopPoints>
        <netex:ScheduledStopPoint id="10001">
          <netex:Name>Main St</netex:Name>
          <netex:Location><netex:Longitude>-122.41</netex:Longitude><netex:Latitude>37.77</netex:Latitude></netex:Location>
        </netex:ScheduledStopPoint>
        <netex:ScheduledStopPoint id="10002">
          <netex:Name>Market St &amp; 4th St</netex:Name>
          <netex:Location><netex:Longitude>-122.40</netex:Longitude><netex:Latitude>37.78</netex:Latitude></netex:Location>
        </netex:ScheduledStopPoint>
        <netex:ScheduledStopPoint id="10003">
          <netex:Location><netex:Longitude>-122.39</netex:Longitude><netex:Latitude>37.79</netex:Latitude></netex:Location>
        </netex:ScheduledStopPoint>
        <netex:ScheduledStopPoint id="10004">
          <netex:Name>Broken</netex:Name>
          <netex:Location><netex:Longitude>-122.39</netex:Longitude><netex:Latitude>n/a</netex:Latitude></netex:Location>
        </netex:ScheduledStopPoint>
      </netex:scheduledStopPoints>
    </netex:SiteFrame>
  </netex:dataObjects>
</Siri>"#;

const LINE_5_JSON: &str = r#"{"journeyPatterns": [
  {"LineRef": "5", "DestinationDisplayView": {"FontText": "Downtown"},
   "PointsInSequence": {"StopPointInJourneyPattern": [
     {"ScheduledStopPointRef": "10001"}, {"ScheduledStopPointRef": "99999"}]}},
  {"LineRef": "5", "PointsInSequence": {"StopPointInJourneyPattern": [{"ScheduledStopPointRef": "10003"}]}}
]}"#;

const LINE_KT_XML: &str = r#"<?xml version="1.0"?>
<Siri xmlns:netex="http://www.netex.org.uk/netex">
  <netex:ServiceJourneyPattern id="KT:IB">
    <netex:LineRef ref="KT"/>
    <netex:DestinationDisplayView><netex:FontText>Sunnydale</netex:FontText></netex:DestinationDisplayView>
    <netex:pointsInSequence>
      <netex:StopPointInJourneyPattern><netex:ScheduledStopPointRef ref="10001"/></netex:StopPointInJourneyPattern>
      <netex:StopPointInJourneyPattern><netex:ScheduledStopPointRef ref="10004"/></netex:StopPointInJourneyPattern>
    </netex:pointsInSequence>
  </netex:ServiceJourneyPattern>
</Siri>"#;

fn id(s: &str) -> StopId {
    StopId::parse(s).unwrap()
}

fn serving(line: &str, destination: &str) -> Serving {
    Serving {
        line: LineId::parse(line).unwrap(),
        destination: destination.to_string(),
    }
}

fn fixture(root: &Path) -> Config {
    let routes = root.join("Routes");
    std::fs::create_dir(&routes).unwrap();
    std::fs::write(root.join("stops.xml"), STOPS).unwrap();

    let mut bom_json = b"\xEF\xBB\xBF".to_vec();
    bom_json.extend_from_slice(LINE_5_JSON.as_bytes());
    std::fs::write(routes.join("5.xml"), bom_json).unwrap();
    std::fs::write(routes.join("KT.xml"), LINE_KT_XML).unwrap();
    std::fs::write(routes.join("1.xml"), r#"{"journeyPatterns": [ {"LineRef": "1", "#).unwrap();
    std::fs::write(routes.join("2.xml"), "Quota exceeded").unwrap();

    Config::default()
        .with_stops_path(root.join("stops.xml"))
        .with_routes_dir(routes)
        .with_map_output(root.join("map.html"))
        .with_csv_output(root.join("stops.csv"))
}

#[test]
fn correlates_fixture_dataset() {
    let dir = tempfile::tempdir().unwrap();
    let config = fixture(dir.path());

    let report = pipeline::run_blocking(&config).unwrap();
    let correlation = &report.correlation;

    assert_eq!(report.registry.len(), 3);
    assert_eq!(
        correlation.serving(&id("10001")),
        Some(&BTreeSet::from([
            serving("5", "Downtown"),
            serving("KT", "Sunnydale")
        ]))
    );
    assert_eq!(report.registry.get(&id("10003")).unwrap().name, "Unknown");

    // 10004 had a bad latitude: never registered, so it is an orphan, not unserved.
    assert_eq!(
        correlation.orphan_references(),
        &BTreeSet::from([id("10004"), id("99999")])
    );
    assert_eq!(
        correlation.unserved_stops(),
        &BTreeSet::from([id("10002"), id("10003")])
    );
    assert!(correlation.serving(&id("10004")).is_none());
}

#[test]
fn summary_counts_every_category() {
    let dir = tempfile::tempdir().unwrap();
    let config = fixture(dir.path());

    let summary = pipeline::run_blocking(&config).unwrap().summary();

    assert_eq!(summary.stops_registered, 3);
    assert_eq!(summary.stops_skipped, 1);
    assert_eq!(summary.files_seen, 4);
    assert_eq!(summary.files_skipped, 2);
    assert_eq!(summary.records, 2);
    assert_eq!(summary.records_skipped, 1);
    assert_eq!(summary.warnings, 0);
    assert_eq!(summary.stops_served, 1);
    assert_eq!(summary.unserved_stops, 2);
    assert_eq!(summary.orphan_references, 2);
}

#[test]
fn file_diagnostics_are_in_filename_order() {
    let dir = tempfile::tempdir().unwrap();
    let config = fixture(dir.path());

    let report = pipeline::run_blocking(&config).unwrap();
    let skipped: Vec<_> = report
        .diagnostics()
        .filter_map(|d| match d {
            Diagnostic::SkippedFile { file, reason } => Some((file.as_str(), reason)),
            _ => None,
        })
        .collect();

    assert_eq!(skipped.len(), 2);
    assert_eq!(skipped[0].0, "1.xml");
    assert!(matches!(skipped[0].1, FileFailure::Json(_)));
    assert_eq!(skipped[1], ("2.xml", &FileFailure::Unrecognized));
}

#[tokio::test]
async fn concurrent_run_matches_sequential() {
    let dir = tempfile::tempdir().unwrap();
    let config = fixture(dir.path());

    let concurrent = pipeline::run(&config).await.unwrap();
    let sequential = pipeline::run_blocking(&config).unwrap();

    assert_eq!(concurrent.correlation, sequential.correlation);
    assert_eq!(concurrent.summary(), sequential.summary());
}

#[test]
fn exports_both_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let config = fixture(dir.path());
    let report = pipeline::run_blocking(&config).unwrap();

    export::write_csv_file(&config.csv_output, &report.registry, &report.correlation).unwrap();
    export::write_map_file(
        &config.map_output,
        &report.registry,
        &report.correlation,
        &config.map,
    )
    .unwrap();

    let csv = std::fs::read_to_string(&config.csv_output).unwrap();
    let rows: Vec<_> = csv.lines().collect();
    assert_eq!(rows[0], "Stop Number,Total Routes,Description,Route 1,Route 2");
    assert_eq!(rows[1], "10001,2,Main St,5,KT");
    assert_eq!(rows[2], "10002,0,Market St & 4th St,,");
    assert_eq!(rows.len(), 4);

    let html = std::fs::read_to_string(&config.map_output).unwrap();
    assert!(html.contains(r#""lines":["5 to Downtown","KT to Sunnydale"]"#));
}

#[test]
fn unparseable_stop_dataset_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let config = fixture(dir.path());
    std::fs::write(&config.stops_path, "<Siri><broken></Siri>").unwrap();

    let result = pipeline::run_blocking(&config);
    assert!(matches!(
        result,
        Err(PipelineError::Registry(RegistryError::Xml(_)))
    ));
}

#[test]
fn missing_pattern_directory_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let config = fixture(dir.path()).with_routes_dir(dir.path().join("nope"));

    let result = pipeline::run_blocking(&config);
    assert!(matches!(result, Err(PipelineError::Ingest(_))));
}
