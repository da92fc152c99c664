//! Load → ingest → correlate.
//!
//! The stop registry and the pattern directory are independent inputs,
//! so [`run`] reads them concurrently on the blocking pool and correlates
//! once both are done. [`run_blocking`] does the same sequentially.

use std::fmt;

use tracing::info;

use crate::config::Config;
use crate::correlate::{Correlation, correlate};
use crate::diagnostics::{Diagnostic, DiagnosticKind, Diagnostics};
use crate::ingest::{self, Ingest, IngestError};
use crate::registry::{self, RegistryError, StopRegistry};

/// Fatal pipeline errors.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error("loader task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Everything a run produced.
#[derive(Debug, Clone)]
pub struct Report {
    pub registry: StopRegistry,
    /// Diagnostics from loading the stop dataset.
    pub stop_diagnostics: Diagnostics,
    pub ingest: Ingest,
    pub correlation: Correlation,
}

impl Report {
    /// Correlate already-loaded inputs.
    pub fn build(registry: StopRegistry, stop_diagnostics: Diagnostics, ingest: Ingest) -> Self {
        let correlation = correlate(&registry, &ingest.records);
        Self {
            registry,
            stop_diagnostics,
            ingest,
            correlation,
        }
    }

    /// All diagnostics: stop dataset first, then pattern files in order.
    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.stop_diagnostics.iter().chain(self.ingest.diagnostics.iter())
    }

    pub fn summary(&self) -> Summary {
        let count = |kind| {
            self.stop_diagnostics.count(kind) + self.ingest.diagnostics.count(kind)
        };

        Summary {
            stops_registered: self.registry.len(),
            stops_skipped: count(DiagnosticKind::SkippedStop),
            files_seen: self.ingest.files_seen,
            files_skipped: count(DiagnosticKind::SkippedFile),
            records: self.ingest.records.len(),
            records_skipped: count(DiagnosticKind::SkippedRecord),
            warnings: count(DiagnosticKind::Warning),
            stops_served: self.correlation.served_count(),
            unserved_stops: self.correlation.unserved_stops().len(),
            orphan_references: self.correlation.orphan_references().len(),
        }
    }
}

/// Counts for the terminal report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub stops_registered: usize,
    pub stops_skipped: usize,
    pub files_seen: usize,
    pub files_skipped: usize,
    pub records: usize,
    pub records_skipped: usize,
    pub warnings: usize,
    pub stops_served: usize,
    pub unserved_stops: usize,
    pub orphan_references: usize,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = [
            ("Stops registered", self.stops_registered),
            ("Stops skipped", self.stops_skipped),
            ("Pattern files found", self.files_seen),
            ("Pattern files skipped", self.files_skipped),
            ("Pattern records", self.records),
            ("Pattern records skipped", self.records_skipped),
            ("Decoding warnings", self.warnings),
            ("Stops served", self.stops_served),
            ("Unserved stops", self.unserved_stops),
            ("Orphan stop references", self.orphan_references),
        ];
        for (label, value) in rows {
            writeln!(f, "{:<25}{value:>8}", format!("{label}:"))?;
        }
        Ok(())
    }
}

/// Run the pipeline, reading both inputs concurrently.
pub async fn run(config: &Config) -> Result<Report, PipelineError> {
    let stops_path = config.stops_path.clone();
    let placeholder = config.stop_name_placeholder.clone();
    let routes_dir = config.routes_dir.clone();

    let load_task =
        tokio::task::spawn_blocking(move || registry::load_file(&stops_path, &placeholder));
    let ingest_task = tokio::task::spawn_blocking(move || ingest::ingest(&routes_dir));

    let (loaded, ingested) = tokio::try_join!(load_task, ingest_task)?;
    let (registry, stop_diagnostics) = loaded?;
    let report = Report::build(registry, stop_diagnostics, ingested?);

    log_summary(&report.summary());
    Ok(report)
}

/// Run the pipeline on the current thread.
pub fn run_blocking(config: &Config) -> Result<Report, PipelineError> {
    let (registry, stop_diagnostics) =
        registry::load_file(&config.stops_path, &config.stop_name_placeholder)?;
    let ingested = ingest::ingest(&config.routes_dir)?;
    let report = Report::build(registry, stop_diagnostics, ingested);

    log_summary(&report.summary());
    Ok(report)
}

fn log_summary(summary: &Summary) {
    info!(
        stops = summary.stops_registered,
        served = summary.stops_served,
        unserved = summary.unserved_stops,
        orphans = summary.orphan_references,
        "Correlated stops with lines"
    );
}
