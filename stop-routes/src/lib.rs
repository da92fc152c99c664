//! Transit stop/line correlation.
//!
//! Reconciles a NeTEx stop dataset with a directory of per-line pattern
//! files (mixed XML and JSON) into a single stop → {(line, destination)}
//! mapping, tolerating malformed entries, records, and files. The result
//! feeds a map page and a CSV export.

pub mod config;
pub mod correlate;
pub mod decode;
pub mod diagnostics;
pub mod domain;
pub mod export;
pub mod fetch;
pub mod ingest;
pub mod lines;
pub mod netex;
pub mod pipeline;
pub mod registry;
