//! Stop/line correlation.
//!
//! Folds ingested pattern records against the stop registry to build the
//! canonical stop → {(line, destination)} mapping, plus the coverage gaps
//! an operator should see: registered stops no line serves, and stop
//! references that match no registered stop.
//!
//! The fold is pure and order-independent: every collection is a set, so
//! reordering or repeating records never changes the result.

mod correlation;

pub use correlation::{Correlation, correlate};
