//! Domain types for stop/line correlation.
//!
//! These types represent validated transit data. Identifiers and
//! coordinates enforce their invariants at construction time, so code
//! that receives them can trust their validity.

mod ids;
mod pattern;
mod stop;

pub use ids::{InvalidId, LineId, StopId};
pub use pattern::{PatternRecord, Serving};
pub use stop::{Coordinates, InvalidCoordinate, Stop};
