//! Journey pattern types.

use std::fmt;

use super::{LineId, StopId};

/// One line/destination variant extracted from a pattern file.
///
/// Both the line and the destination are required; a record with zero
/// stop references is valid but contributes nothing to correlation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternRecord {
    pub line: LineId,
    pub destination: String,
    /// Referenced stops, in journey order.
    pub stops: Vec<StopId>,
}

impl PatternRecord {
    pub fn new(line: LineId, destination: impl Into<String>, stops: Vec<StopId>) -> Self {
        Self {
            line,
            destination: destination.into(),
            stops,
        }
    }

    /// The (line, destination) pair this record contributes to each stop.
    pub fn serving(&self) -> Serving {
        Serving {
            line: self.line.clone(),
            destination: self.destination.clone(),
        }
    }
}

/// A (line, destination) pair serving a stop.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Serving {
    pub line: LineId,
    pub destination: String,
}

impl fmt::Display for Serving {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.line, self.destination)
    }
}
