//! Line listing report.

use std::collections::BTreeMap;
use std::fmt;

use super::Line;

/// Lines grouped by transport mode.
///
/// Modes are in name order; lines within a mode are in public-code order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineListing {
    pub title: String,
    pub by_mode: BTreeMap<String, Vec<Line>>,
}

impl LineListing {
    pub fn total(&self) -> usize {
        self.by_mode.values().map(Vec::len).sum()
    }
}

/// Group lines by transport mode, sorting each group by public code.
pub fn categorize(title: impl Into<String>, lines: Vec<Line>) -> LineListing {
    let mut by_mode: BTreeMap<String, Vec<Line>> = BTreeMap::new();
    for line in lines {
        by_mode
            .entry(line.transport_mode.clone())
            .or_default()
            .push(line);
    }
    for group in by_mode.values_mut() {
        group.sort_by(|a, b| a.public_code.cmp(&b.public_code));
    }
    LineListing {
        title: title.into(),
        by_mode,
    }
}

impl fmt::Display for LineListing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, "{}", "=".repeat(50))?;
        writeln!(f)?;
        writeln!(f, "Total Lines: {}", self.total())?;

        for (mode, lines) in &self.by_mode {
            writeln!(f)?;
            writeln!(f, "{} LINES", mode.to_uppercase())?;
            writeln!(f, "{}", "-".repeat(20))?;
            writeln!(f, "Total {mode} lines: {}", lines.len())?;
            writeln!(f)?;
            for line in lines {
                writeln!(f, "Line {}: {}", line.public_code, line.name)?;
            }
        }
        Ok(())
    }
}
