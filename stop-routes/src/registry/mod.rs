//! Stop registry.
//!
//! Parses the NeTEx stop dataset into a stop-identifier → [`Stop`] map.
//! The document itself must be well-formed; individual entries that
//! cannot be registered are reported as diagnostics.

mod error;
mod loader;

use std::collections::BTreeMap;

use crate::domain::{Stop, StopId};

pub use error::RegistryError;
pub use loader::{DEFAULT_STOP_NAME, load, load_file, load_with_placeholder};

/// Registered stops keyed by identifier.
///
/// Identifiers are unique; when the same identifier is inserted twice the
/// first stop is kept.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StopRegistry {
    stops: BTreeMap<StopId, Stop>,
}

impl StopRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a stop unless its identifier is already registered.
    ///
    /// Returns `false` (and leaves the registry unchanged) on a duplicate.
    pub fn insert(&mut self, stop: Stop) -> bool {
        if self.stops.contains_key(&stop.id) {
            return false;
        }
        self.stops.insert(stop.id.clone(), stop);
        true
    }

    pub fn get(&self, id: &StopId) -> Option<&Stop> {
        self.stops.get(id)
    }

    pub fn contains(&self, id: &StopId) -> bool {
        self.stops.contains_key(id)
    }

    /// Stops in identifier order.
    pub fn stops(&self) -> impl Iterator<Item = &Stop> {
        self.stops.values()
    }

    /// Identifiers in order.
    pub fn ids(&self) -> impl Iterator<Item = &StopId> {
        self.stops.keys()
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }
}

impl FromIterator<Stop> for StopRegistry {
    fn from_iter<T: IntoIterator<Item = Stop>>(iter: T) -> Self {
        let mut registry = Self::new();
        for stop in iter {
            registry.insert(stop);
        }
        registry
    }
}
