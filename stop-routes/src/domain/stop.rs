//! Stop location types.

use std::fmt;

use super::StopId;

/// Error returned when a latitude/longitude pair cannot be used.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidCoordinate {
    /// The text is not a floating-point number
    #[error("{axis} {value:?} is not a number")]
    NotANumber { axis: &'static str, value: String },

    /// The number is NaN, infinite, or outside the WGS84 range
    #[error("{axis} {value} is out of range")]
    OutOfRange { axis: &'static str, value: f64 },
}

/// A WGS84 position in decimal degrees.
///
/// Latitude is within [-90, 90] and longitude within [-180, 180];
/// both are finite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    lat: f64,
    lon: f64,
}

impl Coordinates {
    /// Central San Francisco, the default map centre.
    pub const SAN_FRANCISCO: Coordinates = Coordinates {
        lat: 37.7749,
        lon: -122.4194,
    };

    /// Create coordinates from already-parsed values.
    pub fn new(lat: f64, lon: f64) -> Result<Self, InvalidCoordinate> {
        check_range("latitude", lat, 90.0)?;
        check_range("longitude", lon, 180.0)?;
        Ok(Self { lat, lon })
    }

    /// Parse coordinates from the text nodes of a location element.
    pub fn parse(lat: &str, lon: &str) -> Result<Self, InvalidCoordinate> {
        let lat = parse_axis("latitude", lat)?;
        let lon = parse_axis("longitude", lon)?;
        Self::new(lat, lon)
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lon(&self) -> f64 {
        self.lon
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lat, self.lon)
    }
}

fn parse_axis(axis: &'static str, text: &str) -> Result<f64, InvalidCoordinate> {
    text.trim()
        .parse::<f64>()
        .map_err(|_| InvalidCoordinate::NotANumber {
            axis,
            value: text.trim().to_string(),
        })
}

fn check_range(axis: &'static str, value: f64, limit: f64) -> Result<(), InvalidCoordinate> {
    if value.is_finite() && (-limit..=limit).contains(&value) {
        Ok(())
    } else {
        Err(InvalidCoordinate::OutOfRange { axis, value })
    }
}

/// A registered stop: identifier, position, and display name.
///
/// Immutable once loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct Stop {
    pub id: StopId,
    pub coordinates: Coordinates,
    pub name: String,
}

impl Stop {
    pub fn new(id: StopId, coordinates: Coordinates, name: impl Into<String>) -> Self {
        Self {
            id,
            coordinates,
            name: name.into(),
        }
    }
}
