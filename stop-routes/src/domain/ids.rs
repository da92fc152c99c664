//! Agency-assigned identifier types.

use std::fmt;

/// Error returned when parsing an empty identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind} identifier: must not be empty")]
pub struct InvalidId {
    kind: &'static str,
}

macro_rules! opaque_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal, $debug:literal) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(String);

        impl $name {
            /// Parse an identifier, trimming surrounding whitespace.
            ///
            /// The trimmed value must be non-empty.
            pub fn parse(s: &str) -> Result<Self, InvalidId> {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Err(InvalidId { kind: $kind });
                }
                Ok(Self(trimmed.to_string()))
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($debug, "({})"), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

opaque_id!(
    /// An agency-assigned stop identifier.
    ///
    /// Stop identifiers are opaque: the only guarantee is that they are
    /// non-empty once surrounding whitespace is removed.
    ///
    /// # Examples
    ///
    /// ```
    /// use stop_routes::domain::StopId;
    ///
    /// let id = StopId::parse(" 10001 ").unwrap();
    /// assert_eq!(id.as_str(), "10001");
    ///
    /// assert!(StopId::parse("   ").is_err());
    /// ```
    StopId,
    "stop",
    "StopId"
);

opaque_id!(
    /// An agency-assigned line identifier (e.g. `"5"`, `"KT"`).
    LineId,
    "line",
    "LineId"
);
