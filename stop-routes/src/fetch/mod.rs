//! Transit-patterns API fetch.
//!
//! Downloads one pattern document per line into the pattern directory
//! consumed by [`crate::ingest`]. The API is rate-limited, so requests
//! are sequential with a fixed delay between them. A failed request is
//! recorded and the next line is fetched; missing lines are simply
//! absent from the directory.

mod client;
mod error;
mod runner;

pub use client::{FetchConfig, PatternsClient};
pub use error::FetchError;
pub use runner::{FetchSummary, PatternSource, fetch_all, pattern_file_name};
