//! Error types for the filtering core.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A job or anchor referenced an airport code missing from the index.
    /// Geometry cannot be computed without coordinates, so this propagates
    /// rather than being silently skipped.
    #[error("unknown airport code: {code}")]
    UnknownAirport { code: String },
}

impl Error {
    pub fn unknown_airport(code: impl Into<String>) -> Self {
        Self::UnknownAirport { code: code.into() }
    }
}
