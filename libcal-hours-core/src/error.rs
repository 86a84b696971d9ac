//! Error types for libcal-hours.

use thiserror::Error;

/// Errors that can occur while fetching or rendering opening hours.
#[derive(Error, Debug)]
pub enum HoursError {
    #[error("Failed to retrieve hours: {0}")]
    Fetch(String),

    #[error("Hours request timed out after {0}s")]
    FetchTimeout(u64),

    #[error("Location \"{0}\" not found.")]
    LocationNotFound(String),

    #[error("Retrieved data is empty.")]
    EmptyData,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl HoursError {
    /// True for failures of the upstream fetch, as opposed to bad data or setup.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            HoursError::Fetch(_) | HoursError::FetchTimeout(_) | HoursError::LocationNotFound(_)
        )
    }
}

/// Result type alias for libcal-hours operations.
pub type HoursResult<T> = Result<T, HoursError>;
