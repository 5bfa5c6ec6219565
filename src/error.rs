//! Error types for dbscan_hull

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// dbscan_hull error type
#[derive(Error, Debug)]
pub enum Error {
    /// Clustering or input parameter outside its valid range
    #[error("Invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        /// Parameter name as it appears in the configuration
        name: &'static str,
        /// What is wrong with the value
        reason: String,
    },

    /// Input is larger than the configured point-count cap
    #[error("Too many points: {count} exceeds the limit of {limit}")]
    TooManyPoints {
        /// Number of points supplied
        count: usize,
        /// Configured maximum
        limit: usize,
    },

    /// Input row that cannot be turned into a point
    #[error("Invalid record at line {line}: {reason}")]
    InvalidRecord {
        /// One-based line number in the input
        line: u64,
        /// Why the row was rejected
        reason: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl Error {
    pub(crate) fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}
