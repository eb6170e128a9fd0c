//! Error types for element-set switching
//!
//! Every failure raised by this crate is a [`SwitchError`]. Propagation
//! failures reported by an [`ElementSet`](crate::elements::ElementSet) are not
//! errors here; they travel as per-time error codes.

use chrono::NaiveDateTime;
use thiserror::Error;

/// Main error type for the switching core
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SwitchError {
    /// Switching policy name not recognised
    #[error("Switching method {0:?} must be one of \"epoch\", \"midpoint\" or \"tca\"")]
    InvalidPolicy(String),

    /// No element sets were supplied
    #[error("Element set series is empty, no transitions exist")]
    EmptySeries,

    /// A query time falls outside the transition table
    #[error("Time {time} is outside the supported range ({lower}..{upper})")]
    OutOfRangeTime {
        /// The offending query time
        time: NaiveDateTime,
        /// First boundary of the table (inclusive)
        lower: NaiveDateTime,
        /// Last boundary of the table (exclusive)
        upper: NaiveDateTime,
    },

    /// The closest approach between two adjacent element sets could not be found
    #[error("Closest approach between element sets {pair} and {} is unresolved: {reason}", .pair + 1)]
    UnresolvedBoundary {
        /// Index of the earlier element set of the pair
        pair: usize,
        /// Why the search failed
        reason: String,
    },

    /// A sampling step was zero, negative or not finite
    #[error("Invalid time step: {0} seconds")]
    InvalidStep(f64),

    /// A precomputed transition table does not fit the element set series
    #[error("Transition table has {actual} boundaries, expected {expected}")]
    TableMismatch {
        /// Boundaries required by the series (`n + 1`)
        expected: usize,
        /// Boundaries in the supplied table
        actual: usize,
    },

    /// An element set returned a batch of the wrong size
    #[error("Propagation returned {actual} results for {expected} times")]
    BatchLengthMismatch {
        /// Number of times handed to the element set
        expected: usize,
        /// Number of results that came back
        actual: usize,
    },
}

/// Result type for switching operations
pub type Result<T> = std::result::Result<T, SwitchError>;
