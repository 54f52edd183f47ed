//! Error types for the wordweight-core crate

use thiserror::Error;

/// Result type alias using `CoreError`
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors that can occur while building, sampling or decoding word sets
#[derive(Error, Debug)]
pub enum CoreError {
    /// Weight was zero or negative
    #[error("invalid weight {weight} for {word:?}: weights must be positive")]
    InvalidWeight { word: String, weight: i64 },

    /// Sampling bias was negative
    #[error("invalid sampling bias {0}: bias must be non-negative")]
    InvalidBias(i64),

    /// Weight arithmetic left the i64 range
    #[error("weight overflow: {0}")]
    WeightOverflow(String),

    /// More words requested than can be drawn
    #[error("cannot sample {requested} words from {available} candidates")]
    SampleTooLarge { requested: usize, available: usize },

    /// Snapshot contained a presence tag other than 0 or 1
    #[error("unknown presence tag {0} in snapshot")]
    UnknownTag(i8),

    /// Snapshot ended in the middle of a node
    #[error("truncated snapshot: needed {needed} bytes, {remaining} remaining")]
    TruncatedSnapshot { needed: usize, remaining: usize },

    /// Snapshot was structurally malformed
    #[error("deserialization error: {0}")]
    Deserialization(String),

    /// Tree invariant did not hold
    #[error("invariant violation: {0}")]
    Invariant(#[from] InvariantViolation),

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A parallel build task failed to complete
    #[error("build task failed: {0}")]
    Worker(String),
}

/// A broken tree invariant, reported at the key where it was detected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    /// Keys are not in strictly increasing in-order sequence
    #[error("order violated at {key:?}")]
    Order { key: String },

    /// Subtree heights differ by more than one
    #[error("imbalance {imbalance} at {key:?}")]
    Balance { key: String, imbalance: i64 },

    /// Cached height is stale
    #[error("bad height for {key:?}: expected {expected}, got {actual}")]
    Height { key: String, expected: u32, actual: u32 },

    /// Cached size is stale
    #[error("bad size for {key:?}: expected {expected}, got {actual}")]
    Size { key: String, expected: usize, actual: usize },

    /// Cached total weight is stale
    #[error("bad total weight for {key:?}: expected {expected}, got {actual}")]
    TotalWeight { key: String, expected: i64, actual: i64 },

    /// A stored weight is zero or negative
    #[error("non-positive weight {weight} at {key:?}")]
    NonPositiveWeight { key: String, weight: i64 },
}

impl InvariantViolation {
    /// The key at which the violation was found
    pub fn key(&self) -> &str {
        match self {
            Self::Order { key }
            | Self::Balance { key, .. }
            | Self::Height { key, .. }
            | Self::Size { key, .. }
            | Self::TotalWeight { key, .. }
            | Self::NonPositiveWeight { key, .. } => key,
        }
    }
}
