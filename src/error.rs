//! Error types for the capqueue library.
//!
//! ## Key Components
//!
//! - [`CapQueueError`]: Returned by queries that need at least one entry
//!   (`max`, `oldest`) and by the internal heap/list components.
//! - [`ConfigError`]: Returned when construction parameters are invalid
//!   (e.g. zero capacity passed to `try_new`).
//! - [`InvariantError`]: Returned by `check_invariants` when the internal
//!   views of the queue have diverged.
//!
//! ## Example Usage
//!
//! ```
//! use capqueue::error::{CapQueueError, ConfigError};
//! use capqueue::CapQueue;
//!
//! let queue: CapQueue<String, i64> = CapQueue::new(4);
//! assert_eq!(queue.max(), Err(CapQueueError::EmptyQueue));
//!
//! let bad: Result<CapQueue<String, i64>, ConfigError> = CapQueue::try_new(0);
//! assert!(bad.is_err());
//! ```

use thiserror::Error;

// ---------------------------------------------------------------------------
// CapQueueError
// ---------------------------------------------------------------------------

/// Failure of an operation that requires a non-empty structure or free room.
///
/// Absent keys are never reported through this type: `delete` and `value`
/// answer with `false` and the zero value instead.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapQueueError {
    /// `max` or `oldest` was called on an empty queue.
    #[error("empty queue")]
    EmptyQueue,
    /// The priority index holds no entries.
    #[error("empty priority index")]
    EmptyIndex,
    /// The recency list holds no entries.
    #[error("empty recency list")]
    EmptyList,
    /// A push was attempted on a priority index that is already full.
    #[error("insufficient capacity: index already holds {capacity} entries")]
    CapacityExceeded { capacity: usize },
}

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal queue invariants are violated.
///
/// Produced by [`CapQueue::check_invariants`](crate::CapQueue::check_invariants).
/// Carries a human-readable description of which invariant failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when queue configuration parameters are invalid.
///
/// # Example
///
/// ```
/// use capqueue::CapQueue;
///
/// let err = CapQueue::<String, i64>::try_new(0).unwrap_err();
/// assert!(err.to_string().contains("capacity"));
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
