//! Error types for the spindle core
//!
//! Timing problems (stale sub-ticks, missed swaps) are not errors: they are
//! reported through [`SubTickOutcome`](crate::animation::SubTickOutcome) and
//! logged. The variants here cover values that must be rejected before they
//! reach the state machine.

use thiserror_no_std::Error;

/// Error types for spindle operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SpindleError {
    /// A wall-clock component is outside its valid range
    #[error("Invalid {field}: {value}")]
    InvalidTime {
        /// Which component was rejected ("hour", "minute" or "second")
        field: &'static str,
        /// The rejected value
        value: u8,
    },

    /// Animation tunables cannot drive a run
    #[error("Invalid configuration: {reason}")]
    InvalidConfig {
        /// What is wrong with the configuration
        reason: &'static str,
    },

    /// The event mailbox is full
    #[error("Event queue full (capacity: {capacity})")]
    EventQueueFull {
        /// Capacity of the rejecting queue
        capacity: usize,
    },
}

/// Result type for spindle operations
pub type SpindleResult<T> = Result<T, SpindleError>;
