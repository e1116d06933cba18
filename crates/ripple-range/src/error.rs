//! Construction errors.

use thiserror::Error;

/// Why a range could not be built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum RangeError {
    /// `count` was below zero.
    #[error("count must be non-negative, got {count}")]
    NegativeCount {
        /// The rejected count.
        count: i64,
    },

    /// The last value, `start + count - 1`, does not fit in an `i64`.
    #[error("range of {count} values starting at {start} overflows i64")]
    Overflow {
        /// First value of the rejected range.
        start: i64,
        /// Length of the rejected range.
        count: i64,
    },
}
