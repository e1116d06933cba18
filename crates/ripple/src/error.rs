//! Protocol error type.

use core::fmt;

/// A queue operation this implementation does not provide.
///
/// Sources expose the [`QueueDisposable`](crate::QueueDisposable) interface
/// so consumers can pull from them, but a source is never a sink. Pushing a
/// value into one returns this error instead of pretending to succeed.
///
/// ```rust
/// use ripple::Unsupported;
///
/// let err = Unsupported;
/// assert_eq!(err.to_string(), "operation not supported");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Unsupported;

impl fmt::Display for Unsupported {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "operation not supported")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Unsupported {}
