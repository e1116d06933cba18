//! Terminal state shared between a source and whoever may cancel it.
//!
//! A source has exactly one piece of state that another thread may touch
//! while it is emitting: whether it has terminated, and why. [`TerminalCell`]
//! holds that as a [`TerminalState`] packed into a single `AtomicU8`.
//!
//! # Transitions
//!
//! ```text
//! Active ──cancel()──▶ Cancelled
//!    │
//!    └────complete()──▶ Completed
//! ```
//!
//! Both transitions are compare-and-swap from `Active`. Whichever lands
//! first wins and the other becomes a no-op, so a source can never be both
//! cancelled and completed.
//!
//! # Example
//!
//! ```rust
//! use ripple::{TerminalCell, TerminalState};
//!
//! let cell = TerminalCell::new();
//! assert!(!cell.is_terminated());
//!
//! assert!(cell.cancel());
//! assert!(!cell.cancel()); // idempotent
//! assert!(!cell.complete()); // cancellation already won
//!
//! assert_eq!(cell.state(), TerminalState::Cancelled);
//! ```
//!
//! # Memory Ordering
//!
//! | Operation | Ordering | Effect |
//! |-----------|----------|--------|
//! | `cancel()` / `complete()` | AcqRel | Publishes prior writes on success |
//! | `state()` / `is_terminated()` | Acquire | Syncs with the winning transition |

use core::fmt;
use core::sync::atomic::{AtomicU8, Ordering};

const ACTIVE: u8 = 0;
const CANCELLED: u8 = 1;
const COMPLETED: u8 = 2;

/// Where a source is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TerminalState {
    /// Still able to emit.
    Active,

    /// A consumer asked the source to stop.
    Cancelled,

    /// The source ran out of values, either by emitting them all or by
    /// being drained or cleared through its queue interface.
    Completed,
}

impl TerminalState {
    /// Returns `true` for [`Cancelled`](Self::Cancelled) and
    /// [`Completed`](Self::Completed).
    #[inline]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Active)
    }

    #[inline]
    const fn from_bits(bits: u8) -> Self {
        match bits {
            ACTIVE => Self::Active,
            CANCELLED => Self::Cancelled,
            _ => Self::Completed,
        }
    }
}

impl fmt::Display for TerminalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Cancelled => write!(f, "cancelled"),
            Self::Completed => write!(f, "completed"),
        }
    }
}

/// An atomic [`TerminalState`] that only ever moves forward.
///
/// This is the sole cross-thread state of a source. Everything else a
/// source owns is driven by one thread at a time.
#[derive(Debug)]
pub struct TerminalCell {
    state: AtomicU8,
}

impl TerminalCell {
    /// Create a cell in the [`Active`](TerminalState::Active) state.
    #[inline]
    pub const fn new() -> Self {
        Self {
            state: AtomicU8::new(ACTIVE),
        }
    }

    /// Move from `Active` to `Cancelled`.
    ///
    /// Returns `true` only for the call that performed the transition.
    /// Calling it again, or after completion, changes nothing.
    #[inline]
    pub fn cancel(&self) -> bool {
        self.transition(CANCELLED)
    }

    /// Move from `Active` to `Completed`.
    ///
    /// Returns `false` if the cell was already cancelled or completed; the
    /// caller must not signal completion in that case.
    #[inline]
    pub fn complete(&self) -> bool {
        self.transition(COMPLETED)
    }

    /// The current state.
    #[inline]
    pub fn state(&self) -> TerminalState {
        TerminalState::from_bits(self.state.load(Ordering::Acquire))
    }

    /// `true` once the cell has left `Active`, for any reason.
    #[inline]
    pub fn is_terminated(&self) -> bool {
        self.state.load(Ordering::Acquire) != ACTIVE
    }

    #[inline]
    fn transition(&self, to: u8) -> bool {
        self.state
            .compare_exchange(ACTIVE, to, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }
}

impl Default for TerminalCell {
    fn default() -> Self {
        Self::new()
    }
}
