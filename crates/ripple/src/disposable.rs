//! Cancellation handles.
//!
//! [`Disposable`] is the cancellation side of the protocol: anything a
//! subscriber can tell to stop. [`Disposer`] is an owned, cloneable handle
//! over a source's [`TerminalCell`] that a subscriber can keep after
//! `on_subscribe` returns and hand to other threads.
//!
//! # Example
//!
//! ```rust
//! # #[cfg(feature = "alloc")]
//! # fn main() {
//! use ripple::{Disposable, Disposer, TerminalState};
//!
//! let handle = Disposer::new();
//! let remote = handle.clone();
//!
//! std::thread::spawn(move || remote.dispose()).join().unwrap();
//!
//! assert!(handle.is_disposed());
//! assert_eq!(handle.state(), TerminalState::Cancelled);
//! # }
//! # #[cfg(not(feature = "alloc"))]
//! # fn main() {}
//! ```

use crate::TerminalCell;

#[cfg(feature = "alloc")]
use crate::TerminalState;
#[cfg(feature = "alloc")]
use alloc::sync::Arc;

/// Something that can be told to stop.
///
/// Implementations must make `dispose` idempotent and safe to call from a
/// thread other than the one driving emission.
pub trait Disposable {
    /// Request that no further values be emitted.
    fn dispose(&self);

    /// `true` once the source is spent, whether it was disposed, ran to
    /// completion, or was cleared. The reason is not distinguishable here.
    fn is_disposed(&self) -> bool;
}

impl Disposable for TerminalCell {
    #[inline]
    fn dispose(&self) {
        self.cancel();
    }

    #[inline]
    fn is_disposed(&self) -> bool {
        self.is_terminated()
    }
}

impl<T: Disposable + ?Sized> Disposable for &T {
    #[inline]
    fn dispose(&self) {
        (**self).dispose()
    }

    #[inline]
    fn is_disposed(&self) -> bool {
        (**self).is_disposed()
    }
}

/// A shared handle to a source's terminal state.
///
/// Clones share the same cell. Any clone can dispose; every clone observes
/// the result.
#[cfg(feature = "alloc")]
#[derive(Debug, Clone, Default)]
pub struct Disposer {
    cell: Arc<TerminalCell>,
}

#[cfg(feature = "alloc")]
impl Disposer {
    /// Create a handle over a fresh, active cell.
    #[inline]
    pub fn new() -> Self {
        Self {
            cell: Arc::new(TerminalCell::new()),
        }
    }

    /// Wrap an existing shared cell.
    #[inline]
    pub fn from_cell(cell: Arc<TerminalCell>) -> Self {
        Self { cell }
    }

    /// The underlying cell.
    #[inline]
    pub fn cell(&self) -> &Arc<TerminalCell> {
        &self.cell
    }

    /// The current terminal state, including why the source stopped.
    #[inline]
    pub fn state(&self) -> TerminalState {
        self.cell.state()
    }
}

#[cfg(feature = "alloc")]
impl Disposable for Disposer {
    #[inline]
    fn dispose(&self) {
        self.cell.cancel();
    }

    #[inline]
    fn is_disposed(&self) -> bool {
        self.cell.is_terminated()
    }
}
