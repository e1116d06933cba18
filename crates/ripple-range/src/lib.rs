//! # ripple-range
//!
//! A finite `i64` range source for the [`ripple`] protocol, with
//! cooperative cancellation and synchronous fusion.
//!
//! ## Quick Start
//!
//! ```rust
//! use ripple::ObservableSource;
//! use ripple_range::{range, TestObserver};
//!
//! let source = range(5, 3)?;
//! let mut observer = TestObserver::new();
//! source.subscribe(&mut observer);
//!
//! observer.assert_values(&[5, 6, 7]).assert_complete();
//! # Ok::<(), ripple_range::RangeError>(())
//! ```
//!
//! ## Cancelling
//!
//! The handle passed to `on_subscribe` can produce a [`Disposer`] that
//! outlives the call. Disposing it stops the push loop before the next value
//! and suppresses completion:
//!
//! ```rust
//! use ripple::{Disposable, ObservableSource};
//! use ripple_range::{range, TestObserver};
//!
//! let mut observer = TestObserver::new().cancel_after(2);
//! range(5, 3)?.subscribe(&mut observer);
//!
//! observer.assert_values(&[5, 6]).assert_not_complete();
//! assert!(observer.disposer().unwrap().is_disposed());
//! # Ok::<(), ripple_range::RangeError>(())
//! ```
//!
//! ## Pulling
//!
//! A subscriber that requests [`FusionMode::SYNC`] gets no `on_next` calls;
//! it polls the handle instead until it returns `None`.
//!
//! ## Logging
//!
//! Subscription, fusion negotiation and loop exit are reported through
//! [`tracing`] at `trace` and `debug` level. Nothing is logged per value.
//!
//! ## Type Overview
//!
//! | Type | Use Case |
//! |------|----------|
//! | [`ObservableRange`] | The source; validated on construction |
//! | [`RangeDisposable`] | Per-subscription state, handle and fused queue |
//! | [`RangeError`] | Negative count or `i64` overflow |
//! | [`TestObserver`] | Recording observer with assertions |

#![warn(missing_docs)]
#![warn(clippy::all)]

pub use ripple::{
    Disposable, Disposer, FusionMode, ObservableSource, Observer, QueueDisposable, TerminalState,
    Unsupported,
};

mod error;
mod range;
mod test_observer;

pub use error::RangeError;
pub use range::{ObservableRange, RangeDisposable};
pub use test_observer::TestObserver;

/// Shorthand for [`ObservableRange::new`].
#[inline]
pub fn range(start: i64, count: i64) -> Result<ObservableRange, RangeError> {
    ObservableRange::new(start, count)
}
