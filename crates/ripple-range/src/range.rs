//! A finite source of consecutive `i64` values.
//!
//! [`ObservableRange`] emits `start, start + 1, ..., start + count - 1` and
//! then completes. Each subscription gets its own [`RangeDisposable`], which
//! is both the subscriber's cancellation handle and, if the subscriber asks
//! for [`FusionMode::SYNC`], a queue it can pull the values from directly.
//!
//! # Example
//!
//! ```rust
//! use ripple::ObservableSource;
//! use ripple_range::{ObservableRange, TestObserver};
//!
//! let range = ObservableRange::new(5, 3).unwrap();
//! let mut observer = TestObserver::new();
//!
//! range.subscribe(&mut observer);
//!
//! observer.assert_values(&[5, 6, 7]).assert_complete();
//! ```
//!
//! # State
//!
//! | Field | Shared? | Driven by |
//! |-------|---------|-----------|
//! | `index` | no | push loop or pull caller, through `&mut self` |
//! | `fused` | no | `request_fusion`, once, before emission |
//! | `cell` | `Arc` | anyone holding a [`Disposer`] |
//!
//! The push loop re-reads the cell before every value, so a `dispose()` on
//! another thread lets through at most one more `on_next`.

use std::sync::Arc;

use ripple::{
    Disposable, Disposer, FusionMode, ObservableSource, Observer, QueueDisposable, TerminalCell,
};
use tracing::{debug, trace};

use crate::RangeError;

/// The values `start..start + count`, emitted synchronously on subscribe.
///
/// # Example
///
/// ```rust
/// use ripple_range::{ObservableRange, RangeError};
///
/// let range = ObservableRange::new(-2, 4)?;
/// assert_eq!(range.start(), -2);
/// assert_eq!(range.count(), 4);
///
/// assert_eq!(
///     ObservableRange::new(0, -1),
///     Err(RangeError::NegativeCount { count: -1 })
/// );
/// # Ok::<(), RangeError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObservableRange {
    start: i64,
    end: i64,
}

impl ObservableRange {
    /// Build a range of `count` values beginning at `start`.
    ///
    /// Fails if `count` is negative or the last value would overflow. A
    /// `count` of zero is allowed and completes without emitting.
    pub fn new(start: i64, count: i64) -> Result<Self, RangeError> {
        if count < 0 {
            return Err(RangeError::NegativeCount { count });
        }
        if count > 0 && start.checked_add(count - 1).is_none() {
            return Err(RangeError::Overflow { start, count });
        }
        // `end` wraps to i64::MIN when the last value is i64::MAX; iteration
        // compares with `!=`, never `<`.
        Ok(Self {
            start,
            end: start.wrapping_add(count),
        })
    }

    /// First value emitted.
    #[inline]
    pub fn start(&self) -> i64 {
        self.start
    }

    /// Number of values emitted.
    #[inline]
    pub fn count(&self) -> i64 {
        self.end.wrapping_sub(self.start)
    }
}

impl ObservableSource<i64> for ObservableRange {
    fn subscribe<O: Observer<i64> + ?Sized>(&self, observer: &mut O) {
        trace!(start = self.start, count = self.count(), "range subscribed");
        let mut parent = RangeDisposable::new(self.start, self.end);
        observer.on_subscribe(&mut parent);
        parent.run(observer);
    }
}

/// Per-subscription state of an [`ObservableRange`].
///
/// Holds the next value to emit, the exclusive end, the one-shot fusion
/// flag, and a shared [`TerminalCell`].
#[derive(Debug)]
pub struct RangeDisposable {
    end: i64,
    index: i64,
    fused: bool,
    cell: Arc<TerminalCell>,
}

impl RangeDisposable {
    /// State for the half-open interval `[start, end)`.
    ///
    /// `end` is compared with `!=`, so a wrapped `end` of `i64::MIN` covers a
    /// range ending at `i64::MAX`.
    pub fn new(start: i64, end: i64) -> Self {
        Self {
            end,
            index: start,
            fused: false,
            cell: Arc::new(TerminalCell::new()),
        }
    }

    /// `true` once [`FusionMode::SYNC`] has been granted.
    #[inline]
    pub fn is_fused(&self) -> bool {
        self.fused
    }

    /// Push every remaining value into `observer`, then complete.
    ///
    /// Does nothing when fused; the subscriber pulls instead. Stops without
    /// completing as soon as the cell is found terminated.
    pub fn run<O: Observer<i64> + ?Sized>(&mut self, observer: &mut O) {
        if self.fused {
            trace!("range fused, push loop skipped");
            return;
        }

        let end = self.end;
        let mut i = self.index;
        while i != end && !self.cell.is_terminated() {
            observer.on_next(i);
            i = i.wrapping_add(1);
        }
        self.index = i;

        if self.cell.complete() {
            trace!(end, "range completed");
            observer.on_complete();
        } else {
            trace!(index = i, state = %self.cell.state(), "range stopped early");
        }
    }
}

impl Disposable for RangeDisposable {
    #[inline]
    fn dispose(&self) {
        self.cell.cancel();
    }

    #[inline]
    fn is_disposed(&self) -> bool {
        self.cell.is_terminated()
    }
}

impl QueueDisposable<i64> for RangeDisposable {
    fn request_fusion(&mut self, mode: FusionMode) -> FusionMode {
        if self.fused {
            return FusionMode::SYNC;
        }
        if mode.contains(FusionMode::SYNC) {
            self.fused = true;
            debug!(requested = %mode, "range fusion granted: sync");
            FusionMode::SYNC
        } else {
            debug!(requested = %mode, "range fusion refused");
            FusionMode::NONE
        }
    }

    fn poll(&mut self) -> Option<i64> {
        assert!(self.fused, "poll on a range that was not fused");
        let i = self.index;
        if i != self.end {
            self.index = i.wrapping_add(1);
            Some(i)
        } else {
            self.cell.complete();
            None
        }
    }

    #[inline]
    fn is_empty(&self) -> bool {
        self.index == self.end
    }

    fn clear(&mut self) {
        self.index = self.end;
        self.cell.complete();
    }

    fn disposer(&self) -> Disposer {
        Disposer::from_cell(Arc::clone(&self.cell))
    }
}
