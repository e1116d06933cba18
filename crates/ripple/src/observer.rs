//! The subscriber side of the protocol.

use crate::QueueDisposable;

/// Receives what a source emits.
///
/// A source calls these in a fixed order:
///
/// 1. [`on_subscribe`](Self::on_subscribe) exactly once, before any value;
/// 2. [`on_next`](Self::on_next) zero or more times;
/// 3. [`on_complete`](Self::on_complete) at most once, and never after the
///    subscriber disposed the source.
///
/// # Example
///
/// ```rust
/// use ripple::{Observer, QueueDisposable};
///
/// #[derive(Default)]
/// struct Sum {
///     total: i64,
///     done: bool,
/// }
///
/// impl Observer<i64> for Sum {
///     fn on_subscribe(&mut self, _upstream: &mut dyn QueueDisposable<i64>) {}
///
///     fn on_next(&mut self, value: i64) {
///         self.total += value;
///     }
///
///     fn on_complete(&mut self) {
///         self.done = true;
///     }
/// }
/// ```
pub trait Observer<T> {
    /// Called once with the source's handle.
    ///
    /// The handle is borrowed for the duration of this call. Negotiate
    /// fusion and, under [`FusionMode::SYNC`](crate::FusionMode::SYNC), drain
    /// it here; keep a [`Disposer`](crate::Disposer) to cancel later.
    fn on_subscribe(&mut self, upstream: &mut dyn QueueDisposable<T>);

    /// Called for each value, in order.
    fn on_next(&mut self, value: T);

    /// Called once when the source is exhausted.
    fn on_complete(&mut self);
}

impl<T, O: Observer<T> + ?Sized> Observer<T> for &mut O {
    #[inline]
    fn on_subscribe(&mut self, upstream: &mut dyn QueueDisposable<T>) {
        (**self).on_subscribe(upstream)
    }

    #[inline]
    fn on_next(&mut self, value: T) {
        (**self).on_next(value)
    }

    #[inline]
    fn on_complete(&mut self) {
        (**self).on_complete()
    }
}

/// Something an [`Observer`] can subscribe to.
///
/// Each call to [`subscribe`](Self::subscribe) starts an independent run;
/// synchronous sources emit on the calling thread before returning.
pub trait ObservableSource<T> {
    /// Subscribe `observer` and run the source.
    fn subscribe<O: Observer<T> + ?Sized>(&self, observer: &mut O);
}
