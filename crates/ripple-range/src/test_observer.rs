//! A recording observer for tests.
//!
//! [`TestObserver`] keeps everything it receives and offers chainable
//! assertions over it. It can also negotiate fusion and drain its upstream
//! through `poll`, or dispose after a given number of values, which covers
//! the interesting paths of any synchronous source.
//!
//! ```rust
//! use ripple::{FusionMode, ObservableSource};
//! use ripple_range::{ObservableRange, TestObserver};
//!
//! let range = ObservableRange::new(10, 2).unwrap();
//!
//! let mut fused = TestObserver::with_fusion(FusionMode::ANY);
//! range.subscribe(&mut fused);
//! fused
//!     .assert_fusion_mode(FusionMode::SYNC)
//!     .assert_values(&[10, 11])
//!     .assert_complete();
//!
//! let mut cancelled = TestObserver::new().cancel_after(1);
//! range.subscribe(&mut cancelled);
//! cancelled.assert_values(&[10]).assert_not_complete();
//! ```

use ripple::{Disposable, Disposer, FusionMode, Observer, QueueDisposable};

/// Records values and completions from a source.
#[derive(Debug, Default)]
pub struct TestObserver {
    values: Vec<i64>,
    completions: usize,
    subscriptions: usize,
    requested: FusionMode,
    granted: FusionMode,
    cancel_after: Option<usize>,
    disposer: Option<Disposer>,
}

impl TestObserver {
    /// An observer that takes values through `on_next`.
    pub fn new() -> Self {
        Self::default()
    }

    /// An observer that requests `mode` on subscribe and, if
    /// [`FusionMode::SYNC`] is granted, drains the upstream by polling.
    pub fn with_fusion(mode: FusionMode) -> Self {
        Self {
            requested: mode,
            ..Self::default()
        }
    }

    /// Dispose the upstream once `n` values have been received.
    pub fn cancel_after(mut self, n: usize) -> Self {
        self.cancel_after = Some(n);
        self
    }

    /// Values received so far, in order.
    pub fn values(&self) -> &[i64] {
        &self.values
    }

    /// How many completion signals arrived. Anything above one is a bug in
    /// the source.
    pub fn completions(&self) -> usize {
        self.completions
    }

    /// `true` if exactly one completion arrived.
    pub fn is_completed(&self) -> bool {
        self.completions == 1
    }

    /// How many times `on_subscribe` ran.
    pub fn subscriptions(&self) -> usize {
        self.subscriptions
    }

    /// The mode the upstream granted, [`FusionMode::NONE`] if none was
    /// requested.
    pub fn fusion_mode(&self) -> FusionMode {
        self.granted
    }

    /// The upstream's cancellation handle, once subscribed.
    pub fn disposer(&self) -> Option<&Disposer> {
        self.disposer.as_ref()
    }

    /// Assert the exact sequence of values received.
    #[track_caller]
    pub fn assert_values(&self, expected: &[i64]) -> &Self {
        assert_eq!(self.values, expected, "values differ");
        self
    }

    /// Assert exactly one completion arrived.
    #[track_caller]
    pub fn assert_complete(&self) -> &Self {
        assert_eq!(self.completions, 1, "expected exactly one completion");
        self
    }

    /// Assert no completion arrived.
    #[track_caller]
    pub fn assert_not_complete(&self) -> &Self {
        assert_eq!(self.completions, 0, "expected no completion");
        self
    }

    /// Assert the granted fusion mode.
    #[track_caller]
    pub fn assert_fusion_mode(&self, mode: FusionMode) -> &Self {
        assert_eq!(self.granted, mode, "unexpected fusion mode");
        self
    }

    fn reached_limit(&self) -> bool {
        self.cancel_after == Some(self.values.len())
    }

    fn drain(&mut self, upstream: &mut dyn QueueDisposable<i64>) {
        if self.reached_limit() {
            upstream.dispose();
            return;
        }
        while let Some(v) = upstream.poll() {
            self.values.push(v);
            if self.reached_limit() {
                upstream.dispose();
                return;
            }
        }
        self.completions += 1;
    }
}

impl Observer<i64> for TestObserver {
    fn on_subscribe(&mut self, upstream: &mut dyn QueueDisposable<i64>) {
        self.subscriptions += 1;
        self.disposer = Some(upstream.disposer());

        if !self.requested.is_none() {
            self.granted = upstream.request_fusion(self.requested);
            if self.granted == FusionMode::SYNC {
                self.drain(upstream);
                return;
            }
        }

        if self.reached_limit() {
            upstream.dispose();
        }
    }

    fn on_next(&mut self, value: i64) {
        self.values.push(value);
        if self.reached_limit() {
            if let Some(d) = &self.disposer {
                d.dispose();
            }
        }
    }

    fn on_complete(&mut self) {
        self.completions += 1;
    }
}
