//! Tests for cancelling a running range from other threads.
#![allow(unused_imports, dead_code)]

use rayon::prelude::*;
use ripple::{
    Disposable, Disposer, FusionMode, ObservableSource, Observer, QueueDisposable, TerminalState,
};
use ripple_range::{TestObserver, range};
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, mpsc};
use std::thread;
use std::time::Duration;

// ============================================================================
// Observer that publishes its handle and progress
// ============================================================================

/// Sends its disposer out on subscribe and tracks progress in atomics so
/// another thread can watch the loop.
struct Shared {
    handle_tx: mpsc::Sender<Disposer>,
    received: Arc<AtomicUsize>,
    last: Arc<AtomicI64>,
    completed: Arc<AtomicBool>,
    count_after_cancel: Arc<AtomicUsize>,
    disposer: Option<Disposer>,
}

impl Observer<i64> for Shared {
    fn on_subscribe(&mut self, upstream: &mut dyn QueueDisposable<i64>) {
        let d = upstream.disposer();
        self.handle_tx.send(d.clone()).unwrap();
        self.disposer = Some(d);
    }

    fn on_next(&mut self, value: i64) {
        if let Some(d) = &self.disposer {
            if d.is_disposed() {
                self.count_after_cancel.fetch_add(1, Ordering::Relaxed);
            }
        }
        self.last.store(value, Ordering::Relaxed);
        self.received.fetch_add(1, Ordering::Relaxed);
    }

    fn on_complete(&mut self) {
        self.completed.store(true, Ordering::Relaxed);
    }
}

struct Watch {
    received: Arc<AtomicUsize>,
    last: Arc<AtomicI64>,
    completed: Arc<AtomicBool>,
    count_after_cancel: Arc<AtomicUsize>,
}

fn shared() -> (Shared, Watch, mpsc::Receiver<Disposer>) {
    let (tx, rx) = mpsc::channel();
    let received = Arc::new(AtomicUsize::new(0));
    let last = Arc::new(AtomicI64::new(-1));
    let completed = Arc::new(AtomicBool::new(false));
    let count_after_cancel = Arc::new(AtomicUsize::new(0));
    (
        Shared {
            handle_tx: tx,
            received: Arc::clone(&received),
            last: Arc::clone(&last),
            completed: Arc::clone(&completed),
            count_after_cancel: Arc::clone(&count_after_cancel),
            disposer: None,
        },
        Watch {
            received,
            last,
            completed,
            count_after_cancel,
        },
        rx,
    )
}

// ============================================================================
// Cross-thread cancellation
// ============================================================================

#[test]
fn cross_thread_cancel_stops_long_range() {
    let (mut observer, watch, rx) = shared();

    let emitter = thread::spawn(move || {
        range(0, i64::MAX).unwrap().subscribe(&mut observer);
    });

    let handle = rx.recv().unwrap();

    // Wait until the loop is clearly running.
    while watch.received.load(Ordering::Relaxed) < 1000 {
        thread::yield_now();
    }
    handle.dispose();

    emitter.join().unwrap();

    assert!(handle.is_disposed());
    assert_eq!(handle.state(), TerminalState::Cancelled);
    assert!(!watch.completed.load(Ordering::Relaxed));
    // Values are still consecutive from zero.
    let received = watch.received.load(Ordering::Relaxed) as i64;
    assert_eq!(watch.last.load(Ordering::Relaxed), received - 1);
    // The loop re-checks before every value: at most one slips through.
    assert!(watch.count_after_cancel.load(Ordering::Relaxed) <= 1);
}

#[test]
fn concurrent_dispose_is_idempotent() {
    let (mut observer, watch, rx) = shared();

    let emitter = thread::spawn(move || {
        range(0, i64::MAX).unwrap().subscribe(&mut observer);
    });

    let handle = rx.recv().unwrap();
    while watch.received.load(Ordering::Relaxed) < 100 {
        thread::yield_now();
    }

    let cancellers: Vec<_> = (0..8)
        .map(|_| {
            let h = handle.clone();
            thread::spawn(move || {
                for _ in 0..100 {
                    h.dispose();
                }
            })
        })
        .collect();

    for c in cancellers {
        c.join().unwrap();
    }
    emitter.join().unwrap();

    assert_eq!(handle.state(), TerminalState::Cancelled);
    assert!(!watch.completed.load(Ordering::Relaxed));
}

#[test]
fn only_one_transition_wins() {
    let handle = Disposer::new();

    let winners: usize = (0..16)
        .map(|_| {
            let h = handle.clone();
            thread::spawn(move || h.cell().cancel() as usize)
        })
        .collect::<Vec<_>>()
        .into_iter()
        .map(|t| t.join().unwrap())
        .sum();

    assert_eq!(winners, 1);
}

#[test]
fn dispose_racing_completion_never_yields_both() {
    for _ in 0..200 {
        let (mut observer, watch, rx) = shared();

        let emitter = thread::spawn(move || {
            range(0, 500).unwrap().subscribe(&mut observer);
        });

        let handle = rx.recv().unwrap();
        thread::sleep(Duration::from_micros(5));
        handle.dispose();
        emitter.join().unwrap();

        let completed = watch.completed.load(Ordering::Relaxed);
        match handle.state() {
            TerminalState::Completed => {
                assert!(completed);
                assert_eq!(watch.received.load(Ordering::Relaxed), 500);
            }
            TerminalState::Cancelled => assert!(!completed),
            TerminalState::Active => panic!("range left active after run"),
        }
    }
}

// ============================================================================
// Parallel subscriptions (rayon)
// ============================================================================

#[test]
fn parallel_subscriptions_are_independent() {
    let source = range(0, 1000).unwrap();

    let sums: Vec<i64> = (0..64)
        .into_par_iter()
        .map(|i| {
            let mut o = if i % 2 == 0 {
                TestObserver::new()
            } else {
                TestObserver::with_fusion(FusionMode::SYNC)
            };
            source.subscribe(&mut o);
            o.assert_complete();
            o.values().iter().sum()
        })
        .collect();

    assert!(sums.iter().all(|&s| s == 499_500));
}

#[test]
fn parallel_cancel_after_is_exact() {
    let results: Vec<usize> = (0..100usize)
        .into_par_iter()
        .map(|n| {
            let mut o = TestObserver::new().cancel_after(n);
            range(0, 1000).unwrap().subscribe(&mut o);
            o.assert_not_complete();
            o.values().len()
        })
        .collect();

    for (n, len) in results.into_iter().enumerate() {
        assert_eq!(len, n);
    }
}

#[test]
fn disposer_is_send_sync_for_rayon() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Disposer>();
    assert_send_sync::<ripple_range::ObservableRange>();
}
