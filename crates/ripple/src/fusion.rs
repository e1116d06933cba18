//! Operator fusion.
//!
//! A fused consumer skips per-element `on_next` calls and pulls values
//! straight out of its upstream through [`QueueDisposable::poll`]. The two
//! sides agree on this once, inside `on_subscribe`, before anything is
//! emitted:
//!
//! 1. The consumer calls [`request_fusion`](QueueDisposable::request_fusion)
//!    with the modes it can handle.
//! 2. The source answers with the mode it commits to, or
//!    [`FusionMode::NONE`].
//! 3. On [`FusionMode::SYNC`] the source's push loop becomes a no-op and the
//!    consumer polls until it sees `None`.
//!
//! ```rust
//! use ripple::FusionMode;
//!
//! let requested = FusionMode::ANY | FusionMode::BOUNDARY;
//! assert!(requested.contains(FusionMode::SYNC));
//! assert!(!FusionMode::ASYNC.contains(FusionMode::SYNC));
//! ```

use core::fmt;
use core::ops::{BitAnd, BitOr};

use crate::{Disposable, Unsupported};

#[cfg(feature = "alloc")]
use crate::Disposer;

/// A set of fusion capabilities, used both to request and to grant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FusionMode(u8);

impl FusionMode {
    /// No fusion; values arrive through `on_next`.
    pub const NONE: Self = Self(0);

    /// Synchronous pull: `poll` returning `None` means the source is done.
    pub const SYNC: Self = Self(1);

    /// Asynchronous pull: `None` only means "nothing right now".
    pub const ASYNC: Self = Self(2);

    /// Either [`SYNC`](Self::SYNC) or [`ASYNC`](Self::ASYNC).
    pub const ANY: Self = Self(1 | 2);

    /// The consumer will poll across a thread boundary.
    pub const BOUNDARY: Self = Self(4);

    /// Raw bits.
    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// `true` if every bit of `other` is present in `self`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// `true` for [`NONE`](Self::NONE).
    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for FusionMode {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitAnd for FusionMode {
    type Output = Self;

    #[inline]
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl fmt::Display for FusionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            return write!(f, "none");
        }
        let mut first = true;
        for (flag, name) in [
            (Self::SYNC, "sync"),
            (Self::ASYNC, "async"),
            (Self::BOUNDARY, "boundary"),
        ] {
            if self.contains(flag) {
                if !first {
                    write!(f, "|")?;
                }
                write!(f, "{name}")?;
                first = false;
            }
        }
        Ok(())
    }
}

/// The handle a source gives its subscriber: a cancellation handle that can
/// also be pulled from once fusion is agreed.
///
/// Driving methods take `&mut self`, so the push loop and a pull consumer
/// can never walk the same source at the same time. Only
/// [`dispose`](Disposable::dispose) is meant to be reachable from elsewhere,
/// through a [`Disposer`](crate::Disposer).
pub trait QueueDisposable<T>: Disposable {
    /// Negotiate fusion. Returns the granted mode, or [`FusionMode::NONE`].
    ///
    /// Must be called before emission starts. A granted mode is final.
    fn request_fusion(&mut self, mode: FusionMode) -> FusionMode;

    /// Pull the next value. `None` means exhausted under
    /// [`FusionMode::SYNC`].
    fn poll(&mut self) -> Option<T>;

    /// `true` if a `poll` right now would return `None`.
    fn is_empty(&self) -> bool;

    /// Drop everything not yet pulled.
    fn clear(&mut self);

    /// Push a value into the queue. Sources are not sinks, so the default
    /// refuses.
    #[must_use = "a refused offer is a programming error"]
    fn offer(&mut self, value: T) -> Result<bool, Unsupported> {
        let _ = value;
        Err(Unsupported)
    }

    /// Push two values at once. Refused by default, like
    /// [`offer`](Self::offer).
    #[must_use = "a refused offer is a programming error"]
    fn offer_pair(&mut self, first: T, second: T) -> Result<bool, Unsupported> {
        let _ = (first, second);
        Err(Unsupported)
    }

    /// An owned cancellation handle that outlives the borrow this trait is
    /// usually reached through.
    #[cfg(feature = "alloc")]
    fn disposer(&self) -> Disposer;
}
