//! # ripple
//!
//! Minimal push/pull protocol for reactive sources with cooperative
//! cancellation.
//!
//! This crate defines the contract between a source and its subscriber and
//! nothing else. It is `no_std` with zero dependencies. Concrete sources live
//! in other crates, for example
//! [`ripple-range`](https://docs.rs/ripple-range).
//!
//! ## The Protocol
//!
//! A source hands its subscriber a [`QueueDisposable`] in
//! [`Observer::on_subscribe`], then either pushes values through
//! [`Observer::on_next`] or, if the subscriber negotiated
//! [`FusionMode::SYNC`], lets the subscriber pull them with
//! [`QueueDisposable::poll`].
//!
//! ```rust
//! use ripple::{Disposable, FusionMode, Observer, QueueDisposable};
//!
//! /// Drains any source it is subscribed to, preferring the pull path.
//! #[derive(Default)]
//! struct Collect {
//!     values: Vec<i64>,
//!     completed: bool,
//! }
//!
//! impl Observer<i64> for Collect {
//!     fn on_subscribe(&mut self, upstream: &mut dyn QueueDisposable<i64>) {
//!         if upstream.request_fusion(FusionMode::SYNC) == FusionMode::SYNC {
//!             while let Some(v) = upstream.poll() {
//!                 self.values.push(v);
//!             }
//!             self.completed = upstream.is_disposed();
//!         }
//!     }
//!
//!     fn on_next(&mut self, value: i64) {
//!         self.values.push(value);
//!     }
//!
//!     fn on_complete(&mut self) {
//!         self.completed = true;
//!     }
//! }
//! ```
//!
//! ## Cancellation
//!
//! Every source carries one [`TerminalCell`]: an atomic
//! Active / Cancelled / Completed state. Disposing moves it to `Cancelled`;
//! running out of values moves it to `Completed`. Whichever happens first
//! sticks, so a subscriber that disposed never sees `on_complete`.
//!
//! ## Feature Flags
//!
//! - **None (default)** - Traits, [`TerminalCell`], [`FusionMode`]; `no_std`
//! - **`alloc`** - Adds the shared [`Disposer`] handle and
//!   [`QueueDisposable::disposer`]
//! - **`std`** - Adds `std::error::Error` impl for [`Unsupported`]

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]

#[cfg(feature = "alloc")]
extern crate alloc;

mod disposable;
mod error;
mod fusion;
mod observer;
mod state;

pub use disposable::Disposable;
#[cfg(feature = "alloc")]
pub use disposable::Disposer;
pub use error::Unsupported;
pub use fusion::{FusionMode, QueueDisposable};
pub use observer::{ObservableSource, Observer};
pub use state::{TerminalCell, TerminalState};
