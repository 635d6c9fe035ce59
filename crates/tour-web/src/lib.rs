#![forbid(unsafe_code)]

//! `tour-web` drives a guided tour from a browser host.
//!
//! Design goals:
//! - **Host-driven I/O**: the embedding environment (JS glue or a test
//!   harness) pushes key presses, clicks, and observer signals into the
//!   [`TourController`], and applies the [`Effect`](tour_core::Effect)s it
//!   emits through the [`Host`] trait.
//! - **Deterministic time**: the host advances a monotonic clock explicitly
//!   via [`TourController::tick`]; timers and debounces fire from there.
//! - **No blocking / no threads**: suitable for `wasm32-unknown-unknown`.
//!
//! This crate intentionally does not bind to `wasm-bindgen`. A JS shim owns
//! the real `MutationObserver`, `IntersectionObserver`, listeners, and the
//! popover library, and forwards their callbacks here.

pub mod controller;
pub mod host;
pub mod session;
pub mod subscription;

use core::time::Duration;

pub use controller::{Lifecycle, TourController};
pub use host::{Host, RecordingHost};
pub use session::{PopoverHandle, TourSession};
pub use subscription::{OneShotRegistry, Signal, SubscriptionHandle, SubscriptionKind, TimerPurpose};

/// Deterministic monotonic clock controlled by the host.
#[derive(Debug, Default, Clone)]
pub struct DeterministicClock {
    now: Duration,
}

impl DeterministicClock {
    /// Create a clock starting at `0`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            now: Duration::ZERO,
        }
    }

    #[must_use]
    pub const fn now(&self) -> Duration {
        self.now
    }

    /// Move to `now`. Time never goes backwards; earlier values are ignored.
    pub fn set(&mut self, now: Duration) {
        self.now = self.now.max(now);
    }

    /// Advance monotonic time by `dt`.
    pub fn advance(&mut self, dt: Duration) {
        self.now = self.now.saturating_add(dt);
    }
}
