#![forbid(unsafe_code)]

//! Trailing-edge debouncing with clear-and-reschedule semantics.
//!
//! Each [`trigger`](Debouncer::trigger) discards the pending action and
//! schedules the new one a full window later, so a burst of triggers fires
//! exactly once, one window after the last trigger.
//!
//! Time is a caller-supplied monotonic timestamp; the debouncer never reads a
//! clock.
//!
//! # Example
//!
//! ```
//! use tour_core::debounce::Debouncer;
//! use web_time::Duration;
//!
//! let ms = Duration::from_millis;
//! let mut d = Debouncer::new(ms(250));
//! d.trigger("next", ms(0));
//! d.trigger("next", ms(100));
//! assert_eq!(d.poll(ms(300)), None); // window restarted at 100ms
//! assert_eq!(d.poll(ms(350)), Some("next"));
//! assert_eq!(d.poll(ms(900)), None);
//! ```

use web_time::Duration;

#[derive(Debug, Clone)]
pub struct Debouncer<A> {
    wait: Duration,
    pending: Option<Pending<A>>,
}

#[derive(Debug, Clone)]
struct Pending<A> {
    action: A,
    deadline: Duration,
}

impl<A> Debouncer<A> {
    #[must_use]
    pub const fn new(wait: Duration) -> Self {
        Self {
            wait,
            pending: None,
        }
    }

    #[must_use]
    pub const fn wait(&self) -> Duration {
        self.wait
    }

    /// Schedule `action` one window after `now`, replacing any pending action.
    ///
    /// Returns `true` if a pending action was discarded.
    pub fn trigger(&mut self, action: A, now: Duration) -> bool {
        let deadline = now.saturating_add(self.wait);
        self.pending.replace(Pending { action, deadline }).is_some()
    }

    /// When the pending action becomes due.
    #[must_use]
    pub fn deadline(&self) -> Option<Duration> {
        self.pending.as_ref().map(|p| p.deadline)
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Take the pending action if its deadline has passed.
    pub fn poll(&mut self, now: Duration) -> Option<A> {
        if self.pending.as_ref()?.deadline > now {
            return None;
        }
        self.pending.take().map(|p| p.action)
    }

    /// Drop the pending action without firing it.
    pub fn cancel(&mut self) -> Option<A> {
        self.pending.take().map(|p| p.action)
    }
}
