#![forbid(unsafe_code)]

//! One-shot subscriptions for observer signals and timers.
//!
//! Every asynchronous wait in a tour step (popover inserted, popover visible,
//! popover-creation delay, auto-start delay) is a single entry in the
//! [`OneShotRegistry`]. Entries are consumed by the first matching signal or
//! cancelled through their [`SubscriptionHandle`].
//!
//! # Invariants
//!
//! 1. An entry fires at most once; firing removes it.
//! 2. A cancelled entry never fires.
//! 3. Due timers fire in deadline order, ties broken by subscription order.

use web_time::Duration;

use tour_core::SubId;

/// Why a timer was scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerPurpose {
    /// Start the tour when the page has no trigger element.
    AutoStart,
    /// Create and show the popover once the overlay has settled.
    CreatePopover,
}

/// Host signals an observer entry can wait for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    /// The popover element appeared in the document.
    PopoverInserted,
    /// The visibility observer reported the overlay's position.
    PopoverVisibility,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionKind {
    Observer(Signal),
    Timer {
        deadline: Duration,
        purpose: TimerPurpose,
    },
}

/// Cancel handle returned by [`OneShotRegistry::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionHandle {
    id: SubId,
}

impl SubscriptionHandle {
    #[must_use]
    pub const fn id(self) -> SubId {
        self.id
    }
}

#[derive(Debug, Clone)]
struct Entry {
    id: SubId,
    kind: SubscriptionKind,
}

#[derive(Debug, Clone, Default)]
pub struct OneShotRegistry {
    next_id: SubId,
    entries: Vec<Entry>,
}

impl OneShotRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, kind: SubscriptionKind) -> SubscriptionHandle {
        self.next_id += 1;
        let id = self.next_id;
        tracing::trace!(target: "tour.subscription", sub_id = id, ?kind, "subscribe");
        self.entries.push(Entry { id, kind });
        SubscriptionHandle { id }
    }

    /// Shorthand for a timer due at `deadline`.
    pub fn schedule(&mut self, deadline: Duration, purpose: TimerPurpose) -> SubscriptionHandle {
        self.subscribe(SubscriptionKind::Timer { deadline, purpose })
    }

    /// Remove a pending entry. Returns its kind if it had not fired yet.
    pub fn cancel(&mut self, handle: SubscriptionHandle) -> Option<SubscriptionKind> {
        let pos = self.entries.iter().position(|e| e.id == handle.id)?;
        let entry = self.entries.remove(pos);
        tracing::trace!(target: "tour.subscription", sub_id = entry.id, "cancel");
        Some(entry.kind)
    }

    #[must_use]
    pub fn is_pending(&self, handle: SubscriptionHandle) -> bool {
        self.entries.iter().any(|e| e.id == handle.id)
    }

    /// Consume the oldest observer waiting for `signal`.
    pub fn take_signal(&mut self, signal: Signal) -> Option<SubscriptionHandle> {
        let pos = self
            .entries
            .iter()
            .position(|e| e.kind == SubscriptionKind::Observer(signal))?;
        let entry = self.entries.remove(pos);
        tracing::trace!(target: "tour.subscription", sub_id = entry.id, ?signal, "signal");
        Some(SubscriptionHandle { id: entry.id })
    }

    /// Earliest pending timer deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.entries
            .iter()
            .filter_map(|e| match e.kind {
                SubscriptionKind::Timer { deadline, .. } => Some(deadline),
                SubscriptionKind::Observer(_) => None,
            })
            .min()
    }

    /// Consume the earliest timer due at or before `now`.
    pub fn take_due_timer(
        &mut self,
        now: Duration,
    ) -> Option<(SubscriptionHandle, TimerPurpose, Duration)> {
        let (pos, deadline, purpose) = self
            .entries
            .iter()
            .enumerate()
            .filter_map(|(pos, e)| match e.kind {
                SubscriptionKind::Timer { deadline, purpose } if deadline <= now => {
                    Some((pos, deadline, purpose))
                }
                _ => None,
            })
            .min_by_key(|&(pos, deadline, _)| (deadline, pos))?;
        let entry = self.entries.remove(pos);
        tracing::trace!(target: "tour.subscription", sub_id = entry.id, ?purpose, "timer fired");
        Some((SubscriptionHandle { id: entry.id }, purpose, deadline))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cancel everything, returning what was pending.
    pub fn clear(&mut self) -> Vec<(SubscriptionHandle, SubscriptionKind)> {
        self.entries
            .drain(..)
            .map(|e| (SubscriptionHandle { id: e.id }, e.kind))
            .collect()
    }
}
