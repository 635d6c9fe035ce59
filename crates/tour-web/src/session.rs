#![forbid(unsafe_code)]

//! Per-mount tour state: captured coordinates, sequencer position, the
//! popover handle, and the subscriptions that belong to the current step.

use tour_core::{
    Coordinate, CoordinateStore, Effect, GeometrySource, PopoverId, Result, Sequencer, Step,
};

use crate::subscription::SubscriptionHandle;

/// Exclusive handle to the one live popover.
///
/// Deliberately not `Clone`: the only way to release it is
/// [`dispose`](Self::dispose), which yields the effect the host must apply.
#[derive(Debug, PartialEq, Eq)]
pub struct PopoverHandle {
    id: PopoverId,
}

impl PopoverHandle {
    #[must_use]
    pub const fn id(&self) -> PopoverId {
        self.id
    }

    #[must_use]
    pub fn dispose(self) -> Effect {
        Effect::DisposePopover(self.id)
    }
}

#[derive(Debug)]
pub struct TourSession {
    steps: Vec<Step>,
    coordinates: CoordinateStore,
    sequencer: Sequencer,
    popover: Option<PopoverHandle>,
    pending: Vec<SubscriptionHandle>,
    clicks_bound: bool,
    next_popover_id: u64,
}

impl TourSession {
    #[must_use]
    pub fn new(steps: Vec<Step>) -> Self {
        let sequencer = Sequencer::new(steps.len());
        Self {
            steps,
            coordinates: CoordinateStore::new(),
            sequencer,
            popover: None,
            pending: Vec::new(),
            clicks_bound: false,
            next_popover_id: 0,
        }
    }

    /// Drop everything captured or allocated for the current mount. Steps
    /// are kept and popover ids keep counting up.
    pub fn reset(&mut self) {
        self.coordinates = CoordinateStore::new();
        self.sequencer = Sequencer::new(self.steps.len());
        self.popover = None;
        self.pending.clear();
        self.clicks_bound = false;
    }

    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    #[must_use]
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Capture coordinates once; later calls reuse them.
    pub fn ensure_captured<G>(&mut self, geometry: &G, padding: f64) -> Result<&[Coordinate]>
    where
        G: GeometrySource + ?Sized,
    {
        self.coordinates
            .ensure_captured(&self.steps, geometry, padding)
    }

    #[must_use]
    pub fn coordinates(&self) -> &[Coordinate] {
        self.coordinates.as_slice()
    }

    #[must_use]
    pub const fn sequencer(&self) -> &Sequencer {
        &self.sequencer
    }

    pub fn sequencer_mut(&mut self) -> &mut Sequencer {
        &mut self.sequencer
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.sequencer.is_active()
    }

    #[must_use]
    pub const fn index(&self) -> Option<usize> {
        self.sequencer.index()
    }

    #[must_use]
    pub fn popover(&self) -> Option<&PopoverHandle> {
        self.popover.as_ref()
    }

    /// Release the live popover, if any.
    pub fn dispose_popover(&mut self) -> Option<Effect> {
        let handle = self.popover.take()?;
        tracing::debug!(target: "tour.session", popover = handle.id.0, "dispose popover");
        self.clicks_bound = false;
        Some(handle.dispose())
    }

    /// Allocate a new popover id. An existing popover is released first and
    /// its dispose effect is returned alongside the new id.
    pub fn acquire_popover(&mut self) -> (PopoverId, Option<Effect>) {
        let disposed = self.dispose_popover();
        self.next_popover_id += 1;
        let id = PopoverId(self.next_popover_id);
        tracing::debug!(target: "tour.session", popover = id.0, "acquire popover");
        self.popover = Some(PopoverHandle { id });
        (id, disposed)
    }

    /// Remember a subscription owned by the current step.
    pub fn track(&mut self, handle: SubscriptionHandle) {
        self.pending.push(handle);
    }

    /// Forget a subscription that fired. Returns `false` if it was not ours.
    pub fn untrack(&mut self, handle: SubscriptionHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|h| *h != handle);
        self.pending.len() != before
    }

    /// Take every tracked handle so the caller can cancel them.
    pub fn drain_pending(&mut self) -> Vec<SubscriptionHandle> {
        std::mem::take(&mut self.pending)
    }

    #[must_use]
    pub fn pending(&self) -> &[SubscriptionHandle] {
        &self.pending
    }

    #[must_use]
    pub const fn clicks_bound(&self) -> bool {
        self.clicks_bound
    }

    pub fn set_clicks_bound(&mut self, bound: bool) {
        self.clicks_bound = bound;
    }
}
