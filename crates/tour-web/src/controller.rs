#![forbid(unsafe_code)]

//! The guided tour controller.
//!
//! [`TourController`] owns the session and turns host signals into
//! [`Effect`]s. All time comes from [`TourController::tick`]; a host that
//! never ticks never sees a timer or debounced key fire.
//!
//! # Step rendering order
//!
//! Entering step `i` always emits, in order:
//!
//! 1. `Unobserve` for every observer the superseded step still holds
//!    (its pending timers are dropped silently);
//! 2. `DisposePopover` for the live popover, if any;
//! 3. `ShowOverlay` then `SetPopoverContent`;
//! 4. `ObserveMutation` for the popover element.
//!
//! The popover-creation timer is scheduled last and, when it fires, emits
//! `CreatePopover`, `ShowPopover`, and `ObserveVisibility`.

use web_time::Duration;

use tour_core::debounce::Debouncer;
use tour_core::popover::popover_selector;
use tour_core::render::render;
use tour_core::style::stylesheet;
use tour_core::{
    Effect, HostMarkup, KeyCode, KeyRoute, NavAction, PopoverAction, PopoverOptions, Rendered,
    Result, TourConfig, TourError, Transition,
};

use crate::DeterministicClock;
use crate::host::Host;
use crate::session::TourSession;
use crate::subscription::{
    OneShotRegistry, Signal, SubscriptionHandle, SubscriptionKind, TimerPurpose,
};

/// Mount/unmount hooks for a component attached to a page.
pub trait Lifecycle {
    /// Attach to the page. Calling it twice is a no-op.
    fn on_mount(&mut self);

    /// Detach listeners and release everything the component holds.
    fn on_unmount(&mut self);
}

/// Something due at a point in time during [`TourController::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Due {
    Timer(SubscriptionHandle, TimerPurpose),
    Debounced(NavAction),
}

pub struct TourController<H: Host> {
    host: H,
    config: TourConfig,
    popover_options: PopoverOptions,
    has_trigger: bool,
    session: TourSession,
    subscriptions: OneShotRegistry,
    prev_debounce: Debouncer<()>,
    next_debounce: Debouncer<()>,
    auto_start: Option<SubscriptionHandle>,
    clock: DeterministicClock,
    mounted: bool,
    key_listener: bool,
}

impl<H: Host> TourController<H> {
    /// Build an unmounted controller. The config is validated here.
    #[must_use]
    pub fn new(host: H, markup: HostMarkup, config: TourConfig) -> Self {
        let config = config.validated();
        let debounce = config.key_debounce;
        Self {
            host,
            has_trigger: markup.has_trigger(),
            session: TourSession::new(markup.steps),
            config,
            popover_options: PopoverOptions::default(),
            subscriptions: OneShotRegistry::new(),
            prev_debounce: Debouncer::new(debounce),
            next_debounce: Debouncer::new(debounce),
            auto_start: None,
            clock: DeterministicClock::new(),
            mounted: false,
            key_listener: false,
        }
    }

    #[must_use]
    pub fn with_popover_options(mut self, options: PopoverOptions) -> Self {
        self.popover_options = options;
        self
    }

    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    #[must_use]
    pub fn config(&self) -> &TourConfig {
        &self.config
    }

    #[must_use]
    pub fn session(&self) -> &TourSession {
        &self.session
    }

    #[must_use]
    pub fn subscriptions(&self) -> &OneShotRegistry {
        &self.subscriptions
    }

    #[must_use]
    pub const fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// True while the overlay is displayed.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.session.is_active()
    }

    #[must_use]
    pub const fn current_step(&self) -> Option<usize> {
        self.session.index()
    }

    #[must_use]
    pub const fn now(&self) -> Duration {
        self.clock.now()
    }

    /// Earliest instant at which [`tick`](Self::tick) has work to do.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        [
            self.subscriptions.next_deadline(),
            self.prev_debounce.deadline(),
            self.next_debounce.deadline(),
        ]
        .into_iter()
        .flatten()
        .min()
    }

    // ── Navigation ──────────────────────────────────────────────────────

    /// Capture coordinates (once) and enter step 0.
    ///
    /// Restarts from the beginning when already active. With no steps this
    /// does nothing.
    pub fn start(&mut self) -> Result<()> {
        self.ensure_mounted()?;
        if self.session.step_count() == 0 {
            return Ok(());
        }
        self.capture()?;
        self.cancel_auto_start();
        tracing::debug!(target: "tour.controller", steps = self.session.step_count(), "tour start");
        let transition = self.session.sequencer_mut().start();
        self.apply_transition(transition);
        Ok(())
    }

    pub fn next(&mut self) {
        let transition = self.session.sequencer_mut().next();
        self.apply_transition(transition);
    }

    pub fn previous(&mut self) {
        let transition = self.session.sequencer_mut().previous();
        self.apply_transition(transition);
    }

    /// Close immediately, dropping any pending debounced navigation.
    pub fn close(&mut self) {
        self.prev_debounce.cancel();
        self.next_debounce.cancel();
        let transition = self.session.sequencer_mut().close();
        self.apply_transition(transition);
    }

    /// Render step `index` directly.
    ///
    /// An out-of-range index is logged and leaves the overlay hidden. A
    /// pending auto-start is cancelled once a step is shown.
    pub fn show_step(&mut self, index: usize) -> Result<()> {
        self.ensure_mounted()?;
        self.capture()?;
        match self.session.sequencer_mut().jump_to(index) {
            Some(transition) => {
                self.cancel_auto_start();
                self.apply_transition(transition);
            }
            None => self.render_missing(index),
        }
        Ok(())
    }

    // ── Host signals ────────────────────────────────────────────────────

    /// A `keydown` reached the document listener at `now`.
    ///
    /// The clock is advanced to `now` first, so anything already due fires
    /// before the key is routed and the debounce window starts at `now`.
    pub fn on_key(&mut self, key: KeyCode, now: Duration) -> Result<()> {
        self.tick(now)?;
        if !self.key_listener || !self.session.is_active() {
            return Ok(());
        }
        let now = self.clock.now();
        match tour_core::event::route_key(key) {
            KeyRoute::Debounced(NavAction::Previous) => {
                self.prev_debounce.trigger((), now);
            }
            KeyRoute::Debounced(NavAction::Next) => {
                self.next_debounce.trigger((), now);
            }
            KeyRoute::Debounced(NavAction::Close) | KeyRoute::Immediate(NavAction::Close) => {
                self.close();
            }
            KeyRoute::Immediate(action) => self.navigate(action),
            KeyRoute::Ignored => {}
        }
        Ok(())
    }

    /// The start trigger was clicked.
    pub fn on_trigger_click(&mut self) -> Result<()> {
        if !self.has_trigger {
            return Ok(());
        }
        self.start()
    }

    /// A click landed inside the popover on an element with these classes.
    pub fn on_popover_click(&mut self, class_attr: &str) {
        if !self.session.is_active() || !self.session.clicks_bound() {
            tracing::trace!(target: "tour.controller", class_attr, "popover click ignored");
            return;
        }
        if let Some(action) = PopoverAction::from_class_attr(class_attr) {
            tracing::debug!(target: "tour.controller", ?action, "popover click");
            self.navigate(action.nav());
        }
    }

    /// The mutation observer saw the popover element appear.
    pub fn on_popover_inserted(&mut self) {
        let Some(handle) = self.take_step_signal(Signal::PopoverInserted) else {
            return;
        };
        self.host.apply(Effect::BindPopoverClicks {
            selector: popover_selector(),
        });
        self.host.apply(Effect::Unobserve { sub: handle.id() });
        self.session.set_clicks_bound(true);
    }

    /// The visibility observer reported the overlay's top edge, in viewport
    /// pixels.
    pub fn on_popover_visibility(&mut self, top: f64) {
        let Some(handle) = self.take_step_signal(Signal::PopoverVisibility) else {
            return;
        };
        let viewport = self.host.viewport_height();
        if !(0.0..=viewport).contains(&top) {
            tracing::debug!(target: "tour.controller", top, viewport, "scrolling overlay into view");
            self.host.apply(Effect::ScrollIntoView { smooth: true });
        }
        self.host.apply(Effect::Unobserve { sub: handle.id() });
    }

    /// Advance the clock to `now` and fire everything due, earliest first.
    ///
    /// Work scheduled while firing is measured from the instant that fired,
    /// so one large step behaves like many small ones.
    pub fn tick(&mut self, now: Duration) -> Result<()> {
        while let Some((at, due)) = self.next_due(now) {
            self.clock.set(at);
            match due {
                Due::Timer(handle, purpose) => self.fire_timer(handle, purpose)?,
                Due::Debounced(action) => self.navigate(action),
            }
        }
        self.clock.set(now);
        Ok(())
    }

    // ── Internals ───────────────────────────────────────────────────────

    fn ensure_mounted(&self) -> Result<()> {
        if self.mounted {
            Ok(())
        } else {
            Err(TourError::NotMounted)
        }
    }

    fn capture(&mut self) -> Result<()> {
        self.session
            .ensure_captured(&self.host, self.config.target_padding)
            .map(|_| ())
    }

    fn navigate(&mut self, action: NavAction) {
        match action {
            NavAction::Previous => self.previous(),
            NavAction::Next => self.next(),
            NavAction::Close => self.close(),
        }
    }

    fn next_due(&mut self, now: Duration) -> Option<(Duration, Due)> {
        let timer = self
            .subscriptions
            .next_deadline()
            .filter(|deadline| *deadline <= now);
        let prev = self.prev_debounce.deadline().filter(|d| *d <= now);
        let next = self.next_debounce.deadline().filter(|d| *d <= now);

        let earliest = [timer, prev, next].into_iter().flatten().min()?;
        if timer == Some(earliest) {
            let (handle, purpose, at) = self.subscriptions.take_due_timer(earliest)?;
            return Some((at, Due::Timer(handle, purpose)));
        }
        if prev == Some(earliest) {
            self.prev_debounce.poll(earliest)?;
            return Some((earliest, Due::Debounced(NavAction::Previous)));
        }
        self.next_debounce.poll(earliest)?;
        Some((earliest, Due::Debounced(NavAction::Next)))
    }

    fn fire_timer(&mut self, handle: SubscriptionHandle, purpose: TimerPurpose) -> Result<()> {
        match purpose {
            TimerPurpose::AutoStart => {
                self.auto_start = None;
                tracing::debug!(target: "tour.controller", "auto-start");
                self.show_step(0)?;
            }
            TimerPurpose::CreatePopover => {
                if !self.session.untrack(handle) {
                    return Ok(());
                }
                let (popover, disposed) = self.session.acquire_popover();
                if let Some(effect) = disposed {
                    self.host.apply(effect);
                }
                self.host.apply(Effect::CreatePopover {
                    popover,
                    options: self.popover_options.clone(),
                });
                self.host.apply(Effect::ShowPopover(popover));
                let visibility = self
                    .subscriptions
                    .subscribe(SubscriptionKind::Observer(Signal::PopoverVisibility));
                self.session.track(visibility);
                self.host
                    .apply(Effect::ObserveVisibility { sub: visibility.id() });
            }
        }
        Ok(())
    }

    fn take_step_signal(&mut self, signal: Signal) -> Option<SubscriptionHandle> {
        let handle = self.subscriptions.take_signal(signal)?;
        self.session.untrack(handle);
        Some(handle)
    }

    fn apply_transition(&mut self, transition: Transition) {
        match transition {
            Transition::Entered(index) => self.enter_step(index),
            Transition::Closed { from } => {
                tracing::debug!(target: "tour.controller", from, "tour closed");
                self.hide();
            }
            Transition::Unchanged => {}
        }
    }

    fn enter_step(&mut self, index: usize) {
        let state = self.session.sequencer().state();
        let frame = match render(&self.config, self.session.coordinates(), state) {
            Rendered::Step(frame) => frame,
            Rendered::Missing { .. } | Rendered::Hidden => {
                self.render_missing(index);
                return;
            }
        };
        tracing::debug!(target: "tour.controller", step = index, total = frame.total, "enter step");

        self.cancel_step_subscriptions();
        if let Some(effect) = self.session.dispose_popover() {
            self.host.apply(effect);
        }
        self.session.set_clicks_bound(false);
        for effect in frame.effects() {
            self.host.apply(effect);
        }

        let inserted = self
            .subscriptions
            .subscribe(SubscriptionKind::Observer(Signal::PopoverInserted));
        self.session.track(inserted);
        self.host.apply(Effect::ObserveMutation {
            sub: inserted.id(),
            selector: popover_selector(),
        });

        let deadline = self.clock.now().saturating_add(self.config.popover_delay);
        let timer = self
            .subscriptions
            .schedule(deadline, TimerPurpose::CreatePopover);
        self.session.track(timer);
    }

    fn render_missing(&mut self, index: usize) {
        tracing::error!(
            target: "tour.controller",
            step = index,
            total = self.session.step_count(),
            "no captured coordinate for step"
        );
        self.session.sequencer_mut().close();
        self.hide();
    }

    fn hide(&mut self) {
        self.prev_debounce.cancel();
        self.next_debounce.cancel();
        self.cancel_step_subscriptions();
        if let Some(effect) = self.session.dispose_popover() {
            self.host.apply(effect);
        }
        self.session.set_clicks_bound(false);
        self.host.apply(Effect::HideOverlay);
    }

    fn cancel_step_subscriptions(&mut self) {
        for handle in self.session.drain_pending() {
            if let Some(SubscriptionKind::Observer(_)) = self.subscriptions.cancel(handle) {
                self.host.apply(Effect::Unobserve { sub: handle.id() });
            }
        }
    }

    fn cancel_auto_start(&mut self) {
        if let Some(handle) = self.auto_start.take() {
            self.subscriptions.cancel(handle);
        }
    }
}

impl<H: Host> Lifecycle for TourController<H> {
    fn on_mount(&mut self) {
        if self.mounted {
            return;
        }
        self.mounted = true;
        self.host
            .apply(Effect::InjectStylesheet(stylesheet(&self.config.style)));

        if self.session.step_count() == 0 {
            tracing::debug!(target: "tour.controller", "no tour steps; hiding trigger");
            if self.has_trigger {
                self.host.apply(Effect::HideTrigger);
            }
            return;
        }

        self.host.apply(Effect::AttachKeyListener);
        self.key_listener = true;
        if self.has_trigger {
            tracing::debug!(target: "tour.controller", "trigger found");
            self.host.apply(Effect::AttachTriggerListener);
        } else {
            let deadline = self
                .clock
                .now()
                .saturating_add(self.config.auto_start_delay);
            self.auto_start = Some(
                self.subscriptions
                    .schedule(deadline, TimerPurpose::AutoStart),
            );
        }
        tracing::debug!(
            target: "tour.controller",
            steps = self.session.step_count(),
            trigger = self.has_trigger,
            "mounted"
        );
    }

    fn on_unmount(&mut self) {
        if !self.mounted {
            return;
        }
        if self.key_listener {
            self.host.apply(Effect::DetachKeyListener);
            self.key_listener = false;
        }
        let was_active = self.session.is_active();
        self.session.sequencer_mut().close();
        self.prev_debounce.cancel();
        self.next_debounce.cancel();
        self.cancel_step_subscriptions();
        self.auto_start = None;
        for (handle, kind) in self.subscriptions.clear() {
            if let SubscriptionKind::Observer(_) = kind {
                self.host.apply(Effect::Unobserve { sub: handle.id() });
            }
        }
        if let Some(effect) = self.session.dispose_popover() {
            self.host.apply(effect);
        }
        if was_active {
            self.host.apply(Effect::HideOverlay);
        }
        self.session.reset();
        self.mounted = false;
        tracing::debug!(target: "tour.controller", "unmounted");
    }
}
