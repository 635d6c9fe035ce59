//! Structured log coverage: lifecycle and transitions at DEBUG under
//! `tour.controller`, popover churn under `tour.session`, subscription churn
//! at TRACE under `tour.subscription`, and the out-of-range diagnostic at
//! ERROR.

use std::sync::{Arc, Mutex};

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use web_time::Duration;

use tour_core::{BoundingBox, HostMarkup, Step, TourConfig};
use tour_web::{Lifecycle, RecordingHost, TourController};

#[derive(Debug, Clone)]
struct CapturedEvent {
    level: Level,
    target: String,
    message: String,
}

#[derive(Clone, Default)]
struct EventCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

struct MessageVisitor(String);

impl tracing::field::Visit for MessageVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.0 = format!("{value:?}");
        }
    }
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for EventCapture {
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let mut visitor = MessageVisitor(String::new());
        event.record(&mut visitor);
        self.events.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            target: event.metadata().target().to_string(),
            message: visitor.0,
        });
    }
}

fn capture<F: FnOnce()>(f: F) -> Vec<CapturedEvent> {
    let layer = EventCapture::default();
    let events = Arc::clone(&layer.events);
    let subscriber = tracing_subscriber::registry().with(layer);
    tracing::subscriber::with_default(subscriber, f);
    let events = events.lock().unwrap().clone();
    events
}

fn tour() -> TourController<RecordingHost> {
    let host = RecordingHost::new(600.0)
        .with_element("a", BoundingBox::new(0.0, 0.0, 10.0, 10.0))
        .with_element("b", BoundingBox::new(50.0, 0.0, 10.0, 10.0));
    let markup = HostMarkup::new(vec![Step::text("a", "A"), Step::text("b", "B")]).with_trigger();
    TourController::new(host, markup, TourConfig::default())
}

fn has(events: &[CapturedEvent], level: Level, target: &str, message: &str) -> bool {
    events
        .iter()
        .any(|e| e.level == level && e.target == target && e.message == message)
}

#[test]
fn walkthrough_logs_under_stable_targets() {
    let events = capture(|| {
        let mut tour = tour();
        tour.on_mount();
        tour.start().unwrap();
        tour.tick(Duration::from_millis(300)).unwrap();
        tour.next();
        tour.close();
        tour.on_unmount();
    });

    assert!(has(&events, Level::DEBUG, "tour.controller", "mounted"));
    assert!(has(&events, Level::DEBUG, "tour.controller", "tour start"));
    assert!(has(&events, Level::DEBUG, "tour.controller", "enter step"));
    assert!(has(&events, Level::DEBUG, "tour.controller", "tour closed"));
    assert!(has(&events, Level::DEBUG, "tour.controller", "unmounted"));
    assert!(has(&events, Level::DEBUG, "tour.coordinates", "captured step coordinates"));
    assert!(has(&events, Level::DEBUG, "tour.session", "acquire popover"));
    assert!(has(&events, Level::DEBUG, "tour.session", "dispose popover"));
    assert!(has(&events, Level::TRACE, "tour.subscription", "subscribe"));
    assert!(has(&events, Level::TRACE, "tour.subscription", "cancel"));
    assert!(has(&events, Level::TRACE, "tour.subscription", "timer fired"));
    assert!(!events.iter().any(|e| e.level == Level::ERROR));
}

#[test]
fn out_of_range_step_logs_error() {
    let events = capture(|| {
        let mut tour = tour();
        tour.on_mount();
        tour.show_step(9).unwrap();
        assert!(!tour.is_active());
    });

    let errors: Vec<_> = events.iter().filter(|e| e.level == Level::ERROR).collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].target, "tour.controller");
    assert_eq!(errors[0].message, "no captured coordinate for step");
}
