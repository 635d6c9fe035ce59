//! End-to-end tour flows against a recording host.
//!
//! Each test drives the controller the way the JS shim would (mount, clicks,
//! observer callbacks, clock ticks) and asserts the exact effect stream.

use pretty_assertions::assert_eq;
use web_time::Duration;

use tour_core::popover::popover_selector;
use tour_core::style::stylesheet;
use tour_core::template::{DEFAULT_POPOVER_TEMPLATE, popover_body};
use tour_core::{
    BoundingBox, Effect, HostMarkup, KeyCode, Placement, PopoverId, PopoverOptions, ScrollOffset,
    Step, StyleConfig, TourConfig,
};
use tour_web::{Lifecycle, RecordingHost, TourController};

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn page() -> RecordingHost {
    let mut host = RecordingHost::new(800.0)
        .with_element("dashboard", BoundingBox::new(100.0, 20.0, 200.0, 40.0))
        .with_element("settings", BoundingBox::new(900.0, 20.0, 200.0, 40.0))
        .with_element("profile", BoundingBox::new(300.0, 400.0, 80.0, 80.0));
    host.set_scroll(ScrollOffset::new(0.0, 50.0));
    host
}

fn two_steps() -> Vec<Step> {
    vec![
        Step::text("dashboard", "Your dashboard"),
        Step::text("settings", "Change settings here"),
    ]
}

fn body(config: &TourConfig, index: usize, total: usize, content: &str) -> String {
    popover_body(DEFAULT_POPOVER_TEMPLATE, config.labels(), index, total, content)
}

#[test]
fn trigger_walkthrough_emits_exact_effects() {
    let config = TourConfig::default();
    let markup = HostMarkup::new(two_steps()).with_trigger();
    let mut tour = TourController::new(page(), markup, config.clone());

    tour.on_mount();
    tour.on_trigger_click().unwrap();
    tour.on_popover_inserted();
    tour.tick(ms(300)).unwrap();
    tour.on_popover_visibility(100.0);

    tour.on_popover_click("btn btn-primary guided-tour--next");
    tour.tick(ms(600)).unwrap();
    tour.on_popover_visibility(900.0);
    tour.on_popover_inserted();
    tour.on_popover_click("btn btn-success guided-tour--finish");

    let selector = popover_selector();
    let expected = vec![
        Effect::InjectStylesheet(stylesheet(&StyleConfig::default())),
        Effect::AttachKeyListener,
        Effect::AttachTriggerListener,
        // step 0
        Effect::ShowOverlay(BoundingBox::new(145.0, 15.0, 210.0, 50.0)),
        Effect::SetPopoverContent(body(&config, 0, 2, "Your dashboard")),
        Effect::ObserveMutation {
            sub: 1,
            selector: selector.clone(),
        },
        Effect::BindPopoverClicks {
            selector: selector.clone(),
        },
        Effect::Unobserve { sub: 1 },
        Effect::CreatePopover {
            popover: PopoverId(1),
            options: PopoverOptions::default(),
        },
        Effect::ShowPopover(PopoverId(1)),
        Effect::ObserveVisibility { sub: 3 },
        Effect::Unobserve { sub: 3 },
        // step 1
        Effect::DisposePopover(PopoverId(1)),
        Effect::ShowOverlay(BoundingBox::new(945.0, 15.0, 210.0, 50.0)),
        Effect::SetPopoverContent(body(&config, 1, 2, "Change settings here")),
        Effect::ObserveMutation {
            sub: 4,
            selector: selector.clone(),
        },
        Effect::CreatePopover {
            popover: PopoverId(2),
            options: PopoverOptions::default(),
        },
        Effect::ShowPopover(PopoverId(2)),
        Effect::ObserveVisibility { sub: 6 },
        Effect::ScrollIntoView { smooth: true },
        Effect::Unobserve { sub: 6 },
        Effect::BindPopoverClicks { selector },
        Effect::Unobserve { sub: 4 },
        // finish
        Effect::DisposePopover(PopoverId(2)),
        Effect::HideOverlay,
    ];
    assert_eq!(tour.host().effects(), expected.as_slice());
    assert!(!tour.is_active());
    assert!(tour.subscriptions().is_empty());
}

#[test]
fn auto_start_cascades_within_one_tick() {
    let markup = HostMarkup::new(two_steps());
    let mut tour = TourController::new(page(), markup, TourConfig::default());
    tour.on_mount();
    tour.host_mut().take_effects();

    tour.tick(ms(5000)).unwrap();
    let kinds: Vec<_> = tour.host().effects().iter().map(Effect::kind).collect();
    assert_eq!(
        kinds,
        vec![
            "show_overlay",
            "set_popover_content",
            "observe_mutation",
            "create_popover",
            "show_popover",
            "observe_visibility",
        ]
    );
    assert_eq!(tour.current_step(), Some(0));
    assert_eq!(tour.now(), ms(5000));
}

#[test]
fn trigger_click_is_ignored_without_trigger() {
    let markup = HostMarkup::new(two_steps());
    let mut tour = TourController::new(page(), markup, TourConfig::default());
    tour.on_mount();
    tour.on_trigger_click().unwrap();
    assert!(!tour.is_active());
}

#[test]
fn clicking_trigger_again_restarts_from_first_step() {
    let markup = HostMarkup::new(two_steps()).with_trigger();
    let mut tour = TourController::new(page(), markup, TourConfig::default());
    tour.on_mount();
    tour.on_trigger_click().unwrap();
    tour.next();
    assert_eq!(tour.current_step(), Some(1));

    tour.on_trigger_click().unwrap();
    assert_eq!(tour.current_step(), Some(0));
}

#[test]
fn prev_and_next_debounce_independently() {
    let markup = HostMarkup::new(vec![
        Step::text("dashboard", "A"),
        Step::text("settings", "B"),
        Step::text("profile", "C"),
    ])
    .with_trigger();
    let mut tour = TourController::new(page(), markup, TourConfig::default());
    tour.on_mount();
    tour.start().unwrap();
    tour.next();
    assert_eq!(tour.current_step(), Some(1));

    tour.on_key(KeyCode::Left, ms(0)).unwrap();
    tour.on_key(KeyCode::Right, ms(100)).unwrap();

    tour.tick(ms(250)).unwrap();
    assert_eq!(tour.current_step(), Some(0));
    tour.tick(ms(350)).unwrap();
    assert_eq!(tour.current_step(), Some(1));
}

#[test]
fn key_debounce_honors_configured_window() {
    let config = TourConfig::default().with_key_debounce(ms(500));
    let markup = HostMarkup::new(two_steps()).with_trigger();
    let mut tour = TourController::new(page(), markup, config);
    tour.on_mount();
    tour.start().unwrap();

    tour.on_key(KeyCode::Right, ms(0)).unwrap();
    tour.tick(ms(499)).unwrap();
    assert_eq!(tour.current_step(), Some(0));
    tour.tick(ms(500)).unwrap();
    assert_eq!(tour.current_step(), Some(1));
}

#[test]
fn next_on_last_step_closes() {
    let markup = HostMarkup::new(two_steps()).with_trigger();
    let mut tour = TourController::new(page(), markup, TourConfig::default());
    tour.on_mount();
    tour.start().unwrap();
    tour.next();
    tour.next();
    assert!(!tour.is_active());
    assert_eq!(tour.host().effects().last(), Some(&Effect::HideOverlay));

    // Closed is terminal until the next start.
    tour.next();
    tour.previous();
    assert!(!tour.is_active());
}

#[test]
fn coordinates_are_captured_once() {
    let markup = HostMarkup::new(two_steps()).with_trigger();
    let mut tour = TourController::new(page(), markup, TourConfig::default());
    tour.on_mount();
    tour.start().unwrap();
    tour.close();

    tour.host_mut().set_scroll(ScrollOffset::new(0.0, 500.0));
    tour.host_mut().take_effects();
    tour.start().unwrap();
    assert_eq!(
        tour.host().effects().first(),
        Some(&Effect::ShowOverlay(BoundingBox::new(145.0, 15.0, 210.0, 50.0)))
    );
}

#[test]
fn remount_captures_against_the_new_scroll() {
    let markup = HostMarkup::new(two_steps()).with_trigger();
    let mut tour = TourController::new(page(), markup, TourConfig::default());
    tour.on_mount();
    tour.start().unwrap();
    tour.on_unmount();

    tour.host_mut().set_scroll(ScrollOffset::new(0.0, 500.0));
    tour.on_mount();
    tour.host_mut().take_effects();
    tour.start().unwrap();
    assert_eq!(
        tour.host().effects().first(),
        Some(&Effect::ShowOverlay(BoundingBox::new(595.0, 15.0, 210.0, 50.0)))
    );
}

#[test]
fn popover_options_reach_create_popover() {
    let options = PopoverOptions::default().placement(Placement::Bottom);
    let markup = HostMarkup::new(two_steps()).with_trigger();
    let mut tour = TourController::new(page(), markup, TourConfig::default())
        .with_popover_options(options.clone());
    tour.on_mount();
    tour.start().unwrap();
    tour.tick(ms(300)).unwrap();

    let created: Vec<&PopoverOptions> = tour
        .host()
        .effects()
        .iter()
        .filter_map(|e| match e {
            Effect::CreatePopover { options, .. } => Some(options),
            _ => None,
        })
        .collect();
    assert_eq!(created, vec![&options]);
    assert_eq!(created[0].placement, Placement::Bottom);
}

#[test]
fn custom_labels_are_escaped_into_the_body() {
    let config = TourConfig::default().with_labels("Weiter <b>", "Zurück", "Fertig & fort");
    let markup = HostMarkup::new(two_steps()).with_trigger();
    let mut tour = TourController::new(page(), markup, config);
    tour.on_mount();
    tour.start().unwrap();
    tour.next();

    let contents: Vec<&str> = tour
        .host()
        .effects()
        .iter()
        .filter_map(|e| match e {
            Effect::SetPopoverContent(body) => Some(body.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(contents.len(), 2);
    assert!(contents[0].contains("Weiter &lt;b&gt;"));
    assert!(!contents[0].contains("Zurück"));
    assert!(contents[1].contains("Zurück"));
    assert!(contents[1].contains("Fertig &amp; fort"));
}
