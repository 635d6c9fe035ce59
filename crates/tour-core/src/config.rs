#![forbid(unsafe_code)]

//! Tour configuration.
//!
//! # Timing Defaults
//!
//! | Setting | Default | Range | Description |
//! |---------|---------|-------|-------------|
//! | `auto_start_delay` | 1000ms | 0-60000ms | Wait before auto-starting when the page has no trigger |
//! | `key_debounce` | 250ms | 0-1000ms | Trailing-edge window for arrow keys |
//! | `popover_delay` | 300ms | 0-2000ms | Settle time before the popover is created |
//!
//! # Environment Variables
//!
//! | Variable | Type | Default | Description |
//! |----------|------|---------|-------------|
//! | `GUIDED_TOUR_TIMEOUT_MS` | u64 | 1000 | Auto-start delay |
//! | `GUIDED_TOUR_KEY_DEBOUNCE_MS` | u64 | 250 | Arrow-key debounce window |
//! | `GUIDED_TOUR_POPOVER_DELAY_MS` | u64 | 300 | Popover creation delay |
//! | `GUIDED_TOUR_STEP_LINE` | string | `Step {{current}} of {{total}}` | Step line template |
//! | `GUIDED_TOUR_NEXT_LABEL` | string | `Next` | Next button label |
//! | `GUIDED_TOUR_PREV_LABEL` | string | `Prev` | Previous button label |
//! | `GUIDED_TOUR_DONE_LABEL` | string | `Done!` | Finish button label |

use web_time::Duration;

use crate::coordinates::DEFAULT_TARGET_PADDING;
use crate::style::StyleConfig;
use crate::template::{DEFAULT_POPOVER_TEMPLATE, DEFAULT_STEP_LINE, Labels};

pub const DEFAULT_AUTO_START_DELAY_MS: u64 = 1000;
pub const MAX_AUTO_START_DELAY_MS: u64 = 60_000;

pub const DEFAULT_KEY_DEBOUNCE_MS: u64 = 250;
pub const MAX_KEY_DEBOUNCE_MS: u64 = 1000;

pub const DEFAULT_POPOVER_DELAY_MS: u64 = 300;
pub const MAX_POPOVER_DELAY_MS: u64 = 2000;

pub const MAX_TARGET_PADDING: f64 = 64.0;

pub const DEFAULT_NEXT_LABEL: &str = "Next";
pub const DEFAULT_PREV_LABEL: &str = "Prev";
pub const DEFAULT_DONE_LABEL: &str = "Done!";

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TourConfig {
    /// Delay before auto-start when no trigger element exists.
    #[cfg_attr(feature = "serde", serde(rename = "timeout_ms", with = "duration_ms"))]
    pub auto_start_delay: Duration,

    /// Trailing-edge debounce for arrow-key navigation.
    #[cfg_attr(feature = "serde", serde(rename = "key_debounce_ms", with = "duration_ms"))]
    pub key_debounce: Duration,

    /// Delay between positioning the overlay and creating the popover.
    #[cfg_attr(feature = "serde", serde(rename = "popover_delay_ms", with = "duration_ms"))]
    pub popover_delay: Duration,

    /// Pixels added around each target on every side.
    pub target_padding: f64,

    /// Step line template (`{{current}}`, `{{total}}`).
    pub step_line: String,
    pub next_label: String,
    pub prev_label: String,
    pub done_label: String,

    /// Popover body template (`{{stepLine}}`, `{{totalSteps}}`,
    /// `{{prevButton}}`, `{{nextButton}}`, `{{content}}`).
    pub popover_template: String,

    pub style: StyleConfig,
}

impl Default for TourConfig {
    fn default() -> Self {
        Self {
            auto_start_delay: Duration::from_millis(DEFAULT_AUTO_START_DELAY_MS),
            key_debounce: Duration::from_millis(DEFAULT_KEY_DEBOUNCE_MS),
            popover_delay: Duration::from_millis(DEFAULT_POPOVER_DELAY_MS),
            target_padding: DEFAULT_TARGET_PADDING,
            step_line: DEFAULT_STEP_LINE.to_owned(),
            next_label: DEFAULT_NEXT_LABEL.to_owned(),
            prev_label: DEFAULT_PREV_LABEL.to_owned(),
            done_label: DEFAULT_DONE_LABEL.to_owned(),
            popover_template: DEFAULT_POPOVER_TEMPLATE.to_owned(),
            style: StyleConfig::default(),
        }
    }
}

impl TourConfig {
    #[must_use]
    pub fn with_auto_start_delay(mut self, delay: Duration) -> Self {
        self.auto_start_delay = delay;
        self
    }

    #[must_use]
    pub fn with_key_debounce(mut self, debounce: Duration) -> Self {
        self.key_debounce = debounce;
        self
    }

    #[must_use]
    pub fn with_popover_delay(mut self, delay: Duration) -> Self {
        self.popover_delay = delay;
        self
    }

    #[must_use]
    pub fn with_step_line(mut self, template: impl Into<String>) -> Self {
        self.step_line = template.into();
        self
    }

    /// Set next, previous, and done labels.
    #[must_use]
    pub fn with_labels(
        mut self,
        next: impl Into<String>,
        prev: impl Into<String>,
        done: impl Into<String>,
    ) -> Self {
        self.next_label = next.into();
        self.prev_label = prev.into();
        self.done_label = done.into();
        self
    }

    #[must_use]
    pub fn with_popover_template(mut self, template: impl Into<String>) -> Self {
        self.popover_template = template.into();
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: StyleConfig) -> Self {
        self.style = style;
        self
    }

    /// Borrow the label strings for template rendering.
    #[must_use]
    pub fn labels(&self) -> Labels<'_> {
        Labels {
            step_line: &self.step_line,
            next: &self.next_label,
            prev: &self.prev_label,
            done: &self.done_label,
        }
    }

    /// Load config from `GUIDED_TOUR_*` environment variables.
    ///
    /// Unparseable numbers are ignored; values are clamped by
    /// [`validated`](Self::validated).
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env) with an arbitrary key lookup.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let millis = |key: &str| {
            lookup(key)
                .and_then(|val| val.trim().parse::<u64>().ok())
                .map(Duration::from_millis)
        };

        if let Some(delay) = millis("GUIDED_TOUR_TIMEOUT_MS") {
            config.auto_start_delay = delay;
        }
        if let Some(debounce) = millis("GUIDED_TOUR_KEY_DEBOUNCE_MS") {
            config.key_debounce = debounce;
        }
        if let Some(delay) = millis("GUIDED_TOUR_POPOVER_DELAY_MS") {
            config.popover_delay = delay;
        }
        if let Some(line) = lookup("GUIDED_TOUR_STEP_LINE") {
            config.step_line = line;
        }
        if let Some(label) = lookup("GUIDED_TOUR_NEXT_LABEL") {
            config.next_label = label;
        }
        if let Some(label) = lookup("GUIDED_TOUR_PREV_LABEL") {
            config.prev_label = label;
        }
        if let Some(label) = lookup("GUIDED_TOUR_DONE_LABEL") {
            config.done_label = label;
        }

        config.validated()
    }

    /// Clamp timings and padding to safe ranges.
    #[must_use]
    pub fn validated(mut self) -> Self {
        self.auto_start_delay = clamp_millis(self.auto_start_delay, MAX_AUTO_START_DELAY_MS);
        self.key_debounce = clamp_millis(self.key_debounce, MAX_KEY_DEBOUNCE_MS);
        self.popover_delay = clamp_millis(self.popover_delay, MAX_POPOVER_DELAY_MS);
        self.target_padding = if self.target_padding.is_finite() {
            self.target_padding.clamp(0.0, MAX_TARGET_PADDING)
        } else {
            DEFAULT_TARGET_PADDING
        };
        self
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.auto_start_delay.as_millis() <= u128::from(MAX_AUTO_START_DELAY_MS)
            && self.key_debounce.as_millis() <= u128::from(MAX_KEY_DEBOUNCE_MS)
            && self.popover_delay.as_millis() <= u128::from(MAX_POPOVER_DELAY_MS)
            && (0.0..=MAX_TARGET_PADDING).contains(&self.target_padding)
    }
}

fn clamp_millis(value: Duration, max_ms: u64) -> Duration {
    let max = Duration::from_millis(max_ms);
    if value > max {
        tracing::warn!(
            target: "tour.config",
            requested_ms = value.as_millis() as u64,
            max_ms,
            "clamping tour timing"
        );
        max
    } else {
        value
    }
}

#[cfg(feature = "serde")]
mod duration_ms {
    use serde::{Deserialize, Deserializer, Serializer};
    use web_time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
