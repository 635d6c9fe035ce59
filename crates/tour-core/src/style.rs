//! Stylesheet injected once when the tour mounts.
//!
//! Covers the highlight overlay (a box-shadow cutout over a dimmed page),
//! its `active` state, the slide-in-and-jiggle animation of the start
//! trigger, and the popover's stacking and width.

use crate::popover::{ACTIVE_CLASS, OVERLAY_CLASS, POPOVER_CLASS, STARTER_WRAPPER_CLASS};
use crate::template::substitute;

const STYLESHEET_TEMPLATE: &str = r#"
    :root {
      --guided-tour-jiggle-offset: {{jiggleOffset}}px;
    }

    @keyframes slideFromRight {
        0% {
            transform: translateX(100%);
            opacity: 0;
        }
        50% {
            transform: translateX(0);
            opacity: 1;
        }
        60% {
            transform: translateX(calc(var(--guided-tour-jiggle-offset) * -1));
        }
        70% {
            transform: translateX(var(--guided-tour-jiggle-offset));
        }
        80% {
            transform: translateX(calc(var(--guided-tour-jiggle-offset) * -1));
        }
        90% {
            transform: translateX(var(--guided-tour-jiggle-offset));
        }
        100% {
            transform: translateX(0);
            opacity: 1;
        }
    }

    .{{overlayClass}} {
        box-shadow: {{highlightColor}} 0 0 1px 2px,
        {{backdropColor}} 0 0 0 5000px;
        box-sizing: content-box;
        position: absolute;
        border-radius: 4px;
        transition: all {{transitionMs}}ms ease-out;
        z-index: {{overlayZ}};
        pointer-events: none;
        opacity: 0;
    }

    .{{starterClass}} {
      position: absolute;
      right: 1rem;
      bottom: 1rem;
      animation: slideFromRight 1.2s cubic-bezier(0.23, 1, 0.32, 1) forwards;
      animation-delay: {{starterDelayMs}}ms;
      opacity: 0;
      will-change: transform, opacity;

      > .btn {
        transform-origin: right center;
        z-index: 1000;
      }
    }

    .{{overlayClass}}.{{activeClass}} {
        opacity: 1;
    }

    .{{popoverClass}} {
        z-index: {{popoverZ}};
        max-width: {{popoverMaxWidth}};
    }
"#;

/// Knobs for the generated stylesheet.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StyleConfig {
    /// Horizontal jiggle amplitude of the start button, in pixels.
    pub jiggle_offset_px: u16,
    /// Thin ring drawn around the highlighted element.
    pub highlight_color: String,
    /// Dimming color spread over the rest of the page.
    pub backdrop_color: String,
    /// Duration of the overlay's move/resize transition.
    pub transition_ms: u32,
    /// Delay before the start button slides in.
    pub starter_delay_ms: u32,
    pub overlay_z_index: i32,
    /// Kept above the overlay.
    pub popover_z_index: i32,
    /// Any CSS length.
    pub popover_max_width: String,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            jiggle_offset_px: 25,
            highlight_color: "rgb(233 77 77 / 80%)".to_owned(),
            backdrop_color: "rgb(84 84 84 / 50%)".to_owned(),
            transition_ms: 300,
            starter_delay_ms: 1000,
            overlay_z_index: 9998,
            popover_z_index: 9999,
            popover_max_width: "33.3%".to_owned(),
        }
    }
}

impl StyleConfig {
    #[must_use]
    pub fn jiggle_offset(mut self, px: u16) -> Self {
        self.jiggle_offset_px = px;
        self
    }

    #[must_use]
    pub fn popover_max_width(mut self, width: impl Into<String>) -> Self {
        self.popover_max_width = width.into();
        self
    }

    #[must_use]
    pub fn colors(mut self, highlight: impl Into<String>, backdrop: impl Into<String>) -> Self {
        self.highlight_color = highlight.into();
        self.backdrop_color = backdrop.into();
        self
    }
}

/// Render the stylesheet text.
#[must_use]
pub fn stylesheet(config: &StyleConfig) -> String {
    let replacements = [
        ("{{jiggleOffset}}", config.jiggle_offset_px.to_string()),
        ("{{highlightColor}}", config.highlight_color.clone()),
        ("{{backdropColor}}", config.backdrop_color.clone()),
        ("{{transitionMs}}", config.transition_ms.to_string()),
        ("{{overlayZ}}", config.overlay_z_index.to_string()),
        ("{{starterDelayMs}}", config.starter_delay_ms.to_string()),
        ("{{popoverZ}}", config.popover_z_index.to_string()),
        ("{{popoverMaxWidth}}", config.popover_max_width.clone()),
    ];
    // Class tokens may repeat across selectors, so they are replaced everywhere.
    let classes = [
        ("{{overlayClass}}", OVERLAY_CLASS),
        ("{{activeClass}}", ACTIVE_CLASS),
        ("{{starterClass}}", STARTER_WRAPPER_CLASS),
        ("{{popoverClass}}", POPOVER_CLASS),
    ];
    let css = replacements
        .iter()
        .fold(STYLESHEET_TEMPLATE.to_owned(), |css, (token, value)| {
            substitute(&css, token, value)
        });
    classes
        .iter()
        .fold(css, |css, &(token, class)| css.replace(token, class))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_stylesheet_is_fully_substituted() {
        let css = stylesheet(&StyleConfig::default());
        assert!(!css.contains("{{"));
        assert!(css.contains("--guided-tour-jiggle-offset: 25px;"));
        assert!(css.contains("z-index: 9998;"));
        assert!(css.contains("z-index: 9999;"));
        assert!(css.contains("max-width: 33.3%;"));
        assert!(css.contains("transition: all 300ms ease-out;"));
        assert!(css.contains(".guided-tour--overlay.active {"));
    }

    #[test]
    fn selectors_come_from_tour_classes() {
        let css = stylesheet(&StyleConfig::default());
        assert!(css.contains(&format!(".{OVERLAY_CLASS} {{")));
        assert!(css.contains(&format!(".{OVERLAY_CLASS}.{ACTIVE_CLASS} {{")));
        assert!(css.contains(&format!(".{STARTER_WRAPPER_CLASS} {{")));
        assert!(css.contains(&format!(".{POPOVER_CLASS} {{")));
        assert!(!css.contains("Class}}"));
    }

    #[test]
    fn overrides_flow_into_css() {
        let config = StyleConfig::default()
            .jiggle_offset(10)
            .popover_max_width("420px")
            .colors("red", "rgba(0, 0, 0, 0.4)");
        let css = stylesheet(&config);
        assert!(css.contains("--guided-tour-jiggle-offset: 10px;"));
        assert!(css.contains("max-width: 420px;"));
        assert!(css.contains("box-shadow: red 0 0 1px 2px,"));
        assert!(css.contains("rgba(0, 0, 0, 0.4) 0 0 0 5000px;"));
    }
}
