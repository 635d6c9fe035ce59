//! The effect-applying boundary between the tour and the page.

use std::collections::HashMap;

use tour_core::{BoundingBox, Effect, GeometrySource, ScrollOffset};

/// Everything the tour needs from the embedding page.
///
/// Geometry queries come from [`GeometrySource`]; every mutation goes
/// through [`apply`](Host::apply), one effect at a time, in emission order.
pub trait Host: GeometrySource {
    /// `window.innerHeight`.
    fn viewport_height(&self) -> f64;

    fn apply(&mut self, effect: Effect);
}

/// A host that records effects instead of touching a DOM.
///
/// Useful for tests and for server-side or headless embeddings that replay
/// the effect stream elsewhere.
#[derive(Debug, Clone, Default)]
pub struct RecordingHost {
    elements: HashMap<String, BoundingBox>,
    scroll: ScrollOffset,
    viewport_height: f64,
    effects: Vec<Effect>,
}

impl RecordingHost {
    #[must_use]
    pub fn new(viewport_height: f64) -> Self {
        Self {
            viewport_height,
            ..Self::default()
        }
    }

    /// Register an element and its viewport-relative bounds.
    #[must_use]
    pub fn with_element(mut self, id: impl Into<String>, rect: BoundingBox) -> Self {
        self.elements.insert(id.into(), rect);
        self
    }

    pub fn set_scroll(&mut self, scroll: ScrollOffset) {
        self.scroll = scroll;
    }

    pub fn remove_element(&mut self, id: &str) -> Option<BoundingBox> {
        self.elements.remove(id)
    }

    /// Effects applied so far.
    #[must_use]
    pub fn effects(&self) -> &[Effect] {
        &self.effects
    }

    /// Take the recorded effects, leaving the log empty.
    pub fn take_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }
}

impl GeometrySource for RecordingHost {
    fn bounding_rect(&self, target_id: &str) -> Option<BoundingBox> {
        self.elements.get(target_id).copied()
    }

    fn scroll_offset(&self) -> ScrollOffset {
        self.scroll
    }
}

impl Host for RecordingHost {
    fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    fn apply(&mut self, effect: Effect) {
        self.effects.push(effect);
    }
}
