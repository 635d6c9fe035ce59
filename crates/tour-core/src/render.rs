#![forbid(unsafe_code)]

//! Pure step renderer.
//!
//! Maps the tour state to what the page should show, without touching
//! anything. The runtime turns the result into [`Effect`]s.

use crate::config::TourConfig;
use crate::coordinates::Coordinate;
use crate::effect::Effect;
use crate::geometry::BoundingBox;
use crate::sequencer::TourState;
use crate::template::popover_body;

/// Overlay bounds and popover body for one active step.
#[derive(Debug, Clone, PartialEq)]
pub struct StepFrame {
    pub index: usize,
    pub total: usize,
    pub overlay: BoundingBox,
    pub body: String,
}

impl StepFrame {
    /// Overlay positioning first, then the popover content.
    #[must_use]
    pub fn effects(&self) -> [Effect; 2] {
        [
            Effect::ShowOverlay(self.overlay),
            Effect::SetPopoverContent(self.body.clone()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Rendered {
    /// Tour closed; overlay hidden.
    Hidden,
    Step(StepFrame),
    /// The requested step has no captured coordinate.
    Missing { index: usize, total: usize },
}

/// Render `state` against the captured coordinates.
#[must_use]
pub fn render(config: &TourConfig, coordinates: &[Coordinate], state: TourState) -> Rendered {
    match state {
        TourState::Closed => Rendered::Hidden,
        TourState::Active(index) => render_step(config, coordinates, index),
    }
}

/// Render step `index`, whatever the sequencer thinks.
#[must_use]
pub fn render_step(config: &TourConfig, coordinates: &[Coordinate], index: usize) -> Rendered {
    let total = coordinates.len();
    let Some(coordinate) = coordinates.get(index) else {
        return Rendered::Missing { index, total };
    };
    let content = coordinate.step.content.to_html();
    Rendered::Step(StepFrame {
        index,
        total,
        overlay: coordinate.bounds,
        body: popover_body(&config.popover_template, config.labels(), index, total, &content),
    })
}
