#![forbid(unsafe_code)]

//! Coordinate capture for tour targets.
//!
//! Every step's target element is measured exactly once, when the tour first
//! starts. The captured box is document-relative (viewport rect plus scroll
//! offset) and padded on every side, so the highlight frames the element with
//! some breathing room.
//!
//! # Invariants
//!
//! 1. `capture_all` yields one [`Coordinate`] per step, in step order.
//! 2. A missing target fails the whole capture; nothing partial is kept.
//! 3. Captured boxes are never recomputed (no reflow tracking).

use crate::error::{Result, TourError};
use crate::geometry::{BoundingBox, ScrollOffset};
use crate::step::Step;

/// Margin added around each target, per side, in pixels.
pub const DEFAULT_TARGET_PADDING: f64 = 5.0;

/// Read-only view of live DOM geometry.
pub trait GeometrySource {
    /// Viewport-relative bounding box of the element with `target_id`, or
    /// `None` if no such element exists.
    fn bounding_rect(&self, target_id: &str) -> Option<BoundingBox>;

    /// Current page scroll offsets.
    fn scroll_offset(&self) -> ScrollOffset;
}

/// Captured, padded bounding box for one step.
#[derive(Debug, Clone, PartialEq)]
pub struct Coordinate {
    /// Document-relative, padded box.
    pub bounds: BoundingBox,
    /// The step this box was captured for.
    pub step: Step,
}

impl Coordinate {
    /// Build a coordinate from a viewport rect and the current scroll.
    #[must_use]
    pub fn capture(step: Step, rect: BoundingBox, scroll: ScrollOffset, padding: f64) -> Self {
        Self {
            bounds: rect.scrolled_by(scroll).padded(padding),
            step,
        }
    }

    #[inline]
    pub fn top(&self) -> f64 {
        self.bounds.top
    }

    #[inline]
    pub fn left(&self) -> f64 {
        self.bounds.left
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.bounds.width
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.bounds.height
    }
}

/// Measure every step's target element.
///
/// Fails with [`TourError::MissingTarget`] on the first step whose element is
/// absent. That is a host-markup contract violation, so callers propagate it
/// rather than recover.
pub fn capture_all<G>(steps: &[Step], geometry: &G, padding: f64) -> Result<Vec<Coordinate>>
where
    G: GeometrySource + ?Sized,
{
    let scroll = geometry.scroll_offset();
    steps
        .iter()
        .map(|step| {
            let rect = geometry
                .bounding_rect(&step.target_id)
                .ok_or_else(|| TourError::missing_target(&step.target_id))?;
            Ok(Coordinate::capture(step.clone(), rect, scroll, padding))
        })
        .collect()
}

/// Lazily-populated coordinate cache owned by a tour session.
#[derive(Debug, Clone, Default)]
pub struct CoordinateStore {
    captured: Option<Vec<Coordinate>>,
}

impl CoordinateStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture on first call; later calls return the cached coordinates.
    pub fn ensure_captured<G>(
        &mut self,
        steps: &[Step],
        geometry: &G,
        padding: f64,
    ) -> Result<&[Coordinate]>
    where
        G: GeometrySource + ?Sized,
    {
        if self.captured.is_none() {
            let coordinates = capture_all(steps, geometry, padding)?;
            tracing::debug!(
                target: "tour.coordinates",
                count = coordinates.len(),
                "captured step coordinates"
            );
            self.captured = Some(coordinates);
        }
        Ok(self.as_slice())
    }

    #[must_use]
    pub fn is_captured(&self) -> bool {
        self.captured.is_some()
    }

    /// Captured coordinates, empty before the first capture.
    #[must_use]
    pub fn as_slice(&self) -> &[Coordinate] {
        self.captured.as_deref().unwrap_or(&[])
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Coordinate> {
        self.as_slice().get(index)
    }
}
