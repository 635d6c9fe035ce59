#![forbid(unsafe_code)]

//! Geometric primitives in CSS pixels.

/// An axis-aligned box in CSS pixels.
///
/// Depending on where it came from, the origin is either the viewport
/// (`getBoundingClientRect`) or the document (after adding scroll offsets).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundingBox {
    /// Top edge.
    pub top: f64,
    /// Left edge.
    pub left: f64,
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl BoundingBox {
    /// The empty box at the origin. A hidden overlay is reset to this.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Create a new box.
    #[inline]
    pub const fn new(top: f64, left: f64, width: f64, height: f64) -> Self {
        Self {
            top,
            left,
            width,
            height,
        }
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Right edge (exclusive).
    #[inline]
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// Grow the box by `pad` on every side.
    #[must_use]
    pub fn padded(self, pad: f64) -> Self {
        Self {
            top: self.top - pad,
            left: self.left - pad,
            width: self.width + pad * 2.0,
            height: self.height + pad * 2.0,
        }
    }

    /// Shift a viewport-relative box into document coordinates.
    #[must_use]
    pub fn scrolled_by(self, scroll: ScrollOffset) -> Self {
        Self {
            top: self.top + scroll.y,
            left: self.left + scroll.x,
            ..self
        }
    }
}

/// Page scroll offsets (`pageXOffset` / `pageYOffset`).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollOffset {
    pub x: f64,
    pub y: f64,
}

impl ScrollOffset {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padding_inflates_both_dimensions_twice() {
        let b = BoundingBox::new(10.0, 20.0, 100.0, 40.0).padded(5.0);
        assert_eq!(b, BoundingBox::new(5.0, 15.0, 110.0, 50.0));
        assert_eq!(b.right(), 125.0);
        assert_eq!(b.bottom(), 55.0);
    }

    #[test]
    fn scroll_shifts_origin_only() {
        let b = BoundingBox::new(10.0, 20.0, 30.0, 40.0).scrolled_by(ScrollOffset::new(3.0, 200.0));
        assert_eq!(b, BoundingBox::new(210.0, 23.0, 30.0, 40.0));
    }
}
