//! Dirty region tracking for incremental repaint.
//!
//! Collects canvas-space rectangles the host needs to repaint between frames.

use super::ShapeRecord;
use crate::geometry::Rect;

/// Tracks dirty rectangles accumulated between renders.
#[derive(Debug, Default)]
pub struct DirtyTracker {
    regions: Vec<Rect>,
}

impl DirtyTracker {
    /// Creates a new, empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a dirty rectangle. Non-finite rectangles are ignored.
    pub fn mark_rect(&mut self, rect: Rect) {
        if rect.is_finite() {
            self.regions.push(rect);
        }
    }

    /// Adds the padded bounds of `shape`.
    pub fn mark_shape(&mut self, shape: &ShapeRecord, padding: f64) {
        self.mark_rect(shape.damage_bounds(padding));
    }

    /// True when nothing needs repainting.
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Drains the dirty regions gathered so far.
    pub fn take_regions(&mut self) -> Vec<Rect> {
        std::mem::take(&mut self.regions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{ShapeId, ShapeKind};

    fn ellipse(bounds: Rect) -> ShapeRecord {
        ShapeRecord::new(ShapeId::new(), bounds, ShapeKind::Ellipse { rx: 0.0, ry: 0.0 })
    }

    #[test]
    fn mark_shape_records_padded_rectangles() {
        let mut tracker = DirtyTracker::new();
        tracker.mark_shape(&ellipse(Rect::new(0.0, 0.0, 10.0, 10.0)), 2.0);

        let rects = tracker.take_regions();
        assert_eq!(rects, vec![Rect::new(-2.0, -2.0, 14.0, 14.0)]);
        assert!(tracker.take_regions().is_empty());
        assert!(tracker.is_empty());
    }

    #[test]
    fn non_finite_rects_are_dropped() {
        let mut tracker = DirtyTracker::new();
        tracker.mark_rect(Rect {
            x: f64::NAN,
            y: 0.0,
            width: 1.0,
            height: 1.0,
        });
        assert!(tracker.is_empty());
    }
}
