//! Canvas geometry for drag-to-create tools.
//!
//! This module provides:
//! - [`Point`] and [`Rect`] value types in canvas space
//! - [`compute_box`], which turns a drag gesture into a normalized box under
//!   aspect-lock, center-anchor and grid-snap constraints
//! - The minimum-size policy applied to degenerate drags, which respects the
//!   drag anchor

use serde::{Deserialize, Serialize};

/// A position in canvas coordinates (camera and zoom already applied).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Snaps both coordinates to the nearest multiple of `grid`.
    pub fn snapped(self, grid: f64) -> Self {
        Self::new(snap(self.x, grid), snap(self.y, grid))
    }
}

/// Axis-aligned box with its origin at the top-left corner.
///
/// Width and height are never negative once produced by [`Rect::from_corners`]
/// or [`compute_box`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Creates a rectangle, folding negative extents back into the origin.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::from_corners(Point::new(x, y), Point::new(x + width, y + height))
    }

    /// Zero-size rectangle at `point`.
    pub fn at(point: Point) -> Self {
        Self {
            x: point.x,
            y: point.y,
            width: 0.0,
            height: 0.0,
        }
    }

    /// Builds the normalized rectangle spanning two opposite corners.
    pub fn from_corners(a: Point, b: Point) -> Self {
        let (x, width) = if b.x >= a.x {
            (a.x, b.x - a.x)
        } else {
            (b.x, a.x - b.x)
        };
        let (y, height) = if b.y >= a.y {
            (a.y, b.y - a.y)
        } else {
            (b.y, a.y - b.y)
        };
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn min(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn max(&self) -> Point {
        Point::new(self.x + self.width, self.y + self.height)
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Returns true when either dimension is zero.
    pub fn is_degenerate(&self) -> bool {
        self.width == 0.0 || self.height == 0.0
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.y >= self.y
            && point.x <= self.x + self.width
            && point.y <= self.y + self.height
    }

    /// Returns a rectangle that covers both inputs.
    pub fn union(self, other: Rect) -> Rect {
        let min = Point::new(self.x.min(other.x), self.y.min(other.y));
        let max = Point::new(
            (self.x + self.width).max(other.x + other.width),
            (self.y + self.height).max(other.y + other.height),
        );
        Rect::from_corners(min, max)
    }

    /// Expands the rectangle evenly in all directions by `amount`.
    pub fn inflate(self, amount: f64) -> Rect {
        Rect {
            x: self.x - amount,
            y: self.y - amount,
            width: (self.width + amount * 2.0).max(0.0),
            height: (self.height + amount * 2.0).max(0.0),
        }
    }
}

/// Constraints applied while computing a box from a drag.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoxConstraints {
    /// Width/height ratio to hold; `None` leaves the box unconstrained
    pub aspect_ratio: Option<f64>,
    /// Treat the origin as the center of the box instead of a corner
    pub center_anchor: bool,
    /// Snap corners to multiples of this size
    pub grid_size: Option<f64>,
}

/// Computes the box described by dragging from `origin` to `current`.
///
/// The result is normalized for any drag direction. Under aspect-lock the
/// longer of the two deltas (in ratio units) drives the size while each delta
/// keeps its sign, so the box stays in the pointer's quadrant. With a grid the
/// inputs are snapped first and the resulting corners are snapped again, so
/// the corners are always grid multiples.
pub fn compute_box(origin: Point, current: Point, constraints: &BoxConstraints) -> Rect {
    let grid = constraints.grid_size.filter(|g| *g > 0.0);
    let (origin, current) = match grid {
        Some(g) => (origin.snapped(g), current.snapped(g)),
        None => (origin, current),
    };

    let mut dx = current.x - origin.x;
    let mut dy = current.y - origin.y;

    if let Some(ratio) = constraints.aspect_ratio.filter(|r| *r > 0.0) {
        let (w, h) = lock_ratio(dx.abs(), dy.abs(), ratio);
        dx = w.copysign(dx);
        dy = h.copysign(dy);
    }

    let (a, b) = if constraints.center_anchor {
        (
            Point::new(origin.x - dx, origin.y - dy),
            Point::new(origin.x + dx, origin.y + dy),
        )
    } else {
        (origin, Point::new(origin.x + dx, origin.y + dy))
    };

    let rect = Rect::from_corners(a, b);
    match grid {
        Some(g) => Rect::from_corners(rect.min().snapped(g), rect.max().snapped(g)),
        None => rect,
    }
}

/// Grows the smaller side of `width` x `height` so that width/height == ratio.
fn lock_ratio(width: f64, height: f64, ratio: f64) -> (f64, f64) {
    if width >= height * ratio {
        (width, width / ratio)
    } else {
        (height * ratio, height)
    }
}

/// Raises every dimension below `min_size` to `min_size`.
///
/// A center-anchored box grows symmetrically around `origin`. Otherwise each
/// short side grows away from `origin`, so a box dragged up or left keeps the
/// edge that touches the origin.
pub fn enforce_min_size(rect: Rect, min_size: f64, origin: Point, center_anchor: bool) -> Rect {
    if min_size <= 0.0 {
        return rect;
    }
    let (x, width) = grow_axis(rect.x, rect.width, origin.x, min_size, center_anchor);
    let (y, height) = grow_axis(rect.y, rect.height, origin.y, min_size, center_anchor);
    Rect {
        x,
        y,
        width,
        height,
    }
}

fn grow_axis(start: f64, extent: f64, origin: f64, min_size: f64, centered: bool) -> (f64, f64) {
    if extent >= min_size {
        (start, extent)
    } else if centered {
        (origin - min_size / 2.0, min_size)
    } else if start < origin {
        (start + extent - min_size, min_size)
    } else {
        (start, min_size)
    }
}

/// Box placed by a click without a drag: `size` anchored at `origin`, or
/// centered on it when `center_anchor` is set.
pub fn click_box(origin: Point, size: (f64, f64), center_anchor: bool) -> Rect {
    let (width, height) = (size.0.max(0.0), size.1.max(0.0));
    if center_anchor {
        Rect::new(origin.x - width / 2.0, origin.y - height / 2.0, width, height)
    } else {
        Rect::new(origin.x, origin.y, width, height)
    }
}

fn snap(value: f64, grid: f64) -> f64 {
    if grid > 0.0 {
        (value / grid).round() * grid
    } else {
        value
    }
}
