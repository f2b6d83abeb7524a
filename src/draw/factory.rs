//! Shape factories supplied by each box tool variant.
//!
//! A factory builds the provisional record shown while dragging (`create`,
//! called at pointer-move frequency) and fills in type-specific derived fields
//! once the box is settled (`finalize`, called exactly once per commit).

use super::shape::{ShapeId, ShapeKind, ShapeRecord, ShapeType};
use crate::geometry::{Point, Rect};
use std::f64::consts::TAU;
use std::fmt;
use thiserror::Error;

/// Errors raised while finalizing a shape.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FactoryError {
    #[error("bounds are not finite: {0:?}")]
    NonFiniteBounds(Rect),
    #[error("polygon needs at least 3 sides, got {0}")]
    TooFewSides(u32),
    #[error("{expected:?} factory received a {found:?} shape")]
    WrongKind { expected: ShapeType, found: ShapeType },
}

/// Capability every box tool variant provides.
pub trait ShapeFactory: fmt::Debug {
    /// Shape type produced by this factory.
    fn shape_type(&self) -> ShapeType;

    /// Builds a provisional record fitted to `bounds`. Must stay cheap and pure.
    ///
    /// Only the bounds of a provisional record track the drag; derived fields
    /// hold placeholders until `finalize`.
    fn create(&self, id: ShapeId, bounds: Rect) -> ShapeRecord;

    /// Normalizes the provisional record for the settled `bounds`.
    fn finalize(&self, bounds: Rect, provisional: ShapeRecord)
    -> Result<ShapeRecord, FactoryError>;
}

fn check(
    factory: &dyn ShapeFactory,
    bounds: Rect,
    provisional: &ShapeRecord,
) -> Result<(), FactoryError> {
    if !bounds.is_finite() {
        return Err(FactoryError::NonFiniteBounds(bounds));
    }
    let found = provisional.shape_type();
    if found != factory.shape_type() {
        return Err(FactoryError::WrongKind {
            expected: factory.shape_type(),
            found,
        });
    }
    Ok(())
}

/// Rectangles with an optional corner radius.
#[derive(Debug, Clone)]
pub struct RectangleFactory {
    pub corner_radius: f64,
}

impl ShapeFactory for RectangleFactory {
    fn shape_type(&self) -> ShapeType {
        ShapeType::Rectangle
    }

    fn create(&self, id: ShapeId, bounds: Rect) -> ShapeRecord {
        ShapeRecord::new(id, bounds, ShapeKind::Rectangle { corner_radius: 0.0 })
    }

    fn finalize(
        &self,
        bounds: Rect,
        provisional: ShapeRecord,
    ) -> Result<ShapeRecord, FactoryError> {
        check(self, bounds, &provisional)?;
        let limit = bounds.width.min(bounds.height) / 2.0;
        let corner_radius = self.corner_radius.max(0.0).min(limit);
        Ok(ShapeRecord::new(
            provisional.id,
            bounds,
            ShapeKind::Rectangle { corner_radius },
        ))
    }
}

/// Ellipses inscribed in the box.
#[derive(Debug, Clone, Default)]
pub struct EllipseFactory;

impl ShapeFactory for EllipseFactory {
    fn shape_type(&self) -> ShapeType {
        ShapeType::Ellipse
    }

    fn create(&self, id: ShapeId, bounds: Rect) -> ShapeRecord {
        ShapeRecord::new(id, bounds, ShapeKind::Ellipse { rx: 0.0, ry: 0.0 })
    }

    fn finalize(
        &self,
        bounds: Rect,
        provisional: ShapeRecord,
    ) -> Result<ShapeRecord, FactoryError> {
        check(self, bounds, &provisional)?;
        Ok(ShapeRecord::new(
            provisional.id,
            bounds,
            ShapeKind::Ellipse {
                rx: bounds.width / 2.0,
                ry: bounds.height / 2.0,
            },
        ))
    }
}

/// Regular polygons stretched to the box.
#[derive(Debug, Clone)]
pub struct PolygonFactory {
    pub sides: u32,
}

impl ShapeFactory for PolygonFactory {
    fn shape_type(&self) -> ShapeType {
        ShapeType::Polygon
    }

    fn create(&self, id: ShapeId, bounds: Rect) -> ShapeRecord {
        ShapeRecord::new(
            id,
            bounds,
            ShapeKind::Polygon {
                sides: self.sides,
                vertices: Vec::new(),
            },
        )
    }

    fn finalize(
        &self,
        bounds: Rect,
        provisional: ShapeRecord,
    ) -> Result<ShapeRecord, FactoryError> {
        check(self, bounds, &provisional)?;
        if self.sides < 3 {
            return Err(FactoryError::TooFewSides(self.sides));
        }
        Ok(ShapeRecord::new(
            provisional.id,
            bounds,
            ShapeKind::Polygon {
                sides: self.sides,
                vertices: polygon_vertices(bounds, self.sides),
            },
        ))
    }
}

/// Vertices of a regular `sides`-gon inscribed in `bounds`.
///
/// The first vertex sits at the top-center and the rest follow clockwise
/// (canvas y grows downward).
pub fn polygon_vertices(bounds: Rect, sides: u32) -> Vec<Point> {
    let center = bounds.center();
    let rx = bounds.width / 2.0;
    let ry = bounds.height / 2.0;
    (0..sides)
        .map(|i| {
            let angle = TAU * f64::from(i) / f64::from(sides);
            Point::new(center.x + rx * angle.sin(), center.y - ry * angle.cos())
        })
        .collect()
}

/// Labelled frames.
#[derive(Debug, Clone)]
pub struct FrameFactory {
    pub label: String,
}

impl ShapeFactory for FrameFactory {
    fn shape_type(&self) -> ShapeType {
        ShapeType::Frame
    }

    fn create(&self, id: ShapeId, bounds: Rect) -> ShapeRecord {
        ShapeRecord::new(
            id,
            bounds,
            ShapeKind::Frame {
                label: String::new(),
            },
        )
    }

    fn finalize(
        &self,
        bounds: Rect,
        provisional: ShapeRecord,
    ) -> Result<ShapeRecord, FactoryError> {
        check(self, bounds, &provisional)?;
        Ok(ShapeRecord::new(
            provisional.id,
            bounds,
            ShapeKind::Frame {
                label: self.label.clone(),
            },
        ))
    }
}

/// Image placeholders.
#[derive(Debug, Clone, Default)]
pub struct ImageFactory;

impl ShapeFactory for ImageFactory {
    fn shape_type(&self) -> ShapeType {
        ShapeType::Image
    }

    fn create(&self, id: ShapeId, bounds: Rect) -> ShapeRecord {
        ShapeRecord::new(id, bounds, ShapeKind::Image { aspect_ratio: 1.0 })
    }

    fn finalize(
        &self,
        bounds: Rect,
        provisional: ShapeRecord,
    ) -> Result<ShapeRecord, FactoryError> {
        check(self, bounds, &provisional)?;
        let aspect_ratio = if bounds.height > 0.0 {
            bounds.width / bounds.height
        } else {
            1.0
        };
        Ok(ShapeRecord::new(
            provisional.id,
            bounds,
            ShapeKind::Image { aspect_ratio },
        ))
    }
}
