//! Shape records, factories and the document store.
//!
//! This module defines the data side of box tools:
//! - [`ShapeRecord`]: a shape with its bounds and type-specific fields
//! - [`ShapeFactory`]: per-variant construction and finalization
//! - [`Document`]: the in-memory store of provisional and committed shapes
//! - [`DirtyTracker`]: repaint regions produced while a shape is dragged out

pub mod dirty;
pub mod document;
pub mod factory;
pub mod shape;

pub use dirty::DirtyTracker;
pub use document::{Document, DocumentStore, ShapeStatus, SharedDocument, StoreError, StoredShape};
pub use factory::{
    EllipseFactory, FactoryError, FrameFactory, ImageFactory, PolygonFactory, RectangleFactory,
    ShapeFactory,
};
pub use shape::{ShapeId, ShapeKind, ShapeRecord, ShapeType};
