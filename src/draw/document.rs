//! In-memory document store for shapes created by box tools.

use super::shape::{ShapeId, ShapeRecord};
use crate::geometry::Rect;
use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;
use thiserror::Error;

/// Errors returned by [`DocumentStore`] operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StoreError {
    #[error("no shape with id {0}")]
    UnknownShape(ShapeId),
    #[error("shape {0} is already committed")]
    NotProvisional(ShapeId),
    #[error("shape {0} already exists")]
    DuplicateShape(ShapeId),
    #[error("shape limit ({0}) reached")]
    ShapeLimit(usize),
}

/// Operations a box tool performs on the document.
pub trait DocumentStore {
    /// Inserts a shape tagged as provisional (visible, not yet committed).
    fn insert_provisional(&mut self, shape: ShapeRecord) -> Result<(), StoreError>;

    /// Moves a provisional shape to `bounds`. Repeating the same bounds is a no-op.
    fn update_provisional(&mut self, id: ShapeId, bounds: Rect) -> Result<(), StoreError>;

    /// Replaces the provisional shape with `finalized` and marks it committed.
    fn commit(&mut self, id: ShapeId, finalized: ShapeRecord) -> Result<(), StoreError>;

    /// Removes a provisional shape without leaving an undo entry.
    fn discard(&mut self, id: ShapeId) -> Result<(), StoreError>;

    /// Replaces the current selection.
    fn select(&mut self, ids: &[ShapeId]);
}

/// Whether a stored shape is still being created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShapeStatus {
    Provisional,
    Committed,
}

/// A shape together with its commit status.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoredShape {
    #[serde(flatten)]
    pub record: ShapeRecord,
    pub status: ShapeStatus,
}

/// Container for all shapes of one canvas.
///
/// Shapes are kept in draw order (first = bottom layer, last = top layer).
/// Only commits are recorded for undo; provisional inserts and discards
/// never are.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Document {
    shapes: Vec<StoredShape>,
    selection: Vec<ShapeId>,
    #[serde(skip)]
    undo_log: Vec<ShapeId>,
    /// Maximum number of committed shapes (0 = unlimited)
    #[serde(skip)]
    max_shapes: usize,
    /// Incremented on every observable change
    #[serde(skip)]
    revision: u64,
}

impl Document {
    /// Creates an empty document with no shape limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty document that refuses commits beyond `max_shapes`.
    pub fn with_shape_limit(max_shapes: usize) -> Self {
        Self {
            max_shapes,
            ..Self::default()
        }
    }

    /// Wraps the document in the shared handle tools are constructed with.
    pub fn into_shared(self) -> SharedDocument {
        Rc::new(RefCell::new(self))
    }

    /// All stored shapes, provisional ones included.
    pub fn shapes(&self) -> &[StoredShape] {
        &self.shapes
    }

    /// Iterates over committed shapes only.
    pub fn committed(&self) -> impl Iterator<Item = &ShapeRecord> {
        self.shapes
            .iter()
            .filter(|s| s.status == ShapeStatus::Committed)
            .map(|s| &s.record)
    }

    pub fn committed_count(&self) -> usize {
        self.committed().count()
    }

    pub fn get(&self, id: ShapeId) -> Option<&StoredShape> {
        self.shapes.iter().find(|s| s.record.id == id)
    }

    pub fn contains(&self, id: ShapeId) -> bool {
        self.get(id).is_some()
    }

    pub fn selection(&self) -> &[ShapeId] {
        &self.selection
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Removes the most recently committed shape, if any.
    pub fn undo(&mut self) -> Option<ShapeRecord> {
        let id = self.undo_log.pop()?;
        let index = self.index_of(id)?;
        let removed = self.shapes.remove(index);
        self.selection.retain(|s| *s != id);
        self.revision += 1;
        log::debug!("Undo removed shape {id}");
        Some(removed.record)
    }

    fn index_of(&self, id: ShapeId) -> Option<usize> {
        self.shapes.iter().position(|s| s.record.id == id)
    }

    fn provisional_index(&self, id: ShapeId) -> Result<usize, StoreError> {
        let index = self.index_of(id).ok_or(StoreError::UnknownShape(id))?;
        if self.shapes[index].status != ShapeStatus::Provisional {
            return Err(StoreError::NotProvisional(id));
        }
        Ok(index)
    }
}

impl DocumentStore for Document {
    fn insert_provisional(&mut self, shape: ShapeRecord) -> Result<(), StoreError> {
        if self.contains(shape.id) {
            return Err(StoreError::DuplicateShape(shape.id));
        }
        self.shapes.push(StoredShape {
            record: shape,
            status: ShapeStatus::Provisional,
        });
        self.revision += 1;
        Ok(())
    }

    fn update_provisional(&mut self, id: ShapeId, bounds: Rect) -> Result<(), StoreError> {
        let index = self.provisional_index(id)?;
        let record = &mut self.shapes[index].record;
        if record.bounds != bounds {
            record.bounds = bounds;
            self.revision += 1;
        }
        Ok(())
    }

    fn commit(&mut self, id: ShapeId, finalized: ShapeRecord) -> Result<(), StoreError> {
        let index = self.provisional_index(id)?;
        if self.max_shapes > 0 && self.committed_count() >= self.max_shapes {
            return Err(StoreError::ShapeLimit(self.max_shapes));
        }
        self.shapes[index] = StoredShape {
            record: ShapeRecord { id, ..finalized },
            status: ShapeStatus::Committed,
        };
        self.undo_log.push(id);
        self.revision += 1;
        Ok(())
    }

    fn discard(&mut self, id: ShapeId) -> Result<(), StoreError> {
        let index = self.provisional_index(id)?;
        self.shapes.remove(index);
        self.selection.retain(|s| *s != id);
        self.revision += 1;
        Ok(())
    }

    fn select(&mut self, ids: &[ShapeId]) {
        if self.selection != ids {
            self.selection = ids.to_vec();
            self.revision += 1;
        }
    }
}

/// Document handle shared by every tool of one editor.
pub type SharedDocument = Rc<RefCell<Document>>;

impl<S: DocumentStore + ?Sized> DocumentStore for Rc<RefCell<S>> {
    fn insert_provisional(&mut self, shape: ShapeRecord) -> Result<(), StoreError> {
        self.borrow_mut().insert_provisional(shape)
    }

    fn update_provisional(&mut self, id: ShapeId, bounds: Rect) -> Result<(), StoreError> {
        self.borrow_mut().update_provisional(id, bounds)
    }

    fn commit(&mut self, id: ShapeId, finalized: ShapeRecord) -> Result<(), StoreError> {
        self.borrow_mut().commit(id, finalized)
    }

    fn discard(&mut self, id: ShapeId) -> Result<(), StoreError> {
        self.borrow_mut().discard(id)
    }

    fn select(&mut self, ids: &[ShapeId]) {
        self.borrow_mut().select(ids)
    }
}
