//! Document model: the ordered, in-memory store that owns every shape.
//!
//! Shapes are keyed by id for lookup and kept in a separate insertion-order
//! list that doubles as draw order (first inserted is drawn at the bottom).
//! On the wire the document is a plain JSON array of shapes in that order.
//!
//! Spatial queries go through [`Document::index`], which builds a
//! [`QuadTree`] over a snapshot of the current shapes.

#[cfg(test)]
#[path = "document_test.rs"]
mod document_test;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::aabb::Aabb;
use crate::config::EngineConfig;
use crate::quadtree::QuadTree;
use crate::shape::{Shape, ShapeId};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Shape>", into = "Vec<Shape>")]
pub struct Document {
    shapes: HashMap<ShapeId, Shape>,
    order: Vec<ShapeId>,
}

impl Document {
    /// Create an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a shape. A replaced shape keeps its draw position;
    /// a new shape goes on top.
    pub fn insert(&mut self, shape: Shape) {
        let id = shape.id;
        if self.shapes.insert(id, shape).is_none() {
            self.order.push(id);
        }
    }

    /// Remove a shape by id, returning it if it was present.
    pub fn remove(&mut self, id: &ShapeId) -> Option<Shape> {
        let removed = self.shapes.remove(id)?;
        self.order.retain(|o| o != id);
        Some(removed)
    }

    #[must_use]
    pub fn get(&self, id: &ShapeId) -> Option<&Shape> {
        self.shapes.get(id)
    }

    pub fn get_mut(&mut self, id: &ShapeId) -> Option<&mut Shape> {
        self.shapes.get_mut(id)
    }

    #[must_use]
    pub fn contains(&self, id: &ShapeId) -> bool {
        self.shapes.contains_key(id)
    }

    /// Number of shapes currently in the document.
    #[must_use]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Returns `true` if the document holds no shapes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Ids in draw order, bottom first.
    #[must_use]
    pub fn ids(&self) -> &[ShapeId] {
        &self.order
    }

    /// Shapes in draw order, bottom first.
    #[must_use]
    pub fn ordered(&self) -> Vec<&Shape> {
        self.order.iter().filter_map(|id| self.shapes.get(id)).collect()
    }

    /// Replace every shape with a full snapshot, keeping the snapshot order.
    pub fn load_snapshot(&mut self, shapes: Vec<Shape>) {
        self.shapes.clear();
        self.order.clear();
        for shape in shapes {
            self.insert(shape);
        }
    }

    /// Merge `patch` into a shape's style options. Returns false if the shape
    /// doesn't exist or the patch is not an object.
    pub fn customize(&mut self, id: &ShapeId, patch: &serde_json::Value) -> bool {
        let Some(shape) = self.shapes.get_mut(id) else {
            return false;
        };
        shape.customize(patch)
    }

    /// The candidate drawn last, i.e. visually on top.
    #[must_use]
    pub fn topmost<'a>(&self, candidates: &[&'a Shape]) -> Option<&'a Shape> {
        candidates
            .iter()
            .copied()
            .filter_map(|s| self.order.iter().position(|id| *id == s.id).map(|pos| (pos, s)))
            .max_by_key(|(pos, _)| *pos)
            .map(|(_, s)| s)
    }

    /// World-space extent of every shape. `None` when empty.
    #[must_use]
    pub fn extent(&self) -> Option<Aabb> {
        self.shapes
            .values()
            .map(Shape::extent)
            .reduce(|acc, e| acc.union(&e))
    }

    /// Build a spatial index over the current shapes.
    ///
    /// The root covers the document extent plus `index_padding`. Shapes the
    /// root cannot place (non-finite coordinates) come back as `rejected`.
    #[must_use]
    pub fn index(&self, config: &EngineConfig) -> (QuadTree, Vec<ShapeId>) {
        let boundary = self.extent().unwrap_or_default().expand(config.index_padding);
        let mut tree = QuadTree::with_max_depth(boundary, config.quadtree_capacity, config.quadtree_max_depth);
        let mut rejected = Vec::new();
        for shape in self.ordered() {
            if !tree.insert(shape.clone()) {
                rejected.push(shape.id);
            }
        }
        if !rejected.is_empty() {
            tracing::debug!(count = rejected.len(), "shapes rejected by index");
        }
        (tree, rejected)
    }
}

impl From<Vec<Shape>> for Document {
    fn from(shapes: Vec<Shape>) -> Self {
        let mut doc = Self::new();
        doc.load_snapshot(shapes);
        doc
    }
}

impl From<Document> for Vec<Shape> {
    fn from(mut doc: Document) -> Self {
        doc.order
            .iter()
            .filter_map(|id| doc.shapes.remove(id))
            .collect()
    }
}
