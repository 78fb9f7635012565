//! Interaction layer: turns pointer and key events into document edits.
//!
//! `EngineCore` owns the document, the selection gizmo, the spatial index
//! and the gesture state. It never renders; each handler returns the
//! [`Action`]s a host should react to.
//!
//! The index is rebuilt only when geometry changes: after a shape is drawn,
//! erased or deleted, when a move/resize/rotate gesture ends, and on
//! snapshot load. Hover and hit tests in between reuse it.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use crate::aabb::Aabb;
use crate::config::EngineConfig;
use crate::document::Document;
use crate::gizmo::Gizmo;
use crate::handle::{Cursor, Hit, HitPart};
use crate::quadtree::QuadTree;
use crate::shape::{Geometry, Shape, ShapeId};
use crate::tool::{InputState, Key, Modifiers, Tool};
use crate::vector::Vector;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    ShapeCreated(Shape),
    ShapesUpdated(Vec<ShapeId>),
    ShapeDeleted { id: ShapeId },
    SelectionChanged(Vec<ShapeId>),
    SetCursor(Cursor),
    RenderNeeded,
}

/// Core engine state.
pub struct EngineCore {
    pub doc: Document,
    pub gizmo: Gizmo,
    pub tool: Tool,
    pub input: InputState,
    pub config: EngineConfig,
    index: QuadTree,
    index_generation: u64,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::with_config(EngineConfig::default())
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        let doc = Document::new();
        let (index, _) = doc.index(&config);
        Self {
            doc,
            gizmo: Gizmo::new(config.handle_threshold),
            tool: Tool::default(),
            input: InputState::default(),
            config,
            index,
            index_generation: 0,
        }
    }

    // --- Data inputs ---

    /// Replace the document and drop the selection.
    pub fn load_snapshot(&mut self, shapes: Vec<Shape>) {
        self.doc.load_snapshot(shapes);
        self.gizmo.clear();
        self.input = InputState::Idle;
        self.reindex();
    }

    /// Rebuild the spatial index from the document. Hosts that edit `doc`
    /// directly call this afterwards.
    pub fn reindex(&mut self) {
        let (index, rejected) = self.doc.index(&self.config);
        self.index = index;
        self.index_generation += 1;
        tracing::debug!(
            shapes = self.index.len(),
            rejected = rejected.len(),
            generation = self.index_generation,
            "index rebuilt"
        );
    }

    /// Set the active tool. Leaving the pointer tool drops the selection.
    pub fn set_tool(&mut self, tool: Tool) -> Vec<Action> {
        if self.tool == tool {
            return Vec::new();
        }
        self.tool = tool;
        self.end_gesture();
        tracing::debug!(tool = tool.as_str(), "tool selected");

        if tool == Tool::Pointer || self.gizmo.is_empty() {
            return Vec::new();
        }
        self.gizmo.clear();
        vec![Action::SelectionChanged(Vec::new()), Action::RenderNeeded]
    }

    // --- Input events ---

    pub fn pointer_down(&mut self, point: Vector, modifiers: Modifiers) -> Vec<Action> {
        match self.tool {
            Tool::Eraser => {
                self.input = InputState::Erasing;
                self.erase_at(point)
            }
            Tool::Pencil => Vec::new(),
            Tool::Rectangle | Tool::Ellipse | Tool::Segment => self.begin_drawing(point),
            Tool::Pointer => self.begin_pointer_gesture(point, modifiers),
        }
    }

    pub fn pointer_move(&mut self, point: Vector) -> Vec<Action> {
        match self.input {
            InputState::Idle => vec![Action::SetCursor(self.hover_cursor(point))],
            InputState::Drawing { id } => {
                let Some(shape) = self.doc.get_mut(&id) else {
                    return Vec::new();
                };
                drag_extent(shape, point);
                vec![Action::ShapesUpdated(vec![id]), Action::RenderNeeded]
            }
            InputState::Moving => {
                self.gizmo.move_to(&mut self.doc, point);
                self.selection_updated()
            }
            InputState::Resizing { handle, previous } => {
                self.gizmo.resize(&mut self.doc, handle, previous, point);
                self.selection_updated()
            }
            InputState::Rotating { pivot, start_angle } => {
                let angle = (point - pivot).atan2() - start_angle;
                self.gizmo.rotate(&mut self.doc, angle);
                self.selection_updated()
            }
            InputState::Marquee { origin, additive, .. } => {
                self.input = InputState::Marquee { origin, current: point, additive };
                vec![Action::RenderNeeded]
            }
            InputState::Erasing => self.erase_at(point),
        }
    }

    pub fn pointer_up(&mut self, point: Vector) -> Vec<Action> {
        let input = std::mem::take(&mut self.input);
        match input {
            InputState::Drawing { id } => {
                let Some(shape) = self.doc.get_mut(&id) else {
                    return Vec::new();
                };
                shape.normalize();
                tracing::debug!(%id, kind = %shape.kind(), "shape drawn");
                self.reindex();
                vec![Action::ShapesUpdated(vec![id]), Action::RenderNeeded]
            }
            InputState::Resizing { .. } => {
                self.gizmo.normalize(&mut self.doc);
                self.reindex();
                self.selection_updated()
            }
            InputState::Moving | InputState::Rotating { .. } => {
                self.reindex();
                vec![Action::RenderNeeded]
            }
            InputState::Marquee { origin, additive, .. } => self.finish_marquee(origin, point, additive),
            InputState::Idle | InputState::Erasing => Vec::new(),
        }
    }

    pub fn key_down(&mut self, key: &Key) -> Vec<Action> {
        match key.0.as_str() {
            "Escape" => {
                self.end_gesture();
                if self.gizmo.is_empty() {
                    return Vec::new();
                }
                self.gizmo.clear();
                vec![Action::SelectionChanged(Vec::new()), Action::RenderNeeded]
            }
            "Delete" | "Backspace" => self.delete_selection(),
            other => Tool::from_shortcut(other).map_or_else(Vec::new, |tool| self.set_tool(tool)),
        }
    }

    // --- Queries ---

    /// What the pointer is over: selection handles and the rotate knob
    /// first, then the topmost shape.
    #[must_use]
    pub fn hit_test(&self, point: Vector) -> Option<Hit> {
        if let Some(&shape_id) = self.gizmo.targets().first() {
            if self.gizmo.intersects_rotate_handle(point) {
                return Some(Hit { shape_id, part: HitPart::RotateHandle });
            }
            if let Some(handle) = self.gizmo.handle_under_cursor(point) {
                return Some(Hit { shape_id, part: HitPart::Handle(handle) });
            }
        }
        self.shape_at(point).map(|shape_id| Hit { shape_id, part: HitPart::Body })
    }

    /// The currently selected shapes, in selection order.
    #[must_use]
    pub fn selection(&self) -> &[ShapeId] {
        self.gizmo.targets()
    }

    /// Look up a shape by id.
    #[must_use]
    pub fn shape(&self, id: &ShapeId) -> Option<&Shape> {
        self.doc.get(id)
    }

    /// Bumped on every index rebuild.
    #[must_use]
    pub fn index_generation(&self) -> u64 {
        self.index_generation
    }

    /// Marquee rectangle while one is being dragged.
    #[must_use]
    pub fn marquee(&self) -> Option<Aabb> {
        match self.input {
            InputState::Marquee { origin, current, .. } => Some(Aabb::from_corners(origin, current)),
            _ => None,
        }
    }

    // --- Gestures ---

    fn begin_drawing(&mut self, point: Vector) -> Vec<Action> {
        let Some(kind) = self.tool.shape_kind() else {
            return Vec::new();
        };
        let shape = Shape::create(kind, point.x, point.y, 0.0, 0.0, serde_json::json!({}));
        let id = shape.id;
        self.doc.insert(shape.clone());
        self.input = InputState::Drawing { id };

        let mut actions = Vec::new();
        if !self.gizmo.is_empty() {
            self.gizmo.clear();
            actions.push(Action::SelectionChanged(Vec::new()));
        }
        actions.push(Action::ShapeCreated(shape));
        actions.push(Action::RenderNeeded);
        actions
    }

    fn begin_pointer_gesture(&mut self, point: Vector, modifiers: Modifiers) -> Vec<Action> {
        if self.gizmo.intersects_rotate_handle(point) {
            self.gizmo.save(&self.doc);
            let pivot = self.gizmo.center();
            self.input = InputState::Rotating { pivot, start_angle: (point - pivot).atan2() };
            return vec![Action::SetCursor(Cursor::Grab)];
        }

        if let Some(handle) = self.gizmo.set_anchor(point) {
            self.gizmo.save(&self.doc);
            self.input = InputState::Resizing { handle, previous: point };
            return vec![Action::SetCursor(handle.cursor())];
        }

        if !modifiers.shift && self.gizmo.contains(point) {
            self.gizmo.set_offset(&mut self.doc, point);
            self.input = InputState::Moving;
            return vec![Action::SetCursor(Cursor::Move)];
        }

        let Some(id) = self.shape_at(point) else {
            self.input = InputState::Marquee { origin: point, current: point, additive: modifiers.shift };
            if modifiers.shift || self.gizmo.is_empty() {
                return Vec::new();
            }
            self.gizmo.clear();
            return vec![Action::SelectionChanged(Vec::new()), Action::RenderNeeded];
        };

        let mut targets = if modifiers.shift { self.gizmo.targets().to_vec() } else { Vec::new() };
        if !targets.contains(&id) {
            targets.push(id);
        }
        self.gizmo.add(&self.doc, targets);
        self.gizmo.set_offset(&mut self.doc, point);
        self.input = InputState::Moving;
        vec![
            Action::SelectionChanged(self.gizmo.targets().to_vec()),
            Action::SetCursor(Cursor::Move),
            Action::RenderNeeded,
        ]
    }

    /// Select the shapes fully inside the marquee, in draw order. An
    /// additive marquee appends them to the current selection.
    fn finish_marquee(&mut self, origin: Vector, point: Vector, additive: bool) -> Vec<Action> {
        let range = Aabb::from_corners(origin, point);
        let hits: Vec<ShapeId> = self.index.query_range(&range).iter().map(|s| s.id).collect();
        let mut selected = if additive { self.gizmo.targets().to_vec() } else { Vec::new() };
        for id in self.doc.ids() {
            if hits.contains(id) && !selected.contains(id) {
                selected.push(*id);
            }
        }
        self.gizmo.add(&self.doc, selected);
        vec![Action::SelectionChanged(self.gizmo.targets().to_vec()), Action::RenderNeeded]
    }

    /// Delete the topmost shape whose outline passes under `point`.
    fn erase_at(&mut self, point: Vector) -> Vec<Action> {
        let outlines: Vec<&Shape> = self.index.query_point(point).into_iter().filter(|s| s.intersects(point)).collect();
        let Some(id) = self.doc.topmost(&outlines).map(|s| s.id) else {
            return Vec::new();
        };
        self.doc.remove(&id);
        tracing::info!(%id, "shape erased");
        self.reindex();

        let mut actions = vec![Action::ShapeDeleted { id }];
        if self.gizmo.targets().contains(&id) {
            let remaining: Vec<ShapeId> = self.gizmo.targets().iter().filter(|t| **t != id).copied().collect();
            self.gizmo.add(&self.doc, remaining);
            actions.push(Action::SelectionChanged(self.gizmo.targets().to_vec()));
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    fn delete_selection(&mut self) -> Vec<Action> {
        self.end_gesture();
        if self.gizmo.is_empty() {
            return Vec::new();
        }
        let mut actions: Vec<Action> = self
            .gizmo
            .targets()
            .iter()
            .filter_map(|id| self.doc.remove(id))
            .map(|shape| Action::ShapeDeleted { id: shape.id })
            .collect();
        tracing::info!(count = actions.len(), "selection deleted");
        self.gizmo.clear();
        self.reindex();
        actions.push(Action::SelectionChanged(Vec::new()));
        actions.push(Action::RenderNeeded);
        actions
    }

    // --- Helpers ---

    /// Topmost shape hit at `point`.
    fn shape_at(&self, point: Vector) -> Option<ShapeId> {
        let hits = self.index.query_point(point);
        self.doc.topmost(&hits).map(|s| s.id)
    }

    /// Drop any gesture in progress, keeping its edits.
    fn end_gesture(&mut self) {
        let input = std::mem::take(&mut self.input);
        if matches!(
            input,
            InputState::Drawing { .. } | InputState::Moving | InputState::Resizing { .. } | InputState::Rotating { .. }
        ) {
            self.reindex();
        }
    }

    fn hover_cursor(&self, point: Vector) -> Cursor {
        if self.tool != Tool::Pointer {
            return Cursor::Crosshair;
        }
        let fallback = if self.gizmo.contains(point) { Cursor::Move } else { Cursor::Default };
        self.hit_test(point).map_or(fallback, |hit| hit.part.cursor())
    }

    fn selection_updated(&self) -> Vec<Action> {
        vec![Action::ShapesUpdated(self.gizmo.targets().to_vec()), Action::RenderNeeded]
    }
}

/// Stretch a freshly drawn shape so its far corner (or segment end) follows
/// `point`. Width and height stay signed until the gesture ends.
fn drag_extent(shape: &mut Shape, point: Vector) {
    match &shape.geometry {
        Geometry::Rectangle(frame) | Geometry::Ellipse(frame) => {
            let (width, height) = (point.x - frame.x, point.y - frame.y);
            shape.resize(width, height);
        }
        Geometry::Segment(_) => shape.resize(point.x, point.y),
    }
}
