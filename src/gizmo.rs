//! Selection controller.
//!
//! The gizmo owns the current selection (an ordered list of shape ids), the
//! oriented box drawn around it, and per-target snapshots taken at gesture
//! start. Transforms are always recomputed from those snapshots, so every
//! pointer move is absolute relative to the gesture origin and rounding never
//! accumulates.
//!
//! A single target keeps its own rotation: the box turns with the shape and
//! resize goes through [`Shape::adjust`]. Two or more targets share an
//! axis-aligned group box and scale about an anchor on the opposite side of
//! the dragged handle. If any target is rotated, group resize is
//! aspect-locked so rotated members scale without shearing.

#[cfg(test)]
#[path = "gizmo_test.rs"]
mod gizmo_test;

use std::collections::HashMap;

use crate::bounding_box::BoundingBox;
use crate::consts::HANDLE_THRESHOLD;
use crate::document::Document;
use crate::geometry::{calculate_scale_factor, calculate_scaled_dimensions, scale_point_about};
use crate::handle::Handle;
use crate::shape::{Geometry, Line, Shape, ShapeId};
use crate::vector::Vector;

/// Target state captured at gesture start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot {
    /// Selection center when the snapshot was taken.
    pub center: Vector,
    /// Opposite corners (NW, SE) for frames, or start and end for segments.
    pub vertices: [Vector; 2],
    /// Target center minus selection center.
    pub displacement: Vector,
    pub angle: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GizmoState {
    Empty,
    Single,
    Group,
}

#[derive(Debug, Clone)]
pub struct Gizmo {
    targets: Vec<ShapeId>,
    boundary: BoundingBox,
    angle: f64,
    anchor: Vector,
    history: HashMap<ShapeId, Snapshot>,
    handle_threshold: f64,
    /// Any target is rotated, so group resize scales uniformly.
    aspect_locked: bool,
}

impl Default for Gizmo {
    fn default() -> Self {
        Self::new(HANDLE_THRESHOLD)
    }
}

impl Gizmo {
    #[must_use]
    pub fn new(handle_threshold: f64) -> Self {
        Self {
            targets: Vec::new(),
            boundary: BoundingBox::default(),
            angle: 0.0,
            anchor: Vector::zero(),
            history: HashMap::new(),
            handle_threshold,
            aspect_locked: false,
        }
    }

    #[must_use]
    pub fn state(&self) -> GizmoState {
        match self.targets.len() {
            0 => GizmoState::Empty,
            1 => GizmoState::Single,
            _ => GizmoState::Group,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    #[must_use]
    pub fn targets(&self) -> &[ShapeId] {
        &self.targets
    }

    #[must_use]
    pub fn boundary(&self) -> &BoundingBox {
        &self.boundary
    }

    #[must_use]
    pub fn angle(&self) -> f64 {
        self.angle
    }

    #[must_use]
    pub fn anchor(&self) -> Vector {
        self.anchor
    }

    #[must_use]
    pub fn center(&self) -> Vector {
        self.boundary.center()
    }

    #[must_use]
    pub fn snapshot(&self, id: &ShapeId) -> Option<&Snapshot> {
        self.history.get(id)
    }

    /// Replace the selection. Ids not present in `doc` are dropped.
    pub fn add(&mut self, doc: &Document, ids: Vec<ShapeId>) {
        self.targets = ids.into_iter().filter(|id| doc.contains(id)).collect();
        self.history.clear();
        self.refresh(doc);
        tracing::debug!(count = self.targets.len(), "selection changed");
    }

    /// Drop the selection and every snapshot.
    pub fn clear(&mut self) {
        self.targets.clear();
        self.history.clear();
        self.boundary = BoundingBox::default();
        self.angle = 0.0;
        self.aspect_locked = false;
    }

    /// Recompute the selection box from the current target geometry.
    pub fn refresh(&mut self, doc: &Document) {
        let shapes: Vec<&Shape> = self.targets.iter().filter_map(|id| doc.get(id)).collect();
        self.aspect_locked = shapes.iter().any(|s| s.is_rotated());
        if let [shape] = shapes.as_slice() {
            self.angle = shape.angle;
            self.boundary = shape.bounding_box();
        } else {
            self.angle = 0.0;
            self.boundary = BoundingBox::enclosing(&shapes);
        }
    }

    /// Capture every target's geometry as the origin for the next gesture.
    pub fn save(&mut self, doc: &Document) {
        let center = self.center();
        self.history.clear();
        for id in &self.targets {
            let Some(shape) = doc.get(id) else {
                continue;
            };
            let vertices = match &shape.geometry {
                Geometry::Rectangle(frame) | Geometry::Ellipse(frame) => {
                    let [nw, _, se, _] = frame.corners();
                    [nw, se]
                }
                Geometry::Segment(line) => [line.start, line.end],
            };
            self.history.insert(
                *id,
                Snapshot {
                    center,
                    vertices,
                    displacement: shape.center() - center,
                    angle: shape.angle,
                },
            );
        }
    }

    /// Record each target's grab offset relative to `pointer`.
    pub fn set_offset(&self, doc: &mut Document, pointer: Vector) {
        for id in &self.targets {
            if let Some(shape) = doc.get_mut(id) {
                shape.set_offset(pointer);
            }
        }
    }

    /// Drag every target so its grab point follows `pointer`.
    pub fn move_to(&mut self, doc: &mut Document, pointer: Vector) {
        for id in &self.targets {
            if let Some(shape) = doc.get_mut(id) {
                let offset = shape.offset;
                shape.move_to(pointer - offset);
            }
        }
        self.refresh(doc);
    }

    /// Pick the handle under `pointer` and, for a group, fix the scaling
    /// anchor opposite it. Returns the handle, or `None` when the pointer is
    /// not on one.
    pub fn set_anchor(&mut self, pointer: Vector) -> Option<Handle> {
        let handle = self.handle_under_cursor(pointer)?;
        if self.state() != GizmoState::Group {
            return Some(handle);
        }

        let b = &self.boundary;
        let (x, y, w, h) = (b.x, b.y, b.width, b.height);
        let locked = self.aspect_locked;

        let anchor = match handle {
            Handle::Se => Vector::new(x, y),
            Handle::Sw => Vector::new(x + w, y),
            Handle::Nw => Vector::new(x + w, y + h),
            Handle::Ne => Vector::new(x, y + h),
            Handle::E if locked => Vector::new(x, y + h / 2.0),
            Handle::W if locked => Vector::new(x + w, y + h / 2.0),
            Handle::N if locked => Vector::new(x + w / 2.0, y + h),
            Handle::S if locked => Vector::new(x + w / 2.0, y),
            Handle::E | Handle::S => Vector::new(x, y),
            Handle::W => Vector::new(x + w, y),
            Handle::N => Vector::new(x, y + h),
            Handle::Start | Handle::End => return Some(handle),
        };
        self.anchor = anchor;
        Some(handle)
    }

    /// Resize the selection from `handle`.
    ///
    /// `previous` is the pointer position when the gesture started (when
    /// [`Gizmo::save`] ran); `pointer` is the current position.
    pub fn resize(&mut self, doc: &mut Document, handle: Handle, previous: Vector, pointer: Vector) {
        match self.state() {
            GizmoState::Empty => return,
            GizmoState::Single => {
                if let Some(shape) = self.targets.first().and_then(|id| doc.get_mut(id)) {
                    shape.adjust(handle, pointer);
                }
            }
            GizmoState::Group => self.resize_group(doc, handle, previous, pointer),
        }
        self.refresh(doc);
    }

    fn resize_group(&self, doc: &mut Document, handle: Handle, previous: Vector, pointer: Vector) {
        let locked = self.aspect_locked;
        let anchor = self.anchor;
        let factor = calculate_scale_factor(pointer, previous, anchor);

        // Locked: one uniform scale. Unlocked edge drags scale one axis and
        // keep the other as saved.
        let horizontal = handle.east() || handle.west();
        let factor = match (locked, handle.is_edge()) {
            (true, true) if horizontal => Vector::new(factor.x, factor.x),
            (true, true) => Vector::new(factor.y, factor.y),
            (true, false) => {
                let scale = factor.x.max(factor.y);
                Vector::new(scale, scale)
            }
            (false, true) if horizontal => Vector::new(factor.x, 1.0),
            (false, true) => Vector::new(1.0, factor.y),
            (false, false) => factor,
        };

        for id in &self.targets {
            let Some(snapshot) = self.history.get(id) else {
                tracing::warn!(shape_id = %id, "no snapshot for resize target; skipping");
                continue;
            };
            let Some(shape) = doc.get_mut(id) else {
                continue;
            };
            let [v0, v1] = snapshot.vertices;

            match &mut shape.geometry {
                Geometry::Rectangle(frame) | Geometry::Ellipse(frame) => {
                    *frame = calculate_scaled_dimensions(v0, v1, anchor, factor);
                }
                Geometry::Segment(line) => {
                    *line = Line {
                        start: scale_point_about(v0, anchor, factor),
                        end: scale_point_about(v1, anchor, factor),
                    };
                }
            }
            shape.normalize();
        }
    }

    /// Rotate the selection by `angle` radians relative to the saved state.
    ///
    /// A single target spins about its own center. A group orbits each
    /// member's center about the saved selection center and spins the member
    /// by the same amount.
    pub fn rotate(&mut self, doc: &mut Document, angle: f64) {
        if self.state() == GizmoState::Empty {
            return;
        }
        let single = self.state() == GizmoState::Single;
        for id in &self.targets {
            let Some(snapshot) = self.history.get(id) else {
                tracing::warn!(shape_id = %id, "no snapshot for rotate target; skipping");
                continue;
            };
            let Some(shape) = doc.get_mut(id) else {
                continue;
            };
            if !single {
                let orbit = (snapshot.center + snapshot.displacement).rotate(snapshot.center, angle);
                shape.recenter(orbit);
            }
            shape.rotate(snapshot.angle + angle);
        }
        self.refresh(doc);
    }

    /// Normalize every target and refresh the box.
    pub fn normalize(&mut self, doc: &mut Document) {
        for id in &self.targets {
            if let Some(shape) = doc.get_mut(id) {
                shape.normalize();
            }
        }
        self.refresh(doc);
    }

    // --- Hit testing ---

    #[must_use]
    pub fn contains(&self, point: Vector) -> bool {
        !self.is_empty() && self.boundary.contains(point)
    }

    #[must_use]
    pub fn intersects(&self, point: Vector) -> bool {
        !self.is_empty() && self.boundary.intersects(point)
    }

    #[must_use]
    pub fn intersects_rotate_handle(&self, point: Vector) -> bool {
        !self.is_empty() && self.boundary.intersects_rotate_handle(point)
    }

    #[must_use]
    pub fn handle_under_cursor(&self, point: Vector) -> Option<Handle> {
        if self.is_empty() {
            return None;
        }
        self.boundary.handle_within(point, self.handle_threshold)
    }
}
