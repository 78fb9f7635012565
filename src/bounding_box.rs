//! Oriented bounding boxes for selection chrome.
//!
//! A [`BoundingBox`] is a rectangle plus a rotation about its own center.
//! It answers the questions the selection UI asks: is the pointer on the
//! body, on a resize handle, or on the rotate knob. A box built from a
//! segment also remembers the two endpoints and exposes `Start`/`End`
//! handles instead of the eight compass handles.

#[cfg(test)]
#[path = "bounding_box_test.rs"]
mod bounding_box_test;

use serde::{Deserialize, Serialize};

use crate::consts::{ENDPOINT_THRESHOLD, HANDLE_THRESHOLD, ROTATE_HANDLE_OFFSET, ROTATE_HANDLE_RADIUS, SELECTION_MARGIN};
use crate::geometry::{Frame, is_distance_close, project_point_on_segment};
use crate::handle::Handle;
use crate::shape::Shape;
use crate::vector::Vector;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Rotation in radians about the box center.
    pub angle: f64,
    /// Local endpoints when the box wraps a segment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoints: Option<[Vector; 2]>,
}

impl BoundingBox {
    /// Box with normalized (non-negative) extents.
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64, angle: f64) -> Self {
        let f = Frame::new(x, y, width, height).normalized();
        Self { x: f.x, y: f.y, width: f.width, height: f.height, angle, endpoints: None }
    }

    #[must_use]
    pub fn from_frame(frame: &Frame, angle: f64) -> Self {
        Self::new(frame.x, frame.y, frame.width, frame.height, angle)
    }

    /// Box spanning a segment's endpoints, given in the segment's local frame.
    #[must_use]
    pub fn segment(start: Vector, end: Vector, angle: f64) -> Self {
        let mut b = Self::new(start.x, start.y, end.x - start.x, end.y - start.y, angle);
        b.endpoints = Some([start, end]);
        b
    }

    /// Axis-aligned box around a set of shapes.
    ///
    /// A single shape contributes its unrotated vertices (its own box carries
    /// the rotation). Several shapes contribute world-space vertices so the
    /// group box covers every member as drawn. No shapes yields a zero box.
    #[must_use]
    pub fn enclosing(shapes: &[&Shape]) -> Self {
        let points: Vec<Vector> = if shapes.len() > 1 {
            shapes.iter().flat_map(|s| s.world_vertices()).collect()
        } else {
            shapes.iter().flat_map(|s| s.vertices()).collect()
        };
        let (Some(min), Some(max)) = (Vector::min_of(points.iter().copied()), Vector::max_of(points)) else {
            return Self::default();
        };
        Self::new(min.x, min.y, max.x - min.x, max.y - min.y, 0.0)
    }

    #[must_use]
    pub fn frame(&self) -> Frame {
        Frame::new(self.x, self.y, self.width, self.height)
    }

    #[must_use]
    pub fn center(&self) -> Vector {
        self.frame().center()
    }

    #[must_use]
    pub fn is_rotated(&self) -> bool {
        self.angle != 0.0
    }

    #[must_use]
    pub fn is_segment(&self) -> bool {
        self.endpoints.is_some()
    }

    /// Local corners in NW, SW, SE, NE order.
    #[must_use]
    pub fn vertices(&self) -> [Vector; 4] {
        self.frame().corners()
    }

    #[must_use]
    pub fn world_vertices(&self) -> [Vector; 4] {
        let c = self.center();
        self.vertices().map(|v| v.rotate(c, self.angle))
    }

    #[must_use]
    pub fn to_local(&self, point: Vector) -> Vector {
        point.rotate(self.center(), -self.angle)
    }

    /// Pointer is on the box body.
    ///
    /// Frame boxes shrink by the selection margin so the border stays free
    /// for handles. Segment boxes match near the line but away from either
    /// endpoint.
    #[must_use]
    pub fn contains(&self, point: Vector) -> bool {
        let p = self.to_local(point);
        if let Some([start, end]) = self.endpoints {
            if is_distance_close(p, start, ENDPOINT_THRESHOLD) || is_distance_close(p, end, ENDPOINT_THRESHOLD) {
                return false;
            }
            let projected = project_point_on_segment(p, start, end);
            return is_distance_close(p, projected, ENDPOINT_THRESHOLD);
        }
        p.x >= self.x + SELECTION_MARGIN
            && p.x <= self.x + self.width - SELECTION_MARGIN
            && p.y >= self.y + SELECTION_MARGIN
            && p.y <= self.y + self.height - SELECTION_MARGIN
    }

    /// Pointer is anywhere near the box, including the handle ring.
    #[must_use]
    pub fn intersects(&self, point: Vector) -> bool {
        let p = self.to_local(point);
        let grow = SELECTION_MARGIN * 2.0;
        p.x >= self.x - grow
            && p.x <= self.x + self.width + grow
            && p.y >= self.y - grow
            && p.y <= self.y + self.height + grow
    }

    /// Handle under `point` at the default pick radius.
    #[must_use]
    pub fn handle_under_cursor(&self, point: Vector) -> Option<Handle> {
        self.handle_within(point, HANDLE_THRESHOLD)
    }

    /// Handle within `threshold` of `point`. Corners win over edges; edges
    /// match anywhere along their span.
    #[must_use]
    pub fn handle_within(&self, point: Vector, threshold: f64) -> Option<Handle> {
        let p = self.to_local(point);

        if let Some([start, end]) = self.endpoints {
            if is_distance_close(p, start, threshold) {
                return Some(Handle::Start);
            }
            if is_distance_close(p, end, threshold) {
                return Some(Handle::End);
            }
            return None;
        }

        let corners = self.vertices();
        for (handle, corner) in Handle::CORNERS.into_iter().zip(corners) {
            if is_distance_close(p, corner, threshold) {
                return Some(handle);
            }
        }

        let [nw, sw, se, ne] = corners;
        Handle::EDGES.into_iter().find(|&handle| {
            let (a, b) = match handle {
                Handle::N => (nw, ne),
                Handle::S => (sw, se),
                Handle::W => (nw, sw),
                _ => (ne, se),
            };
            is_distance_close(p, project_point_on_segment(p, a, b), threshold)
        })
    }

    /// Rotate knob position in local space, centered above the north edge.
    #[must_use]
    pub fn rotate_handle_local(&self) -> Vector {
        Vector::new(self.x + self.width / 2.0, self.y - ROTATE_HANDLE_OFFSET)
    }

    /// Rotate knob position in world space.
    #[must_use]
    pub fn rotate_handle(&self) -> Vector {
        self.rotate_handle_local().rotate(self.center(), self.angle)
    }

    #[must_use]
    pub fn intersects_rotate_handle(&self, point: Vector) -> bool {
        is_distance_close(self.to_local(point), self.rotate_handle_local(), ROTATE_HANDLE_RADIUS)
    }
}
