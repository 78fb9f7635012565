//! Shape model: the closed set of drawable variants and their geometry.
//!
//! A [`Shape`] is a tagged union over rectangles, ellipses and line segments.
//! Variant-specific math (two-endpoint segments vs. width/height frames)
//! dispatches on [`Geometry`]; everything else (rotation, style, drag offset)
//! is shared. Shapes are owned by a [`crate::document::Document`] and mutated
//! in place by the gizmo during gestures.
//!
//! Coordinates in `geometry` are in the shape's unrotated local frame. The
//! shape is drawn rotated by `angle` radians about its own center, so
//! world-space positions come from [`Shape::world_vertices`].

#[cfg(test)]
#[path = "shape_test.rs"]
mod shape_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::aabb::Aabb;
use crate::bounding_box::BoundingBox;
use crate::consts::{EDGE_BAND, SEGMENT_HIT_THRESHOLD};
use crate::geometry::{Frame, is_distance_close, project_point_on_segment, unrotate_about_midpoint};
use crate::handle::Handle;
use crate::vector::Vector;

/// Unique identifier for a shape.
pub type ShapeId = Uuid;

/// Error returned when parsing a shape kind tag.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ShapeError {
    #[error("unknown shape kind: {0}")]
    UnknownKind(String),
}

/// The type tag of a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Rectangle,
    Ellipse,
    Segment,
}

impl ShapeKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rectangle => "rectangle",
            Self::Ellipse => "ellipse",
            Self::Segment => "segment",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShapeKind {
    type Err = ShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rectangle" => Ok(Self::Rectangle),
            "ellipse" => Ok(Self::Ellipse),
            "segment" => Ok(Self::Segment),
            other => Err(ShapeError::UnknownKind(other.to_owned())),
        }
    }
}

/// A straight segment between two points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub start: Vector,
    pub end: Vector,
}

impl Line {
    #[must_use]
    pub fn center(&self) -> Vector {
        self.start.midpoint(self.end)
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        self.start.distance(self.end)
    }
}

/// Variant-specific geometry, in the shape's unrotated local frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Geometry {
    Rectangle(Frame),
    Ellipse(Frame),
    Segment(Line),
}

/// A drawable shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    /// Stable identifier, assigned at creation and never reused.
    pub id: ShapeId,
    pub geometry: Geometry,
    /// Rotation in radians about [`Shape::center`]. Zero means unrotated.
    #[serde(default)]
    pub angle: f64,
    /// Pointer-to-first-vertex displacement captured at drag start.
    #[serde(skip)]
    pub offset: Vector,
    /// Opaque style bag read by the renderer (stroke, fill, etc.).
    #[serde(default)]
    pub options: serde_json::Value,
}

impl Shape {
    /// Build a shape of `kind`.
    ///
    /// Rectangles and ellipses take their top-left corner and size. Segments
    /// start at `(x, y)` and end at `(x + width, y + height)`, so drawing by
    /// dragging feeds the same arguments to every kind.
    #[must_use]
    pub fn create(kind: ShapeKind, x: f64, y: f64, width: f64, height: f64, options: serde_json::Value) -> Self {
        let geometry = match kind {
            ShapeKind::Rectangle => Geometry::Rectangle(Frame::new(x, y, width, height)),
            ShapeKind::Ellipse => Geometry::Ellipse(Frame::new(x, y, width, height)),
            ShapeKind::Segment => Geometry::Segment(Line {
                start: Vector::new(x, y),
                end: Vector::new(x + width, y + height),
            }),
        };
        Self { id: Uuid::new_v4(), geometry, angle: 0.0, offset: Vector::zero(), options }
    }

    #[must_use]
    pub fn kind(&self) -> ShapeKind {
        match self.geometry {
            Geometry::Rectangle(_) => ShapeKind::Rectangle,
            Geometry::Ellipse(_) => ShapeKind::Ellipse,
            Geometry::Segment(_) => ShapeKind::Segment,
        }
    }

    /// The frame of a rectangle or ellipse.
    #[must_use]
    pub fn frame(&self) -> Option<&Frame> {
        match &self.geometry {
            Geometry::Rectangle(frame) | Geometry::Ellipse(frame) => Some(frame),
            Geometry::Segment(_) => None,
        }
    }

    /// The endpoints of a segment.
    #[must_use]
    pub fn line(&self) -> Option<&Line> {
        match &self.geometry {
            Geometry::Segment(line) => Some(line),
            Geometry::Rectangle(_) | Geometry::Ellipse(_) => None,
        }
    }

    #[must_use]
    pub fn is_rotated(&self) -> bool {
        self.angle != 0.0
    }

    #[must_use]
    pub fn center(&self) -> Vector {
        match &self.geometry {
            Geometry::Rectangle(frame) | Geometry::Ellipse(frame) => frame.center(),
            Geometry::Segment(line) => line.center(),
        }
    }

    /// Local, unrotated vertices: NW, SW, SE, NE for frames (an ellipse
    /// reports its enclosing rectangle) and start, end for segments.
    #[must_use]
    pub fn vertices(&self) -> Vec<Vector> {
        match &self.geometry {
            Geometry::Rectangle(frame) | Geometry::Ellipse(frame) => frame.corners().to_vec(),
            Geometry::Segment(line) => vec![line.start, line.end],
        }
    }

    /// Vertices rotated into world space about the shape's center.
    #[must_use]
    pub fn world_vertices(&self) -> Vec<Vector> {
        let center = self.center();
        self.vertices()
            .into_iter()
            .map(|v| v.rotate(center, self.angle))
            .collect()
    }

    /// World-space axis-aligned extent.
    #[must_use]
    pub fn extent(&self) -> Aabb {
        Aabb::from_points(self.world_vertices()).unwrap_or_default()
    }

    /// The shape's own oriented bounding box.
    #[must_use]
    pub fn bounding_box(&self) -> BoundingBox {
        match &self.geometry {
            Geometry::Rectangle(frame) | Geometry::Ellipse(frame) => BoundingBox::from_frame(frame, self.angle),
            Geometry::Segment(line) => BoundingBox::segment(line.start, line.end, self.angle),
        }
    }

    /// Map a world-space point into the shape's unrotated local frame.
    #[must_use]
    pub fn to_local(&self, point: Vector) -> Vector {
        point.rotate(self.center(), -self.angle)
    }

    // --- Mutation ---

    /// Place the shape so its first vertex (top-left, or segment start) sits
    /// at `position`. Callers subtract any drag offset beforehand.
    pub fn move_to(&mut self, position: Vector) {
        match &mut self.geometry {
            Geometry::Rectangle(frame) | Geometry::Ellipse(frame) => {
                frame.x = position.x;
                frame.y = position.y;
            }
            Geometry::Segment(line) => {
                let delta = position - line.start;
                line.start = line.start + delta;
                line.end = line.end + delta;
            }
        }
    }

    /// Translate the shape so its center lands on `center`.
    pub fn recenter(&mut self, center: Vector) {
        match &mut self.geometry {
            Geometry::Rectangle(frame) | Geometry::Ellipse(frame) => {
                frame.x = center.x - frame.width / 2.0;
                frame.y = center.y - frame.height / 2.0;
            }
            Geometry::Segment(line) => {
                let half = (line.end - line.start) / 2.0;
                line.start = center - half;
                line.end = center + half;
            }
        }
    }

    /// Set raw extents without normalizing: width and height for frames,
    /// the end point for segments.
    pub fn resize(&mut self, a: f64, b: f64) {
        match &mut self.geometry {
            Geometry::Rectangle(frame) | Geometry::Ellipse(frame) => {
                frame.width = a;
                frame.height = b;
            }
            Geometry::Segment(line) => {
                line.end = Vector::new(a, b);
            }
        }
    }

    /// Set the absolute rotation in radians.
    pub fn rotate(&mut self, angle: f64) {
        self.angle = angle;
    }

    /// Record the displacement from `pointer` to the first vertex so a drag
    /// keeps the grab point under the pointer.
    pub fn set_offset(&mut self, pointer: Vector) {
        let first = match &self.geometry {
            Geometry::Rectangle(frame) | Geometry::Ellipse(frame) => frame.origin(),
            Geometry::Segment(line) => line.start,
        };
        self.offset = pointer - first;
    }

    /// Reorder a frame so width and height are non-negative while covering
    /// the same absolute rectangle. Segments have nothing to reorder.
    pub fn normalize(&mut self) {
        match &mut self.geometry {
            Geometry::Rectangle(frame) | Geometry::Ellipse(frame) => *frame = frame.normalized(),
            Geometry::Segment(_) => {}
        }
    }

    /// Interactive single-shape resize from `handle`, keeping the opposite
    /// corner or edge fixed in the shape's rotated frame.
    ///
    /// Handles that do not belong to this kind (endpoints on a frame, corners
    /// on a segment) are ignored.
    pub fn adjust(&mut self, handle: Handle, pointer: Vector) {
        let angle = self.angle;
        match &mut self.geometry {
            Geometry::Rectangle(frame) | Geometry::Ellipse(frame) => {
                if handle.is_endpoint() {
                    tracing::debug!(?handle, "endpoint handle ignored for frame shape");
                    return;
                }
                adjust_frame(frame, angle, handle, pointer);
            }
            Geometry::Segment(line) => {
                let center = line.center();
                match handle {
                    Handle::Start => {
                        let fixed = line.end.rotate(center, angle);
                        let (end, start) = unrotate_about_midpoint(fixed, pointer, angle);
                        line.start = start;
                        line.end = end;
                    }
                    Handle::End => {
                        let fixed = line.start.rotate(center, angle);
                        let (start, end) = unrotate_about_midpoint(fixed, pointer, angle);
                        line.start = start;
                        line.end = end;
                    }
                    _ => tracing::debug!(?handle, "frame handle ignored for segment"),
                }
            }
        }
    }

    // --- Hit testing ---

    /// Stroke hit: rectangles match a band around their outline, ellipses
    /// their filled area, segments a band around the line.
    #[must_use]
    pub fn intersects(&self, point: Vector) -> bool {
        let p = self.to_local(point);
        match &self.geometry {
            Geometry::Rectangle(frame) => {
                let f = frame.normalized();
                let within_outer = p.x >= f.x - EDGE_BAND
                    && p.x <= f.x + f.width + EDGE_BAND
                    && p.y >= f.y - EDGE_BAND
                    && p.y <= f.y + f.height + EDGE_BAND;
                let within_inner = p.x > f.x + EDGE_BAND
                    && p.x < f.x + f.width - EDGE_BAND
                    && p.y > f.y + EDGE_BAND
                    && p.y < f.y + f.height - EDGE_BAND;
                within_outer && !within_inner
            }
            Geometry::Ellipse(frame) => {
                let f = frame.normalized();
                let c = f.center();
                let rx = f.width / 2.0;
                let ry = f.height / 2.0;
                let nx = (p.x - c.x) / rx;
                let ny = (p.y - c.y) / ry;
                nx * nx + ny * ny <= 1.0
            }
            Geometry::Segment(line) => {
                let projected = project_point_on_segment(p, line.start, line.end);
                is_distance_close(p, projected, SEGMENT_HIT_THRESHOLD)
            }
        }
    }

    /// Area containment: rectangles use their full interior, ellipses a
    /// coarse radius check, segments fall back to [`Shape::intersects`].
    #[must_use]
    pub fn contains(&self, point: Vector) -> bool {
        match &self.geometry {
            Geometry::Rectangle(frame) => {
                let p = self.to_local(point);
                let f = frame.normalized();
                p.x >= f.x && p.x <= f.x + f.width && p.y >= f.y && p.y <= f.y + f.height
            }
            Geometry::Ellipse(frame) => {
                let f = frame.normalized();
                let d = point - f.center();
                let r = f.width / 2.0 + f.height / 2.0;
                d.x * d.x + d.y * d.y <= r * r
            }
            Geometry::Segment(_) => self.intersects(point),
        }
    }

    /// Whether a pointer at `point` picks this shape: rectangles count as
    /// filled, other kinds use their stroke hit.
    #[must_use]
    pub fn hit(&self, point: Vector) -> bool {
        match self.geometry {
            Geometry::Rectangle(_) => self.intersects(point) || self.contains(point),
            Geometry::Ellipse(_) | Geometry::Segment(_) => self.intersects(point),
        }
    }

    // --- Style ---

    /// Typed read access to the style options.
    #[must_use]
    pub fn style(&self) -> Style<'_> {
        Style::new(&self.options)
    }

    /// Merge `patch` into the style options; `null` values delete keys.
    /// Returns false if `patch` is not a JSON object.
    pub fn customize(&mut self, patch: &serde_json::Value) -> bool {
        let Some(incoming) = patch.as_object() else {
            return false;
        };
        if !self.options.is_object() {
            self.options = serde_json::json!({});
        }
        if let Some(existing) = self.options.as_object_mut() {
            for (k, v) in incoming {
                if v.is_null() {
                    existing.remove(k);
                } else {
                    existing.insert(k.clone(), v.clone());
                }
            }
        }
        true
    }
}

/// Resize `frame` from `handle` toward the world-space `pointer`.
///
/// The fixed corner sits opposite the handle; the moving corner is the
/// pointer for corner handles, or the far corner of the dragged edge with
/// the pointer's local coordinate along the handle axis for edge handles.
/// Width and height keep their sign so the same handle stays attached to
/// the same edge for the rest of the gesture, even past the fixed corner.
fn adjust_frame(frame: &mut Frame, angle: f64, handle: Handle, pointer: Vector) {
    let center = frame.center();
    let local = pointer.rotate(center, -angle);

    let right = frame.x + frame.width;
    let bottom = frame.y + frame.height;

    let fixed = Vector::new(
        if handle.west() { right } else { frame.x },
        if handle.north() { bottom } else { frame.y },
    );
    let moving_world = if handle.is_corner() {
        pointer
    } else {
        let moving = Vector::new(
            if handle.west() || handle.east() { local.x } else { right },
            if handle.north() || handle.south() { local.y } else { bottom },
        );
        moving.rotate(center, angle)
    };

    let (a, b) = unrotate_about_midpoint(fixed.rotate(center, angle), moving_world, angle);

    if handle.west() {
        frame.x = b.x;
        frame.width = a.x - b.x;
    } else {
        frame.x = a.x;
        frame.width = b.x - a.x;
    }
    if handle.north() {
        frame.y = b.y;
        frame.height = a.y - b.y;
    } else {
        frame.y = a.y;
        frame.height = b.y - a.y;
    }
}

/// Typed access to common style fields of a shape's `options` JSON value.
pub struct Style<'a> {
    value: &'a serde_json::Value,
}

impl<'a> Style<'a> {
    #[must_use]
    pub fn new(value: &'a serde_json::Value) -> Self {
        Self { value }
    }

    /// Stroke color as a CSS color string. Defaults to `"#1F1A17"` when absent.
    #[must_use]
    pub fn stroke(&self) -> &str {
        self.value
            .get("stroke")
            .and_then(|v| v.as_str())
            .unwrap_or("#1F1A17")
    }

    /// Fill color, if any.
    #[must_use]
    pub fn fill(&self) -> Option<&str> {
        self.value.get("fill").and_then(|v| v.as_str())
    }

    /// Stroke width in world units. Defaults to `1.0` when absent.
    #[must_use]
    pub fn stroke_width(&self) -> f64 {
        self.value
            .get("strokeWidth")
            .and_then(serde_json::Value::as_f64)
            .unwrap_or(1.0)
    }

    /// Hand-drawn roughness. Defaults to `1.0` when absent.
    #[must_use]
    pub fn roughness(&self) -> f64 {
        self.value
            .get("roughness")
            .and_then(serde_json::Value::as_f64)
            .unwrap_or(1.0)
    }
}
