//! Geometry and interaction engine for the sketchpad drawing surface.
//!
//! The crate owns everything between a raw pointer coordinate and a mutated
//! shape: the shape model itself, oriented bounding boxes with handle
//! hit-testing, a QuadTree spatial index, and the selection controller
//! ("gizmo") that moves, resizes and rotates one or many shapes at once.
//! Rendering, UI chrome and persistence live in the host; they read shapes
//! out of the [`document::Document`] and feed pointer events into
//! [`engine::EngineCore`].
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`vector`] | 2D point / displacement value type |
//! | [`geometry`] | Projection, distance and anchor-scaling math |
//! | [`shape`] | Rectangle / ellipse / segment shapes and the shape factory |
//! | [`aabb`] | Axis-aligned rectangles for index regions and marquee ranges |
//! | [`bounding_box`] | Oriented bounding boxes and handle hit-testing |
//! | [`handle`] | Handle, hit-part and cursor vocabulary |
//! | [`quadtree`] | Spatial index over shape snapshots |
//! | [`gizmo`] | Selection controller: move / resize / rotate |
//! | [`document`] | Ordered in-memory shape store |
//! | [`tool`] | Tools, shortcut keys and the gesture state machine |
//! | [`engine`] | Pointer/key driven [`engine::EngineCore`] |
//! | [`config`] | Env-driven engine tunables |
//! | [`replay`] | Scripted pointer sessions for the CLI |
//! | [`consts`] | Shared numeric constants (thresholds, offsets) |

pub mod aabb;
pub mod bounding_box;
pub mod config;
pub mod consts;
pub mod document;
pub mod engine;
pub mod geometry;
pub mod gizmo;
pub mod handle;
pub mod quadtree;
pub mod replay;
pub mod shape;
pub mod tool;
pub mod vector;
