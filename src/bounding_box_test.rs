#![allow(clippy::float_cmp)]

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use serde_json::json;

use super::*;
use crate::shape::ShapeKind;

fn rect(x: f64, y: f64, w: f64, h: f64) -> Shape {
    Shape::create(ShapeKind::Rectangle, x, y, w, h, json!({}))
}

fn square_box() -> BoundingBox {
    BoundingBox::new(0.0, 0.0, 100.0, 100.0, 0.0)
}

// =============================================================
// Construction
// =============================================================

#[test]
fn new_normalizes_extents() {
    let b = BoundingBox::new(10.0, 10.0, -10.0, -5.0, 0.3);
    assert_eq!((b.x, b.y, b.width, b.height, b.angle), (0.0, 5.0, 10.0, 5.0, 0.3));
    assert!(!b.is_segment());
}

#[test]
fn segment_box_keeps_endpoints() {
    let b = BoundingBox::segment(Vector::new(10.0, 0.0), Vector::new(0.0, 20.0), 0.0);
    assert_eq!((b.x, b.y, b.width, b.height), (0.0, 0.0, 10.0, 20.0));
    assert_eq!(b.endpoints, Some([Vector::new(10.0, 0.0), Vector::new(0.0, 20.0)]));
    assert_eq!(b.center(), Vector::new(5.0, 10.0));
}

#[test]
fn enclosing_empty_is_zero_box() {
    assert_eq!(BoundingBox::enclosing(&[]), BoundingBox::default());
}

#[test]
fn enclosing_group_covers_every_member() {
    let shapes = [
        rect(0.0, 0.0, 10.0, 10.0),
        rect(50.0, 0.0, 13.0, 20.0),
        rect(0.0, 80.0, 5.0, 15.0),
        rect(20.0, 30.0, 10.0, 10.0),
    ];
    let refs: Vec<&Shape> = shapes.iter().collect();
    let b = BoundingBox::enclosing(&refs);
    assert_eq!((b.x, b.y, b.width, b.height, b.angle), (0.0, 0.0, 63.0, 95.0, 0.0));
}

#[test]
fn enclosing_single_uses_local_vertices() {
    let mut r = rect(0.0, 0.0, 10.0, 10.0);
    r.rotate(1.0);
    let b = BoundingBox::enclosing(&[&r]);
    assert_eq!((b.x, b.y, b.width, b.height, b.angle), (0.0, 0.0, 10.0, 10.0, 0.0));
}

#[test]
fn enclosing_group_uses_world_vertices() {
    let mut a = rect(0.0, 0.0, 10.0, 10.0);
    a.rotate(FRAC_PI_4);
    let b = rect(100.0, 100.0, 1.0, 1.0);
    let bb = BoundingBox::enclosing(&[&a, &b]);
    let half_diagonal = 50.0_f64.sqrt();
    assert!((bb.x - (5.0 - half_diagonal)).abs() < 1e-9);
    assert!((bb.y - (5.0 - half_diagonal)).abs() < 1e-9);
    assert!((bb.x + bb.width - 101.0).abs() < 1e-9);
}

// =============================================================
// Body hit tests
// =============================================================

#[test]
fn contains_leaves_margin_for_handles() {
    let b = square_box();
    assert!(b.contains(Vector::new(50.0, 50.0)));
    assert!(b.contains(Vector::new(12.0, 50.0)));
    assert!(!b.contains(Vector::new(5.0, 50.0)));
    assert!(!b.contains(Vector::new(150.0, 50.0)));
}

#[test]
fn contains_respects_rotation() {
    let b = BoundingBox::new(0.0, 0.0, 100.0, 40.0, FRAC_PI_2);
    // After a quarter turn about (50, 20) the box stands upright.
    assert!(b.contains(Vector::new(50.0, -10.0)));
    assert!(!b.contains(Vector::new(10.0, 20.0)));
}

#[test]
fn intersects_includes_handle_ring() {
    let b = square_box();
    assert!(b.intersects(Vector::new(-20.0, 50.0)));
    assert!(b.intersects(Vector::new(50.0, 124.0)));
    assert!(!b.intersects(Vector::new(-30.0, 50.0)));
}

#[test]
fn segment_body_excludes_endpoints() {
    let b = BoundingBox::segment(Vector::new(0.0, 0.0), Vector::new(100.0, 0.0), 0.0);
    assert!(b.contains(Vector::new(50.0, 5.0)));
    assert!(!b.contains(Vector::new(5.0, 0.0)));
    assert!(!b.contains(Vector::new(50.0, 40.0)));
}

// =============================================================
// Handles
// =============================================================

#[test]
fn handles_at_corners_and_edges() {
    let b = square_box();
    assert_eq!(b.handle_under_cursor(Vector::new(0.0, 0.0)), Some(Handle::Nw));
    assert_eq!(b.handle_under_cursor(Vector::new(2.0, 98.0)), Some(Handle::Sw));
    assert_eq!(b.handle_under_cursor(Vector::new(100.0, 100.0)), Some(Handle::Se));
    assert_eq!(b.handle_under_cursor(Vector::new(100.0, 0.0)), Some(Handle::Ne));
    assert_eq!(b.handle_under_cursor(Vector::new(50.0, 0.0)), Some(Handle::N));
    assert_eq!(b.handle_under_cursor(Vector::new(50.0, 100.0)), Some(Handle::S));
    assert_eq!(b.handle_under_cursor(Vector::new(0.0, 50.0)), Some(Handle::W));
    assert_eq!(b.handle_under_cursor(Vector::new(100.0, 50.0)), Some(Handle::E));
    assert_eq!(b.handle_under_cursor(Vector::new(50.0, 50.0)), None);
}

#[test]
fn corner_wins_over_adjacent_edge() {
    let b = square_box();
    assert_eq!(b.handle_under_cursor(Vector::new(15.0, 0.0)), Some(Handle::Nw));
    assert_eq!(b.handle_under_cursor(Vector::new(25.0, 0.0)), Some(Handle::N));
}

#[test]
fn handle_within_honors_threshold() {
    let b = square_box();
    assert_eq!(b.handle_within(Vector::new(50.0, -5.0), 4.0), None);
    assert_eq!(b.handle_within(Vector::new(50.0, -5.0), 6.0), Some(Handle::N));
}

#[test]
fn handles_follow_rotation() {
    let b = BoundingBox::new(0.0, 0.0, 100.0, 50.0, FRAC_PI_2);
    let [_, _, se, ne] = b.world_vertices();
    assert_eq!(b.handle_under_cursor(se), Some(Handle::Se));
    assert_eq!(b.handle_under_cursor(ne), Some(Handle::Ne));
}

#[test]
fn segment_handles_are_endpoints() {
    let b = BoundingBox::segment(Vector::new(0.0, 0.0), Vector::new(100.0, 0.0), 0.0);
    assert_eq!(b.handle_under_cursor(Vector::new(1.0, 1.0)), Some(Handle::Start));
    assert_eq!(b.handle_under_cursor(Vector::new(99.0, 0.0)), Some(Handle::End));
    assert_eq!(b.handle_under_cursor(Vector::new(50.0, 0.0)), None);
}

// =============================================================
// Rotate handle
// =============================================================

#[test]
fn rotate_handle_sits_above_north_edge() {
    let b = BoundingBox::new(0.0, 0.0, 100.0, 50.0, 0.0);
    assert_eq!(b.rotate_handle(), Vector::new(50.0, -40.0));
    assert!(b.intersects_rotate_handle(Vector::new(50.0, -30.0)));
    assert!(b.intersects_rotate_handle(Vector::new(65.0, -40.0)));
    assert!(!b.intersects_rotate_handle(Vector::new(50.0, -70.0)));
}

#[test]
fn rotate_handle_turns_with_box() {
    let b = BoundingBox::new(0.0, 0.0, 100.0, 50.0, PI);
    let knob = b.rotate_handle();
    assert!(knob.distance(Vector::new(50.0, 90.0)) < 1e-9);
    assert!(b.intersects_rotate_handle(Vector::new(50.0, 90.0)));
    assert!(!b.intersects_rotate_handle(Vector::new(50.0, -40.0)));
}
