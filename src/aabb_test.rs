#![allow(clippy::float_cmp)]

use super::*;

#[test]
fn new_normalizes_negative_extents() {
    let b = Aabb::new(10.0, 10.0, -5.0, -20.0);
    assert_eq!(b, Aabb::new(5.0, -10.0, 5.0, 20.0));
}

#[test]
fn contains_is_inclusive() {
    let b = Aabb::new(0.0, 0.0, 10.0, 10.0);
    assert!(b.contains(Vector::new(5.0, 5.0)));
    assert!(b.contains(Vector::new(0.0, 0.0)));
    assert!(b.contains(Vector::new(10.0, 10.0)));
    assert!(!b.contains(Vector::new(11.0, 5.0)));
    assert!(!b.contains(Vector::new(5.0, -1.0)));
}

#[test]
fn intersects_overlapping_touching_and_disjoint() {
    let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
    assert!(a.intersects(&Aabb::new(5.0, 5.0, 10.0, 10.0)));
    assert!(a.intersects(&Aabb::new(10.0, 0.0, 5.0, 5.0)));
    assert!(a.intersects(&Aabb::new(-5.0, -5.0, 30.0, 30.0)));
    assert!(!a.intersects(&Aabb::new(20.0, 20.0, 10.0, 10.0)));
    assert!(!a.intersects(&Aabb::new(0.0, 11.0, 10.0, 10.0)));
}

#[test]
fn from_points_covers_every_point() {
    let b = Aabb::from_points([Vector::new(3.0, 9.0), Vector::new(-1.0, 2.0), Vector::new(7.0, 4.0)]);
    assert_eq!(b, Some(Aabb::new(-1.0, 2.0, 8.0, 7.0)));
    assert_eq!(Aabb::from_points(Vec::new()), None);
}

#[test]
fn union_and_expand() {
    let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
    let b = Aabb::new(20.0, -5.0, 5.0, 5.0);
    assert_eq!(a.union(&b), Aabb::new(0.0, -5.0, 25.0, 15.0));
    assert_eq!(a.expand(2.0), Aabb::new(-2.0, -2.0, 14.0, 14.0));
}

#[test]
fn quadrants_tile_the_parent() {
    let [ne, nw, se, sw] = Aabb::new(0.0, 0.0, 100.0, 50.0).quadrants();
    assert_eq!(ne, Aabb::new(50.0, 0.0, 50.0, 25.0));
    assert_eq!(nw, Aabb::new(0.0, 0.0, 50.0, 25.0));
    assert_eq!(se, Aabb::new(50.0, 25.0, 50.0, 25.0));
    assert_eq!(sw, Aabb::new(0.0, 25.0, 50.0, 25.0));
}
