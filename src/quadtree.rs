//! Region quadtree over shape snapshots.
//!
//! The tree is a flat arena of nodes indexed by `usize`; a node either is a
//! leaf or owns exactly four children in NE, NW, SE, SW order. A shape is
//! stored once, in the first node along its insertion path that has room.
//!
//! Shapes are placed by their vertices but can be hit outside their node's
//! region (a rectangle straddling a quadrant line, a segment's pick band).
//! Each node therefore also tracks a loose extent covering every shape in
//! its subtree plus the maximum pick slop, and queries prune on that.
//!
//! The tree owns a copy of each shape together with its world vertices, so
//! it can live next to the document it indexes. It goes stale when shapes
//! move; rebuild it after every geometry change.

#[cfg(test)]
#[path = "quadtree_test.rs"]
mod quadtree_test;

use crate::aabb::Aabb;
use crate::consts::{MAX_HIT_SLOP, QUADTREE_MAX_DEPTH};
use crate::shape::Shape;
use crate::vector::Vector;

/// A stored shape with its world vertices cached for range queries.
struct Entry {
    shape: Shape,
    vertices: Vec<Vector>,
}

struct Node {
    boundary: Aabb,
    loose: Option<Aabb>,
    entries: Vec<usize>,
    children: Option<[usize; 4]>,
    depth: usize,
}

impl Node {
    fn new(boundary: Aabb, depth: usize) -> Self {
        Self { boundary, loose: None, entries: Vec::new(), children: None, depth }
    }

    fn accepts(&self, vertices: &[Vector]) -> bool {
        vertices.iter().any(|v| self.boundary.contains(*v))
    }

    fn grow_loose(&mut self, reach: Aabb) {
        self.loose = Some(match self.loose {
            Some(loose) => loose.union(&reach),
            None => reach,
        });
    }
}

/// Shape counts and tree shape, for diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuadTreeStats {
    pub total_shapes: usize,
    pub node_count: usize,
    pub leaf_count: usize,
    pub max_depth: usize,
}

pub struct QuadTree {
    nodes: Vec<Node>,
    entries: Vec<Entry>,
    capacity: usize,
    max_depth: usize,
}

impl QuadTree {
    /// Empty tree over `boundary` that splits nodes holding `capacity`
    /// shapes, down to the default maximum depth.
    #[must_use]
    pub fn new(boundary: Aabb, capacity: usize) -> Self {
        Self::with_max_depth(boundary, capacity, QUADTREE_MAX_DEPTH)
    }

    /// Like [`QuadTree::new`], but nodes at `max_depth` never split; further
    /// inserts stay in the leaf.
    #[must_use]
    pub fn with_max_depth(boundary: Aabb, capacity: usize, max_depth: usize) -> Self {
        Self {
            nodes: vec![Node::new(boundary, 0)],
            entries: Vec::new(),
            capacity: capacity.max(1),
            max_depth,
        }
    }

    #[must_use]
    pub fn boundary(&self) -> Aabb {
        self.nodes[0].boundary
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert `shape` if at least one of its world vertices lies inside the
    /// root boundary. Returns whether it was stored.
    pub fn insert(&mut self, shape: Shape) -> bool {
        let vertices = shape.world_vertices();
        let reach = shape.extent().expand(MAX_HIT_SLOP);
        let entry = self.entries.len();
        if self.insert_at(0, entry, &vertices, reach) {
            self.entries.push(Entry { shape, vertices });
            true
        } else {
            tracing::debug!(shape_id = %shape.id, "shape outside quadtree boundary");
            false
        }
    }

    fn insert_at(&mut self, index: usize, entry: usize, vertices: &[Vector], reach: Aabb) -> bool {
        if !self.nodes[index].accepts(vertices) {
            return false;
        }
        self.nodes[index].grow_loose(reach);

        let children = match self.nodes[index].children {
            Some(children) => children,
            None => {
                let node = &self.nodes[index];
                if node.entries.len() < self.capacity || node.depth >= self.max_depth {
                    self.nodes[index].entries.push(entry);
                    return true;
                }
                self.subdivide(index)
            }
        };

        for child in children {
            if self.insert_at(child, entry, vertices, reach) {
                return true;
            }
        }

        // The quadrants tile the parent, so a child always accepts; keep the
        // shape here if rounding at the split line says otherwise.
        self.nodes[index].entries.push(entry);
        true
    }

    fn subdivide(&mut self, index: usize) -> [usize; 4] {
        let depth = self.nodes[index].depth + 1;
        let quadrants = self.nodes[index].boundary.quadrants();
        let first = self.nodes.len();
        self.nodes.extend(quadrants.into_iter().map(|q| Node::new(q, depth)));
        let children = [first, first + 1, first + 2, first + 3];
        self.nodes[index].children = Some(children);
        children
    }

    /// Every shape the pointer at `point` picks, in no particular order.
    #[must_use]
    pub fn query_point(&self, point: Vector) -> Vec<&Shape> {
        let mut found = Vec::new();
        self.walk(
            |loose| loose.contains(point),
            |entry| entry.shape.hit(point),
            |entry| {
                found.push(&entry.shape);
                false
            },
        );
        found
    }

    /// Whether the pointer at `point` picks any shape. Stops at the first hit.
    #[must_use]
    pub fn any_at(&self, point: Vector) -> bool {
        let mut hit = false;
        self.walk(
            |loose| loose.contains(point),
            |entry| entry.shape.hit(point),
            |_| {
                hit = true;
                true
            },
        );
        hit
    }

    /// Every shape whose world vertices all lie inside `range`.
    #[must_use]
    pub fn query_range(&self, range: &Aabb) -> Vec<&Shape> {
        let mut found = Vec::new();
        self.walk(
            |loose| loose.intersects(range),
            |entry| range.contains_all(&entry.vertices),
            |entry| {
                found.push(&entry.shape);
                false
            },
        );
        found
    }

    /// Depth-first walk over nodes whose loose extent passes `visit`,
    /// handing each matching entry to `found`. Stops once `found` returns
    /// true.
    fn walk<'t, V, M, F>(&'t self, visit: V, matches: M, mut found: F)
    where
        V: Fn(&Aabb) -> bool,
        M: Fn(&Entry) -> bool,
        F: FnMut(&'t Entry) -> bool,
    {
        let mut stack = vec![0];
        while let Some(index) = stack.pop() {
            let node = &self.nodes[index];
            let Some(loose) = node.loose else {
                continue;
            };
            if !visit(&loose) {
                continue;
            }
            for entry in node.entries.iter().map(|&i| &self.entries[i]) {
                if matches(entry) && found(entry) {
                    return;
                }
            }
            if let Some(children) = node.children {
                stack.extend(children);
            }
        }
    }

    #[must_use]
    pub fn stats(&self) -> QuadTreeStats {
        QuadTreeStats {
            total_shapes: self.entries.len(),
            node_count: self.nodes.len(),
            leaf_count: self.nodes.iter().filter(|n| n.children.is_none()).count(),
            max_depth: self.nodes.iter().map(|n| n.depth).max().unwrap_or(0),
        }
    }
}
