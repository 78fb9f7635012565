//! Shared numeric constants for the sketchpad crate.
//!
//! All distances are in world units.

// ── Handles ─────────────────────────────────────────────────────

/// Maximum distance from a corner or edge at which a resize handle is grabbed.
pub const HANDLE_THRESHOLD: f64 = 20.0;

/// Distance above the top edge of a bounding box to the rotate pivot.
pub const ROTATE_HANDLE_OFFSET: f64 = 40.0;

/// Grab radius around the rotate pivot.
pub const ROTATE_HANDLE_RADIUS: f64 = 20.0;

/// Inward margin a point must clear to count as inside a selection box
/// rather than on one of its handles.
pub const SELECTION_MARGIN: f64 = 12.0;

// ── Shape hit-testing ───────────────────────────────────────────

/// Half-width of the band around a rectangle's outline that counts as a hit.
pub const EDGE_BAND: f64 = 10.0;

/// Perpendicular distance from a segment that counts as a hit.
pub const SEGMENT_HIT_THRESHOLD: f64 = 16.0;

/// Grab radius around a segment's endpoints.
pub const ENDPOINT_THRESHOLD: f64 = 20.0;

/// Largest hit slop any shape applies beyond its geometry. Index nodes grow
/// their loose bounds by this much so point queries never miss a stroke hit.
pub const MAX_HIT_SLOP: f64 = 20.0;

// ── Spatial index ───────────────────────────────────────────────

/// Shapes a QuadTree node holds before it subdivides.
pub const QUADTREE_CAPACITY: usize = 4;

/// Depth past which QuadTree nodes stop subdividing and simply grow.
pub const QUADTREE_MAX_DEPTH: usize = 8;

/// Margin added around the document extent when sizing the index root.
pub const INDEX_PADDING: f64 = 100.0;
