//! Handle, hit-part and cursor vocabulary shared by bounding boxes, the
//! gizmo and the engine.

#[cfg(test)]
#[path = "handle_test.rs"]
mod handle_test;

use serde::{Deserialize, Serialize};

use crate::shape::ShapeId;

/// A grab point on a bounding box.
///
/// Frame boxes expose the eight directional handles; segment boxes expose
/// only `Start` and `End`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Handle {
    N,
    Ne,
    E,
    Se,
    S,
    Sw,
    W,
    Nw,
    Start,
    End,
}

impl Handle {
    /// Corner handles in the same order as bounding box vertices (NW, SW, SE, NE).
    pub const CORNERS: [Handle; 4] = [Self::Nw, Self::Sw, Self::Se, Self::Ne];

    /// Edge handles in hit-test order.
    pub const EDGES: [Handle; 4] = [Self::N, Self::S, Self::W, Self::E];

    #[must_use]
    pub fn is_corner(self) -> bool {
        matches!(self, Self::Ne | Self::Se | Self::Sw | Self::Nw)
    }

    #[must_use]
    pub fn is_edge(self) -> bool {
        matches!(self, Self::N | Self::E | Self::S | Self::W)
    }

    #[must_use]
    pub fn is_endpoint(self) -> bool {
        matches!(self, Self::Start | Self::End)
    }

    /// Handle drags the west edge.
    #[must_use]
    pub fn west(self) -> bool {
        matches!(self, Self::W | Self::Nw | Self::Sw)
    }

    /// Handle drags the east edge.
    #[must_use]
    pub fn east(self) -> bool {
        matches!(self, Self::E | Self::Ne | Self::Se)
    }

    /// Handle drags the north edge.
    #[must_use]
    pub fn north(self) -> bool {
        matches!(self, Self::N | Self::Ne | Self::Nw)
    }

    /// Handle drags the south edge.
    #[must_use]
    pub fn south(self) -> bool {
        matches!(self, Self::S | Self::Se | Self::Sw)
    }

    /// Pointer cursor a host should show while hovering this handle.
    #[must_use]
    pub fn cursor(self) -> Cursor {
        match self {
            Self::E | Self::W => Cursor::EwResize,
            Self::N | Self::S => Cursor::NsResize,
            Self::Ne | Self::Sw => Cursor::NeswResize,
            Self::Nw | Self::Se => Cursor::NwseResize,
            Self::Start | Self::End => Cursor::Crosshair,
        }
    }
}

/// Pointer cursor styles requested from the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Cursor {
    #[default]
    Default,
    Crosshair,
    Move,
    EwResize,
    NsResize,
    NeswResize,
    NwseResize,
    Grab,
}

impl Cursor {
    /// CSS `cursor` keyword.
    #[must_use]
    pub fn as_css(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Crosshair => "crosshair",
            Self::Move => "move",
            Self::EwResize => "ew-resize",
            Self::NsResize => "ns-resize",
            Self::NeswResize => "nesw-resize",
            Self::NwseResize => "nwse-resize",
            Self::Grab => "grab",
        }
    }
}

/// Which part of a shape or selection was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    Body,
    Handle(Handle),
    RotateHandle,
}

impl HitPart {
    #[must_use]
    pub fn cursor(self) -> Cursor {
        match self {
            Self::Body => Cursor::Move,
            Self::Handle(handle) => handle.cursor(),
            Self::RotateHandle => Cursor::Grab,
        }
    }
}

/// Result of a hit test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub shape_id: ShapeId,
    pub part: HitPart,
}
