//! Input model: tools, keyboard shortcuts, modifier keys, and the gesture
//! state machine.
//!
//! `Tool` and `Modifiers` capture the user's intent at the time of a pointer
//! event. `InputState` is the active gesture tracked between pointer-down and
//! pointer-up, carrying the context needed to apply each pointer move.

#[cfg(test)]
#[path = "tool_test.rs"]
mod tool_test;

use serde::{Deserialize, Serialize};

use crate::handle::Handle;
use crate::shape::{ShapeId, ShapeKind};
use crate::vector::Vector;

/// Which tool is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// Selection and transform tool (default).
    #[default]
    Pointer,
    /// Freehand drawing. Present in the shortcut table; creates nothing.
    Pencil,
    Rectangle,
    Ellipse,
    Segment,
    /// Deletes shapes whose outline passes under the pointer.
    Eraser,
}

impl Tool {
    /// Tools in shortcut order: key `1` selects the first entry.
    pub const ALL: [Tool; 6] = [Self::Pointer, Self::Pencil, Self::Rectangle, Self::Ellipse, Self::Segment, Self::Eraser];

    /// Look up the tool bound to a keyboard shortcut.
    ///
    /// Digits `1`-`6` select by position. Any other single digit falls back
    /// to the pointer tool. Anything that isn't exactly one ASCII digit
    /// returns `None`.
    #[must_use]
    pub fn from_shortcut(key: &str) -> Option<Self> {
        let mut chars = key.chars();
        let (Some(c), None) = (chars.next(), chars.next()) else {
            return None;
        };
        let digit = c.to_digit(10)?;
        let tool = Self::ALL
            .into_iter()
            .zip(1..)
            .find(|&(_, n)| n == digit)
            .map_or(Self::Pointer, |(tool, _)| tool);
        Some(tool)
    }

    /// Shape kind this tool draws, if it draws one.
    #[must_use]
    pub fn shape_kind(self) -> Option<ShapeKind> {
        match self {
            Self::Rectangle => Some(ShapeKind::Rectangle),
            Self::Ellipse => Some(ShapeKind::Ellipse),
            Self::Segment => Some(ShapeKind::Segment),
            Self::Pointer | Self::Pencil | Self::Eraser => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pointer => "pointer",
            Self::Pencil => "pencil",
            Self::Rectangle => "rectangle",
            Self::Ellipse => "ellipse",
            Self::Segment => "segment",
            Self::Eraser => "eraser",
        }
    }
}

/// Keyboard modifier keys held during a pointer event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    /// Shift key is held: additive selection.
    #[serde(default)]
    pub shift: bool,
}

/// A keyboard key as reported by the host (e.g. `"Delete"`, `"Escape"`, `"3"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

/// Gesture in progress between pointer-down and pointer-up.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InputState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// Sizing a freshly created shape from the pointer-down point.
    Drawing { id: ShapeId },
    /// Dragging the selection; per-target offsets live on the shapes.
    Moving,
    /// Dragging a selection handle.
    Resizing {
        handle: Handle,
        /// Pointer position when the gesture started.
        previous: Vector,
    },
    /// Dragging the rotate knob.
    Rotating {
        /// Selection center at gesture start.
        pivot: Vector,
        /// Angle of the pointer around `pivot` at gesture start.
        start_angle: f64,
    },
    /// Rubber-band selection.
    Marquee {
        origin: Vector,
        current: Vector,
        /// Shift was held: add to the selection instead of replacing it.
        additive: bool,
    },
    /// Eraser held down.
    Erasing,
}
