//! Scripted pointer sessions.
//!
//! A script is a JSON array of input events fed through [`EngineCore`] in
//! order, e.g. `[{"event": "key", "key": "3"}, {"event": "pointer_down",
//! "x": 10, "y": 10}]`. Used by the `sketchpad` binary and by tests.

#[cfg(test)]
#[path = "replay_test.rs"]
mod replay_test;

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::engine::{Action, EngineCore};
use crate::tool::{Key, Modifiers};
use crate::vector::Vector;

#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    #[error("failed to read script: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid script JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// One recorded input event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ScriptEvent {
    PointerDown {
        x: f64,
        y: f64,
        #[serde(default)]
        shift: bool,
    },
    PointerMove {
        x: f64,
        y: f64,
    },
    PointerUp {
        x: f64,
        y: f64,
    },
    Key {
        key: String,
    },
}

/// Read a script file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a JSON event array.
pub fn load_script(path: &Path) -> Result<Vec<ScriptEvent>, ReplayError> {
    let raw = fs::read_to_string(path)?;
    parse_script(&raw)
}

/// Parse a script from JSON text.
///
/// # Errors
///
/// Returns an error if `raw` is not a JSON array of events.
pub fn parse_script(raw: &str) -> Result<Vec<ScriptEvent>, ReplayError> {
    Ok(serde_json::from_str(raw)?)
}

/// Read a document snapshot: a JSON array of shapes in draw order.
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not hold shapes.
pub fn load_document(path: &Path) -> Result<Document, ReplayError> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Feed `events` through `core` and return every emitted action.
pub fn replay(core: &mut EngineCore, events: &[ScriptEvent]) -> Vec<Action> {
    let mut actions = Vec::new();
    for event in events {
        let emitted = match event {
            ScriptEvent::PointerDown { x, y, shift } => {
                core.pointer_down(Vector::new(*x, *y), Modifiers { shift: *shift })
            }
            ScriptEvent::PointerMove { x, y } => core.pointer_move(Vector::new(*x, *y)),
            ScriptEvent::PointerUp { x, y } => core.pointer_up(Vector::new(*x, *y)),
            ScriptEvent::Key { key } => core.key_down(&Key(key.clone())),
        };
        actions.extend(emitted);
    }
    tracing::debug!(events = events.len(), actions = actions.len(), "script replayed");
    actions
}
