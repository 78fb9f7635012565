#![allow(clippy::float_cmp)]

use super::*;
use crate::geometry::Frame;
use crate::shape::{Shape, ShapeKind};

// =============================================================
// Parsing
// =============================================================

#[test]
fn parses_every_event_kind() {
    let events = parse_script(
        r#"[
            {"event": "key", "key": "3"},
            {"event": "pointer_down", "x": 1, "y": 2, "shift": true},
            {"event": "pointer_move", "x": 3.5, "y": 4},
            {"event": "pointer_up", "x": 5, "y": 6}
        ]"#,
    )
    .unwrap();
    assert_eq!(
        events,
        vec![
            ScriptEvent::Key { key: "3".into() },
            ScriptEvent::PointerDown { x: 1.0, y: 2.0, shift: true },
            ScriptEvent::PointerMove { x: 3.5, y: 4.0 },
            ScriptEvent::PointerUp { x: 5.0, y: 6.0 },
        ]
    );
}

#[test]
fn shift_defaults_to_false() {
    let events = parse_script(r#"[{"event": "pointer_down", "x": 0, "y": 0}]"#).unwrap();
    assert_eq!(events, vec![ScriptEvent::PointerDown { x: 0.0, y: 0.0, shift: false }]);
}

#[test]
fn unknown_event_is_json_error() {
    let err = parse_script(r#"[{"event": "wheel", "dx": 1}]"#).unwrap_err();
    assert!(matches!(err, ReplayError::Json(_)));
}

#[test]
fn missing_file_is_io_error() {
    let err = load_script(Path::new("/nonexistent/sketchpad/script.json")).unwrap_err();
    assert!(matches!(err, ReplayError::Io(_)));
    assert!(err.to_string().starts_with("failed to read script"));
}

#[test]
fn loads_script_and_document_from_disk() {
    let dir = std::env::temp_dir().join(format!("sketchpad-replay-{}", uuid::Uuid::new_v4()));
    fs::create_dir_all(&dir).unwrap();

    let script_path = dir.join("script.json");
    fs::write(&script_path, r#"[{"event": "key", "key": "Escape"}]"#).unwrap();
    assert_eq!(load_script(&script_path).unwrap(), vec![ScriptEvent::Key { key: "Escape".into() }]);

    let shape = Shape::create(ShapeKind::Ellipse, 0.0, 0.0, 4.0, 4.0, serde_json::json!({}));
    let doc_path = dir.join("doc.json");
    fs::write(&doc_path, serde_json::to_string(&vec![shape.clone()]).unwrap()).unwrap();
    let doc = load_document(&doc_path).unwrap();
    assert_eq!(doc.ids(), &[shape.id]);

    fs::remove_dir_all(&dir).unwrap();
}

// =============================================================
// Replay
// =============================================================

#[test]
fn replay_draws_and_moves_a_rectangle() {
    let events = parse_script(
        r#"[
            {"event": "key", "key": "3"},
            {"event": "pointer_down", "x": 10, "y": 10},
            {"event": "pointer_move", "x": 60, "y": 40},
            {"event": "pointer_up", "x": 60, "y": 40},
            {"event": "key", "key": "1"},
            {"event": "pointer_down", "x": 35, "y": 25},
            {"event": "pointer_move", "x": 45, "y": 35},
            {"event": "pointer_up", "x": 45, "y": 35}
        ]"#,
    )
    .unwrap();

    let mut core = EngineCore::new();
    let actions = replay(&mut core, &events);
    assert!(actions.iter().any(|a| matches!(a, Action::ShapeCreated(_))));
    assert_eq!(core.doc.len(), 1);

    let id = core.doc.ids()[0];
    assert_eq!(core.selection(), &[id]);
    assert_eq!(core.shape(&id).and_then(Shape::frame).copied(), Some(Frame::new(20.0, 20.0, 50.0, 30.0)));
}

#[test]
fn replay_of_empty_script_does_nothing() {
    let mut core = EngineCore::new();
    assert!(replay(&mut core, &[]).is_empty());
    assert!(core.doc.is_empty());
}
