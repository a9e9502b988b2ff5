//! Integration tests for the AgentCommand JSON protocol.
//!
//! Tests the full command pipeline: JSON string -> parse -> execute -> response.

use extrucut_lib::command::{execute_json, execute_json_batch};
use extrucut_lib::harness::TestHarness;

const QUAD: &str = r#"{"command": "load_mesh", "mesh": {
    "positions": [[0,0,0],[1,0,0],[1,1,0],[0,1,0]],
    "faces": [[0,1,2,3]],
    "selected_faces": [0]
}}"#;

#[test]
fn test_command_load_and_inspect() {
    let mut h = TestHarness::new();
    assert!(execute_json(&mut h, QUAD).unwrap().success);

    let resp = execute_json(&mut h, r#"{"command": "inspect"}"#).unwrap();
    assert!(resp.success);
    let data = resp.data.unwrap();
    assert_eq!(data["vertex_count"], 4);
    assert_eq!(data["edge_count"], 4);
    assert_eq!(data["face_count"], 1);
    assert_eq!(data["selected_faces"], serde_json::json!([0]));
    assert!(data["tool"].is_null());
    assert!(data["last_commit"].is_null());
}

#[test]
fn test_command_start_requires_selection() {
    let mut h = TestHarness::new();
    execute_json(&mut h, QUAD).unwrap();
    execute_json(&mut h, r#"{"command": "select_faces", "faces": []}"#).unwrap();

    let resp = execute_json(&mut h, r#"{"command": "start"}"#).unwrap();
    assert!(!resp.success);
    assert!(resp.error.is_some());
    assert!(!h.is_tool_active());
}

#[test]
fn test_command_preview_follows_options() {
    let mut h = TestHarness::new();
    execute_json(&mut h, QUAD).unwrap();

    let responses = execute_json_batch(
        &mut h,
        r#"[
            {"command": "set_count", "value": 4},
            {"command": "start"},
            {"command": "set_distance", "value": "2 * 0.5"},
            {"command": "inspect"}
        ]"#,
    )
    .unwrap();
    assert!(responses.iter().all(|r| r.success));

    let data = responses[3].data.as_ref().unwrap();
    let tool = &data["tool"];
    assert_eq!(tool["state"], "Main");
    assert_eq!(tool["segments"], 4);
    assert!((tool["distance"].as_f64().unwrap() - 1.0).abs() < 1e-6);
    // 4 outer verts * 5 layers
    assert_eq!(tool["preview_verts"], 20);
    // 4 sides * 4 segments + 1 cap
    assert_eq!(tool["preview_faces"], 17);
    assert_eq!(data["hidden_faces"], 1);
}

#[test]
fn test_command_large_count_clamped_in_preview() {
    let mut h = TestHarness::new();
    execute_json(&mut h, QUAD).unwrap();

    let resp = execute_json(&mut h, r#"{"command": "set_count", "value": 500}"#).unwrap();
    assert!(resp.success);
    assert_eq!(resp.data.unwrap()["count"], 500);

    execute_json(&mut h, r#"{"command": "start"}"#).unwrap();
    assert_eq!(h.segments(), Some(100));

    let resp = execute_json(&mut h, r#"{"command": "set_count", "value": -3}"#).unwrap();
    assert_eq!(resp.data.unwrap()["count"], 1);
    assert_eq!(h.segments(), Some(1));
}

#[test]
fn test_command_bad_distance_rejected() {
    let mut h = TestHarness::new();
    execute_json(&mut h, QUAD).unwrap();
    execute_json(&mut h, r#"{"command": "start"}"#).unwrap();

    let resp = execute_json(&mut h, r#"{"command": "set_distance", "value": "abc +"}"#).unwrap();
    assert!(!resp.success);
    assert!(h.is_tool_active());
    assert_eq!(h.distance(), Some(0.0));
}

#[test]
fn test_command_full_session() {
    let mut h = TestHarness::new();
    execute_json(&mut h, QUAD).unwrap();

    let responses = execute_json_batch(
        &mut h,
        r#"[
            {"command": "set_mode", "mode": "count"},
            {"command": "set_count", "value": 2},
            {"command": "start"},
            {"command": "drag_to", "distance": 2.0},
            {"command": "press", "key": "RET"},
            {"command": "validate"},
            {"command": "inspect"}
        ]"#,
    )
    .unwrap();
    for (i, r) in responses.iter().enumerate() {
        assert!(r.success, "command {} failed: {:?}", i, r.error);
    }

    assert_eq!(responses[4].data.as_ref().unwrap()["effect"], "Commit");
    assert_eq!(responses[5].data.as_ref().unwrap()["valid"], true);

    let data = responses[6].data.as_ref().unwrap();
    assert_eq!(data["vertex_count"], 12);
    assert_eq!(data["face_count"], 9);
    assert_eq!(data["edge_count"], 20);
    assert!(data["tool"].is_null());
    assert_eq!(data["last_commit"]["created_faces"], 9);
    assert_eq!(data["last_commit"]["removed_faces"], 1);
    assert_eq!(data["last_commit"]["failures"], 0);
}

#[test]
fn test_command_escape_cancels() {
    let mut h = TestHarness::new();
    execute_json(&mut h, QUAD).unwrap();

    let responses = execute_json_batch(
        &mut h,
        r#"[
            {"command": "start"},
            {"command": "drag_to", "distance": 1.0},
            {"command": "press", "key": "ESC"},
            {"command": "inspect"}
        ]"#,
    )
    .unwrap();
    assert_eq!(responses[2].data.as_ref().unwrap()["effect"], "Cancel");
    let data = responses[3].data.as_ref().unwrap();
    assert_eq!(data["face_count"], 1);
    assert_eq!(data["vertex_count"], 4);
    assert_eq!(data["hidden_faces"], 0);
}

#[test]
fn test_command_unknown_key_rejected() {
    let mut h = TestHarness::new();
    let resp = execute_json(&mut h, r#"{"command": "press", "key": "F13"}"#).unwrap();
    assert!(!resp.success);
    assert!(resp.error.unwrap().contains("F13"));
}

#[test]
fn test_command_undo_after_commit() {
    let mut h = TestHarness::new();
    execute_json(&mut h, QUAD).unwrap();

    let responses = execute_json_batch(
        &mut h,
        r#"[
            {"command": "start"},
            {"command": "set_distance", "value": "1"},
            {"command": "commit"},
            {"command": "undo"},
            {"command": "inspect"}
        ]"#,
    )
    .unwrap();
    assert_eq!(responses[3].data.as_ref().unwrap()["undone"], true);
    let data = responses[4].data.as_ref().unwrap();
    assert_eq!(data["face_count"], 1);
    assert_eq!(data["selected_faces"], serde_json::json!([0]));
}

#[test]
fn test_command_export_round_trip() {
    let mut h = TestHarness::new();
    execute_json(&mut h, QUAD).unwrap();

    let resp = execute_json(&mut h, r#"{"command": "export_mesh"}"#).unwrap();
    let json = resp.data.unwrap()["mesh_json"].as_str().unwrap().to_string();

    let mut h2 = TestHarness::new();
    h2.load_mesh_json(&json).unwrap();
    assert_eq!(h2.vertex_count(), 4);
    assert_eq!(h2.selected_faces().len(), 1);
}

#[test]
fn test_command_invalid_json() {
    let mut h = TestHarness::new();
    assert!(execute_json(&mut h, r#"{"command": "explode"}"#).is_err());
    assert!(execute_json_batch(&mut h, "not json").is_err());
}
