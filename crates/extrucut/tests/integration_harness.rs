//! Integration tests for TestHarness.
//!
//! Full ExtruCut sessions driven through the same input path as the desktop app.

use extrucut_lib::fixtures;
use extrucut_lib::harness::TestHarness;
use extrucut_lib::interaction::InputKey;
use extrucut_lib::tool::{Effect, ToolState};

fn loaded(desc: shared::MeshDescription) -> TestHarness {
    let mut h = TestHarness::new();
    h.load_mesh(&desc).unwrap();
    h
}

#[test]
fn test_quad_drag_and_enter_commits() {
    let mut h = loaded(fixtures::quad());
    h.set_count(2);
    h.start_tool().unwrap();
    h.drag_to(2.0).unwrap();
    assert!((h.distance().unwrap() - 2.0).abs() < 1e-4);

    assert_eq!(h.press(InputKey::Enter), Effect::Commit);
    assert!(!h.is_tool_active());

    assert_eq!(h.vertex_count(), 12);
    assert_eq!(h.face_count(), 9);
    assert_eq!(h.edge_count(), 20);
    assert_eq!(h.hidden_face_count(), 0);

    let report = h.last_commit().unwrap();
    assert!(report.is_clean());
    assert_eq!(report.removed_faces, 1);
    assert_eq!(report.created_verts.len(), 8);
    assert_eq!(report.created_faces.len(), 9);
    assert_eq!(h.selected_faces(), report.created_faces);

    let errors = h.validate();
    assert!(errors.is_empty(), "Validation errors: {:?}", errors);

    let dims = h.dimensions();
    assert!((dims[2] - 2.0).abs() < 1e-4);
}

#[test]
fn test_cancel_after_drag_restores_mesh() {
    let mut h = loaded(fixtures::grid(3, 3, 1.0).with_selection([4]));
    let before = h.mesh().to_description();

    h.start_tool().unwrap();
    h.drag_to(1.5).unwrap();
    assert_eq!(h.hidden_face_count(), 1);

    assert_eq!(h.press(InputKey::RightMouse), Effect::Cancel);
    assert!(!h.is_tool_active());
    assert!(h.last_commit().is_none());
    assert_eq!(h.hidden_face_count(), 0);
    assert_eq!(h.mesh().to_description(), before);
}

#[test]
fn test_cancel_leaves_nothing_to_redo() {
    let mut h = loaded(fixtures::grid(3, 3, 1.0).with_selection([4]));
    let before = h.mesh().to_description();

    h.start_tool().unwrap();
    h.drag_to(1.5).unwrap();
    assert_eq!(h.press(InputKey::Escape), Effect::Cancel);

    assert!(!h.redo());
    assert!(!h.undo());
    assert_eq!(h.hidden_face_count(), 0);
    assert_eq!(h.mesh().to_description(), before);
}

#[test]
fn test_right_click_during_drag_reverts_distance() {
    let mut h = loaded(fixtures::quad());
    h.start_tool().unwrap();
    h.drag_to(0.5).unwrap();

    let from = h.pointer_at_distance(0.5).unwrap();
    let to = h.pointer_at_distance(3.0).unwrap();
    h.move_pointer(from);
    assert_eq!(h.press(InputKey::LeftMouse), Effect::BeginDrag);
    h.move_pointer(to);
    assert!((h.distance().unwrap() - 3.0).abs() < 1e-4);

    assert_eq!(h.press(InputKey::RightMouse), Effect::RevertDrag);
    assert_eq!(h.tool_state(), Some(ToolState::Main));
    assert!((h.distance().unwrap() - 0.5).abs() < 1e-4);
    assert!(h.is_tool_active());
}

#[test]
fn test_grid_block_removes_inner_vertex() {
    let mut h = loaded(fixtures::grid(4, 4, 1.0).with_selection([5, 6, 9, 10]));
    assert_eq!(h.vertex_count(), 25);
    assert_eq!(h.edge_count(), 40);

    h.set_count(1);
    h.start_tool().unwrap();
    h.set_distance(1.0).unwrap();
    h.commit().unwrap();

    // 25 - 1 inner + 8 lifted outer + 1 lifted inner
    assert_eq!(h.vertex_count(), 33);
    // 16 - 4 selected + 8 sides + 4 caps
    assert_eq!(h.face_count(), 24);
    // 40 - 4 inner + 8 rungs + 8 rails + 4 inner cap edges
    assert_eq!(h.edge_count(), 56);

    let report = h.last_commit().unwrap();
    assert_eq!(report.removed_verts, 1);
    assert_eq!(report.removed_edges, 4);

    let errors = h.validate();
    assert!(errors.is_empty(), "Validation errors: {:?}", errors);
}

#[test]
fn test_undo_redo_after_commit() {
    let mut h = loaded(fixtures::quad());
    let before = h.mesh().to_description();

    h.set_count(3);
    h.start_tool().unwrap();
    h.set_distance(1.0).unwrap();
    h.commit().unwrap();
    let after = h.mesh().to_description();
    assert_eq!(h.face_count(), 13);

    assert!(h.undo());
    assert_eq!(h.mesh().to_description(), before);

    assert!(h.redo());
    assert_eq!(h.mesh().to_description(), after);
}

#[test]
fn test_cube_top_extrusion_stays_closed() {
    let mut h = loaded(fixtures::cube(1.0).with_selection([1]));
    h.set_count(1);
    h.start_tool().unwrap();
    h.set_distance(1.0).unwrap();
    h.commit().unwrap();

    assert_eq!(h.vertex_count(), 12);
    assert_eq!(h.face_count(), 10);
    assert_eq!(h.last_commit().unwrap().flipped_faces, 0);

    let v = extrucut_lib::validation::MeshValidator::new(h.mesh());
    assert!(v.is_closed());
    assert!(v.validate_all().is_empty(), "{:?}", v.validate_all());
    assert!((h.volume() - 2.0).abs() < 1e-4);
    assert!(v.assert_dimensions_approx([1.0, 1.0, 2.0], 1e-4));
}

#[test]
fn test_cube_inward_extrusion_keeps_orientation() {
    let mut h = loaded(fixtures::cube(1.0).with_selection([1]));
    h.set_count(2);
    h.start_tool().unwrap();
    h.set_distance(-0.5).unwrap();
    h.commit().unwrap();

    let v = extrucut_lib::validation::MeshValidator::new(h.mesh());
    assert!(v.is_closed());
    assert!(v.inconsistent_edges().is_empty());
    assert!((h.volume() - 0.5).abs() < 1e-4);
}

#[test]
fn test_length_mode_follows_distance() {
    let mut h = loaded(fixtures::quad());
    h.set_mode("length").unwrap();
    h.set_length(0.3).unwrap();
    h.start_tool().unwrap();

    h.set_distance(1.0).unwrap();
    assert_eq!(h.segments(), Some(3));

    h.set_distance(2.0).unwrap();
    assert_eq!(h.segments(), Some(6));

    h.set_distance(-1.0).unwrap();
    assert_eq!(h.segments(), Some(1));
}

#[test]
fn test_snapped_drag_commits_rounded_distance() {
    let mut h = loaded(fixtures::quad());
    h.set_count(1);
    h.set_length(0.25).unwrap();
    h.start_tool().unwrap();

    h.modifier(true);
    h.drag_to(0.9).unwrap();
    h.modifier(false);
    assert!((h.distance().unwrap() - 1.0).abs() < 1e-4);

    h.press(InputKey::Enter);
    let dims = h.dimensions();
    assert!((dims[2] - 1.0).abs() < 1e-4);
}

#[test]
fn test_second_session_after_commit() {
    let mut h = loaded(fixtures::quad());
    h.set_count(1);
    h.start_tool().unwrap();
    h.set_distance(1.0).unwrap();
    h.commit().unwrap();

    // New faces stay selected, so the tool can run again on them
    h.start_tool().unwrap();
    h.set_distance(1.0).unwrap();
    h.commit().unwrap();

    assert!(h.validate().is_empty());
    let dims = h.dimensions();
    assert!((dims[2] - 2.0).abs() < 1e-4);
}
