//! Headless test harness for driving ExtruCut without a window.
//!
//! Wraps an `AppState` with in-memory options. Input goes through the same
//! controller and tick as the desktop shell.

use glam::Vec3;
use shared::{MeshDescription, SegmentMode};

use crate::commit::CommitReport;
use crate::generator::ExtrusionPlan;
use crate::interaction::{InputEvent, InputKey};
use crate::mesh::{EditMesh, ElementRef, FaceId};
use crate::state::{AppState, OptionsStore};
use crate::tool::{Effect, ToolState};
use crate::validation::MeshValidator;
use crate::viewport::picking::Ray;

/// Headless test harness over the mesh session, options and the tool
pub struct TestHarness {
    pub app: AppState,
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

impl TestHarness {
    /// Create a new empty harness.
    pub fn new() -> Self {
        Self {
            app: AppState::with_options(OptionsStore::in_memory()),
        }
    }

    // ── Mesh ──────────────────────────────────────────────────

    /// Load a mesh (replaces current, enters edit mode)
    pub fn load_mesh(&mut self, desc: &MeshDescription) -> Result<(), String> {
        self.app.load_mesh(desc)
    }

    /// Load a mesh from JSON string
    pub fn load_mesh_json(&mut self, json: &str) -> Result<(), String> {
        let desc: MeshDescription =
            serde_json::from_str(json).map_err(|e| format!("JSON parse error: {e}"))?;
        self.load_mesh(&desc)
    }

    /// Export the current mesh as JSON
    pub fn export_mesh_json(&self) -> String {
        serde_json::to_string_pretty(&self.app.mesh.mesh().to_description()).unwrap_or_default()
    }

    /// Replace the face selection
    pub fn select_faces(&mut self, faces: &[u32]) -> Result<(), String> {
        if self.app.is_tool_active() {
            return Err("Selection is locked while ExtruCut is running".into());
        }
        let ids: Vec<FaceId> = faces.iter().map(|&f| FaceId(f)).collect();
        self.app.mesh.select_faces(&ids).map_err(|e| e.to_string())
    }

    pub fn mesh(&self) -> &EditMesh {
        self.app.mesh.mesh()
    }

    // ── Tool ──────────────────────────────────────────────────

    pub fn start_tool(&mut self) -> Result<(), String> {
        self.app.start_tool().map_err(|e| e.to_string())
    }

    pub fn set_distance(&mut self, value: f32) -> Result<(), String> {
        self.app.set_distance(value).map_err(|e| e.to_string())?;
        self.update();
        Ok(())
    }

    pub fn set_distance_expr(&mut self, input: &str) -> Result<(), String> {
        self.app.set_distance_expr(input).map_err(|e| e.to_string())?;
        self.update();
        Ok(())
    }

    pub fn set_count(&mut self, value: i64) {
        self.app.set_count(value);
        self.update();
    }

    pub fn set_length(&mut self, value: f32) -> Result<(), String> {
        self.set_length_expr(&value.to_string())
    }

    pub fn set_length_expr(&mut self, input: &str) -> Result<(), String> {
        self.app.set_length_expr(input).map_err(|e| e.to_string())?;
        self.update();
        Ok(())
    }

    /// Segment mode by name ("count" / "length")
    pub fn set_mode(&mut self, name: &str) -> Result<(), String> {
        let mode = SegmentMode::parse(name).ok_or_else(|| format!("Unknown segment mode: {name}"))?;
        self.app.set_mode(mode);
        self.update();
        Ok(())
    }

    // ── Input ─────────────────────────────────────────────────

    /// Press a key or button and run one tick
    pub fn press(&mut self, key: InputKey) -> Effect {
        self.app.input(InputEvent::Press(key));
        self.app.tick()
    }

    pub fn release(&mut self, key: InputKey) -> Effect {
        self.app.input(InputEvent::Release(key));
        self.app.tick()
    }

    /// Move the pointer along a world-space ray and run one tick
    pub fn move_pointer(&mut self, ray: Ray) -> Effect {
        self.app.input(InputEvent::PointerMoved(ray));
        self.app.tick()
    }

    /// Hold or release the snap modifier
    pub fn modifier(&mut self, held: bool) {
        self.app.input(InputEvent::Modifier(held));
    }

    /// Run one tick without new input
    pub fn update(&mut self) -> Effect {
        self.app.tick()
    }

    /// World-space ray crossing the extrusion axis at signed `distance`
    /// from the base point, arriving from the side.
    pub fn pointer_at_distance(&self, distance: f32) -> Option<Ray> {
        let tool = self.app.tool.as_ref()?;
        let region = tool.region();
        let world = tool.world_transform();
        let side = region.direction.any_orthonormal_vector();
        let target = region.base_point + region.direction * distance;
        let origin = target + side * 10.0;
        Some(Ray::new(
            world.transform_point3(origin),
            world.transform_vector3(target - origin),
        ))
    }

    /// Drag with the left button from the current distance to `distance`
    pub fn drag_to(&mut self, distance: f32) -> Result<(), String> {
        let current = self.distance().ok_or("ExtruCut is not running")?;
        let from = self.pointer_at_distance(current).ok_or("ExtruCut is not running")?;
        let to = self.pointer_at_distance(distance).ok_or("ExtruCut is not running")?;
        self.move_pointer(from);
        self.press(InputKey::LeftMouse);
        self.move_pointer(to);
        self.release(InputKey::LeftMouse);
        Ok(())
    }

    pub fn commit(&mut self) -> Result<(), String> {
        self.app.commit_tool().map_err(|e| e.to_string())
    }

    pub fn cancel(&mut self) -> Result<(), String> {
        self.app.cancel_tool().map_err(|e| e.to_string())
    }

    pub fn undo(&mut self) -> bool {
        self.app.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.app.redo()
    }

    /// Drop the tool and the mesh
    pub fn clear(&mut self) {
        if self.app.is_tool_active() {
            let _ = self.app.cancel_tool();
        }
        self.app.mesh = Default::default();
        self.app.last_commit = None;
        self.app.notices.clear();
    }

    // ── Inspection ────────────────────────────────────────────

    pub fn is_tool_active(&self) -> bool {
        self.app.is_tool_active()
    }

    pub fn tool_state(&self) -> Option<ToolState> {
        self.app.tool.as_ref().map(|t| t.state())
    }

    pub fn distance(&self) -> Option<f32> {
        self.app.tool.as_ref().map(|t| t.distance())
    }

    pub fn segments(&self) -> Option<u32> {
        self.app.tool.as_ref().map(|t| t.segments())
    }

    pub fn preview(&self) -> Option<&ExtrusionPlan> {
        self.app.tool.as_ref().map(|t| t.plan())
    }

    pub fn last_commit(&self) -> Option<&CommitReport> {
        self.app.last_commit.as_ref()
    }

    pub fn vertex_count(&self) -> usize {
        self.mesh().vertex_count()
    }

    pub fn edge_count(&self) -> usize {
        self.mesh().edge_count()
    }

    pub fn face_count(&self) -> usize {
        self.mesh().face_count()
    }

    pub fn selected_faces(&self) -> Vec<FaceId> {
        self.mesh().selected_faces()
    }

    pub fn hidden_face_count(&self) -> usize {
        let mesh = self.mesh();
        mesh.face_ids()
            .filter(|&f| mesh.is_hidden(ElementRef::Face(f)))
            .count()
    }

    /// Bounding box size of the mesh
    pub fn dimensions(&self) -> [f32; 3] {
        MeshValidator::new(self.mesh()).dimensions()
    }

    /// Run all mesh validation checks
    pub fn validate(&self) -> Vec<String> {
        MeshValidator::new(self.mesh()).validate_all()
    }

    /// Signed volume enclosed by all faces
    pub fn volume(&self) -> f32 {
        MeshValidator::new(self.mesh()).volume()
    }

    /// Axis point under the preview's far layer, for assertions
    pub fn far_point(&self) -> Option<Vec3> {
        let tool = self.app.tool.as_ref()?;
        let region = tool.region();
        Some(region.base_point + region.direction * tool.distance())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    fn quad_harness() -> TestHarness {
        let mut h = TestHarness::new();
        h.load_mesh(&fixtures::quad()).unwrap();
        h
    }

    #[test]
    fn test_start_hides_region() {
        let mut h = quad_harness();
        h.start_tool().unwrap();
        assert!(h.is_tool_active());
        assert_eq!(h.tool_state(), Some(ToolState::Main));
        assert_eq!(h.hidden_face_count(), 1);
    }

    #[test]
    fn test_start_without_selection_fails() {
        let mut h = TestHarness::new();
        h.load_mesh(&fixtures::grid(2, 2, 1.0)).unwrap();
        assert!(h.start_tool().is_err());
        assert!(!h.is_tool_active());
    }

    #[test]
    fn test_drag_sets_distance() {
        let mut h = quad_harness();
        h.start_tool().unwrap();
        h.drag_to(0.75).unwrap();
        assert_eq!(h.tool_state(), Some(ToolState::Main));
        assert!((h.distance().unwrap() - 0.75).abs() < 1e-4);
    }

    #[test]
    fn test_snap_while_dragging() {
        let mut h = quad_harness();
        h.set_length(0.5).unwrap();
        h.start_tool().unwrap();
        h.modifier(true);
        h.drag_to(1.3).unwrap();
        assert!((h.distance().unwrap() - 1.5).abs() < 1e-4);
    }

    #[test]
    fn test_selection_locked_while_running() {
        let mut h = quad_harness();
        h.start_tool().unwrap();
        assert!(h.select_faces(&[0]).is_err());
        assert!(h.load_mesh(&fixtures::quad()).is_err());
    }

    #[test]
    fn test_clear() {
        let mut h = quad_harness();
        h.start_tool().unwrap();
        h.clear();
        assert!(!h.is_tool_active());
        assert_eq!(h.face_count(), 0);
    }

    #[test]
    fn test_json_round_trip() {
        let mut h = quad_harness();
        let json = h.export_mesh_json();
        h.clear();
        h.load_mesh_json(&json).unwrap();
        assert_eq!(h.face_count(), 1);
        assert_eq!(h.selected_faces(), vec![FaceId(0)]);
        assert!(h.load_mesh_json("{not json").is_err());
    }
}
