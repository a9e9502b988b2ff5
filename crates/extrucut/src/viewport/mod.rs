//! 3D viewport panel drawn with egui's painter

mod camera;
pub use extrucut_lib::viewport::{mesh, picking};
mod overlays;
mod renderer;

use egui::Ui;
use glam::Vec3;

use crate::interaction::{InputEvent, InputKey};
use crate::state::AppState;
use camera::ArcBallCamera;
use mesh::{LineMeshData, MeshData, PreviewDrawData};
use picking::pick_face;

/// Cached draw data, rebuilt when the mesh version or the preview changes
struct DrawCache {
    version: u64,
    faces: MeshData,
    edges: LineMeshData,
}

/// 3D viewport panel
pub struct ViewportPanel {
    camera: ArcBallCamera,
    cache: Option<DrawCache>,
    /// Camera has been fitted to the mesh since the last reset
    framed: bool,
    last_pointer: Option<egui::Pos2>,
}

impl ViewportPanel {
    pub fn new() -> Self {
        Self {
            camera: ArcBallCamera::new(),
            cache: None,
            framed: false,
            last_pointer: None,
        }
    }

    pub fn reset_camera(&mut self) {
        self.camera = ArcBallCamera::new();
        self.framed = false;
    }

    /// Show the viewport; returns its screen rect
    pub fn show(&mut self, ui: &mut Ui, state: &mut AppState) -> egui::Rect {
        let (rect, response) = ui.allocate_exact_size(
            ui.available_size(),
            egui::Sense::click_and_drag(),
        );

        self.frame_new_mesh(state);
        self.handle_camera(ui, &response);

        if state.is_tool_active() {
            self.feed_tool_input(ui, &response, rect, state);
        } else {
            self.handle_selection(ui, &response, rect, state);
        }

        if ui.is_rect_visible(rect) {
            self.paint(ui, rect, state);
        }
        rect
    }

    /// Fit the camera to the mesh on first show and after a reset
    fn frame_new_mesh(&mut self, state: &AppState) {
        if self.framed || !state.mesh.is_active() {
            return;
        }
        let mesh = state.mesh.mesh();
        let points: Vec<Vec3> = mesh
            .vert_ids()
            .filter_map(|v| mesh.position(v))
            .map(|p| mesh.world_transform.transform_point3(p))
            .collect();
        if points.is_empty() {
            return;
        }
        let min = points.iter().fold(Vec3::splat(f32::MAX), |a, &p| a.min(p));
        let max = points.iter().fold(Vec3::splat(f32::MIN), |a, &p| a.max(p));
        self.camera.frame((min + max) * 0.5, (max - min).length() * 0.5);
        self.framed = true;
    }

    /// Middle drag orbits, Shift+middle drag pans, scroll zooms
    fn handle_camera(&mut self, ui: &Ui, response: &egui::Response) {
        if response.dragged_by(egui::PointerButton::Middle) {
            let delta = response.drag_delta();
            if ui.input(|i| i.modifiers.shift) {
                let scale = self.camera.distance * 0.002;
                self.camera.pan(-delta.x * scale, delta.y * scale);
            } else {
                self.camera.rotate(-delta.x * 0.4, delta.y * 0.4);
            }
        }
        if response.hovered() {
            let scroll = ui.input(|i| i.smooth_scroll_delta.y);
            if scroll.abs() > 0.1 {
                self.camera.zoom(scroll * 0.01);
            }
        }
    }

    /// Pointer and mouse buttons go to the interaction controller
    fn feed_tool_input(&mut self, ui: &Ui, response: &egui::Response, rect: egui::Rect, state: &mut AppState) {
        let pointer = ui.input(|i| i.pointer.latest_pos());
        if let Some(pos) = pointer {
            if self.last_pointer != Some(pos) {
                state.input(InputEvent::PointerMoved(self.camera.screen_ray(pos, rect)));
                self.last_pointer = Some(pos);
            }
        }

        let (primary_pressed, primary_released, secondary_pressed) = ui.input(|i| {
            (
                i.pointer.button_pressed(egui::PointerButton::Primary),
                i.pointer.button_released(egui::PointerButton::Primary),
                i.pointer.button_pressed(egui::PointerButton::Secondary),
            )
        });
        if response.hovered() && primary_pressed {
            state.input(InputEvent::Press(InputKey::LeftMouse));
        }
        // Releases count anywhere so a drag leaving the viewport still ends
        if primary_released {
            state.input(InputEvent::Release(InputKey::LeftMouse));
        }
        if response.hovered() && secondary_pressed {
            state.input(InputEvent::Press(InputKey::RightMouse));
        }
    }

    /// Click picks a face; Ctrl/Shift+click toggles it
    fn handle_selection(&mut self, ui: &Ui, response: &egui::Response, rect: egui::Rect, state: &mut AppState) {
        if !response.clicked() || !state.mesh.is_active() {
            return;
        }
        let Some(pos) = response.interact_pointer_pos() else { return };
        let ray = self.camera.screen_ray(pos, rect);
        let toggle = ui.input(|i| i.modifiers.ctrl || i.modifiers.shift);
        let hit = pick_face(&ray, state.mesh.mesh());

        let result = match (hit, toggle) {
            (Some(hit), true) => state.mesh.toggle_face(hit.face),
            (Some(hit), false) => state.mesh.select_faces(&[hit.face]),
            (None, false) => state.mesh.select_faces(&[]),
            (None, true) => Ok(()),
        };
        if let Err(e) = result {
            tracing::warn!("Selection failed: {e}");
        }
    }

    fn paint(&mut self, ui: &Ui, rect: egui::Rect, state: &AppState) {
        let painter = ui.painter_at(rect);
        renderer::paint_background(&painter, rect);

        let version = state.mesh.version();
        if self.cache.as_ref().is_none_or(|c| c.version != version) {
            let mesh = state.mesh.mesh();
            self.cache = Some(DrawCache {
                version,
                faces: MeshData::from_edit_mesh(mesh),
                edges: LineMeshData::from_edit_mesh(mesh),
            });
        }
        if let Some(cache) = &self.cache {
            renderer::paint_triangles(&painter, rect, &self.camera, &cache.faces);
            renderer::paint_lines(&painter, rect, &self.camera, &cache.edges, 1.0);
        }

        if let Some(tool) = &state.tool {
            let preview = PreviewDrawData::build(tool.plan(), &tool.axis(), &tool.world_transform());
            renderer::paint_preview(&painter, rect, &self.camera, &preview);
        }

        overlays::draw_axis_gizmo(&painter, rect, &self.camera);
        overlays::draw_tool_header(&painter, rect, state);
    }
}
