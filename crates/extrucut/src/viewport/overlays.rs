//! Viewport overlay drawing (axis gizmo, tool header)

use egui::Painter;
use glam::Vec3;

use crate::state::AppState;

use super::camera::ArcBallCamera;

/// Small axis tripod in the bottom-left corner
pub fn draw_axis_gizmo(painter: &Painter, rect: egui::Rect, camera: &ArcBallCamera) {
    let origin = egui::pos2(rect.left() + 40.0, rect.bottom() - 40.0);
    let view = camera.view_matrix();
    let axes = [
        (Vec3::X, "X", egui::Color32::from_rgb(220, 70, 70)),
        (Vec3::Y, "Y", egui::Color32::from_rgb(70, 200, 70)),
        (Vec3::Z, "Z", egui::Color32::from_rgb(70, 110, 220)),
    ];

    for (axis, label, color) in axes {
        let v = view.transform_vector3(axis);
        let end = origin + egui::vec2(v.x, -v.y) * 28.0;
        painter.line_segment([origin, end], egui::Stroke::new(2.0, color));
        painter.text(
            end,
            egui::Align2::LEFT_BOTTOM,
            label,
            egui::FontId::monospace(12.0),
            color,
        );
    }
}

/// Tool name and current distance in the top-left corner while the tool runs
pub fn draw_tool_header(painter: &Painter, rect: egui::Rect, state: &AppState) {
    let Some(tool) = state.tool.as_ref() else { return };
    let text = format!(
        "{}  d = {}  n = {}",
        tool.header_text(),
        tool.distance_display(),
        tool.segments()
    );
    painter.text(
        rect.left_top() + egui::vec2(10.0, 10.0),
        egui::Align2::LEFT_TOP,
        text,
        egui::FontId::proportional(15.0),
        egui::Color32::from_rgb(255, 220, 120),
    );
}
