use egui::Ui;

use crate::i18n::t;
use crate::state::AppState;
use crate::tool::ToolState;

pub fn show(ui: &mut Ui, state: &AppState) {
    ui.horizontal(|ui| {
        if !state.mesh.is_active() {
            ui.weak(t("status.no_mesh"));
            return;
        }

        let mesh = state.mesh.mesh();
        ui.weak(format!("{}: {}", t("status.verts"), mesh.vertex_count()));
        ui.weak(format!("{}: {}", t("status.faces"), mesh.face_count()));
        let sel = mesh.selected_faces().len();
        if sel > 0 {
            ui.label(format!("{}: {sel}", t("status.selected")));
        }

        ui.separator();

        match state.tool.as_ref() {
            Some(tool) => {
                let hint = match tool.state() {
                    ToolState::Displace => t("hint.displace"),
                    _ => t("hint.main"),
                };
                ui.colored_label(
                    egui::Color32::YELLOW,
                    format!("{} [{} = {}]: {hint}", tool.header_text(), t("options.distance"), tool.distance_display()),
                );
            }
            None => match state.notices.last() {
                Some(notice) => {
                    ui.weak(notice);
                }
                None => {
                    ui.weak(t("hint.select"));
                }
            },
        }
    });
}
