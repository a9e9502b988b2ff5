//! Application menu bar

use eframe::egui;

use crate::fixtures;
use crate::i18n::{lang, set_lang, t, Lang};
use crate::state::AppState;
use crate::viewport::ViewportPanel;

fn load_or_log(state: &mut AppState, desc: &shared::MeshDescription) {
    if let Err(e) = state.load_mesh(desc) {
        tracing::error!("Failed to load mesh: {e}");
    }
}

/// Show the file menu
pub fn file_menu(ui: &mut egui::Ui, state: &mut AppState) {
    let idle = !state.is_tool_active();
    ui.menu_button(t("menu.file"), |ui| {
        if ui.add_enabled(idle, egui::Button::new(t("menu.new_grid"))).clicked() {
            load_or_log(state, &fixtures::demo_grid());
            ui.close_menu();
        }
        if ui.add_enabled(idle, egui::Button::new(t("menu.new_cube"))).clicked() {
            let mut cube = fixtures::cube(1.0);
            cube.selected_faces = vec![1];
            load_or_log(state, &cube);
            ui.close_menu();
        }
        if ui.add_enabled(idle, egui::Button::new(t("menu.open"))).clicked() {
            ui.close_menu();
            if let Some(path) = rfd::FileDialog::new()
                .set_title(t("menu.open_title"))
                .add_filter("JSON", &["json"])
                .pick_file()
            {
                if let Err(e) = state.mesh.load_file(&path) {
                    tracing::error!("{e}");
                    state.notices.push(e);
                }
            }
        }
        if ui.add_enabled(idle, egui::Button::new(t("menu.save"))).clicked() {
            ui.close_menu();
            if let Some(path) = rfd::FileDialog::new()
                .set_title(t("menu.save_title"))
                .add_filter("JSON", &["json"])
                .set_file_name("mesh.json")
                .save_file()
            {
                if let Err(e) = state.mesh.save_file(&path) {
                    tracing::error!("{e}");
                    state.notices.push(e);
                }
            }
        }
        ui.separator();
        if ui.button(t("menu.quit")).clicked() {
            if state.is_tool_active() {
                let _ = state.cancel_tool();
            }
            std::process::exit(0);
        }
    });
}

/// Show the edit menu
pub fn edit_menu(ui: &mut egui::Ui, state: &mut AppState) {
    let idle = !state.is_tool_active();
    ui.menu_button(t("menu.edit"), |ui| {
        if ui
            .add_enabled(idle && state.mesh.can_undo(), egui::Button::new(t("menu.undo")))
            .clicked()
        {
            state.undo();
            ui.close_menu();
        }
        if ui
            .add_enabled(idle && state.mesh.can_redo(), egui::Button::new(t("menu.redo")))
            .clicked()
        {
            state.redo();
            ui.close_menu();
        }
        ui.separator();
        if ui.add_enabled(idle, egui::Button::new(t("menu.deselect_all"))).clicked() {
            if let Err(e) = state.mesh.select_faces(&[]) {
                tracing::warn!("Failed to clear selection: {e}");
            }
            ui.close_menu();
        }
    });
}

/// Show the view menu
pub fn view_menu(ui: &mut egui::Ui, state: &mut AppState, viewport: &mut ViewportPanel) {
    ui.menu_button(t("menu.view"), |ui| {
        ui.checkbox(&mut state.panels.options, t("menu.options_panel"));
        ui.separator();
        if ui.button(t("menu.reset_camera")).clicked() {
            viewport.reset_camera();
            ui.close_menu();
        }
        ui.separator();
        ui.menu_button(t("menu.language"), |ui| {
            if ui.radio(lang() == Lang::Ru, "Русский").clicked() {
                set_lang(Lang::Ru);
                ui.close_menu();
            }
            if ui.radio(lang() == Lang::En, "English").clicked() {
                set_lang(Lang::En);
                ui.close_menu();
            }
        });
    });
}
