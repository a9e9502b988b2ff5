//! Toolbar actions and UI

use egui::Ui;

use crate::i18n::t;
use crate::state::AppState;

// ── Public actions (callable from menus and keys too) ────────

pub fn action_extrucut(state: &mut AppState) {
    if let Err(e) = state.start_tool() {
        tracing::warn!("ExtruCut: {}", e);
        state.notices.push(e.to_string());
    }
}

pub fn action_commit(state: &mut AppState) {
    if let Err(e) = state.commit_tool() {
        tracing::warn!("ExtruCut commit: {}", e);
    }
}

pub fn action_cancel(state: &mut AppState) {
    if let Err(e) = state.cancel_tool() {
        tracing::warn!("ExtruCut cancel: {}", e);
    }
}

pub fn show(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui| {
        match state.tool.as_ref().map(|tool| tool.header_text()) {
            None => {
                if ui
                    .add_enabled(state.can_start(), egui::Button::new(t("toolbar.extrucut")))
                    .on_hover_text(t("toolbar.extrucut_tip"))
                    .clicked()
                {
                    action_extrucut(state);
                }
            }
            Some(header) => {
                ui.strong(header);
                ui.separator();
                if ui.button(t("toolbar.commit")).clicked() {
                    action_commit(state);
                }
                if ui.button(t("toolbar.cancel")).clicked() {
                    action_cancel(state);
                }
            }
        }
    });
}
