//! Keyboard shortcut handling

use eframe::egui;

use crate::interaction::{InputEvent, InputKey};
use crate::state::AppState;
use crate::ui::toolbar;
use crate::viewport::ViewportPanel;

/// Handle keyboard shortcuts for the application
pub fn handle_keyboard(
    ctx: &egui::Context,
    state: &mut AppState,
    viewport: &mut ViewportPanel,
) {
    // The snap modifier is level state, track it even while typing
    let ctrl = ctx.input(|i| i.modifiers.ctrl);
    state.input(InputEvent::Modifier(ctrl));

    // Don't handle shortcuts when a text field is focused
    if ctx.memory(|m| m.focused().is_some()) {
        return;
    }

    ctx.input(|i| {
        if state.is_tool_active() {
            // Tool keys go through the keymap
            if i.key_pressed(egui::Key::Enter) {
                state.input(InputEvent::Press(InputKey::Enter));
            }
            if i.key_pressed(egui::Key::Escape) {
                state.input(InputEvent::Press(InputKey::Escape));
            }
            return;
        }

        // Ctrl+Z: undo
        if i.modifiers.command && i.key_pressed(egui::Key::Z) && !i.modifiers.shift {
            state.undo();
        }
        // Ctrl+Shift+Z or Ctrl+Y: redo
        if (i.modifiers.command && i.modifiers.shift && i.key_pressed(egui::Key::Z))
            || (i.modifiers.command && i.key_pressed(egui::Key::Y))
        {
            state.redo();
        }
        // E: start ExtruCut
        if i.key_pressed(egui::Key::E) && !i.modifiers.command {
            toolbar::action_extrucut(state);
        }
        // Escape: deselect
        if i.key_pressed(egui::Key::Escape) {
            if let Err(e) = state.mesh.select_faces(&[]) {
                tracing::warn!("Failed to clear selection: {e}");
            }
        }
        // Home: reset camera
        if i.key_pressed(egui::Key::Home) {
            viewport.reset_camera();
        }
    });
}
