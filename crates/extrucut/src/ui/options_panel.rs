//! ExtruCut options window
//!
//! Placed inside the viewport according to the `position` option: a numpad
//! anchor pins it, a free point lets the user move it and is updated on drag.

use egui::{Align, Align2, Context, Rect, Ui};
use shared::{PanelPosition, SegmentMode};

use crate::i18n::t;
use crate::segments::MAX_SEGMENTS;
use crate::state::AppState;
use crate::tool::ExtruCutTool;

const MARGIN: f32 = 8.0;

fn align(fraction: f32) -> Align {
    if fraction < 0.25 {
        Align::Min
    } else if fraction > 0.75 {
        Align::Max
    } else {
        Align::Center
    }
}

pub fn show(ctx: &Context, area: Rect, state: &mut AppState) {
    let position = state.options().position;
    let mut window = egui::Window::new(t("options.title"))
        .id(egui::Id::new("extrucut_options"))
        .collapsible(true)
        .resizable(false);

    window = match position {
        PanelPosition::Point([x, y]) => window.default_pos(egui::pos2(x, y)),
        anchor => {
            let [fx, fy] = anchor.anchor_fractions().unwrap_or([1.0, 0.0]);
            let inner = area.shrink(MARGIN);
            let pos = egui::pos2(
                egui::lerp(inner.left()..=inner.right(), fx),
                egui::lerp(inner.top()..=inner.bottom(), fy),
            );
            window.pivot(Align2([align(fx), align(fy)])).fixed_pos(pos)
        }
    };

    let response = window.show(ctx, |ui| body(ui, state));

    // A free window remembers where it was dragged to
    if let (Some(resp), PanelPosition::Point([x, y])) = (response, position) {
        let min = resp.response.rect.min;
        if (min.x - x).abs() > 0.5 || (min.y - y).abs() > 0.5 {
            state.set_position(PanelPosition::Point([min.x, min.y]));
        }
    }
}

fn body(ui: &mut Ui, state: &mut AppState) {
    egui::Grid::new("extrucut_options_grid")
        .num_columns(2)
        .spacing([8.0, 4.0])
        .show(ui, |ui| {
            // ── Distance ──
            ui.label(t("options.distance"));
            let distance = state.tool.as_ref().map(|tool| tool.distance_display());
            ui.add_enabled_ui(distance.is_some(), |ui| {
                let display = distance.unwrap_or_default();
                if let Some(input) = expr_field(ui, "extrucut_distance", &display) {
                    if let Err(e) = state.set_distance_expr(&input) {
                        state.notices.push(format!("{}: {e}", t("options.invalid")));
                    }
                }
            });
            ui.end_row();

            if let Some(tool) = state.tool.as_ref() {
                ui.label(t("options.segments"));
                ui.monospace(tool.segments().to_string());
                ui.end_row();
            }

            // ── Split mode ──
            ui.label(t("options.by"));
            ui.horizontal(|ui| {
                let by = state.options().by;
                if ui.radio(by == SegmentMode::Count, t("options.count")).clicked() {
                    state.set_mode(SegmentMode::Count);
                }
                if ui.radio(by == SegmentMode::Length, t("options.length")).clicked() {
                    state.set_mode(SegmentMode::Length);
                }
            });
            ui.end_row();

            ui.label(t("options.count"));
            let mut count = state.options().count as i64;
            if ui
                .add(egui::DragValue::new(&mut count).range(1..=i64::from(MAX_SEGMENTS)).speed(0.1))
                .changed()
            {
                state.set_count(count);
            }
            ui.end_row();

            ui.label(t("options.length"));
            let display = ExtruCutTool::length_display(state.options());
            if let Some(input) = expr_field(ui, "extrucut_length", &display) {
                if let Err(e) = state.set_length_expr(&input) {
                    state.notices.push(format!("{}: {e}", t("options.invalid")));
                }
            }
            ui.end_row();

            // ── Window position ──
            ui.label(t("options.position"));
            anchor_picker(ui, state);
            ui.end_row();
        });
}

/// Numeric text field accepting expressions. Shows `display` while not being
/// edited; returns the typed text once editing finishes.
fn expr_field(ui: &mut Ui, id: &str, display: &str) -> Option<String> {
    let id = ui.make_persistent_id(id);
    let mut text = ui
        .data_mut(|d| d.get_temp::<String>(id))
        .unwrap_or_else(|| display.to_string());

    let response = ui.add(egui::TextEdit::singleline(&mut text).desired_width(90.0));

    if response.has_focus() {
        ui.data_mut(|d| d.insert_temp(id, text));
        return None;
    }
    ui.data_mut(|d| d.remove::<String>(id));
    if response.lost_focus() && text != display {
        return Some(text);
    }
    None
}

fn anchor_picker(ui: &mut Ui, state: &mut AppState) {
    let current = state.options().position;
    egui::Grid::new("extrucut_anchor_grid")
        .spacing([2.0, 2.0])
        .show(ui, |ui| {
            for row in [[7u8, 8, 9], [4, 5, 6], [1, 2, 3]] {
                for a in row {
                    let selected = current == PanelPosition::Anchor(a);
                    if ui.selectable_label(selected, a.to_string()).clicked() {
                        state.set_position(PanelPosition::Anchor(a));
                    }
                }
                ui.end_row();
            }
        });
    let free = matches!(current, PanelPosition::Point(_));
    if ui.selectable_label(free, "↔").clicked() && !free {
        let pos = ui.min_rect().min;
        state.set_position(PanelPosition::Point([pos.x, pos.y]));
    }
}
