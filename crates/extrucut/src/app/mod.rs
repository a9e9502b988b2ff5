//! Main application module

mod keyboard;
mod menus;
mod styles;

use eframe::egui;

use crate::state::{AppState, MeshState};
use crate::tool::CursorHint;
use crate::ui::{options_panel, status_bar, toolbar};
use crate::viewport::ViewportPanel;

/// Main application
pub struct ExtruCutApp {
    state: AppState,
    viewport: ViewportPanel,
    /// Last saved mesh version (for autosave)
    last_saved_version: u64,
}

impl ExtruCutApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        initial_mesh: Option<shared::MeshDescription>,
    ) -> Self {
        let mut state = AppState::default();

        // Initial mesh: CLI argument, then autosave, then the demo grid
        let desc = initial_mesh
            .or_else(|| {
                let autosave = MeshState::load_autosave();
                if autosave.is_some() {
                    tracing::info!("Loaded autosave mesh");
                }
                autosave
            })
            .unwrap_or_else(crate::fixtures::demo_grid);
        if let Err(e) = state.load_mesh(&desc) {
            tracing::error!("Failed to load initial mesh: {e}");
            if let Err(e) = state.load_mesh(&crate::fixtures::demo_grid()) {
                tracing::error!("Failed to load demo grid: {e}");
            }
        }

        styles::configure_styles(&cc.egui_ctx);

        let last_saved_version = state.mesh.version();

        Self {
            state,
            viewport: ViewportPanel::new(),
            last_saved_version,
        }
    }
}

impl eframe::App for ExtruCutApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Autosave mesh if changed; the running tool's hidden region is not saved
        let current_version = self.state.mesh.version();
        if current_version != self.last_saved_version && !self.state.is_tool_active() {
            self.state.mesh.autosave();
            self.last_saved_version = current_version;
        }

        keyboard::handle_keyboard(ctx, &mut self.state, &mut self.viewport);

        // ── Menu bar ──────────────────────────────────────────
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                menus::file_menu(ui, &mut self.state);
                menus::edit_menu(ui, &mut self.state);
                menus::view_menu(ui, &mut self.state, &mut self.viewport);
            });
        });

        // ── Toolbar ───────────────────────────────────────────
        egui::TopBottomPanel::top("toolbar")
            .frame(
                egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::symmetric(8, 4)),
            )
            .show(ctx, |ui| {
                toolbar::show(ui, &mut self.state);
            });

        // ── Status bar ───────────────────────────────────────
        if self.state.panels.status_bar {
            egui::TopBottomPanel::bottom("status_bar")
                .exact_height(22.0)
                .frame(
                    egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::symmetric(8, 2)),
                )
                .show(ctx, |ui| {
                    status_bar::show(ui, &self.state);
                });
        }

        // ── Central panel: 3D viewport ───────────────────────
        let mut viewport_rect = ctx.screen_rect();
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                viewport_rect = self.viewport.show(ui, &mut self.state);
            });

        // ── ExtruCut options window ──────────────────────────
        if self.state.panels.options {
            options_panel::show(ctx, viewport_rect, &mut self.state);
        }

        // ── Tool tick: input collected above drives the state machine ─
        self.state.tick();

        if let Some(tool) = &self.state.tool {
            ctx.set_cursor_icon(match tool.cursor() {
                CursorHint::Crosshair => egui::CursorIcon::Crosshair,
                CursorHint::Hand => egui::CursorIcon::Grabbing,
                CursorHint::Default => egui::CursorIcon::Default,
            });
            ctx.request_repaint();
        }
    }
}
