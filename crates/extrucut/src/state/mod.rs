pub mod options;
pub mod session;

use shared::{ExtruCutOptions, MeshDescription, PanelPosition, SegmentMode};
use tracing::{info, warn};

pub use options::OptionsStore;
pub use session::MeshState;

use crate::commit::CommitReport;
use crate::error::ToolError;
use crate::interaction::{InputEvent, InteractionController};
use crate::tool::{Effect, ExtruCutTool, ToolState};

/// Panel visibility flags
pub struct PanelVisibility {
    pub options: bool,
    pub status_bar: bool,
}

impl Default for PanelVisibility {
    fn default() -> Self {
        Self {
            options: true,
            status_bar: true,
        }
    }
}

/// Combined application state
pub struct AppState {
    pub mesh: MeshState,
    pub options: OptionsStore,
    /// Running ExtruCut session, if any
    pub tool: Option<ExtruCutTool>,
    pub controller: InteractionController,
    pub panels: PanelVisibility,
    /// Messages for the status bar, newest last
    pub notices: Vec<String>,
    /// Outcome of the most recent commit
    pub last_commit: Option<CommitReport>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_options(OptionsStore::load())
    }
}

impl AppState {
    pub fn with_options(options: OptionsStore) -> Self {
        Self {
            mesh: MeshState::default(),
            options,
            tool: None,
            controller: InteractionController::default(),
            panels: PanelVisibility::default(),
            notices: Vec::new(),
            last_commit: None,
        }
    }

    /// Replace the mesh; refused while the tool runs
    pub fn load_mesh(&mut self, desc: &MeshDescription) -> Result<(), String> {
        if self.tool.is_some() {
            return Err("Cannot load a mesh while ExtruCut is running".into());
        }
        self.mesh.load(desc).map_err(|e| e.to_string())
    }

    pub fn is_tool_active(&self) -> bool {
        self.tool.is_some()
    }

    /// Tool can start on the current mesh and selection
    pub fn can_start(&self) -> bool {
        self.tool.is_none() && ExtruCutTool::can_start(&self.mesh)
    }

    pub fn start_tool(&mut self) -> Result<(), ToolError> {
        if self.tool.is_some() {
            return Err(ToolError::AlreadyActive);
        }
        let mut tool = ExtruCutTool::start(&mut self.mesh)?;
        tool.update(&mut self.options);
        // Drop presses collected before the tool existed
        self.controller.take_frame();
        self.tool = Some(tool);
        Ok(())
    }

    /// Forward a raw input event to the controller
    pub fn input(&mut self, event: InputEvent) {
        self.controller.handle(event);
    }

    /// One frame: feed collected input to the tool, rebuild the preview,
    /// tear the tool down once it reached a terminal state.
    pub fn tick(&mut self) -> Effect {
        let Some(tool) = self.tool.as_mut() else {
            self.controller.take_frame();
            return Effect::None;
        };
        let frame = self.controller.take_frame();
        let effect = tool.handle_input(&mut self.mesh, &frame, self.options.get());
        tool.update(&mut self.options);
        if tool.is_finished() {
            self.finish_tool();
        }
        effect
    }

    /// Commit the running tool (toolbar / Enter outside the viewport)
    pub fn commit_tool(&mut self) -> Result<(), ToolError> {
        let tool = self.tool.as_mut().ok_or(ToolError::NotActive)?;
        tool.commit(&mut self.mesh, self.options.get());
        self.finish_tool();
        Ok(())
    }

    pub fn cancel_tool(&mut self) -> Result<(), ToolError> {
        let tool = self.tool.as_mut().ok_or(ToolError::NotActive)?;
        tool.cancel(&mut self.mesh);
        self.finish_tool();
        Ok(())
    }

    fn finish_tool(&mut self) {
        let Some(tool) = self.tool.take() else { return };
        if let Err(e) = self.options.save() {
            warn!("Failed to save options: {e}");
        }
        match tool.state() {
            ToolState::Committed => {
                if let Some(report) = tool.commit_report() {
                    self.notices.push(format!(
                        "ExtruCut: {} faces created, {} removed",
                        report.created_faces.len(),
                        report.removed_faces
                    ));
                    for failure in &report.failures {
                        self.notices.push(format!("{:?} #{}: {}", failure.stage, failure.index, failure.error));
                    }
                    self.last_commit = Some(report.clone());
                }
            }
            ToolState::Cancelled => self.notices.push("ExtruCut cancelled".to_string()),
            _ => {}
        }
        info!(state = ?tool.state(), "ExtruCut finished");
    }

    // ── Option forwarding ──────────────────────────────────────

    pub fn options(&self) -> &ExtruCutOptions {
        self.options.get()
    }

    pub fn set_distance_expr(&mut self, input: &str) -> Result<(), ToolError> {
        let tool = self.tool.as_mut().ok_or(ToolError::NotActive)?;
        tool.set_distance_expr(input)
    }

    pub fn set_distance(&mut self, value: f32) -> Result<(), ToolError> {
        let tool = self.tool.as_mut().ok_or(ToolError::NotActive)?;
        tool.set_distance(value)
    }

    pub fn set_count(&mut self, value: i64) {
        match self.tool.as_mut() {
            Some(tool) => tool.set_count(&mut self.options, value),
            None => {
                self.options.update(|o| o.set_count(value));
            }
        }
    }

    pub fn set_length_expr(&mut self, input: &str) -> Result<(), ToolError> {
        match self.tool.as_mut() {
            Some(tool) => tool.set_length_expr(&mut self.options, input),
            None => {
                let value = shared::evaluate_number(input)
                    .map_err(|e| ToolError::InvalidValue(e.to_string()))?;
                self.options.update(|o| o.set_length(value as f32));
                Ok(())
            }
        }
    }

    pub fn set_mode(&mut self, mode: SegmentMode) {
        match self.tool.as_mut() {
            Some(tool) => tool.set_mode(&mut self.options, mode),
            None => {
                self.options.update(|o| o.set_mode(mode));
            }
        }
    }

    pub fn set_position(&mut self, position: PanelPosition) {
        match self.tool.as_mut() {
            Some(tool) => tool.set_position(&mut self.options, position),
            None => {
                self.options.update(|o| o.set_position(position));
            }
        }
    }

    // ── History ────────────────────────────────────────────────

    /// Undo is unavailable while the tool runs; it owns the checkpoint
    pub fn undo(&mut self) -> bool {
        self.tool.is_none() && self.mesh.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.tool.is_none() && self.mesh.redo()
    }
}
