//! ExtruCut interactive tool
//!
//! State machine: `Main` waits for commit, cancel or a drag; `Displace`
//! follows the pointer along the extrusion axis. `transition` is a pure
//! table over (state, input frame); `ExtruCutTool` performs the resulting
//! effect. Preview geometry is rebuilt lazily in `update`, never while input
//! is being handled.

use glam::{Mat4, Vec3};
use shared::{evaluate_number, ExtruCutOptions, PanelPosition, SegmentMode};
use tracing::{debug, info};

use crate::classify::{classify, hide_region, Region};
use crate::commit::{self, CommitReport};
use crate::error::ToolError;
use crate::generator::{generate, AxisLine, ExtrusionPlan};
use crate::interaction::{drag_distance, project_pointer, snap_distance, Action, DragAnchor, InputFrame};
use crate::mesh::{HideState, HostMesh};
use crate::segments::segment_count;
use crate::state::OptionsStore;

/// Text shown in the header while the tool runs
pub const HEADER_TEXT: &str = "ExtruCut";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolState {
    Main,
    Displace,
    Committed,
    Cancelled,
}

impl ToolState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ToolState::Committed | ToolState::Cancelled)
    }
}

/// Side effect requested by a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    BeginDrag,
    UpdateDrag,
    EndDrag,
    RevertDrag,
    Commit,
    Cancel,
}

/// Pointer cursor the host should show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorHint {
    Default,
    Crosshair,
    Hand,
}

/// Transition table
pub fn transition(state: ToolState, frame: &InputFrame) -> (ToolState, Effect) {
    match state {
        ToolState::Main => {
            if frame.pressed(Action::Commit) {
                (ToolState::Committed, Effect::Commit)
            } else if frame.pressed(Action::Cancel) {
                (ToolState::Cancelled, Effect::Cancel)
            } else if frame.pressed(Action::Displace) {
                (ToolState::Displace, Effect::BeginDrag)
            } else {
                (ToolState::Main, Effect::None)
            }
        }
        ToolState::Displace => {
            if frame.released(Action::Displace) {
                (ToolState::Main, Effect::EndDrag)
            } else if frame.pressed(Action::Cancel) {
                (ToolState::Main, Effect::RevertDrag)
            } else if frame.pointer_moved {
                (ToolState::Displace, Effect::UpdateDrag)
            } else {
                (ToolState::Displace, Effect::None)
            }
        }
        terminal => (terminal, Effect::None),
    }
}

/// One running ExtruCut session over a host mesh
pub struct ExtruCutTool {
    state: ToolState,
    region: Region,
    /// Hide flags before the region was hidden
    hide_snapshot: HideState,
    world: Mat4,
    distance: f32,
    dirty: bool,
    plan: ExtrusionPlan,
    drag: Option<DragAnchor>,
    report: Option<CommitReport>,
}

impl ExtruCutTool {
    /// Tool can start: mesh in edit mode with at least one selected face
    pub fn can_start(host: &impl HostMesh) -> bool {
        host.is_edit_mode() && !host.selected_faces().is_empty()
    }

    /// Classify the selection, push an undo checkpoint and hide the region
    pub fn start(host: &mut impl HostMesh) -> Result<Self, ToolError> {
        let region = classify(&*host)?;
        host.push_undo_checkpoint(HEADER_TEXT);
        let hide_snapshot = host.hide_state();
        hide_region(host, &region)?;

        info!(
            faces = region.faces.len(),
            outer_verts = region.outer_verts.len(),
            inner_verts = region.inner_verts.len(),
            "ExtruCut started"
        );

        Ok(Self {
            state: ToolState::Main,
            world: host.world_transform(),
            region,
            hide_snapshot,
            distance: 0.0,
            dirty: true,
            plan: ExtrusionPlan::default(),
            drag: None,
            report: None,
        })
    }

    // ── Accessors ──────────────────────────────────────────────

    pub fn state(&self) -> ToolState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_terminal()
    }

    pub fn region(&self) -> &Region {
        &self.region
    }

    /// Latest preview; rebuilt by `update`
    pub fn plan(&self) -> &ExtrusionPlan {
        &self.plan
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn segments(&self) -> u32 {
        self.plan.segments
    }

    pub fn axis(&self) -> AxisLine {
        AxisLine::new(self.region.base_point, self.region.direction)
    }

    /// Mesh-local to world transform captured at start
    pub fn world_transform(&self) -> Mat4 {
        self.world
    }

    pub fn commit_report(&self) -> Option<&CommitReport> {
        self.report.as_ref()
    }

    pub fn cursor(&self) -> CursorHint {
        match self.state {
            ToolState::Main => CursorHint::Crosshair,
            ToolState::Displace => CursorHint::Hand,
            _ => CursorHint::Default,
        }
    }

    pub fn header_text(&self) -> &'static str {
        HEADER_TEXT
    }

    pub fn distance_display(&self) -> String {
        format!("{:.4}", self.distance)
    }

    pub fn length_display(options: &ExtruCutOptions) -> String {
        format!("{:.3}", options.length)
    }

    // ── Option mutators ────────────────────────────────────────

    pub fn set_distance(&mut self, value: f32) -> Result<(), ToolError> {
        if !value.is_finite() {
            return Err(ToolError::InvalidValue(format!("distance {}", value)));
        }
        self.distance = value;
        self.dirty = true;
        Ok(())
    }

    /// Distance from a numeric field ("2*0.25" is accepted)
    pub fn set_distance_expr(&mut self, input: &str) -> Result<(), ToolError> {
        let value = evaluate_number(input).map_err(|e| ToolError::InvalidValue(e.to_string()))?;
        self.set_distance(value as f32)
    }

    pub fn set_count(&mut self, store: &mut OptionsStore, value: i64) {
        store.update(|o| o.set_count(value));
        self.dirty = true;
    }

    pub fn set_length(&mut self, store: &mut OptionsStore, value: f32) -> Result<(), ToolError> {
        if value.is_nan() {
            return Err(ToolError::InvalidValue("length is not a number".into()));
        }
        store.update(|o| o.set_length(value));
        self.dirty = true;
        Ok(())
    }

    pub fn set_length_expr(&mut self, store: &mut OptionsStore, input: &str) -> Result<(), ToolError> {
        let value = evaluate_number(input).map_err(|e| ToolError::InvalidValue(e.to_string()))?;
        self.set_length(store, value as f32)
    }

    pub fn set_mode(&mut self, store: &mut OptionsStore, mode: SegmentMode) {
        store.update(|o| o.set_mode(mode));
        self.dirty = true;
    }

    /// Mode by name, case-insensitive
    pub fn set_mode_str(&mut self, store: &mut OptionsStore, name: &str) -> Result<(), ToolError> {
        let mode = SegmentMode::parse(name)
            .ok_or_else(|| ToolError::InvalidValue(format!("segment mode '{}'", name)))?;
        self.set_mode(store, mode);
        Ok(())
    }

    pub fn set_position(&mut self, store: &mut OptionsStore, position: PanelPosition) {
        store.update(|o| o.set_position(position));
        self.dirty = true;
    }

    // ── Tick ───────────────────────────────────────────────────

    /// Persist changed options, then rebuild the preview if dirty.
    /// Returns true when the preview was rebuilt.
    pub fn update(&mut self, store: &mut OptionsStore) -> bool {
        store.clean();
        if !self.dirty || self.is_finished() {
            return false;
        }
        self.recompute(store.get());
        true
    }

    fn recompute(&mut self, options: &ExtruCutOptions) {
        self.dirty = false;
        let n = segment_count(options, self.distance);
        self.plan = generate(&self.region, self.distance, n);
        debug!(
            distance = self.distance,
            segments = n,
            verts = self.plan.verts.len(),
            edges = self.plan.edges.len(),
            faces = self.plan.sides.len() + self.plan.caps.len(),
            "ExtruCut preview rebuilt"
        );
    }

    /// Advance the state machine with one input frame and perform its effect
    pub fn handle_input(
        &mut self,
        host: &mut impl HostMesh,
        frame: &InputFrame,
        options: &ExtruCutOptions,
    ) -> Effect {
        let (next, effect) = transition(self.state, frame);
        self.state = next;

        match effect {
            Effect::None => {}
            Effect::BeginDrag => {
                self.drag = Some(DragAnchor {
                    start_distance: self.distance,
                    start_point: self.pointer_point(frame),
                });
            }
            Effect::UpdateDrag => {
                if let (Some(anchor), Some(_)) = (self.drag, frame.ray) {
                    let point = self.pointer_point(frame);
                    let mut distance = drag_distance(&anchor, point, self.region.direction);
                    if frame.modifier {
                        distance = snap_distance(distance, options.effective_length());
                    }
                    self.distance = distance;
                    self.dirty = true;
                }
            }
            Effect::EndDrag => self.drag = None,
            Effect::RevertDrag => {
                if let Some(anchor) = self.drag.take() {
                    self.distance = anchor.start_distance;
                    self.dirty = true;
                }
            }
            Effect::Commit => self.commit(host, options),
            Effect::Cancel => self.cancel(host),
        }
        effect
    }

    /// Axis point under the pointer; the base point when no ray is known
    fn pointer_point(&self, frame: &InputFrame) -> Vec3 {
        match frame.ray {
            Some(ray) => project_pointer(&ray, self.region.base_point, self.region.direction, &self.world),
            None => self.region.base_point,
        }
    }

    /// Realize the preview in the host mesh
    pub fn commit(&mut self, host: &mut impl HostMesh, options: &ExtruCutOptions) {
        if self.dirty || self.plan.verts.is_empty() {
            self.recompute(options);
        }
        let resolved = commit::resolve(&self.region, &self.plan);
        self.report = Some(commit::apply(host, &resolved));
        self.state = ToolState::Committed;
        self.drag = None;
    }

    /// Revert to the start checkpoint; falls back to the hide snapshot if there is none
    pub fn cancel(&mut self, host: &mut impl HostMesh) {
        if !host.revert_checkpoint() {
            host.restore_hide_state(&self.hide_snapshot);
        }
        self.plan = ExtrusionPlan::default();
        self.drag = None;
        self.state = ToolState::Cancelled;
        info!("ExtruCut cancelled");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::interaction::InputFrame;
    use crate::mesh::{ElementRef, FaceId};
    use crate::state::MeshState;
    use crate::viewport::picking::Ray;

    fn session() -> MeshState {
        let mut state = MeshState::default();
        state.load(&fixtures::quad()).unwrap();
        state
    }

    /// Horizontal ray crossing the quad's axis (x=y=0.5) at height z
    fn ray_at(z: f32) -> Ray {
        Ray::new(Vec3::new(0.5, -10.0, z), Vec3::Y)
    }

    fn press(action: Action) -> InputFrame {
        InputFrame::default().with_press(action)
    }

    #[test]
    fn test_transition_table() {
        let idle = InputFrame::default();
        assert_eq!(transition(ToolState::Main, &idle), (ToolState::Main, Effect::None));
        assert_eq!(
            transition(ToolState::Main, &press(Action::Commit)),
            (ToolState::Committed, Effect::Commit)
        );
        assert_eq!(
            transition(ToolState::Main, &press(Action::Cancel)),
            (ToolState::Cancelled, Effect::Cancel)
        );
        assert_eq!(
            transition(ToolState::Main, &press(Action::Displace)),
            (ToolState::Displace, Effect::BeginDrag)
        );
        let moved = InputFrame::default().with_move(ray_at(1.0));
        assert_eq!(
            transition(ToolState::Displace, &moved),
            (ToolState::Displace, Effect::UpdateDrag)
        );
        assert_eq!(
            transition(ToolState::Displace, &press(Action::Cancel)),
            (ToolState::Main, Effect::RevertDrag)
        );
        let released = InputFrame::default().with_release(Action::Displace);
        assert_eq!(
            transition(ToolState::Displace, &released),
            (ToolState::Main, Effect::EndDrag)
        );
        assert_eq!(
            transition(ToolState::Committed, &press(Action::Cancel)),
            (ToolState::Committed, Effect::None)
        );
    }

    #[test]
    fn test_commit_has_priority_over_cancel() {
        let both = press(Action::Commit).with_press(Action::Cancel);
        assert_eq!(transition(ToolState::Main, &both).0, ToolState::Committed);
    }

    #[test]
    fn test_displace_ignores_commit() {
        assert_eq!(
            transition(ToolState::Displace, &press(Action::Commit)),
            (ToolState::Displace, Effect::None)
        );
    }

    #[test]
    fn test_start_hides_region_and_pushes_undo() {
        let mut host = session();
        assert!(ExtruCutTool::can_start(&host));
        let tool = ExtruCutTool::start(&mut host).unwrap();
        assert_eq!(tool.state(), ToolState::Main);
        assert_eq!(tool.cursor(), CursorHint::Crosshair);
        assert_eq!(tool.header_text(), "ExtruCut");
        assert!(host.can_undo());
        assert!(host.mesh().is_hidden(ElementRef::Face(FaceId(0))));
    }

    #[test]
    fn test_start_refused_without_selection() {
        let mut host = session();
        host.select_faces(&[]).unwrap();
        assert!(!ExtruCutTool::can_start(&host));
        assert!(matches!(ExtruCutTool::start(&mut host), Err(ToolError::EmptySelection)));
        assert!(!host.can_undo());
    }

    #[test]
    fn test_update_is_lazy() {
        let mut host = session();
        let mut store = OptionsStore::in_memory();
        let mut tool = ExtruCutTool::start(&mut host).unwrap();
        assert!(tool.update(&mut store));
        assert!(!tool.update(&mut store));
        tool.set_distance(1.0).unwrap();
        assert!(tool.is_dirty());
        assert!(tool.update(&mut store));
        assert_eq!(tool.segments(), 5);
        assert_eq!(tool.plan().verts.len(), 4 * 6);
    }

    #[test]
    fn test_drag_updates_distance_without_recompute() {
        let mut host = session();
        let mut store = OptionsStore::in_memory();
        let mut tool = ExtruCutTool::start(&mut host).unwrap();
        tool.update(&mut store);
        let options = store.get().clone();

        let begin = press(Action::Displace).with_move(ray_at(0.0));
        tool.handle_input(&mut host, &begin, &options);
        assert_eq!(tool.state(), ToolState::Displace);
        assert_eq!(tool.cursor(), CursorHint::Hand);

        let effect = tool.handle_input(&mut host, &InputFrame::default().with_move(ray_at(1.3)), &options);
        assert_eq!(effect, Effect::UpdateDrag);
        assert!((tool.distance() - 1.3).abs() < 1e-5);
        // Preview is still the old one until the next tick
        assert!(tool.is_dirty());
        assert_eq!(tool.plan().distance, 0.0);
        tool.update(&mut store);
        assert!((tool.plan().distance - 1.3).abs() < 1e-5);
    }

    #[test]
    fn test_drag_with_modifier_snaps() {
        let mut host = session();
        let mut store = OptionsStore::in_memory();
        let mut tool = ExtruCutTool::start(&mut host).unwrap();
        tool.set_length(&mut store, 0.5).unwrap();
        let options = store.get().clone();

        tool.handle_input(&mut host, &press(Action::Displace).with_move(ray_at(0.0)), &options);
        let snapped = InputFrame::default().with_move(ray_at(1.3)).with_modifier(true);
        tool.handle_input(&mut host, &snapped, &options);
        assert!((tool.distance() - 1.5).abs() < 1e-5);
    }

    #[test]
    fn test_cancel_during_drag_reverts_distance() {
        let mut host = session();
        let mut store = OptionsStore::in_memory();
        let mut tool = ExtruCutTool::start(&mut host).unwrap();
        tool.set_distance(0.4).unwrap();
        tool.update(&mut store);
        let options = store.get().clone();

        tool.handle_input(&mut host, &press(Action::Displace).with_move(ray_at(0.0)), &options);
        tool.handle_input(&mut host, &InputFrame::default().with_move(ray_at(2.0)), &options);
        assert!((tool.distance() - 2.4).abs() < 1e-5);

        let effect = tool.handle_input(&mut host, &press(Action::Cancel), &options);
        assert_eq!(effect, Effect::RevertDrag);
        assert_eq!(tool.state(), ToolState::Main);
        assert!((tool.distance() - 0.4).abs() < 1e-6);
        assert!(tool.is_dirty());
    }

    #[test]
    fn test_cancel_restores_mesh() {
        let mut host = session();
        let options = ExtruCutOptions::default();
        let mut tool = ExtruCutTool::start(&mut host).unwrap();
        tool.handle_input(&mut host, &press(Action::Cancel), &options);
        assert_eq!(tool.state(), ToolState::Cancelled);
        assert!(tool.is_finished());
        assert!(!host.mesh().is_hidden(ElementRef::Face(FaceId(0))));
        assert_eq!(host.mesh().face_count(), 1);
        assert!(tool.plan().verts.is_empty());
        assert!(!host.can_undo());
        assert!(!host.can_redo());
    }

    #[test]
    fn test_commit_recomputes_pending_changes() {
        let mut host = session();
        let mut store = OptionsStore::in_memory();
        let mut tool = ExtruCutTool::start(&mut host).unwrap();
        tool.set_count(&mut store, 2);
        tool.set_distance(2.0).unwrap();
        let options = store.get().clone();

        tool.handle_input(&mut host, &press(Action::Commit), &options);
        assert_eq!(tool.state(), ToolState::Committed);
        let report = tool.commit_report().unwrap();
        assert!(report.is_clean());
        assert_eq!(report.created_verts.len(), 8);
        assert_eq!(host.mesh().face_count(), 9);
    }

    #[test]
    fn test_option_mutators() {
        let mut host = session();
        let mut store = OptionsStore::in_memory();
        let mut tool = ExtruCutTool::start(&mut host).unwrap();
        tool.update(&mut store);

        tool.set_mode_str(&mut store, "LENGTH").unwrap();
        assert_eq!(store.get().by, SegmentMode::Length);
        assert!(tool.is_dirty());
        assert!(tool.set_mode_str(&mut store, "width").is_err());

        tool.set_length_expr(&mut store, "2*0.125").unwrap();
        assert_eq!(store.get().length, 0.25);
        tool.set_count(&mut store, -3);
        assert_eq!(store.get().count, 1);
        assert_eq!(store.get().by, SegmentMode::Count);

        tool.set_distance_expr("1.0 / 4").unwrap();
        assert_eq!(tool.distance_display(), "0.2500");
        assert!(tool.set_distance_expr("abc +").is_err());
        assert!(tool.set_distance(f32::INFINITY).is_err());
        assert_eq!(ExtruCutTool::length_display(store.get()), "0.250");
    }
}
