//! Undo/redo functionality

use super::{MeshState, Snapshot};

/// Maximum number of undo steps kept
const MAX_UNDO: usize = 100;

impl MeshState {
    /// Undo last change
    pub fn undo(&mut self) -> bool {
        let Some(prev) = self.undo_stack.pop() else {
            return false;
        };
        tracing::debug!(label = %prev.label, "Undo");
        self.redo_stack.push(Snapshot {
            label: prev.label.clone(),
            mesh: self.mesh.clone(),
        });
        self.mesh = prev.mesh;
        self.version += 1;
        true
    }

    /// Redo last undone change
    pub fn redo(&mut self) -> bool {
        let Some(next) = self.redo_stack.pop() else {
            return false;
        };
        tracing::debug!(label = %next.label, "Redo");
        self.undo_stack.push(Snapshot {
            label: next.label.clone(),
            mesh: self.mesh.clone(),
        });
        self.mesh = next.mesh;
        self.version += 1;
        true
    }

    /// Return to the last checkpoint without keeping a redo entry
    pub(crate) fn revert_checkpoint(&mut self) -> bool {
        let Some(prev) = self.undo_stack.pop() else {
            return false;
        };
        tracing::debug!(label = %prev.label, "Revert checkpoint");
        self.mesh = prev.mesh;
        self.version += 1;
        true
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Label of the step `undo` would revert
    pub fn undo_label(&self) -> Option<&str> {
        self.undo_stack.last().map(|s| s.label.as_str())
    }

    /// Save current mesh to undo stack
    pub(crate) fn save_undo(&mut self, label: &str) {
        self.undo_stack.push(Snapshot {
            label: label.to_string(),
            mesh: self.mesh.clone(),
        });
        if self.undo_stack.len() > MAX_UNDO {
            self.undo_stack.remove(0);
        }
        self.redo_stack.clear();
    }
}
