//! Mesh editing session
//!
//! Owns the edited mesh together with its undo/redo history. This is the
//! host the ExtruCut tool talks to.

mod history;
mod host;
mod persistence;

use shared::MeshDescription;

use crate::error::MeshResult;
use crate::mesh::{EditMesh, FaceId};

/// Undo stack entry
#[derive(Clone)]
pub(crate) struct Snapshot {
    pub(crate) label: String,
    pub(crate) mesh: EditMesh,
}

/// Edited mesh with undo/redo history
pub struct MeshState {
    mesh: EditMesh,
    /// A mesh object is loaded
    active: bool,
    /// Edit mode is on for the loaded mesh
    edit_mode: bool,
    /// Undo stack - previous meshes
    pub(crate) undo_stack: Vec<Snapshot>,
    /// Redo stack - undone meshes
    pub(crate) redo_stack: Vec<Snapshot>,
    /// Monotonically increasing version counter for cache invalidation
    pub(crate) version: u64,
}

impl Default for MeshState {
    fn default() -> Self {
        Self {
            mesh: EditMesh::new(),
            active: false,
            edit_mode: false,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            version: 0,
        }
    }
}

impl MeshState {
    /// Current mesh version (increments on every mutation)
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn mesh(&self) -> &EditMesh {
        &self.mesh
    }

    /// Mutable mesh access; bumps the version
    pub fn mesh_mut(&mut self) -> &mut EditMesh {
        self.version += 1;
        &mut self.mesh
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Replace the mesh and enter edit mode. History is cleared.
    pub fn load(&mut self, desc: &MeshDescription) -> MeshResult<()> {
        self.mesh = EditMesh::from_description(desc)?;
        self.active = true;
        self.edit_mode = true;
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.version += 1;
        Ok(())
    }

    pub fn set_edit_mode(&mut self, on: bool) {
        if self.edit_mode != on {
            self.edit_mode = on;
            self.version += 1;
        }
    }

    /// Replace the face selection
    pub fn select_faces(&mut self, faces: &[FaceId]) -> MeshResult<()> {
        self.mesh.select_faces(faces)?;
        self.version += 1;
        Ok(())
    }

    /// Toggle one face in the selection (click with modifier)
    pub fn toggle_face(&mut self, face: FaceId) -> MeshResult<()> {
        let mut selected = self.mesh.selected_faces();
        if let Some(pos) = selected.iter().position(|&f| f == face) {
            selected.remove(pos);
        } else {
            selected.push(face);
        }
        self.select_faces(&selected)
    }

    /// Bump version without saving undo
    pub fn notify_mutated(&mut self) {
        self.version += 1;
    }
}
