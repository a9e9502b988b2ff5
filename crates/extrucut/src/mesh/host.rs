use glam::{Mat4, Vec3};

use super::{EdgeId, ElementRef, FaceId, HideState, VertId};
use crate::error::MeshResult;

/// Services the ExtruCut core needs from the mesh it edits.
///
/// Queries return `None` for dead handles. Mutations report rejected
/// requests through `MeshError` and leave the mesh unchanged for that call.
pub trait HostMesh {
    /// A mesh object is active and in edit mode
    fn is_edit_mode(&self) -> bool;

    /// Selected faces in id order
    fn selected_faces(&self) -> Vec<FaceId>;

    fn face_verts(&self, f: FaceId) -> Option<Vec<VertId>>;
    fn face_edges(&self, f: FaceId) -> Option<Vec<EdgeId>>;
    fn face_normal(&self, f: FaceId) -> Option<Vec3>;
    fn edge_verts(&self, e: EdgeId) -> Option<[VertId; 2]>;
    fn edge_faces(&self, e: EdgeId) -> Option<Vec<FaceId>>;
    fn vert_position(&self, v: VertId) -> Option<Vec3>;

    fn set_hidden(&mut self, element: ElementRef, hidden: bool) -> MeshResult<()>;
    fn set_selected(&mut self, element: ElementRef, selected: bool) -> MeshResult<()>;

    fn create_vert(&mut self, position: Vec3) -> VertId;
    fn create_face(&mut self, verts: &[VertId]) -> MeshResult<FaceId>;
    fn remove_face(&mut self, f: FaceId) -> MeshResult<()>;
    fn remove_edge(&mut self, e: EdgeId) -> MeshResult<()>;
    fn remove_vert(&mut self, v: VertId) -> MeshResult<()>;

    fn recompute_normals(&mut self);
    /// Fix windings in the components touching `faces`.
    /// Returns the number of flipped faces
    fn make_normals_consistent(&mut self, faces: &[FaceId]) -> MeshResult<usize>;

    fn hide_state(&self) -> HideState;
    fn restore_hide_state(&mut self, state: &HideState);

    /// Record the current mesh so a later `undo` returns to it
    fn push_undo_checkpoint(&mut self, label: &str);
    /// Return to the last checkpoint and drop it, leaving nothing to redo.
    /// Returns false when there was no checkpoint
    fn revert_checkpoint(&mut self) -> bool;

    /// Object (local) to world transform
    fn world_transform(&self) -> Mat4 {
        Mat4::IDENTITY
    }
}
