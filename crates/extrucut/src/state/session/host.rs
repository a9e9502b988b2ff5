//! `HostMesh` implementation backed by the session mesh

use glam::{Mat4, Vec3};

use super::MeshState;
use crate::error::MeshResult;
use crate::mesh::{self, EdgeId, ElementRef, FaceId, HideState, HostMesh, VertId};

impl HostMesh for MeshState {
    fn is_edit_mode(&self) -> bool {
        self.active && self.edit_mode
    }

    fn selected_faces(&self) -> Vec<FaceId> {
        self.mesh.selected_faces()
    }

    fn face_verts(&self, f: FaceId) -> Option<Vec<VertId>> {
        self.mesh.face(f).map(|face| face.verts.clone())
    }

    fn face_edges(&self, f: FaceId) -> Option<Vec<EdgeId>> {
        self.mesh.face(f).map(|face| face.edges.clone())
    }

    fn face_normal(&self, f: FaceId) -> Option<Vec3> {
        self.mesh.face(f).map(|face| face.normal)
    }

    fn edge_verts(&self, e: EdgeId) -> Option<[VertId; 2]> {
        self.mesh.edge(e).map(|edge| edge.verts)
    }

    fn edge_faces(&self, e: EdgeId) -> Option<Vec<FaceId>> {
        self.mesh.edge(e).map(|edge| edge.faces.clone())
    }

    fn vert_position(&self, v: VertId) -> Option<Vec3> {
        self.mesh.position(v)
    }

    fn set_hidden(&mut self, element: ElementRef, hidden: bool) -> MeshResult<()> {
        self.mesh_mut().set_hidden(element, hidden)
    }

    fn set_selected(&mut self, element: ElementRef, selected: bool) -> MeshResult<()> {
        self.mesh_mut().set_selected(element, selected)
    }

    fn create_vert(&mut self, position: Vec3) -> VertId {
        self.mesh_mut().add_vertex(position)
    }

    fn create_face(&mut self, verts: &[VertId]) -> MeshResult<FaceId> {
        self.mesh_mut().add_face(verts)
    }

    fn remove_face(&mut self, f: FaceId) -> MeshResult<()> {
        self.mesh_mut().remove_face(f)
    }

    fn remove_edge(&mut self, e: EdgeId) -> MeshResult<()> {
        self.mesh_mut().remove_edge(e)
    }

    fn remove_vert(&mut self, v: VertId) -> MeshResult<()> {
        self.mesh_mut().remove_vertex(v)
    }

    fn recompute_normals(&mut self) {
        self.mesh_mut().recompute_normals();
    }

    fn make_normals_consistent(&mut self, faces: &[FaceId]) -> MeshResult<usize> {
        mesh::make_normals_consistent(self.mesh_mut(), faces)
    }

    fn hide_state(&self) -> HideState {
        self.mesh.hide_state()
    }

    fn restore_hide_state(&mut self, state: &HideState) {
        self.mesh_mut().restore_hide_state(state);
    }

    fn push_undo_checkpoint(&mut self, label: &str) {
        self.save_undo(label);
    }

    fn revert_checkpoint(&mut self) -> bool {
        MeshState::revert_checkpoint(self)
    }

    fn world_transform(&self) -> Mat4 {
        self.mesh.world_transform
    }
}
