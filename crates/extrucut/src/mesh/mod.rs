//! Editable polygon mesh with explicit vertex/edge/face adjacency.
//!
//! `EditMesh` is the reference host the tool edits. Elements live in
//! append-only arenas: removing an element leaves a tombstone and ids are
//! never reused, so iterating live ids always follows creation order.
//!
//! Edges are created implicitly when a face needs them. Removal cascades the
//! way a winged-edge editor does it: removing a face keeps its edges,
//! removing an edge removes its faces, removing a vertex removes its edges
//! (and therefore their faces).

mod consistency;
mod host;

use std::collections::BTreeSet;
use std::fmt;

use glam::{Mat4, Vec3};
use shared::MeshDescription;

use crate::error::{MeshError, MeshResult};

pub use consistency::make_normals_consistent;
pub use host::HostMesh;

/// Handle of a vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertId(pub u32);

/// Handle of an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(pub u32);

/// Handle of a face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FaceId(pub u32);

impl fmt::Display for VertId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}

impl fmt::Display for FaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "f{}", self.0)
    }
}

/// Reference to any mesh element, used for per-element flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementRef {
    Vert(VertId),
    Edge(EdgeId),
    Face(FaceId),
}

#[derive(Debug, Clone)]
pub struct Vertex {
    pub position: Vec3,
    /// Edges using this vertex
    pub edges: Vec<EdgeId>,
    pub selected: bool,
    pub hidden: bool,
}

#[derive(Debug, Clone)]
pub struct Edge {
    pub verts: [VertId; 2],
    /// Faces using this edge
    pub faces: Vec<FaceId>,
    pub selected: bool,
    pub hidden: bool,
}

#[derive(Debug, Clone)]
pub struct Face {
    /// Ordered vertex loop
    pub verts: Vec<VertId>,
    /// `edges[i]` joins `verts[i]` and `verts[i + 1]` (cyclic)
    pub edges: Vec<EdgeId>,
    pub normal: Vec3,
    pub selected: bool,
    pub hidden: bool,
}

/// Snapshot of the hidden flags of every live element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HideState {
    hidden: BTreeSet<ElementRef>,
}

impl HideState {
    pub fn is_hidden(&self, element: ElementRef) -> bool {
        self.hidden.contains(&element)
    }

    pub fn len(&self) -> usize {
        self.hidden.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hidden.is_empty()
    }
}

/// Polygon mesh with adjacency, selection and hide flags.
#[derive(Debug, Clone, Default)]
pub struct EditMesh {
    verts: Vec<Option<Vertex>>,
    edges: Vec<Option<Edge>>,
    faces: Vec<Option<Face>>,
    /// Object (local) to world transform
    pub world_transform: Mat4,
}

impl EditMesh {
    pub fn new() -> Self {
        Self {
            world_transform: Mat4::IDENTITY,
            ..Default::default()
        }
    }

    // ── Element access ─────────────────────────────────────────

    pub fn vertex(&self, v: VertId) -> Option<&Vertex> {
        self.verts.get(v.0 as usize).and_then(Option::as_ref)
    }

    pub fn edge(&self, e: EdgeId) -> Option<&Edge> {
        self.edges.get(e.0 as usize).and_then(Option::as_ref)
    }

    pub fn face(&self, f: FaceId) -> Option<&Face> {
        self.faces.get(f.0 as usize).and_then(Option::as_ref)
    }

    fn vertex_mut(&mut self, v: VertId) -> MeshResult<&mut Vertex> {
        self.verts
            .get_mut(v.0 as usize)
            .and_then(Option::as_mut)
            .ok_or(MeshError::DeadVertex(v))
    }

    fn edge_mut(&mut self, e: EdgeId) -> MeshResult<&mut Edge> {
        self.edges
            .get_mut(e.0 as usize)
            .and_then(Option::as_mut)
            .ok_or(MeshError::DeadEdge(e))
    }

    fn face_mut(&mut self, f: FaceId) -> MeshResult<&mut Face> {
        self.faces
            .get_mut(f.0 as usize)
            .and_then(Option::as_mut)
            .ok_or(MeshError::DeadFace(f))
    }

    /// Live vertex ids in creation order
    pub fn vert_ids(&self) -> impl Iterator<Item = VertId> + '_ {
        self.verts
            .iter()
            .enumerate()
            .filter(|(_, v)| v.is_some())
            .map(|(i, _)| VertId(i as u32))
    }

    /// Live edge ids in creation order
    pub fn edge_ids(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.edges
            .iter()
            .enumerate()
            .filter(|(_, e)| e.is_some())
            .map(|(i, _)| EdgeId(i as u32))
    }

    /// Live face ids in creation order
    pub fn face_ids(&self) -> impl Iterator<Item = FaceId> + '_ {
        self.faces
            .iter()
            .enumerate()
            .filter(|(_, f)| f.is_some())
            .map(|(i, _)| FaceId(i as u32))
    }

    pub fn vertex_count(&self) -> usize {
        self.verts.iter().filter(|v| v.is_some()).count()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.iter().filter(|e| e.is_some()).count()
    }

    pub fn face_count(&self) -> usize {
        self.faces.iter().filter(|f| f.is_some()).count()
    }

    pub fn contains(&self, element: ElementRef) -> bool {
        match element {
            ElementRef::Vert(v) => self.vertex(v).is_some(),
            ElementRef::Edge(e) => self.edge(e).is_some(),
            ElementRef::Face(f) => self.face(f).is_some(),
        }
    }

    pub fn position(&self, v: VertId) -> Option<Vec3> {
        self.vertex(v).map(|v| v.position)
    }

    /// Edge joining `a` and `b` in either direction
    pub fn find_edge(&self, a: VertId, b: VertId) -> Option<EdgeId> {
        let vert = self.vertex(a)?;
        vert.edges.iter().copied().find(|&e| {
            self.edge(e)
                .is_some_and(|edge| edge.verts == [a, b] || edge.verts == [b, a])
        })
    }

    /// Face whose vertex set equals `verts` (order-insensitive)
    pub fn find_face(&self, verts: &[VertId]) -> Option<FaceId> {
        let wanted: BTreeSet<VertId> = verts.iter().copied().collect();
        let first = *verts.first()?;
        let vert = self.vertex(first)?;
        let mut candidates: BTreeSet<FaceId> = BTreeSet::new();
        for &e in &vert.edges {
            if let Some(edge) = self.edge(e) {
                candidates.extend(edge.faces.iter().copied());
            }
        }
        candidates.into_iter().find(|&f| {
            self.face(f).is_some_and(|face| {
                face.verts.len() == verts.len()
                    && face.verts.iter().copied().collect::<BTreeSet<_>>() == wanted
            })
        })
    }

    // ── Creation ───────────────────────────────────────────────

    pub fn add_vertex(&mut self, position: Vec3) -> VertId {
        let id = VertId(self.verts.len() as u32);
        self.verts.push(Some(Vertex {
            position,
            edges: Vec::new(),
            selected: false,
            hidden: false,
        }));
        id
    }

    /// Edge between `a` and `b`, created if missing
    pub fn add_edge(&mut self, a: VertId, b: VertId) -> MeshResult<EdgeId> {
        if a == b {
            return Err(MeshError::RepeatedVertex(a));
        }
        self.vertex(a).ok_or(MeshError::DeadVertex(a))?;
        self.vertex(b).ok_or(MeshError::DeadVertex(b))?;
        if let Some(existing) = self.find_edge(a, b) {
            return Ok(existing);
        }
        let id = EdgeId(self.edges.len() as u32);
        self.edges.push(Some(Edge {
            verts: [a, b],
            faces: Vec::new(),
            selected: false,
            hidden: false,
        }));
        self.vertex_mut(a)?.edges.push(id);
        self.vertex_mut(b)?.edges.push(id);
        Ok(id)
    }

    /// Face over an ordered vertex loop. Missing edges are created.
    pub fn add_face(&mut self, verts: &[VertId]) -> MeshResult<FaceId> {
        if verts.len() < 3 {
            return Err(MeshError::TooFewVertices(verts.len()));
        }
        let mut seen = BTreeSet::new();
        for &v in verts {
            self.vertex(v).ok_or(MeshError::DeadVertex(v))?;
            if !seen.insert(v) {
                return Err(MeshError::RepeatedVertex(v));
            }
        }
        if let Some(existing) = self.find_face(verts) {
            return Err(MeshError::DuplicateFace(existing));
        }

        let id = FaceId(self.faces.len() as u32);
        let mut edges = Vec::with_capacity(verts.len());
        for i in 0..verts.len() {
            let e = self.add_edge(verts[i], verts[(i + 1) % verts.len()])?;
            self.edge_mut(e)?.faces.push(id);
            edges.push(e);
        }
        let normal = self.loop_normal(verts);
        self.faces.push(Some(Face {
            verts: verts.to_vec(),
            edges,
            normal,
            selected: false,
            hidden: false,
        }));
        Ok(id)
    }

    // ── Removal ────────────────────────────────────────────────

    /// Remove a face, keeping its edges and vertices
    pub fn remove_face(&mut self, f: FaceId) -> MeshResult<()> {
        let face = self
            .faces
            .get_mut(f.0 as usize)
            .and_then(Option::take)
            .ok_or(MeshError::DeadFace(f))?;
        for e in face.edges {
            if let Ok(edge) = self.edge_mut(e) {
                edge.faces.retain(|&x| x != f);
            }
        }
        Ok(())
    }

    /// Remove an edge together with the faces using it
    pub fn remove_edge(&mut self, e: EdgeId) -> MeshResult<()> {
        let faces = self.edge(e).ok_or(MeshError::DeadEdge(e))?.faces.clone();
        for f in faces {
            self.remove_face(f)?;
        }
        let edge = self
            .edges
            .get_mut(e.0 as usize)
            .and_then(Option::take)
            .ok_or(MeshError::DeadEdge(e))?;
        for v in edge.verts {
            if let Ok(vert) = self.vertex_mut(v) {
                vert.edges.retain(|&x| x != e);
            }
        }
        Ok(())
    }

    /// Remove a vertex together with its edges and their faces
    pub fn remove_vertex(&mut self, v: VertId) -> MeshResult<()> {
        let edges = self.vertex(v).ok_or(MeshError::DeadVertex(v))?.edges.clone();
        for e in edges {
            self.remove_edge(e)?;
        }
        self.verts[v.0 as usize] = None;
        Ok(())
    }

    // ── Flags ──────────────────────────────────────────────────

    pub fn set_hidden(&mut self, element: ElementRef, hidden: bool) -> MeshResult<()> {
        match element {
            ElementRef::Vert(v) => self.vertex_mut(v)?.hidden = hidden,
            ElementRef::Edge(e) => self.edge_mut(e)?.hidden = hidden,
            ElementRef::Face(f) => self.face_mut(f)?.hidden = hidden,
        }
        Ok(())
    }

    pub fn set_selected(&mut self, element: ElementRef, selected: bool) -> MeshResult<()> {
        match element {
            ElementRef::Vert(v) => self.vertex_mut(v)?.selected = selected,
            ElementRef::Edge(e) => self.edge_mut(e)?.selected = selected,
            ElementRef::Face(f) => self.face_mut(f)?.selected = selected,
        }
        Ok(())
    }

    pub fn is_hidden(&self, element: ElementRef) -> bool {
        match element {
            ElementRef::Vert(v) => self.vertex(v).is_some_and(|x| x.hidden),
            ElementRef::Edge(e) => self.edge(e).is_some_and(|x| x.hidden),
            ElementRef::Face(f) => self.face(f).is_some_and(|x| x.hidden),
        }
    }

    pub fn is_selected(&self, element: ElementRef) -> bool {
        match element {
            ElementRef::Vert(v) => self.vertex(v).is_some_and(|x| x.selected),
            ElementRef::Edge(e) => self.edge(e).is_some_and(|x| x.selected),
            ElementRef::Face(f) => self.face(f).is_some_and(|x| x.selected),
        }
    }

    /// Selected faces in id order
    pub fn selected_faces(&self) -> Vec<FaceId> {
        self.face_ids()
            .filter(|&f| self.face(f).is_some_and(|face| face.selected))
            .collect()
    }

    /// Select exactly the given faces (and their vertices and edges)
    pub fn select_faces(&mut self, faces: &[FaceId]) -> MeshResult<()> {
        self.clear_selection();
        for &f in faces {
            let (verts, edges) = {
                let face = self.face(f).ok_or(MeshError::DeadFace(f))?;
                (face.verts.clone(), face.edges.clone())
            };
            self.face_mut(f)?.selected = true;
            for v in verts {
                self.vertex_mut(v)?.selected = true;
            }
            for e in edges {
                self.edge_mut(e)?.selected = true;
            }
        }
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        for v in self.verts.iter_mut().flatten() {
            v.selected = false;
        }
        for e in self.edges.iter_mut().flatten() {
            e.selected = false;
        }
        for f in self.faces.iter_mut().flatten() {
            f.selected = false;
        }
    }

    pub fn hide_state(&self) -> HideState {
        let mut hidden = BTreeSet::new();
        for v in self.vert_ids() {
            if self.is_hidden(ElementRef::Vert(v)) {
                hidden.insert(ElementRef::Vert(v));
            }
        }
        for e in self.edge_ids() {
            if self.is_hidden(ElementRef::Edge(e)) {
                hidden.insert(ElementRef::Edge(e));
            }
        }
        for f in self.face_ids() {
            if self.is_hidden(ElementRef::Face(f)) {
                hidden.insert(ElementRef::Face(f));
            }
        }
        HideState { hidden }
    }

    /// Apply a hide snapshot; elements created after the snapshot become visible
    pub fn restore_hide_state(&mut self, state: &HideState) {
        for (i, v) in self.verts.iter_mut().enumerate() {
            if let Some(v) = v {
                v.hidden = state.is_hidden(ElementRef::Vert(VertId(i as u32)));
            }
        }
        for (i, e) in self.edges.iter_mut().enumerate() {
            if let Some(e) = e {
                e.hidden = state.is_hidden(ElementRef::Edge(EdgeId(i as u32)));
            }
        }
        for (i, f) in self.faces.iter_mut().enumerate() {
            if let Some(f) = f {
                f.hidden = state.is_hidden(ElementRef::Face(FaceId(i as u32)));
            }
        }
    }

    // ── Geometry ───────────────────────────────────────────────

    /// Newell normal of a vertex loop (zero for degenerate loops)
    fn loop_normal(&self, verts: &[VertId]) -> Vec3 {
        let mut n = Vec3::ZERO;
        for i in 0..verts.len() {
            let (Some(a), Some(b)) = (
                self.position(verts[i]),
                self.position(verts[(i + 1) % verts.len()]),
            ) else {
                continue;
            };
            n.x += (a.y - b.y) * (a.z + b.z);
            n.y += (a.z - b.z) * (a.x + b.x);
            n.z += (a.x - b.x) * (a.y + b.y);
        }
        n.normalize_or_zero()
    }

    pub fn recompute_face_normal(&mut self, f: FaceId) -> MeshResult<()> {
        let verts = self.face(f).ok_or(MeshError::DeadFace(f))?.verts.clone();
        let normal = self.loop_normal(&verts);
        self.face_mut(f)?.normal = normal;
        Ok(())
    }

    pub fn recompute_normals(&mut self) {
        let ids: Vec<FaceId> = self.face_ids().collect();
        for f in ids {
            let _ = self.recompute_face_normal(f);
        }
    }

    /// Reverse the winding of a face
    pub fn flip_face(&mut self, f: FaceId) -> MeshResult<()> {
        let face = self.face_mut(f)?;
        face.verts.reverse();
        // edges[i] joined verts[i]..verts[i+1]; after reversal the edge list
        // rotates by one as well
        face.edges.reverse();
        face.edges.rotate_left(1);
        face.normal = -face.normal;
        Ok(())
    }

    pub fn face_centroid(&self, f: FaceId) -> Option<Vec3> {
        let face = self.face(f)?;
        let sum: Vec3 = face.verts.iter().filter_map(|&v| self.position(v)).sum();
        Some(sum / face.verts.len() as f32)
    }

    /// Signed volume of the given faces (fan-triangulated)
    pub fn signed_volume(&self, faces: &[FaceId]) -> f32 {
        let mut volume = 0.0;
        for &f in faces {
            let Some(face) = self.face(f) else { continue };
            let pts: Vec<Vec3> = face.verts.iter().filter_map(|&v| self.position(v)).collect();
            for i in 1..pts.len().saturating_sub(1) {
                volume += pts[0].dot(pts[i].cross(pts[i + 1]));
            }
        }
        volume / 6.0
    }

    /// Does the face traverse `a -> b` as consecutive loop vertices?
    pub fn face_has_directed_edge(&self, f: FaceId, a: VertId, b: VertId) -> bool {
        self.face(f).is_some_and(|face| {
            let n = face.verts.len();
            (0..n).any(|i| face.verts[i] == a && face.verts[(i + 1) % n] == b)
        })
    }

    // ── Conversion ─────────────────────────────────────────────

    /// Build from the JSON description; `selected_faces` become selected faces
    pub fn from_description(desc: &MeshDescription) -> MeshResult<Self> {
        let mut mesh = Self::new();
        let verts: Vec<VertId> = desc
            .positions
            .iter()
            .map(|p| mesh.add_vertex(Vec3::from_array(*p)))
            .collect();
        let mut faces = Vec::with_capacity(desc.faces.len());
        for (fi, face) in desc.faces.iter().enumerate() {
            let mut loop_ids = Vec::with_capacity(face.len());
            for &index in face {
                let v = verts
                    .get(index as usize)
                    .copied()
                    .ok_or(MeshError::InvalidVertexIndex {
                        face: fi,
                        index,
                        count: verts.len(),
                    })?;
                loop_ids.push(v);
            }
            faces.push(mesh.add_face(&loop_ids)?);
        }
        let selected: Vec<FaceId> = desc
            .selected_faces
            .iter()
            .filter_map(|&i| faces.get(i as usize).copied())
            .collect();
        mesh.select_faces(&selected)?;
        Ok(mesh)
    }

    /// Compact description of the live geometry (ids are renumbered)
    pub fn to_description(&self) -> MeshDescription {
        let mut remap = vec![u32::MAX; self.verts.len()];
        let mut positions = Vec::with_capacity(self.vertex_count());
        for v in self.vert_ids() {
            remap[v.0 as usize] = positions.len() as u32;
            if let Some(p) = self.position(v) {
                positions.push(p.to_array());
            }
        }
        let mut faces = Vec::with_capacity(self.face_count());
        let mut selected_faces = Vec::new();
        for f in self.face_ids() {
            let Some(face) = self.face(f) else { continue };
            if face.selected {
                selected_faces.push(faces.len() as u32);
            }
            faces.push(face.verts.iter().map(|v| remap[v.0 as usize]).collect());
        }
        MeshDescription {
            positions,
            faces,
            selected_faces,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad_mesh() -> (EditMesh, [VertId; 4], FaceId) {
        let mut m = EditMesh::new();
        let a = m.add_vertex(Vec3::new(0.0, 0.0, 0.0));
        let b = m.add_vertex(Vec3::new(1.0, 0.0, 0.0));
        let c = m.add_vertex(Vec3::new(1.0, 1.0, 0.0));
        let d = m.add_vertex(Vec3::new(0.0, 1.0, 0.0));
        let f = m.add_face(&[a, b, c, d]).unwrap();
        (m, [a, b, c, d], f)
    }

    #[test]
    fn test_add_face_creates_edges() {
        let (m, [a, b, c, d], f) = quad_mesh();
        assert_eq!(m.vertex_count(), 4);
        assert_eq!(m.edge_count(), 4);
        assert_eq!(m.face_count(), 1);
        assert!(m.find_edge(a, b).is_some());
        assert!(m.find_edge(d, a).is_some());
        assert!(m.find_edge(a, c).is_none());
        let face = m.face(f).unwrap();
        assert_eq!(face.edges.len(), 4);
        assert_eq!(face.edges[0], m.find_edge(a, b).unwrap());
    }

    #[test]
    fn test_face_normal_follows_winding() {
        let (m, _, f) = quad_mesh();
        let n = m.face(f).unwrap().normal;
        assert!((n - Vec3::Z).length() < 1e-6);
    }

    #[test]
    fn test_shared_edge_is_reused() {
        let (mut m, [_, b, c, _], _) = quad_mesh();
        let e = m.add_vertex(Vec3::new(2.0, 0.0, 0.0));
        let g = m.add_vertex(Vec3::new(2.0, 1.0, 0.0));
        let f2 = m.add_face(&[b, e, g, c]).unwrap();
        assert_eq!(m.edge_count(), 7);
        let shared = m.find_edge(b, c).unwrap();
        assert_eq!(m.edge(shared).unwrap().faces.len(), 2);
        assert!(m.edge(shared).unwrap().faces.contains(&f2));
    }

    #[test]
    fn test_add_face_rejections() {
        let (mut m, [a, b, c, d], f) = quad_mesh();
        assert_eq!(m.add_face(&[a, b]), Err(MeshError::TooFewVertices(2)));
        assert_eq!(m.add_face(&[a, b, a]), Err(MeshError::RepeatedVertex(a)));
        assert_eq!(m.add_face(&[d, c, b, a]), Err(MeshError::DuplicateFace(f)));
        assert_eq!(
            m.add_face(&[a, b, VertId(99)]),
            Err(MeshError::DeadVertex(VertId(99)))
        );
        assert_eq!(m.face_count(), 1);
    }

    #[test]
    fn test_remove_face_keeps_edges() {
        let (mut m, _, f) = quad_mesh();
        m.remove_face(f).unwrap();
        assert_eq!(m.face_count(), 0);
        assert_eq!(m.edge_count(), 4);
        for e in m.edge_ids() {
            assert!(m.edge(e).unwrap().faces.is_empty());
        }
        assert_eq!(m.remove_face(f), Err(MeshError::DeadFace(f)));
    }

    #[test]
    fn test_remove_edge_removes_faces() {
        let (mut m, [a, b, _, _], _) = quad_mesh();
        let e = m.find_edge(a, b).unwrap();
        m.remove_edge(e).unwrap();
        assert_eq!(m.face_count(), 0);
        assert_eq!(m.edge_count(), 3);
        assert!(!m.vertex(a).unwrap().edges.contains(&e));
    }

    #[test]
    fn test_remove_vertex_cascades() {
        let (mut m, [a, ..], _) = quad_mesh();
        m.remove_vertex(a).unwrap();
        assert_eq!(m.vertex_count(), 3);
        assert_eq!(m.edge_count(), 2);
        assert_eq!(m.face_count(), 0);
    }

    #[test]
    fn test_ids_not_reused() {
        let (mut m, [a, ..], _) = quad_mesh();
        m.remove_vertex(a).unwrap();
        let v = m.add_vertex(Vec3::ONE);
        assert_eq!(v, VertId(4));
        assert_eq!(m.vert_ids().collect::<Vec<_>>(), vec![VertId(1), VertId(2), VertId(3), VertId(4)]);
    }

    #[test]
    fn test_flip_face_keeps_edge_alignment() {
        let (mut m, [a, b, _, _], f) = quad_mesh();
        m.flip_face(f).unwrap();
        let face = m.face(f).unwrap().clone();
        for i in 0..face.verts.len() {
            let e = m.edge(face.edges[i]).unwrap();
            let next = face.verts[(i + 1) % face.verts.len()];
            assert!(e.verts.contains(&face.verts[i]) && e.verts.contains(&next));
        }
        assert!(m.face_has_directed_edge(f, b, a));
        assert!((face.normal + Vec3::Z).length() < 1e-6);
    }

    #[test]
    fn test_hide_state_snapshot_restore() {
        let (mut m, [a, ..], f) = quad_mesh();
        let before = m.hide_state();
        m.set_hidden(ElementRef::Face(f), true).unwrap();
        m.set_hidden(ElementRef::Vert(a), true).unwrap();
        assert_eq!(m.hide_state().len(), 2);
        m.restore_hide_state(&before);
        assert!(!m.is_hidden(ElementRef::Face(f)));
        assert!(!m.is_hidden(ElementRef::Vert(a)));
    }

    #[test]
    fn test_select_faces_selects_boundary_elements() {
        let (mut m, [a, b, ..], f) = quad_mesh();
        m.select_faces(&[f]).unwrap();
        assert_eq!(m.selected_faces(), vec![f]);
        assert!(m.is_selected(ElementRef::Vert(a)));
        assert!(m.is_selected(ElementRef::Edge(m.find_edge(a, b).unwrap())));
        m.clear_selection();
        assert!(m.selected_faces().is_empty());
    }

    #[test]
    fn test_description_roundtrip_compacts_ids() {
        let (mut m, [a, ..], _) = quad_mesh();
        m.remove_vertex(a).unwrap();
        let v = m.add_vertex(Vec3::new(0.5, 0.5, 1.0));
        let verts: Vec<VertId> = m.vert_ids().collect();
        m.add_face(&[verts[0], verts[1], v]).unwrap();
        let desc = m.to_description();
        assert_eq!(desc.positions.len(), 4);
        assert_eq!(desc.faces, vec![vec![0, 1, 3]]);

        let back = EditMesh::from_description(&desc).unwrap();
        assert_eq!(back.vertex_count(), 4);
        assert_eq!(back.face_count(), 1);
    }

    #[test]
    fn test_from_description_bad_index() {
        let desc = MeshDescription {
            positions: vec![[0.0; 3], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            faces: vec![vec![0, 1, 7]],
            selected_faces: vec![],
        };
        assert_eq!(
            EditMesh::from_description(&desc).unwrap_err(),
            MeshError::InvalidVertexIndex {
                face: 0,
                index: 7,
                count: 3
            }
        );
    }

    #[test]
    fn test_signed_volume_unit_cube() {
        let desc = crate::fixtures::cube(1.0);
        let m = EditMesh::from_description(&desc).unwrap();
        let faces: Vec<FaceId> = m.face_ids().collect();
        assert!((m.signed_volume(&faces) - 1.0).abs() < 1e-5);
    }
}
