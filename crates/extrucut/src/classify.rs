//! Partition of the selected faces into inner and outer elements.

use std::collections::{BTreeMap, BTreeSet};

use glam::Vec3;

use crate::error::{MeshResult, ToolError};
use crate::mesh::{EdgeId, ElementRef, FaceId, HostMesh, VertId};

/// A selected face and its vertex loop at start time
#[derive(Debug, Clone, PartialEq)]
pub struct RegionFace {
    pub id: FaceId,
    pub verts: Vec<VertId>,
}

/// An edge of the selection.
///
/// Outer edges are oriented so that the selected face owning them traverses
/// `verts[1] -> verts[0]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionEdge {
    pub id: EdgeId,
    pub verts: [VertId; 2],
    pub inner: bool,
}

/// Static element sets of the selection, computed once when the tool starts.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    /// Selected faces in id order
    pub faces: Vec<RegionFace>,
    /// Every edge of the selected faces in id order
    pub edges: Vec<RegionEdge>,
    /// Boundary vertices in id order
    pub outer_verts: Vec<VertId>,
    /// Interior vertices in id order
    pub inner_verts: Vec<VertId>,
    /// Start-time positions of every vertex of the selection
    pub positions: BTreeMap<VertId, Vec3>,
    /// Unit extrusion direction
    pub direction: Vec3,
    /// Centroid of all vertices of the selection
    pub base_point: Vec3,
}

impl Region {
    pub fn all_faces(&self) -> BTreeSet<FaceId> {
        self.faces.iter().map(|f| f.id).collect()
    }

    pub fn all_edges(&self) -> BTreeSet<EdgeId> {
        self.edges.iter().map(|e| e.id).collect()
    }

    pub fn inner_edges(&self) -> BTreeSet<EdgeId> {
        self.edges.iter().filter(|e| e.inner).map(|e| e.id).collect()
    }

    pub fn outer_edges(&self) -> BTreeSet<EdgeId> {
        self.edges.iter().filter(|e| !e.inner).map(|e| e.id).collect()
    }

    /// Outer edges with their orientation
    pub fn oriented_outer_edges(&self) -> impl Iterator<Item = &RegionEdge> {
        self.edges.iter().filter(|e| !e.inner)
    }

    pub fn all_verts(&self) -> BTreeSet<VertId> {
        self.positions.keys().copied().collect()
    }

    pub fn position(&self, v: VertId) -> Vec3 {
        self.positions.get(&v).copied().unwrap_or(Vec3::ZERO)
    }

    /// Extrusion axis as two points: base point and one unit along the direction
    pub fn axis(&self) -> (Vec3, Vec3) {
        (self.base_point, self.base_point + self.direction)
    }
}

/// Build the region from the host's current face selection.
pub fn classify(host: &impl HostMesh) -> Result<Region, ToolError> {
    if !host.is_edit_mode() {
        return Err(ToolError::NotEditing);
    }
    let selected = host.selected_faces();
    if selected.is_empty() {
        return Err(ToolError::EmptySelection);
    }
    let all_faces: BTreeSet<FaceId> = selected.iter().copied().collect();

    let mut faces = Vec::with_capacity(all_faces.len());
    let mut edge_ids: BTreeSet<EdgeId> = BTreeSet::new();
    let mut positions: BTreeMap<VertId, Vec3> = BTreeMap::new();
    let mut normal_sum = Vec3::ZERO;

    for &f in &all_faces {
        let Some(verts) = host.face_verts(f) else { continue };
        edge_ids.extend(host.face_edges(f).unwrap_or_default());
        for &v in &verts {
            if let Some(p) = host.vert_position(v) {
                positions.insert(v, p);
            }
        }
        normal_sum += host.face_normal(f).unwrap_or(Vec3::ZERO);
        faces.push(RegionFace { id: f, verts });
    }
    if faces.is_empty() {
        return Err(ToolError::EmptySelection);
    }

    let mut edges = Vec::with_capacity(edge_ids.len());
    let mut outer_verts: BTreeSet<VertId> = BTreeSet::new();
    for &e in &edge_ids {
        let Some([a, b]) = host.edge_verts(e) else { continue };
        let adjacent = host.edge_faces(e).unwrap_or_default();
        let inner = adjacent.len() >= 2 && adjacent.iter().all(|f| all_faces.contains(f));
        let verts = if inner {
            [a, b]
        } else {
            outer_verts.insert(a);
            outer_verts.insert(b);
            orient_outer_edge(&faces, a, b)
        };
        edges.push(RegionEdge { id: e, verts, inner });
    }

    let inner_verts: Vec<VertId> = positions
        .keys()
        .copied()
        .filter(|v| !outer_verts.contains(v))
        .collect();

    let direction = if normal_sum.length_squared() > f32::EPSILON {
        normal_sum.normalize()
    } else {
        Vec3::Z
    };
    let base_point = if positions.is_empty() {
        Vec3::ZERO
    } else {
        positions.values().copied().sum::<Vec3>() / positions.len() as f32
    };

    Ok(Region {
        faces,
        edges,
        outer_verts: outer_verts.into_iter().collect(),
        inner_verts,
        positions,
        direction,
        base_point,
    })
}

/// Orient `a-b` so the owning selected face runs from the second vertex to the first
fn orient_outer_edge(faces: &[RegionFace], a: VertId, b: VertId) -> [VertId; 2] {
    for face in faces {
        let n = face.verts.len();
        for i in 0..n {
            let (p, q) = (face.verts[i], face.verts[(i + 1) % n]);
            if p == a && q == b {
                return [b, a];
            }
            if p == b && q == a {
                return [a, b];
            }
        }
    }
    [a, b]
}

/// Hide the selected faces, inner edges and inner vertices so only the boundary shows
pub fn hide_region(host: &mut impl HostMesh, region: &Region) -> MeshResult<()> {
    for face in &region.faces {
        host.set_hidden(ElementRef::Face(face.id), true)?;
    }
    for edge in region.edges.iter().filter(|e| e.inner) {
        host.set_hidden(ElementRef::Edge(edge.id), true)?;
    }
    for &v in &region.inner_verts {
        host.set_hidden(ElementRef::Vert(v), true)?;
    }
    Ok(())
}
