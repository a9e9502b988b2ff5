//! Mesh validation utilities.
//!
//! `MeshValidator` checks `EditMesh` integrity after an edit: adjacency lists
//! agree in both directions, face loops match their edges, shared edges are
//! wound consistently, normals are unit length.

use glam::Vec3;

use crate::mesh::{EditMesh, FaceId};

/// Validator for `EditMesh` integrity checks.
pub struct MeshValidator<'a> {
    mesh: &'a EditMesh,
}

impl<'a> MeshValidator<'a> {
    /// Create a new validator for the given mesh.
    pub fn new(mesh: &'a EditMesh) -> Self {
        Self { mesh }
    }

    pub fn vertex_count(&self) -> usize {
        self.mesh.vertex_count()
    }

    pub fn edge_count(&self) -> usize {
        self.mesh.edge_count()
    }

    pub fn face_count(&self) -> usize {
        self.mesh.face_count()
    }

    /// Every vertex/edge/face back-reference points at a live element that links back.
    pub fn is_adjacency_consistent(&self) -> bool {
        let m = self.mesh;
        let verts_ok = m.vert_ids().all(|v| {
            m.vertex(v).is_some_and(|vert| {
                vert.edges
                    .iter()
                    .all(|&e| m.edge(e).is_some_and(|edge| edge.verts.contains(&v)))
            })
        });
        let edges_ok = m.edge_ids().all(|e| {
            m.edge(e).is_some_and(|edge| {
                edge.verts
                    .iter()
                    .all(|&v| m.vertex(v).is_some_and(|vert| vert.edges.contains(&e)))
                    && edge
                        .faces
                        .iter()
                        .all(|&f| m.face(f).is_some_and(|face| face.edges.contains(&e)))
            })
        });
        let faces_ok = m.face_ids().all(|f| {
            m.face(f).is_some_and(|face| {
                let n = face.verts.len();
                face.edges.len() == n
                    && face.edges.iter().enumerate().all(|(i, &e)| {
                        m.edge(e).is_some_and(|edge| {
                            edge.faces.contains(&f)
                                && edge.verts.contains(&face.verts[i])
                                && edge.verts.contains(&face.verts[(i + 1) % n])
                        })
                    })
            })
        });
        verts_ok && edges_ok && faces_ok
    }

    /// No edge is used by more than two faces.
    pub fn is_manifold(&self) -> bool {
        self.mesh
            .edge_ids()
            .all(|e| self.mesh.edge(e).is_some_and(|edge| edge.faces.len() <= 2))
    }

    /// Every edge is used by exactly two faces.
    pub fn is_closed(&self) -> bool {
        self.mesh
            .edge_ids()
            .all(|e| self.mesh.edge(e).is_some_and(|edge| edge.faces.len() == 2))
    }

    /// Edges shared by two faces that traverse it in the same direction.
    pub fn inconsistent_edges(&self) -> Vec<(FaceId, FaceId)> {
        let m = self.mesh;
        let mut bad = Vec::new();
        for e in m.edge_ids() {
            let Some(edge) = m.edge(e) else { continue };
            if let &[f0, f1] = edge.faces.as_slice() {
                let [a, b] = edge.verts;
                if m.face_has_directed_edge(f0, a, b) == m.face_has_directed_edge(f1, a, b) {
                    bad.push((f0, f1));
                }
            }
        }
        bad
    }

    /// Check that all face normals have unit length (within epsilon).
    /// Degenerate faces with a zero normal are skipped.
    pub fn are_normals_normalized(&self, epsilon: f32) -> bool {
        self.mesh.face_ids().all(|f| {
            self.mesh.face(f).is_none_or(|face| {
                face.normal == Vec3::ZERO || (face.normal.length() - 1.0).abs() <= epsilon
            })
        })
    }

    /// Signed volume of all faces
    pub fn volume(&self) -> f32 {
        let faces: Vec<FaceId> = self.mesh.face_ids().collect();
        self.mesh.signed_volume(&faces)
    }

    /// Dimensions (width, height, depth) of the bounding box of live vertices.
    pub fn dimensions(&self) -> [f32; 3] {
        let mut min = Vec3::splat(f32::MAX);
        let mut max = Vec3::splat(f32::MIN);
        for v in self.mesh.vert_ids() {
            if let Some(p) = self.mesh.position(v) {
                min = min.min(p);
                max = max.max(p);
            }
        }
        if min.x > max.x {
            return [0.0; 3];
        }
        (max - min).to_array()
    }

    /// Check that the bounding box dimensions are approximately equal to `expected`.
    pub fn assert_dimensions_approx(&self, expected: [f32; 3], tolerance: f32) -> bool {
        let dims = self.dimensions();
        (0..3).all(|i| (dims[i] - expected[i]).abs() < tolerance)
    }

    /// Run all validation checks and return a list of error messages.
    /// An empty list means the mesh is valid.
    pub fn validate_all(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if !self.is_adjacency_consistent() {
            errors.push("Adjacency lists disagree".to_string());
        }

        if !self.is_manifold() {
            errors.push("Some edges are used by more than two faces".to_string());
        }

        let inconsistent = self.inconsistent_edges();
        if !inconsistent.is_empty() {
            let sample: Vec<String> = inconsistent
                .iter()
                .take(5)
                .map(|(a, b)| format!("{}/{}", a, b))
                .collect();
            errors.push(format!("Inconsistent winding between faces: {}", sample.join(", ")));
        }

        if !self.are_normals_normalized(0.01) {
            errors.push("Some normals are not unit-length (epsilon=0.01)".to_string());
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    fn mesh(desc: shared::MeshDescription) -> EditMesh {
        EditMesh::from_description(&desc).unwrap()
    }

    #[test]
    fn test_counts() {
        let m = mesh(fixtures::grid(2, 2, 1.0));
        let v = MeshValidator::new(&m);
        assert_eq!(v.vertex_count(), 9);
        assert_eq!(v.edge_count(), 12);
        assert_eq!(v.face_count(), 4);
    }

    #[test]
    fn test_cube_is_valid_and_closed() {
        let m = mesh(fixtures::cube(1.0));
        let v = MeshValidator::new(&m);
        assert!(v.validate_all().is_empty(), "{:?}", v.validate_all());
        assert!(v.is_closed());
        assert!((v.volume() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_grid_is_open() {
        let m = mesh(fixtures::grid(2, 2, 1.0));
        let v = MeshValidator::new(&m);
        assert!(v.is_manifold());
        assert!(!v.is_closed());
    }

    #[test]
    fn test_detects_inconsistent_winding() {
        let mut desc = fixtures::grid(2, 1, 1.0);
        desc.faces[1].reverse();
        let m = mesh(desc);
        let v = MeshValidator::new(&m);
        assert_eq!(v.inconsistent_edges(), vec![(FaceId(0), FaceId(1))]);
        assert!(v.validate_all().iter().any(|e| e.contains("Inconsistent winding")));
    }

    #[test]
    fn test_detects_non_manifold_edge() {
        let mut m = mesh(fixtures::grid(1, 1, 1.0));
        let v0 = m.vert_ids().next().unwrap();
        let v1 = m.vert_ids().nth(1).unwrap();
        let up = m.add_vertex(Vec3::new(0.5, 0.0, 1.0));
        let down = m.add_vertex(Vec3::new(0.5, 0.0, -1.0));
        m.add_face(&[v1, v0, up]).unwrap();
        m.add_face(&[v0, v1, down]).unwrap();
        let v = MeshValidator::new(&m);
        assert!(!v.is_manifold());
    }

    #[test]
    fn test_dimensions() {
        let m = mesh(fixtures::grid(3, 2, 0.5));
        let v = MeshValidator::new(&m);
        assert!(v.assert_dimensions_approx([1.5, 1.0, 0.0], 1e-5));
        assert!(!v.assert_dimensions_approx([2.0, 1.0, 0.0], 1e-5));
        assert_eq!(MeshValidator::new(&EditMesh::new()).dimensions(), [0.0; 3]);
    }
}
