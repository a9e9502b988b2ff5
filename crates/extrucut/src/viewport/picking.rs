use glam::{Mat4, Vec3};

use crate::mesh::{EditMesh, ElementRef, FaceId};

/// A ray in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Point at parameter `t`
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// The same ray expressed in another space
    pub fn transformed(&self, m: &Mat4) -> Ray {
        Ray {
            origin: m.transform_point3(self.origin),
            direction: m.transform_vector3(self.direction),
        }
    }
}

/// Möller-Trumbore ray-triangle intersection algorithm.
/// Returns the distance along the ray if hit, or None if no intersection.
pub fn ray_triangle_intersect(ray: &Ray, v0: Vec3, v1: Vec3, v2: Vec3) -> Option<f32> {
    const EPSILON: f32 = 1e-7;

    let edge1 = v1 - v0;
    let edge2 = v2 - v0;
    let h = ray.direction.cross(edge2);
    let a = edge1.dot(h);

    // Ray is parallel to triangle
    if a.abs() < EPSILON {
        return None;
    }

    let f = 1.0 / a;
    let s = ray.origin - v0;
    let u = f * s.dot(h);

    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = f * ray.direction.dot(q);

    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = f * edge2.dot(q);

    // Intersection is behind ray origin
    if t > EPSILON {
        Some(t)
    } else {
        None
    }
}

/// Result of picking a face
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FaceHit {
    pub face: FaceId,
    /// Distance from ray origin to hit point
    pub distance: f32,
}

/// Nearest visible face hit by a world-space ray.
/// Faces are fan-triangulated; the mesh world transform is honoured.
pub fn pick_face(ray: &Ray, mesh: &EditMesh) -> Option<FaceHit> {
    let local = ray.transformed(&mesh.world_transform.inverse());
    let mut best: Option<FaceHit> = None;

    for f in mesh.face_ids() {
        if mesh.is_hidden(ElementRef::Face(f)) {
            continue;
        }
        let Some(face) = mesh.face(f) else { continue };
        let pts: Vec<Vec3> = face.verts.iter().filter_map(|&v| mesh.position(v)).collect();
        for i in 1..pts.len().saturating_sub(1) {
            if let Some(dist) = ray_triangle_intersect(&local, pts[0], pts[i], pts[i + 1]) {
                if best.is_none_or(|b| dist < b.distance) {
                    best = Some(FaceHit { face: f, distance: dist });
                }
            }
        }
    }

    best
}

/// Point on the line `point + s * dir` closest to the ray's line.
///
/// Nearly parallel lines fall back to projecting the ray origin onto the line.
pub fn closest_point_on_line(ray: &Ray, point: Vec3, dir: Vec3) -> Vec3 {
    let u = ray.direction;
    let v = dir;
    let w = ray.origin - point;

    let a = u.dot(u);
    let b = u.dot(v);
    let c = v.dot(v);
    let d = u.dot(w);
    let e = v.dot(w);

    if c < 1e-12 {
        return point;
    }

    let denom = a * c - b * b;
    let s = if denom.abs() < 1e-7 * a * c {
        // Parallel
        e / c
    } else {
        (a * e - b * d) / denom
    };

    point + v * s
}
