use glam::{Mat4, Vec3};

use crate::generator::{AxisLine, ExtrusionPlan};
use crate::mesh::{EditMesh, ElementRef};

pub const FACE_COLOR: [f32; 3] = [0.62, 0.64, 0.68];
pub const SELECTED_FACE_COLOR: [f32; 3] = [1.0, 0.6, 0.2];
pub const EDGE_COLOR: [f32; 4] = [0.1, 0.1, 0.12, 1.0];
pub const SELECTED_EDGE_COLOR: [f32; 4] = [1.0, 0.55, 0.1, 1.0];

pub const AXIS_BEHIND_COLOR: [f32; 4] = [1.0, 0.0, 1.0, 0.25];
pub const AXIS_AHEAD_COLOR: [f32; 4] = [0.0, 1.0, 1.0, 0.25];
pub const PREVIEW_POINT_COLOR: [f32; 4] = [0.0, 0.2, 0.1, 1.0];
pub const PREVIEW_POINT_SIZE: f32 = 3.0;
pub const PREVIEW_EDGE_COLOR: [f32; 4] = [0.0, 0.2, 0.1, 1.0];
pub const PREVIEW_CAP_COLOR: [f32; 4] = [0.7, 0.7, 0.5, 0.8];
pub const PREVIEW_SIDE_COLOR: [f32; 4] = [0.5, 0.6, 0.5, 0.8];

/// CPU-side triangle data: interleaved [pos.x, pos.y, pos.z, norm.x, norm.y, norm.z, r, g, b, a]
#[derive(Clone, Debug, Default)]
pub struct MeshData {
    /// 10 floats per vertex: position(3) + normal(3) + color(4)
    pub vertices: Vec<f32>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 10
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn position(&self, i: usize) -> Vec3 {
        let v = &self.vertices[i * 10..i * 10 + 3];
        Vec3::new(v[0], v[1], v[2])
    }

    pub fn color(&self, i: usize) -> [f32; 4] {
        let v = &self.vertices[i * 10 + 6..i * 10 + 10];
        [v[0], v[1], v[2], v[3]]
    }

    /// Append one polygon as a triangle fan with a flat normal
    pub fn push_polygon(&mut self, points: &[Vec3], normal: Vec3, color: [f32; 4]) {
        if points.len() < 3 {
            return;
        }
        let base = self.vertex_count() as u32;
        for p in points {
            self.vertices.extend_from_slice(&[
                p.x, p.y, p.z, normal.x, normal.y, normal.z, color[0], color[1], color[2], color[3],
            ]);
        }
        for i in 1..points.len() as u32 - 1 {
            self.indices.extend_from_slice(&[base, base + i, base + i + 1]);
        }
    }

    /// Visible faces of an edit mesh in world space; selected faces highlighted
    pub fn from_edit_mesh(mesh: &EditMesh) -> Self {
        let world = mesh.world_transform;
        let mut data = MeshData::default();
        for f in mesh.face_ids() {
            if mesh.is_hidden(ElementRef::Face(f)) {
                continue;
            }
            let Some(face) = mesh.face(f) else { continue };
            let points: Vec<Vec3> = face
                .verts
                .iter()
                .filter_map(|&v| mesh.position(v))
                .map(|p| world.transform_point3(p))
                .collect();
            let normal = world.transform_vector3(face.normal).normalize_or_zero();
            let rgb = if face.selected { SELECTED_FACE_COLOR } else { FACE_COLOR };
            data.push_polygon(&points, normal, [rgb[0], rgb[1], rgb[2], 1.0]);
        }
        data
    }
}

/// Lines mesh: interleaved [pos.x, pos.y, pos.z, r, g, b, a]
#[derive(Clone, Debug, Default)]
pub struct LineMeshData {
    /// 7 floats per vertex: position(3) + color(4), two vertices per segment
    pub vertices: Vec<f32>,
}

impl LineMeshData {
    pub fn segment_count(&self) -> usize {
        self.vertices.len() / 14
    }

    pub fn push_line(&mut self, a: Vec3, b: Vec3, color: [f32; 4]) {
        for p in [a, b] {
            self.vertices
                .extend_from_slice(&[p.x, p.y, p.z, color[0], color[1], color[2], color[3]]);
        }
    }

    /// Segment `i` as (start, end, color)
    pub fn segment(&self, i: usize) -> (Vec3, Vec3, [f32; 4]) {
        let v = &self.vertices[i * 14..i * 14 + 14];
        (
            Vec3::new(v[0], v[1], v[2]),
            Vec3::new(v[7], v[8], v[9]),
            [v[3], v[4], v[5], v[6]],
        )
    }

    /// Visible edges of an edit mesh in world space
    pub fn from_edit_mesh(mesh: &EditMesh) -> Self {
        let world = mesh.world_transform;
        let mut data = LineMeshData::default();
        for e in mesh.edge_ids() {
            if mesh.is_hidden(ElementRef::Edge(e)) {
                continue;
            }
            let Some(edge) = mesh.edge(e) else { continue };
            let (Some(a), Some(b)) = (mesh.position(edge.verts[0]), mesh.position(edge.verts[1])) else {
                continue;
            };
            let color = if edge.selected { SELECTED_EDGE_COLOR } else { EDGE_COLOR };
            data.push_line(world.transform_point3(a), world.transform_point3(b), color);
        }
        data
    }
}

/// Everything the viewport draws for a running ExtruCut preview, in world space
#[derive(Clone, Debug, Default)]
pub struct PreviewDrawData {
    pub axis: LineMeshData,
    pub points: Vec<Vec3>,
    pub edges: LineMeshData,
    pub sides: MeshData,
    pub caps: MeshData,
}

impl PreviewDrawData {
    pub fn build(plan: &ExtrusionPlan, axis: &AxisLine, world: &Mat4) -> Self {
        let mut data = PreviewDrawData::default();
        let base = world.transform_point3(axis.base);
        data.axis
            .push_line(base, world.transform_point3(axis.behind), AXIS_BEHIND_COLOR);
        data.axis
            .push_line(base, world.transform_point3(axis.ahead), AXIS_AHEAD_COLOR);

        data.points = plan.verts.iter().map(|&p| world.transform_point3(p)).collect();

        for &[a, b] in &plan.edges {
            if let (Some(&pa), Some(&pb)) = (data.points.get(a), data.points.get(b)) {
                data.edges.push_line(pa, pb, PREVIEW_EDGE_COLOR);
            }
        }

        for side in &plan.sides {
            let pts = loop_points(&data.points, side);
            data.sides.push_polygon(&pts, loop_normal(&pts), PREVIEW_SIDE_COLOR);
        }
        for cap in &plan.caps {
            let pts = loop_points(&data.points, cap);
            data.caps.push_polygon(&pts, loop_normal(&pts), PREVIEW_CAP_COLOR);
        }
        data
    }
}

fn loop_points(points: &[Vec3], indices: &[usize]) -> Vec<Vec3> {
    indices.iter().filter_map(|&i| points.get(i).copied()).collect()
}

/// Newell normal of a polygon
fn loop_normal(points: &[Vec3]) -> Vec3 {
    let mut n = Vec3::ZERO;
    for (i, a) in points.iter().enumerate() {
        let b = points[(i + 1) % points.len()];
        n += Vec3::new(
            (a.y - b.y) * (a.z + b.z),
            (a.z - b.z) * (a.x + b.x),
            (a.x - b.x) * (a.y + b.y),
        );
    }
    n.normalize_or_zero()
}
