//! Painter-based rendering for the viewport
//!
//! Triangles are depth-sorted back to front and drawn as one egui mesh per
//! layer; lines are clipped against the near plane before projection.

use egui::{Color32, Painter, Pos2, Rect, Stroke};
use glam::{Vec3, Vec4};

use super::camera::ArcBallCamera;
use super::mesh::{LineMeshData, MeshData, PreviewDrawData, PREVIEW_POINT_COLOR, PREVIEW_POINT_SIZE};

const BACKGROUND: Color32 = Color32::from_rgb(48, 48, 54);
const LIGHT_DIR: Vec3 = Vec3::new(0.3, 0.5, 0.8);
/// Minimum clip-space w kept when clipping lines
const NEAR_W: f32 = 1e-3;

pub fn color32(c: [f32; 4]) -> Color32 {
    Color32::from_rgba_unmultiplied(
        (c[0].clamp(0.0, 1.0) * 255.0) as u8,
        (c[1].clamp(0.0, 1.0) * 255.0) as u8,
        (c[2].clamp(0.0, 1.0) * 255.0) as u8,
        (c[3].clamp(0.0, 1.0) * 255.0) as u8,
    )
}

pub fn paint_background(painter: &Painter, rect: Rect) {
    painter.rect_filled(rect, 0.0, BACKGROUND);
}

fn to_screen(clip: Vec4, rect: Rect) -> Pos2 {
    let ndc = clip.truncate() / clip.w;
    egui::pos2(
        rect.center().x + ndc.x * rect.width() * 0.5,
        rect.center().y - ndc.y * rect.height() * 0.5,
    )
}

/// Shaded triangles, painter's algorithm
pub fn paint_triangles(painter: &Painter, rect: Rect, camera: &ArcBallCamera, data: &MeshData) {
    let vp = camera.view_projection(rect.width() / rect.height());
    let eye = camera.eye_position();
    let light = LIGHT_DIR.normalize();

    let clip: Vec<Vec4> = (0..data.vertex_count())
        .map(|i| vp * data.position(i).extend(1.0))
        .collect();

    let mut tris: Vec<(f32, [u32; 3])> = data
        .indices
        .chunks_exact(3)
        .filter(|t| t.iter().all(|&i| clip[i as usize].w > NEAR_W))
        .map(|t| {
            let centroid = (data.position(t[0] as usize)
                + data.position(t[1] as usize)
                + data.position(t[2] as usize))
                / 3.0;
            (centroid.distance_squared(eye), [t[0], t[1], t[2]])
        })
        .collect();
    tris.sort_by(|a, b| b.0.total_cmp(&a.0));

    let mut mesh = egui::Mesh::default();
    for (_, tri) in tris {
        let base = mesh.vertices.len() as u32;
        for &i in &tri {
            let i = i as usize;
            let n = Vec3::from_slice(&data.vertices[i * 10 + 3..i * 10 + 6]);
            let shade = 0.45 + 0.55 * n.dot(light).abs();
            let [r, g, b, a] = data.color(i);
            let color = color32([r * shade, g * shade, b * shade, a]);
            mesh.colored_vertex(to_screen(clip[i], rect), color);
        }
        mesh.add_triangle(base, base + 1, base + 2);
    }
    painter.add(egui::Shape::mesh(mesh));
}

/// Project a world-space segment, clipping it against the near plane
pub fn project_segment(
    camera: &ArcBallCamera,
    rect: Rect,
    a: Vec3,
    b: Vec3,
) -> Option<[Pos2; 2]> {
    let vp = camera.view_projection(rect.width() / rect.height());
    let mut ca = vp * a.extend(1.0);
    let mut cb = vp * b.extend(1.0);
    if ca.w <= NEAR_W && cb.w <= NEAR_W {
        return None;
    }
    if ca.w <= NEAR_W {
        let t = (NEAR_W - ca.w) / (cb.w - ca.w);
        ca = ca.lerp(cb, t);
    } else if cb.w <= NEAR_W {
        let t = (NEAR_W - cb.w) / (ca.w - cb.w);
        cb = cb.lerp(ca, t);
    }
    Some([to_screen(ca, rect), to_screen(cb, rect)])
}

pub fn paint_lines(painter: &Painter, rect: Rect, camera: &ArcBallCamera, data: &LineMeshData, width: f32) {
    for i in 0..data.segment_count() {
        let (a, b, color) = data.segment(i);
        if let Some(seg) = project_segment(camera, rect, a, b) {
            painter.line_segment(seg, Stroke::new(width, color32(color)));
        }
    }
}

/// ExtruCut preview: translucent faces, then edges, points and the axis on top
pub fn paint_preview(painter: &Painter, rect: Rect, camera: &ArcBallCamera, preview: &PreviewDrawData) {
    paint_triangles(painter, rect, camera, &preview.sides);
    paint_triangles(painter, rect, camera, &preview.caps);
    paint_lines(painter, rect, camera, &preview.edges, 1.0);
    paint_lines(painter, rect, camera, &preview.axis, 1.5);

    let point_color = color32(PREVIEW_POINT_COLOR);
    for &p in &preview.points {
        if let Some(screen) = camera.project(p, rect) {
            painter.circle_filled(screen, PREVIEW_POINT_SIZE * 0.5, point_color);
        }
    }
}
