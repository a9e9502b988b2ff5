//! Factory functions for creating test meshes.
//!
//! Provides small `MeshDescription`s (quad, grid, cube) used by the unit
//! tests, the integration tests and the demo scene of the desktop app.

use shared::{ExtruCutOptions, MeshDescription, SegmentMode};

// ── Mesh factories ──────────────────────────────────────────────

/// Unit quad in the XY plane, facing +Z, with its face selected.
pub fn quad() -> MeshDescription {
    MeshDescription {
        positions: vec![
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [0.0, 1.0, 0.0],
        ],
        faces: vec![vec![0, 1, 2, 3]],
        selected_faces: vec![0],
    }
}

/// `cols` x `rows` grid of square faces in the XY plane, facing +Z.
///
/// Vertex `(row, col)` has index `row * (cols + 1) + col` and position
/// `(col * size, row * size, 0)`. Face `(row, col)` has index `row * cols + col`.
/// Nothing is selected.
pub fn grid(cols: u32, rows: u32, size: f32) -> MeshDescription {
    let mut positions = Vec::with_capacity(((cols + 1) * (rows + 1)) as usize);
    for row in 0..=rows {
        for col in 0..=cols {
            positions.push([col as f32 * size, row as f32 * size, 0.0]);
        }
    }
    let index = |row: u32, col: u32| row * (cols + 1) + col;
    let mut faces = Vec::with_capacity((cols * rows) as usize);
    for row in 0..rows {
        for col in 0..cols {
            faces.push(vec![
                index(row, col),
                index(row, col + 1),
                index(row + 1, col + 1),
                index(row + 1, col),
            ]);
        }
    }
    MeshDescription {
        positions,
        faces,
        selected_faces: Vec::new(),
    }
}

/// Closed cube spanning `[0, size]^3` with outward-facing faces.
///
/// Face order: bottom (-Z), top (+Z), front (-Y), back (+Y), right (+X), left (-X).
pub fn cube(size: f32) -> MeshDescription {
    let s = size;
    MeshDescription {
        positions: vec![
            [0.0, 0.0, 0.0],
            [s, 0.0, 0.0],
            [s, s, 0.0],
            [0.0, s, 0.0],
            [0.0, 0.0, s],
            [s, 0.0, s],
            [s, s, s],
            [0.0, s, s],
        ],
        faces: vec![
            vec![0, 3, 2, 1],
            vec![4, 5, 6, 7],
            vec![0, 1, 5, 4],
            vec![2, 3, 7, 6],
            vec![1, 2, 6, 5],
            vec![3, 0, 4, 7],
        ],
        selected_faces: Vec::new(),
    }
}

/// Demo scene for the desktop app: 6x6 grid with a 2x2 block selected in the middle.
pub fn demo_grid() -> MeshDescription {
    grid(6, 6, 0.5).with_selection([14, 15, 20, 21])
}

// ── Option factories ────────────────────────────────────────────

/// Fixed segment count.
pub fn count_options(count: u32) -> ExtruCutOptions {
    ExtruCutOptions {
        by: SegmentMode::Count,
        count,
        ..Default::default()
    }
}

/// Segments by target length.
pub fn length_options(length: f32) -> ExtruCutOptions {
    ExtruCutOptions {
        by: SegmentMode::Length,
        length,
        ..Default::default()
    }
}
