//! Extrusion geometry generation
//!
//! Turns a classified region, a distance and a segment count into index-based
//! preview geometry. Every outer vertex gets a column of `n + 1` layers, every
//! inner vertex a single displaced copy. Output is a pure function of the
//! inputs.

use std::collections::BTreeMap;

use glam::Vec3;

use crate::classify::Region;
use crate::mesh::VertId;

/// Half length of the drawn extrusion axis
pub const AXIS_EXTENT: f32 = 1000.0;

/// Virtual geometry of one extrusion, indices point into `verts`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExtrusionPlan {
    pub direction: Vec3,
    pub distance: f32,
    pub segments: u32,
    pub verts: Vec<Vec3>,
    pub edges: Vec<[usize; 2]>,
    /// Side quads, one per outer edge and segment
    pub sides: Vec<[usize; 4]>,
    /// Displaced copies of the selected faces
    pub caps: Vec<Vec<usize>>,
    /// Layer-0 preview vertices standing for existing outer vertices
    pub joins: BTreeMap<usize, VertId>,
}

impl ExtrusionPlan {
    /// Preview vertices that have to be created on commit
    pub fn created_vertex_count(&self) -> usize {
        self.verts.len() - self.joins.len()
    }

    /// Fan triangulation of sides and caps for triangle-only renderers
    pub fn triangles(&self) -> Vec<[usize; 3]> {
        let mut tris = Vec::with_capacity(self.sides.len() * 2 + self.caps.len());
        for side in &self.sides {
            fan(side, &mut tris);
        }
        for cap in &self.caps {
            fan(cap, &mut tris);
        }
        tris
    }
}

fn fan(face: &[usize], out: &mut Vec<[usize; 3]>) {
    for i in 1..face.len().saturating_sub(1) {
        out.push([face[0], face[i], face[i + 1]]);
    }
}

/// Extrusion axis line as drawn in the viewport
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisLine {
    pub base: Vec3,
    /// Far point against the direction
    pub behind: Vec3,
    /// Far point along the direction
    pub ahead: Vec3,
}

impl AxisLine {
    pub fn new(base: Vec3, direction: Vec3) -> Self {
        Self {
            base,
            behind: base - direction * AXIS_EXTENT,
            ahead: base + direction * AXIS_EXTENT,
        }
    }
}

/// Build the preview geometry for `distance` split into `segments` layers.
pub fn generate(region: &Region, distance: f32, segments: u32) -> ExtrusionPlan {
    let n = segments.max(1) as usize;
    let layers = n + 1;
    let outer_count = region.outer_verts.len();
    let offset = region.direction * distance;

    let outer_index: BTreeMap<VertId, usize> = region
        .outer_verts
        .iter()
        .enumerate()
        .map(|(i, &v)| (v, i))
        .collect();
    let inner_index: BTreeMap<VertId, usize> = region
        .inner_verts
        .iter()
        .enumerate()
        .map(|(i, &v)| (v, outer_count * layers + i))
        .collect();

    let at_layer = |v: VertId, r: usize| -> usize { outer_index[&v] * layers + r };
    let terminal = |v: VertId| -> usize {
        match outer_index.get(&v) {
            Some(&i) => i * layers + n,
            None => inner_index[&v],
        }
    };

    let mut verts = Vec::with_capacity(outer_count * layers + region.inner_verts.len());
    let mut joins = BTreeMap::new();
    for &v in &region.outer_verts {
        let origin = region.position(v);
        joins.insert(verts.len(), v);
        for r in 0..layers {
            verts.push(origin + offset * (r as f32 / n as f32));
        }
    }
    for &v in &region.inner_verts {
        verts.push(region.position(v) + offset);
    }

    let mut edges = Vec::new();
    // Rungs
    for edge in region.oriented_outer_edges() {
        let [a, b] = edge.verts;
        for r in 0..layers {
            edges.push([at_layer(a, r), at_layer(b, r)]);
        }
    }
    // Rails
    for &v in &region.outer_verts {
        for r in 0..n {
            edges.push([at_layer(v, r), at_layer(v, r + 1)]);
        }
    }
    // Cap outline
    for edge in &region.edges {
        let [a, b] = edge.verts;
        edges.push([terminal(a), terminal(b)]);
    }

    let mut sides = Vec::new();
    for edge in region.oriented_outer_edges() {
        let [v0, v1] = edge.verts;
        for r in 0..n {
            sides.push([
                at_layer(v0, r),
                at_layer(v0, r + 1),
                at_layer(v1, r + 1),
                at_layer(v1, r),
            ]);
        }
    }

    let caps = region
        .faces
        .iter()
        .map(|face| face.verts.iter().map(|&v| terminal(v)).collect())
        .collect();

    ExtrusionPlan {
        direction: region.direction,
        distance,
        segments: n as u32,
        verts,
        edges,
        sides,
        caps,
        joins,
    }
}
