//! Applying an extrusion plan to the host mesh
//!
//! Commit runs in three phases. `resolve` maps every preview index to either
//! an existing vertex or a creation request before anything is touched.
//! `apply` then deletes the old interior and realizes the new geometry from
//! the resolved plan, so no stale handle is ever dereferenced.

use glam::Vec3;
use tracing::{info, warn};

use crate::classify::Region;
use crate::error::MeshError;
use crate::generator::ExtrusionPlan;
use crate::mesh::{EdgeId, ElementRef, FaceId, HostMesh, VertId};

/// Where a preview vertex comes from
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VertexSlot {
    /// Reuse an existing outer vertex
    Existing(VertId),
    /// Create a new vertex at this position
    New(Vec3),
}

/// Fully resolved commit request
#[derive(Debug, Clone, PartialEq)]
pub struct CommitPlan {
    pub remove_faces: Vec<FaceId>,
    pub remove_edges: Vec<EdgeId>,
    pub remove_verts: Vec<VertId>,
    /// One slot per preview vertex
    pub slots: Vec<VertexSlot>,
    pub sides: Vec<Vec<usize>>,
    pub caps: Vec<Vec<usize>>,
    /// Boundary elements to deselect afterwards
    pub outer_edges: Vec<EdgeId>,
    pub outer_verts: Vec<VertId>,
}

/// Phase of the commit a failure happened in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitStage {
    Remove,
    SideFace,
    CapFace,
    Normals,
    Selection,
}

/// A rejected host request; the commit carried on without it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitFailure {
    pub stage: CommitStage,
    /// Position within the stage's list
    pub index: usize,
    pub error: MeshError,
}

/// Outcome of a commit
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitReport {
    pub removed_faces: usize,
    pub removed_edges: usize,
    pub removed_verts: usize,
    pub created_verts: Vec<VertId>,
    pub created_faces: Vec<FaceId>,
    /// Faces whose winding the consistency pass changed
    pub flipped_faces: usize,
    pub failures: Vec<CommitFailure>,
}

impl CommitReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Phase 1: resolve preview indices against the host before any mutation.
pub fn resolve(region: &Region, plan: &ExtrusionPlan) -> CommitPlan {
    let slots = plan
        .verts
        .iter()
        .enumerate()
        .map(|(i, &p)| match plan.joins.get(&i) {
            Some(&v) => VertexSlot::Existing(v),
            None => VertexSlot::New(p),
        })
        .collect();

    CommitPlan {
        remove_faces: region.faces.iter().map(|f| f.id).collect(),
        remove_edges: region.inner_edges().into_iter().collect(),
        remove_verts: region.inner_verts.clone(),
        slots,
        sides: plan.sides.iter().map(|s| s.to_vec()).collect(),
        caps: plan.caps.clone(),
        outer_edges: region.outer_edges().into_iter().collect(),
        outer_verts: region.outer_verts.clone(),
    }
}

/// Phases 2 and 3: delete the old interior, then create the new geometry.
///
/// Host rejections are collected in the report and never abort the commit.
pub fn apply(host: &mut impl HostMesh, plan: &CommitPlan) -> CommitReport {
    let mut report = CommitReport::default();

    // Phase 2: faces, then inner edges, then inner vertices
    let removals = plan
        .remove_faces
        .iter()
        .map(|&f| ElementRef::Face(f))
        .chain(plan.remove_edges.iter().map(|&e| ElementRef::Edge(e)))
        .chain(plan.remove_verts.iter().map(|&v| ElementRef::Vert(v)));
    for (index, element) in removals.enumerate() {
        let result = match element {
            ElementRef::Face(f) => host.remove_face(f).map(|_| report.removed_faces += 1),
            ElementRef::Edge(e) => host.remove_edge(e).map(|_| report.removed_edges += 1),
            ElementRef::Vert(v) => host.remove_vert(v).map(|_| report.removed_verts += 1),
        };
        if let Err(error) = result {
            record(&mut report, CommitStage::Remove, index, error);
        }
    }

    // Phase 3: vertices, side faces, cap faces
    let handles: Vec<VertId> = plan
        .slots
        .iter()
        .map(|slot| match *slot {
            VertexSlot::Existing(v) => v,
            VertexSlot::New(p) => {
                let v = host.create_vert(p);
                report.created_verts.push(v);
                v
            }
        })
        .collect();

    for (stage, faces) in [
        (CommitStage::SideFace, &plan.sides),
        (CommitStage::CapFace, &plan.caps),
    ] {
        for (index, face) in faces.iter().enumerate() {
            let verts: Result<Vec<VertId>, MeshError> = face
                .iter()
                .map(|&i| {
                    handles.get(i).copied().ok_or(MeshError::InvalidVertexIndex {
                        face: index,
                        index: i as u32,
                        count: handles.len(),
                    })
                })
                .collect();
            match verts.and_then(|verts| host.create_face(&verts)) {
                Ok(f) => report.created_faces.push(f),
                Err(error) => record(&mut report, stage, index, error),
            }
        }
    }

    host.recompute_normals();
    match host.make_normals_consistent(&report.created_faces) {
        Ok(flipped) => report.flipped_faces = flipped,
        Err(error) => record(&mut report, CommitStage::Normals, 0, error),
    }

    let selection = report
        .created_faces
        .iter()
        .map(|&f| (ElementRef::Face(f), true))
        .chain(plan.outer_edges.iter().map(|&e| (ElementRef::Edge(e), false)))
        .chain(plan.outer_verts.iter().map(|&v| (ElementRef::Vert(v), false)))
        .collect::<Vec<_>>();
    for (index, (element, selected)) in selection.into_iter().enumerate() {
        if let Err(error) = host.set_selected(element, selected) {
            record(&mut report, CommitStage::Selection, index, error);
        }
    }

    info!(
        created_verts = report.created_verts.len(),
        created_faces = report.created_faces.len(),
        removed_faces = report.removed_faces,
        failures = report.failures.len(),
        "ExtruCut committed"
    );
    report
}

fn record(report: &mut CommitReport, stage: CommitStage, index: usize, error: MeshError) {
    warn!(?stage, index, %error, "Host rejected commit request");
    report.failures.push(CommitFailure {
        stage,
        index,
        error,
    });
}
