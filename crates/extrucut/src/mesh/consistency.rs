//! Winding consistency across face components.

use std::collections::{BTreeSet, VecDeque};

use tracing::{debug, info};

use super::{EditMesh, FaceId};
use crate::error::MeshResult;

/// Make face windings agree across shared edges, for the edge-connected
/// components that contain one of `seeds`. Other components are untouched.
///
/// Each such component is flood-filled from its lowest face id;
/// a neighbor traversing a shared edge in the same direction as the current
/// face gets flipped. Closed components (every edge used by exactly two
/// faces) are then turned outward using the sign of their volume. Open
/// components keep the orientation of their lowest face.
///
/// Returns the number of faces whose winding changed.
pub fn make_normals_consistent(mesh: &mut EditMesh, seeds: &[FaceId]) -> MeshResult<usize> {
    let mut visited: BTreeSet<FaceId> = BTreeSet::new();
    let mut flipped: BTreeSet<FaceId> = BTreeSet::new();
    let mut component_count = 0;

    let mut seeds: Vec<FaceId> = seeds.iter().copied().filter(|&f| mesh.face(f).is_some()).collect();
    seeds.sort_unstable();
    for seed in seeds {
        if visited.contains(&seed) {
            continue;
        }
        component_count += 1;

        let component = collect_component(mesh, seed);
        visited.extend(component.iter().copied());
        let start = component.iter().copied().min().unwrap_or(seed);
        orient_from(mesh, start, &mut flipped)?;

        if is_closed(mesh, &component) && mesh.signed_volume(&component) < 0.0 {
            debug!(faces = component.len(), "Closed component faces inward, flipping");
            for &f in &component {
                mesh.flip_face(f)?;
                toggle(&mut flipped, f);
            }
        }
    }

    if flipped.is_empty() {
        debug!("Winding already consistent across {} component(s)", component_count);
    } else {
        info!(
            "Fixed winding: flipped {} faces across {} component(s)",
            flipped.len(),
            component_count
        );
    }
    Ok(flipped.len())
}

/// Faces reachable from `seed` through shared edges
fn collect_component(mesh: &EditMesh, seed: FaceId) -> Vec<FaceId> {
    let mut seen = BTreeSet::from([seed]);
    let mut queue = VecDeque::from([seed]);
    while let Some(face_id) = queue.pop_front() {
        let Some(face) = mesh.face(face_id) else { continue };
        for &edge_id in &face.edges {
            let Some(edge) = mesh.edge(edge_id) else { continue };
            for &neighbor in &edge.faces {
                if seen.insert(neighbor) {
                    queue.push_back(neighbor);
                }
            }
        }
    }
    seen.into_iter().collect()
}

/// Breadth-first flood from `start`, flipping neighbors that run a shared edge the same way
fn orient_from(mesh: &mut EditMesh, start: FaceId, flipped: &mut BTreeSet<FaceId>) -> MeshResult<()> {
    let mut visited = BTreeSet::from([start]);
    let mut queue = VecDeque::from([start]);

    while let Some(face_id) = queue.pop_front() {
        let Some(face) = mesh.face(face_id) else { continue };
        let loop_verts = face.verts.clone();
        let loop_edges = face.edges.clone();

        for (i, &edge_id) in loop_edges.iter().enumerate() {
            let a = loop_verts[i];
            let b = loop_verts[(i + 1) % loop_verts.len()];
            let Some(edge) = mesh.edge(edge_id) else { continue };
            let neighbors = edge.faces.clone();

            for neighbor in neighbors {
                if neighbor == face_id || !visited.insert(neighbor) {
                    continue;
                }
                // Neighbor must run b -> a; same direction means flip
                if mesh.face_has_directed_edge(neighbor, a, b) {
                    mesh.flip_face(neighbor)?;
                    toggle(flipped, neighbor);
                }
                queue.push_back(neighbor);
            }
        }
    }
    Ok(())
}

fn toggle(set: &mut BTreeSet<FaceId>, f: FaceId) {
    if !set.remove(&f) {
        set.insert(f);
    }
}

/// Every edge of every face is shared by exactly two faces of the component
fn is_closed(mesh: &EditMesh, component: &[FaceId]) -> bool {
    let members: BTreeSet<FaceId> = component.iter().copied().collect();
    component.iter().all(|&f| {
        mesh.face(f).is_some_and(|face| {
            face.edges.iter().all(|&e| {
                mesh.edge(e).is_some_and(|edge| {
                    edge.faces.len() == 2 && edge.faces.iter().all(|x| members.contains(x))
                })
            })
        })
    })
}
