// Library crate: exposes the mesh, the ExtruCut core and the testable state for
// integration tests and the command protocol.
// GUI-specific modules (app, ui, viewport rendering) remain in the binary crate.

pub mod classify;
pub mod command;
pub mod commit;
pub mod error;
pub mod fixtures;
pub mod generator;
pub mod harness;
pub mod interaction;
pub mod mesh;
pub mod segments;
pub mod state;
pub mod tool;
pub mod validation;

/// Subset of viewport types needed by the core (draw data, rays, picking).
/// The full viewport (camera, painter, input) stays in the binary crate.
pub mod viewport {
    pub mod mesh;
    pub mod picking;
}
