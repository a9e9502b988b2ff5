mod app;
pub mod i18n;
mod ui;
mod viewport;

// Re-export library modules so that `crate::state`, `crate::tool`, etc.
// resolve to the lib crate types everywhere in the binary.
pub use extrucut_lib::fixtures;
pub use extrucut_lib::interaction;
pub use extrucut_lib::mesh;
pub use extrucut_lib::segments;
pub use extrucut_lib::state;
pub use extrucut_lib::tool;

use app::ExtruCutApp;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "extrucut=info,extrucut_lib=info".into()),
        )
        .init();

    // Parse --mesh <path> argument
    let initial_mesh = parse_mesh_arg();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("ExtruCut")
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([640.0, 400.0]),
        ..Default::default()
    };

    if let Err(e) = eframe::run_native(
        "extrucut",
        native_options,
        Box::new(move |cc| Ok(Box::new(ExtruCutApp::new(cc, initial_mesh)))),
    ) {
        tracing::error!("Failed to start application: {e}");
    }
}

fn parse_mesh_arg() -> Option<shared::MeshDescription> {
    let args: Vec<String> = std::env::args().collect();
    let mut i = 1;
    while i < args.len() {
        if args[i] == "--mesh" && i + 1 < args.len() {
            let path = &args[i + 1];
            match state::MeshState::read_file(std::path::Path::new(path)) {
                Ok(mesh) => {
                    tracing::info!("Loaded mesh from {path} ({} faces)", mesh.faces.len());
                    return Some(mesh);
                }
                Err(e) => {
                    tracing::error!("{e}");
                }
            }
            break;
        }
        i += 1;
    }
    None
}
