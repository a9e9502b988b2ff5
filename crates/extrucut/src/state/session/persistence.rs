//! Autosave/load and mesh files

use std::path::{Path, PathBuf};

use shared::MeshDescription;

use super::MeshState;

impl MeshState {
    /// Get autosave file path
    fn autosave_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "extrucut", "extrucut")
            .map(|dirs| dirs.data_dir().join("autosave_mesh.json"))
    }

    /// Save mesh to autosave file
    pub fn autosave(&self) {
        if let Some(path) = Self::autosave_path() {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            if let Ok(json) = serde_json::to_string_pretty(&self.mesh.to_description()) {
                let _ = std::fs::write(&path, json);
            }
        }
    }

    /// Load mesh from autosave file
    pub fn load_autosave() -> Option<MeshDescription> {
        let path = Self::autosave_path()?;
        let json = std::fs::read_to_string(&path).ok()?;
        serde_json::from_str(&json).ok()
    }

    /// Check if autosave file exists
    pub fn has_autosave() -> bool {
        Self::autosave_path()
            .map(|p| p.exists())
            .unwrap_or(false)
    }

    /// Read a mesh description from a JSON file
    pub fn read_file(path: &Path) -> Result<MeshDescription, String> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
        serde_json::from_str(&json).map_err(|e| format!("Invalid mesh file: {}", e))
    }

    /// Replace the mesh with the contents of a JSON file
    pub fn load_file(&mut self, path: &Path) -> Result<(), String> {
        let desc = Self::read_file(path)?;
        self.load(&desc).map_err(|e| e.to_string())?;
        tracing::info!(
            path = %path.display(),
            verts = desc.vertex_count(),
            faces = desc.face_count(),
            "Mesh loaded"
        );
        Ok(())
    }

    /// Write the live mesh to a JSON file
    pub fn save_file(&self, path: &Path) -> Result<(), String> {
        let json = serde_json::to_string_pretty(&self.mesh.to_description())
            .map_err(|e| format!("Serialization failed: {}", e))?;
        std::fs::write(path, json)
            .map_err(|e| format!("Failed to write {}: {}", path.display(), e))?;
        tracing::info!(path = %path.display(), "Mesh saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("extrucut_{}_{}.json", name, std::process::id()))
    }

    #[test]
    fn test_save_and_load_file() {
        let path = temp_path("save_load");
        let mut state = MeshState::default();
        state.load(&fixtures::grid(2, 2, 1.0)).unwrap();
        state.save_file(&path).unwrap();

        let mut other = MeshState::default();
        other.load_file(&path).unwrap();
        assert_eq!(other.mesh().vertex_count(), 9);
        assert_eq!(other.mesh().face_count(), 4);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_load_missing_file() {
        let mut state = MeshState::default();
        let err = state.load_file(Path::new("/nonexistent/mesh.json")).unwrap_err();
        assert!(err.contains("Failed to read"));
    }

    #[test]
    fn test_load_invalid_json() {
        let path = temp_path("invalid");
        std::fs::write(&path, "{not json").unwrap();
        let mut state = MeshState::default();
        let err = state.load_file(&path).unwrap_err();
        assert!(err.contains("Invalid mesh file"));
        let _ = std::fs::remove_file(&path);
    }
}
