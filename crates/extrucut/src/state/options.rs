//! Persisted ExtruCut options

use std::path::{Path, PathBuf};

use shared::ExtruCutOptions;

/// Options shared by every tool invocation, with load/save lifecycle.
///
/// Mutations go through `update`, which remembers whether anything changed;
/// `clean` writes the file only in that case.
#[derive(Debug, Clone, Default)]
pub struct OptionsStore {
    options: ExtruCutOptions,
    /// Backing file, `None` keeps the options in memory only
    path: Option<PathBuf>,
    changed: bool,
}

impl OptionsStore {
    /// Default location in the platform config directory
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "extrucut", "extrucut")
            .map(|dirs| dirs.config_dir().join("options.json"))
    }

    /// Load from the config directory, or defaults if not found
    pub fn load() -> Self {
        match Self::default_path() {
            Some(path) => Self::load_from(path),
            None => Self::in_memory(),
        }
    }

    /// Load from a specific file, or defaults if missing or unreadable
    pub fn load_from(path: PathBuf) -> Self {
        let options = std::fs::read_to_string(&path)
            .ok()
            .and_then(|json| serde_json::from_str(&json).ok())
            .unwrap_or_default();
        Self {
            options,
            path: Some(path),
            changed: false,
        }
    }

    /// Options that are never written to disk
    pub fn in_memory() -> Self {
        Self::default()
    }

    pub fn get(&self) -> &ExtruCutOptions {
        &self.options
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Apply a change; returns true if the options actually changed
    pub fn update(&mut self, f: impl FnOnce(&mut ExtruCutOptions)) -> bool {
        let before = self.options.clone();
        f(&mut self.options);
        let changed = self.options != before;
        self.changed |= changed;
        changed
    }

    pub fn is_changed(&self) -> bool {
        self.changed
    }

    /// Save if anything changed since the last save; returns true when written
    pub fn clean(&mut self) -> bool {
        if !self.changed {
            return false;
        }
        match self.save() {
            Ok(()) => {
                self.changed = false;
                true
            }
            Err(e) => {
                tracing::warn!("Failed to save options: {e}");
                false
            }
        }
    }

    /// Write the options file (no-op for in-memory stores)
    pub fn save(&self) -> Result<(), String> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {}", parent.display(), e))?;
        }
        let json = serde_json::to_string_pretty(&self.options)
            .map_err(|e| format!("Serialization failed: {}", e))?;
        std::fs::write(path, json).map_err(|e| format!("Failed to write {}: {}", path.display(), e))
    }
}
