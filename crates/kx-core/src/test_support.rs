//! Temporary project trees for unit tests.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use crate::config::ProjectConfig;

/// A project in a temp dir with `.part` parts and `.unit` assembly units.
pub(crate) struct Fixture {
    _dir: TempDir,
    pub config: ProjectConfig,
}

impl Fixture {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let config = ProjectConfig::new(dir.path())
            .with_part_extension("part")
            .with_assembly_extension("unit")
            .with_image_extensions(&["png", "jpg"])
            .with_transition_extensions(&["stp", "gcode"]);
        fs::create_dir_all(config.models_folder()).unwrap();
        Self { _dir: dir, config }
    }

    pub fn models(&self) -> PathBuf {
        self.config.models_folder()
    }

    /// Create an empty file at `rel` under the Models folder.
    pub fn touch(&self, rel: &str) {
        let path = self.models().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, b"").unwrap();
    }

    /// Create a folder at `rel` under the Models folder.
    pub fn mkdir(&self, rel: &str) {
        fs::create_dir_all(self.models().join(rel)).unwrap();
    }
}
