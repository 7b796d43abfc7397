//! Project layout and naming conventions.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{KxError, KxResult};

/// Name of the optional per-project configuration file.
pub const CONFIG_FILE: &str = "klyax.json";

/// Naming conventions and folder layout of a project.
///
/// Every discovery routine takes this value explicitly; nothing is read
/// from process-global state.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Project folder holding the Models and Images folders.
    #[serde(skip)]
    pub root: PathBuf,
    /// Name of the Models folder under `root`.
    pub models_dir: String,
    /// Name of the Images folder under `root`.
    pub images_dir: String,
    /// Separator between identifier segments.
    pub id_separator: char,
    /// Separator between words of a model name.
    pub word_separator: char,
    /// Extensions recognized as image side files.
    pub image_extensions: Vec<String>,
    /// Extension of part model files.
    pub part_extension: String,
    /// Glob masks selecting part files; `*.<part_extension>` when unset.
    pub part_masks: Option<Vec<String>>,
    /// Extensions recognized as part transition files.
    pub transition_extensions: Vec<String>,
    /// Extension of assembly unit model files.
    pub assembly_extension: String,
    /// Deepest assembly nesting accepted before discovery gives up.
    pub max_depth: usize,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            models_dir: "Models".to_string(),
            images_dir: "Images".to_string(),
            id_separator: '/',
            word_separator: '-',
            image_extensions: strings(&["jpg", "jpeg", "png"]),
            part_extension: "m3d".to_string(),
            part_masks: None,
            transition_extensions: strings(&["stp", "step", "3mf", "gcode"]),
            assembly_extension: "a3d".to_string(),
            max_depth: 64,
        }
    }
}

impl ProjectConfig {
    /// Default conventions for the project at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Default::default()
        }
    }

    /// Load `klyax.json` from `root` if present, otherwise use defaults.
    pub fn load(root: impl Into<PathBuf>) -> KxResult<Self> {
        let root = root.into();
        let file = root.join(CONFIG_FILE);

        if !file.is_file() {
            return Ok(Self::new(root));
        }

        let text = std::fs::read_to_string(&file).map_err(|source| KxError::Io {
            path: file.clone(),
            source,
        })?;
        let mut config: Self = serde_json::from_str(&text)
            .map_err(|e| KxError::Config(format!("{}: {e}", file.display())))?;
        config.root = root;
        config.max_depth = config.max_depth.max(1);
        Ok(config)
    }

    /// Set the Models folder name.
    /// Set the identifier separator.
    pub fn with_id_separator(mut self, separator: char) -> Self {
        self.id_separator = separator;
        self
    }

    /// Set the word separator.
    pub fn with_word_separator(mut self, separator: char) -> Self {
        self.word_separator = separator;
        self
    }

    /// Set the part file extension. Clears any explicit part masks.
    pub fn with_part_extension(mut self, ext: impl Into<String>) -> Self {
        self.part_extension = ext.into();
        self.part_masks = None;
        self
    }

    /// Set explicit part masks.
    pub fn with_part_masks(mut self, masks: &[&str]) -> Self {
        self.part_masks = Some(strings(masks));
        self
    }

    /// Set the assembly unit file extension.
    pub fn with_assembly_extension(mut self, ext: impl Into<String>) -> Self {
        self.assembly_extension = ext.into();
        self
    }

    /// Set the recognized image extensions.
    pub fn with_image_extensions(mut self, exts: &[&str]) -> Self {
        self.image_extensions = strings(exts);
        self
    }

    /// Set the recognized transition extensions.
    pub fn with_transition_extensions(mut self, exts: &[&str]) -> Self {
        self.transition_extensions = strings(exts);
        self
    }

    /// Set the maximum assembly nesting depth (at least 1).
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth.max(1);
        self
    }

    /// The Models folder.
    pub fn models_folder(&self) -> PathBuf {
        self.root.join(&self.models_dir)
    }

    /// The Images folder.
    pub fn images_folder(&self) -> PathBuf {
        self.root.join(&self.images_dir)
    }

    /// Masks selecting part files inside an assembly folder.
    pub fn part_masks(&self) -> Vec<String> {
        match &self.part_masks {
            Some(masks) => masks.clone(),
            None => vec![format!("*.{}", self.part_extension)],
        }
    }

    /// Model file that makes `folder` an assembly unit.
    pub fn assembly_model_file(&self, folder: &Path) -> PathBuf {
        let name = folder
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        folder.join(format!("{name}.{}", self.assembly_extension))
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
