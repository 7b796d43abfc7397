use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::ProjectConfig;
use crate::error::{KxError, KxResult};
use crate::identifier::Identifier;
use crate::model::{ModelInfo, side_files};

/// A part: one model file plus its image and transition side files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartModel {
    /// Shared model fields.
    #[serde(flatten)]
    pub info: ModelInfo,
    /// Transition files (`<name>*.<ext>` for each transition extension).
    pub transitions: Vec<PathBuf>,
}

impl PartModel {
    /// Build the part whose model file is `path`, relative to the Models
    /// folder.
    ///
    /// The file is not required to exist; a missing part simply has no
    /// side files.
    pub fn new(config: &ProjectConfig, path: impl AsRef<Path>) -> KxResult<Self> {
        let path = path.as_ref();
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .ok_or_else(|| KxError::OutsideModelsRoot(path.to_path_buf()))?;
        let folder = path.parent().unwrap_or(Path::new(""));

        let id = Identifier::from_relative_path(path, &name, config.id_separator)?;
        let info = ModelInfo::discover(config, path, id, folder)?;
        let transitions = side_files(config, folder, &info.name, &config.transition_extensions)?;

        Ok(Self { info, transitions })
    }
}
