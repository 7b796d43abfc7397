use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::assembly::AssemblyUnitModel;
use crate::config::ProjectConfig;
use crate::conventions::{Masks, search_by_mask};
use crate::error::KxResult;
use crate::identifier::Identifier;
use crate::part::PartModel;

/// Fields shared by every model, derived once from its path.
///
/// All paths are relative to the Models folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelInfo {
    /// Defining file (parts) or folder (assembly units).
    pub path: PathBuf,
    /// File stem (parts) or folder name (assembly units).
    pub name: String,
    /// `name` split on the word separator.
    pub words: Vec<String>,
    /// Separator-joined identifier.
    pub id: String,
    /// Image side files found next to the model.
    pub images: Vec<PathBuf>,
}

impl ModelInfo {
    /// Derive name, words and images for the model at `path` identified by
    /// `id`, looking for side files in `folder`. Both paths are relative to
    /// the Models folder.
    pub(crate) fn discover(
        config: &ProjectConfig,
        path: &Path,
        id: Identifier,
        folder: &Path,
    ) -> KxResult<Self> {
        let name = id.name().to_string();
        let id = id.render(config.id_separator);
        let words = name
            .split(config.word_separator)
            .map(str::to_string)
            .collect();
        let images = side_files(config, folder, &name, &config.image_extensions)?;

        Ok(Self {
            path: path.to_path_buf(),
            name,
            words,
            id,
            images,
        })
    }
}

/// Files named `<name>*.<ext>` in `folder`, relative to the Models folder.
pub(crate) fn side_files(
    config: &ProjectConfig,
    folder: &Path,
    name: &str,
    extensions: &[String],
) -> KxResult<Vec<PathBuf>> {
    let masks = Masks::side_files(name, extensions)?;
    let location = config.models_folder().join(folder);
    Ok(search_by_mask(&location, &masks)
        .filter_map(|p| p.file_name().map(|f| folder.join(f)))
        .collect())
}

/// A node of the model tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Model {
    /// A single part file.
    Part(PartModel),
    /// An assembly unit folder and everything below it.
    AssemblyUnit(AssemblyUnitModel),
}

impl Model {
    /// Shared model fields.
    pub fn info(&self) -> &ModelInfo {
        match self {
            Self::Part(part) => &part.info,
            Self::AssemblyUnit(unit) => &unit.info,
        }
    }

    /// The model identifier.
    pub fn id(&self) -> &str {
        &self.info().id
    }

    /// The model name.
    pub fn name(&self) -> &str {
        &self.info().name
    }

    /// Human-readable kind.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Part(_) => "part",
            Self::AssemblyUnit(_) => "assembly unit",
        }
    }

    /// The part, if this is one.
    pub fn as_part(&self) -> Option<&PartModel> {
        match self {
            Self::Part(part) => Some(part),
            Self::AssemblyUnit(_) => None,
        }
    }

    /// The assembly unit, if this is one.
    pub fn as_assembly_unit(&self) -> Option<&AssemblyUnitModel> {
        match self {
            Self::AssemblyUnit(unit) => Some(unit),
            Self::Part(_) => None,
        }
    }
}

impl From<PartModel> for Model {
    fn from(part: PartModel) -> Self {
        Self::Part(part)
    }
}

impl From<AssemblyUnitModel> for Model {
    fn from(unit: AssemblyUnitModel) -> Self {
        Self::AssemblyUnit(unit)
    }
}
