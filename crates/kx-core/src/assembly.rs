use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::ProjectConfig;
use crate::conventions::{Masks, list_by_mask, subfolders};
use crate::error::{KxError, KxResult};
use crate::identifier::Identifier;
use crate::model::{Model, ModelInfo};
use crate::part::PartModel;

/// An assembly unit: a folder holding `<folder>/<folder>.<assembly ext>`,
/// its parts, and nested assembly units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssemblyUnitModel {
    /// Shared model fields.
    #[serde(flatten)]
    pub info: ModelInfo,
    /// Direct parts first, then nested assembly units.
    pub entities: Vec<Model>,
}

impl AssemblyUnitModel {
    /// Load the assembly unit at `path` (a folder relative to the Models
    /// folder) together with its whole subtree.
    ///
    /// Fails if this folder or any folder below it is not a valid assembly
    /// unit; no partial tree is returned.
    pub fn new(config: &ProjectConfig, path: impl AsRef<Path>) -> KxResult<Self> {
        Self::load(config, path.as_ref(), &mut Vec::new())
    }

    /// Direct parts of this unit.
    pub fn parts(&self) -> impl Iterator<Item = &PartModel> {
        self.entities.iter().filter_map(Model::as_part)
    }

    /// Directly nested assembly units.
    pub fn assembly_units(&self) -> impl Iterator<Item = &AssemblyUnitModel> {
        self.entities.iter().filter_map(Model::as_assembly_unit)
    }

    fn load(config: &ProjectConfig, path: &Path, ancestors: &mut Vec<PathBuf>) -> KxResult<Self> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| KxError::OutsideModelsRoot(path.to_path_buf()))?;
        // Validated before any filesystem access so escaping paths are never read.
        let id = Identifier::from_relative_path(path, &name, config.id_separator)?;

        let folder = config.models_folder().join(path);
        let expected = config.assembly_model_file(&folder);
        if !expected.is_file() {
            return Err(KxError::MissingAssemblyModelFile { folder, expected });
        }

        if ancestors.len() >= config.max_depth {
            return Err(KxError::DepthLimitExceeded {
                folder,
                limit: config.max_depth,
            });
        }
        let canonical = folder.canonicalize().map_err(|source| KxError::Io {
            path: folder.clone(),
            source,
        })?;
        if ancestors.contains(&canonical) {
            return Err(KxError::SymlinkCycle(folder));
        }

        let info = ModelInfo::discover(config, path, id, path)?;

        ancestors.push(canonical);
        let entities = Self::load_entities(config, path, &folder, ancestors);
        ancestors.pop();

        Ok(Self {
            info,
            entities: entities?,
        })
    }

    fn load_entities(
        config: &ProjectConfig,
        path: &Path,
        folder: &Path,
        ancestors: &mut Vec<PathBuf>,
    ) -> KxResult<Vec<Model>> {
        let masks = Masks::new(config.part_masks())?;
        let mut entities = list_by_mask(folder, &masks)?
            .iter()
            .filter_map(|file| file.file_name().map(|f| path.join(f)))
            .map(|part| PartModel::new(config, part).map(Model::from))
            .collect::<KxResult<Vec<_>>>()?;

        for sub in subfolders(folder)? {
            if let Some(sub_name) = sub.file_name() {
                let unit = Self::load(config, &path.join(sub_name), ancestors)?;
                entities.push(unit.into());
            }
        }

        let mut seen: HashMap<&str, &Path> = HashMap::new();
        for model in &entities {
            let info = model.info();
            if let Some(first) = seen.insert(&info.id, &info.path) {
                return Err(KxError::DuplicateIdentifier {
                    id: info.id.clone(),
                    first: first.to_path_buf(),
                    second: info.path.clone(),
                });
            }
        }

        Ok(entities)
    }
}
