use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::assembly::AssemblyUnitModel;
use crate::config::ProjectConfig;
use crate::conventions::subfolders;
use crate::error::{KxError, KxResult};
use crate::identifier::Identifier;
use crate::model::Model;
use crate::part::PartModel;

/// Resolves identifiers to freshly discovered models.
///
/// Nothing is cached: every lookup reads the filesystem again.
#[derive(Debug, Clone)]
pub struct ModelRegistry {
    config: ProjectConfig,
}

impl ModelRegistry {
    /// Open the registry for a project. Fails if the Models folder is missing.
    pub fn open(config: ProjectConfig) -> KxResult<Self> {
        let models = config.models_folder();
        if !models.is_dir() {
            return Err(KxError::RootNotFound(models));
        }
        Ok(Self { config })
    }

    /// The project configuration.
    pub fn config(&self) -> &ProjectConfig {
        &self.config
    }

    /// Location of a model-relative path on disk.
    pub fn absolute(&self, path: &Path) -> PathBuf {
        self.config.models_folder().join(path)
    }

    /// The part named by `identifier`.
    ///
    /// The part file is not required to exist.
    pub fn get_part(&self, identifier: &str) -> KxResult<PartModel> {
        PartModel::new(&self.config, self.part_path(identifier)?)
    }

    /// The assembly unit named by `identifier`, with its whole subtree.
    pub fn get_assembly_unit(&self, identifier: &str) -> KxResult<AssemblyUnitModel> {
        let id = Identifier::parse(identifier, self.config.id_separator)?;
        AssemblyUnitModel::new(&self.config, id.to_relative_path())
    }

    /// A part if its model file exists, otherwise an assembly unit.
    pub fn resolve(&self, identifier: &str) -> KxResult<Model> {
        let part_path = self.part_path(identifier)?;
        if self.absolute(&part_path).is_file() {
            return PartModel::new(&self.config, part_path).map(Model::from);
        }
        self.get_assembly_unit(identifier).map(Model::from)
    }

    /// Every assembly unit directly inside the Models folder.
    pub fn assemblies(&self) -> KxResult<Vec<AssemblyUnitModel>> {
        subfolders(&self.config.models_folder())?
            .iter()
            .filter_map(|folder| folder.file_name())
            .map(|name| AssemblyUnitModel::new(&self.config, name))
            .collect()
    }

    fn part_path(&self, identifier: &str) -> KxResult<PathBuf> {
        let id = Identifier::parse(identifier, self.config.id_separator)?;
        let mut path = OsString::from(id.to_relative_path());
        path.push(".");
        path.push(&self.config.part_extension);
        Ok(PathBuf::from(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::Fixture;

    fn klyax() -> Fixture {
        let fx = Fixture::new();
        fx.touch("Klyax/Klyax.unit");
        fx.touch("Klyax/Arm.part");
        fx.touch("Klyax/Arm.stp");
        fx.touch("Klyax/Gripper/Gripper.unit");
        fx.touch("Klyax/Gripper/Finger.v2.part");
        fx
    }

    fn collect_models(unit: &AssemblyUnitModel, out: &mut Vec<Model>) {
        for model in &unit.entities {
            out.push(model.clone());
            if let Model::AssemblyUnit(child) = model {
                collect_models(child, out);
            }
        }
    }

    #[test]
    fn missing_models_folder_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = ModelRegistry::open(ProjectConfig::new(dir.path())).unwrap_err();
        assert!(matches!(err, KxError::RootNotFound(_)));
    }

    #[test]
    fn resolves_assembly_by_identifier() {
        let fx = klyax();
        let registry = ModelRegistry::open(fx.config.clone()).unwrap();

        let unit = registry.get_assembly_unit("Klyax").unwrap();
        let names: Vec<_> = unit.entities.iter().map(Model::name).collect();
        assert_eq!(names, ["Arm", "Gripper"]);

        let gripper = registry.get_assembly_unit("Klyax/Gripper").unwrap();
        assert_eq!(gripper.info.path, PathBuf::from("Klyax/Gripper"));
        assert_eq!(gripper.parts().count(), 1);
    }

    #[test]
    fn resolves_part_by_identifier() {
        let fx = klyax();
        let registry = ModelRegistry::open(fx.config.clone()).unwrap();

        let part = registry.get_part("Klyax/Arm").unwrap();
        assert_eq!(part.info.path, PathBuf::from("Klyax/Arm.part"));
        assert_eq!(part.transitions, [PathBuf::from("Klyax/Arm.stp")]);

        let dotted = registry.get_part("Klyax/Gripper/Finger.v2").unwrap();
        assert_eq!(dotted.info.path, PathBuf::from("Klyax/Gripper/Finger.v2.part"));
    }

    #[test]
    fn every_identifier_round_trips() {
        let fx = klyax();
        let registry = ModelRegistry::open(fx.config.clone()).unwrap();
        let root = registry.get_assembly_unit("Klyax").unwrap();

        let mut models = Vec::new();
        collect_models(&root, &mut models);
        assert_eq!(models.len(), 3);

        for model in models {
            let resolved = match &model {
                Model::Part(_) => registry.get_part(model.id()).map(Model::from),
                Model::AssemblyUnit(_) => registry.get_assembly_unit(model.id()).map(Model::from),
            }
            .unwrap();
            assert_eq!(resolved.info().path, model.info().path);
            assert_eq!(resolved, model);
        }
    }

    #[test]
    fn unknown_part_is_not_an_error() {
        let fx = klyax();
        let registry = ModelRegistry::open(fx.config.clone()).unwrap();

        let ghost = registry.get_part("Klyax/Ghost").unwrap();
        assert!(ghost.info.images.is_empty());
        assert!(ghost.transitions.is_empty());
    }

    #[test]
    fn resolve_picks_part_then_assembly() {
        let fx = klyax();
        let registry = ModelRegistry::open(fx.config.clone()).unwrap();

        assert!(registry.resolve("Klyax/Arm").unwrap().as_part().is_some());
        assert!(
            registry
                .resolve("Klyax/Gripper")
                .unwrap()
                .as_assembly_unit()
                .is_some()
        );
        assert!(matches!(
            registry.resolve("Klyax/Nothing"),
            Err(KxError::MissingAssemblyModelFile { .. })
        ));
    }

    #[test]
    fn broken_subfolder_fails_whole_resolve() {
        let fx = klyax();
        fx.mkdir("Klyax/Broken");
        let registry = ModelRegistry::open(fx.config.clone()).unwrap();

        assert!(matches!(
            registry.get_assembly_unit("Klyax"),
            Err(KxError::MissingAssemblyModelFile { .. })
        ));
        assert!(registry.get_assembly_unit("Klyax/Gripper").is_ok());
    }

    #[test]
    fn malformed_identifier_is_rejected() {
        let fx = klyax();
        let registry = ModelRegistry::open(fx.config.clone()).unwrap();

        for id in ["", "Klyax//Arm", "../Klyax"] {
            assert!(matches!(
                registry.resolve(id),
                Err(KxError::InvalidIdentifier { .. })
            ));
        }
    }

    #[test]
    fn custom_separator_identifiers() {
        let fx = klyax();
        let registry = ModelRegistry::open(fx.config.clone().with_id_separator(':')).unwrap();

        let unit = registry.get_assembly_unit("Klyax").unwrap();
        assert_eq!(unit.entities[1].id(), "Klyax:Gripper");
        assert!(registry.get_assembly_unit("Klyax:Gripper").is_ok());
    }

    #[test]
    fn colliding_siblings_fail_resolve() {
        let fx = klyax();
        fx.touch("Klyax/Gripper.part");
        let registry = ModelRegistry::open(fx.config.clone()).unwrap();

        assert!(registry.resolve("Klyax/Gripper").unwrap().as_part().is_some());
        assert!(matches!(
            registry.get_assembly_unit("Klyax"),
            Err(KxError::DuplicateIdentifier { .. })
        ));
        assert!(matches!(
            registry.assemblies(),
            Err(KxError::DuplicateIdentifier { .. })
        ));
    }

    #[test]
    fn config_is_kept() {
        let fx = klyax();
        let registry = ModelRegistry::open(fx.config.clone().with_id_separator(':')).unwrap();
        assert_eq!(registry.config().id_separator, ':');
        assert_eq!(registry.config().models_folder(), fx.models());
    }

    #[test]
    fn lists_top_level_assemblies() {
        let fx = klyax();
        fx.touch("Rover/Rover.unit");
        let registry = ModelRegistry::open(fx.config.clone()).unwrap();

        let units = registry.assemblies().unwrap();
        let ids: Vec<_> = units.iter().map(|u| u.info.id.as_str()).collect();
        assert_eq!(ids, ["Klyax", "Rover"]);
    }
}
