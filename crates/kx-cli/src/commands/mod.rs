pub mod cleanup;
pub mod display;
pub mod tree;

use std::path::Path;

use colored::Colorize;
use kx_core::{AssemblyUnitModel, Model, ModelRegistry, PartModel, ProjectConfig};

/// Load the project configuration under `root`.
fn load_config(root: &Path) -> Result<ProjectConfig, String> {
    let config = ProjectConfig::load(root).map_err(|e| e.to_string())?;
    tracing::debug!(models = %config.models_folder().display(), "loaded project config");
    Ok(config)
}

/// Open the model registry for the project under `root`.
fn open_registry(root: &Path) -> Result<ModelRegistry, String> {
    ModelRegistry::open(load_config(root)?).map_err(|e| e.to_string())
}

const INDENT: &str = "    ";

/// Print a model and everything below it, indented by `depth`.
fn print_model(model: &Model, depth: usize) {
    print_header(model, depth);
    match model {
        Model::Part(part) => print_part(part, depth),
        Model::AssemblyUnit(unit) => print_assembly_unit(unit, depth),
    }
}

fn print_header(model: &Model, depth: usize) {
    let info = model.info();
    let pad = INDENT.repeat(depth);
    println!("  {pad}{} [{}]", info.id.bold(), model.kind_name().dimmed());

    if !info.images.is_empty() {
        println!("  {pad}{INDENT}images:      {}", file_names(&info.images));
    }
}

fn print_part(part: &PartModel, depth: usize) {
    if !part.transitions.is_empty() {
        let pad = INDENT.repeat(depth);
        println!("  {pad}{INDENT}transitions: {}", file_names(&part.transitions));
    }
}

fn print_assembly_unit(unit: &AssemblyUnitModel, depth: usize) {
    if !unit.entities.is_empty() {
        let pad = INDENT.repeat(depth);
        println!("  {pad}{INDENT}models:      {}", unit.entities.len());
        for model in &unit.entities {
            print_model(model, depth + 1);
        }
    }
}

fn file_names(paths: &[std::path::PathBuf]) -> String {
    paths
        .iter()
        .filter_map(|p| p.file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join(", ")
}
