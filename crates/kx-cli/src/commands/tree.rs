use std::path::Path;

use kx_core::Model;

pub fn run(root: &Path, json: bool) -> Result<(), String> {
    let registry = super::open_registry(root)?;
    let units = registry.assemblies().map_err(|e| e.to_string())?;

    if json {
        let out = serde_json::to_string_pretty(&units)
            .map_err(|e| format!("JSON serialization error: {e}"))?;
        println!("{out}");
        return Ok(());
    }

    if units.is_empty() {
        println!(
            "  No assembly units found in {}.",
            registry.config().models_folder().display()
        );
        return Ok(());
    }

    for unit in units {
        super::print_model(&Model::from(unit), 0);
        println!();
    }

    Ok(())
}
