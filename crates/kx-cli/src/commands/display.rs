use std::path::Path;

pub fn run(root: &Path, identifier: &str, json: bool) -> Result<(), String> {
    let registry = super::open_registry(root)?;

    tracing::debug!(identifier, "resolving model");
    let model = registry.resolve(identifier).map_err(|e| e.to_string())?;

    if json {
        let out = serde_json::to_string_pretty(&model)
            .map_err(|e| format!("JSON serialization error: {e}"))?;
        println!("{out}");
    } else {
        super::print_model(&model, 0);
    }

    Ok(())
}
