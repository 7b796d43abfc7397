use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use comfy_table::{ContentArrangement, Table};
use kx_core::{Masks, search_by_mask_recursive};

pub fn run(root: &Path, masks: &[String], delete: bool) -> Result<(), String> {
    let masks = Masks::new(masks).map_err(|e| e.to_string())?;
    if masks.is_empty() {
        println!("  No masks given, nothing to clean.");
        return Ok(());
    }
    tracing::debug!(masks = masks.len(), delete, "cleaning up");

    let config = super::load_config(root)?;

    let removed: usize = [config.images_folder(), config.models_folder()]
        .iter()
        .map(|folder| cleanup_folder(folder, &masks, delete))
        .sum();

    if delete {
        println!("  {removed} files removed");
    }

    Ok(())
}

/// Returns the number of files removed from `folder`.
fn cleanup_folder(folder: &Path, masks: &Masks, delete: bool) -> usize {
    tracing::info!(folder = %folder.display(), "scanning");

    if !folder.is_dir() {
        tracing::error!("folder not found: {}", folder.display());
        return 0;
    }

    // Overlapping masks report the same file more than once.
    let mut seen = HashSet::new();
    let files: Vec<PathBuf> = search_by_mask_recursive(folder, masks)
        .filter(|f| seen.insert(f.clone()))
        .collect();

    if files.is_empty() {
        println!("  No matching files in {} (already clean)", folder.display());
        return 0;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "File"]);
    for (i, file) in files.iter().enumerate() {
        let shown = file.strip_prefix(folder).unwrap_or(file);
        table.add_row(vec![(i + 1).to_string(), shown.display().to_string()]);
    }

    println!("  {} files matched in {}", files.len(), folder.display());
    println!("{table}");

    if !delete {
        println!("  Dry run: no files deleted. Re-run with -d (--delete) to remove them.");
        return 0;
    }

    files.iter().filter(|file| remove_file(file)).count()
}

fn remove_file(file: &Path) -> bool {
    match fs::remove_file(file) {
        Ok(()) => {
            println!("  Removed: {}", file.display());
            true
        }
        Err(e) => {
            tracing::error!("failed to remove {}: {e}", file.display());
            false
        }
    }
}
