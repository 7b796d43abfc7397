//! Glob-mask file search used for model discovery and cleanup.
//!
//! Masks match file names only, never directories. Within a single mask the
//! results are ordered by file name so two runs over the same tree agree;
//! across masks the caller's order is kept. The lazy searches skip unreadable
//! folders and repeat files matched by several masks; `list_by_mask` and
//! `subfolders` fail on unreadable folders instead.

use std::path::{Path, PathBuf};

use glob::Pattern;
use walkdir::WalkDir;

use crate::error::{KxError, KxResult};

/// An ordered set of compiled glob masks.
#[derive(Debug, Clone, Default)]
pub struct Masks {
    patterns: Vec<Pattern>,
}

impl Masks {
    /// Compile the given masks, e.g. `["*.bak", "*.log"]`.
    pub fn new<I, S>(masks: I) -> KxResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = masks
            .into_iter()
            .map(|mask| {
                let mask = mask.as_ref();
                Pattern::new(mask).map_err(|source| KxError::InvalidMask {
                    mask: mask.to_string(),
                    source,
                })
            })
            .collect::<KxResult<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    /// Masks `<name>*.<ext>` for each extension. `name` is matched literally.
    pub fn side_files(name: &str, extensions: &[String]) -> KxResult<Self> {
        let prefix = Pattern::escape(name);
        Self::new(
            extensions
                .iter()
                .map(|ext| format!("{prefix}*.{}", Pattern::escape(ext))),
        )
    }

    /// Number of masks.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// True when there are no masks.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// True if any mask matches `file_name`.
    pub fn matches(&self, file_name: &str) -> bool {
        self.patterns.iter().any(|p| p.matches(file_name))
    }
}

/// Files directly inside `folder` matching each mask in turn.
pub fn search_by_mask<'a>(
    folder: &'a Path,
    masks: &'a Masks,
) -> impl Iterator<Item = PathBuf> + 'a {
    masks
        .patterns
        .iter()
        .flat_map(move |pattern| matching_children(folder, pattern))
}

/// Files anywhere below `folder` matching each mask in turn.
///
/// Symlinked directories are not descended into.
pub fn search_by_mask_recursive<'a>(
    folder: &'a Path,
    masks: &'a Masks,
) -> impl Iterator<Item = PathBuf> + 'a {
    masks.patterns.iter().flat_map(move |pattern| {
        WalkDir::new(folder)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(Result::ok)
            .filter(|entry| !entry.path().is_dir())
            .filter(move |entry| pattern.matches(&entry.file_name().to_string_lossy()))
            .map(walkdir::DirEntry::into_path)
    })
}

/// Files directly inside `folder` matching each mask in turn, failing if
/// the folder cannot be listed. A file matched by several masks is kept once.
pub fn list_by_mask(folder: &Path, masks: &Masks) -> KxResult<Vec<PathBuf>> {
    let children = read_children(folder)?;
    let mut files: Vec<PathBuf> = Vec::new();
    for pattern in &masks.patterns {
        for child in &children {
            let matched = child
                .file_name()
                .is_some_and(|n| pattern.matches(&n.to_string_lossy()));
            if matched && !child.is_dir() && !files.contains(child) {
                files.push(child.clone());
            }
        }
    }
    Ok(files)
}

/// Immediate subfolders of `folder`, ordered by name.
pub fn subfolders(folder: &Path) -> KxResult<Vec<PathBuf>> {
    Ok(read_children(folder)?
        .into_iter()
        .filter(|p| p.is_dir())
        .collect())
}

/// Every entry of `folder`, ordered by name.
fn read_children(folder: &Path) -> KxResult<Vec<PathBuf>> {
    let io_error = |source| KxError::Io {
        path: folder.to_path_buf(),
        source,
    };
    let mut children = std::fs::read_dir(folder)
        .map_err(io_error)?
        .map(|entry| entry.map(|e| e.path()).map_err(io_error))
        .collect::<KxResult<Vec<_>>>()?;
    children.sort();
    Ok(children)
}

fn matching_children(folder: &Path, pattern: &Pattern) -> Vec<PathBuf> {
    read_children(folder)
        .unwrap_or_default()
        .into_iter()
        .filter(|p| {
            p.file_name()
                .is_some_and(|n| pattern.matches(&n.to_string_lossy()))
        })
        .filter(|p| !p.is_dir())
        .collect()
}
