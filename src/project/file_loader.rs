//! Source discovery: collecting `.swift` files under input paths.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::error::PipelineError;
use super::pipeline::SourceInput;
use crate::base::constants::SWIFT_EXT;

fn is_swift_file(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(SWIFT_EXT)
}

fn is_excluded(path: &Path, excludes: &[PathBuf]) -> bool {
    excludes.iter().any(|exclude| path.starts_with(exclude))
}

/// Collect Swift files under `root` (a file or a directory), sorted by path.
///
/// # Errors
///
/// Returns [`PipelineError::PathNotFound`] if `root` does not exist.
pub fn collect_swift_files(root: &Path, excludes: &[PathBuf]) -> Result<Vec<PathBuf>, PipelineError> {
    if !root.exists() {
        return Err(PipelineError::PathNotFound(root.to_path_buf()));
    }
    if is_excluded(root, excludes) {
        return Ok(Vec::new());
    }
    if root.is_file() {
        return Ok(if is_swift_file(root) {
            vec![root.to_path_buf()]
        } else {
            Vec::new()
        });
    }

    let mut files = Vec::new();
    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_excluded(entry.path(), excludes));
    for entry in walker {
        match entry {
            Ok(entry) if entry.file_type().is_file() && is_swift_file(entry.path()) => {
                files.push(entry.into_path());
            }
            Ok(_) => {}
            Err(error) => tracing::warn!(%error, "skipping unreadable directory entry"),
        }
    }
    Ok(files)
}

/// Read every Swift file under `paths` into [`SourceInput`]s, sorted and
/// without duplicates.
///
/// # Errors
///
/// Returns an error if an input path does not exist or a file cannot be
/// read as UTF-8.
pub fn load_sources(paths: &[PathBuf], excludes: &[PathBuf]) -> Result<Vec<SourceInput>, PipelineError> {
    let mut files = Vec::new();
    for root in paths {
        files.extend(collect_swift_files(root, excludes)?);
    }
    files.sort();
    files.dedup();

    files
        .into_iter()
        .map(|path| match fs::read_to_string(&path) {
            Ok(text) => Ok(SourceInput::new(path.to_string_lossy(), text)),
            Err(source) => Err(PipelineError::Unreadable { path, source }),
        })
        .collect()
}
