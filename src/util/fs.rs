//! Filesystem helpers for Btrieve file discovery.
//!
//! Provides [`find_btrieve_candidates`] to recursively search a directory
//! for files that look like Btrieve v5 data files: a recognized
//! extension, or an extension-less file whose size is a multiple of the
//! page size. Used by the `scan` subcommand.

use std::path::{Path, PathBuf};

use crate::btrieve::constants::{MIN_ANALYZABLE_SIZE, PAGE_SIZE};
use crate::error::BtrError;

const BTRIEVE_EXTENSIONS: &[&str] = &["btr", "dat", "idx", "key"];

/// Recursively find candidate Btrieve files under `dir`.
///
/// A file is a candidate if its extension is one of [`BTRIEVE_EXTENSIONS`],
/// or it has no extension at all and its size is both at least
/// [`MIN_ANALYZABLE_SIZE`] and a multiple of [`PAGE_SIZE`]. Results are
/// sorted by path.
pub fn find_btrieve_candidates(dir: &Path) -> Result<Vec<PathBuf>, BtrError> {
    let mut files = Vec::new();
    walk(dir, &mut files)?;
    files.sort();
    Ok(files)
}

fn walk(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), BtrError> {
    let entries = std::fs::read_dir(dir)
        .map_err(|e| BtrError::File(format!("Cannot read directory {}: {}", dir.display(), e)))?;

    for entry in entries {
        let entry = entry.map_err(|e| BtrError::File(format!("Cannot read directory entry: {}", e)))?;
        let path = entry.path();

        if path.is_dir() {
            walk(&path, out)?;
        } else if is_candidate(&path) {
            out.push(path);
        }
    }

    Ok(())
}

fn is_candidate(path: &Path) -> bool {
    match path.extension() {
        Some(ext) => BTRIEVE_EXTENSIONS.iter().any(|e| ext == *e),
        None => std::fs::metadata(path)
            .map(|m| m.len() >= MIN_ANALYZABLE_SIZE && m.len() % PAGE_SIZE == 0)
            .unwrap_or(false),
    }
}
