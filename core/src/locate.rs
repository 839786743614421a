//! Series directory discovery and representative-file selection

use globset::GlobMatcher;
use log::warn;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Lists every directory under `root` whose name matches `pattern`
///
/// Performs a recursive descent of `root` (the root itself is never a
/// candidate) and returns, in lexicographic order, each directory whose
/// final path segment matches the glob. Unreadable entries inside the
/// subtree are skipped with a warning; they never abort the walk.
pub fn list_series_dirs(root: &Path, pattern: &GlobMatcher) -> Vec<PathBuf> {
    WalkDir::new(root)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                warn!("skipping unreadable entry under {}: {}", root.display(), err);
                None
            }
        })
        .filter(|entry| entry.file_type().is_dir())
        .filter(|entry| pattern.is_match(Path::new(entry.file_name())))
        .map(|entry| entry.into_path())
        .collect()
}

/// Returns the first regular file found anywhere under `dir`
///
/// Traversal is recursive and lexicographic by file name, so the result is
/// deterministic for a given tree. Returns `None` when the subtree contains
/// no regular file at any depth.
///
/// Precondition: this is the representative-sampling policy for a series —
/// only one file per series is ever inspected, on the assumption that all
/// files within a series share identical series-level metadata. Trees that
/// violate that assumption yield whichever file sorts first.
pub fn first_file(dir: &Path) -> Option<PathBuf> {
    WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .find(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
}
