//! Project file walk: collect every regular file under the root.

use glob_match::glob_match;
use std::path::{Path, PathBuf};

use crate::output::StepError;

/// Regular files found under a project root.
#[derive(Debug, Clone, Default)]
pub struct FileSet {
    pub root: PathBuf,
    /// Absolute paths, in directory-listing order.
    pub files: Vec<PathBuf>,
    /// Subtrees that could not be read.
    pub errors: Vec<StepError>,
}

impl FileSet {
    /// Path relative to the walk root, for display.
    pub fn relative(&self, path: &Path) -> String {
        relative_display(&self.root, path)
    }
}

pub(crate) fn relative_display(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .to_string()
}

fn is_skipped(name: &str, skip: &[String]) -> bool {
    skip.iter()
        .any(|pattern| pattern == name || glob_match(pattern, name))
}

/// Walk `root`, skipping entries whose name matches any `skip` pattern at any depth.
///
/// Unreadable directories are logged and skipped; the walk never aborts.
pub fn walk_files(root: &Path, skip: &[String]) -> FileSet {
    let mut set = FileSet {
        root: root.to_path_buf(),
        ..FileSet::default()
    };
    walk_recursive(root, skip, &mut set);
    set
}

fn walk_recursive(dir: &Path, skip: &[String], set: &mut FileSet) {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            let rel = set.relative(dir);
            crate::log_status!("walk", "Skipping {}: {}", display_or_root(&rel), e);
            set.errors.push(StepError::new(display_or_root(&rel), e.to_string()));
            return;
        }
    };

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                let rel = set.relative(dir);
                crate::log_status!("walk", "Skipping entry in {}: {}", display_or_root(&rel), e);
                set.errors.push(StepError::new(display_or_root(&rel), e.to_string()));
                continue;
            }
        };

        let name = entry.file_name().to_string_lossy().to_string();
        if is_skipped(&name, skip) {
            continue;
        }

        let Ok(file_type) = entry.file_type() else {
            continue;
        };

        if file_type.is_dir() {
            walk_recursive(&entry.path(), skip, set);
        } else if file_type.is_file() {
            set.files.push(entry.path());
        }
    }
}

fn display_or_root(rel: &str) -> String {
    if rel.is_empty() {
        ".".to_string()
    } else {
        rel.to_string()
    }
}
