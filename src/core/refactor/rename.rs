//! Rename engine: move files and directories whose names carry placeholder tokens.
//!
//! Given a `FileSet` and a `SubstitutionMap`, this module:
//! 1. Plans a rename for every file basename containing a token
//! 2. Plans a rename for every ancestor directory (below the root) whose basename contains a token
//! 3. Flags collisions: two sources mapping to one target, or a target already on disk
//! 4. Applies renames, files first, then directories deepest first

use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};

use crate::output::StepError;

use super::substitute::SubstitutionMap;
use super::walk::{relative_display, FileSet};

// ============================================================================
// Types
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RenameKind {
    File,
    Directory,
}

/// A single planned move. Only the basename differs between `from` and `to`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileRename {
    pub kind: RenameKind,
    pub from: PathBuf,
    pub to: PathBuf,
}

/// A warning about a potential collision.
#[derive(Debug, Clone, Serialize)]
pub struct RenameWarning {
    /// Warning category.
    pub kind: String,
    /// Target path relative to root.
    pub file: String,
    /// Human-readable description.
    pub message: String,
}

/// The planned renames for a file set.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RenamePlan {
    pub renames: Vec<FileRename>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<RenameWarning>,
}

/// A rename that reached the disk, relative to root.
#[derive(Debug, Clone, Serialize)]
pub struct AppliedRename {
    pub from: String,
    pub to: String,
}

/// The outcome of applying a plan.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RenameReport {
    pub renamed: Vec<AppliedRename>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<RenameWarning>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<StepError>,
}

impl RenameReport {
    pub fn names_updated(&self) -> bool {
        !self.renamed.is_empty()
    }
}

// ============================================================================
// Planning
// ============================================================================

/// Replace tokens inside a basename, leaving the rest of it as is.
/// Returns `None` when the basename carries no token.
pub fn renamed_basename(name: &str, map: &SubstitutionMap) -> Option<String> {
    let (renamed, count) = map.apply(name);
    (count > 0 && renamed != name).then_some(renamed)
}

fn plan_one(path: &Path, kind: RenameKind, map: &SubstitutionMap) -> Option<FileRename> {
    let name = path.file_name()?.to_str()?;
    let new_name = renamed_basename(name, map)?;
    Some(FileRename {
        kind,
        from: path.to_path_buf(),
        to: path.with_file_name(new_name),
    })
}

/// Plan file and directory renames for every path in the set.
pub fn plan_renames(files: &FileSet, map: &SubstitutionMap) -> RenamePlan {
    let mut renames: Vec<FileRename> = files
        .files
        .iter()
        .filter_map(|path| plan_one(path, RenameKind::File, map))
        .collect();

    // Ancestor directories strictly below the root, deduplicated.
    let mut dirs: BTreeSet<PathBuf> = BTreeSet::new();
    for path in &files.files {
        let mut current = path.parent();
        while let Some(dir) = current {
            if dir == files.root || !dir.starts_with(&files.root) {
                break;
            }
            dirs.insert(dir.to_path_buf());
            current = dir.parent();
        }
    }

    let mut dir_renames: Vec<FileRename> = dirs
        .iter()
        .filter_map(|dir| plan_one(dir, RenameKind::Directory, map))
        .collect();
    dir_renames.sort_by_key(|r| std::cmp::Reverse(r.from.components().count()));
    renames.extend(dir_renames);

    let warnings = detect_collisions(&renames, &files.root);

    RenamePlan { renames, warnings }
}

// ============================================================================
// Collision detection
// ============================================================================

/// Detect potential collisions in a rename plan.
///
/// Checks for:
/// 1. Rename targets that already exist on disk
/// 2. Two different sources planned onto the same target
fn detect_collisions(renames: &[FileRename], root: &Path) -> Vec<RenameWarning> {
    let mut warnings = Vec::new();
    let mut targets: HashMap<&Path, &Path> = HashMap::new();

    for rename in renames {
        let target = relative_display(root, &rename.to);
        let source = relative_display(root, &rename.from);

        if rename.to.exists() {
            warnings.push(RenameWarning {
                kind: "target_exists".to_string(),
                file: target.clone(),
                message: format!(
                    "Rename target '{}' already exists on disk (from '{}')",
                    target, source
                ),
            });
        }

        if let Some(first) = targets.insert(&rename.to, &rename.from) {
            warnings.push(RenameWarning {
                kind: "duplicate_target".to_string(),
                file: target.clone(),
                message: format!(
                    "Both '{}' and '{}' would be renamed to '{}'",
                    relative_display(root, first),
                    source,
                    target
                ),
            });
        }
    }

    warnings
}

// ============================================================================
// Apply renames
// ============================================================================

/// Apply a rename plan to disk.
///
/// A rename whose target already exists is skipped rather than overwritten.
/// IO failures are recorded and the remaining renames still run.
pub fn apply_renames(plan: &RenamePlan, root: &Path) -> RenameReport {
    let mut report = RenameReport {
        warnings: plan.warnings.clone(),
        ..RenameReport::default()
    };

    for rename in &plan.renames {
        let from = relative_display(root, &rename.from);
        let to = relative_display(root, &rename.to);

        if !rename.from.exists() {
            continue;
        }

        if rename.to.exists() {
            crate::log_status!("rename", "Skipping {}: {} already exists", from, to);
            report.errors.push(StepError::new(
                from,
                format!("target '{}' already exists", to),
            ));
            continue;
        }

        match std::fs::rename(&rename.from, &rename.to) {
            Ok(()) => {
                crate::log_status!("rename", "Renamed {} -> {}", from, to);
                report.renamed.push(AppliedRename { from, to });
            }
            Err(e) => {
                crate::log_status!("rename", "Error renaming {}: {}", from, e);
                report.errors.push(StepError::new(from, e.to_string()));
            }
        }
    }

    report
}

// ============================================================================
// Tests
// ============================================================================
