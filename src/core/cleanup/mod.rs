//! Scaffold cleanup: remove files that only matter before a theme is set up.
//!
//! Paths are glob patterns relative to the project root (CI config, the
//! initializer itself, styling templates, scaffold docs). Removal is
//! irreversible.

use serde::Serialize;
use std::path::{Component, Path, PathBuf};

use crate::output::{StepError, StepId, StepReport};

/// Result of a cleanup pass.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CleanupResult {
    pub removed: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<StepError>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub hints: Vec<String>,
}

/// Existing paths under `root` matching any of `patterns`, outermost first and deduplicated.
///
/// Patterns with a `..` component are rejected so removal stays inside `root`.
pub fn find_targets(root: &Path, patterns: &[String]) -> (Vec<PathBuf>, Vec<StepError>) {
    let escaped_root = glob::Pattern::escape(&root.to_string_lossy());
    let mut targets: Vec<PathBuf> = Vec::new();
    let mut errors = Vec::new();

    for pattern in patterns {
        if Path::new(pattern).components().any(|c| c == Component::ParentDir) {
            crate::log_status!("cleanup", "Ignoring pattern outside the project: {}", pattern);
            errors.push(StepError::new(
                pattern.clone(),
                "pattern must stay inside the project root",
            ));
            continue;
        }

        let full = format!("{}/{}", escaped_root, pattern.trim_start_matches('/'));
        let paths = match glob::glob(&full) {
            Ok(paths) => paths,
            Err(e) => {
                errors.push(StepError::new(pattern.clone(), e.to_string()));
                continue;
            }
        };

        for entry in paths {
            match entry {
                Ok(path) => targets.push(path),
                Err(e) => errors.push(StepError::new(pattern.clone(), e.to_string())),
            }
        }
    }

    targets.sort();
    targets.dedup();
    // Nested matches disappear with their ancestor.
    let mut outermost: Vec<PathBuf> = Vec::new();
    for path in targets {
        if !outermost.iter().any(|kept| path.starts_with(kept)) {
            outermost.push(path);
        }
    }

    (outermost, errors)
}

/// Remove every scaffold-only path that exists.
pub fn remove_scaffold(root: &Path, patterns: &[String]) -> CleanupResult {
    let (targets, errors) = find_targets(root, patterns);
    let mut result = CleanupResult {
        errors,
        ..CleanupResult::default()
    };

    for path in targets {
        let relative = path
            .strip_prefix(root)
            .unwrap_or(path.as_path())
            .to_string_lossy()
            .to_string();

        let removed = if path.is_dir() {
            std::fs::remove_dir_all(&path)
        } else {
            std::fs::remove_file(&path)
        };

        match removed {
            Ok(()) => {
                crate::log_status!("cleanup", "Removed {}", relative);
                result.removed.push(relative);
            }
            Err(e) => {
                crate::log_status!("cleanup", "Error removing {}: {}", relative, e);
                result.errors.push(StepError::new(relative, e.to_string()));
            }
        }
    }

    if result.removed.is_empty() && result.errors.is_empty() {
        result.hints.push("No cleanup required".to_string());
    }

    result
}

/// Run cleanup and report it as a setup step.
pub fn clean(root: &Path, patterns: &[String]) -> StepReport {
    let result = remove_scaffold(root, patterns);

    let message = if result.removed.is_empty() && result.errors.is_empty() {
        "No cleanup required".to_string()
    } else if result.errors.is_empty() {
        "Cleanup completed".to_string()
    } else {
        "Cleanup incomplete".to_string()
    };

    let changes = result
        .removed
        .into_iter()
        .map(|path| format!("Removed {}", path))
        .collect();

    StepReport::completed(StepId::Cleanup, message, changes, Vec::new(), result.errors)
}
