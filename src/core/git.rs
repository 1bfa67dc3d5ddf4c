//! Fresh repository setup: discard existing history, init, stage, commit.

use std::path::Path;

use crate::output::{StepError, StepId, StepReport};
use crate::utils::command::{command_line, ProcessRunner};

/// Remove any existing `.git` entry under `root`. Returns whether one existed.
pub fn remove_repository(root: &Path) -> std::io::Result<bool> {
    let git_path = root.join(".git");
    match std::fs::symlink_metadata(&git_path) {
        Ok(meta) if meta.is_dir() => std::fs::remove_dir_all(&git_path).map(|_| true),
        // Worktrees and submodules keep a `.git` file pointing elsewhere.
        Ok(_) => std::fs::remove_file(&git_path).map(|_| true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

/// Start a new repository at `root` with everything committed.
///
/// Runs `git init`, `git add .` and `git commit -m <message>` in order and
/// stops at the first failure. Existing history is removed first.
pub fn reinitialize(runner: &dyn ProcessRunner, root: &Path, message: &str) -> StepReport {
    let mut changes = Vec::new();

    match remove_repository(root) {
        Ok(true) => {
            crate::log_status!("git", "Removed existing .git");
            changes.push("Removed existing .git".to_string());
        }
        Ok(false) => {}
        Err(e) => {
            crate::log_status!("git", "Could not remove .git: {}", e);
            return StepReport::failed(
                StepId::Git,
                "Git initialization failed",
                vec![StepError::new(".git", e.to_string())],
            );
        }
    }

    let steps: [&[&str]; 3] = [&["init"], &["add", "."], &["commit", "-m", message]];

    for args in steps {
        let display = command_line("git", args);
        crate::log_status!("git", "Running {}", display);

        let output = runner.run(root, "git", args);
        if !output.success {
            let text = output.error_text();
            crate::log_status!("git", "{} failed: {}", display, text);
            return StepReport::completed(
                StepId::Git,
                "Git initialization failed",
                changes,
                Vec::new(),
                vec![StepError::new(display, text)],
            );
        }
        changes.push(display);
    }

    StepReport::completed(
        StepId::Git,
        "Git repository initialized",
        changes,
        Vec::new(),
        Vec::new(),
    )
}
