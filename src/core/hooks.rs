//! Git hook manager installation.
//!
//! Hooks are wired into the repository by running the configured install
//! command (`npx husky install` by default) in the project root. Only
//! meaningful once a repository exists.

use std::path::Path;

use crate::output::{StepError, StepId, StepReport};
use crate::utils::command::{run_command_line, ProcessRunner};

/// Result of running the hook install command.
#[derive(Debug, Clone)]
pub struct HookCommandResult {
    pub command: String,
    pub success: bool,
    pub stderr: String,
}

/// Run the install command once. Failures are returned, never raised.
pub fn run_install(runner: &dyn ProcessRunner, root: &Path, command: &[String]) -> HookCommandResult {
    let display = command.join(" ");
    crate::log_status!("hooks", "Running {}", display);

    let output = run_command_line(runner, root, command);
    if !output.success {
        crate::log_status!("hooks", "{} failed: {}", display, output.error_text());
    }

    HookCommandResult {
        command: display,
        success: output.success,
        stderr: output.error_text(),
    }
}

/// Install git hooks and report the outcome as a setup step.
pub fn install(runner: &dyn ProcessRunner, root: &Path, command: &[String]) -> StepReport {
    let result = run_install(runner, root, command);

    if result.success {
        StepReport::completed(
            StepId::Hooks,
            "Git hooks installed",
            vec![result.command],
            Vec::new(),
            Vec::new(),
        )
    } else {
        StepReport::failed(
            StepId::Hooks,
            "Git hook installation failed",
            vec![StepError::new(result.command, result.stderr)],
        )
    }
}
