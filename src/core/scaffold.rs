//! Styling framework scaffold: template files plus a dependency install.

use std::fs;
use std::path::Path;

use crate::defaults::StylingConfig;
use crate::output::{StepError, StepId, StepReport};
use crate::refactor::walk_files;
use crate::utils::command::{run_command_line, ProcessRunner};

/// Files copied and files left alone because they already existed.
#[derive(Debug, Clone, Default)]
pub struct TemplateCopy {
    pub copied: Vec<String>,
    pub kept: Vec<String>,
    pub errors: Vec<StepError>,
}

/// Copy every file under `template_dir` into `root`, keeping relative paths.
/// Existing files in `root` are never overwritten.
pub fn copy_templates(template_dir: &Path, root: &Path) -> TemplateCopy {
    let mut result = TemplateCopy::default();

    if !template_dir.is_dir() {
        result.errors.push(StepError::new(
            template_dir.display().to_string(),
            "template directory not found",
        ));
        return result;
    }

    let templates = walk_files(template_dir, &[]);
    result.errors.extend(templates.errors.iter().cloned());

    for source in &templates.files {
        let relative = templates.relative(source);
        let target = root.join(&relative);

        if target.exists() {
            crate::log_status!("styling", "Keeping existing {}", relative);
            result.kept.push(relative);
            continue;
        }

        let copied = target
            .parent()
            .map_or(Ok(()), fs::create_dir_all)
            .and_then(|_| fs::copy(source, &target));

        match copied {
            Ok(_) => {
                crate::log_status!("styling", "Added {}", relative);
                result.copied.push(relative);
            }
            Err(e) => {
                crate::log_status!("styling", "Error copying {}: {}", relative, e);
                result.errors.push(StepError::new(relative, e.to_string()));
            }
        }
    }

    result
}

/// Install the styling scaffold. A missing template or failed install is
/// recorded in the report; the install still runs after a copy failure.
pub fn install(runner: &dyn ProcessRunner, root: &Path, template_dir: &Path, config: &StylingConfig) -> StepReport {
    let copy = copy_templates(template_dir, root);

    let mut changes: Vec<String> = copy.copied.iter().map(|f| format!("Added {}", f)).collect();
    let warnings: Vec<String> = copy
        .kept
        .iter()
        .map(|f| format!("Kept existing {}", f))
        .collect();
    let mut errors = copy.errors;

    let display = config.install_command.join(" ");
    crate::log_status!("styling", "Running {}", display);
    let output = run_command_line(runner, root, &config.install_command);
    if output.success {
        changes.push(display);
    } else {
        let text = output.error_text();
        crate::log_status!("styling", "{} failed: {}", display, text);
        errors.push(StepError::new(display, text));
    }

    let message = if errors.is_empty() {
        format!("{} installed", config.label)
    } else {
        format!("{} installation incomplete", config.label)
    };

    StepReport::completed(StepId::Styling, message, changes, warnings, errors)
}
