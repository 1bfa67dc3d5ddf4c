use std::path::Path;

use elementary_init::defaults::{self, CONFIG_FILE};
use elementary_init::setup::{self, SetupOutcome, StepContext};
use elementary_init::utils::command::LocalRunner;

use super::{CmdResult, RunOutput};
use crate::tty::TerminalPrompter;

/// Interactive setup wizard rooted at `root`.
pub fn run(root: &Path) -> CmdResult<RunOutput> {
    let config = defaults::load_config(root);
    let runner = LocalRunner;
    let ctx = StepContext::new(root, &config, &runner);

    let report = setup::run_setup(&ctx, &mut TerminalPrompter)?;

    let mut hints = Vec::new();
    if report.outcome == SetupOutcome::Completed && !report.content_updated() && !report.names_updated() {
        hints.push(format!(
            "No references to '{}' were found. Set \"placeholder\" in {} if the scaffold was already renamed.",
            config.placeholder, CONFIG_FILE
        ));
    }

    // Files may already be rewritten, so the report is still printed.
    let exit_code = if report.outcome == SetupOutcome::Aborted { 1 } else { 0 };

    Ok((RunOutput::new("init", root, report, hints), exit_code))
}
