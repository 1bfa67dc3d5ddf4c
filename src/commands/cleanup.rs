use std::path::Path;

use elementary_init::defaults;
use elementary_init::setup::{self, StepContext};
use elementary_init::utils::command::LocalRunner;
use elementary_init::StepId;

use super::{CmdResult, RunOutput};

/// Remove scaffold-only files without prompting.
pub fn run(root: &Path) -> CmdResult<RunOutput> {
    let config = defaults::load_config(root);
    let runner = LocalRunner;
    let ctx = StepContext::new(root, &config, &runner);

    let report = setup::run_cleanup_only(&ctx);

    let hints = report
        .step(StepId::Cleanup)
        .filter(|step| step.changes.is_empty() && step.errors.is_empty())
        .map(|step| vec![step.message.clone()])
        .unwrap_or_default();

    Ok((RunOutput::new("cleanup", root, report, hints), 0))
}
