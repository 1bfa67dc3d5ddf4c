//! Interactive theme setup.
//!
//! The wizard is a linear state machine. Each gate asks one yes/no question
//! and moves to the next state; a "no" skips only that step, except at the
//! first two gates where it cancels the run. Every step is best-effort and
//! reports through a `StepReport`, so a failure never stops later steps.
//!
//! ```text
//! Start → NameCollected → DetailsConfirmed → Renamed
//!       → StylingInstalled | StylingSkipped
//!       → GitInitialized   | GitSkipped
//!       → HooksInstalled   | HooksSkipped
//!       → CleanupDone      | CleanupSkipped → End
//! ```

use chrono::Utc;
use serde::Serialize;
use std::path::Path;

use crate::cleanup;
use crate::defaults::InitConfig;
use crate::error::{Error, Result};
use crate::git;
use crate::hooks;
use crate::output::{StepError, StepId, StepReport};
use crate::refactor::{apply_renames, plan_renames, substitute_files, walk_files, SubstitutionMap};
use crate::scaffold;
use crate::theme_info::ThemeInfo;
use crate::utils::command::ProcessRunner;

pub const SETUP_QUESTION: &str = "Would you like to setup the theme? (Y/n) ";
pub const NAME_QUESTION: &str = "Enter theme name (shown in WordPress admin)*: ";
pub const DETAILS_QUESTION: &str = "Confirm the Theme Details (Y/n) ";
pub const GIT_QUESTION: &str =
    "Initialize a new git repository? Any existing .git directory will be removed (Y/n) ";
pub const HOOKS_QUESTION: &str = "Install git hooks? (Y/n) ";
pub const CLEANUP_QUESTION: &str = "Remove scaffold-only files (CI config, init script, docs)? (Y/n) ";

const UPDATED: &str = "Updated ";
const RENAMED: &str = "Renamed ";

// ============================================================================
// Seams
// ============================================================================

/// Asks questions and shows conversational output.
pub trait Prompter {
    /// Ask `question` and return the answer, trimmed.
    fn ask(&mut self, question: &str) -> Result<String>;

    fn show(&mut self, message: &str);
}

/// Yes unless the answer starts with `n` or `N`.
pub fn confirm(prompter: &mut dyn Prompter, question: &str) -> Result<bool> {
    let answer = prompter.ask(question)?;
    Ok(!answer.trim_start().to_lowercase().starts_with('n'))
}

/// What every step needs: where to work, how, and with which settings.
#[derive(Clone, Copy)]
pub struct StepContext<'a> {
    pub root: &'a Path,
    pub config: &'a InitConfig,
    pub runner: &'a dyn ProcessRunner,
}

impl<'a> StepContext<'a> {
    pub fn new(root: &'a Path, config: &'a InitConfig, runner: &'a dyn ProcessRunner) -> Self {
        Self {
            root,
            config,
            runner,
        }
    }
}

// ============================================================================
// Steps
// ============================================================================

/// Substitute placeholder tokens in every project file, then rename paths.
pub fn attempt_rename(ctx: &StepContext, theme: &ThemeInfo) -> StepReport {
    let placeholder = match ThemeInfo::new(&ctx.config.placeholder, &ctx.config.source_vendor) {
        Ok(placeholder) => placeholder,
        Err(err) => {
            return StepReport::failed(
                StepId::Rename,
                "Invalid placeholder name",
                vec![StepError::new("placeholder", err.summary())],
            );
        }
    };

    let map = SubstitutionMap::between(&placeholder, theme);
    let files = walk_files(ctx.root, &ctx.config.skip_dirs);
    crate::log_status!("walk", "Found {} files", files.files.len());

    let content = substitute_files(&files, &map);
    let plan = plan_renames(&files, &map);
    let renames = apply_renames(&plan, ctx.root);

    let mut changes: Vec<String> = content
        .edits
        .iter()
        .map(|edit| format!("{}{}", UPDATED, edit.file))
        .collect();
    changes.extend(
        renames
            .renamed
            .iter()
            .map(|r| format!("{}{} -> {}", RENAMED, r.from, r.to)),
    );

    if !content.skipped.is_empty() {
        crate::log_status!("substitute", "Skipped {} non-text file(s)", content.skipped.len());
    }
    let mut warnings: Vec<String> = content
        .skipped
        .iter()
        .map(|file| format!("Skipped non-text file {}", file))
        .collect();
    warnings.extend(renames.warnings.iter().map(|w| w.message.clone()));

    let message = if content.content_updated() || renames.names_updated() {
        format!(
            "Updated {} file(s), renamed {} path(s)",
            content.edits.len(),
            renames.renamed.len()
        )
    } else {
        "No placeholder references found".to_string()
    };

    let mut errors = files.errors;
    errors.extend(content.errors);
    errors.extend(renames.errors);

    StepReport::completed(StepId::Rename, message, changes, warnings, errors)
}

pub fn attempt_styling(ctx: &StepContext) -> StepReport {
    let template_dir = ctx.config.template_dir(ctx.root);
    scaffold::install(ctx.runner, ctx.root, &template_dir, &ctx.config.styling)
}

pub fn attempt_git(ctx: &StepContext) -> StepReport {
    git::reinitialize(ctx.runner, ctx.root, &ctx.config.git.commit_message)
}

pub fn attempt_hooks(ctx: &StepContext) -> StepReport {
    hooks::install(ctx.runner, ctx.root, &ctx.config.hooks.install_command)
}

pub fn attempt_cleanup(ctx: &StepContext) -> StepReport {
    cleanup::clean(ctx.root, &ctx.config.cleanup_paths)
}

// ============================================================================
// State machine
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SetupState {
    Start,
    NameCollected,
    DetailsConfirmed,
    Renamed,
    StylingInstalled,
    StylingSkipped,
    GitInitialized,
    GitSkipped,
    HooksInstalled,
    HooksSkipped,
    CleanupDone,
    CleanupSkipped,
    End,
    Cancelled,
}

impl SetupState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, SetupState::End | SetupState::Cancelled)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SetupOutcome {
    Completed,
    Cancelled,
    /// Stopped by an error after at least one step touched the project.
    Aborted,
}

/// Why a run stopped early.
#[derive(Debug, Clone, Serialize)]
pub struct AbortReason {
    pub code: &'static str,
    pub message: String,
}

/// Everything a run did, in order.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetupReport {
    pub outcome: SetupOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<ThemeInfo>,
    pub states: Vec<SetupState>,
    pub steps: Vec<StepReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<AbortReason>,
    pub started_at: String,
    pub finished_at: String,
}

impl SetupReport {
    pub fn step(&self, id: StepId) -> Option<&StepReport> {
        self.steps.iter().find(|s| s.id == id)
    }

    fn rename_changes(&self, prefix: &str) -> bool {
        self.step(StepId::Rename)
            .is_some_and(|s| s.changes.iter().any(|c| c.starts_with(prefix)))
    }

    pub fn content_updated(&self) -> bool {
        self.rename_changes(UPDATED)
    }

    pub fn names_updated(&self) -> bool {
        self.rename_changes(RENAMED)
    }

    pub fn git_initialized(&self) -> bool {
        self.step(StepId::Git).is_some_and(StepReport::succeeded)
    }

    pub fn cleanup_done(&self) -> bool {
        self.step(StepId::Cleanup).is_some_and(StepReport::ran)
    }
}

/// Mutable run state threaded through the transitions.
struct Run {
    theme: Option<ThemeInfo>,
    steps: Vec<StepReport>,
}

impl Run {
    fn theme(&self) -> Result<&ThemeInfo> {
        self.theme
            .as_ref()
            .ok_or_else(|| Error::internal_unexpected("theme details missing after name collection"))
    }

    fn record(&mut self, prompter: &mut dyn Prompter, report: StepReport) {
        prompter.show(&describe(&report));
        self.steps.push(report);
    }
}

fn describe(report: &StepReport) -> String {
    let mut lines = vec![report.message.clone()];
    lines.extend(report.warnings.iter().map(|w| format!("  warning: {}", w)));
    lines.extend(
        report
            .errors
            .iter()
            .map(|e| format!("  error: {}: {}", e.path, e.error)),
    );
    lines.join("\n")
}

/// Render label/value rows inside a box, one row per line.
pub fn render_details(rows: &[(&str, String)]) -> String {
    let width = rows
        .iter()
        .map(|(label, value)| label.chars().count() + value.chars().count() + 2)
        .max()
        .unwrap_or(0);

    let mut out = format!("Theme Details:\n┌{}┐\n", "─".repeat(width + 2));
    for (label, value) in rows {
        let used = label.chars().count() + value.chars().count() + 2;
        out.push_str(&format!(
            "│ {}: {}{} │\n",
            label,
            value,
            " ".repeat(width - used)
        ));
    }
    out.push_str(&format!("└{}┘", "─".repeat(width + 2)));
    out
}

fn collect_name(ctx: &StepContext, prompter: &mut dyn Prompter, run: &mut Run) -> Result<SetupState> {
    if !confirm(prompter, SETUP_QUESTION)? {
        return Ok(SetupState::Cancelled);
    }

    let name = prompter.ask(NAME_QUESTION)?;
    let theme = ThemeInfo::new(&name, &ctx.config.vendor)?;
    prompter.show(&render_details(&theme.details(&ctx.config.theme_version)));
    run.theme = Some(theme);

    Ok(SetupState::NameCollected)
}

fn confirm_details(prompter: &mut dyn Prompter) -> Result<SetupState> {
    if confirm(prompter, DETAILS_QUESTION)? {
        Ok(SetupState::DetailsConfirmed)
    } else {
        Ok(SetupState::Cancelled)
    }
}

fn rename(ctx: &StepContext, prompter: &mut dyn Prompter, run: &mut Run) -> Result<SetupState> {
    let report = attempt_rename(ctx, run.theme()?);
    run.record(prompter, report);
    Ok(SetupState::Renamed)
}

fn styling_gate(ctx: &StepContext, prompter: &mut dyn Prompter, run: &mut Run) -> Result<SetupState> {
    let question = format!("Would you like to install {}? (Y/n) ", ctx.config.styling.label);
    if !confirm(prompter, &question)? {
        run.steps.push(StepReport::skipped(StepId::Styling, "Styling setup skipped"));
        return Ok(SetupState::StylingSkipped);
    }

    let report = attempt_styling(ctx);
    run.record(prompter, report);
    Ok(SetupState::StylingInstalled)
}

fn git_gate(ctx: &StepContext, prompter: &mut dyn Prompter, run: &mut Run) -> Result<SetupState> {
    if !confirm(prompter, GIT_QUESTION)? {
        run.steps.push(StepReport::skipped(StepId::Git, "Git initialization skipped"));
        return Ok(SetupState::GitSkipped);
    }

    let report = attempt_git(ctx);
    let initialized = report.succeeded();
    run.record(prompter, report);
    Ok(if initialized {
        SetupState::GitInitialized
    } else {
        SetupState::GitSkipped
    })
}

fn hooks_gate(
    ctx: &StepContext,
    prompter: &mut dyn Prompter,
    run: &mut Run,
    git_initialized: bool,
) -> Result<SetupState> {
    if !git_initialized {
        run.steps.push(StepReport::skipped(
            StepId::Hooks,
            "Git hooks skipped: no git repository was initialized",
        ));
        return Ok(SetupState::HooksSkipped);
    }

    if !confirm(prompter, HOOKS_QUESTION)? {
        run.steps.push(StepReport::skipped(StepId::Hooks, "Git hooks skipped"));
        return Ok(SetupState::HooksSkipped);
    }

    let report = attempt_hooks(ctx);
    let installed = report.succeeded();
    run.record(prompter, report);
    Ok(if installed {
        SetupState::HooksInstalled
    } else {
        SetupState::HooksSkipped
    })
}

fn cleanup_gate(ctx: &StepContext, prompter: &mut dyn Prompter, run: &mut Run) -> Result<SetupState> {
    if !confirm(prompter, CLEANUP_QUESTION)? {
        run.steps.push(StepReport::skipped(StepId::Cleanup, "Cleanup skipped"));
        return Ok(SetupState::CleanupSkipped);
    }

    let report = attempt_cleanup(ctx);
    run.record(prompter, report);
    Ok(SetupState::CleanupDone)
}

/// One transition. Terminal states map to themselves.
fn advance(
    state: SetupState,
    ctx: &StepContext,
    prompter: &mut dyn Prompter,
    run: &mut Run,
) -> Result<SetupState> {
    match state {
        SetupState::Start => collect_name(ctx, prompter, run),
        SetupState::NameCollected => confirm_details(prompter),
        SetupState::DetailsConfirmed => rename(ctx, prompter, run),
        SetupState::Renamed => styling_gate(ctx, prompter, run),
        SetupState::StylingInstalled | SetupState::StylingSkipped => git_gate(ctx, prompter, run),
        SetupState::GitInitialized => hooks_gate(ctx, prompter, run, true),
        SetupState::GitSkipped => hooks_gate(ctx, prompter, run, false),
        SetupState::HooksInstalled | SetupState::HooksSkipped => cleanup_gate(ctx, prompter, run),
        SetupState::CleanupDone | SetupState::CleanupSkipped => Ok(SetupState::End),
        SetupState::End | SetupState::Cancelled => Ok(state),
    }
}

/// Run the full interactive wizard.
///
/// Errors only for fatal input problems (empty theme name, unreadable
/// input) hit before any step ran. Once the project has been touched, such an
/// error ends the run as `Aborted` and the steps so far stay in the report.
/// Step failures are recorded in the report.
pub fn run_setup(ctx: &StepContext, prompter: &mut dyn Prompter) -> Result<SetupReport> {
    let started_at = Utc::now().to_rfc3339();
    let mut run = Run {
        theme: None,
        steps: Vec::new(),
    };
    let mut state = SetupState::Start;
    let mut states = vec![state];
    let mut error = None;

    while !state.is_terminal() {
        match advance(state, ctx, prompter, &mut run) {
            Ok(next) => {
                state = next;
                states.push(state);
            }
            Err(err) if run.steps.is_empty() => return Err(err),
            Err(err) => {
                crate::log_status!("setup", "Aborted after {} step(s): {}", run.steps.len(), err.summary());
                error = Some(AbortReason {
                    code: err.code.as_str(),
                    message: err.summary(),
                });
                break;
            }
        }
    }

    let outcome = if error.is_some() {
        prompter.show("Theme setup aborted.");
        SetupOutcome::Aborted
    } else if state == SetupState::Cancelled {
        prompter.show("Theme Setup Cancelled.");
        SetupOutcome::Cancelled
    } else {
        prompter.show("Theme setup complete.");
        SetupOutcome::Completed
    };

    Ok(SetupReport {
        outcome,
        theme: run.theme,
        states,
        steps: run.steps,
        error,
        started_at,
        finished_at: Utc::now().to_rfc3339(),
    })
}

/// Cleanup only: no prompts, no renaming.
pub fn run_cleanup_only(ctx: &StepContext) -> SetupReport {
    let started_at = Utc::now().to_rfc3339();
    let report = attempt_cleanup(ctx);

    SetupReport {
        outcome: SetupOutcome::Completed,
        theme: None,
        states: vec![SetupState::Start, SetupState::CleanupDone, SetupState::End],
        steps: vec![report],
        error: None,
        started_at,
        finished_at: Utc::now().to_rfc3339(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::command::CommandOutput;
    use std::collections::VecDeque;
    use std::fs;
    use tempfile::TempDir;

    struct Scripted {
        answers: VecDeque<&'static str>,
        shown: Vec<String>,
    }

    impl Scripted {
        fn new(answers: &[&'static str]) -> Self {
            Self {
                answers: answers.iter().copied().collect(),
                shown: Vec::new(),
            }
        }
    }

    impl Prompter for Scripted {
        fn ask(&mut self, _question: &str) -> Result<String> {
            Ok(self.answers.pop_front().unwrap_or("n").to_string())
        }

        fn show(&mut self, message: &str) {
            self.shown.push(message.to_string());
        }
    }

    struct AlwaysOk;

    impl ProcessRunner for AlwaysOk {
        fn run(&self, _: &Path, _: &str, _: &[&str]) -> CommandOutput {
            CommandOutput::ok("")
        }
    }

    #[test]
    fn confirm_treats_only_n_prefix_as_no() {
        for (answer, expected) in [("", true), ("y", true), ("Y", true), ("n", false), ("No", false), ("  N", false), ("maybe", true)] {
            let mut prompter = Scripted::new(&[answer]);
            assert_eq!(confirm(&mut prompter, "?").unwrap(), expected, "answer {:?}", answer);
        }
    }

    #[test]
    fn declining_setup_cancels_before_asking_name() {
        let dir = TempDir::new().unwrap();
        let config = InitConfig::default();
        let ctx = StepContext::new(dir.path(), &config, &AlwaysOk);
        let mut prompter = Scripted::new(&["n", "My Cool Site"]);

        let report = run_setup(&ctx, &mut prompter).unwrap();

        assert_eq!(report.outcome, SetupOutcome::Cancelled);
        assert_eq!(report.states, vec![SetupState::Start, SetupState::Cancelled]);
        assert!(report.theme.is_none());
        assert_eq!(prompter.answers.len(), 1);
    }

    #[test]
    fn declining_details_changes_nothing() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("style.css"), "Theme Name: Elementary Theme").unwrap();
        let config = InitConfig::default();
        let ctx = StepContext::new(dir.path(), &config, &AlwaysOk);
        let mut prompter = Scripted::new(&["y", "My Cool Site", "n"]);

        let report = run_setup(&ctx, &mut prompter).unwrap();

        assert_eq!(report.outcome, SetupOutcome::Cancelled);
        assert!(report.steps.is_empty());
        assert_eq!(
            fs::read_to_string(dir.path().join("style.css")).unwrap(),
            "Theme Name: Elementary Theme"
        );
        assert!(prompter.shown.iter().any(|m| m.contains("Text Domain: my-cool-site")));
    }

    #[test]
    fn empty_name_is_a_validation_error() {
        let dir = TempDir::new().unwrap();
        let config = InitConfig::default();
        let ctx = StepContext::new(dir.path(), &config, &AlwaysOk);
        let mut prompter = Scripted::new(&["y", "   "]);

        let err = run_setup(&ctx, &mut prompter).unwrap_err();
        assert_eq!(err.code.as_str(), "validation.missing_argument");
    }

    /// Answers from a script, then fails like a closed stdin.
    struct ClosesAfter(VecDeque<&'static str>);

    impl Prompter for ClosesAfter {
        fn ask(&mut self, _question: &str) -> Result<String> {
            self.0
                .pop_front()
                .map(str::to_string)
                .ok_or_else(|| Error::internal_io("Input closed", None))
        }

        fn show(&mut self, _message: &str) {}
    }

    #[test]
    fn input_closing_after_rename_keeps_the_partial_report() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("style.css"), "Theme Name: Elementary Theme").unwrap();
        let config = InitConfig::default();
        let ctx = StepContext::new(dir.path(), &config, &AlwaysOk);
        let mut prompter = ClosesAfter(["y", "My Cool Site", "y"].into_iter().collect());

        let report = run_setup(&ctx, &mut prompter).unwrap();

        assert_eq!(report.outcome, SetupOutcome::Aborted);
        assert_eq!(report.states.last(), Some(&SetupState::Renamed));
        assert!(report.content_updated());
        let error = report.error.as_ref().unwrap();
        assert_eq!(error.code, "internal.io_error");
        assert!(error.message.contains("Input closed"));
        assert_eq!(
            fs::read_to_string(dir.path().join("style.css")).unwrap(),
            "Theme Name: My Cool Site"
        );
    }

    #[test]
    fn input_closing_before_any_step_is_an_error() {
        let dir = TempDir::new().unwrap();
        let config = InitConfig::default();
        let ctx = StepContext::new(dir.path(), &config, &AlwaysOk);
        let mut prompter = ClosesAfter(["y"].into_iter().collect());

        let err = run_setup(&ctx, &mut prompter).unwrap_err();
        assert_eq!(err.code.as_str(), "internal.io_error");
    }

    #[test]
    fn skipping_git_skips_hooks_without_asking() {
        let dir = TempDir::new().unwrap();
        let config = InitConfig::default();
        let ctx = StepContext::new(dir.path(), &config, &AlwaysOk);
        // setup, name, details, styling: n, git: n, cleanup: n
        let mut prompter = Scripted::new(&["y", "Site", "y", "n", "n", "n"]);

        let report = run_setup(&ctx, &mut prompter).unwrap();

        assert_eq!(report.outcome, SetupOutcome::Completed);
        assert!(report.states.contains(&SetupState::HooksSkipped));
        assert!(!report.git_initialized());
        assert!(!report.cleanup_done());
        assert!(prompter.answers.is_empty());
    }

    #[test]
    fn render_details_aligns_rows() {
        let rows = vec![("A", "1".to_string()), ("Longer", "22".to_string())];
        let rendered = render_details(&rows);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "Theme Details:");
        let widths: Vec<usize> = lines[1..].iter().map(|l| l.chars().count()).collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]), "{:?}", widths);
        assert_eq!(lines[3], "│ Longer: 22 │");
    }
}
