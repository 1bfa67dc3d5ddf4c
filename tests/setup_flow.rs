use std::cell::RefCell;
use std::collections::VecDeque;
use std::fs;
use std::path::Path;

use elementary_init::defaults::InitConfig;
use elementary_init::setup::{
    run_cleanup_only, run_setup, Prompter, SetupOutcome, SetupState, StepContext,
};
use elementary_init::utils::command::{command_line, CommandOutput, ProcessRunner};
use elementary_init::{Result, StepId, StepStatus};
use tempfile::TempDir;

struct Scripted {
    answers: VecDeque<String>,
    questions: Vec<String>,
    shown: Vec<String>,
}

impl Scripted {
    fn new(answers: &[&str]) -> Self {
        Self {
            answers: answers.iter().map(|a| a.to_string()).collect(),
            questions: Vec::new(),
            shown: Vec::new(),
        }
    }
}

impl Prompter for Scripted {
    fn ask(&mut self, question: &str) -> Result<String> {
        self.questions.push(question.to_string());
        Ok(self.answers.pop_front().expect("unexpected question"))
    }

    fn show(&mut self, message: &str) {
        self.shown.push(message.to_string());
    }
}

/// Records every command; fails those whose command line starts with `fail_prefix`.
struct FakeRunner {
    calls: RefCell<Vec<String>>,
    fail_prefix: Option<&'static str>,
}

impl FakeRunner {
    fn ok() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            fail_prefix: None,
        }
    }

    fn failing(prefix: &'static str) -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            fail_prefix: Some(prefix),
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl ProcessRunner for FakeRunner {
    fn run(&self, _dir: &Path, program: &str, args: &[&str]) -> CommandOutput {
        let line = command_line(program, args);
        self.calls.borrow_mut().push(line.clone());
        match self.fail_prefix {
            Some(prefix) if line.starts_with(prefix) => {
                CommandOutput::failed(1, format!("{}: simulated failure", program))
            }
            _ => CommandOutput::ok(""),
        }
    }
}

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn read(root: &Path, relative: &str) -> String {
    fs::read_to_string(root.join(relative)).unwrap()
}

/// A trimmed-down copy of the theme scaffold.
fn scaffold() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();

    write(
        root,
        "style.css",
        "/*\nTheme Name: Elementary Theme\nText Domain: elementary-theme\n*/\n",
    );
    write(
        root,
        "composer.json",
        r#"{ "name": "rtcamp/elementary-theme", "autoload": { "psr-4": { "Elementary_Theme\\": "inc/" } } }"#,
    );
    write(
        root,
        "functions.php",
        "<?php\ndefine( 'ELEMENTARY_THEME_VERSION', '1.0.0' );\nfunction elementary_theme_setup() {}\n",
    );
    write(
        root,
        "inc/classes/class-elementary-theme.php",
        "<?php\nnamespace Elementary_Theme\\Inc;\nclass Elementary_Theme {}\n",
    );
    write(root, "assets/src/css/main.scss", ".elementary-theme-header { color: red; }\n");
    write(root, "node_modules/pkg/index.js", "// elementary-theme\n");
    write(root, ".github/workflows/ci.yml", "name: elementary-theme\n");
    write(root, "bin/init.js", "// Elementary Theme initializer\n");
    write(root, "bin/templates/tailwindcss/tailwind.config.js", "module.exports = {};\n");
    write(root, "docs/README.md", "# Elementary Theme docs\n");
    let logo = root.join("assets/images/logo.png");
    fs::create_dir_all(logo.parent().unwrap()).unwrap();
    fs::write(logo, [0x89u8, 0x50, 0x4e, 0x47, 0xff, 0xfe]).unwrap();

    dir
}

const ALL_YES: [&str; 7] = ["y", "My Cool Site", "y", "y", "y", "y", "y"];

#[test]
fn full_setup_renames_installs_and_cleans() {
    let dir = scaffold();
    let root = dir.path();
    let config = InitConfig::default();
    let runner = FakeRunner::ok();
    let ctx = StepContext::new(root, &config, &runner);
    let mut prompter = Scripted::new(&ALL_YES);

    let report = run_setup(&ctx, &mut prompter).unwrap();

    assert_eq!(report.outcome, SetupOutcome::Completed);
    assert!(report.content_updated());
    assert!(report.names_updated());
    assert!(report.git_initialized());
    assert!(report.cleanup_done());
    assert_eq!(
        report.states,
        vec![
            SetupState::Start,
            SetupState::NameCollected,
            SetupState::DetailsConfirmed,
            SetupState::Renamed,
            SetupState::StylingInstalled,
            SetupState::GitInitialized,
            SetupState::HooksInstalled,
            SetupState::CleanupDone,
            SetupState::End,
        ]
    );

    assert!(read(root, "style.css").contains("Theme Name: My Cool Site"));
    assert!(read(root, "style.css").contains("Text Domain: my-cool-site"));
    let composer = read(root, "composer.json");
    assert!(composer.contains("\"rtcamp/my-cool-site\""));
    assert!(composer.contains("My_Cool_Site\\\\"));
    let functions = read(root, "functions.php");
    assert!(functions.contains("MY_COOL_SITE_VERSION"));
    assert!(functions.contains("function my_cool_site_setup()"));
    assert!(read(root, "assets/src/css/main.scss").contains(".my-cool-site-header"));

    assert!(root.join("inc/classes/class-my-cool-site.php").exists());
    assert!(!root.join("inc/classes/class-elementary-theme.php").exists());
    assert!(read(root, "inc/classes/class-my-cool-site.php").contains("class My_Cool_Site {}"));

    // Binary assets are left alone and only warned about.
    let rename = report.step(StepId::Rename).unwrap();
    assert_eq!(rename.status, StepStatus::Success);
    assert!(rename
        .warnings
        .contains(&"Skipped non-text file assets/images/logo.png".to_string()));
    assert_eq!(
        fs::read(root.join("assets/images/logo.png")).unwrap(),
        vec![0x89u8, 0x50, 0x4e, 0x47, 0xff, 0xfe]
    );

    // Ignored directories are untouched.
    assert_eq!(read(root, "node_modules/pkg/index.js"), "// elementary-theme\n");

    // Styling template landed in the root before cleanup removed the templates.
    assert!(root.join("tailwind.config.js").exists());
    for gone in [".github", "bin/init.js", "bin/templates", "docs"] {
        assert!(!root.join(gone).exists(), "{} should be removed", gone);
    }

    assert_eq!(
        runner.calls(),
        vec![
            "npm install --save-dev tailwindcss",
            "git init",
            "git add .",
            "git commit -m \"Initial commit\"",
            "npx husky install",
        ]
    );
}

#[test]
fn failed_git_skips_hooks_but_not_cleanup() {
    let dir = scaffold();
    let root = dir.path();
    let config = InitConfig::default();
    let runner = FakeRunner::failing("git commit");
    let ctx = StepContext::new(root, &config, &runner);
    // No hooks question is asked after a failed git step.
    let mut prompter = Scripted::new(&["y", "My Cool Site", "y", "n", "y", "y"]);

    let report = run_setup(&ctx, &mut prompter).unwrap();

    assert!(!report.git_initialized());
    assert!(report.states.contains(&SetupState::GitSkipped));
    assert!(report.states.contains(&SetupState::HooksSkipped));
    assert_eq!(report.step(StepId::Hooks).unwrap().status, StepStatus::Skipped);
    assert!(!runner.calls().iter().any(|c| c.starts_with("npx husky")));
    assert!(report.cleanup_done());
    assert!(!root.join("docs").exists());

    let git = report.step(StepId::Git).unwrap();
    assert_eq!(git.errors[0].path, "git commit -m \"Initial commit\"");
    assert_eq!(git.errors[0].error, "git: simulated failure");
    assert!(prompter.answers.is_empty());
}

#[test]
fn failed_styling_install_does_not_block_git() {
    let dir = scaffold();
    let root = dir.path();
    let config = InitConfig::default();
    let runner = FakeRunner::failing("npm install");
    let ctx = StepContext::new(root, &config, &runner);
    let mut prompter = Scripted::new(&ALL_YES);

    let report = run_setup(&ctx, &mut prompter).unwrap();

    let styling = report.step(StepId::Styling).unwrap();
    assert!(!styling.succeeded());
    assert_eq!(styling.errors[0].error, "npm: simulated failure");
    assert!(report.git_initialized());
    assert!(runner.calls().contains(&"git init".to_string()));
    assert!(runner.calls().contains(&"npx husky install".to_string()));
}

#[test]
fn name_containing_the_placeholder_is_not_replaced_twice() {
    let dir = scaffold();
    let root = dir.path();
    let config = InitConfig::default();
    let runner = FakeRunner::ok();
    let ctx = StepContext::new(root, &config, &runner);
    let mut prompter = Scripted::new(&["y", "Elementary Theme Pro", "y", "n", "n", "n"]);

    run_setup(&ctx, &mut prompter).unwrap();

    let style = read(root, "style.css");
    assert!(style.contains("Theme Name: Elementary Theme Pro\n"));
    assert!(style.contains("Text Domain: elementary-theme-pro\n"));
    assert!(root.join("inc/classes/class-elementary-theme-pro.php").exists());
    assert!(runner.calls().is_empty());
}

#[test]
fn clean_on_fresh_tree_reports_no_cleanup_required() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(root, "style.css", "Theme Name: My Cool Site\n");
    let config = InitConfig::default();
    let runner = FakeRunner::ok();
    let ctx = StepContext::new(root, &config, &runner);

    let report = run_cleanup_only(&ctx);

    let cleanup = report.step(StepId::Cleanup).unwrap();
    assert!(cleanup.succeeded());
    assert_eq!(cleanup.message, "No cleanup required");
    assert_eq!(read(root, "style.css"), "Theme Name: My Cool Site\n");
    assert!(runner.calls().is_empty());
}

#[test]
fn clean_removes_scaffold_paths_without_renaming() {
    let dir = scaffold();
    let root = dir.path();
    let config = InitConfig::default();
    let runner = FakeRunner::ok();
    let ctx = StepContext::new(root, &config, &runner);

    let report = run_cleanup_only(&ctx);

    assert!(report.cleanup_done());
    assert!(!report.content_updated());
    for gone in [".github", "bin/init.js", "bin/templates", "docs"] {
        assert!(!root.join(gone).exists(), "{} should be removed", gone);
    }
    assert!(read(root, "style.css").contains("Elementary Theme"));
    assert!(root.join("inc/classes/class-elementary-theme.php").exists());
}

#[test]
fn project_config_overrides_vendor_and_commands() {
    let dir = scaffold();
    let root = dir.path();
    write(
        root,
        "elementary-init.json",
        r#"{ "vendor": "acme", "hooks": { "install_command": ["npx", "husky"] }, "git": { "commit_message": "chore: bootstrap" } }"#,
    );
    let config = elementary_init::defaults::load_config(root);
    let runner = FakeRunner::ok();
    let ctx = StepContext::new(root, &config, &runner);
    let mut prompter = Scripted::new(&["y", "My Cool Site", "y", "n", "y", "y", "n"]);

    run_setup(&ctx, &mut prompter).unwrap();

    assert!(read(root, "composer.json").contains("\"acme/my-cool-site\""));
    assert!(runner.calls().contains(&"git commit -m \"chore: bootstrap\"".to_string()));
    assert!(runner.calls().contains(&"npx husky".to_string()));
}
