use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// File name of the optional per-project configuration, looked up in the project root.
pub const CONFIG_FILE: &str = "elementary-init.json";

/// All configurable defaults that can be overridden via elementary-init.json
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitConfig {
    /// Theme name the scaffold ships with; its case variants are the placeholder tokens.
    #[serde(default = "default_placeholder")]
    pub placeholder: String,

    /// Vendor namespace of the scaffold's composer package.
    #[serde(default = "default_vendor")]
    pub source_vendor: String,

    /// Vendor namespace for the new theme's composer package.
    #[serde(default = "default_vendor")]
    pub vendor: String,

    #[serde(default = "default_theme_version")]
    pub theme_version: String,

    /// Entry names (glob patterns) never walked, at any depth.
    #[serde(default = "default_skip_dirs")]
    pub skip_dirs: Vec<String>,

    /// Scaffold-only paths (glob patterns relative to the root) removed during cleanup.
    #[serde(default = "default_cleanup_paths")]
    pub cleanup_paths: Vec<String>,

    #[serde(default)]
    pub styling: StylingConfig,

    #[serde(default)]
    pub git: GitConfig,

    #[serde(default)]
    pub hooks: HooksConfig,
}

impl Default for InitConfig {
    fn default() -> Self {
        Self {
            placeholder: default_placeholder(),
            source_vendor: default_vendor(),
            vendor: default_vendor(),
            theme_version: default_theme_version(),
            skip_dirs: default_skip_dirs(),
            cleanup_paths: default_cleanup_paths(),
            styling: StylingConfig::default(),
            git: GitConfig::default(),
            hooks: HooksConfig::default(),
        }
    }
}

/// Styling framework scaffold: template files plus a dependency install.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StylingConfig {
    #[serde(default = "default_styling_label")]
    pub label: String,

    #[serde(default = "default_template_dir")]
    pub template_dir: String,

    #[serde(default = "default_styling_install")]
    pub install_command: Vec<String>,
}

impl Default for StylingConfig {
    fn default() -> Self {
        Self {
            label: default_styling_label(),
            template_dir: default_template_dir(),
            install_command: default_styling_install(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitConfig {
    #[serde(default = "default_commit_message")]
    pub commit_message: String,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            commit_message: default_commit_message(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HooksConfig {
    #[serde(default = "default_hooks_install")]
    pub install_command: Vec<String>,
}

impl Default for HooksConfig {
    fn default() -> Self {
        Self {
            install_command: default_hooks_install(),
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_placeholder() -> String {
    "Elementary Theme".to_string()
}

fn default_vendor() -> String {
    "rtcamp".to_string()
}

fn default_theme_version() -> String {
    "1.0.0".to_string()
}

fn default_skip_dirs() -> Vec<String> {
    vec![
        ".git".to_string(),
        ".github".to_string(),
        "node_modules".to_string(),
        "vendor".to_string(),
    ]
}

fn default_cleanup_paths() -> Vec<String> {
    vec![
        ".github".to_string(),
        "bin/init.js".to_string(),
        "bin/templates".to_string(),
        "docs".to_string(),
    ]
}

fn default_styling_label() -> String {
    "Tailwind CSS".to_string()
}

fn default_template_dir() -> String {
    "bin/templates/tailwindcss".to_string()
}

fn default_styling_install() -> Vec<String> {
    vec![
        "npm".to_string(),
        "install".to_string(),
        "--save-dev".to_string(),
        "tailwindcss".to_string(),
    ]
}

fn default_commit_message() -> String {
    "Initial commit".to_string()
}

fn default_hooks_install() -> Vec<String> {
    vec!["npx".to_string(), "husky".to_string(), "install".to_string()]
}

// =============================================================================
// Loading functions
// =============================================================================

impl InitConfig {
    /// Check values that serde cannot: version syntax and non-empty commands.
    pub fn validate(&self) -> Result<()> {
        semver::Version::parse(&self.theme_version).map_err(|e| {
            Error::config_invalid_value(
                "theme_version",
                Some(self.theme_version.clone()),
                e.to_string(),
            )
        })?;

        if self.placeholder.trim().is_empty() {
            return Err(Error::config_invalid_value(
                "placeholder",
                None,
                "Placeholder theme name cannot be empty",
            ));
        }

        for (key, command) in [
            ("styling.install_command", &self.styling.install_command),
            ("hooks.install_command", &self.hooks.install_command),
        ] {
            if command.first().is_none_or(|program| program.trim().is_empty()) {
                return Err(Error::config_invalid_value(
                    key,
                    None,
                    "Command must name a program",
                ));
            }
        }

        Ok(())
    }

    /// Styling template directory, expanded and resolved against `root`.
    pub fn template_dir(&self, root: &Path) -> PathBuf {
        let expanded = shellexpand::full(&self.styling.template_dir)
            .map(|s| s.into_owned())
            .unwrap_or_else(|_| self.styling.template_dir.clone());
        let path = PathBuf::from(expanded);
        if path.is_absolute() {
            path
        } else {
            root.join(path)
        }
    }
}

/// Load config for a project root, merging the file config with built-in defaults.
/// If elementary-init.json is missing or invalid, returns built-in defaults.
pub fn load_config(root: &Path) -> InitConfig {
    match load_config_from_file(root) {
        Ok(Some(config)) => config,
        Ok(None) => InitConfig::default(),
        Err(err) => {
            crate::log_status!("config", "Ignoring {}: {}", CONFIG_FILE, err.summary());
            InitConfig::default()
        }
    }
}

/// Attempt to load config from the project's elementary-init.json.
pub fn load_config_from_file(root: &Path) -> Result<Option<InitConfig>> {
    let path = root.join(CONFIG_FILE);

    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(&path).map_err(|e| {
        Error::internal_io(e.to_string(), Some(format!("read {}", path.display())))
    })?;

    let config: InitConfig = serde_json::from_str(&content)
        .map_err(|e| Error::config_invalid_json(path.display().to_string(), e))?;

    config.validate()?;

    Ok(Some(config))
}
