//! Theme identity: every case variant of a theme name.
//!
//! A `ThemeInfo` is derived once from the free-text theme name entered by the
//! user and is immutable afterwards. The same derivation applied to the
//! scaffold's placeholder name yields the tokens to search for, so both sides
//! of every substitution come from the one function.

use heck::ToKebabCase;
use regex::{Captures, Regex};
use serde::Serialize;
use std::sync::LazyLock;

use crate::error::{Error, Result};

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

static WORD_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w").expect("word start pattern is valid"));

/// All lexical renderings of a theme name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThemeInfo {
    /// Name as entered (trimmed).
    pub name: String,
    /// `my cool site`
    pub name_lower: String,
    /// `My Cool Site`
    pub name_train: String,
    /// `MY COOL SITE`
    pub name_cobol: String,
    /// `my-cool-site`
    pub kebab: String,
    pub kebab_hyphen: String,
    /// `my_cool_site`
    pub snake: String,
    pub snake_underscore: String,
    /// `My-Cool-Site`
    pub train: String,
    pub train_hyphen: String,
    /// `My_Cool_Site`
    pub pascal_snake: String,
    pub pascal_snake_underscore: String,
    /// `MY-COOL-SITE`
    pub cobol: String,
    pub cobol_hyphen: String,
    /// `MY_COOL_SITE`
    pub macro_case: String,
    pub macro_underscore: String,
    /// `vendor/my-cool-site`
    pub package: String,
}

impl ThemeInfo {
    /// Derive every variant of `name`, namespacing the package slug under `vendor`.
    ///
    /// Fails when the name is empty or whitespace only. Characters other than
    /// letters, digits and whitespace are not sanitized and pass through into
    /// every variant.
    pub fn new(name: &str, vendor: &str) -> Result<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::validation_missing_argument(vec![
                "theme_name".to_string()
            ])
            .with_hint("Theme name is required"));
        }

        let vendor = vendor.to_kebab_case();
        if vendor.is_empty() {
            return Err(Error::config_invalid_value(
                "vendor",
                Some(vendor),
                "Vendor namespace must contain at least one letter or number",
            ));
        }

        let name_lower = name.to_lowercase();
        let kebab = WHITESPACE_RUN.replace_all(name, "-").to_lowercase();
        let snake = kebab.replace('-', "_");

        let train = WORD_START
            .replace_all(&kebab, |caps: &Captures| caps[0].to_uppercase())
            .into_owned();
        let name_train = train.replace('-', " ");
        let pascal_snake = train.replace('-', "_");

        let cobol = kebab.to_uppercase();
        let name_cobol = name_train.to_uppercase();
        let macro_case = snake.to_uppercase();

        Ok(Self {
            name: name.to_string(),
            name_lower,
            name_train,
            name_cobol,
            kebab_hyphen: format!("{}-", kebab),
            snake_underscore: format!("{}_", snake),
            train_hyphen: format!("{}-", train),
            pascal_snake_underscore: format!("{}_", pascal_snake),
            cobol_hyphen: format!("{}-", cobol),
            macro_underscore: format!("{}_", macro_case),
            package: format!("{}/{}", vendor, kebab),
            kebab,
            snake,
            train,
            pascal_snake,
            cobol,
            macro_case,
        })
    }

    /// Labeled rows describing the theme identity that setup will produce.
    pub fn details(&self, version: &str) -> Vec<(&'static str, String)> {
        vec![
            ("Theme Name", self.name.clone()),
            ("Theme Version", version.to_string()),
            ("Text Domain", self.kebab.clone()),
            ("Package", self.kebab.clone()),
            ("Composer Package", self.package.clone()),
            ("Namespace", self.pascal_snake.clone()),
            ("Function Prefix", self.snake_underscore.clone()),
            ("CSS Class Prefix", self.kebab_hyphen.clone()),
            ("PHP Variable Prefix", self.snake_underscore.clone()),
            ("Version Constant", format!("{}_VERSION", self.macro_case)),
            ("Theme Directory Constant", format!("{}_TEMP_DIR", self.macro_case)),
            ("Theme Build Directory Constant", format!("{}_BUILD_DIR", self.macro_case)),
            (
                "Theme Build Directory URI Constant",
                format!("{}_BUILD_URI", self.macro_case),
            ),
        ]
    }
}
