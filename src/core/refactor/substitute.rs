//! Placeholder substitution: ordered literal token replacement.
//!
//! Tokens are matched as exact substrings. Within one text, every token is
//! located first (longest token first, claiming byte ranges so a shorter token
//! can never match inside a longer one that was already claimed), then all
//! claimed ranges are replaced from the end backwards. Replacement text is
//! never searched again.

use serde::Serialize;
use std::path::Path;

use crate::output::StepError;
use crate::theme_info::ThemeInfo;

use super::walk::FileSet;

/// One token and what it becomes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Substitution {
    pub token: String,
    pub replacement: String,
    pub label: &'static str,
}

/// Ordered token → replacement list.
///
/// Order is a contract: entries are sorted longest token first, ties keep
/// declaration order, and duplicate tokens keep their first declaration. No
/// entry therefore follows an entry whose token contains it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SubstitutionMap {
    entries: Vec<Substitution>,
}

impl SubstitutionMap {
    pub fn new(declared: Vec<Substitution>) -> Self {
        let mut entries: Vec<Substitution> = Vec::with_capacity(declared.len());
        for entry in declared {
            if entry.token.is_empty() || entries.iter().any(|e| e.token == entry.token) {
                continue;
            }
            entries.push(entry);
        }

        // Stable: equal lengths keep declaration order.
        entries.sort_by(|a, b| b.token.len().cmp(&a.token.len()));

        Self { entries }
    }

    /// Map every placeholder variant to the matching variant of the new theme.
    ///
    /// The composer package token is declared first, then suffixed variants,
    /// then the code-safe bare variants, then the spaced display names. A
    /// one-word placeholder makes several variants equal; the first declaration
    /// wins, so identifiers and slugs never receive a spaced replacement.
    pub fn between(placeholder: &ThemeInfo, theme: &ThemeInfo) -> Self {
        let pairs: [(&'static str, &str, &str); 16] = [
            ("package", placeholder.package.as_str(), theme.package.as_str()),
            ("kebab-", placeholder.kebab_hyphen.as_str(), theme.kebab_hyphen.as_str()),
            ("Train-", placeholder.train_hyphen.as_str(), theme.train_hyphen.as_str()),
            ("COBOL-", placeholder.cobol_hyphen.as_str(), theme.cobol_hyphen.as_str()),
            ("snake_", placeholder.snake_underscore.as_str(), theme.snake_underscore.as_str()),
            ("Pascal_Snake_", placeholder.pascal_snake_underscore.as_str(), theme.pascal_snake_underscore.as_str()),
            ("MACRO_", placeholder.macro_underscore.as_str(), theme.macro_underscore.as_str()),
            ("kebab", placeholder.kebab.as_str(), theme.kebab.as_str()),
            ("snake", placeholder.snake.as_str(), theme.snake.as_str()),
            ("Pascal_Snake", placeholder.pascal_snake.as_str(), theme.pascal_snake.as_str()),
            ("Train", placeholder.train.as_str(), theme.train.as_str()),
            ("MACRO", placeholder.macro_case.as_str(), theme.macro_case.as_str()),
            ("COBOL", placeholder.cobol.as_str(), theme.cobol.as_str()),
            ("name lower", placeholder.name_lower.as_str(), theme.name_lower.as_str()),
            ("name", placeholder.name_train.as_str(), theme.name.as_str()),
            ("NAME COBOL", placeholder.name_cobol.as_str(), theme.name_cobol.as_str()),
        ];

        Self::new(
            pairs
                .into_iter()
                .map(|(label, token, replacement)| Substitution {
                    token: token.to_string(),
                    replacement: replacement.to_string(),
                    label,
                })
                .collect(),
        )
    }

    pub fn entries(&self) -> &[Substitution] {
        &self.entries
    }

    /// Replace every token occurrence in `text`. Returns the new text and the
    /// number of replacements made.
    pub fn apply(&self, text: &str) -> (String, usize) {
        let mut claimed: Vec<(usize, usize, &str)> = Vec::new();

        for entry in &self.entries {
            for pos in find_literal_matches(text, &entry.token) {
                let end = pos + entry.token.len();
                if claimed.iter().any(|&(s, e, _)| pos < e && end > s) {
                    continue;
                }
                claimed.push((pos, end, entry.replacement.as_str()));
            }
        }

        if claimed.is_empty() {
            return (text.to_string(), 0);
        }

        claimed.sort_by(|a, b| b.0.cmp(&a.0));

        let mut out = text.to_string();
        for &(start, end, replacement) in &claimed {
            out.replace_range(start..end, replacement);
        }

        (out, claimed.len())
    }
}

/// Every byte offset where `term` occurs in `text`, overlapping occurrences included.
fn find_literal_matches(text: &str, term: &str) -> Vec<usize> {
    let mut matches = Vec::new();
    let Some(step) = term.chars().next().map(char::len_utf8) else {
        return matches;
    };

    let mut start = 0;
    while let Some(pos) = text[start..].find(term) {
        matches.push(start + pos);
        start += pos + step;
    }

    matches
}

/// A file whose content was rewritten.
#[derive(Debug, Clone, Serialize)]
pub struct FileEdit {
    /// Path relative to the project root.
    pub file: String,
    pub replacements: usize,
}

/// Result of substituting across a file set.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SubstitutionReport {
    pub files_scanned: usize,
    pub edits: Vec<FileEdit>,
    /// Files left alone because their content is not UTF-8 text.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<StepError>,
}

impl SubstitutionReport {
    pub fn content_updated(&self) -> bool {
        !self.edits.is_empty()
    }
}

/// Rewrite one file in place. Returns the replacement count; the file is not
/// written when nothing matched.
pub fn substitute_file(path: &Path, map: &SubstitutionMap) -> std::io::Result<usize> {
    let content = std::fs::read_to_string(path)?;
    let (new_content, count) = map.apply(&content);
    if count == 0 || new_content == content {
        return Ok(0);
    }
    std::fs::write(path, new_content)?;
    Ok(count)
}

/// Substitute tokens in every file of the set, continuing past per-file failures.
pub fn substitute_files(files: &FileSet, map: &SubstitutionMap) -> SubstitutionReport {
    let mut report = SubstitutionReport {
        files_scanned: files.files.len(),
        ..SubstitutionReport::default()
    };

    for path in &files.files {
        let relative = files.relative(path);
        match substitute_file(path, map) {
            Ok(0) => {}
            Ok(replacements) => {
                crate::log_status!("substitute", "Updated {}", relative);
                report.edits.push(FileEdit {
                    file: relative,
                    replacements,
                });
            }
            Err(e) if e.kind() == std::io::ErrorKind::InvalidData => {
                report.skipped.push(relative);
            }
            Err(e) => {
                crate::log_status!("substitute", "Error in {}: {}", relative, e);
                report.errors.push(StepError::new(relative, e.to_string()));
            }
        }
    }

    report
}
