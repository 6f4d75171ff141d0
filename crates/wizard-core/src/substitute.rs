//! Placeholder substitution over template files with lazy backups

use anyhow::{Context, Result};
use regex::{NoExpand, Regex};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tokio::fs;

/// Suffix appended to a file's full name for its backup sibling
pub const BACKUP_SUFFIX: &str = ".bak";

static NAME_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<your-package-name>").expect("Invalid placeholder regex"));
static BRACKETED_NAME_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\[<your-package-name>\]").expect("Invalid placeholder regex")
});
static DESCRIPTION_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<your-package-description>").expect("Invalid placeholder regex")
});
static BRACKETED_DESCRIPTION_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\[<your-package-description>\]").expect("Invalid placeholder regex")
});
static YEAR_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<year>").expect("Invalid placeholder regex"));
static HOLDER_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<your-name>").expect("Invalid placeholder regex"));
static BRACKETED_HOLDER_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\[<your-name>\]").expect("Invalid placeholder regex"));
static COPYRIGHT_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<copyright-holder>").expect("Invalid placeholder regex"));
static BRACKETED_COPYRIGHT_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\[<copyright-holder>\]").expect("Invalid placeholder regex")
});

/// One substitution: every match of `pattern` becomes `replacement`.
///
/// The replacement is inserted literally (no capture-group expansion), so
/// values containing `$` pass through unmangled.
#[derive(Debug, Clone)]
pub struct Rule {
    pattern: Regex,
    replacement: String,
}

impl Rule {
    pub fn new(pattern: Regex, replacement: impl Into<String>) -> Self {
        Self {
            pattern,
            replacement: replacement.into(),
        }
    }

    fn apply(&self, text: &str) -> String {
        self.pattern
            .replace_all(text, NoExpand(&self.replacement))
            .into_owned()
    }
}

/// What happened to a single template file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    /// Placeholders replaced and the file rewritten
    Updated,
    /// No such file; template files are optional so this is informational
    NotFound,
    /// File exists but no rule matched; the filesystem was not touched
    NoPlaceholder,
}

impl FileOutcome {
    pub fn updated(&self) -> bool {
        matches!(self, FileOutcome::Updated)
    }
}

/// The backup sibling for a path: the same path with `.bak` appended.
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(BACKUP_SUFFIX);
    PathBuf::from(name)
}

/// Apply an ordered rule list to a file, backing it up before the rewrite.
///
/// Rules run in list order against the evolving text, each replacing every
/// occurrence of its pattern. The file is rewritten only when the result
/// differs from the original, and the `.bak` copy is attempted exactly once,
/// just before that rewrite. The backup is best-effort: a failed copy never
/// blocks the primary write. Running the same rules again on the result is a
/// no-op, since the first pass removed everything they match.
pub async fn apply_rules(path: &Path, rules: &[Rule]) -> Result<FileOutcome> {
    if fs::metadata(path).await.is_err() {
        return Ok(FileOutcome::NotFound);
    }

    let original = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let mut modified = original.clone();
    for rule in rules {
        modified = rule.apply(&modified);
    }

    if modified == original {
        return Ok(FileOutcome::NoPlaceholder);
    }

    let _ = fs::copy(path, backup_path(path)).await;

    fs::write(path, &modified)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(FileOutcome::Updated)
}

/// Rules for README-style files: name and description placeholders.
///
/// The bare tokens run before their bracketed forms, so a bracketed
/// placeholder keeps its brackets around the substituted value.
pub fn readme_rules(name: &str, description: &str) -> Vec<Rule> {
    vec![
        Rule::new(NAME_TOKEN.clone(), name),
        Rule::new(BRACKETED_NAME_TOKEN.clone(), name),
        Rule::new(DESCRIPTION_TOKEN.clone(), description),
        Rule::new(BRACKETED_DESCRIPTION_TOKEN.clone(), description),
    ]
}

/// Rules for LICENSE-style files: year and copyright-holder placeholders.
pub fn license_rules(year: &str, holder: &str) -> Vec<Rule> {
    vec![
        Rule::new(YEAR_TOKEN.clone(), year),
        Rule::new(HOLDER_TOKEN.clone(), holder),
        Rule::new(BRACKETED_HOLDER_TOKEN.clone(), holder),
        Rule::new(COPYRIGHT_TOKEN.clone(), holder),
        Rule::new(BRACKETED_COPYRIGHT_TOKEN.clone(), holder),
    ]
}
