//! Confirmed field values and the validation rules applied to them

use regex::Regex;
use std::sync::LazyLock;

/// Grammar for unscoped package names: `my-pkg`, `some_lib.v2`
static UNSCOPED_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9\-~][a-z0-9\-._~]*$").expect("Invalid name regex"));

/// Grammar for scoped package names: `@scope/name`
static SCOPED_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^@[a-z0-9\-~][a-z0-9\-._~]*/[a-z0-9\-~][a-z0-9\-._~]*$")
        .expect("Invalid scoped name regex")
});

/// The set of user-confirmed values the wizard applies to the template.
///
/// Constructed once per run from operator input merged with the current
/// manifest defaults, then treated as immutable. `name` is pre-validated by
/// the prompt loop; every other field may be empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSet {
    pub name: String,
    pub description: String,
    pub author: String,
    pub repository_url: String,
    pub copyright_year: String,
    pub copyright_holder: String,
}

/// Check whether a package name satisfies the registry name grammar.
///
/// Accepts either an unscoped name (lowercase letter, digit, hyphen or tilde
/// first, then lowercase letters, digits, hyphens, dots, underscores, tildes)
/// or a scoped `@scope/name` where both segments follow the same grammar.
pub fn is_valid_package_name(name: &str) -> bool {
    if name.is_empty() {
        return false;
    }
    if name.starts_with('@') {
        SCOPED_NAME.is_match(name)
    } else {
        UNSCOPED_NAME.is_match(name)
    }
}

/// Derive the canonical web URL from a repository URL.
///
/// Strips a leading `git+` and a trailing `.git`, each at most once. A URL
/// matching neither comes back unchanged.
pub fn normalize_repository_url(url: &str) -> String {
    let url = url.strip_prefix("git+").unwrap_or(url);
    let url = url.strip_suffix(".git").unwrap_or(url);
    url.to_string()
}
