//! Package manifest model, loading and metadata propagation

use crate::fields::{normalize_repository_url, FieldSet};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::path::Path;
use tokio::fs;

/// Conventional manifest file name, relative to the template root
pub const MANIFEST_FILE: &str = "package.json";

/// The `repository` field as written by registries: either a bare URL string
/// or a `{type, url}` object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Repository {
    Url(String),
    Info(RepositoryInfo),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositoryInfo {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Repository {
    /// The repository URL regardless of which shape the manifest used
    pub fn url(&self) -> Option<&str> {
        match self {
            Repository::Url(url) => Some(url),
            Repository::Info(info) => info.url.as_deref(),
        }
    }
}

/// In-memory `package.json`.
///
/// Only the fields the wizard reads or rewrites are typed; everything else
/// (version, scripts, dependencies, ...) rides along untouched in `extra`.
/// `author` and `bugs` stay as raw values because registries allow both
/// string and object forms there.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PackageManifest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<Repository>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub bugs: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PackageManifest {
    /// Read and parse the manifest. Failure here aborts the run.
    pub async fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Serialize with 2-space indentation and a trailing newline.
    pub fn to_json(&self) -> Result<String> {
        let mut text = serde_json::to_string_pretty(self).context("Failed to serialize manifest")?;
        text.push('\n');
        Ok(text)
    }

    /// Write the manifest back to disk. Failure here aborts the run.
    pub async fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_json()?)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))
    }

    /// The author as a display string, for prompt defaults. Object-form
    /// authors have no single string rendering and default to empty.
    pub fn author_str(&self) -> &str {
        self.author
            .as_ref()
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    /// The repository URL as a display string, for prompt defaults.
    pub fn repository_url(&self) -> &str {
        self.repository
            .as_ref()
            .and_then(Repository::url)
            .unwrap_or_default()
    }

    /// Propagate confirmed field values into the manifest.
    ///
    /// `name` and `description` are overwritten unconditionally (clearing the
    /// description is a deliberate operator choice; the name is pre-validated
    /// and never empty). `author` is only overwritten when non-empty. A
    /// non-empty repository URL is stored verbatim under `repository` while
    /// `bugs.url` and `homepage` are derived from its normalized form; an
    /// empty one leaves all three fields untouched. No other field changes.
    pub fn apply_fields(&mut self, fields: &FieldSet) {
        self.name = Some(fields.name.clone());
        self.description = Some(fields.description.clone());

        if !fields.author.is_empty() {
            self.author = Some(Value::String(fields.author.clone()));
        }

        if !fields.repository_url.is_empty() {
            let normalized = normalize_repository_url(&fields.repository_url);
            self.repository = Some(Repository::Info(RepositoryInfo {
                kind: Some("git".to_string()),
                url: Some(fields.repository_url.clone()),
                extra: Map::new(),
            }));
            self.bugs = Some(json!({ "url": format!("{normalized}/issues") }));
            self.homepage = Some(format!("{normalized}#readme"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_fields() -> FieldSet {
        FieldSet {
            name: "new-pkg".to_string(),
            description: "A tool".to_string(),
            author: String::new(),
            repository_url: "https://github.com/x/y.git".to_string(),
            copyright_year: "2024".to_string(),
            copyright_holder: "Ada".to_string(),
        }
    }

    #[test]
    fn test_apply_fields_with_repository() {
        let mut manifest: PackageManifest = serde_json::from_str(
            r#"{"name": "old", "author": "", "repository": {"url": ""}}"#,
        )
        .unwrap();

        manifest.apply_fields(&test_fields());

        assert_eq!(manifest.name.as_deref(), Some("new-pkg"));
        assert_eq!(manifest.description.as_deref(), Some("A tool"));
        // Empty author input keeps whatever the manifest already had
        assert_eq!(manifest.author, Some(Value::String(String::new())));
        assert_eq!(
            manifest.repository,
            Some(Repository::Info(RepositoryInfo {
                kind: Some("git".to_string()),
                url: Some("https://github.com/x/y.git".to_string()),
                extra: Map::new(),
            }))
        );
        assert_eq!(
            manifest.bugs,
            Some(json!({ "url": "https://github.com/x/y/issues" }))
        );
        assert_eq!(
            manifest.homepage.as_deref(),
            Some("https://github.com/x/y#readme")
        );
    }

    #[test]
    fn test_empty_repository_url_leaves_links_untouched() {
        let mut manifest: PackageManifest = serde_json::from_str(
            r#"{
                "name": "old",
                "repository": "https://example.com/repo",
                "bugs": {"url": "https://example.com/bugs"},
                "homepage": "https://example.com"
            }"#,
        )
        .unwrap();

        let mut fields = test_fields();
        fields.repository_url = String::new();
        manifest.apply_fields(&fields);

        assert_eq!(
            manifest.repository,
            Some(Repository::Url("https://example.com/repo".to_string()))
        );
        assert_eq!(manifest.bugs, Some(json!({"url": "https://example.com/bugs"})));
        assert_eq!(manifest.homepage.as_deref(), Some("https://example.com"));
    }

    #[test]
    fn test_non_empty_author_overwrites() {
        let mut manifest: PackageManifest =
            serde_json::from_str(r#"{"author": "Old Author"}"#).unwrap();

        let mut fields = test_fields();
        fields.author = "New Author".to_string();
        manifest.apply_fields(&fields);

        assert_eq!(manifest.author, Some(Value::String("New Author".to_string())));
    }

    #[test]
    fn test_description_can_be_cleared() {
        let mut manifest: PackageManifest =
            serde_json::from_str(r#"{"description": "old words"}"#).unwrap();

        let mut fields = test_fields();
        fields.description = String::new();
        fields.repository_url = String::new();
        manifest.apply_fields(&fields);

        assert_eq!(manifest.description.as_deref(), Some(""));
    }

    #[test]
    fn test_unknown_keys_survive_round_trip() {
        let source = r#"{
            "name": "old",
            "version": "1.2.3",
            "scripts": {"build": "node scripts/build.js"},
            "devDependencies": {"esbuild": "^0.20.0"}
        }"#;
        let mut manifest: PackageManifest = serde_json::from_str(source).unwrap();
        manifest.apply_fields(&test_fields());

        let out = manifest.to_json().unwrap();
        let value: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["version"], "1.2.3");
        assert_eq!(value["scripts"]["build"], "node scripts/build.js");
        assert_eq!(value["devDependencies"]["esbuild"], "^0.20.0");
    }

    #[test]
    fn test_to_json_format() {
        let manifest: PackageManifest = serde_json::from_str(r#"{"name": "pkg"}"#).unwrap();
        let out = manifest.to_json().unwrap();
        assert_eq!(out, "{\n  \"name\": \"pkg\"\n}\n");
    }

    #[test]
    fn test_repository_string_form() {
        let manifest: PackageManifest =
            serde_json::from_str(r#"{"repository": "git+https://github.com/x/y.git"}"#).unwrap();
        assert_eq!(manifest.repository_url(), "git+https://github.com/x/y.git");
    }

    #[test]
    fn test_author_object_form_defaults_to_empty() {
        let manifest: PackageManifest =
            serde_json::from_str(r#"{"author": {"name": "Ada", "email": "ada@example.com"}}"#)
                .unwrap();
        assert_eq!(manifest.author_str(), "");
    }
}
