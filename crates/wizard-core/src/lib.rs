//! Wizard Core - Shared library for personalizing package templates
//!
//! This library implements the setup wizard used by the `starter` binary to
//! turn a freshly cloned package template into a real project: it rewrites
//! the package manifest, substitutes placeholder tokens in free-text files
//! such as README.md and LICENSE, and runs dependency installation.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Pure Operations** - field validation, URL normalization and
//!   manifest propagation ([`fields`], [`manifest::PackageManifest::apply_fields`]),
//!   unit-testable without any filesystem or console dependency
//! - **Layer 2: File Operations** - placeholder substitution with lazy `.bak`
//!   backups ([`substitute`]) and the install subprocess ([`install`])
//! - **Layer 3: CLI/TUI Interface** - cliclack-based prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based prompt module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use wizard_core::{FieldSet, PackageManifest, MANIFEST_FILE};
//!
//! let mut manifest = PackageManifest::load(Path::new(MANIFEST_FILE)).await?;
//! manifest.apply_fields(&fields);
//! manifest.save(Path::new(MANIFEST_FILE)).await?;
//! ```

pub mod fields;
pub mod install;
pub mod manifest;
pub mod substitute;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use fields::{is_valid_package_name, normalize_repository_url, FieldSet};
pub use manifest::{PackageManifest, Repository, MANIFEST_FILE};
pub use substitute::{
    apply_rules, backup_path, license_rules, readme_rules, FileOutcome, Rule, BACKUP_SUFFIX,
};

#[cfg(feature = "tui")]
pub use tui::{run, SetupArgs};
