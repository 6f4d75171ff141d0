//! Charm-style CLI prompts using cliclack

use crate::fields::{is_valid_package_name, FieldSet};
use crate::install::{run_install, DEFAULT_INSTALL_COMMAND};
use crate::manifest::{PackageManifest, MANIFEST_FILE};
use crate::substitute::{
    apply_rules, backup_path, license_rules, readme_rules, FileOutcome, BACKUP_SUFFIX,
};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Free-text template files the wizard rewrites, by conventional name
const README_FILE: &str = "README.md";
const LICENSE_FILE: &str = "LICENSE";

/// CLI arguments for the setup command
#[derive(Debug, Clone, Default)]
pub struct SetupArgs {
    /// Template directory to personalize (defaults to the current directory)
    pub directory: Option<PathBuf>,

    /// Skip dependency installation after the rewrite
    pub skip_install: bool,

    /// Auto-confirm all prompts (non-interactive mode)
    pub yes: bool,
}

/// Run the setup wizard: prompt, confirm, rewrite, install.
pub async fn run(args: SetupArgs) -> Result<()> {
    cliclack::intro("starter setup")?;

    let dir = resolve_directory(&args)?;
    let manifest_path = dir.join(MANIFEST_FILE);

    // A template without a readable manifest cannot be personalized
    let manifest = PackageManifest::load(&manifest_path).await?;

    if !args.yes {
        cliclack::log::info(
            "Fill in the package metadata. Press Enter to accept the suggested value.",
        )?;
    }

    let fields = collect_fields(&manifest, &args)?;

    let confirmed = if args.yes {
        true
    } else {
        cliclack::note(
            "Changes to apply",
            format!(
                "name:             {}\ndescription:      {}\nauthor:           {}\nrepository:       {}\ncopyright year:   {}\ncopyright holder: {}",
                fields.name,
                fields.description,
                fields.author,
                fields.repository_url,
                fields.copyright_year,
                fields.copyright_holder
            ),
        )?;
        cliclack::confirm("Apply these changes?")
            .initial_value(false)
            .interact()?
    };

    if !confirmed {
        cliclack::outro("Aborted. No changes were made.")?;
        return Ok(());
    }

    commit(&dir, manifest, &fields).await?;

    if args.skip_install {
        cliclack::log::info("Skipping dependency installation")?;
    } else {
        cliclack::log::info(format!(
            "Running `{DEFAULT_INSTALL_COMMAND}` to install dependencies..."
        ))?;
        run_install(&dir, DEFAULT_INSTALL_COMMAND).await?;
        cliclack::log::success("Dependencies installed")?;
    }

    cliclack::outro("Setup complete. Open README.md to get started.")?;

    Ok(())
}

fn resolve_directory(args: &SetupArgs) -> Result<PathBuf> {
    let current_dir = std::env::current_dir().context("Failed to resolve current directory")?;

    match &args.directory {
        Some(dir) => {
            let path = if dir.is_absolute() {
                dir.clone()
            } else {
                current_dir.join(dir)
            };
            cliclack::log::info(format!("Using directory: {}", path.display()))?;
            Ok(path)
        }
        None => Ok(current_dir),
    }
}

/// Gather field values, using the current manifest (and current year) as the
/// suggested defaults. The package name re-prompts until it is valid.
fn collect_fields(manifest: &PackageManifest, args: &SetupArgs) -> Result<FieldSet> {
    let default_name = manifest.name.clone().unwrap_or_default();
    let default_description = manifest.description.clone().unwrap_or_default();
    let default_author = manifest.author_str().to_string();
    let default_repository = manifest.repository_url().to_string();
    let default_year = chrono::Local::now().format("%Y").to_string();

    if args.yes {
        if !is_valid_package_name(&default_name) {
            anyhow::bail!(
                "Manifest name {:?} is not a valid package name; re-run without --yes to pick one",
                default_name
            );
        }
        return Ok(FieldSet {
            name: default_name,
            description: default_description,
            copyright_holder: default_author.clone(),
            author: default_author,
            repository_url: default_repository,
            copyright_year: default_year,
        });
    }

    let mut name = prompt("Package name", &default_name)?;
    while !is_valid_package_name(&name) {
        cliclack::log::warning(
            "Invalid package name. Use lowercase letters, digits, hyphens, dots, underscores; \
             scoped names like @scope/name are allowed.",
        )?;
        name = prompt("Package name", &default_name)?;
    }

    let description = prompt("Description", &default_description)?;
    let author = prompt("Author", &default_author)?;
    let repository_url = prompt("Repository URL", &default_repository)?;
    let copyright_year = prompt("Copyright year", &default_year)?;

    let default_holder = if author.is_empty() {
        default_author
    } else {
        author.clone()
    };
    let copyright_holder = prompt("Copyright holder", &default_holder)?;

    Ok(FieldSet {
        name,
        description,
        author,
        repository_url,
        copyright_year,
        copyright_holder,
    })
}

fn prompt(message: &str, default: &str) -> Result<String> {
    let value: String = cliclack::input(message).default_input(default).interact()?;
    Ok(value.trim().to_string())
}

/// The one stateful phase: manifest rewrite, then each template file, in
/// order. Template outcomes are informational; a manifest write failure
/// aborts the run.
async fn commit(dir: &Path, mut manifest: PackageManifest, fields: &FieldSet) -> Result<()> {
    let manifest_path = dir.join(MANIFEST_FILE);

    // Best-effort backup; the rewrite proceeds even if the copy fails
    let _ = fs::copy(&manifest_path, backup_path(&manifest_path)).await;

    manifest.apply_fields(fields);
    manifest.save(&manifest_path).await?;
    cliclack::log::success(format!(
        "Updated {MANIFEST_FILE} (backup at {MANIFEST_FILE}{BACKUP_SUFFIX})"
    ))?;

    let readme = dir.join(README_FILE);
    let outcome = apply_rules(&readme, &readme_rules(&fields.name, &fields.description)).await?;
    report(README_FILE, outcome)?;

    let license = dir.join(LICENSE_FILE);
    let outcome = apply_rules(
        &license,
        &license_rules(&fields.copyright_year, &fields.copyright_holder),
    )
    .await?;
    report(LICENSE_FILE, outcome)?;

    Ok(())
}

fn report(file: &str, outcome: FileOutcome) -> Result<()> {
    match outcome {
        FileOutcome::Updated => cliclack::log::success(format!(
            "{file} placeholders replaced (backup at {file}{BACKUP_SUFFIX})"
        ))?,
        FileOutcome::NotFound => cliclack::log::info(format!("{file} not found; skipping"))?,
        FileOutcome::NoPlaceholder => {
            cliclack::log::info(format!("No {file} placeholders found; nothing to replace"))?
        }
    }
    Ok(())
}
