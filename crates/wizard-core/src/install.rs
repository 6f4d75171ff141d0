//! Dependency installation subprocess

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;
use tokio::process::Command;

/// Default command run after the template has been personalized
pub const DEFAULT_INSTALL_COMMAND: &str = "npm install";

/// Run the install command in `dir` with inherited stdio.
///
/// Blocks until the command finishes; no timeout and no retry. A spawn
/// failure or non-zero exit aborts the run.
pub async fn run_install(dir: &Path, command: &str) -> Result<()> {
    println!();
    println!("{} {}", "Running:".dimmed(), command.yellow());
    println!();

    let status = Command::new("sh")
        .arg("-c")
        .arg(command)
        .current_dir(dir)
        .status()
        .await
        .with_context(|| format!("Failed to run `{command}`"))?;

    if !status.success() {
        anyhow::bail!(
            "`{}` exited with code {}",
            command,
            status.code().unwrap_or(-1)
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_successful_command() {
        let temp_dir = TempDir::new().unwrap();
        assert!(run_install(temp_dir.path(), "true").await.is_ok());
    }

    #[tokio::test]
    async fn test_non_zero_exit_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let err = run_install(temp_dir.path(), "exit 3").await.unwrap_err();
        assert!(err.to_string().contains("exited with code 3"));
    }

    #[tokio::test]
    async fn test_runs_in_the_given_directory() {
        let temp_dir = TempDir::new().unwrap();
        run_install(temp_dir.path(), "pwd > marker.txt").await.unwrap();

        let marker = std::fs::read_to_string(temp_dir.path().join("marker.txt")).unwrap();
        let reported = std::fs::canonicalize(marker.trim()).unwrap();
        let expected = std::fs::canonicalize(temp_dir.path()).unwrap();
        assert_eq!(reported, expected);
    }
}
