//! starter CLI - Setup wizard for the starter package template

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use wizard_core::SetupArgs;

#[derive(Parser, Debug)]
#[command(name = "starter")]
#[command(about = "Personalize a freshly cloned package template")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fill in package metadata, rewrite template files and install dependencies
    Setup(CliSetupArgs),
}

#[derive(Parser, Debug)]
pub struct CliSetupArgs {
    /// Template directory to personalize (defaults to the current directory)
    #[arg(short, long)]
    pub directory: Option<PathBuf>,

    /// Skip dependency installation after the rewrite
    #[arg(long = "skip-install")]
    pub skip_install: bool,

    /// Accept every suggested value without prompting (non-interactive mode)
    #[arg(short, long)]
    pub yes: bool,
}

impl From<CliSetupArgs> for SetupArgs {
    fn from(args: CliSetupArgs) -> Self {
        SetupArgs {
            directory: args.directory,
            skip_install: args.skip_install,
            yes: args.yes,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();

    let setup_args = match args.command {
        Some(Command::Setup(setup_args)) => setup_args.into(),
        // No subcommand provided, default to setup (interactive mode)
        None => SetupArgs::default(),
    };

    let result = wizard_core::run(setup_args).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    result
}
