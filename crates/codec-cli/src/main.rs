//! codec CLI
//!
//! Resolves settings from built-in defaults, the root config file and
//! command-line flags, then runs a command against them.

mod cli;
mod commands;
mod error;
mod interactive;

use clap::{CommandFactory, Parser};
use codec_settings::{Defaults, Settings};
use colored::Colorize;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
            )
            .with_target(true)
            .with_writer(std::io::stderr)
            .finish();
        if tracing::subscriber::set_global_default(subscriber).is_ok() {
            tracing::debug!("Debug logging enabled");
        }
    }

    if let Some(Commands::Completions { shell }) = cli.command {
        clap_complete::generate(shell, &mut Cli::command(), "codec", &mut std::io::stdout());
        return Ok(());
    }

    let mut settings = Settings::load(Defaults::builtin(), &cli.overrides.to_overrides());
    commands::print_warnings(settings.warnings());

    match cli.command {
        Some(cmd) => execute_command(cmd, &mut settings)?,
        None => {
            println!("{} settings resolved", "codec".green().bold());
            println!();
            println!("Run {} for available commands.", "codec --help".cyan());
        }
    }

    if let Some(plan) = settings.save_requested()? {
        commands::print_saved(&plan);
    }
    Ok(())
}

fn execute_command(cmd: Commands, settings: &mut Settings) -> Result<()> {
    match cmd {
        Commands::Show { json } => commands::run_show(settings, json),
        Commands::Get { key } => commands::run_get(settings, &key),
        Commands::Save { path, dry_run } => commands::run_save(settings, path.as_deref(), dry_run),
        Commands::Fill { keys } => commands::run_fill(settings, &keys),
        Commands::Completions { .. } => Ok(()),
    }
}
