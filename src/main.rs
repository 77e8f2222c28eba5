//! ralph-hooks - validation hooks for story-driven agent workflows.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::warn;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use ralph_hooks::cli;
use ralph_hooks::config::{resolve_input_path, Config, FILE_PATH_ENV};
use ralph_hooks::Error;

#[derive(Parser)]
#[command(name = "ralph-hooks")]
#[command(about = "Commit-message and prd.json validation hooks")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check the latest commit message format (advisory, always exits 0)
    CommitCheck,

    /// Validate a prd.json document
    ValidatePrd {
        /// Document path, used when CLAUDE_TOOL_FILE_PATH is unset
        path: Option<PathBuf>,
    },

    /// Install the git hook and agent settings entries
    Install,

    /// Remove the git hook and agent settings entries
    Uninstall,
}

fn main() -> Result<(), Error> {
    let project_root = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    // A broken config must not block the hooks.
    let (config, config_err) = match Config::load(&project_root) {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };

    init_logging(&config.log_level);
    if let Some(e) = config_err {
        warn!(error = %e, "Failed to load config, using defaults");
    }

    let cli = Cli::parse();

    match cli.command {
        None => {
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
        Some(Commands::CommitCheck) => {
            cli::commit_check::run(&project_root)?;
        }
        Some(Commands::ValidatePrd { path }) => {
            let path = resolve_input_path(std::env::var(FILE_PATH_ENV).ok(), path);
            let exit_code = cli::validate_prd::run(path.as_deref(), &config);
            if exit_code != 0 {
                std::process::exit(exit_code);
            }
        }
        Some(Commands::Install) => {
            cli::install::run(&project_root, &config)?;
        }
        Some(Commands::Uninstall) => {
            cli::install::uninstall(&project_root)?;
        }
    }

    Ok(())
}

/// Log to stderr so hook stdout stays clean.
fn init_logging(level: &str) {
    // RUST_LOG wins; the config level only applies when it is unset.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("ralph_hooks={}", level)));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}
