//! Recipes CLI - search and fetch ActiveState Code Recipes
//!
//! Usage:
//!   recipes search <terms...>      Search and list recipes
//!   recipes show <id>              Print a recipe's source
//!   recipes describe <id>          Print a recipe's description
//!   recipes import <id>            Save a recipe into the workspace
//!   recipes place <id>             Pre-fill the next input (shell front ends only)
//!   recipes shell                  Interactive session with lookup indices

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use recipe_lookup::{output, shell, Command, Config, Session, TerminalHost};
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "recipes")]
#[command(about = "Search and fetch ActiveState Code Recipes")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (default: XDG config search path)
    #[arg(short, long, global = true, env = "RECIPES_CONFIG")]
    config: Option<PathBuf>,

    /// Maximum number of search results kept
    #[arg(short = 'n', long, global = true)]
    max_results: Option<usize>,

    /// HTTP timeout in seconds
    #[arg(short, long, global = true)]
    timeout: Option<u64>,

    /// Directory imported recipes are written to
    #[arg(short, long, global = true)]
    workspace: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Search recipes
    Search {
        /// Search terms
        terms: Vec<String>,
    },

    /// Print a recipe's source
    Show {
        /// Recipe id
        recipe: String,
    },

    /// Print a recipe's description
    Describe {
        /// Recipe id
        recipe: String,
    },

    /// Bind a recipe into the workspace as "recipe"
    Import {
        /// Recipe id
        recipe: String,
    },

    /// Pre-fill the next input with a recipe's source
    Place {
        /// Recipe id
        recipe: String,
    },

    /// Start an interactive session
    Shell,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(&cli)?;
    let mut session = Session::new(&config);
    let mut host = TerminalHost::new(config.workspace_dir.clone(), &config.language);

    let cmd = match cli.command {
        Commands::Search { terms } => Command::Search(terms.join(" ")),
        Commands::Show { recipe } => Command::Show(recipe),
        Commands::Describe { recipe } => Command::Describe(recipe),
        Commands::Import { recipe } => Command::Import(recipe),
        Commands::Place { recipe } => Command::Place(recipe),
        Commands::Shell => return run_shell(&mut session, &mut host),
    };
    session.execute(cmd, &mut host);

    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "recipe_lookup=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Config file (explicit or searched), then CLI flag overrides
fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => Config::load().context("Failed to load config")?,
    };

    if let Some(n) = cli.max_results {
        config = config.with_max_results(n)?;
    }
    if let Some(secs) = cli.timeout {
        config = config.with_timeout_secs(secs);
    }
    if let Some(dir) = &cli.workspace {
        config = config.with_workspace_dir(dir.clone());
    }

    tracing::debug!(?config, "configuration loaded");
    Ok(config)
}

/// Read commands from stdin until EOF or `quit`
fn run_shell(session: &mut Session, host: &mut TerminalHost) -> Result<()> {
    let interactive = std::io::stdin().is_terminal();
    if interactive {
        output::usage();
    }

    shell::run(session, host, std::io::stdin().lock(), interactive)
        .context("Failed to read input")
}
