//! Kinship CLI - Command line interface for the family tree

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use clap::{Parser, Subcommand};
use kinship_core::FamilyTree;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod demo;
mod output;
mod shell;

use commands::{completions, search, show};
use config::{default_config_path, Config};
use output::OutputFormat;

#[derive(Parser)]
#[command(name = "kinship")]
#[command(author, version, about = "Genealogical records with relationship validation")]
pub struct Cli {
    /// Output format [default: from config, else text]
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<OutputFormat>,

    /// Start with an empty tree instead of the demo dynasty
    #[arg(long, global = true)]
    pub empty: bool,

    /// Config file
    #[arg(short, long, env = "KINSHIP_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Also write logs to this file
    #[arg(long, env = "KINSHIP_LOG_FILE", global = true)]
    pub log_file: Option<PathBuf>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Get the config file path
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(default_config_path)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive session
    Shell,
    /// Print the family tree
    Tree,
    /// Search persons by name
    Search(search::SearchArgs),
    /// Show one person and their relatives
    Show(show::ShowArgs),
    /// Manage configuration
    Config(commands::config::ConfigArgs),
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Application context with the loaded tree
pub struct AppContext {
    pub tree: FamilyTree,
    pub format: OutputFormat,
}

impl AppContext {
    pub fn new(cli: &Cli, config: &Config) -> anyhow::Result<Self> {
        let tree = if cli.empty || !config.load_demo {
            tracing::debug!("Starting with an empty tree");
            FamilyTree::new()
        } else {
            demo::demo_tree()?
        };

        Ok(Self {
            tree,
            format: cli.format.unwrap_or(config.format),
        })
    }
}

fn init_logging(cli: &Cli, config: &Config) -> anyhow::Result<()> {
    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let file_layer = match cli.log_file.as_ref().or(config.log_file.as_ref()) {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            Some(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let (config, config_error) = match Config::load(&cli.config_path()) {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };

    init_logging(&cli, &config)?;
    tracing::debug!("Starting kinship CLI");
    if let Some(e) = config_error {
        tracing::warn!("Ignoring config: {:#}", e);
    }

    match &cli.command {
        Commands::Config(args) => return commands::config::run(args, &cli),
        Commands::Completions(args) => return completions::run(args),
        _ => {}
    }

    let mut ctx = AppContext::new(&cli, &config)?;

    match &cli.command {
        Commands::Shell => commands::shell::run(&mut ctx)?,
        Commands::Tree => commands::tree::run(&ctx)?,
        Commands::Search(args) => search::run(args, &ctx)?,
        Commands::Show(args) => show::run(args, &ctx)?,
        Commands::Config(_) | Commands::Completions(_) => {}
    }

    Ok(())
}
