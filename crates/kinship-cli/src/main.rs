//! Kinship CLI - Command line interface for family tree queries

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod output;

use commands::{completions, people, query};
use config::Config;
use kinship_core::GenePool;
use output::OutputFormat;

#[derive(Parser)]
#[command(name = "kinship")]
#[command(author, version, about = "Answer kinship questions over a family tree")]
pub struct Cli {
    /// Family file (tab-separated: name, gender, mother, father)
    #[arg(short, long, global = true, env = "KINSHIP_FAMILY_FILE")]
    pub file: Option<PathBuf>,

    /// Output format (defaults to the configured format, then table)
    #[arg(short = 'o', long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Ask a question in text form, e.g. "Carol's maternal aunts"
    Ask(query::AskArgs),
    /// Run a query from explicit fields
    Find(query::FindArgs),
    /// Answer one query per line read from stdin
    Shell,
    /// List everyone in the family file
    People,
    /// Show one person's parents and children
    Show(people::ShowArgs),
    /// Show load statistics for the family file
    Stats,
    /// Manage configuration
    Config(commands::config::ConfigArgs),
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Application context with the loaded family tree
pub struct AppContext {
    pub pool: GenePool,
    pub format: OutputFormat,
}

impl AppContext {
    pub fn new(cli: &Cli, config: &Config) -> anyhow::Result<Self> {
        let Some(path) = cli.file.as_ref().or(config.family_file.as_ref()) else {
            anyhow::bail!(
                "No family file given. Pass --file or run `kinship config set family_file <path>`."
            );
        };
        tracing::debug!("Using family file: {:?}", path);

        let pool = GenePool::load(path)
            .with_context(|| format!("Failed to load family file {}", path.display()))?;

        let format = cli.format.or(config.format).unwrap_or_default();

        Ok(Self { pool, format })
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .init();

    tracing::debug!("Starting kinship CLI");

    match &cli.command {
        Commands::Config(args) => return commands::config::run(args, cli.format),
        Commands::Completions(args) => return completions::run(args),
        _ => {}
    }

    let config = Config::load();
    let ctx = AppContext::new(&cli, &config)?;

    match &cli.command {
        Commands::Ask(args) => query::run_ask(args, &ctx)?,
        Commands::Find(args) => query::run_find(args, &ctx)?,
        Commands::Shell => query::run_shell(&ctx)?,
        Commands::People => people::run_people(&ctx)?,
        Commands::Show(args) => people::run_show(args, &ctx)?,
        Commands::Stats => people::run_stats(&ctx)?,
        Commands::Config(_) | Commands::Completions(_) => {}
    }

    Ok(())
}
