//! The `config` command: inspect and edit the defaults for `--file` and
//! `--format`

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Subcommand};
use kinship_core::GenePool;

use crate::config::{absolute_family_file, config_file_path, Config, ConfigKey};
use crate::output::OutputFormat;

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print one setting, or every setting when no key is given
    Show {
        #[arg(value_enum)]
        key: Option<ConfigKey>,
    },
    /// Change a setting
    Set {
        #[arg(value_enum)]
        key: ConfigKey,
        value: String,
    },
    /// Remove a setting, restoring the built-in default
    Unset {
        #[arg(value_enum)]
        key: ConfigKey,
    },
    /// Print the config file location
    Path,
    /// Write a new config file. The global `--format` is saved as the
    /// default format.
    Init {
        /// Family file to use by default; it must load
        #[arg(long, value_name = "PATH")]
        family_file: Option<PathBuf>,
        /// Replace an existing config file
        #[arg(long)]
        force: bool,
    },
}

pub fn run(args: &ConfigArgs, format: Option<OutputFormat>) -> anyhow::Result<()> {
    match &args.command {
        ConfigCommands::Show { key } => show(*key),
        ConfigCommands::Set { key, value } => set(*key, value),
        ConfigCommands::Unset { key } => unset(*key),
        ConfigCommands::Path => {
            println!("{}", config_file_path().display());
            Ok(())
        }
        ConfigCommands::Init { family_file, force } => {
            init(family_file.as_deref(), format, *force)
        }
    }
}

fn show(key: Option<ConfigKey>) -> anyhow::Result<()> {
    let config = Config::load();
    let unset = || "(not set)".to_string();
    match key {
        Some(key) => println!("{}", config.value(key).unwrap_or_else(unset)),
        None => {
            println!("# {}", config_file_path().display());
            for key in [ConfigKey::FamilyFile, ConfigKey::Format] {
                println!("{} = {}", key.as_str(), config.value(key).unwrap_or_else(unset));
            }
        }
    }
    Ok(())
}

fn set(key: ConfigKey, value: &str) -> anyhow::Result<()> {
    let mut config = Config::load();
    match key {
        ConfigKey::FamilyFile => {
            let path = checked_family_file(Path::new(value))?;
            config.family_file = Some(path);
        }
        ConfigKey::Format => config.assign(key, value)?,
    }
    config.save()?;
    tracing::info!("Updated {}", config_file_path().display());
    println!("{} = {}", key.as_str(), config.value(key).unwrap_or_default());
    Ok(())
}

fn unset(key: ConfigKey) -> anyhow::Result<()> {
    let mut config = Config::load();
    config.clear(key);
    config.save()?;
    println!("{} unset", key.as_str());
    Ok(())
}

fn init(
    family_file: Option<&Path>,
    format: Option<OutputFormat>,
    force: bool,
) -> anyhow::Result<()> {
    let path = config_file_path();
    if path.exists() && !force {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    let config = Config {
        family_file: family_file.map(checked_family_file).transpose()?,
        format: Some(format.unwrap_or_default()),
    };
    config.save()?;
    println!("Created config file at {}", path.display());
    Ok(())
}

/// Resolve a family file to an absolute path and make sure it loads, so a
/// bad path is reported now rather than on the next query
fn checked_family_file(path: &Path) -> anyhow::Result<PathBuf> {
    let path = absolute_family_file(path)?;
    let pool = GenePool::load(&path)
        .with_context(|| format!("Failed to load family file {}", path.display()))?;
    tracing::info!("Family file {} holds {} people", path.display(), pool.len());
    Ok(path)
}
