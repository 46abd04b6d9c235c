//! CLI configuration

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::output::OutputFormat;

/// Environment variable overriding the config file location
pub const CONFIG_ENV: &str = "KINSHIP_CONFIG";

/// Get the config file path
pub fn config_file_path() -> PathBuf {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return PathBuf::from(path);
    }
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("kinship")
        .join("config.toml")
}

/// Settable config entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConfigKey {
    /// Family file used when `--file` is not given
    #[value(name = "family_file")]
    FamilyFile,
    /// Output format used when `--format` is not given
    Format,
}

impl ConfigKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FamilyFile => "family_file",
            Self::Format => "format",
        }
    }
}

/// Defaults applied when a command line leaves them out
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family_file: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<OutputFormat>,
}

impl Config {
    /// Load the config file, falling back to defaults when it is missing or
    /// unreadable
    pub fn load() -> Self {
        let path = config_file_path();
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(_) => {
                tracing::debug!("No config file at {:?}, using defaults", path);
                return Self::default();
            }
        };
        match toml::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Ignoring invalid config file {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let path = config_file_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    /// Display form of one entry, `None` when unset
    pub fn value(&self, key: ConfigKey) -> Option<String> {
        match key {
            ConfigKey::FamilyFile => self.family_file.as_ref().map(|p| p.display().to_string()),
            ConfigKey::Format => self.format.map(|f| f.to_string()),
        }
    }

    /// Set one entry from its command-line text. Formats are checked against
    /// the same names `--format` accepts.
    pub fn assign(&mut self, key: ConfigKey, value: &str) -> anyhow::Result<()> {
        match key {
            ConfigKey::FamilyFile => self.family_file = Some(PathBuf::from(value)),
            ConfigKey::Format => {
                let format = OutputFormat::from_str(value, true).map_err(|_| {
                    let names: Vec<&str> = OutputFormat::value_variants()
                        .iter()
                        .map(OutputFormat::as_str)
                        .collect();
                    anyhow::anyhow!(
                        "Invalid format '{}' (expected one of: {})",
                        value,
                        names.join(", ")
                    )
                })?;
                self.format = Some(format);
            }
        }
        Ok(())
    }

    pub fn clear(&mut self, key: ConfigKey) {
        match key {
            ConfigKey::FamilyFile => self.family_file = None,
            ConfigKey::Format => self.format = None,
        }
    }
}

/// Make a family file path independent of the directory the CLI later runs
/// from
pub fn absolute_family_file(path: &Path) -> anyhow::Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().context("Failed to read the current directory")?;
    Ok(cwd.join(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assign_and_value() {
        let mut config = Config::default();
        config.assign(ConfigKey::FamilyFile, "/tmp/family.tsv").unwrap();
        config.assign(ConfigKey::Format, "JSON").unwrap();

        assert_eq!(
            config.value(ConfigKey::FamilyFile).as_deref(),
            Some("/tmp/family.tsv")
        );
        assert_eq!(config.format, Some(OutputFormat::Json));
        assert_eq!(config.value(ConfigKey::Format).as_deref(), Some("json"));

        config.clear(ConfigKey::Format);
        assert!(config.value(ConfigKey::Format).is_none());
    }

    #[test]
    fn test_format_accepts_only_known_names() {
        let mut config = Config::default();
        let err = config.assign(ConfigKey::Format, "yaml").unwrap_err();
        assert!(err.to_string().contains("table, json, csv"));
        assert!(config.format.is_none());
    }

    #[test]
    fn test_key_names() {
        assert_eq!(
            ConfigKey::from_str("family_file", false),
            Ok(ConfigKey::FamilyFile)
        );
        assert!(ConfigKey::from_str("colour", false).is_err());
        for key in ConfigKey::value_variants() {
            assert_eq!(key.to_possible_value().unwrap().get_name(), key.as_str());
        }
    }

    #[test]
    fn test_toml_round_trip() {
        let config = Config {
            family_file: Some(PathBuf::from("family.tsv")),
            format: Some(OutputFormat::Csv),
        };
        let text = toml::to_string_pretty(&config).unwrap();
        assert!(text.contains("format = \"csv\""));
        assert_eq!(toml::from_str::<Config>(&text).unwrap(), config);

        // An unknown format in a hand-edited file is rejected on load
        assert!(toml::from_str::<Config>("format = \"yaml\"").is_err());
    }

    #[test]
    fn test_absolute_family_file() {
        let path = absolute_family_file(Path::new("family.tsv")).unwrap();
        assert!(path.is_absolute());
        assert!(path.ends_with("family.tsv"));
    }
}
