use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub kintree: KintreeConfig,
    #[serde(default)]
    pub engine: EngineConfig,
}

/// Core configuration: where the family database lives
#[derive(Debug, Clone, Deserialize)]
pub struct KintreeConfig {
    pub db_path: PathBuf,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Kinship engine tuning
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Generation bound for ancestor/descendant traversal
    #[serde(default = "default_max_generations")]
    pub max_generations: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_generations: default_max_generations(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_generations() -> u32 {
    10
}

impl Config {
    /// Load configuration from file
    ///
    /// Loads environment variables from .env file (if present) before loading config.
    /// Looks for config file in this order:
    /// 1. Path specified in KINTREE_CONFIG environment variable
    /// 2. ./config.toml in current directory
    pub fn load() -> Result<Self> {
        // .env is optional; ignore errors
        let _ = dotenv::dotenv();

        let config_path = std::env::var("KINTREE_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("config.toml"));

        let config_str = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        let config: Config = toml::from_str(&config_str)
            .context("Failed to parse config.toml")?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    fn validate(&self) -> Result<()> {
        if self.kintree.db_path.as_os_str().is_empty() {
            anyhow::bail!("kintree.db_path must not be empty");
        }

        if let Some(parent) = self.kintree.db_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                anyhow::bail!(
                    "Directory for db_path does not exist: {}. Create it first or fix db_path in config.toml.",
                    parent.display()
                );
            }
        }

        if self.engine.max_generations == 0 {
            anyhow::bail!("engine.max_generations must be greater than 0");
        }

        Ok(())
    }

    /// Get database path
    pub fn db_path(&self) -> &Path {
        &self.kintree.db_path
    }

    /// Get the traversal generation bound
    pub fn max_generations(&self) -> u32 {
        self.engine.max_generations
    }
}
