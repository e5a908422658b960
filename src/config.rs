use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result, bail};
use serde::{Deserialize, Serialize};

use crate::forms::DEFAULT_CHARS_PER_ROW;
use crate::stats::FailurePolicy;

pub const CONFIG_FILE_NAME: &str = ".transkitrc.json";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_store_path")]
    pub store_path: String,
    #[serde(default = "default_chars_per_row")]
    pub chars_per_row: usize,
    #[serde(default)]
    pub failure_policy: FailurePolicy,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_store_path() -> String {
    "./transkit-store.json".to_string()
}

fn default_chars_per_row() -> usize {
    DEFAULT_CHARS_PER_ROW
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
            chars_per_row: default_chars_per_row(),
            failure_policy: FailurePolicy::default(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.chars_per_row == 0 {
            bail!("'charsPerRow' must be greater than 0");
        }
        self.log_level_filter()?;
        Ok(())
    }

    pub fn log_level_filter(&self) -> Result<log::LevelFilter> {
        self.log_level
            .parse()
            .with_context(|| format!("Invalid 'logLevel': \"{}\"", self.log_level))
    }

    /// Store file location; relative paths are taken from `root`.
    pub fn resolve_store_path(&self, root: &Path) -> PathBuf {
        let path = Path::new(&self.store_path);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            root.join(path)
        }
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}
