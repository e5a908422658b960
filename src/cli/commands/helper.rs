use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::config::{CONFIG_FILE_NAME, Config, ConfigLoadResult, load_config};
use crate::logging;

/// Working directory, configuration and logging shared by the commands.
pub struct CommandContext {
    pub root: PathBuf,
    pub config: Config,
}

impl CommandContext {
    pub fn load(verbose: bool) -> Result<Self> {
        let root = std::env::current_dir().context("Failed to read current directory")?;
        let ConfigLoadResult { config, from_file } = load_config(&root)?;

        let level = logging::init_from(config.log_level_filter()?, verbose);
        if from_file {
            log::debug!("using {} (log level {})", CONFIG_FILE_NAME, level);
        } else {
            log::debug!("no {} found, using defaults", CONFIG_FILE_NAME);
        }

        Ok(Self { root, config })
    }
}
