use std::path::PathBuf;

pub use tally_config::{Config, ConfigError, ConfigManager};

use crate::utils::paths::PathResolver;

pub fn default_manager() -> Result<ConfigManager, ConfigError> {
    ConfigManager::with_base_dir(PathResolver::base_dir())
}

pub fn manager_with_base(base: PathBuf) -> Result<ConfigManager, ConfigError> {
    ConfigManager::with_base_dir(base)
}
