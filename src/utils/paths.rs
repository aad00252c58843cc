use std::{env, path::PathBuf};

/// Environment variable overriding the base directory.
pub const HOME_ENV: &str = "TALLY_HOME";

/// Resolves where Tally keeps its config and data.
pub struct PathResolver;

impl PathResolver {
    /// `$TALLY_HOME` when set and non-empty, otherwise `~/.tally`.
    pub fn base_dir() -> PathBuf {
        match env::var_os(HOME_ENV) {
            Some(value) if !value.is_empty() => PathBuf::from(value),
            _ => tally_config::default_base_dir(),
        }
    }
}
