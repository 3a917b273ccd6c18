//! Configuration file loading
//!
//! Settings come from `guardpost.toml`. A missing file means defaults; a file
//! that cannot be read or parsed also falls back to defaults with a warning.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

/// Default configuration file name
pub const CONFIG_FILENAME: &str = "guardpost.toml";

/// Default data directory, relative to the working directory
pub const DEFAULT_DATA_DIR: &str = ".guardpost";

/// Contents of `guardpost.toml`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding the collection files
    pub data_dir: PathBuf,

    /// Rows per list page
    pub page_size: usize,

    /// Delay before each write, in milliseconds
    pub simulated_latency_ms: u64,

    /// Log filter used when neither `-v` nor `GUARDPOST_LOG` is given
    pub log_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            page_size: guardpost_views::DEFAULT_PAGE_SIZE,
            simulated_latency_ms: 0,
            log_level: None,
        }
    }
}

impl Config {
    pub fn simulated_latency(&self) -> Duration {
        Duration::from_millis(self.simulated_latency_ms)
    }

    /// Replace the data directory when one was given on the command line
    pub fn with_data_dir(mut self, data_dir: Option<PathBuf>) -> Self {
        if let Some(dir) = data_dir {
            self.data_dir = dir;
        }
        self
    }
}

/// Why a config file could not be used
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {message}")]
    Read { path: PathBuf, message: String },

    #[error("Failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

/// Read and parse the config file; `Ok(None)` when it does not exist
pub fn read_config(path: &Path) -> Result<Option<Config>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    toml::from_str(&content)
        .map(Some)
        .map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
}

/// Settle a read result on a config, logging what happened
pub fn settle(result: Result<Option<Config>, ConfigError>, path: &Path) -> Config {
    match result {
        Ok(Some(config)) => {
            debug!("Loaded settings from {:?}", path);
            config
        }
        Ok(None) => {
            debug!("No config file at {:?}, using defaults", path);
            Config::default()
        }
        Err(e) => {
            warn!("{}; using defaults", e);
            Config::default()
        }
    }
}

/// Load the config at `path`, falling back to defaults
pub fn load_config(path: &Path) -> Config {
    settle(read_config(path), path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        assert!(read_config(&path).unwrap().is_none());

        let config = load_config(&path);
        assert_eq!(config, Config::default());
        assert_eq!(config.page_size, 10);
        assert_eq!(config.data_dir, PathBuf::from(".guardpost"));
    }

    #[test]
    fn test_partial_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "page_size = 25\nsimulated_latency_ms = 300\n").unwrap();

        let config = load_config(&path);
        assert_eq!(config.page_size, 25);
        assert_eq!(config.simulated_latency(), Duration::from_millis(300));
        assert_eq!(config.data_dir, PathBuf::from(DEFAULT_DATA_DIR));
    }

    #[test]
    fn test_invalid_file_falls_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "page_size = \"lots\"").unwrap();

        assert!(matches!(read_config(&path), Err(ConfigError::Parse { .. })));
        assert_eq!(load_config(&path), Config::default());
    }

    #[test]
    fn test_data_dir_override() {
        let config = Config::default().with_data_dir(Some(PathBuf::from("/srv/guardpost")));
        assert_eq!(config.data_dir, PathBuf::from("/srv/guardpost"));
        let config = config.with_data_dir(None);
        assert_eq!(config.data_dir, PathBuf::from("/srv/guardpost"));
    }
}
