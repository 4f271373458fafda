use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use super::core::AppConfig;
use crate::core::ConfigError;

/// File name searched for when no explicit config path is given
pub const CONFIG_FILE_NAME: &str = ".code-assist.toml";

const MAX_TRAVERSAL_DEPTH: usize = 10;

/// Read a config file into a string
pub(crate) fn read_config_file(path: &Path) -> Result<String, std::io::Error> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Parse and validate config from a TOML string
pub fn parse_and_validate_config(contents: &str) -> Result<AppConfig, ConfigError> {
    let config = toml::from_str::<AppConfig>(contents)?;
    config.validate()?;
    Ok(config)
}

/// Load configuration from an explicit path; any failure is an error.
pub fn load_config_from_path(path: &Path) -> Result<AppConfig, ConfigError> {
    let contents = read_config_file(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config = parse_and_validate_config(&contents)?;
    log::debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// Try a discovered config file, warning and skipping it when unusable
fn try_load_config_from_path(config_path: &Path) -> Option<AppConfig> {
    let contents = match read_config_file(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            handle_read_error(config_path, &e);
            return None;
        }
    };

    match parse_and_validate_config(&contents) {
        Ok(config) => {
            log::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            log::warn!("{} in {}. Using defaults.", e, config_path.display());
            None
        }
    }
}

/// Handle file read errors with appropriate logging
fn handle_read_error(config_path: &Path, error: &std::io::Error) {
    // Only log actual errors, not "file not found"
    if error.kind() != std::io::ErrorKind::NotFound {
        log::warn!(
            "Failed to read config file {}: {}",
            config_path.display(),
            error
        );
    }
}

/// Yield `start` and its ancestors, up to `max_depth` directories
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Search `start` and its parents for a config file, falling back to defaults
pub fn discover_config(start: PathBuf) -> AppConfig {
    directory_ancestors(start, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            log::debug!(
                "No {} found after checking {} directories. Using default config.",
                CONFIG_FILE_NAME,
                MAX_TRAVERSAL_DEPTH
            );
            AppConfig::default()
        })
}

/// Build the effective configuration: file (explicit or discovered), then environment.
pub fn load_config(explicit: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let base = match explicit {
        Some(path) => load_config_from_path(path)?,
        None => match std::env::current_dir() {
            Ok(dir) => discover_config(dir),
            Err(e) => {
                log::warn!(
                    "Failed to get current directory: {}. Using default config.",
                    e
                );
                AppConfig::default()
            }
        },
    };

    let config = base.with_env_overrides(|key| std::env::var(key).ok())?;
    config.validate()?;
    Ok(config)
}
