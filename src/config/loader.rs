use std::fs;
use std::path::{Path, PathBuf};

use super::core::BoundConfig;
use crate::core::{Error, Result};

pub const CONFIG_FILE_NAME: &str = ".bound.toml";

/// Directories searched above the working directory
const MAX_TRAVERSAL_DEPTH: usize = 10;

/// Pure function to parse and validate config from TOML string
pub fn parse_and_validate_config(contents: &str) -> Result<BoundConfig> {
    let mut config = toml::from_str::<BoundConfig>(contents)?;
    config.normalize();
    Ok(config)
}

/// Load a config file the user named explicitly; any failure is an error
pub fn load_config_from(path: &Path) -> Result<BoundConfig> {
    let contents = fs::read_to_string(path)
        .map_err(|e| Error::file_system_io("Failed to read config file", path, e))?;
    parse_and_validate_config(&contents).map_err(|e| {
        Error::configuration(format!("{}: {}", path.display(), e))
    })
}

/// Try loading config from a discovered path, logging instead of failing
pub(crate) fn try_load_config_from_path(config_path: &Path) -> Option<BoundConfig> {
    let contents = match fs::read_to_string(config_path) {
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
            log::warn!(
                "Ignoring invalid config {}: {}. Using defaults.",
                config_path.display(),
                e
            );
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

/// Pure function to generate directory ancestors up to a depth limit
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

/// Per-user fallback location, e.g. `~/.config/bound/config.toml`
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("bound").join("config.toml"))
}

/// Discover configuration starting from `start`
pub fn load_config_from_dir(start: PathBuf) -> BoundConfig {
    directory_ancestors(start, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .chain(user_config_path())
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            log::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            BoundConfig::default()
        })
}

pub fn load_config() -> BoundConfig {
    match std::env::current_dir() {
        Ok(dir) => load_config_from_dir(dir),
        Err(e) => {
            log::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            BoundConfig::default()
        }
    }
}
