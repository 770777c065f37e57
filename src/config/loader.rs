use std::fs;
use std::path::{Path, PathBuf};

use super::core::TriagemapConfig;
use crate::core::{Error, Result};

pub const CONFIG_FILE_NAME: &str = ".triagemap.toml";
pub const STORE_PATH_ENV: &str = "TRIAGEMAP_STORE_PATH";
pub const LOG_LEVEL_ENV: &str = "TRIAGEMAP_LOG_LEVEL";

const MAX_TRAVERSAL_DEPTH: usize = 10;

/// Parse and validate config from a TOML string
pub fn parse_config(contents: &str) -> Result<TriagemapConfig> {
    let config = toml::from_str::<TriagemapConfig>(contents)
        .map_err(|e| Error::configuration(format!("Failed to parse {CONFIG_FILE_NAME}: {e}")))?;
    config.validate()?;
    Ok(config)
}

/// Load an explicitly requested config file. Unlike discovery, every
/// failure here is reported to the caller.
pub fn load_config_from(path: &Path) -> Result<TriagemapConfig> {
    let contents = fs::read_to_string(path).map_err(|e| {
        Error::configuration(format!("Failed to read {}: {}", path.display(), e))
    })?;
    let config = parse_config(&contents)?;
    log::debug!("Loaded config from {}", path.display());
    Ok(config)
}

fn try_load_config_from_path(config_path: &Path) -> Option<TriagemapConfig> {
    let contents = match fs::read_to_string(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            // Only log actual errors, not "file not found"
            if e.kind() != std::io::ErrorKind::NotFound {
                eprintln!(
                    "Warning: Failed to read config file {}: {}",
                    config_path.display(),
                    e
                );
            }
            return None;
        }
    };

    match parse_config(&contents) {
        Ok(config) => {
            log::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            // Logging is not initialized yet; config decides its level.
            eprintln!("Warning: {} in {}. Using defaults.", e, config_path.display());
            None
        }
    }
}

/// Directory ancestors from `start` upward, at most `max_depth` of them
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

/// Search `start` and its ancestors for a config file, falling back to defaults.
pub fn discover_config(start: PathBuf) -> TriagemapConfig {
    directory_ancestors(start, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            log::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            TriagemapConfig::default()
        })
}

pub fn load_config() -> TriagemapConfig {
    match std::env::current_dir() {
        Ok(dir) => discover_config(dir),
        Err(e) => {
            log::warn!("Failed to get current directory: {}. Using default config.", e);
            TriagemapConfig::default()
        }
    }
}

/// Apply environment overrides through `lookup` so callers and tests can
/// supply their own environment.
pub fn apply_env_overrides<F>(mut config: TriagemapConfig, lookup: F) -> TriagemapConfig
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(path) = lookup(STORE_PATH_ENV).filter(|v| !v.trim().is_empty()) {
        config.store.path = PathBuf::from(path);
    }
    if let Some(level) = lookup(LOG_LEVEL_ENV).filter(|v| !v.trim().is_empty()) {
        config.logging.level = Some(level);
    }
    config
}
