//! Setup and initialization functions for CLI
//!
//! Resolves configuration and initializes logging before any command runs.

use crate::config::{self, TriagemapConfig};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Logging filter from the `-v` count, else the configured filter, else warnings only.
pub fn log_filter(verbosity: u8, configured: Option<&str>) -> String {
    match verbosity {
        0 => configured
            .map(str::to_string)
            .unwrap_or_else(|| "warn".to_string()),
        1 => "info".to_string(),
        2 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

pub fn init_logging(verbosity: u8, configured: Option<&str>) {
    let filter = log_filter(verbosity, configured);
    let result = env_logger::Builder::new()
        .parse_filters(&filter)
        .format_timestamp(None)
        .try_init();
    if let Err(e) = result {
        // Already configured - this is fine, just ignore
        eprintln!("Note: Logger already configured: {}", e);
    }
}

/// Configuration from `--config` or discovery, then environment, then `--store`.
pub fn resolve_config(
    explicit: Option<&Path>,
    store_override: Option<PathBuf>,
) -> Result<TriagemapConfig> {
    let base = match explicit {
        Some(path) => config::load_config_from(path)
            .with_context(|| format!("Failed to load configuration {}", path.display()))?,
        None => config::load_config(),
    };

    let mut resolved = config::apply_env_overrides(base, |key| std::env::var(key).ok());
    if let Some(store) = store_override {
        resolved.store.path = store;
    }
    Ok(resolved)
}
