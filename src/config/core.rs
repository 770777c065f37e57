use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::aggregation::DEFAULT_TOP_N;
use crate::classifier::{ClassifierConfig, LegacyThresholds};
use crate::core::{Error, Result};
use crate::history::DEFAULT_HISTORY_LIMIT;

/// Root configuration structure for triagemap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TriagemapConfig {
    /// Triage rule table and thresholds
    #[serde(default)]
    pub classifier: ClassifierConfig,

    /// Legacy amount/category classifier thresholds
    #[serde(default)]
    pub legacy: LegacyThresholds,

    /// Dashboard and history defaults
    #[serde(default)]
    pub dashboard: DashboardConfig,

    /// Prediction store location
    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl TriagemapConfig {
    /// Cross-field checks serde cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.legacy.medium_amount > self.legacy.high_amount {
            return Err(Error::configuration(format!(
                "legacy.medium_amount ({}) must not exceed legacy.high_amount ({})",
                self.legacy.medium_amount, self.legacy.high_amount
            )));
        }
        self.classifier.rule_table()?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

fn default_top_n() -> usize {
    DEFAULT_TOP_N
}

fn default_history_limit() -> usize {
    DEFAULT_HISTORY_LIMIT
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            top_n: default_top_n(),
            history_limit: default_history_limit(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_store_path")]
    pub path: PathBuf,
    /// Patient registry file
    #[serde(default = "default_patients_path")]
    pub patients_path: PathBuf,
}

fn default_store_path() -> PathBuf {
    PathBuf::from("data").join("predictions.jsonl")
}

fn default_patients_path() -> PathBuf {
    PathBuf::from("data").join("patients.jsonl")
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
            patients_path: default_patients_path(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct LoggingConfig {
    /// env_logger filter, e.g. "info" or "triagemap=debug"
    #[serde(default)]
    pub level: Option<String>,
}
