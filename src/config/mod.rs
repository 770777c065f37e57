//! Configuration for the triagemap shell.
//!
//! Settings come from `.triagemap.toml` (discovered upward from the working
//! directory or passed with `--config`) and a couple of environment
//! overrides. The classifier and aggregator never read configuration
//! themselves; the shell passes the relevant values in.

mod core;
mod loader;

pub use self::core::{DashboardConfig, LoggingConfig, StoreConfig, TriagemapConfig};
pub use loader::{
    apply_env_overrides, directory_ancestors, discover_config, load_config, load_config_from,
    parse_config, CONFIG_FILE_NAME, LOG_LEVEL_ENV, STORE_PATH_ENV,
};

/// Contents written by `triagemap init`
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# Triagemap Configuration

[classifier]
# Age from which fever/cough/breathlessness escalate the risk tier
elderly_age = 65

# Uncomment to replace the standard rule table. Rules are evaluated in
# order and the first match wins; no match means "low".
# [[classifier.rules]]
# name = "breathless_with_symptom"
# outcome = "high"
# when = { all = ["shortness_of_breath", { any = ["fever", "cough"] }] }

[legacy]
high_amount = 10000.0
medium_amount = 1000.0
categories = ["general"]

[dashboard]
top_n = 3
history_limit = 200

[store]
path = "data/predictions.jsonl"
patients_path = "data/patients.jsonl"

[logging]
# level = "info"
"#;
