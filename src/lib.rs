// Export modules for library usage
pub mod aggregation;
pub mod classifier;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod history;
pub mod report;
pub mod store;

// Re-export commonly used types
pub use crate::core::{
    AggregateSummary, ComorbidityCount, Error, LegacyInput, NewPatient, Patient, PredictionRecord,
    Result, RiskLevel, Sex, TriageInput,
};

pub use crate::classifier::{
    triage::classify, Classification, Condition, LegacyClassifier, LegacyThresholds, RiskModel,
    Rule, RuleTable, TriageClassifier,
};

pub use crate::aggregation::{
    extract_terms, summarize, summarize_parallel, SummaryBuilder, DEFAULT_TOP_N,
};

pub use crate::history::{history_rows, HistoryRow};

pub use crate::store::{
    JsonlPatientStore, JsonlStore, MemoryStore, PatientRepository, PredictionRepository,
};
