//! Risk classification.
//!
//! Two independent classifiers live here behind the [`RiskModel`]
//! capability: the rule-table triage classifier and the legacy
//! amount/category classifier kept for older callers. They share no state
//! and no rule representation.

pub mod legacy;
pub mod rules;
pub mod triage;

use crate::core::{Result, RiskLevel};
use serde::{Deserialize, Serialize};

pub use legacy::{LegacyClassifier, LegacyThresholds};
pub use rules::{Condition, Rule, RuleTable, DEFAULT_ELDERLY_AGE};
pub use triage::{ClassifierConfig, TriageClassifier};

/// Rule name reported when no table row matched.
pub const DEFAULT_RULE: &str = "default";

/// Outcome of a classification with its explanation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub risk_level: RiskLevel,
    pub rule: String,
    pub rationale: String,
    pub score: u8,
}

impl Classification {
    pub fn new(risk_level: RiskLevel, rule: impl Into<String>, rationale: impl Into<String>) -> Self {
        Self {
            risk_level,
            rule: rule.into(),
            rationale: rationale.into(),
            score: risk_level.score(),
        }
    }
}

/// A deterministic classification function over some input shape.
///
/// Implementations must be pure: the same input always yields the same
/// classification and nothing outside `self` is read or written.
pub trait RiskModel: Send + Sync {
    type Input;

    /// Short identifier used in logs and stored records.
    fn name(&self) -> &'static str;

    fn classify(&self, input: &Self::Input) -> Result<Classification>;
}
