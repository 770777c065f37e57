use super::rules::{Rule, RuleTable, DEFAULT_ELDERLY_AGE};
use super::{Classification, RiskModel, DEFAULT_RULE};
use crate::core::{Result, RiskLevel, TriageInput};
use serde::{Deserialize, Serialize};

/// `[classifier]` section of the configuration file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    #[serde(default = "default_elderly_age")]
    pub elderly_age: i64,
    /// Replaces the standard table entirely when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<Vec<Rule>>,
}

fn default_elderly_age() -> i64 {
    DEFAULT_ELDERLY_AGE
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            elderly_age: default_elderly_age(),
            rules: None,
        }
    }
}

impl ClassifierConfig {
    pub fn rule_table(&self) -> Result<RuleTable> {
        match &self.rules {
            Some(rules) => RuleTable::from_rules(rules.clone()),
            None => Ok(RuleTable::standard(self.elderly_age)),
        }
    }
}

/// Primary clinical triage classifier.
#[derive(Debug, Clone, Default)]
pub struct TriageClassifier {
    table: RuleTable,
}

impl TriageClassifier {
    pub fn new(table: RuleTable) -> Self {
        Self { table }
    }

    pub fn from_config(config: &ClassifierConfig) -> Result<Self> {
        Ok(Self::new(config.rule_table()?))
    }

    pub fn table(&self) -> &RuleTable {
        &self.table
    }
}

impl RiskModel for TriageClassifier {
    type Input = TriageInput;

    fn name(&self) -> &'static str {
        "triage"
    }

    fn classify(&self, input: &TriageInput) -> Result<Classification> {
        input.validate()?;

        let classification = match self.table.first_match(input) {
            Some(rule) => Classification::new(rule.outcome, &rule.name, rule.rationale()),
            None => Classification::new(
                RiskLevel::Low,
                DEFAULT_RULE,
                "no escalation rule matched",
            ),
        };

        log::debug!(
            "triage age={} -> {} via {}",
            input.age,
            classification.risk_level,
            classification.rule
        );
        Ok(classification)
    }
}

/// Classify with the standard rule table.
pub fn classify(input: &TriageInput) -> Result<Classification> {
    TriageClassifier::default().classify(input)
}
