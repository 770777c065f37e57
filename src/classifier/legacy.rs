//! Amount/category classifier kept for callers of the original prediction
//! endpoint. It is total: every input maps to a tier and nothing fails.

use super::{Classification, RiskModel};
use crate::core::{LegacyInput, Result, RiskLevel};
use serde::{Deserialize, Serialize};

/// `[legacy]` section of the configuration file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacyThresholds {
    #[serde(default = "default_high_amount")]
    pub high_amount: f64,
    #[serde(default = "default_medium_amount")]
    pub medium_amount: f64,
    /// Categories scored by amount; anything else is low
    #[serde(default = "default_categories")]
    pub categories: Vec<String>,
}

fn default_high_amount() -> f64 {
    10_000.0
}

fn default_medium_amount() -> f64 {
    1_000.0
}

fn default_categories() -> Vec<String> {
    vec!["general".to_string()]
}

impl Default for LegacyThresholds {
    fn default() -> Self {
        Self {
            high_amount: default_high_amount(),
            medium_amount: default_medium_amount(),
            categories: default_categories(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct LegacyClassifier {
    thresholds: LegacyThresholds,
}

impl LegacyClassifier {
    pub fn new(thresholds: LegacyThresholds) -> Self {
        Self { thresholds }
    }

    fn is_recognized(&self, category: &str) -> bool {
        let category = category.trim();
        self.thresholds
            .categories
            .iter()
            .any(|known| known.trim().eq_ignore_ascii_case(category))
    }
}

impl RiskModel for LegacyClassifier {
    type Input = LegacyInput;

    fn name(&self) -> &'static str {
        "legacy"
    }

    fn classify(&self, input: &LegacyInput) -> Result<Classification> {
        if !self.is_recognized(&input.category) {
            return Ok(Classification::new(
                RiskLevel::Low,
                "unrecognized_category",
                format!("category '{}' is not scored", input.category.trim()),
            ));
        }

        let amount = input.amount;
        if !amount.is_finite() || amount < 0.0 {
            return Ok(Classification::new(
                RiskLevel::Low,
                "invalid_amount",
                format!("amount {amount} is not a usable figure"),
            ));
        }

        let classification = if amount >= self.thresholds.high_amount {
            Classification::new(
                RiskLevel::High,
                "amount_high",
                format!("amount >= {}", self.thresholds.high_amount),
            )
        } else if amount >= self.thresholds.medium_amount {
            Classification::new(
                RiskLevel::Medium,
                "amount_medium",
                format!("amount >= {}", self.thresholds.medium_amount),
            )
        } else {
            Classification::new(
                RiskLevel::Low,
                "amount_low",
                format!("amount < {}", self.thresholds.medium_amount),
            )
        };
        Ok(classification)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn level(amount: f64, category: &str) -> RiskLevel {
        LegacyClassifier::default()
            .classify(&LegacyInput::new(amount, category))
            .unwrap()
            .risk_level
    }

    #[test]
    fn test_amount_tiers() {
        assert_eq!(level(500.0, "general"), RiskLevel::Low);
        assert_eq!(level(1500.0, "general"), RiskLevel::Medium);
        assert_eq!(level(1000.0, "general"), RiskLevel::Medium);
        assert_eq!(level(10_000.0, "general"), RiskLevel::High);
    }

    #[test]
    fn test_unrecognized_category_is_low() {
        assert_eq!(level(50_000.0, "mystery"), RiskLevel::Low);
        assert_eq!(level(50_000.0, ""), RiskLevel::Low);
    }

    #[test]
    fn test_category_match_ignores_case() {
        assert_eq!(level(1500.0, " General "), RiskLevel::Medium);
    }

    #[test]
    fn test_non_finite_amounts_do_not_fail() {
        assert_eq!(level(f64::NAN, "general"), RiskLevel::Low);
        assert_eq!(level(-5.0, "general"), RiskLevel::Low);
        assert_eq!(level(f64::INFINITY, "general"), RiskLevel::Low);
    }

    proptest! {
        #[test]
        fn prop_legacy_is_total(amount in any::<f64>(), category in ".*") {
            let classifier = LegacyClassifier::default();
            let input = LegacyInput::new(amount, category);
            prop_assert!(classifier.classify(&input).is_ok());
        }
    }
}
