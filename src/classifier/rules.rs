//! Prioritized triage rule table.
//!
//! Rules are plain data: an ordered list of `(name, condition, outcome)`
//! rows evaluated top-down where the first matching row wins. Input that
//! matches no row falls through to [`RiskLevel::Low`].
use crate::core::{Error, Result, RiskLevel, TriageInput};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Age from which a patient counts as elderly in the default table
pub const DEFAULT_ELDERLY_AGE: i64 = 65;

/// Predicate over a triage input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    Fever,
    Cough,
    ShortnessOfBreath,
    AgeAtLeast(i64),
    All(Vec<Condition>),
    Any(Vec<Condition>),
    Not(Box<Condition>),
}

impl Condition {
    pub fn all(conditions: impl IntoIterator<Item = Condition>) -> Self {
        Condition::All(conditions.into_iter().collect())
    }

    pub fn any(conditions: impl IntoIterator<Item = Condition>) -> Self {
        Condition::Any(conditions.into_iter().collect())
    }

    pub fn matches(&self, input: &TriageInput) -> bool {
        match self {
            Condition::Fever => input.fever,
            Condition::Cough => input.cough,
            Condition::ShortnessOfBreath => input.shortness_of_breath,
            Condition::AgeAtLeast(age) => input.age >= *age,
            Condition::All(conditions) => conditions.iter().all(|c| c.matches(input)),
            Condition::Any(conditions) => conditions.iter().any(|c| c.matches(input)),
            Condition::Not(condition) => !condition.matches(input),
        }
    }

    fn check(&self, rule: &str) -> Result<()> {
        match self {
            Condition::All(conditions) | Condition::Any(conditions) => {
                if conditions.is_empty() {
                    return Err(Error::configuration(format!(
                        "rule '{rule}' has an empty all/any condition"
                    )));
                }
                conditions.iter().try_for_each(|c| c.check(rule))
            }
            Condition::Not(condition) => condition.check(rule),
            _ => Ok(()),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::Fever => f.write_str("fever"),
            Condition::Cough => f.write_str("cough"),
            Condition::ShortnessOfBreath => f.write_str("shortness of breath"),
            Condition::AgeAtLeast(age) => write!(f, "age >= {age}"),
            Condition::All(conditions) => write_joined(f, conditions, " and "),
            Condition::Any(conditions) => write_joined(f, conditions, " or "),
            Condition::Not(condition) => write!(f, "not {}", Nested(condition)),
        }
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, conditions: &[Condition], sep: &str) -> fmt::Result {
    for (i, condition) in conditions.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{}", Nested(condition))?;
    }
    Ok(())
}

/// Parenthesizes compound conditions when they appear inside another one.
struct Nested<'a>(&'a Condition);

impl fmt::Display for Nested<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Condition::All(c) | Condition::Any(c) if c.len() > 1 => write!(f, "({})", self.0),
            other => write!(f, "{other}"),
        }
    }
}

/// One row of the rule table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub name: String,
    pub when: Condition,
    pub outcome: RiskLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Rule {
    pub fn new(name: impl Into<String>, when: Condition, outcome: RiskLevel) -> Self {
        Self {
            name: name.into(),
            when,
            outcome,
            description: None,
        }
    }

    /// Human-readable explanation used as the classification rationale.
    pub fn rationale(&self) -> String {
        match &self.description {
            Some(description) => description.clone(),
            None => format!("{} -> {}", self.when, self.outcome),
        }
    }
}

/// Ordered rule table; first match wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleTable {
    rules: Vec<Rule>,
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::standard(DEFAULT_ELDERLY_AGE)
    }
}

impl RuleTable {
    /// The standard severity ordering, parameterized by the elderly age threshold.
    pub fn standard(elderly_age: i64) -> Self {
        use Condition::*;

        let rules = vec![
            Rule::new(
                "elderly_fever_breathless",
                Condition::all([AgeAtLeast(elderly_age), Fever, ShortnessOfBreath]),
                RiskLevel::High,
            ),
            Rule::new(
                "breathless_with_symptom",
                Condition::all([ShortnessOfBreath, Condition::any([Fever, Cough])]),
                RiskLevel::High,
            ),
            Rule::new(
                "fever_and_cough",
                Condition::all([Fever, Cough]),
                RiskLevel::Medium,
            ),
            Rule::new(
                "elderly_with_symptom",
                Condition::all([AgeAtLeast(elderly_age), Condition::any([Fever, Cough])]),
                RiskLevel::Medium,
            ),
        ];

        Self { rules }
    }

    /// Build a table from custom rows, rejecting unnamed, duplicate or empty rules.
    pub fn from_rules(rules: Vec<Rule>) -> Result<Self> {
        let mut seen = HashSet::new();
        for rule in &rules {
            if rule.name.trim().is_empty() {
                return Err(Error::configuration("rule names must not be empty"));
            }
            if !seen.insert(rule.name.as_str()) {
                return Err(Error::configuration(format!(
                    "duplicate rule name '{}'",
                    rule.name
                )));
            }
            rule.when.check(&rule.name)?;
        }
        Ok(Self { rules })
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// First rule whose condition holds, in table order.
    pub fn first_match(&self, input: &TriageInput) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.when.matches(input))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    fn input(age: i64, fever: bool, cough: bool, sob: bool) -> TriageInput {
        TriageInput::new(age)
            .with_fever(fever)
            .with_cough(cough)
            .with_shortness_of_breath(sob)
    }

    #[test]
    fn test_each_standard_rule_in_isolation() {
        let table = RuleTable::default();
        let name = |i: &TriageInput| table.first_match(i).map(|r| r.name.as_str());

        assert_eq!(name(&input(70, true, false, true)), Some("elderly_fever_breathless"));
        assert_eq!(name(&input(30, false, true, true)), Some("breathless_with_symptom"));
        assert_eq!(name(&input(30, true, true, false)), Some("fever_and_cough"));
        assert_eq!(name(&input(65, false, true, false)), Some("elderly_with_symptom"));
        assert_eq!(name(&input(90, false, false, false)), None);
    }

    #[test]
    fn test_breathless_alone_does_not_escalate() {
        let table = RuleTable::default();
        assert!(table.first_match(&input(30, false, false, true)).is_none());
    }

    #[test]
    fn test_threshold_is_configurable() {
        let table = RuleTable::standard(75);
        assert!(table.first_match(&input(70, false, true, false)).is_none());
        assert_eq!(
            table.first_match(&input(75, false, true, false)).unwrap().outcome,
            RiskLevel::Medium
        );
    }

    #[test]
    fn test_rationale_renders_condition() {
        let table = RuleTable::default();
        assert_eq!(
            table.rules()[1].rationale(),
            "shortness of breath and (fever or cough) -> high"
        );
        assert_eq!(
            table.rules()[0].rationale(),
            "age >= 65 and fever and shortness of breath -> high"
        );
    }

    #[test]
    fn test_duplicate_rule_names_rejected() {
        let rule = Rule::new("same", Condition::Fever, RiskLevel::High);
        let err = RuleTable::from_rules(vec![rule.clone(), rule]).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn test_empty_any_rejected() {
        let rule = Rule::new("broken", Condition::Any(vec![]), RiskLevel::High);
        assert!(RuleTable::from_rules(vec![rule]).is_err());
    }

    #[test]
    fn test_rules_deserialize_from_toml() {
        #[derive(Deserialize)]
        struct Wrapper {
            rules: Vec<Rule>,
        }

        let raw = indoc! {r#"
            [[rules]]
            name = "breathless"
            outcome = "high"
            when = "shortness_of_breath"

            [[rules]]
            name = "old_and_coughing"
            outcome = "medium"
            description = "elderly patient with a cough"
            when = { all = [{ age_at_least = 80 }, "cough"] }
        "#};
        let wrapper: Wrapper = toml::from_str(raw).unwrap();
        let table = RuleTable::from_rules(wrapper.rules).unwrap();

        assert_eq!(
            table.first_match(&input(30, false, false, true)).unwrap().name,
            "breathless"
        );
        let rule = table.first_match(&input(85, false, true, false)).unwrap();
        assert_eq!(rule.rationale(), "elderly patient with a cough");
        assert!(table.first_match(&input(79, false, true, false)).is_none());
    }
}
