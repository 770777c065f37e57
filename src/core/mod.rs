pub mod errors;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

pub use errors::{Error, Result};

/// Coarse three-tier severity produced by every classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 3] = [RiskLevel::Low, RiskLevel::Medium, RiskLevel::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }

    /// Numeric severity: low = 0, medium = 1, high = 2
    pub fn score(&self) -> u8 {
        match self {
            RiskLevel::Low => 0,
            RiskLevel::Medium => 1,
            RiskLevel::High => 2,
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(RiskLevel::Low),
            "medium" => Ok(RiskLevel::Medium),
            "high" => Ok(RiskLevel::High),
            other => Err(Error::validation(format!("unknown risk level '{other}'"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
    Other,
}

impl Sex {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
            Sex::Other => "other",
        }
    }
}

impl FromStr for Sex {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" => Ok(Sex::Male),
            "female" => Ok(Sex::Female),
            "other" => Ok(Sex::Other),
            _ => Err(Error::validation(format!(
                "sex must be one of male, female, other; got '{s}'"
            ))),
        }
    }
}

/// Patient vitals submitted for triage.
///
/// `sex` is kept as the raw submitted text so an unrecognized value can be
/// reported as a validation error instead of being lost at parse time. The
/// same goes for `age`, which is signed so negative values reach validation.
/// Symptom flags read `null` as `false`; non-string text fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriageInput {
    #[serde(
        default,
        deserialize_with = "text_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,
    pub age: i64,
    #[serde(default, deserialize_with = "raw_text")]
    pub sex: Option<String>,
    #[serde(default, deserialize_with = "null_as_false")]
    pub fever: bool,
    #[serde(default, deserialize_with = "null_as_false")]
    pub cough: bool,
    #[serde(default, deserialize_with = "null_as_false")]
    pub shortness_of_breath: bool,
    #[serde(default, deserialize_with = "text_or_none")]
    pub antecedents: Option<String>,
}

fn null_as_false<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

fn text_or_none<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        _ => None,
    })
}

// Non-string values keep their JSON text so validation can name them.
fn raw_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(text) => Some(text),
        other => Some(other.to_string()),
    })
}

impl TriageInput {
    pub fn new(age: i64) -> Self {
        Self {
            age,
            ..Default::default()
        }
    }

    pub fn with_sex(mut self, sex: impl Into<String>) -> Self {
        self.sex = Some(sex.into());
        self
    }

    pub fn with_fever(mut self, fever: bool) -> Self {
        self.fever = fever;
        self
    }

    pub fn with_cough(mut self, cough: bool) -> Self {
        self.cough = cough;
        self
    }

    pub fn with_shortness_of_breath(mut self, shortness_of_breath: bool) -> Self {
        self.shortness_of_breath = shortness_of_breath;
        self
    }

    pub fn with_antecedents(mut self, antecedents: impl Into<String>) -> Self {
        self.antecedents = Some(antecedents.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Parsed sex; `None` when the field was not submitted.
    pub fn parsed_sex(&self) -> Result<Option<Sex>> {
        self.sex.as_deref().map(str::parse).transpose()
    }

    /// Reject structurally invalid input. Everything else is accepted as-is.
    pub fn validate(&self) -> Result<()> {
        if self.age < 0 {
            return Err(Error::validation(format!(
                "age must be a non-negative integer, got {}",
                self.age
            )));
        }
        self.parsed_sex()?;
        Ok(())
    }
}

/// Input shape of the legacy amount/category classifier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LegacyInput {
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<Map<String, Value>>,
}

impl LegacyInput {
    pub fn new(amount: f64, category: impl Into<String>) -> Self {
        Self {
            amount,
            category: category.into(),
            features: None,
        }
    }
}

/// Oldest accepted age for a registered patient
pub const MAX_PATIENT_AGE: i64 = 120;

/// Registration request for the patient registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPatient {
    pub name: String,
    pub age: i64,
    pub sex: String,
}

impl NewPatient {
    pub fn new(name: impl Into<String>, age: i64, sex: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            age,
            sex: sex.into(),
        }
    }

    /// Check every field and return the parsed sex.
    pub fn validate(&self) -> Result<Sex> {
        if self.name.trim().is_empty() {
            return Err(Error::validation("patient name must not be empty"));
        }
        if !(0..=MAX_PATIENT_AGE).contains(&self.age) {
            return Err(Error::validation(format!(
                "age must be between 0 and {MAX_PATIENT_AGE}, got {}",
                self.age
            )));
        }
        self.sex.parse()
    }
}

/// A registered patient. Owned by the store like predictions are.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    pub id: u64,
    pub name: String,
    pub age: i64,
    pub sex: Sex,
    pub created_at: DateTime<Utc>,
}

/// A stored prediction. Owned by the store; the core only reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    pub id: u64,
    pub risk_level: RiskLevel,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub input_data: Option<Value>,
}

impl PredictionRecord {
    /// Free-text antecedents, if the stored input carries them as a string.
    pub fn antecedents(&self) -> Option<&str> {
        self.input_field("antecedents").and_then(Value::as_str)
    }

    pub fn input_field(&self, key: &str) -> Option<&Value> {
        self.input_data.as_ref()?.as_object()?.get(key)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComorbidityCount {
    pub term: String,
    pub count: usize,
}

impl ComorbidityCount {
    pub fn new(term: impl Into<String>, count: usize) -> Self {
        Self {
            term: term.into(),
            count,
        }
    }
}

/// Dashboard statistics recomputed on demand from stored predictions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateSummary {
    pub total: usize,
    pub low_count: usize,
    pub medium_count: usize,
    pub high_count: usize,
    pub top_comorbidities: Vec<ComorbidityCount>,
}

impl AggregateSummary {
    pub fn count_for(&self, level: RiskLevel) -> usize {
        match level {
            RiskLevel::Low => self.low_count,
            RiskLevel::Medium => self.medium_count,
            RiskLevel::High => self.high_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use serde_json::json;

    #[test]
    fn test_triage_input_defaults_missing_flags() {
        let input: TriageInput = serde_json::from_str(r#"{"age": 40}"#).unwrap();
        assert_eq!(input.age, 40);
        assert!(!input.fever);
        assert!(!input.cough);
        assert!(!input.shortness_of_breath);
        assert_eq!(input.sex, None);
        assert_eq!(input.antecedents, None);
    }

    #[test]
    fn test_null_flags_read_as_false() {
        let input: TriageInput = serde_json::from_value(json!({
            "age": 40, "sex": null, "fever": null, "cough": true,
            "shortness_of_breath": null, "antecedents": null
        }))
        .unwrap();
        assert!(!input.fever);
        assert!(input.cough);
        assert!(!input.shortness_of_breath);
        assert_eq!(input.sex, None);
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_non_string_sex_fails_validation() {
        let input: TriageInput = serde_json::from_value(json!({"age": 40, "sex": 1})).unwrap();
        match input.validate() {
            Err(Error::Validation(message)) => assert!(message.contains("'1'")),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_non_string_antecedents_are_ignored() {
        let input: TriageInput =
            serde_json::from_value(json!({"age": 40, "antecedents": 3, "name": false})).unwrap();
        assert_eq!(input.antecedents, None);
        assert_eq!(input.name, None);
    }

    #[test]
    fn test_new_patient_validation() {
        assert_eq!(NewPatient::new("Ana", 0, "female").validate().unwrap(), Sex::Female);
        assert_eq!(NewPatient::new("Ana", 120, "OTHER").validate().unwrap(), Sex::Other);

        for bad in [
            NewPatient::new("  ", 30, "male"),
            NewPatient::new("Ana", -1, "male"),
            NewPatient::new("Ana", 121, "male"),
            NewPatient::new("Ana", 30, "unknown"),
        ] {
            assert!(matches!(bad.validate(), Err(Error::Validation(_))), "{bad:?}");
        }
    }

    #[test]
    fn test_negative_age_is_rejected() {
        let err = TriageInput::new(-1).validate().unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_unknown_sex_is_rejected() {
        let err = TriageInput::new(30).with_sex("robot").validate().unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_sex_parsing_is_case_insensitive() {
        let input = TriageInput::new(30).with_sex(" Female ");
        assert_eq!(input.parsed_sex().unwrap(), Some(Sex::Female));
        assert!(TriageInput::new(0).validate().is_ok());
    }

    #[test]
    fn test_record_json_shape() {
        let raw = indoc! {r#"
            {
              "id": 7,
              "risk_level": "medium",
              "created_at": "2025-08-14T00:00:00Z",
              "input_data": {"age": 72, "sex": "female", "fever": true,
                             "cough": true, "shortness_of_breath": false,
                             "antecedents": "diabetes, hypertension"}
            }
        "#};
        let record: PredictionRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(record.id, 7);
        assert_eq!(record.risk_level, RiskLevel::Medium);
        assert_eq!(record.antecedents(), Some("diabetes, hypertension"));

        let back = serde_json::to_value(&record).unwrap();
        assert_eq!(back["risk_level"], json!("medium"));
        assert_eq!(back["created_at"], json!("2025-08-14T00:00:00Z"));
    }

    #[test]
    fn test_record_without_input_data_has_no_antecedents() {
        let record: PredictionRecord = serde_json::from_str(
            r#"{"id": 1, "risk_level": "low", "created_at": "2025-08-14T00:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(record.input_data, None);
        assert_eq!(record.antecedents(), None);
    }

    #[test]
    fn test_risk_level_ordering_and_score() {
        assert!(RiskLevel::High > RiskLevel::Medium);
        assert!(RiskLevel::Medium > RiskLevel::Low);
        assert_eq!(RiskLevel::High.score(), 2);
        assert_eq!("MEDIUM".parse::<RiskLevel>().unwrap(), RiskLevel::Medium);
    }
}
