//! `triage` and `legacy` commands: classify one input, then record it.
use crate::classifier::{Classification, LegacyClassifier, RiskModel, TriageClassifier};
use crate::cli::OutputFormat;
use crate::config::TriagemapConfig;
use crate::core::{PredictionRecord, RiskLevel};
use crate::report::{to_json, Reporter};
use crate::store::PredictionRepository;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::io::Read;
use std::path::Path;

/// What the caller gets back for a classified input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TriageResponse {
    pub risk_level: RiskLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    pub rule: String,
    pub rationale: String,
    pub score: u8,
}

impl TriageResponse {
    pub fn new(classification: &Classification, record: Option<&PredictionRecord>) -> Self {
        Self {
            risk_level: classification.risk_level,
            id: record.map(|r| r.id),
            created_at: record.map(|r| r.created_at),
            rule: classification.rule.clone(),
            rationale: classification.rationale.clone(),
            score: classification.score,
        }
    }
}

/// Read the raw JSON document from a file or stdin.
pub fn read_input(path: Option<&Path>) -> Result<Value> {
    let text = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read input {}", path.display()))?,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read input from stdin")?;
            buffer
        }
    };
    serde_json::from_str(&text).context("Input is not valid JSON")
}

/// Classify `raw` and store it verbatim unless `store` is `None`.
///
/// Validation failures are returned before anything is written.
pub fn record_prediction<M, S>(
    model: &M,
    raw: Value,
    store: Option<&mut S>,
) -> Result<(Classification, Option<PredictionRecord>)>
where
    M: RiskModel,
    M::Input: serde::de::DeserializeOwned,
    S: PredictionRepository + ?Sized,
{
    let input: M::Input = serde_json::from_value(raw.clone())
        .with_context(|| format!("Invalid {} input", model.name()))?;
    let classification = model.classify(&input)?;

    let record = match store {
        Some(store) => Some(store.insert(classification.risk_level, raw)?),
        None => None,
    };
    log::info!(
        "{} classification: {} ({})",
        model.name(),
        classification.risk_level,
        classification.rule
    );
    Ok((classification, record))
}

fn print_outcome(
    reporter: &Reporter,
    format: OutputFormat,
    classification: &Classification,
    record: Option<&PredictionRecord>,
) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", to_json(&TriageResponse::new(classification, record))?),
        OutputFormat::Terminal => print!("{}", reporter.outcome(classification, record)),
    }
    Ok(())
}

pub fn handle_triage<S: PredictionRepository>(
    config: &TriagemapConfig,
    reporter: &Reporter,
    store: &mut S,
    input: Option<&Path>,
    dry_run: bool,
    format: OutputFormat,
) -> Result<()> {
    let model = TriageClassifier::from_config(&config.classifier)?;
    let raw = read_input(input)?;
    let (classification, record) =
        record_prediction(&model, raw, (!dry_run).then_some(store))?;
    print_outcome(reporter, format, &classification, record.as_ref())
}

pub fn handle_legacy<S: PredictionRepository>(
    config: &TriagemapConfig,
    reporter: &Reporter,
    store: &mut S,
    input: Option<&Path>,
    dry_run: bool,
    format: OutputFormat,
) -> Result<()> {
    let model = LegacyClassifier::new(config.legacy.clone());
    let raw = read_input(input)?;
    let (classification, record) =
        record_prediction(&model, raw, (!dry_run).then_some(store))?;
    print_outcome(reporter, format, &classification, record.as_ref())
}
