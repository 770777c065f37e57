//! History view: stored predictions projected into display rows.
use crate::core::{PredictionRecord, RiskLevel};
use serde::Serialize;
use serde_json::Value;

/// Rows shown on the history page when no limit is configured
pub const DEFAULT_HISTORY_LIMIT: usize = 200;

/// Minute-precision display format for timestamps
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

const MISSING: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryRow {
    pub id: u64,
    pub name: String,
    pub age: String,
    pub sex: String,
    pub risk_level: RiskLevel,
    pub created_at: String,
}

impl HistoryRow {
    pub fn from_record(record: &PredictionRecord) -> Self {
        Self {
            id: record.id,
            name: display_field(record.input_field("name")).unwrap_or_else(|| MISSING.into()),
            age: display_field(record.input_field("age")).unwrap_or_else(|| MISSING.into()),
            sex: display_field(record.input_field("sex")).unwrap_or_default(),
            risk_level: record.risk_level,
            created_at: record.created_at.format(TIMESTAMP_FORMAT).to_string(),
        }
    }
}

fn display_field(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Newest-first rows, at most `limit` of them. Ties on `created_at` fall back
/// to the higher id first.
pub fn history_rows(records: &[PredictionRecord], limit: usize) -> Vec<HistoryRow> {
    let mut ordered: Vec<&PredictionRecord> = records.iter().collect();
    ordered.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
    ordered
        .into_iter()
        .take(limit)
        .map(HistoryRow::from_record)
        .collect()
}
