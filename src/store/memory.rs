use super::{next_id, PredictionRepository};
use crate::core::{Error, PredictionRecord, Result, RiskLevel};
use chrono::{DateTime, Utc};
use serde_json::Value;

/// In-memory store for tests and one-shot runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Vec<PredictionRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl PredictionRepository for MemoryStore {
    fn insert_at(
        &mut self,
        risk_level: RiskLevel,
        input_data: Value,
        created_at: DateTime<Utc>,
    ) -> Result<PredictionRecord> {
        let record = PredictionRecord {
            id: next_id(self.records.iter().map(|r| r.id))?,
            risk_level,
            created_at,
            input_data: Some(input_data),
        };
        self.records.push(record.clone());
        Ok(record)
    }

    fn all(&self) -> Result<Vec<PredictionRecord>> {
        Ok(self.records.clone())
    }

    fn delete(&mut self, id: u64) -> Result<()> {
        let before = self.records.len();
        self.records.retain(|r| r.id != id);
        if self.records.len() == before {
            return Err(Error::NotFound(id));
        }
        Ok(())
    }
}
