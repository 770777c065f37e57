//! Prediction persistence.
//!
//! The store is the collaborator that owns [`PredictionRecord`]s: it assigns
//! ids and timestamps and hands collections back to the aggregator. The
//! classification and aggregation code never talks to it directly.

pub mod jsonl;
pub mod memory;
pub mod patients;

pub use jsonl::JsonlStore;
pub use memory::MemoryStore;
pub use patients::{JsonlPatientStore, PatientRepository, DEFAULT_PATIENT_LIMIT};

use crate::core::{Error, PredictionRecord, Result, RiskLevel};
use chrono::{DateTime, Utc};
use serde_json::Value;

/// Storage operations needed by the shell.
pub trait PredictionRepository {
    /// Persist a new prediction created at `created_at`.
    fn insert_at(
        &mut self,
        risk_level: RiskLevel,
        input_data: Value,
        created_at: DateTime<Utc>,
    ) -> Result<PredictionRecord>;

    /// Every stored record in insertion order.
    fn all(&self) -> Result<Vec<PredictionRecord>>;

    /// Administrative removal; fails with [`Error::NotFound`] for unknown ids.
    fn delete(&mut self, id: u64) -> Result<()>;

    fn insert(&mut self, risk_level: RiskLevel, input_data: Value) -> Result<PredictionRecord> {
        self.insert_at(risk_level, input_data, Utc::now())
    }

    fn get(&self, id: u64) -> Result<PredictionRecord> {
        self.all()?
            .into_iter()
            .find(|record| record.id == id)
            .ok_or(Error::NotFound(id))
    }

    /// Newest first, at most `limit` records.
    fn list_recent(&self, limit: usize) -> Result<Vec<PredictionRecord>> {
        let mut records = self.all()?;
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        records.truncate(limit);
        Ok(records)
    }
}

/// Next id after the highest one in use.
pub(crate) fn next_id(ids: impl IntoIterator<Item = u64>) -> Result<u64> {
    ids.into_iter()
        .max()
        .unwrap_or(0)
        .checked_add(1)
        .ok_or_else(|| Error::Storage {
            message: format!("record id space exhausted (highest id is {})", u64::MAX),
            path: None,
            source: None,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_id_follows_highest() {
        assert_eq!(next_id(Vec::new()).unwrap(), 1);
        assert_eq!(next_id([3, 9, 4]).unwrap(), 10);
    }

    #[test]
    fn test_next_id_at_u64_max_is_storage_error() {
        assert!(matches!(next_id([1, u64::MAX]), Err(Error::Storage { .. })));
    }
}
