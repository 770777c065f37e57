use super::{next_id, PredictionRepository};
use crate::core::{Error, PredictionRecord, Result, RiskLevel};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader, ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Append-only JSON-lines file, one [`PredictionRecord`] per line.
///
/// Lines that fail to parse are skipped with a warning so a single corrupt
/// entry does not hide the rest of the history.
#[derive(Debug, Clone)]
pub struct JsonlStore {
    path: PathBuf,
}

impl JsonlStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_records(&self) -> Result<Vec<PredictionRecord>> {
        read_lines(&self.path)
    }

    fn rewrite(&self, records: &[PredictionRecord]) -> Result<()> {
        ensure_parent(&self.path)?;
        let tmp = self.path.with_extension("jsonl.tmp");
        {
            let mut file = fs::File::create(&tmp)
                .map_err(|e| Error::storage_io("Failed to write store", &tmp, e))?;
            for record in records {
                writeln!(file, "{}", serde_json::to_string(record)?)
                    .map_err(|e| Error::storage_io("Failed to write store", &tmp, e))?;
            }
            file.sync_all()
                .map_err(|e| Error::storage_io("Failed to flush store", &tmp, e))?;
        }
        fs::rename(&tmp, &self.path)
            .map_err(|e| Error::storage_io("Failed to replace store", &self.path, e))
    }
}

fn ensure_parent(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.exists() => {
            fs::create_dir_all(parent)
                .map_err(|e| Error::storage_io("Failed to create store directory", parent, e))
        }
        _ => Ok(()),
    }
}

/// Every parseable line of a JSON-lines file; a missing file reads as empty.
pub(crate) fn read_lines<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let file = match fs::File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(Error::storage_io("Failed to open store", path, e)),
    };

    let mut entries = Vec::new();
    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|e| Error::storage_io("Failed to read store", path, e))?;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<T>(&line) {
            Ok(entry) => entries.push(entry),
            Err(e) => log::warn!(
                "Skipping malformed record at {}:{}: {}",
                path.display(),
                index + 1,
                e
            ),
        }
    }
    Ok(entries)
}

pub(crate) fn append_line<T: Serialize>(path: &Path, entry: &T) -> Result<()> {
    ensure_parent(path)?;
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| Error::storage_io("Failed to open store", path, e))?;
    writeln!(file, "{}", serde_json::to_string(entry)?)
        .map_err(|e| Error::storage_io("Failed to append to store", path, e))
}

impl PredictionRepository for JsonlStore {
    fn insert_at(
        &mut self,
        risk_level: RiskLevel,
        input_data: Value,
        created_at: DateTime<Utc>,
    ) -> Result<PredictionRecord> {
        let existing = self.read_records()?;
        let record = PredictionRecord {
            id: next_id(existing.iter().map(|r| r.id))?,
            risk_level,
            created_at,
            input_data: Some(input_data),
        };
        append_line(&self.path, &record)?;

        log::info!(
            "Stored prediction {} ({}) in {}",
            record.id,
            record.risk_level,
            self.path.display()
        );
        Ok(record)
    }

    fn all(&self) -> Result<Vec<PredictionRecord>> {
        self.read_records()
    }

    fn delete(&mut self, id: u64) -> Result<()> {
        let records = self.read_records()?;
        let before = records.len();
        let kept: Vec<PredictionRecord> = records.into_iter().filter(|r| r.id != id).collect();
        if kept.len() == before {
            return Err(Error::NotFound(id));
        }
        self.rewrite(&kept)?;
        log::info!("Deleted prediction {} from {}", id, self.path.display());
        Ok(())
    }
}
