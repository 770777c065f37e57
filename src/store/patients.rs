//! Patient registry, kept apart from predictions in its own JSON-lines file.
use super::jsonl::{append_line, read_lines};
use super::next_id;
use crate::core::{NewPatient, Patient, Result};
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

/// Rows returned by `patient list` when no limit is given
pub const DEFAULT_PATIENT_LIMIT: usize = 100;

pub trait PatientRepository {
    /// Validate and register `patient`, created at `created_at`.
    fn add_at(&mut self, patient: NewPatient, created_at: DateTime<Utc>) -> Result<Patient>;

    /// Every registered patient in insertion order.
    fn patients(&self) -> Result<Vec<Patient>>;

    fn add(&mut self, patient: NewPatient) -> Result<Patient> {
        self.add_at(patient, Utc::now())
    }

    /// Newest first, at most `limit` patients.
    fn recent_patients(&self, limit: usize) -> Result<Vec<Patient>> {
        let mut patients = self.patients()?;
        patients.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        patients.truncate(limit);
        Ok(patients)
    }
}

#[derive(Debug, Clone)]
pub struct JsonlPatientStore {
    path: PathBuf,
}

impl JsonlPatientStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PatientRepository for JsonlPatientStore {
    fn add_at(&mut self, patient: NewPatient, created_at: DateTime<Utc>) -> Result<Patient> {
        let sex = patient.validate()?;
        let existing: Vec<Patient> = read_lines(&self.path)?;
        let registered = Patient {
            id: next_id(existing.iter().map(|p| p.id))?,
            name: patient.name.trim().to_string(),
            age: patient.age,
            sex,
            created_at,
        };
        append_line(&self.path, &registered)?;

        log::info!(
            "Registered patient {} in {}",
            registered.id,
            self.path.display()
        );
        Ok(registered)
    }

    fn patients(&self) -> Result<Vec<Patient>> {
        read_lines(&self.path)
    }
}
