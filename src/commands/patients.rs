//! `patient add` and `patient list`.
use crate::cli::OutputFormat;
use crate::core::NewPatient;
use crate::report::{to_json, Reporter};
use crate::store::PatientRepository;
use anyhow::Result;

pub fn handle_patient_add<S: PatientRepository>(
    reporter: &Reporter,
    store: &mut S,
    patient: NewPatient,
    format: OutputFormat,
) -> Result<()> {
    let registered = store.add(patient)?;
    match format {
        OutputFormat::Json => println!("{}", to_json(&registered)?),
        OutputFormat::Terminal => print!("{}", reporter.registered(&registered)),
    }
    Ok(())
}

pub fn handle_patient_list<S: PatientRepository>(
    reporter: &Reporter,
    store: &S,
    limit: usize,
    format: OutputFormat,
) -> Result<()> {
    let patients = store.recent_patients(limit)?;
    match format {
        OutputFormat::Json => println!("{}", to_json(&patients)?),
        OutputFormat::Terminal => print!("{}", reporter.patients(&patients)),
    }
    Ok(())
}
