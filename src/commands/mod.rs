pub mod dashboard;
pub mod init;
pub mod patients;
pub mod records;
pub mod triage;

pub use dashboard::{handle_dashboard, handle_history};
pub use patients::{handle_patient_add, handle_patient_list};
pub use records::{handle_delete, handle_show};
pub use triage::{handle_legacy, handle_triage, record_prediction, TriageResponse};
