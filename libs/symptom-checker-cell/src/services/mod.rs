pub mod triage;

pub use triage::check_symptoms;
