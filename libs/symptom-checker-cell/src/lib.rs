// Symptom checker cell: rule-based severity triage for patient-reported symptoms.
pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use models::{
    BodyPart,
    Severity,
    SymptomCheckError,
    SymptomCheckRequest,
    SymptomDuration,
    SymptomQuery,
    SymptomVerdict,
};

pub use router::symptom_checker_routes;
pub use services::check_symptoms;
