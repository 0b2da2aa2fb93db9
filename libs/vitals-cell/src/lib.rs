// =====================================================================================
// VITALS CELL - PATIENT VITAL-SIGN TRIAGE, READINGS & ALERTS
// =====================================================================================
//
// - Threshold classification of the five tracked vital signs
// - Per-patient readings history behind an injectable repository
// - Alerts for readings that need clinical review
//
// =====================================================================================

pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use models::{
    BloodPressure, BloodPressureParseError, StoredReading, VitalBand, VitalFinding, VitalSign,
    VitalsAlert, VitalsAssessment, VitalsError, VitalsReading, VitalsStatus,
};

pub use services::{
    assess_vitals, classify_vitals, InMemoryVitalsRepository, VitalsAlertService, VitalsRepository,
};

pub use handlers::VitalsHandlers;
pub use router::{create_vitals_router, vitals_routes};
