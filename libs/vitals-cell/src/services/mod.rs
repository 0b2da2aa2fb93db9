pub mod alerts;
pub mod store;
pub mod triage;

pub use alerts::VitalsAlertService;
pub use store::{InMemoryVitalsRepository, VitalsRepository};
pub use triage::{assess_vitals, classify_vitals};
