use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shared_models::error::AppError;

// =====================================================================================
// READINGS
// =====================================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VitalsReading {
    /// Beats per minute.
    pub heart_rate: f64,
    /// "systolic/diastolic" in mmHg, e.g. "120/80".
    pub blood_pressure: String,
    /// mg/dL.
    pub blood_sugar: f64,
    /// SpO2 percent.
    pub oxygen_level: f64,
    /// Degrees Celsius.
    pub temperature: f64,
}

impl VitalsReading {
    pub fn parsed_blood_pressure(&self) -> Result<BloodPressure, BloodPressureParseError> {
        self.blood_pressure.parse()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BloodPressure {
    pub systolic: f64,
    pub diastolic: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BloodPressureParseError {
    #[error("blood pressure '{0}' is not in systolic/diastolic form")]
    MissingSeparator(String),
    #[error("blood pressure component '{0}' is not a number")]
    NotANumber(String),
}

impl FromStr for BloodPressure {
    type Err = BloodPressureParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (systolic, diastolic) = s
            .split_once('/')
            .ok_or_else(|| BloodPressureParseError::MissingSeparator(s.to_string()))?;

        let parse = |part: &str| -> Result<f64, BloodPressureParseError> {
            let part = part.trim();
            match part.parse::<f64>() {
                Ok(value) if value.is_finite() => Ok(value),
                _ => Err(BloodPressureParseError::NotANumber(part.to_string())),
            }
        };

        Ok(BloodPressure {
            systolic: parse(systolic)?,
            diastolic: parse(diastolic)?,
        })
    }
}

// =====================================================================================
// ASSESSMENT
// =====================================================================================

/// Display tier for a patient's latest vitals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VitalsStatus {
    Unknown,
    /// The reading could not be evaluated (malformed pressure, non-finite value).
    Invalid,
    NeedsReview,
    Improving,
    Stable,
}

impl VitalsStatus {
    pub fn label(&self) -> &'static str {
        match self {
            VitalsStatus::Unknown => "Unknown",
            VitalsStatus::Invalid => "Invalid Reading",
            VitalsStatus::NeedsReview => "Needs Review",
            VitalsStatus::Improving => "Improving",
            VitalsStatus::Stable => "Stable",
        }
    }

    pub fn requires_attention(&self) -> bool {
        matches!(self, VitalsStatus::NeedsReview | VitalsStatus::Invalid)
    }
}

impl fmt::Display for VitalsStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VitalSign {
    HeartRate,
    Systolic,
    Diastolic,
    BloodSugar,
    OxygenLevel,
    Temperature,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VitalBand {
    NeedsReview,
    Improving,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VitalFinding {
    pub sign: VitalSign,
    pub value: f64,
    pub band: VitalBand,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VitalsAssessment {
    pub status: VitalsStatus,
    pub label: String,
    pub findings: Vec<VitalFinding>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// =====================================================================================
// STORAGE & ALERTS
// =====================================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredReading {
    pub id: Uuid,
    pub patient_id: String,
    pub reading: VitalsReading,
    pub recorded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VitalsAlert {
    pub alert_id: Uuid,
    pub patient_id: String,
    pub reading_id: Uuid,
    pub reading_recorded_at: DateTime<Utc>,
    pub status: VitalsStatus,
    pub findings: Vec<VitalFinding>,
    pub created_at: DateTime<Utc>,
    pub acknowledged: bool,
    pub acknowledged_by: Option<String>,
    pub acknowledged_at: Option<DateTime<Utc>>,
}

// =====================================================================================
// REQUESTS & RESPONSES
// =====================================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordReadingResponse {
    pub reading: StoredReading,
    pub assessment: VitalsAssessment,
    pub alert: Option<VitalsAlert>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AlertsQuery {
    pub patient_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadingHistoryResponse {
    pub patient_id: String,
    pub readings: Vec<StoredReading>,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertListResponse {
    pub alerts: Vec<VitalsAlert>,
    pub total: usize,
}

// =====================================================================================
// ERRORS
// =====================================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VitalsError {
    #[error("Alert {0} not found")]
    AlertNotFound(Uuid),
    #[error("Alert {0} was already acknowledged")]
    AlertAlreadyAcknowledged(Uuid),
    #[error("History limit must be greater than zero")]
    InvalidLimit,
}

impl From<VitalsError> for AppError {
    fn from(err: VitalsError) -> Self {
        match err {
            VitalsError::AlertNotFound(_) => AppError::NotFound(err.to_string()),
            VitalsError::AlertAlreadyAcknowledged(_) => AppError::BadRequest(err.to_string()),
            VitalsError::InvalidLimit => AppError::ValidationError(err.to_string()),
        }
    }
}
