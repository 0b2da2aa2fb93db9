// =====================================================================================
// VITALS TRIAGE
// =====================================================================================

use tracing::debug;

use crate::models::{
    BloodPressure, VitalBand, VitalFinding, VitalSign, VitalsAssessment, VitalsReading, VitalsStatus,
};

/// Classifies the latest reading into a display tier.
///
/// Needs-review thresholds win over improving bands; a reading with no value
/// in either band is stable. A missing reading is `Unknown`, and a reading
/// that cannot be evaluated is `Invalid` rather than silently stable.
pub fn classify_vitals(reading: Option<&VitalsReading>) -> VitalsStatus {
    assess_vitals(reading).status
}

/// Classification plus the individual readings that fell outside the normal range.
pub fn assess_vitals(reading: Option<&VitalsReading>) -> VitalsAssessment {
    let Some(reading) = reading else {
        return assessment(VitalsStatus::Unknown, Vec::new(), None);
    };

    let pressure = match reading.parsed_blood_pressure() {
        Ok(pressure) => pressure,
        Err(e) => {
            debug!("Unable to evaluate vitals: {}", e);
            return assessment(VitalsStatus::Invalid, Vec::new(), Some(e.to_string()));
        }
    };

    let values = signs(reading, &pressure);
    if let Some((sign, _)) = values.iter().find(|(_, value)| !value.is_finite()) {
        let message = format!("{:?} is not a finite number", sign);
        debug!("Unable to evaluate vitals: {}", message);
        return assessment(VitalsStatus::Invalid, Vec::new(), Some(message));
    }

    let findings: Vec<VitalFinding> = values
        .iter()
        .filter_map(|&(sign, value)| {
            band_for(sign, value).map(|band| VitalFinding { sign, value, band })
        })
        .collect();

    let status = if findings.iter().any(|f| f.band == VitalBand::NeedsReview) {
        VitalsStatus::NeedsReview
    } else if findings.iter().any(|f| f.band == VitalBand::Improving) {
        VitalsStatus::Improving
    } else {
        VitalsStatus::Stable
    };

    debug!(?status, findings = findings.len(), "Vitals classified");
    assessment(status, findings, None)
}

fn assessment(status: VitalsStatus, findings: Vec<VitalFinding>, error: Option<String>) -> VitalsAssessment {
    VitalsAssessment {
        status,
        label: status.label().to_string(),
        findings,
        error,
    }
}

fn signs(reading: &VitalsReading, pressure: &BloodPressure) -> [(VitalSign, f64); 6] {
    [
        (VitalSign::HeartRate, reading.heart_rate),
        (VitalSign::Systolic, pressure.systolic),
        (VitalSign::Diastolic, pressure.diastolic),
        (VitalSign::BloodSugar, reading.blood_sugar),
        (VitalSign::OxygenLevel, reading.oxygen_level),
        (VitalSign::Temperature, reading.temperature),
    ]
}

fn band_for(sign: VitalSign, v: f64) -> Option<VitalBand> {
    let (needs_review, improving) = match sign {
        VitalSign::HeartRate => (v > 100.0 || v < 50.0, (v > 90.0 && v <= 100.0) || (v >= 50.0 && v < 60.0)),
        VitalSign::Systolic => (v > 140.0, v > 130.0 && v <= 140.0),
        VitalSign::Diastolic => (v > 90.0, v > 85.0 && v <= 90.0),
        VitalSign::BloodSugar => (v > 180.0 || v < 70.0, (v > 140.0 && v <= 180.0) || (v >= 70.0 && v < 80.0)),
        VitalSign::OxygenLevel => (v < 92.0, v >= 92.0 && v < 95.0),
        VitalSign::Temperature => (v > 38.0, v > 37.5 && v <= 38.0),
    };

    if needs_review {
        Some(VitalBand::NeedsReview)
    } else if improving {
        Some(VitalBand::Improving)
    } else {
        None
    }
}
