// =====================================================================================
// VITALS ALERT SERVICE
// =====================================================================================

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::models::{StoredReading, VitalsAlert, VitalsAssessment, VitalsError, VitalsStatus};

/// Tracks alerts raised for readings that need clinical attention.
///
/// Each patient keeps at most one alert, acknowledged or not. A concerning
/// reading replaces it unless the stored alert comes from a newer reading.
pub struct VitalsAlertService {
    alerts: Arc<RwLock<HashMap<Uuid, VitalsAlert>>>,
}

impl Default for VitalsAlertService {
    fn default() -> Self {
        Self::new()
    }
}

impl VitalsAlertService {
    pub fn new() -> Self {
        Self {
            alerts: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn raise_if_needed(
        &self,
        reading: &StoredReading,
        assessment: &VitalsAssessment,
    ) -> Option<VitalsAlert> {
        if !assessment.status.requires_attention() {
            return None;
        }

        let alert = VitalsAlert {
            alert_id: Uuid::new_v4(),
            patient_id: reading.patient_id.clone(),
            reading_id: reading.id,
            reading_recorded_at: reading.recorded_at,
            status: assessment.status,
            findings: assessment.findings.clone(),
            created_at: Utc::now(),
            acknowledged: false,
            acknowledged_by: None,
            acknowledged_at: None,
        };

        let mut alerts = self.alerts.write().await;
        let superseded = alerts.values().any(|existing| {
            existing.patient_id == alert.patient_id
                && existing.reading_recorded_at > alert.reading_recorded_at
        });
        if superseded {
            debug!(
                patient_id = %alert.patient_id,
                reading_id = %alert.reading_id,
                "Skipping alert for reading older than the current alert"
            );
            return None;
        }

        alerts.retain(|_, existing| existing.patient_id != alert.patient_id);
        alerts.insert(alert.alert_id, alert.clone());

        match alert.status {
            VitalsStatus::NeedsReview => error!(
                alert_id = %alert.alert_id,
                patient_id = %alert.patient_id,
                findings = alert.findings.len(),
                "VITALS ALERT RAISED: {}", alert.status
            ),
            _ => warn!(
                alert_id = %alert.alert_id,
                patient_id = %alert.patient_id,
                "Vitals alert raised for unreadable reading"
            ),
        }

        Some(alert)
    }

    /// Unacknowledged alerts, newest first, optionally for one patient.
    pub async fn active_alerts(&self, patient_id: Option<&str>) -> Vec<VitalsAlert> {
        let alerts = self.alerts.read().await;
        let mut active: Vec<VitalsAlert> = alerts
            .values()
            .filter(|alert| !alert.acknowledged)
            .filter(|alert| patient_id.map_or(true, |id| alert.patient_id == id))
            .cloned()
            .collect();
        active.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        active
    }

    pub async fn acknowledge(&self, alert_id: Uuid, acknowledged_by: &str) -> Result<VitalsAlert, VitalsError> {
        let mut alerts = self.alerts.write().await;
        let alert = alerts
            .get_mut(&alert_id)
            .ok_or(VitalsError::AlertNotFound(alert_id))?;

        if alert.acknowledged {
            return Err(VitalsError::AlertAlreadyAcknowledged(alert_id));
        }

        alert.acknowledged = true;
        alert.acknowledged_by = Some(acknowledged_by.to_string());
        alert.acknowledged_at = Some(Utc::now());

        info!(alert_id = %alert_id, by = %acknowledged_by, "Vitals alert acknowledged");
        Ok(alert.clone())
    }

    /// Drops every alert for the patient and returns how many were removed.
    pub async fn clear_patient(&self, patient_id: &str) -> usize {
        let mut alerts = self.alerts.write().await;
        let before = alerts.len();
        alerts.retain(|_, alert| alert.patient_id != patient_id);
        let removed = before - alerts.len();

        if removed > 0 {
            info!(patient_id = %patient_id, removed, "Vitals alerts cleared");
        }
        removed
    }
}
