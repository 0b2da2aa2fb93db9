// =====================================================================================
// VITALS READINGS REPOSITORY
// =====================================================================================

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::models::{StoredReading, VitalsReading};

/// Source of patient vitals readings, injected into the handlers.
#[async_trait]
pub trait VitalsRepository: Send + Sync {
    async fn record(&self, patient_id: &str, reading: VitalsReading) -> StoredReading;

    async fn latest(&self, patient_id: &str) -> Option<StoredReading>;

    /// Most recent readings first, at most `limit` of them.
    async fn history(&self, patient_id: &str, limit: usize) -> Vec<StoredReading>;
}

/// Keeps a bounded per-patient history in memory, oldest readings evicted first.
pub struct InMemoryVitalsRepository {
    capacity: usize,
    readings: Arc<RwLock<HashMap<String, VecDeque<StoredReading>>>>,
}

impl InMemoryVitalsRepository {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            readings: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl VitalsRepository for InMemoryVitalsRepository {
    async fn record(&self, patient_id: &str, reading: VitalsReading) -> StoredReading {
        let stored = StoredReading {
            id: Uuid::new_v4(),
            patient_id: patient_id.to_string(),
            reading,
            recorded_at: Utc::now(),
        };

        let mut readings = self.readings.write().await;
        let history = readings.entry(patient_id.to_string()).or_default();
        history.push_back(stored.clone());
        while history.len() > self.capacity {
            history.pop_front();
        }

        debug!(
            patient_id = %patient_id,
            reading_id = %stored.id,
            retained = history.len(),
            "Vitals reading recorded"
        );

        stored
    }

    async fn latest(&self, patient_id: &str) -> Option<StoredReading> {
        let readings = self.readings.read().await;
        readings.get(patient_id).and_then(|history| history.back().cloned())
    }

    async fn history(&self, patient_id: &str, limit: usize) -> Vec<StoredReading> {
        let readings = self.readings.read().await;
        readings
            .get(patient_id)
            .map(|history| history.iter().rev().take(limit).cloned().collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(heart_rate: f64) -> VitalsReading {
        VitalsReading {
            heart_rate,
            blood_pressure: "120/80".to_string(),
            blood_sugar: 90.0,
            oxygen_level: 98.0,
            temperature: 36.8,
        }
    }

    #[tokio::test]
    async fn test_latest_returns_most_recent_reading() {
        let repo = InMemoryVitalsRepository::new(5);
        assert!(repo.latest("p-1").await.is_none());

        repo.record("p-1", reading(70.0)).await;
        let second = repo.record("p-1", reading(80.0)).await;

        assert_eq!(repo.latest("p-1").await, Some(second));
        assert!(repo.latest("p-2").await.is_none());
    }

    #[tokio::test]
    async fn test_history_is_bounded_and_newest_first() {
        let repo = InMemoryVitalsRepository::new(3);
        for hr in [60.0, 61.0, 62.0, 63.0, 64.0] {
            repo.record("p-1", reading(hr)).await;
        }

        let history = repo.history("p-1", 10).await;
        let rates: Vec<f64> = history.iter().map(|s| s.reading.heart_rate).collect();
        assert_eq!(rates, vec![64.0, 63.0, 62.0]);

        assert_eq!(repo.history("p-1", 1).await.len(), 1);
        assert!(repo.history("nobody", 10).await.is_empty());
    }

    #[test]
    fn test_zero_capacity_keeps_one_reading() {
        let repo = InMemoryVitalsRepository::new(0);
        tokio_test::block_on(async {
            repo.record("p-1", reading(70.0)).await;
            repo.record("p-1", reading(71.0)).await;
            assert_eq!(repo.history("p-1", 10).await.len(), 1);
        });
    }
}
