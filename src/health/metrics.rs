use super::broadcast::HealthListener;
use super::events::HealthEvent;
use super::models::Status;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct HealthSnapshot {
    pub timestamp: DateTime<Utc>,
    pub status: Status,
    pub failing_components: usize,
}

/// Rolling history of broadcast health results.
///
/// Registered as a listener next to the change logger; every aggregation
/// leaves one snapshot here, bounded by `max_snapshots` with the oldest
/// dropped first.
pub struct HealthMetrics {
    snapshots: RwLock<Vec<HealthSnapshot>>,
    max_snapshots: usize,
}

impl HealthMetrics {
    pub fn new(max_snapshots: usize) -> Self {
        Self {
            snapshots: RwLock::new(Vec::new()),
            max_snapshots,
        }
    }

    pub fn snapshot_count(&self) -> usize {
        self.snapshots.read().len()
    }

    pub fn stats(&self) -> HashMap<String, serde_json::Value> {
        let snapshots = self.snapshots.read();

        let total = snapshots.len();
        let count = |status: Status| snapshots.iter().filter(|s| s.status == status).count();
        let up = count(Status::Up);

        let availability = if total > 0 {
            (up as f64 / total as f64) * 100.0
        } else {
            100.0
        };

        let mut stats = HashMap::new();
        stats.insert("total_checks".to_string(), serde_json::json!(total));
        stats.insert("up_count".to_string(), serde_json::json!(up));
        stats.insert(
            "down_count".to_string(),
            serde_json::json!(count(Status::Down)),
        );
        stats.insert(
            "out_of_service_count".to_string(),
            serde_json::json!(count(Status::OutOfService)),
        );
        stats.insert(
            "unknown_count".to_string(),
            serde_json::json!(count(Status::Unknown)),
        );
        stats.insert(
            "availability_percentage".to_string(),
            serde_json::json!(format!("{:.2}", availability)),
        );

        if let Some(last) = snapshots.last() {
            stats.insert(
                "last_status".to_string(),
                serde_json::json!(last.status.to_string()),
            );
            stats.insert(
                "last_check".to_string(),
                serde_json::json!(last.timestamp.to_rfc3339()),
            );
        }

        stats
    }

    pub fn clear(&self) {
        self.snapshots.write().clear();
    }
}

impl HealthListener for HealthMetrics {
    fn name(&self) -> &str {
        "metrics"
    }

    fn on_health_event(&self, event: &HealthEvent) -> anyhow::Result<()> {
        let snapshot = HealthSnapshot {
            timestamp: Utc::now(),
            status: event.status(),
            failing_components: event.report().component_failures().len(),
        };

        let mut snapshots = self.snapshots.write();
        snapshots.push(snapshot);
        if snapshots.len() > self.max_snapshots {
            snapshots.remove(0);
        }
        Ok(())
    }
}
