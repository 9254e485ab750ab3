use super::aggregate::HealthAggregator;
use super::models::{HealthReport, Status};
use async_trait::async_trait;
use futures::future::join_all;
use indexmap::IndexMap;
use parking_lot::RwLock;
use std::sync::Arc;

/// A named source of health reports. Indicators may do real I/O (ping a
/// database, call a sidecar), hence the async contract.
#[async_trait]
pub trait HealthIndicator: Send + Sync {
    fn name(&self) -> &str;
    async fn health(&self) -> HealthReport;
}

struct MutableState {
    status: Status,
    message: String,
}

/// Demo indicator whose state can be flipped at runtime, used to show a
/// DOWN aggregate being broadcast without anything actually breaking.
pub struct MutableHealthIndicator {
    name: String,
    state: RwLock<MutableState>,
}

impl MutableHealthIndicator {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: RwLock::new(MutableState {
                status: Status::Up,
                message: "All working well!".to_string(),
            }),
        }
    }

    pub fn set_status(&self, status: Status, message: impl Into<String>) {
        let mut state = self.state.write();
        state.status = status;
        state.message = message.into();
    }
}

#[async_trait]
impl HealthIndicator for MutableHealthIndicator {
    fn name(&self) -> &str {
        &self.name
    }

    async fn health(&self) -> HealthReport {
        let (status, message) = {
            let state = self.state.read();
            (state.status, state.message.clone())
        };
        HealthReport::status(status).with_detail("message", message)
    }
}

/// Runs every registered indicator and aggregates the results.
pub struct HealthChecker {
    indicators: Vec<Arc<dyn HealthIndicator>>,
    aggregator: Arc<dyn HealthAggregator>,
}

impl HealthChecker {
    pub fn new(
        indicators: Vec<Arc<dyn HealthIndicator>>,
        aggregator: Arc<dyn HealthAggregator>,
    ) -> Self {
        Self {
            indicators,
            aggregator,
        }
    }

    #[tracing::instrument(name = "Run health checks", skip(self))]
    pub async fn check_all(&self) -> HealthReport {
        let reports = join_all(self.indicators.iter().map(|indicator| indicator.health())).await;
        let components: IndexMap<String, HealthReport> = self
            .indicators
            .iter()
            .map(|indicator| indicator.name().to_string())
            .zip(reports)
            .collect();
        self.aggregator.aggregate(&components)
    }
}
