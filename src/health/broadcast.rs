use super::aggregate::HealthAggregator;
use super::events::HealthEvent;
use super::models::HealthReport;
use indexmap::IndexMap;
use std::sync::Arc;

/// Reacts to broadcast health events. Implementations must tolerate
/// concurrent invocation; any internal state needs its own guard.
pub trait HealthListener: Send + Sync {
    fn name(&self) -> &str;
    fn on_health_event(&self, event: &HealthEvent) -> anyhow::Result<()>;
}

/// Process-wide set of health listeners.
///
/// Built once at startup: register everything, then share it behind an
/// `Arc`. There is no add/remove after that, which keeps `publish` free
/// of locking.
#[derive(Default)]
pub struct ListenerRegistry {
    listeners: Vec<Arc<dyn HealthListener>>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, listener: Arc<dyn HealthListener>) {
        self.listeners.push(listener);
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Fans the event out to every listener, in registration order.
    ///
    /// A failing listener is reported and skipped; it never stops the
    /// fan-out and never reaches the publishing caller.
    pub fn publish(&self, event: &HealthEvent) {
        for listener in &self.listeners {
            if let Err(err) = listener.on_health_event(event) {
                tracing::error!(
                    listener = listener.name(),
                    status = %event.status(),
                    "Health listener failed: {:?}",
                    err
                );
            }
        }
    }
}

/// Decorates an aggregator so that every aggregation result is also
/// broadcast as a [`HealthEvent`], letting other components react to the
/// application (or parts of it) becoming unhealthy.
pub struct BroadcastingAggregator {
    inner: Box<dyn HealthAggregator>,
    registry: Arc<ListenerRegistry>,
}

impl BroadcastingAggregator {
    pub fn new(inner: impl HealthAggregator + 'static, registry: Arc<ListenerRegistry>) -> Self {
        Self {
            inner: Box::new(inner),
            registry,
        }
    }
}

impl HealthAggregator for BroadcastingAggregator {
    fn aggregate(&self, components: &IndexMap<String, HealthReport>) -> HealthReport {
        let report = self.inner.aggregate(components);
        // Publish after the result is fully computed and before returning,
        // so listeners and the caller observe the same aggregate.
        self.registry.publish(&HealthEvent::from_report(report.clone()));
        report
    }
}
