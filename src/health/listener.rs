use super::broadcast::HealthListener;
use super::events::HealthEvent;
use super::models::{HealthReport, Status};
use parking_lot::Mutex;

/// Logs recorded changes to application health.
///
/// Keeps the last observed status and emits exactly one log record per
/// change: info when the application returns to UP, warning otherwise,
/// naming the failing sub-components. Repeated events with an unchanged
/// status are suppressed.
pub struct ChangeLoggingListener {
    current: Mutex<Option<Status>>,
}

impl Default for ChangeLoggingListener {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeLoggingListener {
    pub fn new() -> Self {
        Self {
            current: Mutex::new(None),
        }
    }

    pub fn last_status(&self) -> Option<Status> {
        *self.current.lock()
    }

    fn format_failures(report: &HealthReport) -> String {
        let failures: Vec<String> = report
            .component_failures()
            .iter()
            .map(|(name, component)| format!("{} ({})", name, component.status))
            .collect();
        format!("[{}]", failures.join(", "))
    }

    fn describe(status: Option<Status>) -> String {
        match status {
            Some(status) => status.to_string(),
            None => "none".to_string(),
        }
    }
}

impl HealthListener for ChangeLoggingListener {
    fn name(&self) -> &str {
        "change_logging"
    }

    fn on_health_event(&self, event: &HealthEvent) -> anyhow::Result<()> {
        // The read-compare-write-log sequence stays under the lock so
        // concurrent broadcasts cannot interleave and double- or
        // drop-log a transition.
        let mut current = self.current.lock();
        let new = event.status();
        if *current == Some(new) {
            return Ok(());
        }
        let old = current.replace(new);
        if new == Status::Up {
            tracing::info!(
                "Application status has returned to UP (was {})",
                Self::describe(old)
            );
        } else {
            tracing::warn!(
                "Application status is now {} (was {}). Failures: {}",
                new,
                Self::describe(old),
                Self::format_failures(event.report())
            );
        }
        Ok(())
    }
}
