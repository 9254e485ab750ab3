use super::models::{HealthReport, Status};

#[derive(Debug, thiserror::Error)]
pub enum HealthError {
    #[error("{kind:?} event requires {expected} status, got {actual}")]
    InvariantViolation {
        kind: EventKind,
        expected: &'static str,
        actual: Status,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Healthy,
    Unhealthy,
}

/// Notification that a health aggregation has occurred, carrying its
/// result. Fields are private so an event whose kind contradicts its
/// report's status cannot exist; go through [`HealthEvent::from_report`]
/// or the checked constructors.
#[derive(Debug, Clone)]
pub struct HealthEvent {
    kind: EventKind,
    report: HealthReport,
}

impl HealthEvent {
    /// Classifies the report: Healthy iff its status is UP.
    pub fn from_report(report: HealthReport) -> Self {
        let kind = if report.is_up() {
            EventKind::Healthy
        } else {
            EventKind::Unhealthy
        };
        Self { kind, report }
    }

    /// Checked constructor for listeners that only ever expect healthy
    /// events; rejects any non-UP report instead of reclassifying it.
    pub fn healthy(report: HealthReport) -> Result<Self, HealthError> {
        if !report.is_up() {
            return Err(HealthError::InvariantViolation {
                kind: EventKind::Healthy,
                expected: "UP",
                actual: report.status,
            });
        }
        Ok(Self {
            kind: EventKind::Healthy,
            report,
        })
    }

    pub fn unhealthy(report: HealthReport) -> Result<Self, HealthError> {
        if report.is_up() {
            return Err(HealthError::InvariantViolation {
                kind: EventKind::Unhealthy,
                expected: "non-UP",
                actual: report.status,
            });
        }
        Ok(Self {
            kind: EventKind::Unhealthy,
            report,
        })
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    pub fn is_healthy(&self) -> bool {
        self.kind == EventKind::Healthy
    }

    pub fn report(&self) -> &HealthReport {
        &self.report
    }

    pub fn status(&self) -> Status {
        self.report.status
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_report_classifies_up_as_healthy() {
        let event = HealthEvent::from_report(HealthReport::up());
        assert_eq!(event.kind(), EventKind::Healthy);
        assert!(event.is_healthy());
        assert_eq!(event.status(), Status::Up);
    }

    #[test]
    fn from_report_classifies_everything_else_as_unhealthy() {
        for status in [Status::Down, Status::OutOfService, Status::Unknown] {
            let event = HealthEvent::from_report(HealthReport::status(status));
            assert_eq!(event.kind(), EventKind::Unhealthy);
            assert_eq!(event.status(), status);
        }
    }

    #[test]
    fn checked_constructors_reject_mismatched_status() {
        assert!(matches!(
            HealthEvent::healthy(HealthReport::down()),
            Err(HealthError::InvariantViolation {
                kind: EventKind::Healthy,
                actual: Status::Down,
                ..
            })
        ));
        assert!(matches!(
            HealthEvent::unhealthy(HealthReport::up()),
            Err(HealthError::InvariantViolation {
                kind: EventKind::Unhealthy,
                actual: Status::Up,
                ..
            })
        ));
    }

    #[test]
    fn checked_constructors_accept_matching_status() {
        assert!(HealthEvent::healthy(HealthReport::up()).is_ok());
        assert!(HealthEvent::unhealthy(HealthReport::down()).is_ok());
        assert!(HealthEvent::unhealthy(HealthReport::unknown()).is_ok());
    }

    #[test]
    fn event_exposes_the_original_report() {
        let report = HealthReport::down().with_component("cache", HealthReport::down());
        let event = HealthEvent::from_report(report.clone());
        assert_eq!(event.report(), &report);
    }
}
