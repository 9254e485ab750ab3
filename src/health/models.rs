use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Up,
    Down,
    OutOfService,
    Unknown,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Up => write!(f, "UP"),
            Status::Down => write!(f, "DOWN"),
            Status::OutOfService => write!(f, "OUT_OF_SERVICE"),
            Status::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// A detail entry is either a scalar value or the full report of a
/// sub-component, so consumers can drill into per-component state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Detail {
    Report(HealthReport),
    Value(serde_json::Value),
}

impl Detail {
    pub fn as_report(&self) -> Option<&HealthReport> {
        match self {
            Detail::Report(report) => Some(report),
            Detail::Value(_) => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthReport {
    pub status: Status,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub details: IndexMap<String, Detail>,
}

impl HealthReport {
    pub fn status(status: Status) -> Self {
        Self {
            status,
            details: IndexMap::new(),
        }
    }

    pub fn up() -> Self {
        Self::status(Status::Up)
    }

    pub fn down() -> Self {
        Self::status(Status::Down)
    }

    pub fn unknown() -> Self {
        Self::status(Status::Unknown)
    }

    pub fn with_detail(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.details.insert(key.into(), Detail::Value(value.into()));
        self
    }

    pub fn with_component(mut self, name: impl Into<String>, report: HealthReport) -> Self {
        self.details.insert(name.into(), Detail::Report(report));
        self
    }

    pub fn is_up(&self) -> bool {
        self.status == Status::Up
    }

    /// Sub-component entries whose own status is not UP, in detail order.
    pub fn component_failures(&self) -> Vec<(&str, &HealthReport)> {
        self.details
            .iter()
            .filter_map(|(name, detail)| detail.as_report().map(|report| (name.as_str(), report)))
            .filter(|(_, report)| !report.is_up())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_builder_keeps_detail_order() {
        let report = HealthReport::up()
            .with_detail("version", "0.2.0")
            .with_component("db", HealthReport::up())
            .with_detail("uptime_seconds", 42);

        let keys: Vec<_> = report.details.keys().cloned().collect();
        assert_eq!(keys, vec!["version", "db", "uptime_seconds"]);
    }

    #[test]
    fn component_failures_skips_scalars_and_up_components() {
        let report = HealthReport::down()
            .with_detail("message", "degraded")
            .with_component("db", HealthReport::up())
            .with_component("cache", HealthReport::down())
            .with_component("mq", HealthReport::status(Status::OutOfService));

        let failures = report.component_failures();
        assert_eq!(failures.len(), 2);
        assert_eq!(failures[0].0, "cache");
        assert_eq!(failures[0].1.status, Status::Down);
        assert_eq!(failures[1].0, "mq");
    }

    #[test]
    fn status_serializes_in_screaming_snake_case() {
        assert_eq!(
            serde_json::to_string(&Status::OutOfService).unwrap(),
            "\"OUT_OF_SERVICE\""
        );
        assert_eq!(Status::OutOfService.to_string(), "OUT_OF_SERVICE");
    }

    #[test]
    fn nested_report_serializes_under_component_name() {
        let report = HealthReport::down().with_component(
            "cache",
            HealthReport::down().with_detail("error", "connection refused"),
        );

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["status"], "DOWN");
        assert_eq!(json["details"]["cache"]["status"], "DOWN");
        assert_eq!(
            json["details"]["cache"]["details"]["error"],
            "connection refused"
        );
    }
}
