use super::models::{HealthReport, Status};
use indexmap::IndexMap;

/// Combines per-component health reports into one overall report.
///
/// Implementations must be pure: same input and same configured ordering
/// always produce the same aggregate.
pub trait HealthAggregator: Send + Sync {
    fn aggregate(&self, components: &IndexMap<String, HealthReport>) -> HealthReport;
}

/// Severity ordering over statuses, worst first.
///
/// Statuses missing from a custom order rank after every listed one.
#[derive(Debug, Clone)]
pub struct StatusOrder {
    order: Vec<Status>,
}

impl Default for StatusOrder {
    fn default() -> Self {
        Self::new(vec![
            Status::Down,
            Status::OutOfService,
            Status::Unknown,
            Status::Up,
        ])
    }
}

impl StatusOrder {
    pub fn new(order: Vec<Status>) -> Self {
        Self { order }
    }

    fn severity(&self, status: Status) -> usize {
        self.order
            .iter()
            .position(|candidate| *candidate == status)
            .unwrap_or(self.order.len())
    }

    /// The worse of the two statuses under this ordering.
    pub fn worst(&self, left: Status, right: Status) -> Status {
        if self.severity(right) < self.severity(left) {
            right
        } else {
            left
        }
    }
}

/// Worst-status-wins aggregation over a [`StatusOrder`].
///
/// The aggregate carries every component's own report unmodified under
/// its name, in input order. An empty input aggregates to UNKNOWN.
pub struct OrderedHealthAggregator {
    order: StatusOrder,
}

impl Default for OrderedHealthAggregator {
    fn default() -> Self {
        Self::new(StatusOrder::default())
    }
}

impl OrderedHealthAggregator {
    pub fn new(order: StatusOrder) -> Self {
        Self { order }
    }
}

impl HealthAggregator for OrderedHealthAggregator {
    fn aggregate(&self, components: &IndexMap<String, HealthReport>) -> HealthReport {
        if components.is_empty() {
            return HealthReport::unknown();
        }

        let mut aggregate = components
            .values()
            .map(|report| report.status)
            .reduce(|worst, status| self.order.worst(worst, status))
            .map(HealthReport::status)
            .unwrap_or_else(HealthReport::unknown);

        for (name, report) in components {
            aggregate = aggregate.with_component(name.clone(), report.clone());
        }
        aggregate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn components(entries: Vec<(&str, Status)>) -> IndexMap<String, HealthReport> {
        entries
            .into_iter()
            .map(|(name, status)| (name.to_string(), HealthReport::status(status)))
            .collect()
    }

    #[test]
    fn empty_input_aggregates_to_unknown() {
        let aggregator = OrderedHealthAggregator::default();
        let report = aggregator.aggregate(&IndexMap::new());
        assert_eq!(report.status, Status::Unknown);
        assert!(report.details.is_empty());
    }

    #[test]
    fn worst_status_wins_under_default_order() {
        let aggregator = OrderedHealthAggregator::default();

        let report = aggregator.aggregate(&components(vec![("db", Status::Up), ("cache", Status::Down)]));
        assert_eq!(report.status, Status::Down);

        let report = aggregator.aggregate(&components(vec![
            ("db", Status::Up),
            ("mq", Status::OutOfService),
            ("cache", Status::Unknown),
        ]));
        assert_eq!(report.status, Status::OutOfService);

        let report = aggregator.aggregate(&components(vec![("db", Status::Up), ("cache", Status::Up)]));
        assert_eq!(report.status, Status::Up);
    }

    #[test]
    fn custom_order_overrides_default_ranking() {
        // Treat OUT_OF_SERVICE as worse than DOWN.
        let aggregator = OrderedHealthAggregator::new(StatusOrder::new(vec![
            Status::OutOfService,
            Status::Down,
            Status::Unknown,
            Status::Up,
        ]));

        let report = aggregator.aggregate(&components(vec![
            ("db", Status::Down),
            ("mq", Status::OutOfService),
        ]));
        assert_eq!(report.status, Status::OutOfService);
    }

    #[test]
    fn unlisted_status_ranks_least_severe() {
        let aggregator =
            OrderedHealthAggregator::new(StatusOrder::new(vec![Status::Down, Status::Up]));

        let report = aggregator.aggregate(&components(vec![
            ("db", Status::Unknown),
            ("cache", Status::Up),
        ]));
        assert_eq!(report.status, Status::Up);
    }

    #[test]
    fn aggregate_preserves_component_reports_in_input_order() {
        let aggregator = OrderedHealthAggregator::default();
        let mut input = IndexMap::new();
        input.insert(
            "db".to_string(),
            HealthReport::up().with_detail("pool_size", 5),
        );
        input.insert(
            "cache".to_string(),
            HealthReport::down().with_detail("error", "timeout"),
        );

        let report = aggregator.aggregate(&input);
        assert_eq!(report.status, Status::Down);

        let names: Vec<_> = report.details.keys().cloned().collect();
        assert_eq!(names, vec!["db", "cache"]);
        assert_eq!(
            report.details["db"].as_report().unwrap(),
            &input["db"],
        );
        assert_eq!(
            report.details["cache"].as_report().unwrap(),
            &input["cache"],
        );
    }
}
