mod aggregate;
mod broadcast;
mod events;
mod indicators;
mod listener;
mod metrics;
mod models;

pub use aggregate::{HealthAggregator, OrderedHealthAggregator, StatusOrder};
pub use broadcast::{BroadcastingAggregator, HealthListener, ListenerRegistry};
pub use events::{EventKind, HealthError, HealthEvent};
pub use indicators::{HealthChecker, HealthIndicator, MutableHealthIndicator};
pub use listener::ChangeLoggingListener;
pub use metrics::{HealthMetrics, HealthSnapshot};
pub use models::{Detail, HealthReport, Status};
