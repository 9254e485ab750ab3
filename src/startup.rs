use crate::configuration::HealthSettings;
use crate::health::{
    BroadcastingAggregator, ChangeLoggingListener, HealthChecker, HealthIndicator, HealthMetrics,
    ListenerRegistry, MutableHealthIndicator, OrderedHealthAggregator,
};
use crate::routes;
use actix_cors::Cors;
use actix_web::{dev::Server, web, App, HttpServer};
use std::net::TcpListener;
use std::sync::Arc;
use tracing_actix_web::TracingLogger;

const MAX_METRIC_SNAPSHOTS: usize = 1000;

/// The explicitly wired health subsystem. There is no global registry;
/// whoever boots the application builds this once and hands the pieces
/// to [`run`].
pub struct HealthSystem {
    pub checker: Arc<HealthChecker>,
    pub metrics: Arc<HealthMetrics>,
    pub mutable: Arc<MutableHealthIndicator>,
}

pub fn wire_health(settings: &HealthSettings) -> HealthSystem {
    let mutable = Arc::new(MutableHealthIndicator::new("mutable"));
    let metrics = Arc::new(HealthMetrics::new(MAX_METRIC_SNAPSHOTS));

    let mut registry = ListenerRegistry::new();
    registry.register(Arc::new(ChangeLoggingListener::new()));
    registry.register(metrics.clone());

    let aggregator = BroadcastingAggregator::new(
        OrderedHealthAggregator::new(settings.status_order()),
        Arc::new(registry),
    );

    let indicators: Vec<Arc<dyn HealthIndicator>> = vec![mutable.clone()];
    let checker = Arc::new(HealthChecker::new(indicators, Arc::new(aggregator)));

    HealthSystem {
        checker,
        metrics,
        mutable,
    }
}

pub fn run(
    listener: TcpListener,
    checker: Arc<HealthChecker>,
    metrics: Arc<HealthMetrics>,
) -> Result<Server, std::io::Error> {
    let checker = web::Data::new(checker);
    let metrics = web::Data::new(metrics);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(Cors::permissive())
            .app_data(checker.clone())
            .app_data(metrics.clone())
            .service(
                web::scope("/health_check")
                    .service(routes::health_check)
                    .service(routes::health_metrics),
            )
            .service(routes::hello)
    })
    .listen(listener)?
    .run();

    Ok(server)
}
