use crate::health::{HealthChecker, HealthMetrics, HealthReport};
use actix_web::{get, web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub struct HealthCheckResponse {
    #[serde(flatten)]
    pub report: HealthReport,
    pub timestamp: DateTime<Utc>,
}

/// Runs all registered indicators and returns the aggregate. Because the
/// checker aggregates through the broadcasting decorator, every poll of
/// this endpoint also publishes a health event.
#[tracing::instrument(name = "Health check.", skip(checker))]
#[get("")]
pub async fn health_check(checker: web::Data<Arc<HealthChecker>>) -> HttpResponse {
    let report = checker.check_all().await;
    HttpResponse::Ok().json(HealthCheckResponse {
        report,
        timestamp: Utc::now(),
    })
}

#[tracing::instrument(name = "Health metrics.", skip(metrics))]
#[get("/metrics")]
pub async fn health_metrics(metrics: web::Data<Arc<HealthMetrics>>) -> HttpResponse {
    HttpResponse::Ok().json(metrics.stats())
}
