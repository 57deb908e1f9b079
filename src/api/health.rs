//! Health check and metrics endpoints.

use actix_web::{HttpResponse, get, web};
use tracing::error;

use crate::db::DbPool;
use crate::error::AppError;
use crate::metrics::Metrics;

/// Health check endpoint.
///
/// Runs `SELECT 1`: 200 when it succeeds, 503 when no connection can be
/// acquired, 500 when the query itself fails.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Database reachable", body = String),
        (status = 500, description = "Health query failed"),
        (status = 503, description = "Database not connected")
    )
)]
#[get("/health")]
pub async fn health(pool: web::Data<DbPool>) -> HttpResponse {
    match pool.ping().await {
        Ok(()) => HttpResponse::Ok().content_type("text/plain").body("OK"),
        Err(AppError::Unavailable(e)) => {
            error!("Health check failed, database unavailable: {}", e);
            HttpResponse::ServiceUnavailable()
                .content_type("text/plain")
                .body("DB not connected yet")
        }
        Err(e) => {
            error!("Health check failed: {}", e);
            HttpResponse::InternalServerError()
                .content_type("text/plain")
                .body("DB query failed")
        }
    }
}

/// Prometheus text exposition of request, query and session metrics.
#[get("/metrics")]
pub async fn metrics(metrics: web::Data<Metrics>) -> HttpResponse {
    match metrics.render() {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/plain; version=0.0.4")
            .body(body),
        Err(e) => {
            error!("Failed to encode metrics: {}", e);
            HttpResponse::InternalServerError().finish()
        }
    }
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(health).service(metrics);
}
