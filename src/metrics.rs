//! Prometheus metrics for HTTP requests, database queries and sessions.
//!
//! Metrics live in an owned [`Registry`] handed to the middleware, the
//! database pool and the `/metrics` endpoint, so tests can create as many
//! instances as they like.

use std::time::Duration;

use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts, Registry, TextEncoder,
};

/// Label attached to every metric.
const APP_LABEL: &str = "crda-app";

pub struct Metrics {
    registry: Registry,
    http_requests_total: IntCounterVec,
    http_request_duration_seconds: HistogramVec,
    db_query_total: IntCounterVec,
    db_query_duration_seconds: HistogramVec,
    active_sessions: IntGauge,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let labels = std::iter::once(("app".to_string(), APP_LABEL.to_string())).collect();
        let registry = Registry::new_custom(None, Some(labels))?;

        let http_requests_total = IntCounterVec::new(
            Opts::new("http_requests_total", "Total number of HTTP requests"),
            &["method", "route", "status_code"],
        )?;
        let http_request_duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "http_request_duration_seconds",
                "Duration of HTTP requests in seconds",
            )
            .buckets(vec![0.1, 0.3, 0.5, 0.7, 1.0, 3.0, 5.0, 7.0, 10.0]),
            &["method", "route", "status_code"],
        )?;
        let db_query_total = IntCounterVec::new(
            Opts::new("db_query_total", "Total number of database queries"),
            &["operation", "success"],
        )?;
        let db_query_duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "db_query_duration_seconds",
                "Duration of database queries in seconds",
            )
            .buckets(vec![0.01, 0.05, 0.1, 0.5, 1.0, 3.0, 5.0]),
            &["operation"],
        )?;
        let active_sessions = IntGauge::new("active_sessions", "Number of active sessions")?;

        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;
        registry.register(Box::new(db_query_total.clone()))?;
        registry.register(Box::new(db_query_duration_seconds.clone()))?;
        registry.register(Box::new(active_sessions.clone()))?;

        Ok(Self {
            registry,
            http_requests_total,
            http_request_duration_seconds,
            db_query_total,
            db_query_duration_seconds,
            active_sessions,
        })
    }

    pub fn observe_request(&self, method: &str, route: &str, status: u16, elapsed: Duration) {
        let status = status.to_string();
        let labels = [method, route, status.as_str()];
        self.http_requests_total.with_label_values(&labels).inc();
        self.http_request_duration_seconds
            .with_label_values(&labels)
            .observe(elapsed.as_secs_f64());
    }

    pub fn observe_query(&self, operation: &str, success: bool, elapsed: Duration) {
        let success = if success { "true" } else { "false" };
        self.db_query_total
            .with_label_values(&[operation, success])
            .inc();
        self.db_query_duration_seconds
            .with_label_values(&[operation])
            .observe(elapsed.as_secs_f64());
    }

    pub fn session_opened(&self) {
        self.active_sessions.inc();
    }

    pub fn session_closed(&self) {
        if self.active_sessions.get() > 0 {
            self.active_sessions.dec();
        }
    }

    /// Render all metrics in the Prometheus text exposition format.
    pub fn render(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
