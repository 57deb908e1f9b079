//! Database module providing connection management, migrations, and queries.
//!
//! [`DbPool`] owns the sea-orm connection pool. It is created once at startup
//! and injected into handlers through `web::Data`; there is no global
//! connection state.

pub mod accounts;
pub mod decisions;
pub mod reports;
pub mod services;
pub mod sessions;

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseBackend, DatabaseConnection,
    DatabaseTransaction, DbErr, Statement,
};
use sea_orm_migration::MigratorTrait;
use secrecy::ExposeSecret;
use tracing::{info, warn};

use crate::config::DatabaseSettings;
use crate::error::{AppError, AppResult};
use crate::metrics::Metrics;
use crate::migration::Migrator;

/// Backend used to build raw statements.
pub(crate) const BACKEND: DatabaseBackend = DatabaseBackend::MySql;

/// Trivial query used by health checks.
pub const HEALTH_QUERY: &str = "SELECT 1";

/// Database connection pool wrapper.
#[derive(Clone)]
pub struct DbPool {
    conn: DatabaseConnection,
    metrics: Option<Arc<Metrics>>,
}

impl DbPool {
    /// Connect to MySQL, retrying a bounded number of times.
    ///
    /// Gives up after `max_retries` additional attempts spaced by
    /// `retry_interval`; the caller decides whether that is fatal.
    pub async fn connect(settings: &DatabaseSettings) -> AppResult<Self> {
        let url = settings.url();
        let mut options = ConnectOptions::new(url.expose_secret().to_string());
        options
            .max_connections(settings.max_connections)
            .min_connections(1)
            .sqlx_logging(false);

        let mut attempt = 0;
        loop {
            match Database::connect(options.clone()).await {
                Ok(conn) => {
                    info!(
                        "Connected to MySQL at {}",
                        settings.display_target()
                    );
                    return Ok(Self::from_connection(conn));
                }
                Err(e) if attempt < settings.max_retries => {
                    attempt += 1;
                    warn!(
                        "MySQL connection error: {} - retrying ({}/{}) in {}s",
                        e,
                        attempt,
                        settings.max_retries,
                        settings.retry_interval.as_secs()
                    );
                    tokio::time::sleep(settings.retry_interval).await;
                }
                Err(e) => {
                    return Err(AppError::Unavailable(format!(
                        "Failed to connect to MySQL after {} retries: {}",
                        settings.max_retries, e
                    )));
                }
            }
        }
    }

    /// Wrap an existing connection (used by tests with a mock database).
    pub fn from_connection(conn: DatabaseConnection) -> Self {
        Self {
            conn,
            metrics: None,
        }
    }

    /// Record query counts and latencies into `metrics`.
    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Get access to the connection for executing queries.
    pub fn connection(&self) -> &DatabaseConnection {
        &self.conn
    }

    /// Apply pending schema migrations.
    pub async fn run_migrations(&self) -> AppResult<()> {
        Migrator::up(&self.conn, None)
            .await
            .map_err(|e| AppError::Database(format!("Failed to run migrations: {}", e)))
    }

    /// Run the trivial diagnostic query.
    pub async fn ping(&self) -> AppResult<()> {
        let stmt = Statement::from_string(BACKEND, HEALTH_QUERY.to_owned());
        self.timed("health_check", self.conn.query_one_raw(stmt))
            .await?;
        Ok(())
    }

    /// Await a database future, recording its outcome and latency.
    pub(crate) async fn timed<T, F>(&self, operation: &'static str, fut: F) -> Result<T, DbErr>
    where
        F: Future<Output = Result<T, DbErr>>,
    {
        let start = Instant::now();
        let result = fut.await;
        if let Some(metrics) = &self.metrics {
            metrics.observe_query(operation, result.is_ok(), start.elapsed());
        }
        result
    }
}

/// Roll back `txn` and convert the error that aborted it.
///
/// A failing rollback is logged; the original error is what the caller sees.
pub(crate) async fn abort(txn: DatabaseTransaction, err: DbErr) -> AppError {
    if let Err(rollback_err) = txn.rollback().await {
        warn!("Rollback failed after '{}': {}", err, rollback_err);
    }
    AppError::from(err)
}
