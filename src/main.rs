//! CRDA workflow server - Main entry point.
//!
//! Starts the Actix-web server with configured routes and middleware.

use std::sync::Arc;

use actix_files::Files;
use actix_web::{App, HttpServer, web};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crda_workflow::api::{self, ApiDoc};
use crda_workflow::auth::{Argon2Verifier, CredentialVerifier, SessionKeys};
use crda_workflow::config::Config;
use crda_workflow::db::DbPool;
use crda_workflow::metrics::Metrics;
use crda_workflow::middleware::{RequestLogger, cors, error_pages, security_headers};
use crda_workflow::views::Views;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            error!("  - RUST_ENV must be 'development' or 'production'");
            error!("  - In production, SESSION_SECRET must be set to a strong value");
            std::process::exit(1);
        }
    };

    info!("========================================");
    info!("  CRDA Workflow Server");
    info!("  Environment: {}", config.environment);
    info!("========================================");

    if config.is_development() {
        warn!("Running in DEVELOPMENT mode - do not use in production!");
    }

    let metrics = match Metrics::new() {
        Ok(metrics) => Arc::new(metrics),
        Err(e) => {
            error!("Failed to register metrics: {}", e);
            std::process::exit(1);
        }
    };

    let pool = match DbPool::connect(&config.database).await {
        Ok(pool) => pool.with_metrics(metrics.clone()),
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = pool.run_migrations().await {
        error!("{}", e);
        std::process::exit(1);
    }
    info!("Database migrations complete");

    match pool.purge_expired_sessions().await {
        Ok(0) => {}
        Ok(n) => info!("Purged {} expired sessions", n),
        Err(e) => warn!("Failed to purge expired sessions: {}", e),
    }

    let views = match Views::new(config.is_development()) {
        Ok(views) => web::Data::new(views),
        Err(e) => {
            error!("Failed to load templates: {:?}", e);
            std::process::exit(1);
        }
    };

    let session_keys = web::Data::new(SessionKeys::new(
        &config.session,
        config.environment.is_production(),
    ));
    let verifier: web::Data<dyn CredentialVerifier> =
        web::Data::from(Arc::new(Argon2Verifier) as Arc<dyn CredentialVerifier>);
    let metrics_data = web::Data::from(metrics.clone());
    let pool_data = web::Data::new(pool);

    let bind_address = config.bind_address();
    let static_dir = config.static_dir.clone();
    let cors_origin = config.cors_origin.clone();
    let is_development = config.is_development();
    let config_data = web::Data::new(config);

    let worker_count = if is_development {
        info!(
            "Starting server at http://{} (4 workers - development mode)",
            bind_address
        );
        4
    } else {
        let cpus = num_cpus::get();
        info!("Starting server at http://{} ({} workers)", bind_address, cpus);
        cpus
    };

    let server = HttpServer::new(move || {
        let app = App::new()
            .wrap(error_pages())
            .wrap(security_headers())
            .wrap(cors(&cors_origin))
            .wrap(RequestLogger::with_metrics(metrics.clone()))
            .app_data(pool_data.clone())
            .app_data(views.clone())
            .app_data(session_keys.clone())
            .app_data(verifier.clone())
            .app_data(metrics_data.clone())
            .app_data(config_data.clone())
            .configure(api::configure_routes)
            .service(Files::new("/public", static_dir.clone()).prefer_utf8(true));

        let app = if is_development {
            app.service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", ApiDoc::openapi()),
            )
        } else {
            app
        };

        app.default_service(web::route().to(api::not_found))
    });

    server
        .workers(worker_count)
        .bind(&bind_address)?
        .run()
        .await
}
