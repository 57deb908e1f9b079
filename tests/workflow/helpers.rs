//! Shared helpers for workflow tests.

use std::sync::Arc;
use std::time::Duration;

use actix_web::cookie::Cookie;
use actix_web::{App, dev::ServiceResponse, test, web};
use chrono::Utc;
use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
use secrecy::SecretString;

use crda_workflow::api;
use crda_workflow::auth::{CredentialVerifier, SESSION_COOKIE, SessionKeys};
use crda_workflow::config::{Config, DatabaseSettings, Environment, SessionSettings};
use crda_workflow::db::DbPool;
use crda_workflow::entity::{account, session};
use crda_workflow::error::AppResult;
use crda_workflow::models::{Role, SessionUser};
use crda_workflow::views::Views;

pub const TEST_SESSION_ID: &str = "0b6f2a4e-session";
pub const TEST_PASSWORD: &str = "s3cret";

/// Stores passwords as `plain:<password>` so fixtures stay readable.
pub struct PlaintextVerifier;

impl CredentialVerifier for PlaintextVerifier {
    fn hash(&self, password: &str) -> AppResult<String> {
        Ok(format!("plain:{}", password))
    }

    fn verify(&self, password: &str, stored: &str) -> bool {
        stored == format!("plain:{}", password)
    }
}

pub fn test_config() -> Config {
    Config {
        environment: Environment::Development,
        host: "127.0.0.1".to_string(),
        port: 4200,
        database: DatabaseSettings {
            host: "localhost".to_string(),
            port: 3306,
            user: "root".to_string(),
            password: SecretString::from(String::new()),
            database: "base_crda".to_string(),
            max_connections: 1,
            max_retries: 0,
            retry_interval: Duration::from_secs(1),
        },
        session: SessionSettings {
            secret: SecretString::from("workflow-test-secret".to_string()),
            ttl_secs: 3600,
        },
        cors_origin: "*".to_string(),
        org_email_domain: "@crda.com".to_string(),
        static_dir: "public".into(),
    }
}

pub fn test_keys() -> SessionKeys {
    SessionKeys::new(&test_config().session, false)
}

/// Empty mock MySQL database; chain `append_*` calls onto it.
pub fn mock_db() -> MockDatabase {
    MockDatabase::new(DatabaseBackend::MySql)
}

pub fn pool_from(db: MockDatabase) -> DbPool {
    DbPool::from_connection(db.into_connection())
}

pub fn exec_ok(rows_affected: u64) -> MockExecResult {
    MockExecResult {
        last_insert_id: 1,
        rows_affected,
    }
}

/// Every statement the mock saw so far, rendered for substring checks.
pub fn statement_log(pool: &DbPool) -> String {
    format!("{:?}", pool.connection().clone().into_transaction_log())
}

/// Assert that `needles` occur in `haystack` in this order.
pub fn assert_in_order(haystack: &str, needles: &[&str]) {
    let mut from = 0;
    for needle in needles {
        match haystack[from..].find(needle) {
            Some(pos) => from += pos + needle.len(),
            None => panic!("'{}' missing or out of order in: {}", needle, haystack),
        }
    }
}

pub fn test_user(role: Role) -> SessionUser {
    SessionUser {
        id: 7,
        email_user: "staff@crda.com".to_string(),
        role_user: role,
        nom_user: "Trabelsi".to_string(),
        prenom_user: "Sami".to_string(),
    }
}

pub fn account_row(role: &str, status: &str) -> account::Model {
    account::Model {
        id: 7,
        email_user: "staff@crda.com".to_string(),
        password_user: format!("plain:{}", TEST_PASSWORD),
        role_user: role.to_string(),
        status_user: status.to_string(),
        nom_user: "Trabelsi".to_string(),
        prenom_user: "Sami".to_string(),
        sex_user: "M".to_string(),
        cin_user: "08123456".to_string(),
    }
}

/// Session row the extractor finds for [`session_cookie`].
pub fn session_row() -> session::Model {
    session::Model {
        id: TEST_SESSION_ID.to_string(),
        user_id: 7,
        created_at: Utc::now(),
        expires_at: Utc::now() + chrono::Duration::hours(1),
    }
}

/// Mock database that already answers the session lookup.
pub fn logged_in_db() -> MockDatabase {
    mock_db().append_query_results([vec![session_row()]])
}

pub fn session_cookie(role: Role) -> Cookie<'static> {
    let token = test_keys()
        .issue(TEST_SESSION_ID, &test_user(role))
        .expect("Failed to issue test session");
    Cookie::new(SESSION_COOKIE, token)
}

pub fn location<B>(resp: &ServiceResponse<B>) -> String {
    resp.headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

/// Create the full application around `pool`.
pub async fn create_test_app(
    pool: &DbPool,
) -> impl actix_web::dev::Service<
    actix_http::Request,
    Response = ServiceResponse,
    Error = actix_web::Error,
> {
    let views = Views::new(true).expect("Failed to load templates");
    let verifier: web::Data<dyn CredentialVerifier> =
        web::Data::from(Arc::new(PlaintextVerifier) as Arc<dyn CredentialVerifier>);

    test::init_service(
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(views))
            .app_data(web::Data::new(test_keys()))
            .app_data(verifier)
            .app_data(web::Data::new(test_config()))
            .configure(api::configure_routes)
            .default_service(web::route().to(api::not_found)),
    )
    .await
}
