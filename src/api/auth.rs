//! Login, logout and registration routes.

use actix_web::http::header;
use actix_web::{HttpResponse, get, post, web};
use tracing::{error, warn};

use super::{redirect, redirect_with_error};
use crate::auth::{Authenticated, CredentialVerifier, SessionKeys};
use crate::config::Config;
use crate::db::DbPool;
use crate::error::AppError;
use crate::metrics::Metrics;
use crate::models::{FlashQuery, LoginForm, RegisterForm};
use crate::services;
use crate::views::{Views, page_context};

#[get("/login")]
pub async fn login_page(views: web::Data<Views>, flash: web::Query<FlashQuery>) -> HttpResponse {
    views.render(
        "login.html",
        &page_context("تسجيل الدخول", None, &flash),
    )
}

#[post("/login")]
pub async fn login(
    pool: web::Data<DbPool>,
    verifier: web::Data<dyn CredentialVerifier>,
    keys: web::Data<SessionKeys>,
    metrics: Option<web::Data<Metrics>>,
    form: web::Form<LoginForm>,
) -> HttpResponse {
    let user = match services::authenticate(&pool, verifier.get_ref(), form.into_inner()).await {
        Ok(user) => user,
        Err(AppError::InvalidCredentials) => {
            return redirect_with_error("/login", "invalid_credentials");
        }
        Err(AppError::AccountNotApproved) => return redirect("/unapproved_login"),
        Err(AppError::InvalidRole) => return redirect_with_error("/login", "invalid_role"),
        Err(e) => {
            error!("Login failed: {}", e);
            return redirect_with_error("/login", "server_error");
        }
    };

    match services::open_session(&pool, &keys, &user).await {
        Ok(session) => {
            if let Some(metrics) = metrics {
                metrics.session_opened();
            }
            HttpResponse::Found()
                .cookie(keys.cookie(session.token))
                .insert_header((
                    header::LOCATION,
                    user.role_user.landing_path(),
                ))
                .finish()
        }
        Err(e) => {
            error!("Failed to open session for user {}: {}", user.id, e);
            redirect_with_error("/login", "server_error")
        }
    }
}

#[get("/logout")]
pub async fn logout(
    pool: web::Data<DbPool>,
    keys: web::Data<SessionKeys>,
    metrics: Option<web::Data<Metrics>>,
    auth: Option<Authenticated>,
) -> HttpResponse {
    if let Some(auth) = auth
        && services::close_session(&pool, &auth.session_id).await
        && let Some(metrics) = metrics
    {
        metrics.session_closed();
    }

    HttpResponse::Found()
        .cookie(keys.removal_cookie())
        .insert_header((header::LOCATION, "/login"))
        .finish()
}

#[get("/register")]
pub async fn register_page(
    views: web::Data<Views>,
    config: web::Data<Config>,
    flash: web::Query<FlashQuery>,
) -> HttpResponse {
    let mut context = page_context("تسجيل جديد", None, &flash);
    context.insert("org_email_domain", &config.org_email_domain);
    views.render("register.html", &context)
}

#[post("/register")]
pub async fn register(
    pool: web::Data<DbPool>,
    verifier: web::Data<dyn CredentialVerifier>,
    config: web::Data<Config>,
    form: web::Form<RegisterForm>,
) -> HttpResponse {
    match services::register(
        &pool,
        verifier.get_ref(),
        form.into_inner(),
        &config.org_email_domain,
    )
    .await
    {
        Ok(_) => redirect("/pending_approval"),
        Err(e) => {
            match &e {
                AppError::Database(_) | AppError::Unavailable(_) | AppError::Internal(_) => {
                    error!("Registration failed: {}", e)
                }
                _ => warn!("Registration rejected: {}", e),
            }
            let code = match e {
                AppError::Internal(_) => "database_error",
                other => other.code(),
            };
            redirect_with_error("/register", code)
        }
    }
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(login_page)
        .service(login)
        .service(logout)
        .service(register_page)
        .service(register);
}
