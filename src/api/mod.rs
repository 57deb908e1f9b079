//! HTTP route modules.
//!
//! Page routes answer with HTML or with a redirect carrying an `?error=`
//! code; `/api/*` routes answer with JSON.

pub mod admin;
pub mod auth;
pub mod health;
pub mod openapi;
pub mod pages;
pub mod reports;
pub mod results;
pub mod services;
pub mod status;

use actix_web::http::header;
use actix_web::{HttpResponse, web};

use crate::views::Views;

pub use openapi::ApiDoc;

/// `302 Found` to `location`.
pub(crate) fn redirect(location: impl Into<String>) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location.into()))
        .finish()
}

/// Redirect to `path` with an `error` flash code appended.
pub(crate) fn redirect_with_error(path: &str, code: &str) -> HttpResponse {
    let separator = if path.contains('?') { '&' } else { '?' };
    redirect(format!("{}{}error={}", path, separator, code))
}

/// Register every route.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::configure_routes)
        .configure(pages::configure_routes)
        .configure(auth::configure_routes)
        .configure(services::configure_routes)
        .configure(reports::configure_routes)
        .configure(results::configure_routes)
        .configure(admin::configure_routes)
        .configure(status::configure_routes);
}

/// Fallback for unknown routes.
pub async fn not_found(views: web::Data<Views>) -> HttpResponse {
    views.not_found()
}
