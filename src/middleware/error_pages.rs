//! HTML error page for unexpected failures on page routes.

use actix_web::dev::ServiceResponse;
use actix_web::http::StatusCode;
use actix_web::middleware::{ErrorHandlerResponse, ErrorHandlers};
use actix_web::web;

use crate::views::Views;

/// Replace error responses on page routes with the rendered 500 page.
///
/// Only responses produced from an `Err` are replaced: handlers that build
/// their own 500 (such as `/health`) and everything under `/api/` keep
/// their body.
pub fn error_pages<B: 'static>() -> ErrorHandlers<B> {
    ErrorHandlers::new()
        .handler(StatusCode::INTERNAL_SERVER_ERROR, render_server_error)
        .handler(StatusCode::SERVICE_UNAVAILABLE, render_server_error)
}

fn render_server_error<B>(res: ServiceResponse<B>) -> actix_web::Result<ErrorHandlerResponse<B>> {
    let is_api = res.request().path().starts_with("/api/");
    let detail = res.response().error().map(|err| err.to_string());
    let Some(detail) = detail.filter(|_| !is_api) else {
        return Ok(ErrorHandlerResponse::Response(res.map_into_left_body()));
    };

    let Some(views) = res.request().app_data::<web::Data<Views>>().cloned() else {
        return Ok(ErrorHandlerResponse::Response(res.map_into_left_body()));
    };

    let (req, _) = res.into_parts();
    let page = views.server_error(&detail);
    Ok(ErrorHandlerResponse::Response(
        ServiceResponse::new(req, page).map_into_right_body(),
    ))
}
