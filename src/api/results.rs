//! Final decision routes (directeur).

use actix_web::{Either, HttpResponse, delete, get, post, web};
use serde_json::json;
use tracing::{error, info, warn};

use super::{redirect, redirect_with_error};
use crate::auth::{Authenticated, Capability};
use crate::db::DbPool;
use crate::error::AppResult;
use crate::models::{FlashQuery, ResultForm, ResultKey};
use crate::views::{Views, page_context};

/// Decision shown on the edit form when none is recorded.
const NO_DECISION: &str = "pending";

/// Reported services with their decision.
#[get("/results")]
pub async fn list_results(
    auth: Authenticated,
    pool: web::Data<DbPool>,
    views: web::Data<Views>,
    flash: web::Query<FlashQuery>,
) -> AppResult<HttpResponse> {
    auth.require(Capability::DecideResults)?;

    let mut flash = flash.into_inner();
    let rows = match pool.list_results().await {
        Ok(rows) => rows,
        Err(e) => {
            error!("Failed to list results: {}", e);
            flash.error = Some(e.code().to_string());
            Vec::new()
        }
    };

    let mut context = page_context("النتائج النهائية", Some(&auth.user), &flash);
    context.insert("services", &rows);
    Ok(views.render("results/list.html", &context))
}

#[get("/editresult/{id}")]
pub async fn edit_result(
    auth: Authenticated,
    pool: web::Data<DbPool>,
    views: web::Data<Views>,
    path: web::Path<i32>,
    flash: web::Query<FlashQuery>,
) -> AppResult<HttpResponse> {
    auth.require(Capability::DecideResults)?;
    let id = path.into_inner();

    match pool.get_service_decision(id).await {
        Ok(Some(service)) => {
            let current = service.statut.clone().unwrap_or_else(|| NO_DECISION.to_string());
            let mut context = page_context("تعديل النتيجة", Some(&auth.user), &flash);
            context.insert("service", &service);
            context.insert("result", &current);
            Ok(views.render("results/edit.html", &context))
        }
        Ok(None) => Ok(redirect("/results")),
        Err(e) => {
            error!("Failed to load decision for service {}: {}", id, e);
            Ok(redirect_with_error("/results", e.code()))
        }
    }
}

/// Record or overwrite a decision. An unknown status is rejected with 400
/// before anything is written.
#[post("/updateresult")]
pub async fn update_result(
    auth: Authenticated,
    pool: web::Data<DbPool>,
    form: web::Form<ResultForm>,
) -> AppResult<HttpResponse> {
    auth.require(Capability::DecideResults)?;
    let form = form.into_inner();
    let record = form.validate()?;

    match pool.upsert_decision(&record).await {
        Ok(()) => Ok(redirect("/results")),
        Err(e) => {
            error!("Failed to record decision: {}", e);
            let back = match form.id.as_deref() {
                Some(id) if !id.is_empty() => format!("/editresult/{}", urlencoding::encode(id)),
                _ => "/results".to_string(),
            };
            Ok(redirect_with_error(&back, "update_failed"))
        }
    }
}

/// Delete the decision for a (cin, sujet) pair. Accepts JSON or form bodies.
#[utoipa::path(
    delete,
    path = "/api/results",
    tag = "Results",
    request_body = ResultKey,
    responses(
        (status = 200, description = "Decision deleted (or there was none)"),
        (status = 302, description = "No session or wrong role, redirect to login"),
        (status = 500, description = "Database error", body = crate::error::ErrorResponse)
    )
)]
#[delete("/api/results")]
pub async fn delete_result(
    auth: Authenticated,
    pool: web::Data<DbPool>,
    body: Either<web::Json<ResultKey>, web::Form<ResultKey>>,
) -> AppResult<HttpResponse> {
    auth.require(Capability::DecideResults)?;
    let key = match body {
        Either::Left(json) => json.into_inner(),
        Either::Right(form) => form.into_inner(),
    };

    let removed = pool.delete_decision(&key.cin, &key.sujet).await?;
    if removed {
        info!(
            "Decision for cin={} sujet={} deleted by user {}",
            key.cin, key.sujet, auth.user.id
        );
    } else {
        warn!("No decision to delete for cin={} sujet={}", key.cin, key.sujet);
    }

    Ok(HttpResponse::Ok().json(json!({ "success": true })))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(list_results)
        .service(edit_result)
        .service(update_result)
        .service(delete_result);
}
