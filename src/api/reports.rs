//! Inspection report routes (gerant).

use actix_web::{HttpResponse, delete, get, post, web};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info, warn};

use super::{redirect, redirect_with_error};
use crate::auth::{Authenticated, Capability};
use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::{FlashQuery, ReportDetails, ReportForm, ReportKeyQuery};
use crate::views::{Views, page_context};

/// Query string of the new-report form, prefilled from the service list.
#[derive(Debug, Default, Deserialize)]
pub struct ReportPrefill {
    pub cin: Option<String>,
    pub sujet: Option<String>,
    pub nom: Option<String>,
    pub prenom: Option<String>,
    pub error: Option<String>,
}

#[get("/report")]
pub async fn new_report(
    auth: Authenticated,
    views: web::Data<Views>,
    query: web::Query<ReportPrefill>,
) -> AppResult<HttpResponse> {
    auth.require(Capability::ManageReports)?;
    let query = query.into_inner();

    let flash = FlashQuery {
        error: query.error,
        success: None,
    };
    let mut context = page_context("إنشاء تقرير", Some(&auth.user), &flash);
    context.insert("is_viewing", &false);
    for (key, value) in [
        ("cin", query.cin),
        ("sujet", query.sujet),
        ("nom", query.nom),
        ("prenom", query.prenom),
    ] {
        if let Some(value) = value {
            context.insert(key, &value);
        }
    }
    Ok(views.render("reports/form.html", &context))
}

/// Read-only view of the report filed for a (cin, sujet) pair.
#[get("/viewreport")]
pub async fn view_report(
    auth: Authenticated,
    pool: web::Data<DbPool>,
    views: web::Data<Views>,
    query: web::Query<ReportKeyQuery>,
) -> AppResult<HttpResponse> {
    auth.require(Capability::ViewReports)?;
    let landing = auth.user.role_user.landing_path();

    let (Some(cin), Some(sujet)) = (query.cin.as_deref(), query.sujet.as_deref()) else {
        return Ok(redirect(landing));
    };

    match pool.find_report_by_key(cin, sujet).await {
        Ok(Some(report)) => {
            let mut context = page_context("عرض التقرير", Some(&auth.user), &FlashQuery::default());
            context.insert("is_viewing", &true);
            context.insert("report", &report);
            Ok(views.render("reports/form.html", &context))
        }
        Ok(None) => Ok(redirect(landing)),
        Err(e) => {
            error!("Failed to load report for cin={} sujet={}: {}", cin, sujet, e);
            Ok(redirect_with_error(landing, e.code()))
        }
    }
}

/// All reports, newest first.
#[get("/getreports")]
pub async fn list_reports(
    auth: Authenticated,
    pool: web::Data<DbPool>,
    views: web::Data<Views>,
    flash: web::Query<FlashQuery>,
) -> AppResult<HttpResponse> {
    auth.require(Capability::ManageReports)?;

    let mut flash = flash.into_inner();
    let reports = match pool.list_reports().await {
        Ok(reports) => reports,
        Err(e) => {
            error!("Failed to list reports: {}", e);
            flash.error = Some(e.code().to_string());
            Vec::new()
        }
    };

    let mut context = page_context("قائمة التقارير", Some(&auth.user), &flash);
    context.insert("reports", &reports);
    Ok(views.render("reports/list.html", &context))
}

#[get("/editreport/{id}")]
pub async fn edit_report(
    auth: Authenticated,
    pool: web::Data<DbPool>,
    views: web::Data<Views>,
    path: web::Path<i32>,
    flash: web::Query<FlashQuery>,
) -> AppResult<HttpResponse> {
    auth.require(Capability::ManageReports)?;
    let id = path.into_inner();

    match pool.get_report(id).await {
        Ok(Some(report)) => {
            let mut context = page_context("تعديل التقرير", Some(&auth.user), &flash);
            context.insert("report", &report);
            Ok(views.render("reports/edit.html", &context))
        }
        Ok(None) => Ok(redirect("/getreports")),
        Err(e) => {
            error!("Failed to load report {}: {}", id, e);
            Ok(redirect_with_error("/getreports", e.code()))
        }
    }
}

/// File a report and move its service to the reported stage.
#[post("/addreport")]
pub async fn add_report(
    auth: Authenticated,
    pool: web::Data<DbPool>,
    form: web::Form<ReportForm>,
) -> AppResult<HttpResponse> {
    auth.require(Capability::ManageReports)?;

    let report = match form.into_inner().validate() {
        Ok(report) => report,
        Err(e) => {
            warn!("Rejected report form: {}", e);
            return Ok(redirect_with_error("/getreports", e.code()));
        }
    };

    match pool.create_report(&report).await {
        Ok(id) => {
            info!("Report {} filed by user {}", id, auth.user.id);
            Ok(redirect("/getreports"))
        }
        Err(e) => {
            error!(
                "Failed to create report for cin={} sujet={}: {}",
                report.cin, report.sujet, e
            );
            Ok(redirect_with_error(
                &format!(
                    "/report?cin={}&sujet={}",
                    urlencoding::encode(&report.cin),
                    urlencoding::encode(&report.sujet)
                ),
                "database_error",
            ))
        }
    }
}

#[post("/updatereport/{id}")]
pub async fn update_report(
    auth: Authenticated,
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
    form: web::Form<ReportDetails>,
) -> AppResult<HttpResponse> {
    auth.require(Capability::ManageReports)?;
    let id = path.into_inner();

    match pool.update_report(id, form.into_inner()).await {
        Ok(_) => Ok(redirect("/getreports")),
        Err(e) => {
            error!("Failed to update report {}: {}", id, e);
            Ok(redirect_with_error(
                &format!("/editreport/{}", id),
                "update_failed",
            ))
        }
    }
}

/// Delete a report and the decision attached to it.
#[utoipa::path(
    delete,
    path = "/api/reports/{id}",
    tag = "Reports",
    params(("id" = i32, Path, description = "Report id")),
    responses(
        (status = 200, description = "Report and its decision deleted"),
        (status = 302, description = "No session or wrong role, redirect to login"),
        (status = 404, description = "Report not found", body = crate::error::ErrorResponse),
        (status = 500, description = "Database error", body = crate::error::ErrorResponse)
    )
)]
#[delete("/api/reports/{id}")]
pub async fn delete_report(
    auth: Authenticated,
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    auth.require(Capability::ManageReports)?;
    let id = path.into_inner();

    match pool.delete_report(id).await {
        Ok(()) => {
            info!("Report {} deleted by user {}", id, auth.user.id);
            Ok(HttpResponse::Ok().json(json!({ "success": true })))
        }
        Err(AppError::NotFound(what)) => {
            warn!("Delete of unknown report {}", id);
            Err(AppError::NotFound(what))
        }
        Err(e) => Err(e),
    }
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(new_report)
        .service(view_report)
        .service(list_reports)
        .service(edit_report)
        .service(add_report)
        .service(update_report)
        .service(delete_report);
}
