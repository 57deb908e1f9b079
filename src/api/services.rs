//! Service request routes (chef d'entreprise).

use actix_web::{HttpResponse, delete, get, post, web};
use serde_json::json;
use tracing::{error, info};

use super::{redirect, redirect_with_error};
use crate::auth::{Authenticated, Capability};
use crate::db::DbPool;
use crate::error::AppResult;
use crate::models::{FlashQuery, ServiceFields, ServiceForm};
use crate::views::{Views, page_context};

/// New-service form.
#[get("/services")]
pub async fn new_service(
    auth: Authenticated,
    views: web::Data<Views>,
    flash: web::Query<FlashQuery>,
) -> AppResult<HttpResponse> {
    auth.require(Capability::ManageServices)?;
    Ok(views.render(
        "services/new.html",
        &page_context("طلب جديد", Some(&auth.user), &flash),
    ))
}

/// All services with their derived status.
#[get("/getservices")]
pub async fn list_services(
    auth: Authenticated,
    pool: web::Data<DbPool>,
    views: web::Data<Views>,
    flash: web::Query<FlashQuery>,
) -> AppResult<HttpResponse> {
    auth.require(Capability::ManageServices)?;

    let mut flash = flash.into_inner();
    let services = match pool.list_services_with_status().await {
        Ok(services) => services,
        Err(e) => {
            error!("Failed to list services: {}", e);
            flash.error = Some(e.code().to_string());
            Vec::new()
        }
    };

    let mut context = page_context("الطلبات", Some(&auth.user), &flash);
    context.insert("services", &services);
    Ok(views.render("services/list.html", &context))
}

#[get("/editservice/{id}")]
pub async fn edit_service(
    auth: Authenticated,
    pool: web::Data<DbPool>,
    views: web::Data<Views>,
    path: web::Path<i32>,
    flash: web::Query<FlashQuery>,
) -> AppResult<HttpResponse> {
    auth.require(Capability::ManageServices)?;
    let id = path.into_inner();

    match pool.get_service(id).await {
        Ok(Some(service)) => {
            let mut context = page_context("تعديل الطلب", Some(&auth.user), &flash);
            context.insert("service", &service);
            Ok(views.render("services/edit.html", &context))
        }
        Ok(None) => Ok(redirect("/getservices")),
        Err(e) => {
            error!("Failed to load service {}: {}", id, e);
            Ok(redirect_with_error("/getservices", e.code()))
        }
    }
}

#[post("/addservice")]
pub async fn add_service(
    auth: Authenticated,
    pool: web::Data<DbPool>,
    form: web::Form<ServiceForm>,
) -> AppResult<HttpResponse> {
    auth.require(Capability::ManageServices)?;
    let fields = ServiceFields::from(form.into_inner());

    match pool.insert_service(&fields).await {
        Ok(id) => {
            info!("Service {} created by user {}", id, auth.user.id);
            Ok(redirect("/getservices"))
        }
        Err(e) => {
            error!("Failed to create service: {}", e);
            Ok(redirect_with_error("/services", "database_error"))
        }
    }
}

#[post("/updateservice/{id}")]
pub async fn update_service(
    auth: Authenticated,
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
    form: web::Form<ServiceForm>,
) -> AppResult<HttpResponse> {
    auth.require(Capability::ManageServices)?;
    let id = path.into_inner();
    let fields = ServiceFields::from(form.into_inner());

    match pool.update_service(id, &fields).await {
        Ok(_) => Ok(redirect("/getservices")),
        Err(e) => {
            error!("Failed to update service {}: {}", id, e);
            Ok(redirect_with_error(
                &format!("/editservice/{}", id),
                "update_failed",
            ))
        }
    }
}

/// Delete a service request.
#[utoipa::path(
    delete,
    path = "/api/services/{id}",
    tag = "Services",
    params(("id" = i32, Path, description = "Service id")),
    responses(
        (status = 200, description = "Service deleted"),
        (status = 302, description = "No session or wrong role, redirect to login"),
        (status = 500, description = "Database error", body = crate::error::ErrorResponse)
    )
)]
#[delete("/api/services/{id}")]
pub async fn delete_service(
    auth: Authenticated,
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    auth.require(Capability::ManageServices)?;
    let id = path.into_inner();

    pool.delete_service(id).await?;
    info!("Service {} deleted by user {}", id, auth.user.id);

    Ok(HttpResponse::Ok().json(json!({ "success": true })))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(new_service)
        .service(list_services)
        .service(edit_service)
        .service(add_service)
        .service(update_service)
        .service(delete_service);
}
