//! Account approval routes (directeur).

use actix_web::{HttpResponse, get, post, web};
use tracing::{error, info};

use super::{redirect, redirect_with_error};
use crate::auth::{Authenticated, Capability};
use crate::db::DbPool;
use crate::error::AppResult;
use crate::models::FlashQuery;
use crate::views::{Views, page_context};

const PENDING_ACCOUNTS: &str = "/admin/pending-accounts";

#[get("/admin/pending-accounts")]
pub async fn pending_accounts(
    auth: Authenticated,
    pool: web::Data<DbPool>,
    views: web::Data<Views>,
    flash: web::Query<FlashQuery>,
) -> AppResult<HttpResponse> {
    auth.require(Capability::ApproveAccounts)?;

    let mut flash = flash.into_inner();
    let accounts = match pool.list_pending_accounts().await {
        Ok(accounts) => accounts,
        Err(e) => {
            error!("Failed to list pending accounts: {}", e);
            flash.error = Some(e.code().to_string());
            Vec::new()
        }
    };

    let mut context = page_context("الحسابات المعلقة", Some(&auth.user), &flash);
    context.insert("accounts", &accounts);
    Ok(views.render("admin/pending.html", &context))
}

#[post("/admin/approve-account/{id}")]
pub async fn approve_account(
    auth: Authenticated,
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    auth.require(Capability::ApproveAccounts)?;
    let id = path.into_inner();

    match pool.approve_account(id).await {
        Ok(_) => {
            info!("Account {} approved by user {}", id, auth.user.id);
            Ok(redirect(PENDING_ACCOUNTS))
        }
        Err(e) => {
            error!("Failed to approve account {}: {}", id, e);
            Ok(redirect_with_error(PENDING_ACCOUNTS, "approve_failed"))
        }
    }
}

#[post("/admin/reject-account/{id}")]
pub async fn reject_account(
    auth: Authenticated,
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    auth.require(Capability::ApproveAccounts)?;
    let id = path.into_inner();

    match pool.delete_account(id).await {
        Ok(_) => {
            info!("Account {} rejected by user {}", id, auth.user.id);
            Ok(redirect(PENDING_ACCOUNTS))
        }
        Err(e) => {
            error!("Failed to reject account {}: {}", id, e);
            Ok(redirect_with_error(PENDING_ACCOUNTS, "reject_failed"))
        }
    }
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(pending_accounts)
        .service(approve_account)
        .service(reject_account);
}
