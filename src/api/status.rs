//! Public status lookup for citizens.

use actix_web::{HttpResponse, get, post, web};
use tera::Context;
use tracing::error;

use crate::db::DbPool;
use crate::models::{CheckStatusForm, FlashQuery, StatusView};
use crate::views::{Views, page_context};

const TITLE: &str = "التحقق من الحالة";
const MISSING_FIELDS: &str = "الرجاء إدخال جميع الحقول المطلوبة";
const NO_MATCH: &str = "لم يتم العثور على نتائج مطابقة";
const SYSTEM_ERROR: &str = "حدث خطأ في النظام";

fn form_context(form: &CheckStatusForm) -> Context {
    let mut context = page_context(TITLE, None, &FlashQuery::default());
    if let Some(cin) = &form.cin {
        context.insert("form_cin", cin);
    }
    if let Some(number) = &form.transaction_number {
        context.insert("form_transaction_number", number);
    }
    context
}

async fn lookup(pool: &DbPool, views: &Views, form: CheckStatusForm) -> HttpResponse {
    let mut context = form_context(&form);

    let Some((cin, number)) = form.lookup_key() else {
        context.insert("lookup_error", MISSING_FIELDS);
        return views.render("check_status.html", &context);
    };

    match pool.find_status(&cin, &number).await {
        Ok(Some(row)) => {
            context.insert("result", &StatusView::from(row));
        }
        Ok(None) => {
            context.insert("lookup_error", NO_MATCH);
        }
        Err(e) => {
            error!("Status lookup failed: {}", e);
            context.insert("lookup_error", SYSTEM_ERROR);
        }
    }

    views.render("check_status.html", &context)
}

/// Empty form, or a lookup when both fields are in the query string.
#[get("/check-status")]
pub async fn check_status_page(
    pool: web::Data<DbPool>,
    views: web::Data<Views>,
    query: web::Query<CheckStatusForm>,
) -> HttpResponse {
    let query = query.into_inner();
    if query.cin.is_none() && query.transaction_number.is_none() {
        return views.render("check_status.html", &form_context(&query));
    }
    lookup(&pool, &views, query).await
}

#[post("/check-status")]
pub async fn check_status(
    pool: web::Data<DbPool>,
    views: web::Data<Views>,
    form: web::Form<CheckStatusForm>,
) -> HttpResponse {
    lookup(&pool, &views, form.into_inner()).await
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(check_status_page).service(check_status);
}
