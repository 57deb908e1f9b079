//! Public pages.

use actix_web::{HttpResponse, get, web};

use crate::auth::Authenticated;
use crate::models::FlashQuery;
use crate::views::{Views, page_context};

#[get("/")]
pub async fn index(views: web::Data<Views>, auth: Option<Authenticated>) -> HttpResponse {
    let user = auth.as_ref().map(|a| &a.user);
    views.render(
        "index.html",
        &page_context("الرئيسية", user, &FlashQuery::default()),
    )
}

#[get("/about")]
pub async fn about(views: web::Data<Views>, auth: Option<Authenticated>) -> HttpResponse {
    let user = auth.as_ref().map(|a| &a.user);
    views.render(
        "about.html",
        &page_context("من نحن", user, &FlashQuery::default()),
    )
}

fn message_page(views: &Views, title: &str, message: &str) -> HttpResponse {
    let mut context = page_context(title, None, &FlashQuery::default());
    context.insert("message", message);
    views.render("message.html", &context)
}

#[get("/pending_approval")]
pub async fn pending_approval(views: web::Data<Views>) -> HttpResponse {
    message_page(
        &views,
        "تم التسجيل",
        "شكراً لتسجيلك. سيتم مراجعة طلبك قريباً.",
    )
}

#[get("/unapproved_login")]
pub async fn unapproved_login(views: web::Data<Views>) -> HttpResponse {
    message_page(
        &views,
        "لم يتم التحقق",
        "حسابك لم يتم الموافقة عليه بعد. يرجى المحاولة لاحقاً.",
    )
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(index)
        .service(about)
        .service(pending_approval)
        .service(unapproved_login);
}
