//! Server-rendered HTML pages.
//!
//! Templates are compiled into the binary and loaded into a single [`Tera`]
//! instance at startup. Rendering never fails from a handler's point of view:
//! a template error is logged and answered with a bare 500 page.

use std::collections::HashMap;

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use serde_json::Value;
use tera::{Context, Tera};
use tracing::error;

use crate::models::{Decision, FlashQuery, SessionUser};

/// Every page template, keyed by the name handlers render it by.
const TEMPLATES: &[(&str, &str)] = &[
    ("base.html", include_str!("../templates/base.html")),
    ("index.html", include_str!("../templates/index.html")),
    ("about.html", include_str!("../templates/about.html")),
    ("login.html", include_str!("../templates/login.html")),
    ("register.html", include_str!("../templates/register.html")),
    ("message.html", include_str!("../templates/message.html")),
    ("error.html", include_str!("../templates/error.html")),
    ("check_status.html", include_str!("../templates/check_status.html")),
    ("services/new.html", include_str!("../templates/services/new.html")),
    ("services/list.html", include_str!("../templates/services/list.html")),
    ("services/edit.html", include_str!("../templates/services/edit.html")),
    ("reports/form.html", include_str!("../templates/reports/form.html")),
    ("reports/list.html", include_str!("../templates/reports/list.html")),
    ("reports/edit.html", include_str!("../templates/reports/edit.html")),
    ("results/list.html", include_str!("../templates/results/list.html")),
    ("results/edit.html", include_str!("../templates/results/edit.html")),
    ("admin/pending.html", include_str!("../templates/admin/pending.html")),
];

const FALLBACK_500: &str = "<!doctype html><html><body><h1>500</h1></body></html>";

/// CSS classes for a decision badge.
fn status_class(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let class = match value.as_str().and_then(Decision::parse) {
        Some(Decision::Accepted) => "bg-green-100 text-green-800 border-green-200",
        Some(Decision::Rejected) => "bg-red-100 text-red-800 border-red-200",
        None => "bg-gray-100 text-gray-800 border-gray-200",
    };
    Ok(Value::String(class.to_string()))
}

pub struct Views {
    tera: Tera,
    show_error_details: bool,
}

impl Views {
    /// Load all templates. `show_error_details` exposes error text on 500
    /// pages and must be off in production.
    pub fn new(show_error_details: bool) -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        tera.add_raw_templates(TEMPLATES.iter().copied())?;
        tera.register_filter("status_class", status_class);

        Ok(Self {
            tera,
            show_error_details,
        })
    }

    pub fn render(&self, template: &str, context: &Context) -> HttpResponse {
        self.render_with_status(StatusCode::OK, template, context)
    }

    pub fn render_with_status(
        &self,
        status: StatusCode,
        template: &str,
        context: &Context,
    ) -> HttpResponse {
        match self.tera.render(template, context) {
            Ok(body) => HttpResponse::build(status)
                .content_type("text/html; charset=utf-8")
                .body(body),
            Err(e) => {
                error!("Failed to render {}: {:?}", template, e);
                HttpResponse::InternalServerError()
                    .content_type("text/html; charset=utf-8")
                    .body(FALLBACK_500)
            }
        }
    }

    pub fn not_found(&self) -> HttpResponse {
        let mut context = Context::new();
        context.insert("title", "404");
        context.insert("status", &404);
        context.insert("message", "الصفحة غير موجودة");
        self.render_with_status(StatusCode::NOT_FOUND, "error.html", &context)
    }

    /// Generic error page. `detail` is only shown outside production.
    pub fn server_error(&self, detail: &str) -> HttpResponse {
        let mut context = Context::new();
        context.insert("title", "500");
        context.insert("status", &500);
        context.insert("message", "حدث خطأ غير متوقع");
        if self.show_error_details {
            context.insert("detail", detail);
        }
        self.render_with_status(StatusCode::INTERNAL_SERVER_ERROR, "error.html", &context)
    }
}

/// Base context shared by every page: title, logged-in user, flash codes.
pub fn page_context(title: &str, user: Option<&SessionUser>, flash: &FlashQuery) -> Context {
    let mut context = Context::new();
    context.insert("title", title);
    if let Some(user) = user {
        context.insert("user", user);
        context.insert("user_name", &user.display_name());
        context.insert("user_role", user.role_user.as_str());
    }
    if let Some(error) = &flash.error {
        context.insert("error", error);
    }
    if let Some(success) = &flash.success {
        context.insert("success", success);
    }
    context
}
