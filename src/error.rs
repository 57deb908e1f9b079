//! Domain error types for the CRDA workflow server.
//!
//! Uses thiserror for ergonomic error handling with automatic Display implementations.
//! Page routes turn errors into `?error=<code>` redirects through [`AppError::code`];
//! API routes rely on the [`ResponseError`] impl which renders a JSON body.

use actix_web::http::{StatusCode, header};
use actix_web::{HttpResponse, ResponseError};
use sea_orm::DbErr;
use std::fmt;

/// Application-level errors.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Unknown email or wrong password
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Credentials are valid but a directeur has not approved the account yet
    #[error("Account is not approved yet")]
    AccountNotApproved,

    /// Stored role is not one of the known roles
    #[error("Account has an unknown role")]
    InvalidRole,

    /// Registration email outside the organization domain
    #[error("Email must belong to the organization domain")]
    InvalidDomain,

    /// Registration form is incomplete
    #[error("All registration fields are required")]
    MissingFields,

    /// Email or national id already registered
    #[error("An account with this email or national id already exists")]
    DuplicateAccount,

    /// Report form without cin or subject
    #[error("cin and subject are required")]
    MissingRequiredFields,

    /// Resource not found
    #[error("{0} not found")]
    NotFound(String),

    /// Decision outside the accepted/rejected pair
    #[error("Invalid result status")]
    InvalidStatus,

    /// Database operation failed
    #[error("Database error: {0}")]
    Database(String),

    /// Database cannot hand out a connection
    #[error("Database unavailable: {0}")]
    Unavailable(String),

    /// No valid session
    #[error("Not logged in")]
    NotLoggedIn,

    /// Session role lacks the capability for this route
    #[error("Unauthorized")]
    Unauthorized,

    /// Anything else that should never happen
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Query-string code used when a page route redirects on failure.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidCredentials => "invalid_credentials",
            AppError::AccountNotApproved => "unapproved",
            AppError::InvalidRole => "invalid_role",
            AppError::InvalidDomain => "invalid_domain",
            AppError::MissingFields => "missing_fields",
            AppError::DuplicateAccount => "exists",
            AppError::MissingRequiredFields => "missing_required_fields",
            AppError::NotFound(_) => "not_found",
            AppError::InvalidStatus => "invalid_status",
            AppError::Database(_) | AppError::Unavailable(_) => "database_error",
            AppError::NotLoggedIn => "not_logged_in",
            AppError::Unauthorized => "unauthorized",
            AppError::Internal(_) => "server_error",
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotLoggedIn | AppError::Unauthorized => StatusCode::FOUND,
            AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::AccountNotApproved | AppError::InvalidRole => StatusCode::FORBIDDEN,
            AppError::InvalidDomain
            | AppError::MissingFields
            | AppError::MissingRequiredFields
            | AppError::InvalidStatus => StatusCode::BAD_REQUEST,
            AppError::DuplicateAccount => StatusCode::CONFLICT,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        // Role gates answer with a redirect to the login page, not a 401/403.
        if matches!(self, AppError::NotLoggedIn | AppError::Unauthorized) {
            return HttpResponse::Found()
                .append_header((header::LOCATION, format!("/login?error={}", self.code())))
                .finish();
        }

        let message = match self {
            AppError::Database(err_str) => {
                tracing::error!("Database error: {}", err_str);
                "An internal database error occurred".to_string()
            }
            AppError::Unavailable(err_str) => {
                tracing::error!("Database unavailable: {}", err_str);
                "Database not ready".to_string()
            }
            AppError::Internal(err_str) => {
                tracing::error!("Internal error: {}", err_str);
                "An unexpected error occurred".to_string()
            }
            _ => self.to_string(),
        };

        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.code().to_uppercase(),
            message,
        })
    }
}

/// Error response body matching OpenAPI schema.
#[derive(Debug, serde::Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        match err {
            DbErr::ConnectionAcquire(_) | DbErr::Conn(_) => AppError::Unavailable(err.to_string()),
            other => AppError::Database(other.to_string()),
        }
    }
}

impl From<tera::Error> for AppError {
    fn from(err: tera::Error) -> Self {
        AppError::Internal(format!("Template error: {}", err))
    }
}
