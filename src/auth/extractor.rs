//! Actix-web extractor for session authentication.

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest, web};
use futures_util::future::LocalBoxFuture;
use tracing::{debug, error};

use super::session::{SESSION_COOKIE, SessionKeys};
use super::Capability;
use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::SessionUser;

/// Extractor that requires a live session.
///
/// Fails with [`AppError::NotLoggedIn`] (a redirect to the login page) when
/// the cookie is missing, badly signed, expired or revoked. A request
/// without a cookie never reaches the database.
///
/// ```ignore
/// async fn handler(auth: Authenticated) -> AppResult<HttpResponse> {
///     auth.require(Capability::ManageReports)?;
///     // ...
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Authenticated {
    pub user: SessionUser,
    pub session_id: String,
}

impl Authenticated {
    /// Fail with [`AppError::Unauthorized`] unless the session role holds `capability`.
    pub fn require(&self, capability: Capability) -> AppResult<()> {
        if capability.allows(self.user.role_user) {
            Ok(())
        } else {
            debug!(
                "Role {} denied {:?} for user {}",
                self.user.role_user, capability, self.user.id
            );
            Err(AppError::Unauthorized)
        }
    }
}

impl FromRequest for Authenticated {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let token = req.cookie(SESSION_COOKIE).map(|c| c.value().to_string());
        let keys = req.app_data::<web::Data<SessionKeys>>().cloned();
        let pool = req.app_data::<web::Data<DbPool>>().cloned();

        Box::pin(async move {
            let token = token
                .filter(|t| !t.is_empty())
                .ok_or(AppError::NotLoggedIn)?;

            let (keys, pool) = match (keys, pool) {
                (Some(keys), Some(pool)) => (keys, pool),
                _ => {
                    error!("Session keys or database pool missing from app data");
                    return Err(AppError::Internal(
                        "Internal configuration error".to_string(),
                    ));
                }
            };

            let claims = keys.verify(&token).map_err(|e| {
                debug!("Rejected session cookie: {}", e);
                AppError::NotLoggedIn
            })?;
            let user = claims.user().ok_or(AppError::NotLoggedIn)?;

            match pool.find_live_session(&claims.sub).await? {
                Some(session) if session.user_id == user.id => Ok(Authenticated {
                    user,
                    session_id: session.id,
                }),
                _ => Err(AppError::NotLoggedIn),
            }
        })
    }
}
