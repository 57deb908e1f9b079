//! Signed session cookies.
//!
//! The cookie carries an HS256 JWT whose `sub` is the id of a row in the
//! `sessions` table. The signature keeps the identity claims tamper-proof;
//! the row lets logout revoke the session before the token expires.

use actix_web::cookie::time::Duration as CookieDuration;
use actix_web::cookie::{Cookie, SameSite};
use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::config::{MAX_SESSION_TTL_SECS, SessionSettings};
use crate::error::{AppError, AppResult};
use crate::models::{Role, SessionUser};

/// Session cookie name.
pub const SESSION_COOKIE: &str = "crda_session";
/// Session JWT issuer.
pub const SESSION_ISSUER: &str = "crda";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Session row id
    pub sub: String,
    pub iss: String,
    pub exp: usize,
    pub iat: usize,
    pub user_id: i32,
    pub email: String,
    pub role: String,
    pub nom: String,
    pub prenom: String,
}

impl SessionClaims {
    /// Identity carried by the claims. `None` if the role is unknown.
    pub fn user(&self) -> Option<SessionUser> {
        Some(SessionUser {
            id: self.user_id,
            email_user: self.email.clone(),
            role_user: Role::parse(&self.role)?,
            nom_user: self.nom.clone(),
            prenom_user: self.prenom.clone(),
        })
    }
}

/// Signs and checks session tokens, and builds the matching cookies.
#[derive(Clone)]
pub struct SessionKeys {
    secret: SecretString,
    ttl_secs: u64,
    secure: bool,
}

impl SessionKeys {
    /// `secure` marks cookies HTTPS-only; set it in production. The lifetime
    /// is capped at [`MAX_SESSION_TTL_SECS`].
    pub fn new(settings: &SessionSettings, secure: bool) -> Self {
        Self {
            secret: settings.secret.clone(),
            ttl_secs: settings.ttl_secs.min(MAX_SESSION_TTL_SECS),
            secure,
        }
    }

    /// When a session opened now should expire.
    pub fn expires_at(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now + chrono::Duration::seconds(self.ttl_secs as i64)
    }

    pub fn issue(&self, session_id: &str, user: &SessionUser) -> AppResult<String> {
        let now = Utc::now();
        let claims = SessionClaims {
            sub: session_id.to_string(),
            iss: SESSION_ISSUER.to_string(),
            exp: self.expires_at(now).timestamp() as usize,
            iat: now.timestamp() as usize,
            user_id: user.id,
            email: user.email_user.clone(),
            role: user.role_user.as_str().to_string(),
            nom: user.nom_user.clone(),
            prenom: user.prenom_user.clone(),
        };

        let key = EncodingKey::from_secret(self.secret.expose_secret().as_bytes());
        encode(&Header::default(), &claims, &key)
            .map_err(|e| AppError::Internal(format!("Failed to create session token: {}", e)))
    }

    /// Check signature, issuer and expiry.
    pub fn verify(&self, token: &str) -> Result<SessionClaims, String> {
        let key = DecodingKey::from_secret(self.secret.expose_secret().as_bytes());
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[SESSION_ISSUER]);
        validation.validate_aud = false;

        let token_data = decode::<SessionClaims>(token, &key, &validation)
            .map_err(|e| format!("Invalid session token: {}", e))?;

        Ok(token_data.claims)
    }

    pub fn cookie(&self, token: String) -> Cookie<'static> {
        let mut cookie = Cookie::new(SESSION_COOKIE, token);
        cookie.set_path("/");
        cookie.set_http_only(true);
        cookie.set_same_site(SameSite::Strict);
        cookie.set_secure(self.secure);
        cookie.set_max_age(CookieDuration::seconds(self.ttl_secs as i64));
        cookie
    }

    /// Expired cookie that clears the session on the client.
    pub fn removal_cookie(&self) -> Cookie<'static> {
        let mut cookie = Cookie::new(SESSION_COOKIE, "");
        cookie.set_path("/");
        cookie.set_http_only(true);
        cookie.set_same_site(SameSite::Strict);
        cookie.set_secure(self.secure);
        cookie.make_removal();
        cookie
    }
}
