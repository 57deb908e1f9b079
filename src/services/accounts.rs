//! Login, registration and session lifecycle.

use tracing::{info, warn};

use crate::auth::{CredentialVerifier, SessionKeys};
use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::{AccountStatus, LoginForm, RegisterForm, Role, SessionUser};

/// A session that was just opened: its row id and the signed cookie value.
#[derive(Debug)]
pub struct OpenedSession {
    pub session_id: String,
    pub token: String,
}

/// Check credentials and return the identity to store in the session.
///
/// The password is verified before the approval status, so an unapproved
/// account with a wrong password still reads as invalid credentials.
pub async fn authenticate(
    pool: &DbPool,
    verifier: &dyn CredentialVerifier,
    form: LoginForm,
) -> AppResult<SessionUser> {
    let email = form
        .email_user
        .as_deref()
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .ok_or(AppError::InvalidCredentials)?;
    let password = form
        .password_user
        .filter(|p| !p.is_empty())
        .ok_or(AppError::InvalidCredentials)?;

    let account = pool
        .find_account_by_email(email)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    if !verifier.verify(&password, &account.password_user) {
        return Err(AppError::InvalidCredentials);
    }

    if AccountStatus::parse(&account.status_user) != Some(AccountStatus::Approved) {
        return Err(AppError::AccountNotApproved);
    }

    let role = Role::parse(&account.role_user).ok_or_else(|| {
        warn!(
            "Account {} has unknown role '{}'",
            account.id, account.role_user
        );
        AppError::InvalidRole
    })?;

    Ok(SessionUser {
        id: account.id,
        email_user: account.email_user,
        role_user: role,
        nom_user: account.nom_user,
        prenom_user: account.prenom_user,
    })
}

/// Create a pending account. Returns its id.
pub async fn register(
    pool: &DbPool,
    verifier: &dyn CredentialVerifier,
    form: RegisterForm,
    org_email_domain: &str,
) -> AppResult<i32> {
    create_account(pool, verifier, form, org_email_domain, AccountStatus::Pending).await
}

/// Validate, check uniqueness, hash and insert an account with `status`.
pub async fn create_account(
    pool: &DbPool,
    verifier: &dyn CredentialVerifier,
    form: RegisterForm,
    org_email_domain: &str,
    status: AccountStatus,
) -> AppResult<i32> {
    let registration = form.validate(org_email_domain)?;

    if pool
        .account_exists(&registration.email_user, &registration.cin_user)
        .await?
    {
        return Err(AppError::DuplicateAccount);
    }

    let hash = verifier.hash(&registration.password_user)?;
    let id = pool.insert_account(&registration, hash, status).await?;

    info!(
        "Created {} {} account {} ({})",
        status.as_str(),
        registration.role_user,
        id,
        registration.email_user
    );
    Ok(id)
}

/// Persist a session row and sign a token pointing at it.
pub async fn open_session(
    pool: &DbPool,
    keys: &SessionKeys,
    user: &SessionUser,
) -> AppResult<OpenedSession> {
    let expires_at = keys.expires_at(chrono::Utc::now());
    let session_id = pool.insert_session(user.id, expires_at).await?;
    let token = keys.issue(&session_id, user)?;

    info!("User {} logged in as {}", user.id, user.role_user);
    Ok(OpenedSession { session_id, token })
}

/// Revoke a session. Failures are logged, never surfaced.
pub async fn close_session(pool: &DbPool, session_id: &str) -> bool {
    match pool.delete_session(session_id).await {
        Ok(removed) => removed,
        Err(e) => {
            warn!("Failed to delete session {}: {}", session_id, e);
            false
        }
    }
}
