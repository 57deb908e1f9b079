//! Authentication and authorization: password hashing, session tokens and
//! the role capability table.
//!
//! # Security
//! - Passwords are stored as Argon2 PHC strings, never in clear
//! - The session secret is wrapped in `SecretString` and never logged
//! - Every protected handler states the capability it needs through
//!   [`Authenticated::require`]

mod extractor;
mod session;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

pub use extractor::Authenticated;
pub use session::{SESSION_COOKIE, SessionClaims, SessionKeys};

use crate::error::{AppError, AppResult};
use crate::models::Role;

/// An action gated by role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Create, edit and delete service requests
    ManageServices,
    /// Create, edit and delete inspection reports
    ManageReports,
    /// Read reports
    ViewReports,
    /// Record and delete final decisions
    DecideResults,
    /// Approve or reject pending accounts
    ApproveAccounts,
}

impl Capability {
    pub fn allowed_roles(&self) -> &'static [Role] {
        match self {
            Self::ManageServices => &[Role::ChefDentreprise],
            Self::ManageReports => &[Role::Gerant],
            Self::ViewReports => &[Role::Gerant, Role::Directeur],
            Self::DecideResults | Self::ApproveAccounts => &[Role::Directeur],
        }
    }

    pub fn allows(&self, role: Role) -> bool {
        self.allowed_roles().contains(&role)
    }
}

/// Hashes and checks account passwords.
pub trait CredentialVerifier: Send + Sync {
    fn hash(&self, password: &str) -> AppResult<String>;

    /// `false` for a wrong password or an unparseable stored hash.
    fn verify(&self, password: &str, stored: &str) -> bool;
}

/// Argon2id with the crate's default parameters.
#[derive(Debug, Default, Clone, Copy)]
pub struct Argon2Verifier;

impl CredentialVerifier for Argon2Verifier {
    fn hash(&self, password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
    }

    fn verify(&self, password: &str, stored: &str) -> bool {
        match PasswordHash::new(stored) {
            Ok(parsed) => Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok(),
            Err(e) => {
                tracing::warn!("Stored password hash is not a PHC string: {}", e);
                false
            }
        }
    }
}
