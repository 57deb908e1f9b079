//! Account models: roles, approval status, login/registration forms.

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Staff role. Each role owns one slice of the workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Registers citizen service requests
    ChefDentreprise,
    /// Files inspection reports
    Gerant,
    /// Records final decisions and approves accounts
    Directeur,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::ChefDentreprise, Role::Gerant, Role::Directeur];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ChefDentreprise => "chef_dentreprise",
            Self::Gerant => "gerant",
            Self::Directeur => "directeur",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "chef_dentreprise" => Some(Self::ChefDentreprise),
            "gerant" => Some(Self::Gerant),
            "directeur" => Some(Self::Directeur),
            _ => None,
        }
    }

    /// Page a freshly logged-in user lands on.
    pub fn landing_path(&self) -> &'static str {
        match self {
            Self::ChefDentreprise => "/getservices",
            Self::Gerant => "/getreports",
            Self::Directeur => "/results",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Account approval state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountStatus {
    Pending,
    Approved,
}

impl AccountStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            _ => None,
        }
    }
}

/// Identity stored in the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionUser {
    pub id: i32,
    pub email_user: String,
    pub role_user: Role,
    pub nom_user: String,
    pub prenom_user: String,
}

impl SessionUser {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.prenom_user, self.nom_user)
    }
}

/// Login form body.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email_user: Option<String>,
    pub password_user: Option<String>,
}

/// Registration form body. All fields are optional at the wire level so a
/// missing field becomes `MissingFields` instead of a deserialization error.
#[derive(Debug, Default, Deserialize)]
pub struct RegisterForm {
    pub email_user: Option<String>,
    pub password_user: Option<String>,
    pub role_user: Option<String>,
    pub nom_user: Option<String>,
    pub prenom_user: Option<String>,
    pub sex_user: Option<String>,
    pub cin_user: Option<String>,
}

/// Registration that passed form validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub email_user: String,
    pub password_user: String,
    pub role_user: Role,
    pub nom_user: String,
    pub prenom_user: String,
    pub sex_user: String,
    pub cin_user: String,
}

impl RegisterForm {
    /// Validate the form. The domain check runs first, then completeness.
    pub fn validate(self, org_email_domain: &str) -> AppResult<Registration> {
        let email = self.email_user.as_deref().map(str::trim).unwrap_or_default();
        if !email.ends_with(org_email_domain) {
            return Err(AppError::InvalidDomain);
        }

        let required = |value: Option<String>| -> AppResult<String> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or(AppError::MissingFields)
        };

        let password_user = self
            .password_user
            .filter(|p| !p.is_empty())
            .ok_or(AppError::MissingFields)?;
        let role_user = required(self.role_user)?;
        let role_user = Role::parse(&role_user).ok_or(AppError::MissingFields)?;

        Ok(Registration {
            email_user: email.to_string(),
            password_user,
            role_user,
            nom_user: required(self.nom_user)?,
            prenom_user: required(self.prenom_user)?,
            sex_user: required(self.sex_user)?,
            cin_user: required(self.cin_user)?,
        })
    }
}

/// Row shown on the pending-accounts admin page.
#[derive(Debug, Clone, Serialize)]
pub struct PendingAccount {
    pub id: i32,
    pub email_user: String,
    pub nom_user: String,
    pub prenom_user: String,
    pub role_user: String,
}
