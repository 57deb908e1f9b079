//! Domain models for the CRDA workflow.

use serde::Deserialize;

pub mod account;
pub mod decision;
pub mod lifecycle;
pub mod report;
pub mod service;
pub mod status;

// Re-export commonly used types
pub use account::{
    AccountStatus, LoginForm, PendingAccount, RegisterForm, Registration, Role, SessionUser,
};
pub use decision::{Decision, DecisionRecord, ResultForm, ResultKey, ResultRow, ServiceDecision};
pub use lifecycle::{Stage, StageView};
pub use report::{NewReport, ReportDetails, ReportForm, ReportKeyQuery};
pub use service::{DocumentFlags, ServiceFields, ServiceForm, ServiceWithStatus};
pub use status::{CheckStatusForm, StatusRow, StatusView};

/// `?error=` / `?success=` flash codes carried by page redirects.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FlashQuery {
    pub error: Option<String>,
    pub success: Option<String>,
}
