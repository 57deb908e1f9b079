//! Request lifecycle stage derived from the three workflow tables.
//!
//! A request is `Created` until a report exists for its (cin, sujet) pair,
//! `Reported` until a decision is recorded, then `Resolved`. Nothing moves a
//! request backwards except deleting rows.

use serde::Serialize;

use super::decision::Decision;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Created,
    Reported,
    Resolved(Decision),
}

impl Stage {
    /// Derive the stage from report presence and the stored decision label.
    ///
    /// A decision without a report cannot exist under the schema's foreign
    /// key; if one shows up anyway the decision wins.
    pub fn derive(has_report: bool, statut: Option<&str>) -> Self {
        match (has_report, statut.and_then(Decision::parse)) {
            (_, Some(decision)) => Self::Resolved(decision),
            (true, None) => Self::Reported,
            (false, None) => Self::Created,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Reported => "reported",
            Self::Resolved(Decision::Accepted) => "accepted",
            Self::Resolved(Decision::Rejected) => "rejected",
        }
    }

    /// Arabic label shown to citizens and staff.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Created => "قيد الانتظار",
            Self::Reported => "قيد الدراسة",
            Self::Resolved(decision) => decision.as_str(),
        }
    }
}

/// Template-friendly view of a stage.
#[derive(Debug, Clone, Serialize)]
pub struct StageView {
    pub key: &'static str,
    pub label: &'static str,
}

impl From<Stage> for StageView {
    fn from(stage: Stage) -> Self {
        Self {
            key: stage.key(),
            label: stage.label(),
        }
    }
}
