//! PRO request model

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use crate::utils::errors::GameBotError;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProRequest {
    pub id: i64,
    pub user_id: i64,
    pub status: String,
    pub requested_at: DateTime<Utc>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub admin_note: Option<String>,
    pub reviewed_by: Option<i64>,
}

impl ProRequest {
    /// Parsed status; unknown values are treated as terminal
    pub fn status(&self) -> ProRequestStatus {
        self.status.parse().unwrap_or(ProRequestStatus::Rejected)
    }
}

/// Request joined with the requester's contact details, for the admin panel
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProRequestView {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub phone: String,
    pub status: String,
    pub requested_at: DateTime<Utc>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub admin_note: Option<String>,
    pub reviewed_by: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProRequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl ProRequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProRequestStatus::Pending => "pending",
            ProRequestStatus::Approved => "approved",
            ProRequestStatus::Rejected => "rejected",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, ProRequestStatus::Pending)
    }
}

impl fmt::Display for ProRequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProRequestStatus {
    type Err = GameBotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ProRequestStatus::Pending),
            "approved" => Ok(ProRequestStatus::Approved),
            "rejected" => Ok(ProRequestStatus::Rejected),
            other => Err(GameBotError::InvalidInput(format!("Unknown request status: {}", other))),
        }
    }
}

/// Admin decision on a pending request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Approve,
    Reject,
}

impl Decision {
    /// Status the request moves to
    pub fn target_status(&self) -> ProRequestStatus {
        match self {
            Decision::Approve => ProRequestStatus::Approved,
            Decision::Reject => ProRequestStatus::Rejected,
        }
    }

    /// Audit log action tag
    pub fn audit_action(&self) -> &'static str {
        match self {
            Decision::Approve => "approve_pro",
            Decision::Reject => "reject_pro",
        }
    }
}

impl FromStr for Decision {
    type Err = GameBotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "approve" => Ok(Decision::Approve),
            "reject" => Ok(Decision::Reject),
            other => Err(GameBotError::InvalidInput(format!(
                "Unknown action '{}', expected 'approve' or 'reject'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecideRequest {
    pub request_id: i64,
    pub admin_id: i64,
    pub decision: Decision,
    pub note: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for status in [ProRequestStatus::Pending, ProRequestStatus::Approved, ProRequestStatus::Rejected] {
            assert_eq!(status.as_str().parse::<ProRequestStatus>().unwrap(), status);
        }
        assert!("cancelled".parse::<ProRequestStatus>().is_err());
    }

    #[test]
    fn test_terminal_states() {
        assert!(!ProRequestStatus::Pending.is_terminal());
        assert!(ProRequestStatus::Approved.is_terminal());
        assert!(ProRequestStatus::Rejected.is_terminal());
    }

    #[test]
    fn test_decision_parsing() {
        assert_eq!("approve".parse::<Decision>().unwrap(), Decision::Approve);
        assert_eq!(" Reject ".parse::<Decision>().unwrap(), Decision::Reject);
        assert!("ban".parse::<Decision>().is_err());
    }

    #[test]
    fn test_decision_mapping() {
        assert_eq!(Decision::Approve.target_status(), ProRequestStatus::Approved);
        assert_eq!(Decision::Approve.audit_action(), "approve_pro");
        assert_eq!(Decision::Reject.target_status(), ProRequestStatus::Rejected);
        assert_eq!(Decision::Reject.audit_action(), "reject_pro");
    }
}
