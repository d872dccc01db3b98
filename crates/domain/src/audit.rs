use std::str::FromStr;

use leadline_core::AppError;
use serde::{Deserialize, Serialize};

/// Audit verbs. Restricted to CRUD plus session events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    /// A resource was created.
    Create,
    /// A resource was read.
    Read,
    /// A resource was changed.
    Update,
    /// A resource was removed.
    Delete,
    /// A user signed in.
    Login,
    /// A user signed out.
    Logout,
}

impl AuditAction {
    /// Returns a stable storage value for this action.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Read => "read",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Login => "login",
            Self::Logout => "logout",
        }
    }
}

impl FromStr for AuditAction {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "create" => Ok(Self::Create),
            "read" => Ok(Self::Read),
            "update" => Ok(Self::Update),
            "delete" => Ok(Self::Delete),
            "login" => Ok(Self::Login),
            "logout" => Ok(Self::Logout),
            _ => Err(AppError::InvalidArgument(format!(
                "unknown audit action '{value}'"
            ))),
        }
    }
}

/// Outcome recorded on an audit entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditStatus {
    /// The audited action completed.
    Success,
    /// The audited action failed.
    Error,
}

impl AuditStatus {
    /// Returns a stable storage value for this status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

impl FromStr for AuditStatus {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "success" => Ok(Self::Success),
            "error" => Ok(Self::Error),
            _ => Err(AppError::InvalidArgument(format!(
                "unknown audit status '{value}'"
            ))),
        }
    }
}

/// Actor role recorded when the caller's role is not known or not trusted.
pub const UNKNOWN_ACTOR_ROLE: &str = "unknown";

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::{AuditAction, AuditStatus};

    #[test]
    fn action_roundtrip_storage_value() {
        for action in [
            AuditAction::Create,
            AuditAction::Read,
            AuditAction::Update,
            AuditAction::Delete,
            AuditAction::Login,
            AuditAction::Logout,
        ] {
            assert_eq!(AuditAction::from_str(action.as_str()).ok(), Some(action));
        }
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert!(AuditStatus::from_str("pending").is_err());
    }
}
