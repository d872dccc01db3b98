use std::str::FromStr;

use leadline_core::AppError;
use serde::{Deserialize, Serialize};

/// Named privilege level attached to a user identity through custom claims.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Read-only access to captured leads.
    Viewer,
    /// Read access to leads, users and the audit trail.
    Auditor,
    /// Full administrative access.
    Admin,
}

impl Role {
    /// Role assumed when a user carries no role claim.
    pub const DEFAULT: Self = Self::Viewer;

    /// Returns the stable wire value for this role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Viewer => "viewer",
            Self::Auditor => "auditor",
            Self::Admin => "admin",
        }
    }

    /// Returns all known roles.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[Role] = &[Role::Viewer, Role::Auditor, Role::Admin];

        ALL
    }

    /// Returns the fixed permission set granted to this role.
    #[must_use]
    pub fn permissions(&self) -> &'static [Permission] {
        permissions_for(*self)
    }

    /// Returns whether this role grants the permission.
    #[must_use]
    pub fn grants(&self, permission: Permission) -> bool {
        self.permissions().contains(&permission)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AppError;

    /// Exact, case-sensitive match; no trimming.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "viewer" => Ok(Self::Viewer),
            "auditor" => Ok(Self::Auditor),
            "admin" => Ok(Self::Admin),
            _ => Err(AppError::InvalidArgument("Invalid role".to_owned())),
        }
    }
}

/// Returns true iff `value` is exactly one of the known role names.
#[must_use]
pub fn is_valid_role(value: &str) -> bool {
    Role::from_str(value).is_ok()
}

/// Capability strings carried in custom claims.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Permission {
    /// Allows reading captured leads.
    #[serde(rename = "leads:read")]
    LeadsRead,
    /// Allows updating captured leads.
    #[serde(rename = "leads:write")]
    LeadsWrite,
    /// Allows deleting captured leads.
    #[serde(rename = "leads:delete")]
    LeadsDelete,
    /// Allows reading user records.
    #[serde(rename = "users:read")]
    UsersRead,
    /// Allows changing user records and roles.
    #[serde(rename = "users:write")]
    UsersWrite,
    /// Allows reading the audit trail.
    #[serde(rename = "audit:read")]
    AuditRead,
    /// Allows changing site configuration.
    #[serde(rename = "config:write")]
    ConfigWrite,
}

impl Permission {
    /// Returns a stable storage value for this permission.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LeadsRead => "leads:read",
            Self::LeadsWrite => "leads:write",
            Self::LeadsDelete => "leads:delete",
            Self::UsersRead => "users:read",
            Self::UsersWrite => "users:write",
            Self::AuditRead => "audit:read",
            Self::ConfigWrite => "config:write",
        }
    }
}

impl FromStr for Permission {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "leads:read" => Ok(Self::LeadsRead),
            "leads:write" => Ok(Self::LeadsWrite),
            "leads:delete" => Ok(Self::LeadsDelete),
            "users:read" => Ok(Self::UsersRead),
            "users:write" => Ok(Self::UsersWrite),
            "audit:read" => Ok(Self::AuditRead),
            "config:write" => Ok(Self::ConfigWrite),
            _ => Err(AppError::InvalidArgument(format!(
                "unknown permission value '{value}'"
            ))),
        }
    }
}

const ADMIN_PERMISSIONS: &[Permission] = &[
    Permission::LeadsRead,
    Permission::LeadsWrite,
    Permission::LeadsDelete,
    Permission::UsersRead,
    Permission::UsersWrite,
    Permission::AuditRead,
    Permission::ConfigWrite,
];

const AUDITOR_PERMISSIONS: &[Permission] = &[
    Permission::LeadsRead,
    Permission::AuditRead,
    Permission::UsersRead,
];

const VIEWER_PERMISSIONS: &[Permission] = &[Permission::LeadsRead];

/// Fixed permission table. Each role lists its grants explicitly; roles do not
/// inherit from each other.
#[must_use]
pub fn permissions_for(role: Role) -> &'static [Permission] {
    match role {
        Role::Admin => ADMIN_PERMISSIONS,
        Role::Auditor => AUDITOR_PERMISSIONS,
        Role::Viewer => VIEWER_PERMISSIONS,
    }
}

/// Looks up permissions by raw role name. Unknown names yield an empty set.
#[must_use]
pub fn permissions_for_role_name(role_name: &str) -> &'static [Permission] {
    Role::from_str(role_name)
        .map(permissions_for)
        .unwrap_or(&[])
}
