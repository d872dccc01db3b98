use std::sync::Arc;

use leadline_core::{AppError, AppResult, CallerToken};
use leadline_domain::{Permission, Role};

use crate::IdentityStore;

/// Caller whose token was verified by the identity store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedCaller {
    /// Identity of the caller.
    pub uid: String,
    /// Email of the caller, when known.
    pub email: Option<String>,
    /// Role from the verified claims.
    pub role: Role,
}

impl VerifiedCaller {
    /// Returns whether the caller's role grants the permission.
    #[must_use]
    pub fn has_permission(&self, permission: Permission) -> bool {
        self.role.grants(permission)
    }
}

/// Application service for claims-based authorization checks.
///
/// Permissions are derived from the verified role through the permission
/// table; the `permissions` array stored in claims is never trusted.
#[derive(Clone)]
pub struct AuthorizationService {
    identity_store: Arc<dyn IdentityStore>,
}

impl AuthorizationService {
    /// Creates a new authorization service from an identity store.
    #[must_use]
    pub fn new(identity_store: Arc<dyn IdentityStore>) -> Self {
        Self { identity_store }
    }

    /// Verifies the caller token server-side.
    pub async fn resolve_caller(&self, token: Option<&CallerToken>) -> AppResult<VerifiedCaller> {
        let token =
            token.ok_or_else(|| AppError::Unauthenticated("Authentication required".to_owned()))?;
        let verified = self.identity_store.verify_token(token).await?;
        let role = verified.role();

        Ok(VerifiedCaller {
            uid: verified.uid,
            email: verified.email,
            role,
        })
    }

    /// Verifies the caller and ensures their role grants the permission.
    pub async fn require_permission(
        &self,
        token: Option<&CallerToken>,
        permission: Permission,
    ) -> AppResult<VerifiedCaller> {
        let caller = self.resolve_caller(token).await?;
        if !caller.has_permission(permission) {
            return Err(AppError::PermissionDenied(format!(
                "role '{}' is missing permission '{}'",
                caller.role,
                permission.as_str()
            )));
        }

        Ok(caller)
    }
}
