use std::str::FromStr;
use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use tracing::{error, info, warn};

use leadline_core::{AppError, AppResult, CallerToken};
use leadline_domain::{AuditAction, AuditStatus, ClaimsRecord, Role, UNKNOWN_ACTOR_ROLE};

use crate::{AuditEvent, AuditRepository, IdentityStore};

/// Raw role assignment request as received at the boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetUserRoleInput {
    /// Target user identifier.
    pub uid: Option<String>,
    /// Requested role name.
    pub role: Option<String>,
}

/// User projection returned after a successful assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignedUser {
    /// Target user identifier.
    pub uid: String,
    /// Target user email.
    pub email: Option<String>,
    /// Newly assigned role.
    pub role: Role,
}

/// Successful role assignment outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleAssignmentOutcome {
    /// Always `true`; failures are returned as errors.
    pub success: bool,
    /// Human-readable confirmation.
    pub message: String,
    /// Updated user.
    pub user: AssignedUser,
}

/// What is known about the caller at the moment the workflow fails.
#[derive(Debug, Default)]
struct KnownActor {
    uid: Option<String>,
    email: Option<String>,
}

/// Application service that assigns roles through identity-store custom claims.
#[derive(Clone)]
pub struct RoleAssignmentService {
    identity_store: Arc<dyn IdentityStore>,
    audit_repository: Arc<dyn AuditRepository>,
}

impl RoleAssignmentService {
    /// Creates a new service from required dependencies.
    #[must_use]
    pub fn new(
        identity_store: Arc<dyn IdentityStore>,
        audit_repository: Arc<dyn AuditRepository>,
    ) -> Self {
        Self {
            identity_store,
            audit_repository,
        }
    }

    /// Assigns `input.role` to `input.uid` on behalf of an admin caller.
    ///
    /// Input checks fail fast without touching any store. Once input is valid,
    /// every invocation appends exactly one audit entry: `success` after the
    /// claims write, or `error` when any later step fails.
    pub async fn set_user_role(
        &self,
        caller: Option<&CallerToken>,
        input: SetUserRoleInput,
    ) -> AppResult<RoleAssignmentOutcome> {
        let caller =
            caller.ok_or_else(|| AppError::Unauthenticated("Authentication required".to_owned()))?;

        let (Some(uid), Some(role_name)) = (
            input.uid.filter(|value| !value.is_empty()),
            input.role.filter(|value| !value.is_empty()),
        ) else {
            return Err(AppError::InvalidArgument("Missing uid or role".to_owned()));
        };

        let role = Role::from_str(&role_name)?;

        let mut actor = KnownActor::default();
        match self.assign(caller, &uid, role, &mut actor).await {
            Ok(outcome) => Ok(outcome),
            Err(failure) => {
                self.record_failure(&uid, &actor, &failure).await;
                Err(surface(failure))
            }
        }
    }

    async fn assign(
        &self,
        caller: &CallerToken,
        uid: &str,
        role: Role,
        actor: &mut KnownActor,
    ) -> AppResult<RoleAssignmentOutcome> {
        let verified = self.identity_store.verify_token(caller).await?;
        actor.uid = Some(verified.uid.clone());
        actor.email = verified.email.clone();

        if verified.role_claim() != Some(Role::Admin.as_str()) {
            return Err(AppError::PermissionDenied(
                "Only admins can set roles".to_owned(),
            ));
        }

        let (user, current_claims) = tokio::try_join!(
            self.identity_store.get_user(uid),
            self.identity_store.get_custom_claims(uid),
        )?;
        let previous_role = current_claims
            .as_ref()
            .and_then(|claims| claims.get("role"))
            .and_then(|value| value.as_str())
            .unwrap_or(Role::DEFAULT.as_str())
            .to_owned();

        let claims =
            ClaimsRecord::for_assignment(role, user.email.clone(), verified.uid.clone(), Utc::now());
        self.identity_store.set_custom_claims(uid, &claims).await?;

        self.audit_repository
            .append_event(AuditEvent {
                action: AuditAction::Update,
                resource: user_resource(uid),
                resource_id: uid.to_owned(),
                resource_type: "user".to_owned(),
                before: Some(json!({ "role": previous_role })),
                after: Some(json!({ "role": role.as_str() })),
                actor_id: Some(verified.uid.clone()),
                actor_email: verified.email.clone(),
                actor_role: verified.role().as_str().to_owned(),
                status: AuditStatus::Success,
                error: None,
            })
            .await?;

        info!(
            target_uid = uid,
            actor_uid = verified.uid.as_str(),
            previous_role = previous_role.as_str(),
            role = role.as_str(),
            "role assigned"
        );

        let label = user.email.as_deref().unwrap_or(uid);
        Ok(RoleAssignmentOutcome {
            success: true,
            message: format!("Role {role} set for {label}"),
            user: AssignedUser {
                uid: uid.to_owned(),
                email: user.email,
                role,
            },
        })
    }

    /// Best-effort failure audit. A failed write is logged and never replaces
    /// the original error.
    async fn record_failure(&self, uid: &str, actor: &KnownActor, failure: &AppError) {
        warn!(
            target_uid = uid,
            actor_uid = actor.uid.as_deref().unwrap_or(UNKNOWN_ACTOR_ROLE),
            error = %failure,
            "role assignment failed"
        );

        let event = AuditEvent {
            action: AuditAction::Update,
            resource: user_resource(uid),
            resource_id: uid.to_owned(),
            resource_type: "user".to_owned(),
            before: None,
            after: None,
            actor_id: actor.uid.clone(),
            actor_email: actor.email.clone(),
            actor_role: UNKNOWN_ACTOR_ROLE.to_owned(),
            status: AuditStatus::Error,
            error: Some(failure.message().to_owned()),
        };

        if let Err(audit_error) = self.audit_repository.append_event(event).await {
            error!(
                target_uid = uid,
                error = %audit_error,
                original_error = %failure,
                "failed to record role assignment failure in audit log"
            );
        }
    }
}

fn user_resource(uid: &str) -> String {
    format!("users/{uid}")
}

/// Maps a failure inside the audited scope to the kind returned to callers.
fn surface(failure: AppError) -> AppError {
    match failure {
        AppError::Unauthenticated(_) | AppError::PermissionDenied(_) => failure,
        other => AppError::Internal(other.message().to_owned()),
    }
}
