use leadline_application::{AssignedUser, RoleAssignmentOutcome, SetUserRoleInput};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use ts_rs::TS;

/// Incoming payload for the set-user-role function.
///
/// Both fields are optional on the wire so missing values surface as
/// `invalid-argument` instead of a deserialization failure.
#[derive(Debug, Default, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/set-user-role-request.ts"
)]
pub struct SetUserRoleRequest {
    #[serde(default, deserialize_with = "lenient_string")]
    #[ts(optional)]
    pub uid: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    #[ts(optional)]
    pub role: Option<String>,
}

impl From<SetUserRoleRequest> for SetUserRoleInput {
    fn from(value: SetUserRoleRequest) -> Self {
        Self {
            uid: value.uid,
            role: value.role,
        }
    }
}

/// Accepts any JSON value. Anything but a string is treated as absent so it
/// fails the presence check rather than the body parser.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(value)) => Some(value),
        _ => None,
    })
}

/// User projection returned by the set-user-role function.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/assigned-user-response.ts"
)]
pub struct AssignedUserResponse {
    pub uid: String,
    pub email: Option<String>,
    pub role: String,
}

impl From<AssignedUser> for AssignedUserResponse {
    fn from(value: AssignedUser) -> Self {
        Self {
            uid: value.uid,
            email: value.email,
            role: value.role.as_str().to_owned(),
        }
    }
}

/// Response payload for the set-user-role function.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/set-user-role-response.ts"
)]
pub struct SetUserRoleResponse {
    pub success: bool,
    pub message: String,
    pub user: AssignedUserResponse,
}

impl From<RoleAssignmentOutcome> for SetUserRoleResponse {
    fn from(value: RoleAssignmentOutcome) -> Self {
        Self {
            success: value.success,
            message: value.message,
            user: value.user.into(),
        }
    }
}
