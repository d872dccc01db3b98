use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Extension, State};
use leadline_application::SetUserRoleInput;
use tracing::warn;

use crate::dto::{SetUserRoleRequest, SetUserRoleResponse};
use crate::error::ApiResult;
use crate::middleware::RequestCaller;
use crate::state::AppState;

/// Callable endpoint that assigns a role to a user.
///
/// An unreadable body is treated as an empty request so the caller check
/// still runs first.
pub async fn set_user_role_handler(
    State(state): State<AppState>,
    Extension(caller): Extension<RequestCaller>,
    payload: Result<Json<SetUserRoleRequest>, JsonRejection>,
) -> ApiResult<Json<SetUserRoleResponse>> {
    let input = match payload {
        Ok(Json(request)) => SetUserRoleInput::from(request),
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "unreadable set-user-role body");
            SetUserRoleInput::default()
        }
    };

    let outcome = state
        .role_assignment_service
        .set_user_role(caller.token(), input)
        .await?;

    Ok(Json(outcome.into()))
}
