use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;

use crate::dto::{ContactRequest, ContactResponse};
use crate::error::ApiResult;
use crate::state::AppState;

/// Public contact form relay.
pub async fn contact_handler(
    State(state): State<AppState>,
    payload: Result<Json<ContactRequest>, JsonRejection>,
) -> ApiResult<Json<ContactResponse>> {
    let Json(request) = payload?;
    let success = state
        .contact_service
        .send_contact_email(request.into())
        .await?;

    Ok(Json(ContactResponse { success }))
}
