use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Extension, Query, State};

use crate::dto::{AuditLogEntryResponse, AuditLogListQuery};
use crate::error::ApiResult;
use crate::middleware::RequestCaller;
use crate::state::AppState;

pub async fn list_audit_log_handler(
    State(state): State<AppState>,
    Extension(caller): Extension<RequestCaller>,
    query: Result<Query<AuditLogListQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<AuditLogEntryResponse>>> {
    let Query(query) = query?;
    let entries = state
        .audit_log_service
        .list_audit_log(caller.token(), query.into_query()?)
        .await?;

    Ok(Json(
        entries
            .into_iter()
            .map(AuditLogEntryResponse::from)
            .collect(),
    ))
}
