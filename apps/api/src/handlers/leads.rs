use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use leadline_domain::LeadId;

use crate::dto::{
    CaptureLeadRequest, LeadListQuery, LeadResponse, LeadStatsResponse, UpdateLeadRequest,
};
use crate::error::ApiResult;
use crate::middleware::RequestCaller;
use crate::state::AppState;

/// Public lead capture from the website form.
pub async fn capture_lead_handler(
    State(state): State<AppState>,
    payload: Result<Json<CaptureLeadRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<LeadResponse>)> {
    let Json(request) = payload?;
    let lead = state
        .lead_service
        .capture_lead(&request.email, request.service_interest.as_deref())
        .await?;

    Ok((StatusCode::CREATED, Json(lead.into())))
}

pub async fn list_leads_handler(
    State(state): State<AppState>,
    Extension(caller): Extension<RequestCaller>,
    query: Result<Query<LeadListQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<LeadResponse>>> {
    let Query(query) = query?;
    let leads = state
        .lead_service
        .list_leads(caller.token(), query.into_query()?)
        .await?;

    Ok(Json(leads.into_iter().map(LeadResponse::from).collect()))
}

pub async fn lead_stats_handler(
    State(state): State<AppState>,
    Extension(caller): Extension<RequestCaller>,
) -> ApiResult<Json<LeadStatsResponse>> {
    let stats = state.lead_service.lead_stats(caller.token()).await?;
    Ok(Json(stats.into()))
}

pub async fn update_lead_handler(
    State(state): State<AppState>,
    Extension(caller): Extension<RequestCaller>,
    lead_id: Result<Path<String>, PathRejection>,
    payload: Result<Json<UpdateLeadRequest>, JsonRejection>,
) -> ApiResult<Json<LeadResponse>> {
    let Path(lead_id) = lead_id?;
    let Json(request) = payload?;

    let lead = state
        .lead_service
        .update_lead(
            caller.token(),
            LeadId::parse(&lead_id)?,
            request.into_update()?,
        )
        .await?;

    Ok(Json(lead.into()))
}

pub async fn delete_lead_handler(
    State(state): State<AppState>,
    Extension(caller): Extension<RequestCaller>,
    lead_id: Result<Path<String>, PathRejection>,
) -> ApiResult<StatusCode> {
    let Path(lead_id) = lead_id?;
    state
        .lead_service
        .delete_lead(caller.token(), LeadId::parse(&lead_id)?)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
