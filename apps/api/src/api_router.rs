mod cors;

use axum::Router;
use axum::middleware::from_fn;
use axum::routing::{get, patch, post};
use leadline_core::AppError;
use tower_http::trace::TraceLayer;

use crate::state::AppState;
use crate::{handlers, middleware};

use self::cors::build_cors_layer;

pub fn build_router(app_state: AppState, frontend_url: &str) -> Result<Router, AppError> {
    let api_routes = Router::new()
        .route(
            "/api/functions/set-user-role",
            post(handlers::functions::set_user_role_handler),
        )
        .route("/api/contact", post(handlers::contact::contact_handler))
        .route(
            "/api/leads",
            get(handlers::leads::list_leads_handler).post(handlers::leads::capture_lead_handler),
        )
        .route("/api/leads/stats", get(handlers::leads::lead_stats_handler))
        .route(
            "/api/leads/{lead_id}",
            patch(handlers::leads::update_lead_handler).delete(handlers::leads::delete_lead_handler),
        )
        .route(
            "/api/audit-logs",
            get(handlers::audit::list_audit_log_handler),
        )
        .route_layer(from_fn(middleware::attach_caller));

    Ok(Router::new()
        .route("/health", get(handlers::health::health_handler))
        .merge(api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer(frontend_url)?)
        .with_state(app_state))
}
