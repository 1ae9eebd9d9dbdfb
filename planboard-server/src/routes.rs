//! API route definitions

use crate::handlers;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::{Request, Response},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::Span;

/// One entry of the published route table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RouteInfo {
    pub method: &'static str,
    pub path: &'static str,
    pub status: u16,
    pub description: &'static str,
}

const fn route(
    method: &'static str,
    path: &'static str,
    status: u16,
    description: &'static str,
) -> RouteInfo {
    RouteInfo {
        method,
        path,
        status,
        description,
    }
}

/// Every route served, with its success status
pub const ROUTES: &[RouteInfo] = &[
    route("GET", "/api/python", 200, "Placeholder hello route"),
    route("POST", "/v1/admin/upload/plan-data", 201, "Upload plan data (multipart: file)"),
    route("POST", "/v1/admin/upload/advisor-data", 201, "Upload advisor data (multipart: file)"),
    route("POST", "/v1/admin/partner/", 201, "Create partner"),
    route("GET", "/v1/admin/partner/", 200, "List partners (?name, ?tier)"),
    route("POST", "/v1/admin/data-partner/", 201, "Create data partner"),
    route("GET", "/v1/admin/data-partner/", 200, "List data partners (?name)"),
    route("POST", "/v1/admin/plan/", 201, "Create plan"),
    route("GET", "/v1/admin/plan/", 200, "List plans (?name, ?external_id)"),
    route(
        "POST",
        "/v1/advisor/plan/",
        201,
        "Create advisor plan (multipart: plan_name, plan_details, plan_file)",
    ),
    route("GET", "/v1/advisor/plan/:plan_id", 200, "Advisor view of a plan"),
    route("GET", "/health/live", 200, "Liveness probe"),
    route("GET", "/health/ready", 200, "Readiness probe"),
    route("GET", "/metrics", 200, "Prometheus metrics"),
];

/// Creates the API router with all routes configured
pub fn create_router(state: AppState, upload_limit_bytes: usize) -> Router {
    Router::new()
        // Placeholder
        .route("/api/python", get(handlers::hello))
        // Admin API
        .nest("/v1/admin", admin_routes())
        // Advisor API
        .nest("/v1/advisor", advisor_routes())
        // Health checks
        .route("/health/live", get(handlers::health_live))
        .route("/health/ready", get(handlers::health_ready))
        // Metrics
        .route("/metrics", get(handlers::metrics))
        .with_state(state)
        .layer(DefaultBodyLimit::max(upload_limit_bytes))
        .layer(CompressionLayer::new())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<_>| crate::tracing::make_request_span(request))
                .on_response(|response: &Response<_>, latency: Duration, span: &Span| {
                    crate::tracing::record_response(response.status(), latency, span)
                }),
        )
}

fn admin_routes() -> Router<AppState> {
    Router::new()
        // Bulk uploads
        .route("/upload/plan-data", post(handlers::upload_plan_data))
        .route("/upload/advisor-data", post(handlers::upload_advisor_data))
        // Partners
        .route(
            "/partner/",
            post(handlers::create_partner).get(handlers::list_partners),
        )
        // Data partners
        .route(
            "/data-partner/",
            post(handlers::create_data_partner).get(handlers::list_data_partners),
        )
        // Plans
        .route("/plan/", post(handlers::create_plan).get(handlers::list_plans))
}

fn advisor_routes() -> Router<AppState> {
    Router::new()
        // An empty plan id still resolves
        .route(
            "/plan/",
            post(handlers::create_advisor_plan).get(handlers::get_advisor_plan),
        )
        .route("/plan/:plan_id", get(handlers::get_advisor_plan))
}

/// Log the route table
pub fn print_routes() {
    tracing::info!("Available API routes:");
    for route in ROUTES {
        tracing::info!("  {:<5} {:<36} - {}", route.method, route.path, route.description);
    }
}
