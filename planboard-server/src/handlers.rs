//! HTTP request handlers

use crate::api::{
    DataPartnerQuery, HealthResponse, HealthStatus, MessageResponse, PartnerQuery, PlanQuery,
    QueryPairs,
};
use crate::error::{ApiError, ApiResult};
use crate::form::{FormError, MultipartForm};
use crate::metrics::{self, LatencyTimer};
use crate::state::AppState;
use axum::{
    extract::{
        multipart::{Multipart, MultipartRejection},
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::{StatusCode, Uri},
    Json,
};
use planboard_core::{
    AdvisorPlan, AdvisorPlanSubmission, CreatedPartner, DataPartner, NewDataPartner, NewPartner,
    NewPlan, Partner, Plan, Upload, UploadKind,
};
use percent_encoding::percent_decode_str;
use tracing::{debug, info, warn};

type Created<T> = (StatusCode, Json<T>);

/// Placeholder route used to check the API is up
pub async fn hello() -> Json<MessageResponse> {
    LatencyTimer::new("hello").record(StatusCode::OK.as_u16());
    Json(MessageResponse::new("Hello, World!"))
}

/// Handle a plan data upload
pub async fn upload_plan_data(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<Created<MessageResponse>> {
    accept_upload(&state, UploadKind::PlanData, multipart).await
}

/// Handle an advisor data upload
pub async fn upload_advisor_data(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<Created<MessageResponse>> {
    accept_upload(&state, UploadKind::AdvisorData, multipart).await
}

async fn accept_upload(
    state: &AppState,
    kind: UploadKind,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<Created<MessageResponse>> {
    let timer = LatencyTimer::new(match kind {
        UploadKind::PlanData => "upload_plan_data",
        UploadKind::AdvisorData => "upload_advisor_data",
    });

    let mut form = MultipartForm::read(multipart.map_err(FormError::from)?).await?;
    let file = form.take_file("file")?;

    let receipt = state.registry.accept_upload(Upload::new(kind, file))?;
    metrics::record_upload(kind.as_str(), receipt.size_bytes);

    info!(
        "Upload {}: {} bytes ({})",
        kind,
        receipt.size_bytes,
        receipt.file_name.as_deref().unwrap_or("unnamed")
    );

    timer.record(StatusCode::CREATED.as_u16());
    Ok((StatusCode::CREATED, Json(MessageResponse::new(receipt.message()))))
}

/// Create a partner
pub async fn create_partner(
    State(state): State<AppState>,
    payload: Result<Json<NewPartner>, JsonRejection>,
) -> ApiResult<Created<CreatedPartner>> {
    let timer = LatencyTimer::new("create_partner");
    let Json(request) = payload?;

    let partner = state.registry.create_partner(request)?;
    metrics::record_created("partner");
    info!("Partner created: {}", partner.id);

    timer.record(StatusCode::CREATED.as_u16());
    Ok((StatusCode::CREATED, Json(partner)))
}

/// List partners
pub async fn list_partners(
    State(state): State<AppState>,
    query: Result<Query<QueryPairs>, QueryRejection>,
) -> ApiResult<Json<Vec<Partner>>> {
    let timer = LatencyTimer::new("list_partners");
    let Query(pairs) = query?;
    let query = PartnerQuery::from_pairs(pairs);
    debug!("Partner query: {:?}", query);

    let partners = state.registry.list_partners(&query.into())?;

    timer.record(StatusCode::OK.as_u16());
    Ok(Json(partners))
}

/// Create a data partner
pub async fn create_data_partner(
    State(state): State<AppState>,
    payload: Result<Json<NewDataPartner>, JsonRejection>,
) -> ApiResult<Created<DataPartner>> {
    let timer = LatencyTimer::new("create_data_partner");
    let Json(request) = payload?;

    let data_partner = state.registry.create_data_partner(request)?;
    metrics::record_created("data_partner");
    info!("Data partner created: {}", data_partner.id);

    timer.record(StatusCode::CREATED.as_u16());
    Ok((StatusCode::CREATED, Json(data_partner)))
}

/// List data partners
pub async fn list_data_partners(
    State(state): State<AppState>,
    query: Result<Query<QueryPairs>, QueryRejection>,
) -> ApiResult<Json<Vec<DataPartner>>> {
    let timer = LatencyTimer::new("list_data_partners");
    let Query(pairs) = query?;
    let query = DataPartnerQuery::from_pairs(pairs);
    debug!("Data partner query: {:?}", query);

    let data_partners = state.registry.list_data_partners(&query.into())?;

    timer.record(StatusCode::OK.as_u16());
    Ok(Json(data_partners))
}

/// Create a plan
pub async fn create_plan(
    State(state): State<AppState>,
    payload: Result<Json<NewPlan>, JsonRejection>,
) -> ApiResult<Created<Plan>> {
    let timer = LatencyTimer::new("create_plan");
    let Json(request) = payload?;

    let plan = state.registry.create_plan(request)?;
    metrics::record_created("plan");
    info!(
        "Plan created: {} (partner {}, data partner {})",
        plan.id, plan.partner_id, plan.data_partner_id
    );

    timer.record(StatusCode::CREATED.as_u16());
    Ok((StatusCode::CREATED, Json(plan)))
}

/// List plans
pub async fn list_plans(
    State(state): State<AppState>,
    query: Result<Query<QueryPairs>, QueryRejection>,
) -> ApiResult<Json<Vec<Plan>>> {
    let timer = LatencyTimer::new("list_plans");
    let Query(pairs) = query?;
    let query = PlanQuery::from_pairs(pairs);
    debug!("Plan query: {:?}", query);

    let plans = state.registry.list_plans(&query.into())?;

    timer.record(StatusCode::OK.as_u16());
    Ok(Json(plans))
}

/// Create a plan on behalf of an advisor
pub async fn create_advisor_plan(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<Created<MessageResponse>> {
    let timer = LatencyTimer::new("create_advisor_plan");

    let mut form = MultipartForm::read(multipart.map_err(FormError::from)?).await?;
    let submission = AdvisorPlanSubmission {
        plan_name: form.take_text("plan_name")?,
        plan_details: form.take_text("plan_details")?,
        plan_file: form.take_file("plan_file")?,
    };

    let size_bytes = submission.plan_file.len();
    state.registry.submit_advisor_plan(submission)?;
    metrics::record_upload("advisor-plan", size_bytes);
    metrics::record_created("advisor_plan");

    timer.record(StatusCode::CREATED.as_u16());
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new(AdvisorPlanSubmission::SUCCESS_MESSAGE)),
    ))
}

/// Get the advisor view of a plan
///
/// Serves both `/plan/:plan_id` and `/plan/` (empty id). The id is taken
/// from the last path segment and percent-decoded lossily, so any
/// identifier resolves.
pub async fn get_advisor_plan(
    State(state): State<AppState>,
    uri: Uri,
) -> ApiResult<Json<AdvisorPlan>> {
    let timer = LatencyTimer::new("get_advisor_plan");
    let plan_id = plan_id_from_path(uri.path());
    debug!("Advisor plan lookup: {:?}", plan_id);

    let plan = state.registry.advisor_plan(&plan_id)?;

    timer.record(StatusCode::OK.as_u16());
    Ok(Json(plan))
}

fn plan_id_from_path(path: &str) -> String {
    let raw = path.rsplit_once('/').map_or(path, |(_, id)| id);
    percent_decode_str(raw).decode_utf8_lossy().into_owned()
}

/// Health check - liveness probe
pub async fn health_live(State(state): State<AppState>) -> Json<HealthResponse> {
    let uptime_seconds = state.uptime_seconds();
    metrics::update_uptime(uptime_seconds);

    Json(HealthResponse {
        status: HealthStatus::Healthy,
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds,
    })
}

/// Health check - readiness probe
pub async fn health_ready(State(state): State<AppState>) -> ApiResult<Json<HealthResponse>> {
    // The registry is ready when it answers a lookup
    match state.registry.advisor_plan("health:check") {
        Ok(_) => Ok(Json(HealthResponse {
            status: HealthStatus::Healthy,
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds: state.uptime_seconds(),
        })),
        Err(e) => {
            warn!("Readiness check failed: {}", e);
            Err(ApiError::ServiceUnavailable("Registry not ready".to_string()))
        }
    }
}

/// Prometheus metrics endpoint
pub async fn metrics(State(state): State<AppState>) -> String {
    metrics::update_uptime(state.uptime_seconds());
    metrics::get_prometheus_metrics()
}
