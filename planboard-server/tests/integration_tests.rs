//! Integration tests for the Planboard HTTP server

use planboard_core::{AdvisorPlan, CreatedPartner, DataPartner, Partner, Plan};
use planboard_server::{
    api::{HealthResponse, HealthStatus, MessageResponse},
    routes, AppState,
};
use reqwest::multipart::{Form, Part};
use serde_json::{json, Value};

use std::sync::Once;

static INIT: Once = Once::new();

/// Test server setup helper
async fn setup_test_server() -> (String, tokio::task::JoinHandle<()>) {
    // Initialize Prometheus metrics (only once for all tests)
    INIT.call_once(|| {
        planboard_server::metrics::init_prometheus().expect("Failed to init Prometheus");
        planboard_server::metrics::init_metrics();
    });

    let app = routes::create_router(AppState::placeholder(), 1024 * 1024);

    // Find an available port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to port");
    let addr = listener.local_addr().expect("Failed to get local address");
    let base_url = format!("http://{}", addr);

    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (base_url, handle)
}

fn file_part(contents: &'static [u8], file_name: &str) -> Part {
    Part::bytes(contents)
        .file_name(file_name.to_string())
        .mime_str("text/csv")
        .unwrap()
}

#[tokio::test]
async fn test_hello_world() {
    let (base_url, _handle) = setup_test_server().await;

    let response = reqwest::get(format!("{}/api/python", base_url))
        .await
        .expect("Failed to send request");

    assert_eq!(response.status().as_u16(), 200);

    let body: MessageResponse = response.json().await.expect("Failed to parse response");
    assert_eq!(body.message, "Hello, World!");
}

#[tokio::test]
async fn test_health_live() {
    let (base_url, _handle) = setup_test_server().await;

    let response = reqwest::get(format!("{}/health/live", base_url))
        .await
        .expect("Failed to send request");

    assert_eq!(response.status().as_u16(), 200);

    let body: HealthResponse = response.json().await.expect("Failed to parse response");
    assert_eq!(body.status, HealthStatus::Healthy);
    assert_eq!(body.version, env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_health_ready() {
    let (base_url, _handle) = setup_test_server().await;

    let response = reqwest::get(format!("{}/health/ready", base_url))
        .await
        .expect("Failed to send request");

    assert_eq!(response.status().as_u16(), 200);
}

#[tokio::test]
async fn test_upload_plan_data() {
    let (base_url, _handle) = setup_test_server().await;

    let form = Form::new().part("file", file_part(b"plan,assets\nA,100\n", "plans.csv"));
    let response = reqwest::Client::new()
        .post(format!("{}/v1/admin/upload/plan-data", base_url))
        .multipart(form)
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status().as_u16(), 201);

    let body: MessageResponse = response.json().await.expect("Failed to parse response");
    assert_eq!(body.message, "Plan data uploaded successfully");
}

#[tokio::test]
async fn test_upload_advisor_data_zero_bytes() {
    let (base_url, _handle) = setup_test_server().await;

    let form = Form::new().part("file", file_part(b"", "empty.csv"));
    let response = reqwest::Client::new()
        .post(format!("{}/v1/admin/upload/advisor-data", base_url))
        .multipart(form)
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status().as_u16(), 201);

    let body: MessageResponse = response.json().await.expect("Failed to parse response");
    assert_eq!(body.message, "Advisor data uploaded successfully");
}

#[tokio::test]
async fn test_upload_without_file_field() {
    let (base_url, _handle) = setup_test_server().await;

    let form = Form::new().text("note", "no file here");
    let response = reqwest::Client::new()
        .post(format!("{}/v1/admin/upload/plan-data", base_url))
        .multipart(form)
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status().as_u16(), 422);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["detail"], "Missing required field: file");
}

#[tokio::test]
async fn test_create_partner() {
    let (base_url, _handle) = setup_test_server().await;

    let response = reqwest::Client::new()
        .post(format!("{}/v1/admin/partner/", base_url))
        .json(&json!({"name": "Acme Retirement", "external_id": "acme-42"}))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status().as_u16(), 201);

    let body: CreatedPartner = response.json().await.expect("Failed to parse response");
    assert_eq!(body.id, "generated_partner_id");
    assert_eq!(body.license_validity.to_string(), "2024-01-01");
    assert_eq!(body.external_id, "acme-42");
}

#[tokio::test]
async fn test_list_partners_ignores_filters() {
    let (base_url, _handle) = setup_test_server().await;

    let unfiltered: Vec<Partner> = reqwest::get(format!("{}/v1/admin/partner/", base_url))
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");

    let response = reqwest::get(format!(
        "{}/v1/admin/partner/?name=Nobody&tier=Tier%20Z",
        base_url
    ))
    .await
    .expect("Failed to send request");
    assert_eq!(response.status().as_u16(), 200);
    let filtered: Vec<Partner> = response.json().await.expect("Failed to parse response");

    assert_eq!(unfiltered.len(), 2);
    assert_eq!(filtered, unfiltered);
    assert_eq!(filtered[0].tier, "Tier A");
    assert_eq!(filtered[1].tier, "Tier B");
}

#[tokio::test]
async fn test_create_data_partner() {
    let (base_url, _handle) = setup_test_server().await;

    let response = reqwest::Client::new()
        .post(format!("{}/v1/admin/data-partner/", base_url))
        .json(&json!({"name": "Recordkeeper", "external_id": "rk-1"}))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status().as_u16(), 201);

    let body: DataPartner = response.json().await.expect("Failed to parse response");
    assert_eq!(body.id, "generated_data_partner_id");
    assert_eq!(body.name, "Recordkeeper");
    assert_eq!(body.external_id, "rk-1");
}

#[tokio::test]
async fn test_list_data_partners() {
    let (base_url, _handle) = setup_test_server().await;

    let response = reqwest::get(format!("{}/v1/admin/data-partner/?name=whatever", base_url))
        .await
        .expect("Failed to send request");

    assert_eq!(response.status().as_u16(), 200);

    let body: Vec<DataPartner> = response.json().await.expect("Failed to parse response");
    assert_eq!(
        body,
        vec![
            DataPartner::new("data_partner_id_1", "Data Partner 1", "ext_id_1"),
            DataPartner::new("data_partner_id_2", "Data Partner 2", "ext_id_2"),
        ]
    );
}

#[tokio::test]
async fn test_create_plan_echoes_references() {
    let (base_url, _handle) = setup_test_server().await;

    let response = reqwest::Client::new()
        .post(format!("{}/v1/admin/plan/", base_url))
        .json(&json!({
            "name": "Acme 401k",
            "external_id": "plan-9",
            "partner_id": "missing-partner",
            "data_partner_id": "missing-data-partner"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status().as_u16(), 201);

    let body: Plan = response.json().await.expect("Failed to parse response");
    assert_eq!(body.id, "generated_plan_id");
    assert_eq!(body.name, "Acme 401k");
    assert_eq!(body.partner_id, "missing-partner");
    assert_eq!(body.data_partner_id, "missing-data-partner");
}

#[tokio::test]
async fn test_create_plan_missing_field() {
    let (base_url, _handle) = setup_test_server().await;

    let response = reqwest::Client::new()
        .post(format!("{}/v1/admin/plan/", base_url))
        .json(&json!({"name": "Acme 401k"}))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status().as_u16(), 422);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["detail"].as_str().unwrap().contains("missing field"));
}

#[tokio::test]
async fn test_list_plans() {
    let (base_url, _handle) = setup_test_server().await;

    let response = reqwest::get(format!(
        "{}/v1/admin/plan/?name=Plan%201&external_id=ext_id_1",
        base_url
    ))
    .await
    .expect("Failed to send request");

    assert_eq!(response.status().as_u16(), 200);

    let body: Vec<Plan> = response.json().await.expect("Failed to parse response");
    assert_eq!(body.len(), 2);
    assert_eq!(body[0].id, "plan_id_1");
    assert_eq!(body[1].id, "plan_id_2");
    assert_eq!(body[1].data_partner_id, "data_partner_id_2");
}

#[tokio::test]
async fn test_create_advisor_plan() {
    let (base_url, _handle) = setup_test_server().await;

    let form = Form::new()
        .text("plan_name", "Smith Household")
        .text("plan_details", "Rollover and rebalance")
        .part("plan_file", file_part(b"participant,balance\n", "plan.csv"));
    let response = reqwest::Client::new()
        .post(format!("{}/v1/advisor/plan/", base_url))
        .multipart(form)
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status().as_u16(), 201);

    let body: MessageResponse = response.json().await.expect("Failed to parse response");
    assert_eq!(body.message, "New plan created successfully");
}

#[tokio::test]
async fn test_create_advisor_plan_missing_file() {
    let (base_url, _handle) = setup_test_server().await;

    let form = Form::new()
        .text("plan_name", "Smith Household")
        .text("plan_details", "Rollover");
    let response = reqwest::Client::new()
        .post(format!("{}/v1/advisor/plan/", base_url))
        .multipart(form)
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status().as_u16(), 422);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["detail"], "Missing required field: plan_file");
}

#[tokio::test]
async fn test_get_advisor_plan_any_id() {
    let (base_url, _handle) = setup_test_server().await;

    let mut views = Vec::new();
    for id in ["plan-1", "%20%3F%3F", "not-a-plan"] {
        let response = reqwest::get(format!("{}/v1/advisor/plan/{}", base_url, id))
            .await
            .expect("Failed to send request");
        assert_eq!(response.status().as_u16(), 200);

        let body: AdvisorPlan = response.json().await.expect("Failed to parse response");
        views.push(body);
    }

    assert_eq!(views[0].id, "plan-1");
    assert_eq!(views[1].id, " ??");
    for view in &views {
        assert_eq!(view.name, "Sample Plan");
        assert_eq!(view.partner.id, "partner_id");
        assert_eq!(view.data_partner.name, "Data Partner");
        assert_eq!(view.advisors, vec!["advisor_id_1", "advisor_id_2"]);
        assert_eq!(view.external_id.as_deref(), Some("ext_id"));
    }
}

#[tokio::test]
async fn test_get_advisor_plan_empty_id() {
    let (base_url, _handle) = setup_test_server().await;

    let response = reqwest::get(format!("{}/v1/advisor/plan/", base_url))
        .await
        .expect("Failed to send request");

    assert_eq!(response.status().as_u16(), 200);

    let body: AdvisorPlan = response.json().await.expect("Failed to parse response");
    assert_eq!(body.id, "");
    assert_eq!(body.name, "Sample Plan");
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let (base_url, _handle) = setup_test_server().await;

    // Generate some traffic first
    reqwest::get(format!("{}/api/python", base_url))
        .await
        .expect("Failed to send request");

    let response = reqwest::get(format!("{}/metrics", base_url))
        .await
        .expect("Failed to send request");

    assert_eq!(response.status().as_u16(), 200);

    let body = response.text().await.expect("Failed to read body");
    assert!(body.contains("planboard_requests_total"));
}

#[tokio::test]
async fn test_metrics_count_failed_requests() {
    let (base_url, _handle) = setup_test_server().await;

    let response = reqwest::Client::new()
        .post(format!("{}/v1/admin/data-partner/", base_url))
        .json(&json!({"name": "No external id"}))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status().as_u16(), 422);

    let body = reqwest::get(format!("{}/metrics", base_url))
        .await
        .expect("Failed to send request")
        .text()
        .await
        .expect("Failed to read body");

    assert!(body.lines().any(|line| {
        line.starts_with("planboard_requests_total")
            && line.contains("operation=\"create_data_partner\"")
            && line.contains("status=\"422\"")
    }));
}

#[tokio::test]
async fn test_advisor_plan_invalid_utf8_id() {
    let (base_url, _handle) = setup_test_server().await;

    let response = reqwest::get(format!("{}/v1/advisor/plan/%FF", base_url))
        .await
        .expect("Failed to send request");

    assert_eq!(response.status().as_u16(), 200);

    let body: AdvisorPlan = response.json().await.expect("Failed to parse response");
    assert_eq!(body.id, "\u{FFFD}");
}

#[tokio::test]
async fn test_list_partners_repeated_filter() {
    let (base_url, _handle) = setup_test_server().await;

    let response = reqwest::get(format!("{}/v1/admin/partner/?name=a&name=b", base_url))
        .await
        .expect("Failed to send request");

    assert_eq!(response.status().as_u16(), 200);

    let body: Vec<Partner> = response.json().await.expect("Failed to parse response");
    assert_eq!(body.len(), 2);
}

#[tokio::test]
async fn test_cors_headers() {
    let (base_url, _handle) = setup_test_server().await;

    let response = reqwest::Client::new()
        .get(format!("{}/api/python", base_url))
        .header("Origin", "http://localhost:3000")
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status().as_u16(), 200);
    assert!(response
        .headers()
        .contains_key("access-control-allow-origin"));
}
