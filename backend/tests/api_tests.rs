//! Integration tests for the EcoLedger HTTP API.
//!
//! Each test runs against a fresh SQLite file inside a temporary directory.

use actix_web::http::{header, StatusCode};
use actix_web::{test, web, App};
use ecoledger_backend::config::AppConfig;
use ecoledger_backend::configure_app;
use ecoledger_backend::state::AppState;
use serde_json::{json, Value};
use tempfile::TempDir;

const BOUNDARY: &str = "ecoledger-test-boundary";

/// Test helper: state backed by a new database in `dir`.
fn test_state(dir: &TempDir) -> AppState {
    let config = AppConfig {
        database_path: dir.path().join("ecoledger.sqlite"),
        ..AppConfig::default()
    };
    let state = AppState::from_config(&config).expect("state");
    state.init_database().expect("schema");
    state
}

/// Test helper: multipart upload request with a single `file` field.
fn upload_request(filename: &str, content: &str) -> test::TestRequest {
    upload_bytes_request(filename, content.as_bytes())
}

/// Test helper: like `upload_request` but with arbitrary file bytes.
fn upload_bytes_request(filename: &str, content: &[u8]) -> test::TestRequest {
    let mut body = format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{f}\"\r\n\
         Content-Type: text/csv\r\n\r\n",
        b = BOUNDARY,
        f = filename
    )
    .into_bytes();
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());

    test::TestRequest::post()
        .uri("/api/upload")
        .insert_header((
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        ))
        .set_payload(body)
}

macro_rules! app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state))
                .configure(configure_app),
        )
        .await
    };
}

const SAMPLE_CSV: &str = "description,quantity,unit,date\n\
Delivery Truck,100,km,2024-01-15\n\
Office electricity,200,kWh,2024-02-01\n\
Forklift hire,abc,hours,2024-02-03\n\
Team lunch,4,items,2024-02-10\n";

#[actix_web::test]
async fn upload_then_summary_reports_transport_total() {
    let dir = TempDir::new().unwrap();
    let app = app!(test_state(&dir));

    let resp = test::call_service(&app, upload_request("activities.csv", SAMPLE_CSV).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let report: Value = test::read_body_json(resp).await;
    assert_eq!(report["processed"], 3);
    assert_eq!(report["skipped"], 1);
    assert_eq!(report["message"], "Successfully processed 3 activities");
    assert_eq!(report["rows"][2]["status"], "skipped");
    assert_eq!(report["rows"][2]["row"], 3);
    assert_eq!(report["rows"][2]["reason"], "invalid quantity 'abc'");
    assert_eq!(report["fingerprint"].as_str().unwrap().len(), 32);

    let summary: Value =
        test::call_and_read_body_json(&app, test::TestRequest::get().uri("/api/summary").to_request()).await;
    let distribution = summary["category_distribution"].as_array().unwrap();
    let transport = distribution
        .iter()
        .find(|c| c["name"] == "transport")
        .expect("transport category present");
    assert!((transport["value"].as_f64().unwrap() - 100.0 * 0.21).abs() < 1e-9);

    let total = summary["total_co2e"].as_f64().unwrap();
    let summed: f64 = distribution.iter().map(|c| c["value"].as_f64().unwrap()).sum();
    assert!((total - summed).abs() < 1e-9);

    assert_eq!(summary["hotspots"].as_array().unwrap().len(), 3);
    assert_eq!(summary["hotspots"][0]["description"], "Office electricity");
    assert_eq!(summary["trend_data"][0]["date"], "2024-01");
    assert_eq!(summary["trend_data"][1]["date"], "2024-02");
}

#[actix_web::test]
async fn upload_rejects_non_csv_files() {
    let dir = TempDir::new().unwrap();
    let app = app!(test_state(&dir));

    let resp = test::call_service(&app, upload_request("activities.txt", SAMPLE_CSV).to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["detail"], "Invalid file type. Please upload a CSV.");
}

#[actix_web::test]
async fn upload_over_size_limit_is_rejected() {
    let dir = TempDir::new().unwrap();
    let mut state = test_state(&dir);
    state.max_upload_bytes = 20;
    let app = app!(state);

    let resp = test::call_service(&app, upload_request("activities.csv", SAMPLE_CSV).to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["detail"], "Upload exceeds the limit of 20 bytes");

    let imports: Value =
        test::call_and_read_body_json(&app, test::TestRequest::get().uri("/api/imports").to_request()).await;
    assert!(imports.as_array().unwrap().is_empty());
}

#[actix_web::test]
async fn upload_that_is_not_utf8_is_rejected() {
    let dir = TempDir::new().unwrap();
    let app = app!(test_state(&dir));

    let content = b"description,quantity,unit,date\n\xff\xfeTruck,100,km,2024-01-15\n";
    let resp = test::call_service(&app, upload_bytes_request("activities.csv", content).to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["detail"], "CSV file is not valid UTF-8");

    let activities: Value =
        test::call_and_read_body_json(&app, test::TestRequest::get().uri("/api/activities").to_request()).await;
    assert!(activities.as_array().unwrap().is_empty());
}

#[actix_web::test]
async fn huge_quantities_saturate_totals_instead_of_overflowing() {
    let dir = TempDir::new().unwrap();
    let app = app!(test_state(&dir));
    let csv = "description,quantity\nwaste x,1e308\nwaste x,1e308\nwaste x,1e308\nwaste x,1e308\n";

    let report: Value =
        test::call_and_read_body_json(&app, upload_request("huge.csv", csv).to_request()).await;
    assert_eq!(report["processed"], 4);

    let summary: Value =
        test::call_and_read_body_json(&app, test::TestRequest::get().uri("/api/summary").to_request()).await;
    assert_eq!(summary["total_co2e"].as_f64(), Some(f64::MAX));
    assert_eq!(summary["category_distribution"][0]["name"], "waste");
    assert_eq!(summary["category_distribution"][0]["value"].as_f64(), Some(f64::MAX));

    let report: Value =
        test::call_and_read_body_json(&app, test::TestRequest::post().uri("/api/insights/ai").to_request()).await;
    let content = report["content"].as_str().unwrap();
    assert!(!content.contains("inf"));
    assert!(!content.contains("NaN"));
    assert!(content.contains("**100.0%**"));
}

#[actix_web::test]
async fn activities_are_listed_newest_first_with_confidence() {
    let dir = TempDir::new().unwrap();
    let app = app!(test_state(&dir));
    test::call_service(&app, upload_request("activities.csv", SAMPLE_CSV).to_request()).await;

    let activities: Value =
        test::call_and_read_body_json(&app, test::TestRequest::get().uri("/api/activities").to_request()).await;
    let descriptions: Vec<&str> = activities
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["description"].as_str().unwrap())
        .collect();
    assert_eq!(descriptions, ["Team lunch", "Office electricity", "Delivery Truck"]);
    assert_eq!(activities[0]["activity_type"], "other");
    assert_eq!(activities[0]["confidence_level"], "Low");
    assert_eq!(activities[1]["confidence_level"], "High");
}

#[actix_web::test]
async fn explain_returns_calculation_detail_or_404() {
    let dir = TempDir::new().unwrap();
    let app = app!(test_state(&dir));
    let report: Value =
        test::call_and_read_body_json(&app, upload_request("activities.csv", SAMPLE_CSV).to_request()).await;
    let truck_id = report["rows"][0]["activity_id"].as_i64().unwrap();

    let explanation: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/explain/{}", truck_id))
            .to_request(),
    )
    .await;
    assert_eq!(explanation["id"], truck_id);
    assert_eq!(explanation["activity_type"], "transport");
    assert_eq!(explanation["details"]["emission_factor"], 0.21);
    assert_eq!(explanation["details"]["unit_applied"], "km");
    assert_eq!(explanation["details"]["calculation_notes"], "Calculated for 100 km");

    let resp = test::call_service(&app, test::TestRequest::get().uri("/api/explain/9999").to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["detail"], "Activity not found");
}

#[actix_web::test]
async fn scenario_recomputes_with_overrides() {
    let dir = TempDir::new().unwrap();
    let app = app!(test_state(&dir));
    let report: Value =
        test::call_and_read_body_json(&app, upload_request("activities.csv", SAMPLE_CSV).to_request()).await;
    let truck_id = report["rows"][0]["activity_id"].as_i64().unwrap();

    let result: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::post()
            .uri("/api/scenario")
            .set_json(json!({ "activity_id": truck_id, "new_quantity": 25.0 }))
            .to_request(),
    )
    .await;
    assert!((result["original_co2e"].as_f64().unwrap() - 21.0).abs() < 1e-9);
    assert!((result["simulated_co2e"].as_f64().unwrap() - 5.25).abs() < 1e-9);
    assert!((result["reduction_percentage"].as_f64().unwrap() - 75.0).abs() < 1e-9);

    let missing = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/scenario")
            .set_json(json!({ "activity_id": 9999 }))
            .to_request(),
    )
    .await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);

    let negative = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/scenario")
            .set_json(json!({ "activity_id": truck_id, "new_quantity": -1.0 }))
            .to_request(),
    )
    .await;
    assert_eq!(negative.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn scenario_on_zero_emission_activity_reports_zero_reduction() {
    let dir = TempDir::new().unwrap();
    let app = app!(test_state(&dir));
    let report: Value = test::call_and_read_body_json(
        &app,
        upload_request("zero.csv", "description,quantity,unit,date\nIdle generator,0,hours,2024-03-01\n")
            .to_request(),
    )
    .await;
    let id = report["rows"][0]["activity_id"].as_i64().unwrap();

    let result: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::post()
            .uri("/api/scenario")
            .set_json(json!({ "activity_id": id, "new_quantity": 10.0, "new_type": "energy" }))
            .to_request(),
    )
    .await;
    assert_eq!(result["original_co2e"], 0.0);
    assert_eq!(result["reduction_percentage"], 0.0);
}

#[actix_web::test]
async fn insights_without_data_say_so() {
    let dir = TempDir::new().unwrap();
    let app = app!(test_state(&dir));

    let recommendations: Value =
        test::call_and_read_body_json(&app, test::TestRequest::get().uri("/api/insights").to_request()).await;
    assert_eq!(recommendations.as_array().unwrap().len(), 1);
    assert_eq!(recommendations[0]["title"], "No data available");

    let report: Value =
        test::call_and_read_body_json(&app, test::TestRequest::post().uri("/api/insights/ai").to_request()).await;
    assert_eq!(
        report["content"],
        "No data available to analyze. Please upload your emission records."
    );
}

#[actix_web::test]
async fn insights_follow_dominant_category() {
    let dir = TempDir::new().unwrap();
    let app = app!(test_state(&dir));
    test::call_service(&app, upload_request("activities.csv", SAMPLE_CSV).to_request()).await;

    let recommendations: Value =
        test::call_and_read_body_json(&app, test::TestRequest::get().uri("/api/insights").to_request()).await;
    assert_eq!(recommendations[0]["category"], "energy");
    assert_eq!(recommendations[0]["impact"], "High");

    let report: Value =
        test::call_and_read_body_json(&app, test::TestRequest::post().uri("/api/insights/ai").to_request()).await;
    let content = report["content"].as_str().unwrap();
    assert!(content.contains("The **energy** sector"));
    assert!(content.contains("**Projected Trajectory:**"));
}

#[actix_web::test]
async fn repeated_uploads_are_logged_and_not_deduplicated() {
    let dir = TempDir::new().unwrap();
    let app = app!(test_state(&dir));
    test::call_service(&app, upload_request("activities.csv", SAMPLE_CSV).to_request()).await;
    test::call_service(&app, upload_request("activities.csv", SAMPLE_CSV).to_request()).await;

    let imports: Value =
        test::call_and_read_body_json(&app, test::TestRequest::get().uri("/api/imports").to_request()).await;
    let imports = imports.as_array().unwrap();
    assert_eq!(imports.len(), 2);
    assert_eq!(imports[0]["fingerprint"], imports[1]["fingerprint"]);
    assert_eq!(imports[0]["processed"], 3);

    let activities: Value =
        test::call_and_read_body_json(&app, test::TestRequest::get().uri("/api/activities").to_request()).await;
    assert_eq!(activities.as_array().unwrap().len(), 6);
}

#[actix_web::test]
async fn health_endpoint_responds() {
    let dir = TempDir::new().unwrap();
    let app = app!(test_state(&dir));
    let body: Value =
        test::call_and_read_body_json(&app, test::TestRequest::get().uri("/api/health").to_request()).await;
    assert_eq!(body["status"], "ok");
}
