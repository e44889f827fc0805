//! Integration tests for the staff report engine.
//!
//! This test suite runs the full pipeline against workbook fixtures:
//! - Block extraction and exclusion
//! - Registration and permit cross-reference
//! - Remaining validity labels
//! - Report file layout and overwrite
//! - Error cases
//! - The HTTP API
//! - Scheduled runs

mod common;

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use chrono::NaiveDate;
use serde_json::{Value, json};
use tower::ServiceExt;

use common::{Blank, Date, Fixture, Number, Text, read_report, text};
use staff_report::api::{AppState, create_router};
use staff_report::config::LocationConfig;
use staff_report::engine::ReportEngine;
use staff_report::error::ReportError;
use staff_report::extraction::LocationRegistry;
use staff_report::models::{ExpiryStatus, Location, REPORT_HEADERS};
use staff_report::schedule::run_scheduled_once;

// =============================================================================
// Test Helpers
// =============================================================================

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
}

fn roster_fixture(fixture: &Fixture) {
    fixture.roster(&[
        vec![Text("Моремания Киевская")],
        vec![Text("Иванов Иван")],
        vec![Text("ТестНаставник Олегов")],
        vec![Text("Моремания Дмитровка")],
        vec![Text("Петров Пётр")],
    ]);
}

/// Registration and permit tables of the basic scenario.
fn reference_fixture(fixture: &Fixture) {
    fixture.registration(&[
        vec![Text("ФИО"), Text("Номер"), Text("Выдан"), Text("Срок")],
        vec![Text("Иванов Иван"), Number(7701.0), Blank, Text("31.01.2026")],
    ]);
    fixture.permit(&[
        vec![Text("ФИО"), Text("Номер"), Text("Выдан"), Text("Срок")],
        vec![Text("Сидоров Семён"), Text("П-1"), Blank, Text("01.06.2026")],
    ]);
}

fn basic_fixture() -> Fixture {
    let fixture = Fixture::new();
    roster_fixture(&fixture);
    reference_fixture(&fixture);
    fixture
}

fn api_router(fixture: &Fixture) -> Router {
    let registry = LocationRegistry::new([
        Location::new("kievskaya", "Моремания Киевская").with_secret("s3cret"),
        Location::new("dmitrovka", "Моремания Дмитровка").with_secret("other"),
        Location::new("dolgoprudny", "Моремания Долгопрудный").with_secret("third"),
    ]);
    let engine = ReportEngine::with_registry(fixture.config.clone(), registry);
    create_router(AppState::new(engine))
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

async fn post_report(router: Router, body: &str) -> (StatusCode, Value) {
    send(
        router,
        Request::builder()
            .method("POST")
            .uri("/reports")
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

// =============================================================================
// Pipeline
// =============================================================================

#[test]
fn test_basic_scenario_writes_single_row() {
    let fixture = basic_fixture();
    let engine = ReportEngine::new(fixture.config.clone());

    let outcome = engine.run_on("kievskaya", today()).unwrap();

    assert_eq!(outcome.location_key, "kievskaya");
    assert_eq!(outcome.display_name, "Моремания Киевская");
    assert_eq!(outcome.rows.len(), 1);
    assert!(outcome.path.is_absolute());
    assert!(outcome.path.ends_with("выгрузки/выгрузка_по_точке_kievskaya.xlsx"));

    let report = read_report(&outcome.path);
    assert_eq!(report.len(), 2);
    for (col, header) in REPORT_HEADERS.iter().enumerate() {
        assert_eq!(text(&report, 0, col), *header);
    }
    assert_eq!(text(&report, 1, 0), "Иванов Иван");
    assert_eq!(text(&report, 1, 1), "7701");
    assert_eq!(text(&report, 1, 2), "1 мес. 0 дн.");
    assert_eq!(text(&report, 1, 3), "Нет данных");
    assert_eq!(text(&report, 1, 4), "Нет данных");
}

#[test]
fn test_location_key_is_normalized() {
    let fixture = basic_fixture();
    let engine = ReportEngine::new(fixture.config.clone());

    let outcome = engine.run_on("  KievSkaya ", today()).unwrap();

    assert_eq!(outcome.location_key, "kievskaya");
    assert!(fixture.output_path("kievskaya").exists());
}

#[test]
fn test_status_labels_and_row_filtering() {
    let fixture = Fixture::new();
    fixture.roster(&[
        vec![Text("Сводка")],
        vec![Text("Моремания Киевская")],
        vec![Text("Официанты")],
        vec![Text("Иванов Иван")],
        vec![Blank],
        vec![Text("Петров Пётр")],
        vec![Text("Повараров Олег")],
        vec![Text("Сидоров Семён")],
        vec![Text("Кузнецов Кузьма")],
        vec![Text("Смирнов Сергей")],
        vec![Text("Моремания Долгопрудный")],
        vec![Text("Волков Виктор")],
    ]);
    fixture.registration(&[
        vec![Text("ФИО"), Text("Номер"), Text("Выдан"), Text("Срок")],
        vec![
            Text("Иванов Иван"),
            Text("Р-1"),
            Blank,
            Date(NaiveDate::from_ymd_opt(2026, 3, 17).unwrap()),
        ],
        vec![Text("Петров Пётр"), Text("Р-2"), Blank, Text("15.12.2025")],
        vec![Text("Повараров Олег"), Text("Р-3"), Blank, Text("01.06.2026")],
        vec![Text("Сидоров Семён"), Text("Р-4"), Blank, Text("скоро")],
        vec![Text("Волков Виктор"), Text("Р-5"), Blank, Text("01.06.2026")],
    ]);
    fixture.permit(&[
        vec![Text("ФИО"), Text("Номер"), Text("Выдан"), Text("Срок")],
        vec![Text("Петров Пётр"), Text("П-2"), Blank, Blank],
        vec![Text("Кузнецов Кузьма"), Text("П-7"), Blank, Text("2026-01-01")],
    ]);
    let engine = ReportEngine::new(fixture.config.clone());

    let outcome = engine.run_on("kievskaya", today()).unwrap();

    let names: Vec<&str> = outcome.rows.iter().map(|r| r.employee.as_str()).collect();
    assert_eq!(
        names,
        vec!["Иванов Иван", "Петров Пётр", "Сидоров Семён", "Кузнецов Кузьма"]
    );

    let ivanov = &outcome.rows[0];
    assert_eq!(
        ivanov.registration_remaining,
        ExpiryStatus::Remaining { months: 2, days: 15 }
    );
    assert_eq!(ivanov.permit_number, "Нет данных");
    assert_eq!(ivanov.permit_remaining, ExpiryStatus::NoData);

    let petrov = &outcome.rows[1];
    assert_eq!(petrov.registration_remaining, ExpiryStatus::Overdue);
    assert_eq!(petrov.permit_number, "П-2");
    assert_eq!(petrov.permit_remaining, ExpiryStatus::NoData);

    let sidorov = &outcome.rows[2];
    assert_eq!(sidorov.registration_remaining, ExpiryStatus::DateError);

    let kuznetsov = &outcome.rows[3];
    assert_eq!(kuznetsov.registration_number, "Нет данных");
    assert_eq!(kuznetsov.registration_remaining, ExpiryStatus::NoData);
    assert_eq!(
        kuznetsov.permit_remaining,
        ExpiryStatus::Remaining { months: 0, days: 0 }
    );

    let report = read_report(&outcome.path);
    assert_eq!(report.len(), outcome.rows.len() + 1);
    assert_eq!(text(&report, 1, 2), "2 мес. 15 дн.");
    assert_eq!(text(&report, 2, 2), "Просрочено");
    assert_eq!(text(&report, 3, 2), "Ошибка даты");
}

#[test]
fn test_rerun_overwrites_report() {
    let fixture = basic_fixture();
    let engine = ReportEngine::new(fixture.config.clone());

    let first = engine.run_on("kievskaya", today()).unwrap();
    let later = NaiveDate::from_ymd_opt(2026, 1, 11).unwrap();
    let second = engine.run_on("kievskaya", later).unwrap();

    assert_eq!(first.path, second.path);
    let report = read_report(&second.path);
    assert_eq!(report.len(), 2);
    assert_eq!(text(&report, 1, 2), "0 мес. 20 дн.");
}

#[test]
fn test_locations_write_separate_reports() {
    let fixture = Fixture::new();
    roster_fixture(&fixture);
    fixture.registration(&[
        vec![Text("ФИО"), Text("Номер"), Text("Выдан"), Text("Срок")],
        vec![Text("Иванов Иван"), Text("Р-1"), Blank, Text("31.01.2026")],
        vec![Text("Петров Пётр"), Text("Р-2"), Blank, Text("31.01.2026")],
    ]);
    fixture.permit(&[vec![Text("ФИО")]]);
    let engine = ReportEngine::new(fixture.config.clone());

    let kievskaya = engine.run_on("kievskaya", today()).unwrap();
    let dmitrovka = engine.run_on("dmitrovka", today()).unwrap();

    assert_ne!(kievskaya.path, dmitrovka.path);
    assert_eq!(dmitrovka.rows.len(), 1);
    assert_eq!(dmitrovka.rows[0].employee, "Петров Пётр");
    assert_eq!(text(&read_report(&kievskaya.path), 1, 0), "Иванов Иван");
}

#[test]
fn test_block_without_matches_writes_header_only() {
    let fixture = Fixture::new();
    roster_fixture(&fixture);
    fixture.registration(&[vec![Text("ФИО")]]);
    fixture.permit(&[vec![Text("ФИО")]]);
    let engine = ReportEngine::new(fixture.config.clone());

    let outcome = engine.run_on("kievskaya", today()).unwrap();

    assert!(outcome.rows.is_empty());
    let report = read_report(&outcome.path);
    assert_eq!(report.len(), 1);
    assert_eq!(text(&report, 0, 0), "Сотрудник");
}

// =============================================================================
// Error Cases
// =============================================================================

#[test]
fn test_location_missing_from_roster() {
    let fixture = basic_fixture();
    let engine = ReportEngine::new(fixture.config.clone());

    match engine.run_on("dolgoprudny", today()) {
        Err(ReportError::LocationNotFound { display_name }) => {
            assert_eq!(display_name, "Моремания Долгопрудный")
        }
        other => panic!("Expected LocationNotFound, got {:?}", other),
    }
    assert!(!fixture.output_path("dolgoprudny").exists());
}

#[test]
fn test_block_without_names_is_empty_employee_list() {
    let fixture = Fixture::new();
    fixture.roster(&[
        vec![Text("Моремания Киевская")],
        vec![Text("Официанты")],
        vec![Blank],
        vec![Text("Моремания Дмитровка")],
        vec![Text("Петров Пётр")],
    ]);
    reference_fixture(&fixture);
    let engine = ReportEngine::new(fixture.config.clone());

    assert!(matches!(
        engine.run_on("kievskaya", today()),
        Err(ReportError::EmptyEmployeeList { .. })
    ));
    assert!(!fixture.output_path("kievskaya").exists());
}

#[test]
fn test_missing_permit_workbook_is_source_read_error() {
    let fixture = Fixture::new();
    roster_fixture(&fixture);
    fixture.registration(&[vec![Text("Иванов Иван"), Text("Р-1")]]);
    let engine = ReportEngine::new(fixture.config.clone());

    match engine.run_on("kievskaya", today()) {
        Err(ReportError::SourceRead { path, .. }) => {
            assert_eq!(path, fixture.config.sources.permit_path().display().to_string())
        }
        other => panic!("Expected SourceRead, got {:?}", other),
    }
    assert!(!fixture.output_path("kievskaya").exists());
}

#[test]
fn test_roster_without_expected_sheet_is_source_read_error() {
    let fixture = Fixture::new();
    common::write_workbook(
        &fixture.config.sources.roster_path(),
        "Sheet1",
        &[vec![Text("Моремания Киевская")], vec![Text("Иванов Иван")]],
    );
    reference_fixture(&fixture);
    let engine = ReportEngine::new(fixture.config.clone());

    assert!(matches!(
        engine.run_on("kievskaya", today()),
        Err(ReportError::SourceRead { .. })
    ));
}

#[test]
fn test_unknown_location() {
    let fixture = basic_fixture();
    let engine = ReportEngine::new(fixture.config.clone());

    assert!(matches!(
        engine.run_on("arbat", today()),
        Err(ReportError::UnknownLocation { .. })
    ));
}

// =============================================================================
// HTTP API
// =============================================================================

#[tokio::test]
async fn test_api_lists_locations() {
    let fixture = basic_fixture();
    let router = api_router(&fixture);

    let (status, body) = send(
        router,
        Request::builder()
            .method("GET")
            .uri("/locations")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            {"key": "dmitrovka", "display_name": "Моремания Дмитровка"},
            {"key": "dolgoprudny", "display_name": "Моремания Долгопрудный"},
            {"key": "kievskaya", "display_name": "Моремания Киевская"}
        ])
    );
}

#[tokio::test]
async fn test_api_report_success() {
    let fixture = basic_fixture();
    let router = api_router(&fixture);

    let body = json!({"location": "kievskaya", "password": "s3cret"}).to_string();
    let (status, json) = post_report(router, &body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["location"], "kievskaya");
    assert_eq!(json["display_name"], "Моремания Киевская");
    assert_eq!(json["record_count"], 1);
    assert_eq!(json["rows"][0]["employee"], "Иванов Иван");
    assert_eq!(json["rows"][0]["registration_number"], "7701");
    assert_eq!(json["rows"][0]["permit_remaining"], "Нет данных");
    assert!(json["correlation_id"].is_string());

    let summary = json["summary"].as_str().unwrap();
    assert!(summary.starts_with("📊 Ручная выгрузка\nЛокация: Моремания Киевская\nЗаписей: 1"));
    assert!(summary.contains("Иванов Иван\n\tСрок действия регистрации: "));

    let file_path = json["file_path"].as_str().unwrap();
    assert!(file_path.ends_with("выгрузка_по_точке_kievskaya.xlsx"));
    assert!(std::path::Path::new(file_path).exists());
}

#[tokio::test]
async fn test_api_wrong_password() {
    let fixture = basic_fixture();
    let router = api_router(&fixture);

    let body = json!({"location": "kievskaya", "password": "other"}).to_string();
    let (status, json) = post_report(router, &body).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["code"], "INVALID_PASSWORD");
    assert!(!fixture.output_path("kievskaya").exists());
}

#[tokio::test]
async fn test_api_unknown_location() {
    let fixture = basic_fixture();
    let router = api_router(&fixture);

    let body = json!({"location": "arbat", "password": "s3cret"}).to_string();
    let (status, json) = post_report(router, &body).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "UNKNOWN_LOCATION");
}

#[tokio::test]
async fn test_api_missing_source_is_server_error() {
    let fixture = Fixture::new();
    roster_fixture(&fixture);
    let router = api_router(&fixture);

    let body = json!({"location": "kievskaya", "password": "s3cret"}).to_string();
    let (status, json) = post_report(router, &body).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "SOURCE_READ_ERROR");
}

#[tokio::test]
async fn test_api_malformed_json() {
    let fixture = basic_fixture();
    let router = api_router(&fixture);

    let (status, json) = post_report(router, "{\"location\": ").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "MALFORMED_JSON");
}

#[tokio::test]
async fn test_api_blank_configured_password_rejects_empty_candidate() {
    let mut fixture = basic_fixture();
    fixture.config.locations.insert(
        "kievskaya".to_string(),
        LocationConfig {
            display_name: "Моремания Киевская".to_string(),
            password: Some(String::new()),
            ..Default::default()
        },
    );
    let router = create_router(AppState::new(ReportEngine::new(fixture.config.clone())));

    let body = json!({"location": "kievskaya", "password": ""}).to_string();
    let (status, json) = post_report(router, &body).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["code"], "INVALID_PASSWORD");
    assert!(!fixture.output_path("kievskaya").exists());
}

#[tokio::test]
async fn test_api_location_missing_from_roster() {
    let fixture = basic_fixture();
    let router = api_router(&fixture);

    let body = json!({"location": "dolgoprudny", "password": "third"}).to_string();
    let (status, json) = post_report(router, &body).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "LOCATION_NOT_FOUND");
}

#[tokio::test]
async fn test_api_empty_block_is_unprocessable() {
    let fixture = Fixture::new();
    fixture.roster(&[
        vec![Text("Моремания Киевская")],
        vec![Text("Официанты")],
        vec![Text("Моремания Дмитровка")],
    ]);
    reference_fixture(&fixture);
    let router = api_router(&fixture);

    let body = json!({"location": "kievskaya", "password": "s3cret"}).to_string();
    let (status, json) = post_report(router, &body).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["code"], "EMPTY_EMPLOYEE_LIST");
}

#[tokio::test]
async fn test_api_missing_field_is_malformed_json() {
    let fixture = basic_fixture();
    let router = api_router(&fixture);

    let (status, json) = post_report(router, r#"{"location": "kievskaya"}"#).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "MALFORMED_JSON");
    assert!(json["message"].as_str().unwrap().contains("missing field"));
}

// =============================================================================
// Scheduled Runs
// =============================================================================

fn scheduled_engine(fixture: &Fixture) -> Arc<ReportEngine> {
    let registry = LocationRegistry::new([
        Location::new("kievskaya", "Моремания Киевская").with_destination("-1001234"),
        Location::new("dmitrovka", "Моремания Дмитровка"),
    ]);
    Arc::new(ReportEngine::with_registry(fixture.config.clone(), registry))
}

#[tokio::test]
async fn test_scheduled_run_delivers_summary_to_destination() {
    let fixture = basic_fixture();
    let engine = scheduled_engine(&fixture);

    let delivery = run_scheduled_once(engine, "kievskaya").await.unwrap();

    assert_eq!(delivery.destination.as_deref(), Some("-1001234"));
    assert!(delivery.summary.starts_with("🔄 Автоматическая выгрузка\nЛокация: Моремания Киевская"));
    assert!(delivery.summary.contains("Иванов Иван"));
    assert_eq!(delivery.outcome.rows.len(), 1);
    assert!(delivery.outcome.path.exists());
}

#[tokio::test]
async fn test_scheduled_run_without_destination() {
    let fixture = Fixture::new();
    roster_fixture(&fixture);
    fixture.registration(&[vec![Text("Петров Пётр"), Text("Р-2"), Blank, Text("31.01.2026")]]);
    fixture.permit(&[vec![Text("ФИО")]]);
    let engine = scheduled_engine(&fixture);

    let delivery = run_scheduled_once(engine, "dmitrovka").await.unwrap();

    assert!(delivery.destination.is_none());
    assert_eq!(delivery.outcome.rows[0].employee, "Петров Пётр");
}

#[tokio::test]
async fn test_failed_scheduled_run_yields_nothing() {
    let fixture = Fixture::new();
    let engine = scheduled_engine(&fixture);

    assert!(run_scheduled_once(engine, "kievskaya").await.is_none());
    assert!(!fixture.output_path("kievskaya").exists());
}
