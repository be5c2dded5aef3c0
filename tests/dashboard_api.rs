use axum::http::StatusCode;
use chrono::{Datelike, Local};
use serde_json::{json, Value};

use clay_dashboard::models::SummaryRecord;

mod common;
use common::*;

fn sample_record() -> SummaryRecord {
    serde_json::from_value(json!({
        "kpis": { "totalRevenue": 1500, "activeOrders": 6, "customerCount": 40, "criticalStockCount": 1 },
        "topProducts": [ { "id": 1, "name": "Mug", "unitsSold": 10 } ],
        "charts": {
            "monthlySales": [
                { "yearMonth": "2024-05", "total": 1200 },
                { "yearMonth": "2024-11", "total": 300 },
                { "yearMonth": "2023-01", "total": 50 }
            ],
            "orderStatusCounts": [
                { "status": "pending", "count": 3 },
                { "status": "prepared", "count": 2 },
                { "status": "shipped", "count": 1 },
                { "status": "delivered", "count": 5 }
            ]
        },
        "criticalStockList": [ { "id": 9, "name": "Vase", "sku": "VS-9", "stock": 2 } ]
    }))
    .unwrap()
}

fn bar_amounts(chart: &Value) -> Vec<f64> {
    chart["bars"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["amount"].as_f64().unwrap())
        .collect()
}

#[tokio::test]
async fn health_check() {
    let app = setup_test_app(StubSource::ok(SummaryRecord::default()));
    let (status, body) = send(&app, "GET", "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String("OK".into()));
}

#[tokio::test]
async fn mounted_view_defaults() {
    let source = StubSource::ok(sample_record());
    let app = setup_test_app(source.clone());

    let (_, snapshot) = mount_loaded(&app).await;

    assert_eq!(snapshot["selectedYear"], json!(Local::now().year()));
    assert_eq!(snapshot["selectableYears"], json!([2025, 2024, 2023]));
    assert_eq!(snapshot["modal"], json!("closed"));
    assert_eq!(snapshot["granularity"], json!("months"));
    assert_eq!(snapshot["hasRecord"], json!(true));
    assert_eq!(snapshot["kpis"]["activeOrders"], json!(6));
    assert_eq!(snapshot["kpis"]["stockBadge"], json!("critical"));
    assert_eq!(snapshot["statusDonut"]["total"], json!(11));
    assert_eq!(snapshot["statusDonut"]["preparedOrShipped"], json!(3));
    assert_eq!(snapshot["topProducts"]["rows"][0]["progressPercent"], json!(50.0));
    assert_eq!(snapshot["revenueModal"], Value::Null);
    assert_eq!(snapshot["criticalStockModal"], Value::Null);
    assert_eq!(source.call_count(), 1);
}

#[tokio::test]
async fn selecting_year_rederives_without_refetch() {
    let source = StubSource::ok(sample_record());
    let app = setup_test_app(source.clone());
    let (id, _) = mount_loaded(&app).await;

    let (status, snapshot) = send(
        &app,
        "PUT",
        &format!("/gallium/api/dashboard/views/{id}/year"),
        Some(json!({ "year": 2024 })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        bar_amounts(&snapshot["revenueChart"]),
        vec![0.0, 0.0, 0.0, 0.0, 1200.0, 0.0, 0.0, 0.0, 0.0, 0.0, 300.0, 0.0]
    );
    assert_eq!(snapshot["revenueChart"]["annualTotal"], json!(1500.0));

    let (_, snapshot) = send(
        &app,
        "PUT",
        &format!("/gallium/api/dashboard/views/{id}/year"),
        Some(json!({ "year": 1999 })),
    )
    .await;
    assert_eq!(bar_amounts(&snapshot["revenueChart"]), vec![0.0; 12]);
    assert_eq!(source.call_count(), 1);
}

#[tokio::test]
async fn year_change_keeps_revenue_modal_open() {
    let source = StubSource::ok(sample_record());
    let app = setup_test_app(source.clone());
    let (id, _) = mount_loaded(&app).await;
    let modal_uri = format!("/gallium/api/dashboard/views/{id}/modal");

    let (status, snapshot) = send(&app, "POST", &modal_uri, Some(json!({ "modal": "revenue" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(snapshot["modal"], json!("revenue"));

    let (_, snapshot) = send(
        &app,
        "PUT",
        &format!("/gallium/api/dashboard/views/{id}/year"),
        Some(json!({ "year": 2023 })),
    )
    .await;

    assert_eq!(snapshot["modal"], json!("revenue"));
    assert_eq!(snapshot["revenueModal"]["selectedYear"], json!(2023));
    assert_eq!(snapshot["revenueModal"]["chart"]["annualTotal"], json!(50.0));
    assert_eq!(snapshot["revenueModal"]["chart"]["bars"][0]["highlighted"], json!(true));
    assert_eq!(source.call_count(), 1);
}

#[tokio::test]
async fn modals_are_mutually_exclusive() {
    let app = setup_test_app(StubSource::ok(sample_record()));
    let (id, _) = mount_loaded(&app).await;
    let modal_uri = format!("/gallium/api/dashboard/views/{id}/modal");

    let (status, snapshot) = send(&app, "POST", &modal_uri, Some(json!({ "modal": "critical_stock" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(snapshot["criticalStockModal"]["threshold"], json!(5));
    assert_eq!(snapshot["criticalStockModal"]["rows"][0]["sku"], json!("VS-9"));

    let (status, body) = send(&app, "POST", &modal_uri, Some(json!({ "modal": "revenue" }))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap().contains("critical_stock"));

    let (status, snapshot) = send(&app, "DELETE", &modal_uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(snapshot["modal"], json!("closed"));
    assert_eq!(snapshot["criticalStockModal"], Value::Null);

    let (status, snapshot) = send(&app, "POST", &modal_uri, Some(json!({ "modal": "revenue" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(snapshot["modal"], json!("revenue"));
}

#[tokio::test]
async fn granularity_toggle_is_stored() {
    let app = setup_test_app(StubSource::ok(sample_record()));
    let (id, _) = mount_loaded(&app).await;

    let (status, snapshot) = send(
        &app,
        "PUT",
        &format!("/gallium/api/dashboard/views/{id}/granularity"),
        Some(json!({ "granularity": "years" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(snapshot["granularity"], json!("years"));
}

#[tokio::test]
async fn failed_fetch_renders_empty_dashboard() {
    let source = StubSource::failing();
    let app = setup_test_app(source.clone());

    let (_, snapshot) = mount_loaded(&app).await;

    assert_eq!(snapshot["loading"], json!(false));
    assert_eq!(snapshot["hasRecord"], json!(false));
    assert_eq!(snapshot["kpis"]["totalRevenue"], json!(0.0));
    assert_eq!(snapshot["kpis"]["stockBadge"], json!("ok"));
    assert_eq!(snapshot["statusDonut"]["total"], json!(0));
    assert_eq!(snapshot["topProducts"]["isEmpty"], json!(true));
    assert_eq!(bar_amounts(&snapshot["revenueChart"]), vec![0.0; 12]);
    assert_eq!(source.call_count(), 1);
}

#[tokio::test]
async fn teardown_removes_view() {
    let app = setup_test_app(StubSource::ok(sample_record()));
    let (id, _) = mount_loaded(&app).await;
    let uri = format!("/gallium/api/dashboard/views/{id}");

    let (status, _) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], json!("Dashboard view not found"));

    let (status, _) = send(&app, "PUT", &format!("{uri}/year"), Some(json!({ "year": 2023 }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn huge_status_counts_saturate() {
    let record: SummaryRecord = serde_json::from_value(json!({
        "charts": {
            "orderStatusCounts": [
                { "status": "pending", "count": i64::MAX },
                { "status": "prepared", "count": i64::MAX },
                { "status": "shipped", "count": i64::MAX },
                { "status": "delivered", "count": i64::MAX }
            ]
        }
    }))
    .unwrap();
    let app = setup_test_app(StubSource::ok(record));

    let (_, snapshot) = mount_loaded(&app).await;

    assert_eq!(snapshot["hasRecord"], json!(true));
    assert_eq!(snapshot["statusDonut"]["preparedOrShipped"], json!(u64::MAX));
    assert_eq!(snapshot["statusDonut"]["total"], json!(u64::MAX));
}

#[tokio::test]
async fn unknown_view_is_not_found() {
    let app = setup_test_app(StubSource::ok(sample_record()));
    let uri = format!("/gallium/api/dashboard/views/{}/modal", uuid::Uuid::new_v4());

    let (status, _) = send(&app, "POST", &uri, Some(json!({ "modal": "revenue" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
