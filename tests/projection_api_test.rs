mod common;

use axum::http::StatusCode;
use common::{date, response_json, NewMaterial, NewProduct, TestApp};
use serde_json::Value;
use uuid::Uuid;

const REFERENCE: &str = "2024-03-10";

fn close(actual: &Value, expected: f64) -> bool {
    actual
        .as_f64()
        .map_or(false, |v| (v - expected).abs() < 1e-9)
}

/// Coffee sells 14 on Tuesday 2024-03-05 and 7 on Friday 2024-03-08.
async fn seed_coffee(app: &TestApp) -> Uuid {
    let coffee = app
        .create_product(NewProduct {
            current_stock: 5.0,
            min_stock: 10.0,
            conversion_factor: 6.0,
            ..NewProduct::named("Coffee")
        })
        .await;
    app.record_sale(coffee, None, date(2024, 3, 5), 14.0).await;
    app.record_sale(coffee, None, date(2024, 3, 8), 7.0).await;
    coffee
}

async fn project(app: &TestApp, kind: &str, extra: &str) -> (StatusCode, Value) {
    let uri = format!(
        "/api/v1/projection/{}?group_id={}&reference_date={}&history_days=7&projection_days=7{}",
        kind, app.group_id, REFERENCE, extra
    );
    response_json(app.get(&uri).await).await
}

#[tokio::test]
async fn weekly_resale_projection_uses_weekday_averages() {
    let app = TestApp::new().await;
    let coffee = seed_coffee(&app).await;

    let (status, body) = project(&app, "resale", "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let items = body["data"]["projection"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    let item = &items[0];
    assert_eq!(item["item_id"], coffee.to_string());
    assert!(close(&item["total_history_sales"], 21.0));
    assert!(close(&item["averages_by_day"]["tuesday"], 14.0));
    assert!(close(&item["averages_by_day"]["friday"], 7.0));
    assert!(close(&item["projected_consumption"], 21.0));
    assert!(close(&item["purchase_need"], 26.0));
    assert!(close(&item["purchase_quantity"], 5.0));
    assert_eq!(item["needs_purchase"], true);
    assert_eq!(item["stock_status"], "low");

    let days = item["daily_projection"].as_array().unwrap();
    assert_eq!(days.len(), 7);
    assert_eq!(days[0]["date"], "2024-03-11");
    assert_eq!(days[0]["day_name"], "monday");
    assert_eq!(days[6]["date"], "2024-03-17");

    let summary = &body["data"]["summary"];
    assert_eq!(summary["total_items"], 1);
    assert_eq!(summary["items_needing_purchase"], 1);
    assert_eq!(summary["low_stock"], 1);
    assert_eq!(summary["projection_type"], "weekly");
    assert_eq!(summary["start_date"], "2024-03-11");
    assert_eq!(summary["end_date"], "2024-03-17");
}

#[tokio::test]
async fn holiday_in_window_uses_holiday_average() {
    let app = TestApp::new().await;
    seed_coffee(&app).await;
    app.add_holiday(date(2024, 3, 12), false).await;

    let (status, body) = project(&app, "resale", "").await;
    assert_eq!(status, StatusCode::OK);

    let item = &body["data"]["projection"][0];
    let tuesday = &item["daily_projection"][1];
    assert_eq!(tuesday["is_holiday"], true);
    assert!(close(&tuesday["projected"], 0.0));
    assert!(close(&item["projected_consumption"], 7.0));
}

#[tokio::test]
async fn recurring_holiday_matches_later_years() {
    let app = TestApp::new().await;
    seed_coffee(&app).await;
    app.add_holiday(date(2019, 3, 15), true).await;

    let (_, body) = project(&app, "resale", "").await;
    let friday = &body["data"]["projection"][0]["daily_projection"][4];
    assert_eq!(friday["date"], "2024-03-15");
    assert_eq!(friday["is_holiday"], true);
    assert!(close(&body["data"]["projection"][0]["projected_consumption"], 14.0));
}

#[tokio::test]
async fn linear_projection_spreads_history_evenly() {
    let app = TestApp::new().await;
    seed_coffee(&app).await;

    let uri = format!(
        "/api/v1/projection/resale?group_id={}&reference_date={}&history_days=7&projection_days=3&projection_type=LINEAR",
        app.group_id, REFERENCE
    );
    let (status, body) = response_json(app.get(&uri).await).await;
    assert_eq!(status, StatusCode::OK);

    let item = &body["data"]["projection"][0];
    assert!(close(&item["avg_daily_sales"], 3.0));
    assert!(close(&item["projected_consumption"], 9.0));
    assert_eq!(body["data"]["summary"]["projection_type"], "linear");
}

#[tokio::test]
async fn sales_outside_history_window_are_ignored() {
    let app = TestApp::new().await;
    let coffee = seed_coffee(&app).await;
    // the reference day itself and anything older than the window
    app.record_sale(coffee, None, date(2024, 3, 10), 100.0).await;
    app.record_sale(coffee, None, date(2024, 3, 2), 100.0).await;

    let (_, body) = project(&app, "resale", "").await;
    assert!(close(&body["data"]["projection"][0]["total_history_sales"], 21.0));
}

#[tokio::test]
async fn raw_material_projection_follows_linked_product_sales() {
    let app = TestApp::new().await;
    let bread = app.create_product(NewProduct::named("Bread")).await;
    let flour = app
        .create_material(NewMaterial {
            current_stock: 1.0,
            min_stock: 0.5,
            conversion_factor: 4.0,
            ..NewMaterial::named("Flour")
        })
        .await;
    app.link(bread, flour, 0.25).await;
    app.record_sale(bread, None, date(2024, 3, 5), 8.0).await;

    let (status, body) = project(&app, "raw-materials", "").await;
    assert_eq!(status, StatusCode::OK);

    let item = &body["data"]["projection"][0];
    assert_eq!(item["item_id"], flour.to_string());
    assert!(close(&item["averages_by_day"]["tuesday"], 2.0));
    assert!(close(&item["projected_consumption"], 2.0));
    assert!(close(&item["purchase_need"], 1.5));
    // raw materials keep fractional purchase quantities
    assert!(close(&item["purchase_quantity"], 0.375));
    assert_eq!(item["stock_status"], "ok");
}

#[tokio::test]
async fn unlinked_raw_material_projects_zero_consumption() {
    let app = TestApp::new().await;
    app.create_material(NewMaterial {
        current_stock: 0.0,
        min_stock: 2.0,
        ..NewMaterial::named("Salt")
    })
    .await;

    let (_, body) = project(&app, "raw-materials", "").await;
    let item = &body["data"]["projection"][0];
    assert!(close(&item["projected_consumption"], 0.0));
    assert!(close(&item["purchase_need"], 2.0));
    assert_eq!(item["stock_status"], "out");
    assert_eq!(body["data"]["summary"]["out_of_stock"], 1);
}

#[tokio::test]
async fn company_filter_includes_shared_items_only() {
    let app = TestApp::new().await;
    let downtown = app.create_company("Downtown").await;
    let uptown = app.create_company("Uptown").await;

    app.create_product(NewProduct::named("Shared")).await;
    app.create_product(NewProduct {
        company_id: Some(downtown),
        ..NewProduct::named("Downtown Special")
    })
    .await;
    app.create_product(NewProduct {
        company_id: Some(uptown),
        ..NewProduct::named("Uptown Special")
    })
    .await;

    let (_, body) = project(&app, "resale", &format!("&company_id={}", downtown)).await;
    let names: Vec<&str> = body["data"]["projection"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["item_name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Downtown Special", "Shared"]);

    let (_, all) = project(&app, "resale", "").await;
    assert_eq!(all["data"]["summary"]["total_items"], 3);
}

#[tokio::test]
async fn inactive_products_are_not_projected() {
    let app = TestApp::new().await;
    app.create_product(NewProduct {
        active: false,
        ..NewProduct::named("Retired")
    })
    .await;

    let (status, body) = project(&app, "resale", "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["projection"].as_array().unwrap().len(), 0);
    assert_eq!(body["data"]["summary"]["total_items"], 0);
}

#[tokio::test]
async fn empty_group_returns_empty_projection() {
    let app = TestApp::new().await;

    let (status, body) = project(&app, "raw-materials", "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["projection"], serde_json::json!([]));
    assert!(close(&body["data"]["summary"]["total_projected_consumption"], 0.0));
}

#[tokio::test]
async fn invalid_parameters_are_rejected() {
    let app = TestApp::new().await;

    for uri in [
        "/api/v1/projection/resale".to_string(),
        "/api/v1/projection/resale?group_id=not-a-uuid".to_string(),
        format!("/api/v1/projection/resale?group_id={}&projection_days=0", app.group_id),
        format!("/api/v1/projection/resale?group_id={}&history_days=366", app.group_id),
        format!("/api/v1/projection/resale?group_id={}&projection_type=monthly", app.group_id),
        format!("/api/v1/projection/raw-materials?group_id={}&reference_date=2024-13-01", app.group_id),
    ] {
        let (status, body) = response_json(app.get(&uri).await).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "uri: {}", uri);
        assert_eq!(body["error"], "Bad Request");
        assert!(body["message"].is_string());
    }
}

#[tokio::test]
async fn responses_echo_request_id() {
    let app = TestApp::new().await;
    let response = app
        .request(
            axum::http::Method::GET,
            &format!("/api/v1/projection/resale?group_id={}", app.group_id),
            None,
        )
        .await;
    let header = response
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let (_, body) = response_json(response).await;
    assert!(header.is_some());
    assert_eq!(body["meta"]["request_id"].as_str(), header.as_deref());
}

#[tokio::test]
async fn reference_dates_at_calendar_edges_are_bad_requests() {
    let app = TestApp::new().await;
    seed_coffee(&app).await;

    for (kind, edge) in [
        ("resale", chrono::NaiveDate::MAX),
        ("raw-materials", chrono::NaiveDate::MAX),
        ("resale", chrono::NaiveDate::MIN),
        ("raw-materials", chrono::NaiveDate::MIN),
    ] {
        let encoded = edge.to_string().replace('+', "%2B");
        let uri = format!(
            "/api/v1/projection/{}?group_id={}&reference_date={}",
            kind, app.group_id, encoded
        );
        let (status, body) = response_json(app.get(&uri).await).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "uri: {}", uri);
        assert!(body["message"].as_str().unwrap().contains("reference_date"));
    }
}
