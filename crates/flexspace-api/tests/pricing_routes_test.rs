//! HTTP tests for the pricing routes over the seed data

mod common;

use actix_web::{test, web, App};
use serde_json::{json, Value};

async fn state() -> flexspace_api::AppState {
    common::seeded_state().await
}

async fn post_price(body: Value) -> (u16, Value) {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state().await))
            .configure(flexspace_api::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/bookings/calculate-price")
        .set_json(&body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    let status = resp.status().as_u16();
    let body: Value = test::read_body_json(resp).await;
    (status, body)
}

#[actix_rt::test]
async fn test_health_check() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state().await))
            .configure(flexspace_api::configure),
    )
    .await;

    let req = test::TestRequest::get().uri("/api/v1/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");
}

#[actix_rt::test]
async fn test_calculate_price_single_period() {
    let (status, body) = post_price(json!({
        "unit_id": "unit_dt_exec_001",
        "start_date": "2025-01-15",
        "end_date": "2025-01-20"
    }))
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["success"], true);
    let data = &body["data"];
    assert_eq!(data["total_price"], 750.0);
    assert_eq!(data["breakdown"][0]["rate_amount"], 150.0);
    assert_eq!(data["breakdown"][0]["subtotal"], 750.0);
    assert_eq!(data["currency"], "USD");
    assert_eq!(data["booking_details"]["room_type_name"], "Executive Office");
    assert_eq!(data["booking_details"]["total_nights"], 5);
    assert_eq!(data["breakdown"][0]["rate_type"], "daily");
    assert_eq!(data["breakdown"][0]["period_end"], "2025-01-20");
    assert!(data.get("gaps").is_none());
}

#[actix_rt::test]
async fn test_calculate_price_overlap_warning() {
    let (status, body) = post_price(json!({
        "unit_id": "unit_tc_office_001",
        "start_date": "2025-06-20",
        "end_date": "2025-06-25"
    }))
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["data"]["total_price"], 625.0);
    assert_eq!(
        body["data"]["overlaps"][0]["winning_rate_id"],
        "rate_office_tc_daily_overlap"
    );
    assert!(body["data"]["warnings"][0]
        .as_str()
        .unwrap()
        .starts_with("overlapping rates detected"));
}

#[actix_rt::test]
async fn test_rate_gap_is_unprocessable() {
    let (status, body) = post_price(json!({
        "unit_id": "unit_dt_exec_001",
        "start_date": "2025-03-25",
        "end_date": "2025-04-05"
    }))
    .await;

    assert_eq!(status, 422);
    assert_eq!(body["error"], "RATE_GAP");
    assert_eq!(body["status"], 422);
    assert_eq!(body["details"]["gaps"][0]["start_date"], "2025-04-01");
    assert_eq!(body["details"]["gaps"][0]["end_date"], "2025-04-04");
}

#[actix_rt::test]
async fn test_partial_pricing_lists_gaps() {
    let (status, body) = post_price(json!({
        "unit_id": "unit_dt_exec_001",
        "start_date": "2025-03-25",
        "end_date": "2025-04-05",
        "allow_partial": true
    }))
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["data"]["total_price"], 1050.0);
    assert_eq!(body["data"]["gaps"][0]["nights"], 4);
    assert!(body["message"].is_string());
}

#[actix_rt::test]
async fn test_unknown_unit_is_not_found() {
    let (status, body) = post_price(json!({
        "unit_id": "unit_nope",
        "start_date": "2025-01-15",
        "end_date": "2025-01-20"
    }))
    .await;

    assert_eq!(status, 404);
    assert_eq!(body["error"], "UNIT_NOT_FOUND");
}

#[actix_rt::test]
async fn test_invalid_dates_are_bad_request() {
    for (start, end) in [
        ("2025-01-20", "2025-01-20"),
        ("2025-01-20", "2025-01-15"),
        ("2025-02-30", "2025-03-02"),
        ("15/01/2025", "2025-01-20"),
    ] {
        let (status, body) = post_price(json!({
            "unit_id": "unit_dt_exec_001",
            "start_date": start,
            "end_date": end
        }))
        .await;

        assert_eq!(status, 400, "{} .. {}", start, end);
        assert_eq!(body["error"], "INVALID_DATE_RANGE");
    }
}

#[actix_rt::test]
async fn test_missing_unit_id_is_validation_error() {
    let (status, body) = post_price(json!({
        "start_date": "2025-01-15",
        "end_date": "2025-01-20"
    }))
    .await;

    assert_eq!(status, 400);
    assert_eq!(body["error"], "VALIDATION_ERROR");
}

#[actix_rt::test]
async fn test_malformed_body_is_validation_error() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state().await))
            .configure(flexspace_api::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/bookings/calculate-price")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"unit_id\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 400);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
}
