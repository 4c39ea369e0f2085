//! Repository behavior over the JSON store

use chrono::NaiveDate;
use flexspace_core::{
    models::{
        Booking, BookingFilter, BookingStatus, PricingConfig, RateRecord, RateSelectionStrategy,
        RateType, RoomType,
    },
    traits::{BookingRepository, RateRepository, Repository, RoomTypeRepository, UnitRepository},
};
use flexspace_db::{
    seed_if_empty, JsonBookingRepository, JsonRateRepository, JsonRoomTypeRepository, JsonStore,
    JsonUnitRepository,
};
use rust_decimal_macros::dec;
use std::path::PathBuf;
use std::sync::Arc;

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn temp_dir() -> PathBuf {
    std::env::temp_dir().join(format!("flexspace-repo-{}", uuid::Uuid::new_v4()))
}

async fn seeded() -> Arc<JsonStore> {
    let store = Arc::new(JsonStore::in_memory());
    seed_if_empty(&store).await.unwrap();
    store
}

fn new_rate(rate_id: &str) -> RateRecord {
    RateRecord {
        rate_id: rate_id.to_string(),
        room_type_id: "rt_exec_office_dt".to_string(),
        rate_type: RateType::Daily,
        amount: dec!(160.00),
        currency: "USD".to_string(),
        effective_date: d("2025-04-01"),
        end_date: d("2025-06-30"),
    }
}

#[tokio::test]
async fn test_unit_lookup() {
    let repo = JsonUnitRepository::new(seeded().await);

    let unit = repo.find_by_id("unit_dt_exec_001").await.unwrap().unwrap();
    assert_eq!(unit.room_type_id, "rt_exec_office_dt");
    assert_eq!(unit.unit_number, "EO-101");

    assert!(repo.find_by_id("unit_missing").await.unwrap().is_none());
    assert_eq!(repo.count().await.unwrap(), 30);
    assert_eq!(repo.find_by_room_type("rt_hot_desk_dt").await.unwrap().len(), 10);
    assert_eq!(repo.find_all(5, 28).await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_rates_by_room_type() {
    let repo = JsonRateRepository::new(seeded().await);

    let rates = repo.find_by_room_type("rt_private_office_tc").await.unwrap();
    assert_eq!(rates.len(), 4);
    assert_eq!(rates[0].rate_id, "rate_office_tc_daily_h1");

    assert!(repo
        .find_by_room_type("rt_meeting_large_dt")
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_create_rate_generates_id() {
    let repo = JsonRateRepository::new(seeded().await);

    let created = repo.create(&new_rate("")).await.unwrap();
    assert!(created.rate_id.starts_with("rate_"));
    assert!(created.rate_id.len() > "rate_".len());

    let stored = repo.find_by_id(&created.rate_id).await.unwrap().unwrap();
    assert_eq!(stored, created);
    assert_eq!(repo.count().await.unwrap(), 13);
}

#[tokio::test]
async fn test_create_rate_rejects_invalid_record() {
    let repo = JsonRateRepository::new(seeded().await);

    let err = repo
        .create(&RateRecord {
            currency: "dollars".to_string(),
            ..new_rate("rate_bad")
        })
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "validation_error");
    assert!(err.to_string().contains("currency"));
    assert!(repo.find_by_id("rate_bad").await.unwrap().is_none());
}

#[tokio::test]
async fn test_create_rate_rejects_duplicate_id() {
    let repo = JsonRateRepository::new(seeded().await);
    let err = repo
        .create(&new_rate("rate_exec_dt_daily_q1"))
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "already_exists");
}

#[tokio::test]
async fn test_update_and_delete_rate() {
    let repo = JsonRateRepository::new(seeded().await);

    let updated = repo
        .update(&RateRecord {
            amount: dec!(155.00),
            ..repo.find_by_id("rate_exec_dt_daily_q1").await.unwrap().unwrap()
        })
        .await
        .unwrap();
    assert_eq!(updated.amount, dec!(155.00));

    let missing = repo.update(&new_rate("rate_nope")).await.unwrap_err();
    assert_eq!(missing.error_code(), "not_found");

    assert!(repo.delete("rate_exec_dt_daily_q1").await.unwrap());
    assert!(!repo.delete("rate_exec_dt_daily_q1").await.unwrap());
}

#[tokio::test]
async fn test_pricing_config_defaults() {
    let store = seeded().await;
    let repo = JsonRoomTypeRepository::new(store);

    let config = repo.pricing_config("rt_exec_office_dt").await.unwrap();
    assert_eq!(config, PricingConfig::default());
    assert_eq!(
        repo.pricing_config("rt_unknown").await.unwrap(),
        PricingConfig::default()
    );

    let exec = repo.find_by_id("rt_exec_office_dt").await.unwrap().unwrap();
    repo.update(&RoomType {
        pricing_config: Some(PricingConfig::with_strategy(
            RateSelectionStrategy::LowestPrice,
        )),
        ..exec
    })
    .await
    .unwrap();

    let config = repo.pricing_config("rt_exec_office_dt").await.unwrap();
    assert_eq!(
        config.rate_selection_strategy,
        RateSelectionStrategy::LowestPrice
    );
}

#[tokio::test]
async fn test_writes_survive_reopen() {
    let dir = temp_dir();
    {
        let store = Arc::new(JsonStore::open(&dir).await.unwrap());
        let report = seed_if_empty(&store).await.unwrap();
        assert_eq!(report.rates, 12);

        let repo = JsonRateRepository::new(store);
        repo.create(&new_rate("rate_exec_dt_daily_q2")).await.unwrap();
    }

    let store = Arc::new(JsonStore::open(&dir).await.unwrap());
    let report = seed_if_empty(&store).await.unwrap();
    assert_eq!(report.rates, 0);

    let repo = JsonRateRepository::new(store);
    let rates = repo.find_by_room_type("rt_exec_office_dt").await.unwrap();
    assert_eq!(rates.len(), 4);
    assert!(rates.iter().any(|r| r.rate_id == "rate_exec_dt_daily_q2"));

    let _ = std::fs::remove_dir_all(dir);
}

#[tokio::test]
async fn test_reads_numeric_amounts_from_disk() {
    let dir = temp_dir();
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(
        dir.join("rates.json"),
        r#"[{
            "rate_id": "rate_exec_dt_daily_q1",
            "room_type_id": "rt_exec_office_dt",
            "rate_type": "daily",
            "amount": 150.00,
            "currency": "USD",
            "effective_date": "2025-01-01",
            "end_date": "2025-03-31"
        }]"#,
    )
    .unwrap();

    let repo = JsonRateRepository::new(Arc::new(JsonStore::open(&dir).await.unwrap()));
    let rate = repo.find_by_id("rate_exec_dt_daily_q1").await.unwrap().unwrap();
    assert_eq!(rate.amount, dec!(150));
    assert_eq!(rate.end_date, d("2025-03-31"));

    let _ = std::fs::remove_dir_all(dir);
}

fn new_booking(unit_id: &str) -> Booking {
    Booking {
        booking_id: String::new(),
        unit_id: unit_id.to_string(),
        customer_name: "Jane Smith".to_string(),
        customer_email: "jane@example.com".to_string(),
        start_date: d("2025-01-15"),
        end_date: d("2025-01-20"),
        calculated_price: dec!(750.00),
        currency: "USD".to_string(),
        status: BookingStatus::Pending,
    }
}

#[tokio::test]
async fn test_booking_filters() {
    let repo = JsonBookingRepository::new(seeded().await);
    assert_eq!(repo.count().await.unwrap(), 2);

    let created = repo.create(&new_booking("unit_dt_exec_001")).await.unwrap();
    assert!(created.booking_id.starts_with("book_"));

    let confirmed = repo
        .find_filtered(&BookingFilter {
            status: Some(BookingStatus::Confirmed),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(confirmed.len(), 2);

    let for_unit = repo
        .find_filtered(&BookingFilter {
            unit_id: Some("unit_dt_exec_001".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(for_unit, vec![created]);
}

#[tokio::test]
async fn test_booking_update_and_duplicate() {
    let repo = JsonBookingRepository::new(seeded().await);
    let mut booking = repo.find_by_id("book_001").await.unwrap().unwrap();

    let err = repo.create(&booking).await.unwrap_err();
    assert_eq!(err.error_code(), "already_exists");

    booking.status = BookingStatus::Cancelled;
    repo.update(&booking).await.unwrap();
    assert!(repo.find_by_id("book_001").await.unwrap().unwrap().is_cancelled());

    booking.booking_id = "book_missing".to_string();
    assert_eq!(repo.update(&booking).await.unwrap_err().error_code(), "not_found");
}

#[tokio::test]
async fn test_bookings_persist_with_numeric_price() {
    let dir = temp_dir();
    {
        let repo = JsonBookingRepository::new(Arc::new(JsonStore::open(&dir).await.unwrap()));
        repo.create(&new_booking("unit_dt_exec_001")).await.unwrap();
    }

    let raw: serde_json::Value =
        serde_json::from_slice(&std::fs::read(dir.join("bookings.json")).unwrap()).unwrap();
    assert_eq!(raw[0]["calculated_price"], 750.0);
    assert_eq!(raw[0]["status"], "pending");

    let repo = JsonBookingRepository::new(Arc::new(JsonStore::open(&dir).await.unwrap()));
    let bookings = repo.find_all(10, 0).await.unwrap();
    assert_eq!(bookings.len(), 1);
    assert_eq!(bookings[0].calculated_price, dec!(750));

    let _ = std::fs::remove_dir_all(dir);
}
