//! Booking creation over the reference seed data

use flexspace_core::{
    models::{BookingFilter, BookingRequest, BookingStatus, NewBooking},
    traits::{BookingService, Repository},
    PricingError,
};
use flexspace_db::{
    seed_if_empty, JsonBookingRepository, JsonRateRepository, JsonRoomTypeRepository, JsonStore,
    JsonUnitRepository,
};
use flexspace_pricing::{BookingServiceImpl, PricingEngine, PricingServiceImpl};
use rust_decimal_macros::dec;
use std::sync::Arc;

type SeedBookings = BookingServiceImpl<JsonUnitRepository, JsonBookingRepository>;

async fn seeded_store() -> Arc<JsonStore> {
    let store = Arc::new(JsonStore::in_memory());
    seed_if_empty(&store).await.unwrap();
    store
}

fn service(store: Arc<JsonStore>) -> SeedBookings {
    let pricing = PricingServiceImpl::new(
        Arc::new(JsonUnitRepository::new(store.clone())),
        Arc::new(JsonRoomTypeRepository::new(store.clone())),
        Arc::new(JsonRateRepository::new(store.clone())),
        PricingEngine::default(),
    );
    BookingServiceImpl::new(
        Arc::new(JsonUnitRepository::new(store.clone())),
        Arc::new(JsonBookingRepository::new(store)),
        Arc::new(pricing),
    )
}

fn new_booking(unit_id: &str, start: &str, end: &str) -> NewBooking {
    NewBooking {
        request: BookingRequest::parse(unit_id, start, end).unwrap(),
        customer_name: "Jane Smith".to_string(),
        customer_email: "jane@example.com".to_string(),
    }
}

#[tokio::test]
async fn test_create_booking_stores_price_and_currency() {
    let store = seeded_store().await;
    let svc = service(store.clone());

    let booking = svc
        .create_booking(&new_booking("unit_dt_exec_001", "2025-01-15", "2025-01-20"))
        .await
        .unwrap();

    assert!(booking.booking_id.starts_with("book_"));
    assert_eq!(booking.calculated_price, dec!(750.00));
    assert_eq!(booking.currency, "USD");
    assert_eq!(booking.status, BookingStatus::Pending);

    let stored = JsonBookingRepository::new(store)
        .find_by_id(&booking.booking_id)
        .await
        .unwrap();
    assert_eq!(stored, Some(booking));
}

#[tokio::test]
async fn test_occupied_unit_is_not_available() {
    let store = seeded_store().await;
    let svc = service(store.clone());

    let err = svc
        .create_booking(&new_booking("unit_dt_exec_003", "2025-03-01", "2025-03-05"))
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "UNIT_NOT_AVAILABLE");

    let err = svc
        .create_booking(&new_booking("unit_dt_desk_010", "2025-03-01", "2025-03-05"))
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "UNIT_NOT_AVAILABLE");
    assert_eq!(store.bookings.len(), 2);
}

#[tokio::test]
async fn test_unpriceable_stay_creates_nothing() {
    let store = seeded_store().await;
    let svc = service(store.clone());

    let err = svc
        .create_booking(&new_booking("unit_dt_exec_001", "2025-03-25", "2025-04-05"))
        .await
        .unwrap_err();
    assert!(matches!(err, PricingError::RateGap { .. }));

    let err = svc
        .create_booking(&new_booking("unit_nope", "2025-01-15", "2025-01-20"))
        .await
        .unwrap_err();
    assert_eq!(err, PricingError::UnitNotFound("unit_nope".to_string()));

    let err = svc
        .create_booking(&new_booking("unit_dt_exec_001", "2025-01-20", "2025-01-20"))
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "INVALID_DATE_RANGE");
    assert_eq!(store.bookings.len(), 2);
}

#[tokio::test]
async fn test_list_and_cancel() {
    let svc = service(seeded_store().await);
    let created = svc
        .create_booking(&new_booking("unit_dt_desk_001", "2025-03-01", "2025-03-04"))
        .await
        .unwrap();
    assert_eq!(created.calculated_price, dec!(150.00));

    let pending = svc
        .list_bookings(&BookingFilter {
            status: Some(BookingStatus::Pending),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(pending, vec![created.clone()]);

    let cancelled = svc.cancel_booking(&created.booking_id).await.unwrap();
    assert_eq!(cancelled.status, BookingStatus::Cancelled);
    assert_eq!(
        svc.get_booking(&created.booking_id).await.unwrap().status,
        BookingStatus::Cancelled
    );
    assert_eq!(
        svc.cancel_booking(&created.booking_id).await.unwrap().status,
        BookingStatus::Cancelled
    );

    let err = svc.get_booking("book_missing").await.unwrap_err();
    assert_eq!(err.error_code(), "BOOKING_NOT_FOUND");
    assert_eq!(svc.list_bookings(&BookingFilter::default()).await.unwrap().len(), 3);
}
