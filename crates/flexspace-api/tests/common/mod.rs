use flexspace_api::AppState;
use flexspace_db::{
    seed_if_empty, JsonBookingRepository, JsonRateRepository, JsonRoomTypeRepository, JsonStore,
    JsonUnitRepository,
};
use flexspace_pricing::{BookingServiceImpl, PricingEngine, PricingServiceImpl};
use std::sync::Arc;

/// Application state over an in-memory store holding the seed data
pub async fn seeded_state() -> AppState {
    let store = Arc::new(JsonStore::in_memory());
    seed_if_empty(&store).await.unwrap();

    let units = Arc::new(JsonUnitRepository::new(store.clone()));
    let pricing = Arc::new(PricingServiceImpl::new(
        units.clone(),
        Arc::new(JsonRoomTypeRepository::new(store.clone())),
        Arc::new(JsonRateRepository::new(store.clone())),
        PricingEngine::default(),
    ));
    let bookings = BookingServiceImpl::new(
        units,
        Arc::new(JsonBookingRepository::new(store)),
        pricing.clone(),
    );
    AppState::new(pricing, Arc::new(bookings))
}
