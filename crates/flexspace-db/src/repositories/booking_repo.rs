//! Booking repository implementation

use super::page;
use crate::store::JsonStore;
use async_trait::async_trait;
use flexspace_core::{
    models::{Booking, BookingFilter},
    traits::{BookingRepository, Repository},
    AppError, AppResult,
};
use std::sync::Arc;
use tracing::{debug, info, instrument};
use uuid::Uuid;

/// JSON store implementation of BookingRepository
pub struct JsonBookingRepository {
    store: Arc<JsonStore>,
}

impl JsonBookingRepository {
    /// Create a new booking repository
    pub fn new(store: Arc<JsonStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Repository<Booking, str> for JsonBookingRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Booking>> {
        debug!("Finding booking by id: {}", id);
        Ok(self
            .store
            .bookings
            .read(|bookings| bookings.iter().find(|b| b.booking_id == id).cloned()))
    }

    #[instrument(skip(self))]
    async fn find_all(&self, limit: i64, offset: i64) -> AppResult<Vec<Booking>> {
        Ok(self.store.bookings.read(|bookings| page(bookings, limit, offset)))
    }

    async fn count(&self) -> AppResult<i64> {
        Ok(self.store.bookings.len() as i64)
    }

    /// Store a new booking, generating `book_{uuid}` when no id is given
    #[instrument(skip(self, entity), fields(unit_id = %entity.unit_id))]
    async fn create(&self, entity: &Booking) -> AppResult<Booking> {
        let mut booking = entity.clone();
        if booking.booking_id.trim().is_empty() {
            booking.booking_id = format!("book_{}", Uuid::new_v4());
        }

        let created = self
            .store
            .bookings
            .mutate(|bookings| {
                if bookings.iter().any(|b| b.booking_id == booking.booking_id) {
                    return Err(AppError::AlreadyExists(format!(
                        "Booking {}",
                        booking.booking_id
                    )));
                }
                bookings.push(booking.clone());
                Ok(booking)
            })
            .await?;

        info!(
            booking_id = %created.booking_id,
            status = %created.status,
            "Booking stored"
        );
        Ok(created)
    }

    #[instrument(skip(self, entity), fields(booking_id = %entity.booking_id))]
    async fn update(&self, entity: &Booking) -> AppResult<Booking> {
        let booking = entity.clone();
        self.store
            .bookings
            .mutate(|bookings| {
                match bookings.iter_mut().find(|b| b.booking_id == booking.booking_id) {
                    Some(existing) => {
                        *existing = booking.clone();
                        Ok(booking)
                    }
                    None => Err(AppError::NotFound(format!("Booking {}", booking.booking_id))),
                }
            })
            .await
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> AppResult<bool> {
        self.store
            .bookings
            .mutate(|bookings| {
                let before = bookings.len();
                bookings.retain(|b| b.booking_id != id);
                Ok(bookings.len() != before)
            })
            .await
    }
}

#[async_trait]
impl BookingRepository for JsonBookingRepository {
    #[instrument(skip(self))]
    async fn find_filtered(&self, filter: &BookingFilter) -> AppResult<Vec<Booking>> {
        let bookings: Vec<Booking> = self.store.bookings.read(|bookings| {
            bookings
                .iter()
                .filter(|b| filter.matches(b))
                .cloned()
                .collect()
        });
        debug!("Found {} bookings", bookings.len());
        Ok(bookings)
    }
}
