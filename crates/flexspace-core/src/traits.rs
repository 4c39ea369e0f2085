//! Common traits for repositories and services
//!
//! The repository traits are the collaborator contracts the pricing core
//! reads through: unit lookup, room type lookup, rates by room type and the
//! room type's pricing configuration. Bookings are stored through their own
//! repository and created by the booking service from a priced request.

use crate::error::AppError;
use crate::models::{
    Booking, BookingFilter, BookingRequest, NewBooking, PriceBreakdown, PriceQuote,
    PricingConfig, PricingOptions, RateRecord, RoomType, Unit,
};
use crate::PricingResult;
use async_trait::async_trait;
use chrono::NaiveDate;

/// Generic repository trait for CRUD operations
#[async_trait]
pub trait Repository<T, ID: ?Sized + Sync>: Send + Sync {
    /// Find entity by ID
    async fn find_by_id(&self, id: &ID) -> Result<Option<T>, AppError>;

    /// Find all entities with pagination
    async fn find_all(&self, limit: i64, offset: i64) -> Result<Vec<T>, AppError>;

    /// Count total entities
    async fn count(&self) -> Result<i64, AppError>;

    /// Create a new entity
    async fn create(&self, entity: &T) -> Result<T, AppError>;

    /// Update an existing entity
    async fn update(&self, entity: &T) -> Result<T, AppError>;

    /// Delete entity by ID
    async fn delete(&self, id: &ID) -> Result<bool, AppError>;
}

/// Unit repository trait
#[async_trait]
pub trait UnitRepository: Repository<Unit, str> {
    /// List the units of a room type
    async fn find_by_room_type(&self, room_type_id: &str) -> Result<Vec<Unit>, AppError>;
}

/// Room type repository trait
#[async_trait]
pub trait RoomTypeRepository: Repository<RoomType, str> {
    /// Pricing configuration of a room type, defaults when the room type
    /// has none or does not exist
    async fn pricing_config(&self, room_type_id: &str) -> Result<PricingConfig, AppError> {
        Ok(self
            .find_by_id(room_type_id)
            .await?
            .map(|room_type| room_type.effective_pricing_config())
            .unwrap_or_default())
    }
}

/// Rate record repository trait
#[async_trait]
pub trait RateRepository: Repository<RateRecord, str> {
    /// All rate records of a room type, in storage order
    async fn find_by_room_type(&self, room_type_id: &str) -> Result<Vec<RateRecord>, AppError>;
}

/// Booking repository trait
#[async_trait]
pub trait BookingRepository: Repository<Booking, str> {
    /// Bookings matching every set field of `filter`, in storage order
    async fn find_filtered(&self, filter: &BookingFilter) -> Result<Vec<Booking>, AppError>;
}

/// Pricing service trait
#[async_trait]
pub trait PricingService: Send + Sync {
    /// Price a booking request
    async fn quote(&self, request: &BookingRequest, options: PricingOptions)
        -> PricingResult<PriceQuote>;

    /// Price a stay in a unit, failing on any gap in rate coverage
    async fn calculate_price(
        &self,
        unit_id: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> PricingResult<PriceBreakdown> {
        let request = BookingRequest::new(unit_id, start_date, end_date);
        let quote = self.quote(&request, PricingOptions::default()).await?;
        Ok(quote.breakdown)
    }
}

/// Booking service trait
#[async_trait]
pub trait BookingService: Send + Sync {
    /// Price and store a new pending booking for an available unit
    async fn create_booking(&self, booking: &NewBooking) -> PricingResult<Booking>;

    async fn get_booking(&self, booking_id: &str) -> PricingResult<Booking>;

    async fn list_bookings(&self, filter: &BookingFilter) -> PricingResult<Vec<Booking>>;

    /// Mark a booking cancelled; the record is kept
    async fn cancel_booking(&self, booking_id: &str) -> PricingResult<Booking>;
}
