//! Booking service implementation
//!
//! Creating a booking checks that the unit is available, prices the stay
//! through the pricing service and stores the result as a pending booking
//! carrying the breakdown total and currency. A stay that cannot be fully
//! priced is refused with the pricing error.

use async_trait::async_trait;
use flexspace_core::{
    models::{Booking, BookingFilter, BookingStatus, NewBooking, UnitStatus},
    traits::{BookingRepository, BookingService, PricingService, UnitRepository},
    PricingError, PricingResult,
};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Booking service backed by the unit and booking repositories
pub struct BookingServiceImpl<U, B>
where
    U: UnitRepository,
    B: BookingRepository,
{
    units: Arc<U>,
    bookings: Arc<B>,
    pricing: Arc<dyn PricingService>,
}

impl<U, B> BookingServiceImpl<U, B>
where
    U: UnitRepository,
    B: BookingRepository,
{
    /// Create a new booking service
    pub fn new(units: Arc<U>, bookings: Arc<B>, pricing: Arc<dyn PricingService>) -> Self {
        Self {
            units,
            bookings,
            pricing,
        }
    }

    async fn find(&self, booking_id: &str) -> PricingResult<Booking> {
        self.bookings.find_by_id(booking_id).await?.ok_or_else(|| {
            warn!("Booking not found: {}", booking_id);
            PricingError::BookingNotFound(booking_id.to_string())
        })
    }
}

fn check_customer(booking: &NewBooking) -> PricingResult<()> {
    if booking.customer_name.trim().is_empty() {
        return Err(PricingError::InvalidBooking(
            "customer_name is required".to_string(),
        ));
    }
    let email = booking.customer_email.trim();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(()),
        _ => Err(PricingError::InvalidBooking(format!(
            "customer_email '{}' is not a valid email address",
            email
        ))),
    }
}

#[async_trait]
impl<U, B> BookingService for BookingServiceImpl<U, B>
where
    U: UnitRepository,
    B: BookingRepository,
{
    #[instrument(skip(self, booking), fields(unit_id = %booking.request.unit_id))]
    async fn create_booking(&self, booking: &NewBooking) -> PricingResult<Booking> {
        check_customer(booking)?;
        let request = &booking.request;
        request.stay()?;

        let unit = self
            .units
            .find_by_id(&request.unit_id)
            .await?
            .ok_or_else(|| PricingError::UnitNotFound(request.unit_id.clone()))?;

        if unit.status != UnitStatus::Available {
            warn!(status = %unit.status, "Unit is not available for booking");
            return Err(PricingError::UnitNotAvailable {
                unit_id: unit.unit_id,
                status: unit.status,
            });
        }

        let breakdown = self
            .pricing
            .calculate_price(&unit.unit_id, request.start_date, request.end_date)
            .await?;

        let created = self
            .bookings
            .create(&Booking {
                booking_id: String::new(),
                unit_id: unit.unit_id,
                customer_name: booking.customer_name.trim().to_string(),
                customer_email: booking.customer_email.trim().to_string(),
                start_date: request.start_date,
                end_date: request.end_date,
                calculated_price: breakdown.total_price,
                currency: breakdown.currency,
                status: BookingStatus::Pending,
            })
            .await?;

        info!(
            booking_id = %created.booking_id,
            total = %created.calculated_price,
            currency = %created.currency,
            "Booking created"
        );
        Ok(created)
    }

    #[instrument(skip(self))]
    async fn get_booking(&self, booking_id: &str) -> PricingResult<Booking> {
        self.find(booking_id).await
    }

    #[instrument(skip(self))]
    async fn list_bookings(&self, filter: &BookingFilter) -> PricingResult<Vec<Booking>> {
        Ok(self.bookings.find_filtered(filter).await?)
    }

    #[instrument(skip(self))]
    async fn cancel_booking(&self, booking_id: &str) -> PricingResult<Booking> {
        let mut booking = self.find(booking_id).await?;
        if booking.is_cancelled() {
            return Ok(booking);
        }

        booking.status = BookingStatus::Cancelled;
        let cancelled = self.bookings.update(&booking).await?;
        info!(booking_id, "Booking cancelled");
        Ok(cancelled)
    }
}
