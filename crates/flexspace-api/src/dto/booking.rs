//! Booking DTOs

use flexspace_core::{
    models::{Booking, BookingFilter, BookingRequest, BookingStatus, NewBooking},
    PricingError, PricingResult,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request body of `POST /api/v1/bookings`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateBookingRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "unit_id is required"))]
    pub unit_id: String,

    #[serde(default)]
    #[validate(length(min = 1, max = 200, message = "customer_name is required"))]
    pub customer_name: String,

    #[serde(default)]
    #[validate(email(message = "customer_email must be a valid email address"))]
    pub customer_email: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "start_date is required"))]
    pub start_date: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "end_date is required"))]
    pub end_date: String,
}

impl CreateBookingRequest {
    pub fn to_new_booking(&self) -> PricingResult<NewBooking> {
        Ok(NewBooking {
            request: BookingRequest::parse(self.unit_id.trim(), &self.start_date, &self.end_date)?,
            customer_name: self.customer_name.trim().to_string(),
            customer_email: self.customer_email.trim().to_string(),
        })
    }
}

/// Query string of `GET /api/v1/bookings`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookingListQuery {
    pub unit_id: Option<String>,
    pub status: Option<String>,
}

impl BookingListQuery {
    pub fn to_filter(&self) -> PricingResult<BookingFilter> {
        let status = match self.status.as_deref() {
            Some(status) => Some(BookingStatus::from_str(status).ok_or_else(|| {
                PricingError::InvalidBooking(format!("unknown booking status '{}'", status))
            })?),
            None => None,
        };
        Ok(BookingFilter {
            unit_id: self.unit_id.clone(),
            status,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BookingListResponse {
    pub bookings: Vec<Booking>,
    pub count: usize,
}

impl From<Vec<Booking>> for BookingListResponse {
    fn from(bookings: Vec<Booking>) -> Self {
        Self {
            count: bookings.len(),
            bookings,
        }
    }
}
