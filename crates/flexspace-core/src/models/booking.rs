//! Booking models
//!
//! `BookingRequest` is the input to the pricing core and is never persisted
//! by it. `Booking` is the stored reservation created from a priced request.
//! The stay follows the nights model: `start_date` is the arrival day and
//! `end_date` the departure day, which is not charged.

use crate::error::PricingError;
use crate::interval::DateRange;
use crate::PricingResult;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Date format accepted at the boundary
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a strict `YYYY-MM-DD` calendar date.
///
/// Rejects unpadded fields (`2025-1-5`), signed or extended years, and
/// impossible dates such as `2025-02-30`.
pub fn parse_date(value: &str) -> PricingResult<NaiveDate> {
    let bytes = value.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });

    if !well_formed {
        return Err(PricingError::InvalidDateRange(format!(
            "'{}' is not a YYYY-MM-DD date",
            value
        )));
    }

    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| {
        PricingError::InvalidDateRange(format!("'{}' is not a valid calendar date", value))
    })
}

/// Request to price a stay in one unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRequest {
    /// Unit being booked
    pub unit_id: String,

    /// Arrival day (first charged night)
    pub start_date: NaiveDate,

    /// Departure day (not charged)
    pub end_date: NaiveDate,
}

impl BookingRequest {
    pub fn new(unit_id: impl Into<String>, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            unit_id: unit_id.into(),
            start_date,
            end_date,
        }
    }

    /// Build a request from raw `YYYY-MM-DD` strings
    pub fn parse(unit_id: impl Into<String>, start_date: &str, end_date: &str) -> PricingResult<Self> {
        Ok(Self::new(unit_id, parse_date(start_date)?, parse_date(end_date)?))
    }

    /// Charged nights as a half-open range.
    ///
    /// Same-day and inverted requests are `InvalidDateRange`.
    pub fn stay(&self) -> PricingResult<DateRange> {
        DateRange::new(self.start_date, self.end_date).ok_or_else(|| {
            PricingError::InvalidDateRange(format!(
                "start_date {} must be before end_date {}",
                self.start_date, self.end_date
            ))
        })
    }
}

/// Caller-controlled pricing options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PricingOptions {
    /// Price covered days and report gaps instead of failing with `RATE_GAP`
    #[serde(default)]
    pub allow_partial: bool,
}

impl PricingOptions {
    pub fn partial() -> Self {
        Self {
            allow_partial: true,
        }
    }
}

/// Lifecycle status of a stored booking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    /// Created, awaiting confirmation
    #[default]
    Pending,
    /// Confirmed by the operator
    Confirmed,
    /// Cancelled; kept for history
    Cancelled,
}

impl BookingStatus {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "pending" => Some(BookingStatus::Pending),
            "confirmed" => Some(BookingStatus::Confirmed),
            "cancelled" => Some(BookingStatus::Cancelled),
            _ => None,
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookingStatus::Pending => write!(f, "pending"),
            BookingStatus::Confirmed => write!(f, "confirmed"),
            BookingStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Customer and stay details of a booking to create
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBooking {
    pub request: BookingRequest,
    pub customer_name: String,
    pub customer_email: String,
}

/// Stored booking entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    /// Unique identifier (`book_{uuid}`)
    pub booking_id: String,

    /// Booked unit
    pub unit_id: String,

    pub customer_name: String,
    pub customer_email: String,

    /// Arrival day
    pub start_date: NaiveDate,

    /// Departure day (not charged)
    pub end_date: NaiveDate,

    /// Total price at creation time
    #[serde(with = "rust_decimal::serde::float")]
    pub calculated_price: Decimal,

    /// ISO-4217 code of the rates used
    pub currency: String,

    #[serde(default)]
    pub status: BookingStatus,
}

impl Booking {
    /// Stay as a booking request, e.g. to price it again
    pub fn request(&self) -> BookingRequest {
        BookingRequest::new(self.unit_id.clone(), self.start_date, self.end_date)
    }

    pub fn is_cancelled(&self) -> bool {
        self.status == BookingStatus::Cancelled
    }
}

/// Optional filters for listing bookings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingFilter {
    pub unit_id: Option<String>,
    pub status: Option<BookingStatus>,
}

impl BookingFilter {
    pub fn matches(&self, booking: &Booking) -> bool {
        self.unit_id
            .as_deref()
            .map_or(true, |unit_id| booking.unit_id == unit_id)
            && self.status.map_or(true, |status| booking.status == status)
    }
}
