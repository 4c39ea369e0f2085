//! Price calculation DTOs

use super::common::DateRangeResponse;
use chrono::NaiveDate;
use flexspace_core::{
    models::{
        AdjustmentKind, BookingRequest, OverlapResolution, PriceAdjustment, PriceQuote,
        PriceSegment, PricingOptions, RateType,
    },
    PricingResult,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request body of `POST /api/v1/bookings/calculate-price`
///
/// Dates stay strings until the booking is parsed so that malformed dates
/// surface as `INVALID_DATE_RANGE` rather than a body deserialization error.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CalculatePriceRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "unit_id is required"))]
    pub unit_id: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "start_date is required"))]
    pub start_date: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "end_date is required"))]
    pub end_date: String,

    /// Price the covered part of a booking that has gaps
    #[serde(default)]
    pub allow_partial: bool,
}

impl CalculatePriceRequest {
    /// Parse into a booking request
    pub fn to_booking(&self) -> PricingResult<BookingRequest> {
        BookingRequest::parse(self.unit_id.trim(), &self.start_date, &self.end_date)
    }

    pub fn options(&self) -> PricingOptions {
        PricingOptions {
            allow_partial: self.allow_partial,
        }
    }
}

/// What was priced
#[derive(Debug, Clone, Serialize)]
pub struct BookingDetails {
    pub unit_id: String,
    pub room_type_id: String,
    pub room_type_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_nights: i64,
}

/// One priced segment; money fields are JSON numbers
#[derive(Debug, Clone, Serialize)]
pub struct SegmentResponse {
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub days: i64,
    #[serde(with = "rust_decimal::serde::float")]
    pub units_of_duration: Decimal,
    pub rate_type: RateType,
    pub rate_id: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub rate_amount: Decimal,
    pub currency: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub subtotal: Decimal,
}

impl From<PriceSegment> for SegmentResponse {
    fn from(segment: PriceSegment) -> Self {
        Self {
            period_start: segment.period_start,
            period_end: segment.period_end,
            days: segment.days,
            units_of_duration: segment.units_of_duration,
            rate_type: segment.rate_type,
            rate_id: segment.rate_id,
            rate_amount: segment.rate_amount,
            currency: segment.currency,
            subtotal: segment.subtotal,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AdjustmentResponse {
    pub kind: AdjustmentKind,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

impl From<PriceAdjustment> for AdjustmentResponse {
    fn from(adjustment: PriceAdjustment) -> Self {
        Self {
            kind: adjustment.kind,
            description: adjustment.description,
            amount: adjustment.amount,
        }
    }
}

/// Price calculation response
#[derive(Debug, Clone, Serialize)]
pub struct CalculatePriceResponse {
    #[serde(with = "rust_decimal::serde::float")]
    pub total_price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub subtotal: Decimal,
    pub currency: String,
    pub booking_details: BookingDetails,
    /// Priced segments in chronological order
    pub breakdown: Vec<SegmentResponse>,
    pub adjustments: Vec<AdjustmentResponse>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub gaps: Vec<DateRangeResponse>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub overlaps: Vec<OverlapResolution>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl From<PriceQuote> for CalculatePriceResponse {
    fn from(quote: PriceQuote) -> Self {
        let breakdown = quote.breakdown;
        Self {
            total_price: breakdown.total_price,
            subtotal: breakdown.subtotal,
            currency: breakdown.currency,
            booking_details: BookingDetails {
                unit_id: quote.unit_id,
                room_type_id: quote.room_type_id,
                room_type_name: quote.room_type_name,
                start_date: quote.start_date,
                end_date: quote.end_date,
                total_nights: breakdown.total_nights,
            },
            breakdown: breakdown.segments.into_iter().map(Into::into).collect(),
            adjustments: breakdown.adjustments.into_iter().map(Into::into).collect(),
            gaps: breakdown.gaps.iter().map(DateRangeResponse::from).collect(),
            overlaps: breakdown.overlaps,
            warnings: breakdown.warnings,
        }
    }
}
