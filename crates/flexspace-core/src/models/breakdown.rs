//! Price breakdown model
//!
//! The breakdown is the auditable output of the pricing engine. Segment and
//! overlap periods are half-open: `period_end` is the first day not covered,
//! so consecutive segments share a boundary day.

use super::rate::RateType;
use crate::interval::DateRange;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

/// Maximal run of booked nights priced by one rate record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSegment {
    /// First night in the segment
    pub period_start: NaiveDate,

    /// Day after the last night in the segment
    pub period_end: NaiveDate,

    /// Number of nights
    pub days: i64,

    /// Billed quantity in the rate's unit (hours, nights or months)
    pub units_of_duration: Decimal,

    /// Granularity of the applied rate
    pub rate_type: RateType,

    /// Applied rate record
    pub rate_id: String,

    /// Amount of the applied rate record
    pub rate_amount: Decimal,

    /// Currency of the applied rate record
    pub currency: String,

    /// Charge for the segment, rounded to 2 decimal places
    pub subtotal: Decimal,
}

impl PriceSegment {
    /// Span covered by the segment
    pub fn period(&self) -> Option<DateRange> {
        DateRange::new(self.period_start, self.period_end)
    }
}

/// Kind of policy adjustment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentKind {
    LengthOfStayDiscount,
    WeekendPremium,
}

impl fmt::Display for AdjustmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdjustmentKind::LengthOfStayDiscount => write!(f, "length_of_stay_discount"),
            AdjustmentKind::WeekendPremium => write!(f, "weekend_premium"),
        }
    }
}

/// Signed adjustment line; discounts are negative
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceAdjustment {
    pub kind: AdjustmentKind,
    pub description: String,
    pub amount: Decimal,
}

/// Record of one overlap resolved by the rate selector
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverlapResolution {
    /// First day where several records of `rate_type` competed
    pub period_start: NaiveDate,

    /// Day after the last contested day
    pub period_end: NaiveDate,

    pub rate_type: RateType,

    /// Record applied to the contested days
    pub winning_rate_id: String,

    /// Records valid on those days but not applied
    pub superseded_rate_ids: Vec<String>,
}

/// Full pricing result for a booking
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceBreakdown {
    /// Room type the rates were taken from
    pub room_type_id: String,

    /// Booked nights
    pub total_nights: i64,

    /// Sum of segment subtotals before adjustments
    pub subtotal: Decimal,

    /// Policy adjustments applied on top of `subtotal`
    pub adjustments: Vec<PriceAdjustment>,

    /// Amount due, rounded to 2 decimal places
    pub total_price: Decimal,

    /// Currency shared by every segment
    pub currency: String,

    /// Chronologically ordered, non-overlapping segments
    pub segments: Vec<PriceSegment>,

    /// Unpriced sub-ranges (only with partial pricing)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub gaps: Vec<DateRange>,

    /// Overlap resolutions that affected the booking
    pub overlaps: Vec<OverlapResolution>,

    /// Human-readable data-quality warnings
    pub warnings: Vec<String>,
}

impl PriceBreakdown {
    /// Nights covered by priced segments
    pub fn priced_nights(&self) -> i64 {
        self.segments.iter().map(|s| s.days).sum()
    }

    /// Check whether every night of the booking was priced
    pub fn is_complete(&self) -> bool {
        self.gaps.is_empty()
    }
}

/// Breakdown together with the entities it was priced for
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceQuote {
    pub unit_id: String,
    pub room_type_id: String,
    pub room_type_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub breakdown: PriceBreakdown,
}
