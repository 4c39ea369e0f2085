//! Rate record model
//!
//! A rate record prices one room type at one granularity (hourly, daily or
//! monthly) for a validity window of calendar days. Windows are stored the
//! way administrators enter them: `end_date` is the last valid day.

use crate::interval::DateRange;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Rate granularity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RateType {
    /// Charged per elapsed hour (24 per booked day)
    Hourly,
    /// Charged per night
    Daily,
    /// Flat monthly amount, pro-rated by day
    Monthly,
}

impl fmt::Display for RateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RateType::Hourly => write!(f, "hourly"),
            RateType::Daily => write!(f, "daily"),
            RateType::Monthly => write!(f, "monthly"),
        }
    }
}

impl RateType {
    /// All rate types, finest granularity first
    pub const ALL: [RateType; 3] = [RateType::Hourly, RateType::Daily, RateType::Monthly];

    /// Parse from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "hourly" => Some(RateType::Hourly),
            "daily" => Some(RateType::Daily),
            "monthly" => Some(RateType::Monthly),
            _ => None,
        }
    }
}

/// Rate record entity
///
/// Multiple records may exist for the same room type and rate type. Their
/// windows are expected not to overlap, but overlapping data is tolerated
/// and resolved by the rate selector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateRecord {
    /// Unique identifier
    pub rate_id: String,

    /// Owning room type
    pub room_type_id: String,

    /// Granularity of `amount`
    pub rate_type: RateType,

    /// Price per hour, night or month depending on `rate_type`
    pub amount: Decimal,

    /// ISO-4217 currency code
    pub currency: String,

    /// First valid day
    pub effective_date: NaiveDate,

    /// Last valid day (inclusive)
    pub end_date: NaiveDate,
}

impl RateRecord {
    /// Validity window as a half-open day range.
    ///
    /// Returns `None` when `end_date` precedes `effective_date`.
    pub fn validity_window(&self) -> Option<DateRange> {
        DateRange::from_inclusive(self.effective_date, self.end_date)
    }

    /// Check whether the rate applies on a given day
    pub fn is_effective_on(&self, date: NaiveDate) -> bool {
        self.effective_date <= date && date <= self.end_date
    }

    /// Check a currency code has the ISO-4217 shape (three upper-case letters)
    pub fn is_valid_currency(code: &str) -> bool {
        code.len() == 3 && code.chars().all(|c| c.is_ascii_uppercase())
    }

    /// Every data-quality problem with this record, empty when valid
    pub fn validation_errors(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.rate_id.trim().is_empty() {
            errors.push("rate_id is required".to_string());
        }
        if self.room_type_id.trim().is_empty() {
            errors.push("room_type_id is required".to_string());
        }
        if self.amount <= Decimal::ZERO {
            errors.push("amount must be a positive number".to_string());
        }
        if !Self::is_valid_currency(&self.currency) {
            errors.push(format!(
                "currency must be an ISO-4217 code, got '{}'",
                self.currency
            ));
        }
        if self.effective_date >= self.end_date {
            errors.push("effective_date must be before end_date".to_string());
        }

        errors
    }

    /// Check the record satisfies every invariant
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.validation_errors().is_empty()
    }
}

impl Default for RateRecord {
    fn default() -> Self {
        let day = NaiveDate::default();
        Self {
            rate_id: String::new(),
            room_type_id: String::new(),
            rate_type: RateType::Daily,
            amount: Decimal::ZERO,
            currency: "USD".to_string(),
            effective_date: day,
            end_date: day,
        }
    }
}
