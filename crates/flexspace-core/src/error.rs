//! Unified error handling for Flexspace
//!
//! Two error types live here. `AppError` covers infrastructure failures in
//! the storage and configuration layers. `PricingError` is the typed result
//! of a failed pricing request; the pricing core never reports a failure as
//! a zero price.

use crate::interval::DateRange;
use crate::models::{PricingStage, UnitStatus};
use thiserror::Error;

/// Infrastructure error type
///
/// Returned by repositories and configuration loading.
#[derive(Error, Debug)]
pub enum AppError {
    // ==================== Storage Errors ====================
    #[error("Storage error: {0}")]
    Storage(String),

    // ==================== Validation Errors ====================
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // ==================== Resource Errors ====================
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    // ==================== Internal Errors ====================
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl AppError {
    /// Returns the error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Storage(_) => "storage_error",
            AppError::Validation(_) => "validation_error",
            AppError::InvalidInput(_) => "invalid_input",
            AppError::NotFound(_) => "not_found",
            AppError::Conflict(_) => "conflict",
            AppError::AlreadyExists(_) => "already_exists",
            AppError::Internal(_) => "internal_error",
            AppError::Config(_) => "config_error",
            AppError::Serialization(_) => "serialization_error",
        }
    }
}

// ==================== From implementations ====================

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Storage(err.to_string())
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

/// Pricing failure taxonomy
///
/// Every variant maps to a stable upper-snake code through
/// [`PricingError::error_code`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PricingError {
    // ==================== Lookup Errors ====================
    #[error("Unit not found: {0}")]
    UnitNotFound(String),

    #[error("Room type {room_type_id} referenced by unit {unit_id} not found")]
    RoomTypeNotFound {
        unit_id: String,
        room_type_id: String,
    },

    // ==================== Request Errors ====================
    #[error("Invalid date range: {0}")]
    InvalidDateRange(String),

    #[error("Minimum stay is {minimum_nights} nights, requested {requested_nights}")]
    MinimumStayViolation {
        minimum_nights: u32,
        requested_nights: i64,
    },

    // ==================== Resolution Errors ====================
    #[error("No rate covers room type {room_type_id} on {}", display_ranges(.gaps))]
    RateGap {
        room_type_id: String,
        gaps: Vec<DateRange>,
    },

    #[error("Rates use more than one currency: {}", .currencies.join(", "))]
    CurrencyMismatch { currencies: Vec<String> },

    // ==================== Booking Errors ====================
    #[error("Unit {unit_id} is not available for booking (status: {status})")]
    UnitNotAvailable { unit_id: String, status: UnitStatus },

    #[error("Booking not found: {0}")]
    BookingNotFound(String),

    #[error("Invalid booking: {0}")]
    InvalidBooking(String),

    // ==================== Internal Errors ====================
    #[error("Internal inconsistency while {stage}: {message}")]
    InternalInconsistency {
        stage: PricingStage,
        message: String,
    },

    #[error("Storage error: {0}")]
    Storage(String),
}

fn display_ranges(ranges: &[DateRange]) -> String {
    ranges
        .iter()
        .map(|r| format!("{} to {}", r.start(), r.last_day()))
        .collect::<Vec<_>>()
        .join(", ")
}

impl PricingError {
    /// Returns the stable error code
    pub fn error_code(&self) -> &'static str {
        match self {
            PricingError::UnitNotFound(_) => "UNIT_NOT_FOUND",
            PricingError::RoomTypeNotFound { .. } => "ROOM_TYPE_NOT_FOUND",
            PricingError::InvalidDateRange(_) => "INVALID_DATE_RANGE",
            PricingError::MinimumStayViolation { .. } => "MINIMUM_STAY_VIOLATION",
            PricingError::RateGap { .. } => "RATE_GAP",
            PricingError::CurrencyMismatch { .. } => "CURRENCY_MISMATCH",
            PricingError::UnitNotAvailable { .. } => "UNIT_NOT_AVAILABLE",
            PricingError::BookingNotFound(_) => "BOOKING_NOT_FOUND",
            PricingError::InvalidBooking(_) => "INVALID_BOOKING",
            PricingError::InternalInconsistency { .. } => "INTERNAL_INCONSISTENCY",
            PricingError::Storage(_) => "STORAGE_ERROR",
        }
    }

    /// Shorthand for an invariant violation detected at `stage`
    pub fn inconsistency(stage: PricingStage, message: impl Into<String>) -> Self {
        PricingError::InternalInconsistency {
            stage,
            message: message.into(),
        }
    }
}

impl From<AppError> for PricingError {
    fn from(err: AppError) -> Self {
        PricingError::Storage(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_pricing_error_codes() {
        assert_eq!(
            PricingError::UnitNotFound("u1".to_string()).error_code(),
            "UNIT_NOT_FOUND"
        );
        assert_eq!(
            PricingError::CurrencyMismatch {
                currencies: vec!["EUR".to_string(), "USD".to_string()]
            }
            .error_code(),
            "CURRENCY_MISMATCH"
        );
        assert_eq!(
            PricingError::inconsistency(PricingStage::Segmenting, "overlap").error_code(),
            "INTERNAL_INCONSISTENCY"
        );
    }

    #[test]
    fn test_rate_gap_message_lists_every_gap() {
        let err = PricingError::RateGap {
            room_type_id: "rt_exec".to_string(),
            gaps: vec![
                DateRange::new(d("2025-04-01"), d("2025-07-01")).unwrap(),
                DateRange::new(d("2025-08-01"), d("2025-08-03")).unwrap(),
            ],
        };
        assert_eq!(
            err.to_string(),
            "No rate covers room type rt_exec on 2025-04-01 to 2025-06-30, 2025-08-01 to 2025-08-02"
        );
    }

    #[test]
    fn test_inconsistency_message_names_stage() {
        let err = PricingError::inconsistency(PricingStage::Segmenting, "segments overlap");
        assert_eq!(
            err.to_string(),
            "Internal inconsistency while segmenting: segments overlap"
        );
    }

    #[test]
    fn test_booking_error_codes() {
        let err = PricingError::UnitNotAvailable {
            unit_id: "unit_dt_exec_003".to_string(),
            status: UnitStatus::Occupied,
        };
        assert_eq!(err.error_code(), "UNIT_NOT_AVAILABLE");
        assert_eq!(
            err.to_string(),
            "Unit unit_dt_exec_003 is not available for booking (status: occupied)"
        );
        assert_eq!(
            PricingError::BookingNotFound("book_x".to_string()).error_code(),
            "BOOKING_NOT_FOUND"
        );
    }

    #[test]
    fn test_app_error_converts_to_storage() {
        let err: PricingError = AppError::Storage("disk full".to_string()).into();
        assert_eq!(err.error_code(), "STORAGE_ERROR");
    }

    #[test]
    fn test_app_error_codes() {
        assert_eq!(AppError::NotFound("x".to_string()).error_code(), "not_found");
        let io = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        assert_eq!(AppError::from(io).error_code(), "storage_error");
    }
}
