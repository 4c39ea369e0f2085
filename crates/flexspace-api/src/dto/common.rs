//! Common DTOs used across the API

use chrono::NaiveDate;
use flexspace_core::DateRange;
use serde::Serialize;

/// Standard API response wrapper
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    /// Response data
    pub data: T,
    /// Response message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Create a success response with data
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data,
            message: None,
        }
    }

    /// Create a success response with data and message
    pub fn with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data,
            message: Some(message.into()),
        }
    }
}

/// Day range rendered with an inclusive last day
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateRangeResponse {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub nights: i64,
}

impl From<&DateRange> for DateRangeResponse {
    fn from(range: &DateRange) -> Self {
        Self {
            start_date: range.start(),
            end_date: range.last_day(),
            nights: range.days(),
        }
    }
}
