//! HTTP error mapping
//!
//! Pricing failures keep their stable error codes on the wire. The body is
//! always `{error, message, status, details?}`.

use crate::dto::DateRangeResponse;
use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use flexspace_core::PricingError;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::error;

/// API error type
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Pricing(#[from] PricingError),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl ApiError {
    /// Returns the error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Pricing(e) => e.error_code(),
            ApiError::Validation(_) => "VALIDATION_ERROR",
        }
    }

    /// Structured context for the failure, if any
    pub fn details(&self) -> Option<Value> {
        match self {
            ApiError::Pricing(PricingError::RateGap { room_type_id, gaps }) => Some(json!({
                "room_type_id": room_type_id,
                "gaps": gaps.iter().map(DateRangeResponse::from).collect::<Vec<_>>(),
            })),
            ApiError::Pricing(PricingError::CurrencyMismatch { currencies }) => {
                Some(json!({ "currencies": currencies }))
            }
            ApiError::Pricing(PricingError::MinimumStayViolation {
                minimum_nights,
                requested_nights,
            }) => Some(json!({
                "minimum_nights": minimum_nights,
                "requested_nights": requested_nights,
            })),
            ApiError::Pricing(PricingError::RoomTypeNotFound {
                unit_id,
                room_type_id,
            }) => Some(json!({
                "unit_id": unit_id,
                "room_type_id": room_type_id,
            })),
            ApiError::Pricing(PricingError::UnitNotAvailable { unit_id, status }) => Some(json!({
                "unit_id": unit_id,
                "current_status": status,
            })),
            _ => None,
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Pricing(e) => match e {
                PricingError::InvalidDateRange(_)
                | PricingError::InvalidBooking(_)
                | PricingError::UnitNotAvailable { .. } => StatusCode::BAD_REQUEST,
                PricingError::UnitNotFound(_) | PricingError::BookingNotFound(_) => {
                    StatusCode::NOT_FOUND
                }
                PricingError::RoomTypeNotFound { .. } | PricingError::CurrencyMismatch { .. } => {
                    StatusCode::CONFLICT
                }
                PricingError::RateGap { .. } | PricingError::MinimumStayViolation { .. } => {
                    StatusCode::UNPROCESSABLE_ENTITY
                }
                PricingError::InternalInconsistency { .. } | PricingError::Storage(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error_code = self.error_code(), "Request failed: {}", self);
        }

        let mut body = json!({
            "error": self.error_code(),
            "message": self.to_string(),
            "status": status.as_u16(),
        });
        if let (Some(details), Some(map)) = (self.details(), body.as_object_mut()) {
            map.insert("details".to_string(), details);
        }

        HttpResponse::build(status).json(body)
    }
}
