//! API layer for Flexspace
//!
//! HTTP handlers exposing booking price calculation, booking creation and
//! service health.

#![forbid(unsafe_code)]

pub mod dto;
pub mod error;
pub mod handlers;

use actix_web::web;
use flexspace_core::traits::{BookingService, PricingService};
use std::sync::Arc;

pub use dto::ApiResponse;
pub use error::ApiError;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub pricing: Arc<dyn PricingService>,
    pub bookings: Arc<dyn BookingService>,
}

impl AppState {
    pub fn new(pricing: Arc<dyn PricingService>, bookings: Arc<dyn BookingService>) -> Self {
        Self { pricing, bookings }
    }
}

/// Register every `/api/v1` route.
///
/// Malformed JSON bodies are answered with the same error body as any
/// other validation failure.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        ApiError::Validation(err.to_string()).into()
    }))
    .service(
        web::scope("/api/v1")
            .configure(handlers::health::configure)
            .service(
                web::scope("/bookings")
                    .configure(handlers::pricing::configure)
                    .configure(handlers::booking::configure),
            ),
    );
}
