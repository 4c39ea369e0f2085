//! Booking price calculation handler

use crate::dto::{ApiResponse, CalculatePriceRequest, CalculatePriceResponse};
use crate::error::ApiError;
use crate::AppState;
use actix_web::{web, HttpResponse};
use tracing::{info, instrument, warn};
use validator::Validate;

/// Calculate the price of a booking without creating it
///
/// POST /api/v1/bookings/calculate-price
#[instrument(skip(state, req), fields(unit_id = %req.unit_id))]
pub async fn calculate_price(
    state: web::Data<AppState>,
    req: web::Json<CalculatePriceRequest>,
) -> Result<HttpResponse, ApiError> {
    req.validate().map_err(|e| {
        warn!("Price calculation validation failed: {}", e);
        ApiError::Validation(e.to_string())
    })?;

    let booking = req.to_booking()?;
    let quote = state.pricing.quote(&booking, req.options()).await?;

    info!(
        room_type_id = %quote.room_type_id,
        nights = quote.breakdown.total_nights,
        total = %quote.breakdown.total_price,
        complete = quote.breakdown.is_complete(),
        "Price calculated"
    );

    let response = if quote.breakdown.is_complete() {
        ApiResponse::success(CalculatePriceResponse::from(quote))
    } else {
        ApiResponse::with_message(
            CalculatePriceResponse::from(quote),
            "Partial price: some nights have no applicable rate",
        )
    };

    Ok(HttpResponse::Ok().json(response))
}

/// Configure price calculation routes under the `/bookings` scope
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/calculate-price", web::post().to(calculate_price));
}
