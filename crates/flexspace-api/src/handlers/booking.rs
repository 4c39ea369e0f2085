//! Booking handlers

use crate::dto::{ApiResponse, BookingListQuery, BookingListResponse, CreateBookingRequest};
use crate::error::ApiError;
use crate::AppState;
use actix_web::{web, HttpResponse};
use tracing::{info, instrument, warn};
use validator::Validate;

/// List bookings, optionally filtered by unit and status
///
/// GET /api/v1/bookings
#[instrument(skip(state))]
pub async fn list_bookings(
    state: web::Data<AppState>,
    query: web::Query<BookingListQuery>,
) -> Result<HttpResponse, ApiError> {
    let filter = query.to_filter()?;
    let bookings = state.bookings.list_bookings(&filter).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(BookingListResponse::from(bookings))))
}

/// Get a booking by id
///
/// GET /api/v1/bookings/{id}
#[instrument(skip(state))]
pub async fn get_booking(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let booking = state.bookings.get_booking(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(booking)))
}

/// Price and store a new pending booking
///
/// POST /api/v1/bookings
#[instrument(skip(state, req), fields(unit_id = %req.unit_id))]
pub async fn create_booking(
    state: web::Data<AppState>,
    req: web::Json<CreateBookingRequest>,
) -> Result<HttpResponse, ApiError> {
    req.validate().map_err(|e| {
        warn!("Booking validation failed: {}", e);
        ApiError::Validation(e.to_string())
    })?;

    let booking = state.bookings.create_booking(&req.to_new_booking()?).await?;
    info!(booking_id = %booking.booking_id, "Booking created via API");

    Ok(HttpResponse::Created().json(ApiResponse::success(booking)))
}

/// Cancel a booking; the record is kept with status `cancelled`
///
/// DELETE /api/v1/bookings/{id}
#[instrument(skip(state))]
pub async fn cancel_booking(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let booking = state.bookings.cancel_booking(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::with_message(
        booking,
        "Booking cancelled successfully",
    )))
}

/// Configure booking routes under the `/bookings` scope
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::get().to(list_bookings))
        .route("", web::post().to(create_booking))
        .route("/{id}", web::get().to(get_booking))
        .route("/{id}", web::delete().to(cancel_booking));
}
