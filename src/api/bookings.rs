use axum::{extract::State, Json};
use std::sync::Arc;
use tracing::info;

use crate::db::{
    create_document, Booking, BookingRequest, BookingResponse, Entity, Filter, Hotel,
    BOOKING_CONFIRMED,
};
use crate::AppState;

use super::error::ApiError;
use super::validation::ValidJson;

/// Create a booking for an existing hotel.
///
/// No date-ordering or availability checks are made; the only precondition
/// is that `hotel_id` names a stored hotel.
///
/// POST /bookings
pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    ValidJson(request): ValidJson<BookingRequest>,
) -> Result<Json<BookingResponse>, ApiError> {
    let store = state.store()?;

    let hotel = store
        .find_one(Hotel::COLLECTION, &Filter::by_id(request.hotel_id.as_str()))
        .await?;
    if hotel.is_none() {
        return Err(ApiError::not_found("Hotel not found"));
    }

    let booking = Booking::from(request);
    let id = create_document(store, &booking).await?;

    info!(
        booking_id = %id,
        hotel_id = %booking.hotel_id,
        guests = booking.guests,
        "Booking confirmed"
    );

    Ok(Json(BookingResponse {
        id,
        message: BOOKING_CONFIRMED.to_string(),
    }))
}
