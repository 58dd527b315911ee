use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;
use flightbook_core::{BookingDetails, BookingInput, BookingListing};
use crate::{error::AppError, extract::ApiJson, state::AppState};

#[derive(Debug, Serialize)]
pub struct CreateBookingResponse {
    pub message: String,
    pub booking: BookingDetails,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/bookings", get(list_bookings).post(create_booking))
}

async fn create_booking(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<BookingInput>,
) -> Result<(StatusCode, Json<CreateBookingResponse>), AppError> {
    let booking = state.bookings.create_booking(req).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateBookingResponse {
            message: "Booking successful".to_string(),
            booking,
        }),
    ))
}

async fn list_bookings(State(state): State<AppState>) -> Result<Json<Vec<BookingListing>>, AppError> {
    let bookings = state
        .bookings
        .list_bookings()
        .await
        .map_err(|e| AppError::store("list_bookings", "Error fetching bookings", e))?;

    Ok(Json(bookings))
}
