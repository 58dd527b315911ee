use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde::Serialize;
use uuid::Uuid;
use flightbook_core::{Passenger, PassengerInput};
use crate::{error::AppError, extract::ApiJson, state::AppState};

#[derive(Debug, Serialize)]
pub struct CreatePassengerResponse {
    pub message: String,
    #[serde(rename = "passengerId")]
    pub passenger_id: Uuid,
    pub passenger: Passenger,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/passengers", post(create_passenger))
}

async fn create_passenger(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<PassengerInput>,
) -> Result<(StatusCode, Json<CreatePassengerResponse>), AppError> {
    let passenger = state.passengers.create_passenger(req).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatePassengerResponse {
            message: "Passenger created successfully".to_string(),
            passenger_id: passenger.id,
            passenger,
        }),
    ))
}
