use axum::{extract::State, routing::get, Json, Router};
use flightbook_core::Flight;
use crate::{error::AppError, state::AppState};

pub fn routes() -> Router<AppState> {
    Router::new().route("/flights", get(list_flights))
}

async fn list_flights(State(state): State<AppState>) -> Result<Json<Vec<Flight>>, AppError> {
    let flights = state
        .flight_repo
        .list_flights()
        .await
        .map_err(|e| AppError::store("list_flights", "Error fetching flights", e))?;

    Ok(Json(flights))
}
