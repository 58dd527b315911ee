use tracing::info;
use flightbook_core::models::FlightInput;
use flightbook_core::repository::{FlightRepository, StoreError};
use flightbook_core::validation::{validate_flight, ValidationErrors};

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("Seed flight {flight_number} is invalid: {source}")]
    Validation {
        flight_number: String,
        source: ValidationErrors,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}

fn flight(
    flight_number: &str,
    origin: &str,
    destination: &str,
    departure_time: &str,
    arrival_time: &str,
    price: f64,
) -> FlightInput {
    FlightInput {
        flight_number: Some(flight_number.to_string()),
        origin: Some(origin.to_string()),
        destination: Some(destination.to_string()),
        departure_time: Some(departure_time.to_string()),
        arrival_time: Some(arrival_time.to_string()),
        price: Some(price),
    }
}

/// The flight schedule loaded by the seed step.
pub fn seed_flight_inputs() -> Vec<FlightInput> {
    vec![
        flight(
            "AA101",
            "Toronto Pearson Intl (YYZ)",
            "New York LaGuardia (LGA)",
            "2025-07-10T08:00:00Z",
            "2025-07-10T09:35:00Z",
            275.50,
        ),
        flight(
            "UA202",
            "Vancouver Intl (YVR)",
            "Los Angeles Intl (LAX)",
            "2025-07-15T09:30:00Z",
            "2025-07-15T12:15:00Z",
            350.00,
        ),
        flight(
            "AC303",
            "Calgary Intl (YYC)",
            "Chicago O'Hare (ORD)",
            "2025-07-20T14:00:00Z",
            "2025-07-20T17:50:00Z",
            410.75,
        ),
        flight(
            "DL404",
            "New York LaGuardia (LGA)",
            "Toronto Pearson Intl (YYZ)",
            "2025-07-11T11:00:00Z",
            "2025-07-11T12:30:00Z",
            260.00,
        ),
    ]
}

/// Replace every flight in the store with `inputs`.
///
/// All inputs are validated before anything is deleted. Existing bookings
/// are left in place and may end up referencing flights that no longer exist.
pub async fn seed_flights(
    flights: &dyn FlightRepository,
    inputs: Vec<FlightInput>,
) -> Result<usize, SeedError> {
    let mut validated = Vec::with_capacity(inputs.len());
    for input in inputs {
        let flight_number = input.flight_number.clone().unwrap_or_default();
        let flight = validate_flight(input)
            .map_err(|source| SeedError::Validation { flight_number, source })?;
        validated.push(flight);
    }

    let deleted = flights.delete_all_flights().await?;
    info!("Deleted {} existing flight(s).", deleted);

    let mut inserted = 0;
    for flight in validated {
        flights.create_flight(flight).await?;
        inserted += 1;
    }
    info!("Inserted {} new flight(s).", inserted);

    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flightbook_core::InMemoryStore;

    #[test]
    fn test_seed_inputs_are_valid() {
        for input in seed_flight_inputs() {
            assert!(validate_flight(input).is_ok());
        }
    }

    #[tokio::test]
    async fn test_seed_replaces_existing_flights() {
        let store = InMemoryStore::new();
        seed_flights(&store, seed_flight_inputs()).await.unwrap();
        let inserted = seed_flights(&store, seed_flight_inputs()).await.unwrap();
        assert_eq!(inserted, 4);

        let numbers: Vec<String> = store
            .list_flights()
            .await
            .unwrap()
            .into_iter()
            .map(|f| f.flight_number)
            .collect();
        assert_eq!(numbers, vec!["AA101", "DL404", "UA202", "AC303"]);
    }

    #[tokio::test]
    async fn test_invalid_seed_leaves_store_untouched() {
        let store = InMemoryStore::new();
        seed_flights(&store, seed_flight_inputs()).await.unwrap();

        let mut inputs = seed_flight_inputs();
        inputs[1].price = Some(-5.0);
        let err = seed_flights(&store, inputs).await.unwrap_err();
        assert!(matches!(err, SeedError::Validation { ref flight_number, .. } if flight_number == "UA202"));
        assert_eq!(store.list_flights().await.unwrap().len(), 4);
    }
}
