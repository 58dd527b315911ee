//! Field-level rules applied before any write.
//!
//! Each `validate_*` function checks every rule for its entity, collects all
//! failures into a single [`ValidationErrors`], and on success returns the
//! normalized insert form (uppercase flight number, lowercase email).

use chrono::{DateTime, Utc};
use crate::models::{FlightInput, NewFlight, NewPassenger, PassengerInput};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, thiserror::Error)]
#[error("Validation failed: {}", join_messages(.errors))]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

fn join_messages(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

impl ValidationErrors {
    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError { field, message: message.into() });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(|e| e.message.clone()).collect()
    }

    pub fn fields(&self) -> Vec<&'static str> {
        self.errors.iter().map(|e| e.field).collect()
    }
}

/// Trims the value and drops it when nothing is left.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Basic `local@domain.tld` shape: something, `@`, something, `.`, something,
/// all on one line.
pub fn is_valid_email(email: &str) -> bool {
    email
        .split(['\n', '\r', '\u{2028}', '\u{2029}'])
        .any(|line| {
            line.char_indices().any(|(at, c)| {
                if c != '@' || at == 0 {
                    return false;
                }
                let domain = &line[at + 1..];
                domain
                    .char_indices()
                    .any(|(dot, d)| d == '.' && dot > 0 && dot + 1 < domain.len())
            })
        })
}

pub fn validate_passenger(input: PassengerInput) -> Result<NewPassenger, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let full_name = non_blank(input.full_name);
    if full_name.is_none() {
        errors.push("full_name", "Full name is required");
    }

    let email = non_blank(input.email).map(|e| e.to_lowercase());
    match &email {
        None => errors.push("email", "Email is required"),
        Some(e) if !is_valid_email(e) => errors.push("email", "Please fill a valid email address"),
        Some(_) => {}
    }

    match (full_name, email) {
        (Some(full_name), Some(email)) if errors.is_empty() => Ok(NewPassenger {
            full_name,
            email,
            phone: non_blank(input.phone),
        }),
        _ => Err(errors),
    }
}

fn parse_timestamp(
    errors: &mut ValidationErrors,
    field: &'static str,
    label: &str,
    raw: Option<String>,
) -> Option<DateTime<Utc>> {
    let Some(raw) = non_blank(raw) else {
        errors.push(field, format!("{label} is required"));
        return None;
    };
    match DateTime::parse_from_rfc3339(&raw) {
        Ok(ts) => Some(ts.with_timezone(&Utc)),
        Err(_) => {
            errors.push(field, format!("{label} must be a valid timestamp"));
            None
        }
    }
}

pub fn validate_flight(input: FlightInput) -> Result<NewFlight, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let flight_number = non_blank(input.flight_number).map(|n| n.to_uppercase());
    if flight_number.is_none() {
        errors.push("flight_number", "Flight number is required");
    }
    let origin = non_blank(input.origin);
    if origin.is_none() {
        errors.push("origin", "Origin is required");
    }
    let destination = non_blank(input.destination);
    if destination.is_none() {
        errors.push("destination", "Destination is required");
    }

    let departure_time = parse_timestamp(&mut errors, "departure_time", "Departure time", input.departure_time);
    let arrival_time = parse_timestamp(&mut errors, "arrival_time", "Arrival time", input.arrival_time);

    let price = match input.price {
        None => {
            errors.push("price", "Price is required");
            None
        }
        Some(p) if !p.is_finite() => {
            errors.push("price", "Price must be a number");
            None
        }
        Some(p) if p < 0.0 => {
            errors.push("price", "Price cannot be negative");
            None
        }
        Some(p) => Some(p),
    };

    match (flight_number, origin, destination, departure_time, arrival_time, price) {
        (Some(flight_number), Some(origin), Some(destination), Some(departure_time), Some(arrival_time), Some(price))
            if errors.is_empty() =>
        {
            Ok(NewFlight {
                flight_number,
                origin,
                destination,
                departure_time,
                arrival_time,
                price,
            })
        }
        _ => Err(errors),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn passenger(name: Option<&str>, email: Option<&str>) -> PassengerInput {
        PassengerInput {
            full_name: name.map(String::from),
            email: email.map(String::from),
            phone: None,
        }
    }

    #[test]
    fn test_email_shape() {
        assert!(is_valid_email("jane@example.com"));
        assert!(is_valid_email("a@b.c"));
        assert!(!is_valid_email("jane.example.com"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("jane@.com"));
        assert!(!is_valid_email("jane@example."));
        assert!(!is_valid_email("jane@example"));
    }

    #[test]
    fn test_passenger_email_is_lowercased() {
        let p = validate_passenger(passenger(Some("Jane Doe"), Some("Jane@Example.COM"))).unwrap();
        assert_eq!(p.email, "jane@example.com");
        assert_eq!(p.full_name, "Jane Doe");
        assert_eq!(p.phone, None);
    }

    #[test]
    fn test_passenger_errors_are_aggregated() {
        let err = validate_passenger(passenger(None, None)).unwrap_err();
        assert_eq!(err.messages(), vec!["Full name is required", "Email is required"]);
        assert_eq!(err.fields(), vec!["full_name", "email"]);

        let err = validate_passenger(passenger(Some("  "), Some("not-an-email"))).unwrap_err();
        assert_eq!(
            err.messages(),
            vec!["Full name is required", "Please fill a valid email address"]
        );
    }

    #[test]
    fn test_blank_phone_is_dropped() {
        let mut input = passenger(Some("Jane Doe"), Some("jane@example.com"));
        input.phone = Some("   ".to_string());
        assert_eq!(validate_passenger(input).unwrap().phone, None);
    }

    #[test]
    fn test_flight_number_uppercased() {
        let flight = validate_flight(FlightInput {
            flight_number: Some("aa101".to_string()),
            origin: Some("YYZ".to_string()),
            destination: Some("LGA".to_string()),
            departure_time: Some("2025-07-10T08:00:00Z".to_string()),
            arrival_time: Some("2025-07-10T09:35:00Z".to_string()),
            price: Some(275.5),
        })
        .unwrap();
        assert_eq!(flight.flight_number, "AA101");
        assert_eq!(flight.price, 275.5);
    }

    #[test]
    fn test_flight_rules() {
        let err = validate_flight(FlightInput {
            flight_number: Some("UA202".to_string()),
            origin: None,
            destination: Some("LAX".to_string()),
            departure_time: Some("tomorrow".to_string()),
            arrival_time: None,
            price: Some(-1.0),
        })
        .unwrap_err();
        assert_eq!(
            err.messages(),
            vec![
                "Origin is required",
                "Departure time must be a valid timestamp",
                "Arrival time is required",
                "Price cannot be negative",
            ]
        );
        assert_eq!(err.to_string(), format!("Validation failed: {}", err.messages().join(", ")));
    }
}
