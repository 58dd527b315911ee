use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use flightbook_shared::Masked;

// ============================================================================
// Stored records
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Flight {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub flight_number: String,
    pub origin: String,
    pub destination: String,
    pub departure_time: DateTime<Utc>,
    pub arrival_time: DateTime<Utc>,
    pub price: f64,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Passenger {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub full_name: String,
    pub email: Masked<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<Masked<String>>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// A booking as stored: raw references to its flight and passenger.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Booking {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub flight: Uuid,
    pub passenger: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seat_number: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Insert forms (validated and normalized)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct NewFlight {
    pub flight_number: String,
    pub origin: String,
    pub destination: String,
    pub departure_time: DateTime<Utc>,
    pub arrival_time: DateTime<Utc>,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewPassenger {
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewBooking {
    pub flight: Uuid,
    pub passenger: Uuid,
    pub seat_number: Option<String>,
}

impl NewFlight {
    pub fn into_record(self, id: Uuid, now: DateTime<Utc>) -> Flight {
        Flight {
            id,
            flight_number: self.flight_number,
            origin: self.origin,
            destination: self.destination,
            departure_time: self.departure_time,
            arrival_time: self.arrival_time,
            price: self.price,
            created_at: now,
            updated_at: now,
        }
    }
}

impl NewPassenger {
    pub fn into_record(self, id: Uuid, now: DateTime<Utc>) -> Passenger {
        Passenger {
            id,
            full_name: self.full_name,
            email: Masked(self.email),
            phone: self.phone.map(Masked),
            created_at: now,
            updated_at: now,
        }
    }
}

impl NewBooking {
    pub fn into_record(self, id: Uuid, now: DateTime<Utc>) -> Booking {
        Booking {
            id,
            flight: self.flight,
            passenger: self.passenger,
            seat_number: self.seat_number,
            created_at: now,
            updated_at: now,
        }
    }
}

// ============================================================================
// Raw inputs (as received, before validation)
// ============================================================================

/// Flight fields as supplied by the seed step. Timestamps are RFC 3339 text.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FlightInput {
    pub flight_number: Option<String>,
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub departure_time: Option<String>,
    pub arrival_time: Option<String>,
    pub price: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PassengerInput {
    pub full_name: Option<String>,
    pub email: Option<String>,
    #[serde(default, deserialize_with = "scalar_as_text")]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookingInput {
    pub flight_id: Option<String>,
    pub passenger_id: Option<String>,
    #[serde(default, deserialize_with = "scalar_as_text")]
    pub seat_number: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Signed(i64),
    Unsigned(u64),
    Float(f64),
    Bool(bool),
}

/// Free-text fields such as a phone or seat number are stored as text, but
/// clients often send them as bare JSON numbers (`"seat_number": 12`).
fn scalar_as_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Scalar>::deserialize(deserializer)?;
    Ok(value.map(|scalar| match scalar {
        Scalar::Text(text) => text,
        Scalar::Signed(n) => n.to_string(),
        Scalar::Unsigned(n) => n.to_string(),
        Scalar::Float(n) => n.to_string(),
        Scalar::Bool(b) => b.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_flight_serializes_with_client_field_names() {
        let departure = Utc.with_ymd_and_hms(2025, 7, 10, 8, 0, 0).unwrap();
        let flight = NewFlight {
            flight_number: "AA101".to_string(),
            origin: "Toronto Pearson Intl (YYZ)".to_string(),
            destination: "New York LaGuardia (LGA)".to_string(),
            departure_time: departure,
            arrival_time: Utc.with_ymd_and_hms(2025, 7, 10, 9, 35, 0).unwrap(),
            price: 275.5,
        }
        .into_record(Uuid::new_v4(), Utc::now());

        let json = serde_json::to_value(&flight).unwrap();
        assert_eq!(json["_id"], flight.id.to_string());
        assert_eq!(json["flight_number"], "AA101");
        assert_eq!(json["price"], 275.5);
        assert!(json["price"].is_number());
        assert!(json.get("createdAt").is_some());
        assert!(json.get("id").is_none());
    }

    #[test]
    fn test_passenger_without_phone_omits_field() {
        let passenger = NewPassenger {
            full_name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone: None,
        }
        .into_record(Uuid::new_v4(), Utc::now());

        let json = serde_json::to_value(&passenger).unwrap();
        assert_eq!(json["email"], "jane@example.com");
        assert!(json.get("phone").is_none());
    }

    #[test]
    fn test_numeric_free_text_fields_are_read_as_text() {
        let input: BookingInput =
            serde_json::from_str(r#"{"flight_id": "a", "passenger_id": "b", "seat_number": 12}"#).unwrap();
        assert_eq!(input.seat_number.as_deref(), Some("12"));

        let input: BookingInput = serde_json::from_str(r#"{"seat_number": "14C"}"#).unwrap();
        assert_eq!(input.seat_number.as_deref(), Some("14C"));

        let input: BookingInput = serde_json::from_str(r#"{"seat_number": null}"#).unwrap();
        assert_eq!(input.seat_number, None);

        let input: PassengerInput =
            serde_json::from_str(r#"{"full_name": "Jane Doe", "email": "jane@example.com", "phone": 5551234}"#)
                .unwrap();
        assert_eq!(input.phone.as_deref(), Some("5551234"));

        let input: PassengerInput = serde_json::from_str(r#"{"full_name": "Jane Doe"}"#).unwrap();
        assert_eq!(input.phone, None);
    }

    #[test]
    fn test_structured_free_text_fields_are_rejected() {
        assert!(serde_json::from_str::<BookingInput>(r#"{"seat_number": ["12A"]}"#).is_err());
        assert!(serde_json::from_str::<PassengerInput>(r#"{"phone": {"home": "555"}}"#).is_err());
    }
}
