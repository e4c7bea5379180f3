//! Flight inventory and reservation records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::foundation::{ReservationId, UserId};
use super::passenger::Passenger;

/// A flight as sourced from the ticket service. Immutable once received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flight {
    pub flight_number: String,
    pub origin: String,
    pub destination: String,
    pub departure_time: DateTime<Utc>,
    pub arrival_time: DateTime<Utc>,
    pub price: f64,
    pub airline: String,
}

impl Flight {
    /// Case-insensitive flight-number comparison, as the inventory keys
    /// flights by normalized uppercase codes but user input may vary.
    pub fn matches_number(&self, number: &str) -> bool {
        self.flight_number.eq_ignore_ascii_case(number)
    }
}

/// A confirmed booking. Created only after the user confirms and the ticket
/// service accepts the roster; the engine hands it to the caller and keeps
/// no registry of its own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reservation {
    pub id: ReservationId,
    pub flight_number: String,
    pub flight_details: Flight,
    pub user_id: UserId,
    pub passengers: Vec<Passenger>,
    pub reserved_at: DateTime<Utc>,
    pub confirmed: bool,
}

impl Reservation {
    /// Builds a confirmed reservation for a booked roster.
    pub fn confirmed(flight: Flight, user_id: UserId, passengers: Vec<Passenger>) -> Self {
        Self {
            id: ReservationId::new(),
            flight_number: flight.flight_number.clone(),
            flight_details: flight,
            user_id,
            passengers,
            reserved_at: Utc::now(),
            confirmed: true,
        }
    }
}
