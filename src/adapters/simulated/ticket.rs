//! Simulated ticket service with a seeded inventory and seat accounting.
//!
//! Stands in for the real inventory system: a fixed flight list plus a
//! per-flight seat counter decremented on each successful booking. Used by
//! the chat binary and the integration tests.

use async_trait::async_trait;
use chrono::{Duration, NaiveDate, TimeZone, Utc};
use std::collections::HashMap;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::domain::flight::Flight;
use crate::domain::foundation::UserId;
use crate::domain::passenger::Passenger;
use crate::ports::{TicketError, TicketService};

/// Simulated implementation of [`TicketService`].
pub struct SimulatedTicketService {
    flights: Vec<Flight>,
    seats: Mutex<HashMap<String, u32>>,
}

impl SimulatedTicketService {
    /// Creates the service with the default seeded inventory.
    pub fn new() -> Self {
        let now = Utc::now();
        let seed = vec![
            (
                Flight {
                    flight_number: "AZ101".to_string(),
                    origin: "GRU".to_string(),
                    destination: "LIS".to_string(),
                    departure_time: now + Duration::days(7) + Duration::hours(10),
                    arrival_time: now + Duration::days(7) + Duration::hours(22),
                    price: 1500.50,
                    airline: "Azul".to_string(),
                },
                10,
            ),
            (
                Flight {
                    flight_number: "TP202".to_string(),
                    origin: "GRU".to_string(),
                    destination: "LIS".to_string(),
                    departure_time: now + Duration::days(7) + Duration::hours(14),
                    arrival_time: now + Duration::days(8) + Duration::hours(2),
                    price: 1650.00,
                    airline: "TAP".to_string(),
                },
                8,
            ),
            (
                Flight {
                    flight_number: "LA303".to_string(),
                    origin: "GRU".to_string(),
                    destination: "SCL".to_string(),
                    departure_time: now + Duration::days(10) + Duration::hours(8),
                    arrival_time: now + Duration::days(10) + Duration::hours(12),
                    price: 800.75,
                    airline: "LATAM".to_string(),
                },
                25,
            ),
            (
                Flight {
                    flight_number: "GO3404".to_string(),
                    origin: "CGH".to_string(),
                    destination: "SDU".to_string(),
                    departure_time: now + Duration::hours(9),
                    arrival_time: now + Duration::hours(10),
                    price: 350.00,
                    airline: "GOL".to_string(),
                },
                30,
            ),
            (
                Flight {
                    flight_number: "GO34094".to_string(),
                    origin: "SÃO PAULO".to_string(),
                    destination: "RIO DE JANEIRO".to_string(),
                    departure_time: Utc.with_ymd_and_hms(2025, 5, 28, 9, 0, 0).unwrap(),
                    arrival_time: Utc.with_ymd_and_hms(2025, 5, 28, 10, 5, 0).unwrap(),
                    price: 350.00,
                    airline: "GOL".to_string(),
                },
                120,
            ),
        ];
        Self::with_flights(seed)
    }

    /// Creates the service with a custom inventory of `(flight, seats)`.
    pub fn with_flights(seed: Vec<(Flight, u32)>) -> Self {
        let seats = seed
            .iter()
            .map(|(f, n)| (f.flight_number.to_uppercase(), *n))
            .collect();
        Self {
            flights: seed.into_iter().map(|(f, _)| f).collect(),
            seats: Mutex::new(seats),
        }
    }
}

impl Default for SimulatedTicketService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TicketService for SimulatedTicketService {
    async fn search_flights(
        &self,
        origin: &str,
        destination: &str,
        date: NaiveDate,
    ) -> Result<Vec<Flight>, TicketError> {
        let found: Vec<Flight> = self
            .flights
            .iter()
            .filter(|f| {
                // Unicode folding, so "são paulo" matches "SÃO PAULO".
                f.origin.to_lowercase() == origin.to_lowercase()
                    && f.destination.to_lowercase() == destination.to_lowercase()
                    && f.departure_time.date_naive() == date
            })
            .cloned()
            .collect();
        info!(origin, destination, %date, count = found.len(), "flight search");
        Ok(found)
    }

    async fn search_all_flights(&self) -> Result<Vec<Flight>, TicketError> {
        Ok(self.flights.clone())
    }

    async fn available_seats(&self, flight_number: &str) -> Result<u32, TicketError> {
        let seats = self.seats.lock().await;
        Ok(seats
            .get(&flight_number.to_uppercase())
            .copied()
            .unwrap_or(0))
    }

    async fn book_flight(
        &self,
        flight_number: &str,
        user_id: &UserId,
        passengers: &[Passenger],
    ) -> Result<bool, TicketError> {
        let mut seats = self.seats.lock().await;
        let Some(remaining) = seats.get_mut(&flight_number.to_uppercase()) else {
            warn!(flight_number, "booking attempt for unknown flight");
            return Ok(false);
        };
        let requested = passengers.len() as u32;
        if requested > *remaining {
            warn!(
                flight_number,
                requested,
                remaining = *remaining,
                "booking exceeds remaining seats"
            );
            return Ok(false);
        }
        *remaining -= requested;
        info!(flight_number, %user_id, requested, "flight booked");
        Ok(true)
    }
}
