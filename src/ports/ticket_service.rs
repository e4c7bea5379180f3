//! Ticket service port.
//!
//! Abstracts the flight inventory and seat accounting. The dialogue engine
//! only consumes this capability; the concrete inventory lives behind an
//! adapter.

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::flight::Flight;
use crate::domain::foundation::UserId;
use crate::domain::passenger::Passenger;

/// Errors from the ticket service.
#[derive(Debug, Clone, Error)]
pub enum TicketError {
    #[error("Ticket service unavailable: {0}")]
    Unavailable(String),
}

/// Port for flight inventory and booking.
#[async_trait]
pub trait TicketService: Send + Sync {
    /// Searches flights by exact case-insensitive origin/destination match
    /// and exact departure date (time of day ignored).
    async fn search_flights(
        &self,
        origin: &str,
        destination: &str,
        date: NaiveDate,
    ) -> Result<Vec<Flight>, TicketError>;

    /// Returns the full flight list.
    async fn search_all_flights(&self) -> Result<Vec<Flight>, TicketError>;

    /// Returns remaining seats for a flight; 0 for unknown flights.
    async fn available_seats(&self, flight_number: &str) -> Result<u32, TicketError>;

    /// Books a flight for a passenger roster.
    ///
    /// Returns `false` (not an error) if the flight is unknown or the roster
    /// exceeds the remaining seats.
    async fn book_flight(
        &self,
        flight_number: &str,
        user_id: &UserId,
        passengers: &[Passenger],
    ) -> Result<bool, TicketError>;
}
