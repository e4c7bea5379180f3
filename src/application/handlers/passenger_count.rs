//! Passenger-count capture.
//!
//! Fixes the roster size for the selected flight, capped by the remaining
//! seats, and kicks off per-passenger data collection.

use tracing::info;

use super::{booking_context, corrupt_context_outcome, TicketClient, TurnOutcome};
use crate::domain::nlu::extract_integer;
use crate::domain::session::{Intent, SessionContext, SessionState};
use crate::ports::TicketError;

pub async fn handle(
    tickets: &TicketClient<'_>,
    state: &SessionState,
    message: &str,
) -> Result<TurnOutcome, TicketError> {
    let Some(booking) = booking_context(state) else {
        return Ok(corrupt_context_outcome());
    };

    let count = extract_integer(message).unwrap_or(0);
    if count <= 0 {
        return Ok(TurnOutcome::stay(
            "Por favor, informe um número válido de passageiros (no mínimo 1).",
            state.clone(),
        ));
    }

    let seats = tickets.available_seats(&booking.flight_number).await?;
    if count > i64::from(seats) {
        return Ok(TurnOutcome::stay(
            format!(
                "Desculpe, o voo {} tem apenas {} assento(s) disponível(is). \
                 Por favor, informe uma quantidade menor.",
                booking.flight_number, seats,
            ),
            state.clone(),
        ));
    }

    info!(flight_number = %booking.flight_number, count, "roster size fixed");

    let mut booking = booking.clone();
    booking.begin_roster(count as usize);
    Ok(TurnOutcome::advance(
        format!(
            "Perfeito! Vamos coletar os dados de {count} passageiro(s). \
             Qual o nome completo do passageiro 1?"
        ),
        SessionState::new(
            Intent::WaitingForPassengerDetails,
            SessionContext::Booking(booking),
        ),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::simulated::SimulatedTicketService;
    use crate::domain::session::{BookingContext, PassengerStep};
    use crate::ports::TicketService;
    use std::time::Duration;

    fn client(svc: &SimulatedTicketService) -> TicketClient<'_> {
        TicketClient::new(svc, Duration::from_secs(1))
    }

    async fn counting_state(svc: &SimulatedTicketService, flight_number: &str) -> SessionState {
        let flights = svc.search_all_flights().await.unwrap();
        let flight = flights
            .into_iter()
            .find(|f| f.flight_number == flight_number)
            .unwrap();
        SessionState::new(
            Intent::WaitingForPassengerCount,
            SessionContext::Booking(BookingContext::for_flight(flight)),
        )
    }

    #[tokio::test]
    async fn valid_count_starts_detail_collection() {
        let svc = SimulatedTicketService::new();
        let state = counting_state(&svc, "GO34094").await;
        let outcome = handle(&client(&svc), &state, "3").await.unwrap();

        assert_eq!(outcome.state.intent, Intent::WaitingForPassengerDetails);
        assert!(outcome.reply.contains("passageiro 1"));
        match outcome.state.context {
            SessionContext::Booking(ctx) => {
                assert_eq!(ctx.passenger_count, 3);
                assert_eq!(ctx.current_step, PassengerStep::Name);
                assert_eq!(ctx.current_passenger_index, 0);
            }
            other => panic!("expected booking context, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn count_above_capacity_reprompts_with_the_ceiling() {
        let svc = SimulatedTicketService::new();
        // AZ101 is seeded with 10 seats.
        let state = counting_state(&svc, "AZ101").await;
        let outcome = handle(&client(&svc), &state, "15").await.unwrap();

        assert_eq!(outcome.state, state);
        assert!(outcome.reply.contains("Desculpe"));
        assert!(outcome.reply.contains("apenas 10"));
    }

    #[tokio::test]
    async fn zero_count_reprompts_idempotently() {
        let svc = SimulatedTicketService::new();
        let state = counting_state(&svc, "AZ101").await;

        let first = handle(&client(&svc), &state, "0").await.unwrap();
        assert_eq!(first.state, state);

        // Same invalid input again: same state, same class of prompt.
        let second = handle(&client(&svc), &first.state, "0").await.unwrap();
        assert_eq!(second.state, state);
        assert_eq!(first.reply, second.reply);
    }

    #[tokio::test]
    async fn missing_booking_context_apologizes_and_resets() {
        let svc = SimulatedTicketService::new();
        let state = SessionState::new(Intent::WaitingForPassengerCount, SessionContext::Empty);
        let outcome = handle(&client(&svc), &state, "3").await.unwrap();
        assert_eq!(outcome.state, SessionState::empty());
        assert!(outcome.reply.contains("Desculpe"));
    }
}
