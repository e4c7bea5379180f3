//! Flight-selection flow.
//!
//! Resolves a flight-number token against the inventory's full list, checks
//! seats, and opens a booking context. A booking verb without a prior search
//! redirects the user to search first.

use tracing::info;

use super::{TicketClient, TurnOutcome};
use crate::application::envelope::ActionData;
use crate::domain::nlu::extract_flight_number;
use crate::domain::session::{BookingContext, Intent, SessionContext, SessionState};
use crate::ports::TicketError;

pub async fn handle(
    tickets: &TicketClient<'_>,
    state: &SessionState,
    message: &str,
) -> Result<TurnOutcome, TicketError> {
    if state.intent != Intent::WaitingForFlightSelection {
        // A booking verb from a cold session: nothing selected yet.
        return Ok(TurnOutcome::advance(
            "Para reservar, primeiro faça uma pesquisa de voos. Me diga a origem, \
             o destino e a data (ex: 'de São Paulo para Rio de Janeiro em 28/05/2025').",
            SessionState::new(Intent::WaitingForFlightDetails, SessionContext::Empty),
        ));
    }

    let Some(flight_number) = extract_flight_number(message) else {
        return Ok(TurnOutcome::stay(
            "Por favor, informe o número do voo que deseja reservar (ex: 'AZ101').",
            state.clone(),
        ));
    };

    let all_flights = tickets.search_all_flights().await?;
    let Some(flight) = all_flights
        .into_iter()
        .find(|f| f.matches_number(&flight_number))
    else {
        return Ok(TurnOutcome::stay(
            format!(
                "Não encontrei o voo {flight_number}. Por favor, verifique o número \
                 e tente novamente."
            ),
            state.clone(),
        ));
    };

    let seats = tickets.available_seats(&flight.flight_number).await?;
    if seats == 0 {
        return Ok(TurnOutcome::reset(format!(
            "Infelizmente o voo {flight_number} não tem mais assentos disponíveis. \
             Gostaria de pesquisar outro voo?"
        )));
    }

    info!(flight_number = %flight.flight_number, seats, "flight selected");

    let reply = format!(
        "Ótimo! Voo {} ({} → {}) selecionado. Para quantos passageiros deseja reservar?",
        flight.flight_number, flight.origin, flight.destination,
    );
    let context = BookingContext::for_flight(flight.clone());
    Ok(TurnOutcome::advance(
        reply,
        SessionState::new(
            Intent::WaitingForPassengerCount,
            SessionContext::Booking(context),
        ),
    )
    .with_action(ActionData::SelectedFlight(flight)))
}
