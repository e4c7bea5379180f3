//! Flight-search flow.
//!
//! Parses origin/destination/date out of the message, queries the inventory
//! and presents the matching flights with their remaining seats. A phrase
//! that does not parse keeps the session waiting for details.

use tracing::info;

use super::{format_price, TicketClient, TurnOutcome};
use crate::application::envelope::ActionData;
use crate::domain::flight::Flight;
use crate::domain::nlu::extract_search_params;
use crate::domain::session::{Intent, SearchContext, SessionContext, SessionState};
use crate::ports::TicketError;

pub async fn handle(
    tickets: &TicketClient<'_>,
    state: &SessionState,
    message: &str,
) -> Result<TurnOutcome, TicketError> {
    let Some(params) = extract_search_params(message) else {
        // Re-prompts only reassign the intent; whatever context the session
        // carried stays intact.
        return Ok(TurnOutcome::advance(
            "Para pesquisar voos, por favor, me diga a origem, o destino e a data \
             (ex: 'de São Paulo para Rio de Janeiro em 28/05/2025').",
            SessionState::new(Intent::WaitingForFlightDetails, state.context.clone()),
        ));
    };

    let flights = tickets
        .search_flights(&params.origin, &params.destination, params.date)
        .await?;

    if flights.is_empty() {
        return Ok(TurnOutcome::reset(format!(
            "Desculpe, não encontrei voos de {} para {} na data {}. \
             Gostaria de tentar outra data?",
            params.origin,
            params.destination,
            params.date.format("%d/%m/%Y"),
        )));
    }

    info!(
        origin = %params.origin,
        destination = %params.destination,
        count = flights.len(),
        "presenting search results"
    );

    let mut reply = format!(
        "Encontrei {} voo(s) de {} para {} em {}:\n",
        flights.len(),
        params.origin,
        params.destination,
        params.date.format("%d/%m/%Y"),
    );
    for flight in &flights {
        let seats = tickets.available_seats(&flight.flight_number).await?;
        reply.push_str(&format_flight_line(flight, seats));
        reply.push('\n');
    }
    reply.push_str("Qual você gostaria de reservar? (Informe o número do voo)");

    let context = SearchContext {
        flights: flights.clone(),
        search_params: params,
    };
    Ok(TurnOutcome::advance(
        reply,
        SessionState::new(
            Intent::WaitingForFlightSelection,
            SessionContext::Searching(context),
        ),
    )
    .with_action(ActionData::FlightList(flights)))
}

fn format_flight_line(flight: &Flight, seats: u32) -> String {
    format!(
        "✈️ {} ({}) | partida {} / chegada {} | {} | {} assento(s) disponível(is)",
        flight.flight_number,
        flight.airline,
        flight.departure_time.format("%d/%m/%Y %H:%M"),
        flight.arrival_time.format("%d/%m/%Y %H:%M"),
        format_price(flight.price),
        seats,
    )
}
