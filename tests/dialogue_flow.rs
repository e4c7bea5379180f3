//! End-to-end conversation tests driving the router against the simulated
//! adapters, the way an HTTP caller would: one request per turn, echoing the
//! session id back.

use std::sync::Arc;
use std::time::Duration;

use chrono::{TimeZone, Utc};

use aerochat::adapters::memory::InMemorySessionStore;
use aerochat::adapters::simulated::{CannedAiResponder, SimulatedTicketService};
use aerochat::application::{ActionData, ChatRequest, ChatResponse, DialogueRouter};
use aerochat::domain::flight::Flight;
use aerochat::domain::foundation::SessionId;
use aerochat::domain::nlu::RuleClassifier;

fn build_router(tickets: Arc<SimulatedTicketService>) -> DialogueRouter {
    DialogueRouter::new(
        Box::new(RuleClassifier::new()),
        Arc::new(InMemorySessionStore::new(Duration::from_secs(60))),
        tickets,
        Arc::new(CannedAiResponder::new()),
        Duration::from_secs(2),
    )
}

fn rio_flight(seats: u32) -> (Flight, u32) {
    (
        Flight {
            flight_number: "GO34094".to_string(),
            origin: "SÃO PAULO".to_string(),
            destination: "RIO DE JANEIRO".to_string(),
            departure_time: Utc.with_ymd_and_hms(2025, 5, 28, 9, 0, 0).unwrap(),
            arrival_time: Utc.with_ymd_and_hms(2025, 5, 28, 10, 5, 0).unwrap(),
            price: 350.0,
            airline: "GOL".to_string(),
        },
        seats,
    )
}

async fn send(router: &DialogueRouter, session: Option<SessionId>, message: &str) -> ChatResponse {
    let mut request = ChatRequest::new("e2e-user", message);
    if let Some(id) = session {
        request = request.in_session(id);
    }
    router.process_message(request).await.unwrap()
}

#[tokio::test]
async fn greeting_on_a_fresh_session() {
    let router = build_router(Arc::new(SimulatedTicketService::new()));
    let response = send(&router, None, "Olá").await;

    assert!(response.response.contains("Olá"));
    assert!(response.response.to_lowercase().contains("assistente de reservas"));
    assert!(response.action_data.is_none());
}

#[tokio::test]
async fn search_lists_the_matching_flight() {
    let router = build_router(Arc::new(SimulatedTicketService::new()));
    let response = send(
        &router,
        None,
        "buscar voo de São Paulo para Rio de Janeiro em 28/05/2025",
    )
    .await;

    assert!(response.response.contains("GO34094"));
    match response.action_data {
        Some(ActionData::FlightList(flights)) => {
            assert_eq!(flights.len(), 1);
            assert_eq!(flights[0].flight_number, "GO34094");
        }
        other => panic!("expected flight list, got {other:?}"),
    }
}

#[tokio::test]
async fn selecting_a_flight_asks_for_passenger_count() {
    let router = build_router(Arc::new(SimulatedTicketService::new()));
    let search = send(
        &router,
        None,
        "buscar voo de São Paulo para Rio de Janeiro em 28/05/2025",
    )
    .await;
    let session = Some(search.session_id);

    let response = send(&router, session, "GO34094").await;
    assert!(response.response.contains("quantos passageiros"));
    match response.action_data {
        Some(ActionData::SelectedFlight(flight)) => {
            assert_eq!(flight.flight_number, "GO34094")
        }
        other => panic!("expected selected flight, got {other:?}"),
    }
}

#[tokio::test]
async fn passenger_count_starts_detail_collection() {
    let router = build_router(Arc::new(SimulatedTicketService::new()));
    let search = send(
        &router,
        None,
        "buscar voo de São Paulo para Rio de Janeiro em 28/05/2025",
    )
    .await;
    let session = Some(search.session_id);
    send(&router, session, "GO34094").await;

    let response = send(&router, session, "3").await;
    assert!(response.response.contains("passageiro 1"));
    assert!(response.response.contains("nome completo"));
}

#[tokio::test]
async fn count_above_capacity_states_the_ceiling_and_stays() {
    let tickets = Arc::new(SimulatedTicketService::with_flights(vec![rio_flight(2)]));
    let router = build_router(tickets);

    let search = send(
        &router,
        None,
        "buscar voo de São Paulo para Rio de Janeiro em 28/05/2025",
    )
    .await;
    let session = Some(search.session_id);
    send(&router, session, "GO34094").await;

    let refused = send(&router, session, "5").await;
    assert!(refused.response.to_lowercase().contains("desculpe"));
    assert!(refused.response.contains("apenas 2"));

    // Still waiting for the count: a repeated invalid answer re-issues the
    // same prompt, and a valid one proceeds.
    let refused_again = send(&router, session, "5").await;
    assert_eq!(refused.response, refused_again.response);

    let accepted = send(&router, session, "2").await;
    assert!(accepted.response.contains("passageiro 1"));
}

#[tokio::test]
async fn full_booking_conversation_produces_a_reservation() {
    let tickets = Arc::new(SimulatedTicketService::with_flights(vec![rio_flight(10)]));
    let router = build_router(Arc::clone(&tickets));

    let search = send(
        &router,
        None,
        "buscar voo de São Paulo para Rio de Janeiro em 28/05/2025",
    )
    .await;
    let session = Some(search.session_id);

    send(&router, session, "GO34094").await;
    send(&router, session, "2").await;

    // Passenger 1.
    send(&router, session, "Maria Silva").await;
    send(&router, session, "12.345.678-9").await;
    send(&router, session, "529.982.247-25").await;
    let next = send(&router, session, "01/01/1990").await;
    assert!(next.response.contains("passageiro 2"));

    // Passenger 2.
    send(&router, session, "João Souza").await;
    send(&router, session, "98.765.432-1").await;
    send(&router, session, "52998224725").await;
    let summary = send(&router, session, "15/03/1985").await;
    assert!(summary.response.contains("resumo"));
    assert!(summary.response.contains("Maria Silva"));
    assert!(summary.response.contains("João Souza"));

    let confirmed = send(&router, session, "sim").await;
    assert!(confirmed.response.contains("Reserva confirmada"));
    match confirmed.action_data {
        Some(ActionData::Reservation(reservation)) => {
            assert!(reservation.confirmed);
            assert_eq!(reservation.flight_number, "GO34094");
            assert_eq!(reservation.passengers.len(), 2);
        }
        other => panic!("expected reservation, got {other:?}"),
    }

    use aerochat::ports::TicketService;
    assert_eq!(tickets.available_seats("GO34094").await.unwrap(), 8);
}

#[tokio::test]
async fn invalid_passenger_fields_reprompt_without_losing_progress() {
    let router = build_router(Arc::new(SimulatedTicketService::new()));
    let search = send(
        &router,
        None,
        "buscar voo de São Paulo para Rio de Janeiro em 28/05/2025",
    )
    .await;
    let session = Some(search.session_id);
    send(&router, session, "GO34094").await;
    send(&router, session, "1").await;

    // Too-short name, twice: the same class of prompt both times.
    let first = send(&router, session, "Jo").await;
    let second = send(&router, session, "Jo").await;
    assert_eq!(first.response, second.response);

    // The flow then continues from where it stood.
    let accepted = send(&router, session, "Joana Lima").await;
    assert!(accepted.response.contains("RG"));
}

#[tokio::test]
async fn declining_the_summary_cancels_the_booking() {
    let tickets = Arc::new(SimulatedTicketService::with_flights(vec![rio_flight(10)]));
    let router = build_router(Arc::clone(&tickets));

    let search = send(
        &router,
        None,
        "buscar voo de São Paulo para Rio de Janeiro em 28/05/2025",
    )
    .await;
    let session = Some(search.session_id);
    send(&router, session, "GO34094").await;
    send(&router, session, "1").await;
    send(&router, session, "Maria Silva").await;
    send(&router, session, "12.345.678-9").await;
    send(&router, session, "529.982.247-25").await;
    send(&router, session, "01/01/1990").await;

    let declined = send(&router, session, "não").await;
    assert!(declined.response.contains("cancelada"));

    use aerochat::ports::TicketService;
    assert_eq!(tickets.available_seats("GO34094").await.unwrap(), 10);
}

#[tokio::test]
async fn unmatched_messages_fall_back_to_the_ai_responder() {
    let router = build_router(Arc::new(SimulatedTicketService::new()));
    let response = send(&router, None, "qual a previsão do tempo?").await;
    // Canned responses are non-empty and carry no structured payload.
    assert!(!response.response.is_empty());
    assert!(response.action_data.is_none());
}
