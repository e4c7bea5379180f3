//! Booking confirmation.
//!
//! Consumes the yes/no answer to the booking summary. "sim" books the full
//! roster through the ticket service; anything else cancels. Either way the
//! flow ends and the session resets.

use tracing::{info, warn};

use super::{booking_context, corrupt_context_outcome, TicketClient, TurnOutcome};
use crate::application::envelope::ActionData;
use crate::domain::flight::Reservation;
use crate::domain::foundation::UserId;
use crate::domain::session::SessionState;
use crate::ports::TicketError;

pub async fn handle(
    tickets: &TicketClient<'_>,
    state: &SessionState,
    user_id: &UserId,
    message: &str,
) -> Result<TurnOutcome, TicketError> {
    let Some(booking) = booking_context(state) else {
        return Ok(corrupt_context_outcome());
    };

    let answer = message.trim().to_lowercase();
    if answer != "sim" {
        info!(flight_number = %booking.flight_number, "booking cancelled by user");
        return Ok(TurnOutcome::reset(
            "Reserva cancelada. Posso ajudar com algo mais?",
        ));
    }

    let booked = tickets
        .book_flight(&booking.flight_number, user_id, &booking.passengers)
        .await?;
    if !booked {
        warn!(flight_number = %booking.flight_number, "ticket service refused booking");
        return Ok(TurnOutcome::reset(
            "Não foi possível completar a reserva. Por favor, tente novamente.",
        ));
    }

    let reservation = Reservation::confirmed(
        booking.flight_details.clone(),
        user_id.clone(),
        booking.passengers.clone(),
    );
    info!(
        reservation_id = %reservation.id,
        flight_number = %reservation.flight_number,
        passengers = reservation.passengers.len(),
        "reservation confirmed"
    );

    let reply = format!(
        "Reserva confirmada! Seu voo {} foi reservado com sucesso para {} \
         passageiro(s). Código da reserva: {}.",
        reservation.flight_number,
        reservation.passengers.len(),
        reservation.id,
    );
    Ok(TurnOutcome::reset(reply).with_action(ActionData::Reservation(reservation)))
}
