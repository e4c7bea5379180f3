//! Per-passenger data collection.
//!
//! Consumes one field value per turn, in the fixed order name → RG → CPF →
//! birth date, re-prompting in place on invalid input. After the last field
//! of the last passenger it presents the booking summary and asks for
//! confirmation.

use tracing::info;

use super::{booking_context, corrupt_context_outcome, format_price, TurnOutcome};
use crate::domain::nlu::parse_br_date;
use crate::domain::passenger::{
    validate_birth_date, validate_cpf, validate_name, validate_rg,
};
use crate::domain::session::{BookingContext, Intent, PassengerStep, SessionContext, SessionState};

pub fn handle(state: &SessionState, message: &str) -> TurnOutcome {
    let Some(booking) = booking_context(state) else {
        return corrupt_context_outcome();
    };
    let mut booking = booking.clone();
    let input = message.trim();
    let ordinal = booking.current_passenger_ordinal();

    match booking.current_step {
        PassengerStep::Name => {
            if validate_name(input).is_err() {
                return TurnOutcome::stay(
                    format!(
                        "Por favor, informe o nome completo do passageiro {ordinal} \
                         (mínimo 3 caracteres)."
                    ),
                    state.clone(),
                );
            }
            booking.current_passenger.name = Some(input.to_string());
            booking.current_step = booking.current_step.next();
            prompt(format!("Qual o RG do passageiro {ordinal}?"), booking)
        }
        PassengerStep::Rg => {
            if validate_rg(input).is_err() {
                return TurnOutcome::stay(
                    "RG inválido. Por favor, informe um RG com pelo menos 8 \
                     caracteres alfanuméricos.",
                    state.clone(),
                );
            }
            booking.current_passenger.rg = Some(input.to_string());
            booking.current_step = booking.current_step.next();
            prompt(format!("Qual o CPF do passageiro {ordinal}?"), booking)
        }
        PassengerStep::Cpf => {
            if validate_cpf(input).is_err() {
                return TurnOutcome::stay(
                    "CPF inválido. Por favor, verifique os dígitos e informe novamente.",
                    state.clone(),
                );
            }
            booking.current_passenger.cpf = Some(input.to_string());
            booking.current_step = booking.current_step.next();
            prompt(
                format!(
                    "Qual a data de nascimento do passageiro {ordinal}? (dd/mm/aaaa)"
                ),
                booking,
            )
        }
        PassengerStep::BirthDate => {
            let Some(date) = parse_br_date(input) else {
                return TurnOutcome::stay(
                    "Data inválida. Por favor, informe no formato dd/mm/aaaa.",
                    state.clone(),
                );
            };
            if validate_birth_date(date).is_err() {
                return TurnOutcome::stay(
                    "Data de nascimento inválida: não pode ser futura e o passageiro \
                     deve ter pelo menos 2 anos.",
                    state.clone(),
                );
            }
            booking.current_passenger.birth_date = Some(date);
            if booking.commit_current_passenger().is_none() {
                // A partial draft at the birth-date step means the cursor got
                // out of sync with the collected fields.
                return corrupt_context_outcome();
            }

            if booking.roster_complete() {
                info!(
                    flight_number = %booking.flight_number,
                    passengers = booking.passengers.len(),
                    "roster complete, asking for confirmation"
                );
                let reply = summary(&booking);
                return TurnOutcome::advance(
                    reply,
                    SessionState::new(
                        Intent::ConfirmReservation,
                        SessionContext::Booking(booking),
                    ),
                );
            }

            let next = booking.current_passenger_ordinal();
            prompt(
                format!(
                    "Dados do passageiro {ordinal} registrados! \
                     Qual o nome completo do passageiro {next}?"
                ),
                booking,
            )
        }
        // The cursor only sits on None/Complete between flows; reaching a
        // detail turn in that state means the context is stale.
        PassengerStep::None | PassengerStep::Complete => corrupt_context_outcome(),
    }
}

fn prompt(reply: String, booking: BookingContext) -> TurnOutcome {
    TurnOutcome::advance(
        reply,
        SessionState::new(
            Intent::WaitingForPassengerDetails,
            SessionContext::Booking(booking),
        ),
    )
}

fn summary(booking: &BookingContext) -> String {
    let flight = &booking.flight_details;
    let total = flight.price * booking.passenger_count as f64;
    let mut text = format!(
        "Perfeito! Aqui está o resumo da sua reserva:\n\
         ✈️ Voo {} ({}): {} → {}\n\
         🗓 Partida: {}\n\
         💺 {} passageiro(s) × {} = {}\n\
         Passageiros:\n",
        flight.flight_number,
        flight.airline,
        flight.origin,
        flight.destination,
        flight.departure_time.format("%d/%m/%Y %H:%M"),
        booking.passenger_count,
        format_price(flight.price),
        format_price(total),
    );
    for (i, passenger) in booking.passengers.iter().enumerate() {
        text.push_str(&format!("  {}. {}\n", i + 1, passenger.name));
    }
    text.push_str("Confirma a reserva? (responda 'sim' ou 'não')");
    text
}
