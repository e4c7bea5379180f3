//! Canned greeting and help responses. Both end any active flow.

use super::TurnOutcome;

pub fn greeting() -> TurnOutcome {
    TurnOutcome::reset(
        "Olá! Sou seu assistente de reservas de passagens aéreas. Em que posso ajudar?",
    )
}

pub fn help() -> TurnOutcome {
    TurnOutcome::reset(
        "Olá! Como posso te ajudar hoje? Você pode buscar voo me dizendo a origem, \
         o destino e a data (ex: 'buscar voo de São Paulo para Rio de Janeiro em \
         28/05/2025'), reservar informando o número do voo, ou apenas conversar.",
    )
}
