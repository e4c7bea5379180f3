//! Intent classification over `(message, current intent)`.
//!
//! Deterministic keyword matching, not statistical NLU. The classifier sits
//! behind a trait so a smarter matcher can replace it without touching the
//! flow handlers; the shipped implementation is an ordered rule list
//! evaluated top-down, first match wins, which keeps precedence auditable.

use once_cell::sync::Lazy;
use regex::Regex;

use super::extractor::{extract_flight_number, extract_integer, extract_search_params};
use crate::domain::session::Intent;

static GREETING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(olá|oi|bom dia|boa tarde|boa noite)\b").unwrap());

static HELP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(ajuda|socorro|help|help me)\b").unwrap());

static SEARCH_VERB_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(busca\w*|pesquis\w*|procur\w*|achar|acha|encontra\w*)\s+(voo|passagem)\b")
        .unwrap()
});

static BOOK_VERB_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(reserv\w*|compr\w*)\s+(voo\w*|passage\w*)\b").unwrap());

/// Affirmative/negative tokens accepted while a confirmation is pending.
fn is_yes_no(message: &str) -> bool {
    matches!(message, "sim" | "não" | "nao")
}

/// Classifies a message into an intent, given the session's current intent.
pub trait IntentClassifier: Send + Sync {
    fn classify(&self, message: &str, current: Intent) -> Intent;
}

/// One precedence entry: the intent produced when its predicate matches the
/// case-folded message and current intent.
struct Rule {
    intent: Intent,
    applies: fn(&str, Intent) -> bool,
}

/// The ordered-rule classifier.
///
/// Context-sensitive rules come first so short mid-flow replies ("3", "sim",
/// "AZ101") are read correctly without restating a verb; keyword rules then
/// bootstrap a flow from a cold session.
pub struct RuleClassifier {
    rules: Vec<Rule>,
}

impl RuleClassifier {
    pub fn new() -> Self {
        let rules = vec![
            // A pending confirmation consumes yes/no answers.
            Rule {
                intent: Intent::ConfirmReservation,
                applies: |msg, current| {
                    current == Intent::ConfirmReservation && is_yes_no(msg)
                },
            },
            // Mid-roster, every message is the next field value.
            Rule {
                intent: Intent::WaitingForPassengerDetails,
                applies: |_, current| current == Intent::WaitingForPassengerDetails,
            },
            // A bare number answers the passenger-count question.
            Rule {
                intent: Intent::WaitingForPassengerCount,
                applies: |msg, current| {
                    current == Intent::WaitingForPassengerCount
                        && extract_integer(msg).is_some()
                },
            },
            Rule {
                intent: Intent::Greeting,
                applies: |msg, _| GREETING_RE.is_match(msg),
            },
            Rule {
                intent: Intent::Help,
                applies: |msg, _| HELP_RE.is_match(msg),
            },
            Rule {
                intent: Intent::SearchFlights,
                applies: |msg, current| {
                    SEARCH_VERB_RE.is_match(msg)
                        || (current == Intent::WaitingForFlightDetails
                            && extract_search_params(msg).is_some())
                },
            },
            Rule {
                intent: Intent::BookFlight,
                applies: |msg, current| {
                    BOOK_VERB_RE.is_match(msg)
                        || (current == Intent::WaitingForFlightSelection
                            && extract_flight_number(msg).is_some())
                },
            },
            // A lone flight-number-shaped token selects a flight.
            Rule {
                intent: Intent::BookFlight,
                applies: |msg, current| {
                    current == Intent::WaitingForFlightSelection
                        && extract_flight_number(msg).is_some()
                },
            },
            Rule {
                intent: Intent::SearchFlights,
                applies: |msg, current| {
                    current == Intent::WaitingForFlightDetails
                        && extract_search_params(msg).is_some()
                },
            },
        ];
        Self { rules }
    }
}

impl Default for RuleClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl IntentClassifier for RuleClassifier {
    fn classify(&self, message: &str, current: Intent) -> Intent {
        let folded = message.to_lowercase();
        let folded = folded.trim();
        self.rules
            .iter()
            .find(|rule| (rule.applies)(folded, current))
            .map(|rule| rule.intent)
            // No rule matched: delegate to the AI fallback.
            .unwrap_or(Intent::None)
    }
}
