//! Conversation state: intents, booking progress, and the per-session record.
//!
//! `Intent` doubles as the state of the dialogue state machine; the context
//! is a tagged union replaced wholesale at the end of every turn, never
//! mutated in place across turns.

use serde::{Deserialize, Serialize};

use super::flight::Flight;
use super::nlu::SearchParams;
use super::passenger::{Passenger, PassengerDraft};

/// The discrete conversational state driving dispatch to a flow handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// No active flow; unmatched messages fall through to the AI responder.
    #[default]
    None,
    Greeting,
    Help,
    SearchFlights,
    BookFlight,
    /// Awaiting origin/destination/date for a search.
    WaitingForFlightDetails,
    /// Awaiting a flight number chosen from the last search results.
    WaitingForFlightSelection,
    /// Awaiting the number of passengers for the selected flight.
    WaitingForPassengerCount,
    /// Collecting passenger fields one message at a time.
    WaitingForPassengerDetails,
    /// Awaiting a yes/no answer on the booking summary.
    ConfirmReservation,
}

/// Cursor over the fields collected for one passenger.
///
/// Advances by exactly one step per valid input and never skips; a fresh
/// passenger restarts at `Name`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PassengerStep {
    #[default]
    None,
    Name,
    Rg,
    Cpf,
    BirthDate,
    Complete,
}

impl PassengerStep {
    /// The step that follows a valid input at this step.
    pub fn next(self) -> Self {
        match self {
            Self::None => Self::Name,
            Self::Name => Self::Rg,
            Self::Rg => Self::Cpf,
            Self::Cpf => Self::BirthDate,
            Self::BirthDate => Self::Complete,
            Self::Complete => Self::Complete,
        }
    }
}

/// Result of a successful search, held while the user picks a flight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchContext {
    pub flights: Vec<Flight>,
    pub search_params: SearchParams,
}

/// Working data for an in-progress booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingContext {
    pub flight_number: String,
    pub flight_details: Flight,
    pub passenger_count: usize,
    pub passengers: Vec<Passenger>,
    pub current_passenger_index: usize,
    pub current_step: PassengerStep,
    pub current_passenger: PassengerDraft,
}

impl BookingContext {
    /// Starts a booking for a selected flight, before the roster size is
    /// known.
    pub fn for_flight(flight: Flight) -> Self {
        Self {
            flight_number: flight.flight_number.clone(),
            flight_details: flight,
            passenger_count: 0,
            passengers: Vec::new(),
            current_passenger_index: 0,
            current_step: PassengerStep::None,
            current_passenger: PassengerDraft::default(),
        }
    }

    /// Fixes the roster size and positions the cursor on the first
    /// passenger's name.
    pub fn begin_roster(&mut self, count: usize) {
        self.passenger_count = count;
        self.passengers.clear();
        self.current_passenger_index = 0;
        self.current_step = PassengerStep::Name;
        self.current_passenger = PassengerDraft::default();
    }

    /// Appends the completed current passenger and moves the cursor to the
    /// next one (or marks the roster complete).
    ///
    /// Returns `None` if the draft is missing fields, which indicates a step
    /// sequencing bug rather than bad user input.
    pub fn commit_current_passenger(&mut self) -> Option<()> {
        let draft = std::mem::take(&mut self.current_passenger);
        self.passengers.push(draft.finish()?);
        self.current_passenger_index += 1;
        self.current_step = if self.roster_complete() {
            PassengerStep::Complete
        } else {
            PassengerStep::Name
        };
        Some(())
    }

    /// True once every passenger in the roster has been collected.
    pub fn roster_complete(&self) -> bool {
        self.current_passenger_index >= self.passenger_count
    }

    /// 1-based label of the passenger currently being collected.
    pub fn current_passenger_ordinal(&self) -> usize {
        self.current_passenger_index + 1
    }
}

/// The serializable context attached to a session, tagged by flow.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SessionContext {
    #[default]
    Empty,
    Searching(SearchContext),
    Booking(BookingContext),
}

impl SessionContext {
    /// Returns the booking context, if this session is mid-booking.
    pub fn as_booking(&self) -> Option<&BookingContext> {
        match self {
            Self::Booking(ctx) => Some(ctx),
            _ => None,
        }
    }

    /// Returns the search context, if this session holds search results.
    pub fn as_searching(&self) -> Option<&SearchContext> {
        match self {
            Self::Searching(ctx) => Some(ctx),
            _ => None,
        }
    }
}

/// The `(intent, context)` pair persisted per session between turns.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SessionState {
    pub intent: Intent,
    pub context: SessionContext,
}

impl SessionState {
    /// Fresh state: no intent, empty context.
    pub fn empty() -> Self {
        Self::default()
    }

    /// State for a new flow step.
    pub fn new(intent: Intent, context: SessionContext) -> Self {
        Self { intent, context }
    }
}
