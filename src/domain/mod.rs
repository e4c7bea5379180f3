//! Domain layer: pure conversation, flight and passenger logic.

pub mod flight;
pub mod foundation;
pub mod nlu;
pub mod passenger;
pub mod session;
