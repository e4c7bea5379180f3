//! Foundation layer: shared value objects and error types.

mod errors;
mod ids;

pub use errors::ValidationError;
pub use ids::{ReservationId, SessionId, UserId};
