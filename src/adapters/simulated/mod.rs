//! Simulated external services (inventory, AI fallback).

mod ai;
mod ticket;

pub use ai::CannedAiResponder;
pub use ticket::SimulatedTicketService;
