//! Adapters: concrete implementations of the ports.

pub mod memory;
pub mod simulated;
