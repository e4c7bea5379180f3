//! Aerochat - Flight-Booking Dialogue Engine
//!
//! This crate implements a multi-turn conversational flow for searching and
//! booking flights: intent classification over free text, per-session state,
//! and a staged booking workflow (search, selection, passenger roster,
//! confirmation).

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
