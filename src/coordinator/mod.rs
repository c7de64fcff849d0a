//! Coordinator actor module.
//!
//! The coordinator is the single owner of the deck and of all card mutation
//! on the grid. It drains the claim queue in arrival order, verifies claims
//! against the oracle, awards points and penalties, drives the round
//! countdown and freeze timers, and decides termination.

pub mod actor;
pub mod clock;

pub use actor::Coordinator;
pub use clock::{ClockUpdate, RoundClock};
