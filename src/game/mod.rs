//! Core game structures shared between the player and coordinator actors.
//!
//! Everything here is a leaf: these types know nothing about tasks or
//! channels. The concurrency-sensitive pieces ([`TokenBoard`], [`ClaimQueue`])
//! are internally synchronized so both actor sides can hold an `Arc` to them.

pub mod claims;
pub mod constants;
pub mod entities;
pub mod oracle;
pub mod table;
pub mod tokens;

pub use claims::ClaimQueue;
pub use entities::{CardId, PlayerId, Score, SlotIndex};
pub use oracle::{MatchOracle, ModuloOracle};
pub use table::{InMemoryGrid, Table};
pub use tokens::{TokenBoard, ToggleOutcome};
