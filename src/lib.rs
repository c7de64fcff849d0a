//! # Triples
//!
//! A concurrent match-claim card game core.
//!
//! A fixed set of player actors race to claim matching triples of cards from
//! a shared shuffled grid while a single coordinator actor owns verification,
//! grid mutation, scoring, round timing, and termination. The matching rule
//! itself, the grid storage, and the display are external collaborators
//! plugged in behind traits.
//!
//! ## Architecture
//!
//! Every actor runs in its own Tokio task and communicates over channels:
//!
//! - **PlayerActor**: per-player state machine (`Selecting` →
//!   `AwaitingVerdict` → `Frozen` → `Selecting`), fed by key-press input and
//!   verdict messages. Bot seats get a [`player::BotDriver`] task that speaks
//!   the same input path.
//! - **Coordinator**: drains the claim queue in arrival order, verifies
//!   claims against the oracle, mutates the grid, awards points and
//!   penalties, drives the round countdown, and decides termination.
//! - **GameSession**: wiring and lifecycle. Spawns the actors, drives the
//!   deal/round/reshuffle loop to completion, joins everything, and
//!   announces the winners.
//!
//! Claims travel player → [`game::ClaimQueue`] → coordinator; verdicts,
//! unfreezes, and round resets travel back over each player's inbox. Token
//! bookkeeping lives in a single shared [`game::TokenBoard`] region so that a
//! player's manual deselection and the coordinator's invalidation path can
//! never race.
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use triples::{
//!     display::LogDisplay,
//!     game::{InMemoryGrid, ModuloOracle},
//!     session::{GameSession, SessionConfig},
//! };
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = SessionConfig::default();
//!     let table = Arc::new(InMemoryGrid::new(config.slot_count()));
//!     let oracle = Arc::new(ModuloOracle::new(3));
//!     let session = GameSession::new(config, table, oracle, Arc::new(LogDisplay)).unwrap();
//!     let outcome = session.run().await;
//!     println!("winners: {:?}", outcome.winners);
//! }
//! ```

/// Leaf domain types and shared structures: grid, tokens, claims, oracle.
pub mod game;
pub use game::{
    CardId, ClaimQueue, InMemoryGrid, MatchOracle, ModuloOracle, PlayerId, Score, SlotIndex,
    Table, TokenBoard,
};

/// Per-player actor, messages, and the synthetic-input bot driver.
pub mod player;
pub use player::{BotDriver, PlayerActor, PlayerHandle, PlayerMessage, PlayerPhase, Verdict};

/// The coordinator actor and round/freeze timing.
pub mod coordinator;
pub use coordinator::{Coordinator, RoundClock};

/// Session wiring, configuration, and winner computation.
pub mod session;
pub use session::{
    ConfigError, GameSession, SessionConfig, SessionOutcome, ShutdownHandle, winning_players,
};

/// Display sink collaborator trait and stock implementations.
pub mod display;
pub use display::{DisplaySink, LogDisplay, NullDisplay};
