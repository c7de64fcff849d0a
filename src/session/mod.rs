//! Session wiring and lifecycle.
//!
//! [`GameSession`] spawns one task per player (plus a bot driver per bot
//! seat), drives the coordinator's deal/round/reshuffle loop to completion,
//! joins every task, and announces the winner set.

pub mod config;

pub use config::{ConfigError, SessionConfig};

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::coordinator::Coordinator;
use crate::display::DisplaySink;
use crate::game::{ClaimQueue, MatchOracle, PlayerId, Score, Table, TokenBoard};
use crate::player::{BotDriver, PlayerActor, PlayerHandle};

/// Final result of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOutcome {
    /// Players sharing the maximum score; ties produce multiple winners.
    pub winners: Vec<PlayerId>,
    pub scores: Vec<Score>,
}

/// External termination switch for a running session.
#[derive(Clone)]
pub struct ShutdownHandle {
    sender: watch::Sender<bool>,
}

impl ShutdownHandle {
    /// Request session termination. Every actor observes this at its next
    /// suspension point.
    pub fn shutdown(&self) {
        self.sender.send_replace(true);
    }
}

/// Wires the actors together and runs the game to completion.
pub struct GameSession {
    config: SessionConfig,
    display: Arc<dyn DisplaySink>,
    handles: Vec<PlayerHandle>,
    actors: Vec<PlayerActor>,
    bots: Vec<BotDriver>,
    coordinator: Coordinator,
    shutdown_tx: watch::Sender<bool>,
}

impl GameSession {
    /// Validate the configuration and wire up the session. Human seats come
    /// first (`0..human_players`), bot seats after.
    pub fn new(
        config: SessionConfig,
        table: Arc<dyn Table>,
        oracle: Arc<dyn MatchOracle>,
        display: Arc<dyn DisplaySink>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let player_count = config.player_count();
        let board = Arc::new(TokenBoard::new(table.clone(), player_count));
        let claims = Arc::new(ClaimQueue::new(player_count));
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let mut handles = Vec::with_capacity(player_count);
        let mut actors = Vec::with_capacity(player_count);
        for id in 0..player_count {
            let (actor, handle) =
                PlayerActor::new(id, board.clone(), claims.clone(), shutdown_rx.clone());
            actors.push(actor);
            handles.push(handle);
        }

        let mut bots = Vec::with_capacity(config.bot_players);
        for id in config.human_players..player_count {
            bots.push(BotDriver::new(
                handles[id].clone(),
                config.slot_count(),
                config.bot_reaction,
                config.rng_seed.map(|seed| seed.wrapping_add(id as u64)),
                shutdown_rx.clone(),
            ));
        }

        let coordinator = Coordinator::new(
            config.clone(),
            table,
            oracle,
            display.clone(),
            board,
            claims,
            handles.clone(),
            shutdown_rx,
        );

        Ok(Self {
            config,
            display,
            handles,
            actors,
            bots,
            coordinator,
            shutdown_tx,
        })
    }

    /// Input path for an external key source: the handle's `key_pressed`
    /// delivers `(player, slot)` events.
    pub fn handle(&self, player: PlayerId) -> PlayerHandle {
        self.handles[player].clone()
    }

    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle {
            sender: self.shutdown_tx.clone(),
        }
    }

    /// Run the session to completion: spawn all actors, drive the
    /// coordinator, then signal termination, join every player and bot task,
    /// and announce the winners.
    pub async fn run(self) -> SessionOutcome {
        log::info!(
            "session starting with {} human and {} bot players",
            self.config.human_players,
            self.config.bot_players
        );

        let mut tasks: Vec<JoinHandle<()>> = Vec::new();
        for actor in self.actors {
            tasks.push(tokio::spawn(actor.run()));
        }
        for bot in self.bots {
            tasks.push(tokio::spawn(bot.run()));
        }

        let scores = self.coordinator.run().await;

        // Players (and their bot sub-tasks) are joined before the session
        // returns.
        self.shutdown_tx.send_replace(true);
        for task in tasks {
            if let Err(error) = task.await {
                log::error!("actor task failed: {error}");
            }
        }

        let winners = winning_players(&scores);
        self.display.announce_winners(&winners);
        log::info!("session over, winners {winners:?}");
        SessionOutcome { winners, scores }
    }
}

/// The set of players holding the maximum score.
pub fn winning_players(scores: &[Score]) -> Vec<PlayerId> {
    let Some(top) = scores.iter().max().copied() else {
        return Vec::new();
    };
    scores
        .iter()
        .enumerate()
        .filter(|(_, score)| **score == top)
        .map(|(player, _)| player)
        .collect()
}
