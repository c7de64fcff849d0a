//! Session configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::game::constants::{
    DEFAULT_BOT_REACTION, DEFAULT_COLUMNS, DEFAULT_DECK_SIZE, DEFAULT_PENALTY_FREEZE,
    DEFAULT_POINT_FREEZE, DEFAULT_ROWS, DEFAULT_TICK, DEFAULT_TURN_DURATION,
    DEFAULT_WARNING_THRESHOLD, DEFAULT_WARNING_TICK, SELECTION_LIMIT,
};

/// Configuration rejected by [`SessionConfig::validate`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("need at least one player")]
    NoPlayers,
    #[error("grid needs at least 3 slots, got {0}")]
    GridTooSmall(usize),
    #[error("deck of {deck} cannot fill a grid of {slots} slots")]
    DeckTooSmall { deck: usize, slots: usize },
    #[error("tick must be non-zero")]
    ZeroTick,
    #[error("warning tick must not exceed the normal tick")]
    WarningTickTooCoarse,
    #[error("turn duration must exceed the warning threshold")]
    TurnTooShort,
}

/// Session parameters: seats, grid shape, deck size, and all timing knobs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Seats driven by an external key source.
    pub human_players: usize,

    /// Seats driven by a synthetic-input bot task.
    pub bot_players: usize,

    /// Grid dimensions.
    pub rows: usize,
    pub columns: usize,

    /// Card universe size; identifiers are `0..deck_size`.
    pub deck_size: usize,

    /// Round length before a forced reshuffle.
    pub turn_duration: Duration,

    /// Remaining time below which the countdown switches to the warning
    /// cadence.
    pub warning_threshold: Duration,

    /// Countdown display granularity, normal and under warning.
    pub tick: Duration,
    pub warning_tick: Duration,

    /// Freeze after a scored claim.
    pub point_freeze: Duration,

    /// Freeze after a rejected claim.
    pub penalty_freeze: Duration,

    /// Delay between synthetic bot key presses.
    pub bot_reaction: Duration,

    /// Seed for deck shuffles and bot input; `None` draws from OS entropy.
    pub rng_seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            human_players: 0,
            bot_players: 2,
            rows: DEFAULT_ROWS,
            columns: DEFAULT_COLUMNS,
            deck_size: DEFAULT_DECK_SIZE,
            turn_duration: DEFAULT_TURN_DURATION,
            warning_threshold: DEFAULT_WARNING_THRESHOLD,
            tick: DEFAULT_TICK,
            warning_tick: DEFAULT_WARNING_TICK,
            point_freeze: DEFAULT_POINT_FREEZE,
            penalty_freeze: DEFAULT_PENALTY_FREEZE,
            bot_reaction: DEFAULT_BOT_REACTION,
            rng_seed: None,
        }
    }
}

impl SessionConfig {
    pub fn player_count(&self) -> usize {
        self.human_players + self.bot_players
    }

    pub fn slot_count(&self) -> usize {
        self.rows * self.columns
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.player_count() == 0 {
            return Err(ConfigError::NoPlayers);
        }
        if self.slot_count() < SELECTION_LIMIT {
            return Err(ConfigError::GridTooSmall(self.slot_count()));
        }
        if self.deck_size < self.slot_count() {
            return Err(ConfigError::DeckTooSmall {
                deck: self.deck_size,
                slots: self.slot_count(),
            });
        }
        if self.tick.is_zero() {
            return Err(ConfigError::ZeroTick);
        }
        if self.warning_tick > self.tick {
            return Err(ConfigError::WarningTickTooCoarse);
        }
        if self.turn_duration <= self.warning_threshold {
            return Err(ConfigError::TurnTooShort);
        }
        Ok(())
    }
}
