//! Display sink collaborator: score, countdown, freeze, and winner output.

use std::time::Duration;

use crate::game::{PlayerId, Score};

/// External display/front-end sink. Implementations must tolerate being
/// called from the coordinator task at tick cadence.
pub trait DisplaySink: Send + Sync {
    fn set_score(&self, player: PlayerId, score: Score);

    /// Update the round countdown. `warning` is set once the remaining time
    /// is at or below the warning threshold.
    fn set_countdown(&self, remaining: Duration, warning: bool);

    /// Update a player's freeze countdown; zero means unfrozen.
    fn set_freeze(&self, player: PlayerId, remaining: Duration);

    fn announce_winners(&self, winners: &[PlayerId]);
}

/// Display sink that writes everything to the log facade.
pub struct LogDisplay;

impl DisplaySink for LogDisplay {
    fn set_score(&self, player: PlayerId, score: Score) {
        log::info!("player {player} score {score}");
    }

    fn set_countdown(&self, remaining: Duration, warning: bool) {
        log::debug!("countdown {remaining:?} warning={warning}");
    }

    fn set_freeze(&self, player: PlayerId, remaining: Duration) {
        log::debug!("player {player} freeze {remaining:?}");
    }

    fn announce_winners(&self, winners: &[PlayerId]) {
        log::info!("winners: {winners:?}");
    }
}

/// Display sink that discards everything.
pub struct NullDisplay;

impl DisplaySink for NullDisplay {
    fn set_score(&self, _player: PlayerId, _score: Score) {}
    fn set_countdown(&self, _remaining: Duration, _warning: bool) {}
    fn set_freeze(&self, _player: PlayerId, _remaining: Duration) {}
    fn announce_winners(&self, _winners: &[PlayerId]) {}
}
