//! Synthetic-input driver for bot seats.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::watch;
use tokio::time::sleep;

use super::actor::PlayerHandle;
use super::messages::PlayerPhase;

/// Generates pseudo-random key presses for one player.
///
/// The driver holds nothing but a [`PlayerHandle`]: it speaks the same input
/// path a keyboard source would, pauses on the phase watch whenever the
/// player is frozen or has a claim pending, and exits on session shutdown.
pub struct BotDriver {
    player: PlayerHandle,
    slot_count: usize,
    reaction: Duration,
    rng: StdRng,
    shutdown: watch::Receiver<bool>,
}

impl BotDriver {
    pub fn new(
        player: PlayerHandle,
        slot_count: usize,
        reaction: Duration,
        seed: Option<u64>,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            player,
            slot_count,
            reaction,
            rng,
            shutdown,
        }
    }

    pub async fn run(mut self) {
        let id = self.player.id();
        log::info!("bot driver for player {id} starting");
        let mut phase = self.player.phase_watch();
        loop {
            if *self.shutdown.borrow() {
                break;
            }
            let current = *phase.borrow_and_update();
            match current {
                PlayerPhase::Selecting => {
                    let slot = self.rng.random_range(0..self.slot_count);
                    self.player.key_pressed(slot).await;
                    tokio::select! {
                        _ = sleep(self.reaction) => {}
                        result = self.shutdown.changed() => {
                            if result.is_err() {
                                break;
                            }
                        }
                    }
                }
                PlayerPhase::Terminated => break,
                // Frozen or awaiting a verdict: sleep until the phase moves.
                _ => {
                    tokio::select! {
                        result = phase.changed() => {
                            if result.is_err() {
                                break;
                            }
                        }
                        result = self.shutdown.changed() => {
                            if result.is_err() {
                                break;
                            }
                        }
                    }
                }
            }
        }
        log::info!("bot driver for player {id} terminated");
    }
}
