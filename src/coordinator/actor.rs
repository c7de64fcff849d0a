//! The coordinator: round loop, claim verification, scoring, termination.

use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tokio::sync::watch;
use tokio::time::{Instant, sleep_until};

use crate::display::DisplaySink;
use crate::game::constants::SELECTION_LIMIT;
use crate::game::{CardId, ClaimQueue, MatchOracle, Score, SlotIndex, Table, TokenBoard};
use crate::player::{PlayerHandle, PlayerMessage, Verdict};
use crate::session::SessionConfig;

use super::clock::RoundClock;

/// Owns the round loop: deal, verify claims, advance timing, reshuffle,
/// terminate.
///
/// All card mutation happens on this task. Player-side effects (verdicts,
/// unfreezes, round resets) are messages into each player's inbox; the only
/// state shared with player tasks is the internally synchronized
/// [`TokenBoard`] and [`ClaimQueue`].
pub struct Coordinator {
    config: SessionConfig,
    table: Arc<dyn Table>,
    oracle: Arc<dyn MatchOracle>,
    display: Arc<dyn DisplaySink>,
    board: Arc<TokenBoard>,
    claims: Arc<ClaimQueue>,
    players: Vec<PlayerHandle>,
    deck: Vec<CardId>,
    scores: Vec<Score>,
    clock: RoundClock,
    rng: StdRng,
    shutdown: watch::Receiver<bool>,
}

impl Coordinator {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        config: SessionConfig,
        table: Arc<dyn Table>,
        oracle: Arc<dyn MatchOracle>,
        display: Arc<dyn DisplaySink>,
        board: Arc<TokenBoard>,
        claims: Arc<ClaimQueue>,
        players: Vec<PlayerHandle>,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        let deck = (0..config.deck_size).collect();
        let scores = vec![0; players.len()];
        let clock = RoundClock::new(
            config.turn_duration,
            config.warning_threshold,
            config.tick,
            config.warning_tick,
            players.len(),
            Instant::now(),
        );
        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            config,
            table,
            oracle,
            display,
            board,
            claims,
            players,
            deck,
            scores,
            clock,
            rng,
            shutdown,
        }
    }

    /// Run deal → round → reshuffle until shutdown or card exhaustion.
    /// Returns the final scores.
    pub async fn run(mut self) -> Vec<Score> {
        log::info!("coordinator starting");
        while !self.should_finish() {
            self.begin_round();
            self.round_loop().await;
            self.end_round().await;
        }
        log::info!("coordinator terminated, scores {:?}", self.scores);
        self.scores
    }

    /// Shutdown requested, or no valid match can be formed from deck ∪ grid.
    fn should_finish(&self) -> bool {
        self.shutdown_requested() || !self.any_match_left()
    }

    /// A closed shutdown channel counts as shutdown.
    fn shutdown_requested(&self) -> bool {
        *self.shutdown.borrow() || self.shutdown.has_changed().is_err()
    }

    fn any_match_left(&self) -> bool {
        let mut pool = self.deck.clone();
        pool.extend(self.table.cards());
        self.oracle.exists_match(&pool)
    }

    fn begin_round(&mut self) {
        self.deal_out();
        self.board.set_locked(false);
        let now = Instant::now();
        self.clock.reset(now);
        self.display
            .set_countdown(self.clock.remaining(now), self.clock.in_warning(now));
        log::debug!(
            "round started, {} cards on grid, {} in deck",
            self.table.count_occupied(),
            self.deck.len()
        );
    }

    /// Inner loop: one blocking wait per iteration, woken by a claim
    /// arriving, the next timer boundary, or shutdown.
    async fn round_loop(&mut self) {
        loop {
            let now = Instant::now();
            if self.shutdown_requested() || self.clock.expired(now) || !self.any_match_left() {
                break;
            }
            let wake = self.clock.next_wake(now);
            tokio::select! {
                _ = self.claims.notified() => {}
                _ = sleep_until(wake) => {}
                result = self.shutdown.changed() => {
                    if result.is_err() {
                        break;
                    }
                }
            }
            self.advance_clock().await;
            self.process_claims().await;
        }
    }

    /// Push countdown/freeze displays forward and deliver unfreezes.
    async fn advance_clock(&mut self) {
        let update = self.clock.advance(Instant::now());
        if let Some((remaining, warning)) = update.countdown {
            self.display.set_countdown(remaining, warning);
        }
        for (player, remaining) in update.freeze_display {
            self.display.set_freeze(player, remaining);
        }
        for player in update.unfrozen {
            self.display.set_freeze(player, Duration::ZERO);
            self.players[player].send(PlayerMessage::Unfreeze).await;
        }
    }

    /// Drain pending claims in arrival order and verify each against the
    /// player's *current* selection, never a cached copy.
    async fn process_claims(&mut self) {
        while let Some(player) = self.claims.drain_next() {
            let slots = self.board.selection_of(player);
            if slots.len() != SELECTION_LIMIT {
                // The selection shrank after submission (cards invalidated
                // concurrently); the actor already self-transitioned, so no
                // verdict is owed.
                log::debug!("player {player} claim went stale, skipping");
                continue;
            }
            let cards: Vec<CardId> = slots
                .iter()
                .filter_map(|&slot| self.table.slot_to_card(slot))
                .collect();
            let Ok(triple) = <[CardId; SELECTION_LIMIT]>::try_from(cards) else {
                log::debug!("player {player} claim references empty slots, skipping");
                continue;
            };
            if self.oracle.is_match(triple) {
                self.accept_claim(player, &slots).await;
            } else {
                self.reject_claim(player).await;
            }
        }
    }

    async fn accept_claim(&mut self, player: usize, slots: &[SlotIndex]) {
        // Atomically clear the claimer's selection, remove the claimed cards
        // (discarded for good, never reshuffled), and strip any other
        // player's tokens on those slots.
        let affected = self.board.consume_slots(player, slots);
        for (other, lost) in affected {
            self.claims.invalidate(other);
            self.players[other]
                .send(PlayerMessage::Verdict(Verdict::Invalidated { slots: lost }))
                .await;
        }
        self.refill_slots(slots);

        self.players[player]
            .send(PlayerMessage::Verdict(Verdict::Accepted))
            .await;
        self.scores[player] += 1;
        self.display.set_score(player, self.scores[player]);

        let now = Instant::now();
        self.clock
            .set_freeze(player, self.config.point_freeze, now);
        self.display.set_freeze(player, self.config.point_freeze);

        // A successful match refreshes the round instead of ending it early.
        self.clock.reset(now);
        self.display
            .set_countdown(self.clock.remaining(now), self.clock.in_warning(now));
        log::info!(
            "player {player} scored, total {}, {} cards left in deck",
            self.scores[player],
            self.deck.len()
        );
    }

    async fn reject_claim(&mut self, player: usize) {
        self.players[player]
            .send(PlayerMessage::Verdict(Verdict::Rejected))
            .await;
        let now = Instant::now();
        self.clock
            .set_freeze(player, self.config.penalty_freeze, now);
        self.display.set_freeze(player, self.config.penalty_freeze);
        log::info!("player {player} penalized for an invalid claim");
    }

    /// Refill freed slots from the deck: random draw, random slot order.
    fn refill_slots(&mut self, slots: &[SlotIndex]) {
        let mut order = slots.to_vec();
        order.shuffle(&mut self.rng);
        self.deck.shuffle(&mut self.rng);
        for slot in order {
            match self.deck.pop() {
                Some(card) => self.table.place_card(card, slot),
                None => break,
            }
        }
    }

    /// Fill every empty slot from the deck (round start).
    fn deal_out(&mut self) {
        let empty: Vec<SlotIndex> = (0..self.table.slot_count())
            .filter(|&slot| self.table.slot_to_card(slot).is_none())
            .collect();
        self.refill_slots(&empty);
    }

    /// Round boundary: freeze input, drop pending claims, wipe selections,
    /// and sweep all grid cards back into the deck in random slot order.
    async fn end_round(&mut self) {
        self.board.set_locked(true);
        self.claims.clear();
        self.board.clear_all();
        for handle in &self.players {
            handle.send(PlayerMessage::ResetRound).await;
        }

        let mut slots: Vec<SlotIndex> = (0..self.table.slot_count()).collect();
        slots.shuffle(&mut self.rng);
        for slot in slots {
            if let Some(card) = self.table.remove_card(slot) {
                self.deck.push(card);
            }
        }
        log::debug!("round over, grid swept back into the deck");
    }
}
