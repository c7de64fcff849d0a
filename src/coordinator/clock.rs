//! Round countdown and per-player freeze timing.

use std::time::Duration;

use tokio::time::Instant;

use crate::game::PlayerId;

/// What a clock advance produced: display updates and unfreeze transitions.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ClockUpdate {
    /// `(remaining, warning)` when a countdown display update is due.
    pub countdown: Option<(Duration, bool)>,
    /// Freeze display refreshes for players still frozen.
    pub freeze_display: Vec<(PlayerId, Duration)>,
    /// Players whose freeze just expired.
    pub unfrozen: Vec<PlayerId>,
}

/// Countdown/warning/reshuffle timing plus independent per-player freeze
/// countdowns.
///
/// The clock never sleeps itself; the coordinator asks for [`next_wake`]
/// (earliest of next tick, earliest freeze expiry, reshuffle deadline) and
/// then reports back through [`advance`]. Under the warning threshold the
/// tick shrinks so the display can run a finer cadence.
///
/// [`next_wake`]: RoundClock::next_wake
/// [`advance`]: RoundClock::advance
pub struct RoundClock {
    turn_duration: Duration,
    warning_threshold: Duration,
    tick: Duration,
    warning_tick: Duration,
    deadline: Instant,
    next_tick: Instant,
    freezes: Vec<Option<Instant>>,
}

impl RoundClock {
    pub fn new(
        turn_duration: Duration,
        warning_threshold: Duration,
        tick: Duration,
        warning_tick: Duration,
        player_count: usize,
        now: Instant,
    ) -> Self {
        let mut clock = Self {
            turn_duration,
            warning_threshold,
            tick,
            warning_tick,
            deadline: now,
            next_tick: now,
            freezes: vec![None; player_count],
        };
        clock.reset(now);
        clock
    }

    /// Restart the countdown at the full turn duration. Freezes keep
    /// running: they are independent of round boundaries.
    pub fn reset(&mut self, now: Instant) {
        self.deadline = now + self.turn_duration;
        self.next_tick = now + self.tick_size(now);
    }

    /// Time left until the forced reshuffle.
    pub fn remaining(&self, now: Instant) -> Duration {
        self.deadline.saturating_duration_since(now)
    }

    /// Whether the round countdown has run out.
    pub fn expired(&self, now: Instant) -> bool {
        now >= self.deadline
    }

    pub fn in_warning(&self, now: Instant) -> bool {
        self.remaining(now) <= self.warning_threshold
    }

    fn tick_size(&self, now: Instant) -> Duration {
        if self.in_warning(now) {
            self.warning_tick
        } else {
            self.tick
        }
    }

    /// Start (or restart) a player's freeze countdown.
    pub fn set_freeze(&mut self, player: PlayerId, duration: Duration, now: Instant) {
        self.freezes[player] = Some(now + duration);
    }

    pub fn frozen(&self, player: PlayerId, now: Instant) -> bool {
        matches!(self.freezes[player], Some(expiry) if expiry > now)
    }

    /// Earliest instant the coordinator must wake at: the next display tick,
    /// the earliest freeze expiry, or the reshuffle deadline. Never before
    /// `now`, so a missed boundary wakes immediately instead of in the past.
    pub fn next_wake(&self, now: Instant) -> Instant {
        let mut wake = self.next_tick.min(self.deadline);
        for expiry in self.freezes.iter().flatten() {
            wake = wake.min(*expiry);
        }
        wake.max(now)
    }

    /// Account for elapsed time: emit a countdown update when a tick
    /// boundary passed, refresh freeze displays, and collect unfreeze
    /// transitions.
    pub fn advance(&mut self, now: Instant) -> ClockUpdate {
        let mut update = ClockUpdate::default();

        if now >= self.next_tick {
            update.countdown = Some((self.remaining(now), self.in_warning(now)));
            // Re-arm relative to now so a late wake cannot queue a burst of
            // display updates.
            self.next_tick = now + self.tick_size(now);
        }

        for (player, entry) in self.freezes.iter_mut().enumerate() {
            if let Some(expiry) = *entry {
                if expiry <= now {
                    *entry = None;
                    update.unfrozen.push(player);
                } else if update.countdown.is_some() {
                    update
                        .freeze_display
                        .push((player, expiry.saturating_duration_since(now)));
                }
            }
        }
        update
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clock(now: Instant) -> RoundClock {
        RoundClock::new(
            Duration::from_secs(60),
            Duration::from_secs(5),
            Duration::from_secs(1),
            Duration::from_millis(10),
            2,
            now,
        )
    }

    #[tokio::test(start_paused = true)]
    async fn countdown_updates_once_per_tick() {
        let start = Instant::now();
        let mut clock = clock(start);

        assert_eq!(clock.advance(start).countdown, None);

        tokio::time::advance(Duration::from_secs(1)).await;
        let now = Instant::now();
        let update = clock.advance(now);
        assert_eq!(update.countdown, Some((Duration::from_secs(59), false)));

        // No second update until the next boundary.
        assert_eq!(clock.advance(now).countdown, None);
    }

    #[tokio::test(start_paused = true)]
    async fn warning_threshold_switches_cadence() {
        let start = Instant::now();
        let mut clock = clock(start);

        tokio::time::advance(Duration::from_secs(56)).await;
        let now = Instant::now();
        let update = clock.advance(now);
        assert_eq!(update.countdown, Some((Duration::from_secs(4), true)));
        // Next tick is one warning tick away, not one full second.
        assert_eq!(clock.next_wake(now), now + Duration::from_millis(10));
    }

    #[tokio::test(start_paused = true)]
    async fn reset_restores_full_duration() {
        let start = Instant::now();
        let mut clock = clock(start);
        tokio::time::advance(Duration::from_secs(30)).await;
        let now = Instant::now();
        clock.reset(now);
        assert_eq!(clock.remaining(now), Duration::from_secs(60));
        assert!(!clock.expired(now + Duration::from_secs(59)));
        assert!(clock.expired(now + Duration::from_secs(60)));
    }

    #[tokio::test(start_paused = true)]
    async fn missed_boundaries_wake_immediately() {
        let start = Instant::now();
        let clock = clock(start);

        // Sleep past the deadline: the wake target is now, not the past.
        tokio::time::advance(Duration::from_secs(90)).await;
        let now = Instant::now();
        assert!(clock.expired(now));
        assert_eq!(clock.next_wake(now), now);
    }

    #[tokio::test(start_paused = true)]
    async fn freeze_expiry_bounds_the_wake_and_unfreezes() {
        let start = Instant::now();
        let mut clock = clock(start);
        clock.set_freeze(1, Duration::from_millis(300), start);

        assert!(clock.frozen(1, start));
        assert_eq!(clock.next_wake(start), start + Duration::from_millis(300));

        tokio::time::advance(Duration::from_millis(300)).await;
        let now = Instant::now();
        let update = clock.advance(now);
        assert_eq!(update.unfrozen, vec![1]);
        assert!(!clock.frozen(1, now));
    }

    #[tokio::test(start_paused = true)]
    async fn frozen_player_display_refreshes_on_ticks() {
        let start = Instant::now();
        let mut clock = clock(start);
        clock.set_freeze(0, Duration::from_secs(3), start);

        tokio::time::advance(Duration::from_secs(1)).await;
        let update = clock.advance(Instant::now());
        assert_eq!(update.freeze_display, vec![(0, Duration::from_secs(2))]);
    }
}
