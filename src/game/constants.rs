//! Game-wide constants and configuration defaults.

use std::time::Duration;

/// Number of slots a claim must cover. The oracle verifies exactly this many
/// cards at a time.
pub const SELECTION_LIMIT: usize = 3;

/// Default grid dimensions.
pub const DEFAULT_ROWS: usize = 3;
pub const DEFAULT_COLUMNS: usize = 4;

/// Default deck size (card universe `0..DEFAULT_DECK_SIZE`).
pub const DEFAULT_DECK_SIZE: usize = 81;

/// Default round length before a forced reshuffle.
pub const DEFAULT_TURN_DURATION: Duration = Duration::from_secs(60);

/// Below this remaining time the countdown display switches to the finer
/// warning cadence.
pub const DEFAULT_WARNING_THRESHOLD: Duration = Duration::from_secs(5);

/// Normal countdown display granularity.
pub const DEFAULT_TICK: Duration = Duration::from_secs(1);

/// Countdown display granularity once under the warning threshold.
pub const DEFAULT_WARNING_TICK: Duration = Duration::from_millis(10);

/// Freeze after a scored claim.
pub const DEFAULT_POINT_FREEZE: Duration = Duration::from_secs(1);

/// Freeze after a rejected claim.
pub const DEFAULT_PENALTY_FREEZE: Duration = Duration::from_secs(3);

/// Delay between synthetic key presses generated by a bot seat.
pub const DEFAULT_BOT_REACTION: Duration = Duration::from_millis(50);
