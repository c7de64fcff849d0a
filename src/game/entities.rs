//! Identifier types for cards, slots, and players.

/// Opaque identifier naming a card's attribute combination. Unique across the
/// deck + grid union; a claimed card's identifier is retired for the rest of
/// the session.
pub type CardId = usize;

/// Index into the fixed-size grid (`rows * columns` positions).
pub type SlotIndex = usize;

/// Player identifier, `0..player_count`.
pub type PlayerId = usize;

/// Per-player score. Monotonically non-decreasing.
pub type Score = u32;
