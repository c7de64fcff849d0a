//! Shared token/selection bookkeeping.
//!
//! Players toggle tokens from their own tasks while the coordinator strips
//! tokens on claimed slots, so both paths go through one mutex here. This is
//! the only place selection sets are mutated; the grid's token display calls
//! happen under the same lock so display state can never drift from the
//! selection sets.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::constants::SELECTION_LIMIT;
use super::entities::{PlayerId, SlotIndex};
use super::table::Table;

/// Result of a player toggling a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// Token placed; `selection_full` is true when this brought the selection
    /// to the claim size.
    Placed { selection_full: bool },
    /// The player's own token was removed from the slot.
    Removed,
    /// No-op: empty slot, foreign-owned slot, full selection, or locked board.
    Ignored,
}

/// Ordered selection sets for every player plus per-slot token ownership.
///
/// Invariants held under the lock: a slot has at most one owner, a selection
/// holds at most [`SELECTION_LIMIT`] distinct slots, and every selected slot
/// holds a card.
pub struct TokenBoard {
    table: Arc<dyn Table>,
    inner: Mutex<BoardInner>,
}

struct BoardInner {
    /// Which player owns the token on a slot, if any.
    owners: HashMap<SlotIndex, PlayerId>,
    /// Per-player selections in placement order.
    selections: Vec<Vec<SlotIndex>>,
    /// While locked (reshuffle in progress) every toggle is ignored.
    locked: bool,
}

impl TokenBoard {
    pub fn new(table: Arc<dyn Table>, player_count: usize) -> Self {
        Self {
            table,
            inner: Mutex::new(BoardInner {
                owners: HashMap::new(),
                selections: vec![Vec::new(); player_count],
                locked: false,
            }),
        }
    }

    /// Toggle `player`'s token on `slot`.
    pub fn toggle(&self, player: PlayerId, slot: SlotIndex) -> ToggleOutcome {
        let mut inner = self.inner.lock().expect("token board lock poisoned");
        if inner.locked {
            return ToggleOutcome::Ignored;
        }
        if inner.selections[player].contains(&slot) {
            inner.selections[player].retain(|s| *s != slot);
            inner.owners.remove(&slot);
            self.table.remove_token(player, slot);
            return ToggleOutcome::Removed;
        }
        // Occupancy check happens under the lock: a slot consumed by a
        // concurrent claim is already empty by the time we get here.
        if self.table.slot_to_card(slot).is_none() {
            return ToggleOutcome::Ignored;
        }
        if inner.owners.contains_key(&slot) || inner.selections[player].len() >= SELECTION_LIMIT {
            return ToggleOutcome::Ignored;
        }
        inner.selections[player].push(slot);
        inner.owners.insert(slot, player);
        self.table.place_token(player, slot);
        ToggleOutcome::Placed {
            selection_full: inner.selections[player].len() == SELECTION_LIMIT,
        }
    }

    /// Snapshot of `player`'s current selection, in placement order.
    pub fn selection_of(&self, player: PlayerId) -> Vec<SlotIndex> {
        let inner = self.inner.lock().expect("token board lock poisoned");
        inner.selections[player].clone()
    }

    /// Atomically consume a verified claim: clear the claimer's selection,
    /// remove the claimed cards from the grid, and strip every other player's
    /// tokens on those slots. Returns the slots each other player lost.
    ///
    /// Coordinator-only. Removing the cards inside the lock guarantees no
    /// player can re-token a consumed slot before its card is gone.
    pub fn consume_slots(
        &self,
        claimer: PlayerId,
        slots: &[SlotIndex],
    ) -> Vec<(PlayerId, Vec<SlotIndex>)> {
        let mut inner = self.inner.lock().expect("token board lock poisoned");
        for slot in &inner.selections[claimer].clone() {
            inner.owners.remove(slot);
            self.table.remove_token(claimer, *slot);
        }
        inner.selections[claimer].clear();

        let mut affected: HashMap<PlayerId, Vec<SlotIndex>> = HashMap::new();
        for &slot in slots {
            self.table.remove_card(slot);
            if let Some(owner) = inner.owners.remove(&slot) {
                inner.selections[owner].retain(|s| *s != slot);
                self.table.remove_token(owner, slot);
                affected.entry(owner).or_default().push(slot);
            }
        }
        affected.into_iter().collect()
    }

    /// Clear one player's selection and tokens (round reset path).
    pub fn clear_player(&self, player: PlayerId) {
        let mut inner = self.inner.lock().expect("token board lock poisoned");
        for slot in inner.selections[player].clone() {
            inner.owners.remove(&slot);
            self.table.remove_token(player, slot);
        }
        inner.selections[player].clear();
    }

    /// Clear every selection and token.
    pub fn clear_all(&self) {
        let mut inner = self.inner.lock().expect("token board lock poisoned");
        for (player, selection) in inner.selections.clone().into_iter().enumerate() {
            for slot in selection {
                self.table.remove_token(player, slot);
            }
        }
        for selection in &mut inner.selections {
            selection.clear();
        }
        inner.owners.clear();
    }

    /// Freeze or unfreeze all input. While locked, toggles are no-ops.
    pub fn set_locked(&self, locked: bool) {
        let mut inner = self.inner.lock().expect("token board lock poisoned");
        inner.locked = locked;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::table::InMemoryGrid;

    fn board_with_cards(slots: usize, players: usize) -> (Arc<InMemoryGrid>, TokenBoard) {
        let grid = Arc::new(InMemoryGrid::new(slots));
        for slot in 0..slots {
            grid.place_card(100 + slot, slot);
        }
        let board = TokenBoard::new(grid.clone(), players);
        (grid, board)
    }

    #[test]
    fn toggle_places_and_removes() {
        let (_, board) = board_with_cards(4, 1);
        assert_eq!(
            board.toggle(0, 1),
            ToggleOutcome::Placed { selection_full: false }
        );
        assert_eq!(board.selection_of(0), vec![1]);
        assert_eq!(board.toggle(0, 1), ToggleOutcome::Removed);
        assert!(board.selection_of(0).is_empty());
    }

    #[test]
    fn third_token_reports_full_selection() {
        let (_, board) = board_with_cards(4, 1);
        board.toggle(0, 0);
        board.toggle(0, 1);
        assert_eq!(
            board.toggle(0, 2),
            ToggleOutcome::Placed { selection_full: true }
        );
        // Fourth token is refused outright.
        assert_eq!(board.toggle(0, 3), ToggleOutcome::Ignored);
        assert_eq!(board.selection_of(0), vec![0, 1, 2]);
    }

    #[test]
    fn foreign_owned_slot_is_exclusive() {
        let (_, board) = board_with_cards(4, 2);
        board.toggle(0, 2);
        assert_eq!(board.toggle(1, 2), ToggleOutcome::Ignored);
        assert!(board.selection_of(1).is_empty());
    }

    #[test]
    fn empty_slot_is_ignored() {
        let grid = Arc::new(InMemoryGrid::new(4));
        grid.place_card(1, 0);
        let board = TokenBoard::new(grid, 1);
        assert_eq!(board.toggle(0, 3), ToggleOutcome::Ignored);
    }

    #[test]
    fn consume_strips_other_players_tokens() {
        let (grid, board) = board_with_cards(6, 2);
        board.toggle(0, 0);
        board.toggle(0, 1);
        board.toggle(0, 2);
        board.toggle(1, 3);
        board.toggle(1, 4);

        // Consume a slot set that covers player 1's token on slot 3 to drive
        // the invalidation path.
        let affected = board.consume_slots(0, &[0, 1, 2, 3]);
        assert_eq!(affected, vec![(1, vec![3])]);
        assert!(board.selection_of(0).is_empty());
        assert_eq!(board.selection_of(1), vec![4]);
        assert_eq!(grid.slot_to_card(0), None);
        assert_eq!(grid.slot_to_card(3), None);
        assert!(grid.tokens_on(3).is_empty());
    }

    #[test]
    fn consumed_slot_cannot_be_reselected_until_refilled() {
        let (grid, board) = board_with_cards(4, 2);
        board.toggle(0, 0);
        board.toggle(0, 1);
        board.toggle(0, 2);
        board.consume_slots(0, &[0, 1, 2]);

        assert_eq!(board.toggle(1, 0), ToggleOutcome::Ignored);
        grid.place_card(200, 0);
        assert_eq!(
            board.toggle(1, 0),
            ToggleOutcome::Placed { selection_full: false }
        );
    }

    #[test]
    fn locked_board_ignores_toggles() {
        let (_, board) = board_with_cards(4, 1);
        board.set_locked(true);
        assert_eq!(board.toggle(0, 0), ToggleOutcome::Ignored);
        board.set_locked(false);
        assert_eq!(
            board.toggle(0, 0),
            ToggleOutcome::Placed { selection_full: false }
        );
    }

    #[test]
    fn clear_all_releases_every_token() {
        let (grid, board) = board_with_cards(4, 2);
        board.toggle(0, 0);
        board.toggle(1, 1);
        board.clear_all();
        assert!(board.selection_of(0).is_empty());
        assert!(board.selection_of(1).is_empty());
        assert!(grid.tokens_on(0).is_empty());
        assert!(grid.tokens_on(1).is_empty());
    }
}
