//! Grid/table collaborator interface and an in-memory reference grid.

use std::collections::HashMap;
use std::sync::RwLock;

use super::entities::{CardId, PlayerId, SlotIndex};

/// The shuffled-grid storage collaborator: a bijection between occupied slots
/// and card identifiers, plus per-player token display state.
///
/// Card mutation (`place_card`, `remove_card`) is performed only by the
/// coordinator; players read slot occupancy through `slot_to_card`. Token
/// bookkeeping is reached only through [`super::TokenBoard`], which serializes
/// player deselection against the coordinator's invalidation path.
pub trait Table: Send + Sync {
    /// Place a card on an empty slot.
    fn place_card(&self, card: CardId, slot: SlotIndex);

    /// Remove and return the card on `slot`, if any.
    fn remove_card(&self, slot: SlotIndex) -> Option<CardId>;

    /// Card currently on `slot`, if any.
    fn slot_to_card(&self, slot: SlotIndex) -> Option<CardId>;

    /// Slot currently holding `card`, if it is on the grid.
    fn card_to_slot(&self, card: CardId) -> Option<SlotIndex>;

    /// Number of occupied slots.
    fn count_occupied(&self) -> usize;

    /// All cards currently on the grid, in slot order.
    fn cards(&self) -> Vec<CardId>;

    /// Total number of slots.
    fn slot_count(&self) -> usize;

    /// Show a player's token on a slot (display state).
    fn place_token(&self, player: PlayerId, slot: SlotIndex);

    /// Clear a player's token from a slot (display state).
    fn remove_token(&self, player: PlayerId, slot: SlotIndex);
}

/// In-memory grid keeping the slot↔card bijection and token display state.
pub struct InMemoryGrid {
    inner: RwLock<GridInner>,
}

struct GridInner {
    slot_to_card: Vec<Option<CardId>>,
    card_to_slot: HashMap<CardId, SlotIndex>,
    tokens: Vec<Vec<PlayerId>>,
}

impl InMemoryGrid {
    pub fn new(slot_count: usize) -> Self {
        Self {
            inner: RwLock::new(GridInner {
                slot_to_card: vec![None; slot_count],
                card_to_slot: HashMap::new(),
                tokens: vec![Vec::new(); slot_count],
            }),
        }
    }

    /// Players currently showing a token on `slot`.
    pub fn tokens_on(&self, slot: SlotIndex) -> Vec<PlayerId> {
        let inner = self.inner.read().expect("grid lock poisoned");
        inner.tokens.get(slot).cloned().unwrap_or_default()
    }
}

impl Table for InMemoryGrid {
    fn place_card(&self, card: CardId, slot: SlotIndex) {
        let mut inner = self.inner.write().expect("grid lock poisoned");
        if inner.slot_to_card[slot].is_some() {
            log::warn!("place_card on occupied slot {slot} ignored");
            return;
        }
        inner.slot_to_card[slot] = Some(card);
        inner.card_to_slot.insert(card, slot);
    }

    fn remove_card(&self, slot: SlotIndex) -> Option<CardId> {
        let mut inner = self.inner.write().expect("grid lock poisoned");
        let card = inner.slot_to_card[slot].take()?;
        inner.card_to_slot.remove(&card);
        Some(card)
    }

    fn slot_to_card(&self, slot: SlotIndex) -> Option<CardId> {
        let inner = self.inner.read().expect("grid lock poisoned");
        inner.slot_to_card.get(slot).copied().flatten()
    }

    fn card_to_slot(&self, card: CardId) -> Option<SlotIndex> {
        let inner = self.inner.read().expect("grid lock poisoned");
        inner.card_to_slot.get(&card).copied()
    }

    fn count_occupied(&self) -> usize {
        let inner = self.inner.read().expect("grid lock poisoned");
        inner.slot_to_card.iter().filter(|c| c.is_some()).count()
    }

    fn cards(&self) -> Vec<CardId> {
        let inner = self.inner.read().expect("grid lock poisoned");
        inner.slot_to_card.iter().copied().flatten().collect()
    }

    fn slot_count(&self) -> usize {
        let inner = self.inner.read().expect("grid lock poisoned");
        inner.slot_to_card.len()
    }

    fn place_token(&self, player: PlayerId, slot: SlotIndex) {
        let mut inner = self.inner.write().expect("grid lock poisoned");
        if !inner.tokens[slot].contains(&player) {
            inner.tokens[slot].push(player);
        }
    }

    fn remove_token(&self, player: PlayerId, slot: SlotIndex) {
        let mut inner = self.inner.write().expect("grid lock poisoned");
        inner.tokens[slot].retain(|p| *p != player);
    }
}
