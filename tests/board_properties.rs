/// Property-based tests for token-board invariants and winner selection
/// using proptest.
///
/// These tests verify that arbitrary interleavings of toggle calls can
/// never violate slot exclusivity or the selection-size limit, and that
/// winner selection always picks exactly the top scorers.
use proptest::prelude::*;
use std::collections::HashSet;
use std::sync::Arc;

use triples::game::constants::SELECTION_LIMIT;
use triples::{InMemoryGrid, Score, Table, TokenBoard, winning_players};

const SLOTS: usize = 12;
const PLAYERS: usize = 4;

// Strategy to generate a sequence of (player, slot) toggle calls
fn toggle_sequence_strategy() -> impl Strategy<Value = Vec<(usize, usize)>> {
    prop::collection::vec((0..PLAYERS, 0..SLOTS), 0..100)
}

fn full_board() -> TokenBoard {
    let grid = Arc::new(InMemoryGrid::new(SLOTS));
    for slot in 0..SLOTS {
        grid.place_card(slot, slot);
    }
    TokenBoard::new(grid, PLAYERS)
}

proptest! {
    #[test]
    fn toggles_never_break_slot_exclusivity(toggles in toggle_sequence_strategy()) {
        let board = full_board();
        for (player, slot) in toggles {
            board.toggle(player, slot);

            // No slot may appear in two players' selections at any point.
            let mut seen = HashSet::new();
            for p in 0..PLAYERS {
                for s in board.selection_of(p) {
                    prop_assert!(
                        seen.insert(s),
                        "slot {} selected by two players", s
                    );
                }
            }
        }
    }

    #[test]
    fn selections_never_exceed_the_claim_size(toggles in toggle_sequence_strategy()) {
        let board = full_board();
        for (player, slot) in toggles {
            board.toggle(player, slot);
            for p in 0..PLAYERS {
                prop_assert!(board.selection_of(p).len() <= SELECTION_LIMIT);
            }
        }
    }

    #[test]
    fn consuming_a_selection_releases_its_slots(toggles in toggle_sequence_strategy()) {
        let board = full_board();
        for (player, slot) in toggles {
            board.toggle(player, slot);
        }

        // Consume whatever player 0 holds; afterwards nobody may hold those
        // slots and player 0's selection must be empty.
        let claimed = board.selection_of(0);
        board.consume_slots(0, &claimed);
        prop_assert!(board.selection_of(0).is_empty());
        for p in 1..PLAYERS {
            for s in board.selection_of(p) {
                prop_assert!(!claimed.contains(&s), "consumed slot {} still selected", s);
            }
        }
    }

    #[test]
    fn winners_hold_exactly_the_top_score(
        scores in prop::collection::vec(0u32..50, 1..=8)
    ) {
        let winners = winning_players(&scores);

        prop_assert!(!winners.is_empty(), "nonempty scores must produce a winner");

        let top: Score = *scores.iter().max().unwrap();
        for (player, score) in scores.iter().enumerate() {
            let is_winner = winners.contains(&player);
            prop_assert_eq!(is_winner, *score == top, "player {} misclassified", player);
        }

        // Indices come out sorted and unique.
        let mut sorted = winners.clone();
        sorted.sort_unstable();
        sorted.dedup();
        prop_assert_eq!(winners, sorted);
    }
}
