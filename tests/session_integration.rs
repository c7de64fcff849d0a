//! End-to-end session tests: exhaustion-driven termination, scripted human
//! input, and external shutdown.

use std::sync::Arc;
use std::time::Duration;

use std::sync::atomic::{AtomicU32, Ordering};

use tokio::time::timeout;

use triples::{
    DisplaySink, GameSession, InMemoryGrid, ModuloOracle, NullDisplay, PlayerId, Score,
    SessionConfig, Table,
};

/// Display sink that remembers the latest score per player.
#[derive(Default)]
struct ScoreBoard {
    scores: [AtomicU32; 4],
}

impl DisplaySink for ScoreBoard {
    fn set_score(&self, player: PlayerId, score: Score) {
        self.scores[player].store(score, Ordering::SeqCst);
    }
    fn set_countdown(&self, _remaining: Duration, _warning: bool) {}
    fn set_freeze(&self, _player: PlayerId, _remaining: Duration) {}
    fn announce_winners(&self, _winners: &[PlayerId]) {}
}

fn fast_config() -> SessionConfig {
    SessionConfig {
        human_players: 0,
        bot_players: 1,
        rows: 3,
        columns: 4,
        deck_size: 12,
        turn_duration: Duration::from_secs(30),
        warning_threshold: Duration::from_millis(100),
        tick: Duration::from_millis(20),
        warning_tick: Duration::from_millis(5),
        point_freeze: Duration::from_millis(1),
        penalty_freeze: Duration::from_millis(1),
        bot_reaction: Duration::from_millis(1),
        rng_seed: Some(1234),
    }
}

#[tokio::test]
async fn bot_session_plays_the_deck_out() {
    // 12 cards, every triple matches: the bot should claim all four triples,
    // after which no match exists and the session must terminate and join
    // everything on its own.
    let config = fast_config();
    let table = Arc::new(InMemoryGrid::new(config.slot_count()));
    let session = GameSession::new(
        config,
        table.clone(),
        Arc::new(ModuloOracle::new(1)),
        Arc::new(NullDisplay),
    )
    .expect("config should validate");

    let outcome = timeout(Duration::from_secs(60), session.run())
        .await
        .expect("session did not terminate on exhaustion");

    assert_eq!(outcome.scores, vec![4]);
    assert_eq!(outcome.winners, vec![0]);
    // Claimed cards are gone for good.
    assert!(table.count_occupied() < 3);
}

#[tokio::test]
async fn scripted_human_claim_scores_once() {
    let config = SessionConfig {
        human_players: 1,
        bot_players: 0,
        ..fast_config()
    };
    let table = Arc::new(InMemoryGrid::new(config.slot_count()));
    let board = Arc::new(ScoreBoard::default());
    let session = GameSession::new(
        config,
        table,
        Arc::new(ModuloOracle::new(1)),
        board.clone(),
    )
    .expect("config should validate");

    let handle = session.handle(0);
    let shutdown = session.shutdown_handle();

    let driver = tokio::spawn(async move {
        for slot in [0, 1, 2] {
            handle.key_pressed(slot).await;
        }
        // Every triple matches, so the claim must score exactly one point.
        timeout(Duration::from_secs(10), async {
            while board.scores[0].load(Ordering::SeqCst) == 0 {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("claim was never verified");
        shutdown.shutdown();
    });

    let outcome = timeout(Duration::from_secs(30), session.run())
        .await
        .expect("session did not react to shutdown");
    driver.await.expect("driver task panicked");

    assert_eq!(outcome.scores, vec![1]);
    assert_eq!(outcome.winners, vec![0]);
}

#[tokio::test]
async fn external_shutdown_ends_an_idle_session() {
    let config = SessionConfig {
        human_players: 2,
        bot_players: 0,
        ..fast_config()
    };
    let table = Arc::new(InMemoryGrid::new(config.slot_count()));
    let session = GameSession::new(
        config,
        table,
        Arc::new(ModuloOracle::new(1)),
        Arc::new(NullDisplay),
    )
    .expect("config should validate");

    session.shutdown_handle().shutdown();
    let outcome = timeout(Duration::from_secs(10), session.run())
        .await
        .expect("session ignored the shutdown signal");

    assert_eq!(outcome.scores, vec![0, 0]);
    // Nobody scored: everyone ties.
    assert_eq!(outcome.winners, vec![0, 1]);
}
