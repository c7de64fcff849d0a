//! Run a bot-only match in the terminal.
//!
//! Spawns a session where every seat is a synthetic-input bot, prints score
//! and countdown updates to stdout, and plays until the deck runs out of
//! matches or Ctrl-C is pressed.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use pico_args::Arguments;

use triples::{
    DisplaySink, GameSession, InMemoryGrid, ModuloOracle, PlayerId, Score, SessionConfig,
};

const HELP: &str = "\
Run a bot-only match

USAGE:
  bot_match [OPTIONS]

OPTIONS:
  --bots N              Number of bot players  [default: 2]
  --seed N              RNG seed for a reproducible match
  --turn-secs N         Round length in seconds  [default: 60]
  --modulus N           Match rule: triples summing to a multiple of N  [default: 3]

FLAGS:
  -h, --help            Print help information
";

struct ConsoleDisplay;

impl DisplaySink for ConsoleDisplay {
    fn set_score(&self, player: PlayerId, score: Score) {
        println!("player {player} scored: {score}");
    }

    fn set_countdown(&self, remaining: Duration, warning: bool) {
        if warning {
            return; // too chatty at the warning cadence
        }
        println!("time left: {}s", remaining.as_secs());
    }

    fn set_freeze(&self, _player: PlayerId, _remaining: Duration) {}

    fn announce_winners(&self, winners: &[PlayerId]) {
        match winners {
            [winner] => println!("player {winner} wins!"),
            _ => println!("tie between players {winners:?}"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let mut pargs = Arguments::from_env();

    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let config = SessionConfig {
        human_players: 0,
        bot_players: pargs.value_from_str("--bots").unwrap_or(2),
        turn_duration: Duration::from_secs(pargs.value_from_str("--turn-secs").unwrap_or(60)),
        rng_seed: pargs.opt_value_from_str("--seed")?,
        ..SessionConfig::default()
    };
    let modulus: usize = pargs.value_from_str("--modulus").unwrap_or(3);

    let table = Arc::new(InMemoryGrid::new(config.slot_count()));
    let oracle = Arc::new(ModuloOracle::new(modulus));
    let session = GameSession::new(config, table, oracle, Arc::new(ConsoleDisplay))?;

    let shutdown = session.shutdown_handle();
    ctrlc::set_handler(move || shutdown.shutdown())?;

    let outcome = session.run().await;
    println!("final scores: {:?}", outcome.scores);
    Ok(())
}
