//! Player actor module.
//!
//! Each player runs in its own Tokio task with an mpsc inbox, in the same
//! actor/handle shape as the coordinator. A bot seat gets an extra
//! [`BotDriver`] task that feeds pseudo-random key presses through the same
//! input path a real key source would use.

pub mod actor;
pub mod bot;
pub mod messages;

pub use actor::{PlayerActor, PlayerHandle};
pub use bot::BotDriver;
pub use messages::{PlayerMessage, PlayerPhase, Verdict};
