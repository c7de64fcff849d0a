//! Player actor: selection input, claim submission, and freeze waiting.

use std::sync::Arc;

use tokio::sync::{mpsc, watch};

use crate::game::{ClaimQueue, PlayerId, SlotIndex, ToggleOutcome, TokenBoard};

use super::messages::{PlayerMessage, PlayerPhase, Verdict};

const INBOX_CAPACITY: usize = 32;

/// Handle for sending input and coordinator messages to a player actor.
#[derive(Clone)]
pub struct PlayerHandle {
    id: PlayerId,
    sender: mpsc::Sender<PlayerMessage>,
    phase: watch::Receiver<PlayerPhase>,
}

impl PlayerHandle {
    pub fn id(&self) -> PlayerId {
        self.id
    }

    /// Deliver a key press naming `slot`. The external input source calls
    /// this; so does the bot driver. Presses to a terminated player are
    /// dropped.
    pub async fn key_pressed(&self, slot: SlotIndex) {
        let _ = self.sender.send(PlayerMessage::Input { slot }).await;
    }

    /// Current phase of the player's state machine.
    pub fn phase(&self) -> PlayerPhase {
        *self.phase.borrow()
    }

    /// Watch receiver over the player's phase; used by the bot driver to
    /// pause while the player cannot act, and by tests.
    pub fn phase_watch(&self) -> watch::Receiver<PlayerPhase> {
        self.phase.clone()
    }

    pub(crate) async fn send(&self, message: PlayerMessage) {
        let _ = self.sender.send(message).await;
    }
}

/// Per-player state machine driving token selection, claim submission, and
/// freeze waiting.
///
/// Phases: `Selecting → AwaitingVerdict → Frozen → Selecting → …`, entering
/// `Terminated` from any phase on session shutdown. All phase transitions
/// happen on this actor's task; the coordinator influences them only through
/// inbox messages.
pub struct PlayerActor {
    id: PlayerId,
    board: Arc<TokenBoard>,
    claims: Arc<ClaimQueue>,
    inbox: mpsc::Receiver<PlayerMessage>,
    phase: watch::Sender<PlayerPhase>,
    shutdown: watch::Receiver<bool>,
}

impl PlayerActor {
    pub fn new(
        id: PlayerId,
        board: Arc<TokenBoard>,
        claims: Arc<ClaimQueue>,
        shutdown: watch::Receiver<bool>,
    ) -> (Self, PlayerHandle) {
        let (sender, inbox) = mpsc::channel(INBOX_CAPACITY);
        let (phase_tx, phase_rx) = watch::channel(PlayerPhase::Selecting);
        let actor = Self {
            id,
            board,
            claims,
            inbox,
            phase: phase_tx,
            shutdown,
        };
        let handle = PlayerHandle {
            id,
            sender,
            phase: phase_rx,
        };
        (actor, handle)
    }

    /// Run the player actor event loop until session shutdown.
    pub async fn run(mut self) {
        log::info!("player {} starting", self.id);
        loop {
            tokio::select! {
                message = self.inbox.recv() => match message {
                    Some(message) => self.handle_message(message),
                    // All senders dropped: the session is tearing down.
                    None => break,
                },
                // A closed shutdown channel counts as shutdown.
                result = self.shutdown.changed() => {
                    if result.is_err() || *self.shutdown.borrow() {
                        break;
                    }
                }
            }
        }
        self.phase.send_replace(PlayerPhase::Terminated);
        log::info!("player {} terminated", self.id);
    }

    fn handle_message(&mut self, message: PlayerMessage) {
        match message {
            PlayerMessage::Input { slot } => self.on_input(slot),
            PlayerMessage::Verdict(verdict) => self.on_verdict(verdict),
            PlayerMessage::Unfreeze => {
                if self.phase() == PlayerPhase::Frozen {
                    self.set_phase(PlayerPhase::Selecting);
                }
            }
            PlayerMessage::ResetRound => {
                // Selection state was wiped by the coordinator. A running
                // freeze persists across the round boundary.
                if self.phase() == PlayerPhase::AwaitingVerdict {
                    self.set_phase(PlayerPhase::Selecting);
                }
            }
        }
    }

    /// Input is honored only while selecting; empty slots, foreign-owned
    /// slots, and overfull selections are silently ignored by the board.
    fn on_input(&mut self, slot: SlotIndex) {
        if self.phase() != PlayerPhase::Selecting {
            return;
        }
        if let ToggleOutcome::Placed { selection_full: true } = self.board.toggle(self.id, slot) {
            self.claims.submit(self.id);
            self.set_phase(PlayerPhase::AwaitingVerdict);
            log::debug!("player {} submitted a claim", self.id);
        }
    }

    fn on_verdict(&mut self, verdict: Verdict) {
        match verdict {
            Verdict::Accepted | Verdict::Rejected => {
                // The coordinator started the freeze countdown; wait for the
                // Unfreeze message.
                self.set_phase(PlayerPhase::Frozen);
            }
            Verdict::Invalidated { slots } => {
                // Tokens on those slots are already gone. If our claim was
                // pending it was revoked, so resume selecting without any
                // freeze. In other phases this is informational only.
                log::debug!("player {} invalidated on slots {slots:?}", self.id);
                if self.phase() == PlayerPhase::AwaitingVerdict {
                    self.set_phase(PlayerPhase::Selecting);
                }
            }
        }
    }

    fn phase(&self) -> PlayerPhase {
        *self.phase.borrow()
    }

    fn set_phase(&self, phase: PlayerPhase) {
        self.phase.send_replace(phase);
    }
}
