//! Player actor message and phase types.

use crate::game::SlotIndex;

/// Messages delivered to a player actor's inbox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerMessage {
    /// A key press naming a slot (from the external input source or a bot).
    Input { slot: SlotIndex },

    /// Verification outcome for this player's claim, or an out-of-band
    /// invalidation.
    Verdict(Verdict),

    /// This player's freeze countdown reached zero.
    Unfreeze,

    /// Round boundary: the coordinator has already wiped the selection sets;
    /// drop any claim-pending state. An active freeze persists.
    ResetRound,
}

/// Outcome of claim verification, delivered by the coordinator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// The claim scored. The selection was cleared by the coordinator and a
    /// point freeze is running.
    Accepted,

    /// The claim was not a valid match. Tokens stay in place; a penalty
    /// freeze is running.
    Rejected,

    /// Another player's successful claim consumed the listed slots out from
    /// under this player. Tokens were already stripped; no freeze applies.
    Invalidated { slots: Vec<SlotIndex> },
}

/// Player state machine phases, published on a watch channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerPhase {
    /// Accepting input, selection below the claim size.
    Selecting,

    /// Claim submitted; input is ignored until a verdict arrives.
    AwaitingVerdict,

    /// Freeze running after a verdict; input is ignored until unfreeze.
    Frozen,

    /// Session shutdown observed; the actor loop has exited.
    Terminated,
}
