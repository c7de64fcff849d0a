//! Bounded, de-duplicated FIFO queue of players awaiting verification.

use std::collections::{HashSet, VecDeque};
use std::sync::Mutex;

use tokio::sync::Notify;

use super::entities::PlayerId;

/// Claim queue between player actors and the coordinator.
///
/// Capacity equals the player count and submissions are idempotent, so
/// `submit` can never block or overflow. The coordinator waits on
/// [`ClaimQueue::notified`]; `Notify`'s stored permit means a claim submitted
/// just before the coordinator starts waiting still wakes it.
pub struct ClaimQueue {
    inner: Mutex<ClaimQueueInner>,
    notify: Notify,
    capacity: usize,
}

struct ClaimQueueInner {
    queue: VecDeque<PlayerId>,
    pending: HashSet<PlayerId>,
}

impl ClaimQueue {
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(ClaimQueueInner {
                queue: VecDeque::with_capacity(capacity),
                pending: HashSet::with_capacity(capacity),
            }),
            notify: Notify::new(),
            capacity,
        }
    }

    /// Enqueue `player` unless already pending. Returns whether the claim was
    /// added.
    pub fn submit(&self, player: PlayerId) -> bool {
        let mut inner = self.inner.lock().expect("claim queue lock poisoned");
        if inner.pending.contains(&player) || inner.queue.len() >= self.capacity {
            return false;
        }
        inner.queue.push_back(player);
        inner.pending.insert(player);
        drop(inner);
        self.notify.notify_one();
        true
    }

    /// Pop the oldest pending claim, if any.
    pub fn drain_next(&self) -> Option<PlayerId> {
        let mut inner = self.inner.lock().expect("claim queue lock poisoned");
        let player = inner.queue.pop_front()?;
        inner.pending.remove(&player);
        Some(player)
    }

    /// Remove `player`'s pending claim without delivering a verdict. Returns
    /// whether a claim was removed.
    pub fn invalidate(&self, player: PlayerId) -> bool {
        let mut inner = self.inner.lock().expect("claim queue lock poisoned");
        if !inner.pending.remove(&player) {
            return false;
        }
        inner.queue.retain(|p| *p != player);
        true
    }

    /// Drop every pending claim (session reset path).
    pub fn clear(&self) {
        let mut inner = self.inner.lock().expect("claim queue lock poisoned");
        inner.queue.clear();
        inner.pending.clear();
    }

    pub fn is_empty(&self) -> bool {
        let inner = self.inner.lock().expect("claim queue lock poisoned");
        inner.queue.is_empty()
    }

    /// Resolves when a claim has been submitted since the last wait.
    pub async fn notified(&self) {
        self.notify.notified().await;
    }
}
