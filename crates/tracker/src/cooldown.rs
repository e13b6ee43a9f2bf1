//! Per-player throttling of the open-request command.

use muster_common::PlayerId;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::debug;

/// Outcome of a cooldown check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CooldownDecision {
    /// The action may proceed; the player's last-use stamp was updated.
    Ready,

    /// The action is throttled; nothing was stamped.
    Throttled { remaining: Duration },
}

/// Check-and-stamp rate limiter keyed by player.
///
/// Independent of team/request lifecycle: it only gates how often a given
/// player can open a request. The check and the stamp happen under one lock
/// acquisition, so two racing calls can never both pass inside the window.
#[derive(Debug)]
pub struct CooldownRegistry {
    window: Duration,
    last_used: Mutex<HashMap<PlayerId, Instant>>,
    last_cleanup: Mutex<Instant>,
}

impl CooldownRegistry {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_used: Mutex::new(HashMap::new()),
            last_cleanup: Mutex::new(Instant::now()),
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Consume the player's cooldown if available.
    ///
    /// Returns `Ready` (and stamps now) when the player has never used the
    /// action or the window has elapsed; `Throttled` with the remaining
    /// wait otherwise.
    pub fn try_acquire(&self, player: &PlayerId) -> CooldownDecision {
        self.maybe_cleanup();

        let mut last_used = self.last_used.lock();
        let now = Instant::now();

        if let Some(last) = last_used.get(player) {
            let elapsed = now.duration_since(*last);
            if elapsed < self.window {
                return CooldownDecision::Throttled {
                    remaining: self.window - elapsed,
                };
            }
        }

        last_used.insert(player.clone(), now);
        CooldownDecision::Ready
    }

    /// Periodically drop stamps that can no longer throttle anyone.
    fn maybe_cleanup(&self) {
        const CLEANUP_INTERVAL: Duration = Duration::from_secs(300);

        let should_cleanup = {
            let last = self.last_cleanup.lock();
            last.elapsed() > CLEANUP_INTERVAL
        };

        if should_cleanup {
            let mut last_used = self.last_used.lock();
            let mut last = self.last_cleanup.lock();

            // Re-check after taking the write side
            if last.elapsed() > CLEANUP_INTERVAL {
                let window = self.window;
                let before = last_used.len();
                last_used.retain(|_, stamp| stamp.elapsed() < window);
                debug!(
                    dropped = before - last_used.len(),
                    "Pruned expired cooldown stamps"
                );
                *last = Instant::now();
            }
        }
    }
}
