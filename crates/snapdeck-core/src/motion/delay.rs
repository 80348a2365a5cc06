//! Atomic layer: a cancelable deferred task ("execute after N time-units")

use std::time::Duration;

/// Deferred task that fires once after its delay has elapsed.
///
/// The owner decides what firing means; this type only keeps time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelayedTask {
    delay: Duration,
    elapsed: Duration,
    fired: bool,
}

impl DelayedTask {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            elapsed: Duration::ZERO,
            fired: false,
        }
    }

    /// Advance by `dt`. Returns `true` exactly once, on the call that
    /// reaches the delay.
    pub fn advance(&mut self, dt: Duration) -> bool {
        if self.fired {
            return false;
        }
        self.elapsed = self.elapsed.saturating_add(dt);
        if self.elapsed >= self.delay {
            self.fired = true;
            return true;
        }
        false
    }

    pub fn remaining(&self) -> Duration {
        self.delay.saturating_sub(self.elapsed)
    }

    pub fn is_fired(&self) -> bool {
        self.fired
    }
}
