//! Request budget with a blocking cooldown
//!
//! Not a token bucket: once `max_requests` calls have been made the next call
//! waits the full cooldown, then the count starts over from zero.

use std::time::Duration;

#[derive(Debug, Clone)]
pub struct RequestBudget {
    max_requests: u32,
    cooldown: Duration,
    count: u32,
}

impl RequestBudget {
    pub const DEFAULT_MAX_REQUESTS: u32 = 499;
    pub const DEFAULT_COOLDOWN: Duration = Duration::from_secs(300);

    pub fn new(max_requests: u32, cooldown: Duration) -> Self {
        Self {
            max_requests,
            cooldown,
            count: 0,
        }
    }

    pub fn exhausted(&self) -> bool {
        self.count >= self.max_requests
    }

    pub fn cooldown(&self) -> Duration {
        self.cooldown
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    /// Pauses through `sleep` when the budget is spent; returns whether it did.
    pub fn wait_if_exhausted(&mut self, sleep: &mut dyn FnMut(Duration)) -> bool {
        if !self.exhausted() {
            return false;
        }
        sleep(self.cooldown);
        self.count = 0;
        true
    }

    pub fn record(&mut self) {
        self.count += 1;
    }
}

impl Default for RequestBudget {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_REQUESTS, Self::DEFAULT_COOLDOWN)
    }
}
