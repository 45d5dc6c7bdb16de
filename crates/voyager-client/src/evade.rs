//! Request pacing and browser fingerprinting.

use async_trait::async_trait;
use rand::Rng;
use std::time::Duration;
use voyager_core::EvasionConfig;
use voyager_search::Evade;

/// Common desktop user agents
pub const DESKTOP_USER_AGENTS: [&str; 3] = [
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
];

/// Pick one of [`DESKTOP_USER_AGENTS`] at random.
pub fn random_user_agent() -> &'static str {
    let idx = rand::thread_rng().gen_range(0..DESKTOP_USER_AGENTS.len());
    DESKTOP_USER_AGENTS[idx]
}

/// Sleeps a uniformly random duration before every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RandomDelay {
    min: Duration,
    max: Duration,
}

impl RandomDelay {
    /// Delay between `min_ms` and `max_ms` milliseconds. Swapped bounds are
    /// reordered.
    #[must_use]
    pub fn new(min_ms: u64, max_ms: u64) -> Self {
        let (min_ms, max_ms) = if min_ms <= max_ms {
            (min_ms, max_ms)
        } else {
            (max_ms, min_ms)
        };
        Self {
            min: Duration::from_millis(min_ms),
            max: Duration::from_millis(max_ms),
        }
    }

    #[must_use]
    pub fn from_config(config: &EvasionConfig) -> Self {
        Self::new(config.min_delay_ms, config.max_delay_ms)
    }

    /// Draw the next delay.
    pub fn next_delay(&self) -> Duration {
        if self.min == self.max {
            return self.min;
        }
        rand::thread_rng().gen_range(self.min..=self.max)
    }
}

#[async_trait]
impl Evade for RandomDelay {
    async fn delay(&self) {
        let delay = self.next_delay();
        if delay.is_zero() {
            return;
        }
        tracing::trace!("Sleeping {:?} before next request", delay);
        tokio::time::sleep(delay).await;
    }
}
