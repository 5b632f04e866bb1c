//! Parameterized retry with deterministic backoff.
//!
//! Flaky collaborators around this core (geocoders, remote ephemeris
//! sources) belong behind an explicit policy, not ad hoc sleep loops:
//! bounded attempts, exponential backoff with a cap, and a jitter
//! factor derived from the attempt number so a schedule is reproducible
//! in tests while concurrent retriers still spread out. Sleeping goes
//! through a trait so tests never block.

use std::time::Duration;

/// How the policy waits between attempts.
pub trait Sleep {
    fn sleep(&mut self, duration: Duration);
}

/// [`Sleep`] via [`std::thread::sleep`].
#[derive(Debug, Default)]
pub struct ThreadSleep;

impl Sleep for ThreadSleep {
    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Bounded exponential backoff.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Total attempts, the first one included. Clamped to at least 1.
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(5),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration, max_delay: Duration) -> Self {
        Self {
            max_attempts,
            base_delay,
            max_delay,
        }
    }

    /// Delay before the retry that follows failed attempt `attempt`
    /// (1-based).
    ///
    /// The base delay doubles per attempt up to the cap, then scales by
    /// a jitter factor in [0.5, 1.0].
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exp = attempt.saturating_sub(1).min(16);
        let raw = self.base_delay.saturating_mul(2u32.saturating_pow(exp));
        raw.min(self.max_delay).mul_f64(jitter_factor(attempt))
    }

    /// Run `op` until it succeeds or attempts run out, sleeping between
    /// failures. The closure receives the 1-based attempt number; the
    /// last error comes back unchanged.
    pub fn run<T, E, F>(&self, sleep: &mut dyn Sleep, mut op: F) -> Result<T, E>
    where
        F: FnMut(u32) -> Result<T, E>,
    {
        let attempts = self.max_attempts.max(1);
        let mut attempt = 1;
        loop {
            match op(attempt) {
                Ok(value) => return Ok(value),
                Err(e) if attempt >= attempts => return Err(e),
                Err(_) => {
                    sleep.sleep(self.delay_for(attempt));
                    attempt += 1;
                }
            }
        }
    }
}

/// Deterministic stand-in for random jitter, in [0.5, 1.0].
fn jitter_factor(attempt: u32) -> f64 {
    let phase = (f64::from(attempt) * 0.618_033_988_749_895).fract();
    0.5 + 0.5 * phase
}
