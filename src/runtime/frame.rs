use std::thread;
use std::time::{Duration, Instant};

/// Paces the driver loop at a fixed frame rate.
///
/// Deadlines advance by one period per tick. A loop that falls more than a
/// period behind restarts its schedule from now instead of bursting frames
/// to catch up.
pub struct FrameLimiter {
    period: Duration,
    next: Option<Instant>,
}

impl FrameLimiter {
    pub fn new(frame_rate: u32) -> Self {
        Self {
            period: Duration::from_secs(1) / frame_rate.max(1),
            next: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// How long to sleep at `now` before the next tick, scheduling the one
    /// after it.
    pub fn advance(&mut self, now: Instant) -> Duration {
        let deadline = self.next.unwrap_or(now);
        let wait = deadline.saturating_duration_since(now);

        let mut following = deadline + self.period;
        if following <= now {
            following = now + self.period;
        }
        self.next = Some(following);
        wait
    }

    /// Block until the next tick boundary.
    pub fn wait(&mut self) {
        let wait = self.advance(Instant::now());
        if !wait.is_zero() {
            thread::sleep(wait);
        }
    }
}
