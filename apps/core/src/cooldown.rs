use std::time::{Duration, Instant};

/// A single process-wide cooldown between channel creations.
///
/// Unlike a rate limiter, checking does not consume anything: the caller
/// records a creation explicitly, and only once it actually succeeded.
/// The clock is shared by every guild the bot serves.
#[derive(Debug, Clone)]
pub struct Cooldown {
    /// Time of the last successful creation, if any.
    last: Option<Instant>,
    /// Minimum delay between two creations.
    window: Duration,
}

impl Cooldown {
    pub fn new(window: Duration) -> Self {
        Cooldown { last: None, window }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Whether a creation is allowed at `now`.
    pub fn is_ready(&self, now: Instant) -> bool {
        match self.last {
            Some(last) => now.saturating_duration_since(last) >= self.window,
            None => true,
        }
    }

    /// Time left before the next creation is allowed.
    pub fn remaining(&self, now: Instant) -> Duration {
        match self.last {
            Some(last) => self.window.saturating_sub(now.saturating_duration_since(last)),
            None => Duration::ZERO,
        }
    }

    /// Starts a new cooldown period at `now`.
    pub fn record(&mut self, now: Instant) {
        self.last = Some(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ready_before_any_creation() {
        let cooldown = Cooldown::new(Duration::from_secs(60));
        assert!(cooldown.is_ready(Instant::now()));
        assert_eq!(cooldown.remaining(Instant::now()), Duration::ZERO);
    }

    #[test]
    fn test_blocks_within_window_and_resets_after() {
        let start = Instant::now();
        let mut cooldown = Cooldown::new(Duration::from_secs(60));
        cooldown.record(start);

        assert!(!cooldown.is_ready(start + Duration::from_secs(59)));
        assert_eq!(cooldown.remaining(start + Duration::from_secs(50)), Duration::from_secs(10));
        assert!(cooldown.is_ready(start + Duration::from_secs(60)));
    }

    #[test]
    fn test_checking_does_not_consume() {
        let start = Instant::now();
        let cooldown = Cooldown::new(Duration::from_millis(50));
        for _ in 0..5 {
            assert!(cooldown.is_ready(start));
        }
    }
}
