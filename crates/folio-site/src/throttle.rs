//! Rate limiting for scroll and resize handlers.
//!
//! Both types take the current instant as an argument instead of reading
//! a clock, so callers decide where time comes from.

use std::time::{Duration, Instant};

/// Scroll handlers run at most this often.
pub const SCROLL_THROTTLE: Duration = Duration::from_millis(100);

/// Default quiet period before a debounced call runs.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Lets a call through, then blocks further calls until `limit` elapses.
#[derive(Debug, Clone, Copy)]
pub struct Throttle {
    limit: Duration,
    last: Option<Instant>,
}

impl Throttle {
    /// Creates a throttle.
    pub fn new(limit: Duration) -> Self {
        Self { limit, last: None }
    }

    /// Returns whether a call at `now` may run, recording it if so.
    pub fn ready(&mut self, now: Instant) -> bool {
        match self.last {
            Some(last) if now.saturating_duration_since(last) < self.limit => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }
}

impl Default for Throttle {
    fn default() -> Self {
        Self::new(SCROLL_THROTTLE)
    }
}

/// Runs a call once no new trigger has arrived for `delay`.
#[derive(Debug, Clone, Copy)]
pub struct Debounce {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Debounce {
    /// Creates a debounce.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// Records a trigger, pushing the deadline back.
    pub fn trigger(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    /// Returns the pending deadline, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Returns whether the call should run at `now`, consuming the trigger.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

impl Default for Debounce {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_throttle_leading_edge() {
        let start = Instant::now();
        let mut throttle = Throttle::default();
        assert!(throttle.ready(start));
        assert!(!throttle.ready(start + Duration::from_millis(50)));
        assert!(!throttle.ready(start + Duration::from_millis(99)));
        assert!(throttle.ready(start + Duration::from_millis(100)));
        assert!(!throttle.ready(start + Duration::from_millis(150)));
    }

    #[test]
    fn test_debounce_waits_for_quiet() {
        let start = Instant::now();
        let mut debounce = Debounce::default();
        assert!(!debounce.fire(start));

        debounce.trigger(start);
        debounce.trigger(start + Duration::from_millis(200));
        assert!(!debounce.fire(start + Duration::from_millis(300)));
        assert_eq!(debounce.deadline(), Some(start + Duration::from_millis(500)));

        assert!(debounce.fire(start + Duration::from_millis(500)));
        assert!(!debounce.fire(start + Duration::from_millis(600)));
    }
}
