use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Enforces a minimum interval between full data refreshes.
///
/// Only limits how often refreshes run; it does not order writes.
pub struct RefreshThrottle {
    interval: Duration,
    last: Mutex<Option<Instant>>,
}

impl RefreshThrottle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: Mutex::new(None),
        }
    }

    /// Claim a refresh slot at `now`. Returns `false` if the previous
    /// refresh was less than one interval ago.
    pub fn try_acquire_at(&self, now: Instant) -> bool {
        let mut last = self.last.lock().unwrap_or_else(|e| e.into_inner());
        match *last {
            Some(prev) if now.saturating_duration_since(prev) < self.interval => false,
            _ => {
                *last = Some(now);
                true
            }
        }
    }

    pub fn try_acquire(&self) -> bool {
        self.try_acquire_at(Instant::now())
    }

    /// Forget the last refresh so the next one runs immediately.
    pub fn reset(&self) {
        *self.last.lock().unwrap_or_else(|e| e.into_inner()) = None;
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}
