//! Clock abstraction for testable time-dependent logic

use chrono::{DateTime, Duration, Local};
use std::sync::{Arc, Mutex};

/// Abstraction over wall-clock time so the recency window and file names
/// can be driven deterministically in tests
pub trait Clock: Send + Sync {
    /// Get the current local time
    fn now(&self) -> DateTime<Local>;
}

/// Production clock using actual system time
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Clock frozen at a chosen instant until explicitly moved
#[derive(Debug, Clone)]
pub struct FixedClock {
    current: Arc<Mutex<DateTime<Local>>>,
}

impl FixedClock {
    /// Create a clock frozen at `at`
    pub fn new(at: DateTime<Local>) -> Self {
        Self {
            current: Arc::new(Mutex::new(at)),
        }
    }

    /// Move the clock forward by `duration`
    pub fn advance(&self, duration: Duration) {
        if let Ok(mut current) = self.current.lock() {
            *current += duration;
        }
    }

    /// Set the clock to `at`
    pub fn set(&self, at: DateTime<Local>) {
        if let Ok(mut current) = self.current.lock() {
            *current = at;
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        match self.current.lock() {
            Ok(current) => *current,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_system_clock() {
        let clock = SystemClock;

        let first = clock.now();
        std::thread::sleep(std::time::Duration::from_millis(1));
        let second = clock.now();

        assert!(second > first);
    }

    #[test]
    fn test_fixed_clock_does_not_move() {
        let at = Local.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let clock = FixedClock::new(at);

        assert_eq!(clock.now(), at);
        std::thread::sleep(std::time::Duration::from_millis(1));
        assert_eq!(clock.now(), at);
    }

    #[test]
    fn test_fixed_clock_advance_and_set() {
        let at = Local.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let clock = FixedClock::new(at);

        clock.advance(Duration::hours(2));
        assert_eq!(clock.now(), at + Duration::hours(2));

        let later = Local.with_ymd_and_hms(2024, 6, 30, 8, 15, 0).unwrap();
        clock.set(later);
        assert_eq!(clock.now(), later);
    }

    #[test]
    fn test_fixed_clock_clones_share_time() {
        let at = Local.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let clock = FixedClock::new(at);
        let shared = clock.clone();

        clock.advance(Duration::seconds(30));

        assert_eq!(shared.now(), at + Duration::seconds(30));
    }
}
