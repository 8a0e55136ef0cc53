//! Clock abstraction for determinism.

use chrono::{DateTime, Duration, Utc};

/// Abstraction over system time so session bookkeeping can be tested.
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> DateTime<Utc>;

    /// Time elapsed between `earlier` and now. Negative spans clamp to zero.
    fn elapsed_since(&self, earlier: DateTime<Utc>) -> Duration {
        (self.now() - earlier).max(Duration::zero())
    }
}

/// Production clock that delegates to the system clock.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    struct At(DateTime<Utc>);

    impl Clock for At {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    #[test]
    fn test_elapsed_since_clamps_future_timestamps_to_zero() {
        let now = Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap();
        let clock = At(now);

        assert_eq!(clock.elapsed_since(now + Duration::seconds(5)), Duration::zero());
        assert_eq!(
            clock.elapsed_since(now - Duration::seconds(90)),
            Duration::seconds(90)
        );
    }
}
