use std::sync::RwLock;

use chrono::{DateTime, TimeDelta, Utc};

/// Source of the current instant. Injected into services and caches so
/// expiry and date-range computation stay deterministic under test.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    now: RwLock<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: RwLock::new(now),
        }
    }

    pub fn advance(&self, delta: TimeDelta) {
        let mut now = self.now.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        *now += delta;
    }

    pub fn set(&self, instant: DateTime<Utc>) {
        let mut now = self.now.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        *now = instant;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_manual_clock_advances() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let clock = ManualClock::new(start);

        clock.advance(TimeDelta::seconds(90));

        assert_eq!(clock.now(), start + TimeDelta::seconds(90));
    }
}
