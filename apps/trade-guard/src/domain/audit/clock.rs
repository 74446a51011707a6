//! Non-decreasing timestamps for one audit stream.

use crate::domain::shared::Timestamp;

/// Hands out wall-clock timestamps that never go backwards.
///
/// If the system clock steps back, the previous timestamp is reused.
#[derive(Debug, Clone, Default)]
pub struct AuditClock {
    last: Option<Timestamp>,
}

impl AuditClock {
    /// Create a clock with no history.
    #[must_use]
    pub const fn new() -> Self {
        Self { last: None }
    }

    /// Next timestamp, at least as late as every earlier one.
    pub fn next(&mut self) -> Timestamp {
        self.observe(Timestamp::now())
    }

    fn observe(&mut self, now: Timestamp) -> Timestamp {
        let ts = match self.last {
            Some(last) if last > now => last,
            _ => now,
        };
        self.last = Some(ts);
        ts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_never_goes_backwards() {
        let mut clock = AuditClock::new();
        let later = Timestamp::parse("2026-01-19T12:00:05Z").unwrap();
        let earlier = Timestamp::parse("2026-01-19T12:00:00Z").unwrap();

        assert_eq!(clock.observe(later), later);
        assert_eq!(clock.observe(earlier), later);
    }

    #[test]
    fn clock_advances_with_time() {
        let mut clock = AuditClock::new();
        let first = clock.next();
        let second = clock.next();
        assert!(second >= first);
    }
}
