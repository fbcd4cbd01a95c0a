use std::cell::Cell;
use std::time::{SystemTime, UNIX_EPOCH};

/// Creation time in milliseconds since the Unix epoch.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(pub i64);

impl Timestamp {
    pub fn as_millis(self) -> i64 {
        self.0
    }
}

/// Source of creation timestamps.
pub trait Clock {
    fn now(&self) -> Timestamp;
}

/// Wall clock.
#[derive(Debug, Default, Copy, Clone)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        // A clock set before 1970 reports negative offsets rather than failing.
        let ms = match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(d) => d.as_millis() as i64,
            Err(e) => -(e.duration().as_millis() as i64),
        };
        Timestamp(ms)
    }
}

/// Deterministic clock for tests and replays. Each reading advances by `step`.
#[derive(Debug, Clone)]
pub struct ManualClock {
    next: Cell<i64>,
    step: i64,
}

impl ManualClock {
    pub fn new(start: i64, step: i64) -> Self {
        Self {
            next: Cell::new(start),
            step,
        }
    }

    pub fn set(&self, ms: i64) {
        self.next.set(ms);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        let t = self.next.get();
        self.next.set(t + self.step);
        Timestamp(t)
    }
}
