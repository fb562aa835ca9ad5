//! Injectable time source.
//!
//! The engine never reads the system clock directly; handlers receive an
//! `Arc<dyn Clock>` so tests can drive calendar days deterministically.

use std::sync::Mutex;

use chrono::Utc;

use crate::types::Timestamp;

/// A source of "now".
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}

/// Production clock backed by the OS.
#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Utc::now()
    }
}

/// Settable clock for tests. Starts at a given instant and only moves when
/// told to.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<Timestamp>,
}

impl ManualClock {
    pub fn new(start: Timestamp) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    pub fn set(&self, at: Timestamp) {
        *self.now.lock().expect("clock mutex poisoned") = at;
    }

    pub fn advance_days(&self, days: i64) {
        let mut now = self.now.lock().expect("clock mutex poisoned");
        *now += chrono::Duration::days(days);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        *self.now.lock().expect("clock mutex poisoned")
    }
}
