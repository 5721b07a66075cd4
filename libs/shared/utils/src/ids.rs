use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};

use chrono::Utc;

pub const APPOINTMENT_ID_PREFIX: &str = "apt";
pub const PATIENT_ID_PREFIX: &str = "patient";

pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> String;
}

/// `<prefix>-<unix millis>`, bumped by one whenever two ids would share a millisecond.
#[derive(Debug)]
pub struct TimestampIdGenerator {
    prefix: String,
    last: AtomicI64,
}

impl TimestampIdGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            last: AtomicI64::new(0),
        }
    }

    pub fn appointments() -> Self {
        Self::new(APPOINTMENT_ID_PREFIX)
    }

    pub fn patients() -> Self {
        Self::new(PATIENT_ID_PREFIX)
    }

    fn next_suffix(&self) -> i64 {
        let now = Utc::now().timestamp_millis();
        let mut previous = self.last.load(Ordering::Relaxed);
        loop {
            let candidate = now.max(previous + 1);
            match self
                .last
                .compare_exchange_weak(previous, candidate, Ordering::SeqCst, Ordering::Relaxed)
            {
                Ok(_) => return candidate,
                Err(actual) => previous = actual,
            }
        }
    }
}

impl IdGenerator for TimestampIdGenerator {
    fn next_id(&self) -> String {
        format!("{}-{}", self.prefix, self.next_suffix())
    }
}

/// `<prefix>-1`, `<prefix>-2`, ...
#[derive(Debug)]
pub struct SequentialIdGenerator {
    prefix: String,
    counter: AtomicU64,
}

impl SequentialIdGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: AtomicU64::new(0),
        }
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&self) -> String {
        let n = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        format!("{}-{}", self.prefix, n)
    }
}
