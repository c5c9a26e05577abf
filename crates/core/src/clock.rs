//! Injectable time source.
//!
//! Admission state and stop-range derivations are defined relative to "now".
//! Resolving "now" through a trait rather than calling the system clock
//! directly keeps those derivations deterministic under test.

use chrono::{DateTime, Utc};

/// Provides the current instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock backed by the system time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
