//! Wall-clock implementation of the `Clock` port.

use chrono::{DateTime, Utc};
use slotbook_core::Clock;

/// System clock; the only source of "now" in production wiring.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
