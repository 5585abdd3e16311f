//! Wall-clock time source for record identifiers.

use chrono::{DateTime, Utc};

use crate::ports::clock::Clock;

/// System clock. Record names only use whole seconds of this value.
pub struct LiveClock;

impl Clock for LiveClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
