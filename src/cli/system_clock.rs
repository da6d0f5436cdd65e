use chrono::{DateTime, Utc};

use tracker_core::Clock;
use tracker_domain::Calendar;

/// Real-time clock backed by the system UTC time source.
///
/// Days and months follow the host time zone.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn calendar(&self) -> Calendar {
        Calendar::Local
    }
}
