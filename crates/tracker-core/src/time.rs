use chrono::{DateTime, NaiveDate, Utc};
use tracker_domain::Calendar;

/// Clock abstracts access to the current timestamp so services remain deterministic in tests.
pub trait Clock: Send + Sync {
    /// Returns the current UTC timestamp.
    fn now(&self) -> DateTime<Utc>;

    /// Calendar used for day and month boundaries. Defaults to UTC.
    fn calendar(&self) -> Calendar {
        Calendar::Utc
    }

    /// Returns the current date in [`Clock::calendar`].
    fn today(&self) -> NaiveDate {
        self.calendar().date_of(&self.now())
    }
}

/// Clock pinned to a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// [`FixedClock`] viewed through a non-UTC calendar.
#[derive(Debug, Clone, Copy)]
pub struct ZonedClock {
    pub now: DateTime<Utc>,
    pub calendar: Calendar,
}

impl Clock for ZonedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }

    fn calendar(&self) -> Calendar {
        self.calendar
    }
}
