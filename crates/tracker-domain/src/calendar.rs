//! Maps stored UTC instants onto the user's wall-clock calendar.

use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

use crate::MonthKey;

/// Time zone used for day and month boundaries.
///
/// Instants are always stored in UTC; only the calendar view changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Calendar {
    #[default]
    Utc,
    /// The host zone, which honours `TZ`.
    Local,
    Fixed(FixedOffset),
}

impl Calendar {
    /// Fixed zone `secs` east of UTC, `None` when out of range.
    pub fn east(secs: i32) -> Option<Self> {
        FixedOffset::east_opt(secs).map(Calendar::Fixed)
    }

    pub fn date_of(self, instant: &DateTime<Utc>) -> NaiveDate {
        match self {
            Calendar::Utc => instant.date_naive(),
            Calendar::Local => instant.with_timezone(&Local).date_naive(),
            Calendar::Fixed(offset) => instant.with_timezone(&offset).date_naive(),
        }
    }

    pub fn month_of(self, instant: &DateTime<Utc>) -> MonthKey {
        MonthKey::from_date(self.date_of(instant))
    }

    /// First instant of `date` in this calendar.
    ///
    /// When midnight falls in a DST gap the first existing hour of the day is used.
    pub fn start_of(self, date: NaiveDate) -> DateTime<Utc> {
        let midnight = date.and_time(NaiveTime::MIN);
        match self {
            Calendar::Utc => midnight.and_utc(),
            Calendar::Fixed(offset) => first_valid(&offset, midnight),
            Calendar::Local => first_valid(&Local, midnight),
        }
    }
}

fn first_valid<Tz: TimeZone>(zone: &Tz, naive: NaiveDateTime) -> DateTime<Utc> {
    (0..24)
        .filter_map(|hour| naive.checked_add_signed(chrono::Duration::hours(hour)))
        .find_map(|candidate| zone.from_local_datetime(&candidate).earliest())
        .map(|local| local.with_timezone(&Utc))
        .unwrap_or_else(|| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn india() -> Calendar {
        Calendar::east(5 * 3600 + 1800).unwrap()
    }

    #[test]
    fn offset_moves_late_evening_into_next_month() {
        let instant = Utc.with_ymd_and_hms(2025, 1, 31, 20, 30, 0).unwrap();
        assert_eq!(Calendar::Utc.month_of(&instant), MonthKey::new(2025, 1).unwrap());
        assert_eq!(india().month_of(&instant), MonthKey::new(2025, 2).unwrap());
        assert_eq!(india().date_of(&instant), NaiveDate::from_ymd_opt(2025, 2, 1).unwrap());
    }

    #[test]
    fn start_of_day_is_local_midnight() {
        let date = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap();
        assert_eq!(
            india().start_of(date),
            Utc.with_ymd_and_hms(2025, 1, 31, 18, 30, 0).unwrap()
        );
        assert_eq!(
            Calendar::Utc.start_of(date),
            Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap()
        );
        assert_eq!(india().date_of(&india().start_of(date)), date);
    }

    #[test]
    fn out_of_range_offset_is_rejected() {
        assert!(Calendar::east(86_400).is_none());
        assert_eq!(Calendar::default(), Calendar::Utc);
    }
}
