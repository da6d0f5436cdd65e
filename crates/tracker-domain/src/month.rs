//! Calendar-month keys shared by aggregation and recurring materialization.

use std::{fmt, str::FromStr};

use chrono::{Datelike, NaiveDate};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MonthKeyError {
    #[error("month {0} is outside 1..=12")]
    MonthOutOfRange(u32),
    #[error("invalid month key `{0}`, expected YYYY-MM")]
    Malformed(String),
}

/// A `(year, month)` pair identifying one calendar month.
///
/// Keys order chronologically and render canonically as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Result<Self, MonthKeyError> {
        if !(1..=12).contains(&month) {
            return Err(MonthKeyError::MonthOutOfRange(month));
        }
        Ok(Self { year, month })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(self) -> i32 {
        self.year
    }

    pub fn month(self) -> u32 {
        self.month
    }

    /// Number of months since year 0, used for offset arithmetic.
    pub fn ordinal(self) -> i64 {
        self.year as i64 * 12 + (self.month as i64 - 1)
    }

    fn from_ordinal(ordinal: i64) -> Self {
        Self {
            year: ordinal.div_euclid(12) as i32,
            month: ordinal.rem_euclid(12) as u32 + 1,
        }
    }

    /// Shifts the key by `months`, rolling the year over in both directions.
    pub fn offset(self, months: i32) -> Self {
        Self::from_ordinal(self.ordinal() + months as i64)
    }

    /// The `len` consecutive months ending at `last`, oldest first.
    pub fn window_ending(last: MonthKey, len: usize) -> Vec<MonthKey> {
        let last = last.ordinal();
        (0..len as i64)
            .rev()
            .map(|back| Self::from_ordinal(last - back))
            .collect()
    }

    /// Human readable label such as `Jan 2025`.
    pub fn label(self) -> String {
        format!(
            "{} {}",
            MONTH_ABBREVIATIONS[(self.month - 1) as usize],
            self.year
        )
    }

    pub fn date_on(self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, day)
    }

    pub fn first_day(self) -> Option<NaiveDate> {
        self.date_on(1)
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = MonthKeyError;

    /// Accepts `YYYY-MM` as well as the unpadded `YYYY-M` form.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let malformed = || MonthKeyError::Malformed(raw.to_string());
        let (year, month) = raw.trim().split_once('-').ok_or_else(malformed)?;
        if year.is_empty() || month.is_empty() || month.len() > 2 {
            return Err(malformed());
        }
        let year: i32 = year.parse().map_err(|_| malformed())?;
        let month: u32 = month.parse().map_err(|_| malformed())?;
        Self::new(year, month)
    }
}

impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MonthKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

/// Income and expense accumulated for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthBucket {
    pub key: MonthKey,
    pub label: String,
    pub income: f64,
    pub expense: f64,
}

impl MonthBucket {
    pub fn empty(key: MonthKey) -> Self {
        Self {
            key,
            label: key.label(),
            income: 0.0,
            expense: 0.0,
        }
    }

    pub fn net(&self) -> f64 {
        self.income - self.expense
    }
}
