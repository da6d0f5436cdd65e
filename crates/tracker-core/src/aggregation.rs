//! Monthly income/expense aggregation over a trailing calendar window.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::debug;
use tracker_domain::{Calendar, MonthBucket, MonthKey, Transaction, TransactionKind};

use crate::CoreError;

/// Longest window accepted from callers: one hundred years.
pub const MAX_WINDOW_MONTHS: usize = 1200;

/// Validates a caller-supplied signed window length.
///
/// Negative values are a caller bug and are reported, never clamped.
pub fn window_size(raw: i64) -> Result<usize, CoreError> {
    let size = usize::try_from(raw).map_err(|_| CoreError::InvalidWindow(raw))?;
    if size > MAX_WINDOW_MONTHS {
        return Err(CoreError::WindowTooLarge {
            got: raw,
            max: MAX_WINDOW_MONTHS,
        });
    }
    Ok(size)
}

/// Buckets `transactions` into the `window` months ending at the month of `as_of`.
///
/// Month boundaries follow `calendar`.
///
/// The result always holds exactly `window` buckets ordered oldest first, with
/// zero totals for months without activity. Transactions outside the window
/// are ignored. Amounts are assumed finite.
pub fn aggregate_months(
    transactions: &[Transaction],
    window: usize,
    as_of: DateTime<Utc>,
    calendar: Calendar,
) -> Vec<MonthBucket> {
    let mut buckets: Vec<MonthBucket> = MonthKey::window_ending(calendar.month_of(&as_of), window)
        .into_iter()
        .map(MonthBucket::empty)
        .collect();
    let slots: HashMap<MonthKey, usize> = buckets
        .iter()
        .enumerate()
        .map(|(idx, bucket)| (bucket.key, idx))
        .collect();

    let mut counted = 0usize;
    for txn in transactions {
        let Some(&idx) = slots.get(&txn.month_in(calendar)) else {
            continue;
        };
        let bucket = &mut buckets[idx];
        match txn.kind {
            TransactionKind::Income => bucket.income += txn.amount,
            TransactionKind::Expense => bucket.expense += txn.amount,
        }
        counted += 1;
    }

    debug!(
        window,
        counted,
        ignored = transactions.len() - counted,
        "aggregated monthly buckets"
    );
    buckets
}
