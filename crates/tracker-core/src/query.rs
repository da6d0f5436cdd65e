//! Filtering, search and pagination for transaction listings.

use std::collections::BTreeSet;

use chrono::{DateTime, Datelike, Utc};
use tracker_domain::{Calendar, Transaction, TransactionKind};

pub const DEFAULT_PAGE_SIZE: usize = 50;
const RECENT_YEARS: i32 = 5;

#[derive(Debug, Clone, Default)]
pub struct TransactionQuery {
    pub kind: Option<TransactionKind>,
    /// Calendar month, 1..=12.
    pub month: Option<u32>,
    pub year: Option<i32>,
    /// Case-insensitive substring of the name or category.
    pub search: Option<String>,
    /// Calendar the month and year filters are read in.
    pub calendar: Calendar,
}

impl TransactionQuery {
    pub fn matches(&self, txn: &Transaction) -> bool {
        if self.kind.is_some_and(|kind| kind != txn.kind) {
            return false;
        }
        let date = self.calendar.date_of(&txn.timestamp);
        if self.month.is_some_and(|month| month != date.month()) {
            return false;
        }
        if self.year.is_some_and(|year| year != date.year()) {
            return false;
        }
        match self.search.as_deref().map(str::trim) {
            Some(needle) if !needle.is_empty() => {
                let needle = needle.to_lowercase();
                txn.name.to_lowercase().contains(&needle)
                    || txn.category.to_lowercase().contains(&needle)
            }
            _ => true,
        }
    }

    /// Matching transactions, newest first.
    pub fn apply<'a>(&self, transactions: &'a [Transaction]) -> Vec<&'a Transaction> {
        let mut matched: Vec<&Transaction> =
            transactions.iter().filter(|txn| self.matches(txn)).collect();
        matched.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        matched
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page actually returned after clamping.
    pub page: usize,
    pub total_pages: usize,
}

/// Slices `items` into the requested 1-based page, clamping out-of-range pages.
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> Page<T> {
    let size = if page_size == 0 {
        DEFAULT_PAGE_SIZE
    } else {
        page_size
    };
    let total_pages = items.len().div_ceil(size).max(1);
    let page = page.clamp(1, total_pages);
    let start = (page - 1) * size;
    let end = (start + size).min(items.len());
    Page {
        items: items[start..end].to_vec(),
        page,
        total_pages,
    }
}

/// Years offered for filtering: every year with data plus the recent ones, newest first.
pub fn known_years(
    transactions: &[Transaction],
    now: DateTime<Utc>,
    calendar: Calendar,
) -> Vec<i32> {
    let current = calendar.date_of(&now).year();
    let mut years: BTreeSet<i32> = (current - RECENT_YEARS..=current).collect();
    years.extend(transactions.iter().map(|t| calendar.date_of(&t.timestamp).year()));
    years.into_iter().rev().collect()
}
