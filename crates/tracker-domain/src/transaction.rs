use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{calendar::Calendar, month::MonthKey};

/// Opaque identifier for transactions, goals and recurring rules.
///
/// Freshly created entries get a UUID v4; identifiers loaded from older
/// documents are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(String);

impl EntryId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for EntryId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for EntryId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "income" => Some(TransactionKind::Income),
            "expense" => Some(TransactionKind::Expense),
            _ => None,
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single income or expense entry. The sign lives in `kind`, not in `amount`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: EntryId,
    pub name: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    #[serde(default)]
    pub category: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring_id: Option<EntryId>,
}

impl Transaction {
    pub fn new(
        name: impl Into<String>,
        amount: f64,
        kind: TransactionKind,
        category: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: EntryId::new(),
            name: name.into(),
            amount,
            kind,
            category: category.into(),
            timestamp,
            recurring_id: None,
        }
    }

    /// Calendar month the transaction falls in, as seen from `calendar`.
    pub fn month_in(&self, calendar: Calendar) -> MonthKey {
        calendar.month_of(&self.timestamp)
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    /// Amount with the sign implied by the kind applied.
    pub fn signed_amount(&self) -> f64 {
        match self.kind {
            TransactionKind::Income => self.amount,
            TransactionKind::Expense => -self.amount,
        }
    }
}

/// Template for a transaction that is instantiated once per calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurringRule {
    pub id: EntryId,
    pub name: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub day: Option<u32>,
}

impl RecurringRule {
    pub fn from_transaction(template: &Transaction, day: u32) -> Self {
        Self {
            id: EntryId::new(),
            name: template.name.clone(),
            amount: template.amount,
            kind: template.kind,
            category: template.category.clone(),
            day: Some(day),
        }
    }

    /// Day of month used when instantiating; anything outside 1..=28 falls back to the 1st.
    pub fn effective_day(&self) -> u32 {
        match self.day {
            Some(day) if (1..=28).contains(&day) => day,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn transaction_serializes_with_millisecond_timestamp_and_type_field() {
        let ts = Utc.with_ymd_and_hms(2025, 1, 5, 0, 0, 0).unwrap();
        let mut txn = Transaction::new("Salary", 1000.0, TransactionKind::Income, "Salary", ts);
        txn.id = EntryId::from("id_1");
        let value = serde_json::to_value(&txn).unwrap();
        assert_eq!(value["type"], "income");
        assert_eq!(value["timestamp"], ts.timestamp_millis());
        assert!(value.get("recurringId").is_none());
    }

    #[test]
    fn legacy_transaction_without_category_loads() {
        let json = r#"{"id":"id_17_42","name":"Tea","amount":3.5,"type":"expense","timestamp":1736035200000,"recurringId":"id_9"}"#;
        let txn: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(txn.id.as_str(), "id_17_42");
        assert_eq!(txn.category, "");
        assert_eq!(txn.recurring_id, Some(EntryId::from("id_9")));
        assert_eq!(txn.signed_amount(), -3.5);
    }

    #[test]
    fn effective_day_clamps_to_safe_range() {
        let ts = Utc.with_ymd_and_hms(2025, 1, 30, 0, 0, 0).unwrap();
        let txn = Transaction::new("Rent", 900.0, TransactionKind::Expense, "Bills", ts);
        let mut rule = RecurringRule::from_transaction(&txn, 30);
        assert_eq!(rule.effective_day(), 1);
        rule.day = Some(15);
        assert_eq!(rule.effective_day(), 15);
        rule.day = None;
        assert_eq!(rule.effective_day(), 1);
    }
}
