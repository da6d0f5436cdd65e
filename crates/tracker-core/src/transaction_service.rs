use chrono::{DateTime, Datelike, Utc};
use tracing::info;
use tracker_domain::{EntryId, Profile, RecurringRule, Transaction, TransactionKind};

use crate::{recurrence::RecurrenceService, time::Clock, CoreError};

/// User input for a new transaction, validated by [`TransactionService::add`].
#[derive(Debug, Clone)]
pub struct TransactionDraft {
    pub name: String,
    pub amount: f64,
    pub kind: TransactionKind,
    pub category: String,
    /// Category typed by the user that should be created if unknown.
    pub new_category: Option<String>,
    /// Defaults to the clock's current instant.
    pub timestamp: Option<DateTime<Utc>>,
    pub recurring: bool,
}

impl TransactionDraft {
    pub fn new(
        name: impl Into<String>,
        amount: f64,
        kind: TransactionKind,
        category: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            amount,
            kind,
            category: category.into(),
            new_category: None,
            timestamp: None,
            recurring: false,
        }
    }

    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn recurring(mut self) -> Self {
        self.recurring = true;
        self
    }
}

/// Replacement values for an existing transaction.
#[derive(Debug, Clone)]
pub struct TransactionPatch {
    pub name: String,
    pub amount: f64,
    pub kind: TransactionKind,
    pub category: String,
    pub timestamp: DateTime<Utc>,
}

pub struct TransactionService;

impl TransactionService {
    /// Validates and records a new transaction, returning its identifier.
    pub fn add(
        profile: &mut Profile,
        draft: TransactionDraft,
        clock: &dyn Clock,
    ) -> Result<EntryId, CoreError> {
        let name = validate_entry(&draft.name, draft.amount)?;
        let mut category = draft.category;
        if let Some(created) = draft
            .new_category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
        {
            if !profile.has_category(created) {
                profile.categories.insert(0, created.to_string());
            }
            category = created.to_string();
        }

        let timestamp = draft.timestamp.unwrap_or_else(|| clock.now());
        let txn = Transaction::new(name, draft.amount, draft.kind, category, timestamp);
        let id = txn.id.clone();

        if draft.recurring {
            let day = clock.calendar().date_of(&timestamp).day();
            let rule = RecurringRule::from_transaction(&txn, day);
            RecurrenceService::schedule(profile, rule);
        }
        if txn.is_income() {
            if let Some(goal) = profile.goals.first_mut() {
                goal.progress += txn.amount;
            }
        }

        info!(id = %id, kind = %txn.kind, amount = txn.amount, "transaction added");
        profile.transactions.push(txn);
        Ok(id)
    }

    pub fn update(
        profile: &mut Profile,
        id: &EntryId,
        patch: TransactionPatch,
    ) -> Result<(), CoreError> {
        let name = validate_entry(&patch.name, patch.amount)?;
        let txn = profile
            .transaction_mut(id)
            .ok_or_else(|| CoreError::TransactionNotFound(id.clone()))?;
        txn.name = name;
        txn.amount = patch.amount;
        txn.kind = patch.kind;
        txn.category = patch.category;
        txn.timestamp = patch.timestamp;
        info!(id = %id, "transaction updated");
        Ok(())
    }

    /// Deletes a transaction, returning whether one was removed.
    pub fn remove(profile: &mut Profile, id: &EntryId) -> bool {
        let before = profile.transactions.len();
        profile.transactions.retain(|txn| &txn.id != id);
        let removed = profile.transactions.len() != before;
        if removed {
            info!(id = %id, "transaction removed");
        }
        removed
    }
}

fn validate_entry(name: &str, amount: f64) -> Result<String, CoreError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(CoreError::Validation("Enter a name".into()));
    }
    // The sign lives in the kind, so stored amounts are strictly positive.
    if !amount.is_finite() || amount <= 0.0 {
        return Err(CoreError::Validation("Enter a valid positive amount".into()));
    }
    Ok(name.to_string())
}
