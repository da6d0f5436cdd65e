//! Profile import (merge) and JSON/CSV export.

use std::collections::HashSet;

use serde::Deserialize;
use tracing::info;
use tracker_domain::{Budget, EntryId, Goal, Profile, RecurringRule, Transaction};

use crate::CoreError;

const CSV_HEADER: [&str; 6] = ["id", "name", "amount", "type", "category", "timestamp"];

/// Shape accepted on import; every section is optional.
#[derive(Debug, Default, Deserialize)]
struct ProfileSnapshot {
    transactions: Option<Vec<Transaction>>,
    categories: Option<Vec<String>>,
    goals: Option<Vec<Goal>>,
    budgets: Option<Vec<Budget>>,
    recurring: Option<Vec<RecurringRule>>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub transactions: usize,
    pub categories: usize,
    pub goals: usize,
    pub budgets: usize,
    pub recurring: usize,
    /// Entries left out because the profile already holds their id (or budget category).
    pub skipped: usize,
}

/// Appends the entries of `incoming` whose id is not yet in `existing`.
///
/// Returns `(added, skipped)`. Ids repeated inside `incoming` are kept once.
fn merge_by_id<T>(
    existing: &mut Vec<T>,
    incoming: Vec<T>,
    id_of: impl Fn(&T) -> &EntryId,
) -> (usize, usize) {
    let mut seen: HashSet<EntryId> = existing.iter().map(|item| id_of(item).clone()).collect();
    let (mut added, mut skipped) = (0, 0);
    for item in incoming {
        if seen.insert(id_of(&item).clone()) {
            existing.push(item);
            added += 1;
        } else {
            skipped += 1;
        }
    }
    (added, skipped)
}

/// Merges an exported profile into `profile`.
///
/// Transactions, goals and recurring rules are merged by id, budgets by
/// category and categories by name; anything already present is kept as it
/// is. Nothing is changed if parsing fails.
pub fn import_profile(profile: &mut Profile, json: &str) -> Result<ImportSummary, CoreError> {
    let snapshot: ProfileSnapshot =
        serde_json::from_str(json).map_err(|err| CoreError::Import(err.to_string()))?;
    let mut summary = ImportSummary::default();

    let (added, skipped) = merge_by_id(
        &mut profile.transactions,
        snapshot.transactions.unwrap_or_default(),
        |txn| &txn.id,
    );
    summary.transactions = added;
    summary.skipped += skipped;

    for category in snapshot.categories.unwrap_or_default() {
        if !profile.has_category(&category) {
            profile.categories.push(category);
            summary.categories += 1;
        }
    }

    let (added, skipped) = merge_by_id(
        &mut profile.goals,
        snapshot.goals.unwrap_or_default(),
        |goal| &goal.id,
    );
    summary.goals = added;
    summary.skipped += skipped;

    let (added, skipped) = merge_by_id(
        &mut profile.recurring,
        snapshot.recurring.unwrap_or_default(),
        |rule| &rule.id,
    );
    summary.recurring = added;
    summary.skipped += skipped;

    for budget in snapshot.budgets.unwrap_or_default() {
        if profile.budget(&budget.category).is_some() {
            summary.skipped += 1;
        } else {
            profile.budgets.push(budget);
            summary.budgets += 1;
        }
    }

    info!(?summary, "profile imported");
    Ok(summary)
}

pub fn export_profile_json(profile: &Profile) -> Result<String, CoreError> {
    serde_json::to_string_pretty(profile).map_err(|err| CoreError::Export(err.to_string()))
}

/// Renders transactions as CSV with every field quoted.
pub fn export_csv(transactions: &[Transaction]) -> Result<String, CoreError> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .from_writer(Vec::new());
    let export_err = |err: csv::Error| CoreError::Export(err.to_string());

    writer.write_record(CSV_HEADER).map_err(export_err)?;
    for txn in transactions {
        writer
            .write_record([
                txn.id.to_string(),
                txn.name.clone(),
                txn.amount.to_string(),
                txn.kind.to_string(),
                txn.category.clone(),
                txn.timestamp.timestamp_millis().to_string(),
            ])
            .map_err(export_err)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|err| CoreError::Export(err.to_string()))?;
    String::from_utf8(bytes).map_err(|err| CoreError::Export(err.to_string()))
}
