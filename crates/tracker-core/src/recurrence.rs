//! Monthly materialization of recurring rules into concrete transactions.

use chrono::{DateTime, Utc};
use tracing::{debug, info};
use tracker_domain::{Calendar, EntryId, MonthKey, Profile, RecurringRule, Transaction};

use crate::CoreError;

/// Provides helpers for maintaining recurring rules on a profile.
pub struct RecurrenceService;

impl RecurrenceService {
    /// Inserts this month's instance of every recurring rule that does not have one yet.
    ///
    /// Once a month has been processed the call is a no-op until the calendar
    /// month of `calendar` changes. Instances land at local midnight of the
    /// rule's day. Returns the identifiers of the inserted transactions.
    pub fn materialize(
        profile: &mut Profile,
        now: DateTime<Utc>,
        calendar: Calendar,
    ) -> Vec<EntryId> {
        let month = calendar.month_of(&now);
        if profile.last_recurring_month == Some(month) {
            debug!(%month, "recurring rules already processed");
            return Vec::new();
        }

        let mut created = Vec::new();
        for rule in &profile.recurring {
            let exists = profile.transactions.iter().any(|txn| {
                txn.recurring_id.as_ref() == Some(&rule.id) && txn.month_in(calendar) == month
            });
            if exists {
                continue;
            }
            let Some(timestamp) = instance_timestamp(month, rule, calendar) else {
                continue;
            };
            let mut txn = Transaction::new(
                rule.name.clone(),
                rule.amount,
                rule.kind,
                rule.category.clone(),
                timestamp,
            );
            txn.recurring_id = Some(rule.id.clone());
            created.push(txn);
        }

        let ids: Vec<EntryId> = created.iter().map(|txn| txn.id.clone()).collect();
        profile.transactions.extend(created);
        profile.last_recurring_month = Some(month);
        if !ids.is_empty() {
            info!(%month, count = ids.len(), "materialized recurring transactions");
        }
        ids
    }

    /// Registers a rule and returns its identifier.
    pub fn schedule(profile: &mut Profile, rule: RecurringRule) -> EntryId {
        let id = rule.id.clone();
        profile.recurring.push(rule);
        id
    }

    /// Removes a rule. Transactions already materialized from it are kept.
    pub fn remove(profile: &mut Profile, rule_id: &EntryId) -> Result<RecurringRule, CoreError> {
        let idx = profile
            .recurring
            .iter()
            .position(|rule| &rule.id == rule_id)
            .ok_or_else(|| CoreError::RecurringRuleNotFound(rule_id.clone()))?;
        Ok(profile.recurring.remove(idx))
    }
}

fn instance_timestamp(
    month: MonthKey,
    rule: &RecurringRule,
    calendar: Calendar,
) -> Option<DateTime<Utc>> {
    month
        .date_on(rule.effective_day())
        .map(|date| calendar.start_of(date))
}
