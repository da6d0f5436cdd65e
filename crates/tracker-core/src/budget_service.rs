use serde::Serialize;
use tracing::info;
use tracker_domain::{Budget, Profile};

use crate::{summary_service::SummaryService, CoreError};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetProgress {
    pub category: String,
    pub limit: f64,
    pub spent: f64,
    /// Spent as a percentage of the limit; may exceed 100.
    pub percent: f64,
}

pub struct BudgetService;

impl BudgetService {
    /// Creates or replaces the limit for `category`.
    pub fn set_limit(profile: &mut Profile, category: &str, limit: f64) -> Result<(), CoreError> {
        let category = category.trim();
        if category.is_empty() || !limit.is_finite() || limit <= 0.0 {
            return Err(CoreError::Validation("Enter valid budget".into()));
        }
        match profile.budgets.iter_mut().find(|b| b.category == category) {
            Some(existing) => existing.limit = limit,
            None => profile.budgets.push(Budget::new(category, limit)),
        }
        info!(category, limit, "budget limit set");
        Ok(())
    }

    /// Spending against every budget, using all recorded expenses in the category.
    pub fn progress(profile: &Profile) -> Vec<BudgetProgress> {
        profile
            .budgets
            .iter()
            .map(|budget| {
                let spent = SummaryService::spent_in(profile.transactions(), &budget.category);
                let percent = if budget.limit == 0.0 {
                    0.0
                } else {
                    spent / budget.limit * 100.0
                };
                BudgetProgress {
                    category: budget.category.clone(),
                    limit: budget.limit,
                    spent,
                    percent,
                }
            })
            .collect()
    }
}
