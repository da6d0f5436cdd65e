use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use tracker_domain::{Calendar, MonthKey, Transaction, TransactionKind};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Totals {
    pub income: f64,
    pub expense: f64,
    pub balance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category: String,
    pub amount: f64,
    /// Fraction of total expense in `0.0..=1.0`.
    pub share: f64,
}

pub struct SummaryService;

impl SummaryService {
    /// All-time income, expense and resulting balance.
    pub fn totals(transactions: &[Transaction]) -> Totals {
        let mut totals = Totals::default();
        for txn in transactions {
            match txn.kind {
                TransactionKind::Income => totals.income += txn.amount,
                TransactionKind::Expense => totals.expense += txn.amount,
            }
        }
        totals.balance = totals.income - totals.expense;
        totals
    }

    /// Mean monthly net over the months that have any activity.
    pub fn monthly_average_net(transactions: &[Transaction], calendar: Calendar) -> f64 {
        let mut months: HashMap<MonthKey, f64> = HashMap::new();
        for txn in transactions {
            *months.entry(txn.month_in(calendar)).or_insert(0.0) += txn.signed_amount();
        }
        if months.is_empty() {
            return 0.0;
        }
        months.values().sum::<f64>() / months.len() as f64
    }

    /// Expense totals per category, largest first. Categories summing to zero or less are dropped.
    pub fn expense_breakdown(transactions: &[Transaction]) -> Vec<CategoryShare> {
        let mut totals: BTreeMap<&str, f64> = BTreeMap::new();
        for txn in transactions.iter().filter(|t| t.is_expense()) {
            *totals.entry(txn.category.as_str()).or_insert(0.0) += txn.amount;
        }
        let positive: Vec<(&str, f64)> = totals.into_iter().filter(|(_, v)| *v > 0.0).collect();
        let total: f64 = positive.iter().map(|(_, v)| v).sum();

        let mut shares: Vec<CategoryShare> = positive
            .into_iter()
            .map(|(category, amount)| CategoryShare {
                category: category.to_string(),
                amount,
                share: amount / total,
            })
            .collect();
        shares.sort_by(|a, b| b.amount.total_cmp(&a.amount));
        shares
    }

    pub fn top_category(transactions: &[Transaction]) -> Option<CategoryShare> {
        Self::expense_breakdown(transactions).into_iter().next()
    }

    /// Total expense recorded against `category` (exact, case-sensitive match).
    pub fn spent_in(transactions: &[Transaction], category: &str) -> f64 {
        transactions
            .iter()
            .filter(|t| t.is_expense() && t.category == category)
            .map(|t| t.amount)
            .sum()
    }
}
