//! Offline question answering over a profile using ordered intent rules.

use once_cell::sync::Lazy;
use regex::Regex;
use tracker_domain::Profile;

use crate::{
    budget_service::BudgetService,
    forecast::{predict_next_net, DEFAULT_FORECAST_MONTHS},
    format::format_money,
    goal_service::GoalService,
    summary_service::SummaryService,
    time::Clock,
};

const DEFAULT_RECENT: usize = 5;

const GREETING_REPLY: &str = "Hello! I can answer balance, spending, budgets, goals, recent transactions, and predictions. Try: \"What is my balance?\"";
const HELP_REPLY: &str = "I can answer about: balance, total income/expense, spending by category, budgets, goals, last transactions, and predictions.";
const FALLBACK_REPLY: &str = "Sorry, I don't understand exactly. Try: 'What is my balance?', 'How much did I spend on food?', or 'Show last 5 transactions'.";

static GREETING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(hi|hello|hey)\b").expect("valid regex"));
static SPENT_ON: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"spent on\s+([a-zA-Z]+)").expect("valid regex"));
static NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("valid regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Greeting,
    Balance,
    TotalIncome,
    TotalExpense,
    SpentOn,
    TopCategory,
    Recent,
    Budgets,
    Goals,
    Prediction,
    Help,
    Unknown,
}

/// Classifies a lowercased question; earlier rules take precedence.
pub fn classify(question: &str) -> Intent {
    let q = question;
    let has = |needle: &str| q.contains(needle);
    if GREETING.is_match(q) {
        Intent::Greeting
    } else if has("balance") {
        Intent::Balance
    } else if has("total income") || has("how much did i earn") {
        Intent::TotalIncome
    } else if has("total expense") || has("how much did i spend") {
        Intent::TotalExpense
    } else if has("spent on") {
        Intent::SpentOn
    } else if has("largest expense") || has("biggest expense") || has("top category") {
        Intent::TopCategory
    } else if has("last transactions") || has("recent transactions") || has("last") {
        Intent::Recent
    } else if has("budget") {
        Intent::Budgets
    } else if has("goal") || has("saving") {
        Intent::Goals
    } else if has("predict") || has("next month") {
        Intent::Prediction
    } else if has("help") || has("what can you do") {
        Intent::Help
    } else {
        Intent::Unknown
    }
}

pub struct Assistant;

impl Assistant {
    /// Answers `question` from the data in `profile`; `clock` anchors predictions.
    pub fn respond(question: &str, profile: &Profile, clock: &dyn Clock) -> String {
        let q = question.to_lowercase();
        let transactions = profile.transactions();
        match classify(&q) {
            Intent::Greeting => GREETING_REPLY.to_string(),
            Intent::Balance => {
                let totals = SummaryService::totals(transactions);
                format!("Your current balance is ${}.", format_money(totals.balance))
            }
            Intent::TotalIncome => {
                let totals = SummaryService::totals(transactions);
                format!("Total income: ${}.", format_money(totals.income))
            }
            Intent::TotalExpense => {
                let totals = SummaryService::totals(transactions);
                format!("Total expense: ${}.", format_money(totals.expense))
            }
            Intent::SpentOn => {
                let Some(category) = SPENT_ON.captures(&q).and_then(|c| c.get(1)) else {
                    return "Which category?".to_string();
                };
                let category = category.as_str();
                let total: f64 = transactions
                    .iter()
                    .filter(|t| t.is_expense() && t.category.to_lowercase() == category)
                    .map(|t| t.amount)
                    .sum();
                format!("You spent ${} on {}.", format_money(total), category)
            }
            Intent::TopCategory => match SummaryService::top_category(transactions) {
                Some(top) => format!(
                    "Top expense category: {} (${}).",
                    top.category,
                    format_money(top.amount)
                ),
                None => "No expenses recorded yet.".to_string(),
            },
            Intent::Recent => {
                let count = NUMBER
                    .find(&q)
                    .and_then(|m| m.as_str().parse::<usize>().ok())
                    .unwrap_or(DEFAULT_RECENT);
                let start = transactions.len().saturating_sub(count);
                let recent = &transactions[start..];
                if recent.is_empty() {
                    return "No transactions yet.".to_string();
                }
                recent
                    .iter()
                    .rev()
                    .map(|t| format!("{}: ${} ({})", t.name, format_money(t.amount), t.category))
                    .collect::<Vec<_>>()
                    .join("\n")
            }
            Intent::Budgets => {
                let progress = BudgetService::progress(profile);
                if progress.is_empty() {
                    return "No budgets set.".to_string();
                }
                progress
                    .iter()
                    .map(|b| {
                        format!(
                            "{}: ${} / ${}",
                            b.category,
                            format_money(b.spent),
                            format_money(b.limit)
                        )
                    })
                    .collect::<Vec<_>>()
                    .join("\n")
            }
            Intent::Goals => {
                let goals = GoalService::progress(profile);
                if goals.is_empty() {
                    return "No goals set.".to_string();
                }
                goals
                    .iter()
                    .map(|g| {
                        format!(
                            "{}: ${} / ${}",
                            g.name,
                            format_money(g.progress),
                            format_money(g.target)
                        )
                    })
                    .collect::<Vec<_>>()
                    .join("\n")
            }
            Intent::Prediction => {
                let net = predict_next_net(
                    transactions,
                    DEFAULT_FORECAST_MONTHS,
                    clock.now(),
                    clock.calendar(),
                );
                format!(
                    "Estimated next month net: ${} (linear regression on last {} months).",
                    format_money(net),
                    DEFAULT_FORECAST_MONTHS
                )
            }
            Intent::Help => HELP_REPLY.to_string(),
            Intent::Unknown => FALLBACK_REPLY.to_string(),
        }
    }
}
