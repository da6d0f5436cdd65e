use tracker_core::{BudgetService, GoalService};

use crate::cli::{
    commands::{parse_amount, require},
    context::AppContext,
    output,
    registry::CommandEntry,
    table::{Table, TableColumn},
};
use crate::errors::CommandResult;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "budget",
            "Set the spending limit for a category",
            "budget <category> <limit>",
            cmd_budget,
        ),
        CommandEntry::new("budgets", "Show spending against budgets", "budgets", cmd_budgets),
        CommandEntry::new(
            "goal",
            "Add a savings goal; income credits the first goal",
            "goal <name> <target>",
            cmd_goal,
        ),
        CommandEntry::new("goals", "Show progress towards goals", "goals", cmd_goals),
    ]
}

fn cmd_budget(context: &mut AppContext, args: &[&str]) -> CommandResult {
    const USAGE: &str = "budget <category> <limit>";
    let category = require(args, 0, USAGE)?;
    let limit = parse_amount(require(args, 1, USAGE)?)?;
    BudgetService::set_limit(context.profile_mut(), category, limit)?;
    context.save()?;
    output::success(format!(
        "Budget for {} set to {}",
        category.trim(),
        context.money(limit)
    ));
    Ok(())
}

fn cmd_budgets(context: &mut AppContext, _args: &[&str]) -> CommandResult {
    let progress = BudgetService::progress(context.profile());
    if progress.is_empty() {
        output::info("No budgets set.");
        return Ok(());
    }
    let mut table = Table::new(
        Some("Budgets"),
        vec![
            TableColumn::left("Category"),
            TableColumn::right("Spent"),
            TableColumn::right("Limit"),
            TableColumn::right("Used"),
        ],
    );
    for budget in &progress {
        table.add_row(vec![
            budget.category.clone(),
            context.money(budget.spent),
            context.money(budget.limit),
            format!("{:.0}%", budget.percent),
        ]);
    }
    table.print();
    for over in progress.iter().filter(|b| b.percent > 100.0) {
        output::warning(format!(
            "{} is over budget by {}",
            over.category,
            context.money(over.spent - over.limit)
        ));
    }
    Ok(())
}

fn cmd_goal(context: &mut AppContext, args: &[&str]) -> CommandResult {
    const USAGE: &str = "goal <name> <target>";
    let name = require(args, 0, USAGE)?;
    let target = parse_amount(require(args, 1, USAGE)?)?;
    GoalService::add(context.profile_mut(), name, target)?;
    context.save()?;
    output::success(format!(
        "Goal `{}` added with target {}",
        name.trim(),
        context.money(target)
    ));
    Ok(())
}

fn cmd_goals(context: &mut AppContext, _args: &[&str]) -> CommandResult {
    let goals = GoalService::progress(context.profile());
    if goals.is_empty() {
        output::info("No goals set.");
        return Ok(());
    }
    let mut table = Table::new(
        Some("Goals"),
        vec![
            TableColumn::left("Goal"),
            TableColumn::right("Saved"),
            TableColumn::right("Target"),
            TableColumn::right("Progress"),
        ],
    );
    for goal in &goals {
        table.add_row(vec![
            goal.name.clone(),
            context.money(goal.progress),
            context.money(goal.target),
            format!("{:.0}%", goal.percent),
        ]);
    }
    table.print();
    Ok(())
}
