use tracker_core::{aggregate_months, window_size, ForecastService, SummaryService};

use crate::cli::{
    commands::parse_count,
    context::AppContext,
    output,
    registry::CommandEntry,
    table::{Table, TableColumn},
};
use crate::errors::{CliError, CommandResult};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "summary",
            "Show balance, totals and monthly average",
            "summary",
            cmd_summary,
        ),
        CommandEntry::new(
            "months",
            "Show income and expense per month",
            "months [count]",
            cmd_months,
        ),
        CommandEntry::new(
            "forecast",
            "Predict next month from the recent trend",
            "forecast [months]",
            cmd_forecast,
        ),
        CommandEntry::new(
            "breakdown",
            "Show expenses by category",
            "breakdown",
            cmd_breakdown,
        ),
    ]
}

/// Window length from the first argument, or `default` when absent.
///
/// Both go through the same bounds check, so a hand-edited config cannot
/// request an unbounded window.
fn window_arg(args: &[&str], default: usize) -> Result<usize, CliError> {
    let raw = match args.first() {
        Some(raw) => parse_count(raw, "month count")?,
        None => i64::try_from(default).unwrap_or(i64::MAX),
    };
    Ok(window_size(raw)?)
}

fn cmd_summary(context: &mut AppContext, _args: &[&str]) -> CommandResult {
    let transactions = context.profile().transactions();
    let totals = SummaryService::totals(transactions);
    let average = SummaryService::monthly_average_net(transactions, context.calendar());

    output::section(format!("Summary for {}", context.document.current_name()));
    let rows = [
        ("Balance:", context.money(totals.balance)),
        ("Total income:", context.money(totals.income)),
        ("Total expense:", context.money(totals.expense)),
        ("Monthly average:", context.money(average)),
        ("Transactions:", transactions.len().to_string()),
    ];
    for (label, value) in rows {
        output::plain(format!("{label:<18}{value}"));
    }
    Ok(())
}

fn cmd_months(context: &mut AppContext, args: &[&str]) -> CommandResult {
    let count = window_arg(args, context.config.history_months)?;
    let buckets = aggregate_months(
        context.profile().transactions(),
        count,
        context.now(),
        context.calendar(),
    );
    if buckets.is_empty() {
        output::info("No months requested.");
        return Ok(());
    }
    let mut table = Table::new(
        Some("Monthly overview"),
        vec![
            TableColumn::left("Month"),
            TableColumn::right("Income"),
            TableColumn::right("Expense"),
            TableColumn::right("Net"),
        ],
    );
    for bucket in &buckets {
        table.add_row(vec![
            bucket.label.clone(),
            context.money(bucket.income),
            context.money(bucket.expense),
            context.money(bucket.net()),
        ]);
    }
    table.print();
    Ok(())
}

fn cmd_forecast(context: &mut AppContext, args: &[&str]) -> CommandResult {
    let months = window_arg(args, context.config.forecast_months)?;
    let result = ForecastService::next_month(context.profile(), context.clock.as_ref(), months);

    output::section(format!("Forecast for next month (last {months} months)"));
    let rows = [
        ("Predicted income:", result.predicted_income),
        ("Predicted expense:", result.predicted_expense),
        ("Predicted net:", result.predicted_net),
    ];
    for (label, amount) in rows {
        output::plain(format!("{label:<19}{}", context.money(amount)));
    }
    if result.predicted_net < 0.0 {
        output::warning("Spending is trending above income.");
    }
    Ok(())
}

fn cmd_breakdown(context: &mut AppContext, _args: &[&str]) -> CommandResult {
    let shares = SummaryService::expense_breakdown(context.profile().transactions());
    if shares.is_empty() {
        output::info("No expenses recorded yet.");
        return Ok(());
    }
    let mut table = Table::new(
        Some("Expenses by category"),
        vec![
            TableColumn::left("Category"),
            TableColumn::right("Amount"),
            TableColumn::right("Share"),
        ],
    );
    for share in &shares {
        table.add_row(vec![
            share.category.clone(),
            context.money(share.amount),
            format!("{:.1}%", share.share * 100.0),
        ]);
    }
    table.print();
    Ok(())
}
