use tracker_core::{
    known_years, paginate, parse_spoken_entry, suggest_category, CoreError, RecurrenceService,
    TransactionDraft, TransactionPatch, TransactionQuery, TransactionService, FALLBACK_CATEGORY,
};
use tracker_domain::{EntryId, TransactionKind};

use crate::cli::{
    commands::{parse_amount, parse_count, parse_date, parse_kind, require, ParsedArgs},
    context::AppContext,
    output,
    registry::CommandEntry,
    table::{Table, TableColumn},
};
use crate::errors::{CliError, CommandResult};

const ADD_USAGE: &str = "add <name> <amount> <income|expense> [category] [YYYY-MM-DD] [--recurring]";
const EDIT_USAGE: &str =
    "edit <id> [--name n] [--amount a] [--type t] [--category c] [--date YYYY-MM-DD]";
const LIST_USAGE: &str =
    "list [--type income|expense] [--month 1-12] [--year y] [--search text] [--page n]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("add", "Record an income or expense", ADD_USAGE, cmd_add),
        CommandEntry::new(
            "quick",
            "Record an expense from a phrase such as `grocery 80`",
            "quick <phrase...>",
            cmd_quick,
        ),
        CommandEntry::new("edit", "Change an existing transaction", EDIT_USAGE, cmd_edit),
        CommandEntry::new("delete", "Delete a transaction", "delete <id>", cmd_delete),
        CommandEntry::new("list", "List transactions, newest first", LIST_USAGE, cmd_list),
        CommandEntry::new("years", "Show years available for filtering", "years", cmd_years),
        CommandEntry::new(
            "recurring",
            "List monthly recurring rules or remove one",
            "recurring [remove <id>]",
            cmd_recurring,
        ),
    ]
}

/// Keeps known categories as-is and asks the service to create unknown ones.
fn draft_with_category(
    context: &AppContext,
    name: &str,
    amount: f64,
    kind: TransactionKind,
    category: &str,
) -> TransactionDraft {
    let mut draft = TransactionDraft::new(name, amount, kind, category);
    if !context.profile().has_category(category) {
        draft.new_category = Some(category.to_string());
    }
    draft
}

fn record(context: &mut AppContext, draft: TransactionDraft) -> CommandResult {
    let clock = context.clock.clone();
    let id = TransactionService::add(context.profile_mut(), draft, clock.as_ref())?;
    context.save()?;
    if let Some(txn) = context.profile().transaction(&id) {
        output::success(format!(
            "Added {} `{}` {} in {} [{}]",
            txn.kind,
            txn.name,
            context.money(txn.amount),
            txn.category,
            id
        ));
    }
    Ok(())
}

fn cmd_add(context: &mut AppContext, args: &[&str]) -> CommandResult {
    let parsed = ParsedArgs::parse(args, &["recurring"])?.only(&[])?;
    let name = require(&parsed.positional, 0, ADD_USAGE)?;
    let amount = parse_amount(require(&parsed.positional, 1, ADD_USAGE)?)?;
    let kind = parse_kind(require(&parsed.positional, 2, ADD_USAGE)?)?;
    if parsed.positional.len() > 5 {
        return Err(CliError::usage(format!("Usage: {ADD_USAGE}")));
    }
    let calendar = context.calendar();
    // A lone trailing date may stand in for the category.
    let (category, date) = match (parsed.positional.get(3), parsed.positional.get(4)) {
        (Some(value), None) if parse_date(value, calendar).is_ok() => (None, Some(*value)),
        (category, date) => (category.copied(), date.copied()),
    };
    let category = category
        .or_else(|| suggest_category(name))
        .unwrap_or(FALLBACK_CATEGORY);

    let mut draft = draft_with_category(context, name, amount, kind, category);
    if let Some(date) = date {
        draft = draft.at(parse_date(date, calendar)?);
    }
    if parsed.switch("recurring") {
        draft = draft.recurring();
    }
    record(context, draft)
}

fn cmd_quick(context: &mut AppContext, args: &[&str]) -> CommandResult {
    let phrase = args.join(" ");
    let entry = parse_spoken_entry(&phrase);
    let Some(amount) = entry.amount else {
        return Err(CliError::usage(
            "Include an amount, for example `quick grocery 80`",
        ));
    };
    let draft = draft_with_category(
        context,
        &entry.name,
        amount,
        TransactionKind::Expense,
        &entry.category,
    );
    record(context, draft)
}

fn cmd_edit(context: &mut AppContext, args: &[&str]) -> CommandResult {
    let parsed = ParsedArgs::parse(args, &[])?
        .only(&["name", "amount", "type", "category", "date"])?;
    let id = EntryId::from(require(&parsed.positional, 0, EDIT_USAGE)?);
    let calendar = context.calendar();
    let current = context
        .profile()
        .transaction(&id)
        .cloned()
        .ok_or_else(|| CoreError::TransactionNotFound(id.clone()))?;

    let patch = TransactionPatch {
        name: parsed.option("name").map(str::to_string).unwrap_or(current.name),
        amount: parsed
            .option("amount")
            .map(parse_amount)
            .transpose()?
            .unwrap_or(current.amount),
        kind: parsed
            .option("type")
            .map(parse_kind)
            .transpose()?
            .unwrap_or(current.kind),
        category: parsed
            .option("category")
            .map(str::to_string)
            .unwrap_or(current.category),
        timestamp: parsed
            .option("date")
            .map(|raw| parse_date(raw, calendar))
            .transpose()?
            .unwrap_or(current.timestamp),
    };
    TransactionService::update(context.profile_mut(), &id, patch)?;
    context.save()?;
    output::success(format!("Updated transaction {id}"));
    Ok(())
}

fn cmd_delete(context: &mut AppContext, args: &[&str]) -> CommandResult {
    let id = EntryId::from(require(args, 0, "delete <id>")?);
    if !TransactionService::remove(context.profile_mut(), &id) {
        return Err(CoreError::TransactionNotFound(id).into());
    }
    context.save()?;
    output::success(format!("Deleted transaction {id}"));
    Ok(())
}

fn cmd_list(context: &mut AppContext, args: &[&str]) -> CommandResult {
    let parsed =
        ParsedArgs::parse(args, &[])?.only(&["type", "month", "year", "search", "page"])?;
    let month = match parsed.option("month") {
        Some(raw) => match parse_count(raw, "month")? {
            m @ 1..=12 => Some(m as u32),
            _ => return Err(CliError::usage("Month must be between 1 and 12")),
        },
        None => None,
    };
    let query = TransactionQuery {
        kind: parsed.option("type").map(parse_kind).transpose()?,
        month,
        year: parsed
            .option("year")
            .map(|raw| parse_count(raw, "year").map(|y| y as i32))
            .transpose()?,
        search: parsed.option("search").map(str::to_string),
        calendar: context.calendar(),
    };
    let page = parsed
        .option("page")
        .map(|raw| parse_count(raw, "page"))
        .transpose()?
        .unwrap_or(1)
        .max(1) as usize;

    let matched = query.apply(context.profile().transactions());
    if matched.is_empty() {
        output::info("No transactions found.");
        return Ok(());
    }
    let total = matched.len();
    let page = paginate(&matched, page, context.config.page_size);

    let mut table = Table::new(
        Some("Transactions"),
        vec![
            TableColumn::left("Date"),
            TableColumn::left("Name"),
            TableColumn::left("Category"),
            TableColumn::left("Type"),
            TableColumn::right("Amount"),
            TableColumn::left("Id"),
        ],
    );
    let calendar = context.calendar();
    for txn in &page.items {
        table.add_row(vec![
            calendar.date_of(&txn.timestamp).format("%Y-%m-%d").to_string(),
            txn.name.clone(),
            txn.category.clone(),
            txn.kind.to_string(),
            context.money(txn.amount),
            txn.id.to_string(),
        ]);
    }
    table.print();
    output::info(format!(
        "Page {} of {} ({} matching)",
        page.page, page.total_pages, total
    ));
    Ok(())
}

fn cmd_years(context: &mut AppContext, _args: &[&str]) -> CommandResult {
    let years: Vec<String> = known_years(
        context.profile().transactions(),
        context.now(),
        context.calendar(),
    )
        .iter()
        .map(i32::to_string)
        .collect();
    output::info(format!("Years: {}", years.join(", ")));
    Ok(())
}

fn cmd_recurring(context: &mut AppContext, args: &[&str]) -> CommandResult {
    match args {
        [] => {
            let rules = &context.profile().recurring;
            if rules.is_empty() {
                output::info("No recurring rules.");
                return Ok(());
            }
            let mut table = Table::new(
                Some("Recurring rules"),
                vec![
                    TableColumn::left("Name"),
                    TableColumn::right("Amount"),
                    TableColumn::left("Type"),
                    TableColumn::left("Category"),
                    TableColumn::right("Day"),
                    TableColumn::left("Id"),
                ],
            );
            for rule in rules {
                table.add_row(vec![
                    rule.name.clone(),
                    context.money(rule.amount),
                    rule.kind.to_string(),
                    rule.category.clone(),
                    rule.effective_day().to_string(),
                    rule.id.to_string(),
                ]);
            }
            table.print();
            Ok(())
        }
        ["remove", id] => {
            let rule = RecurrenceService::remove(context.profile_mut(), &EntryId::from(*id))?;
            context.save()?;
            output::success(format!("Stopped recurring `{}`", rule.name));
            Ok(())
        }
        _ => Err(CliError::usage("Usage: recurring [remove <id>]")),
    }
}
