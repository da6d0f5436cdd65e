use std::fs;

use tracker_core::{export_csv, export_profile_json, import_profile, DEFAULT_DOCUMENT_KEY};

use crate::cli::{
    commands::require,
    context::AppContext,
    output,
    registry::CommandEntry,
    table::{Table, TableColumn},
};
use crate::errors::CommandResult;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "import",
            "Merge an exported profile JSON file into the active profile",
            "import <path>",
            cmd_import,
        ),
        CommandEntry::new(
            "export-json",
            "Write the active profile as JSON",
            "export-json <path>",
            cmd_export_json,
        ),
        CommandEntry::new(
            "export-csv",
            "Write the active profile's transactions as CSV",
            "export-csv <path>",
            cmd_export_csv,
        ),
        CommandEntry::new("backups", "List automatic backups", "backups", cmd_backups),
        CommandEntry::new(
            "restore",
            "Replace all data with a backup",
            "restore <backup>",
            cmd_restore,
        ),
    ]
}

fn cmd_import(context: &mut AppContext, args: &[&str]) -> CommandResult {
    let path = require(args, 0, "import <path>")?;
    let json = fs::read_to_string(path)?;
    let summary = import_profile(context.profile_mut(), &json)?;
    context.save()?;
    output::success(format!(
        "Imported {} transactions, {} new categories, {} goals, {} budgets, {} recurring rules",
        summary.transactions,
        summary.categories,
        summary.goals,
        summary.budgets,
        summary.recurring
    ));
    if summary.skipped > 0 {
        output::warning(format!(
            "Skipped {} entries that are already in this profile",
            summary.skipped
        ));
    }
    Ok(())
}

fn cmd_export_json(context: &mut AppContext, args: &[&str]) -> CommandResult {
    let path = require(args, 0, "export-json <path>")?;
    fs::write(path, export_profile_json(context.profile())?)?;
    output::success(format!("Exported profile to {path}"));
    Ok(())
}

fn cmd_export_csv(context: &mut AppContext, args: &[&str]) -> CommandResult {
    let path = require(args, 0, "export-csv <path>")?;
    let transactions = context.profile().transactions();
    fs::write(path, export_csv(transactions)?)?;
    output::success(format!(
        "Exported {} transactions to {path}",
        transactions.len()
    ));
    Ok(())
}

fn cmd_backups(context: &mut AppContext, _args: &[&str]) -> CommandResult {
    let backups = context.store.list_backups(DEFAULT_DOCUMENT_KEY)?;
    if backups.is_empty() {
        output::info("No backups yet. One is made each time data is saved over.");
        return Ok(());
    }
    let mut table = Table::new(
        Some("Backups"),
        vec![TableColumn::left("Backup"), TableColumn::right("Bytes")],
    );
    for backup in &backups {
        table.add_row(vec![backup.name.clone(), backup.size_bytes.to_string()]);
    }
    table.print();
    Ok(())
}

fn cmd_restore(context: &mut AppContext, args: &[&str]) -> CommandResult {
    let name = require(args, 0, "restore <backup>")?;
    context.document = context.store.restore_backup(DEFAULT_DOCUMENT_KEY, name)?;
    context.materialize_recurring()?;
    output::success(format!("Restored {name}"));
    Ok(())
}
