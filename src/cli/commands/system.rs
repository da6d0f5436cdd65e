use crate::cli::{
    context::AppContext,
    output,
    registry::CommandEntry,
    table::{Table, TableColumn},
};
use crate::errors::{CliError, CommandResult};
use crate::utils::build_info;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("help", "Show available commands", "help [command]", cmd_help),
        CommandEntry::new("version", "Show build metadata", "version", cmd_version),
        CommandEntry::new("exit", "Stop reading the script", "exit", cmd_exit),
    ]
}

fn cmd_help(context: &mut AppContext, args: &[&str]) -> CommandResult {
    if let Some(name) = args.first() {
        let Some(entry) = context.registry.get(&name.to_lowercase()) else {
            return Err(CliError::UnknownCommand(name.to_string()));
        };
        output::section(format!("Help: {}", entry.name));
        output::plain(entry.description);
        output::plain(format!("Usage: {}", entry.usage));
        return Ok(());
    }

    let mut table = Table::new(
        Some("Available commands"),
        vec![TableColumn::left("Command"), TableColumn::left("Description")],
    );
    for entry in context.registry.list() {
        table.add_row(vec![entry.name, entry.description]);
    }
    table.print();
    output::hint("Use `help <command>` for details.");
    Ok(())
}

fn cmd_version(_context: &mut AppContext, _args: &[&str]) -> CommandResult {
    let meta = build_info::current();
    output::section(format!("Expense Tracker {}", meta.version));
    let rows = [
        ("Build hash", format!("{} ({})", meta.git_hash, meta.git_status)),
        ("Built at", meta.timestamp.to_string()),
        ("Target", meta.target.to_string()),
        ("Profile", meta.profile.to_string()),
        ("Rustc", meta.rustc.to_string()),
    ];
    for (label, value) in rows {
        output::plain(format!("{label:<11} {value}"));
    }
    Ok(())
}

fn cmd_exit(_context: &mut AppContext, _args: &[&str]) -> CommandResult {
    Err(CliError::ExitRequested)
}
