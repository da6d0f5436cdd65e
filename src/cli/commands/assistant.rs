use tracker_core::{suggest_category, Assistant};

use crate::cli::{context::AppContext, output, registry::CommandEntry};
use crate::errors::{CliError, CommandResult};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "suggest",
            "Suggest a category for a description",
            "suggest <text...>",
            cmd_suggest,
        ),
        CommandEntry::new(
            "ask",
            "Ask a question about your money",
            "ask <question...>",
            cmd_ask,
        ),
    ]
}

fn cmd_suggest(_context: &mut AppContext, args: &[&str]) -> CommandResult {
    let text = args.join(" ");
    if text.trim().is_empty() {
        return Err(CliError::usage("Usage: suggest <text...>"));
    }
    match suggest_category(&text) {
        Some(category) => output::info(format!("Suggested category: {category}")),
        None => output::info("No suggestion for that description."),
    }
    Ok(())
}

fn cmd_ask(context: &mut AppContext, args: &[&str]) -> CommandResult {
    let question = args.join(" ");
    if question.trim().is_empty() {
        return Err(CliError::usage("Usage: ask <question...>"));
    }
    output::plain(Assistant::respond(&question, context.profile(), context.clock.as_ref()));
    Ok(())
}
