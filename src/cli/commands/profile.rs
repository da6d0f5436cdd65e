use tracker_core::ProfileService;

use crate::cli::{commands::ParsedArgs, context::AppContext, output, registry::CommandEntry};
use crate::errors::{CliError, CommandResult};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "profile",
            "List profiles or switch to one, creating it if needed",
            "profile [name]",
            cmd_profile,
        ),
        CommandEntry::new(
            "clear",
            "Erase all data of the active profile",
            "clear --yes",
            cmd_clear,
        ),
    ]
}

fn cmd_profile(context: &mut AppContext, args: &[&str]) -> CommandResult {
    if args.is_empty() {
        let current = context.document.current_name();
        for name in ProfileService::names(&context.document) {
            let marker = if name == current { "*" } else { " " };
            output::plain(format!("{marker} {name}"));
        }
        return Ok(());
    }

    let name = args.join(" ");
    ProfileService::switch(&mut context.document, &name)?;
    context.materialize_recurring()?;
    context.save()?;
    output::success(format!("Active profile: {}", context.document.current_name()));
    Ok(())
}

fn cmd_clear(context: &mut AppContext, args: &[&str]) -> CommandResult {
    let parsed = ParsedArgs::parse(args, &["yes"])?.only(&[])?;
    if !parsed.switch("yes") {
        return Err(CliError::usage(
            "This erases every transaction, budget and goal of the profile. Re-run as `clear --yes`.",
        ));
    }
    ProfileService::clear(&mut context.document);
    context.save()?;
    output::success(format!(
        "Cleared profile {}",
        context.document.current_name()
    ));
    Ok(())
}
