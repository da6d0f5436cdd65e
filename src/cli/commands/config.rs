use tracker_config::Config;

use crate::cli::{
    context::AppContext,
    output,
    registry::CommandEntry,
    table::{Table, TableColumn},
};
use crate::errors::CommandResult;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "config",
        "Show or change preferences",
        "config [key [value]]",
        cmd_config,
    )]
}

fn cmd_config(context: &mut AppContext, args: &[&str]) -> CommandResult {
    match args {
        [] => {
            let mut table = Table::new(
                Some("Configuration"),
                vec![TableColumn::left("Key"), TableColumn::left("Value")],
            );
            for key in Config::KEYS {
                table.add_row(vec![key.to_string(), context.config.get(key)?]);
            }
            table.print();
            output::hint(format!(
                "Data is stored in {}",
                context.store.root().display()
            ));
            Ok(())
        }
        [key] => {
            output::plain(context.config.get(key)?);
            Ok(())
        }
        [key, value @ ..] => {
            let value = value.join(" ");
            context.config.set(key, &value)?;
            context.config_manager.save(&context.config)?;
            output::success(format!(
                "Set {key} = {}",
                context.config.get(key)?
            ));
            match *key {
                "locale" => output::hint(format!(
                    "Amounts now display as {}",
                    context.money(1234.5)
                )),
                "data_root" | "backup_retention" => {
                    output::hint("Takes effect the next time the tracker starts.")
                }
                _ => {}
            }
            Ok(())
        }
    }
}
