pub mod assistant;
pub mod config;
pub mod data;
pub mod planning;
pub mod profile;
pub mod reports;
pub mod system;
pub mod transactions;

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use tracker_domain::{Calendar, TransactionKind};

use crate::cli::registry::{CommandEntry, CommandRegistry};
use crate::errors::CliError;

const ROOT_COMMAND_ORDER: &[&str] = &[
    "add",
    "quick",
    "edit",
    "delete",
    "list",
    "years",
    "recurring",
    "summary",
    "months",
    "forecast",
    "breakdown",
    "budget",
    "budgets",
    "goal",
    "goals",
    "suggest",
    "ask",
    "profile",
    "clear",
    "import",
    "export-json",
    "export-csv",
    "backups",
    "restore",
    "config",
    "help",
    "version",
    "exit",
];

pub(crate) fn all_entries() -> Vec<CommandEntry> {
    let mut commands = Vec::new();
    commands.extend(transactions::definitions());
    commands.extend(reports::definitions());
    commands.extend(planning::definitions());
    commands.extend(assistant::definitions());
    commands.extend(profile::definitions());
    commands.extend(data::definitions());
    commands.extend(config::definitions());
    commands.extend(system::definitions());
    commands
}

pub(crate) fn register_all(registry: &mut CommandRegistry) {
    let mut entries = all_entries();
    entries.sort_by_key(|entry| {
        ROOT_COMMAND_ORDER
            .iter()
            .position(|name| entry.name.eq_ignore_ascii_case(name))
            .unwrap_or(ROOT_COMMAND_ORDER.len())
    });
    for entry in entries {
        registry.register(entry);
    }
}

/// Positional arguments plus `--name value` options and bare `--switch` flags.
#[derive(Debug, Default)]
pub(crate) struct ParsedArgs<'a> {
    pub positional: Vec<&'a str>,
    options: HashMap<&'a str, &'a str>,
    switches: Vec<&'a str>,
}

impl<'a> ParsedArgs<'a> {
    /// Splits `args`; names listed in `switches` take no value.
    pub fn parse(args: &[&'a str], switches: &[&str]) -> Result<Self, CliError> {
        let mut parsed = ParsedArgs::default();
        let mut iter = args.iter().copied();
        while let Some(arg) = iter.next() {
            let Some(name) = arg.strip_prefix("--") else {
                parsed.positional.push(arg);
                continue;
            };
            if switches.contains(&name) {
                parsed.switches.push(name);
                continue;
            }
            let value = iter
                .next()
                .ok_or_else(|| CliError::usage(format!("Option `--{name}` needs a value")))?;
            parsed.options.insert(name, value);
        }
        Ok(parsed)
    }

    pub fn option(&self, name: &str) -> Option<&'a str> {
        self.options.get(name).copied()
    }

    pub fn switch(&self, name: &str) -> bool {
        self.switches.contains(&name)
    }

    /// Rejects options other than `allowed`.
    pub fn only(self, allowed: &[&str]) -> Result<Self, CliError> {
        if let Some(unknown) = self.options.keys().find(|name| !allowed.contains(name)) {
            return Err(CliError::usage(format!("Unknown option `--{unknown}`")));
        }
        Ok(self)
    }
}

pub(crate) fn parse_amount(value: &str) -> Result<f64, CliError> {
    value
        .trim()
        .trim_start_matches('$')
        .replace(',', "")
        .parse::<f64>()
        .map_err(|_| CliError::usage(format!("`{value}` is not a valid amount")))
}

pub(crate) fn parse_kind(value: &str) -> Result<TransactionKind, CliError> {
    TransactionKind::parse(value)
        .ok_or_else(|| CliError::usage(format!("`{value}` must be `income` or `expense`")))
}

/// Parses `YYYY-MM-DD` as midnight of that day in `calendar`.
pub(crate) fn parse_date(value: &str, calendar: Calendar) -> Result<DateTime<Utc>, CliError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .ok()
        .map(|date| calendar.start_of(date))
        .ok_or_else(|| CliError::usage(format!("`{value}` is not a date (YYYY-MM-DD)")))
}

pub(crate) fn parse_count(value: &str, what: &str) -> Result<i64, CliError> {
    value
        .trim()
        .parse::<i64>()
        .map_err(|_| CliError::usage(format!("`{value}` is not a valid {what}")))
}

pub(crate) fn require<'a>(args: &[&'a str], idx: usize, usage: &str) -> Result<&'a str, CliError> {
    args.get(idx)
        .copied()
        .ok_or_else(|| CliError::usage(format!("Usage: {usage}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parsed_args_split_options_and_switches() {
        let args = ["Rent", "--type", "expense", "--recurring", "900"];
        let parsed = ParsedArgs::parse(&args, &["recurring"]).unwrap();
        assert_eq!(parsed.positional, vec!["Rent", "900"]);
        assert_eq!(parsed.option("type"), Some("expense"));
        assert!(parsed.switch("recurring"));
        assert!(ParsedArgs::parse(&["--page"], &[]).is_err());
        assert!(ParsedArgs::parse(&["--colour", "x"], &[])
            .unwrap()
            .only(&["page"])
            .is_err());
    }

    #[test]
    fn amounts_and_dates_parse_leniently() {
        assert_eq!(parse_amount("$1,200.50").unwrap(), 1200.5);
        assert!(parse_amount("ten").is_err());
        assert_eq!(
            parse_date("2025-02-28", Calendar::Utc).unwrap().to_rfc3339(),
            "2025-02-28T00:00:00+00:00"
        );
        let india = Calendar::east(5 * 3600 + 1800).unwrap();
        assert_eq!(
            parse_date("2025-02-01", india).unwrap().timestamp_millis(),
            1_738_348_200_000
        );
        assert!(parse_date("2025-02-30", Calendar::Utc).is_err());
        assert!(parse_kind("Income").is_ok());
        assert!(parse_kind("gift").is_err());
    }

    #[test]
    fn registry_follows_root_order() {
        let mut registry = CommandRegistry::new();
        register_all(&mut registry);
        let names: Vec<_> = registry.names().collect();
        assert_eq!(names.first(), Some(&"add"));
        assert_eq!(names.last(), Some(&"exit"));
        assert_eq!(names.len(), ROOT_COMMAND_ORDER.len());
    }
}
