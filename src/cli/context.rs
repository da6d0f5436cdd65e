//! Shared runtime state for command execution.

use std::{path::PathBuf, sync::Arc};

use chrono::{DateTime, Utc};
use tracing::{debug, info};
use tracker_config::{Config, ConfigManager};
use tracker_core::{
    format_money_in,
    storage::{DocumentStore, DEFAULT_DOCUMENT_KEY},
    Clock, RecurrenceService,
};
use tracker_domain::{AppDocument, Calendar, Profile};
use tracker_storage_json::{JsonDocumentStore, LoadOutcome};

use crate::cli::{commands, output, registry::CommandRegistry, system_clock::SystemClock};
use crate::errors::{CliError, CommandResult};

pub struct AppContext {
    pub registry: CommandRegistry,
    pub config: Config,
    pub config_manager: ConfigManager,
    pub store: JsonDocumentStore,
    pub document: AppDocument,
    pub clock: Arc<dyn Clock>,
    pub running: bool,
}

impl AppContext {
    /// Loads configuration and the stored document from the resolved data root.
    pub fn new() -> Result<Self, CliError> {
        let base = Config::default().resolve_data_root();
        Self::open(base, None, Arc::new(SystemClock))
    }

    /// Opens a context rooted at `base`; `data_root` pins the document directory.
    pub fn open(
        base: PathBuf,
        data_root: Option<PathBuf>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, CliError> {
        let config_manager = ConfigManager::with_base_dir(base.clone())?;
        let config = config_manager.load()?;
        let root = match data_root {
            Some(root) => root,
            None => config.resolve_data_root(),
        };
        let store = JsonDocumentStore::with_retention(root, config.backup_retention)?;

        let document = match store.load_or_recover(DEFAULT_DOCUMENT_KEY)? {
            LoadOutcome::Loaded(document) => document,
            LoadOutcome::Missing => AppDocument::with_profile(config.default_profile.clone()),
            LoadOutcome::Recovered { preserved, error } => {
                output::warning(format!(
                    "Stored data could not be read ({error}); it was kept at {} and an empty document was started.",
                    preserved.display()
                ));
                AppDocument::with_profile(config.default_profile.clone())
            }
        };
        debug!(root = %store.root().display(), profile = document.current_name(), "context opened");

        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        let mut context = Self {
            registry,
            config,
            config_manager,
            store,
            document,
            clock,
            running: true,
        };
        context.materialize_recurring()?;
        Ok(context)
    }

    pub fn profile(&self) -> &Profile {
        self.document.current()
    }

    pub fn profile_mut(&mut self) -> &mut Profile {
        self.document.current_mut()
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Calendar that dates typed or shown by commands belong to.
    pub fn calendar(&self) -> Calendar {
        self.clock.calendar()
    }

    pub fn save(&self) -> CommandResult {
        self.store.save(DEFAULT_DOCUMENT_KEY, &self.document)?;
        Ok(())
    }

    /// Adds this month's recurring instances to the active profile, saving when any were added.
    pub fn materialize_recurring(&mut self) -> Result<usize, CliError> {
        let (now, calendar) = (self.now(), self.calendar());
        let created = RecurrenceService::materialize(self.profile_mut(), now, calendar);
        if !created.is_empty() {
            info!(count = created.len(), "recurring entries added on open");
            self.save()?;
        }
        Ok(created.len())
    }

    /// Amount with the configured currency and locale separators, `$` for USD.
    pub fn money(&self, amount: f64) -> String {
        let figure = format_money_in(amount, &self.config.locale);
        match self.config.currency.as_str() {
            "USD" => format!("${figure}"),
            code => format!("{figure} {code}"),
        }
    }

    pub fn dispatch(&mut self, raw: &str, args: &[&str]) -> CommandResult {
        let command = raw.to_lowercase();
        let handler = self
            .registry
            .handler(&command)
            .ok_or_else(|| CliError::UnknownCommand(raw.to_string()))?;
        debug!(command = %command, args = args.len(), "dispatching command");
        handler(self, args)
    }

    /// Prints `err` with a follow-up hint where one helps.
    pub fn report_error(&self, err: &CliError) {
        match err {
            CliError::ExitRequested => {}
            CliError::UnknownCommand(name) => {
                output::error(err);
                match self.registry.closest(name) {
                    Some(best) => output::hint(format!("Did you mean `{best}`?")),
                    None => output::hint("Type `help` to list commands."),
                }
            }
            CliError::Usage(_) => {
                output::error(err);
                output::hint("Use `help <command>` for usage details.");
            }
            other => output::error(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::tempdir;
    use tracker_core::FixedClock;
    use tracker_domain::TransactionKind;

    fn context_on(base: &std::path::Path, month: u32) -> AppContext {
        let clock = FixedClock(Utc.with_ymd_and_hms(2025, month, 10, 9, 0, 0).unwrap());
        AppContext::open(base.to_path_buf(), Some(base.join("data")), Arc::new(clock))
            .expect("open context")
    }

    fn context_at(base: &std::path::Path) -> AppContext {
        context_on(base, 4)
    }

    #[test]
    fn add_persists_across_reopen() {
        let dir = tempdir().expect("tempdir");
        let mut ctx = context_at(dir.path());
        ctx.dispatch("add", &["Lunch", "12.5", "expense", "Food"])
            .expect("add");
        assert_eq!(ctx.profile().transactions.len(), 1);

        let reopened = context_at(dir.path());
        let txn = &reopened.profile().transactions[0];
        assert_eq!(txn.name, "Lunch");
        assert_eq!(txn.kind, TransactionKind::Expense);
        assert_eq!(txn.timestamp, Utc.with_ymd_and_hms(2025, 4, 10, 9, 0, 0).unwrap());
    }

    #[test]
    fn unknown_commands_are_rejected() {
        let dir = tempdir().expect("tempdir");
        let mut ctx = context_at(dir.path());
        let err = ctx.dispatch("sumary", &[]).unwrap_err();
        assert!(matches!(err, CliError::UnknownCommand(ref name) if name == "sumary"));
        assert_eq!(ctx.registry.closest("sumary"), Some("summary"));
    }

    #[test]
    fn recurring_rules_materialize_when_opened() {
        let dir = tempdir().expect("tempdir");
        let mut ctx = context_at(dir.path());
        ctx.dispatch("add", &["Rent", "900", "expense", "Bills", "2025-04-05", "--recurring"])
            .expect("add recurring");
        assert_eq!(ctx.profile().recurring.len(), 1);

        // April was already processed; the next instance arrives in May, once.
        assert_eq!(context_at(dir.path()).profile().transactions.len(), 1);
        assert_eq!(context_on(dir.path(), 5).profile().transactions.len(), 2);
        assert_eq!(context_on(dir.path(), 5).profile().transactions.len(), 2);
    }

    #[test]
    fn money_uses_configured_currency() {
        let dir = tempdir().expect("tempdir");
        let mut ctx = context_at(dir.path());
        assert_eq!(ctx.money(1234.5), "$1,234.50");
        ctx.config.currency = "EUR".into();
        assert_eq!(ctx.money(-3.0), "-3.00 EUR");
    }

    #[test]
    fn money_follows_configured_locale() {
        let dir = tempdir().expect("tempdir");
        let mut ctx = context_at(dir.path());
        ctx.config.locale = "de-DE".into();
        ctx.config.currency = "EUR".into();
        assert_eq!(ctx.money(1234.5), "1.234,50 EUR");
    }
}
