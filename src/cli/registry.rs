use std::collections::HashMap;

use crate::cli::context::AppContext;
use crate::errors::CommandResult;

pub type CommandHandler = fn(&mut AppContext, &[&str]) -> CommandResult;

pub struct CommandEntry {
    pub name: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    pub handler: CommandHandler,
}

impl CommandEntry {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        usage: &'static str,
        handler: CommandHandler,
    ) -> Self {
        Self {
            name,
            description,
            usage,
            handler,
        }
    }
}

/// Name-indexed command table that remembers registration order for help output.
#[derive(Default)]
pub struct CommandRegistry {
    commands: HashMap<&'static str, CommandEntry>,
    order: Vec<&'static str>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, entry: CommandEntry) {
        let name = entry.name;
        if self.commands.insert(name, entry).is_none() {
            self.order.push(name);
        }
    }

    pub fn get(&self, name: &str) -> Option<&CommandEntry> {
        self.commands.get(name)
    }

    pub fn list(&self) -> Vec<&CommandEntry> {
        self.order
            .iter()
            .filter_map(|name| self.commands.get(name))
            .collect()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.order.iter().copied()
    }

    pub fn handler(&self, name: &str) -> Option<CommandHandler> {
        self.commands.get(name).map(|entry| entry.handler)
    }

    /// Closest registered name within three edits of `input`.
    pub fn closest(&self, input: &str) -> Option<&'static str> {
        let input = input.to_lowercase();
        self.names()
            .map(|name| (strsim::levenshtein(name, &input), name))
            .filter(|(distance, _)| *distance <= 3)
            .min_by_key(|(distance, _)| *distance)
            .map(|(_, name)| name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(_: &mut AppContext, _: &[&str]) -> CommandResult {
        Ok(())
    }

    #[test]
    fn keeps_first_registration_order() {
        let mut registry = CommandRegistry::new();
        registry.register(CommandEntry::new("list", "", "", noop));
        registry.register(CommandEntry::new("add", "", "", noop));
        registry.register(CommandEntry::new("list", "again", "", noop));
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["list", "add"]);
        assert_eq!(registry.get("list").map(|e| e.description), Some("again"));
    }

    #[test]
    fn suggests_near_misses_only() {
        let mut registry = CommandRegistry::new();
        for name in ["budget", "budgets", "summary"] {
            registry.register(CommandEntry::new(name, "", "", noop));
        }
        assert_eq!(registry.closest("sumary"), Some("summary"));
        assert_eq!(registry.closest("BUDGT"), Some("budget"));
        assert_eq!(registry.closest("completely-different"), None);
    }
}
