use std::collections::HashMap;

use crate::cli::core::CommandResult;
use crate::cli::shell_context::ShellContext;

pub type CommandHandler = fn(&mut ShellContext, &[&str]) -> CommandResult;

pub struct CommandEntry {
    pub name: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    pub aliases: &'static [&'static str],
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
            aliases: &[],
            handler,
        }
    }

    pub const fn with_aliases(mut self, aliases: &'static [&'static str]) -> Self {
        self.aliases = aliases;
        self
    }
}

/// Shell commands by name and alias. Listing follows registration order.
#[derive(Default)]
pub struct CommandRegistry {
    entries: Vec<CommandEntry>,
    lookup: HashMap<&'static str, usize>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `entry`; a later entry with the same name replaces the earlier one.
    pub fn register(&mut self, entry: CommandEntry) {
        let index = match self.lookup.get(entry.name) {
            Some(&existing) if self.entries[existing].name == entry.name => {
                self.entries[existing] = entry;
                existing
            }
            _ => {
                self.entries.push(entry);
                self.entries.len() - 1
            }
        };
        let entry = &self.entries[index];
        self.lookup.insert(entry.name, index);
        for alias in entry.aliases {
            self.lookup.entry(*alias).or_insert(index);
        }
    }

    /// Resolves a command by name or alias, ignoring ASCII case.
    pub fn get(&self, name: &str) -> Option<&CommandEntry> {
        let key = name.to_ascii_lowercase();
        self.lookup
            .get(key.as_str())
            .and_then(|&index| self.entries.get(index))
    }

    pub fn list(&self) -> impl Iterator<Item = &CommandEntry> + '_ {
        self.entries.iter()
    }

    /// Primary names followed by aliases, for completion and suggestions.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries
            .iter()
            .flat_map(|entry| std::iter::once(entry.name).chain(entry.aliases.iter().copied()))
    }

    pub fn handler(&self, name: &str) -> Option<CommandHandler> {
        self.get(name).map(|entry| entry.handler)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(_: &mut ShellContext, _: &[&str]) -> CommandResult {
        Ok(())
    }

    #[test]
    fn resolves_names_and_aliases_case_insensitively() {
        let mut registry = CommandRegistry::new();
        registry.register(CommandEntry::new("list", "List", "list", noop).with_aliases(&["ls"]));
        registry.register(CommandEntry::new("exit", "Exit", "exit", noop).with_aliases(&["quit"]));

        assert_eq!(registry.get("LIST").map(|e| e.name), Some("list"));
        assert_eq!(registry.get("ls").map(|e| e.name), Some("list"));
        assert_eq!(registry.get("quit").map(|e| e.name), Some("exit"));
        assert!(registry.get("delete").is_none());
        assert_eq!(
            registry.names().collect::<Vec<_>>(),
            ["list", "ls", "exit", "quit"]
        );
    }

    #[test]
    fn re_registering_replaces_in_place() {
        let mut registry = CommandRegistry::new();
        registry.register(CommandEntry::new("save", "old", "save", noop));
        registry.register(CommandEntry::new("status", "Status", "status", noop));
        registry.register(CommandEntry::new("save", "new", "save", noop));
        let descriptions: Vec<_> = registry.list().map(|e| e.description).collect();
        assert_eq!(descriptions, ["new", "Status"]);
    }
}
