use std::collections::{BTreeMap, HashMap};

use crate::cli::core::CommandResult;
use crate::cli::shell_context::ShellContext;

pub type CommandHandler = fn(&mut ShellContext, &[&str]) -> CommandResult;

/// Sections of the `help` overview, listed in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CommandGroup {
    Views,
    Records,
    Planning,
    Shell,
}

impl CommandGroup {
    pub fn title(self) -> &'static str {
        match self {
            CommandGroup::Views => "Views",
            CommandGroup::Records => "Records",
            CommandGroup::Planning => "Planning",
            CommandGroup::Shell => "Shell",
        }
    }
}

pub struct CommandEntry {
    pub name: &'static str,
    pub summary: &'static str,
    pub usage: &'static str,
    pub group: CommandGroup,
    pub aliases: &'static [&'static str],
    /// Whether trailing arguments are read as a period selector.
    pub takes_period: bool,
    pub handler: CommandHandler,
}

impl CommandEntry {
    pub fn new(
        group: CommandGroup,
        name: &'static str,
        summary: &'static str,
        usage: &'static str,
        handler: CommandHandler,
    ) -> Self {
        Self {
            name,
            summary,
            usage,
            group,
            aliases: &[],
            takes_period: false,
            handler,
        }
    }

    pub fn aliases(mut self, aliases: &'static [&'static str]) -> Self {
        self.aliases = aliases;
        self
    }

    pub fn with_period(mut self) -> Self {
        self.takes_period = true;
        self
    }
}

/// Commands in registration order, addressable by name or alias.
#[derive(Default)]
pub struct CommandRegistry {
    entries: Vec<CommandEntry>,
    lookup: HashMap<&'static str, usize>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `entry`. A later entry with the same name replaces the earlier one
    /// in place; aliases never shadow a command name.
    pub fn register(&mut self, entry: CommandEntry) {
        let slot = match self.lookup.get(entry.name) {
            Some(&existing) if self.entries[existing].name == entry.name => {
                self.entries[existing] = entry;
                existing
            }
            _ => {
                self.entries.push(entry);
                self.entries.len() - 1
            }
        };
        let entry = &self.entries[slot];
        self.lookup.insert(entry.name, slot);
        for &alias in entry.aliases {
            let taken = self
                .lookup
                .get(alias)
                .is_some_and(|&index| self.entries[index].name == alias);
            if !taken {
                self.lookup.insert(alias, slot);
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&CommandEntry> {
        self.lookup.get(name).map(|&index| &self.entries[index])
    }

    pub fn handler(&self, name: &str) -> Option<CommandHandler> {
        self.get(name).map(|entry| entry.handler)
    }

    /// Command names followed by their aliases, for completion and suggestions.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries
            .iter()
            .flat_map(|entry| std::iter::once(entry.name).chain(entry.aliases.iter().copied()))
    }

    pub fn grouped(&self) -> BTreeMap<CommandGroup, Vec<&CommandEntry>> {
        let mut groups: BTreeMap<CommandGroup, Vec<&CommandEntry>> = BTreeMap::new();
        for entry in &self.entries {
            groups.entry(entry.group).or_default().push(entry);
        }
        groups
    }
}
