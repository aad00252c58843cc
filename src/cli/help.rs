use crate::cli::commands::PERIOD_USAGE;
use crate::cli::output;
use crate::cli::registry::{CommandEntry, CommandRegistry};

pub fn print_overview(registry: &CommandRegistry) {
    output::section("Available commands");
    for (group, entries) in registry.grouped() {
        output::info(format!("{}:", group.title()));
        for entry in entries {
            output::info(format!("  {:<10} {}", entry.name, entry.summary));
        }
    }
    output::info("Use `help <command>` for details.");
}

pub fn print_command(entry: &CommandEntry) {
    output::section(format!("Help: {}", entry.name));
    output::info(format!("  {}", entry.summary));
    for (idx, line) in entry.usage.lines().enumerate() {
        let lead = if idx == 0 { "Usage:" } else { "" };
        output::info(format!("  {:<6} {}", lead, line.trim_start()));
    }
    if !entry.aliases.is_empty() {
        output::info(format!("  Also: {}", entry.aliases.join(", ")));
    }
    if entry.takes_period {
        output::hint(PERIOD_USAGE);
    }
}
