use tally_domain::CURRENT_SCHEMA_VERSION;

use crate::cli::core::{CommandError, CommandResult};
use crate::cli::help;
use crate::cli::output;
use crate::cli::registry::{CommandEntry, CommandGroup};
use crate::cli::shell_context::ShellContext;
use crate::utils::build_info;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            CommandGroup::Shell,
            "help",
            "Show available commands",
            "help [command]",
            cmd_help,
        )
        .aliases(&["?"]),
        CommandEntry::new(
            CommandGroup::Shell,
            "version",
            "Show build metadata",
            "version",
            cmd_version,
        ),
        CommandEntry::new(CommandGroup::Shell, "exit", "Exit the shell", "exit", cmd_exit)
            .aliases(&["quit"]),
    ]
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(name) = args.first() {
        match context.command(&name.to_lowercase()) {
            Some(entry) => help::print_command(entry),
            None => context.suggest_command(name),
        }
        return Ok(());
    }

    help::print_overview(&context.registry);
    Ok(())
}

fn cmd_version(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let meta = build_info::current();
    output::section(format!("Tally {}", meta.version));
    output::info(format!("  Data schema : v{}", CURRENT_SCHEMA_VERSION));
    output::info(format!("  Build hash  : {} ({})", meta.git_hash, meta.git_status));
    output::info(format!("  Built at    : {}", meta.timestamp));
    output::info(format!("  Target      : {}", meta.target));
    output::info(format!("  Profile     : {}", meta.profile));
    output::info(format!("  Rustc       : {}", meta.rustc));
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}
