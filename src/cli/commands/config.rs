use tally_config::Config;

use crate::cli::core::{CommandError, CommandResult};
use crate::cli::output;
use crate::cli::registry::{CommandEntry, CommandGroup};
use crate::cli::shell_context::ShellContext;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        CommandGroup::Shell,
        "config",
        "View and change shell preferences",
        "config [show]\nconfig set <key> <value>",
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((action, rest)) = args.split_first() else {
        return show_config(context);
    };
    match action.to_lowercase().as_str() {
        "show" => show_config(context),
        "set" => set_config(context, rest),
        other => Err(CommandError::invalid(format!(
            "unknown config action `{}`; expected show or set",
            other
        ))),
    }
}

fn show_config(context: &ShellContext) -> CommandResult {
    output::section("Configuration");
    for key in Config::KEYS {
        let value = context.config.get(key).unwrap_or_default();
        let value = if value.is_empty() { "(default)".to_string() } else { value };
        output::info(format!("  {:<20} {}", key, value));
    }
    output::info(format!("  {:<20} {}", "profile_id", context.config.profile_id));
    output::info(format!(
        "  {:<20} {}",
        "config_path",
        context.config_manager.config_path().display()
    ));
    Ok(())
}

fn set_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((key, value)) = args.split_first() else {
        return Err(CommandError::invalid("usage: config set <key> <value>"));
    };
    let key = key.to_lowercase();
    let value = value.join(" ");
    context.config.set(&key, &value)?;
    context.persist_config()?;
    if key == "data_root" {
        context.reload_store()?;
    }
    output::success(format!(
        "Set {} to {}.",
        key,
        context.config.get(&key).unwrap_or_default()
    ));
    Ok(())
}
