use tally_domain::PeriodSelector;

use crate::cli::args::PeriodArgs;
use crate::cli::commands::PERIOD_USAGE;
use crate::cli::core::CommandResult;
use crate::cli::output;
use crate::cli::registry::{CommandEntry, CommandGroup};
use crate::cli::shell_context::ShellContext;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        CommandGroup::Views,
        "period",
        "Resolve a period to its date range",
        "period [list | <period>]",
        cmd_period,
    )
    .with_period()]
}

fn cmd_period(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.first().is_some_and(|arg| arg.eq_ignore_ascii_case("list")) {
        return list_periods(context);
    }

    let period = PeriodArgs::parse(args, context.config.default_period)?;
    let resolved = context
        .organizer
        .resolve_period(period.selector, period.custom, period.month)?;
    output::info(format!(
        "{}: {} ({} days)",
        resolved.label,
        resolved.range,
        resolved.range.num_days()
    ));
    Ok(())
}

fn list_periods(context: &ShellContext) -> CommandResult {
    output::section(format!("Periods as of {}", context.organizer.today()));
    for selector in PeriodSelector::ALL {
        let line = match context.organizer.resolve_period(selector, None, None) {
            Ok(resolved) => format!("  {:<14} {}", selector.key(), resolved.range),
            Err(_) => format!("  {:<14} (needs input)", selector.key()),
        };
        output::info(line);
    }
    output::hint(PERIOD_USAGE);
    Ok(())
}
