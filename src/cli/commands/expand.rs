use futures::executor::block_on;

use crate::cli::args::{ParsedArgs, PeriodArgs};
use crate::cli::core::{CommandError, CommandResult};
use crate::cli::output;
use crate::cli::registry::{CommandEntry, CommandGroup};
use crate::cli::shell_context::ShellContext;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        CommandGroup::Views,
        "expand",
        "List the occurrences of one recurring bill within a period",
        "expand <bill-id> [<period>]",
        cmd_expand,
    )
    .with_period()]
}

fn cmd_expand(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = ParsedArgs::parse(args)?;
    let Some((id, period_tokens)) = parsed.positional.split_first() else {
        return Err(CommandError::invalid("usage: expand <bill-id> [<period>]"));
    };
    let period = PeriodArgs::parse(period_tokens, context.config.default_period)?;
    let resolved = context
        .organizer
        .resolve_period(period.selector, period.custom, period.month)?;
    let (bill, occurrences) = block_on(context.organizer.expand_bill(id, resolved.range))?;

    let format = context.amount_format();
    output::section(format!("{} in {} ({})", bill.name, resolved.label, resolved.range));
    if occurrences.is_empty() {
        output::info("No occurrences in this period.");
        return Ok(());
    }
    for occurrence in &occurrences {
        output::info(format!(
            "  {}  {:<28} {}",
            occurrence.date,
            occurrence.describe(&bill),
            format.amount(bill.amount)
        ));
    }
    output::info(format!(
        "{} occurrence(s), {} in total",
        occurrences.len(),
        format.amount(bill.amount * occurrences.len() as f64)
    ));
    Ok(())
}
