use futures::executor::block_on;

use crate::cli::args::{ParsedArgs, PeriodArgs};
use crate::cli::commands::activity::{print_failures, print_summary};
use crate::cli::commands::PERIOD_USAGE;
use crate::cli::core::CommandResult;
use crate::cli::formatters::activity_line;
use crate::cli::output;
use crate::cli::registry::{CommandEntry, CommandGroup};
use crate::cli::shell_context::ShellContext;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        CommandGroup::Views,
        "calendar",
        "Show a period day by day with spending per category",
        "calendar [<period>]",
        cmd_calendar,
    )
    .aliases(&["cal"])
    .with_period()]
}

fn cmd_calendar(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = ParsedArgs::parse(args)?;
    let period = PeriodArgs::parse(&parsed.positional, context.config.default_period)?;
    let view = block_on(context.organizer.calendar_for_period(
        period.selector,
        period.custom,
        period.month,
    ))?;
    let format = context.amount_format();

    output::section(format!("{} ({})", view.period.label, view.period.range));
    let mut quiet_days = 0;
    for day in &view.days {
        if day.activities.is_empty() {
            quiet_days += 1;
            continue;
        }
        output::info(format!(
            "{} {}  net {}",
            day.date,
            day.date.format("%a"),
            format.amount(day.summary.net)
        ));
        for entry in &day.activities {
            output::info(format!("    {}", activity_line(entry, &format)));
        }
    }
    if quiet_days == view.days.len() {
        output::info("No activity in this period.");
        output::hint(PERIOD_USAGE);
    } else if quiet_days > 0 {
        output::info(format!("{} day(s) without activity.", quiet_days));
    }

    if !view.categories.is_empty() {
        output::section("Spending by category");
        for total in &view.categories {
            output::info(format!(
                "  {:<18} {:>16}  ({} item(s))",
                total.category,
                format.amount(total.total),
                total.count
            ));
        }
    }
    print_summary(&view.summary, &format);
    print_failures(&view.failures);
    Ok(())
}
