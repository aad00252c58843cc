use futures::executor::block_on;
use serde_json::json;

use tally_core::{ActivitySummary, SourceFailure};
use tally_domain::Transaction;

use crate::cli::args::{parse_amount, parse_kind, ParsedArgs, PeriodArgs};
use crate::cli::core::{CommandError, CommandResult};
use crate::cli::formatters::{activity_line, short_id, AmountFormat};
use crate::cli::output;
use crate::cli::registry::{CommandEntry, CommandGroup};
use crate::cli::shell_context::ShellContext;
use crate::services::PeriodActivity;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        CommandGroup::Records,
        "activity",
        "List transactions and bill occurrences for a period",
        "activity [<period>] [--json]\n\
         activity add <income|expense> <amount> <description> [--date YYYY-MM-DD] [--category <name>]\n\
         <amount> is a positive magnitude; income or expense decides the sign",
        cmd_activity,
    )
    .with_period()]
}

fn cmd_activity(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.first().is_some_and(|arg| arg.eq_ignore_ascii_case("add")) {
        return add_transaction(context, &args[1..]);
    }

    let parsed = ParsedArgs::parse(args)?;
    let period = PeriodArgs::parse(&parsed.positional, context.config.default_period)?;
    let activity = block_on(context.organizer.activity_for_period(
        period.selector,
        period.custom,
        period.month,
    ))?;

    if parsed.flag("json") {
        println!("{}", serde_json::to_string_pretty(&feed_json(&activity))?);
        return Ok(());
    }

    let format = context.amount_format();
    output::section(format!("{} ({})", activity.period.label, activity.period.range));
    if activity.feed.activities.is_empty() {
        output::info("No activity in this period.");
    }
    for entry in &activity.feed.activities {
        output::info(activity_line(entry, &format));
    }
    print_summary(&activity.summary, &format);
    print_failures(&activity.feed.failures);
    Ok(())
}

fn add_transaction(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = ParsedArgs::parse(args)?;
    let [kind, amount, description @ ..] = parsed.positional.as_slice() else {
        return Err(CommandError::invalid(
            "usage: activity add <income|expense> <amount> <description>",
        ));
    };
    if description.is_empty() {
        return Err(CommandError::invalid("description cannot be empty"));
    }
    let kind = parse_kind(kind)?;
    let amount = parse_amount(amount)?;
    let date = parsed
        .date_option("date")?
        .unwrap_or_else(|| context.organizer.today());

    let mut transaction = Transaction::new(description.join(" "), amount, kind, date);
    if let Some(category) = parsed.option("category") {
        transaction = transaction.with_category(category);
    }

    let user = context.organizer.context();
    let id = context.organizer.store().add_transaction(&user, transaction)?;
    context.organizer.invalidate();
    output::success(format!(
        "Recorded {} of {} on {} ({}).",
        kind,
        context.amount_format().amount(amount),
        date,
        short_id(&id)
    ));
    Ok(())
}

pub(crate) fn print_summary(summary: &ActivitySummary, format: &AmountFormat) {
    output::info(format!(
        "Income {}  Expense {}  Net {}",
        format.amount(summary.income),
        format.amount(summary.expense),
        format.amount(summary.net)
    ));
    output::info(format!(
        "{} transaction(s), {} recurring occurrence(s)",
        summary.transaction_count, summary.recurring_count
    ));
}

/// Warns about sources that could not be read; the rest of the feed is still shown.
pub(crate) fn print_failures(failures: &[SourceFailure]) {
    for failure in failures {
        output::warning(format!("Could not load {}: {}", failure.source, failure.message));
    }
    if !failures.is_empty() {
        output::hint("Results above are partial.");
    }
}

fn feed_json(activity: &PeriodActivity) -> serde_json::Value {
    let failures: Vec<serde_json::Value> = activity
        .feed
        .failures
        .iter()
        .map(|failure| json!({ "source": failure.source.to_string(), "message": failure.message }))
        .collect();
    json!({
        "period": {
            "selector": activity.period.selector,
            "label": activity.period.label,
            "from": activity.period.range.from(),
            "to": activity.period.range.to(),
        },
        "activities": activity.feed.activities,
        "summary": {
            "income": activity.summary.income,
            "expense": activity.summary.expense,
            "net": activity.summary.net,
            "transactions": activity.summary.transaction_count,
            "recurring": activity.summary.recurring_count,
        },
        "failures": failures,
    })
}
