use futures::executor::block_on;

use tally_domain::{RecurrenceType, RecurringBillDefinition};

use crate::cli::args::{parse_amount, parse_date, ParsedArgs};
use crate::cli::core::{CommandError, CommandResult};
use crate::cli::formatters::short_id;
use crate::cli::output;
use crate::cli::registry::{CommandEntry, CommandGroup};
use crate::cli::shell_context::ShellContext;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        CommandGroup::Records,
        "bills",
        "Manage recurring bill definitions",
        "bills [list]\n\
         bills add <name> <amount> <monthly|weekly|yearly> <start> [--end YYYY-MM-DD] [--installments <n>] [--category <name>]\n\
         bills remove <id>",
        cmd_bills,
    )]
}

fn cmd_bills(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((action, rest)) = args.split_first() else {
        return list_bills(context);
    };
    match action.to_lowercase().as_str() {
        "list" => list_bills(context),
        "add" => add_bill(context, rest),
        "remove" | "rm" => remove_bill(context, rest),
        other => Err(CommandError::invalid(format!(
            "unknown bills action `{}`; expected list, add or remove",
            other
        ))),
    }
}

fn list_bills(context: &ShellContext) -> CommandResult {
    let schedules = block_on(context.organizer.recurring_bills())?;
    if schedules.is_empty() {
        output::info("No recurring bills defined.");
        output::hint("Add one with `bills add Rent 900 monthly 2024-01-05`.");
        return Ok(());
    }

    let format = context.amount_format();
    output::section("Recurring bills");
    for schedule in &schedules {
        let bill = &schedule.bill;
        let next = match &schedule.next {
            Some(occurrence) => format!("next {}", occurrence.date),
            None => "finished".to_string(),
        };
        let installments = bill
            .total_installments
            .map(|total| format!(" x{}", total))
            .unwrap_or_default();
        output::info(format!(
            "  {}  {:<20} {:>14} {:<8}{}  {}",
            short_id(&bill.id),
            bill.name,
            format.amount(bill.amount),
            bill.recurrence_type.label(),
            installments,
            next
        ));
    }
    Ok(())
}

fn add_bill(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = ParsedArgs::parse(args)?;
    let [name, amount, recurrence, start] = parsed.positional.as_slice() else {
        return Err(CommandError::invalid(
            "usage: bills add <name> <amount> <monthly|weekly|yearly> <start>",
        ));
    };
    let recurrence = parse_recurrence(recurrence)?;
    let mut bill =
        RecurringBillDefinition::new(*name, parse_amount(amount)?, parse_date(start)?, recurrence);
    if let Some(end) = parsed.date_option("end")? {
        bill = bill.with_end_date(end);
    }
    if let Some(total) = parsed.int_option("installments")? {
        if total <= 0 {
            return Err(CommandError::invalid("--installments must be at least 1"));
        }
        bill = bill.with_installments(total);
    }
    if let Some(category) = parsed.option("category") {
        bill = bill.with_category(category);
    }

    let user = context.organizer.context();
    let id = context.organizer.store().add_recurring_bill(&user, bill)?;
    context.organizer.invalidate();
    output::success(format!("Recurring bill `{}` added ({}).", name, short_id(&id)));
    Ok(())
}

fn remove_bill(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [prefix] = args else {
        return Err(CommandError::invalid("usage: bills remove <id>"));
    };
    let bill = block_on(context.organizer.find_bill(prefix))?;
    let user = context.organizer.context();
    context.organizer.store().remove_recurring_bill(&user, bill.id)?;
    context.organizer.invalidate();
    output::success(format!("Recurring bill `{}` removed.", bill.name));
    Ok(())
}

fn parse_recurrence(raw: &str) -> Result<RecurrenceType, CommandError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "monthly" => Ok(RecurrenceType::Monthly),
        "weekly" => Ok(RecurrenceType::Weekly),
        "yearly" | "annual" => Ok(RecurrenceType::Yearly),
        _ => Err(CommandError::invalid(format!(
            "unknown recurrence `{}`; expected monthly, weekly or yearly",
            raw
        ))),
    }
}
