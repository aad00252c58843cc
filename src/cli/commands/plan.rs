use tally_domain::{PlannedEntry, PlanningCadence};

use crate::cli::args::{parse_amount, parse_date, parse_kind, ParsedArgs};
use crate::cli::core::{CommandError, CommandResult};
use crate::cli::output;
use crate::cli::registry::{CommandEntry, CommandGroup};
use crate::cli::shell_context::ShellContext;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        CommandGroup::Planning,
        "plan",
        "Generate planned entries on a fixed cadence",
        "plan <income|expense> <amount> <monthly|quarterly|semiannual|annual> <start> <description> \
         [--months <n>] [--category <name>] [--save]\n\
         <amount> is a positive magnitude; income or expense decides the sign",
        cmd_plan,
    )]
}

fn cmd_plan(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = ParsedArgs::parse(args)?;
    let [kind, amount, cadence, start, description @ ..] = parsed.positional.as_slice() else {
        return Err(CommandError::invalid(
            "usage: plan <income|expense> <amount> <cadence> <start> <description>",
        ));
    };
    if description.is_empty() {
        return Err(CommandError::invalid("description cannot be empty"));
    }
    let cadence = cadence
        .parse::<PlanningCadence>()
        .map_err(CommandError::invalid)?;
    let mut entry = PlannedEntry::new(
        description.join(" "),
        parse_amount(amount)?,
        parse_kind(kind)?,
        parse_date(start)?,
        cadence,
    );
    if let Some(category) = parsed.option("category") {
        entry = entry.with_category(category);
    }
    let horizon = parsed
        .int_option("months")?
        .map(|months| {
            u32::try_from(months)
                .map_err(|_| CommandError::invalid("--months must be a positive number"))
        })
        .transpose()?;

    let generated = context.organizer.plan_entries(&entry, horizon)?;
    let format = context.amount_format();
    output::section(format!("Planned {} entries", cadence));
    for transaction in &generated {
        output::info(format!(
            "  {}  {:<32} {}",
            transaction.date,
            transaction.description,
            format.signed(transaction.amount, transaction.transaction_type)
        ));
    }

    if parsed.flag("save") {
        let user = context.organizer.context();
        let count = context
            .organizer
            .store()
            .add_transactions(&user, generated)?;
        context.organizer.invalidate();
        output::success(format!("Saved {} planned entries.", count));
    } else {
        output::hint("Re-run with `--save` to record these entries.");
    }
    Ok(())
}
