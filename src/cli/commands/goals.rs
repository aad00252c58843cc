use futures::executor::block_on;

use tally_domain::SavingsGoal;

use crate::cli::args::{parse_amount, ParsedArgs};
use crate::cli::core::{CommandError, CommandResult};
use crate::cli::formatters::short_id;
use crate::cli::output;
use crate::cli::registry::{CommandEntry, CommandGroup};
use crate::cli::shell_context::ShellContext;
use crate::errors::TallyError;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        CommandGroup::Planning,
        "goals",
        "Track savings goals and ask for advice",
        "goals [list]\n\
         goals add <name> <target> [--saved <amount>] [--deadline YYYY-MM-DD]\n\
         goals advise <name|id>",
        cmd_goals,
    )]
}

fn cmd_goals(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((action, rest)) = args.split_first() else {
        return list_goals(context);
    };
    match action.to_lowercase().as_str() {
        "list" => list_goals(context),
        "add" => add_goal(context, rest),
        "advise" => advise(context, rest),
        other => Err(CommandError::invalid(format!(
            "unknown goals action `{}`; expected list, add or advise",
            other
        ))),
    }
}

fn list_goals(context: &ShellContext) -> CommandResult {
    let goals = context
        .organizer
        .store()
        .goals(&context.organizer.context())?;
    if goals.is_empty() {
        output::info("No savings goals yet.");
        return Ok(());
    }

    let format = context.amount_format();
    output::section("Savings goals");
    for goal in &goals {
        let progress = context.organizer.goal_progress(goal);
        let deadline = match (goal.deadline, progress.required_monthly) {
            (Some(deadline), Some(monthly)) => {
                format!("by {}, {} per month", deadline, format.amount(monthly))
            }
            (Some(deadline), None) => format!("by {}", deadline),
            (None, _) => "no deadline".to_string(),
        };
        output::info(format!(
            "  {}  {:<18} {} of {} ({:.0}%), {}",
            short_id(&goal.id),
            goal.name,
            format.amount(goal.current_amount),
            format.amount(goal.target_amount),
            progress.percent(),
            deadline
        ));
    }
    Ok(())
}

fn add_goal(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = ParsedArgs::parse(args)?;
    let [name, target] = parsed.positional.as_slice() else {
        return Err(CommandError::invalid("usage: goals add <name> <target>"));
    };
    let mut goal = SavingsGoal::new(*name, parse_amount(target)?);
    if let Some(saved) = parsed.option("saved") {
        goal = goal.with_progress(parse_saved(saved)?);
    }
    if let Some(deadline) = parsed.date_option("deadline")? {
        goal = goal.with_deadline(deadline);
    }

    let user = context.organizer.context();
    context.organizer.store().add_goal(&user, goal)?;
    output::success(format!("Goal `{}` added.", name));
    Ok(())
}

fn advise(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() {
        return Err(CommandError::invalid("usage: goals advise <name|id>"));
    }
    let needle = args.join(" ");
    let goals = context
        .organizer
        .store()
        .goals(&context.organizer.context())?;
    let goal = find_goal(goals, &needle)?;
    let advice = block_on(context.organizer.goal_advice(goal))?;

    output::section("Advice");
    output::info(&advice.summary);
    for recommendation in &advice.recommendations {
        output::info(format!("  - {}", recommendation));
    }
    if let Some(amount) = advice.suggested_monthly_contribution {
        output::info(format!(
            "Suggested monthly contribution: {}",
            context.amount_format().amount(amount)
        ));
    }
    Ok(())
}

/// Zero is allowed here, unlike other amounts.
fn parse_saved(raw: &str) -> Result<f64, CommandError> {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Ok(value),
        _ => Err(CommandError::invalid(format!(
            "invalid saved amount `{}`",
            raw
        ))),
    }
}

/// Matches by case-insensitive name first, then by id prefix.
fn find_goal(goals: Vec<SavingsGoal>, needle: &str) -> Result<SavingsGoal, CommandError> {
    let lowered = needle.trim().to_ascii_lowercase();
    let mut by_name: Vec<SavingsGoal> = goals
        .iter()
        .filter(|goal| goal.name.to_ascii_lowercase() == lowered)
        .cloned()
        .collect();
    if by_name.len() == 1 {
        return Ok(by_name.remove(0));
    }
    let mut by_id: Vec<SavingsGoal> = goals
        .into_iter()
        .filter(|goal| goal.id.simple().to_string().starts_with(&lowered))
        .collect();
    match by_id.len() {
        1 => Ok(by_id.remove(0)),
        0 => Err(TallyError::NotFound(format!("savings goal `{}`", needle)).into()),
        _ => Err(CommandError::invalid(format!(
            "`{}` matches several goals; use the id",
            needle
        ))),
    }
}
