use crate::cli::commands::CommandDefinition;
use crate::cli::core::{
    parse_date_arg, parse_positive_amount, parse_signed_amount, short_id, CommandError,
    CommandResult, ShellContext,
};
use crate::cli::io;
use crate::cli::output;
use crate::cli::table::{Table, TableColumn};
use crate::core::services::GoalService;

const GOAL_USAGE: &str =
    "usage: goal add <name> <target> [deadline] | goal progress <id> <amount> | goal delete <id>";

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new("goals", "List savings goals", "goals", cmd_goals),
        CommandDefinition::new("goal", "Manage savings goals", GOAL_USAGE, cmd_goal),
    ]
}

fn cmd_goals(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if !args.is_empty() {
        return Err(CommandError::InvalidArguments("usage: goals".into()));
    }

    if context.book.goals.is_empty() {
        io::print_info("No savings goals yet. Use `goal add` to create one.");
        return Ok(());
    }

    let mut table = Table::new(vec![
        TableColumn::left("Id"),
        TableColumn::left("Name"),
        TableColumn::right("Target"),
        TableColumn::right("Saved"),
        TableColumn::right("Progress"),
        TableColumn::left("Deadline"),
    ]);
    for goal in &context.book.goals {
        table.push_row(vec![
            short_id(goal.id),
            goal.name.clone(),
            context.format_amount(goal.target),
            context.format_amount(goal.current),
            format!("{:.0}%", goal.percent_complete()),
            goal.deadline
                .map(|date| date.to_string())
                .unwrap_or_else(|| "-".into()),
        ]);
    }
    output::section("Savings goals");
    output::table(&table.render());
    Ok(())
}

fn cmd_goal(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        ["add", name, target] => add_goal(context, name, target, None),
        ["add", name, target, deadline] => add_goal(context, name, target, Some(deadline)),
        ["progress", prefix, delta] => record_progress(context, prefix, delta),
        ["delete", prefix] => delete_goal(context, prefix),
        _ => Err(CommandError::InvalidArguments(GOAL_USAGE.into())),
    }
}

fn add_goal(
    context: &mut ShellContext,
    name: &str,
    target: &str,
    deadline: Option<&str>,
) -> CommandResult {
    let target = parse_positive_amount(target)?;
    let deadline = deadline.map(parse_date_arg).transpose()?;

    let id = GoalService::add(&mut context.book, name, target, deadline)?;
    context.persist()?;

    io::print_success(format!(
        "Goal `{}` created with target {} [{}].",
        name.trim(),
        context.format_amount(target),
        short_id(id)
    ));
    Ok(())
}

fn record_progress(context: &mut ShellContext, prefix: &str, delta: &str) -> CommandResult {
    let delta = parse_signed_amount(delta)?;
    let id = context.find_goal_by_prefix(prefix)?.id;

    if !GoalService::record_progress(&mut context.book, id, delta) {
        return Err(CommandError::Message(format!(
            "goal `{}` no longer exists",
            prefix
        )));
    }
    context.persist()?;

    let goal = context
        .book
        .goal(id)
        .ok_or_else(|| CommandError::Message("goal vanished after update".into()))?;
    io::print_success(format!(
        "Goal `{}` now at {} of {} ({:.0}%).",
        goal.name,
        context.format_amount(goal.current),
        context.format_amount(goal.target),
        goal.percent_complete()
    ));
    Ok(())
}

fn delete_goal(context: &mut ShellContext, prefix: &str) -> CommandResult {
    let (id, name) = {
        let goal = context.find_goal_by_prefix(prefix)?;
        (goal.id, goal.name.clone())
    };

    let confirmed = context.confirm_destructive(&format!("Delete goal `{}`?", name))?;
    if !confirmed {
        io::print_info("Operation cancelled.");
        return Ok(());
    }

    if !GoalService::remove(&mut context.book, id) {
        return Err(CommandError::Message(format!(
            "goal `{}` no longer exists",
            prefix
        )));
    }
    context.persist()?;
    io::print_success(format!("Goal `{}` removed.", name));
    Ok(())
}
