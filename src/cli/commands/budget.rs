use crate::categories;
use crate::cli::commands::CommandDefinition;
use crate::cli::core::{parse_non_negative_amount, CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output;
use crate::cli::table::{Table, TableColumn};
use crate::core::services::BudgetService;
use crate::report::MonthOverview;

const BUDGET_USAGE: &str =
    "usage: budget | budget set <category> <amount> | budget actual <category> <amount> | budget clear <category>";

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![CommandDefinition::new(
        "budget",
        "Show or edit the active month's budget",
        BUDGET_USAGE,
        cmd_budget,
    )]
}

fn cmd_budget(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] => show_budget(context),
        ["set", category, amount] => set_planned(context, category, amount),
        ["actual", category, amount] => set_actual(context, category, amount),
        ["clear", category] => clear_actual(context, category),
        _ => Err(CommandError::InvalidArguments(BUDGET_USAGE.into())),
    }
}

fn show_budget(context: &mut ShellContext) -> CommandResult {
    context.seed_active_month()?;
    let overview = MonthOverview::compute(&context.book, context.current_month);

    output::section(format!("Budget for {}", overview.month));
    if overview.rows.is_empty() {
        io::print_info("No budgeted categories with activity this month.");
    } else {
        let mut table = Table::new(vec![
            TableColumn::left("Category"),
            TableColumn::right("Planned"),
            TableColumn::right("Actual"),
            TableColumn::right("Remaining"),
        ]);
        for row in &overview.rows {
            table.push_row(vec![
                row.category.clone(),
                context.format_amount(row.planned),
                context.format_amount(row.actual),
                context.format_amount(row.planned - row.actual),
            ]);
        }
        output::table(&table.render());
    }

    io::print_info(format!(
        "Planned total: {}",
        context.format_amount(overview.total_planned)
    ));
    io::print_info(format!("Spent: {}", context.format_amount(overview.expenses)));
    io::print_info(format!("Utilization: {:.1}%", overview.utilization_pct));
    Ok(())
}

fn set_planned(context: &mut ShellContext, category: &str, amount: &str) -> CommandResult {
    let amount = parse_non_negative_amount(amount)?;
    let category = known_category(context, category)?;
    context.seed_active_month()?;

    let manual_actual = context
        .book
        .monthly_budget(context.current_month)
        .and_then(|budget| budget.line(&category))
        .and_then(|line| line.manual_actual);
    BudgetService::update_line(
        &mut context.book,
        context.current_month,
        &category,
        amount,
        manual_actual,
    );
    context.persist()?;
    io::print_success(format!(
        "Planned amount for {} set to {}.",
        category,
        context.format_amount(amount)
    ));
    Ok(())
}

fn set_actual(context: &mut ShellContext, category: &str, amount: &str) -> CommandResult {
    let amount = parse_non_negative_amount(amount)?;
    let category = known_category(context, category)?;
    context.seed_active_month()?;

    let planned = existing_planned(context, &category);
    BudgetService::update_line(
        &mut context.book,
        context.current_month,
        &category,
        planned,
        Some(amount),
    );
    context.persist()?;
    io::print_success(format!(
        "Actual for {} overridden to {}.",
        category,
        context.format_amount(amount)
    ));
    Ok(())
}

fn clear_actual(context: &mut ShellContext, category: &str) -> CommandResult {
    let category = known_category(context, category)?;
    context.seed_active_month()?;

    let planned = existing_planned(context, &category);
    BudgetService::update_line(
        &mut context.book,
        context.current_month,
        &category,
        planned,
        None,
    );
    context.persist()?;
    io::print_success(format!(
        "Manual override for {} cleared; transaction sums apply again.",
        category
    ));
    Ok(())
}

/// Resolves user input onto the canonical category spelling, rejecting
/// names that are not registered.
fn known_category(context: &ShellContext, raw: &str) -> Result<String, CommandError> {
    categories::all_categories(&context.book.custom_categories)
        .into_iter()
        .find(|known| known.eq_ignore_ascii_case(raw))
        .ok_or_else(|| {
            CommandError::InvalidArguments(format!(
                "unknown category `{}`. Use `categories` to list known names, or `category add` to register it.",
                raw
            ))
        })
}

fn existing_planned(context: &ShellContext, category: &str) -> f64 {
    context
        .book
        .monthly_budget(context.current_month)
        .and_then(|budget| budget.line(category))
        .map(|line| line.planned)
        .unwrap_or_else(|| context.settings.planned_defaults().for_category(category))
}
