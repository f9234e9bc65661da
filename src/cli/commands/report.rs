use crate::cli::commands::CommandDefinition;
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output;
use crate::cli::table::{Table, TableColumn};
use crate::domain::Transaction;
use crate::report::{self, MonthOverview};

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "summary",
            "Income, spending, and balance for the active month",
            "summary",
            cmd_summary,
        ),
        CommandDefinition::new(
            "trend",
            "Income and spending per month, oldest first",
            "trend",
            cmd_trend,
        ),
        CommandDefinition::new(
            "history",
            "Compare observed months, newest first",
            "history",
            cmd_history,
        ),
        CommandDefinition::new(
            "insights",
            "Advice based on the active month's activity",
            "insights",
            cmd_insights,
        ),
    ]
}

fn cmd_summary(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    no_args(args, "summary")?;
    context.seed_active_month()?;
    let overview = MonthOverview::compute(&context.book, context.current_month);

    output::section(format!("Summary for {}", overview.month));
    io::print_info(format!("Income: {}", context.format_amount(overview.income)));
    io::print_info(format!(
        "Expenses: {}",
        context.format_amount(overview.expenses)
    ));
    io::print_info(format!(
        "Balance: {}",
        context.format_amount(overview.balance)
    ));

    let distribution = report::spending_distribution(&context.book, context.current_month);
    if distribution.is_empty() {
        io::print_info(format!(
            "No spending recorded for {}.",
            context.current_month
        ));
        return Ok(());
    }

    let mut table = Table::new(vec![
        TableColumn::left("Category"),
        TableColumn::right("Spent"),
        TableColumn::right("Share"),
    ]);
    for row in &distribution {
        table.push_row(vec![
            row.category.clone(),
            context.format_amount(row.actual),
            format!("{:.1}%", (row.actual / overview.expenses) * 100.0),
        ]);
    }
    output::section("Spending by category");
    output::table(&table.render());
    Ok(())
}

fn cmd_trend(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    no_args(args, "trend")?;
    let series = report::trend_series(&context.book);
    if series.is_empty() {
        io::print_info("No activity recorded yet.");
        return Ok(());
    }

    let mut table = Table::new(vec![
        TableColumn::left("Month"),
        TableColumn::right("Income"),
        TableColumn::right("Expenses"),
    ]);
    for point in &series {
        table.push_row(vec![
            point.month.to_string(),
            context.format_amount(point.income),
            context.format_amount(point.expense),
        ]);
    }
    output::section("Income and spending trend");
    output::table(&table.render());
    Ok(())
}

fn cmd_history(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    no_args(args, "history")?;
    let rows = report::month_comparison(&context.book);
    if rows.is_empty() {
        io::print_info("No activity recorded yet.");
        return Ok(());
    }

    let mut table = Table::new(vec![
        TableColumn::left("Month"),
        TableColumn::right("Income"),
        TableColumn::right("Expenses"),
        TableColumn::right("Net"),
    ]);
    for row in &rows {
        table.push_row(vec![
            row.month.to_string(),
            context.format_amount(row.income),
            context.format_amount(row.expense),
            context.format_amount(row.net),
        ]);
    }
    output::section("Month comparison");
    output::table(&table.render());
    Ok(())
}

fn cmd_insights(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    no_args(args, "insights")?;
    context.seed_active_month()?;

    let month = context.current_month;
    let transactions: Vec<Transaction> = context
        .book
        .transactions
        .iter()
        .filter(|txn| month.contains(txn.date))
        .cloned()
        .collect();
    let advice = context
        .advisor
        .insights(&transactions, context.book.monthly_budget(month));

    output::section(format!("Insights for {}", month));
    for line in advice.lines() {
        io::print_hint(line);
    }
    Ok(())
}

fn no_args(args: &[&str], name: &str) -> Result<(), CommandError> {
    if args.is_empty() {
        Ok(())
    } else {
        Err(CommandError::InvalidArguments(format!("usage: {}", name)))
    }
}
