use crate::cli::commands::CommandDefinition;
use crate::cli::core::{parse_month_arg, CommandError, CommandResult, ShellContext};
use crate::cli::help;
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::domain::{BudgetBook, CURRENT_SCHEMA_VERSION};
use crate::storage::StateStore;

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new("help", "Show available commands", "help [command]", cmd_help),
        CommandDefinition::new("version", "Show build metadata", "version", cmd_version),
        CommandDefinition::new(
            "month",
            "Show or switch the active month",
            "month [YYYY-MM]",
            cmd_month,
        ),
        CommandDefinition::new(
            "reset",
            "Erase all budget data and start over",
            "reset",
            cmd_reset,
        ),
        CommandDefinition::new("exit", "Exit the shell", "exit", cmd_exit),
    ]
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(command) = args.first().map(|name| name.to_lowercase()) {
        if let Some(command) = context.command(&command) {
            help::print_command(command);
        } else {
            context.suggest_command(args[0]);
        }
        return Ok(());
    }

    help::print_overview(&context.registry);
    Ok(())
}

fn cmd_version(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    output_section(format!("ZenBudget {}", env!("CARGO_PKG_VERSION")));
    io::print_info(format!("  Schema version: v{}", CURRENT_SCHEMA_VERSION));
    io::print_info(format!(
        "  Data directory: {}",
        context.store.base_dir().display()
    ));
    Ok(())
}

fn cmd_month(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] => {
            io::print_info(format!("Active month: {}", context.current_month));
            Ok(())
        }
        [value] => {
            let month = parse_month_arg(value)?;
            context.set_month(month)?;
            io::print_success(format!("Active month set to {}.", month));
            Ok(())
        }
        _ => Err(CommandError::InvalidArguments(
            "usage: month [YYYY-MM]".into(),
        )),
    }
}

fn cmd_reset(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let confirmed = context.confirm_destructive(
        "Erase all transactions, budgets, and goals? This cannot be undone.",
    )?;
    if !confirmed {
        io::print_info("Operation cancelled.");
        return Ok(());
    }

    context.store.reset().map_err(CommandError::from_core)?;
    context.book = BudgetBook::new();
    context.seed_active_month()?;
    io::print_success("All budget data cleared.");
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}
