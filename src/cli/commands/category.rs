use crate::categories::{self, INCOME_CATEGORY};
use crate::cli::commands::CommandDefinition;
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output;
use crate::cli::table::{Table, TableColumn};

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "categories",
            "List known expense categories",
            "categories",
            cmd_categories,
        ),
        CommandDefinition::new(
            "category",
            "Register a custom category",
            "category add <name>",
            cmd_category,
        ),
    ]
}

fn cmd_categories(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if !args.is_empty() {
        return Err(CommandError::InvalidArguments("usage: categories".into()));
    }

    let mut table = Table::new(vec![TableColumn::left("Category"), TableColumn::left("Kind")]);
    for name in categories::all_categories(&context.book.custom_categories) {
        let builtin = categories::BUILTIN_CATEGORIES
            .iter()
            .any(|known| known.eq_ignore_ascii_case(&name));
        let kind = if builtin { "built-in" } else { "custom" };
        table.push_row(vec![name, kind.to_string()]);
    }
    output::section("Categories");
    output::table(&table.render());
    io::print_info(format!(
        "`{}` is reserved for income entries and is never budgeted.",
        INCOME_CATEGORY
    ));
    Ok(())
}

fn cmd_category(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let name = match args {
        ["add", rest @ ..] if !rest.is_empty() => rest.join(" "),
        _ => {
            return Err(CommandError::InvalidArguments(
                "usage: category add <name>".into(),
            ))
        }
    };

    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CommandError::InvalidArguments(
            "category name cannot be empty".into(),
        ));
    }
    if trimmed.eq_ignore_ascii_case(INCOME_CATEGORY) {
        return Err(CommandError::InvalidArguments(format!(
            "`{}` is reserved for income entries",
            INCOME_CATEGORY
        )));
    }

    let added = context.book.register_categories(&[trimmed.to_string()]);
    if added == 0 {
        io::print_warning(format!("Category `{}` already exists.", trimmed));
        return Ok(());
    }

    context.seed_active_month()?;
    context.persist()?;
    io::print_success(format!("Category `{}` registered.", trimmed));
    Ok(())
}
