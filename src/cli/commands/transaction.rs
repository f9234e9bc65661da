use std::fs;

use crate::categories::{self, INCOME_CATEGORY};
use crate::cli::commands::CommandDefinition;
use crate::cli::core::{
    parse_date_arg, parse_month_arg, parse_positive_amount, short_id, CommandError, CommandResult,
    ShellContext,
};
use crate::cli::io;
use crate::cli::output::{self, section as output_section};
use crate::cli::table::{Table, TableColumn};
use crate::core::services::TransactionService;
use crate::domain::{EntryKind, Transaction, TransactionDraft};

const ADD_USAGE: &str =
    "usage: add expense <date|today> <amount> <category|auto> <description> | add income <date|today> <amount> <description>";

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new("add", "Record an expense or income entry", ADD_USAGE, cmd_add),
        CommandDefinition::new(
            "list",
            "List transactions for a month",
            "list [YYYY-MM|all]",
            cmd_list,
        ),
        CommandDefinition::new(
            "delete",
            "Delete a transaction by id",
            "delete <id>",
            cmd_delete,
        ),
        CommandDefinition::new(
            "import",
            "Import transactions from a CSV statement",
            "import <path>",
            cmd_import,
        ),
    ]
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let kind = match args.first() {
        Some(&"expense") => EntryKind::Expense,
        Some(&"income") => EntryKind::Income,
        _ => return Err(CommandError::InvalidArguments(ADD_USAGE.into())),
    };

    let (date_arg, amount_arg, category_arg, description_args) = match kind {
        EntryKind::Expense => {
            if args.len() < 5 {
                return Err(CommandError::InvalidArguments(ADD_USAGE.into()));
            }
            (args[1], args[2], Some(args[3]), &args[4..])
        }
        EntryKind::Income => {
            if args.len() < 4 {
                return Err(CommandError::InvalidArguments(ADD_USAGE.into()));
            }
            (args[1], args[2], None, &args[3..])
        }
    };

    let date = parse_date_arg(date_arg)?;
    let amount = parse_positive_amount(amount_arg)?;
    let description = description_args.join(" ");
    if description.trim().is_empty() {
        return Err(CommandError::InvalidArguments(ADD_USAGE.into()));
    }

    let category = match (kind, category_arg) {
        (EntryKind::Income, _) => INCOME_CATEGORY.to_string(),
        (EntryKind::Expense, Some(raw)) if raw.eq_ignore_ascii_case("auto") => {
            let candidates = categories::all_categories(&context.book.custom_categories);
            let guess = context.advisor.categorize(&description, &candidates);
            io::print_info(format!("Categorized as `{}`.", guess));
            guess
        }
        (EntryKind::Expense, Some(raw)) => canonical_category(context, raw),
        (EntryKind::Expense, None) => unreachable!("expense arity checked above"),
    };

    let discovered = context.book.register_categories(&[category.clone()]);
    if discovered > 0 {
        io::print_info(format!("New category `{}` registered.", category));
    }

    let draft = TransactionDraft {
        date,
        description,
        amount,
        category,
        kind,
    };
    let id = TransactionService::add(&mut context.book, draft)?;
    if discovered > 0 {
        context.seed_active_month()?;
    }
    context.persist()?;

    let txn = context
        .book
        .transaction(id)
        .cloned()
        .ok_or_else(|| CommandError::Message("transaction vanished after insert".into()))?;
    io::print_success(format!("Transaction saved: {}", summary_line(context, &txn)));
    Ok(())
}

fn cmd_list(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let scope = match args {
        [] => Some(context.current_month),
        [value] if value.eq_ignore_ascii_case("all") => None,
        [value] => Some(parse_month_arg(value)?),
        _ => {
            return Err(CommandError::InvalidArguments(
                "usage: list [YYYY-MM|all]".into(),
            ))
        }
    };

    let mut entries: Vec<&Transaction> = context
        .book
        .transactions
        .iter()
        .filter(|txn| scope.map_or(true, |month| month.contains(txn.date)))
        .collect();
    entries.sort_by(|a, b| b.date.cmp(&a.date));

    let label = scope
        .map(|month| month.to_string())
        .unwrap_or_else(|| "all months".into());
    if entries.is_empty() {
        io::print_info(format!("No transactions recorded for {}.", label));
        return Ok(());
    }

    let mut table = Table::new(vec![
        TableColumn::left("Id"),
        TableColumn::left("Date"),
        TableColumn::left("Kind"),
        TableColumn::left("Category"),
        TableColumn::left("Description"),
        TableColumn::right("Amount"),
    ]);
    for txn in &entries {
        table.push_row(vec![
            short_id(txn.id),
            txn.date.to_string(),
            kind_label(txn.kind).to_string(),
            txn.category.clone(),
            txn.description.clone(),
            context.format_amount(txn.amount),
        ]);
    }
    output_section(format!("Transactions for {}", label));
    output::table(&table.render());
    Ok(())
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [prefix] = args else {
        return Err(CommandError::InvalidArguments("usage: delete <id>".into()));
    };

    let (id, summary) = {
        let txn = context.find_transaction_by_prefix(prefix)?;
        (txn.id, summary_line(context, txn))
    };

    let confirmed = context.confirm_destructive(&format!("Delete transaction {}?", summary))?;
    if !confirmed {
        io::print_info("Operation cancelled.");
        return Ok(());
    }

    if !TransactionService::remove(&mut context.book, id) {
        return Err(CommandError::Message(format!(
            "transaction `{}` no longer exists",
            prefix
        )));
    }
    context.persist()?;
    io::print_success(format!("Transaction removed: {}", summary));
    Ok(())
}

fn cmd_import(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [path] = args else {
        return Err(CommandError::InvalidArguments("usage: import <path>".into()));
    };

    let raw = fs::read_to_string(path).map_err(|err| {
        CommandError::Message(format!("could not read `{}`: {}", path, err))
    })?;

    let candidates = categories::all_categories(&context.book.custom_categories);
    let drafts = context
        .advisor
        .parse_csv(&raw, &candidates)
        .map_err(|err| CommandError::Message(err.to_string()))?;

    let outcome = TransactionService::import(&mut context.book, drafts);
    if !outcome.new_categories.is_empty() {
        context.book.register_categories(&outcome.new_categories);
        io::print_info(format!(
            "Discovered new categories: {}.",
            outcome.new_categories.join(", ")
        ));
        context.seed_active_month()?;
    }
    context.persist()?;

    io::print_success(format!(
        "Imported {} transaction(s), skipped {} duplicate(s).",
        outcome.added_count(),
        outcome.duplicates_skipped
    ));
    Ok(())
}

/// Known categories are folded onto their canonical spelling; anything
/// else is kept as typed and registered as custom.
fn canonical_category(context: &ShellContext, raw: &str) -> String {
    categories::all_categories(&context.book.custom_categories)
        .into_iter()
        .find(|known| known.eq_ignore_ascii_case(raw))
        .unwrap_or_else(|| raw.trim().to_string())
}

fn kind_label(kind: EntryKind) -> &'static str {
    match kind {
        EntryKind::Expense => "expense",
        EntryKind::Income => "income",
    }
}

pub(crate) fn summary_line(context: &ShellContext, txn: &Transaction) -> String {
    format!(
        "{} {} {} ({}) [{}]",
        txn.date,
        txn.category,
        context.format_amount(txn.amount),
        txn.description,
        short_id(txn.id)
    )
}
