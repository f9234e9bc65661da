use chrono::NaiveDate;
use zenbudget::{
    advisor::{Advisor, HeuristicAdvisor},
    categories,
    core::services::TransactionService,
    domain::{BudgetBook, EntryKind, Transaction, TransactionDraft},
};

fn advisor_drafts(book: &BudgetBook, raw: &str) -> Vec<TransactionDraft> {
    let advisor = HeuristicAdvisor::new();
    let candidates = categories::all_categories(&book.custom_categories);
    advisor.parse_csv(raw, &candidates).expect("statement parses")
}

#[test]
fn statement_rows_become_categorized_drafts() {
    let book = BudgetBook::new();
    let drafts = advisor_drafts(
        &book,
        "Date,Description,Amount\n\
         2025-03-05,Corner Supermarket,-84.12\n\
         2025-03-06,NETFLIX.COM,-15.99\n\
         2025-03-01,ACME Payroll,2500.00\n",
    );

    assert_eq!(drafts.len(), 3);
    assert_eq!(drafts[0].category, "Groceries");
    assert_eq!(drafts[0].kind, EntryKind::Expense);
    assert_eq!(drafts[1].category, "Subscriptions");
    assert_eq!(drafts[2].category, "Income");
    assert_eq!(drafts[2].kind, EntryKind::Income);
    assert_eq!(drafts[2].amount, 2500.0);
}

#[test]
fn import_is_idempotent_against_existing_entries() {
    let mut book = BudgetBook::new();
    book.add_transaction(Transaction::new(TransactionDraft {
        date: NaiveDate::from_ymd_opt(2025, 3, 5).unwrap(),
        description: "Corner Supermarket".into(),
        amount: 84.12,
        category: "Groceries".into(),
        kind: EntryKind::Expense,
    }));

    let drafts = advisor_drafts(
        &book,
        "Date,Description,Amount\n\
         2025-03-05,CORNER SUPERMARKET,-84.12\n\
         2025-03-06,NETFLIX.COM,-15.99\n",
    );
    let outcome = TransactionService::import(&mut book, drafts);

    assert_eq!(outcome.added_count(), 1);
    assert_eq!(outcome.duplicates_skipped, 1);
    assert_eq!(book.transactions.len(), 2);
}

#[test]
fn unknown_statement_categories_are_reported_for_registration() {
    let mut book = BudgetBook::new();
    let drafts = advisor_drafts(
        &book,
        "Date,Description,Amount,Category\n\
         2025-03-05,Vet visit,-120.00,Pet Care\n\
         2025-03-12,Chew toys,-18.00,pet care\n",
    );
    let outcome = TransactionService::import(&mut book, drafts);

    assert_eq!(outcome.added_count(), 2);
    assert_eq!(outcome.new_categories, vec!["Pet Care".to_string()]);
    assert!(
        book.custom_categories.is_empty(),
        "import reports discoveries without registering them"
    );

    book.register_categories(&outcome.new_categories);
    assert_eq!(book.custom_categories, vec!["Pet Care".to_string()]);
}

#[test]
fn split_debit_credit_statements_parse_end_to_end() {
    let mut book = BudgetBook::new();
    let drafts = advisor_drafts(
        &book,
        "Date,Description,Debit,Credit\n\
         2025-03-03,Corner Supermarket,84.12,\n\
         2025-03-04,Refund from store,,25.00\n",
    );
    let outcome = TransactionService::import(&mut book, drafts);

    assert_eq!(outcome.added_count(), 2);
    let debit = &book.transactions[0];
    assert_eq!(debit.kind, EntryKind::Expense);
    assert_eq!(debit.amount, 84.12);
    let credit = &book.transactions[1];
    assert_eq!(credit.kind, EntryKind::Income);
    assert_eq!(credit.amount, 25.0);
}
