use chrono::NaiveDate;
use zenbudget::{
    categories::PlannedDefaults,
    core::services::BudgetService,
    domain::{BudgetBook, EntryKind, MonthKey, Transaction, TransactionDraft},
    report::{self, MonthOverview},
};

fn month(raw: &str) -> MonthKey {
    raw.parse().expect("test month")
}

fn record(book: &mut BudgetBook, date: (i32, u32, u32), amount: f64, category: &str, kind: EntryKind) {
    book.add_transaction(Transaction::new(TransactionDraft {
        date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
        description: format!("{category} entry"),
        amount,
        category: category.into(),
        kind,
    }));
}

#[test]
fn overview_reconciles_plans_overrides_and_activity() {
    let mut book = BudgetBook::new();
    let defaults = PlannedDefaults::default();
    BudgetService::ensure_month(&mut book, month("2025-02"), &defaults);

    record(&mut book, (2025, 2, 1), 3200.0, "Income", EntryKind::Income);
    record(&mut book, (2025, 2, 4), 180.0, "Groceries", EntryKind::Expense);
    record(&mut book, (2025, 2, 11), 95.0, "Groceries", EntryKind::Expense);
    record(&mut book, (2025, 2, 15), 60.0, "Dining Out", EntryKind::Expense);

    // Reconcile utilities by hand; no transactions recorded for it.
    BudgetService::update_line(&mut book, month("2025-02"), "Utilities", 250.0, Some(233.25));

    let overview = MonthOverview::compute(&book, month("2025-02"));
    assert_eq!(overview.income, 3200.0);
    assert_eq!(overview.expenses, 180.0 + 95.0 + 60.0 + 233.25);
    assert_eq!(overview.balance, overview.income - overview.expenses);

    let groceries = overview
        .rows
        .iter()
        .find(|row| row.category == "Groceries")
        .expect("groceries row");
    assert_eq!(groceries.actual, 275.0);

    let utilities = overview
        .rows
        .iter()
        .find(|row| row.category == "Utilities")
        .expect("utilities row");
    assert_eq!(utilities.actual, 233.25);
}

#[test]
fn registering_a_category_backfills_open_months() {
    let mut book = BudgetBook::new();
    let defaults = PlannedDefaults::default();
    BudgetService::ensure_month(&mut book, month("2025-02"), &defaults);
    BudgetService::update_line(&mut book, month("2025-02"), "Groceries", 900.0, None);

    book.register_categories(&["Pet Care".into()]);
    assert!(BudgetService::ensure_month(&mut book, month("2025-02"), &defaults));

    let budget = book.monthly_budget(month("2025-02")).unwrap();
    assert_eq!(budget.line("Pet Care").map(|l| l.planned), Some(0.0));
    assert_eq!(
        budget.line("Groceries").map(|l| l.planned),
        Some(900.0),
        "backfill must not touch edited lines"
    );
}

#[test]
fn trend_and_comparison_agree_on_raw_totals() {
    let mut book = BudgetBook::new();
    record(&mut book, (2025, 1, 5), 3000.0, "Income", EntryKind::Income);
    record(&mut book, (2025, 1, 9), 400.0, "Groceries", EntryKind::Expense);
    record(&mut book, (2025, 2, 5), 3000.0, "Income", EntryKind::Income);
    record(&mut book, (2025, 2, 9), 520.0, "Groceries", EntryKind::Expense);

    // Overrides affect the month view only, never historical series.
    BudgetService::ensure_month(&mut book, month("2025-02"), &PlannedDefaults::default());
    BudgetService::update_line(&mut book, month("2025-02"), "Groceries", 600.0, Some(100.0));

    let series = report::trend_series(&book);
    assert_eq!(series.len(), 2);
    assert_eq!(series[0].month, month("2025-01"));
    assert_eq!(series[1].expense, 520.0);

    let comparison = report::month_comparison(&book);
    assert_eq!(comparison[0].month, month("2025-02"));
    assert_eq!(comparison[0].net, 3000.0 - 520.0);
    assert_eq!(comparison[1].month, month("2025-01"));
    assert_eq!(comparison[1].net, 3000.0 - 400.0);
}

#[test]
fn trend_window_caps_the_series_length() {
    let mut book = BudgetBook::new();
    for offset in 0..15u32 {
        let year = 2024 + (offset / 12) as i32;
        let month_number = (offset % 12) + 1;
        record(
            &mut book,
            (year, month_number, 10),
            50.0,
            "Groceries",
            EntryKind::Expense,
        );
    }

    let series = report::trend_series(&book);
    assert_eq!(series.len(), report::TREND_WINDOW_MONTHS);
    assert_eq!(
        series.first().map(|point| point.month),
        Some(month("2024-04")),
        "oldest months fall off the window"
    );
    assert_eq!(series.last().map(|point| point.month), Some(month("2025-03")));
}
