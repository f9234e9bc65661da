//! Pure view-model computation over book snapshots.
//!
//! Nothing here mutates state or caches results: every function is a
//! plain fold over the book, so callers recompute after each command
//! and always see current numbers.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::categories;
use crate::domain::book::BudgetBook;
use crate::domain::month::MonthKey;

/// Most recent months kept in the trend series.
pub const TREND_WINDOW_MONTHS: usize = 12;

/// One category's reconciled numbers for a month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryRow {
    pub category: String,
    pub planned: f64,
    pub actual: f64,
}

/// Everything the month dashboard shows: totals plus per-category rows.
#[derive(Debug, Clone, Serialize)]
pub struct MonthOverview {
    pub month: MonthKey,
    pub income: f64,
    pub expenses: f64,
    pub balance: f64,
    pub total_planned: f64,
    pub utilization_pct: f64,
    /// Rows with activity or a plan; idle zero-planned categories are
    /// hidden from charts but keep their budget lines.
    pub rows: Vec<CategoryRow>,
}

impl MonthOverview {
    /// Reconciles the month across the registry. A line's
    /// `manual_actual` wins over summed transactions for that category;
    /// the month's expense total uses the same rule per category.
    pub fn compute(book: &BudgetBook, month: MonthKey) -> Self {
        let budget = book.monthly_budget(month);
        let mut rows = Vec::new();
        let mut expenses = 0.0;

        for category in categories::all_categories(&book.custom_categories) {
            let line = budget.and_then(|entry| entry.line(&category));
            let actual = match line.and_then(|line| line.manual_actual) {
                Some(value) => value,
                None => expense_sum_for_category(book, month, &category),
            };
            let planned = line.map(|line| line.planned).unwrap_or(0.0);
            expenses += actual;
            if actual > 0.0 || planned > 0.0 {
                rows.push(CategoryRow {
                    category,
                    planned,
                    actual,
                });
            }
        }

        let income = income_sum(book, month);
        let total_planned = budget.map(|entry| entry.total_planned()).unwrap_or(0.0);
        let utilization_pct = if total_planned > 0.0 {
            (expenses / total_planned) * 100.0
        } else {
            0.0
        };

        Self {
            month,
            income,
            expenses,
            balance: income - expenses,
            total_planned,
            utilization_pct,
            rows,
        }
    }
}

/// Rows with actual spend, for distribution charts.
pub fn spending_distribution(book: &BudgetBook, month: MonthKey) -> Vec<CategoryRow> {
    MonthOverview::compute(book, month)
        .rows
        .into_iter()
        .filter(|row| row.actual > 0.0)
        .collect()
}

/// One month's raw totals in the historical series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub month: MonthKey,
    pub income: f64,
    pub expense: f64,
}

/// Income and expense per observed month, oldest first, clipped to the
/// last [`TREND_WINDOW_MONTHS`]. Historical sums are raw transaction
/// totals; manual overrides only affect the current month view.
pub fn trend_series(book: &BudgetBook) -> Vec<TrendPoint> {
    let mut points: Vec<TrendPoint> = observed_months(book)
        .into_iter()
        .map(|month| TrendPoint {
            month,
            income: income_sum(book, month),
            expense: expense_sum(book, month),
        })
        .collect();
    if points.len() > TREND_WINDOW_MONTHS {
        points = points.split_off(points.len() - TREND_WINDOW_MONTHS);
    }
    points
}

/// One row of the multi-month comparison table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthComparison {
    pub month: MonthKey,
    pub income: f64,
    pub expense: f64,
    pub net: f64,
}

/// Every observed month, newest first, with raw totals and net.
pub fn month_comparison(book: &BudgetBook) -> Vec<MonthComparison> {
    observed_months(book)
        .into_iter()
        .rev()
        .map(|month| {
            let income = income_sum(book, month);
            let expense = expense_sum(book, month);
            MonthComparison {
                month,
                income,
                expense,
                net: income - expense,
            }
        })
        .collect()
}

/// Months appearing in either the ledger or the budget store.
fn observed_months(book: &BudgetBook) -> BTreeSet<MonthKey> {
    let mut months: BTreeSet<MonthKey> = book
        .transactions
        .iter()
        .map(|txn| MonthKey::of(txn.date))
        .collect();
    months.extend(book.budgets.iter().map(|budget| budget.month));
    months
}

fn income_sum(book: &BudgetBook, month: MonthKey) -> f64 {
    book.transactions
        .iter()
        .filter(|txn| txn.kind.is_income() && month.contains(txn.date))
        .map(|txn| txn.amount)
        .sum()
}

fn expense_sum(book: &BudgetBook, month: MonthKey) -> f64 {
    book.transactions
        .iter()
        .filter(|txn| txn.kind.is_expense() && month.contains(txn.date))
        .map(|txn| txn.amount)
        .sum()
}

fn expense_sum_for_category(book: &BudgetBook, month: MonthKey, category: &str) -> f64 {
    book.transactions
        .iter()
        .filter(|txn| {
            txn.kind.is_expense()
                && month.contains(txn.date)
                && txn.category.eq_ignore_ascii_case(category)
        })
        .map(|txn| txn.amount)
        .sum()
}
