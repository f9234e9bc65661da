//! Month lifecycle helpers: seeding budget lines and editing them.

use crate::categories::{self, PlannedDefaults};
use crate::domain::book::BudgetBook;
use crate::domain::budget::{BudgetLine, MonthlyBudget};
use crate::domain::month::MonthKey;

/// Stateless mutators over the book's monthly budgets.
pub struct BudgetService;

impl BudgetService {
    /// Guarantees the month has a budget covering every registered
    /// category. Creates the month when absent, backfills lines for
    /// categories registered since, and never rewrites existing lines.
    ///
    /// Returns true when anything changed; a fully covered month is
    /// left byte-for-byte as it was.
    pub fn ensure_month(book: &mut BudgetBook, month: MonthKey, defaults: &PlannedDefaults) -> bool {
        let registry = categories::all_categories(&book.custom_categories);

        let index = match book.budgets.iter().position(|entry| entry.month == month) {
            Some(index) => index,
            None => {
                let mut budget = MonthlyBudget::new(month);
                budget.lines = registry
                    .iter()
                    .map(|category| BudgetLine::new(category, defaults.for_category(category)))
                    .collect();
                book.budgets.push(budget);
                book.budgets.sort_by_key(|entry| entry.month);
                book.touch();
                return true;
            }
        };

        let missing: Vec<String> = registry
            .into_iter()
            .filter(|category| book.budgets[index].line(category).is_none())
            .collect();
        if missing.is_empty() {
            return false;
        }

        for category in missing {
            let planned = defaults.for_category(&category);
            book.budgets[index].lines.push(BudgetLine::new(category, planned));
        }
        book.touch();
        true
    }

    /// Upserts the line for `category` in an existing month. `planned`
    /// always overwrites; `manual_actual` replaces the reconciled
    /// override, with `None` clearing it.
    ///
    /// Returns false without touching the book when the month has no
    /// budget yet.
    pub fn update_line(
        book: &mut BudgetBook,
        month: MonthKey,
        category: &str,
        planned: f64,
        manual_actual: Option<f64>,
    ) -> bool {
        let Some(budget) = book.monthly_budget_mut(month) else {
            return false;
        };
        match budget.line_mut(category) {
            Some(line) => {
                line.planned = planned;
                line.manual_actual = manual_actual;
            }
            None => {
                let mut line = BudgetLine::new(category, planned);
                line.manual_actual = manual_actual;
                budget.lines.push(line);
            }
        }
        book.touch();
        true
    }
}
