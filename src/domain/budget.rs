use serde::{Deserialize, Serialize};

use crate::domain::month::MonthKey;

/// Planned spend for one category within a month.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetLine {
    pub category: String,
    pub planned: f64,
    /// Reconciled actual entered by hand. When present it wins over the
    /// sum of recorded transactions for the category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manual_actual: Option<f64>,
}

impl BudgetLine {
    pub fn new(category: impl Into<String>, planned: f64) -> Self {
        Self {
            category: category.into(),
            planned,
            manual_actual: None,
        }
    }
}

/// Budget plan for a single calendar month.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyBudget {
    pub month: MonthKey,
    #[serde(default)]
    pub lines: Vec<BudgetLine>,
}

impl MonthlyBudget {
    pub fn new(month: MonthKey) -> Self {
        Self {
            month,
            lines: Vec::new(),
        }
    }

    pub fn line(&self, category: &str) -> Option<&BudgetLine> {
        self.lines
            .iter()
            .find(|line| line.category.eq_ignore_ascii_case(category))
    }

    pub fn line_mut(&mut self, category: &str) -> Option<&mut BudgetLine> {
        self.lines
            .iter_mut()
            .find(|line| line.category.eq_ignore_ascii_case(category))
    }

    pub fn total_planned(&self) -> f64 {
        self.lines.iter().map(|line| line.planned).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_lookup_is_case_insensitive() {
        let mut budget = MonthlyBudget::new("2024-04".parse().unwrap());
        budget.lines.push(BudgetLine::new("Groceries", 600.0));
        assert!(budget.line("groceries").is_some());
        assert!(budget.line("Dining Out").is_none());
    }

    #[test]
    fn absent_manual_actual_is_omitted_from_json() {
        let line = BudgetLine::new("Utilities", 250.0);
        let json = serde_json::to_string(&line).unwrap();
        assert!(!json.contains("manual_actual"));
    }
}
