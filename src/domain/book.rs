use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::categories;
use crate::domain::budget::MonthlyBudget;
use crate::domain::goal::SavingsGoal;
use crate::domain::month::MonthKey;
use crate::domain::transaction::Transaction;

pub const CURRENT_SCHEMA_VERSION: u8 = 1;

/// Aggregate root holding everything the dashboard persists: recorded
/// entries, per-month budgets, savings goals, and the custom category
/// registry. All mutation goes through methods here or the services so
/// `updated_at` stays honest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetBook {
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub budgets: Vec<MonthlyBudget>,
    #[serde(default)]
    pub goals: Vec<SavingsGoal>,
    /// Categories added beyond the built-in set, in discovery order.
    #[serde(default)]
    pub custom_categories: Vec<String>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
    #[serde(default = "BudgetBook::schema_version_default")]
    pub schema_version: u8,
}

impl BudgetBook {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            transactions: Vec::new(),
            budgets: Vec::new(),
            goals: Vec::new(),
            custom_categories: Vec::new(),
            created_at: now,
            updated_at: now,
            schema_version: CURRENT_SCHEMA_VERSION,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn schema_version_default() -> u8 {
        CURRENT_SCHEMA_VERSION
    }

    pub fn add_transaction(&mut self, transaction: Transaction) -> Uuid {
        let id = transaction.id;
        self.transactions.push(transaction);
        self.touch();
        id
    }

    pub fn remove_transaction(&mut self, id: Uuid) -> Option<Transaction> {
        let index = self.transactions.iter().position(|txn| txn.id == id)?;
        let removed = self.transactions.remove(index);
        self.touch();
        Some(removed)
    }

    pub fn transaction(&self, id: Uuid) -> Option<&Transaction> {
        self.transactions.iter().find(|txn| txn.id == id)
    }

    pub fn monthly_budget(&self, month: MonthKey) -> Option<&MonthlyBudget> {
        self.budgets.iter().find(|budget| budget.month == month)
    }

    pub fn monthly_budget_mut(&mut self, month: MonthKey) -> Option<&mut MonthlyBudget> {
        self.budgets.iter_mut().find(|budget| budget.month == month)
    }

    pub fn goal(&self, id: Uuid) -> Option<&SavingsGoal> {
        self.goals.iter().find(|goal| goal.id == id)
    }

    pub fn goal_mut(&mut self, id: Uuid) -> Option<&mut SavingsGoal> {
        self.goals.iter_mut().find(|goal| goal.id == id)
    }

    /// Appends any names not yet known to the category registry and
    /// returns how many were added. No-op calls leave `updated_at` alone.
    pub fn register_categories(&mut self, names: &[String]) -> usize {
        let mut added = 0;
        for name in names {
            let trimmed = name.trim();
            if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(categories::INCOME_CATEGORY) {
                continue;
            }
            if categories::is_known(trimmed, &self.custom_categories) {
                continue;
            }
            self.custom_categories.push(trimmed.to_string());
            added += 1;
        }
        if added > 0 {
            self.touch();
        }
        added
    }
}

impl Default for BudgetBook {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::transaction::{EntryKind, TransactionDraft};
    use chrono::NaiveDate;

    fn sample_transaction() -> Transaction {
        Transaction::new(TransactionDraft {
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            description: "Rent".into(),
            amount: 1500.0,
            category: "Housing".into(),
            kind: EntryKind::Expense,
        })
    }

    #[test]
    fn remove_returns_the_dropped_entry() {
        let mut book = BudgetBook::new();
        let id = book.add_transaction(sample_transaction());
        let removed = book.remove_transaction(id).expect("entry exists");
        assert_eq!(removed.id, id);
        assert!(book.transaction(id).is_none());
    }

    #[test]
    fn register_categories_skips_known_and_reserved_names() {
        let mut book = BudgetBook::new();
        let added = book.register_categories(&[
            "Groceries".into(),
            "Income".into(),
            "Pet Care".into(),
            "pet care".into(),
            "  ".into(),
        ]);
        assert_eq!(added, 1);
        assert_eq!(book.custom_categories, vec!["Pet Care".to_string()]);
    }

    #[test]
    fn register_categories_noop_keeps_updated_at() {
        let mut book = BudgetBook::new();
        let before = book.updated_at;
        let added = book.register_categories(&["Groceries".into()]);
        assert_eq!(added, 0);
        assert_eq!(book.updated_at, before);
    }

    #[test]
    fn empty_json_object_deserializes_to_defaults() {
        let book: BudgetBook = serde_json::from_str("{}").expect("defaults fill in");
        assert!(book.transactions.is_empty());
        assert!(book.budgets.is_empty());
        assert_eq!(book.schema_version, CURRENT_SCHEMA_VERSION);
    }
}
