use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Direction of a ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Expense,
    Income,
}

impl EntryKind {
    pub fn is_expense(&self) -> bool {
        matches!(self, EntryKind::Expense)
    }

    pub fn is_income(&self) -> bool {
        matches!(self, EntryKind::Income)
    }
}

/// A single recorded expense or income entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    pub date: NaiveDate,
    pub description: String,
    /// Positive magnitude; direction comes from `kind`.
    pub amount: f64,
    pub category: String,
    pub kind: EntryKind,
}

impl Transaction {
    pub fn new(draft: TransactionDraft) -> Self {
        Self {
            id: Uuid::new_v4(),
            date: draft.date,
            description: draft.description,
            amount: draft.amount,
            category: draft.category,
            kind: draft.kind,
        }
    }
}

/// Entry candidate that has not been admitted to the book yet.
///
/// Drafts come from manual entry or statement imports; they gain an
/// identifier only once accepted.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionDraft {
    pub date: NaiveDate,
    pub description: String,
    pub amount: f64,
    pub category: String,
    pub kind: EntryKind,
}

impl TransactionDraft {
    /// Duplicate test used by statement imports: same date, same amount,
    /// same description ignoring ASCII case.
    pub fn is_duplicate_of(&self, existing: &Transaction) -> bool {
        self.date == existing.date
            && (self.amount - existing.amount).abs() < f64::EPSILON
            && self
                .description
                .eq_ignore_ascii_case(&existing.description)
    }

    pub(crate) fn matches_draft(&self, other: &TransactionDraft) -> bool {
        self.date == other.date
            && (self.amount - other.amount).abs() < f64::EPSILON
            && self.description.eq_ignore_ascii_case(&other.description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(date: (i32, u32, u32), amount: f64, description: &str) -> TransactionDraft {
        TransactionDraft {
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            description: description.into(),
            amount,
            category: "Groceries".into(),
            kind: EntryKind::Expense,
        }
    }

    #[test]
    fn duplicate_check_ignores_description_case() {
        let existing = Transaction::new(draft((2024, 5, 3), 42.5, "Corner Market"));
        let incoming = draft((2024, 5, 3), 42.5, "CORNER MARKET");
        assert!(incoming.is_duplicate_of(&existing));
    }

    #[test]
    fn duplicate_check_requires_matching_date_and_amount() {
        let existing = Transaction::new(draft((2024, 5, 3), 42.5, "Corner Market"));
        assert!(!draft((2024, 5, 4), 42.5, "Corner Market").is_duplicate_of(&existing));
        assert!(!draft((2024, 5, 3), 42.51, "Corner Market").is_duplicate_of(&existing));
    }

    #[test]
    fn kind_survives_json_roundtrip_lowercase() {
        let txn = Transaction::new(draft((2024, 1, 15), 10.0, "Coffee"));
        let json = serde_json::to_string(&txn).unwrap();
        assert!(json.contains("\"kind\":\"expense\""));
        let back: Transaction = serde_json::from_str(&json).unwrap();
        assert!(back.kind.is_expense());
    }
}
