//! Business logic helpers for recorded entries and statement imports.

use uuid::Uuid;

use crate::categories;
use crate::core::services::ServiceResult;
use crate::domain::book::BudgetBook;
use crate::domain::transaction::{Transaction, TransactionDraft};

/// Result of admitting a batch of imported drafts.
#[derive(Debug, Default, Clone)]
pub struct ImportOutcome {
    pub added: Vec<Uuid>,
    pub duplicates_skipped: usize,
    /// Category names seen in the batch that were not yet registered.
    pub new_categories: Vec<String>,
}

impl ImportOutcome {
    pub fn added_count(&self) -> usize {
        self.added.len()
    }
}

/// Stateless mutators over the book's transaction list.
pub struct TransactionService;

impl TransactionService {
    /// Records a single entry and returns its identifier. Manual entries
    /// are never checked for duplicates.
    pub fn add(book: &mut BudgetBook, draft: TransactionDraft) -> ServiceResult<Uuid> {
        let id = book.add_transaction(Transaction::new(draft));
        Ok(id)
    }

    /// Removes the entry identified by `id`. Returns false when no such
    /// entry exists, leaving the book untouched.
    pub fn remove(book: &mut BudgetBook, id: Uuid) -> bool {
        book.remove_transaction(id).is_some()
    }

    /// Admits a statement batch, dropping drafts that duplicate an
    /// existing entry or an earlier draft in the same batch. Duplicate
    /// means same date, same amount, same description ignoring case.
    ///
    /// Unknown category names are reported in the outcome; registering
    /// them is the caller's decision.
    pub fn import(book: &mut BudgetBook, incoming: Vec<TransactionDraft>) -> ImportOutcome {
        let mut outcome = ImportOutcome {
            new_categories: categories::discover(
                incoming.iter().map(|draft| draft.category.as_str()),
                &book.custom_categories,
            ),
            ..ImportOutcome::default()
        };

        let mut admitted: Vec<TransactionDraft> = Vec::new();
        for draft in incoming {
            let duplicate = book
                .transactions
                .iter()
                .any(|existing| draft.is_duplicate_of(existing))
                || admitted.iter().any(|earlier| draft.matches_draft(earlier));
            if duplicate {
                outcome.duplicates_skipped += 1;
                continue;
            }
            admitted.push(draft);
        }

        for draft in admitted {
            outcome.added.push(book.add_transaction(Transaction::new(draft)));
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::transaction::EntryKind;
    use chrono::NaiveDate;

    fn draft(day: u32, amount: f64, description: &str) -> TransactionDraft {
        TransactionDraft {
            date: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
            description: description.into(),
            amount,
            category: "Groceries".into(),
            kind: EntryKind::Expense,
        }
    }

    #[test]
    fn remove_is_false_for_unknown_id() {
        let mut book = BudgetBook::new();
        assert!(!TransactionService::remove(&mut book, Uuid::new_v4()));
    }

    #[test]
    fn import_skips_duplicates_of_existing_entries() {
        let mut book = BudgetBook::new();
        TransactionService::add(&mut book, draft(5, 20.0, "Market")).unwrap();

        let outcome =
            TransactionService::import(&mut book, vec![draft(5, 20.0, "MARKET"), draft(6, 20.0, "Market")]);
        assert_eq!(outcome.added_count(), 1);
        assert_eq!(outcome.duplicates_skipped, 1);
        assert_eq!(book.transactions.len(), 2);
    }

    #[test]
    fn import_drops_repeats_within_the_batch() {
        let mut book = BudgetBook::new();
        let outcome = TransactionService::import(
            &mut book,
            vec![draft(7, 9.5, "Coffee"), draft(7, 9.5, "coffee"), draft(7, 9.5, "Coffee")],
        );
        assert_eq!(outcome.added_count(), 1);
        assert_eq!(outcome.duplicates_skipped, 2);
    }

    #[test]
    fn import_reports_unregistered_categories_without_registering() {
        let mut book = BudgetBook::new();
        let mut unknown = draft(8, 12.0, "Vet visit");
        unknown.category = "Pet Care".into();
        let outcome = TransactionService::import(&mut book, vec![unknown]);
        assert_eq!(outcome.new_categories, vec!["Pet Care".to_string()]);
        assert!(book.custom_categories.is_empty());
    }
}
