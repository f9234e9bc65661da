//! Best-effort intelligence: auto-categorization, bank statement
//! parsing, and advisory text.
//!
//! The shell talks to an [`Advisor`] so the built-in heuristics can be
//! swapped for a smarter backend (or a deterministic stub in tests)
//! without touching command code. Advisors are consulted only at the
//! boundary; core services never call one.

mod csv;
mod heuristic;

pub use heuristic::HeuristicAdvisor;

use thiserror::Error;

use crate::domain::budget::MonthlyBudget;
use crate::domain::transaction::{Transaction, TransactionDraft};

/// Statement text beyond this many characters is ignored.
pub const CSV_SCAN_LIMIT: usize = 8_000;

/// Returned by `insights` when there is nothing useful to say.
pub const FALLBACK_INSIGHT: &str =
    "Not enough activity recorded this month to offer advice. Add or import some transactions first.";

#[derive(Debug, Error)]
pub enum AdvisorError {
    #[error("could not read statement: {0}")]
    CsvUnusable(String),
    #[error("advisor unavailable: {0}")]
    Unavailable(String),
}

/// Contract every advisor backend fulfils. All three operations are
/// best-effort: `categorize` and `insights` always produce an answer,
/// only statement parsing may refuse.
pub trait Advisor {
    /// Picks a category for a free-text description. Must return one of
    /// `candidates` or the fallback name, never an invented category.
    fn categorize(&self, description: &str, candidates: &[String]) -> String;

    /// Extracts transaction drafts from raw statement text. Rejects
    /// input it cannot make sense of rather than fabricating entries.
    fn parse_csv(
        &self,
        raw: &str,
        candidates: &[String],
    ) -> Result<Vec<TransactionDraft>, AdvisorError>;

    /// Advisory text for one month of activity. Never fails; returns
    /// [`FALLBACK_INSIGHT`] when there is nothing to work with.
    fn insights(&self, transactions: &[Transaction], budget: Option<&MonthlyBudget>) -> String;
}
