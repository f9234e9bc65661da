pub mod json_backend;

use crate::domain::BudgetBook;
use crate::errors::Result;

/// Abstraction over persistence backends for the budget document.
pub trait StateStore: Send + Sync {
    /// Loads the stored document, or a fresh one when nothing usable
    /// is on disk.
    fn load(&self) -> Result<BudgetBook>;
    fn save(&self, book: &BudgetBook) -> Result<()>;
    fn reset(&self) -> Result<()>;
}

pub use json_backend::JsonStore;
