pub mod book;
pub mod budget;
pub mod goal;
pub mod month;
pub mod transaction;

pub use book::{BudgetBook, CURRENT_SCHEMA_VERSION};
pub use budget::{BudgetLine, MonthlyBudget};
pub use goal::SavingsGoal;
pub use month::MonthKey;
pub use transaction::{EntryKind, Transaction, TransactionDraft};
