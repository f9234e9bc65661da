pub mod budget_service;
pub mod goal_service;
pub mod transaction_service;

pub use budget_service::BudgetService;
pub use goal_service::GoalService;
pub use transaction_service::{ImportOutcome, TransactionService};

use crate::errors::BudgetError;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Core(#[from] BudgetError),
    #[error("{0}")]
    Invalid(String),
}
