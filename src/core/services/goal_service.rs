//! Savings goal management.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::core::services::{ServiceError, ServiceResult};
use crate::domain::book::BudgetBook;
use crate::domain::goal::SavingsGoal;

/// Stateless mutators over the book's savings goals.
pub struct GoalService;

impl GoalService {
    /// Creates a goal and returns its identifier. Targets must be
    /// positive; progress starts at zero.
    pub fn add(
        book: &mut BudgetBook,
        name: &str,
        target: f64,
        deadline: Option<NaiveDate>,
    ) -> ServiceResult<Uuid> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ServiceError::Invalid("goal name cannot be empty".into()));
        }
        if target <= 0.0 {
            return Err(ServiceError::Invalid(
                "goal target must be greater than zero".into(),
            ));
        }
        let goal = SavingsGoal::new(name, target, deadline);
        let id = goal.id;
        book.goals.push(goal);
        book.touch();
        Ok(id)
    }

    /// Applies a signed delta to the goal's saved amount. Negative
    /// deltas model withdrawals; the running total may exceed the
    /// target or drop below zero, display layers decide how to render
    /// that. Returns false for an unknown goal.
    pub fn record_progress(book: &mut BudgetBook, id: Uuid, delta: f64) -> bool {
        let Some(goal) = book.goal_mut(id) else {
            return false;
        };
        goal.current += delta;
        book.touch();
        true
    }

    /// Removes the goal, returning false when it does not exist.
    pub fn remove(book: &mut BudgetBook, id: Uuid) -> bool {
        let Some(index) = book.goals.iter().position(|goal| goal.id == id) else {
            return false;
        };
        book.goals.remove(index);
        book.touch();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_rejects_non_positive_targets() {
        let mut book = BudgetBook::new();
        for target in [0.0, -50.0] {
            let err = GoalService::add(&mut book, "Trip", target, None)
                .expect_err("target must be positive");
            assert!(matches!(err, ServiceError::Invalid(_)));
        }
        assert!(book.goals.is_empty());
    }

    #[test]
    fn progress_accumulates_and_allows_withdrawals() {
        let mut book = BudgetBook::new();
        let id = GoalService::add(&mut book, "New laptop", 1200.0, None).unwrap();

        assert!(GoalService::record_progress(&mut book, id, 400.0));
        assert!(GoalService::record_progress(&mut book, id, -150.0));
        assert_eq!(book.goal(id).map(|goal| goal.current), Some(250.0));
    }

    #[test]
    fn progress_on_unknown_goal_is_a_noop() {
        let mut book = BudgetBook::new();
        let stamp = book.updated_at;
        assert!(!GoalService::record_progress(&mut book, Uuid::new_v4(), 10.0));
        assert_eq!(book.updated_at, stamp);
    }

    #[test]
    fn remove_drops_the_goal() {
        let mut book = BudgetBook::new();
        let id = GoalService::add(&mut book, "Trip", 800.0, None).unwrap();
        assert!(GoalService::remove(&mut book, id));
        assert!(book.goal(id).is_none());
        assert!(!GoalService::remove(&mut book, id));
    }
}
