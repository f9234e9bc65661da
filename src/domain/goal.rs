use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A savings target tracked independently of monthly budgets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavingsGoal {
    pub id: Uuid,
    pub name: String,
    pub target: f64,
    #[serde(default)]
    pub current: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,
}

impl SavingsGoal {
    pub fn new(name: impl Into<String>, target: f64, deadline: Option<NaiveDate>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            target,
            current: 0.0,
            deadline,
        }
    }

    /// Progress as a percentage of the target, capped at 100.
    pub fn percent_complete(&self) -> f64 {
        if self.target <= 0.0 {
            return 0.0;
        }
        ((self.current / self.target) * 100.0).min(100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_complete_caps_at_one_hundred() {
        let mut goal = SavingsGoal::new("Emergency fund", 1000.0, None);
        goal.current = 1500.0;
        assert_eq!(goal.percent_complete(), 100.0);
    }

    #[test]
    fn zero_target_reports_zero_progress() {
        let goal = SavingsGoal::new("Unset", 0.0, None);
        assert_eq!(goal.percent_complete(), 0.0);
    }
}
