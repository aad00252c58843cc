use chrono::NaiveDate;

use tally_domain::SavingsGoal;

use crate::time::months_between;

#[derive(Debug, Clone, PartialEq)]
/// Derived progress of a savings goal at a reference date.
pub struct GoalProgress {
    pub remaining: f64,
    /// Saved share of the target, clamped to `0.0..=1.0`.
    pub ratio: f64,
    /// Calendar months until the deadline, `None` without a deadline.
    pub months_left: Option<i64>,
    /// Contribution per month needed to hit the deadline, `None` once met.
    pub required_monthly: Option<f64>,
}

impl GoalProgress {
    pub fn compute(goal: &SavingsGoal, reference: NaiveDate) -> Self {
        let remaining = (goal.target_amount - goal.current_amount).max(0.0);
        let ratio = if goal.target_amount > 0.0 {
            (goal.current_amount / goal.target_amount).clamp(0.0, 1.0)
        } else {
            1.0
        };
        let months_left = goal
            .deadline
            .map(|deadline| months_between(reference, deadline).max(0));
        // A deadline in the current month still leaves one month to save.
        let required_monthly = months_left
            .filter(|_| remaining > 0.0)
            .map(|months| remaining / months.max(1) as f64);
        Self {
            remaining,
            ratio,
            months_left,
            required_monthly,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.remaining == 0.0
    }

    pub fn percent(&self) -> f64 {
        self.ratio * 100.0
    }
}
