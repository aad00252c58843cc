//! Seam to an external advice provider for savings goals.
//!
//! The provider is opaque: the core only builds the request and relays the
//! structured answer or its failure.

use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::{debug, warn};

use tally_domain::{GoalAdvice, SavingsGoal};

use crate::{CoreError, GoalProgress};

#[derive(Debug, Clone, PartialEq)]
pub struct GoalAdviceRequest {
    pub goal: SavingsGoal,
    pub progress: GoalProgress,
    pub reference: NaiveDate,
    /// Average monthly net over the recent past, when known.
    pub monthly_net: Option<f64>,
}

impl GoalAdviceRequest {
    pub fn new(goal: SavingsGoal, reference: NaiveDate) -> Self {
        let progress = GoalProgress::compute(&goal, reference);
        Self {
            goal,
            progress,
            reference,
            monthly_net: None,
        }
    }

    pub fn with_monthly_net(mut self, monthly_net: f64) -> Self {
        self.monthly_net = Some(monthly_net);
        self
    }
}

#[async_trait]
pub trait GoalAdvisor: Send + Sync {
    async fn advise(&self, request: &GoalAdviceRequest) -> Result<GoalAdvice, CoreError>;
}

/// Asks `advisor` for advice, wrapping provider failures as upstream errors.
pub async fn request_advice<A>(
    advisor: &A,
    request: &GoalAdviceRequest,
) -> Result<GoalAdvice, CoreError>
where
    A: GoalAdvisor + ?Sized,
{
    debug!(goal = %request.goal.name, "requesting goal advice");
    advisor.advise(request).await.map_err(|err| {
        warn!(goal = %request.goal.name, error = %err, "goal advice failed");
        match err {
            CoreError::Upstream(_) => err,
            other => CoreError::Upstream(other.to_string()),
        }
    })
}
