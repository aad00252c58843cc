use async_trait::async_trait;

use tally_core::{CoreError, GoalAdviceRequest, GoalAdvisor};
use tally_domain::GoalAdvice;

/// Months assumed when a goal has no deadline.
const OPEN_ENDED_MONTHS: f64 = 12.0;

/// Local rule-based advisor used when no remote provider is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeuristicAdvisor;

#[async_trait]
impl GoalAdvisor for HeuristicAdvisor {
    async fn advise(&self, request: &GoalAdviceRequest) -> Result<GoalAdvice, CoreError> {
        let goal = &request.goal;
        let progress = &request.progress;
        if progress.is_complete() {
            return Ok(GoalAdvice {
                summary: format!("{} is fully funded.", goal.name),
                recommendations: vec!["Raise the target or start a new goal.".into()],
                suggested_monthly_contribution: None,
            });
        }

        let mut recommendations = Vec::new();
        let (summary, contribution) = match (progress.required_monthly, goal.deadline) {
            (Some(required), Some(deadline)) => (
                format!(
                    "Save {:.2} per month to reach {} by {}.",
                    required, goal.name, deadline
                ),
                required,
            ),
            _ => {
                let suggested = progress.remaining / OPEN_ENDED_MONTHS;
                recommendations.push("Set a deadline to get a precise monthly target.".into());
                (
                    format!(
                        "Saving {:.2} per month funds {} within a year.",
                        suggested, goal.name
                    ),
                    suggested,
                )
            }
        };

        match request.monthly_net {
            Some(net) if net < contribution => recommendations.push(format!(
                "Last month's net of {:.2} is below the contribution; trim recurring bills or extend the deadline.",
                net
            )),
            Some(_) => recommendations.push("Last month's net covers the contribution.".into()),
            None => {}
        }

        Ok(GoalAdvice {
            summary,
            recommendations,
            suggested_monthly_contribution: Some(contribution),
        })
    }
}
