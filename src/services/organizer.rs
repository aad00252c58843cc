//! Facade wiring the data sources, query cache, clock and advisor into the
//! operations the shell exposes.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, instrument};

use tally_core::{
    category_totals, group_by_day, request_advice, ActivityAggregator, ActivityFeed,
    ActivitySummary, CachedSource, CategoryTotal, Clock, GoalAdviceRequest, GoalAdvisor,
    GoalProgress, MemoryQueryCache, Occurrence, PeriodFilterResolver, PlanningGenerator,
    RecurrenceExpander, RecurringBillSource, ResolvedPeriod, SourceFailure, TransactionSource,
    DEFAULT_PLANNING_HORIZON_MONTHS,
};
use tally_domain::{
    Activity, CustomRange, DateRange, GoalAdvice, MonthSelection, PeriodSelector, PlannedEntry,
    RecurringBillDefinition, SavingsGoal, Transaction, UserContext,
};

use crate::errors::{Result, TallyError};
use crate::services::advisor::HeuristicAdvisor;

/// Activity feed for one resolved period plus its totals.
#[derive(Debug, Clone)]
pub struct PeriodActivity {
    pub period: ResolvedPeriod,
    pub feed: ActivityFeed,
    pub summary: ActivitySummary,
}

#[derive(Debug, Clone)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub activities: Vec<Activity>,
    pub summary: ActivitySummary,
}

/// Day-by-day breakdown of a period. Days without activity are included.
#[derive(Debug, Clone)]
pub struct CalendarView {
    pub period: ResolvedPeriod,
    pub days: Vec<CalendarDay>,
    pub summary: ActivitySummary,
    pub categories: Vec<CategoryTotal>,
    pub failures: Vec<SourceFailure>,
}

#[derive(Debug, Clone)]
pub struct BillSchedule {
    pub bill: RecurringBillDefinition,
    pub next: Option<Occurrence>,
}

pub struct OrganizerService<S> {
    source: CachedSource<S, MemoryQueryCache>,
    context: UserContext,
    clock: Arc<dyn Clock>,
    advisor: Arc<dyn GoalAdvisor>,
}

impl<S> OrganizerService<S>
where
    S: TransactionSource + RecurringBillSource,
{
    pub fn new(store: S, context: UserContext, clock: Arc<dyn Clock>) -> Self {
        Self {
            source: CachedSource::new(store, MemoryQueryCache::new()),
            context,
            clock,
            advisor: Arc::new(HeuristicAdvisor),
        }
    }

    pub fn with_advisor(mut self, advisor: Arc<dyn GoalAdvisor>) -> Self {
        self.advisor = advisor;
        self
    }

    /// Same service over a different store, with an empty cache.
    pub fn rebind(&self, store: S) -> Self {
        Self {
            source: CachedSource::new(store, MemoryQueryCache::new()),
            context: self.context,
            clock: Arc::clone(&self.clock),
            advisor: Arc::clone(&self.advisor),
        }
    }

    /// Underlying store, for writes. Call [`Self::invalidate`] afterwards.
    pub fn store(&self) -> &S {
        self.source.inner()
    }

    pub fn context(&self) -> UserContext {
        self.context
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Drops cached reads for the active user.
    pub fn invalidate(&self) {
        self.source.invalidate_user(&self.context);
    }

    pub fn resolve_period(
        &self,
        selector: PeriodSelector,
        custom: Option<CustomRange>,
        month: Option<MonthSelection>,
    ) -> Result<ResolvedPeriod> {
        Ok(PeriodFilterResolver::resolve(
            selector,
            self.today(),
            custom,
            month,
        )?)
    }

    pub async fn activity_for(&self, period: ResolvedPeriod) -> PeriodActivity {
        let feed = ActivityAggregator::collect(
            &self.context,
            period.range,
            &self.source,
            &self.source,
        )
        .await;
        let summary = ActivitySummary::from_activities(&feed.activities);
        PeriodActivity {
            period,
            feed,
            summary,
        }
    }

    #[instrument(skip(self, custom, month))]
    pub async fn activity_for_period(
        &self,
        selector: PeriodSelector,
        custom: Option<CustomRange>,
        month: Option<MonthSelection>,
    ) -> Result<PeriodActivity> {
        let period = self.resolve_period(selector, custom, month)?;
        Ok(self.activity_for(period).await)
    }

    pub async fn calendar_for_period(
        &self,
        selector: PeriodSelector,
        custom: Option<CustomRange>,
        month: Option<MonthSelection>,
    ) -> Result<CalendarView> {
        let PeriodActivity {
            period,
            feed,
            summary,
        } = self.activity_for_period(selector, custom, month).await?;
        let grouped = group_by_day(&feed.activities);
        let days = period
            .range
            .days()
            .map(|date| {
                let activities: Vec<Activity> = grouped
                    .get(&date)
                    .map(|entries| entries.iter().map(|activity| (*activity).clone()).collect())
                    .unwrap_or_default();
                let summary = ActivitySummary::from_activities(&activities);
                CalendarDay {
                    date,
                    activities,
                    summary,
                }
            })
            .collect();
        let categories = category_totals(&feed.activities);
        Ok(CalendarView {
            period,
            days,
            summary,
            categories,
            failures: feed.failures,
        })
    }

    /// Every definition with its next occurrence from today.
    pub async fn recurring_bills(&self) -> Result<Vec<BillSchedule>> {
        let today = self.today();
        let bills = self.source.active_recurring_bills(&self.context).await?;
        Ok(bills
            .into_iter()
            .map(|bill| {
                let next = RecurrenceExpander::next_occurrence(&bill, today);
                BillSchedule { bill, next }
            })
            .collect())
    }

    /// Looks a definition up by full id or unique id prefix.
    pub async fn find_bill(&self, id_prefix: &str) -> Result<RecurringBillDefinition> {
        let bills = self.source.active_recurring_bills(&self.context).await?;
        find_by_prefix(bills, id_prefix)
    }

    /// Finds a definition by id or unique id prefix and expands it over `range`.
    pub async fn expand_bill(
        &self,
        id_prefix: &str,
        range: DateRange,
    ) -> Result<(RecurringBillDefinition, Vec<Occurrence>)> {
        let bill = self.find_bill(id_prefix).await?;
        let occurrences = RecurrenceExpander::expand(&bill, range);
        debug!(bill = %bill.id, occurrences = occurrences.len(), "expanded bill on request");
        Ok((bill, occurrences))
    }

    pub fn plan_entries(
        &self,
        entry: &PlannedEntry,
        horizon_months: Option<u32>,
    ) -> Result<Vec<Transaction>> {
        let horizon = horizon_months.unwrap_or(DEFAULT_PLANNING_HORIZON_MONTHS);
        Ok(PlanningGenerator::generate(entry, horizon)?)
    }

    pub fn goal_progress(&self, goal: &SavingsGoal) -> GoalProgress {
        GoalProgress::compute(goal, self.today())
    }

    /// Asks the configured advisor, passing last month's net when it is known.
    pub async fn goal_advice(&self, goal: SavingsGoal) -> Result<GoalAdvice> {
        let today = self.today();
        let mut request = GoalAdviceRequest::new(goal, today);
        let last_month =
            PeriodFilterResolver::resolve(PeriodSelector::LastMonth, today, None, None)?;
        let activity = self.activity_for(last_month).await;
        if !activity.feed.is_degraded() {
            request = request.with_monthly_net(activity.summary.net);
        }
        Ok(request_advice(self.advisor.as_ref(), &request).await?)
    }
}

fn find_by_prefix(
    bills: Vec<RecurringBillDefinition>,
    prefix: &str,
) -> Result<RecurringBillDefinition> {
    let needle = prefix.trim().to_ascii_lowercase();
    if needle.is_empty() {
        return Err(TallyError::InvalidInput("bill id cannot be empty".into()));
    }
    let mut matches: Vec<RecurringBillDefinition> = bills
        .into_iter()
        .filter(|bill| {
            bill.id.to_string().starts_with(&needle)
                || bill.id.simple().to_string().starts_with(&needle)
        })
        .collect();
    match matches.len() {
        0 => Err(TallyError::NotFound(format!("recurring bill `{}`", prefix))),
        1 => Ok(matches.remove(0)),
        count => Err(TallyError::InvalidInput(format!(
            "id prefix `{}` matches {} bills; use more characters",
            prefix, count
        ))),
    }
}
