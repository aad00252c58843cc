//! tally-core
//!
//! Recurrence expansion, activity aggregation, period resolution and the
//! services built on them. Depends on tally-domain. No CLI, no terminal I/O,
//! no direct storage interactions.

pub mod activity;
pub mod advisor;
pub mod cache;
pub mod error;
pub mod goal;
pub mod period;
pub mod planning;
pub mod recurrence;
pub mod sources;
pub mod summary;
pub mod time;

pub use activity::{ActivityAggregator, ActivityFeed, FeedSource, SourceFailure};
pub use advisor::{request_advice, GoalAdviceRequest, GoalAdvisor};
pub use cache::{CachedSource, MemoryQueryCache, QueryCache, QueryKey, QueryResult};
pub use error::CoreError;
pub use goal::GoalProgress;
pub use period::{PeriodFilterResolver, ResolvedPeriod};
pub use planning::{
    PlanningGenerator, DEFAULT_PLANNING_HORIZON_MONTHS, MAX_PLANNING_HORIZON_MONTHS,
};
pub use recurrence::{Occurrence, RecurrenceExpander};
pub use sources::{RecurringBillSource, TransactionSource};
pub use summary::{category_totals, group_by_day, ActivitySummary, CategoryTotal};
pub use time::Clock;
