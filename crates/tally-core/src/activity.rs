//! Merges ledger transactions and expanded recurring occurrences into one feed.

use std::fmt;

use futures::join;
use tracing::{info, warn};

use tally_domain::{
    Activity, ActivityId, ActivitySource, DateRange, RecurringBillDefinition, Transaction,
    TransactionType, UserContext,
};

use crate::{
    recurrence::{Occurrence, RecurrenceExpander},
    sources::{RecurringBillSource, TransactionSource},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Which upstream fetch a failure belongs to.
pub enum FeedSource {
    Transactions,
    RecurringBills,
}

impl fmt::Display for FeedSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FeedSource::Transactions => "transactions",
            FeedSource::RecurringBills => "recurring bills",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Non-fatal fetch failure reported alongside a partially populated feed.
pub struct SourceFailure {
    pub source: FeedSource,
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct ActivityFeed {
    pub window: Option<DateRange>,
    pub activities: Vec<Activity>,
    pub failures: Vec<SourceFailure>,
}

impl ActivityFeed {
    pub fn is_degraded(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Builds the unified activity list used by the organizer views.
pub struct ActivityAggregator;

impl ActivityAggregator {
    /// Merges `transactions` (already limited to `window`) with every occurrence
    /// of `definitions` inside `window`.
    ///
    /// The result is sorted by date. On the same day transactions come before
    /// recurring occurrences, and entries from the same source keep their input
    /// order.
    pub fn aggregate(
        window: DateRange,
        transactions: &[Transaction],
        definitions: &[RecurringBillDefinition],
    ) -> Vec<Activity> {
        let mut activities: Vec<Activity> = transactions.iter().map(Activity::from).collect();
        for definition in definitions {
            activities.extend(
                RecurrenceExpander::expand(definition, window)
                    .into_iter()
                    .map(|occurrence| occurrence_activity(definition, occurrence)),
            );
        }
        activities.sort_by_key(|activity| (activity.date, activity.source));
        activities
    }

    /// Fetches both inputs concurrently and aggregates them.
    ///
    /// A failed fetch contributes no activities and is recorded in
    /// [`ActivityFeed::failures`]; the other source is still merged.
    pub async fn collect<T, R>(
        context: &UserContext,
        window: DateRange,
        transactions: &T,
        bills: &R,
    ) -> ActivityFeed
    where
        T: TransactionSource + ?Sized,
        R: RecurringBillSource + ?Sized,
    {
        let (txn_result, bill_result) = join!(
            transactions.transactions_in_range(context, window),
            bills.active_recurring_bills(context)
        );

        let mut failures = Vec::new();
        let fetched_transactions = txn_result.unwrap_or_else(|err| {
            warn!(user = %context.user_id, error = %err, "transaction fetch failed");
            failures.push(SourceFailure {
                source: FeedSource::Transactions,
                message: err.to_string(),
            });
            Vec::new()
        });
        let fetched_bills = bill_result.unwrap_or_else(|err| {
            warn!(user = %context.user_id, error = %err, "recurring bill fetch failed");
            failures.push(SourceFailure {
                source: FeedSource::RecurringBills,
                message: err.to_string(),
            });
            Vec::new()
        });

        let activities = Self::aggregate(window, &fetched_transactions, &fetched_bills);
        info!(
            user = %context.user_id,
            window = %window,
            activities = activities.len(),
            failures = failures.len(),
            "aggregated activity feed"
        );
        ActivityFeed {
            window: Some(window),
            activities,
            failures,
        }
    }
}

fn occurrence_activity(definition: &RecurringBillDefinition, occurrence: Occurrence) -> Activity {
    Activity {
        id: ActivityId::Occurrence {
            definition_id: definition.id,
            date: occurrence.date,
        },
        description: occurrence.describe(definition),
        amount: definition.amount,
        date: occurrence.date,
        category: definition.category.clone(),
        activity_type: TransactionType::Expense,
        source: ActivitySource::RecurringBill,
        status: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tally_domain::RecurrenceType;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn occurrences_are_expenses_without_status() {
        let window = DateRange::new(date(2024, 6, 1), date(2024, 6, 30)).unwrap();
        let bill = RecurringBillDefinition::new(
            "Rent",
            1200.0,
            date(2024, 1, 1),
            RecurrenceType::Monthly,
        )
        .with_category("Housing");
        let feed = ActivityAggregator::aggregate(window, &[], &[bill.clone()]);
        assert_eq!(feed.len(), 1);
        let activity = &feed[0];
        assert_eq!(activity.activity_type, TransactionType::Expense);
        assert_eq!(activity.source, ActivitySource::RecurringBill);
        assert!(activity.status.is_none());
        assert_eq!(activity.category.as_deref(), Some("Housing"));
        assert_eq!(
            activity.id,
            ActivityId::Occurrence {
                definition_id: bill.id,
                date: date(2024, 6, 1)
            }
        );
    }

    #[test]
    fn same_day_transactions_precede_occurrences() {
        let window = DateRange::new(date(2024, 6, 1), date(2024, 6, 30)).unwrap();
        let bill =
            RecurringBillDefinition::new("Rent", 1200.0, date(2024, 6, 1), RecurrenceType::Monthly);
        let txn = Transaction::new("Groceries", 54.2, TransactionType::Expense, date(2024, 6, 1));
        let feed = ActivityAggregator::aggregate(window, &[txn], &[bill]);
        assert_eq!(feed[0].source, ActivitySource::Transaction);
        assert_eq!(feed[1].source, ActivitySource::RecurringBill);
    }
}
