//! Totals and groupings over an activity feed for calendar and list views.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;

use tally_domain::{Activity, ActivitySource, TransactionType};

/// Fallback label for activities without a category.
pub const UNCATEGORIZED: &str = "Uncategorized";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActivitySummary {
    pub income: f64,
    pub expense: f64,
    pub net: f64,
    pub transaction_count: usize,
    pub recurring_count: usize,
}

impl ActivitySummary {
    /// Amounts are summed by magnitude; the activity type decides the side.
    pub fn from_activities(activities: &[Activity]) -> Self {
        let mut summary = ActivitySummary::default();
        for activity in activities {
            match activity.activity_type {
                TransactionType::Income => summary.income += activity.amount.abs(),
                TransactionType::Expense => summary.expense += activity.amount.abs(),
            }
            match activity.source {
                ActivitySource::Transaction => summary.transaction_count += 1,
                ActivitySource::RecurringBill => summary.recurring_count += 1,
            }
        }
        summary.net = summary.income - summary.expense;
        summary
    }

    pub fn total_count(&self) -> usize {
        self.transaction_count + self.recurring_count
    }
}

/// Buckets activities per calendar day, preserving feed order inside a day.
pub fn group_by_day(activities: &[Activity]) -> BTreeMap<NaiveDate, Vec<&Activity>> {
    let mut days: BTreeMap<NaiveDate, Vec<&Activity>> = BTreeMap::new();
    for activity in activities {
        days.entry(activity.date).or_default().push(activity);
    }
    days
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
    pub count: usize,
}

/// Expense totals per category, largest first, ties broken by name.
pub fn category_totals(activities: &[Activity]) -> Vec<CategoryTotal> {
    let mut totals: HashMap<&str, (f64, usize)> = HashMap::new();
    for activity in activities
        .iter()
        .filter(|activity| activity.activity_type == TransactionType::Expense)
    {
        let key = activity
            .category
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(UNCATEGORIZED);
        let entry = totals.entry(key).or_insert((0.0, 0));
        entry.0 += activity.amount.abs();
        entry.1 += 1;
    }
    let mut result: Vec<CategoryTotal> = totals
        .into_iter()
        .map(|(category, (total, count))| CategoryTotal {
            category: category.to_string(),
            total,
            count,
        })
        .collect();
    result.sort_by(|a, b| {
        b.total
            .total_cmp(&a.total)
            .then_with(|| a.category.cmp(&b.category))
    });
    result
}
