//! Unified, presentation-ready activity records for the organizer calendar.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::transaction::{Transaction, TransactionType};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
/// Where an activity originated. Ordering places transactions first.
pub enum ActivitySource {
    Transaction,
    RecurringBill,
}

impl fmt::Display for ActivitySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ActivitySource::Transaction => "transaction",
            ActivitySource::RecurringBill => "recurring_bill",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(tag = "kind", rename_all = "snake_case")]
/// Identifies an activity. Occurrence ids are unique per definition and date.
pub enum ActivityId {
    Transaction { id: Uuid },
    Occurrence { definition_id: Uuid, date: NaiveDate },
}

impl fmt::Display for ActivityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActivityId::Transaction { id } => write!(f, "{}", id),
            ActivityId::Occurrence {
                definition_id,
                date,
            } => write!(f, "{}@{}", definition_id, date),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Activity {
    pub id: ActivityId,
    pub description: String,
    pub amount: f64,
    pub date: NaiveDate,
    pub category: Option<String>,
    pub activity_type: TransactionType,
    pub source: ActivitySource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl From<&Transaction> for Activity {
    fn from(txn: &Transaction) -> Self {
        Self {
            id: ActivityId::Transaction { id: txn.id },
            description: txn.description.clone(),
            amount: txn.amount,
            date: txn.date,
            category: txn.category.clone(),
            activity_type: txn.transaction_type,
            source: ActivitySource::Transaction,
            status: txn.status.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn occurrence_id_combines_definition_and_date() {
        let definition_id = Uuid::nil();
        let id = ActivityId::Occurrence {
            definition_id,
            date: NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
        };
        assert_eq!(
            id.to_string(),
            "00000000-0000-0000-0000-000000000000@2024-03-31"
        );
    }

    #[test]
    fn transaction_conversion_keeps_type_and_status() {
        let txn = Transaction::new(
            "Salary",
            3000.0,
            TransactionType::Income,
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        )
        .with_status("paid");
        let activity = Activity::from(&txn);
        assert_eq!(activity.activity_type, TransactionType::Income);
        assert_eq!(activity.status.as_deref(), Some("paid"));
        assert_eq!(activity.source, ActivitySource::Transaction);
        assert_eq!(activity.id, ActivityId::Transaction { id: txn.id });
    }
}
