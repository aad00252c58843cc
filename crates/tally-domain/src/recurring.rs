//! Recurring bill templates. Occurrences are derived on read and never stored.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum RecurrenceType {
    #[default]
    Monthly,
    Weekly,
    Yearly,
}

impl RecurrenceType {
    pub fn label(self) -> &'static str {
        match self {
            RecurrenceType::Monthly => "Monthly",
            RecurrenceType::Weekly => "Weekly",
            RecurrenceType::Yearly => "Yearly",
        }
    }
}

impl fmt::Display for RecurrenceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecurringBillDefinition {
    pub id: Uuid,
    pub name: String,
    pub amount: f64,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// Caps the number of generated occurrences when present.
    #[serde(default)]
    pub total_installments: Option<i32>,
    #[serde(default)]
    pub recurrence_type: RecurrenceType,
}

impl RecurringBillDefinition {
    pub fn new(
        name: impl Into<String>,
        amount: f64,
        start_date: NaiveDate,
        recurrence_type: RecurrenceType,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            amount,
            category: None,
            start_date: Some(start_date),
            end_date: None,
            total_installments: None,
            recurrence_type,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }

    pub fn with_installments(mut self, total: i32) -> Self {
        self.total_installments = Some(total);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recurrence_type_defaults_to_monthly_when_absent() {
        let raw = r#"{
            "id": "0d3e4b8e-77a2-4d0f-8d5c-2a9f2f1d9b01",
            "name": "Rent",
            "amount": 1200.0,
            "start_date": "2024-01-01"
        }"#;
        let bill: RecurringBillDefinition = serde_json::from_str(raw).unwrap();
        assert_eq!(bill.recurrence_type, RecurrenceType::Monthly);
        assert!(bill.total_installments.is_none());
    }

    #[test]
    fn start_date_may_be_missing() {
        let raw = r#"{
            "id": "0d3e4b8e-77a2-4d0f-8d5c-2a9f2f1d9b02",
            "name": "Draft",
            "amount": 10.0,
            "recurrence_type": "weekly"
        }"#;
        let bill: RecurringBillDefinition = serde_json::from_str(raw).unwrap();
        assert!(bill.start_date.is_none());
        assert_eq!(bill.recurrence_type, RecurrenceType::Weekly);
    }
}
