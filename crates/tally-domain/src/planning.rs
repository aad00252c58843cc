//! Planning templates for entries generated ahead of time on a fixed cadence.

use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::transaction::TransactionType;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PlanningCadence {
    Monthly,
    Quarterly,
    Semiannual,
    Annual,
}

impl PlanningCadence {
    /// Number of calendar months between two generated entries.
    pub fn step_months(self) -> u32 {
        match self {
            PlanningCadence::Monthly => 1,
            PlanningCadence::Quarterly => 3,
            PlanningCadence::Semiannual => 6,
            PlanningCadence::Annual => 12,
        }
    }
}

impl fmt::Display for PlanningCadence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PlanningCadence::Monthly => "monthly",
            PlanningCadence::Quarterly => "quarterly",
            PlanningCadence::Semiannual => "semiannual",
            PlanningCadence::Annual => "annual",
        };
        f.write_str(label)
    }
}

impl FromStr for PlanningCadence {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "monthly" => Ok(PlanningCadence::Monthly),
            "quarterly" => Ok(PlanningCadence::Quarterly),
            "semiannual" | "semi-annual" => Ok(PlanningCadence::Semiannual),
            "annual" | "yearly" => Ok(PlanningCadence::Annual),
            other => Err(format!("unknown planning cadence `{}`", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlannedEntry {
    pub description: String,
    pub amount: f64,
    pub transaction_type: TransactionType,
    #[serde(default)]
    pub category: Option<String>,
    pub start_date: NaiveDate,
    pub cadence: PlanningCadence,
}

impl PlannedEntry {
    pub fn new(
        description: impl Into<String>,
        amount: f64,
        transaction_type: TransactionType,
        start_date: NaiveDate,
        cadence: PlanningCadence,
    ) -> Self {
        Self {
            description: description.into(),
            amount,
            transaction_type,
            category: None,
            start_date,
            cadence,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}
