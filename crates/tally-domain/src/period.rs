//! Named period selectors used by the transaction list and organizer calendar.

use std::{fmt, str::FromStr};

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum PeriodSelector {
    Today,
    ThisWeek,
    LastWeek,
    #[default]
    ThisMonth,
    LastMonth,
    SelectMonth,
    CustomPeriod,
}

impl PeriodSelector {
    pub const ALL: [PeriodSelector; 7] = [
        PeriodSelector::Today,
        PeriodSelector::ThisWeek,
        PeriodSelector::LastWeek,
        PeriodSelector::ThisMonth,
        PeriodSelector::LastMonth,
        PeriodSelector::SelectMonth,
        PeriodSelector::CustomPeriod,
    ];

    /// Canonical kebab-case key, as accepted by [`FromStr`].
    pub fn key(self) -> &'static str {
        match self {
            PeriodSelector::Today => "today",
            PeriodSelector::ThisWeek => "this-week",
            PeriodSelector::LastWeek => "last-week",
            PeriodSelector::ThisMonth => "this-month",
            PeriodSelector::LastMonth => "last-month",
            PeriodSelector::SelectMonth => "select-month",
            PeriodSelector::CustomPeriod => "custom-period",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PeriodSelector::Today => "Today",
            PeriodSelector::ThisWeek => "This week",
            PeriodSelector::LastWeek => "Last week",
            PeriodSelector::ThisMonth => "This month",
            PeriodSelector::LastMonth => "Last month",
            PeriodSelector::SelectMonth => "Select month",
            PeriodSelector::CustomPeriod => "Custom period",
        }
    }
}

impl fmt::Display for PeriodSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSelector(pub String);

impl fmt::Display for UnknownSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown period selector `{}`", self.0)
    }
}

impl std::error::Error for UnknownSelector {}

impl FromStr for PeriodSelector {
    type Err = UnknownSelector;

    /// Accepts kebab, snake and camel spellings (`this-week`, `this_week`, `thisWeek`).
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized: String = value
            .trim()
            .chars()
            .filter(|ch| !matches!(ch, '-' | '_' | ' '))
            .map(|ch| ch.to_ascii_lowercase())
            .collect();
        let selector = match normalized.as_str() {
            "today" => PeriodSelector::Today,
            "thisweek" => PeriodSelector::ThisWeek,
            "lastweek" => PeriodSelector::LastWeek,
            "thismonth" => PeriodSelector::ThisMonth,
            "lastmonth" => PeriodSelector::LastMonth,
            "selectmonth" | "month" => PeriodSelector::SelectMonth,
            "customperiod" | "custom" => PeriodSelector::CustomPeriod,
            _ => return Err(UnknownSelector(value.to_string())),
        };
        Ok(selector)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
/// An explicit calendar month picked by the user. Validated on resolution.
pub struct MonthSelection {
    pub year: i32,
    pub month: u32,
}

impl MonthSelection {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl FromStr for MonthSelection {
    type Err = String;

    /// Parses `YYYY-MM`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (year, month) = value
            .trim()
            .split_once('-')
            .ok_or_else(|| format!("expected YYYY-MM, got `{}`", value))?;
        let year = year
            .parse::<i32>()
            .map_err(|_| format!("invalid year in `{}`", value))?;
        let month = month
            .parse::<u32>()
            .map_err(|_| format!("invalid month in `{}`", value))?;
        Ok(Self { year, month })
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
/// Caller-supplied bounds for a custom period; either end may still be missing.
pub struct CustomRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl CustomRange {
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self { from, to }
    }

    pub fn between(from: NaiveDate, to: NaiveDate) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
        }
    }
}
