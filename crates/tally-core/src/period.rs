//! Resolution of named period selectors into concrete inclusive date ranges.
//!
//! Weeks start on Monday.

use chrono::{Datelike, Days, Month, NaiveDate};

use tally_domain::{CustomRange, DateRange, MonthSelection, PeriodSelector};

use crate::{
    time::{first_day_of_month, last_day_of_month, shift_month, week_end, week_start},
    CoreError,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPeriod {
    pub selector: PeriodSelector,
    pub range: DateRange,
    pub label: String,
}

pub struct PeriodFilterResolver;

impl PeriodFilterResolver {
    /// Maps `selector` to an inclusive range relative to `reference`.
    ///
    /// `custom` is only read for [`PeriodSelector::CustomPeriod`] and `month`
    /// only for [`PeriodSelector::SelectMonth`]; both are required there.
    pub fn resolve(
        selector: PeriodSelector,
        reference: NaiveDate,
        custom: Option<CustomRange>,
        month: Option<MonthSelection>,
    ) -> Result<ResolvedPeriod, CoreError> {
        let range = match selector {
            PeriodSelector::Today => DateRange::day(reference),
            PeriodSelector::ThisWeek => week_of(reference)?,
            PeriodSelector::LastWeek => {
                let previous = reference
                    .checked_sub_days(Days::new(7))
                    .ok_or_else(|| out_of_range(reference))?;
                week_of(previous)?
            }
            PeriodSelector::ThisMonth => month_of(reference)?,
            PeriodSelector::LastMonth => {
                let previous = shift_month(reference, -1).ok_or_else(|| out_of_range(reference))?;
                month_of(previous)?
            }
            PeriodSelector::SelectMonth => {
                let month = month.ok_or_else(|| {
                    CoreError::Validation("select-month requires an explicit month".into())
                })?;
                month_of(first_of_selected(month)?)?
            }
            PeriodSelector::CustomPeriod => custom_range(custom)?,
        };
        Ok(ResolvedPeriod {
            selector,
            range,
            label: label_for(selector, range),
        })
    }
}

/// Display label for a resolved period. Deterministic per selector and range.
pub fn label_for(selector: PeriodSelector, range: DateRange) -> String {
    match selector {
        PeriodSelector::SelectMonth => month_label(range.from()),
        PeriodSelector::CustomPeriod => range.to_string(),
        other => other.label().to_string(),
    }
}

fn week_of(date: NaiveDate) -> Result<DateRange, CoreError> {
    let from = week_start(date).ok_or_else(|| out_of_range(date))?;
    let to = week_end(date).ok_or_else(|| out_of_range(date))?;
    Ok(DateRange::new(from, to)?)
}

fn month_of(date: NaiveDate) -> Result<DateRange, CoreError> {
    let from = first_day_of_month(date).ok_or_else(|| out_of_range(date))?;
    let to = last_day_of_month(date).ok_or_else(|| out_of_range(date))?;
    Ok(DateRange::new(from, to)?)
}

fn first_of_selected(month: MonthSelection) -> Result<NaiveDate, CoreError> {
    if !(1..=12).contains(&month.month) {
        return Err(CoreError::Validation(format!(
            "month must be between 1 and 12, got {}",
            month.month
        )));
    }
    NaiveDate::from_ymd_opt(month.year, month.month, 1).ok_or_else(|| {
        CoreError::OutOfRange(format!("{}-{:02}", month.year, month.month))
    })
}

fn custom_range(custom: Option<CustomRange>) -> Result<DateRange, CoreError> {
    let custom = custom.unwrap_or_default();
    let (Some(from), Some(to)) = (custom.from, custom.to) else {
        return Err(CoreError::Validation(
            "custom period requires both a start and an end date".into(),
        ));
    };
    Ok(DateRange::new(from, to)?)
}

fn month_label(date: NaiveDate) -> String {
    format!("{} {}", month_name(date.month()), date.year())
}

fn out_of_range(date: NaiveDate) -> CoreError {
    CoreError::OutOfRange(date.to_string())
}

fn month_name(month: u32) -> &'static str {
    u8::try_from(month)
        .ok()
        .and_then(|value| Month::try_from(value).ok())
        .map(|month| month.name())
        .unwrap_or("Unknown")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn resolve(selector: PeriodSelector, reference: NaiveDate) -> DateRange {
        PeriodFilterResolver::resolve(selector, reference, None, None)
            .unwrap()
            .range
    }

    #[test]
    fn today_is_a_single_day() {
        let range = resolve(PeriodSelector::Today, date(2024, 6, 12));
        assert_eq!((range.from(), range.to()), (date(2024, 6, 12), date(2024, 6, 12)));
    }

    #[test]
    fn last_week_crosses_month_boundary() {
        let range = resolve(PeriodSelector::LastWeek, date(2024, 7, 3));
        assert_eq!((range.from(), range.to()), (date(2024, 6, 24), date(2024, 6, 30)));
    }

    #[test]
    fn last_month_from_january_is_previous_december() {
        let range = resolve(PeriodSelector::LastMonth, date(2024, 1, 31));
        assert_eq!((range.from(), range.to()), (date(2023, 12, 1), date(2023, 12, 31)));
    }

    #[test]
    fn select_month_rejects_invalid_month() {
        let err = PeriodFilterResolver::resolve(
            PeriodSelector::SelectMonth,
            date(2024, 1, 1),
            None,
            Some(MonthSelection::new(2024, 13)),
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn labels_are_stable() {
        let resolved = PeriodFilterResolver::resolve(
            PeriodSelector::SelectMonth,
            date(2024, 6, 12),
            None,
            Some(MonthSelection::new(2024, 3)),
        )
        .unwrap();
        assert_eq!(resolved.label, "March 2024");
        let week =
            PeriodFilterResolver::resolve(PeriodSelector::ThisWeek, date(2024, 6, 12), None, None)
                .unwrap();
        assert_eq!(week.label, "This week");
    }
}
