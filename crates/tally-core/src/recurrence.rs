//! Expansion of recurring bill templates into concrete, date-stamped occurrences.

use chrono::{Datelike, Days, NaiveDate};
use tracing::debug;

use tally_domain::{DateRange, RecurrenceType, RecurringBillDefinition};

use crate::time::{months_between, shift_month, shift_year};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// A single generated occurrence. `index` is the 1-based position in the
/// whole series, counted from the definition's start date.
pub struct Occurrence {
    pub date: NaiveDate,
    pub index: u32,
}

impl Occurrence {
    /// Template name, annotated with `(index/total)` when the series is capped.
    pub fn describe(&self, definition: &RecurringBillDefinition) -> String {
        match definition.total_installments {
            Some(total) if total > 0 => {
                format!("{} ({}/{})", definition.name, self.index, total)
            }
            _ => definition.name.clone(),
        }
    }
}

/// Turns recurring definitions into bounded occurrence sequences.
pub struct RecurrenceExpander;

impl RecurrenceExpander {
    /// Returns every occurrence of `definition` that falls inside `window`, in
    /// strictly increasing date order.
    ///
    /// Definitions without a start date, or with a non-positive installment
    /// cap, yield nothing.
    pub fn expand(definition: &RecurringBillDefinition, window: DateRange) -> Vec<Occurrence> {
        let mut occurrences = Vec::new();
        let Some((start, cap)) = series_bounds(definition) else {
            return occurrences;
        };
        let limit = match definition.end_date {
            Some(end) => end.min(window.to()),
            None => window.to(),
        };
        if limit < start {
            return occurrences;
        }

        let cadence = definition.recurrence_type;
        let mut step = first_candidate_step(cadence, start, window.from());
        loop {
            let Some(index) = step.checked_add(1) else {
                break;
            };
            if cap.is_some_and(|total| index > total) {
                break;
            }
            let Some(date) = occurrence_date(cadence, start, step) else {
                break;
            };
            if date > limit {
                break;
            }
            if date >= window.from() {
                occurrences.push(Occurrence { date, index });
            }
            step = index;
        }

        debug!(
            definition = %definition.id,
            cadence = %cadence,
            emitted = occurrences.len(),
            "expanded recurring bill"
        );
        occurrences
    }

    /// First occurrence on or after `reference`, if the series is still running.
    pub fn next_occurrence(
        definition: &RecurringBillDefinition,
        reference: NaiveDate,
    ) -> Option<Occurrence> {
        let (start, cap) = series_bounds(definition)?;
        let cadence = definition.recurrence_type;
        let mut step = first_candidate_step(cadence, start, reference);
        loop {
            let index = step.checked_add(1)?;
            if cap.is_some_and(|total| index > total) {
                return None;
            }
            let date = occurrence_date(cadence, start, step)?;
            if definition.end_date.is_some_and(|end| date > end) {
                return None;
            }
            if date >= reference {
                return Some(Occurrence { date, index });
            }
            step = index;
        }
    }
}

/// Date of the occurrence `step` cadence units after `start`, computed from the
/// anchor so the original day-of-month survives short months.
pub fn occurrence_date(cadence: RecurrenceType, start: NaiveDate, step: u32) -> Option<NaiveDate> {
    match cadence {
        RecurrenceType::Weekly => start.checked_add_days(Days::new(u64::from(step) * 7)),
        RecurrenceType::Monthly => shift_month(start, i64::from(step)),
        RecurrenceType::Yearly => shift_year(start, i64::from(step)),
    }
}

/// Start date and optional cap, or `None` when the definition emits nothing.
fn series_bounds(definition: &RecurringBillDefinition) -> Option<(NaiveDate, Option<u32>)> {
    let Some(start) = definition.start_date else {
        debug!(definition = %definition.id, "skipping recurring bill without start date");
        return None;
    };
    let cap = match definition.total_installments {
        Some(total) if total <= 0 => {
            debug!(
                definition = %definition.id,
                total,
                "skipping recurring bill with non-positive installment cap"
            );
            return None;
        }
        Some(total) => Some(total as u32),
        None => None,
    };
    Some((start, cap))
}

/// A step known to fall on or before the first occurrence at or after `from`.
/// Skipped steps still count towards the occurrence index.
fn first_candidate_step(cadence: RecurrenceType, start: NaiveDate, from: NaiveDate) -> u32 {
    if from <= start {
        return 0;
    }
    let steps = match cadence {
        RecurrenceType::Weekly => (from - start).num_days() / 7,
        RecurrenceType::Monthly => months_between(start, from) - 1,
        RecurrenceType::Yearly => i64::from(from.year() - start.year()) - 1,
    };
    u32::try_from(steps.max(0)).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn window(from: NaiveDate, to: NaiveDate) -> DateRange {
        DateRange::new(from, to).unwrap()
    }

    fn dates(occurrences: &[Occurrence]) -> Vec<NaiveDate> {
        occurrences.iter().map(|occ| occ.date).collect()
    }

    #[test]
    fn capped_month_end_series_clamps_and_restores_day() {
        let bill = RecurringBillDefinition::new(
            "Insurance",
            80.0,
            date(2024, 1, 31),
            RecurrenceType::Monthly,
        )
        .with_installments(3);
        let result =
            RecurrenceExpander::expand(&bill, window(date(2024, 1, 1), date(2024, 12, 31)));
        assert_eq!(
            dates(&result),
            vec![date(2024, 1, 31), date(2024, 2, 29), date(2024, 3, 31)]
        );
        assert_eq!(
            result.iter().map(|occ| occ.index).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn index_counts_from_series_start_not_window_start() {
        let bill = RecurringBillDefinition::new(
            "Laptop",
            150.0,
            date(2024, 1, 10),
            RecurrenceType::Monthly,
        )
        .with_installments(12);
        let result =
            RecurrenceExpander::expand(&bill, window(date(2024, 3, 1), date(2024, 3, 31)));
        assert_eq!(result, vec![Occurrence { date: date(2024, 3, 10), index: 3 }]);
        assert_eq!(result[0].describe(&bill), "Laptop (3/12)");
    }

    #[test]
    fn uncapped_series_uses_plain_name() {
        let bill =
            RecurringBillDefinition::new("Rent", 1200.0, date(2024, 1, 1), RecurrenceType::Monthly);
        let result =
            RecurrenceExpander::expand(&bill, window(date(2024, 5, 1), date(2024, 5, 31)));
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].index, 5);
        assert_eq!(result[0].describe(&bill), "Rent");
    }

    #[test]
    fn weekly_series_steps_seven_days() {
        let bill =
            RecurringBillDefinition::new("Cleaner", 40.0, date(2024, 6, 3), RecurrenceType::Weekly);
        let result =
            RecurrenceExpander::expand(&bill, window(date(2024, 6, 10), date(2024, 6, 30)));
        assert_eq!(
            dates(&result),
            vec![date(2024, 6, 10), date(2024, 6, 17), date(2024, 6, 24)]
        );
        assert_eq!(result[0].index, 2);
    }

    #[test]
    fn yearly_series_handles_leap_day() {
        let bill = RecurringBillDefinition::new(
            "Domain renewal",
            15.0,
            date(2024, 2, 29),
            RecurrenceType::Yearly,
        );
        let result =
            RecurrenceExpander::expand(&bill, window(date(2024, 1, 1), date(2028, 12, 31)));
        assert_eq!(
            dates(&result),
            vec![
                date(2024, 2, 29),
                date(2025, 2, 28),
                date(2026, 2, 28),
                date(2027, 2, 28),
                date(2028, 2, 29),
            ]
        );
    }

    #[test]
    fn end_date_stops_the_series() {
        let bill =
            RecurringBillDefinition::new("Gym", 30.0, date(2024, 1, 15), RecurrenceType::Monthly)
                .with_end_date(date(2024, 3, 15));
        let result =
            RecurrenceExpander::expand(&bill, window(date(2024, 1, 1), date(2024, 12, 31)));
        assert_eq!(
            dates(&result),
            vec![date(2024, 1, 15), date(2024, 2, 15), date(2024, 3, 15)]
        );
    }

    #[test]
    fn missing_start_date_yields_nothing() {
        let mut bill =
            RecurringBillDefinition::new("Draft", 5.0, date(2024, 1, 1), RecurrenceType::Monthly);
        bill.start_date = None;
        let result =
            RecurrenceExpander::expand(&bill, window(date(2000, 1, 1), date(2100, 12, 31)));
        assert!(result.is_empty());
        assert!(RecurrenceExpander::next_occurrence(&bill, date(2024, 1, 1)).is_none());
    }

    #[test]
    fn non_positive_cap_yields_nothing() {
        for cap in [0, -3] {
            let bill = RecurringBillDefinition::new(
                "Broken",
                5.0,
                date(2024, 1, 1),
                RecurrenceType::Monthly,
            )
            .with_installments(cap);
            let result =
                RecurrenceExpander::expand(&bill, window(date(2024, 1, 1), date(2024, 12, 31)));
            assert!(result.is_empty(), "cap {cap} should emit nothing");
        }
    }

    #[test]
    fn window_before_start_is_empty() {
        let bill =
            RecurringBillDefinition::new("Rent", 1200.0, date(2024, 6, 1), RecurrenceType::Monthly);
        let result =
            RecurrenceExpander::expand(&bill, window(date(2024, 1, 1), date(2024, 5, 31)));
        assert!(result.is_empty());
    }

    #[test]
    fn cap_reached_before_window_is_empty() {
        let bill =
            RecurringBillDefinition::new("Phone", 50.0, date(2024, 1, 5), RecurrenceType::Monthly)
                .with_installments(2);
        let result =
            RecurrenceExpander::expand(&bill, window(date(2024, 4, 1), date(2024, 4, 30)));
        assert!(result.is_empty());
    }

    #[test]
    fn fast_forward_matches_full_walk() {
        let bill = RecurringBillDefinition::new(
            "Storage",
            9.0,
            date(2020, 8, 31),
            RecurrenceType::Monthly,
        );
        let full = RecurrenceExpander::expand(&bill, window(date(2020, 1, 1), date(2025, 12, 31)));
        let slice = RecurrenceExpander::expand(&bill, window(date(2024, 2, 1), date(2024, 4, 30)));
        let expected: Vec<_> = full
            .into_iter()
            .filter(|occ| occ.date >= date(2024, 2, 1) && occ.date <= date(2024, 4, 30))
            .collect();
        assert_eq!(slice, expected);
        assert_eq!(slice[0].date, date(2024, 2, 29));
    }

    #[test]
    fn next_occurrence_skips_past_dates() {
        let bill = RecurringBillDefinition::new(
            "Water",
            25.0,
            date(2024, 1, 20),
            RecurrenceType::Monthly,
        )
        .with_installments(6);
        let next = RecurrenceExpander::next_occurrence(&bill, date(2024, 3, 21)).unwrap();
        assert_eq!(next, Occurrence { date: date(2024, 4, 20), index: 4 });
        assert!(RecurrenceExpander::next_occurrence(&bill, date(2024, 6, 21)).is_none());
    }
}
