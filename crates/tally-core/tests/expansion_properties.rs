use chrono::{Datelike, NaiveDate};
use tally_core::{time::shift_month, RecurrenceExpander};
use tally_domain::{DateRange, RecurrenceType, RecurringBillDefinition};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn window(from: NaiveDate, to: NaiveDate) -> DateRange {
    DateRange::new(from, to).expect("valid window")
}

fn starts() -> Vec<NaiveDate> {
    vec![
        date(2023, 1, 1),
        date(2023, 5, 15),
        date(2023, 8, 28),
        date(2023, 10, 30),
        date(2024, 1, 31),
        date(2024, 2, 29),
    ]
}

fn windows() -> Vec<DateRange> {
    vec![
        window(date(2023, 1, 1), date(2025, 12, 31)),
        window(date(2024, 2, 1), date(2024, 2, 29)),
        window(date(2024, 6, 10), date(2024, 6, 16)),
        window(date(2022, 1, 1), date(2022, 12, 31)),
        window(date(2024, 3, 31), date(2024, 3, 31)),
    ]
}

#[test]
fn uncapped_monthly_series_advance_one_month_at_a_time() {
    for start in starts() {
        let bill = RecurringBillDefinition::new("Rent", 900.0, start, RecurrenceType::Monthly);
        let result =
            RecurrenceExpander::expand(&bill, window(date(2023, 1, 1), date(2026, 12, 31)));
        assert!(!result.is_empty());
        for pair in result.windows(2) {
            assert!(pair[0].date < pair[1].date);
            assert_eq!(pair[1].index, pair[0].index + 1);
            let months = (pair[1].date.year() - pair[0].date.year()) * 12
                + pair[1].date.month() as i32
                - pair[0].date.month() as i32;
            assert_eq!(months, 1, "{} -> {}", pair[0].date, pair[1].date);
        }
        for occurrence in &result {
            let expected = shift_month(start, i64::from(occurrence.index - 1)).unwrap();
            assert_eq!(occurrence.date, expected);
        }
    }
}

#[test]
fn emitted_dates_stay_inside_the_window() {
    for cadence in [
        RecurrenceType::Weekly,
        RecurrenceType::Monthly,
        RecurrenceType::Yearly,
    ] {
        for start in starts() {
            let bill = RecurringBillDefinition::new("Bill", 10.0, start, cadence);
            for range in windows() {
                for occurrence in RecurrenceExpander::expand(&bill, range) {
                    assert!(range.contains(occurrence.date));
                    assert!(occurrence.date >= start);
                }
            }
        }
    }
}

#[test]
fn expansion_is_deterministic() {
    let bill = RecurringBillDefinition::new("Gym", 35.0, date(2023, 8, 28), RecurrenceType::Weekly)
        .with_end_date(date(2024, 12, 31));
    for range in windows() {
        assert_eq!(
            RecurrenceExpander::expand(&bill, range),
            RecurrenceExpander::expand(&bill, range)
        );
    }
}

#[test]
fn month_end_series_clamps_february_and_restores_march() {
    let bill = RecurringBillDefinition::new(
        "Insurance",
        80.0,
        date(2024, 1, 31),
        RecurrenceType::Monthly,
    )
    .with_installments(3);
    let result = RecurrenceExpander::expand(&bill, window(date(2024, 1, 1), date(2024, 12, 31)));
    let dates: Vec<_> = result.iter().map(|occurrence| occurrence.date).collect();
    assert_eq!(dates, vec![date(2024, 1, 31), date(2024, 2, 29), date(2024, 3, 31)]);
    assert_eq!(result[2].describe(&bill), "Insurance (3/3)");
}

#[test]
fn missing_start_date_yields_nothing_for_any_window() {
    let mut bill =
        RecurringBillDefinition::new("Draft", 12.0, date(2024, 1, 1), RecurrenceType::Monthly);
    bill.start_date = None;
    for range in windows() {
        assert!(RecurrenceExpander::expand(&bill, range).is_empty());
    }
    assert!(RecurrenceExpander::next_occurrence(&bill, date(2024, 1, 1)).is_none());
}

#[test]
fn non_positive_caps_emit_nothing() {
    for cap in [0, -4] {
        let bill =
            RecurringBillDefinition::new("Loan", 50.0, date(2024, 1, 1), RecurrenceType::Monthly)
                .with_installments(cap);
        assert!(
            RecurrenceExpander::expand(&bill, window(date(2024, 1, 1), date(2024, 12, 31)))
                .is_empty()
        );
    }
}
