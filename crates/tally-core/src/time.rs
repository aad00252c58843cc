//! Clock abstraction and calendar arithmetic shared by the expander and resolver.
//!
//! All helpers treat dates as timezone-less calendar days and return `None`
//! instead of panicking when a result falls outside chrono's supported range.

use chrono::{DateTime, Datelike, Days, NaiveDate, Utc};

/// Clock abstracts access to the current timestamp so services remain deterministic in tests.
pub trait Clock: Send + Sync {
    /// Returns the current UTC timestamp.
    fn now(&self) -> DateTime<Utc>;

    /// Returns the current UTC date. Defaults to `now().date_naive()`.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((next - first).num_days() as u32)
}

/// Moves `date` by whole months, clamping the day to the target month's length.
pub fn shift_month(date: NaiveDate, months: i64) -> Option<NaiveDate> {
    let index = i64::from(date.year()) * 12 + i64::from(date.month0()) + months;
    let year = i32::try_from(index.div_euclid(12)).ok()?;
    let month = index.rem_euclid(12) as u32 + 1;
    let day = date.day().min(days_in_month(year, month)?);
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Moves `date` by whole years; Feb 29 clamps to Feb 28 outside leap years.
pub fn shift_year(date: NaiveDate, years: i64) -> Option<NaiveDate> {
    shift_month(date, years.checked_mul(12)?)
}

pub fn first_day_of_month(date: NaiveDate) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1)
}

pub fn last_day_of_month(date: NaiveDate) -> Option<NaiveDate> {
    let days = days_in_month(date.year(), date.month())?;
    NaiveDate::from_ymd_opt(date.year(), date.month(), days)
}

/// Monday of the week containing `date`.
pub fn week_start(date: NaiveDate) -> Option<NaiveDate> {
    let delta = date.weekday().num_days_from_monday();
    date.checked_sub_days(Days::new(u64::from(delta)))
}

/// Sunday of the week containing `date`.
pub fn week_end(date: NaiveDate) -> Option<NaiveDate> {
    week_start(date)?.checked_add_days(Days::new(6))
}

/// Whole months from the month of `from` to the month of `to`, ignoring days.
pub fn months_between(from: NaiveDate, to: NaiveDate) -> i64 {
    let from_idx = i64::from(from.year()) * 12 + i64::from(from.month0());
    let to_idx = i64::from(to.year()) * 12 + i64::from(to.month0());
    to_idx - from_idx
}
