//! Local wall-clock date arithmetic.
//!
//! Dates are `NaiveDate`s: no time of day, no timezone. Day navigation is
//! plain day counting; month navigation goes through [`add_months`], which
//! normalizes the way a `(year, month, day)` constructor does, so a day that
//! does not exist in the target month rolls over into the next one.

use chrono::{Datelike, Days, NaiveDate};

use crate::constants::{MAX_YEAR, MIN_YEAR};

/// Whether `date` lies in the range views may be anchored in.
pub fn is_supported(date: NaiveDate) -> bool {
    (MIN_YEAR..=MAX_YEAR).contains(&date.year())
}

/// First day of `year`-`month`, if that month exists and is supported.
pub fn first_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1).filter(|d| is_supported(*d))
}

/// First day of the month containing `date`.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.day0()))
}

pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let days = match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if NaiveDate::from_ymd_opt(year, 2, 29).is_some() => 29,
        2 => 28,
        _ => return None,
    };
    Some(days)
}

/// Shift `date` by `n` days. Leaving the supported range leaves the date unchanged.
pub fn add_days(date: NaiveDate, n: i64) -> NaiveDate {
    let shifted = if n >= 0 {
        date.checked_add_days(Days::new(n.unsigned_abs()))
    } else {
        date.checked_sub_days(Days::new(n.unsigned_abs()))
    };

    shifted.filter(|d| is_supported(*d)).unwrap_or(date)
}

/// Shift `date` by `n` months without clamping the day.
///
/// The result is the first of the target month plus `day - 1` days, so
/// 2024-03-31 minus one month is 2024-03-02, not 2024-02-29.
/// Leaving the supported range leaves the date unchanged.
pub fn add_months(date: NaiveDate, n: i32) -> NaiveDate {
    let total = i64::from(date.year()) * 12 + i64::from(date.month0()) + i64::from(n);
    let Ok(year) = i32::try_from(total.div_euclid(12)) else {
        return date;
    };
    // rem_euclid(12) is always in 0..12
    let month = total.rem_euclid(12) as u32 + 1;

    first_of_month(year, month)
        .and_then(|first| first.checked_add_days(Days::new(u64::from(date.day0()))))
        .filter(|d| is_supported(*d))
        .unwrap_or(date)
}

pub fn add_years(date: NaiveDate, n: i32) -> NaiveDate {
    add_months(date, n.saturating_mul(12))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn add_months_from_end_of_january_lands_in_december() {
        assert_eq!(add_months(ymd(2024, 1, 31), -1), ymd(2023, 12, 31));
    }

    #[test]
    fn add_months_rolls_overflowing_day_forward() {
        // Feb 2024 has 29 days: "Feb 31" is two days past its end
        assert_eq!(add_months(ymd(2024, 3, 31), -1), ymd(2024, 3, 2));
        assert_eq!(add_months(ymd(2023, 1, 31), 1), ymd(2023, 3, 3));
        assert_eq!(add_months(ymd(2024, 5, 31), 1), ymd(2024, 7, 1));
    }

    #[test]
    fn add_months_crosses_year_boundaries() {
        assert_eq!(add_months(ymd(2024, 12, 1), 1), ymd(2025, 1, 1));
        assert_eq!(add_months(ymd(2024, 1, 1), -13), ymd(2022, 12, 1));
        assert_eq!(add_years(ymd(2024, 2, 1), -1), ymd(2023, 2, 1));
    }

    #[test]
    fn add_years_on_leap_day_normalizes() {
        assert_eq!(add_years(ymd(2024, 2, 29), 1), ymd(2025, 3, 1));
    }

    #[test]
    fn arithmetic_refuses_to_leave_supported_range() {
        let last = ymd(MAX_YEAR, 12, 31);
        assert_eq!(add_days(last, 1), last);
        assert_eq!(add_months(last, 1), last);

        let first = ymd(MIN_YEAR, 1, 1);
        assert_eq!(add_days(first, -1), first);
        assert_eq!(add_years(first, -1), first);
        assert_eq!(add_months(first, i32::MIN), first);
    }

    #[test]
    fn add_days_counts_days() {
        assert_eq!(add_days(ymd(2024, 2, 28), 1), ymd(2024, 2, 29));
        assert_eq!(add_days(ymd(2024, 3, 1), -1), ymd(2024, 2, 29));
        assert_eq!(add_days(ymd(2023, 12, 25), 7), ymd(2024, 1, 1));
    }

    #[test]
    fn month_lengths() {
        assert_eq!(days_in_month(2024, 2), Some(29));
        assert_eq!(days_in_month(2023, 2), Some(28));
        assert_eq!(days_in_month(1900, 2), Some(28));
        assert_eq!(days_in_month(2000, 2), Some(29));
        assert_eq!(days_in_month(2024, 4), Some(30));
        assert_eq!(days_in_month(2024, 12), Some(31));
        assert_eq!(days_in_month(2024, 13), None);
    }

    #[test]
    fn month_start_and_first_of_month() {
        assert_eq!(month_start(ymd(2024, 2, 29)), ymd(2024, 2, 1));
        assert_eq!(first_of_month(2024, 0), None);
        assert_eq!(first_of_month(MAX_YEAR + 1, 1), None);
    }
}
