//! Calendar stepping shared by projection and payment advancement.
//!
//! Every month-based step clamps the day-of-month to the last valid day of the
//! target month, so Jan 31 plus one month lands on Feb 28 (or Feb 29).

use chrono::{Datelike, Duration, NaiveDate};

use super::BillingCycle;

/// Gregorian leap-year rule.
pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Number of days in `month` (1-based) of `year`.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// Builds a date, clamping `day` into the valid range of the given month.
pub fn clamped_date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    let day = day.clamp(1, days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Moves `date` by `months` calendar months (negative steps go backwards).
pub fn add_months(date: NaiveDate, months: i32) -> NaiveDate {
    let index = date.year() * 12 + date.month0() as i32 + months;
    let year = index.div_euclid(12);
    let month = index.rem_euclid(12) as u32 + 1;
    // Only fails outside chrono's representable range.
    clamped_date(year, month, date.day()).unwrap_or(date)
}

pub fn add_quarters(date: NaiveDate, quarters: i32) -> NaiveDate {
    add_months(date, quarters * 3)
}

pub fn add_years(date: NaiveDate, years: i32) -> NaiveDate {
    add_months(date, years * 12)
}

/// Moves `date` by `steps` whole billing cycles.
pub fn add_cycles(date: NaiveDate, cycle: BillingCycle, steps: i32) -> NaiveDate {
    match cycle {
        BillingCycle::Monthly => add_months(date, steps),
        BillingCycle::Quarterly => add_quarters(date, steps),
        BillingCycle::Yearly => add_years(date, steps),
    }
}

pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub fn quarter_start(date: NaiveDate) -> NaiveDate {
    let first_month = date.month0() / 3 * 3 + 1;
    NaiveDate::from_ymd_opt(date.year(), first_month, 1).unwrap_or(date)
}

pub fn year_start(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), 1, 1).unwrap_or(date)
}

pub fn next_day(date: NaiveDate) -> NaiveDate {
    date.checked_add_signed(Duration::days(1)).unwrap_or(date)
}
