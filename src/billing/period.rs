use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{date_math, BillingCycle};
use crate::errors::{BillingError, Result};

/// Earliest date covered by the "All Time" period.
pub const ALL_TIME_START: (i32, u32, u32) = (2000, 1, 1);

/// Months of subscription history that "All Time" is assumed to cover.
const ALL_TIME_ESTIMATE_MONTHS: u32 = 24;

/// Half-open date range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if end <= start {
            return Err(BillingError::Validation(
                "window end must be after start".into(),
            ));
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date < self.end
    }

    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days()
    }
}

/// Named reporting period offered by the summary footer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Period {
    ThisMonth,
    LastMonth,
    ThisQuarter,
    LastQuarter,
    ThisYear,
    LastYear,
    LastSixMonths,
    AllTime,
}

impl Period {
    pub const ALL: [Period; 8] = [
        Period::ThisMonth,
        Period::LastMonth,
        Period::ThisQuarter,
        Period::LastQuarter,
        Period::ThisYear,
        Period::LastYear,
        Period::LastSixMonths,
        Period::AllTime,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Period::ThisMonth => "This Month",
            Period::LastMonth => "Last Month",
            Period::ThisQuarter => "This Quarter",
            Period::LastQuarter => "Last Quarter",
            Period::ThisYear => "This Year",
            Period::LastYear => "Last Year",
            Period::LastSixMonths => "Last 6 Months",
            Period::AllTime => "All Time",
        }
    }

    /// Months of billing the period is charged for. "All Time" is a fixed estimate
    /// rather than the real age of each subscription.
    pub fn months_covered(self) -> u32 {
        match self {
            Period::ThisMonth | Period::LastMonth => 1,
            Period::ThisQuarter | Period::LastQuarter => 3,
            Period::ThisYear | Period::LastYear => 12,
            Period::LastSixMonths => 6,
            Period::AllTime => ALL_TIME_ESTIMATE_MONTHS,
        }
    }

    /// Factor applied to one cycle's amount to attribute it to this period.
    pub fn multiplier(self, cycle: BillingCycle) -> f64 {
        self.scale(1.0, cycle)
    }

    /// Scales `amount`, billed once per `cycle`, to this period.
    pub fn scale(self, amount: f64, cycle: BillingCycle) -> f64 {
        amount * self.months_covered() as f64 / cycle.months() as f64
    }

    /// Calendar range of the period relative to `today`.
    pub fn window(self, today: NaiveDate) -> DateWindow {
        let (start, end) = match self {
            Period::ThisMonth => month_bounds(today, 0),
            Period::LastMonth => month_bounds(today, -1),
            Period::ThisQuarter => quarter_bounds(today, 0),
            Period::LastQuarter => quarter_bounds(today, -1),
            Period::ThisYear => year_bounds(today, 0),
            Period::LastYear => year_bounds(today, -1),
            Period::LastSixMonths => (
                date_math::add_months(date_math::month_start(today), -6),
                date_math::next_day(today),
            ),
            Period::AllTime => {
                let (y, m, d) = ALL_TIME_START;
                let start = NaiveDate::from_ymd_opt(y, m, d).unwrap_or(today);
                (start.min(today), date_math::next_day(today))
            }
        };
        DateWindow { start, end }
    }
}

fn month_bounds(today: NaiveDate, offset: i32) -> (NaiveDate, NaiveDate) {
    let start = date_math::add_months(date_math::month_start(today), offset);
    (start, date_math::add_months(start, 1))
}

fn quarter_bounds(today: NaiveDate, offset: i32) -> (NaiveDate, NaiveDate) {
    let start = date_math::add_quarters(date_math::quarter_start(today), offset);
    (start, date_math::add_quarters(start, 1))
}

fn year_bounds(today: NaiveDate, offset: i32) -> (NaiveDate, NaiveDate) {
    let start = date_math::add_years(date_math::year_start(today), offset);
    (start, date_math::add_years(start, 1))
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Period {
    type Err = BillingError;

    fn from_str(value: &str) -> Result<Self> {
        let wanted = value.trim();
        Period::ALL
            .into_iter()
            .find(|period| period.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| BillingError::InvalidPeriod(value.to_string()))
    }
}

/// Subscription cost attributed to a period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodTotal {
    pub period: Period,
    pub window: DateWindow,
    pub amount: f64,
}
