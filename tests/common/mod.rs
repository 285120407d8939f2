#![allow(dead_code)]

use billing_core::{BillingCycle, Subscription};
use chrono::NaiveDate;

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}

pub fn subscription(name: &str, amount: f64, cycle: BillingCycle, next: NaiveDate) -> Subscription {
    Subscription::new(name, amount, cycle, next).expect("valid subscription")
}

/// A small, mixed portfolio used across the integration suites.
pub fn sample_portfolio() -> Vec<Subscription> {
    vec![
        subscription("Streaming", 15.99, BillingCycle::Monthly, date(2024, 1, 31)),
        subscription("Cloud Backup", 29.97, BillingCycle::Quarterly, date(2024, 2, 15)),
        subscription("Domain", 12.0, BillingCycle::Yearly, date(2024, 8, 1)),
        subscription("Gym", 40.0, BillingCycle::Monthly, date(2024, 3, 1)),
    ]
}
