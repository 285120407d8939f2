#![doc(test(attr(deny(warnings))))]

//! Billing Core is the recurring-subscription engine of a personal finance
//! tracker: it projects billing dates, aggregates them onto a calendar, computes
//! period totals, and advances due dates when subscriptions are paid.

pub mod billing;
pub mod config;
pub mod errors;
pub mod references;
pub mod services;
pub mod storage;
pub mod time;
pub mod utils;

pub use billing::{
    BillingCycle, BillingProjector, CalendarAggregator, Occurrence, PaymentAdvancer, Period,
    PeriodTotal, Subscription, SubscriptionCalendar,
};
pub use errors::{BillingError, Result};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Billing Core tracing initialized.");
    });
}
