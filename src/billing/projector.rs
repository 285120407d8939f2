use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{date_math, BillingCycle, Subscription};
use crate::time::Clock;

/// Forward window used when callers do not pick one.
pub const DEFAULT_PROJECTION_MONTHS: u32 = 12;

/// Longest horizon a projection will walk, one hundred years.
pub const MAX_PROJECTION_MONTHS: u32 = 1200;

/// One projected due date of a subscription.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Occurrence {
    pub date: NaiveDate,
    pub subscription_id: Uuid,
    pub name: String,
    pub amount: f64,
    pub cycle: BillingCycle,
}

impl Occurrence {
    fn new(subscription: &Subscription, date: NaiveDate) -> Self {
        Self {
            date,
            subscription_id: subscription.id,
            name: subscription.name.clone(),
            amount: subscription.amount,
            cycle: subscription.billing_cycle,
        }
    }
}

/// Projects future due dates for a single subscription.
pub struct BillingProjector;

impl BillingProjector {
    /// Returns the stored next billing date followed by every later due date in the
    /// horizon. The stored date is always first, even when it is already past.
    ///
    /// Monthly subscriptions step `months_ahead` times and quarterly ones
    /// `months_ahead / 3` times. Yearly subscriptions get at most one extra date, and
    /// only when its year is within `months_ahead / 12` years of `today`.
    ///
    /// Horizons beyond [`MAX_PROJECTION_MONTHS`] are capped, and stepping stops
    /// early if a date can no longer move forward.
    pub fn project(
        subscription: &Subscription,
        months_ahead: u32,
        today: NaiveDate,
    ) -> Vec<NaiveDate> {
        if months_ahead > MAX_PROJECTION_MONTHS {
            tracing::warn!(
                subscription = %subscription.id,
                months_ahead,
                max = MAX_PROJECTION_MONTHS,
                "projection horizon capped"
            );
        }
        let months_ahead = months_ahead.min(MAX_PROJECTION_MONTHS);
        let first = subscription.next_billing_date;
        let cycle = subscription.billing_cycle;
        let steps = match cycle {
            BillingCycle::Monthly => months_ahead,
            BillingCycle::Quarterly => months_ahead / 3,
            BillingCycle::Yearly => {
                let following = cycle.next_date(first);
                let years_out = following.year() - today.year();
                u32::from(years_out <= (months_ahead / 12) as i32)
            }
        };

        let mut dates = Vec::with_capacity(steps as usize + 1);
        dates.push(first);
        let mut current = first;
        for _ in 0..steps {
            let next = date_math::add_cycles(current, cycle, 1);
            if next <= current {
                break;
            }
            current = next;
            dates.push(current);
        }

        tracing::debug!(
            subscription = %subscription.id,
            cycle = %cycle,
            months_ahead,
            projected = dates.len(),
            "projected billing dates"
        );
        dates
    }

    pub fn project_with_clock(
        subscription: &Subscription,
        months_ahead: u32,
        clock: &dyn Clock,
    ) -> Vec<NaiveDate> {
        Self::project(subscription, months_ahead, clock.today())
    }

    /// Same as [`BillingProjector::project`], carrying the subscription details with
    /// each date.
    pub fn occurrences(
        subscription: &Subscription,
        months_ahead: u32,
        today: NaiveDate,
    ) -> Vec<Occurrence> {
        Self::project(subscription, months_ahead, today)
            .into_iter()
            .map(|date| Occurrence::new(subscription, date))
            .collect()
    }
}
