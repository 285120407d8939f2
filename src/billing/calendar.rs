use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::{BillingCycle, BillingProjector, Occurrence, Period, PeriodTotal, Subscription};

/// Which total the calendar header shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TotalDisplay {
    #[default]
    Monthly,
    Annual,
}

/// Projected due dates of every subscription, bucketed by day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionCalendar {
    pub horizon_months: u32,
    pub reference_date: NaiveDate,
    date_index: BTreeMap<NaiveDate, Vec<Occurrence>>,
    yearly_total: f64,
}

impl SubscriptionCalendar {
    pub fn date_index(&self) -> &BTreeMap<NaiveDate, Vec<Occurrence>> {
        &self.date_index
    }

    /// Occurrences due on `date`, in subscription order.
    pub fn due_on(&self, date: NaiveDate) -> &[Occurrence] {
        self.date_index
            .get(&date)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Days that carry at least one due subscription.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.date_index.keys().copied()
    }

    pub fn occurrence_count(&self) -> usize {
        self.date_index.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.date_index.is_empty()
    }

    /// Annualised cost of the subscriptions the calendar was built from.
    pub fn yearly_total(&self) -> f64 {
        self.yearly_total
    }

    /// Sum of every projected charge falling in the given month. Only subscriptions
    /// with a due date in that month count; nothing is prorated.
    pub fn monthly_total_for(&self, year: i32, month: u32) -> f64 {
        self.occurrences_in_month(year, month)
            .map(|occurrence| occurrence.amount)
            .sum()
    }

    pub fn total_for(&self, display: TotalDisplay, year: i32, month: u32) -> f64 {
        match display {
            TotalDisplay::Monthly => self.monthly_total_for(year, month),
            TotalDisplay::Annual => self.yearly_total,
        }
    }

    /// Occurrences due in the given month, ordered by date.
    pub fn upcoming_in_month(&self, year: i32, month: u32) -> Vec<Occurrence> {
        self.occurrences_in_month(year, month).cloned().collect()
    }

    /// Occurrences due from `today` through `days` days later, inclusive.
    pub fn upcoming_within(&self, today: NaiveDate, days: u32) -> Vec<Occurrence> {
        let last = today
            .checked_add_signed(Duration::days(i64::from(days)))
            .unwrap_or(NaiveDate::MAX);
        self.date_index
            .range(today..=last)
            .flat_map(|(_, bucket)| bucket.iter().cloned())
            .collect()
    }

    fn occurrences_in_month(
        &self,
        year: i32,
        month: u32,
    ) -> impl Iterator<Item = &Occurrence> + '_ {
        self.date_index
            .iter()
            .filter(move |(date, _)| date.year() == year && date.month() == month)
            .flat_map(|(_, bucket)| bucket.iter())
    }
}

/// Merges per-subscription projections and computes cost totals.
pub struct CalendarAggregator;

impl CalendarAggregator {
    pub fn build(
        subscriptions: &[Subscription],
        months_ahead: u32,
        today: NaiveDate,
    ) -> SubscriptionCalendar {
        let mut date_index: BTreeMap<NaiveDate, Vec<Occurrence>> = BTreeMap::new();
        for subscription in subscriptions {
            for occurrence in BillingProjector::occurrences(subscription, months_ahead, today) {
                date_index.entry(occurrence.date).or_default().push(occurrence);
            }
        }

        let calendar = SubscriptionCalendar {
            horizon_months: months_ahead,
            reference_date: today,
            date_index,
            yearly_total: Self::yearly_total(subscriptions),
        };
        tracing::debug!(
            subscriptions = subscriptions.len(),
            days = calendar.date_index.len(),
            occurrences = calendar.occurrence_count(),
            "built subscription calendar"
        );
        calendar
    }

    pub fn yearly_total(subscriptions: &[Subscription]) -> f64 {
        subscriptions.iter().map(Subscription::annual_cost).sum()
    }

    /// Cost attributed to `period`, scaling each subscription by its cycle. This is
    /// an estimate from cycle amounts, not a sum of actual charges in the window.
    pub fn period_total(period: Period, subscriptions: &[Subscription]) -> f64 {
        subscriptions
            .iter()
            .map(|sub| period.scale(sub.amount, sub.billing_cycle))
            .sum()
    }

    pub fn period_summary(
        period: Period,
        subscriptions: &[Subscription],
        today: NaiveDate,
    ) -> PeriodTotal {
        PeriodTotal {
            period,
            window: period.window(today),
            amount: Self::period_total(period, subscriptions),
        }
    }

    /// Sum of the monthly-cycle subscriptions only.
    pub fn monthly_subscriptions_total(subscriptions: &[Subscription]) -> f64 {
        subscriptions
            .iter()
            .filter(|sub| sub.billing_cycle == BillingCycle::Monthly)
            .map(|sub| sub.amount)
            .sum()
    }
}
