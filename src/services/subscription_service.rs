use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
    billing::{
        BillingCycle, CalendarAggregator, Occurrence, PaymentAdvancer, Period, PeriodTotal,
        Subscription, SubscriptionCalendar,
    },
    config::Config,
    errors::Result,
    storage::SubscriptionStore,
    time::Clock,
};

/// Entry points the presentation layer calls, wiring the store, configuration and
/// clock into the billing engine.
pub struct SubscriptionService;

impl SubscriptionService {
    /// Creates a subscription from form input. The cycle label must be one of
    /// Monthly, Quarterly or Yearly.
    pub fn add(
        store: &mut dyn SubscriptionStore,
        name: &str,
        amount: f64,
        cycle_label: &str,
        next_billing_date: NaiveDate,
    ) -> Result<Uuid> {
        let cycle: BillingCycle = cycle_label.parse()?;
        let subscription = Subscription::new(name.trim(), amount, cycle, next_billing_date)?;
        let id = store.insert(subscription)?;
        tracing::info!(subscription = %id, cycle = %cycle, "subscription added");
        Ok(id)
    }

    pub fn calendar(
        store: &dyn SubscriptionStore,
        config: &Config,
        clock: &dyn Clock,
    ) -> Result<SubscriptionCalendar> {
        let subscriptions = store.list_subscriptions()?;
        Ok(CalendarAggregator::build(
            &subscriptions,
            config.projection_months,
            clock.today(),
        ))
    }

    /// Occurrences due within the configured upcoming window.
    pub fn upcoming(
        store: &dyn SubscriptionStore,
        config: &Config,
        clock: &dyn Clock,
    ) -> Result<Vec<Occurrence>> {
        let calendar = Self::calendar(store, config, clock)?;
        Ok(calendar.upcoming_within(clock.today(), config.upcoming_window_days))
    }

    pub fn period_summary(
        store: &dyn SubscriptionStore,
        period: Period,
        clock: &dyn Clock,
    ) -> Result<PeriodTotal> {
        let subscriptions = store.list_subscriptions()?;
        Ok(CalendarAggregator::period_summary(
            period,
            &subscriptions,
            clock.today(),
        ))
    }

    /// Totals for every named period, in menu order.
    pub fn period_summaries(
        store: &dyn SubscriptionStore,
        clock: &dyn Clock,
    ) -> Result<Vec<PeriodTotal>> {
        let subscriptions = store.list_subscriptions()?;
        let today = clock.today();
        Ok(Period::ALL
            .into_iter()
            .map(|period| CalendarAggregator::period_summary(period, &subscriptions, today))
            .collect())
    }

    pub fn mark_paid(store: &mut dyn SubscriptionStore, id: Uuid) -> Result<NaiveDate> {
        PaymentAdvancer::mark_paid(store, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{errors::BillingError, storage::InMemoryStore, time::FixedClock};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn add_rejects_unknown_cycle_label() {
        let mut store = InMemoryStore::new();
        let err = SubscriptionService::add(&mut store, "Gym", 30.0, "Fortnightly", date(2024, 1, 1))
            .expect_err("fortnightly is unsupported");
        assert!(matches!(err, BillingError::InvalidCycle(_)));
        assert!(store.is_empty());
    }

    #[test]
    fn upcoming_uses_configured_window() {
        let mut store = InMemoryStore::new();
        SubscriptionService::add(&mut store, "Phone", 25.0, "monthly", date(2024, 4, 20)).unwrap();
        let clock = FixedClock::new(date(2024, 4, 1));
        let mut config = Config::default();

        config.upcoming_window_days = 10;
        assert!(SubscriptionService::upcoming(&store, &config, &clock).unwrap().is_empty());

        config.upcoming_window_days = 30;
        let upcoming = SubscriptionService::upcoming(&store, &config, &clock).unwrap();
        assert_eq!(upcoming.len(), 1);
        assert_eq!(upcoming[0].date, date(2024, 4, 20));
    }

    #[test]
    fn period_summaries_cover_every_period() {
        let mut store = InMemoryStore::new();
        SubscriptionService::add(&mut store, "Hosting", 30.0, "Quarterly", date(2024, 1, 1))
            .unwrap();
        let clock = FixedClock::new(date(2024, 5, 5));
        let summaries = SubscriptionService::period_summaries(&store, &clock).unwrap();
        assert_eq!(summaries.len(), Period::ALL.len());
        let year = summaries
            .iter()
            .find(|total| total.period == Period::ThisYear)
            .unwrap();
        assert_eq!(year.amount, 120.0);
        assert_eq!(year.window.start, date(2024, 1, 1));
    }
}
