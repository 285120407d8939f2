use chrono::NaiveDate;
use uuid::Uuid;

use super::{date_math, Subscription};
use crate::{
    errors::{BillingError, Result},
    storage::SubscriptionStore,
};

/// Handles the "mark as paid" transition.
pub struct PaymentAdvancer;

impl PaymentAdvancer {
    /// Due date that follows the subscription's current one.
    pub fn next_due_date(subscription: &Subscription) -> NaiveDate {
        date_math::add_cycles(subscription.next_billing_date, subscription.billing_cycle, 1)
    }

    /// Moves the subscription exactly one cycle forward from its stored due date and
    /// returns the new date. Persisting the change is up to the caller.
    pub fn advance(subscription: &mut Subscription) -> NaiveDate {
        let next = Self::next_due_date(subscription);
        tracing::debug!(
            subscription = %subscription.id,
            from = %subscription.next_billing_date,
            to = %next,
            "advancing billing date"
        );
        subscription.next_billing_date = next;
        next
    }

    /// Resolves `id` in the store, advances it by one cycle, and writes the new date back.
    pub fn mark_paid<S>(store: &mut S, id: Uuid) -> Result<NaiveDate>
    where
        S: SubscriptionStore + ?Sized,
    {
        let Some(mut subscription) = store.subscription(id)? else {
            tracing::warn!(subscription = %id, "mark paid requested for unknown subscription");
            return Err(BillingError::SubscriptionNotFound(id));
        };
        let next = Self::advance(&mut subscription);
        store.update_next_billing_date(id, next)?;
        tracing::info!(
            subscription = %id,
            name = %subscription.name,
            next_billing_date = %next,
            "subscription marked as paid"
        );
        Ok(next)
    }
}
