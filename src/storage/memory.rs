use chrono::NaiveDate;
use uuid::Uuid;

use super::SubscriptionStore;
use crate::{
    billing::Subscription,
    errors::{BillingError, Result},
};

/// Vec-backed store for tests and embedders that persist elsewhere.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    subscriptions: Vec<Subscription>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_subscriptions(subscriptions: Vec<Subscription>) -> Result<Self> {
        let mut store = Self::new();
        for subscription in subscriptions {
            store.insert(subscription)?;
        }
        Ok(store)
    }

    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }
}

impl SubscriptionStore for InMemoryStore {
    fn list_subscriptions(&self) -> Result<Vec<Subscription>> {
        Ok(self.subscriptions.clone())
    }

    fn subscription(&self, id: Uuid) -> Result<Option<Subscription>> {
        Ok(self.subscriptions.iter().find(|sub| sub.id == id).cloned())
    }

    fn insert(&mut self, subscription: Subscription) -> Result<Uuid> {
        insert_validated(&mut self.subscriptions, subscription)
    }

    fn remove(&mut self, id: Uuid) -> Result<Option<Subscription>> {
        Ok(remove_by_id(&mut self.subscriptions, id))
    }

    fn update_next_billing_date(&mut self, id: Uuid, date: NaiveDate) -> Result<()> {
        set_next_billing_date(&mut self.subscriptions, id, date)
    }
}

pub(super) fn insert_validated(
    subscriptions: &mut Vec<Subscription>,
    subscription: Subscription,
) -> Result<Uuid> {
    subscription.validate()?;
    if subscriptions.iter().any(|existing| existing.id == subscription.id) {
        return Err(BillingError::Validation(format!(
            "subscription {} already exists",
            subscription.id
        )));
    }
    let id = subscription.id;
    subscriptions.push(subscription);
    Ok(id)
}

pub(super) fn remove_by_id(
    subscriptions: &mut Vec<Subscription>,
    id: Uuid,
) -> Option<Subscription> {
    let index = subscriptions.iter().position(|sub| sub.id == id)?;
    Some(subscriptions.remove(index))
}

pub(super) fn set_next_billing_date(
    subscriptions: &mut [Subscription],
    id: Uuid,
    date: NaiveDate,
) -> Result<()> {
    let subscription = subscriptions
        .iter_mut()
        .find(|sub| sub.id == id)
        .ok_or(BillingError::SubscriptionNotFound(id))?;
    subscription.next_billing_date = date;
    Ok(())
}
