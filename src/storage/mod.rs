pub mod json_backend;
pub mod memory;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::{billing::Subscription, errors::Result};

/// Durable collection of subscription records. The billing engine only reads the
/// list and writes back advanced due dates; the other operations serve the
/// surrounding CRUD layer.
pub trait SubscriptionStore: Send + Sync {
    /// All subscriptions in insertion order.
    fn list_subscriptions(&self) -> Result<Vec<Subscription>>;

    fn subscription(&self, id: Uuid) -> Result<Option<Subscription>> {
        Ok(self
            .list_subscriptions()?
            .into_iter()
            .find(|subscription| subscription.id == id))
    }

    fn insert(&mut self, subscription: Subscription) -> Result<Uuid>;

    /// Removes the subscription, returning it when it existed.
    fn remove(&mut self, id: Uuid) -> Result<Option<Subscription>>;

    /// Stores a new next billing date. Fails with `SubscriptionNotFound` for unknown ids.
    fn update_next_billing_date(&mut self, id: Uuid, date: NaiveDate) -> Result<()>;
}

pub use json_backend::{JsonSubscriptionStore, STORE_SCHEMA_VERSION};
pub use memory::InMemoryStore;
