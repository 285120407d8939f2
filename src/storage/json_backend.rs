use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{
    memory::{insert_validated, remove_by_id, set_next_billing_date},
    SubscriptionStore,
};
use crate::{
    billing::Subscription,
    errors::{BillingError, Result},
    utils::{
        paths,
        persistence::{load_json, save_json},
    },
};

pub const STORE_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoreDocument {
    #[serde(default = "StoreDocument::schema_version_default")]
    schema_version: u32,
    #[serde(default)]
    subscriptions: Vec<Subscription>,
}

impl StoreDocument {
    fn schema_version_default() -> u32 {
        STORE_SCHEMA_VERSION
    }
}

impl Default for StoreDocument {
    fn default() -> Self {
        Self {
            schema_version: STORE_SCHEMA_VERSION,
            subscriptions: Vec::new(),
        }
    }
}

/// Filesystem-backed JSON store. Every mutation is written through immediately.
#[derive(Debug, Clone)]
pub struct JsonSubscriptionStore {
    path: PathBuf,
    document: StoreDocument,
}

impl JsonSubscriptionStore {
    /// Opens the store at `path`, starting empty when the file does not exist yet.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let document = if path.exists() {
            let document: StoreDocument = load_json(&path)?;
            if document.schema_version > STORE_SCHEMA_VERSION {
                return Err(BillingError::Validation(format!(
                    "subscription store `{}` is from a newer schema version",
                    path.display()
                )));
            }
            for subscription in &document.subscriptions {
                subscription.validate()?;
            }
            document
        } else {
            StoreDocument::default()
        };
        tracing::debug!(
            path = %path.display(),
            subscriptions = document.subscriptions.len(),
            "opened subscription store"
        );
        Ok(Self { path, document })
    }

    /// Opens `subscriptions.json` inside `base`.
    pub fn open_in(base: &Path) -> Result<Self> {
        Self::open(paths::subscriptions_file_in(base))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Re-reads the file, dropping the cached snapshot.
    pub fn reload(&mut self) -> Result<()> {
        *self = Self::open(self.path.clone())?;
        Ok(())
    }

    /// Applies `change` to a copy of the document and adopts it only once the copy
    /// is on disk, so a failed write leaves the cached snapshot untouched.
    fn commit<T>(&mut self, change: impl FnOnce(&mut StoreDocument) -> Result<T>) -> Result<T> {
        let mut staged = self.document.clone();
        let outcome = change(&mut staged)?;
        save_json(&staged, &self.path)?;
        tracing::info!(
            path = %self.path.display(),
            subscriptions = staged.subscriptions.len(),
            "saved subscription store"
        );
        self.document = staged;
        Ok(outcome)
    }
}

impl SubscriptionStore for JsonSubscriptionStore {
    fn list_subscriptions(&self) -> Result<Vec<Subscription>> {
        Ok(self.document.subscriptions.clone())
    }

    fn subscription(&self, id: Uuid) -> Result<Option<Subscription>> {
        Ok(self
            .document
            .subscriptions
            .iter()
            .find(|sub| sub.id == id)
            .cloned())
    }

    fn insert(&mut self, subscription: Subscription) -> Result<Uuid> {
        self.commit(|document| insert_validated(&mut document.subscriptions, subscription))
    }

    fn remove(&mut self, id: Uuid) -> Result<Option<Subscription>> {
        if !self.document.subscriptions.iter().any(|sub| sub.id == id) {
            return Ok(None);
        }
        self.commit(|document| Ok(remove_by_id(&mut document.subscriptions, id)))
    }

    fn update_next_billing_date(&mut self, id: Uuid, date: NaiveDate) -> Result<()> {
        self.commit(|document| set_next_billing_date(&mut document.subscriptions, id, date))
    }
}
