use thiserror::Error;
use uuid::Uuid;

use crate::config::ConfigError;

/// Error type that captures billing engine and storage failures.
#[derive(Debug, Error)]
pub enum BillingError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Unknown billing cycle: {0}")]
    InvalidCycle(String),
    #[error("Unknown period: {0}")]
    InvalidPeriod(String),
    #[error("Subscription not found: {0}")]
    SubscriptionNotFound(Uuid),
    #[error("Validation failed: {0}")]
    Validation(String),
}

pub type Result<T> = std::result::Result<T, BillingError>;
