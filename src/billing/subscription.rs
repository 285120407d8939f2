use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::BillingCycle;
use crate::errors::{BillingError, Result};

/// A recurring charge tracked by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    pub id: Uuid,
    pub name: String,
    pub amount: f64,
    pub billing_cycle: BillingCycle,
    /// Next unpaid due date.
    pub next_billing_date: NaiveDate,
}

impl Subscription {
    pub fn new(
        name: impl Into<String>,
        amount: f64,
        billing_cycle: BillingCycle,
        next_billing_date: NaiveDate,
    ) -> Result<Self> {
        Self::with_id(Uuid::new_v4(), name, amount, billing_cycle, next_billing_date)
    }

    pub fn with_id(
        id: Uuid,
        name: impl Into<String>,
        amount: f64,
        billing_cycle: BillingCycle,
        next_billing_date: NaiveDate,
    ) -> Result<Self> {
        let subscription = Self {
            id,
            name: name.into(),
            amount,
            billing_cycle,
            next_billing_date,
        };
        subscription.validate()?;
        Ok(subscription)
    }

    /// Checks the record invariants: a non-empty name and a positive, finite amount.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(BillingError::Validation(format!(
                "subscription {} has an empty name",
                self.id
            )));
        }
        if !self.amount.is_finite() || self.amount <= 0.0 {
            return Err(BillingError::Validation(format!(
                "subscription `{}` must have a positive amount, got {}",
                self.name, self.amount
            )));
        }
        Ok(())
    }

    /// Cost of this subscription over twelve months.
    pub fn annual_cost(&self) -> f64 {
        self.amount * self.billing_cycle.cycles_per_year() as f64
    }
}
