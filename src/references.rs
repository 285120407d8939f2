//! Daily receipt reference numbers (`YYYYMMDD-NNNN`).
//!
//! The counter state is loaded once, advanced in memory, and written back only
//! when [`ReferenceCounter::save`] is called.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    errors::Result,
    utils::{
        paths,
        persistence::{load_json_or_default, save_json},
    },
};

const DAY_KEY_FORMAT: &str = "%Y%m%d";

/// Serialized counter state, keyed by `YYYYMMDD`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceCounters {
    #[serde(default)]
    pub receipts: BTreeMap<String, u32>,
}

#[derive(Debug, Clone)]
pub struct ReferenceCounter {
    path: PathBuf,
    counters: ReferenceCounters,
}

impl ReferenceCounter {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let counters = load_json_or_default(&path)?;
        Ok(Self { path, counters })
    }

    pub fn load_in(base: &Path) -> Result<Self> {
        Self::load(paths::reference_counters_file_in(base))
    }

    /// Issues the next reference for `today`. The first reference of a new day
    /// discards the counters of earlier days.
    pub fn next_receipt_reference(&mut self, today: NaiveDate) -> String {
        let key = today.format(DAY_KEY_FORMAT).to_string();
        if !self.counters.receipts.contains_key(&key) {
            self.counters.receipts.clear();
        }
        let count = self.counters.receipts.entry(key.clone()).or_insert(0);
        *count += 1;
        format!("{}-{:04}", key, count)
    }

    pub fn save(&self) -> Result<()> {
        save_json(&self.counters, &self.path)?;
        tracing::debug!(path = %self.path.display(), "saved reference counters");
        Ok(())
    }

    pub fn counters(&self) -> &ReferenceCounters {
        &self.counters
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
