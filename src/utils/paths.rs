use dirs::home_dir;
use std::{
    env,
    path::{Path, PathBuf},
};

const DEFAULT_DIR_NAME: &str = ".billing_core";
const HOME_ENV: &str = "BILLING_CORE_HOME";
const CONFIG_FILE: &str = "config.json";
const SUBSCRIPTIONS_FILE: &str = "subscriptions.json";
const REFERENCE_COUNTERS_FILE: &str = "reference_counters.json";

/// Returns the application data directory, defaulting to `~/.billing_core`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

pub fn config_file_in(base: &Path) -> PathBuf {
    base.join(CONFIG_FILE)
}

pub fn subscriptions_file_in(base: &Path) -> PathBuf {
    base.join(SUBSCRIPTIONS_FILE)
}

pub fn reference_counters_file_in(base: &Path) -> PathBuf {
    base.join(REFERENCE_COUNTERS_FILE)
}
