mod common;

use billing_core::{
    config::{Config, ConfigManager},
    references::ReferenceCounter,
    services::SubscriptionService,
    storage::{JsonSubscriptionStore, SubscriptionStore},
    time::FixedClock,
    BillingCycle, Period,
};
use common::{date, sample_portfolio};
use serde_json::Value;
use tempfile::tempdir;

#[test]
fn json_store_round_trips_portfolio() {
    let dir = tempdir().expect("tempdir");
    let mut store = JsonSubscriptionStore::open_in(dir.path()).expect("open store");
    let portfolio = sample_portfolio();
    for sub in &portfolio {
        store.insert(sub.clone()).expect("insert");
    }

    let reopened = JsonSubscriptionStore::open_in(dir.path()).expect("reopen");
    assert_eq!(reopened.list_subscriptions().unwrap(), portfolio);

    let raw: Value =
        serde_json::from_str(&std::fs::read_to_string(reopened.path()).unwrap()).unwrap();
    assert_eq!(raw["schema_version"], 1);
    assert_eq!(raw["subscriptions"][1]["billing_cycle"], "Quarterly");
    assert_eq!(raw["subscriptions"][0]["next_billing_date"], "2024-01-31");
}

#[test]
fn mark_paid_persists_through_json_store() {
    let dir = tempdir().expect("tempdir");
    let mut store = JsonSubscriptionStore::open_in(dir.path()).unwrap();
    let id = SubscriptionService::add(&mut store, "Streaming", 15.0, "Monthly", date(2024, 1, 31))
        .unwrap();

    let next = SubscriptionService::mark_paid(&mut store, id).unwrap();
    assert_eq!(next, date(2024, 2, 29));

    let mut reopened = JsonSubscriptionStore::open_in(dir.path()).unwrap();
    assert_eq!(
        reopened.subscription(id).unwrap().unwrap().next_billing_date,
        date(2024, 2, 29)
    );
    reopened.remove(id).unwrap();
    store.reload().unwrap();
    assert!(store.list_subscriptions().unwrap().is_empty());
}

#[test]
fn config_drives_calendar_horizon() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
    let mut config = Config::default();
    config.projection_months = 3;
    manager.save(&config).unwrap();
    let config = manager.load().unwrap();

    let mut store = JsonSubscriptionStore::open_in(dir.path()).unwrap();
    SubscriptionService::add(&mut store, "Gym", 40.0, "monthly", date(2024, 3, 1)).unwrap();
    let clock = FixedClock::new(date(2024, 3, 1));
    let calendar = SubscriptionService::calendar(&store, &config, &clock).unwrap();

    assert_eq!(calendar.horizon_months, 3);
    assert_eq!(calendar.occurrence_count(), 4);
    assert_eq!(calendar.due_on(date(2024, 6, 1))[0].cycle, BillingCycle::Monthly);
}

#[test]
fn period_summary_reads_from_store() {
    let dir = tempdir().expect("tempdir");
    let mut store = JsonSubscriptionStore::open_in(dir.path()).unwrap();
    SubscriptionService::add(&mut store, "Antivirus", 120.0, "Yearly", date(2024, 9, 1)).unwrap();
    let clock = FixedClock::new(date(2024, 5, 10));
    let summary = SubscriptionService::period_summary(&store, Period::ThisMonth, &clock).unwrap();
    assert_eq!(summary.amount, 10.0);
    assert!(summary.window.contains(date(2024, 5, 31)));
}

#[test]
fn reference_counter_lifecycle() {
    let dir = tempdir().expect("tempdir");
    let mut counter = ReferenceCounter::load_in(dir.path()).unwrap();
    assert_eq!(counter.next_receipt_reference(date(2024, 12, 31)), "20241231-0001");
    counter.save().unwrap();

    let mut counter = ReferenceCounter::load_in(dir.path()).unwrap();
    assert_eq!(counter.next_receipt_reference(date(2024, 12, 31)), "20241231-0002");
    assert_eq!(counter.next_receipt_reference(date(2025, 1, 1)), "20250101-0001");
}
