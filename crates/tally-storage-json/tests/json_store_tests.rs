use std::fs;

use chrono::NaiveDate;
use futures::executor::block_on;
use tally_core::{ActivityAggregator, CoreError, RecurringBillSource, TransactionSource};
use tally_domain::{
    DateRange, RecurrenceType, RecurringBillDefinition, SavingsGoal, Transaction,
    TransactionType, UserContext,
};
use tally_storage_json::{JsonDataStore, UserSnapshot};
use tempfile::tempdir;
use uuid::Uuid;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn store() -> (tempfile::TempDir, JsonDataStore) {
    let dir = tempdir().expect("tempdir");
    let store = JsonDataStore::new(dir.path().join("data")).expect("create store");
    (dir, store)
}

#[test]
fn missing_snapshot_loads_empty() {
    let (_dir, store) = store();
    let context = UserContext::new(Uuid::new_v4());
    let snapshot = store.load(&context).expect("load");
    assert_eq!(snapshot, UserSnapshot::default());
    assert!(!store.snapshot_path(&context).exists());
}

#[test]
fn saved_entries_round_trip_per_user() {
    let (_dir, store) = store();
    let alice = UserContext::new(Uuid::new_v4());
    let bob = UserContext::new(Uuid::new_v4());

    let txn = Transaction::new("Coffee", 4.5, TransactionType::Expense, date(2024, 6, 3));
    store.add_transaction(&alice, txn.clone()).expect("add transaction");
    store
        .add_goal(&alice, SavingsGoal::new("Trip", 1500.0))
        .expect("add goal");

    let loaded = store.load(&alice).expect("load alice");
    assert_eq!(loaded.transactions, vec![txn]);
    assert_eq!(loaded.goals.len(), 1);
    assert!(store.load(&bob).expect("load bob").transactions.is_empty());

    let path = store.snapshot_path(&alice);
    assert_eq!(path.extension().and_then(|ext| ext.to_str()), Some("json"));
    assert!(!path.with_extension("json.tmp").exists());
}

#[test]
fn transactions_are_filtered_inclusively() {
    let (_dir, store) = store();
    let context = UserContext::new(Uuid::new_v4());
    store
        .add_transactions(
            &context,
            vec![
                Transaction::new("Before", 1.0, TransactionType::Expense, date(2024, 5, 31)),
                Transaction::new("First", 2.0, TransactionType::Expense, date(2024, 6, 1)),
                Transaction::new("Last", 3.0, TransactionType::Expense, date(2024, 6, 30)),
                Transaction::new("After", 4.0, TransactionType::Expense, date(2024, 7, 1)),
            ],
        )
        .expect("add transactions");

    let window = DateRange::new(date(2024, 6, 1), date(2024, 6, 30)).unwrap();
    let fetched = block_on(store.transactions_in_range(&context, window)).expect("fetch");
    let names: Vec<_> = fetched.iter().map(|txn| txn.description.as_str()).collect();
    assert_eq!(names, vec!["First", "Last"]);
}

#[test]
fn recurring_bills_are_returned_unfiltered() {
    let (_dir, store) = store();
    let context = UserContext::new(Uuid::new_v4());
    let old = RecurringBillDefinition::new("Old", 10.0, date(2019, 1, 1), RecurrenceType::Yearly)
        .with_end_date(date(2020, 1, 1));
    let rent = RecurringBillDefinition::new("Rent", 900.0, date(2024, 1, 5), RecurrenceType::Monthly);
    store.add_recurring_bill(&context, old.clone()).unwrap();
    store.add_recurring_bill(&context, rent).unwrap();

    let bills = block_on(store.active_recurring_bills(&context)).expect("fetch bills");
    assert_eq!(bills.len(), 2);

    assert!(store.remove_recurring_bill(&context, old.id).unwrap());
    assert!(!store.remove_recurring_bill(&context, old.id).unwrap());
    assert_eq!(store.load(&context).unwrap().recurring_bills.len(), 1);
}

#[test]
fn store_feeds_the_aggregator() {
    let (_dir, store) = store();
    let context = UserContext::new(Uuid::new_v4());
    store
        .add_recurring_bill(
            &context,
            RecurringBillDefinition::new("Rent", 900.0, date(2024, 1, 5), RecurrenceType::Monthly),
        )
        .unwrap();
    store
        .add_transaction(
            &context,
            Transaction::new("Salary", 2500.0, TransactionType::Income, date(2024, 6, 1)),
        )
        .unwrap();

    let window = DateRange::new(date(2024, 6, 1), date(2024, 6, 30)).unwrap();
    let feed = block_on(ActivityAggregator::collect(&context, window, &store, &store));
    assert!(!feed.is_degraded());
    let descriptions: Vec<_> = feed
        .activities
        .iter()
        .map(|activity| activity.description.as_str())
        .collect();
    assert_eq!(descriptions, vec!["Salary", "Rent"]);
}

#[test]
fn corrupt_snapshot_reports_serde_error_and_degrades_feed() {
    let (_dir, store) = store();
    let context = UserContext::new(Uuid::new_v4());
    fs::write(store.snapshot_path(&context), "{ broken").expect("write corrupt snapshot");

    assert!(matches!(store.load(&context), Err(CoreError::Serde(_))));

    let window = DateRange::day(date(2024, 6, 1));
    let feed = block_on(ActivityAggregator::collect(&context, window, &store, &store));
    assert!(feed.activities.is_empty());
    assert_eq!(feed.failures.len(), 2);
}

#[test]
fn newer_schema_is_rejected() {
    let (_dir, store) = store();
    let context = UserContext::new(Uuid::new_v4());
    fs::write(
        store.snapshot_path(&context),
        r#"{"schema_version": 99, "transactions": []}"#,
    )
    .expect("write snapshot");
    assert!(matches!(store.load(&context), Err(CoreError::Storage(_))));
}
