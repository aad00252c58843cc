#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use tally::cli::system_clock::FixedClock;
use tally::services::OrganizerService;
use tally_domain::UserContext;
use tally_storage_json::JsonDataStore;
use tempfile::TempDir;
use uuid::Uuid;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Fresh directory that outlives the calling test.
pub fn temp_base() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Organizer over an empty JSON store in its own directory, pinned to `today`.
pub fn organizer_at(today: NaiveDate) -> OrganizerService<JsonDataStore> {
    let store = JsonDataStore::new(temp_base().join("data")).expect("create json store");
    OrganizerService::new(
        store,
        UserContext::new(Uuid::new_v4()),
        Arc::new(FixedClock::new(today)),
    )
}
