// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Weekgrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Weekgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use rstest::{fixture, rstest};

use super::{FileStore, STORE_FILENAME};
use crate::store::{DurableStore, WriteDurability};
use crate::test_support::TempDir;

#[fixture]
fn tmp() -> TempDir {
    TempDir::new("file-store")
}

#[rstest]
fn missing_file_opens_empty(tmp: TempDir) {
    let store = FileStore::open_in_dir(tmp.path().join("data")).expect("open");
    assert_eq!(store.get("schedule"), None);
    assert!(!store.path().exists());
}

#[rstest]
fn values_survive_reopen(tmp: TempDir) {
    let dir = tmp.path().join("data");
    let mut store = FileStore::open_in_dir(&dir).expect("open");
    store.set("weekTitle", "Week 7").expect("set");
    store.set("schedule", r#"{"monday_1":"Gym"}"#).expect("set");

    let reopened = FileStore::open_in_dir(&dir).expect("reopen");
    assert_eq!(reopened.get("weekTitle").as_deref(), Some("Week 7"));
    assert_eq!(reopened.get("schedule").as_deref(), Some(r#"{"monday_1":"Gym"}"#));
}

#[rstest]
fn remove_is_persisted(tmp: TempDir) {
    let mut store = FileStore::open(tmp.path().join(STORE_FILENAME)).expect("open");
    store.set("columnCount", "4").expect("set");
    store.remove("columnCount").expect("remove");
    store.remove("columnCount").expect("removing a missing key is a no-op");

    let reopened = FileStore::open(tmp.path().join(STORE_FILENAME)).expect("reopen");
    assert_eq!(reopened.get("columnCount"), None);
}

#[rstest]
fn malformed_file_is_treated_as_empty_and_replaced(tmp: TempDir) {
    let path = tmp.path().join(STORE_FILENAME);
    std::fs::write(&path, "{ this is not json").unwrap();

    let mut store = FileStore::open(&path).expect("open tolerates garbage");
    assert_eq!(store.get("schedule"), None);

    store.set("weekTitle", "Fresh").expect("set");
    let raw = std::fs::read_to_string(&path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&raw).expect("valid json");
    assert_eq!(parsed["weekTitle"], "Fresh");
}

#[rstest]
fn failed_write_leaves_view_unchanged(tmp: TempDir) {
    // A directory where the file should be makes the rename fail.
    let path = tmp.path().join(STORE_FILENAME);
    std::fs::create_dir_all(path.join("blocker")).unwrap();

    let mut blocked = FileStore {
        path: path.clone(),
        durability: WriteDurability::BestEffort,
        entries: Default::default(),
    };
    blocked.set("weekTitle", "Lost").expect_err("rename onto a directory fails");
    assert_eq!(blocked.get("weekTitle"), None);
}

#[rstest]
fn durable_mode_writes_the_same_content(tmp: TempDir) {
    let mut store = FileStore::open_in_dir(tmp.path())
        .expect("open")
        .with_durability(WriteDurability::Durable);
    assert_eq!(store.durability(), WriteDurability::Durable);
    store.set("headers", r#"{"col_1":"Breakfast"}"#).expect("set");

    let reopened = FileStore::open_in_dir(tmp.path()).expect("reopen");
    assert_eq!(reopened.get("headers").as_deref(), Some(r#"{"col_1":"Breakfast"}"#));
}
