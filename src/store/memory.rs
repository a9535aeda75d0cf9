// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Weekgrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Weekgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;

use super::{DurableStore, StoreError};

/// In-memory store with an optional size quota.
///
/// The quota counts key and value bytes of every entry, mirroring how browser storage reports
/// "quota exceeded" for a write that would grow past the limit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
    quota: Option<usize>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(quota: usize) -> Self {
        Self {
            quota: Some(quota),
            ..Self::default()
        }
    }

    pub fn entries(&self) -> &BTreeMap<String, String> {
        &self.entries
    }

    /// Number of successful `set` calls so far.
    pub fn write_count(&self) -> usize {
        self.writes
    }

    fn used_bytes_without(&self, key: &str) -> usize {
        self.entries
            .iter()
            .filter(|(existing, _)| existing.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

impl DurableStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        if let Some(quota) = self.quota {
            let needed = self.used_bytes_without(key) + key.len() + value.len();
            if needed > quota {
                return Err(StoreError::QuotaExceeded {
                    key: key.to_owned(),
                    needed,
                    quota,
                });
            }
        }
        self.entries.insert(key.to_owned(), value.to_owned());
        self.writes += 1;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryStore;
    use crate::store::{DurableStore, StoreError};

    #[test]
    fn set_get_remove() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("weekTitle"), None);

        store.set("weekTitle", "Week 1").expect("set");
        assert_eq!(store.get("weekTitle").as_deref(), Some("Week 1"));
        assert_eq!(store.write_count(), 1);

        store.remove("weekTitle").expect("remove");
        assert_eq!(store.get("weekTitle"), None);
    }

    #[test]
    fn quota_rejects_growth_but_allows_replacing_within_budget() {
        let mut store = MemoryStore::with_quota(16);
        store.set("weekTitle", "abcdef").expect("fits");

        let err = store.set("weekTitle", "abcdefgh").expect_err("over quota");
        assert!(matches!(err, StoreError::QuotaExceeded { needed: 17, quota: 16, .. }));
        assert_eq!(store.get("weekTitle").as_deref(), Some("abcdef"));

        store.set("weekTitle", "abc").expect("smaller value fits");
        assert_eq!(store.write_count(), 2);
    }
}
