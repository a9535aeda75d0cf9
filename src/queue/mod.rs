// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Weekgrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Weekgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Debounced write queue.
//!
//! Each storage key has one pending slot and its own deadline. A newer write for a key replaces
//! the slot and re-arms the deadline, so only the latest value is ever committed. The queue
//! never reads the clock itself: callers pass `now`, and the event loop sleeps until
//! [`WriteQueue::next_deadline`].

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use serde_json::Value;

use crate::model::StorageKey;
use crate::store::{DurableStore, StoreError};

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(350);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// JSON-encode the value at commit time.
    Serialize,
    /// Store the string as-is.
    Raw,
}

#[derive(Debug, Clone, PartialEq)]
pub enum QueuedValue {
    Serialize(Value),
    Raw(String),
}

impl QueuedValue {
    pub fn mode(&self) -> WriteMode {
        match self {
            Self::Serialize(_) => WriteMode::Serialize,
            Self::Raw(_) => WriteMode::Raw,
        }
    }

    fn encode(&self, key: StorageKey) -> Result<String, StoreError> {
        match self {
            Self::Serialize(value) => {
                serde_json::to_string(value).map_err(|source| StoreError::Encode {
                    key: key.as_str().to_owned(),
                    source,
                })
            }
            Self::Raw(raw) => Ok(raw.clone()),
        }
    }
}

#[derive(Debug, Clone)]
struct PendingWrite {
    value: QueuedValue,
    deadline: Instant,
}

/// Outcome of one commit pass. Failed keys are already logged; the report lets callers decide
/// whether to tell the user.
#[derive(Debug, Default)]
pub struct CommitReport {
    pub committed: Vec<StorageKey>,
    pub failed: Vec<(StorageKey, StoreError)>,
}

impl CommitReport {
    pub fn is_empty(&self) -> bool {
        self.committed.is_empty() && self.failed.is_empty()
    }

    pub fn is_ok(&self) -> bool {
        self.failed.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct WriteQueue {
    delay: Duration,
    pending: BTreeMap<StorageKey, PendingWrite>,
}

impl Default for WriteQueue {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl WriteQueue {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: BTreeMap::new(),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn is_pending(&self, key: StorageKey) -> bool {
        self.pending.contains_key(&key)
    }

    pub fn pending_value(&self, key: StorageKey) -> Option<&QueuedValue> {
        self.pending.get(&key).map(|pending| &pending.value)
    }

    /// Records `value` as the latest write for `key` and re-arms that key's deadline.
    pub fn enqueue(&mut self, key: StorageKey, value: QueuedValue, now: Instant) {
        let deadline = now + self.delay;
        self.pending.insert(key, PendingWrite { value, deadline });
    }

    /// Earliest deadline among pending writes.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.values().map(|pending| pending.deadline).min()
    }

    /// Commits every write whose deadline has passed.
    pub fn commit_due<S: DurableStore + ?Sized>(
        &mut self,
        now: Instant,
        store: &mut S,
    ) -> CommitReport {
        let due = self
            .pending
            .iter()
            .filter(|(_, pending)| pending.deadline <= now)
            .map(|(key, _)| *key)
            .collect::<Vec<_>>();

        let mut report = CommitReport::default();
        for key in due {
            if let Some(pending) = self.pending.remove(&key) {
                commit(key, &pending.value, store, &mut report);
            }
        }
        report
    }

    /// Cancels every deadline and commits every pending write now.
    pub fn flush_all<S: DurableStore + ?Sized>(&mut self, store: &mut S) -> CommitReport {
        let mut report = CommitReport::default();
        for (key, pending) in std::mem::take(&mut self.pending) {
            commit(key, &pending.value, store, &mut report);
        }
        report
    }

    /// Cancels every deadline and drops every pending write without committing.
    ///
    /// Returns the number of discarded writes.
    pub fn reset_all(&mut self) -> usize {
        let discarded = self.pending.len();
        self.pending.clear();
        discarded
    }
}

fn commit<S: DurableStore + ?Sized>(
    key: StorageKey,
    value: &QueuedValue,
    store: &mut S,
    report: &mut CommitReport,
) {
    let result = value.encode(key).and_then(|encoded| store.set(key.as_str(), &encoded));
    match result {
        Ok(()) => {
            tracing::debug!(%key, mode = ?value.mode(), "committed pending write");
            report.committed.push(key);
        }
        Err(err) => {
            tracing::warn!(
                %key,
                error = %err,
                "failed to persist pending write; keeping in-memory state"
            );
            report.failed.push((key, err));
        }
    }
}
