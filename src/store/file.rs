// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Weekgrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Weekgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::{write_atomic, DurableStore, StoreError, WriteDurability};

pub const STORE_FILENAME: &str = "store.json";

/// A durable store kept as one JSON object file.
///
/// The file is read once on open and rewritten atomically on every mutation. A mutation whose
/// write fails leaves both the file and the in-memory view unchanged.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    durability: WriteDurability,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Opens the store at `path`.
    ///
    /// A missing file is an empty store. A file that is not a JSON object of strings is treated
    /// as empty too (and replaced on the next write); only real I/O failures are errors.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(raw) => parse_entries(&path, &raw),
            Err(err) if err.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(StoreError::Io { path, source }),
        };

        Ok(Self {
            path,
            durability: WriteDurability::default(),
            entries,
        })
    }

    pub fn open_in_dir(dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        Self::open(dir.as_ref().join(STORE_FILENAME))
    }

    pub fn with_durability(mut self, durability: WriteDurability) -> Self {
        self.durability = durability;
        self
    }

    pub fn durability(&self) -> WriteDurability {
        self.durability
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> Result<(), StoreError> {
        let mut json = serde_json::to_string_pretty(entries).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })?;
        json.push('\n');
        write_atomic(&self.path, json.as_bytes(), self.durability)
    }
}

fn parse_entries(path: &Path, raw: &str) -> BTreeMap<String, String> {
    match serde_json::from_str::<BTreeMap<String, String>>(raw) {
        Ok(entries) => entries,
        Err(err) => {
            tracing::warn!(
                path = %path.display(),
                error = %err,
                "store file is malformed; starting empty"
            );
            BTreeMap::new()
        }
    }
}

impl DurableStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.entries.get(key).is_some_and(|existing| existing == value) {
            return Ok(());
        }
        let mut next = self.entries.clone();
        next.insert(key.to_owned(), value.to_owned());
        self.persist(&next)?;
        self.entries = next;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        if !self.entries.contains_key(key) {
            return Ok(());
        }
        let mut next = self.entries.clone();
        next.remove(key);
        self.persist(&next)?;
        self.entries = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests;
