// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Weekgrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Weekgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Durable key-value persistence.
//!
//! The planner only needs a synchronous string map. [`FileStore`] keeps the whole namespace in a
//! single JSON object file; [`MemoryStore`] backs tests and ephemeral runs.

use std::fmt;
use std::io;
use std::path::PathBuf;

mod atomic;
pub mod file;
pub mod memory;

pub(crate) use atomic::write_atomic;
pub use file::FileStore;
pub use memory::MemoryStore;

/// Synchronous string-keyed, string-valued persistent map.
pub trait DurableStore {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

impl<S: DurableStore + ?Sized> DurableStore for Box<S> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum WriteDurability {
    /// Writes a temp file and renames atomically into place, without fsync.
    #[default]
    BestEffort,

    /// Additionally syncs file contents and the parent directory where supported.
    Durable,
}

#[derive(Debug)]
pub enum StoreError {
    Io { path: PathBuf, source: io::Error },
    Json { path: PathBuf, source: serde_json::Error },
    Encode { key: String, source: serde_json::Error },
    QuotaExceeded { key: String, needed: usize, quota: usize },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "io error at {path:?}: {source}"),
            Self::Json { path, source } => write!(f, "json error at {path:?}: {source}"),
            Self::Encode { key, source } => write!(f, "cannot encode value for {key:?}: {source}"),
            Self::QuotaExceeded { key, needed, quota } => write!(
                f,
                "storage quota exceeded writing {key:?} ({needed} bytes needed, quota {quota})"
            ),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            Self::Encode { source, .. } => Some(source),
            Self::QuotaExceeded { .. } => None,
        }
    }
}
