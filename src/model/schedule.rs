// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Weekgrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Weekgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;

use serde_json::Value;

use super::keys::{CellKey, ColumnIndex, HeaderKey, StorageKey};
use crate::store::DurableStore;

/// Cell and header text, keyed exactly as persisted.
///
/// A key is present only while its text is non-blank. Blank edits remove the key instead of
/// storing an empty string, so map membership doubles as the "has content" flag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleState {
    cells: BTreeMap<String, String>,
    headers: BTreeMap<String, String>,
}

impl ScheduleState {
    pub fn load<S: DurableStore + ?Sized>(store: &S) -> Self {
        Self {
            cells: parse_text_map(StorageKey::Schedule, store.get(StorageKey::Schedule.as_str())),
            headers: parse_text_map(StorageKey::Headers, store.get(StorageKey::Headers.as_str())),
        }
    }

    pub fn cells(&self) -> &BTreeMap<String, String> {
        &self.cells
    }

    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    pub fn cell(&self, key: &CellKey) -> Option<&str> {
        self.cells.get(&key.to_string()).map(String::as_str)
    }

    pub fn has_content(&self, key: &CellKey) -> bool {
        self.cells.contains_key(&key.to_string())
    }

    /// Stores `text` untrimmed when it has visible content, otherwise removes the cell.
    ///
    /// Returns whether the cell has content afterwards.
    pub fn set_cell(&mut self, key: &CellKey, text: &str) -> bool {
        set_or_prune(&mut self.cells, key.to_string(), text)
    }

    pub fn header(&self, column: ColumnIndex) -> Option<&str> {
        self.headers.get(&HeaderKey::new(column).to_string()).map(String::as_str)
    }

    pub fn set_header(&mut self, column: ColumnIndex, text: &str) -> bool {
        set_or_prune(&mut self.headers, HeaderKey::new(column).to_string(), text)
    }

    /// Resolved display label for a column: trimmed header text or `Box {n}`.
    pub fn column_label(&self, column: ColumnIndex) -> String {
        match self.header(column) {
            Some(text) => text.trim().to_owned(),
            None => column.default_label(),
        }
    }

    pub fn cells_value(&self) -> Value {
        map_to_value(&self.cells)
    }

    pub fn headers_value(&self) -> Value {
        map_to_value(&self.headers)
    }

    pub fn clear(&mut self) {
        self.cells.clear();
        self.headers.clear();
    }
}

fn set_or_prune(map: &mut BTreeMap<String, String>, key: String, text: &str) -> bool {
    if text.trim().is_empty() {
        map.remove(&key);
        false
    } else {
        map.insert(key, text.to_owned());
        true
    }
}

fn map_to_value(map: &BTreeMap<String, String>) -> Value {
    Value::Object(
        map.iter()
            .map(|(key, text)| (key.clone(), Value::String(text.clone())))
            .collect(),
    )
}

/// Parses a persisted string map, falling back to an empty map on any malformed input.
///
/// Non-string values are dropped and blank strings are pruned so a hand-edited store cannot
/// break the presence invariant.
pub(crate) fn parse_text_map(key: StorageKey, raw: Option<String>) -> BTreeMap<String, String> {
    let Some(raw) = raw else {
        return BTreeMap::new();
    };

    let object = match serde_json::from_str::<Value>(&raw) {
        Ok(Value::Object(object)) => object,
        Ok(other) => {
            tracing::debug!(%key, found = json_kind(&other), "persisted map is not an object");
            return BTreeMap::new();
        }
        Err(err) => {
            tracing::debug!(%key, error = %err, "persisted map is not valid JSON");
            return BTreeMap::new();
        }
    };

    object
        .into_iter()
        .filter_map(|(entry_key, value)| match value {
            Value::String(text) if !text.trim().is_empty() => Some((entry_key, text)),
            _ => None,
        })
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
