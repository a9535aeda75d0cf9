// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Weekgrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Weekgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Column indices, column counts and the storage key derivations shared by writers and readers.

use std::fmt;
use std::str::FromStr;

use super::days::Day;

pub const MIN_COLUMNS: u8 = 1;
pub const MAX_COLUMNS: u8 = 10;
pub const DEFAULT_COLUMNS: u8 = 8;

/// A 1-based column position.
///
/// Indices beyond the current [`ColumnCount`] are valid: entries stored for them are kept and
/// simply not rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColumnIndex(u8);

impl ColumnIndex {
    pub fn new(index: u8) -> Result<Self, ColumnIndexError> {
        if index == 0 {
            return Err(ColumnIndexError);
        }
        Ok(Self(index))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Label used when the column has no header text.
    pub fn default_label(self) -> String {
        format!("Box {}", self.0)
    }
}

impl fmt::Display for ColumnIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnIndexError;

impl fmt::Display for ColumnIndexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("column index must be at least 1")
    }
}

impl std::error::Error for ColumnIndexError {}

/// Number of rendered columns, always within `MIN_COLUMNS..=MAX_COLUMNS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColumnCount(u8);

impl ColumnCount {
    pub fn new(requested: i64) -> Result<Self, ColumnCountError> {
        if requested < i64::from(MIN_COLUMNS) || requested > i64::from(MAX_COLUMNS) {
            return Err(ColumnCountError::OutOfRange { requested });
        }
        Ok(Self(requested as u8))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn columns(self) -> impl Iterator<Item = ColumnIndex> {
        (1..=self.0).map(ColumnIndex)
    }

    pub fn contains(self, column: ColumnIndex) -> bool {
        column.0 <= self.0
    }
}

impl Default for ColumnCount {
    fn default() -> Self {
        Self(DEFAULT_COLUMNS)
    }
}

impl fmt::Display for ColumnCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ColumnCount {
    type Err = ColumnCountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let requested = trimmed
            .parse::<i64>()
            .map_err(|_| ColumnCountError::NotAnInteger { raw: s.to_owned() })?;
        Self::new(requested)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnCountError {
    OutOfRange { requested: i64 },
    NotAnInteger { raw: String },
}

impl fmt::Display for ColumnCountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { requested } => write!(
                f,
                "column count must be between {MIN_COLUMNS} and {MAX_COLUMNS} (got {requested})"
            ),
            Self::NotAnInteger { raw } => {
                write!(f, "column count must be a whole number (got {raw:?})")
            }
        }
    }
}

impl std::error::Error for ColumnCountError {}

/// Key of one schedule cell: `{day}_{column}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellKey {
    day: Day,
    column: ColumnIndex,
}

impl CellKey {
    pub fn new(day: Day, column: ColumnIndex) -> Self {
        Self { day, column }
    }

    pub fn day(&self) -> Day {
        self.day
    }

    pub fn column(&self) -> ColumnIndex {
        self.column
    }
}

impl fmt::Display for CellKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.day.key(), self.column)
    }
}

/// Key of one column header: `col_{column}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HeaderKey(ColumnIndex);

impl HeaderKey {
    pub fn new(column: ColumnIndex) -> Self {
        Self(column)
    }

    pub fn column(&self) -> ColumnIndex {
        self.0
    }
}

impl fmt::Display for HeaderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "col_{}", self.0)
    }
}

/// Every key this application writes to the durable store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StorageKey {
    Schedule,
    Headers,
    WeekTitle,
    ColumnTimeLabel,
    ColumnCount,
}

impl StorageKey {
    pub const ALL: [StorageKey; 5] = [
        StorageKey::Schedule,
        StorageKey::Headers,
        StorageKey::WeekTitle,
        StorageKey::ColumnTimeLabel,
        StorageKey::ColumnCount,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Schedule => "schedule",
            Self::Headers => "headers",
            Self::WeekTitle => "weekTitle",
            Self::ColumnTimeLabel => "columnTimeLabel",
            Self::ColumnCount => "columnCount",
        }
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
