// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Weekgrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Weekgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! The planner is a fixed 7-day row axis crossed with a configurable number of columns. Cell
//! and header text live in [`ScheduleState`]; scalar settings live in [`Settings`].

pub mod days;
pub mod keys;
pub mod schedule;
pub mod settings;

pub use days::{Day, DayDescriptor, UnknownDayError};
pub use keys::{
    CellKey, ColumnCount, ColumnCountError, ColumnIndex, ColumnIndexError, HeaderKey, StorageKey,
    DEFAULT_COLUMNS, MAX_COLUMNS, MIN_COLUMNS,
};
pub use schedule::ScheduleState;
pub use settings::{PlannerState, Settings, DEFAULT_COLUMN_TIME_LABEL, DEFAULT_WEEK_TITLE};
