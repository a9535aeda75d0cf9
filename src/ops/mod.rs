// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Weekgrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Weekgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! State transitions for the planner.
//!
//! Operations mutate [`PlannerState`] only. Each returns a [`Change`] describing the writes to
//! queue and the effect on the rendered grid, so the controller can persist and reconcile
//! without the transition knowing about either.

use std::fmt;

use crate::model::{
    CellKey, ColumnCount, ColumnCountError, ColumnIndex, Day, PlannerState, StorageKey,
};
use crate::queue::QueuedValue;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    SetCell { day: Day, column: ColumnIndex, text: String },
    SetHeader { column: ColumnIndex, text: String },
    SetWeekTitle { text: String },
    SetColumnTimeLabel { text: String },
    ChangeColumnCount { requested: i64 },
}

/// What a render sink has to do after an op.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    CellContent { key: CellKey, text: String, has_content: bool },
    ColumnLabel { column: ColumnIndex, text: String, label: String },
    WeekTitle { title: String },
    CornerLabel { text: String },
    Rebuild,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Change {
    pub writes: Vec<(StorageKey, QueuedValue)>,
    /// Commit everything pending right after queueing `writes`.
    pub flush: bool,
    pub effect: Effect,
}

impl Change {
    fn debounced(key: StorageKey, value: QueuedValue, effect: Effect) -> Self {
        Self {
            writes: vec![(key, value)],
            flush: false,
            effect,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyError {
    InvalidColumnCount(ColumnCountError),
}

impl fmt::Display for ApplyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidColumnCount(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for ApplyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidColumnCount(err) => Some(err),
        }
    }
}

pub fn apply_op(state: &mut PlannerState, op: &Op) -> Result<Change, ApplyError> {
    match op {
        Op::SetCell { day, column, text } => Ok(set_cell(state, *day, *column, text)),
        Op::SetHeader { column, text } => Ok(set_header(state, *column, text)),
        Op::SetWeekTitle { text } => Ok(set_week_title(state, text)),
        Op::SetColumnTimeLabel { text } => Ok(set_column_time_label(state, text)),
        Op::ChangeColumnCount { requested } => change_column_count(state, *requested),
    }
}

pub fn set_cell(state: &mut PlannerState, day: Day, column: ColumnIndex, text: &str) -> Change {
    let key = CellKey::new(day, column);
    let has_content = state.schedule.set_cell(&key, text);
    Change::debounced(
        StorageKey::Schedule,
        QueuedValue::Serialize(state.schedule.cells_value()),
        Effect::CellContent {
            key,
            text: text.to_owned(),
            has_content,
        },
    )
}

pub fn set_header(state: &mut PlannerState, column: ColumnIndex, text: &str) -> Change {
    state.schedule.set_header(column, text);
    Change::debounced(
        StorageKey::Headers,
        QueuedValue::Serialize(state.schedule.headers_value()),
        Effect::ColumnLabel {
            column,
            text: text.to_owned(),
            label: state.schedule.column_label(column),
        },
    )
}

pub fn set_week_title(state: &mut PlannerState, text: &str) -> Change {
    state.settings.week_title = text.to_owned();
    Change::debounced(
        StorageKey::WeekTitle,
        QueuedValue::Raw(text.to_owned()),
        Effect::WeekTitle { title: text.to_owned() },
    )
}

pub fn set_column_time_label(state: &mut PlannerState, text: &str) -> Change {
    state.settings.column_time_label = text.to_owned();
    Change::debounced(
        StorageKey::ColumnTimeLabel,
        QueuedValue::Raw(text.to_owned()),
        Effect::CornerLabel { text: text.to_owned() },
    )
}

/// Validates before touching state; a rejected count changes nothing.
pub fn change_column_count(state: &mut PlannerState, requested: i64) -> Result<Change, ApplyError> {
    let count = ColumnCount::new(requested).map_err(ApplyError::InvalidColumnCount)?;
    state.settings.column_count = count;
    Ok(Change {
        writes: vec![(StorageKey::ColumnCount, QueuedValue::Raw(count.to_string()))],
        flush: true,
        effect: Effect::Rebuild,
    })
}
