// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Weekgrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Weekgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::keys::{ColumnCount, StorageKey};
use super::schedule::ScheduleState;
use crate::store::DurableStore;

pub const DEFAULT_WEEK_TITLE: &str = "Weekly Planner";
pub const DEFAULT_COLUMN_TIME_LABEL: &str = "Time";

/// Scalar configuration persisted next to the schedule, one store key each.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub column_count: ColumnCount,
    pub week_title: String,
    pub column_time_label: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            column_count: ColumnCount::default(),
            week_title: DEFAULT_WEEK_TITLE.to_owned(),
            column_time_label: DEFAULT_COLUMN_TIME_LABEL.to_owned(),
        }
    }
}

impl Settings {
    /// Reads each scalar independently; an unreadable column count falls back to the default.
    pub fn load<S: DurableStore + ?Sized>(store: &S) -> Self {
        let defaults = Self::default();

        let column_count = match store.get(StorageKey::ColumnCount.as_str()) {
            Some(raw) => raw.parse::<ColumnCount>().unwrap_or_else(|err| {
                tracing::debug!(error = %err, "ignoring persisted column count");
                defaults.column_count
            }),
            None => defaults.column_count,
        };

        Self {
            column_count,
            week_title: store
                .get(StorageKey::WeekTitle.as_str())
                .unwrap_or(defaults.week_title),
            column_time_label: store
                .get(StorageKey::ColumnTimeLabel.as_str())
                .unwrap_or(defaults.column_time_label),
        }
    }
}

/// Everything the planner keeps in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlannerState {
    pub schedule: ScheduleState,
    pub settings: Settings,
}

impl PlannerState {
    pub fn load<S: DurableStore + ?Sized>(store: &S) -> Self {
        Self {
            schedule: ScheduleState::load(store),
            settings: Settings::load(store),
        }
    }

    pub fn reset(&mut self) {
        self.schedule.clear();
        self.settings = Settings::default();
    }
}
