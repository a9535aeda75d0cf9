// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Weekgrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Weekgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::{BTreeMap, BTreeSet};
use std::time::{Duration, Instant};

use crate::grid::GridPlan;
use crate::model::{CellKey, ColumnIndex};
use crate::planner::RenderSink;
use crate::ui::{Notice, NoticeSlot};

/// Terminal-side mirror of what the planner pushes: highlight flags, column labels, titles and
/// the notice line. Cell text is read from the planner's plan at draw time.
#[derive(Debug)]
pub(crate) struct View {
    pub(crate) week_title: String,
    pub(crate) corner: String,
    pub(crate) content: BTreeSet<CellKey>,
    pub(crate) column_labels: BTreeMap<ColumnIndex, String>,
    notices: NoticeSlot,
}

impl View {
    pub(crate) fn new(notice_duration: Duration) -> Self {
        Self {
            week_title: String::new(),
            corner: String::new(),
            content: BTreeSet::new(),
            column_labels: BTreeMap::new(),
            notices: NoticeSlot::new(notice_duration),
        }
    }

    pub(crate) fn notice(&mut self, now: Instant) -> Option<&Notice> {
        self.notices.current(now)
    }

    pub(crate) fn column_label(&self, column: ColumnIndex) -> Option<&str> {
        self.column_labels.get(&column).map(String::as_str)
    }
}

impl RenderSink for View {
    fn render(&mut self, plan: &GridPlan) {
        self.corner = plan.corner.text.clone();
        self.content = plan
            .rows
            .iter()
            .flat_map(|row| &row.cells)
            .filter(|cell| cell.has_content)
            .map(|cell| cell.key)
            .collect();
        self.column_labels = plan
            .headers
            .iter()
            .map(|header| (header.column(), header.label.clone()))
            .collect();
    }

    fn update_column_label(&mut self, column: ColumnIndex, label: &str) {
        if let Some(existing) = self.column_labels.get_mut(&column) {
            *existing = label.to_owned();
        }
    }

    fn set_has_content(&mut self, key: &CellKey, has_content: bool) {
        if has_content {
            self.content.insert(*key);
        } else {
            self.content.remove(key);
        }
    }

    fn notify(&mut self, notice: Notice) {
        self.notices.show(notice, Instant::now());
    }

    fn update_week_title(&mut self, title: &str) {
        self.week_title = title.to_owned();
    }

    fn update_corner_label(&mut self, text: &str) {
        self.corner = text.to_owned();
    }
}
