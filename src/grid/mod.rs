// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Weekgrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Weekgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Grid building and reconciliation.
//!
//! [`build_grid`] turns the schedule plus a column count into a complete [`GridPlan`]. It always
//! regenerates the plan from scratch; the few live updates that do not need a rebuild (cell
//! content, header labels) go through the `GridPlan` setters instead.

use std::collections::BTreeMap;

use crate::model::{CellKey, ColumnCount, ColumnIndex, Day, HeaderKey, ScheduleState};

/// Resolved label per rendered column, shared by every cell in that column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnLabels {
    labels: BTreeMap<ColumnIndex, String>,
}

impl ColumnLabels {
    pub fn rebuild(&mut self, count: ColumnCount, schedule: &ScheduleState) {
        self.labels.clear();
        for column in count.columns() {
            self.labels.insert(column, schedule.column_label(column));
        }
    }

    pub fn get(&self, column: ColumnIndex) -> Option<&str> {
        self.labels.get(&column).map(String::as_str)
    }

    /// Updates one cached label. Returns false when nothing changed, including for columns
    /// outside the rendered range.
    pub fn set(&mut self, column: ColumnIndex, label: String) -> bool {
        match self.labels.get_mut(&column) {
            Some(existing) if *existing != label => {
                *existing = label;
                true
            }
            _ => false,
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ColumnIndex, &str)> {
        self.labels.iter().map(|(column, label)| (*column, label.as_str()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CornerCell {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell {
    pub key: HeaderKey,
    /// Raw header text; empty when the column has no header entry.
    pub text: String,
    pub placeholder: String,
    pub label: String,
}

impl HeaderCell {
    pub fn column(&self) -> ColumnIndex {
        self.key.column()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataCell {
    pub key: CellKey,
    pub text: String,
    pub has_content: bool,
    pub column_label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayRow {
    pub day: Day,
    pub cells: Vec<DataCell>,
}

/// Everything a render sink needs to draw the planner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridPlan {
    pub column_count: ColumnCount,
    pub corner: CornerCell,
    pub headers: Vec<HeaderCell>,
    pub rows: Vec<DayRow>,
}

/// One cell of the plan in render order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridCell<'a> {
    Corner(&'a CornerCell),
    Header(&'a HeaderCell),
    DayLabel(Day),
    Data(&'a DataCell),
}

impl GridPlan {
    /// Corner, headers, then each day label followed by its data cells.
    pub fn cells(&self) -> impl Iterator<Item = GridCell<'_>> + '_ {
        std::iter::once(GridCell::Corner(&self.corner))
            .chain(self.headers.iter().map(GridCell::Header))
            .chain(self.rows.iter().flat_map(|row| {
                std::iter::once(GridCell::DayLabel(row.day))
                    .chain(row.cells.iter().map(GridCell::Data))
            }))
    }

    pub fn element_count(&self) -> usize {
        let columns = usize::from(self.column_count.get());
        1 + columns + self.rows.len() * (1 + columns)
    }

    pub fn header(&self, column: ColumnIndex) -> Option<&HeaderCell> {
        self.headers.iter().find(|header| header.column() == column)
    }

    pub fn data_cell(&self, key: &CellKey) -> Option<&DataCell> {
        self.rows
            .get(key.day().index())
            .and_then(|row| row.cells.iter().find(|cell| cell.key == *key))
    }

    fn data_cell_mut(&mut self, key: &CellKey) -> Option<&mut DataCell> {
        self.rows
            .get_mut(key.day().index())
            .and_then(|row| row.cells.iter_mut().find(|cell| cell.key == *key))
    }

    /// Updates a rendered cell in place. Returns false when the cell is not rendered.
    pub fn set_cell(&mut self, key: &CellKey, text: &str, has_content: bool) -> bool {
        let Some(cell) = self.data_cell_mut(key) else {
            return false;
        };
        cell.text = text.to_owned();
        cell.has_content = has_content;
        true
    }

    pub fn set_header_text(&mut self, column: ColumnIndex, text: &str) -> bool {
        match self.headers.iter_mut().find(|header| header.column() == column) {
            Some(header) => {
                header.text = text.to_owned();
                true
            }
            None => false,
        }
    }

    /// Pushes a new column label to the header and every day cell of that column.
    pub fn apply_column_label(&mut self, column: ColumnIndex, label: &str) -> bool {
        let Some(header) = self.headers.iter_mut().find(|header| header.column() == column)
        else {
            return false;
        };
        header.label = label.to_owned();
        for row in &mut self.rows {
            for cell in row.cells.iter_mut().filter(|cell| cell.key.column() == column) {
                cell.column_label = label.to_owned();
            }
        }
        true
    }
}

/// Builds the full plan.
///
/// Labels are resolved into `labels` first; day rows read them back so every cell in a column
/// carries the same label.
pub fn build_grid(
    count: ColumnCount,
    column_time_label: &str,
    schedule: &ScheduleState,
    labels: &mut ColumnLabels,
) -> GridPlan {
    labels.rebuild(count, schedule);

    let headers = count
        .columns()
        .map(|column| HeaderCell {
            key: HeaderKey::new(column),
            text: schedule.header(column).unwrap_or_default().to_owned(),
            placeholder: column.default_label(),
            label: labels.get(column).unwrap_or_default().to_owned(),
        })
        .collect();

    let rows = Day::ALL
        .into_iter()
        .map(|day| DayRow {
            day,
            cells: count
                .columns()
                .map(|column| {
                    let key = CellKey::new(day, column);
                    let text = schedule.cell(&key);
                    DataCell {
                        key,
                        text: text.unwrap_or_default().to_owned(),
                        has_content: text.is_some(),
                        column_label: labels.get(column).unwrap_or_default().to_owned(),
                    }
                })
                .collect(),
        })
        .collect();

    GridPlan {
        column_count: count,
        corner: CornerCell {
            text: column_time_label.to_owned(),
        },
        headers,
        rows,
    }
}
