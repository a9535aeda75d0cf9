// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Weekgrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Weekgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::{layout_grid_table, render_grid_text, TableOptions};
use crate::grid::{build_grid, ColumnLabels, GridPlan};
use crate::model::{CellKey, ColumnCount, ColumnIndex, Day, ScheduleState};
use crate::render::text_len;

fn col(index: u8) -> ColumnIndex {
    ColumnIndex::new(index).expect("column")
}

fn plan_with(columns: i64, schedule: &ScheduleState) -> GridPlan {
    let count = ColumnCount::new(columns).expect("count");
    build_grid(count, "Time", schedule, &mut ColumnLabels::default())
}

#[test]
fn empty_grid_renders_one_line_per_row() {
    let plan = plan_with(2, &ScheduleState::default());
    let table = layout_grid_table(&plan, &TableOptions::default());

    // top, header, separator, 7 rows, 6 separators, bottom
    assert_eq!(table.line_count(), 17);
    let text = table.to_text();
    let lines = text.lines().collect::<Vec<_>>();
    assert_eq!(lines.len(), 17);
    assert_eq!(lines[0], "┌─────────────┬───────┬───────┐");
    assert_eq!(lines[1], "│ Time        │ Box 1 │ Box 2 │");
    assert_eq!(lines[2], "├─────────────┼───────┼───────┤");
    assert_eq!(lines[3], "│ ☾ Monday    │       │       │");
    assert_eq!(lines[7], "│ ☿ Wednesday │       │       │");
    assert_eq!(lines[16], "└─────────────┴───────┴───────┘");
}

#[test]
fn every_line_has_the_same_width() {
    let mut schedule = ScheduleState::default();
    schedule.set_cell(&CellKey::new(Day::Wednesday, col(1)), "Standup\nReview");
    schedule.set_header(col(2), "Lunch break");
    let plan = plan_with(3, &schedule);

    let text = render_grid_text(&plan, &TableOptions::default());
    let widths = text.lines().map(text_len).collect::<Vec<_>>();
    assert!(widths.windows(2).all(|pair| pair[0] == pair[1]), "{text}");
    assert!(text.contains("│ Lunch break │"));
}

#[test]
fn multi_line_cells_grow_their_row() {
    let mut schedule = ScheduleState::default();
    schedule.set_cell(&CellKey::new(Day::Tuesday, col(1)), "Gym\n7am");
    let plan = plan_with(1, &schedule);

    let table = layout_grid_table(&plan, &TableOptions::default());
    assert_eq!(table.rows[1].len(), 2);
    assert_eq!(table.line_count(), 18);
    assert!(table.rows[1][1].contains("7am"));
}

#[test]
fn long_entries_are_cut_to_the_column_limit() {
    let mut schedule = ScheduleState::default();
    schedule.set_cell(&CellKey::new(Day::Friday, col(1)), "Quarterly planning");
    let plan = plan_with(1, &schedule);
    let options = TableOptions {
        max_cell_width: 8,
        day_glyphs: false,
    };

    let text = render_grid_text(&plan, &options);
    assert!(text.contains("│ Quarter… │"), "{text}");
    assert!(text.contains("│ Friday    │"), "{text}");
    assert!(text.contains("│ Wednesday │"), "{text}");
}

#[test]
fn narrow_limit_still_cuts_the_corner_label() {
    let plan = plan_with(1, &ScheduleState::default());
    let options = TableOptions {
        max_cell_width: 2,
        day_glyphs: true,
    };

    let text = render_grid_text(&plan, &options);
    assert!(text.contains("│ T…          │"), "{text}");
    assert!(text.contains("│ ☿ Wednesday │"), "{text}");
}

#[test]
fn subset_of_rows_keeps_head_and_footer() {
    let plan = plan_with(1, &ScheduleState::default());
    let table = layout_grid_table(&plan, &TableOptions::default());

    let text = table.render_rows(&table.rows[5..]);
    let lines = text.lines().collect::<Vec<_>>();
    assert_eq!(lines.len(), table.lines_for(&table.rows[5..]));
    assert!(lines[3].contains("Saturday"));
    assert!(lines[5].contains("Sunday"));
}
