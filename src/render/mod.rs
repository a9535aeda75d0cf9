// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Weekgrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Weekgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Box-drawn text rendering of a [`GridPlan`].
//!
//! The table is laid out once into a [`GridTable`] (head block, one line block per day row,
//! footer) so the print export can paginate by whole rows and repeat the head on every page.

use crate::grid::GridPlan;

mod text;

pub(crate) use text::{cell_lines, pad_right, text_len};

pub const UNICODE_BOX_HORIZONTAL: char = '─';
pub const UNICODE_BOX_VERTICAL: char = '│';
pub const UNICODE_BOX_TOP_LEFT: char = '┌';
pub const UNICODE_BOX_TOP_RIGHT: char = '┐';
pub const UNICODE_BOX_BOTTOM_LEFT: char = '└';
pub const UNICODE_BOX_BOTTOM_RIGHT: char = '┘';
pub const UNICODE_BOX_TEE_RIGHT: char = '├';
pub const UNICODE_BOX_TEE_LEFT: char = '┤';
pub const UNICODE_BOX_TEE_DOWN: char = '┬';
pub const UNICODE_BOX_TEE_UP: char = '┴';
pub const UNICODE_BOX_CROSS: char = '┼';

pub const DEFAULT_MAX_CELL_WIDTH: usize = 18;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableOptions {
    /// Widest a column may grow; longer lines are cut with `…`. Day names are never cut.
    pub max_cell_width: usize,
    /// Prefix day names with their planetary glyph.
    pub day_glyphs: bool,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            max_cell_width: DEFAULT_MAX_CELL_WIDTH,
            day_glyphs: true,
        }
    }
}

/// A laid-out table. Every line has the same character width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridTable {
    /// Top border, header row lines, and the separator under them.
    pub head: Vec<String>,
    /// One block of lines per day row, without separators.
    pub rows: Vec<Vec<String>>,
    pub separator: String,
    pub footer: String,
}

impl GridTable {
    /// Lines needed to print `rows` consecutive day rows under the head.
    pub fn lines_for(&self, rows: &[Vec<String>]) -> usize {
        let body = rows.iter().map(Vec::len).sum::<usize>();
        self.head.len() + body + rows.len().saturating_sub(1) + 1
    }

    pub fn line_count(&self) -> usize {
        self.lines_for(&self.rows)
    }

    /// Renders the head, the given row blocks and the footer.
    pub fn render_rows(&self, rows: &[Vec<String>]) -> String {
        let mut lines = self.head.clone();
        for (idx, block) in rows.iter().enumerate() {
            if idx > 0 {
                lines.push(self.separator.clone());
            }
            lines.extend(block.iter().cloned());
        }
        lines.push(self.footer.clone());
        lines.join("\n")
    }

    pub fn to_text(&self) -> String {
        self.render_rows(&self.rows)
    }
}

pub fn layout_grid_table(plan: &GridPlan, options: &TableOptions) -> GridTable {
    let max = options.max_cell_width.max(1);

    let mut head_cells = Vec::with_capacity(plan.headers.len() + 1);
    head_cells.push(cell_lines(&plan.corner.text, max));
    head_cells.extend(plan.headers.iter().map(|header| cell_lines(&header.label, max)));

    let body_cells = plan
        .rows
        .iter()
        .map(|row| {
            let day = if options.day_glyphs {
                format!("{} {}", row.day.descriptor().glyph, row.day.name())
            } else {
                row.day.name().to_owned()
            };
            let mut cells = Vec::with_capacity(row.cells.len() + 1);
            cells.push(vec![day]);
            cells.extend(row.cells.iter().map(|cell| cell_lines(&cell.text, max)));
            cells
        })
        .collect::<Vec<_>>();

    let mut widths = vec![1usize; head_cells.len()];
    for cells in std::iter::once(&head_cells).chain(body_cells.iter()) {
        for (width, lines) in widths.iter_mut().zip(cells) {
            for line in lines {
                *width = (*width).max(text_len(line));
            }
        }
    }

    let mut head = vec![border(
        &widths,
        UNICODE_BOX_TOP_LEFT,
        UNICODE_BOX_TEE_DOWN,
        UNICODE_BOX_TOP_RIGHT,
    )];
    head.extend(row_lines(&head_cells, &widths));
    let separator = border(
        &widths,
        UNICODE_BOX_TEE_RIGHT,
        UNICODE_BOX_CROSS,
        UNICODE_BOX_TEE_LEFT,
    );
    head.push(separator.clone());

    GridTable {
        head,
        rows: body_cells.iter().map(|cells| row_lines(cells, &widths)).collect(),
        separator,
        footer: border(
            &widths,
            UNICODE_BOX_BOTTOM_LEFT,
            UNICODE_BOX_TEE_UP,
            UNICODE_BOX_BOTTOM_RIGHT,
        ),
    }
}

pub fn render_grid_text(plan: &GridPlan, options: &TableOptions) -> String {
    layout_grid_table(plan, options).to_text()
}

fn border(widths: &[usize], left: char, mid: char, right: char) -> String {
    let mut line = String::new();
    line.push(left);
    for (idx, width) in widths.iter().enumerate() {
        if idx > 0 {
            line.push(mid);
        }
        line.extend(std::iter::repeat(UNICODE_BOX_HORIZONTAL).take(width + 2));
    }
    line.push(right);
    line
}

fn row_lines(cells: &[Vec<String>], widths: &[usize]) -> Vec<String> {
    let height = cells.iter().map(Vec::len).max().unwrap_or(1).max(1);
    (0..height)
        .map(|y| {
            let mut line = String::new();
            line.push(UNICODE_BOX_VERTICAL);
            for (lines, width) in cells.iter().zip(widths) {
                let text = lines.get(y).map(String::as_str).unwrap_or_default();
                line.push(' ');
                line.push_str(&pad_right(text, *width));
                line.push(' ');
                line.push(UNICODE_BOX_VERTICAL);
            }
            line
        })
        .collect()
}

#[cfg(test)]
mod tests;
