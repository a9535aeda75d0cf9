// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Weekgrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Weekgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::path::{Path, PathBuf};

use crate::grid::GridPlan;
use crate::render::{layout_grid_table, GridTable, TableOptions};
use crate::store::{write_atomic, WriteDurability};

use super::ExportError;

const PAGE_BREAK: &str = "\n\u{000C}\n";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintSummary {
    pub path: PathBuf,
    pub pages: usize,
}

/// Splits the table into pages of at most `lines_per_page` lines, counting the page header.
///
/// Pages break between day rows and repeat the table head. A single row taller than the budget
/// gets a page of its own.
pub fn paginate(table: &GridTable, title: &str, lines_per_page: usize) -> Vec<String> {
    let budget = lines_per_page.saturating_sub(1);

    let mut chunks = Vec::new();
    let mut start = 0;
    while start < table.rows.len() {
        let mut end = start + 1;
        while end < table.rows.len() && table.lines_for(&table.rows[start..=end]) <= budget {
            end += 1;
        }
        chunks.push(&table.rows[start..end]);
        start = end;
    }
    if chunks.is_empty() {
        chunks.push(&table.rows[..]);
    }

    let total = chunks.len();
    chunks
        .into_iter()
        .enumerate()
        .map(|(idx, rows)| {
            format!(
                "{title} — page {}/{total}\n{}",
                idx + 1,
                table.render_rows(rows)
            )
        })
        .collect()
}

pub fn print_document(plan: &GridPlan, title: &str, lines_per_page: usize) -> String {
    join_pages(&plan_pages(plan, title, lines_per_page))
}

pub fn write_print_layout(
    path: &Path,
    plan: &GridPlan,
    title: &str,
    lines_per_page: usize,
    durability: WriteDurability,
) -> Result<PrintSummary, ExportError> {
    let pages = plan_pages(plan, title, lines_per_page);
    let doc = join_pages(&pages);
    let pages = pages.len();
    write_atomic(path, doc.as_bytes(), durability)?;
    tracing::info!(path = %path.display(), pages, "print layout written");

    Ok(PrintSummary {
        path: path.to_path_buf(),
        pages,
    })
}

fn plan_pages(plan: &GridPlan, title: &str, lines_per_page: usize) -> Vec<String> {
    let table = layout_grid_table(plan, &TableOptions::default());
    paginate(&table, title, lines_per_page)
}

fn join_pages(pages: &[String]) -> String {
    let mut doc = pages.join(PAGE_BREAK);
    doc.push('\n');
    doc
}
