// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Weekgrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Weekgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Weekgrid: a terminal weekly planner grid.
//!
//! Seven day rows by a configurable number of columns. Edits are persisted through a per-key
//! debounced write queue; the grid can be exported as a paginated print layout or a PNG.

pub mod config;
pub mod export;
pub mod grid;
pub mod model;
pub mod ops;
pub mod planner;
pub mod queue;
pub mod render;
pub mod store;
pub mod tui;
pub mod ui;

#[cfg(test)]
pub(crate) mod test_support;
