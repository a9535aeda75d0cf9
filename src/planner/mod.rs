// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Weekgrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Weekgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The planner controller.
//!
//! [`Planner`] is the single owner of the in-memory state, the label cache, the write queue and
//! the durable store. Every edit goes through a pure transition in [`crate::ops`]; the planner
//! queues the resulting writes and reconciles the effect into its [`GridPlan`] and a
//! [`RenderSink`].

use std::fmt;
use std::time::{Duration, Instant};

use crate::grid::{build_grid, ColumnLabels, GridPlan};
use crate::model::{
    CellKey, ColumnCount, ColumnCountError, ColumnIndex, Day, PlannerState, Settings, StorageKey,
};
use crate::ops::{self, ApplyError, Change, Effect, Op};
use crate::queue::{CommitReport, QueuedValue, WriteQueue};
use crate::store::{DurableStore, StoreError};
use crate::ui::Notice;

/// Presentation surface driven by the planner.
pub trait RenderSink {
    /// Replace everything with a freshly built plan.
    fn render(&mut self, plan: &GridPlan);

    fn update_column_label(&mut self, column: ColumnIndex, label: &str);

    fn set_has_content(&mut self, key: &CellKey, has_content: bool);

    fn notify(&mut self, notice: Notice);

    fn update_week_title(&mut self, _title: &str) {}

    fn update_corner_label(&mut self, _text: &str) {}
}

/// Sink for headless runs: notices go to the log, everything else is dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl RenderSink for NullSink {
    fn render(&mut self, _plan: &GridPlan) {}

    fn update_column_label(&mut self, _column: ColumnIndex, _label: &str) {}

    fn set_has_content(&mut self, _key: &CellKey, _has_content: bool) {}

    fn notify(&mut self, notice: Notice) {
        tracing::info!(level = ?notice.level, "{}", notice.message);
    }
}

/// Events after which nothing pending may stay unwritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleSignal {
    Quit,
    FocusLost,
    /// Ctrl-C, or the terminal failing under the event loop.
    Interrupted,
}

#[derive(Debug)]
pub enum PlannerError {
    InvalidColumnCount(ColumnCountError),
    Clear { failed: Vec<(StorageKey, StoreError)> },
}

impl fmt::Display for PlannerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidColumnCount(err) => write!(f, "{err}"),
            Self::Clear { failed } => {
                write!(f, "could not remove {} stored key(s)", failed.len())?;
                if let Some((key, err)) = failed.first() {
                    write!(f, " ({key}: {err})")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for PlannerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidColumnCount(err) => Some(err),
            Self::Clear { failed } => failed
                .first()
                .map(|(_, err)| err as &(dyn std::error::Error + 'static)),
        }
    }
}

impl From<ApplyError> for PlannerError {
    fn from(err: ApplyError) -> Self {
        match err {
            ApplyError::InvalidColumnCount(err) => Self::InvalidColumnCount(err),
        }
    }
}

#[derive(Debug)]
pub struct Planner<S: DurableStore> {
    store: S,
    queue: WriteQueue,
    state: PlannerState,
    labels: ColumnLabels,
    plan: GridPlan,
}

impl<S: DurableStore> Planner<S> {
    /// Loads persisted state (tolerantly) and builds the initial plan.
    pub fn load(store: S, debounce: Duration) -> Self {
        let state = PlannerState::load(&store);
        let mut labels = ColumnLabels::default();
        let plan = build_plan(&state, &mut labels);
        tracing::debug!(
            columns = %state.settings.column_count,
            cells = state.schedule.cells().len(),
            headers = state.schedule.headers().len(),
            "planner loaded"
        );

        Self {
            store,
            queue: WriteQueue::new(debounce),
            state,
            labels,
            plan,
        }
    }

    pub fn state(&self) -> &PlannerState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.state.settings
    }

    pub fn column_count(&self) -> ColumnCount {
        self.state.settings.column_count
    }

    pub fn plan(&self) -> &GridPlan {
        &self.plan
    }

    pub fn labels(&self) -> &ColumnLabels {
        &self.labels
    }

    pub fn queue(&self) -> &WriteQueue {
        &self.queue
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Hands the current plan to a sink that has not drawn anything yet.
    pub fn attach(&self, sink: &mut dyn RenderSink) {
        sink.render(&self.plan);
        sink.update_week_title(&self.state.settings.week_title);
    }

    /// Applies one edit. The report is empty unless the edit forced a flush.
    pub fn apply(
        &mut self,
        op: &Op,
        now: Instant,
        sink: &mut dyn RenderSink,
    ) -> Result<CommitReport, PlannerError> {
        if let Op::ChangeColumnCount { requested } = op {
            return self.change_column_count(*requested, now, sink);
        }
        let change = ops::apply_op(&mut self.state, op)?;
        Ok(self.commit_change(change, now, sink))
    }

    pub fn set_cell(
        &mut self,
        day: Day,
        column: ColumnIndex,
        text: &str,
        now: Instant,
        sink: &mut dyn RenderSink,
    ) {
        let change = ops::set_cell(&mut self.state, day, column, text);
        self.commit_change(change, now, sink);
    }

    pub fn set_header(
        &mut self,
        column: ColumnIndex,
        text: &str,
        now: Instant,
        sink: &mut dyn RenderSink,
    ) {
        let change = ops::set_header(&mut self.state, column, text);
        self.commit_change(change, now, sink);
    }

    pub fn set_week_title(&mut self, text: &str, now: Instant, sink: &mut dyn RenderSink) {
        let change = ops::set_week_title(&mut self.state, text);
        self.commit_change(change, now, sink);
    }

    pub fn set_column_time_label(&mut self, text: &str, now: Instant, sink: &mut dyn RenderSink) {
        let change = ops::set_column_time_label(&mut self.state, text);
        self.commit_change(change, now, sink);
    }

    /// Validates, persists immediately and rebuilds. A rejected count is reported to the sink
    /// and leaves state, storage and plan untouched.
    ///
    /// A failed flush keeps the new count on screen; the returned report carries the failed
    /// keys and the sink has already been told.
    pub fn change_column_count(
        &mut self,
        requested: i64,
        now: Instant,
        sink: &mut dyn RenderSink,
    ) -> Result<CommitReport, PlannerError> {
        match ops::change_column_count(&mut self.state, requested) {
            Ok(change) => {
                tracing::info!(columns = requested, "column count changed");
                Ok(self.commit_change(change, now, sink))
            }
            Err(err) => {
                let err = PlannerError::from(err);
                sink.notify(Notice::warning(err.to_string()));
                Err(err)
            }
        }
    }

    /// String entry point for user-typed counts.
    pub fn change_column_count_str(
        &mut self,
        raw: &str,
        now: Instant,
        sink: &mut dyn RenderSink,
    ) -> Result<CommitReport, PlannerError> {
        match raw.trim().parse::<i64>() {
            Ok(requested) => self.change_column_count(requested, now, sink),
            Err(_) => {
                let err = PlannerError::InvalidColumnCount(ColumnCountError::NotAnInteger {
                    raw: raw.to_owned(),
                });
                sink.notify(Notice::warning(err.to_string()));
                Err(err)
            }
        }
    }

    pub fn rebuild(&mut self, sink: &mut dyn RenderSink) {
        self.plan = build_plan(&self.state, &mut self.labels);
        sink.render(&self.plan);
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.queue.next_deadline()
    }

    /// Commits writes whose debounce delay has elapsed.
    pub fn tick(&mut self, now: Instant) -> CommitReport {
        self.queue.commit_due(now, &mut self.store)
    }

    pub fn flush(&mut self) -> CommitReport {
        self.queue.flush_all(&mut self.store)
    }

    pub fn on_lifecycle(&mut self, signal: LifecycleSignal) -> CommitReport {
        let pending = self.queue.len();
        let report = self.flush();
        if pending > 0 {
            tracing::info!(?signal, pending, "flushed pending writes");
        }
        report
    }

    /// Explicit save: queue both labels and commit everything now.
    pub fn save(&mut self, now: Instant, sink: &mut dyn RenderSink) -> CommitReport {
        let settings = &self.state.settings;
        self.queue.enqueue(
            StorageKey::WeekTitle,
            QueuedValue::Raw(settings.week_title.clone()),
            now,
        );
        self.queue.enqueue(
            StorageKey::ColumnTimeLabel,
            QueuedValue::Raw(settings.column_time_label.clone()),
            now,
        );

        let report = self.flush();
        if report.is_ok() {
            sink.notify(Notice::success("Saved"));
        } else {
            sink.notify(Notice::error(format!(
                "Save failed for {} item(s); changes stay on screen",
                report.failed.len()
            )));
        }
        report
    }

    /// Wipes every stored key and resets to defaults.
    ///
    /// Pending writes are discarded before any key is removed so a late commit cannot bring
    /// cleared data back. State is reset and the grid rebuilt even if some removals fail.
    pub fn clear_all(&mut self, sink: &mut dyn RenderSink) -> Result<(), PlannerError> {
        let discarded = self.queue.reset_all();

        let mut failed = Vec::new();
        for key in StorageKey::ALL {
            if let Err(err) = self.store.remove(key.as_str()) {
                tracing::warn!(%key, error = %err, "failed to remove stored key");
                failed.push((key, err));
            }
        }

        self.state.reset();
        self.rebuild(sink);
        sink.update_week_title(&self.state.settings.week_title);
        tracing::info!(discarded, "planner cleared");

        if failed.is_empty() {
            sink.notify(Notice::info("Planner cleared"));
            Ok(())
        } else {
            let err = PlannerError::Clear { failed };
            sink.notify(Notice::error(err.to_string()));
            Err(err)
        }
    }

    fn commit_change(
        &mut self,
        change: Change,
        now: Instant,
        sink: &mut dyn RenderSink,
    ) -> CommitReport {
        let Change { writes, flush, effect } = change;
        for (key, value) in writes {
            self.queue.enqueue(key, value, now);
        }
        let report = if flush { self.flush() } else { CommitReport::default() };
        self.reconcile(effect, sink);
        if let Some((key, err)) = report.failed.first() {
            sink.notify(Notice::error(format!("Could not save {key}: {err}")));
        }
        report
    }

    fn reconcile(&mut self, effect: Effect, sink: &mut dyn RenderSink) {
        match effect {
            Effect::CellContent { key, text, has_content } => {
                if self.plan.set_cell(&key, &text, has_content) {
                    sink.set_has_content(&key, has_content);
                }
            }
            Effect::ColumnLabel { column, text, label } => {
                self.plan.set_header_text(column, &text);
                if self.labels.set(column, label.clone()) {
                    self.plan.apply_column_label(column, &label);
                    sink.update_column_label(column, &label);
                }
            }
            Effect::WeekTitle { title } => sink.update_week_title(&title),
            Effect::CornerLabel { text } => {
                self.plan.corner.text = text.clone();
                sink.update_corner_label(&text);
            }
            Effect::Rebuild => self.rebuild(sink),
        }
    }
}

fn build_plan(state: &PlannerState, labels: &mut ColumnLabels) -> GridPlan {
    build_grid(
        state.settings.column_count,
        &state.settings.column_time_label,
        &state.schedule,
        labels,
    )
}
