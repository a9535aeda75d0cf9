// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Weekgrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Weekgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Terminal UI.
//!
//! An interactive grid over a [`Planner`] (ratatui + crossterm). Edits are applied on every
//! keystroke; the event loop wakes for the next pending write deadline.

use std::{
    error::Error,
    io,
    path::PathBuf,
    time::{Duration, Instant},
};

use crossterm::{
    event::{
        self, DisableFocusChange, EnableFocusChange, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};

use crate::export::{self, raster::day_color, ExportKind, RasterLayout};
use crate::model::{CellKey, ColumnCount, ColumnIndex, Day};
use crate::ops::Op;
use crate::planner::{LifecycleSignal, Planner, RenderSink};
use crate::queue::CommitReport;
use crate::store::{DurableStore, WriteDurability};
use crate::ui::{Notice, NoticeLevel};

mod view;

use view::View;

const POLL_INTERVAL: Duration = Duration::from_millis(250);
const DAY_LABEL_WIDTH: u16 = 13;
const CURSOR_GLYPH: char = '▏';
const HEADER_COLOR: Color = Color::Gray;
const PLACEHOLDER_COLOR: Color = Color::DarkGray;
const STATUS_KEY_COLOR: Color = Color::Cyan;

#[derive(Debug, Clone)]
pub struct TuiOptions {
    pub notice_duration: Duration,
    pub export_dir: PathBuf,
    pub print_rows_per_page: usize,
    pub print_fallback: Duration,
    pub durability: WriteDurability,
}

/// Runs the interactive planner until the user quits.
///
/// Pending writes are flushed on every exit, including a terminal error.
pub fn run<S: DurableStore>(
    planner: Planner<S>,
    options: TuiOptions,
) -> Result<Planner<S>, Box<dyn Error>> {
    let mut app = App::new(planner, options)?;
    let outcome =
        TerminalSession::new().and_then(|mut terminal| event_loop(&mut terminal, &mut app));
    finish(app, outcome)
}

fn event_loop<S: DurableStore>(
    terminal: &mut TerminalSession,
    app: &mut App<S>,
) -> Result<(), Box<dyn Error>> {
    while !app.should_quit {
        terminal.draw(|frame| draw(frame, app))?;

        if event::poll(app.poll_timeout(Instant::now()))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                Event::FocusLost => app.lifecycle(LifecycleSignal::FocusLost),
                _ => {}
            }
        }
        app.tick(Instant::now());
    }
    Ok(())
}

fn finish<S: DurableStore>(
    mut app: App<S>,
    outcome: Result<(), Box<dyn Error>>,
) -> Result<Planner<S>, Box<dyn Error>> {
    match outcome {
        Ok(()) => Ok(app.into_planner()),
        Err(err) => {
            tracing::error!(error = %err, "terminal loop failed; flushing pending writes");
            app.lifecycle(LifecycleSignal::Interrupted);
            Err(err)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EditTarget {
    Corner,
    Header(ColumnIndex),
    Cell(Day, ColumnIndex),
    WeekTitle,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Mode {
    Normal,
    Editing {
        target: EditTarget,
        buffer: String,
        original: String,
    },
    ConfirmClear,
}

/// Cursor position: row 0 is the header row, rows 1..=7 are days; column 0 is the corner or day
/// label column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct Cursor {
    row: usize,
    col: usize,
}

impl Cursor {
    fn target(self) -> Option<EditTarget> {
        let column = u8::try_from(self.col)
            .ok()
            .and_then(|col| ColumnIndex::new(col).ok());
        match (self.row, column) {
            (0, None) => Some(EditTarget::Corner),
            (0, Some(column)) => Some(EditTarget::Header(column)),
            (row, Some(column)) => {
                Day::from_index(row - 1).map(|day| EditTarget::Cell(day, column))
            }
            (_, None) => None,
        }
    }
}

struct App<S: DurableStore> {
    planner: Planner<S>,
    view: View,
    options: TuiOptions,
    runtime: tokio::runtime::Runtime,
    cursor: Cursor,
    mode: Mode,
    should_quit: bool,
}

impl<S: DurableStore> App<S> {
    fn new(planner: Planner<S>, options: TuiOptions) -> io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()?;
        let mut view = View::new(options.notice_duration);
        planner.attach(&mut view);

        Ok(Self {
            planner,
            view,
            options,
            runtime,
            cursor: Cursor { row: 1, col: 1 },
            mode: Mode::Normal,
            should_quit: false,
        })
    }

    fn into_planner(self) -> Planner<S> {
        self.planner
    }

    fn poll_timeout(&self, now: Instant) -> Duration {
        match self.planner.next_deadline() {
            Some(deadline) => deadline.saturating_duration_since(now).min(POLL_INTERVAL),
            None => POLL_INTERVAL,
        }
    }

    fn tick(&mut self, now: Instant) {
        let report = self.planner.tick(now);
        self.report_failures(&report);
    }

    fn lifecycle(&mut self, signal: LifecycleSignal) {
        let report = self.planner.on_lifecycle(signal);
        self.report_failures(&report);
    }

    fn report_failures(&mut self, report: &CommitReport) {
        if let Some((key, err)) = report.failed.first() {
            self.view
                .notify(Notice::error(format!("Could not save {key}: {err}")));
        }
    }

    fn column_count(&self) -> ColumnCount {
        self.planner.column_count()
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.lifecycle(LifecycleSignal::Interrupted);
            self.should_quit = true;
            return;
        }

        match std::mem::replace(&mut self.mode, Mode::Normal) {
            Mode::Normal => self.handle_normal_key(key.code),
            Mode::Editing {
                target,
                buffer,
                original,
            } => self.handle_edit_key(key.code, target, buffer, original),
            Mode::ConfirmClear => {
                if key.code == KeyCode::Char('y') {
                    // clear_all reports its own outcome through the view.
                    let _ = self.planner.clear_all(&mut self.view);
                    self.clamp_cursor();
                } else {
                    self.view.notify(Notice::info("Clear cancelled"));
                }
            }
        }
    }

    fn handle_normal_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') => {
                self.lifecycle(LifecycleSignal::Quit);
                self.should_quit = true;
            }
            KeyCode::Left | KeyCode::Char('h') => self.move_cursor(0, -1),
            KeyCode::Right | KeyCode::Char('l') => self.move_cursor(0, 1),
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(-1, 0),
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(1, 0),
            KeyCode::Tab => self.step_cursor(true),
            KeyCode::BackTab => self.step_cursor(false),
            KeyCode::Enter => self.begin_edit(),
            KeyCode::Char('t') => self.begin_edit_target(EditTarget::WeekTitle),
            KeyCode::Char('+') | KeyCode::Char('=') => self.adjust_columns(1),
            KeyCode::Char('-') => self.adjust_columns(-1),
            KeyCode::Char('s') => {
                self.planner.save(Instant::now(), &mut self.view);
            }
            KeyCode::Char('p') => self.export(ExportKind::Print),
            KeyCode::Char('i') => self.export(ExportKind::Png),
            KeyCode::Char('C') => {
                self.mode = Mode::ConfirmClear;
            }
            _ => {}
        }
    }

    fn handle_edit_key(
        &mut self,
        code: KeyCode,
        target: EditTarget,
        mut buffer: String,
        original: String,
    ) {
        match code {
            KeyCode::Enter => return,
            KeyCode::Esc => {
                self.apply_edit(target, &original);
                return;
            }
            KeyCode::Backspace => {
                buffer.pop();
                self.apply_edit(target, &buffer);
            }
            KeyCode::Char(ch) => {
                buffer.push(ch);
                self.apply_edit(target, &buffer);
            }
            _ => {}
        }
        self.mode = Mode::Editing {
            target,
            buffer,
            original,
        };
    }

    fn begin_edit(&mut self) {
        if let Some(target) = self.cursor.target() {
            self.begin_edit_target(target);
        }
    }

    fn begin_edit_target(&mut self, target: EditTarget) {
        let current = self.current_text(target);
        self.mode = Mode::Editing {
            target,
            buffer: current.clone(),
            original: current,
        };
    }

    fn current_text(&self, target: EditTarget) -> String {
        let state = self.planner.state();
        match target {
            EditTarget::Corner => state.settings.column_time_label.clone(),
            EditTarget::WeekTitle => state.settings.week_title.clone(),
            EditTarget::Header(column) => {
                state.schedule.header(column).unwrap_or_default().to_owned()
            }
            EditTarget::Cell(day, column) => state
                .schedule
                .cell(&CellKey::new(day, column))
                .unwrap_or_default()
                .to_owned(),
        }
    }

    fn apply_edit(&mut self, target: EditTarget, text: &str) {
        let text = text.to_owned();
        let op = match target {
            EditTarget::Corner => Op::SetColumnTimeLabel { text },
            EditTarget::WeekTitle => Op::SetWeekTitle { text },
            EditTarget::Header(column) => Op::SetHeader { column, text },
            EditTarget::Cell(day, column) => Op::SetCell { day, column, text },
        };
        // Text edits cannot be rejected.
        let _ = self.planner.apply(&op, Instant::now(), &mut self.view);
    }

    fn adjust_columns(&mut self, delta: i64) {
        let requested = i64::from(self.column_count().get()) + delta;
        let op = Op::ChangeColumnCount { requested };
        // Rejections and failed flushes are already on the view.
        if self.planner.apply(&op, Instant::now(), &mut self.view).is_ok() {
            self.clamp_cursor();
        }
    }

    fn export(&mut self, kind: ExportKind) {
        let report = self.planner.flush();
        self.report_failures(&report);

        let path = kind.default_path(&self.options.export_dir);
        let plan = self.planner.plan();
        let result = match kind {
            ExportKind::Print => {
                let readiness = self
                    .runtime
                    .block_on(export::await_ready(None, self.options.print_fallback));
                tracing::debug!(?readiness, "print readiness");
                export::write_print_layout(
                    &path,
                    plan,
                    &self.planner.settings().week_title,
                    self.options.print_rows_per_page,
                    self.options.durability,
                )
                .map(|summary| format!("Printed {} page(s) to {}", summary.pages, path.display()))
            }
            ExportKind::Png => export::write_png(
                &path,
                plan,
                &RasterLayout::default(),
                self.options.durability,
            )
            .map(|(width, height)| format!("Saved {width}x{height} image to {}", path.display())),
        };

        match result {
            Ok(message) => self.view.notify(Notice::success(message)),
            Err(err) => {
                tracing::warn!(error = %err, ?kind, "export failed");
                self.view.notify(Notice::error(err.to_string()));
            }
        }
    }

    fn max_col(&self) -> usize {
        usize::from(self.column_count().get())
    }

    fn move_cursor(&mut self, d_row: isize, d_col: isize) {
        let row = self.cursor.row.saturating_add_signed(d_row).min(Day::ALL.len());
        let col = self.cursor.col.saturating_add_signed(d_col).min(self.max_col());
        self.cursor = Cursor { row, col };
    }

    fn step_cursor(&mut self, forward: bool) {
        let width = self.max_col() + 1;
        let cells = width * (Day::ALL.len() + 1);
        let idx = self.cursor.row * width + self.cursor.col;
        let next = if forward { (idx + 1) % cells } else { (idx + cells - 1) % cells };
        self.cursor = Cursor {
            row: next / width,
            col: next % width,
        };
    }

    fn clamp_cursor(&mut self) {
        self.cursor.col = self.cursor.col.min(self.max_col());
    }

    fn editing_buffer(&self, target: EditTarget) -> Option<&str> {
        match &self.mode {
            Mode::Editing {
                target: active,
                buffer,
                ..
            } if *active == target => Some(buffer),
            _ => None,
        }
    }
}

fn draw<S: DurableStore>(frame: &mut Frame<'_>, app: &mut App<S>) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.size());

    frame.render_widget(title_line(app), layout[0]);
    frame.render_widget(grid_table(app), layout[1]);
    let status = status_line(app, Instant::now());
    frame.render_widget(status, layout[2]);
}

fn title_line<S: DurableStore>(app: &App<S>) -> Paragraph<'static> {
    let title = match app.editing_buffer(EditTarget::WeekTitle) {
        Some(buffer) => format!("{buffer}{CURSOR_GLYPH}"),
        None => app.view.week_title.clone(),
    };
    Paragraph::new(Line::from(Span::styled(
        title,
        Style::default().add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
}

fn grid_table<S: DurableStore>(app: &App<S>) -> Table<'static> {
    let plan = app.planner.plan();
    let selected = Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD);
    let focus = |row: usize, col: usize| app.cursor == Cursor { row, col };

    let mut header_cells = Vec::with_capacity(plan.headers.len() + 1);
    let corner = app
        .editing_buffer(EditTarget::Corner)
        .map(|buffer| format!("{buffer}{CURSOR_GLYPH}"))
        .unwrap_or_else(|| app.view.corner.clone());
    let corner_style = Style::default().fg(HEADER_COLOR);
    header_cells.push(styled_cell(corner, corner_style, focus(0, 0), selected));
    for header in &plan.headers {
        let column = header.column();
        let (text, style) = match app.editing_buffer(EditTarget::Header(column)) {
            Some(buffer) => (format!("{buffer}{CURSOR_GLYPH}"), Style::default()),
            None if header.text.trim().is_empty() => (
                header.placeholder.clone(),
                Style::default().fg(PLACEHOLDER_COLOR),
            ),
            None => (
                header.text.clone(),
                Style::default().fg(HEADER_COLOR).add_modifier(Modifier::BOLD),
            ),
        };
        let col = usize::from(column.get());
        header_cells.push(styled_cell(text, style, focus(0, col), selected));
    }

    let rows = plan.rows.iter().enumerate().map(|(idx, row)| {
        let [r, g, b] = day_color(row.day);
        let day_style = Style::default().fg(Color::Rgb(r, g, b));
        let descriptor = row.day.descriptor();
        let mut cells = vec![styled_cell(
            format!("{} {}", descriptor.glyph, descriptor.name),
            day_style,
            focus(idx + 1, 0),
            selected,
        )];
        for cell in &row.cells {
            let column = cell.key.column();
            let (text, style) = match app.editing_buffer(EditTarget::Cell(row.day, column)) {
                Some(buffer) => (format!("{buffer}{CURSOR_GLYPH}"), Style::default()),
                None if app.view.content.contains(&cell.key) => (
                    first_line(&cell.text),
                    Style::default().fg(Color::Black).bg(Color::Rgb(r, g, b)),
                ),
                None => (String::new(), Style::default()),
            };
            cells.push(styled_cell(
                text,
                style,
                focus(idx + 1, usize::from(column.get())),
                selected,
            ));
        }
        Row::new(cells)
    });

    let columns = plan.headers.len().max(1) as u32;
    let mut widths = vec![Constraint::Length(DAY_LABEL_WIDTH)];
    widths.extend((0..columns).map(|_| Constraint::Ratio(1, columns)));

    Table::new(rows, widths)
        .header(Row::new(header_cells))
        .block(Block::default().borders(Borders::ALL))
        .column_spacing(1)
}

fn styled_cell(text: String, style: Style, focused: bool, selected: Style) -> Cell<'static> {
    let style = if focused { style.patch(selected) } else { style };
    Cell::from(text).style(style)
}

fn first_line(text: &str) -> String {
    let mut lines = text.lines();
    let first = lines.next().unwrap_or_default().to_owned();
    if lines.next().is_some() {
        format!("{first}…")
    } else {
        first
    }
}

fn status_line<S: DurableStore>(app: &mut App<S>, now: Instant) -> Paragraph<'static> {
    if matches!(app.mode, Mode::ConfirmClear) {
        return Paragraph::new(Line::from(Span::styled(
            "Clear the whole planner? press y to confirm, any other key cancels",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )));
    }

    if let Some(notice) = app.view.notice(now) {
        let color = match notice.level {
            NoticeLevel::Info => Color::White,
            NoticeLevel::Success => Color::LightGreen,
            NoticeLevel::Warning => Color::Yellow,
            NoticeLevel::Error => Color::Red,
        };
        return Paragraph::new(Line::from(Span::styled(
            notice.message.clone(),
            Style::default().fg(color),
        )));
    }

    let mut spans = Vec::new();
    if let Some(EditTarget::Cell(day, column)) = app.cursor.target() {
        let label = app.view.column_label(column).unwrap_or_default().to_owned();
        spans.push(Span::raw(format!("{label} · {} ", CellKey::new(day, column))));
    }
    let hints: &[(&str, &str)] = if matches!(app.mode, Mode::Editing { .. }) {
        &[("enter", "done"), ("esc", "undo")]
    } else {
        &[
            ("enter", "edit"),
            ("t", "title"),
            ("+/-", "columns"),
            ("s", "save"),
            ("p", "print"),
            ("i", "png"),
            ("C", "clear"),
            ("q", "quit"),
        ]
    };
    for (key, label) in hints {
        spans.push(Span::styled(format!(" {key}"), Style::default().fg(STATUS_KEY_COLOR)));
        spans.push(Span::raw(format!(" {label}")));
    }
    Paragraph::new(Line::from(spans))
}

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self, Box<dyn Error>> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableFocusChange).map_err(|err| {
            teardown_terminal();
            err
        })?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).map_err(|err| {
            teardown_terminal();
            err
        })?;
        terminal.clear().map_err(|err| {
            teardown_terminal();
            err
        })?;

        Ok(Self { terminal })
    }

    fn draw(&mut self, draw_fn: impl FnOnce(&mut Frame<'_>)) -> io::Result<()> {
        self.terminal.draw(draw_fn)?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
        teardown_terminal();
    }
}

fn teardown_terminal() {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    let _ = execute!(stdout, DisableFocusChange, LeaveAlternateScreen);
}

#[cfg(test)]
mod tests;
