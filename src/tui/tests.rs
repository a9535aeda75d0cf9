// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Weekgrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Weekgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{backend::TestBackend, Terminal};
use rstest::{fixture, rstest};

use super::{draw, finish, App, Cursor, EditTarget, Mode, TuiOptions};
use crate::model::{CellKey, ColumnIndex, Day};
use crate::planner::Planner;
use crate::store::{DurableStore, FileStore, MemoryStore, WriteDurability};
use crate::test_support::TempDir;

fn col(index: u8) -> ColumnIndex {
    ColumnIndex::new(index).expect("column")
}

fn options(export_dir: &std::path::Path) -> TuiOptions {
    TuiOptions {
        notice_duration: Duration::from_secs(3),
        export_dir: export_dir.to_path_buf(),
        print_rows_per_page: 60,
        print_fallback: Duration::ZERO,
        durability: WriteDurability::BestEffort,
    }
}

struct Harness {
    app: App<MemoryStore>,
    tmp: TempDir,
}

#[fixture]
fn harness() -> Harness {
    let tmp = TempDir::new("tui");
    let planner = Planner::load(MemoryStore::new(), Duration::from_millis(350));
    let app = App::new(planner, options(tmp.path())).expect("app");
    Harness { app, tmp }
}

fn press(app: &mut App<MemoryStore>, code: KeyCode) {
    app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
}

fn type_text(app: &mut App<MemoryStore>, text: &str) {
    for ch in text.chars() {
        press(app, KeyCode::Char(ch));
    }
}

fn render_to_string(app: &mut App<MemoryStore>, width: u16, height: u16) -> String {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).expect("terminal");
    terminal.draw(|frame| draw(frame, app)).expect("draw");
    let buffer = terminal.backend().buffer();
    let mut out = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            out.push_str(buffer.get(x, y).symbol());
        }
        out.push('\n');
    }
    out
}

#[rstest]
fn initial_screen_shows_title_placeholders_and_days(mut harness: Harness) {
    let screen = render_to_string(&mut harness.app, 140, 14);

    assert!(screen.contains("Weekly Planner"));
    assert!(screen.contains("Time"));
    assert!(screen.contains("Box 1"));
    assert!(screen.contains("Box 8"));
    assert!(screen.contains("Monday"));
    assert!(screen.contains("Sunday"));
}

#[rstest]
fn typing_applies_every_keystroke(mut harness: Harness) {
    let app = &mut harness.app;
    press(app, KeyCode::Enter);
    type_text(app, "Gym");

    let key = CellKey::new(Day::Monday, col(1));
    assert_eq!(app.planner.state().schedule.cell(&key), Some("Gym"));
    assert!(app.view.content.contains(&key));
    assert!(app.planner.queue().len() == 1);

    press(app, KeyCode::Enter);
    assert_eq!(app.mode, Mode::Normal);
    let screen = render_to_string(app, 140, 14);
    assert!(screen.contains("Gym"));
}

#[rstest]
fn escape_restores_the_original_text(mut harness: Harness) {
    let app = &mut harness.app;
    press(app, KeyCode::Enter);
    type_text(app, "Swim");
    press(app, KeyCode::Enter);

    press(app, KeyCode::Enter);
    press(app, KeyCode::Backspace);
    type_text(app, "ng");
    assert_eq!(
        app.planner.state().schedule.cell(&CellKey::new(Day::Monday, col(1))),
        Some("Swing")
    );
    press(app, KeyCode::Esc);

    assert_eq!(
        app.planner.state().schedule.cell(&CellKey::new(Day::Monday, col(1))),
        Some("Swim")
    );
}

#[rstest]
fn deleting_all_text_clears_the_highlight(mut harness: Harness) {
    let app = &mut harness.app;
    press(app, KeyCode::Enter);
    type_text(app, "a");
    press(app, KeyCode::Backspace);

    let key = CellKey::new(Day::Monday, col(1));
    assert_eq!(app.planner.state().schedule.cell(&key), None);
    assert!(!app.view.content.contains(&key));
}

#[rstest]
fn header_edit_updates_the_column_label(mut harness: Harness) {
    let app = &mut harness.app;
    press(app, KeyCode::Up);
    press(app, KeyCode::Right);
    press(app, KeyCode::Right);
    assert_eq!(app.cursor.target(), Some(EditTarget::Header(col(3))));

    press(app, KeyCode::Enter);
    type_text(app, "Lunch");
    press(app, KeyCode::Enter);

    assert_eq!(app.view.column_label(col(3)), Some("Lunch"));
    let screen = render_to_string(app, 140, 14);
    assert!(screen.contains("Lunch"));
}

#[rstest]
fn column_keys_rebuild_and_clamp_the_cursor(mut harness: Harness) {
    let app = &mut harness.app;
    for _ in 0..7 {
        press(app, KeyCode::Right);
    }
    assert_eq!(app.cursor, Cursor { row: 1, col: 8 });

    press(app, KeyCode::Char('-'));
    assert_eq!(app.planner.column_count().get(), 7);
    assert_eq!(app.cursor.col, 7);
    assert_eq!(app.planner.store().get("columnCount").as_deref(), Some("7"));

    for _ in 0..3 {
        press(app, KeyCode::Char('+'));
    }
    assert_eq!(app.planner.column_count().get(), 10);
    press(app, KeyCode::Char('+'));
    assert_eq!(app.planner.column_count().get(), 10);
    assert!(app.view.notice(Instant::now()).is_some());
}

#[rstest]
fn week_title_edit_shows_in_the_title_bar(mut harness: Harness) {
    let app = &mut harness.app;
    press(app, KeyCode::Char('t'));
    for _ in 0.."Weekly Planner".len() {
        press(app, KeyCode::Backspace);
    }
    type_text(app, "Sprint 7");
    press(app, KeyCode::Enter);

    assert_eq!(app.view.week_title, "Sprint 7");
    press(app, KeyCode::Char('s'));
    assert_eq!(app.planner.store().get("weekTitle").as_deref(), Some("Sprint 7"));
}

#[rstest]
fn clear_needs_confirmation(mut harness: Harness) {
    let app = &mut harness.app;
    press(app, KeyCode::Enter);
    type_text(app, "Gym");
    press(app, KeyCode::Enter);

    press(app, KeyCode::Char('C'));
    press(app, KeyCode::Char('n'));
    assert!(app.planner.state().schedule.has_content(&CellKey::new(Day::Monday, col(1))));

    press(app, KeyCode::Char('C'));
    press(app, KeyCode::Char('y'));
    assert!(app.planner.state().schedule.cells().is_empty());
    assert!(app.view.content.is_empty());
    app.tick(Instant::now() + Duration::from_secs(5));
    assert!(app.planner.store().entries().is_empty());
}

#[rstest]
fn quit_flushes_pending_writes(mut harness: Harness) {
    let app = &mut harness.app;
    press(app, KeyCode::Enter);
    type_text(app, "Gym");
    press(app, KeyCode::Esc);
    press(app, KeyCode::Down);
    press(app, KeyCode::Enter);
    type_text(app, "Run");
    press(app, KeyCode::Enter);

    press(app, KeyCode::Char('q'));

    assert!(app.should_quit);
    assert!(app.planner.queue().is_empty());
    assert_eq!(
        app.planner.store().get("schedule").as_deref(),
        Some(r#"{"tuesday_1":"Run"}"#)
    );
}

#[rstest]
fn print_export_writes_into_the_export_dir(mut harness: Harness) {
    press(&mut harness.app, KeyCode::Enter);
    type_text(&mut harness.app, "Gym");
    press(&mut harness.app, KeyCode::Enter);

    press(&mut harness.app, KeyCode::Char('p'));

    let written = std::fs::read_to_string(harness.tmp.path().join("weekgrid-print.txt"))
        .expect("print layout");
    assert!(written.starts_with("Weekly Planner — page 1/1"));
    assert!(written.contains("Gym"));
    assert!(harness.app.planner.queue().is_empty());
}

#[test]
fn tab_wraps_around_the_grid() {
    let tmp = TempDir::new("tui-tab");
    let mut planner = Planner::load(MemoryStore::new(), Duration::from_millis(350));
    planner
        .change_column_count(2, Instant::now(), &mut crate::planner::NullSink)
        .expect("count");
    let mut app = App::new(planner, options(tmp.path())).expect("app");

    app.cursor = Cursor { row: 7, col: 2 };
    press(&mut app, KeyCode::Tab);
    assert_eq!(app.cursor, Cursor { row: 0, col: 0 });
    press(&mut app, KeyCode::BackTab);
    assert_eq!(app.cursor, Cursor { row: 7, col: 2 });
}

#[test]
fn terminal_failure_still_flushes_pending_edits() {
    let tmp = TempDir::new("tui-fail");
    let data = tmp.path().join("data");
    let planner = Planner::load(
        FileStore::open_in_dir(&data).expect("open"),
        Duration::from_millis(350),
    );
    let mut app = App::new(planner, options(tmp.path())).expect("app");

    for code in [KeyCode::Enter, KeyCode::Char('G'), KeyCode::Char('y'), KeyCode::Char('m')] {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }
    assert!(!app.planner.queue().is_empty());

    let err = finish(app, Err(std::io::Error::other("terminal gone").into()))
        .expect_err("loop error is propagated");
    assert!(err.to_string().contains("terminal gone"));

    let reopened = FileStore::open_in_dir(&data).expect("reopen");
    assert_eq!(
        reopened.get("schedule").as_deref(),
        Some(r#"{"monday_1":"Gym"}"#)
    );
}
