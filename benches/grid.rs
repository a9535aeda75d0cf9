// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Weekgrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Weekgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::time::{Duration, Instant};

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion, Throughput};

use weekgrid::grid::{build_grid, ColumnLabels};
use weekgrid::model::{CellKey, ColumnCount, ColumnIndex, Day, ScheduleState, MAX_COLUMNS};
use weekgrid::planner::{NullSink, Planner};
use weekgrid::render::{render_grid_text, TableOptions};
use weekgrid::store::MemoryStore;

// Group and case IDs stay stable across refactors so results remain comparable.
fn full_schedule(columns: u8) -> ScheduleState {
    let mut schedule = ScheduleState::default();
    for day in Day::ALL {
        for col in 1..=columns {
            let column = ColumnIndex::new(col).expect("column");
            schedule.set_cell(&CellKey::new(day, column), &format!("{} slot {col}", day.name()));
        }
    }
    for col in 1..=columns {
        let column = ColumnIndex::new(col).expect("column");
        schedule.set_header(column, &format!("{:02}:00", 7 + col));
    }
    schedule
}

fn benches_grid(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid.build");

    for (case, columns, filled) in [("empty_8", 8u8, false), ("full_10", MAX_COLUMNS, true)] {
        let schedule = if filled {
            full_schedule(columns)
        } else {
            ScheduleState::default()
        };
        let count = ColumnCount::new(i64::from(columns)).expect("count");
        group.throughput(Throughput::Elements(7 * u64::from(columns)));
        group.bench_function(case, |b| {
            let mut labels = ColumnLabels::default();
            b.iter(|| {
                let plan = build_grid(count, "Time", black_box(&schedule), &mut labels);
                black_box(plan.element_count())
            })
        });
    }
    group.finish();

    let mut group = c.benchmark_group("grid.render_text");
    let schedule = full_schedule(MAX_COLUMNS);
    let count = ColumnCount::new(i64::from(MAX_COLUMNS)).expect("count");
    let plan = build_grid(count, "Time", &schedule, &mut ColumnLabels::default());
    group.bench_function("full_10", |b| {
        b.iter(|| black_box(render_grid_text(black_box(&plan), &TableOptions::default()).len()))
    });
    group.finish();
}

fn benches_typing(c: &mut Criterion) {
    let mut group = c.benchmark_group("planner.typing");
    let text = "Quarterly planning review with the whole team";

    group.throughput(Throughput::Elements(text.len() as u64));
    group.bench_function("keystrokes_then_flush", |b| {
        b.iter_batched(
            || Planner::load(MemoryStore::new(), Duration::from_millis(350)),
            |mut planner| {
                let column = ColumnIndex::new(3).expect("column");
                let now = Instant::now();
                for end in 1..=text.len() {
                    planner.set_cell(Day::Wednesday, column, &text[..end], now, &mut NullSink);
                }
                black_box(planner.flush().committed.len())
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

criterion_group!(benches, benches_grid, benches_typing);
criterion_main!(benches);
