// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Weekgrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Weekgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Weekgrid CLI entrypoint.
//!
//! By default this runs the interactive TUI over the file store in the data directory.
//! `--print`/`--png` export the stored planner headlessly and exit.

use std::error::Error;
use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;
use weekgrid::config::PlannerConfig;
use weekgrid::export::{self, RasterLayout};
use weekgrid::planner::{LifecycleSignal, NullSink, Planner};
use weekgrid::queue::CommitReport;
use weekgrid::store::{DurableStore, FileStore, MemoryStore};
use weekgrid::tui::{self, TuiOptions};

const LOG_FILENAME: &str = "weekgrid.log";

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  \
         {program} [--config <file>] [--data-dir <dir> | --ephemeral] [--durable-writes] \
         [--columns <n>]\n  \
         {program} [options] --print <file> [--png <file>]\n  \
         {program} [options] --png <file>\n\n\
         Without --print/--png the interactive planner starts.\n\
         --columns changes the column count (1-10) before anything else runs.\n\
         --ephemeral keeps everything in memory; nothing is persisted.\n\
         --durable-writes syncs every store write to disk (slower).\n\n\
         Logs go to <data-dir>/{LOG_FILENAME} in interactive mode, stderr otherwise. \
         Filter with WEEKGRID_LOG or RUST_LOG."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    help: bool,
    config: Option<PathBuf>,
    data_dir: Option<PathBuf>,
    ephemeral: bool,
    durable_writes: bool,
    columns: Option<String>,
    print: Option<PathBuf>,
    png: Option<PathBuf>,
}

impl CliOptions {
    fn headless(&self) -> bool {
        self.print.is_some() || self.png.is_some()
    }
}

fn set_once<T>(slot: &mut Option<T>, value: Option<T>) -> Result<(), ()> {
    if slot.is_some() {
        return Err(());
    }
    *slot = Some(value.ok_or(())?);
    Ok(())
}

fn set_flag(flag: &mut bool) -> Result<(), ()> {
    if *flag {
        return Err(());
    }
    *flag = true;
    Ok(())
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => set_flag(&mut options.help)?,
            "--ephemeral" => set_flag(&mut options.ephemeral)?,
            "--durable-writes" => set_flag(&mut options.durable_writes)?,
            "--config" => set_once(&mut options.config, args.next().map(PathBuf::from))?,
            "--data-dir" => set_once(&mut options.data_dir, args.next().map(PathBuf::from))?,
            "--columns" => set_once(&mut options.columns, args.next())?,
            "--print" => set_once(&mut options.print, args.next().map(PathBuf::from))?,
            "--png" => set_once(&mut options.png, args.next().map(PathBuf::from))?,
            _ => return Err(()),
        }
    }

    if options.ephemeral && options.data_dir.is_some() {
        return Err(());
    }

    Ok(options)
}

fn log_appender(dir: &Path) -> Result<RollingFileAppender, InitError> {
    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(LOG_FILENAME)
        .build(dir)
}

fn init_tracing(log_dir: Option<&Path>) -> Result<Option<WorkerGuard>, Box<dyn Error>> {
    let filter = EnvFilter::try_from_env("WEEKGRID_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("weekgrid=info"));

    match log_dir {
        Some(dir) => {
            let appender = log_appender(dir)
                .map_err(|err| format!("cannot open log file in {}: {err}", dir.display()))?;
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .init();
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
            Ok(None)
        }
    }
}

fn ensure_committed(report: CommitReport) -> Result<(), Box<dyn Error>> {
    match report.failed.into_iter().next() {
        Some((_, err)) => Err(Box::new(err)),
        None => Ok(()),
    }
}

fn export_headless<S: DurableStore>(
    planner: &mut Planner<S>,
    options: &CliOptions,
    config: &PlannerConfig,
) -> Result<(), Box<dyn Error>> {
    ensure_committed(planner.flush())?;

    if let Some(path) = &options.print {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()?;
        runtime.block_on(export::await_ready(None, config.print_fallback()));
        let summary = export::write_print_layout(
            path,
            planner.plan(),
            &planner.settings().week_title,
            config.print_rows_per_page,
            config.durability(),
        )?;
        println!("{} ({} page(s))", summary.path.display(), summary.pages);
    }

    if let Some(path) = &options.png {
        let (width, height) =
            export::write_png(path, planner.plan(), &RasterLayout::default(), config.durability())?;
        println!("{} ({width}x{height})", path.display());
    }

    Ok(())
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "weekgrid".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };
        if options.help {
            print_usage(&program);
            return Ok(());
        }

        let mut config = PlannerConfig::load(options.config.as_deref())?;
        if let Some(dir) = &options.data_dir {
            config.data_dir = Some(dir.clone());
        }
        if options.durable_writes {
            config.durable_writes = true;
        }

        let data_dir = config.resolved_data_dir();
        let log_dir = if options.headless() {
            None
        } else if options.ephemeral {
            Some(std::env::temp_dir())
        } else {
            Some(data_dir.clone())
        };
        let _log_guard = init_tracing(log_dir.as_deref())?;

        let store: Box<dyn DurableStore> = if options.ephemeral {
            Box::new(MemoryStore::new())
        } else {
            Box::new(FileStore::open_in_dir(&data_dir)?.with_durability(config.durability()))
        };
        tracing::info!(
            data_dir = %data_dir.display(),
            ephemeral = options.ephemeral,
            "starting"
        );

        let mut planner = Planner::load(store, config.debounce());
        if let Some(raw) = &options.columns {
            let report = planner.change_column_count_str(raw, Instant::now(), &mut NullSink)?;
            ensure_committed(report)?;
        }

        if options.headless() {
            export_headless(&mut planner, &options, &config)?;
        } else {
            let tui_options = TuiOptions {
                notice_duration: config.notice_duration(),
                export_dir: config.resolved_export_dir(),
                print_rows_per_page: config.print_rows_per_page,
                print_fallback: config.print_fallback(),
                durability: config.durability(),
            };
            planner = tui::run(planner, tui_options)?;
        }

        ensure_committed(planner.on_lifecycle(LifecycleSignal::Quit))
    })();

    if let Err(err) = result {
        eprintln!("weekgrid: {err}");
        std::process::exit(1);
    }
}
