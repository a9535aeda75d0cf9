// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Weekgrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Weekgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Static artifacts built from the current plan: a paginated print layout and a PNG raster.
//!
//! Callers flush the planner before exporting so the artifact matches committed state.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tokio::sync::oneshot;

use crate::store::StoreError;

pub mod print;
pub mod raster;

pub use print::{paginate, print_document, write_print_layout, PrintSummary};
pub use raster::{rasterize, render_png, write_png, Raster, RasterLayout};

pub const PRINT_FILENAME: &str = "weekgrid-print.txt";
pub const PNG_FILENAME: &str = "weekgrid.png";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    Print,
    Png,
}

impl ExportKind {
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Print => PRINT_FILENAME,
            Self::Png => PNG_FILENAME,
        }
    }

    pub fn default_path(self, dir: &Path) -> PathBuf {
        dir.join(self.file_name())
    }
}

#[derive(Debug)]
pub enum ExportError {
    /// The build lacks what this export needs (e.g. the `raster` feature).
    PrerequisiteMissing { what: &'static str },
    Write(StoreError),
    Encode { message: String },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PrerequisiteMissing { what } => write!(f, "export unavailable: {what}"),
            Self::Write(err) => write!(f, "export failed: {err}"),
            Self::Encode { message } => write!(f, "image encoding failed: {message}"),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Write(err) => Some(err),
            Self::PrerequisiteMissing { .. } | Self::Encode { .. } => None,
        }
    }
}

impl From<StoreError> for ExportError {
    fn from(err: StoreError) -> Self {
        Self::Write(err)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    Signalled,
    /// The signalling side went away without firing.
    Abandoned,
    FallbackElapsed,
}

/// Waits for a readiness signal, or for `fallback` when there is none or it never fires.
pub async fn await_ready(signal: Option<oneshot::Receiver<()>>, fallback: Duration) -> Readiness {
    let Some(signal) = signal else {
        tokio::time::sleep(fallback).await;
        return Readiness::FallbackElapsed;
    };

    match tokio::time::timeout(fallback, signal).await {
        Ok(Ok(())) => Readiness::Signalled,
        Ok(Err(_)) => Readiness::Abandoned,
        Err(_) => Readiness::FallbackElapsed,
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::time::Duration;

    use tokio::sync::oneshot;

    use super::{await_ready, ExportError, ExportKind, Readiness};

    #[tokio::test(start_paused = true)]
    async fn missing_signal_waits_for_the_fallback() {
        let start = tokio::time::Instant::now();
        let readiness = await_ready(None, Duration::from_millis(1000)).await;

        assert_eq!(readiness, Readiness::FallbackElapsed);
        assert!(start.elapsed() >= Duration::from_millis(1000));
    }

    #[tokio::test(start_paused = true)]
    async fn early_signal_skips_the_fallback() {
        let (tx, rx) = oneshot::channel();
        tx.send(()).expect("receiver alive");

        let start = tokio::time::Instant::now();
        let readiness = await_ready(Some(rx), Duration::from_secs(10)).await;

        assert_eq!(readiness, Readiness::Signalled);
        assert!(start.elapsed() < Duration::from_secs(10));
    }

    #[tokio::test(start_paused = true)]
    async fn silent_signal_times_out() {
        let (_tx, rx) = oneshot::channel::<()>();
        let readiness = await_ready(Some(rx), Duration::from_millis(250)).await;
        assert_eq!(readiness, Readiness::FallbackElapsed);
    }

    #[tokio::test]
    async fn dropped_sender_is_abandoned() {
        let (tx, rx) = oneshot::channel::<()>();
        drop(tx);
        let readiness = await_ready(Some(rx), Duration::from_secs(10)).await;
        assert_eq!(readiness, Readiness::Abandoned);
    }

    #[test]
    fn default_paths_land_in_the_export_dir() {
        let dir = Path::new("/tmp/out");
        assert_eq!(
            ExportKind::Print.default_path(dir),
            Path::new("/tmp/out/weekgrid-print.txt")
        );
        assert_eq!(ExportKind::Png.default_path(dir), Path::new("/tmp/out/weekgrid.png"));
    }

    #[test]
    fn prerequisite_error_names_what_is_missing() {
        let err = ExportError::PrerequisiteMissing {
            what: "built without the `raster` feature",
        };
        assert_eq!(
            err.to_string(),
            "export unavailable: built without the `raster` feature"
        );
    }
}
