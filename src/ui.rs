// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Weekgrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Weekgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Transient user notifications.
//!
//! Every user-visible failure or confirmation goes through one [`Notice`] channel. Notices never
//! block input; the UI shows the latest one until it expires.

use std::fmt;
use std::time::{Duration, Instant};

pub const DEFAULT_NOTICE_DURATION: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Info, message: message.into() }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Success, message: message.into() }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Warning, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Error, message: message.into() }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Holds the latest notice and its expiry.
#[derive(Debug, Clone)]
pub struct NoticeSlot {
    duration: Duration,
    current: Option<(Notice, Instant)>,
}

impl Default for NoticeSlot {
    fn default() -> Self {
        Self::new(DEFAULT_NOTICE_DURATION)
    }
}

impl NoticeSlot {
    pub fn new(duration: Duration) -> Self {
        Self { duration, current: None }
    }

    /// Replaces any visible notice.
    pub fn show(&mut self, notice: Notice, now: Instant) {
        self.current = Some((notice, now + self.duration));
    }

    /// The visible notice, dropping it once expired.
    pub fn current(&mut self, now: Instant) -> Option<&Notice> {
        if self.current.as_ref().is_some_and(|(_, expires_at)| *expires_at <= now) {
            self.current = None;
        }
        self.current.as_ref().map(|(notice, _)| notice)
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::{Notice, NoticeLevel, NoticeSlot};

    #[test]
    fn notice_expires_after_duration() {
        let now = Instant::now();
        let mut slot = NoticeSlot::new(Duration::from_secs(2));
        slot.show(Notice::warning("Column count must be 1-10"), now);

        let visible = slot.current(now + Duration::from_secs(1)).expect("visible");
        assert_eq!(visible.level, NoticeLevel::Warning);
        assert!(slot.current(now + Duration::from_secs(2)).is_none());
        assert!(slot.current(now).is_none(), "expired notices are dropped");
    }

    #[test]
    fn newer_notice_replaces_older_one() {
        let now = Instant::now();
        let mut slot = NoticeSlot::default();
        slot.show(Notice::info("Saving"), now);
        slot.show(Notice::success("Saved"), now);
        assert_eq!(slot.current(now).map(|n| n.to_string()).as_deref(), Some("Saved"));

        slot.clear();
        assert!(slot.current(now).is_none());
    }
}
