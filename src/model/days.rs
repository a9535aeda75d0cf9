// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Weekgrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Weekgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::str::FromStr;

/// Static description of one planner row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayDescriptor {
    pub key: &'static str,
    pub name: &'static str,
    pub glyph: &'static str,
    pub class: &'static str,
}

/// The fixed row axis of the planner, Monday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

const DESCRIPTORS: [DayDescriptor; 7] = [
    DayDescriptor { key: "monday", name: "Monday", glyph: "☾", class: "day-monday" },
    DayDescriptor { key: "tuesday", name: "Tuesday", glyph: "♂", class: "day-tuesday" },
    DayDescriptor { key: "wednesday", name: "Wednesday", glyph: "☿", class: "day-wednesday" },
    DayDescriptor { key: "thursday", name: "Thursday", glyph: "♃", class: "day-thursday" },
    DayDescriptor { key: "friday", name: "Friday", glyph: "♀", class: "day-friday" },
    DayDescriptor { key: "saturday", name: "Saturday", glyph: "♄", class: "day-saturday" },
    DayDescriptor { key: "sunday", name: "Sunday", glyph: "☉", class: "day-sunday" },
];

impl Day {
    pub const ALL: [Day; 7] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
        Day::Sunday,
    ];

    pub fn descriptor(self) -> &'static DayDescriptor {
        &DESCRIPTORS[self.index()]
    }

    pub fn key(self) -> &'static str {
        self.descriptor().key
    }

    pub fn name(self) -> &'static str {
        self.descriptor().name
    }

    /// Zero-based row position.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|day| day.key() == key)
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownDayError {
    pub key: String,
}

impl fmt::Display for UnknownDayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown day key {:?}", self.key)
    }
}

impl std::error::Error for UnknownDayError {}

impl FromStr for Day {
    type Err = UnknownDayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(s).ok_or_else(|| UnknownDayError { key: s.to_owned() })
    }
}
