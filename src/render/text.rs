// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Weekgrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Weekgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

pub(crate) fn truncate_with_ellipsis(text: &str, max_len: usize) -> String {
    if max_len == 0 {
        return String::new();
    }

    let len = text_len(text);
    if len <= max_len {
        return text.to_owned();
    }

    if max_len == 1 {
        return "…".to_owned();
    }

    let mut out: String = text.chars().take(max_len - 1).collect();
    out.push('…');
    out
}

pub(crate) fn text_len(text: &str) -> usize {
    text.chars().count()
}

pub(crate) fn pad_right(text: &str, width: usize) -> String {
    let mut out = text.to_owned();
    out.extend(std::iter::repeat(' ').take(width.saturating_sub(text_len(text))));
    out
}

/// Splits cell text into display lines, each cut to `max_len`. Always at least one line.
pub(crate) fn cell_lines(text: &str, max_len: usize) -> Vec<String> {
    let mut lines = text
        .lines()
        .map(|line| truncate_with_ellipsis(line.trim_end(), max_len))
        .collect::<Vec<_>>();
    while lines.len() > 1 && matches!(lines.last(), Some(line) if line.is_empty()) {
        lines.pop();
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::{cell_lines, pad_right, text_len, truncate_with_ellipsis};

    #[test]
    fn truncate_with_ellipsis_handles_small_widths() {
        assert_eq!(truncate_with_ellipsis("hello", 0), "");
        assert_eq!(truncate_with_ellipsis("hello", 1), "…");
        assert_eq!(truncate_with_ellipsis("h", 1), "h");
        assert_eq!(truncate_with_ellipsis("hello", 2), "h…");
    }

    #[test]
    fn widths_count_chars_not_bytes() {
        assert_eq!(text_len("αβγ"), 3);
        assert_eq!(truncate_with_ellipsis("αβγ", 2), "α…");
        assert_eq!(pad_right("☾ M", 5), "☾ M  ");
    }

    #[test]
    fn cell_lines_split_and_drop_trailing_blank_lines() {
        assert_eq!(cell_lines("", 5), vec![String::new()]);
        assert_eq!(cell_lines("Gym\n7am\n\n", 10), vec!["Gym", "7am"]);
        assert_eq!(cell_lines("Meeting with team", 8), vec!["Meeting…"]);
    }
}
