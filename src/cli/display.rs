// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Boxed terminal output for `verbum inspect`.
//!
//! Colors are dropped when `NO_COLOR` is set or stdout is not a terminal, so
//! piped output stays plain text.

use std::io::IsTerminal;

/// Columns between the left and right border.
pub const BOX_WIDTH: usize = 72;

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const GRAY: &str = "\x1b[90m";
pub const CYAN: &str = "\x1b[36m";
pub const GREEN: &str = "\x1b[32m";
pub const RED: &str = "\x1b[31m";

pub fn use_colors() -> bool {
    std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal()
}

/// Wrap `text` in the given escape codes when colors are on.
pub fn styled(codes: &[&str], text: &str) -> String {
    if !use_colors() {
        return text.to_string();
    }
    let mut out = codes.concat();
    out.push_str(text);
    out.push_str(RESET);
    out
}

/// Printed width of `s`, ignoring `ESC [ ... m` sequences.
pub fn visible_len(s: &str) -> usize {
    let mut width = 0;
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            // skip through the terminating 'm'
            chars.by_ref().find(|&c| c == 'm');
        } else {
            width += 1;
        }
    }
    width
}

fn frame(piece: &str) -> String {
    styled(&[GRAY], piece)
}

/// `│ content      │`
pub fn row(content: &str) {
    let fill = " ".repeat(BOX_WIDTH.saturating_sub(visible_len(content)));
    println!("{}{}{}{}", frame("│"), content, fill, frame("│"));
}

/// `┌─ LABEL ─────┐`
pub fn section_top(label: &str) {
    let title = format!("─ {} ", styled(&[BOLD, CYAN], label));
    let rule = "─".repeat(BOX_WIDTH.saturating_sub(visible_len(&title)));
    println!("{}{}{}", frame("┌"), title, frame(&format!("{}┐", rule)));
}

/// `└─────────────┘`
pub fn section_bot() {
    println!("{}", frame(&format!("└{}┘", "─".repeat(BOX_WIDTH))));
}

/// Right-align `s` in `width` visible columns.
pub fn pad_left(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(visible_len(s));
    format!("{}{}", " ".repeat(fill), s)
}

pub fn format_size(bytes: usize) -> String {
    const KB: f64 = 1024.0;
    let value = bytes as f64;
    if value >= KB * KB {
        format!("{:.1} MB", value / (KB * KB))
    } else if value >= KB {
        format!("{:.1} KB", value / KB)
    } else {
        format!("{} B", bytes)
    }
}

pub fn status(ok: bool) -> String {
    if ok {
        styled(&[GREEN], "✓")
    } else {
        styled(&[RED, BOLD], "✗")
    }
}
