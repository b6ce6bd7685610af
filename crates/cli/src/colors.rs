// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Terminal color utilities for help and status output.
//!
//! Respects environment variables:
//! - `NO_COLOR=1`: Disables colors
//! - `COLOR=1`: Forces colors even without TTY

use std::io::IsTerminal;

use wl_core::SyncStatus;

use crate::env;

/// ANSI 256-color codes
pub mod codes {
    /// Section headers: steel blue
    pub const HEADER: u8 = 74;
    /// Commands/literals: light grey
    pub const LITERAL: u8 = 250;
    /// Default values/context: medium grey
    pub const CONTEXT: u8 = 245;
    pub const SYNCED: u8 = 71;
    pub const PENDING: u8 = 179;
    pub const ERROR: u8 = 167;
}

const RESET: &str = "\x1b[0m";

/// Check if colors should be enabled based on TTY and environment variables.
pub fn should_colorize() -> bool {
    if env::no_color() {
        return false;
    }
    if env::force_color() {
        return true;
    }
    std::io::stdout().is_terminal()
}

fn paint(code: u8, text: &str, enabled: bool) -> String {
    if enabled {
        format!("\x1b[38;5;{code}m{text}{RESET}")
    } else {
        text.to_string()
    }
}

/// Apply header color (section titles) to text.
pub fn header(text: &str) -> String {
    paint(codes::HEADER, text, should_colorize())
}

/// Apply literal color (commands, options) to text.
pub fn literal(text: &str) -> String {
    paint(codes::LITERAL, text, should_colorize())
}

/// Apply context color (default values, hints) to text.
pub fn context(text: &str) -> String {
    paint(codes::CONTEXT, text, should_colorize())
}

/// Sync status label, colored by outcome.
pub fn status(status: SyncStatus) -> String {
    status_with(status, should_colorize())
}

fn status_with(status: SyncStatus, enabled: bool) -> String {
    let code = match status {
        SyncStatus::Synced => codes::SYNCED,
        SyncStatus::Pending => codes::PENDING,
        SyncStatus::Error => codes::ERROR,
    };
    paint(code, status.as_str(), enabled)
}

/// Colorize an examples help block.
///
/// Lines ending in `:` become headers; in `command    description` lines the
/// command part is shown as a literal.
pub fn examples(text: &str) -> String {
    examples_with(text, should_colorize())
}

fn examples_with(text: &str, enabled: bool) -> String {
    if !enabled {
        return text.to_string();
    }

    text.lines()
        .map(|line| {
            let trimmed = line.trim_start();
            let indent = &line[..line.len() - trimmed.len()];
            if trimmed.ends_with(':') && !trimmed.contains("  ") {
                return format!("{indent}{}", paint(codes::HEADER, trimmed, true));
            }
            match find_description_start(trimmed) {
                Some(end) => format!(
                    "{indent}{}{}",
                    paint(codes::LITERAL, &trimmed[..end], true),
                    &trimmed[end..]
                ),
                None => line.to_string(),
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Find where the description starts (the first run of 2+ spaces).
pub fn find_description_start(line: &str) -> Option<usize> {
    let start = line.find("  ")?;
    line[start..].find(|c: char| c != ' ').map(|_| start)
}

#[cfg(test)]
#[path = "colors_tests.rs"]
mod tests;
