// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Help text generation with colorization support.

use crate::colors;
use clap::builder::styling::Styles;

/// Generate clap Styles for help output.
pub fn styles() -> Styles {
    if !colors::should_colorize() {
        return Styles::plain();
    }

    use anstyle::{Ansi256Color, Color, Style};

    let color = |code| Style::new().fg_color(Some(Color::Ansi256(Ansi256Color(code))));

    Styles::styled()
        .header(color(colors::codes::HEADER))
        .usage(color(colors::codes::HEADER))
        .literal(color(colors::codes::LITERAL))
        .placeholder(color(colors::codes::CONTEXT))
        .valid(color(colors::codes::CONTEXT))
}

/// Quickstart help shown after options in main help.
pub fn quickstart() -> String {
    colors::examples(
        "\
Get started:
  wl init --api-url https://crm.example.com    Create .waitlist/ here
  wl token                                     Issue a form token
  wl submit --token <token> --field ...        Record a submission
  wl list --status error                       Find failed syncs
  wl resync                                    Retry failed and stale entries",
    )
}
