// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

mod args;

use crate::colors;
use crate::help;
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use wl_core::SyncStatus;

pub use args::{CrmArgs, PageArgs};

/// Parse a sync status filter.
fn sync_status(s: &str) -> Result<SyncStatus, String> {
    s.parse().map_err(|_| "expected pending, synced or error".to_string())
}

/// Output format for commands supporting structured output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Parser)]
#[command(name = "wl")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Waitlist intake with signed CRM sync")]
#[command(
    long_about = "Record back-in-stock waitlist signups in a local SQLite store and push them to an external CRM.\n\n\
    Entries are deduplicated per product and email. Failed or stale pushes can be retried with 'wl resync'."
)]
#[command(after_help = help::quickstart())]
#[command(styles = help::styles())]
pub struct Cli {
    /// Run as if wl was started in <path>
    #[arg(short = 'C', long = "directory", global = true, value_name = "path")]
    pub directory: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    // ─────────────────────────────────────────────────────────────────────────
    // Intake
    // ─────────────────────────────────────────────────────────────────────────
    /// Record a waitlist submission and push it to the CRM
    #[command(after_help = colors::examples("\
Examples:
  wl submit --token \"$(wl token)\" \\
    -f product_id=321 -f customer_name=\"Ana\" \\
    -f customer_email=ana@example.com -f customer_phone=5550199
  wl submit --token <token> -f ... --json    Print {ok, message} as JSON

Fields:
  Required: product_id, customer_name, customer_email, customer_phone
  Optional: product_name, product_sku, product_price, product_image"))]
    Submit {
        /// Anti-forgery token from 'wl token'
        #[arg(long)]
        token: String,

        /// Form field as key=value (repeatable)
        #[arg(long = "field", short = 'f', value_name = "KEY=VALUE")]
        fields: Vec<String>,

        /// Print the response as JSON
        #[arg(long)]
        json: bool,
    },

    /// Issue a fresh form token
    Token,

    // ─────────────────────────────────────────────────────────────────────────
    // Reporting
    // ─────────────────────────────────────────────────────────────────────────
    /// List entries, newest first
    #[command(after_help = colors::examples("\
Examples:
  wl list                       Ten newest entries
  wl list -n 50 --offset 50     Second page of fifty
  wl list --status error        Entries whose last push failed
  wl list -o json               JSON output"))]
    List {
        #[command(flatten)]
        page: PageArgs,

        /// Only entries with this sync status
        #[arg(long, short, value_parser = sync_status)]
        status: Option<SyncStatus>,

        /// Output format
        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// Show one entry
    Show {
        /// Entry ID
        id: String,

        /// Output format
        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// Count entries per sync status
    Stats {
        /// Output format
        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },

    // ─────────────────────────────────────────────────────────────────────────
    // Sync
    // ─────────────────────────────────────────────────────────────────────────
    /// Push failed and stale entries to the CRM again
    #[command(after_help = colors::examples("\
Examples:
  wl resync                     Retry errors and entries pending > 15 minutes
  wl resync --stale-mins 60     Only count pending entries older than an hour
  wl resync wl-1a2b3c4d         Retry a single entry"))]
    Resync {
        /// Retry only this entry
        id: Option<String>,

        /// Pending entries older than this many minutes are retried
        #[arg(long, default_value_t = 15)]
        stale_mins: u32,

        /// Maximum number of entries to push
        #[arg(long, short = 'n', default_value_t = 50)]
        limit: usize,
    },

    // ─────────────────────────────────────────────────────────────────────────
    // Setup & Configuration
    // ─────────────────────────────────────────────────────────────────────────
    /// Initialize a waitlist store in the current directory
    #[command(after_help = colors::examples("\
Examples:
  wl init                                      Sync disabled until configured
  wl init --api-url https://crm.example.com \\
    --api-key KEY --api-secret SECRET          Configure the CRM up front"))]
    Init {
        #[command(flatten)]
        crm: CrmArgs,

        /// Path to initialize (defaults to current directory)
        #[arg(long)]
        path: Option<String>,
    },

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Generate shell completions
    #[command(arg_required_else_help = true)]
    Completion {
        /// Target shell
        shell: Shell,
    },
}

/// Configuration management commands.
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show effective configuration (secrets masked)
    Show,

    /// Set a configuration value
    #[command(
        arg_required_else_help = true,
        after_help = colors::examples("\
Examples:
  wl config set sync.api_url https://crm.example.com
  wl config set sync.timeout_secs 10
  wl config set database data/waitlist.db")
    )]
    Set {
        /// Key such as sync.api_url or session.lifetime_secs
        key: String,

        /// New value (empty clears optional settings)
        value: String,
    },
}

#[cfg(test)]
#[path = "../cli_tests/mod.rs"]
mod tests;
