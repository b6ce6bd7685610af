// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! wlrs - operator CLI for the waitlist intake pipeline.
//!
//! This crate wires [`wl_core`] to a project directory: it finds
//! `.waitlist/`, loads `config.toml` (with environment overrides), opens the
//! SQLite store and runs one command against it.
//!
//! # Main Components
//!
//! - [`Config`] - Project configuration (database path, CRM and session settings)
//! - [`Cli`] - Command-line definition
//! - [`Error`] - Error types for all operations
//!
//! ```rust,ignore
//! use wlrs::{find_work_dir, get_db_path, Config};
//! use wl_core::Database;
//!
//! let work_dir = find_work_dir()?;
//! let config = Config::load(&work_dir)?;
//! let db = Database::open(&get_db_path(&work_dir, &config))?;
//! ```

mod cli;
pub mod colors;
mod commands;
mod display;
pub mod help;
pub mod logging;

pub mod config;
pub mod env;
pub mod error;

pub use cli::{Cli, Command, ConfigCommand, CrmArgs, OutputFormat, PageArgs};
pub use config::{find_work_dir, get_db_path, init_work_dir, Config, EnvOverrides};
pub use error::{Error, Result};

use clap::CommandFactory;
use clap_complete::generate;

/// Execute a parsed command line. This is the main entry point for library
/// users and provides a testable way to run commands without process execution.
pub fn run(cli: Cli) -> Result<()> {
    if let Some(dir) = &cli.directory {
        std::env::set_current_dir(dir)?;
    }
    run_command(cli.command)
}

fn run_command(command: Command) -> Result<()> {
    match command {
        Command::Submit {
            token,
            fields,
            json,
        } => commands::submit::run(&token, &fields, json),
        Command::Token => commands::token::run(),
        Command::List {
            page,
            status,
            output,
        } => commands::list::run(page, status, output),
        Command::Show { id, output } => commands::show::run(&id, output),
        Command::Stats { output } => commands::stats::run(output),
        Command::Resync {
            id,
            stale_mins,
            limit,
        } => commands::resync::run(id, stale_mins, limit),
        Command::Init { crm, path } => commands::init::run(crm, path),
        Command::Config(cmd) => commands::config::run(cmd),
        Command::Completion { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "wl", &mut std::io::stdout());
            Ok(())
        }
    }
}
