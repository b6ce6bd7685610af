// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared argument structs for CLI commands.

use clap::Args;

/// Paging arguments for listings.
#[derive(Args, Clone, Debug)]
pub struct PageArgs {
    /// Maximum number of entries to show
    #[arg(short = 'n', long, default_value_t = 10)]
    pub limit: usize,

    /// Number of entries to skip
    #[arg(long, default_value_t = 0)]
    pub offset: usize,
}

impl Default for PageArgs {
    fn default() -> Self {
        PageArgs {
            limit: 10,
            offset: 0,
        }
    }
}

/// CRM credentials accepted by `wl init`.
#[derive(Args, Clone, Debug, Default)]
pub struct CrmArgs {
    /// Base URL of the CRM API
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// CRM API key
    #[arg(long, value_name = "KEY")]
    pub api_key: Option<String>,

    /// CRM signing secret
    #[arg(long, value_name = "SECRET")]
    pub api_secret: Option<String>,
}
