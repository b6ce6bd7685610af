// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use wl_core::intake::fields;
use wl_core::{
    EntryStore, IntakeValidator, Pusher, RawSubmission, SettingsSource, SubmitResponse,
    SyncClient, WaitlistService,
};

use crate::config::Config;
use crate::error::{Error, Result};

use super::open_context;

pub fn run(token: &str, field_args: &[String], json: bool) -> Result<()> {
    let ctx = open_context()?;
    let raw = parse_fields(field_args)?;
    let client = SyncClient::new()?;
    let response = run_impl(&ctx.db, &ctx.config, &client, &raw, token)?;
    report(&response, json)
}

/// Parse repeated `key=value` arguments into a raw submission.
///
/// Keys must be known form fields. Values are kept verbatim, including any
/// further `=` characters; normalization happens in intake.
pub(crate) fn parse_fields(args: &[String]) -> Result<RawSubmission> {
    let mut raw = RawSubmission::new();
    for arg in args {
        let (key, value) = arg
            .split_once('=')
            .ok_or_else(|| Error::InvalidFieldArg(arg.clone()))?;
        let key = key.trim();
        if !fields::ALL.contains(&key) {
            return Err(Error::UnknownField {
                field: key.to_string(),
                valid: fields::ALL.join(", "),
            });
        }
        raw.insert(key, value);
    }
    Ok(raw)
}

/// Run one submission through the service.
pub(crate) fn run_impl(
    store: &dyn EntryStore,
    config: &Config,
    pusher: &dyn Pusher,
    raw: &RawSubmission,
    token: &str,
) -> Result<SubmitResponse> {
    let session = config.session_tokens()?;
    let validator = IntakeValidator::new(store, &session);
    let settings: &dyn SettingsSource = config;
    let service = WaitlistService::new(store, &validator, pusher, settings);
    Ok(service.submit(raw, token))
}

/// Print the response. A rejected submission is an error so the exit code
/// reflects it.
fn report(response: &SubmitResponse, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(response)?);
    } else if response.ok {
        println!("{}", response.message);
        if let Some(id) = &response.entry_id {
            println!("Entry: {id}");
        }
    }

    if response.ok {
        Ok(())
    } else {
        Err(Error::Rejected(response.message.clone()))
    }
}

#[cfg(test)]
#[path = "submit_tests.rs"]
mod tests;
