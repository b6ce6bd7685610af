// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Specs for `wl resync`.

#![allow(clippy::unwrap_used)]

mod common;
use common::*;

use httpmock::prelude::*;
use serde_json::json;
use std::path::Path;

/// Point an existing project at `api_url` with test credentials.
fn configure_crm(dir: &Path, api_url: &str) {
    for (key, value) in [
        ("sync.api_url", api_url),
        ("sync.api_key", "key-1"),
        ("sync.api_secret", "secret-1"),
    ] {
        wl().args(["config", "set", key, value])
            .current_dir(dir)
            .assert()
            .success();
    }
}

#[test]
fn resync_without_crm_skips() {
    let temp = init_temp();
    create_entry(temp.path(), 1, "ana@example.com");

    // Unconfigured sync never pushes, so there is nothing to report
    wl().args(["resync", "--stale-mins", "0"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to resync"));
}

#[test]
fn resync_pushes_stale_pending_entries() {
    let temp = init_temp();
    let id = create_entry(temp.path(), 1, "ana@example.com");

    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/api_v1/waitlist");
        then.status(201)
            .json_body(json!({ "data": { "wishlist_id": "w-9" } }));
    });
    configure_crm(temp.path(), &server.base_url());

    wl().args(["resync", "--stale-mins", "0"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Resynced 1 entries: 1 synced, 0 failed, 0 skipped",
        ));

    mock.assert();
    let entry = show_json(temp.path(), &id);
    assert_eq!(entry["sync_status"], "synced");
    assert_eq!(entry["remote_id"], "w-9");
    assert_eq!(entry["sync_attempts"], 1);
}

#[test]
fn resync_leaves_fresh_pending_entries() {
    let temp = init_temp();
    create_entry(temp.path(), 1, "ana@example.com");

    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/api_v1/waitlist");
        then.status(201).json_body(json!({}));
    });
    configure_crm(temp.path(), &server.base_url());

    wl().arg("resync")
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to resync"));
    mock.assert_hits(0);
}

#[test]
fn resync_retries_errored_entries() {
    let server = MockServer::start();
    let mut failing = server.mock(|when, then| {
        when.method(POST).path("/api_v1/waitlist");
        then.status(500);
    });

    let temp = init_temp_with_crm(&server.base_url());
    let id = create_entry(temp.path(), 1, "ana@example.com");
    assert_eq!(show_json(temp.path(), &id)["sync_status"], "error");

    wl().arg("resync")
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("1 of 1 entries failed to sync"));

    failing.delete();
    server.mock(|when, then| {
        when.method(POST).path("/api_v1/waitlist");
        then.status(200)
            .json_body(json!({ "data": { "wishlist_id": "w-1" } }));
    });

    wl().arg("resync").current_dir(temp.path()).assert().success();

    let entry = show_json(temp.path(), &id);
    assert_eq!(entry["sync_status"], "synced");
    assert_eq!(entry["sync_attempts"], 3);
    assert!(entry["sync_error"].is_null());
}

#[test]
fn resync_single_entry() {
    let server = MockServer::start();
    let temp = init_temp_with_crm(&server.base_url());

    let mut failing = server.mock(|when, then| {
        when.method(POST).path("/api_v1/waitlist");
        then.status(503);
    });
    let first = create_entry(temp.path(), 1, "ana@example.com");
    let second = create_entry(temp.path(), 2, "ana@example.com");
    failing.delete();

    server.mock(|when, then| {
        when.method(POST).path("/api_v1/waitlist");
        then.status(201).json_body(json!({}));
    });

    wl().args(["resync", &first])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("1 synced"));

    assert_eq!(show_json(temp.path(), &first)["sync_status"], "synced");
    assert_eq!(show_json(temp.path(), &second)["sync_status"], "error");

    // Already synced entries are left alone
    wl().args(["resync", &first])
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("already synced"));
}
