// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Specs for `wl config`.

#![allow(clippy::unwrap_used)]

mod common;
use common::*;

#[test]
fn show_lists_every_key_with_secrets_masked() {
    let temp = init_temp_with_crm("https://crm.example.com");

    wl().args(["config", "show"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "sync.api_url = https://crm.example.com",
        ))
        .stdout(predicate::str::contains("sync.api_key = ********"))
        .stdout(predicate::str::contains("sync.api_secret = ********"))
        .stdout(predicate::str::contains("session.secret = ********"))
        .stdout(predicate::str::contains("sync.timeout_secs = 30"))
        .stdout(predicate::str::contains("session.lifetime_secs = 86400"))
        .stdout(predicate::str::contains("key-1").not())
        .stdout(predicate::str::contains("secret-1").not());
}

#[test]
fn show_unset_credentials() {
    let temp = init_temp();
    wl().args(["config", "show"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("sync.api_key = <unset>"));
}

#[test]
fn show_marks_env_overrides() {
    let temp = init_temp();
    wl().args(["config", "show"])
        .env("WAITLIST_API_URL", "https://env.example.com")
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "sync.api_url = https://env.example.com  # from env",
        ));
}

#[test]
fn set_persists_value() {
    let temp = init_temp();
    wl().args(["config", "set", "sync.timeout_secs", "5"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Set sync.timeout_secs"));

    let content = std::fs::read_to_string(temp.path().join(".waitlist/config.toml")).unwrap();
    assert!(content.contains("timeout_secs = 5"));

    wl().args(["config", "show"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("sync.timeout_secs = 5"));
}

#[test]
fn set_database_moves_store() {
    let temp = init_temp();
    wl().args(["config", "set", "database", "data/entries.db"])
        .current_dir(temp.path())
        .assert()
        .success();
    std::fs::create_dir_all(temp.path().join("data")).unwrap();

    create_entry(temp.path(), 1, "ana@example.com");
    assert!(temp.path().join("data/entries.db").exists());
}

#[test]
fn set_unknown_key_fails() {
    let temp = init_temp();
    wl().args(["config", "set", "sync.retries", "3"])
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown config key 'sync.retries'"));
}

#[test]
fn set_rejects_invalid_values() {
    let temp = init_temp();
    wl().args(["config", "set", "sync.api_url", "ftp://crm"])
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("must start with http:// or https://"));

    wl().args(["config", "set", "session.lifetime_secs", "0"])
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("session.lifetime_secs"));
}

#[test]
fn rotating_session_secret_invalidates_tokens() {
    let temp = init_temp();
    let old = token(temp.path());
    wl().args(["config", "set", "session.secret", "rotated"])
        .current_dir(temp.path())
        .assert()
        .success();

    wl().args([
        "submit",
        "--token",
        &old,
        "-f",
        "product_id=1",
        "-f",
        "customer_name=Ana",
        "-f",
        "customer_email=ana@example.com",
        "-f",
        "customer_phone=1",
    ])
    .current_dir(temp.path())
    .assert()
    .failure()
    .stderr(predicate::str::contains("Sesión expirada"));
}
