// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Specs for `wl init` and project discovery.

#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

mod common;
use common::*;

#[test]
fn creates_waitlist_directory() {
    let temp = TempDir::new().unwrap();

    wl().arg("init")
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized waitlist"))
        .stdout(predicate::str::contains("Sync: disabled"));

    assert!(temp.path().join(".waitlist/config.toml").exists());
    assert!(temp.path().join(".waitlist/waitlist.db").exists());
    assert!(temp.path().join(".waitlist/.gitignore").exists());

    let config = std::fs::read_to_string(temp.path().join(".waitlist/config.toml")).unwrap();
    assert!(config.contains("[session]"));
    assert!(config.contains("secret = "));
}

#[test]
fn fails_if_already_initialized() {
    let temp = init_temp();
    wl().arg("init")
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("already initialized"));
}

#[test]
fn init_with_crm_enables_sync() {
    let temp = TempDir::new().unwrap();
    wl().args([
        "init",
        "--api-url",
        "https://crm.example.com",
        "--api-key",
        "k",
        "--api-secret",
        "s",
    ])
    .current_dir(temp.path())
    .assert()
    .success()
    .stdout(predicate::str::contains("Sync: enabled (https://crm.example.com)"));
}

#[test]
fn init_with_path_option() {
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("shop");
    std::fs::create_dir(&target).unwrap();

    wl().args(["init", "--path", target.to_str().unwrap()])
        .current_dir(temp.path())
        .assert()
        .success();
    assert!(target.join(".waitlist/config.toml").exists());
    assert!(!temp.path().join(".waitlist").exists());
}

#[test]
fn commands_fail_outside_project() {
    let temp = TempDir::new().unwrap();
    wl().arg("stats")
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("wl init"));
}

#[test]
fn commands_work_from_subdirectory() {
    let temp = init_temp();
    let nested = temp.path().join("a/b");
    std::fs::create_dir_all(&nested).unwrap();

    wl().arg("stats")
        .current_dir(&nested)
        .assert()
        .success()
        .stdout(predicate::str::contains("total:   0"));
}

#[test]
fn directory_flag_changes_project() {
    let temp = init_temp();
    let elsewhere = TempDir::new().unwrap();
    wl().args(["-C", temp.path().to_str().unwrap(), "stats"])
        .current_dir(elsewhere.path())
        .assert()
        .success();
}
