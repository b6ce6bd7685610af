// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

// Allow unused items: test helpers are shared across multiple test files,
// and not every test file uses every helper.
#![allow(dead_code)]
#![allow(unused_imports)]
#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use std::path::Path;

pub use predicates::prelude::*;
pub use tempfile::TempDir;

/// `wl` with the CRM environment cleared so the host cannot leak settings in.
pub fn wl() -> Command {
    let mut cmd = cargo_bin_cmd!("wl");
    cmd.env_remove("WAITLIST_API_URL")
        .env_remove("WAITLIST_API_KEY")
        .env_remove("WAITLIST_API_SECRET")
        .env_remove("WAITLIST_LOG_FILE")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

/// Helper to create an initialized temp directory with sync disabled
pub fn init_temp() -> TempDir {
    let temp = TempDir::new().unwrap();
    wl().arg("init").current_dir(temp.path()).assert().success();
    temp
}

/// Helper to create an initialized temp directory that syncs to `api_url`
pub fn init_temp_with_crm(api_url: &str) -> TempDir {
    let temp = TempDir::new().unwrap();
    wl().args([
        "init",
        "--api-url",
        api_url,
        "--api-key",
        "key-1",
        "--api-secret",
        "secret-1",
    ])
    .current_dir(temp.path())
    .assert()
    .success();
    temp
}

/// Issue a form token in `dir`.
pub fn token(dir: &Path) -> String {
    let output = wl().arg("token").current_dir(dir).output().unwrap();
    assert!(output.status.success());
    String::from_utf8(output.stdout).unwrap().trim().to_string()
}

/// `wl submit` with a complete, valid form for `product_id` and `email`.
pub fn submit(dir: &Path, product_id: u64, email: &str) -> Command {
    let token = token(dir);
    let mut cmd = wl();
    cmd.current_dir(dir).args([
        "submit".to_string(),
        "--token".to_string(),
        token,
        "-f".to_string(),
        format!("product_id={product_id}"),
        "-f".to_string(),
        "product_name=Bolso Tejido".to_string(),
        "-f".to_string(),
        "product_price=45.50".to_string(),
        "-f".to_string(),
        "customer_name=Luisa Gómez".to_string(),
        "-f".to_string(),
        format!("customer_email={email}"),
        "-f".to_string(),
        "customer_phone=555 0199".to_string(),
    ]);
    cmd
}

/// Submit and return the created entry ID.
pub fn create_entry(dir: &Path, product_id: u64, email: &str) -> String {
    let output = submit(dir, product_id, email).arg("--json").output().unwrap();
    assert!(output.status.success(), "{:?}", output);
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    json["entry_id"].as_str().unwrap().to_string()
}

/// Parsed `wl show <id> -o json`.
pub fn show_json(dir: &Path, id: &str) -> serde_json::Value {
    let output = wl()
        .args(["show", id, "-o", "json"])
        .current_dir(dir)
        .output()
        .unwrap();
    assert!(output.status.success());
    serde_json::from_slice(&output.stdout).unwrap()
}
