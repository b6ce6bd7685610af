// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Specs for `wl submit` and `wl token`, including the CRM push.

#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

mod common;
use common::*;

use httpmock::prelude::*;
use serde_json::json;

const SUBMITTED: &str = "¡Listo! Te avisaremos cuando esté disponible.";

#[test]
fn token_prints_timestamp_and_mac() {
    let temp = init_temp();
    let token = token(temp.path());
    let (ts, mac) = token.split_once('.').unwrap();
    assert!(ts.parse::<i64>().is_ok());
    assert_eq!(mac.len(), 64);
}

#[test]
fn submit_without_crm_stays_pending() {
    let temp = init_temp();

    submit(temp.path(), 321, "luisa@example.com")
        .assert()
        .success()
        .stdout(predicate::str::contains(SUBMITTED))
        .stdout(predicate::str::contains("Entry: wl-"));

    wl().args(["list", "--status", "pending"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("luisa@example.com"));
}

#[test]
fn submit_json_response() {
    let temp = init_temp();
    let output = submit(temp.path(), 321, "luisa@example.com")
        .arg("--json")
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["ok"], true);
    assert_eq!(json["message"], SUBMITTED);
}

#[test]
fn duplicate_submission_fails() {
    let temp = init_temp();
    submit(temp.path(), 321, "luisa@example.com").assert().success();

    submit(temp.path(), 321, "LUISA@example.com")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Ya estás inscrito en la lista de espera para este producto.",
        ));

    // Same customer, different product is fine
    submit(temp.path(), 322, "luisa@example.com").assert().success();
}

#[test]
fn forged_token_is_rejected() {
    let temp = init_temp();
    wl().args([
        "submit",
        "--token",
        "1700000000.deadbeef",
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
    .stderr(predicate::str::contains("Sesión expirada. Recarga la página."));
}

#[test]
fn missing_field_is_rejected() {
    let temp = init_temp();
    let token = token(temp.path());
    wl().args([
        "submit",
        "--token",
        &token,
        "-f",
        "product_id=1",
        "-f",
        "customer_email=ana@example.com",
    ])
    .current_dir(temp.path())
    .assert()
    .failure()
    .stderr(predicate::str::contains("Todos los campos son requeridos."));
}

#[test]
fn invalid_email_json_response() {
    let temp = init_temp();
    let output = submit(temp.path(), 1, "not-an-email")
        .arg("--json")
        .output()
        .unwrap();
    assert!(!output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json, json!({ "ok": false, "message": "Email inválido." }));
}

#[test]
fn unknown_field_is_usage_error() {
    let temp = init_temp();
    wl().args(["submit", "--token", "x", "-f", "coupon=FREE"])
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown field 'coupon'"));
}

#[test]
fn submit_pushes_signed_request_to_crm() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api_v1/waitlist")
            .header("x-api-key", "key-1")
            .header_exists("x-signature")
            .header_exists("x-timestamp")
            .json_body_partial(r#"{"source":"woocommerce_waitlist","product":{"woo_id":321}}"#);
        then.status(201)
            .json_body(json!({ "data": { "wishlist_id": "abc123" } }));
    });

    let temp = init_temp_with_crm(&server.base_url());
    let id = create_entry(temp.path(), 321, "luisa@example.com");

    mock.assert();
    let entry = show_json(temp.path(), &id);
    assert_eq!(entry["sync_status"], "synced");
    assert_eq!(entry["remote_id"], "abc123");
}

#[test]
fn crm_error_still_accepts_submission() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api_v1/waitlist");
        then.status(422)
            .json_body(json!({ "error": { "message": "invalid sku" } }));
    });

    let temp = init_temp_with_crm(&server.base_url());
    let id = create_entry(temp.path(), 321, "luisa@example.com");

    let entry = show_json(temp.path(), &id);
    assert_eq!(entry["sync_status"], "error");
    assert_eq!(entry["sync_error"], "invalid sku");
}

#[test]
fn env_credentials_override_file() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api_v1/waitlist")
            .header("x-api-key", "env-key");
        then.status(201).json_body(json!({}));
    });

    let temp = init_temp();
    let token = token(temp.path());
    wl().args([
        "submit",
        "--token",
        &token,
        "-f",
        "product_id=9",
        "-f",
        "customer_name=Ana",
        "-f",
        "customer_email=ana@example.com",
        "-f",
        "customer_phone=1",
    ])
    .env("WAITLIST_API_URL", server.base_url())
    .env("WAITLIST_API_KEY", "env-key")
    .env("WAITLIST_API_SECRET", "env-secret")
    .current_dir(temp.path())
    .assert()
    .success();

    mock.assert();
}
