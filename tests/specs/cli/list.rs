// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Specs for the reporting commands: `wl list`, `wl show` and `wl stats`.

#![allow(clippy::unwrap_used)]

mod common;
use common::*;

fn list_json(dir: &std::path::Path, args: &[&str]) -> serde_json::Value {
    let output = wl()
        .arg("list")
        .args(args)
        .args(["-o", "json"])
        .current_dir(dir)
        .output()
        .unwrap();
    assert!(output.status.success());
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn list_empty_store() {
    let temp = init_temp();
    wl().arg("list")
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No entries"));
}

#[test]
fn list_shows_newest_first() {
    let temp = init_temp();
    let first = create_entry(temp.path(), 1, "first@example.com");
    let second = create_entry(temp.path(), 2, "second@example.com");

    let json = list_json(temp.path(), &[]);
    let entries = json["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["id"], second.as_str());
    assert_eq!(entries[1]["id"], first.as_str());
}

#[test]
fn list_text_line_format() {
    let temp = init_temp();
    let id = create_entry(temp.path(), 321, "luisa@example.com");

    wl().arg("list")
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "- (pending) {id}: Luisa Gómez <luisa@example.com> product 321"
        )));
}

#[test]
fn list_pages_with_limit_and_offset() {
    let temp = init_temp();
    for product in 1..=3 {
        create_entry(temp.path(), product, "ana@example.com");
    }

    let json = list_json(temp.path(), &["-n", "2"]);
    assert_eq!(json["entries"].as_array().unwrap().len(), 2);
    assert_eq!(json["limit"], 2);

    let json = list_json(temp.path(), &["-n", "2", "--offset", "2"]);
    let entries = json["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["product_id"], 1);
    assert_eq!(json["offset"], 2);
}

#[test]
fn list_filters_by_status() {
    let temp = init_temp();
    create_entry(temp.path(), 1, "ana@example.com");

    let json = list_json(temp.path(), &["--status", "pending"]);
    assert_eq!(json["entries"].as_array().unwrap().len(), 1);
    assert_eq!(json["status"], "pending");

    let json = list_json(temp.path(), &["--status", "error"]);
    assert!(json["entries"].as_array().unwrap().is_empty());
}

#[test]
fn list_rejects_unknown_status() {
    let temp = init_temp();
    wl().args(["list", "--status", "lost"])
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected pending, synced or error"));
}

#[test]
fn show_prints_entry_details() {
    let temp = init_temp();
    let id = create_entry(temp.path(), 321, "Luisa@Example.com");

    wl().args(["show", &id])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("[pending] {id}")))
        .stdout(predicate::str::contains("  Name: Bolso Tejido"))
        .stdout(predicate::str::contains("  Email: luisa@example.com"))
        .stdout(predicate::str::contains("  Attempts: 0"));
}

#[test]
fn show_json_has_stored_fields() {
    let temp = init_temp();
    let id = create_entry(temp.path(), 321, "luisa@example.com");

    let entry = show_json(temp.path(), &id);
    assert_eq!(entry["product_id"], 321);
    assert_eq!(entry["product_price"], "45.50");
    assert_eq!(entry["sync_status"], "pending");
    assert_eq!(entry["sync_attempts"], 0);
    assert!(entry["remote_id"].is_null());
}

#[test]
fn show_unknown_id_fails() {
    let temp = init_temp();
    wl().args(["show", "wl-00000000"])
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("wl-00000000"));
}

#[test]
fn stats_counts_per_status() {
    let temp = init_temp();
    create_entry(temp.path(), 1, "ana@example.com");
    create_entry(temp.path(), 2, "ana@example.com");

    wl().arg("stats")
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("pending: 2"))
        .stdout(predicate::str::contains("synced:  0"))
        .stdout(predicate::str::contains("total:   2"));

    let output = wl()
        .args(["stats", "-o", "json"])
        .current_dir(temp.path())
        .output()
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["pending"], 2);
    assert_eq!(json["error"], 0);
}
