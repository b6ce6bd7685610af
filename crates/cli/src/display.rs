// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use wl_core::{ResyncReport, StatusCounts, WaitlistEntry};

/// Timestamp format for text output.
const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Format a single entry line for list output.
///
/// `status` is the already rendered status label, so callers decide on color.
pub fn format_entry_line(entry: &WaitlistEntry, status: &str) -> String {
    format!(
        "- ({}) {}: {} <{}> product {}",
        status,
        entry.id,
        entry.customer_name,
        entry.customer_email,
        entry.product_id
    )
}

/// Format entry details for the show command.
pub fn format_entry_details(entry: &WaitlistEntry) -> String {
    let mut output = Vec::new();

    output.push(format!("[{}] {}", entry.sync_status, entry.id));
    output.push(format!("Created: {}", entry.created_at.format(TIME_FORMAT)));

    output.push(String::new());
    output.push("Product:".to_string());
    output.push(format!("  ID: {}", entry.product_id));
    push_if_set(&mut output, "  Name", &entry.product_name);
    push_if_set(&mut output, "  SKU", &entry.product_sku);
    push_if_set(&mut output, "  Price", &entry.product_price);
    push_if_set(&mut output, "  Image", &entry.product_image_url);

    output.push(String::new());
    output.push("Customer:".to_string());
    output.push(format!("  Name: {}", entry.customer_name));
    output.push(format!("  Email: {}", entry.customer_email));
    output.push(format!("  Phone: {}", entry.customer_phone));

    output.push(String::new());
    output.push("Sync:".to_string());
    output.push(format!("  Attempts: {}", entry.sync_attempts));
    if let Some(at) = entry.last_attempt_at {
        output.push(format!("  Last attempt: {}", at.format(TIME_FORMAT)));
    }
    if let Some(at) = entry.synced_at {
        output.push(format!("  Synced: {}", at.format(TIME_FORMAT)));
    }
    if let Some(remote_id) = &entry.remote_id {
        output.push(format!("  Remote ID: {remote_id}"));
    }
    if let Some(error) = &entry.sync_error {
        output.push(format!("  Error: {error}"));
    }

    let mut text = output.join("\n");
    text.push('\n');
    text
}

fn push_if_set(output: &mut Vec<String>, label: &str, value: &str) {
    if !value.is_empty() {
        output.push(format!("{label}: {value}"));
    }
}

/// Format per-status counts for the stats command.
pub fn format_stats(counts: &StatusCounts) -> String {
    format!(
        "pending: {}\nsynced:  {}\nerror:   {}\ntotal:   {}\n",
        counts.pending,
        counts.synced,
        counts.error,
        counts.total()
    )
}

/// One-line summary of a resync batch.
pub fn format_resync_report(report: &ResyncReport) -> String {
    if report.attempted == 0 {
        return "Nothing to resync".to_string();
    }
    format!(
        "Resynced {} entries: {} synced, {} failed, {} skipped",
        report.attempted, report.synced, report.errored, report.skipped
    )
}

#[cfg(test)]
#[path = "display_tests.rs"]
mod tests;
