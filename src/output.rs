//! CLI output formatting for every command.
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.
//!
//! Entities follow the same two-level pattern everywhere: a header line with
//! positional index and name, then indented context lines.
//!
//! ## Check
//!
//! ```text
//! Collections
//! 001 works (3 indexed, 2 loaded, 2 shown)
//!     001 well-tidjikja
//!     002 ramadan-baskets
//!     Dropped: broken-entry (malformed JSON: expected value at line 1 column 3)
//! 002 advertisements (2 indexed, 2 loaded, 1 shown)
//!     001 winter-campaign
//!
//! Pages
//! 001 home
//! 002 about
//! 003 legal (missing)
//! ```
//!
//! ## Generate
//!
//! ```text
//! ar/index.html
//! ar/about.html
//! ...
//! Generated 13 pages: 4 works (3 featured), 1 advertisements, 2 announcements
//! ```

use crate::generate::GenerateReport;
use crate::index::IndexSummary;
use crate::loader::Inventory;
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max).collect();
        format!("{}...", cut)
    }
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{} {}", n, word)
    } else {
        format!("{} {}s", n, word)
    }
}

// ============================================================================
// index
// ============================================================================

pub fn format_index_output(summaries: &[IndexSummary]) -> Vec<String> {
    let mut lines = vec!["Manifests".to_string()];
    for (i, summary) in summaries.iter().enumerate() {
        lines.push(format!(
            "{} {} ({})",
            format_index(i + 1),
            summary.collection,
            plural(summary.ids.len(), "item")
        ));
        lines.push(format!("    Source: {}", summary.collection.manifest_path()));
    }
    lines
}

pub fn print_index_output(summaries: &[IndexSummary]) {
    for line in format_index_output(summaries) {
        println!("{}", line);
    }
}

// ============================================================================
// check
// ============================================================================

/// Inventory of what loads, what is shown, and what was dropped.
pub fn format_check_output(inventory: &Inventory, source_root: &Path) -> Vec<String> {
    let mut lines = vec!["Collections".to_string()];
    for (i, report) in inventory.collections.iter().enumerate() {
        lines.push(format!(
            "{} {} ({} indexed, {} loaded, {} shown)",
            format_index(i + 1),
            report.collection,
            report.indexed.len(),
            report.loaded,
            report.visible.len()
        ));
        for (j, id) in report.visible.iter().enumerate() {
            lines.push(format!("    {} {}", format_index(j + 1), id));
        }
        for dropped in &report.dropped {
            lines.push(format!(
                "    Dropped: {} ({})",
                dropped.id,
                truncate(&dropped.reason, 80)
            ));
        }
    }

    lines.push(String::new());
    lines.push("Pages".to_string());
    for (i, page) in inventory.pages.iter().enumerate() {
        let marker = if page.loaded { "" } else { " (missing)" };
        lines.push(format!("{} {}{}", format_index(i + 1), page.name, marker));
    }

    lines.push(String::new());
    lines.push("Config".to_string());
    if source_root.join("config.toml").exists() {
        lines.push("    config.toml".to_string());
    } else {
        lines.push("    (defaults)".to_string());
    }

    lines
}

pub fn print_check_output(inventory: &Inventory, source_root: &Path) {
    for line in format_check_output(inventory, source_root) {
        println!("{}", line);
    }
}

// ============================================================================
// generate
// ============================================================================

pub fn format_generate_output(report: &GenerateReport) -> Vec<String> {
    let mut lines: Vec<String> = report.pages.clone();
    lines.push(format!(
        "Generated {}: {} ({} featured), {}, {}",
        plural(report.pages.len(), "page"),
        plural(report.works, "work"),
        report.featured,
        plural(report.advertisements, "advertisement"),
        plural(report.announcements, "announcement"),
    ));
    if !report.missing_pages.is_empty() {
        lines.push(format!(
            "Missing pages (rendered empty): {}",
            report.missing_pages.join(", ")
        ));
    }
    lines
}

pub fn print_generate_output(report: &GenerateReport) {
    for line in format_generate_output(report) {
        println!("{}", line);
    }
}
