//! CLI output formatting.
//!
//! Each command has a `format_*` function that returns `Vec<String>` and a
//! `print_*` wrapper that writes to stdout. Format functions are pure so the
//! exact console output can be asserted in tests.
//!
//! ## Items
//!
//! ```text
//! Items (gallery.toml)
//! 001 Mountains at dawn
//!     Preview: assets/mountains-small.jpg
//!     Original: assets/mountains.jpg
//! 002 (assets/lake.jpg)
//!     Preview: assets/lake-small.jpg
//! ```
//!
//! ## Generate
//!
//! ```text
//! Generated index.html
//! Copied 12 assets
//! Generated 1 page with 6 images → dist
//! ```

use crate::generate::GenerateReport;
use crate::items::Collection;
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Captioned items show the caption; uncaptioned ones show the original URL in parens.
fn item_line(index: usize, description: &str, original: &str) -> String {
    if description.trim().is_empty() {
        format!("{} ({})", format_index(index), original)
    } else {
        format!("{} {}", format_index(index), description)
    }
}

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{} {}", n, one)
    } else {
        format!("{} {}", n, many)
    }
}

pub fn format_items_output(items: &Collection, items_file: &Path) -> Vec<String> {
    let file_name = items_file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| items_file.display().to_string());

    let mut lines = vec![format!("Items ({})", file_name)];
    if items.is_empty() {
        lines.push("    (none)".to_string());
        return lines;
    }

    for (i, item) in items.iter().enumerate() {
        let captioned = !item.description.trim().is_empty();
        lines.push(item_line(i + 1, &item.description, &item.original));
        lines.push(format!("    Preview: {}", item.preview));
        if captioned {
            lines.push(format!("    Original: {}", item.original));
        }
    }

    for (first, dup) in duplicate_originals(items) {
        lines.push(format!(
            "Warning: {} repeats the original of {}; the lightbox will jump to {}",
            format_index(dup + 1),
            format_index(first + 1),
            format_index(first + 1),
        ));
    }
    lines
}

/// Pairs of `(first, later)` indices that share a full-resolution URL.
fn duplicate_originals(items: &Collection) -> Vec<(usize, usize)> {
    items
        .iter()
        .enumerate()
        .filter_map(|(i, item)| {
            items
                .position_of_original(&item.original)
                .filter(|&first| first != i)
                .map(|first| (first, i))
        })
        .collect()
}

pub fn print_items_output(items: &Collection, items_file: &Path) {
    for line in format_items_output(items, items_file) {
        println!("{}", line);
    }
}

pub fn format_generate_output(report: &GenerateReport, output_dir: &Path) -> Vec<String> {
    let mut lines: Vec<String> = report
        .written
        .iter()
        .map(|p| format!("Generated {}", p.display()))
        .collect();
    if report.assets_copied > 0 {
        lines.push(format!(
            "Copied {}",
            plural(report.assets_copied, "asset", "assets")
        ));
    }
    lines.push(format!(
        "Generated {} with {} → {}",
        plural(report.written.len(), "page", "pages"),
        plural(report.item_count, "image", "images"),
        output_dir.display()
    ));
    lines
}

pub fn print_generate_output(report: &GenerateReport, output_dir: &Path) {
    for line in format_generate_output(report, output_dir) {
        println!("{}", line);
    }
}
