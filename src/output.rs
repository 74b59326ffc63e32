//! CLI output formatting for all pipeline stages.
//!
//! Output is information-centric, not file-centric: every entity leads
//! with its positional index and semantic identity (dimensions, ratio,
//! row structure), with filesystem paths as context. Each stage has a
//! `format_*` function (returns `Vec<String>`) for testability and a
//! `print_*` wrapper that writes to stdout. Format functions are pure —
//! no I/O, no side effects.
//!
//! ## Scan
//!
//! ```text
//! Images
//!     001 dawn.jpg 1600×1067 (1.50)
//!     002 pier.jpg 800×1200 (0.67)
//! Scanned 2 images
//! ```
//!
//! ## Layout
//!
//! ```text
//! Rows
//!     001 1000×214 (3 columns)
//!         001 320px column, 1 image
//!         002 360px column, 2 images
//!         003 320px column, 1 image
//! Laid out 4 images into 1 row
//! ```

use crate::layout::LayoutManifest;
use crate::scan::Manifest;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Pluralize a count: `1 row`, `2 rows`.
fn count_noun(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

// ============================================================================
// Stage 1: Scan output
// ============================================================================

/// Format scan output: one line per discovered image with its dimensions
/// and aspect ratio.
pub fn format_scan_output(manifest: &Manifest) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push("Images".to_string());
    for (i, image) in manifest.images.iter().enumerate() {
        let ratio = f64::from(image.width.max(1)) / f64::from(image.height.max(1));
        lines.push(format!(
            "    {} {} {}\u{d7}{} ({:.2})",
            format_index(i + 1),
            image.path,
            image.width,
            image.height,
            ratio
        ));
    }
    lines.push(format!("Scanned {}", count_noun(manifest.images.len(), "image")));
    lines
}

/// Print scan output to stdout.
pub fn print_scan_output(manifest: &Manifest) {
    for line in format_scan_output(manifest) {
        println!("{}", line);
    }
}

// ============================================================================
// Stage 2: Layout output
// ============================================================================

/// Format layout output: one line per row with its pixel box and column
/// structure, plus one indented line per column.
pub fn format_layout_output(manifest: &LayoutManifest) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push("Rows".to_string());
    for (i, row) in manifest.rows.iter().enumerate() {
        lines.push(format!(
            "    {} {}\u{d7}{} ({})",
            format_index(i + 1),
            row.width,
            row.height,
            count_noun(row.groups.len(), "column")
        ));
        for (j, group) in row.groups.iter().enumerate() {
            lines.push(format!(
                "        {} {}px column, {}",
                format_index(j + 1),
                group.width,
                count_noun(group.images.len(), "image")
            ));
        }
    }
    lines.push(format!(
        "Laid out {} into {}",
        count_noun(manifest.image_count, "image"),
        count_noun(manifest.rows.len(), "row")
    ));
    lines
}

/// Print layout output to stdout.
pub fn print_layout_output(manifest: &LayoutManifest) {
    for line in format_layout_output(manifest) {
        println!("{}", line);
    }
}
