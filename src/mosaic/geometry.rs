//! The pixel pass: float geometry at three nesting levels, rounded with
//! sum preservation so nothing drifts.
//!
//! Per row (content width `W`, margin `m`, `G` groups, ratio `R`,
//! weighted ratio `Wr`):
//!
//! ```text
//! row.raw_height   = (1/R) · (W − m·(G − Wr))
//! group.raw_width  = (row.raw_height − m·images) · group.ratio + m
//! image.raw_height = (group.raw_width − m) / image.ratio
//! ```
//!
//! Group widths are constrained-rounded to sum to exactly `W`; image
//! heights within a group are constrained-rounded to sum to exactly
//! `group.height − m·images`. Every image's rendered width is its group's
//! width minus the margin.
//!
//! All functions here are pure and testable without any I/O.

use super::rounding::round_preserving_sum;
use super::types::Row;

/// Fill in pixel geometry for carved rows, in place.
pub(crate) fn compute_geometry(rows: &mut [Row], content_width: i32, margin: i32) {
    let margin_f = f64::from(margin);

    for row in rows {
        row.width = content_width;
        let group_count = row.groups.len() as f64;
        row.raw_height = (1.0 / row.ratio)
            * (f64::from(content_width) - margin_f * (group_count - row.weighted_ratio));
        row.height = row.raw_height.round() as i32;

        for group in &mut row.groups {
            group.height = row.height;
            group.raw_width =
                (row.raw_height - margin_f * group.images.len() as f64) * group.ratio + margin_f;
        }

        let raw_widths: Vec<f64> = row.groups.iter().map(|group| group.raw_width).collect();
        let widths = round_preserving_sum(&raw_widths, Some(row.width));

        for (group, width) in row.groups.iter_mut().zip(widths) {
            group.width = width;
            let image_count = group.images.len() as i32;

            for tile in &mut group.images {
                tile.width = group.width - margin;
                tile.raw_height = (group.raw_width - margin_f) / tile.ratio;
            }

            let raw_heights: Vec<f64> = group.images.iter().map(|tile| tile.raw_height).collect();
            let heights =
                round_preserving_sum(&raw_heights, Some(group.height - margin * image_count));
            for (tile, height) in group.images.iter_mut().zip(heights) {
                tile.height = height;
            }
        }
    }
}
