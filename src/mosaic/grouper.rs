//! Carving the image queue into rows of groups.
//!
//! The grouper walks the normalized tile queue with an index cursor —
//! never by removing elements — asking the shape catalog for the next
//! row's group-size vector and slicing tiles off the front accordingly.
//! Shape sizes are clamped against the remaining queue, so a late
//! `[2]` fallback with one image left still carves cleanly.
//!
//! Rows leave here with their ratios computed and pixel fields zeroed;
//! the [`geometry`](super::geometry) pass fills those in.

use super::shapes::{self, ShapeHistory};
use super::types::{Group, Row, Tile};

/// Partition tiles into rows of groups, front to back.
pub(crate) fn carve_rows(tiles: &[Tile], content_width: i32) -> Vec<Row> {
    let mut rows = Vec::new();
    let mut history = ShapeHistory::new();
    let mut cursor = 0;

    while cursor < tiles.len() {
        let sizes = shapes::next_row_sizes(&tiles[cursor..], content_width, &mut history);
        let mut groups = Vec::new();

        for size in sizes {
            let take = size.min(tiles.len() - cursor);
            if take == 0 {
                break;
            }
            let group_tiles = tiles[cursor..cursor + take].to_vec();
            cursor += take;
            groups.push(Group::new(group_tiles));
        }

        rows.push(Row::new(groups));
    }

    rows
}
