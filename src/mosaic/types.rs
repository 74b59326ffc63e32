//! The Row → Group → Tile data model.
//!
//! These types are serialized into the layout manifest (`layout.json`) that
//! the render stage consumes, so every field the renderer needs — rounded
//! pixel values, raw float geometry for debugging, passthrough source
//! fields — lives here.
//!
//! A [`Row`] spans the full content width and holds side-by-side [`Group`]s
//! (columns). A group holds one to three [`Tile`]s stacked vertically: they
//! share the group's width, and their rounded heights fill the group's
//! height budget exactly (see [`geometry`](super::geometry)).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An input image descriptor: dimensions plus anything else the caller
/// attached.
///
/// Missing or non-positive dimensions are tolerated — normalization
/// replaces them with 1 rather than rejecting the image. Fields other than
/// `width`/`height` (id, path, captions, ...) are captured verbatim and
/// reappear on the output [`Tile`], untouched by the engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceImage {
    /// Source pixel width. Zero when absent from the input.
    #[serde(default)]
    pub width: f64,
    /// Source pixel height. Zero when absent from the input.
    #[serde(default)]
    pub height: f64,
    /// Caller-supplied fields, passed through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SourceImage {
    /// A descriptor with dimensions only. Mostly useful in tests.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            extra: Map::new(),
        }
    }
}

/// One laid-out image: normalized source dimensions, aspect ratio, and the
/// computed pixel box.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tile {
    /// Rendered width in pixels (group width minus margin).
    pub width: i32,
    /// Rendered height in pixels, constrained-rounded within the group.
    pub height: i32,
    /// Height before rounding.
    pub raw_height: f64,
    /// Aspect ratio (normalized width / normalized height).
    pub ratio: f64,
    /// Source width after normalization (non-positive input becomes 1).
    pub source_width: f64,
    /// Source height after normalization.
    pub source_height: f64,
    /// Caller-supplied fields from the input descriptor, untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Tile {
    /// Build a tile from an input descriptor, normalizing degenerate
    /// dimensions: anything non-positive becomes 1, and a zero ratio
    /// (unreachable after that, but kept as a guard) becomes 1.
    pub(crate) fn from_source(source: &SourceImage) -> Self {
        let source_width = if source.width > 0.0 { source.width } else { 1.0 };
        let source_height = if source.height > 0.0 {
            source.height
        } else {
            1.0
        };
        let mut ratio = source_width / source_height;
        if ratio == 0.0 {
            ratio = 1.0;
        }
        Self {
            width: 0,
            height: 0,
            raw_height: 0.0,
            ratio,
            source_width,
            source_height,
            extra: source.extra.clone(),
        }
    }
}

/// A column of 1–3 tiles inside a row.
///
/// The group ratio is the combined aspect ratio of its vertical stack:
/// `1 / Σ(1 / tile.ratio)`. Tiles sharing a width `w` stack to a height of
/// `w · Σ(1/ratio)`, so this is the width-to-total-height ratio of the
/// column as a whole.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    /// Tiles in input order, stacked top to bottom.
    pub images: Vec<Tile>,
    /// Combined aspect ratio of the stack.
    pub ratio: f64,
    /// Column height in pixels (always the row height).
    pub height: i32,
    /// Column width in pixels, constrained-rounded within the row.
    pub width: i32,
    /// Width before rounding.
    pub raw_width: f64,
}

impl Group {
    pub(crate) fn new(images: Vec<Tile>) -> Self {
        let inverse_sum: f64 = images.iter().map(|tile| 1.0 / tile.ratio).sum();
        let ratio = if inverse_sum == 0.0 {
            1.0
        } else {
            1.0 / inverse_sum
        };
        Self {
            images,
            ratio,
            height: 0,
            width: 0,
            raw_width: 0.0,
        }
    }
}

/// One horizontal strip of the gallery: groups laid side by side spanning
/// the full content width.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Row {
    /// Groups left to right.
    pub groups: Vec<Group>,
    /// Sum of group ratios, clamped to at least 1.
    pub ratio: f64,
    /// Sum of group ratios weighted by image count, clamped to at least 1.
    pub weighted_ratio: f64,
    /// Row width in pixels — always the content width.
    pub width: i32,
    /// Row height in pixels.
    pub height: i32,
    /// Height before rounding.
    pub raw_height: f64,
}

impl Row {
    pub(crate) fn new(groups: Vec<Group>) -> Self {
        let ratio: f64 = groups.iter().map(|group| group.ratio).sum();
        let weighted_ratio: f64 = groups
            .iter()
            .map(|group| group.ratio * group.images.len() as f64)
            .sum();
        Self {
            groups,
            ratio: ratio.max(1.0),
            weighted_ratio: weighted_ratio.max(1.0),
            width: 0,
            height: 0,
            raw_height: 0.0,
        }
    }
}
