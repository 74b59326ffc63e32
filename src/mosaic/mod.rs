//! The mosaic layout engine — pure geometry, no I/O.
//!
//! | Step | Module | Role |
//! |------|--------|------|
//! | Normalize | `types` | degenerate dimensions → 1, derive aspect ratios |
//! | Carve | `grouper` + `shapes` | shape-driven partition into rows of groups |
//! | Measure | `geometry` + `rounding` | float geometry, sum-preserving pixel rounding |
//!
//! The engine is a single pure function over an image list: it copies its
//! input into private working tiles (callers can re-layout the same slice
//! and get identical results), threads all selection state through the
//! call (no statics — concurrent layouts are safe), and guarantees that
//! every row's group widths sum to exactly the content width and every
//! group's image heights fill its height budget exactly.
//!
//! Degenerate content widths are *not* defended: `content_width <= 0`
//! produces non-positive geometry rather than an error. Validate at the
//! boundary — [`crate::config::GalleryConfig::validate`] does.

mod geometry;
mod grouper;
mod rounding;
mod shapes;
mod types;

pub use rounding::round_preserving_sum;
pub use shapes::{CATALOG, ShapeHistory, ShapeKind, next_row_sizes};
pub use types::{Group, Row, SourceImage, Tile};

/// Lay out images into rows of pixel-sized groups.
///
/// `content_width` is the fixed width the gallery must fill; `margin` is
/// the gap between elements, subtracted from raw geometry before rounding.
/// The input slice is never mutated. An empty slice yields an empty row
/// list.
///
/// # Examples
/// ```
/// # use tiled_gal::mosaic::{SourceImage, layout};
/// let images = vec![
///     SourceImage::new(1500.0, 1000.0),
///     SourceImage::new(1500.0, 1000.0),
///     SourceImage::new(1500.0, 1000.0),
/// ];
/// let rows = layout(&images, 600, 0);
/// assert_eq!(rows.len(), 1);
/// let widths: Vec<i32> = rows[0].groups.iter().map(|g| g.width).collect();
/// assert_eq!(widths.iter().sum::<i32>(), 600);
/// ```
pub fn layout(images: &[SourceImage], content_width: i32, margin: i32) -> Vec<Row> {
    let tiles: Vec<Tile> = images.iter().map(Tile::from_source).collect();
    let mut rows = grouper::carve_rows(&tiles, content_width);
    geometry::compute_geometry(&mut rows, content_width, margin);
    rows
}
