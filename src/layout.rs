//! Mosaic computation stage.
//!
//! Stage 2 of the tiled-gal pipeline. Takes the image manifest from the
//! scan stage, feeds it through the [`mosaic`](crate::mosaic) engine, and
//! produces the layout manifest the render stage consumes.
//!
//! This stage is a pure function from manifest to manifest — all file IO
//! lives in `main`. Each scanned image becomes a [`SourceImage`] whose
//! `path` rides in the passthrough fields, so it reappears verbatim on
//! the laid-out tiles without the engine ever knowing about paths.

use crate::config::GalleryConfig;
use crate::mosaic::{self, Row, SourceImage};
use crate::scan;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Manifest output from the layout stage, written as `layout.json`.
#[derive(Debug, Serialize, Deserialize)]
pub struct LayoutManifest {
    pub config: GalleryConfig,
    /// Total number of images laid out.
    pub image_count: usize,
    pub rows: Vec<Row>,
}

/// Compute the mosaic for a scanned gallery.
pub fn layout(manifest: &scan::Manifest) -> LayoutManifest {
    let sources: Vec<SourceImage> = manifest.images.iter().map(to_source).collect();
    let rows = mosaic::layout(
        &sources,
        manifest.config.layout.content_width,
        manifest.config.layout.margin,
    );
    LayoutManifest {
        config: manifest.config.clone(),
        image_count: manifest.images.len(),
        rows,
    }
}

fn to_source(entry: &scan::ImageEntry) -> SourceImage {
    let mut source = SourceImage::new(f64::from(entry.width), f64::from(entry.height));
    source
        .extra
        .insert("path".into(), Value::String(entry.path.clone()));
    source
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{row_shapes, scan_manifest};

    #[test]
    fn three_landscapes_form_one_row_of_three_columns() {
        let manifest = scan_manifest(&[(1500, 1000), (1500, 1000), (1500, 1000)]);
        assert_eq!(row_shapes(&layout(&manifest)), vec![vec![1, 1, 1]]);
    }

    #[test]
    fn every_image_lands_in_exactly_one_tile() {
        let manifest = scan_manifest(&[(1600, 1067), (800, 1200), (2048, 1024), (1500, 1000)]);
        let laid_out = layout(&manifest);
        let tile_count: usize = laid_out
            .rows
            .iter()
            .flat_map(|row| &row.groups)
            .map(|group| group.images.len())
            .sum();
        assert_eq!(tile_count, 4);
        assert_eq!(laid_out.image_count, 4);
    }

    #[test]
    fn paths_ride_through_to_tiles_in_order() {
        let manifest = scan_manifest(&[(1500, 1000), (1500, 1000), (1500, 1000)]);
        let laid_out = layout(&manifest);
        let paths: Vec<String> = laid_out
            .rows
            .iter()
            .flat_map(|row| &row.groups)
            .flat_map(|group| &group.images)
            .map(|tile| tile.extra["path"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(paths, vec!["img-000.jpg", "img-001.jpg", "img-002.jpg"]);
    }

    #[test]
    fn rows_fill_the_configured_width() {
        let mut manifest = scan_manifest(&[(1600, 1067), (800, 1200), (2048, 1024)]);
        manifest.config.layout.content_width = 720;
        let laid_out = layout(&manifest);
        for row in &laid_out.rows {
            let total: i32 = row.groups.iter().map(|group| group.width).sum();
            assert_eq!(total, 720);
        }
    }

    #[test]
    fn manifest_round_trips_through_json() {
        let laid_out = layout(&scan_manifest(&[(1600, 1067), (800, 1200)]));
        let json = serde_json::to_string_pretty(&laid_out).unwrap();
        let back: LayoutManifest = serde_json::from_str(&json).unwrap();
        assert_eq!(back.rows.len(), laid_out.rows.len());
        assert_eq!(back.image_count, 2);
        assert_eq!(
            back.rows[0].groups[0].images[0].extra["path"],
            laid_out.rows[0].groups[0].images[0].extra["path"]
        );
    }
}
