//! Shared test utilities for the tiled-gal test suite.
//!
//! Builders for the inter-stage manifests so unit tests can exercise the
//! layout and render stages without touching the filesystem: synthetic
//! image entries get predictable `img-NNN.jpg` paths.

use crate::config::GalleryConfig;
use crate::layout::{self, LayoutManifest};
use crate::scan::{ImageEntry, Manifest};

/// A scan manifest with stock config and one entry per `(width, height)`,
/// pathed `img-000.jpg`, `img-001.jpg`, ...
pub fn scan_manifest(dimensions: &[(u32, u32)]) -> Manifest {
    Manifest {
        config: GalleryConfig::default(),
        images: dimensions
            .iter()
            .enumerate()
            .map(|(i, &(width, height))| ImageEntry {
                path: format!("img-{i:03}.jpg"),
                width,
                height,
            })
            .collect(),
    }
}

/// A layout manifest computed from a synthetic scan manifest.
pub fn layout_manifest(dimensions: &[(u32, u32)]) -> LayoutManifest {
    layout::layout(&scan_manifest(dimensions))
}

/// The group-size structure of each row, for shape assertions.
pub fn row_shapes(manifest: &LayoutManifest) -> Vec<Vec<usize>> {
    manifest
        .rows
        .iter()
        .map(|row| row.groups.iter().map(|group| group.images.len()).collect())
        .collect()
}
