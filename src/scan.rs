//! Directory scanning and image manifest generation.
//!
//! Stage 1 of the tiled-gal pipeline. Walks a directory of photos, probes
//! each file's pixel dimensions, and produces the image manifest the
//! layout stage consumes.
//!
//! ## Dimension Probing
//!
//! Only image headers are read — `image::image_dimensions` parses enough
//! of the file to learn width and height without decoding pixels, so
//! scanning a multi-gigabyte photo directory stays fast. Probing goes
//! through the [`DimensionProbe`] trait; tests substitute a mock so no
//! real image files are needed.
//!
//! Probes run in parallel via [rayon](https://docs.rs/rayon), capped by
//! `scan.max_workers` (see [`crate::config::effective_workers`]). Results
//! keep directory-walk order, so the manifest — and therefore the final
//! mosaic — is deterministic for a given tree.
//!
//! ## Output
//!
//! ```text
//! {
//!   "config": { ... },
//!   "images": [
//!     { "path": "dawn.jpg", "width": 1600, "height": 1067 },
//!     ...
//!   ]
//! }
//! ```
//!
//! Files whose extension is not in `scan.extensions` are skipped, as are
//! hidden files. An empty result is an error: a gallery needs images.

use crate::config::{ConfigError, GalleryConfig};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Cannot walk directory: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Cannot probe {path}: {source}")]
    Probe {
        path: PathBuf,
        source: ProbeError,
    },
    #[error("No images found in {0}")]
    NoImages(PathBuf),
}

#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Unreadable image: {0}")]
    Image(#[from] image::ImageError),
}

/// Manifest output from the scan stage.
#[derive(Debug, Serialize, Deserialize)]
pub struct Manifest {
    pub config: GalleryConfig,
    pub images: Vec<ImageEntry>,
}

/// One discovered image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageEntry {
    /// Path relative to the scanned root, forward-slashed.
    pub path: String,
    /// Pixel width from the file header.
    pub width: u32,
    /// Pixel height from the file header.
    pub height: u32,
}

/// Seam between the scanner and the filesystem: something that can report
/// an image file's dimensions. The production implementation is
/// [`FileProbe`]; tests use a mock.
pub trait DimensionProbe: Sync {
    /// Pixel dimensions (width, height) of the image at `path`.
    fn probe(&self, path: &Path) -> Result<(u32, u32), ProbeError>;
}

/// Header-only dimension probe backed by the `image` crate.
#[derive(Debug, Default)]
pub struct FileProbe;

impl DimensionProbe for FileProbe {
    fn probe(&self, path: &Path) -> Result<(u32, u32), ProbeError> {
        Ok(image::image_dimensions(path)?)
    }
}

/// Scan `root` for images and produce the manifest.
///
/// Loads `config.toml` from `root` (stock defaults when absent).
pub fn scan(root: &Path) -> Result<Manifest, ScanError> {
    let config = GalleryConfig::load_or_default(root)?;
    scan_with_probe(root, config, &FileProbe)
}

/// Scan with an explicit config and probe. Backs [`scan`] and the tests.
pub fn scan_with_probe(
    root: &Path,
    config: GalleryConfig,
    probe: &dyn DimensionProbe,
) -> Result<Manifest, ScanError> {
    let paths = collect_image_paths(root, &config)?;
    if paths.is_empty() {
        return Err(ScanError::NoImages(root.to_path_buf()));
    }

    let images: Vec<ImageEntry> = paths
        .par_iter()
        .map(|path| {
            let (width, height) = probe.probe(path).map_err(|source| ScanError::Probe {
                path: path.clone(),
                source,
            })?;
            Ok(ImageEntry {
                path: relative_path(root, path),
                width,
                height,
            })
        })
        .collect::<Result<_, ScanError>>()?;

    Ok(Manifest { config, images })
}

/// Walk `root` depth-first in name order and collect matching files.
fn collect_image_paths(root: &Path, config: &GalleryConfig) -> Result<Vec<PathBuf>, ScanError> {
    let mut paths = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        if entry
            .file_name()
            .to_string_lossy()
            .starts_with('.')
        {
            continue;
        }
        if has_image_extension(entry.path(), &config.scan.extensions) {
            paths.push(entry.into_path());
        }
    }
    Ok(paths)
}

fn has_image_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .map(|ext| {
            let ext = ext.to_string_lossy().to_lowercase();
            extensions.iter().any(|allowed| allowed.to_lowercase() == ext)
        })
        .unwrap_or(false)
}

fn relative_path(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Probe that hands out queued dimensions without touching any file,
    /// recording the paths it was asked about. Uses Mutex (not RefCell)
    /// so it is Sync and works with rayon's par_iter.
    #[derive(Default)]
    struct MockProbe {
        dimensions: Mutex<std::collections::HashMap<String, (u32, u32)>>,
        probed: Mutex<Vec<String>>,
    }

    impl MockProbe {
        fn with(entries: &[(&str, (u32, u32))]) -> Self {
            let probe = Self::default();
            {
                let mut map = probe.dimensions.lock().unwrap();
                for (name, dims) in entries {
                    map.insert(name.to_string(), *dims);
                }
            }
            probe
        }
    }

    impl DimensionProbe for MockProbe {
        fn probe(&self, path: &Path) -> Result<(u32, u32), ProbeError> {
            let name = path.file_name().unwrap().to_string_lossy().into_owned();
            self.probed.lock().unwrap().push(name.clone());
            self.dimensions
                .lock()
                .unwrap()
                .get(&name)
                .copied()
                .ok_or_else(|| {
                    ProbeError::Io(std::io::Error::new(
                        std::io::ErrorKind::NotFound,
                        format!("no mock dimensions for {name}"),
                    ))
                })
        }
    }

    fn touch(dir: &Path, name: &str) {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, b"").unwrap();
    }

    #[test]
    fn scans_images_in_name_order() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "c-sunset.jpg");
        touch(tmp.path(), "a-dawn.jpg");
        touch(tmp.path(), "b-noon.png");
        let probe = MockProbe::with(&[
            ("a-dawn.jpg", (1600, 1067)),
            ("b-noon.png", (800, 1200)),
            ("c-sunset.jpg", (2048, 1024)),
        ]);

        let manifest = scan_with_probe(tmp.path(), GalleryConfig::default(), &probe).unwrap();
        let paths: Vec<&str> = manifest.images.iter().map(|i| i.path.as_str()).collect();
        assert_eq!(paths, vec!["a-dawn.jpg", "b-noon.png", "c-sunset.jpg"]);
        assert_eq!(manifest.images[0].width, 1600);
        assert_eq!(manifest.images[0].height, 1067);
    }

    #[test]
    fn skips_non_image_and_hidden_files() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "dawn.jpg");
        touch(tmp.path(), "notes.txt");
        touch(tmp.path(), "config.toml");
        touch(tmp.path(), ".hidden.jpg");
        let probe = MockProbe::with(&[("dawn.jpg", (100, 100))]);

        let manifest = scan_with_probe(tmp.path(), GalleryConfig::default(), &probe).unwrap();
        assert_eq!(manifest.images.len(), 1);
        assert_eq!(manifest.images[0].path, "dawn.jpg");
        // The mock never saw the skipped files.
        assert_eq!(probe.probed.lock().unwrap().len(), 1);
    }

    #[test]
    fn extension_matching_is_case_insensitive() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "DAWN.JPG");
        let probe = MockProbe::with(&[("DAWN.JPG", (640, 480))]);
        let manifest = scan_with_probe(tmp.path(), GalleryConfig::default(), &probe).unwrap();
        assert_eq!(manifest.images.len(), 1);
    }

    #[test]
    fn nested_directories_use_forward_slashes() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "travel/japan/tokyo.jpg");
        let probe = MockProbe::with(&[("tokyo.jpg", (3000, 2000))]);
        let manifest = scan_with_probe(tmp.path(), GalleryConfig::default(), &probe).unwrap();
        assert_eq!(manifest.images[0].path, "travel/japan/tokyo.jpg");
    }

    #[test]
    fn empty_directory_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let result = scan_with_probe(tmp.path(), GalleryConfig::default(), &MockProbe::default());
        assert!(matches!(result, Err(ScanError::NoImages(_))));
    }

    #[test]
    fn probe_failure_names_the_file() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "broken.jpg");
        // Mock has no dimensions queued → NotFound from the probe.
        let result = scan_with_probe(tmp.path(), GalleryConfig::default(), &MockProbe::default());
        match result {
            Err(ScanError::Probe { path, .. }) => {
                assert!(path.to_string_lossy().ends_with("broken.jpg"));
            }
            other => panic!("expected probe error, got {other:?}"),
        }
    }

    #[test]
    fn custom_extension_list_is_respected() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "scan-01.tif");
        touch(tmp.path(), "dawn.jpg");
        let mut config = GalleryConfig::default();
        config.scan.extensions = vec!["tif".to_string()];
        let probe = MockProbe::with(&[("scan-01.tif", (1200, 1600))]);
        let manifest = scan_with_probe(tmp.path(), config, &probe).unwrap();
        assert_eq!(manifest.images.len(), 1);
        assert_eq!(manifest.images[0].path, "scan-01.tif");
    }

    #[test]
    fn manifest_round_trips_through_json() {
        let manifest = Manifest {
            config: GalleryConfig::default(),
            images: vec![ImageEntry {
                path: "dawn.jpg".into(),
                width: 1600,
                height: 1067,
            }],
        };
        let json = serde_json::to_string_pretty(&manifest).unwrap();
        let back: Manifest = serde_json::from_str(&json).unwrap();
        assert_eq!(back.images[0].path, "dawn.jpg");
        assert_eq!(back.images[0].width, 1600);
    }
}
