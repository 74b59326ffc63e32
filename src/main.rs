use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tiled_gal::{config, layout, output, render, scan};

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup — trivial, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "tiled-gal")]
#[command(about = "Mosaic layout previews for photo galleries")]
#[command(long_about = "\
Mosaic layout previews for photo galleries

Point tiled-gal at a directory of photos and it computes a tiled mosaic:
rows of columns sized so every row fills the gallery width to the pixel,
with no rounding drift anywhere.

Pipeline:

  1. scan     photos/      →  images.json   (paths + pixel dimensions)
  2. layout   images.json  →  layout.json   (rows, columns, pixel geometry)
  3. render   layout.json  →  preview.html  (self-contained mosaic page)

Place an optional config.toml in the photo directory to set the gallery
width, margin, image extensions, and preview colors. Run
'tiled-gal gen-config' to print a documented stock config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Photo directory
    #[arg(long, default_value = "photos", global = true)]
    source: PathBuf,

    /// Output HTML file
    #[arg(long, default_value = "preview.html", global = true)]
    output: PathBuf,

    /// Directory for intermediate manifests
    #[arg(long, default_value = ".tiled-gal-temp", global = true)]
    temp_dir: PathBuf,

    /// Override the configured gallery width in pixels
    #[arg(long, global = true)]
    content_width: Option<i32>,

    /// Override the configured tile margin in pixels
    #[arg(long, global = true)]
    margin: Option<i32>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan the photo directory into an image manifest
    Scan,
    /// Compute the mosaic geometry from the image manifest
    Layout,
    /// Produce the HTML preview from the layout manifest
    Render,
    /// Run the full pipeline: scan → layout → render
    Build,
    /// Validate config and photo directory without writing anything
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Scan => {
            let manifest = run_scan(&cli)?;
            write_manifest(&cli.temp_dir.join("images.json"), &manifest)?;
            output::print_scan_output(&manifest);
        }
        Command::Layout => {
            let manifest_path = cli.temp_dir.join("images.json");
            let content = std::fs::read_to_string(&manifest_path)?;
            let mut manifest: scan::Manifest = serde_json::from_str(&content)?;
            apply_overrides(&mut manifest.config, &cli)?;
            let laid_out = layout::layout(&manifest);
            write_manifest(&cli.temp_dir.join("layout.json"), &laid_out)?;
            output::print_layout_output(&laid_out);
        }
        Command::Render => {
            render::render(&cli.temp_dir.join("layout.json"), &cli.output)?;
            println!("Preview written to {}", cli.output.display());
        }
        Command::Build => {
            println!("==> Stage 1: Scanning {}", cli.source.display());
            let manifest = run_scan(&cli)?;
            std::fs::create_dir_all(&cli.temp_dir)?;
            write_manifest(&cli.temp_dir.join("images.json"), &manifest)?;
            output::print_scan_output(&manifest);

            println!("==> Stage 2: Computing mosaic");
            let laid_out = layout::layout(&manifest);
            write_manifest(&cli.temp_dir.join("layout.json"), &laid_out)?;
            output::print_layout_output(&laid_out);

            println!("==> Stage 3: Rendering {}", cli.output.display());
            render::render(&cli.temp_dir.join("layout.json"), &cli.output)?;

            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let manifest = run_scan(&cli)?;
            output::print_scan_output(&manifest);
            println!("==> Gallery is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load config (with CLI overrides), cap the rayon pool, and scan.
fn run_scan(cli: &Cli) -> Result<scan::Manifest, Box<dyn std::error::Error>> {
    let mut gallery_config = config::GalleryConfig::load_or_default(&cli.source)?;
    apply_overrides(&mut gallery_config, cli)?;
    init_thread_pool(&gallery_config.scan);
    let manifest = scan::scan_with_probe(&cli.source, gallery_config, &scan::FileProbe)?;
    Ok(manifest)
}

/// Fold `--content-width` / `--margin` into the loaded config, then
/// re-validate so overrides obey the same rules as the file.
fn apply_overrides(
    gallery_config: &mut config::GalleryConfig,
    cli: &Cli,
) -> Result<(), config::ConfigError> {
    if let Some(content_width) = cli.content_width {
        gallery_config.layout.content_width = content_width;
    }
    if let Some(margin) = cli.margin {
        gallery_config.layout.margin = margin;
    }
    gallery_config.validate()
}

fn write_manifest<T: serde::Serialize>(
    path: &std::path::Path,
    manifest: &T,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(manifest)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Cap the rayon thread pool for dimension probing.
///
/// Capped at the number of available CPU cores — user can constrain down,
/// not up.
fn init_thread_pool(scan_config: &config::ScanConfig) {
    let workers = config::effective_workers(scan_config);
    rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build_global()
        .ok();
}
