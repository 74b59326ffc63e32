//! HTML preview generation.
//!
//! Stage 3 of the tiled-gal pipeline. Takes the layout manifest and
//! renders a single static HTML page showing the mosaic at its computed
//! pixel geometry: one block per row, one column per group, one `<img>`
//! per tile (or a dimension placeholder when the tile carries no `path`).
//!
//! The page is self-contained — styles are embedded, image sources are
//! referenced relative to wherever the page is written. Because every box
//! is sized from the engine's sum-preserving geometry, rows line up
//! pixel-exact at any margin: each tile is offset by the configured
//! margin on its top and left, which is exactly the slack the engine
//! reserved.
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Templates are type-safe Rust code with automatic XSS escaping.

use crate::config::RenderConfig;
use crate::layout::LayoutManifest;
use crate::mosaic::{Group, Row, Tile};
use maud::{DOCTYPE, Markup, html};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

const CSS_STATIC: &str = include_str!("../static/preview.css");

/// Read `layout.json` and write the preview page.
pub fn render(manifest_path: &Path, output_path: &Path) -> Result<(), RenderError> {
    let content = fs::read_to_string(manifest_path)?;
    let manifest: LayoutManifest = serde_json::from_str(&content)?;
    let page = render_preview(&manifest);
    if let Some(parent) = output_path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    fs::write(output_path, page.into_string())?;
    Ok(())
}

/// Color custom properties from config, prepended to the static styles.
fn preview_css(render: &RenderConfig) -> String {
    format!(
        ":root {{\n  --background: {};\n  --caption: {};\n}}\n\n{}",
        render.background, render.caption, CSS_STATIC
    )
}

/// Render the full preview document.
pub fn render_preview(manifest: &LayoutManifest) -> Markup {
    let css = preview_css(&manifest.config.render);
    let content_width = manifest.config.layout.content_width;
    let margin = manifest.config.layout.margin;

    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { "Gallery preview" }
                style { (css) }
            }
            body {
                main.gallery style=(format!("width:{content_width}px")) {
                    @for row in &manifest.rows {
                        (render_row(row, margin))
                    }
                }
                footer.summary {
                    (manifest.image_count) " images · "
                    (manifest.rows.len()) " rows · "
                    (content_width) "px wide"
                }
            }
        }
    }
}

fn render_row(row: &Row, margin: i32) -> Markup {
    html! {
        div.row style=(format!("width:{}px;height:{}px", row.width, row.height)) {
            @for group in &row.groups {
                (render_group(group, margin))
            }
        }
    }
}

fn render_group(group: &Group, margin: i32) -> Markup {
    html! {
        div.group style=(format!("width:{}px;height:{}px", group.width, group.height)) {
            @for tile in &group.images {
                (render_tile(tile, margin))
            }
        }
    }
}

fn render_tile(tile: &Tile, margin: i32) -> Markup {
    let style = format!(
        "width:{}px;height:{}px;margin-left:{margin}px;margin-top:{margin}px",
        tile.width, tile.height
    );
    let path = tile.extra.get("path").and_then(|value| value.as_str());
    html! {
        @if let Some(path) = path {
            img.tile src=(path) alt=(path) title=(path) style=(style);
        } @else {
            div.tile.tile-blank style=(style) {
                span { (tile.width) "×" (tile.height) }
            }
        }
    }
}
