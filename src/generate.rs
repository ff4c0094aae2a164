//! HTML site generation.
//!
//! Renders the whole gallery as one self-contained page:
//!
//! ```text
//! dist/
//! ├── index.html      # grid + lightbox + inline CSS/JS + embedded item data
//! └── ...             # everything under content/assets/, copied verbatim
//! ```
//!
//! ## CSS and JavaScript
//!
//! Static assets are embedded at compile time and inlined into the page:
//! - `static/style.css`: base styles (colors and layout injected from config)
//! - `static/lightbox.js`: lightbox navigation and thumbnail fade-in
//!
//! The item collection is embedded as `<script type="application/json"
//! id="gallery-items">` so the runtime navigates the same ordered list the
//! grid was rendered from.

use crate::config::{self, ConfigError, SiteConfig};
use crate::items::{self, Collection, ItemsError};
use crate::markup::{self, LightboxParams};
use crate::visibility::VisibilityAnimator;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Gallery data error: {0}")]
    Items(#[from] ItemsError),
    #[error("Asset copy error: {0}")]
    Walk(#[from] walkdir::Error),
}

const CSS_STATIC: &str = include_str!("../static/style.css");
const JS: &str = include_str!("../static/lightbox.js");

/// Name of the source subdirectory copied to the output root.
pub const ASSETS_DIR: &str = "assets";

/// What a `generate` run wrote.
#[derive(Debug, Default)]
pub struct GenerateReport {
    pub items_file: PathBuf,
    pub item_count: usize,
    /// Output-relative paths, in write order.
    pub written: Vec<PathBuf>,
    pub assets_copied: usize,
}

/// Everything loaded from a source directory before rendering.
pub struct Site {
    pub config: SiteConfig,
    pub items_file: PathBuf,
    pub items: Collection,
}

/// Load config and gallery data from a source directory.
pub fn load_site(source_dir: &Path) -> Result<Site, GenerateError> {
    let config = config::load_config(source_dir)?;
    let (items_file, items) = items::load_from_dir(source_dir)?;
    Ok(Site {
        config,
        items_file,
        items,
    })
}

pub fn generate(source_dir: &Path, output_dir: &Path) -> Result<GenerateReport, GenerateError> {
    let site = load_site(source_dir)?;
    write_site(&site, source_dir, output_dir)
}

/// Render an already loaded site into `output_dir`.
pub fn write_site(
    site: &Site,
    source_dir: &Path,
    output_dir: &Path,
) -> Result<GenerateReport, GenerateError> {
    let mut report = GenerateReport {
        items_file: site.items_file.clone(),
        item_count: site.items.len(),
        ..Default::default()
    };

    fs::create_dir_all(output_dir)?;

    let page = render_page(&site.config, &site.items)?;
    fs::write(output_dir.join("index.html"), page.into_string())?;
    report.written.push(PathBuf::from("index.html"));

    let assets = source_dir.join(ASSETS_DIR);
    if assets.is_dir() {
        report.assets_copied = copy_assets(&assets, output_dir)?;
    }

    Ok(report)
}

/// Copy every file under `src` into `dst`, preserving relative paths.
fn copy_assets(src: &Path, dst: &Path) -> Result<usize, GenerateError> {
    let mut copied = 0;
    for entry in WalkDir::new(src).min_depth(1) {
        let entry = entry?;
        let Ok(rel) = entry.path().strip_prefix(src) else {
            continue;
        };
        let target = dst.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &target)?;
            copied += 1;
        }
    }
    Ok(copied)
}

/// Serialize the collection for the inline data script.
///
/// `<` is escaped so no value can terminate the surrounding `<script>`.
pub fn items_json(items: &Collection) -> Result<String, serde_json::Error> {
    let json = serde_json::to_string(items)?;
    Ok(json.replace('<', "\\u003c"))
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(title: &str, lang: &str, css: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang=(lang) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(css)) }
            }
            body {
                (content)
            }
        }
    }
}

/// Renders the full gallery page.
pub fn render_page(config: &SiteConfig, items: &Collection) -> Result<Markup, serde_json::Error> {
    let color_css = config::generate_color_css(&config.colors);
    let theme_css = config::generate_theme_css(&config.theme, &config.lightbox);
    let css = format!("{}\n\n{}\n\n{}", color_css, theme_css, CSS_STATIC);

    let animator = VisibilityAnimator::new(config.animation.clone());
    let params = LightboxParams {
        fade_ms: config.lightbox.fade_ms,
        observer_options: animator.observer_options(),
        hidden_scale: animator.hidden_scale(),
    };
    let data = items_json(items)?;

    let content = html! {
        header.site-header {
            h1 { (config.title) }
        }
        main {
            (markup::gallery_list(items.as_slice()))
        }
        (markup::lightbox_markup(&params))
        script type="application/json" id="gallery-items" { (PreEscaped(data)) }
        script { (PreEscaped(JS)) }
    };

    Ok(base_document(&config.title, &config.lang, &css, content))
}

// ============================================================================
// Tests
// ============================================================================
