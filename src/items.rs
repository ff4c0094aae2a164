//! The gallery data set.
//!
//! A gallery is a fixed, ordered list of image records. Each record pairs a
//! thumbnail URL with the full-resolution URL shown in the lightbox, plus a
//! caption used as alt text:
//!
//! ```toml
//! [[items]]
//! preview = "assets/mountains-small.jpg"
//! original = "assets/mountains.jpg"
//! description = "Mountains at dawn"
//! ```
//!
//! The same data can be supplied as JSON, either a bare array or an object
//! with an `items` key:
//!
//! ```json
//! [{ "preview": "...", "original": "...", "description": "..." }]
//! ```
//!
//! Records are taken as-is. URLs are not resolved or checked, and the order in
//! the file is the navigation order in the lightbox.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ItemsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Unsupported gallery file format: {0}")]
    UnsupportedFormat(PathBuf),
    #[error("No gallery.toml or gallery.json found in {0}")]
    NotFound(PathBuf),
}

/// Candidate data files, in priority order.
pub const ITEMS_FILES: [&str; 2] = ["gallery.toml", "gallery.json"];

/// One image in the gallery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryItem {
    /// Thumbnail URL shown in the grid.
    pub preview: String,
    /// Full-resolution URL shown in the lightbox.
    pub original: String,
    /// Caption, used as alt text in both the grid and the lightbox.
    pub description: String,
}

/// Ordered, immutable collection of gallery items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Collection {
    items: Vec<GalleryItem>,
}

impl Collection {
    pub fn new(items: Vec<GalleryItem>) -> Self {
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&GalleryItem> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GalleryItem> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[GalleryItem] {
        &self.items
    }

    /// Index of the first item whose full-resolution URL is `url`.
    pub fn position_of_original(&self, url: &str) -> Option<usize> {
        self.items.iter().position(|item| item.original == url)
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a GalleryItem;
    type IntoIter = std::slice::Iter<'a, GalleryItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// File shape for TOML (`[[items]]`) and the object form of JSON.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ItemsFile {
    #[serde(default)]
    items: Vec<GalleryItem>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonItems {
    Bare(Vec<GalleryItem>),
    Wrapped(ItemsFile),
}

/// Locate the gallery data file in a source directory.
pub fn find_items_file(source_dir: &Path) -> Result<PathBuf, ItemsError> {
    ITEMS_FILES
        .iter()
        .map(|name| source_dir.join(name))
        .find(|path| path.is_file())
        .ok_or_else(|| ItemsError::NotFound(source_dir.to_path_buf()))
}

/// Load a collection from a `.toml` or `.json` file.
pub fn load_items(path: &Path) -> Result<Collection, ItemsError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("toml") => {
            let content = fs::read_to_string(path)?;
            parse_toml(&content)
        }
        Some("json") => {
            let content = fs::read_to_string(path)?;
            parse_json(&content)
        }
        _ => Err(ItemsError::UnsupportedFormat(path.to_path_buf())),
    }
}

/// Load the collection from whichever data file exists in `source_dir`.
pub fn load_from_dir(source_dir: &Path) -> Result<(PathBuf, Collection), ItemsError> {
    let path = find_items_file(source_dir)?;
    let collection = load_items(&path)?;
    Ok((path, collection))
}

pub fn parse_toml(content: &str) -> Result<Collection, ItemsError> {
    let file: ItemsFile = toml::from_str(content)?;
    Ok(Collection::new(file.items))
}

pub fn parse_json(content: &str) -> Result<Collection, ItemsError> {
    let items = match serde_json::from_str(content)? {
        JsonItems::Bare(items) => items,
        JsonItems::Wrapped(file) => file.items,
    };
    Ok(Collection::new(items))
}
