//! # Lightbox Gal
//!
//! A static image gallery generator with a lightbox viewer. A gallery is a
//! fixed, ordered list of `{preview, original, description}` records; the
//! output is a single `index.html` with a thumbnail grid, a modal lightbox,
//! keyboard and button navigation, and a fade-in as thumbnails scroll into
//! view.
//!
//! ```text
//! content/
//! ├── gallery.toml    # or gallery.json — the ordered item list
//! ├── config.toml     # optional site config
//! └── assets/         # optional, copied to the output root
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`items`] | Gallery data set: loading `gallery.toml` / `gallery.json` |
//! | [`markup`] | Grid and lightbox HTML fragments (Maud) |
//! | [`lightbox`] | Open/close/navigate state machine with fade-timer and listener guards |
//! | [`gallery`] | DOM event translation: delegated clicks, lightbox clicks, key codes |
//! | [`visibility`] | Thumbnail fade-in driven by viewport intersection |
//! | [`generate`] | Renders and writes the final page |
//! | [`config`] | `config.toml` loading, validation, merging, and CSS generation |
//! | [`output`] | CLI output formatting |
//!
//! # The Runtime Mirror
//!
//! The page ships a small vanilla JavaScript file (`static/lightbox.js`). It
//! is a direct transcription of [`lightbox`], [`gallery`] and [`visibility`]:
//! same states, same effect order, same wraparound rules, same ticket guard
//! on the fade timer. The Rust side is where that behavior is specified and
//! tested; the script is kept deliberately small so it can be read against it.
//!
//! # No-JS Fallback
//!
//! Every thumbnail is a plain link to its full-resolution image. With
//! scripting disabled the gallery degrades to a grid of links.

pub mod config;
pub mod gallery;
pub mod generate;
pub mod items;
pub mod lightbox;
pub mod markup;
pub mod output;
pub mod visibility;
