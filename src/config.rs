//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. The file lives next
//! to the gallery data in the source directory and is optional: stock
//! defaults are serialized from [`SiteConfig::default`] and user values are
//! merged on top, key by key.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! title = "Gallery"         # Page <title> and heading
//! lang = "en"               # <html lang>
//!
//! [lightbox]
//! fade_ms = 150             # Cross-fade delay when switching images
//!
//! [animation]
//! threshold = 0.2           # Visible fraction before a thumbnail fades in
//! hidden_scale = 0.5        # Scale of thumbnails outside the viewport
//!
//! [theme]
//! thumbnail_gap = "1rem"
//! grid_padding = "2rem"
//! thumbnail_min_width = "240px"
//!
//! [colors.light]
//! background = "#ffffff"
//! text = "#111111"
//! text_muted = "#666666"
//! overlay = "rgba(0, 0, 0, 0.8)"
//!
//! [colors.dark]
//! background = "#0a0a0a"
//! text = "#eeeeee"
//! text_muted = "#999999"
//! overlay = "rgba(0, 0, 0, 0.9)"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Longest accepted fade; anything slower reads as a broken page.
pub const MAX_FADE_MS: u32 = 2000;

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Page title, also shown as the gallery heading.
    pub title: String,
    /// Value of the `<html lang>` attribute.
    pub lang: String,
    pub lightbox: LightboxConfig,
    pub animation: AnimationConfig,
    pub theme: ThemeConfig,
    pub colors: ColorConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Gallery".to_string(),
            lang: "en".to_string(),
            lightbox: LightboxConfig::default(),
            animation: AnimationConfig::default(),
            theme: ThemeConfig::default(),
            colors: ColorConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lightbox.fade_ms > MAX_FADE_MS {
            return Err(ConfigError::Validation(format!(
                "lightbox.fade_ms must be at most {MAX_FADE_MS}"
            )));
        }
        if !(0.0..=1.0).contains(&self.animation.threshold) {
            return Err(ConfigError::Validation(
                "animation.threshold must be between 0 and 1".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.animation.hidden_scale) {
            return Err(ConfigError::Validation(
                "animation.hidden_scale must be between 0 and 1".into(),
            ));
        }
        if self.lang.trim().is_empty() {
            return Err(ConfigError::Validation("lang must not be empty".into()));
        }
        Ok(())
    }
}

/// Lightbox behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LightboxConfig {
    /// Milliseconds between fading the current image out and swapping in the next.
    pub fade_ms: u32,
}

impl Default for LightboxConfig {
    fn default() -> Self {
        Self { fade_ms: 150 }
    }
}

/// Thumbnail fade-in as items enter the viewport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnimationConfig {
    /// `IntersectionObserver` threshold (fraction of the item that must be visible).
    pub threshold: f64,
    /// `scale()` applied to items outside the viewport.
    pub hidden_scale: f64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            threshold: 0.2,
            hidden_scale: 0.5,
        }
    }
}

/// Grid layout settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeConfig {
    /// Gap between thumbnails (CSS value).
    pub thumbnail_gap: String,
    /// Padding around the grid (CSS value).
    pub grid_padding: String,
    /// Narrowest a grid column may get before wrapping (CSS value).
    pub thumbnail_min_width: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            thumbnail_gap: "1rem".to_string(),
            grid_padding: "2rem".to_string(),
            thumbnail_min_width: "240px".to_string(),
        }
    }
}

/// Color configuration for light and dark modes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    pub light: ColorScheme,
    pub dark: ColorScheme,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            light: ColorScheme::default_light(),
            dark: ColorScheme::default_dark(),
        }
    }
}

/// Individual color scheme (light or dark).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    pub background: String,
    pub text: String,
    /// Captions and secondary text.
    pub text_muted: String,
    /// Backdrop behind the open lightbox.
    pub overlay: String,
}

impl ColorScheme {
    pub fn default_light() -> Self {
        Self {
            background: "#ffffff".to_string(),
            text: "#111111".to_string(),
            text_muted: "#666666".to_string(),
            overlay: "rgba(0, 0, 0, 0.8)".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#0a0a0a".to_string(),
            text: "#eeeeee".to_string(),
            text_muted: "#999999".to_string(),
            overlay: "rgba(0, 0, 0, 0.9)".to_string(),
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::default_light()
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml`. Used by `gen-config`.
pub fn stock_config_toml() -> &'static str {
    r##"# Lightbox Gal Configuration
# ==========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys cause an error.

# Page <title> and gallery heading.
title = "Gallery"

# Value of the <html lang> attribute.
lang = "en"

# ---------------------------------------------------------------------------
# Lightbox
# ---------------------------------------------------------------------------
[lightbox]
# Milliseconds the enlarged image stays faded out while switching to the
# next or previous one. At most 2000.
fade_ms = 150

# ---------------------------------------------------------------------------
# Thumbnail fade-in
# ---------------------------------------------------------------------------
[animation]
# Fraction of a thumbnail (0-1) that must be on screen before it fades in.
threshold = 0.2

# Scale (0-1) of thumbnails while they are off screen.
hidden_scale = 0.5

# ---------------------------------------------------------------------------
# Layout
# ---------------------------------------------------------------------------
[theme]
# Gap between thumbnails (CSS value).
thumbnail_gap = "1rem"

# Padding around the thumbnail grid (CSS value).
grid_padding = "2rem"

# Narrowest a grid column may get before the grid wraps (CSS value).
thumbnail_min_width = "240px"

# ---------------------------------------------------------------------------
# Colors - Light mode (prefers-color-scheme: light)
# ---------------------------------------------------------------------------
[colors.light]
background = "#ffffff"
text = "#111111"
text_muted = "#666666"          # Captions
overlay = "rgba(0, 0, 0, 0.8)"  # Backdrop behind the open lightbox

# ---------------------------------------------------------------------------
# Colors - Dark mode (prefers-color-scheme: dark)
# ---------------------------------------------------------------------------
[colors.dark]
background = "#0a0a0a"
text = "#eeeeee"
text_muted = "#999999"
overlay = "rgba(0, 0, 0, 0.9)"
"##
}

/// Generate CSS custom properties from color config.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        r#":root {{
    --color-bg: {light_bg};
    --color-text: {light_text};
    --color-text-muted: {light_text_muted};
    --color-overlay: {light_overlay};
}}

@media (prefers-color-scheme: dark) {{
    :root {{
        --color-bg: {dark_bg};
        --color-text: {dark_text};
        --color-text-muted: {dark_text_muted};
        --color-overlay: {dark_overlay};
    }}
}}"#,
        light_bg = colors.light.background,
        light_text = colors.light.text,
        light_text_muted = colors.light.text_muted,
        light_overlay = colors.light.overlay,
        dark_bg = colors.dark.background,
        dark_text = colors.dark.text,
        dark_text_muted = colors.dark.text_muted,
        dark_overlay = colors.dark.overlay,
    )
}

/// Generate CSS custom properties from theme and animation config.
pub fn generate_theme_css(theme: &ThemeConfig, lightbox: &LightboxConfig) -> String {
    format!(
        r#":root {{
    --thumbnail-gap: {thumbnail_gap};
    --grid-padding: {grid_padding};
    --thumbnail-min-width: {min_width};
    --fade-duration: {fade_ms}ms;
}}"#,
        thumbnail_gap = theme.thumbnail_gap,
        grid_padding = theme.grid_padding,
        min_width = theme.thumbnail_min_width,
        fade_ms = lightbox.fade_ms,
    )
}
