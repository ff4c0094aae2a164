//! Fade-in of thumbnails as they scroll into view.
//!
//! Every `.gallery__item` is watched by one `IntersectionObserver`. Each
//! callback entry first resets its item to the hidden style, then promotes it
//! to the visible style if it is intersecting. Items that scroll out of view
//! therefore fade out again and re-animate on the way back in.

use crate::config::AnimationConfig;

/// One record of an `IntersectionObserver` callback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionEntry {
    /// Position of the observed `.gallery__item` in the grid.
    pub index: usize,
    pub is_intersecting: bool,
}

/// Inline style applied to a gallery item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemStyle {
    pub opacity: f64,
    pub scale: f64,
}

impl ItemStyle {
    pub const VISIBLE: ItemStyle = ItemStyle {
        opacity: 1.0,
        scale: 1.0,
    };

    pub fn hidden(scale: f64) -> Self {
        Self {
            opacity: 0.0,
            scale,
        }
    }

    pub fn css_opacity(&self) -> String {
        format!("{}", self.opacity)
    }

    pub fn css_transform(&self) -> String {
        format!("scale({})", self.scale)
    }
}

pub struct VisibilityAnimator {
    config: AnimationConfig,
}

impl VisibilityAnimator {
    pub fn new(config: AnimationConfig) -> Self {
        Self { config }
    }

    /// Options object for `new IntersectionObserver(callback, options)`, as
    /// JSON. The page hands it to the script in `data-observer-options`.
    pub fn observer_options(&self) -> String {
        serde_json::json!({ "threshold": self.config.threshold }).to_string()
    }

    pub fn hidden_scale(&self) -> f64 {
        self.config.hidden_scale
    }

    pub fn on_entry(&self, entries: &[IntersectionEntry]) -> Vec<(usize, ItemStyle)> {
        entries
            .iter()
            .map(|entry| {
                let mut style = ItemStyle::hidden(self.config.hidden_scale);
                if entry.is_intersecting {
                    style = ItemStyle::VISIBLE;
                }
                (entry.index, style)
            })
            .collect()
    }
}
