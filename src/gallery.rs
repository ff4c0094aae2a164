//! Page-level event wiring.
//!
//! The generated page has exactly three listeners that matter:
//!
//! - one delegated `click` listener on `ul.js-gallery` (thumbnails),
//! - one `click` listener on the lightbox root (overlay, close and arrow buttons),
//! - a window `keydown` listener that only exists while the lightbox is open.
//!
//! [`Gallery`] translates raw DOM facts (tag names, class lists, `data-`
//! attributes, key codes) into [`LightboxEvent`]s and forwards them to the
//! [`Lightbox`] state machine.

use crate::config::SiteConfig;
use crate::items::Collection;
use crate::lightbox::{Direction, Effect, FadeTicket, Key, Lightbox, LightboxEvent};
use crate::markup::classes;

/// The element a delegated gallery click landed on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickTarget {
    tag_name: String,
    data_source: Option<String>,
    alt: Option<String>,
}

impl ClickTarget {
    pub fn from_parts(tag_name: &str, data_source: Option<&str>, alt: Option<&str>) -> Self {
        Self {
            tag_name: tag_name.to_string(),
            data_source: data_source.map(str::to_string),
            alt: alt.map(str::to_string),
        }
    }

    pub fn is_image(&self) -> bool {
        self.tag_name.eq_ignore_ascii_case("img")
    }

    /// Full-resolution source and alt text, if the target is a thumbnail image.
    /// An empty `data-source` counts as missing.
    pub fn image_source(&self) -> Option<(&str, &str)> {
        if !self.is_image() {
            return None;
        }
        let src = self.data_source.as_deref().filter(|s| !s.is_empty())?;
        Some((src, self.alt.as_deref().unwrap_or("")))
    }
}

/// Map a click inside the lightbox root to an event, by the target's
/// class list and `data-action`.
pub fn lightbox_click_event(class_list: &[&str], data_action: Option<&str>) -> Option<LightboxEvent> {
    let has = |class: &str| class_list.contains(&class);
    if has(classes::ARROW_LEFT) {
        Some(LightboxEvent::ArrowButton(Direction::Previous))
    } else if has(classes::ARROW_RIGHT) {
        Some(LightboxEvent::ArrowButton(Direction::Next))
    } else if data_action == Some(classes::CLOSE_ACTION) {
        Some(LightboxEvent::CloseButton)
    } else if has(classes::LIGHTBOX_OVERLAY) {
        Some(LightboxEvent::OverlayClick)
    } else {
        None
    }
}

pub struct Gallery {
    lightbox: Lightbox,
}

impl Gallery {
    pub fn new(items: Collection, config: &SiteConfig) -> Self {
        Self {
            lightbox: Lightbox::new(items, config.lightbox.clone()),
        }
    }

    pub fn lightbox(&self) -> &Lightbox {
        &self.lightbox
    }

    pub fn on_gallery_click(&mut self, target: ClickTarget) -> Vec<Effect> {
        self.lightbox.handle(LightboxEvent::ThumbnailClick(target))
    }

    pub fn on_lightbox_click(&mut self, class_list: &[&str], data_action: Option<&str>) -> Vec<Effect> {
        match lightbox_click_event(class_list, data_action) {
            Some(event) => self.lightbox.handle(event),
            None => Vec::new(),
        }
    }

    /// Key presses only reach the lightbox while its listener is attached.
    pub fn on_keydown(&mut self, code: &str) -> Vec<Effect> {
        if !self.lightbox.key_listener_attached() {
            return Vec::new();
        }
        self.lightbox.handle(LightboxEvent::Key(Key::from_code(code)))
    }

    pub fn on_fade_elapsed(&mut self, ticket: FadeTicket) -> Vec<Effect> {
        self.lightbox.handle(LightboxEvent::FadeElapsed(ticket))
    }
}
