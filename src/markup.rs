//! HTML fragments for the gallery grid and the lightbox.
//!
//! Both fragments are pure functions of their inputs. Class names are the
//! contract with `static/lightbox.js` and `static/style.css`, so they live in
//! [`classes`] and every consumer refers to them from there.

use crate::items::GalleryItem;
use maud::{Markup, html};

/// Class names and attribute values shared by markup, runtime and styles.
pub mod classes {
    pub const GALLERY: &str = "gallery";
    pub const GALLERY_HOOK: &str = "js-gallery";
    pub const GALLERY_ITEM: &str = "gallery__item";
    pub const GALLERY_LINK: &str = "gallery__link";
    pub const GALLERY_IMAGE: &str = "gallery__image";
    pub const LIGHTBOX: &str = "lightbox";
    pub const LIGHTBOX_HOOK: &str = "js-lightbox";
    pub const LIGHTBOX_OVERLAY: &str = "lightbox__overlay";
    pub const LIGHTBOX_CONTENT: &str = "lightbox__content";
    pub const LIGHTBOX_IMAGE: &str = "lightbox__image";
    pub const LIGHTBOX_BUTTON: &str = "lightbox__button";
    pub const ARROW: &str = "lightbox__arrow";
    pub const ARROW_LEFT: &str = "lightbox__arrow--left";
    pub const ARROW_RIGHT: &str = "lightbox__arrow--right";
    pub const IS_OPEN: &str = "is-open";
    pub const CLOSE_ACTION: &str = "close-lightbox";
}

/// One `<li>` per item, in collection order.
///
/// Each thumbnail links to its original so the page still works with
/// scripting disabled; the runtime prevents that navigation and opens the
/// lightbox instead.
pub fn make_gallery_markup(items: &[GalleryItem]) -> Markup {
    html! {
        @for item in items {
            li class=(classes::GALLERY_ITEM) {
                a class=(classes::GALLERY_LINK) href=(item.original) {
                    img class=(classes::GALLERY_IMAGE)
                        loading="lazy"
                        src=(item.preview)
                        data-source=(item.original)
                        alt=(item.description);
                }
            }
        }
    }
}

/// The `ul.gallery.js-gallery` container with the item markup inside.
pub fn gallery_list(items: &[GalleryItem]) -> Markup {
    html! {
        ul class={ (classes::GALLERY) " " (classes::GALLERY_HOOK) } {
            (make_gallery_markup(items))
        }
    }
}

/// Runtime parameters handed to the script through `data-` attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct LightboxParams {
    pub fade_ms: u32,
    /// JSON options for the thumbnail `IntersectionObserver`.
    pub observer_options: String,
    pub hidden_scale: f64,
}

/// The (initially closed) lightbox modal.
pub fn lightbox_markup(params: &LightboxParams) -> Markup {
    html! {
        div class={ (classes::LIGHTBOX) " " (classes::LIGHTBOX_HOOK) }
            data-fade-ms=(params.fade_ms)
            data-observer-options=(params.observer_options)
            data-hidden-scale=(params.hidden_scale) {
            div class=(classes::LIGHTBOX_OVERLAY) {}
            div class=(classes::LIGHTBOX_CONTENT) {
                img class=(classes::LIGHTBOX_IMAGE) src="" alt="";
            }
            button type="button"
                class=(classes::LIGHTBOX_BUTTON)
                data-action=(classes::CLOSE_ACTION)
                aria-label="Close" {}
            button type="button"
                class={ (classes::ARROW) " " (classes::ARROW_LEFT) }
                aria-label="Previous image" {}
            button type="button"
                class={ (classes::ARROW) " " (classes::ARROW_RIGHT) }
                aria-label="Next image" {}
        }
    }
}
