//! Lightbox navigation state machine.
//!
//! The lightbox is either closed or open on one index of a fixed
//! [`Collection`]. Input arrives as [`LightboxEvent`]s (clicks, key presses,
//! fade timer callbacks) and every call to [`Lightbox::handle`] returns the
//! ordered list of DOM [`Effect`]s the page runtime must apply. The runtime in
//! `static/lightbox.js` mirrors this module one-to-one, so the behavior tested
//! here is the behavior shipped in the generated page.
//!
//! ## Navigation
//!
//! Next/previous wrap around at both ends of the collection. The new index is
//! computed from the controller's own `current` index, never from whatever
//! image the page happens to be displaying, so pressing an arrow key three
//! times inside one fade window moves three images.
//!
//! ## Fade timer
//!
//! Switching images fades the lightbox image out, then swaps `src` after
//! `fade_ms`. Each navigation issues a fresh [`FadeTicket`]; only the most
//! recent ticket is honored when its timer fires, and closing the lightbox
//! invalidates it. A timer left over from a burst of key presses, or one that
//! fires after the lightbox closed, is a no-op.
//!
//! ## Keyboard listener
//!
//! The window `keydown` listener is attached exactly once per open and detached
//! exactly once per close. Re-opening an already open lightbox does not stack a
//! second listener.

use crate::config::LightboxConfig;
use crate::gallery::ClickTarget;
use crate::items::Collection;

/// Navigation direction for arrow keys and arrow buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

/// Keys the lightbox reacts to, parsed from `KeyboardEvent.code`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Escape,
    ArrowLeft,
    ArrowRight,
    Other(String),
}

impl Key {
    pub fn from_code(code: &str) -> Self {
        match code {
            "Escape" => Key::Escape,
            "ArrowLeft" => Key::ArrowLeft,
            "ArrowRight" => Key::ArrowRight,
            other => Key::Other(other.to_string()),
        }
    }

    fn direction(&self) -> Option<Direction> {
        match self {
            Key::ArrowLeft => Some(Direction::Previous),
            Key::ArrowRight => Some(Direction::Next),
            _ => None,
        }
    }
}

/// Identifies one scheduled fade completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FadeTicket(u64);

impl FadeTicket {
    pub fn id(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LightboxEvent {
    /// Delegated click anywhere inside the gallery container.
    ThumbnailClick(ClickTarget),
    OverlayClick,
    CloseButton,
    ArrowButton(Direction),
    Key(Key),
    FadeElapsed(FadeTicket),
}

/// A DOM mutation requested by the state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    PreventDefault,
    /// `document.body.style.overflow = "hidden"`
    LockScroll,
    UnlockScroll,
    ShowImage { src: String, alt: String },
    /// Empty `src` and `alt` so the previous image never flashes on next open.
    ClearImage,
    AddOpenClass,
    RemoveOpenClass,
    AttachKeyListener,
    DetachKeyListener,
    /// Image opacity to 0.
    BeginFade,
    ScheduleFade { ticket: FadeTicket, delay_ms: u32 },
    /// Image opacity back to 1 with the new source.
    EndFade { src: String, alt: String },
    /// Image opacity back to 1 after a fade was cut short by open or close.
    CancelFade,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Closed,
    Open { index: usize },
}

/// Index after `current`, wrapping to 0 past the end.
pub fn next_index(current: usize, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(if current + 1 >= len { 0 } else { current + 1 })
}

/// Index before `current`, wrapping to the last item before 0.
pub fn prev_index(current: usize, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(if current == 0 || current >= len {
        len - 1
    } else {
        current - 1
    })
}

pub struct Lightbox {
    items: Collection,
    config: LightboxConfig,
    state: State,
    pending_fade: Option<FadeTicket>,
    issued: u64,
    key_listener_attached: bool,
}

impl Lightbox {
    pub fn new(items: Collection, config: LightboxConfig) -> Self {
        Self {
            items,
            config,
            state: State::Closed,
            pending_fade: None,
            issued: 0,
            key_listener_attached: false,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, State::Open { .. })
    }

    pub fn current_index(&self) -> Option<usize> {
        match self.state {
            State::Open { index } => Some(index),
            State::Closed => None,
        }
    }

    pub fn key_listener_attached(&self) -> bool {
        self.key_listener_attached
    }

    pub fn pending_fade(&self) -> Option<FadeTicket> {
        self.pending_fade
    }

    pub fn handle(&mut self, event: LightboxEvent) -> Vec<Effect> {
        match event {
            LightboxEvent::ThumbnailClick(target) => self.open(&target),
            LightboxEvent::OverlayClick | LightboxEvent::CloseButton => self.close(),
            LightboxEvent::ArrowButton(direction) => self.navigate(direction),
            LightboxEvent::Key(Key::Escape) => self.close(),
            LightboxEvent::Key(key) => match key.direction() {
                Some(direction) => self.navigate(direction),
                None => Vec::new(),
            },
            LightboxEvent::FadeElapsed(ticket) => self.complete_fade(ticket),
        }
    }

    fn open(&mut self, target: &ClickTarget) -> Vec<Effect> {
        let mut effects = vec![Effect::PreventDefault];
        let Some((src, alt)) = target.image_source() else {
            return effects;
        };

        // Unknown sources still open; navigation then starts from the first item.
        let index = self.items.position_of_original(src).unwrap_or(0);
        self.state = State::Open { index };
        let fading = self.pending_fade.take().is_some();

        effects.push(Effect::LockScroll);
        effects.push(Effect::ShowImage {
            src: src.to_string(),
            alt: alt.to_string(),
        });
        if fading {
            effects.push(Effect::CancelFade);
        }
        effects.push(Effect::AddOpenClass);
        if !self.key_listener_attached {
            self.key_listener_attached = true;
            effects.push(Effect::AttachKeyListener);
        }
        effects
    }

    fn close(&mut self) -> Vec<Effect> {
        if !self.is_open() {
            return Vec::new();
        }
        self.state = State::Closed;
        let fading = self.pending_fade.take().is_some();

        let mut effects = vec![Effect::RemoveOpenClass, Effect::ClearImage];
        if fading {
            effects.push(Effect::CancelFade);
        }
        effects.push(Effect::UnlockScroll);
        if self.key_listener_attached {
            self.key_listener_attached = false;
            effects.push(Effect::DetachKeyListener);
        }
        effects
    }

    fn navigate(&mut self, direction: Direction) -> Vec<Effect> {
        let State::Open { index } = self.state else {
            return Vec::new();
        };
        let len = self.items.len();
        let target = match direction {
            Direction::Next => next_index(index, len),
            Direction::Previous => prev_index(index, len),
        };
        let Some(target) = target else {
            return Vec::new();
        };

        self.state = State::Open { index: target };
        self.issued += 1;
        let ticket = FadeTicket(self.issued);
        self.pending_fade = Some(ticket);

        vec![
            Effect::BeginFade,
            Effect::ScheduleFade {
                ticket,
                delay_ms: self.config.fade_ms,
            },
        ]
    }

    fn complete_fade(&mut self, ticket: FadeTicket) -> Vec<Effect> {
        if self.pending_fade != Some(ticket) {
            return Vec::new();
        }
        self.pending_fade = None;
        let Some(item) = self.current_index().and_then(|i| self.items.get(i)) else {
            return Vec::new();
        };
        vec![Effect::EndFade {
            src: item.original.clone(),
            alt: item.description.clone(),
        }]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::GalleryItem;

    fn collection(n: usize) -> Collection {
        Collection::new(
            (0..n)
                .map(|i| GalleryItem {
                    preview: format!("small/{i}.jpg"),
                    original: format!("large/{i}.jpg"),
                    description: format!("Photo {i}"),
                })
                .collect(),
        )
    }

    fn lightbox(n: usize) -> Lightbox {
        Lightbox::new(collection(n), LightboxConfig::default())
    }

    fn click_image(i: usize) -> LightboxEvent {
        LightboxEvent::ThumbnailClick(ClickTarget::from_parts(
            "IMG",
            Some(format!("large/{i}.jpg").as_str()),
            Some(format!("Photo {i}").as_str()),
        ))
    }

    /// The enlarged `<img>` as the effects leave it.
    struct ImageView {
        src: String,
        opacity: f64,
    }

    impl ImageView {
        fn new() -> Self {
            Self {
                src: String::new(),
                opacity: 1.0,
            }
        }

        fn apply(&mut self, effects: &[Effect]) {
            for effect in effects {
                match effect {
                    Effect::ShowImage { src, .. } => self.src = src.clone(),
                    Effect::EndFade { src, .. } => {
                        self.src = src.clone();
                        self.opacity = 1.0;
                    }
                    Effect::ClearImage => self.src.clear(),
                    Effect::BeginFade => self.opacity = 0.0,
                    Effect::CancelFade => self.opacity = 1.0,
                    _ => {}
                }
            }
        }
    }

    fn scheduled_ticket(effects: &[Effect]) -> FadeTicket {
        effects
            .iter()
            .find_map(|e| match e {
                Effect::ScheduleFade { ticket, .. } => Some(*ticket),
                _ => None,
            })
            .expect("no fade scheduled")
    }

    // =========================================================================
    // Index arithmetic
    // =========================================================================

    #[test]
    fn next_index_advances_and_wraps() {
        assert_eq!(next_index(0, 3), Some(1));
        assert_eq!(next_index(1, 3), Some(2));
        assert_eq!(next_index(2, 3), Some(0));
    }

    #[test]
    fn prev_index_retreats_and_wraps() {
        assert_eq!(prev_index(2, 3), Some(1));
        assert_eq!(prev_index(0, 3), Some(2));
    }

    #[test]
    fn single_item_wraps_onto_itself() {
        assert_eq!(next_index(0, 1), Some(0));
        assert_eq!(prev_index(0, 1), Some(0));
    }

    #[test]
    fn empty_collection_has_no_neighbours() {
        assert_eq!(next_index(0, 0), None);
        assert_eq!(prev_index(0, 0), None);
    }

    #[test]
    fn key_from_code() {
        assert_eq!(Key::from_code("Escape"), Key::Escape);
        assert_eq!(Key::from_code("ArrowLeft"), Key::ArrowLeft);
        assert_eq!(Key::from_code("ArrowRight"), Key::ArrowRight);
        assert_eq!(Key::from_code("KeyA"), Key::Other("KeyA".to_string()));
    }

    // =========================================================================
    // Open / close
    // =========================================================================

    #[test]
    fn open_on_image_click() {
        let mut lb = lightbox(3);
        let effects = lb.handle(click_image(1));
        assert_eq!(
            effects,
            vec![
                Effect::PreventDefault,
                Effect::LockScroll,
                Effect::ShowImage {
                    src: "large/1.jpg".to_string(),
                    alt: "Photo 1".to_string(),
                },
                Effect::AddOpenClass,
                Effect::AttachKeyListener,
            ]
        );
        assert_eq!(lb.state(), State::Open { index: 1 });
        assert!(lb.key_listener_attached());
    }

    #[test]
    fn click_outside_image_only_prevents_default() {
        let mut lb = lightbox(3);
        let target = ClickTarget::from_parts("LI", None, None);
        let effects = lb.handle(LightboxEvent::ThumbnailClick(target));
        assert_eq!(effects, vec![Effect::PreventDefault]);
        assert!(!lb.is_open());
    }

    #[test]
    fn unknown_source_opens_at_first_index() {
        let mut lb = lightbox(3);
        let target = ClickTarget::from_parts("IMG", Some("elsewhere.jpg"), Some("?"));
        let effects = lb.handle(LightboxEvent::ThumbnailClick(target));
        assert!(effects.contains(&Effect::ShowImage {
            src: "elsewhere.jpg".to_string(),
            alt: "?".to_string(),
        }));
        assert_eq!(lb.current_index(), Some(0));
    }

    #[test]
    fn reopening_does_not_attach_second_listener() {
        let mut lb = lightbox(3);
        lb.handle(click_image(0));
        let effects = lb.handle(click_image(2));
        assert!(!effects.contains(&Effect::AttachKeyListener));
        assert_eq!(lb.current_index(), Some(2));
    }

    #[test]
    fn close_triggers_all_close() {
        for trigger in [
            LightboxEvent::OverlayClick,
            LightboxEvent::CloseButton,
            LightboxEvent::Key(Key::Escape),
        ] {
            let mut lb = lightbox(3);
            lb.handle(click_image(0));
            let effects = lb.handle(trigger);
            assert_eq!(
                effects,
                vec![
                    Effect::RemoveOpenClass,
                    Effect::ClearImage,
                    Effect::UnlockScroll,
                    Effect::DetachKeyListener,
                ]
            );
            assert!(!lb.is_open());
            assert!(!lb.key_listener_attached());
        }
    }

    #[test]
    fn close_when_closed_is_noop() {
        let mut lb = lightbox(3);
        assert!(lb.handle(LightboxEvent::Key(Key::Escape)).is_empty());
        assert!(lb.handle(LightboxEvent::OverlayClick).is_empty());
    }

    #[test]
    fn open_close_cycles_balance_listeners() {
        let mut lb = lightbox(2);
        let mut attached = 0;
        let mut detached = 0;
        for _ in 0..5 {
            for e in lb.handle(click_image(1)) {
                if e == Effect::AttachKeyListener {
                    attached += 1;
                }
            }
            for e in lb.handle(LightboxEvent::CloseButton) {
                if e == Effect::DetachKeyListener {
                    detached += 1;
                }
            }
        }
        assert_eq!(attached, 5);
        assert_eq!(detached, 5);
    }

    // =========================================================================
    // Navigation and fade timer
    // =========================================================================

    #[test]
    fn arrow_right_fades_then_shows_next() {
        let mut lb = lightbox(3);
        lb.handle(click_image(0));
        let effects = lb.handle(LightboxEvent::Key(Key::ArrowRight));
        assert_eq!(effects[0], Effect::BeginFade);
        let ticket = scheduled_ticket(&effects);
        assert!(matches!(
            effects[1],
            Effect::ScheduleFade { delay_ms: 150, .. }
        ));

        let done = lb.handle(LightboxEvent::FadeElapsed(ticket));
        assert_eq!(
            done,
            vec![Effect::EndFade {
                src: "large/1.jpg".to_string(),
                alt: "Photo 1".to_string(),
            }]
        );
    }

    #[test]
    fn arrow_buttons_match_keys() {
        let mut lb = lightbox(3);
        lb.handle(click_image(0));
        lb.handle(LightboxEvent::ArrowButton(Direction::Previous));
        assert_eq!(lb.current_index(), Some(2));
        lb.handle(LightboxEvent::ArrowButton(Direction::Next));
        assert_eq!(lb.current_index(), Some(0));
    }

    #[test]
    fn navigation_wraps_at_both_ends() {
        let mut lb = lightbox(3);
        lb.handle(click_image(2));
        lb.handle(LightboxEvent::Key(Key::ArrowRight));
        assert_eq!(lb.current_index(), Some(0));
        lb.handle(LightboxEvent::Key(Key::ArrowLeft));
        assert_eq!(lb.current_index(), Some(2));
    }

    #[test]
    fn rapid_presses_accumulate() {
        let mut lb = lightbox(5);
        lb.handle(click_image(0));
        let mut tickets = Vec::new();
        for _ in 0..3 {
            let effects = lb.handle(LightboxEvent::Key(Key::ArrowRight));
            tickets.push(scheduled_ticket(&effects));
        }
        assert_eq!(lb.current_index(), Some(3));

        // Earlier timers fire first and must not swap the image.
        assert!(lb.handle(LightboxEvent::FadeElapsed(tickets[0])).is_empty());
        assert!(lb.handle(LightboxEvent::FadeElapsed(tickets[1])).is_empty());
        let done = lb.handle(LightboxEvent::FadeElapsed(tickets[2]));
        assert_eq!(
            done,
            vec![Effect::EndFade {
                src: "large/3.jpg".to_string(),
                alt: "Photo 3".to_string(),
            }]
        );
    }

    #[test]
    fn fade_after_close_is_ignored() {
        let mut lb = lightbox(3);
        lb.handle(click_image(0));
        let ticket = scheduled_ticket(&lb.handle(LightboxEvent::Key(Key::ArrowRight)));
        lb.handle(LightboxEvent::Key(Key::Escape));
        assert!(lb.handle(LightboxEvent::FadeElapsed(ticket)).is_empty());
        assert_eq!(lb.pending_fade(), None);
    }

    #[test]
    fn close_mid_fade_restores_opacity_for_next_open() {
        let mut lb = lightbox(3);
        let mut view = ImageView::new();
        view.apply(&lb.handle(click_image(0)));
        let nav = lb.handle(LightboxEvent::Key(Key::ArrowRight));
        let ticket = scheduled_ticket(&nav);
        view.apply(&nav);
        assert_eq!(view.opacity, 0.0);

        let closed = lb.handle(LightboxEvent::Key(Key::Escape));
        assert_eq!(
            closed,
            vec![
                Effect::RemoveOpenClass,
                Effect::ClearImage,
                Effect::CancelFade,
                Effect::UnlockScroll,
                Effect::DetachKeyListener,
            ]
        );
        view.apply(&closed);
        view.apply(&lb.handle(LightboxEvent::FadeElapsed(ticket)));

        view.apply(&lb.handle(click_image(2)));
        assert_eq!(view.src, "large/2.jpg");
        assert_eq!(view.opacity, 1.0);
    }

    #[test]
    fn click_while_fading_shows_image_at_full_opacity() {
        let mut lb = lightbox(3);
        let mut view = ImageView::new();
        view.apply(&lb.handle(click_image(0)));
        let nav = lb.handle(LightboxEvent::Key(Key::ArrowLeft));
        let ticket = scheduled_ticket(&nav);
        view.apply(&nav);

        let effects = lb.handle(click_image(1));
        assert!(effects.contains(&Effect::CancelFade));
        view.apply(&effects);
        assert!(lb.handle(LightboxEvent::FadeElapsed(ticket)).is_empty());
        assert_eq!(view.src, "large/1.jpg");
        assert_eq!(view.opacity, 1.0);
    }

    #[test]
    fn close_without_pending_fade_skips_cancel() {
        let mut lb = lightbox(3);
        lb.handle(click_image(0));
        let ticket = scheduled_ticket(&lb.handle(LightboxEvent::Key(Key::ArrowRight)));
        lb.handle(LightboxEvent::FadeElapsed(ticket));
        assert!(!lb.handle(LightboxEvent::CloseButton).contains(&Effect::CancelFade));
    }

    #[test]
    fn fade_ticket_is_single_use() {
        let mut lb = lightbox(3);
        lb.handle(click_image(0));
        let ticket = scheduled_ticket(&lb.handle(LightboxEvent::Key(Key::ArrowRight)));
        assert_eq!(lb.handle(LightboxEvent::FadeElapsed(ticket)).len(), 1);
        assert!(lb.handle(LightboxEvent::FadeElapsed(ticket)).is_empty());
    }

    #[test]
    fn navigation_while_closed_is_noop() {
        let mut lb = lightbox(3);
        assert!(lb.handle(LightboxEvent::Key(Key::ArrowRight)).is_empty());
        assert!(
            lb.handle(LightboxEvent::ArrowButton(Direction::Next))
                .is_empty()
        );
        assert!(!lb.is_open());
    }

    #[test]
    fn other_keys_do_nothing() {
        let mut lb = lightbox(3);
        lb.handle(click_image(1));
        assert!(lb.handle(LightboxEvent::Key(Key::from_code("Space"))).is_empty());
        assert_eq!(lb.current_index(), Some(1));
    }

    #[test]
    fn custom_fade_duration_is_scheduled() {
        let mut lb = Lightbox::new(collection(2), LightboxConfig { fade_ms: 300 });
        lb.handle(click_image(0));
        let effects = lb.handle(LightboxEvent::Key(Key::ArrowLeft));
        assert!(matches!(
            effects[1],
            Effect::ScheduleFade { delay_ms: 300, .. }
        ));
    }
}
