//! Flipping card carousel
//!
//! Cycles a set of cards through two timed phases and a flip:
//!
//! ```text
//! content-stage --3000ms--> image-stage --3000ms--> flipping --800ms--> content-stage (next)
//! ```
//!
//! The flip is split in two halves. The outgoing card rotates away first;
//! at the midpoint the target card becomes active and rotates in. Exactly
//! one card carries `active` at any time because the active class only
//! ever moves in a single swap.
//!
//! Auto-advance pauses while the pointer is over the cards container or
//! while the section is less than 30% visible, and restarts from the
//! content stage when resumed.

use serde::{Deserialize, Serialize};
use vitrine_animation::{Millis, TimerId, TimerQueue};
use vitrine_platform::{
    Document, ElementId, HostEvent, IntersectionObserver, ObserverOptions, Viewport,
};

use crate::context::WidgetContext;
use crate::widget::Widget;

/// Carousel configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    pub card_selector: String,
    pub indicator_selector: String,
    /// Hovering this element pauses auto-advance
    pub container_selector: String,
    /// Visibility of this element pauses and resumes auto-advance
    pub section_selector: String,
    /// Time the active card shows its content
    pub content_ms: Millis,
    /// Time the active card shows its image before flipping
    pub image_ms: Millis,
    /// Full flip duration; the active card swaps at the midpoint
    pub flip_ms: Millis,
    /// Section visibility needed to keep cycling
    pub visibility_threshold: f32,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            card_selector: ".flip-card".to_string(),
            indicator_selector: ".indicator".to_string(),
            container_selector: ".flip-cards-container".to_string(),
            section_selector: ".pov-cards-section".to_string(),
            content_ms: 3000,
            image_ms: 3000,
            flip_ms: 800,
            visibility_threshold: 0.3,
        }
    }
}

impl CarouselConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content_ms(mut self, ms: Millis) -> Self {
        self.content_ms = ms;
        self
    }

    pub fn image_ms(mut self, ms: Millis) -> Self {
        self.image_ms = ms;
        self
    }

    pub fn flip_ms(mut self, ms: Millis) -> Self {
        self.flip_ms = ms;
        self
    }
}

/// Visual phase of a single card
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CardPhase {
    #[default]
    Normal,
    ContentStage,
    ImageStage,
}

impl CardPhase {
    /// Class applied to the card for this phase
    pub fn class(&self) -> Option<&'static str> {
        match self {
            CardPhase::Normal => None,
            CardPhase::ContentStage => Some("content-stage"),
            CardPhase::ImageStage => Some("image-stage"),
        }
    }
}

/// Where the carousel is in its cycle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CarouselStage {
    ContentStage,
    ImageStage,
    Flipping,
}

/// Direction the outgoing card rotates
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlipDirection {
    Next,
    Prev,
}

impl FlipDirection {
    /// Transform applied to the outgoing card
    pub fn exit_transform(&self) -> &'static str {
        match self {
            FlipDirection::Next => "rotateY(-90deg) translateX(-50%)",
            FlipDirection::Prev => "rotateY(90deg) translateX(50%)",
        }
    }

    /// Transform applied to the incoming card
    pub fn enter_transform(&self) -> &'static str {
        "rotateY(0deg) translateX(0%)"
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum CarouselTimer {
    ShowImage,
    AdvanceCard,
    SwapActive {
        target: usize,
        direction: FlipDirection,
    },
    SettleIncoming(usize),
    FinishFlip {
        outgoing: usize,
    },
}

/// Card carousel controller
pub struct CardCarousel {
    config: CarouselConfig,
    cards: Vec<ElementId>,
    indicators: Vec<ElementId>,
    container: Option<ElementId>,
    section: Option<ElementId>,
    observer: IntersectionObserver,

    current: usize,
    phases: Vec<CardPhase>,
    flipping: bool,
    paused: bool,

    timers: TimerQueue<CarouselTimer>,
    content_timer: Option<TimerId>,
    image_timer: Option<TimerId>,
}

impl CardCarousel {
    /// Bind to the page and start the content stage on the active card
    ///
    /// Returns `None` when the page has no cards.
    pub fn mount(doc: &mut dyn Document, config: CarouselConfig) -> Option<Self> {
        let cards = doc.query_all(&config.card_selector);
        if cards.is_empty() {
            tracing::debug!("carousel: no `{}` elements, inert", config.card_selector);
            return None;
        }
        let indicators = doc.query_all(&config.indicator_selector);
        let container = doc.query(&config.container_selector);
        let section = doc.query(&config.section_selector);

        let mut observer =
            IntersectionObserver::new(ObserverOptions::new(config.visibility_threshold));
        if let Some(section) = section {
            observer.observe(section);
        }

        // The first card already marked active wins; everything else is cleared
        let current = cards
            .iter()
            .position(|card| doc.has_class(*card, "active"))
            .unwrap_or(0);
        for (i, card) in cards.iter().enumerate() {
            if i != current {
                doc.remove_class(*card, "active");
            }
        }
        for (i, indicator) in indicators.iter().enumerate() {
            if i != current {
                doc.remove_class(*indicator, "active");
            }
        }
        doc.add_class(cards[current], "active");
        if let Some(indicator) = indicators.get(current) {
            doc.add_class(*indicator, "active");
        }

        tracing::debug!(
            "carousel: mounted {} cards, {} indicators, active {}",
            cards.len(),
            indicators.len(),
            current
        );

        let mut carousel = Self {
            phases: vec![CardPhase::Normal; cards.len()],
            config,
            cards,
            indicators,
            container,
            section,
            observer,
            current,
            flipping: false,
            paused: false,
            timers: TimerQueue::new(),
            content_timer: None,
            image_timer: None,
        };
        carousel.start_card_sequence(doc);
        Some(carousel)
    }

    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    /// Index of the active card
    pub fn current(&self) -> usize {
        self.current
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn card(&self, index: usize) -> Option<ElementId> {
        self.cards.get(index).copied()
    }

    pub fn phase(&self, index: usize) -> Option<CardPhase> {
        self.phases.get(index).copied()
    }

    pub fn is_flipping(&self) -> bool {
        self.flipping
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn stage(&self) -> CarouselStage {
        if self.flipping {
            CarouselStage::Flipping
        } else if self.phases[self.current] == CardPhase::ImageStage {
            CarouselStage::ImageStage
        } else {
            CarouselStage::ContentStage
        }
    }

    /// Flip to `target`
    ///
    /// Ignored while a flip is running, when `target` is already active or
    /// out of range. Returns whether a flip started. A paused carousel
    /// still finishes the flip but does not restart the cycle.
    pub fn go_to_card(&mut self, doc: &mut dyn Document, target: usize) -> bool {
        if self.flipping || target == self.current || target >= self.cards.len() {
            tracing::trace!(
                "carousel: ignoring go_to_card({}) (current {}, flipping {})",
                target,
                self.current,
                self.flipping
            );
            return false;
        }

        self.flipping = true;
        self.cancel_phase_timers();

        let direction = if target > self.current {
            FlipDirection::Next
        } else {
            FlipDirection::Prev
        };
        let outgoing = self.current;
        tracing::debug!(
            "carousel: flip {} -> {} ({:?}) at {}",
            outgoing,
            target,
            direction,
            self.timers.now()
        );

        let card = self.cards[outgoing];
        doc.add_class(card, "flipping-out");
        doc.set_style(card, "transform", direction.exit_transform());

        let half = self.config.flip_ms / 2;
        self.timers
            .schedule(half, CarouselTimer::SwapActive { target, direction });
        self.timers
            .schedule(self.config.flip_ms, CarouselTimer::FinishFlip { outgoing });
        true
    }

    /// Flip to the following card, wrapping at the end
    pub fn next_card(&mut self, doc: &mut dyn Document) -> bool {
        let next = (self.current + 1) % self.cards.len();
        self.go_to_card(doc, next)
    }

    /// Stop auto-advance
    ///
    /// A running flip still completes but does not restart the cycle.
    pub fn pause(&mut self) {
        self.paused = true;
        self.cancel_phase_timers();
        tracing::debug!("carousel: paused at {}", self.timers.now());
    }

    /// Restart auto-advance from the content stage of the active card
    pub fn resume(&mut self, doc: &mut dyn Document) {
        self.paused = false;
        if self.flipping {
            // Flip completion restarts the cycle
            return;
        }
        self.cancel_phase_timers();
        self.start_card_sequence(doc);
        tracing::debug!("carousel: resumed at {}", self.timers.now());
    }

    /// Show the active card's content and schedule the image stage
    pub fn start_card_sequence(&mut self, doc: &mut dyn Document) {
        self.set_card_phase(doc, self.current, CardPhase::ContentStage);
        self.content_timer = Some(
            self.timers
                .schedule(self.config.content_ms, CarouselTimer::ShowImage),
        );
    }

    /// Show the active card's image and schedule the flip to the next card
    pub fn execute_image_stage(&mut self, doc: &mut dyn Document) {
        if self.flipping {
            return;
        }
        self.set_card_phase(doc, self.current, CardPhase::ImageStage);
        self.image_timer = Some(
            self.timers
                .schedule(self.config.image_ms, CarouselTimer::AdvanceCard),
        );
    }

    /// Fire every transition due at or before `now`
    pub fn advance(&mut self, doc: &mut dyn Document, now: Millis) {
        while let Some(timer) = self.timers.pop_due(now) {
            self.fire(doc, timer);
        }
    }

    pub fn next_deadline(&self) -> Option<Millis> {
        self.timers.next_deadline()
    }

    fn fire(&mut self, doc: &mut dyn Document, timer: CarouselTimer) {
        match timer {
            CarouselTimer::ShowImage => {
                self.content_timer = None;
                self.execute_image_stage(doc);
            }
            CarouselTimer::AdvanceCard => {
                self.image_timer = None;
                self.next_card(doc);
            }
            CarouselTimer::SwapActive { target, direction } => {
                self.update_active_card(doc, target);
                let card = self.cards[target];
                doc.remove_class(card, "flipping-out");
                doc.add_class(card, "flipping-in");
                doc.set_style(card, "transform", direction.enter_transform());
                self.timers.schedule(
                    self.config.flip_ms - self.config.flip_ms / 2,
                    CarouselTimer::SettleIncoming(target),
                );
            }
            CarouselTimer::SettleIncoming(index) => {
                let card = self.cards[index];
                doc.remove_class(card, "flipping-in");
                doc.set_style(card, "transform", "");
            }
            CarouselTimer::FinishFlip { outgoing } => {
                self.set_card_phase(doc, outgoing, CardPhase::Normal);
                let card = self.cards[outgoing];
                doc.remove_class(card, "flipping-out");
                doc.set_style(card, "transform", "");
                self.flipping = false;

                if self.paused {
                    self.set_card_phase(doc, self.current, CardPhase::ContentStage);
                } else {
                    self.start_card_sequence(doc);
                }
                tracing::debug!(
                    "carousel: card {} active at {}",
                    self.current,
                    self.timers.now()
                );
            }
        }
    }

    fn update_active_card(&mut self, doc: &mut dyn Document, index: usize) {
        doc.remove_class(self.cards[self.current], "active");
        doc.add_class(self.cards[index], "active");

        if let Some(indicator) = self.indicators.get(self.current) {
            doc.remove_class(*indicator, "active");
        }
        if let Some(indicator) = self.indicators.get(index) {
            doc.add_class(*indicator, "active");
        }

        self.current = index;
    }

    fn set_card_phase(&mut self, doc: &mut dyn Document, index: usize, phase: CardPhase) {
        let Some(card) = self.cards.get(index).copied() else {
            return;
        };
        doc.remove_class(card, "content-stage");
        doc.remove_class(card, "image-stage");
        if let Some(class) = phase.class() {
            doc.add_class(card, class);
        }
        self.phases[index] = phase;
    }

    fn cancel_phase_timers(&mut self) {
        self.timers.cancel_slot(&mut self.content_timer);
        self.timers.cancel_slot(&mut self.image_timer);
    }

    fn handle_viewport(&mut self, doc: &mut dyn Document, viewport: &Viewport) {
        for entry in self.observer.update(&*doc, viewport) {
            if Some(entry.target) != self.section {
                continue;
            }
            if entry.is_intersecting {
                self.resume(doc);
            } else {
                self.pause();
            }
        }
    }
}

impl Widget for CardCarousel {
    fn name(&self) -> &'static str {
        "carousel"
    }

    fn handle_event(&mut self, cx: &mut WidgetContext<'_>, event: &HostEvent) {
        match event {
            HostEvent::Click(target) => {
                let hit = self
                    .indicators
                    .iter()
                    .position(|indicator| cx.doc.is_within(*target, *indicator));
                if let Some(index) = hit {
                    self.go_to_card(cx.doc, index);
                }
            }
            HostEvent::PointerEnter(el) if Some(*el) == self.container => self.pause(),
            HostEvent::PointerLeave(el) if Some(*el) == self.container => self.resume(cx.doc),
            HostEvent::Scroll(vp) | HostEvent::Resize(vp) | HostEvent::Loaded(vp) => {
                self.handle_viewport(cx.doc, vp);
            }
            _ => {}
        }
    }

    fn advance(&mut self, cx: &mut WidgetContext<'_>, now: Millis) {
        CardCarousel::advance(self, cx.doc, now);
    }

    fn next_deadline(&self) -> Option<Millis> {
        CardCarousel::next_deadline(self)
    }
}
