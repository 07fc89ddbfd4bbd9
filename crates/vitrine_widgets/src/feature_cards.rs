//! Hover ripple and press feedback on feature mini-cards

use serde::{Deserialize, Serialize};
use vitrine_animation::{Millis, TimerQueue};
use vitrine_platform::{Document, ElementId, HostEvent};
use vitrine_theme::BrandTokens;

use crate::context::WidgetContext;
use crate::widget::Widget;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureCardsConfig {
    pub selector: String,
    pub ripple_ms: Millis,
    pub press_ms: Millis,
    pub press_transform: String,
}

impl Default for FeatureCardsConfig {
    fn default() -> Self {
        Self {
            selector: ".feature-card-mini".to_string(),
            ripple_ms: 600,
            press_ms: 150,
            press_transform: "translateY(-4px) scale(0.98)".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
enum CardEffect {
    RemoveRipple(ElementId),
    Release { card: ElementId, transform: String },
}

pub struct FeatureCards {
    config: FeatureCardsConfig,
    tokens: BrandTokens,
    cards: Vec<ElementId>,
    timers: TimerQueue<CardEffect>,
}

impl FeatureCards {
    pub fn mount(doc: &dyn Document, config: FeatureCardsConfig, tokens: BrandTokens) -> Option<Self> {
        let cards = doc.query_all(&config.selector);
        if cards.is_empty() {
            tracing::debug!("feature cards: no `{}` elements, inert", config.selector);
            return None;
        }
        Some(Self {
            config,
            tokens,
            cards,
            timers: TimerQueue::new(),
        })
    }

    /// Append an expanding ripple to the card
    pub fn ripple(&mut self, doc: &mut dyn Document, card: ElementId) -> ElementId {
        let ripple = doc.create_element("div");
        let background = self.tokens.ripple.to_css();
        for (property, value) in [
            ("position", "absolute"),
            ("width", "5px"),
            ("height", "5px"),
            ("background", background.as_str()),
            ("border-radius", "50%"),
            ("top", "50%"),
            ("left", "50%"),
            ("transform", "translate(-50%, -50%) scale(0)"),
            ("animation", "rippleExpand 0.6s ease-out forwards"),
            ("pointer-events", "none"),
        ] {
            doc.set_style(ripple, property, value);
        }
        doc.append_child(card, ripple);
        self.timers
            .schedule(self.config.ripple_ms, CardEffect::RemoveRipple(ripple));
        ripple
    }

    /// Briefly press the card in and log its feature name
    pub fn press(&mut self, doc: &mut dyn Document, card: ElementId) {
        let feature = doc.attribute(card, "data-feature").unwrap_or_default();
        tracing::info!("feature card clicked: {}", feature);

        let transform = doc.style(card, "transform").unwrap_or_default();
        doc.set_style(card, "transform", &self.config.press_transform);
        self.timers
            .schedule(self.config.press_ms, CardEffect::Release { card, transform });
    }

    pub fn advance(&mut self, doc: &mut dyn Document, now: Millis) {
        while let Some(effect) = self.timers.pop_due(now) {
            match effect {
                CardEffect::RemoveRipple(ripple) => {
                    if doc.parent(ripple).is_some() {
                        doc.remove(ripple);
                    }
                }
                CardEffect::Release { card, transform } => {
                    doc.set_style(card, "transform", &transform);
                }
            }
        }
    }

    fn card_for(&self, doc: &dyn Document, target: ElementId) -> Option<ElementId> {
        self.cards
            .iter()
            .copied()
            .find(|card| doc.is_within(target, *card))
    }
}

impl Widget for FeatureCards {
    fn name(&self) -> &'static str {
        "feature-cards"
    }

    fn handle_event(&mut self, cx: &mut WidgetContext<'_>, event: &HostEvent) {
        match event {
            HostEvent::PointerEnter(el) if self.cards.contains(el) => {
                self.ripple(cx.doc, *el);
            }
            HostEvent::Click(target) => {
                if let Some(card) = self.card_for(&*cx.doc, *target) {
                    self.press(cx.doc, card);
                }
            }
            _ => {}
        }
    }

    fn advance(&mut self, cx: &mut WidgetContext<'_>, now: Millis) {
        FeatureCards::advance(self, cx.doc, now);
    }

    fn next_deadline(&self) -> Option<Millis> {
        self.timers.next_deadline()
    }
}
