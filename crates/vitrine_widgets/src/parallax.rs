//! Scroll parallax for floating cards

use serde::{Deserialize, Serialize};
use vitrine_platform::{Document, ElementId, HostEvent};

use crate::context::WidgetContext;
use crate::widget::Widget;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallaxConfig {
    pub selector: String,
    /// Fraction of the scroll offset the elements move up by
    pub speed: f32,
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self {
            selector: ".floating-card".to_string(),
            speed: 0.5,
        }
    }
}

pub struct Parallax {
    config: ParallaxConfig,
    elements: Vec<ElementId>,
}

impl Parallax {
    pub fn mount(doc: &dyn Document, config: ParallaxConfig) -> Option<Self> {
        let elements = doc.query_all(&config.selector);
        if elements.is_empty() {
            tracing::debug!("parallax: no `{}` elements, inert", config.selector);
            return None;
        }
        Some(Self { config, elements })
    }

    pub fn apply(&self, doc: &mut dyn Document, scroll_y: f32) {
        let transform = format!("translateY({}px)", 0.0 - scroll_y * self.config.speed);
        for element in &self.elements {
            doc.set_style(*element, "transform", &transform);
        }
    }
}

impl Widget for Parallax {
    fn name(&self) -> &'static str {
        "parallax"
    }

    fn handle_event(&mut self, cx: &mut WidgetContext<'_>, event: &HostEvent) {
        if let HostEvent::Scroll(vp) = event {
            self.apply(cx.doc, vp.scroll_y);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_platform::MemoryDocument;

    #[test]
    fn test_moves_against_scroll() {
        let mut doc = MemoryDocument::new();
        let a = doc.element("div").class("floating-card").build();
        let b = doc.element("div").class("floating-card").build();
        let parallax = Parallax::mount(&doc, ParallaxConfig::default()).unwrap();

        parallax.apply(&mut doc, 300.0);
        assert_eq!(doc.style(a, "transform").as_deref(), Some("translateY(-150px)"));
        assert_eq!(doc.style(b, "transform").as_deref(), Some("translateY(-150px)"));

        parallax.apply(&mut doc, 45.0);
        assert_eq!(doc.style(a, "transform").as_deref(), Some("translateY(-22.5px)"));
    }
}
