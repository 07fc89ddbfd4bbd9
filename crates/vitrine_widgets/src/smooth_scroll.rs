//! In-page anchor scrolling

use serde::{Deserialize, Serialize};
use vitrine_platform::{Document, ElementId, HostEvent, ScrollBehavior};

use crate::context::WidgetContext;
use crate::widget::Widget;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmoothScrollConfig {
    pub anchor_selector: String,
    /// Space left above the target for the fixed navbar
    pub offset: f32,
}

impl Default for SmoothScrollConfig {
    fn default() -> Self {
        Self {
            anchor_selector: "a[href^=\"#\"]".to_string(),
            offset: 80.0,
        }
    }
}

pub struct SmoothScroller {
    config: SmoothScrollConfig,
    anchors: Vec<ElementId>,
}

impl SmoothScroller {
    pub fn mount(doc: &dyn Document, config: SmoothScrollConfig) -> Option<Self> {
        let anchors = doc.query_all(&config.anchor_selector);
        if anchors.is_empty() {
            tracing::debug!("smooth scroll: no in-page anchors, inert");
            return None;
        }
        Some(Self { config, anchors })
    }

    /// Scroll to the anchor's target; returns the requested offset
    pub fn follow(&self, doc: &mut dyn Document, anchor: ElementId) -> Option<f32> {
        let href = doc.attribute(anchor, "href")?;
        // A bare "#" is not a valid selector and targets nothing
        let target = doc.query(&href)?;
        let bounds = doc.bounds(target)?;
        let top = bounds.top() - self.config.offset;
        doc.scroll_to(top, ScrollBehavior::Smooth);
        tracing::debug!("smooth scroll: {} -> {}", href, top);
        Some(top)
    }
}

impl Widget for SmoothScroller {
    fn name(&self) -> &'static str {
        "smooth-scroll"
    }

    fn handle_event(&mut self, cx: &mut WidgetContext<'_>, event: &HostEvent) {
        let HostEvent::Click(target) = event else {
            return;
        };
        let anchor = self
            .anchors
            .iter()
            .copied()
            .find(|a| cx.doc.is_within(*target, *a));
        if let Some(anchor) = anchor {
            self.follow(cx.doc, anchor);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_platform::{MemoryDocument, Rect};

    #[test]
    fn test_scrolls_to_target_minus_offset() {
        let mut doc = MemoryDocument::new();
        let link = doc.element("a").attr("href", "#contact").build();
        doc.element("a").attr("href", "https://example.com").build();
        doc.element("section")
            .id("contact")
            .bounds(Rect::new(0.0, 2400.0, 1280.0, 600.0))
            .build();

        let scroller = SmoothScroller::mount(&doc, SmoothScrollConfig::default()).unwrap();
        assert_eq!(scroller.anchors.len(), 1);
        assert_eq!(scroller.follow(&mut doc, link), Some(2320.0));
        assert_eq!(doc.scroll_requests(), &[(2320.0, ScrollBehavior::Smooth)]);
    }

    #[test]
    fn test_missing_target_does_nothing() {
        let mut doc = MemoryDocument::new();
        let dangling = doc.element("a").attr("href", "#nowhere").build();
        let bare = doc.element("a").attr("href", "#").build();

        let scroller = SmoothScroller::mount(&doc, SmoothScrollConfig::default()).unwrap();
        assert_eq!(scroller.follow(&mut doc, dangling), None);
        assert_eq!(scroller.follow(&mut doc, bare), None);
        assert!(doc.scroll_requests().is_empty());
    }
}
