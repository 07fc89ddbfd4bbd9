//! Scroll-triggered reveal

use serde::{Deserialize, Serialize};
use vitrine_platform::{
    Document, ElementId, HostEvent, IntersectionObserver, Margin, ObserverOptions,
};

use crate::context::WidgetContext;
use crate::widget::Widget;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    pub selector: String,
    pub threshold: f32,
    pub bottom_margin: f32,
    /// Added at mount to hide targets
    pub hidden_class: String,
    /// Added once a target becomes visible
    pub revealed_class: String,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            selector: ".service-card, .stat-box, .contact-item, .feature-item".to_string(),
            threshold: 0.1,
            bottom_margin: -50.0,
            hidden_class: "animate-on-scroll".to_string(),
            revealed_class: "animate-in".to_string(),
        }
    }
}

pub struct ScrollReveal {
    config: RevealConfig,
    observer: IntersectionObserver,
}

impl ScrollReveal {
    /// Returns `None` when nothing matches the selector
    pub fn mount(doc: &mut dyn Document, config: RevealConfig) -> Option<Self> {
        let targets = doc.query_all(&config.selector);
        if targets.is_empty() {
            tracing::debug!("reveal: no targets, inert");
            return None;
        }

        let options = ObserverOptions::new(config.threshold)
            .with_root_margin(Margin::bottom(config.bottom_margin));
        let mut observer = IntersectionObserver::new(options);
        for target in targets {
            doc.add_class(target, &config.hidden_class);
            observer.observe(target);
        }

        Some(Self { config, observer })
    }

    /// Targets not revealed yet
    pub fn pending(&self) -> usize {
        self.observer.len()
    }

    fn reveal(&mut self, doc: &mut dyn Document, target: ElementId) {
        doc.add_class(target, &self.config.revealed_class);
        self.observer.unobserve(target);
    }
}

impl Widget for ScrollReveal {
    fn name(&self) -> &'static str {
        "reveal"
    }

    fn handle_event(&mut self, cx: &mut WidgetContext<'_>, event: &HostEvent) {
        let Some(viewport) = event.viewport() else {
            return;
        };
        for entry in self.observer.update(&*cx.doc, viewport) {
            if entry.is_intersecting {
                self.reveal(cx.doc, entry.target);
            }
        }
    }
}
