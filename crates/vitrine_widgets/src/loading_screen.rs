//! Full-window loading overlay

use serde::{Deserialize, Serialize};
use vitrine_animation::{Millis, TimerQueue};
use vitrine_platform::{Document, ElementId, HostEvent};

use crate::context::WidgetContext;
use crate::widget::Widget;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadingScreenConfig {
    pub element_id: String,
    pub text: String,
    pub logo_src: Option<String>,
    pub background: String,
    /// Time the overlay stays after the page has loaded
    pub hold_ms: Millis,
    /// Opacity transition before removal
    pub fade_ms: Millis,
}

impl Default for LoadingScreenConfig {
    fn default() -> Self {
        Self {
            element_id: "loading-screen".to_string(),
            text: "Loading amazing experience...".to_string(),
            logo_src: Some("Assets/favicon.PNG".to_string()),
            background: "#0a0a0a".to_string(),
            hold_ms: 1000,
            fade_ms: 500,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LoaderStep {
    Fade,
    Remove,
}

pub struct LoadingScreen {
    config: LoadingScreenConfig,
    overlay: ElementId,
    dismissing: bool,
    timers: TimerQueue<LoaderStep>,
}

impl LoadingScreen {
    /// Append the overlay to the body
    pub fn mount(doc: &mut dyn Document, config: LoadingScreenConfig) -> Self {
        let overlay = doc.create_element("div");
        doc.set_attribute(overlay, "id", &config.element_id);

        let content = child(doc, overlay, "div", "loader-content");
        let logo = child(doc, content, "div", "loader-logo");
        if let Some(src) = &config.logo_src {
            let img = doc.create_element("img");
            doc.set_attribute(img, "src", src);
            doc.set_attribute(img, "alt", "Logo");
            doc.append_child(logo, img);
        }
        child(doc, content, "div", "loader-spinner");
        let text = child(doc, content, "div", "loader-text");
        doc.set_text(text, &config.text);

        for (property, value) in [
            ("position", "fixed"),
            ("top", "0"),
            ("left", "0"),
            ("width", "100%"),
            ("height", "100%"),
            ("display", "flex"),
            ("align-items", "center"),
            ("justify-content", "center"),
            ("z-index", "10000"),
            ("transition", "opacity 0.5s ease"),
        ] {
            doc.set_style(overlay, property, value);
        }
        doc.set_style(overlay, "background", &config.background);

        let body = doc.body();
        doc.append_child(body, overlay);

        Self {
            config,
            overlay,
            dismissing: false,
            timers: TimerQueue::new(),
        }
    }

    pub fn overlay(&self) -> ElementId {
        self.overlay
    }

    /// Start hiding the overlay; later calls are ignored
    pub fn dismiss(&mut self) {
        if self.dismissing {
            return;
        }
        self.dismissing = true;
        self.timers.schedule(self.config.hold_ms, LoaderStep::Fade);
    }

    pub fn advance(&mut self, doc: &mut dyn Document, now: Millis) {
        while let Some(step) = self.timers.pop_due(now) {
            match step {
                LoaderStep::Fade => {
                    doc.set_style(self.overlay, "opacity", "0");
                    self.timers.schedule(self.config.fade_ms, LoaderStep::Remove);
                }
                LoaderStep::Remove => {
                    doc.remove(self.overlay);
                    tracing::debug!("loader: removed at {}", self.timers.now());
                }
            }
        }
    }
}

fn child(doc: &mut dyn Document, parent: ElementId, tag: &str, class: &str) -> ElementId {
    let el = doc.create_element(tag);
    doc.set_class_name(el, class);
    doc.append_child(parent, el);
    el
}

impl Widget for LoadingScreen {
    fn name(&self) -> &'static str {
        "loader"
    }

    fn handle_event(&mut self, _cx: &mut WidgetContext<'_>, event: &HostEvent) {
        if let HostEvent::Loaded(_) = event {
            self.dismiss();
        }
    }

    fn advance(&mut self, cx: &mut WidgetContext<'_>, now: Millis) {
        LoadingScreen::advance(self, cx.doc, now);
    }

    fn next_deadline(&self) -> Option<Millis> {
        self.timers.next_deadline()
    }
}
