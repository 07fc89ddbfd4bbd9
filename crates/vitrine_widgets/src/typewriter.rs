//! Typewriter effects
//!
//! Two flavors share the same character cursor:
//!
//! - [`LetterTypewriter`] appends one `span.letter` per character once the
//!   element scrolls into view, then marks it `typing-complete`.
//! - [`TitleTypewriter`] retypes the hero title into its text with a caret
//!   border, starting at mount.
//!
//! Text is split into Unicode scalar values.

use serde::{Deserialize, Serialize};
use vitrine_animation::{Millis, TimerQueue};
use vitrine_platform::{Document, ElementId, HostEvent, IntersectionObserver, ObserverOptions};

use crate::context::WidgetContext;
use crate::widget::Widget;

/// Text being typed into one element
#[derive(Clone, Debug)]
struct TypingJob {
    element: ElementId,
    chars: Vec<char>,
    index: usize,
}

impl TypingJob {
    fn new(element: ElementId, text: &str) -> Self {
        Self {
            element,
            chars: text.chars().collect(),
            index: 0,
        }
    }

    fn next_char(&mut self) -> Option<char> {
        let c = self.chars.get(self.index).copied()?;
        self.index += 1;
        Some(c)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LetterTypewriterConfig {
    pub selector: String,
    /// Interval between letters
    pub speed_ms: Millis,
    /// Wait between becoming visible and the first letter
    pub delay_ms: Millis,
    pub threshold: f32,
    /// Caret linger after the text is complete
    pub complete_ms: Millis,
}

impl Default for LetterTypewriterConfig {
    fn default() -> Self {
        Self {
            selector: ".typewriter-text".to_string(),
            speed_ms: 30,
            delay_ms: 500,
            threshold: 0.3,
            complete_ms: 1000,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LetterStep {
    Type(usize),
    Complete(usize),
}

pub struct LetterTypewriter {
    config: LetterTypewriterConfig,
    jobs: Vec<TypingJob>,
    observer: IntersectionObserver,
    timers: TimerQueue<LetterStep>,
}

impl LetterTypewriter {
    /// Capture and clear the text of every target
    ///
    /// The text comes from `data-text` when present, else the content.
    pub fn mount(doc: &mut dyn Document, config: LetterTypewriterConfig) -> Option<Self> {
        let elements = doc.query_all(&config.selector);
        if elements.is_empty() {
            tracing::debug!("typewriter: no `{}` elements, inert", config.selector);
            return None;
        }

        let mut observer = IntersectionObserver::new(ObserverOptions::new(config.threshold));
        let mut jobs = Vec::with_capacity(elements.len());
        for element in elements {
            let text = doc
                .attribute(element, "data-text")
                .unwrap_or_else(|| doc.text(element));
            doc.set_text(element, "");
            observer.observe(element);
            jobs.push(TypingJob::new(element, &text));
        }

        Some(Self {
            config,
            jobs,
            observer,
            timers: TimerQueue::new(),
        })
    }

    pub fn advance(&mut self, doc: &mut dyn Document, now: Millis) {
        while let Some(step) = self.timers.pop_due(now) {
            match step {
                LetterStep::Type(job) => self.type_next_letter(doc, job),
                LetterStep::Complete(job) => {
                    doc.add_class(self.jobs[job].element, "typing-complete");
                }
            }
        }
    }

    fn type_next_letter(&mut self, doc: &mut dyn Document, job: usize) {
        let element = self.jobs[job].element;
        match self.jobs[job].next_char() {
            Some(c) => {
                let span = doc.create_element("span");
                if c == ' ' {
                    doc.set_class_name(span, "letter space");
                    doc.set_text(span, "\u{a0}");
                } else {
                    doc.set_class_name(span, "letter");
                    doc.set_text(span, c.encode_utf8(&mut [0; 4]));
                }
                doc.set_style(span, "animation-delay", "0ms");
                doc.append_child(element, span);
                self.timers.schedule(self.config.speed_ms, LetterStep::Type(job));
            }
            None => {
                self.timers
                    .schedule(self.config.complete_ms, LetterStep::Complete(job));
            }
        }
    }
}

impl Widget for LetterTypewriter {
    fn name(&self) -> &'static str {
        "typewriter"
    }

    fn handle_event(&mut self, cx: &mut WidgetContext<'_>, event: &HostEvent) {
        let Some(viewport) = event.viewport() else {
            return;
        };
        for entry in self.observer.update(&*cx.doc, viewport) {
            if !entry.is_intersecting {
                continue;
            }
            self.observer.unobserve(entry.target);
            if let Some(job) = self.jobs.iter().position(|j| j.element == entry.target) {
                self.timers
                    .schedule(self.config.delay_ms, LetterStep::Type(job));
            }
        }
    }

    fn advance(&mut self, cx: &mut WidgetContext<'_>, now: Millis) {
        LetterTypewriter::advance(self, cx.doc, now);
    }

    fn next_deadline(&self) -> Option<Millis> {
        self.timers.next_deadline()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TitleTypewriterConfig {
    pub selector: String,
    pub speed_ms: Millis,
    /// `border-right` shown while typing
    pub caret: String,
}

impl Default for TitleTypewriterConfig {
    fn default() -> Self {
        Self {
            selector: ".hero-title".to_string(),
            speed_ms: 50,
            caret: "2px solid var(--accent-primary)".to_string(),
        }
    }
}

pub struct TitleTypewriter {
    config: TitleTypewriterConfig,
    job: TypingJob,
    typed: String,
    timers: TimerQueue<()>,
}

impl TitleTypewriter {
    pub fn mount(doc: &mut dyn Document, config: TitleTypewriterConfig) -> Option<Self> {
        let Some(element) = doc.query(&config.selector) else {
            tracing::debug!("title: no `{}` element, inert", config.selector);
            return None;
        };
        let text = doc.text(element);
        doc.set_text(element, "");
        doc.set_style(element, "border-right", &config.caret);

        let mut timers = TimerQueue::new();
        timers.schedule(config.speed_ms, ());
        Some(Self {
            config,
            job: TypingJob::new(element, &text),
            typed: String::with_capacity(text.len()),
            timers,
        })
    }

    pub fn is_done(&self) -> bool {
        self.timers.is_empty()
    }

    pub fn advance(&mut self, doc: &mut dyn Document, now: Millis) {
        while self.timers.pop_due(now).is_some() {
            match self.job.next_char() {
                Some(c) => {
                    self.typed.push(c);
                    doc.set_text(self.job.element, &self.typed);
                    self.timers.schedule(self.config.speed_ms, ());
                }
                None => doc.set_style(self.job.element, "border-right", "none"),
            }
        }
    }
}

impl Widget for TitleTypewriter {
    fn name(&self) -> &'static str {
        "title"
    }

    fn handle_event(&mut self, _cx: &mut WidgetContext<'_>, _event: &HostEvent) {}

    fn advance(&mut self, cx: &mut WidgetContext<'_>, now: Millis) {
        TitleTypewriter::advance(self, cx.doc, now);
    }

    fn next_deadline(&self) -> Option<Millis> {
        self.timers.next_deadline()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_platform::{MemoryDocument, MemoryStore, Rect, Viewport};

    #[test]
    fn test_letters_after_visibility() {
        let mut doc = MemoryDocument::new();
        let el = doc
            .element("p")
            .class("typewriter-text")
            .attr("data-text", "Hi yo")
            .text("placeholder")
            .bounds(Rect::new(0.0, 100.0, 500.0, 40.0))
            .build();
        let mut tw = LetterTypewriter::mount(&mut doc, LetterTypewriterConfig::default()).unwrap();
        assert_eq!(doc.text(el), "");

        let mut store = MemoryStore::new();
        let mut cx = WidgetContext::new(&mut doc, &mut store);
        tw.handle_event(&mut cx, &HostEvent::Loaded(Viewport::new(1280.0, 800.0)));
        drop(cx);

        tw.advance(&mut doc, 499);
        assert!(doc.children(el).is_empty());
        tw.advance(&mut doc, 500);
        assert_eq!(doc.text(el), "H");

        // Letters at 500, 530, 560, 590, 620
        tw.advance(&mut doc, 620);
        let letters = doc.children(el);
        assert_eq!(letters.len(), 5);
        assert_eq!(doc.classes(letters[2]), vec!["letter", "space"]);
        assert_eq!(doc.text(letters[2]), "\u{a0}");
        assert_eq!(doc.text(el), "Hi\u{a0}yo");

        // End detected one tick later, caret kept for another second
        tw.advance(&mut doc, 1649);
        assert!(!doc.has_class(el, "typing-complete"));
        tw.advance(&mut doc, 1650);
        assert!(doc.has_class(el, "typing-complete"));
    }

    #[test]
    fn test_letters_use_content_and_scalars() {
        let mut doc = MemoryDocument::new();
        let el = doc
            .element("p")
            .class("typewriter-text")
            .text("héllo")
            .build();
        let mut tw = LetterTypewriter::mount(&mut doc, LetterTypewriterConfig::default()).unwrap();

        // Bypass visibility
        tw.timers.schedule(0, LetterStep::Type(0));
        tw.advance(&mut doc, 1000);
        assert_eq!(doc.children(el).len(), 5);
        assert_eq!(doc.text(el), "héllo");
    }

    #[test]
    fn test_title_types_and_drops_caret() {
        let mut doc = MemoryDocument::new();
        let title = doc.element("h1").class("hero-title").text("Hey").build();
        let mut tw = TitleTypewriter::mount(&mut doc, TitleTypewriterConfig::default()).unwrap();
        assert_eq!(doc.text(title), "");
        assert_eq!(
            doc.style(title, "border-right").as_deref(),
            Some("2px solid var(--accent-primary)")
        );

        tw.advance(&mut doc, 100);
        assert_eq!(doc.text(title), "He");
        tw.advance(&mut doc, 150);
        assert_eq!(doc.text(title), "Hey");
        assert!(!tw.is_done());

        tw.advance(&mut doc, 200);
        assert_eq!(doc.style(title, "border-right").as_deref(), Some("none"));
        assert!(tw.is_done());
    }
}
