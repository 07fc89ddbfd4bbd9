//! Staged reveal sequencer
//!
//! Plays a fixed table of class additions once, the first time its section
//! becomes visible. Each stage fires at an offset from the trigger and adds
//! classes to the elements it names; a stage can require elements to be
//! present and can stagger its marks by a per-element delay attribute.

use serde::{Deserialize, Serialize};
use vitrine_animation::{Millis, StaggerBuilder, Timeline, TimerQueue};
use vitrine_platform::{
    Document, ElementId, HostEvent, IntersectionObserver, Margin, ObserverOptions, Viewport,
};

use crate::context::WidgetContext;
use crate::widget::Widget;

/// Add `class` to every element matching `selector`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mark {
    pub selector: String,
    pub class: String,
}

impl Mark {
    pub fn new(selector: &str, class: &str) -> Self {
        Self {
            selector: selector.to_string(),
            class: class.to_string(),
        }
    }
}

/// One row of the sequence
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stage {
    pub name: String,
    /// Offset from the trigger
    pub at_ms: Millis,
    /// Selectors that must all match for the stage to apply
    #[serde(default)]
    pub requires: Vec<String>,
    pub marks: Vec<Mark>,
    /// Attribute holding a per-element delay in seconds
    ///
    /// When set, each element matched by the marks is scheduled on its own
    /// at `at_ms` plus its delay.
    #[serde(default)]
    pub stagger_attribute: Option<String>,
}

impl Stage {
    pub fn new(name: &str, at_ms: Millis) -> Self {
        Self {
            name: name.to_string(),
            at_ms,
            requires: Vec::new(),
            marks: Vec::new(),
            stagger_attribute: None,
        }
    }

    pub fn requires(mut self, selector: &str) -> Self {
        self.requires.push(selector.to_string());
        self
    }

    pub fn mark(mut self, selector: &str, class: &str) -> Self {
        self.marks.push(Mark::new(selector, class));
        self
    }

    pub fn stagger_by(mut self, attribute: &str) -> Self {
        self.stagger_attribute = Some(attribute.to_string());
        self
    }
}

/// Sequencer configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SequencerConfig {
    /// Section whose visibility triggers the sequence
    pub section_selector: String,
    pub threshold: f32,
    /// Applied to the bottom of the viewport; negative shrinks it
    pub bottom_margin: f32,
    pub stages: Vec<Stage>,
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self {
            section_selector: ".o-intelligence-animated".to_string(),
            threshold: 0.3,
            bottom_margin: -100.0,
            stages: default_stages(),
        }
    }
}

fn default_stages() -> Vec<Stage> {
    vec![
        Stage::new("statement", 0)
            .requires(".main-statement")
            .requires(".stage-1")
            .mark(".stage-1", "animate")
            .mark(".main-statement", "animate"),
        Stage::new("dot", 800)
            .mark(".stage-2", "animate")
            .mark(".center-dot", "animate"),
        Stage::new("split", 1200)
            .mark(".statement-left", "animate")
            .mark(".statement-right", "animate"),
        Stage::new("crush", 2000)
            .requires(".stage-3")
            .mark(".stage-3", "animate")
            .mark(".main-statement", "crush-text")
            .mark(".statement-left", "crush-text")
            .mark(".statement-right", "crush-text")
            .mark(".center-dot", "crush-text"),
        Stage::new("cards", 2200)
            .mark(".feature-card-mini", "animate")
            .stagger_by("data-delay"),
        Stage::new("context", 3200).mark(".context-description", "animate"),
    ]
}

#[derive(Clone, Debug, PartialEq)]
enum SequencerCue {
    Stage(usize),
    Element { element: ElementId, class: String },
}

/// Plays the stage table once
pub struct StageSequencer {
    config: SequencerConfig,
    section: ElementId,
    observer: IntersectionObserver,
    triggered: bool,
    timers: TimerQueue<SequencerCue>,
}

impl StageSequencer {
    /// Returns `None` when the section is missing
    pub fn mount(doc: &dyn Document, config: SequencerConfig) -> Option<Self> {
        let Some(section) = doc.query(&config.section_selector) else {
            tracing::debug!(
                "sequencer: no `{}` element, inert",
                config.section_selector
            );
            return None;
        };

        let options = ObserverOptions::new(config.threshold)
            .with_root_margin(Margin::bottom(config.bottom_margin));
        let mut observer = IntersectionObserver::new(options);
        observer.observe(section);

        Some(Self {
            config,
            section,
            observer,
            triggered: false,
            timers: TimerQueue::new(),
        })
    }

    pub fn config(&self) -> &SequencerConfig {
        &self.config
    }

    pub fn is_triggered(&self) -> bool {
        self.triggered
    }

    /// Start the sequence; only the first call has any effect
    pub fn trigger(&mut self, doc: &dyn Document) -> bool {
        if self.triggered {
            return false;
        }
        self.triggered = true;
        self.observer.disconnect();
        tracing::info!("sequencer: triggered at {}", self.timers.now());

        let timeline = self.build_timeline(doc);
        timeline.schedule_into(&mut self.timers);
        true
    }

    /// Apply a stage immediately, ignoring its stagger delays
    pub fn apply_stage(&self, doc: &mut dyn Document, index: usize) {
        let Some(stage) = self.config.stages.get(index) else {
            return;
        };
        if !requirements_met(&*doc, stage) {
            tracing::debug!("sequencer: stage `{}` skipped, requirements missing", stage.name);
            return;
        }
        tracing::debug!("sequencer: stage `{}`", stage.name);
        for mark in &stage.marks {
            for element in doc.query_all(&mark.selector) {
                doc.add_class(element, &mark.class);
            }
        }
    }

    pub fn advance(&mut self, doc: &mut dyn Document, now: Millis) {
        while let Some(cue) = self.timers.pop_due(now) {
            match cue {
                SequencerCue::Stage(index) => self.apply_stage(doc, index),
                SequencerCue::Element { element, class } => doc.add_class(element, &class),
            }
        }
    }

    pub fn next_deadline(&self) -> Option<Millis> {
        self.timers.next_deadline()
    }

    fn build_timeline(&self, doc: &dyn Document) -> Timeline<SequencerCue> {
        let mut timeline = Timeline::new();
        for (index, stage) in self.config.stages.iter().enumerate() {
            let Some(attribute) = &stage.stagger_attribute else {
                timeline.push(stage.at_ms, SequencerCue::Stage(index));
                continue;
            };

            let mut group = StaggerBuilder::new(stage.at_ms);
            for mark in &stage.marks {
                for element in doc.query_all(&mark.selector) {
                    let delay = delay_ms(doc.attribute(element, attribute).as_deref());
                    group = group.item(
                        delay,
                        SequencerCue::Element {
                            element,
                            class: mark.class.clone(),
                        },
                    );
                }
            }
            timeline = timeline.stagger(group);
        }
        timeline
    }

    fn handle_viewport(&mut self, doc: &dyn Document, viewport: &Viewport) {
        if self.triggered {
            return;
        }
        let visible = self
            .observer
            .update(doc, viewport)
            .iter()
            .any(|entry| entry.target == self.section && entry.is_intersecting);
        if visible {
            self.trigger(doc);
        }
    }
}

fn requirements_met(doc: &dyn Document, stage: &Stage) -> bool {
    stage.requires.iter().all(|s| doc.query(s).is_some())
}

/// Seconds from a delay attribute to milliseconds; missing or invalid is 0
fn delay_ms(value: Option<&str>) -> Millis {
    value
        .and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|secs| secs.is_finite() && *secs > 0.0)
        .map(|secs| (secs * 1000.0).round() as Millis)
        .unwrap_or(0)
}

impl Widget for StageSequencer {
    fn name(&self) -> &'static str {
        "sequencer"
    }

    fn handle_event(&mut self, cx: &mut WidgetContext<'_>, event: &HostEvent) {
        if let Some(viewport) = event.viewport() {
            self.handle_viewport(&*cx.doc, viewport);
        }
    }

    fn advance(&mut self, cx: &mut WidgetContext<'_>, now: Millis) {
        StageSequencer::advance(self, cx.doc, now);
    }

    fn next_deadline(&self) -> Option<Millis> {
        StageSequencer::next_deadline(self)
    }
}
