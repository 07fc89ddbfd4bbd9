//! Number counters
//!
//! Counts the figure inside each `.stat-number` up from zero the first time
//! it becomes visible.

use serde::{Deserialize, Serialize};
use vitrine_animation::{Millis, TimerQueue};
use vitrine_platform::{Document, ElementId, HostEvent, IntersectionObserver, ObserverOptions};

use crate::context::WidgetContext;
use crate::widget::Widget;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CounterConfig {
    pub selector: String,
    pub steps: u32,
    pub step_ms: Millis,
    pub threshold: f32,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            selector: ".stat-number".to_string(),
            steps: 50,
            step_ms: 30,
            threshold: 0.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct CounterTick {
    element: ElementId,
    target: u64,
    step: u32,
}

pub struct CounterAnimation {
    config: CounterConfig,
    observer: IntersectionObserver,
    timers: TimerQueue<CounterTick>,
}

impl CounterAnimation {
    pub fn mount(doc: &dyn Document, config: CounterConfig) -> Option<Self> {
        let counters = doc.query_all(&config.selector);
        if counters.is_empty() {
            tracing::debug!("counter: no `{}` elements, inert", config.selector);
            return None;
        }
        let mut observer = IntersectionObserver::new(ObserverOptions::new(config.threshold));
        for counter in counters {
            observer.observe(counter);
        }
        Some(Self {
            config,
            observer,
            timers: TimerQueue::new(),
        })
    }

    /// Start counting `element` up to the number in its text
    pub fn start(&mut self, doc: &dyn Document, element: ElementId) {
        let Some(target) = parse_target(&doc.text(element)) else {
            tracing::debug!("counter: no digits in {:?}, skipping", doc.text(element));
            return;
        };
        self.timers.schedule(
            self.config.step_ms,
            CounterTick {
                element,
                target,
                step: 1,
            },
        );
    }

    pub fn advance(&mut self, doc: &mut dyn Document, now: Millis) {
        let steps = self.config.steps.max(1);
        while let Some(tick) = self.timers.pop_due(now) {
            let value = if tick.step >= steps {
                tick.target
            } else {
                step_value(tick.target, tick.step, steps)
            };
            let text = replace_first_number(&doc.text(tick.element), value);
            doc.set_text(tick.element, &text);

            if tick.step < steps {
                self.timers.schedule(
                    self.config.step_ms,
                    CounterTick {
                        step: tick.step + 1,
                        ..tick
                    },
                );
            }
        }
    }
}

/// All digits of the text read as one number; `None` when absent or past `u64::MAX`
fn parse_target(text: &str) -> Option<u64> {
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    digits.parse().ok()
}

/// Replace the first run of ASCII digits with `value`
/// `target * step / steps` without overflowing on long digit runs
fn step_value(target: u64, step: u32, steps: u32) -> u64 {
    let value = u128::from(target) * u128::from(step) / u128::from(steps);
    u64::try_from(value).unwrap_or(target)
}

fn replace_first_number(text: &str, value: u64) -> String {
    let Some(start) = text.find(|c: char| c.is_ascii_digit()) else {
        return text.to_string();
    };
    let end = text[start..]
        .find(|c: char| !c.is_ascii_digit())
        .map_or(text.len(), |offset| start + offset);
    format!("{}{}{}", &text[..start], value, &text[end..])
}

impl Widget for CounterAnimation {
    fn name(&self) -> &'static str {
        "counter"
    }

    fn handle_event(&mut self, cx: &mut WidgetContext<'_>, event: &HostEvent) {
        let Some(viewport) = event.viewport() else {
            return;
        };
        for entry in self.observer.update(&*cx.doc, viewport) {
            if entry.is_intersecting {
                self.observer.unobserve(entry.target);
                self.start(&*cx.doc, entry.target);
            }
        }
    }

    fn advance(&mut self, cx: &mut WidgetContext<'_>, now: Millis) {
        CounterAnimation::advance(self, cx.doc, now);
    }

    fn next_deadline(&self) -> Option<Millis> {
        self.timers.next_deadline()
    }
}
