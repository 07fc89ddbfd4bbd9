//! Replay a fixture on the virtual clock
//!
//! Events are dispatched at their scripted times. Between events the clock
//! steps from one timer deadline to the next so every mutation in the trace
//! carries the time it happened.

use std::fmt;

use vitrine_animation::Millis;
use vitrine_app::{VitrineApp, VitrineConfig};
use vitrine_platform::{
    Document, HostEvent, KeyValueStore, MemoryDocument, Mutation, RecordingCanvas,
    ScrollBehavior,
};

use crate::fixture::Page;

/// Extra time simulated after the last scripted event
pub const DEFAULT_TAIL_MS: Millis = 10_000;

/// One line of the simulation trace
#[derive(Clone, Debug, PartialEq)]
pub struct TraceLine {
    pub at: Millis,
    pub message: String,
}

impl fmt::Display for TraceLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:>7}ms] {}", self.at, self.message)
    }
}

/// Outcome of a simulation run
#[derive(Debug)]
pub struct Simulation {
    pub widgets: Vec<&'static str>,
    pub trace: Vec<TraceLine>,
    pub ended_at: Millis,
}

/// Mount the page, replay its script and run timers up to `until`
///
/// Without `until` the run stops [`DEFAULT_TAIL_MS`] after the last event;
/// the carousel cycles forever so a limit is always needed.
pub fn run<S: KeyValueStore>(
    page: Page,
    store: S,
    config: VitrineConfig,
    until: Option<Millis>,
) -> Simulation {
    let Page {
        doc,
        viewport,
        script,
        ..
    } = page;
    let last_event = script.iter().map(|e| e.at).max().unwrap_or(0);
    let until = until.unwrap_or(last_event + DEFAULT_TAIL_MS);

    let mut app = VitrineApp::new(doc, store, config);
    let mut canvas = RecordingCanvas::new();
    let mut trace = Vec::new();

    app.mount(viewport);
    let widgets = app.widget_names();
    trace.push(TraceLine {
        at: 0,
        message: format!("mounted {}", widgets.join(", ")),
    });
    drain(&mut app, &mut trace);

    for scripted in script.iter().filter(|e| e.at <= until) {
        step_timers(&mut app, scripted.at, &mut trace);
        app.advance_to(scripted.at);
        drain(&mut app, &mut trace);

        trace.push(TraceLine {
            at: app.now(),
            message: format!("> {}", describe_event(app.doc(), &scripted.event)),
        });
        app.dispatch(&scripted.event);
        if matches!(scripted.event, HostEvent::Frame) {
            app.draw(&mut canvas);
            trace.push(TraceLine {
                at: app.now(),
                message: format!("  frame: {} particles drawn", canvas.circles_since_clear()),
            });
        }
        drain(&mut app, &mut trace);
    }

    step_timers(&mut app, until, &mut trace);
    app.advance_to(until);
    drain(&mut app, &mut trace);

    tracing::debug!("simulation finished at {} ({} trace lines)", until, trace.len());
    Simulation {
        widgets,
        trace,
        ended_at: app.now(),
    }
}

/// Fire timers one deadline at a time until `until`, recording as we go
fn step_timers<S: KeyValueStore>(
    app: &mut VitrineApp<MemoryDocument, S>,
    until: Millis,
    trace: &mut Vec<TraceLine>,
) {
    while let Some(deadline) = app.next_deadline() {
        if deadline > until {
            break;
        }
        app.advance_to(deadline);
        drain(app, trace);
    }
}

fn drain<S: KeyValueStore>(app: &mut VitrineApp<MemoryDocument, S>, trace: &mut Vec<TraceLine>) {
    let at = app.now();
    let mutations = app.doc_mut().take_mutations();
    for mutation in mutations {
        trace.push(TraceLine {
            at,
            message: format!("  {}", describe_mutation(app.doc(), &mutation)),
        });
    }
}

fn describe_event(doc: &MemoryDocument, event: &HostEvent) -> String {
    match event {
        HostEvent::Click(el) => format!("click {}", doc.describe(*el)),
        HostEvent::PointerEnter(el) => format!("pointer-enter {}", doc.describe(*el)),
        HostEvent::PointerLeave(el) => format!("pointer-leave {}", doc.describe(*el)),
        HostEvent::Submit(el) => format!("submit {}", doc.describe(*el)),
        HostEvent::Scroll(vp) => format!("scroll to {}", vp.scroll_y),
        HostEvent::Resize(vp) => format!("resize to {}x{}", vp.width, vp.height),
        HostEvent::Loaded(_) => "loaded".to_string(),
        HostEvent::Frame => "frame".to_string(),
    }
}

/// One-line rendering of a journal entry
pub fn describe_mutation(doc: &MemoryDocument, mutation: &Mutation) -> String {
    match mutation {
        Mutation::ClassAdded { element, class } => {
            format!("{} +.{}", doc.describe(*element), class)
        }
        Mutation::ClassRemoved { element, class } => {
            format!("{} -.{}", doc.describe(*element), class)
        }
        Mutation::AttributeSet {
            element,
            name,
            value,
        } => format!("{} [{}={:?}]", doc.describe(*element), name, value),
        Mutation::AttributeRemoved { element, name } => {
            format!("{} -[{}]", doc.describe(*element), name)
        }
        Mutation::TextSet { element, text } => {
            format!("{} text {:?}", doc.describe(*element), text)
        }
        Mutation::StyleSet {
            element,
            property,
            value,
        } if value.is_empty() => format!("{} style {}: (removed)", doc.describe(*element), property),
        Mutation::StyleSet {
            element,
            property,
            value,
        } => format!("{} style {}: {}", doc.describe(*element), property, value),
        Mutation::Appended { parent, child } => {
            format!("{} append {}", doc.describe(*parent), doc.describe(*child))
        }
        Mutation::Removed { element } => format!("{} removed", doc.describe(*element)),
        Mutation::ScrollRequested { top, behavior } => {
            let behavior = match behavior {
                ScrollBehavior::Smooth => "smooth",
                ScrollBehavior::Instant => "instant",
            };
            format!("scroll request {} ({})", top, behavior)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::Fixture;
    use vitrine_platform::MemoryStore;

    fn simulate(source: &str, until: Option<Millis>) -> Simulation {
        let page = Fixture::parse(source).unwrap().build().unwrap();
        run(page, MemoryStore::new(), VitrineConfig::default(), until)
    }

    fn lines(sim: &Simulation) -> Vec<String> {
        sim.trace.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn test_loader_timeline_is_traced() {
        let sim = simulate(
            r#"
            [viewport]
            width = 600

            [[event]]
            at = 200
            kind = "loaded"
            "#,
            None,
        );
        assert_eq!(sim.widgets, vec!["theme", "loader"]);
        assert_eq!(sim.ended_at, 10_200);

        let lines = lines(&sim);
        assert!(lines.iter().any(|l| l == "[    200ms] > loaded"));
        assert!(lines
            .iter()
            .any(|l| l == "[   1200ms]   div#loading-screen style opacity: 0"));
        assert!(lines
            .iter()
            .any(|l| l.starts_with("[   1700ms]") && l.ends_with("removed")));
    }

    #[test]
    fn test_until_cuts_the_script() {
        let sim = simulate(
            r#"
            [viewport]
            width = 600

            [[event]]
            at = 100
            kind = "loaded"

            [[event]]
            at = 5000
            kind = "frame"
            "#,
            Some(1200),
        );
        assert_eq!(sim.ended_at, 1200);
        assert!(!lines(&sim).iter().any(|l| l.contains("> frame")));
    }

    #[test]
    fn test_frames_report_particles() {
        let sim = simulate(
            r#"
            [[event]]
            at = 16
            kind = "frame"
            "#,
            Some(100),
        );
        assert!(lines(&sim)
            .iter()
            .any(|l| l == "[     16ms]   frame: 50 particles drawn"));
    }

    #[test]
    fn test_describe_scroll_request() {
        let doc = MemoryDocument::new();
        let line = describe_mutation(
            &doc,
            &Mutation::ScrollRequested {
                top: 820.0,
                behavior: ScrollBehavior::Smooth,
            },
        );
        assert_eq!(line, "scroll request 820 (smooth)");
    }
}
