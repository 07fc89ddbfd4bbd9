//! Page fixtures
//!
//! A fixture is a TOML file describing a page and a scripted session:
//!
//! ```toml
//! [viewport]
//! width = 1280
//! height = 800
//!
//! [[element]]
//! key = "pov"
//! tag = "section"
//! class = "pov-cards-section"
//! bounds = [0, 1200, 1280, 800]
//!
//! [[element]]
//! tag = "div"
//! class = "flip-card active"
//! parent = "pov"
//!
//! [[event]]
//! at = 0
//! kind = "loaded"
//!
//! [[event]]
//! at = 500
//! kind = "scroll"
//! scroll = 900
//! ```
//!
//! Event targets name an element `key`; anything else is treated as a
//! selector and resolved against the built page.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use vitrine_animation::Millis;
use vitrine_platform::{Document, ElementId, HostEvent, MemoryDocument, Rect, Viewport};

/// Parsed fixture file
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Fixture {
    #[serde(default)]
    pub viewport: ViewportDef,
    #[serde(default, rename = "element")]
    pub elements: Vec<ElementDef>,
    #[serde(default, rename = "event")]
    pub events: Vec<EventDef>,
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct ViewportDef {
    pub width: f32,
    pub height: f32,
    pub scroll: f32,
}

impl Default for ViewportDef {
    fn default() -> Self {
        let vp = Viewport::default();
        Self {
            width: vp.width,
            height: vp.height,
            scroll: vp.scroll_y,
        }
    }
}

impl From<ViewportDef> for Viewport {
    fn from(def: ViewportDef) -> Self {
        Viewport::new(def.width, def.height).with_scroll(def.scroll)
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ElementDef {
    /// Name used by `parent` and event targets
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default = "default_tag")]
    pub tag: String,
    #[serde(default)]
    pub id: Option<String>,
    /// Space separated class list
    #[serde(default)]
    pub class: Option<String>,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    #[serde(default)]
    pub style: BTreeMap<String, String>,
    #[serde(default)]
    pub text: Option<String>,
    /// Key of the parent element; body when absent
    #[serde(default)]
    pub parent: Option<String>,
    /// `[x, y, width, height]` in page coordinates
    #[serde(default)]
    pub bounds: Option<[f32; 4]>,
}

fn default_tag() -> String {
    "div".to_string()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventKind {
    Click,
    PointerEnter,
    PointerLeave,
    Submit,
    Scroll,
    Resize,
    Loaded,
    Frame,
}

impl EventKind {
    fn needs_target(&self) -> bool {
        matches!(
            self,
            EventKind::Click | EventKind::PointerEnter | EventKind::PointerLeave | EventKind::Submit
        )
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct EventDef {
    pub at: Millis,
    pub kind: EventKind,
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default)]
    pub scroll: Option<f32>,
    #[serde(default)]
    pub width: Option<f32>,
    #[serde(default)]
    pub height: Option<f32>,
}

/// An event ready to dispatch
#[derive(Clone, Debug, PartialEq)]
pub struct ScriptedEvent {
    pub at: Millis,
    pub event: HostEvent,
}

/// A fixture turned into a live document plus its event script
pub struct Page {
    pub doc: MemoryDocument,
    pub viewport: Viewport,
    pub keys: BTreeMap<String, ElementId>,
    pub script: Vec<ScriptedEvent>,
}

impl Fixture {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read fixture {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Invalid fixture {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Build the document and resolve the event script
    ///
    /// Elements are created in file order, so a parent must appear before
    /// its children. Events are sorted by time; ties keep file order.
    pub fn build(&self) -> Result<Page> {
        let mut doc = MemoryDocument::new();
        let mut keys = BTreeMap::new();

        for (index, def) in self.elements.iter().enumerate() {
            let parent = match &def.parent {
                Some(parent) => Some(*keys.get(parent).with_context(|| {
                    format!(
                        "element #{} ({}): unknown parent `{}`",
                        index + 1,
                        def.tag,
                        parent
                    )
                })?),
                None => None,
            };

            let mut builder = doc.element(&def.tag);
            if let Some(id) = &def.id {
                builder = builder.id(id);
            }
            if let Some(class) = &def.class {
                builder = builder.class(class);
            }
            for (name, value) in &def.attributes {
                builder = builder.attr(name, value);
            }
            for (property, value) in &def.style {
                builder = builder.style(property, value);
            }
            if let Some(text) = &def.text {
                builder = builder.text(text);
            }
            if let Some([x, y, width, height]) = def.bounds {
                builder = builder.bounds(Rect::new(x, y, width, height));
            }
            if let Some(parent) = parent {
                builder = builder.child_of(parent);
            }
            let element = builder.build();

            if let Some(key) = &def.key {
                if keys.insert(key.clone(), element).is_some() {
                    bail!("element #{}: duplicate key `{}`", index + 1, key);
                }
            }
        }

        let mut viewport: Viewport = self.viewport.into();
        let initial = viewport;
        let mut script = Vec::with_capacity(self.events.len());
        let mut events: Vec<&EventDef> = self.events.iter().collect();
        events.sort_by_key(|e| e.at);

        for def in events {
            if let Some(width) = def.width {
                viewport.width = width;
            }
            if let Some(height) = def.height {
                viewport.height = height;
            }
            if let Some(scroll) = def.scroll {
                viewport.scroll_y = scroll;
            }

            let target = if def.kind.needs_target() {
                let name = def.target.as_deref().with_context(|| {
                    format!("{:?} event at {}ms needs a target", def.kind, def.at)
                })?;
                Some(resolve_target(&doc, &keys, name).with_context(|| {
                    format!("{:?} event at {}ms", def.kind, def.at)
                })?)
            } else {
                None
            };

            let event = match (def.kind, target) {
                (EventKind::Click, Some(el)) => HostEvent::Click(el),
                (EventKind::PointerEnter, Some(el)) => HostEvent::PointerEnter(el),
                (EventKind::PointerLeave, Some(el)) => HostEvent::PointerLeave(el),
                (EventKind::Submit, Some(el)) => HostEvent::Submit(el),
                (EventKind::Scroll, _) => HostEvent::Scroll(viewport),
                (EventKind::Resize, _) => HostEvent::Resize(viewport),
                (EventKind::Loaded, _) => HostEvent::Loaded(viewport),
                (EventKind::Frame, _) => HostEvent::Frame,
                (kind, None) => bail!("{:?} event at {}ms has no target", kind, def.at),
            };
            script.push(ScriptedEvent { at: def.at, event });
        }

        Ok(Page {
            doc,
            viewport: initial,
            keys,
            script,
        })
    }
}

fn resolve_target(
    doc: &MemoryDocument,
    keys: &BTreeMap<String, ElementId>,
    name: &str,
) -> Result<ElementId> {
    if let Some(element) = keys.get(name) {
        return Ok(*element);
    }
    match doc.query(name) {
        Some(element) => Ok(element),
        None => bail!("target `{}` is neither an element key nor a matching selector", name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r##"
        [viewport]
        width = 1024
        height = 700

        [[element]]
        key = "nav"
        tag = "nav"
        class = "navbar"

        [[element]]
        key = "burger"
        class = "hamburger"
        parent = "nav"

        [[element]]
        tag = "section"
        id = "about"
        bounds = [0, 900, 1024, 600]

        [[event]]
        at = 300
        kind = "scroll"
        scroll = 450

        [[event]]
        at = 100
        kind = "click"
        target = "burger"

        [[event]]
        at = 600
        kind = "click"
        target = "#about"

        [[event]]
        at = 700
        kind = "resize"
        width = 1400
    "##;

    #[test]
    fn test_builds_tree_and_script() {
        let fixture = Fixture::parse(PAGE).unwrap();
        let page = fixture.build().unwrap();

        let burger = page.keys["burger"];
        assert_eq!(page.doc.parent(burger), Some(page.keys["nav"]));
        assert!(page.doc.has_class(burger, "hamburger"));
        assert_eq!(page.doc.tag(burger), Some("div"));
        assert_eq!(page.viewport, Viewport::new(1024.0, 700.0));

        let about = page.doc.query("#about").unwrap();
        let times: Vec<_> = page.script.iter().map(|e| e.at).collect();
        assert_eq!(times, vec![100, 300, 600, 700]);
        assert_eq!(page.script[0].event, HostEvent::Click(burger));
        assert_eq!(
            page.script[1].event,
            HostEvent::Scroll(Viewport::new(1024.0, 700.0).with_scroll(450.0))
        );
        assert_eq!(page.script[2].event, HostEvent::Click(about));
        // Viewport changes carry forward
        assert_eq!(
            page.script[3].event,
            HostEvent::Resize(Viewport::new(1400.0, 700.0).with_scroll(450.0))
        );
    }

    #[test]
    fn test_unknown_parent_is_an_error() {
        let fixture = Fixture::parse(
            r#"
            [[element]]
            parent = "nowhere"
            "#,
        )
        .unwrap();
        let err = fixture.build().err().unwrap();
        assert!(format!("{:#}", err).contains("unknown parent `nowhere`"));
    }

    #[test]
    fn test_missing_target_is_an_error() {
        let fixture = Fixture::parse(
            r#"
            [[event]]
            at = 0
            kind = "click"
            target = ".ghost"
            "#,
        )
        .unwrap();
        let err = fixture.build().err().unwrap();
        assert!(format!("{:#}", err).contains(".ghost"));

        let fixture = Fixture::parse(
            r#"
            [[event]]
            at = 0
            kind = "submit"
            "#,
        )
        .unwrap();
        assert!(fixture.build().is_err());
    }

    #[test]
    fn test_duplicate_key_is_an_error() {
        let fixture = Fixture::parse(
            r#"
            [[element]]
            key = "a"

            [[element]]
            key = "a"
            "#,
        )
        .unwrap();
        assert!(fixture.build().is_err());
    }

    #[test]
    fn test_unknown_event_kind_fails_to_parse() {
        assert!(Fixture::parse("[[event]]\nat = 0\nkind = \"hover\"\n").is_err());
    }
}
