//! Host events delivered to widgets

use crate::document::ElementId;
use crate::geometry::Viewport;

/// Events the host forwards to the widget runtime
#[derive(Clone, Debug, PartialEq)]
pub enum HostEvent {
    /// Primary click on an element (targets the innermost element)
    Click(ElementId),
    /// Pointer entered an element's box
    PointerEnter(ElementId),
    /// Pointer left an element's box
    PointerLeave(ElementId),
    /// A form was submitted
    Submit(ElementId),
    /// The window scrolled
    Scroll(Viewport),
    /// The window was resized
    Resize(Viewport),
    /// The page finished loading all resources
    Loaded(Viewport),
    /// Time to render a frame
    Frame,
}

impl HostEvent {
    /// The element this event targets, if any
    pub fn target(&self) -> Option<ElementId> {
        match self {
            HostEvent::Click(el)
            | HostEvent::PointerEnter(el)
            | HostEvent::PointerLeave(el)
            | HostEvent::Submit(el) => Some(*el),
            _ => None,
        }
    }

    /// The viewport carried by window-level events
    pub fn viewport(&self) -> Option<&Viewport> {
        match self {
            HostEvent::Scroll(vp) | HostEvent::Resize(vp) | HostEvent::Loaded(vp) => Some(vp),
            _ => None,
        }
    }
}
