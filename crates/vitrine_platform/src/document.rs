//! Host document contract
//!
//! Widgets never touch a concrete DOM. They address the page through the
//! [`Document`] trait, which a browser binding, the in-memory test document
//! or the CLI simulator implements. Every operation on an element that no
//! longer exists is a silent no-op so a widget can never fail because the
//! markup changed underneath it.

use crate::geometry::Rect;
use slotmap::new_key_type;

new_key_type! {
    /// Handle to an element in a host document
    pub struct ElementId;
}

/// How a scroll request should be animated by the host
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScrollBehavior {
    /// Jump immediately
    #[default]
    Instant,
    /// Let the host animate the scroll
    Smooth,
}

/// The page as seen by widgets
pub trait Document {
    /// The document element (`<html>`)
    fn root(&self) -> ElementId;

    /// The `<body>` element
    fn body(&self) -> ElementId;

    /// All attached elements matching `selector`, in document order
    ///
    /// An unparseable selector matches nothing.
    fn query_all(&self, selector: &str) -> Vec<ElementId>;

    /// Descendants of `scope` matching `selector`, in document order
    fn query_within(&self, scope: ElementId, selector: &str) -> Vec<ElementId>;

    /// First attached element matching `selector`
    fn query(&self, selector: &str) -> Option<ElementId> {
        self.query_all(selector).into_iter().next()
    }

    /// Whether the element still exists and is attached
    fn contains(&self, element: ElementId) -> bool;

    fn parent(&self, element: ElementId) -> Option<ElementId>;

    /// True if `element` is `ancestor` or one of its descendants
    fn is_within(&self, element: ElementId, ancestor: ElementId) -> bool {
        let mut current = Some(element);
        while let Some(el) = current {
            if el == ancestor {
                return true;
            }
            current = self.parent(el);
        }
        false
    }

    fn has_class(&self, element: ElementId, class: &str) -> bool;
    fn add_class(&mut self, element: ElementId, class: &str);
    fn remove_class(&mut self, element: ElementId, class: &str);

    /// Replace the whole class list with a space separated class name
    fn set_class_name(&mut self, element: ElementId, class_name: &str);

    /// Toggle a class, returning whether it is now present
    fn toggle_class(&mut self, element: ElementId, class: &str) -> bool {
        if self.has_class(element, class) {
            self.remove_class(element, class);
            false
        } else {
            self.add_class(element, class);
            true
        }
    }

    fn attribute(&self, element: ElementId, name: &str) -> Option<String>;
    fn set_attribute(&mut self, element: ElementId, name: &str, value: &str);
    fn remove_attribute(&mut self, element: ElementId, name: &str);

    /// Text content of the element and all of its descendants
    fn text(&self, element: ElementId) -> String;

    /// Replace all children with a single text value
    fn set_text(&mut self, element: ElementId, text: &str);

    fn style(&self, element: ElementId, property: &str) -> Option<String>;

    /// Set an inline style property; an empty value removes it
    fn set_style(&mut self, element: ElementId, property: &str, value: &str);

    /// Create a detached element
    fn create_element(&mut self, tag: &str) -> ElementId;

    fn append_child(&mut self, parent: ElementId, child: ElementId);

    /// Detach and drop an element together with its subtree
    fn remove(&mut self, element: ElementId);

    /// Layout box in page coordinates, if the element has been laid out
    fn bounds(&self, element: ElementId) -> Option<Rect>;

    /// Restore the form controls below `form` to their initial values
    fn reset_form(&mut self, form: ElementId);

    /// Ask the host to scroll the window
    fn scroll_to(&mut self, top: f32, behavior: ScrollBehavior);
}
