//! In-memory document
//!
//! A small element tree implementing [`Document`]. It backs the test suites
//! and the CLI simulator, and records every mutation in a journal so callers
//! can replay what the widgets did to the page.

use crate::document::{Document, ElementId, ScrollBehavior};
use crate::geometry::Rect;
use crate::selector::{Matchable, Selector};
use rustc_hash::FxHashMap;
use slotmap::SlotMap;
use smallvec::SmallVec;

/// A recorded change to the document
#[derive(Clone, Debug, PartialEq)]
pub enum Mutation {
    ClassAdded { element: ElementId, class: String },
    ClassRemoved { element: ElementId, class: String },
    AttributeSet { element: ElementId, name: String, value: String },
    AttributeRemoved { element: ElementId, name: String },
    TextSet { element: ElementId, text: String },
    StyleSet { element: ElementId, property: String, value: String },
    Appended { parent: ElementId, child: ElementId },
    Removed { element: ElementId },
    ScrollRequested { top: f32, behavior: ScrollBehavior },
}

#[derive(Clone, Debug, Default)]
struct Node {
    tag: String,
    classes: SmallVec<[String; 4]>,
    attributes: FxHashMap<String, String>,
    styles: FxHashMap<String, String>,
    text: String,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    bounds: Option<Rect>,
}

impl Matchable for Node {
    fn tag(&self) -> &str {
        &self.tag
    }

    fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

/// Element tree living entirely in memory
pub struct MemoryDocument {
    nodes: SlotMap<ElementId, Node>,
    root: ElementId,
    body: ElementId,
    journal: Vec<Mutation>,
    scroll_requests: Vec<(f32, ScrollBehavior)>,
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDocument {
    /// Create a document containing `<html>` and `<body>`
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(Node {
            tag: "html".into(),
            ..Default::default()
        });
        let body = nodes.insert(Node {
            tag: "body".into(),
            parent: Some(root),
            ..Default::default()
        });
        nodes[root].children.push(body);

        Self {
            nodes,
            root,
            body,
            journal: Vec::new(),
            scroll_requests: Vec::new(),
        }
    }

    /// Start building an element; it is appended to `<body>` unless a parent is given
    pub fn element(&mut self, tag: &str) -> ElementBuilder<'_> {
        ElementBuilder {
            doc: self,
            node: Node {
                tag: tag.to_string(),
                ..Default::default()
            },
            parent: None,
        }
    }

    pub fn set_bounds(&mut self, element: ElementId, bounds: Rect) {
        if let Some(node) = self.nodes.get_mut(element) {
            node.bounds = Some(bounds);
        }
    }

    pub fn tag(&self, element: ElementId) -> Option<&str> {
        self.nodes.get(element).map(|n| n.tag.as_str())
    }

    pub fn classes(&self, element: ElementId) -> Vec<String> {
        self.nodes
            .get(element)
            .map(|n| n.classes.to_vec())
            .unwrap_or_default()
    }

    pub fn children(&self, element: ElementId) -> Vec<ElementId> {
        self.nodes
            .get(element)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    /// Short human readable label such as `div#hero.flip-card.active`
    pub fn describe(&self, element: ElementId) -> String {
        let Some(node) = self.nodes.get(element) else {
            return "<removed>".to_string();
        };
        let mut label = node.tag.clone();
        if let Some(id) = node.attributes.get("id") {
            label.push('#');
            label.push_str(id);
        }
        for class in &node.classes {
            label.push('.');
            label.push_str(class);
        }
        label
    }

    /// Mutations recorded so far
    pub fn mutations(&self) -> &[Mutation] {
        &self.journal
    }

    /// Drain the mutation journal
    pub fn take_mutations(&mut self) -> Vec<Mutation> {
        std::mem::take(&mut self.journal)
    }

    /// Scroll requests issued by widgets, oldest first
    pub fn scroll_requests(&self) -> &[(f32, ScrollBehavior)] {
        &self.scroll_requests
    }

    /// Number of live elements, including detached ones
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn is_attached(&self, element: ElementId) -> bool {
        let mut current = Some(element);
        while let Some(el) = current {
            if el == self.root {
                return true;
            }
            current = self.nodes.get(el).and_then(|n| n.parent);
        }
        false
    }

    fn descendants(&self, scope: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut stack: Vec<ElementId> = match self.nodes.get(scope) {
            Some(node) => node.children.iter().rev().copied().collect(),
            None => return out,
        };
        while let Some(el) = stack.pop() {
            out.push(el);
            if let Some(node) = self.nodes.get(el) {
                stack.extend(node.children.iter().rev().copied());
            }
        }
        out
    }

    fn select(&self, scope: ElementId, selector: &str) -> Vec<ElementId> {
        let selector = match Selector::parse(selector) {
            Ok(s) => s,
            Err(e) => {
                tracing::warn!("{}", e);
                return Vec::new();
            }
        };
        self.descendants(scope)
            .into_iter()
            .filter(|el| selector.matches(&self.nodes[*el]))
            .collect()
    }

    fn detach(&mut self, element: ElementId) {
        if let Some(parent) = self.nodes.get(element).and_then(|n| n.parent) {
            if let Some(parent_node) = self.nodes.get_mut(parent) {
                parent_node.children.retain(|c| *c != element);
            }
        }
        if let Some(node) = self.nodes.get_mut(element) {
            node.parent = None;
        }
    }

    fn drop_subtree(&mut self, element: ElementId) {
        let mut stack = vec![element];
        while let Some(el) = stack.pop() {
            if let Some(node) = self.nodes.remove(el) {
                stack.extend(node.children);
            }
        }
    }

    fn text_into(&self, element: ElementId, out: &mut String) {
        if let Some(node) = self.nodes.get(element) {
            out.push_str(&node.text);
            for child in &node.children {
                self.text_into(*child, out);
            }
        }
    }
}

impl Document for MemoryDocument {
    fn root(&self) -> ElementId {
        self.root
    }

    fn body(&self) -> ElementId {
        self.body
    }

    fn query_all(&self, selector: &str) -> Vec<ElementId> {
        self.select(self.root, selector)
    }

    fn query_within(&self, scope: ElementId, selector: &str) -> Vec<ElementId> {
        self.select(scope, selector)
    }

    fn contains(&self, element: ElementId) -> bool {
        self.nodes.contains_key(element) && self.is_attached(element)
    }

    fn parent(&self, element: ElementId) -> Option<ElementId> {
        self.nodes.get(element).and_then(|n| n.parent)
    }

    fn has_class(&self, element: ElementId, class: &str) -> bool {
        self.nodes
            .get(element)
            .map_or(false, |n| Matchable::has_class(n, class))
    }

    fn add_class(&mut self, element: ElementId, class: &str) {
        let Some(node) = self.nodes.get_mut(element) else {
            return;
        };
        if node.classes.iter().any(|c| c == class) {
            return;
        }
        node.classes.push(class.to_string());
        self.journal.push(Mutation::ClassAdded {
            element,
            class: class.to_string(),
        });
    }

    fn remove_class(&mut self, element: ElementId, class: &str) {
        let Some(node) = self.nodes.get_mut(element) else {
            return;
        };
        let before = node.classes.len();
        node.classes.retain(|c| c != class);
        if node.classes.len() != before {
            self.journal.push(Mutation::ClassRemoved {
                element,
                class: class.to_string(),
            });
        }
    }

    fn set_class_name(&mut self, element: ElementId, class_name: &str) {
        let current = self.classes(element);
        for class in current {
            self.remove_class(element, &class);
        }
        for class in class_name.split_whitespace() {
            self.add_class(element, class);
        }
    }

    fn attribute(&self, element: ElementId, name: &str) -> Option<String> {
        self.nodes
            .get(element)
            .and_then(|n| n.attributes.get(name).cloned())
    }

    fn set_attribute(&mut self, element: ElementId, name: &str, value: &str) {
        let Some(node) = self.nodes.get_mut(element) else {
            return;
        };
        node.attributes.insert(name.to_string(), value.to_string());
        self.journal.push(Mutation::AttributeSet {
            element,
            name: name.to_string(),
            value: value.to_string(),
        });
    }

    fn remove_attribute(&mut self, element: ElementId, name: &str) {
        let Some(node) = self.nodes.get_mut(element) else {
            return;
        };
        if node.attributes.remove(name).is_some() {
            self.journal.push(Mutation::AttributeRemoved {
                element,
                name: name.to_string(),
            });
        }
    }

    fn text(&self, element: ElementId) -> String {
        let mut out = String::new();
        self.text_into(element, &mut out);
        out
    }

    fn set_text(&mut self, element: ElementId, text: &str) {
        let children = match self.nodes.get_mut(element) {
            Some(node) => {
                node.text = text.to_string();
                std::mem::take(&mut node.children)
            }
            None => return,
        };
        for child in children {
            self.drop_subtree(child);
        }
        self.journal.push(Mutation::TextSet {
            element,
            text: text.to_string(),
        });
    }

    fn style(&self, element: ElementId, property: &str) -> Option<String> {
        self.nodes
            .get(element)
            .and_then(|n| n.styles.get(property).cloned())
    }

    fn set_style(&mut self, element: ElementId, property: &str, value: &str) {
        let Some(node) = self.nodes.get_mut(element) else {
            return;
        };
        if value.is_empty() {
            node.styles.remove(property);
        } else {
            node.styles.insert(property.to_string(), value.to_string());
        }
        self.journal.push(Mutation::StyleSet {
            element,
            property: property.to_string(),
            value: value.to_string(),
        });
    }

    fn create_element(&mut self, tag: &str) -> ElementId {
        self.nodes.insert(Node {
            tag: tag.to_string(),
            ..Default::default()
        })
    }

    fn append_child(&mut self, parent: ElementId, child: ElementId) {
        if !self.nodes.contains_key(parent) || !self.nodes.contains_key(child) {
            return;
        }
        // Refuse to create cycles
        if self.is_within(parent, child) {
            return;
        }
        self.detach(child);
        self.nodes[child].parent = Some(parent);
        self.nodes[parent].children.push(child);
        self.journal.push(Mutation::Appended { parent, child });
    }

    fn remove(&mut self, element: ElementId) {
        if element == self.root || element == self.body || !self.nodes.contains_key(element) {
            return;
        }
        self.detach(element);
        self.drop_subtree(element);
        self.journal.push(Mutation::Removed { element });
    }

    fn bounds(&self, element: ElementId) -> Option<Rect> {
        self.nodes.get(element).and_then(|n| n.bounds)
    }

    fn reset_form(&mut self, form: ElementId) {
        let controls: Vec<ElementId> = self
            .descendants(form)
            .into_iter()
            .filter(|el| {
                matches!(
                    self.nodes[*el].tag.as_str(),
                    "input" | "textarea" | "select"
                )
            })
            .collect();
        for control in controls {
            self.remove_attribute(control, "value");
        }
    }

    fn scroll_to(&mut self, top: f32, behavior: ScrollBehavior) {
        self.scroll_requests.push((top, behavior));
        self.journal
            .push(Mutation::ScrollRequested { top, behavior });
    }
}

/// Builder returned by [`MemoryDocument::element`]
///
/// Building is not journaled; it describes the initial markup.
pub struct ElementBuilder<'a> {
    doc: &'a mut MemoryDocument,
    node: Node,
    parent: Option<ElementId>,
}

impl ElementBuilder<'_> {
    pub fn id(mut self, id: &str) -> Self {
        self.node.attributes.insert("id".into(), id.to_string());
        self
    }

    pub fn class(mut self, class: &str) -> Self {
        for c in class.split_whitespace() {
            if !self.node.classes.iter().any(|existing| existing == c) {
                self.node.classes.push(c.to_string());
            }
        }
        self
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.node
            .attributes
            .insert(name.to_string(), value.to_string());
        self
    }

    pub fn style(mut self, property: &str, value: &str) -> Self {
        self.node
            .styles
            .insert(property.to_string(), value.to_string());
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.node.text = text.to_string();
        self
    }

    pub fn bounds(mut self, bounds: Rect) -> Self {
        self.node.bounds = Some(bounds);
        self
    }

    pub fn child_of(mut self, parent: ElementId) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Insert the element and return its handle
    pub fn build(self) -> ElementId {
        let ElementBuilder {
            doc,
            mut node,
            parent,
        } = self;
        let parent = parent
            .filter(|p| doc.nodes.contains_key(*p))
            .unwrap_or(doc.body);
        node.parent = Some(parent);
        let id = doc.nodes.insert(node);
        doc.nodes[parent].children.push(id);
        id
    }
}
