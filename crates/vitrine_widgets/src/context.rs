//! Widget context
//!
//! Borrowed view of the host collaborators handed to widgets for the
//! duration of one call.

use vitrine_platform::{Document, KeyValueStore};

pub struct WidgetContext<'a> {
    /// The page
    pub doc: &'a mut dyn Document,
    /// Persisted preferences
    pub store: &'a mut dyn KeyValueStore,
}

impl<'a> WidgetContext<'a> {
    pub fn new(doc: &'a mut dyn Document, store: &'a mut dyn KeyValueStore) -> Self {
        Self { doc, store }
    }
}
