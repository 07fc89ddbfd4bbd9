//! Vitrine Application Runtime
//!
//! Mounts the page widgets against a host document and drives them.
//!
//! # Example
//!
//! ```
//! use vitrine_app::prelude::*;
//! use vitrine_platform::{MemoryDocument, MemoryStore};
//!
//! let mut doc = MemoryDocument::new();
//! doc.element("button").id("themeToggle").build();
//!
//! let mut app = VitrineApp::new(doc, MemoryStore::new(), VitrineConfig::default());
//! app.mount(Viewport::new(1280.0, 800.0));
//! app.dispatch(&HostEvent::Loaded(Viewport::new(1280.0, 800.0)));
//! app.advance_to(2000);
//!
//! assert!(app.doc().query("#loading-screen").is_none());
//! ```

mod app;
mod config;
mod error;
pub mod styles;

#[cfg(test)]
mod tests;

pub use app::VitrineApp;
pub use config::VitrineConfig;
pub use error::{Result, VitrineError};

/// Prelude module - import everything commonly needed
pub mod prelude {
    pub use crate::app::VitrineApp;
    pub use crate::config::VitrineConfig;
    pub use crate::error::{Result, VitrineError};

    pub use vitrine_animation::Millis;
    pub use vitrine_platform::{Document, HostEvent, KeyValueStore, Viewport};
    pub use vitrine_widgets::Widget;
}
