//! Vitrine Platform Abstraction Layer
//!
//! Host-facing traits and types shared by every Vitrine widget.
//!
//! # Architecture
//!
//! - [`Document`] - the page as a tree of classed elements
//! - [`IntersectionObserver`] - visibility tracking against a [`Viewport`]
//! - [`KeyValueStore`] - persisted preferences
//! - [`Canvas`] - 2D surface for the particle background
//! - [`HostEvent`] - input and window events forwarded by the host
//!
//! # Implementations
//!
//! - [`MemoryDocument`], [`MemoryStore`], [`RecordingCanvas`] - headless,
//!   used by tests and the `vitrine` simulator
//! - [`JsonFileStore`] - preferences persisted to a JSON file

mod canvas;
mod color;
mod document;
mod error;
mod event;
mod geometry;
mod memory;
mod observer;
mod selector;
mod storage;

pub use canvas::{Canvas, DrawCommand, RecordingCanvas};
pub use color::Color;
pub use document::{Document, ElementId, ScrollBehavior};
pub use error::{PlatformError, Result};
pub use event::HostEvent;
pub use geometry::{Margin, Point, Rect, Viewport};
pub use memory::{ElementBuilder, MemoryDocument, Mutation};
pub use observer::{IntersectionEntry, IntersectionObserver, ObserverOptions};
pub use selector::{AttributeMatch, CompoundSelector, Matchable, Selector};
pub use storage::{JsonFileStore, KeyValueStore, MemoryStore};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::canvas::Canvas;
    pub use crate::document::{Document, ElementId, ScrollBehavior};
    pub use crate::error::{PlatformError, Result};
    pub use crate::event::HostEvent;
    pub use crate::geometry::{Margin, Point, Rect, Viewport};
    pub use crate::observer::{IntersectionEntry, IntersectionObserver, ObserverOptions};
    pub use crate::storage::KeyValueStore;
}
