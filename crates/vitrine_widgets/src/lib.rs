//! Vitrine Widget Library
//!
//! Page behaviors as explicit state machines over a host [`Document`].
//!
//! # Architecture
//!
//! Every widget is a controller that:
//!
//! 1. **Binds at mount**: queries the elements it needs once. A widget whose
//!    required elements are missing does not mount and stays inert.
//!
//! 2. **Owns its timers**: transitions are scheduled on a private
//!    [`TimerQueue`](vitrine_animation::TimerQueue) and retained by handle,
//!    so pausing or rescheduling cancels exactly what is pending.
//!
//! 3. **Is driven from outside**: the runtime forwards [`HostEvent`]s and
//!    advances the virtual clock. Nothing runs on its own, which keeps every
//!    transition callable and observable from tests.
//!
//! # Example
//!
//! ```
//! use vitrine_platform::{Document, MemoryDocument};
//! use vitrine_widgets::{CardCarousel, CarouselConfig};
//!
//! let mut doc = MemoryDocument::new();
//! let first = doc.element("div").class("flip-card").build();
//! let second = doc.element("div").class("flip-card").build();
//!
//! let mut carousel = CardCarousel::mount(&mut doc, CarouselConfig::default()).unwrap();
//! carousel.advance(&mut doc, 6800);
//!
//! assert!(!doc.has_class(first, "active"));
//! assert!(doc.has_class(second, "content-stage"));
//! ```
//!
//! [`Document`]: vitrine_platform::Document
//! [`HostEvent`]: vitrine_platform::HostEvent

pub mod carousel;
pub mod contact_form;
pub mod context;
pub mod counter;
pub mod feature_cards;
pub mod loading_screen;
pub mod nav;
pub mod parallax;
pub mod particles;
pub mod reveal;
pub mod sequencer;
pub mod smooth_scroll;
pub mod theme_toggle;
pub mod typewriter;
pub mod widget;

pub use carousel::{CardCarousel, CardPhase, CarouselConfig, CarouselStage, FlipDirection};
pub use contact_form::{ContactForm, ContactFormConfig};
pub use context::WidgetContext;
pub use counter::{CounterAnimation, CounterConfig};
pub use feature_cards::{FeatureCards, FeatureCardsConfig};
pub use loading_screen::{LoadingScreen, LoadingScreenConfig};
pub use nav::{NavConfig, NavigationMenu};
pub use parallax::{Parallax, ParallaxConfig};
pub use particles::{Particle, ParticleConfig, ParticleField};
pub use reveal::{RevealConfig, ScrollReveal};
pub use sequencer::{Mark, SequencerConfig, Stage, StageSequencer};
pub use smooth_scroll::{SmoothScrollConfig, SmoothScroller};
pub use theme_toggle::{ThemeToggle, ThemeToggleConfig};
pub use typewriter::{
    LetterTypewriter, LetterTypewriterConfig, TitleTypewriter, TitleTypewriterConfig,
};
pub use widget::Widget;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::carousel::{CardCarousel, CarouselConfig};
    pub use crate::context::WidgetContext;
    pub use crate::sequencer::{SequencerConfig, StageSequencer};
    pub use crate::widget::Widget;
}
