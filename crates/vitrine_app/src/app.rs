//! Page runtime
//!
//! Owns the host document and preference store, mounts every widget the
//! page supports and drives them with host events and a virtual clock.

use vitrine_animation::Millis;
use vitrine_platform::{Canvas, Document, HostEvent, KeyValueStore, Viewport};
use vitrine_widgets::{
    CardCarousel, ContactForm, CounterAnimation, FeatureCards, LetterTypewriter, LoadingScreen,
    NavigationMenu, Parallax, ParticleField, ScrollReveal, SmoothScroller, StageSequencer,
    ThemeToggle, TitleTypewriter, Widget, WidgetContext,
};

use crate::config::VitrineConfig;
use crate::styles;

/// The widget runtime for one page view
pub struct VitrineApp<D, S> {
    config: VitrineConfig,
    doc: D,
    store: S,
    widgets: Vec<Box<dyn Widget>>,
    viewport: Viewport,
    now: Millis,
    /// Clock reading at mount; widget timers count from here
    epoch: Millis,
    mounted: bool,
}

impl<D: Document, S: KeyValueStore> VitrineApp<D, S> {
    pub fn new(doc: D, store: S, config: VitrineConfig) -> Self {
        Self {
            config,
            doc,
            store,
            widgets: Vec::new(),
            viewport: Viewport::default(),
            now: 0,
            epoch: 0,
            mounted: false,
        }
    }

    /// Bind every widget to the document
    ///
    /// Widgets whose elements are missing are skipped. Mounting twice is a
    /// no-op. Delays scheduled at mount run from the current clock, not
    /// from zero.
    pub fn mount(&mut self, viewport: Viewport) {
        if self.mounted {
            return;
        }
        self.mounted = true;
        self.viewport = viewport;
        self.epoch = self.now;

        let config = &self.config;
        let tokens = &config.tokens;
        let doc: &mut dyn Document = &mut self.doc;
        let mut widgets: Vec<Box<dyn Widget>> = Vec::new();

        let theme = {
            let mut cx = WidgetContext::new(&mut *doc, &mut self.store);
            ThemeToggle::mount(&mut cx, config.theme.clone())
        };
        widgets.push(Box::new(theme));

        if let Some(nav) = NavigationMenu::mount(&*doc, config.nav.clone(), tokens.clone()) {
            widgets.push(Box::new(nav));
        }
        if let Some(scroller) = SmoothScroller::mount(&*doc, config.smooth_scroll.clone()) {
            widgets.push(Box::new(scroller));
        }
        if let Some(reveal) = ScrollReveal::mount(doc, config.reveal.clone()) {
            widgets.push(Box::new(reveal));
        }
        if let Some(parallax) = Parallax::mount(&*doc, config.parallax.clone()) {
            widgets.push(Box::new(parallax));
        }
        if let Some(form) = ContactForm::mount(&*doc, config.contact_form.clone()) {
            widgets.push(Box::new(form));
        }
        if let Some(counter) = CounterAnimation::mount(&*doc, config.counter.clone()) {
            widgets.push(Box::new(counter));
        }
        widgets.push(Box::new(LoadingScreen::mount(
            doc,
            config.loading_screen.clone(),
        )));
        if let Some(field) = ParticleField::mount(doc, &viewport, &config.particles, tokens.clone())
        {
            widgets.push(Box::new(field));
        }
        if config.hero_typing {
            if let Some(title) = TitleTypewriter::mount(doc, config.title.clone()) {
                widgets.push(Box::new(title));
            }
        }
        if config.inject_styles {
            styles::inject(doc);
        }

        if let Some(cards) =
            FeatureCards::mount(&*doc, config.feature_cards.clone(), tokens.clone())
        {
            widgets.push(Box::new(cards));
        }
        if let Some(sequencer) = StageSequencer::mount(&*doc, config.sequencer.clone()) {
            widgets.push(Box::new(sequencer));
        }
        if let Some(carousel) = CardCarousel::mount(doc, config.carousel.clone()) {
            widgets.push(Box::new(carousel));
        }
        if let Some(typewriter) = LetterTypewriter::mount(doc, config.typewriter.clone()) {
            widgets.push(Box::new(typewriter));
        }

        tracing::info!(
            "mounted {} widgets: {}",
            widgets.len(),
            widgets
                .iter()
                .map(|w| w.name())
                .collect::<Vec<_>>()
                .join(", ")
        );
        self.widgets = widgets;
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Names of the mounted widgets, in dispatch order
    pub fn widget_names(&self) -> Vec<&'static str> {
        self.widgets.iter().map(|w| w.name()).collect()
    }

    pub fn config(&self) -> &VitrineConfig {
        &self.config
    }

    pub fn now(&self) -> Millis {
        self.now
    }

    /// Last viewport reported by the host
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn doc(&self) -> &D {
        &self.doc
    }

    pub fn doc_mut(&mut self) -> &mut D {
        &mut self.doc
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_parts(self) -> (D, S) {
        (self.doc, self.store)
    }

    /// Move the clock forward, firing every timer due on the way
    ///
    /// The clock never moves backwards.
    pub fn advance_to(&mut self, now: Millis) {
        let now = now.max(self.now);
        let local = now - self.epoch;
        let mut cx = WidgetContext::new(&mut self.doc, &mut self.store);
        for widget in &mut self.widgets {
            widget.advance(&mut cx, local);
        }
        self.now = now;
    }

    /// Deliver a host event at the current time
    ///
    /// Timers that fall due immediately (zero delays) fire before this
    /// returns.
    pub fn dispatch(&mut self, event: &HostEvent) {
        if let Some(viewport) = event.viewport() {
            self.viewport = *viewport;
        }
        tracing::trace!("dispatch {:?} at {}", event, self.now);

        let local = self.now - self.epoch;
        let mut cx = WidgetContext::new(&mut self.doc, &mut self.store);
        for widget in &mut self.widgets {
            widget.handle_event(&mut cx, event);
            widget.advance(&mut cx, local);
        }
    }

    /// Advance to `at`, then deliver the event
    pub fn dispatch_at(&mut self, at: Millis, event: &HostEvent) {
        self.advance_to(at);
        self.dispatch(event);
    }

    /// Earliest pending timer across all widgets
    pub fn next_deadline(&self) -> Option<Millis> {
        self.widgets
            .iter()
            .filter_map(|w| w.next_deadline())
            .min()
            .map(|deadline| deadline + self.epoch)
    }

    /// Run until no timers remain or `limit` is reached
    pub fn run_until_idle(&mut self, limit: Millis) {
        while let Some(deadline) = self.next_deadline() {
            if deadline > limit {
                break;
            }
            self.advance_to(deadline);
        }
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        for widget in &self.widgets {
            widget.draw(canvas);
        }
    }
}
