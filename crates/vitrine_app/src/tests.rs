//! Runtime tests for vitrine_app

use crate::prelude::*;
use vitrine_platform::{DrawCommand, MemoryDocument, MemoryStore, RecordingCanvas};

fn bare_app(config: VitrineConfig) -> VitrineApp<MemoryDocument, MemoryStore> {
    VitrineApp::new(MemoryDocument::new(), MemoryStore::new(), config)
}

#[test]
fn test_empty_page_mounts_only_host_widgets() {
    let mut app = bare_app(VitrineConfig::default());
    app.mount(Viewport::new(1280.0, 800.0));

    assert_eq!(app.widget_names(), vec!["theme", "loader", "particles"]);
    assert!(app.doc().query("style").is_some());
    assert_eq!(
        app.doc().attribute(app.doc().root(), "data-theme").as_deref(),
        Some("dark")
    );
}

#[test]
fn test_narrow_viewport_skips_particles() {
    let mut app = bare_app(VitrineConfig::default());
    app.mount(Viewport::new(600.0, 900.0));

    assert!(!app.widget_names().contains(&"particles"));
    assert!(app.doc().query("canvas").is_none());
}

#[test]
fn test_mount_twice_is_noop() {
    let mut app = bare_app(VitrineConfig::default());
    app.mount(Viewport::new(600.0, 900.0));
    let count = app.widget_names().len();
    let elements = app.doc().len();

    app.mount(Viewport::new(600.0, 900.0));
    assert_eq!(app.widget_names().len(), count);
    assert_eq!(app.doc().len(), elements);
}

#[test]
fn test_styles_can_be_disabled() {
    let config = VitrineConfig {
        inject_styles: false,
        ..Default::default()
    };
    let mut app = bare_app(config);
    app.mount(Viewport::new(600.0, 900.0));
    assert!(app.doc().query("style").is_none());
}

#[test]
fn test_clock_and_deadlines() {
    let mut app = bare_app(VitrineConfig::default());
    app.mount(Viewport::new(600.0, 900.0));
    assert_eq!(app.next_deadline(), None);

    app.dispatch_at(250, &HostEvent::Loaded(Viewport::new(600.0, 900.0)));
    assert_eq!(app.next_deadline(), Some(1250));

    app.run_until_idle(10_000);
    assert_eq!(app.now(), 1750);
    assert_eq!(app.next_deadline(), None);

    // Never backwards
    app.advance_to(100);
    assert_eq!(app.now(), 1750);
}

#[test]
fn test_draws_particles_each_frame() {
    let config = VitrineConfig {
        particles: vitrine_widgets::ParticleConfig {
            count: 12,
            seed: Some(3),
            ..Default::default()
        },
        ..Default::default()
    };
    let mut app = bare_app(config);
    app.mount(Viewport::new(1280.0, 800.0));

    let mut canvas = RecordingCanvas::new();
    app.draw(&mut canvas);
    app.dispatch(&HostEvent::Frame);
    app.draw(&mut canvas);

    assert_eq!(canvas.circles_since_clear(), 12);
    let clears = canvas
        .commands()
        .iter()
        .filter(|c| matches!(c, DrawCommand::Clear))
        .count();
    assert_eq!(clears, 2);
}

#[test]
fn test_viewport_tracks_window_events() {
    let mut app = bare_app(VitrineConfig::default());
    app.mount(Viewport::new(600.0, 900.0));
    app.dispatch(&HostEvent::Scroll(Viewport::new(600.0, 900.0).with_scroll(320.0)));
    assert_eq!(app.viewport().scroll_y, 320.0);
}

#[test]
fn test_mount_after_clock_started() {
    let mut doc = MemoryDocument::new();
    let section = doc.element("section").class("pov-cards-section").build();
    let container = doc
        .element("div")
        .class("flip-cards-container")
        .child_of(section)
        .build();
    let cards: Vec<_> = (0..2)
        .map(|_| doc.element("div").class("flip-card").child_of(container).build())
        .collect();
    let mut app = VitrineApp::new(doc, MemoryStore::new(), VitrineConfig::default());

    app.advance_to(10_000);
    app.mount(Viewport::new(600.0, 900.0));
    assert_eq!(app.next_deadline(), Some(13_000));

    // Nothing scheduled at mount is stale
    app.advance_to(10_001);
    assert!(app.doc().has_class(cards[0], "active"));
    assert!(app.doc().has_class(cards[0], "content-stage"));
    assert!(!app.doc().has_class(cards[0], "image-stage"));

    app.advance_to(13_000);
    assert!(app.doc().has_class(cards[0], "image-stage"));

    app.advance_to(16_800);
    assert!(app.doc().has_class(cards[1], "active"));
    assert!(app.doc().has_class(cards[1], "content-stage"));

    // Event-driven delays run from the host clock too
    app.dispatch(&HostEvent::Loaded(Viewport::new(600.0, 900.0)));
    assert_eq!(app.next_deadline(), Some(17_800));
}
