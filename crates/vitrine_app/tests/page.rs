//! End-to-end behavior of a full page

use vitrine_app::prelude::*;
use vitrine_platform::{ElementId, MemoryDocument, MemoryStore, Rect, ScrollBehavior};

struct Page {
    doc: MemoryDocument,
    toggle: ElementId,
    hamburger: ElementId,
    menu: ElementId,
    services_link: ElementId,
    service_card: ElementId,
    stat: ElementId,
    main_statement: ElementId,
    mini_cards: Vec<ElementId>,
    cards: Vec<ElementId>,
    indicators: Vec<ElementId>,
    container: ElementId,
    typewriter: ElementId,
}

fn page() -> Page {
    let mut doc = MemoryDocument::new();

    let navbar = doc.element("nav").class("navbar").build();
    let toggle = doc.element("button").id("themeToggle").child_of(navbar).build();
    doc.element("i")
        .id("themeIcon")
        .class("fas fa-moon")
        .child_of(toggle)
        .build();
    let hamburger = doc.element("div").class("hamburger").child_of(navbar).build();
    for _ in 0..3 {
        doc.element("span").class("bar").child_of(hamburger).build();
    }
    let menu = doc.element("ul").class("nav-menu").child_of(navbar).build();
    let services_link = doc
        .element("a")
        .class("nav-link")
        .attr("href", "#services")
        .child_of(menu)
        .build();

    let services = doc
        .element("section")
        .id("services")
        .bounds(Rect::new(0.0, 900.0, 1280.0, 700.0))
        .build();
    let service_card = doc
        .element("div")
        .class("service-card")
        .child_of(services)
        .bounds(Rect::new(0.0, 1000.0, 400.0, 300.0))
        .build();
    let stat = doc
        .element("div")
        .class("stat-number")
        .text("250+")
        .child_of(services)
        .bounds(Rect::new(0.0, 1400.0, 200.0, 60.0))
        .build();

    let intelligence = doc
        .element("section")
        .class("o-intelligence-animated")
        .bounds(Rect::new(0.0, 2000.0, 1280.0, 1000.0))
        .build();
    let main_statement = doc
        .element("h2")
        .class("main-statement")
        .child_of(intelligence)
        .build();
    doc.element("div").class("stage-1").child_of(intelligence).build();
    let stage3 = doc.element("div").class("stage-3").child_of(intelligence).build();
    let mini_cards = ["0", "0.3"]
        .iter()
        .map(|delay| {
            doc.element("div")
                .class("feature-card-mini")
                .attr("data-delay", delay)
                .attr("data-feature", "insights")
                .child_of(stage3)
                .build()
        })
        .collect();

    let pov = doc
        .element("section")
        .class("pov-cards-section")
        .bounds(Rect::new(0.0, 3200.0, 1280.0, 800.0))
        .build();
    let container = doc
        .element("div")
        .class("flip-cards-container")
        .child_of(pov)
        .build();
    let cards = (0..3)
        .map(|_| doc.element("div").class("flip-card").child_of(container).build())
        .collect();
    let indicators = (0..3)
        .map(|_| doc.element("span").class("indicator").child_of(pov).build())
        .collect();

    let typewriter = doc
        .element("p")
        .class("typewriter-text")
        .attr("data-text", "We build")
        .bounds(Rect::new(0.0, 4200.0, 800.0, 40.0))
        .build();

    Page {
        doc,
        toggle,
        hamburger,
        menu,
        services_link,
        service_card,
        stat,
        main_statement,
        mini_cards,
        cards,
        indicators,
        container,
        typewriter,
    }
}

fn viewport(scroll: f32) -> Viewport {
    Viewport::new(1280.0, 800.0).with_scroll(scroll)
}

fn mounted(mut page: Page) -> (VitrineApp<MemoryDocument, MemoryStore>, Page) {
    let doc = std::mem::take(&mut page.doc);
    let mut app = VitrineApp::new(doc, MemoryStore::new(), VitrineConfig::default());
    app.mount(viewport(0.0));
    (app, page)
}

#[test]
fn test_all_widgets_mount() {
    let (app, _) = mounted(page());
    let names = app.widget_names();
    for expected in [
        "theme",
        "nav",
        "smooth-scroll",
        "reveal",
        "counter",
        "loader",
        "particles",
        "feature-cards",
        "sequencer",
        "carousel",
        "typewriter",
    ] {
        assert!(names.contains(&expected), "missing {expected} in {names:?}");
    }
    assert!(!names.contains(&"title"));
}

#[test]
fn test_theme_toggle_persists_across_page_views() {
    let (mut app, p) = mounted(page());
    app.dispatch(&HostEvent::Click(p.toggle));
    let (_, store) = app.into_parts();
    assert_eq!(store.get("theme").as_deref(), Some("light"));

    // Next page view reads the stored preference
    let mut next = VitrineApp::new(page().doc, store, VitrineConfig::default());
    next.mount(viewport(0.0));
    let root = next.doc().root();
    assert_eq!(next.doc().attribute(root, "data-theme").as_deref(), Some("light"));
}

#[test]
fn test_menu_and_anchor_navigation() {
    let (mut app, p) = mounted(page());

    app.dispatch(&HostEvent::Click(p.hamburger));
    assert!(app.doc().has_class(p.menu, "active"));

    app.dispatch(&HostEvent::Click(p.services_link));
    assert!(!app.doc().has_class(p.menu, "active"));
    assert_eq!(
        app.doc().scroll_requests().last(),
        Some(&(820.0, ScrollBehavior::Smooth))
    );
}

#[test]
fn test_scrolling_reveals_and_counts() {
    let (mut app, p) = mounted(page());
    app.dispatch(&HostEvent::Loaded(viewport(0.0)));
    assert!(app.doc().has_class(p.service_card, "animate-on-scroll"));
    assert!(!app.doc().has_class(p.service_card, "animate-in"));

    app.dispatch_at(100, &HostEvent::Scroll(viewport(800.0)));
    assert!(app.doc().has_class(p.service_card, "animate-in"));

    app.advance_to(100 + 50 * 30);
    assert_eq!(app.doc().text(p.stat), "250+");
}

#[test]
fn test_sequencer_runs_once_on_scroll() {
    let (mut app, p) = mounted(page());
    app.dispatch(&HostEvent::Loaded(viewport(0.0)));

    // Section at 2000..3000, root shrunk to 700px: 30% needs scroll >= 1600
    app.dispatch_at(1000, &HostEvent::Scroll(viewport(1600.0)));
    assert!(app.doc().has_class(p.main_statement, "animate"));
    assert!(!app.doc().has_class(p.main_statement, "crush-text"));

    app.advance_to(3000);
    assert!(app.doc().has_class(p.main_statement, "crush-text"));
    assert!(!app.doc().has_class(p.mini_cards[0], "animate"));

    app.advance_to(3200);
    assert!(app.doc().has_class(p.mini_cards[0], "animate"));

    app.advance_to(3499);
    assert!(!app.doc().has_class(p.mini_cards[1], "animate"));
    app.advance_to(3500);
    assert!(app.doc().has_class(p.mini_cards[1], "animate"));

    app.doc_mut().take_mutations();
    app.dispatch_at(5000, &HostEvent::Scroll(viewport(0.0)));
    app.dispatch_at(5100, &HostEvent::Scroll(viewport(1600.0)));
    app.advance_to(10_000);
    assert!(!app
        .doc()
        .mutations()
        .iter()
        .any(|m| matches!(m, vitrine_platform::Mutation::ClassAdded { element, class }
            if *element == p.main_statement && class == "animate")));
}

#[test]
fn test_carousel_pauses_off_screen_and_on_hover() {
    let (mut app, p) = mounted(page());

    // Off screen at load: paused immediately
    app.dispatch(&HostEvent::Loaded(viewport(0.0)));
    app.advance_to(20_000);
    assert!(app.doc().has_class(p.cards[0], "active"));
    assert!(app.doc().has_class(p.cards[0], "content-stage"));

    // Scrolled into view: cycle restarts from the content stage
    app.dispatch(&HostEvent::Scroll(viewport(3000.0)));
    app.advance_to(26_800);
    assert!(app.doc().has_class(p.cards[1], "active"));
    assert!(app.doc().has_class(p.cards[1], "content-stage"));
    assert!(app.doc().has_class(p.indicators[1], "active"));

    // Hover holds the card
    app.dispatch(&HostEvent::PointerEnter(p.container));
    app.advance_to(40_000);
    assert!(app.doc().has_class(p.cards[1], "active"));

    // Manual selection still works while hovered
    app.dispatch(&HostEvent::Click(p.indicators[0]));
    app.advance_to(40_800);
    assert!(app.doc().has_class(p.cards[0], "active"));
    assert!(!app.doc().has_class(p.cards[1], "active"));
}

#[test]
fn test_typewriter_and_feature_card_press() {
    let (mut app, p) = mounted(page());
    app.dispatch(&HostEvent::Loaded(viewport(0.0)));

    app.dispatch_at(200, &HostEvent::Scroll(viewport(3800.0)));
    app.advance_to(200 + 500 + 7 * 30);
    assert_eq!(app.doc().text(p.typewriter), "We\u{a0}build");

    app.advance_to(5000);
    assert!(app.doc().has_class(p.typewriter, "typing-complete"));

    app.dispatch(&HostEvent::Click(p.mini_cards[0]));
    assert_eq!(
        app.doc().style(p.mini_cards[0], "transform").as_deref(),
        Some("translateY(-4px) scale(0.98)")
    );
    app.advance_to(5150);
    assert_eq!(app.doc().style(p.mini_cards[0], "transform"), None);
}

#[test]
fn test_loader_removed_after_load() {
    let (mut app, _) = mounted(page());
    assert!(app.doc().query("#loading-screen").is_some());

    app.dispatch_at(300, &HostEvent::Loaded(viewport(0.0)));
    app.advance_to(1300);
    let loader = app.doc().query("#loading-screen").unwrap();
    assert_eq!(app.doc().style(loader, "opacity").as_deref(), Some("0"));

    app.advance_to(1800);
    assert!(app.doc().query("#loading-screen").is_none());
}
