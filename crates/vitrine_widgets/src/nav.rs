//! Navigation bar: mobile menu and scroll styling

use serde::{Deserialize, Serialize};
use vitrine_platform::{Document, ElementId, HostEvent, Viewport};
use vitrine_theme::BrandTokens;

use crate::context::WidgetContext;
use crate::widget::Widget;

/// Transforms applied to the three hamburger bars while the menu is open
const OPEN_BARS: [(&str, &str); 3] = [
    ("transform", "rotate(-45deg) translate(-5px, 6px)"),
    ("opacity", "0"),
    ("transform", "rotate(45deg) translate(-5px, -6px)"),
];

const CLOSED_BARS: [(&str, &str); 3] = [
    ("transform", "none"),
    ("opacity", "1"),
    ("transform", "none"),
];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    pub navbar_selector: String,
    pub hamburger_selector: String,
    pub menu_selector: String,
    pub link_selector: String,
    pub bar_selector: String,
    /// Widths above this close the mobile menu
    pub mobile_breakpoint: f32,
    /// Scroll offset past which the navbar turns opaque
    pub scroll_threshold: f32,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            navbar_selector: ".navbar".to_string(),
            hamburger_selector: ".hamburger".to_string(),
            menu_selector: ".nav-menu".to_string(),
            link_selector: ".nav-link".to_string(),
            bar_selector: ".bar".to_string(),
            mobile_breakpoint: 768.0,
            scroll_threshold: 50.0,
        }
    }
}

pub struct NavigationMenu {
    config: NavConfig,
    tokens: BrandTokens,
    navbar: Option<ElementId>,
    hamburger: ElementId,
    menu: Option<ElementId>,
    links: Vec<ElementId>,
    bars: Vec<ElementId>,
}

impl NavigationMenu {
    /// Returns `None` when the page has no hamburger button
    pub fn mount(doc: &dyn Document, config: NavConfig, tokens: BrandTokens) -> Option<Self> {
        let Some(hamburger) = doc.query(&config.hamburger_selector) else {
            tracing::debug!("nav: no `{}` element, inert", config.hamburger_selector);
            return None;
        };
        let bars = doc.query_within(hamburger, &config.bar_selector);

        Some(Self {
            navbar: doc.query(&config.navbar_selector),
            menu: doc.query(&config.menu_selector),
            links: doc.query_all(&config.link_selector),
            bars,
            hamburger,
            config,
            tokens,
        })
    }

    pub fn is_open(&self, doc: &dyn Document) -> bool {
        doc.has_class(self.hamburger, "active")
    }

    pub fn toggle(&self, doc: &mut dyn Document) {
        let open = doc.toggle_class(self.hamburger, "active");
        if let Some(menu) = self.menu {
            doc.toggle_class(menu, "active");
        }
        self.style_bars(doc, open);
        tracing::debug!("nav: menu {}", if open { "opened" } else { "closed" });
    }

    pub fn close(&self, doc: &mut dyn Document) {
        doc.remove_class(self.hamburger, "active");
        if let Some(menu) = self.menu {
            doc.remove_class(menu, "active");
        }
        self.style_bars(doc, false);
    }

    fn style_bars(&self, doc: &mut dyn Document, open: bool) {
        let styles = if open { &OPEN_BARS } else { &CLOSED_BARS };
        for (bar, (property, value)) in self.bars.iter().zip(styles.iter()) {
            doc.set_style(*bar, property, value);
        }
    }

    fn handle_scroll(&self, doc: &mut dyn Document, viewport: &Viewport) {
        let Some(navbar) = self.navbar else {
            return;
        };
        let scrolled = viewport.scroll_y > self.config.scroll_threshold;
        let background = self.tokens.navbar_background(scrolled);
        doc.set_style(navbar, "background", &background.to_css());
        doc.set_style(navbar, "backdrop-filter", &self.tokens.navbar_backdrop);
    }
}

impl Widget for NavigationMenu {
    fn name(&self) -> &'static str {
        "nav"
    }

    fn handle_event(&mut self, cx: &mut WidgetContext<'_>, event: &HostEvent) {
        match event {
            HostEvent::Click(target) => {
                if cx.doc.is_within(*target, self.hamburger) {
                    self.toggle(cx.doc);
                } else if self.links.iter().any(|l| cx.doc.is_within(*target, *l)) {
                    self.close(cx.doc);
                }
            }
            HostEvent::Scroll(vp) => self.handle_scroll(cx.doc, vp),
            HostEvent::Resize(vp) if vp.width > self.config.mobile_breakpoint => {
                self.close(cx.doc);
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_platform::{MemoryDocument, MemoryStore};

    struct Page {
        doc: MemoryDocument,
        navbar: ElementId,
        hamburger: ElementId,
        menu: ElementId,
        link: ElementId,
        bars: Vec<ElementId>,
    }

    fn page() -> Page {
        let mut doc = MemoryDocument::new();
        let navbar = doc.element("nav").class("navbar").build();
        let hamburger = doc.element("div").class("hamburger").child_of(navbar).build();
        let bars = (0..3)
            .map(|_| doc.element("span").class("bar").child_of(hamburger).build())
            .collect();
        let menu = doc.element("ul").class("nav-menu").child_of(navbar).build();
        let link = doc
            .element("a")
            .class("nav-link")
            .attr("href", "#services")
            .child_of(menu)
            .build();
        Page {
            doc,
            navbar,
            hamburger,
            menu,
            link,
            bars,
        }
    }

    fn send(nav: &mut NavigationMenu, doc: &mut MemoryDocument, event: HostEvent) {
        let mut store = MemoryStore::new();
        let mut cx = WidgetContext::new(doc, &mut store);
        nav.handle_event(&mut cx, &event);
    }

    #[test]
    fn test_hamburger_toggles_menu_and_bars() {
        let mut p = page();
        let mut nav = NavigationMenu::mount(&p.doc, NavConfig::default(), BrandTokens::default())
            .unwrap();

        send(&mut nav, &mut p.doc, HostEvent::Click(p.bars[1]));
        assert!(p.doc.has_class(p.hamburger, "active"));
        assert!(p.doc.has_class(p.menu, "active"));
        assert_eq!(
            p.doc.style(p.bars[0], "transform").as_deref(),
            Some("rotate(-45deg) translate(-5px, 6px)")
        );
        assert_eq!(p.doc.style(p.bars[1], "opacity").as_deref(), Some("0"));

        send(&mut nav, &mut p.doc, HostEvent::Click(p.hamburger));
        assert!(!nav.is_open(&p.doc));
        assert_eq!(p.doc.style(p.bars[2], "transform").as_deref(), Some("none"));
        assert_eq!(p.doc.style(p.bars[1], "opacity").as_deref(), Some("1"));
    }

    #[test]
    fn test_link_click_and_wide_resize_close() {
        let mut p = page();
        let mut nav = NavigationMenu::mount(&p.doc, NavConfig::default(), BrandTokens::default())
            .unwrap();

        send(&mut nav, &mut p.doc, HostEvent::Click(p.hamburger));
        send(&mut nav, &mut p.doc, HostEvent::Click(p.link));
        assert!(!p.doc.has_class(p.menu, "active"));

        send(&mut nav, &mut p.doc, HostEvent::Click(p.hamburger));
        send(&mut nav, &mut p.doc, HostEvent::Resize(Viewport::new(700.0, 900.0)));
        assert!(nav.is_open(&p.doc));
        send(&mut nav, &mut p.doc, HostEvent::Resize(Viewport::new(1024.0, 900.0)));
        assert!(!nav.is_open(&p.doc));
    }

    #[test]
    fn test_scroll_styles_navbar() {
        let mut p = page();
        let mut nav = NavigationMenu::mount(&p.doc, NavConfig::default(), BrandTokens::default())
            .unwrap();

        let vp = Viewport::new(1280.0, 800.0);
        send(&mut nav, &mut p.doc, HostEvent::Scroll(vp.with_scroll(51.0)));
        assert_eq!(
            p.doc.style(p.navbar, "background").as_deref(),
            Some("rgba(120, 0, 0, 0.98)")
        );
        assert_eq!(
            p.doc.style(p.navbar, "backdrop-filter").as_deref(),
            Some("blur(20px)")
        );

        send(&mut nav, &mut p.doc, HostEvent::Scroll(vp.with_scroll(50.0)));
        assert_eq!(
            p.doc.style(p.navbar, "background").as_deref(),
            Some("rgba(120, 0, 0, 0.95)")
        );
    }
}
