//! Doctor command - report which widgets a page would bring to life
//!
//! Mounts the runtime against a fixture and explains every widget that
//! stayed inert, naming the selector it was looking for.

use vitrine_app::{VitrineApp, VitrineConfig};
use vitrine_platform::{Document, MemoryStore};

use crate::fixture::Page;

// ANSI color codes
mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const GRAY: &str = "\x1b[90m";
    pub const BOLD: &str = "\x1b[1m";
}

/// Result of a single check
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    Ok,
    Warning,
    NotApplicable,
}

impl CheckResult {
    fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Ok,
            message: message.to_string(),
            hint: None,
        }
    }

    fn warning(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Warning,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn not_applicable(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::NotApplicable,
            message: message.to_string(),
            hint: None,
        }
    }

    pub fn colored_icon(&self) -> String {
        match self.status {
            CheckStatus::Ok => format!("{}✓{}", colors::GREEN, colors::RESET),
            CheckStatus::Warning => format!("{}!{}", colors::YELLOW, colors::RESET),
            CheckStatus::NotApplicable => format!("{}-{}", colors::GRAY, colors::RESET),
        }
    }
}

/// What a widget needs from the page to mount
fn requirement(config: &VitrineConfig, widget: &str) -> Option<String> {
    let selector = match widget {
        "nav" => config.nav.hamburger_selector.clone(),
        "smooth-scroll" => config.smooth_scroll.anchor_selector.clone(),
        "reveal" => config.reveal.selector.clone(),
        "parallax" => config.parallax.selector.clone(),
        "contact-form" => config.contact_form.form_selector.clone(),
        "counter" => config.counter.selector.clone(),
        "title" => config.title.selector.clone(),
        "feature-cards" => config.feature_cards.selector.clone(),
        "sequencer" => config.sequencer.section_selector.clone(),
        "carousel" => config.carousel.card_selector.clone(),
        "typewriter" => config.typewriter.selector.clone(),
        _ => return None,
    };
    Some(selector)
}

/// Every widget the runtime knows, in mount order
pub const WIDGETS: &[&str] = &[
    "theme",
    "nav",
    "smooth-scroll",
    "reveal",
    "parallax",
    "contact-form",
    "counter",
    "loader",
    "particles",
    "title",
    "feature-cards",
    "sequencer",
    "carousel",
    "typewriter",
];

/// Mount the page and check each widget
pub fn diagnose(page: Page, config: VitrineConfig) -> Vec<CheckResult> {
    let viewport = page.viewport;
    let mut app = VitrineApp::new(page.doc, MemoryStore::new(), config);
    app.mount(viewport);
    let mounted = app.widget_names();
    let config = app.config();

    WIDGETS
        .iter()
        .map(|&widget| {
            if mounted.contains(&widget) {
                let message = match requirement(config, widget) {
                    Some(selector) => {
                        let count = app.doc().query_all(&selector).len();
                        format!("mounted ({} × `{}`)", count, selector)
                    }
                    None => "mounted".to_string(),
                };
                return CheckResult::ok(widget, &message);
            }
            match widget {
                "title" if !config.hero_typing => {
                    CheckResult::not_applicable(widget, "disabled (hero_typing = false)")
                }
                "particles" => CheckResult::not_applicable(
                    widget,
                    &format!(
                        "viewport {}px is not wider than {}px",
                        viewport.width, config.particles.min_viewport_width
                    ),
                ),
                _ => {
                    let selector = requirement(config, widget).unwrap_or_default();
                    CheckResult::warning(
                        widget,
                        "inert",
                        &format!("add an element matching `{}`", selector),
                    )
                }
            }
        })
        .collect()
}

/// Print the report; returns the number of inert widgets
pub fn print_report(checks: &[CheckResult]) -> usize {
    println!("{}Vitrine widgets{}", colors::BOLD, colors::RESET);
    for check in checks {
        println!("  {} {:<14} {}", check.colored_icon(), check.name, check.message);
        if let Some(hint) = &check.hint {
            println!("    {}{}{}", colors::GRAY, hint, colors::RESET);
        }
    }

    let inert = checks
        .iter()
        .filter(|c| c.status == CheckStatus::Warning)
        .count();
    let mounted = checks
        .iter()
        .filter(|c| c.status == CheckStatus::Ok)
        .count();
    println!();
    println!("{} mounted, {} inert", mounted, inert);
    inert
}
