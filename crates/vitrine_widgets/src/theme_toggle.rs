//! Light/dark theme toggle

use serde::{Deserialize, Serialize};
use vitrine_platform::{ElementId, HostEvent, KeyValueStore};
use vitrine_theme::ColorScheme;

use crate::context::WidgetContext;
use crate::widget::Widget;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeToggleConfig {
    /// Preference key in the store
    pub storage_key: String,
    pub toggle_selector: String,
    pub icon_selector: String,
    /// Scheme used when nothing valid is stored
    pub default_scheme: ColorScheme,
}

impl Default for ThemeToggleConfig {
    fn default() -> Self {
        Self {
            storage_key: "theme".to_string(),
            toggle_selector: "#themeToggle".to_string(),
            icon_selector: "#themeIcon".to_string(),
            default_scheme: ColorScheme::Dark,
        }
    }
}

/// Applies the stored scheme and flips it on click
pub struct ThemeToggle {
    config: ThemeToggleConfig,
    toggle: Option<ElementId>,
    icon: Option<ElementId>,
    scheme: ColorScheme,
}

impl ThemeToggle {
    /// Read the stored preference and apply it to the page
    pub fn mount(cx: &mut WidgetContext<'_>, config: ThemeToggleConfig) -> Self {
        let scheme = stored_scheme(&*cx.store, &config);
        let toggle = cx.doc.query(&config.toggle_selector);
        if toggle.is_none() {
            tracing::debug!("theme: no `{}` element, toggle inert", config.toggle_selector);
        }
        let icon = cx.doc.query(&config.icon_selector);

        let mut theme = Self {
            config,
            toggle,
            icon,
            scheme,
        };
        theme.set_scheme(cx, scheme);
        theme
    }

    pub fn scheme(&self) -> ColorScheme {
        self.scheme
    }

    /// Apply and persist a scheme
    pub fn set_scheme(&mut self, cx: &mut WidgetContext<'_>, scheme: ColorScheme) {
        self.scheme = scheme;
        let root = cx.doc.root();
        cx.doc.set_attribute(root, "data-theme", scheme.as_str());
        if let Some(icon) = self.icon {
            cx.doc.set_class_name(icon, scheme.icon_class());
        }
        if let Err(e) = cx.store.set(&self.config.storage_key, scheme.as_str()) {
            tracing::warn!("theme: failed to persist preference: {}", e);
        }
    }

    pub fn toggle(&mut self, cx: &mut WidgetContext<'_>) {
        let next = self.scheme.toggled();
        tracing::info!("theme: switching to {}", next);
        self.set_scheme(cx, next);
    }
}

fn stored_scheme(store: &dyn KeyValueStore, config: &ThemeToggleConfig) -> ColorScheme {
    match store.get(&config.storage_key) {
        Some(value) => value.parse().unwrap_or_else(|e| {
            tracing::warn!("theme: ignoring stored value: {}", e);
            config.default_scheme
        }),
        None => config.default_scheme,
    }
}

impl Widget for ThemeToggle {
    fn name(&self) -> &'static str {
        "theme"
    }

    fn handle_event(&mut self, cx: &mut WidgetContext<'_>, event: &HostEvent) {
        let (HostEvent::Click(target), Some(toggle)) = (event, self.toggle) else {
            return;
        };
        if cx.doc.is_within(*target, toggle) {
            self.toggle(cx);
        }
    }
}
