//! Brand design tokens

use serde::{Deserialize, Serialize};
use vitrine_platform::Color;

/// Colors and effects that widgets paint directly
///
/// Most styling lives in the page stylesheet; these are the values that
/// scripts write into inline styles or onto the particle canvas.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrandTokens {
    /// Primary brand red
    pub brand: Color,
    /// Deep accent used for ripples and the loader
    pub accent: Color,
    /// Navbar alpha once the page has scrolled
    pub navbar_alpha_scrolled: f32,
    /// Navbar alpha at the top of the page
    pub navbar_alpha_top: f32,
    /// Backdrop filter applied to the navbar
    pub navbar_backdrop: String,
    /// Ripple fill
    pub ripple: Color,
}

impl BrandTokens {
    pub fn navbar_background(&self, scrolled: bool) -> Color {
        let alpha = if scrolled {
            self.navbar_alpha_scrolled
        } else {
            self.navbar_alpha_top
        };
        self.brand.with_alpha(alpha)
    }

    /// Particle fill at a given opacity
    pub fn particle(&self, opacity: f32) -> Color {
        self.brand.with_alpha(opacity)
    }
}

impl Default for BrandTokens {
    fn default() -> Self {
        Self {
            brand: Color::rgb(120, 0, 0),
            accent: Color::from_hex(0x4f000b),
            navbar_alpha_scrolled: 0.98,
            navbar_alpha_top: 0.95,
            navbar_backdrop: "blur(20px)".to_string(),
            ripple: Color::rgba(79, 0, 11, 0.4),
        }
    }
}
