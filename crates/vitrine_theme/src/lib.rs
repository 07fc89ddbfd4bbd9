//! Vitrine Theme
//!
//! Color schemes and the brand tokens shared by widgets.

pub mod scheme;
pub mod tokens;

pub use scheme::{ColorScheme, ParseColorSchemeError};
pub use tokens::BrandTokens;
