//! Light/dark color scheme

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The page's color scheme
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    #[default]
    Dark,
    Light,
}

impl ColorScheme {
    /// Value written to the `data-theme` attribute and to storage
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorScheme::Dark => "dark",
            ColorScheme::Light => "light",
        }
    }

    /// The other scheme
    pub fn toggled(&self) -> Self {
        match self {
            ColorScheme::Dark => ColorScheme::Light,
            ColorScheme::Light => ColorScheme::Dark,
        }
    }

    /// Icon shown on the toggle: the scheme you would switch to
    pub fn icon_class(&self) -> &'static str {
        match self {
            ColorScheme::Dark => "fas fa-sun",
            ColorScheme::Light => "fas fa-moon",
        }
    }
}

impl fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown color scheme name
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown color scheme `{0}`")]
pub struct ParseColorSchemeError(pub String);

impl FromStr for ColorScheme {
    type Err = ParseColorSchemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "dark" => Ok(ColorScheme::Dark),
            "light" => Ok(ColorScheme::Light),
            other => Err(ParseColorSchemeError(other.to_string())),
        }
    }
}
