//! Runtime configuration (`vitrine.toml`)
//!
//! Every section is optional; missing fields take the page defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use vitrine_theme::BrandTokens;
use vitrine_widgets::{
    CarouselConfig, ContactFormConfig, CounterConfig, FeatureCardsConfig, LetterTypewriterConfig,
    LoadingScreenConfig, NavConfig, ParallaxConfig, ParticleConfig, RevealConfig,
    SequencerConfig, SmoothScrollConfig, ThemeToggleConfig, TitleTypewriterConfig,
};

use crate::error::{Result, VitrineError};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VitrineConfig {
    /// Append the runtime stylesheet at mount
    pub inject_styles: bool,
    /// Retype the hero title at mount
    pub hero_typing: bool,
    pub tokens: BrandTokens,
    pub theme: ThemeToggleConfig,
    pub nav: NavConfig,
    pub smooth_scroll: SmoothScrollConfig,
    pub reveal: RevealConfig,
    pub parallax: ParallaxConfig,
    pub contact_form: ContactFormConfig,
    pub counter: CounterConfig,
    pub loading_screen: LoadingScreenConfig,
    pub particles: ParticleConfig,
    pub feature_cards: FeatureCardsConfig,
    pub sequencer: SequencerConfig,
    pub carousel: CarouselConfig,
    pub typewriter: LetterTypewriterConfig,
    pub title: TitleTypewriterConfig,
}

impl Default for VitrineConfig {
    fn default() -> Self {
        Self {
            inject_styles: true,
            hero_typing: false,
            tokens: BrandTokens::default(),
            theme: ThemeToggleConfig::default(),
            nav: NavConfig::default(),
            smooth_scroll: SmoothScrollConfig::default(),
            reveal: RevealConfig::default(),
            parallax: ParallaxConfig::default(),
            contact_form: ContactFormConfig::default(),
            counter: CounterConfig::default(),
            loading_screen: LoadingScreenConfig::default(),
            particles: ParticleConfig::default(),
            feature_cards: FeatureCardsConfig::default(),
            sequencer: SequencerConfig::default(),
            carousel: CarouselConfig::default(),
            typewriter: LetterTypewriterConfig::default(),
            title: TitleTypewriterConfig::default(),
        }
    }
}

impl VitrineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            VitrineError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        toml::from_str(&content).map_err(|e| {
            VitrineError::Config(format!("failed to parse {}: {}", path.display(), e))
        })
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| VitrineError::Config(e.to_string()))
    }
}
