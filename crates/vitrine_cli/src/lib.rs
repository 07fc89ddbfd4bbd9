//! Vitrine CLI internals
//!
//! Fixture loading, the simulator and the doctor report behind the
//! `vitrine` binary.

pub mod doctor;
pub mod fixture;
pub mod simulate;

use anyhow::{Context, Result};
use std::path::Path;
use vitrine_app::VitrineConfig;

/// Name of the configuration file picked up next to a fixture
pub const CONFIG_FILE: &str = "vitrine.toml";

/// Load the runtime configuration
///
/// An explicit path must exist. Otherwise `vitrine.toml` next to the
/// fixture is used when present, and the defaults when not.
pub fn load_config(explicit: Option<&Path>, fixture: &Path) -> Result<VitrineConfig> {
    if let Some(path) = explicit {
        return VitrineConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()));
    }

    let sibling = fixture
        .parent()
        .map(|dir| dir.join(CONFIG_FILE))
        .filter(|path| path.exists());
    match sibling {
        Some(path) => {
            tracing::debug!("using {}", path.display());
            VitrineConfig::load(&path)
                .with_context(|| format!("Failed to load config {}", path.display()))
        }
        None => Ok(VitrineConfig::default()),
    }
}
