//! Intersection observer
//!
//! Reports when observed elements cross a visibility threshold relative to
//! the viewport. The host does not push intersection entries; widgets feed
//! every viewport change to their observer and receive the entries whose
//! intersecting state changed, the same contract as the browser API.

use crate::document::{Document, ElementId};
use crate::geometry::{Margin, Viewport};
use serde::{Deserialize, Serialize};

/// Observer configuration
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObserverOptions {
    /// Visible fraction (0.0..=1.0) at which a target counts as intersecting.
    /// Zero means any overlap, including edge contact.
    pub threshold: f32,
    /// Grows (positive) or shrinks (negative) the viewport before testing
    pub root_margin: Margin,
}

impl ObserverOptions {
    pub const fn new(threshold: f32) -> Self {
        Self {
            threshold,
            root_margin: Margin {
                top: 0.0,
                right: 0.0,
                bottom: 0.0,
                left: 0.0,
            },
        }
    }

    pub fn with_root_margin(mut self, margin: Margin) -> Self {
        self.root_margin = margin;
        self
    }
}

impl Default for ObserverOptions {
    fn default() -> Self {
        Self::new(0.0)
    }
}

/// A change in an observed element's visibility
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IntersectionEntry {
    pub target: ElementId,
    /// Fraction of the target's area inside the root
    pub ratio: f32,
    pub is_intersecting: bool,
}

#[derive(Clone, Copy, Debug)]
struct Observed {
    target: ElementId,
    /// Last reported state; `None` until the first report
    intersecting: Option<bool>,
}

/// Tracks visibility of a set of targets
#[derive(Clone, Debug, Default)]
pub struct IntersectionObserver {
    options: ObserverOptions,
    targets: Vec<Observed>,
}

impl IntersectionObserver {
    pub fn new(options: ObserverOptions) -> Self {
        Self {
            options,
            targets: Vec::new(),
        }
    }

    pub fn options(&self) -> &ObserverOptions {
        &self.options
    }

    /// Start observing an element; observing twice is a no-op
    pub fn observe(&mut self, target: ElementId) {
        if !self.is_observing(target) {
            self.targets.push(Observed {
                target,
                intersecting: None,
            });
        }
    }

    pub fn unobserve(&mut self, target: ElementId) {
        self.targets.retain(|o| o.target != target);
    }

    pub fn disconnect(&mut self) {
        self.targets.clear();
    }

    pub fn is_observing(&self, target: ElementId) -> bool {
        self.targets.iter().any(|o| o.target == target)
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Re-evaluate all targets against the viewport
    ///
    /// Returns an entry for every target observed for the first time and for
    /// every target whose intersecting state flipped. Targets without layout
    /// bounds, or no longer in the document, are skipped.
    pub fn update(&mut self, doc: &dyn Document, viewport: &Viewport) -> Vec<IntersectionEntry> {
        let root = self.options.root_margin.apply(viewport.visible_rect());
        let threshold = self.options.threshold;
        let mut entries = Vec::new();

        for observed in &mut self.targets {
            if !doc.contains(observed.target) {
                continue;
            }
            let Some(bounds) = doc.bounds(observed.target) else {
                continue;
            };

            let overlap = bounds.intersection(&root);
            let ratio = match overlap {
                Some(region) if bounds.area() > 0.0 => region.area() / bounds.area(),
                // Zero-area targets count as fully visible while touching the root
                Some(_) => 1.0,
                None => 0.0,
            };
            let is_intersecting = if threshold <= 0.0 {
                overlap.is_some()
            } else {
                overlap.is_some() && ratio >= threshold
            };

            if observed.intersecting != Some(is_intersecting) {
                observed.intersecting = Some(is_intersecting);
                entries.push(IntersectionEntry {
                    target: observed.target,
                    ratio,
                    is_intersecting,
                });
            }
        }

        entries
    }
}
