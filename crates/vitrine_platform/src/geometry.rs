//! Page geometry: rectangles, points and the viewport

use serde::{Deserialize, Serialize};

/// A point in page coordinates
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle in page coordinates (CSS pixels)
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn area(&self) -> f32 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    /// Check whether a point lies inside or on the edge of this rectangle
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left()
            && point.x <= self.right()
            && point.y >= self.top()
            && point.y <= self.bottom()
    }

    /// Overlapping region of two rectangles
    ///
    /// Returns `None` when they are disjoint. Edge-adjacent rectangles produce
    /// a zero-area intersection, matching how browsers report edge contact.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let left = self.left().max(other.left());
        let top = self.top().max(other.top());
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if right < left || bottom < top {
            return None;
        }

        Some(Rect::new(left, top, right - left, bottom - top))
    }
}

/// Margin applied to an observer's root rectangle
///
/// Positive values grow the root, negative values shrink it, mirroring the
/// `rootMargin` convention of intersection observers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margin {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Margin {
    /// A margin that only moves the bottom edge
    pub const fn bottom(bottom: f32) -> Self {
        Self {
            top: 0.0,
            right: 0.0,
            bottom,
            left: 0.0,
        }
    }

    /// Apply this margin to a rectangle
    pub fn apply(&self, rect: Rect) -> Rect {
        Rect::new(
            rect.x - self.left,
            rect.y - self.top,
            rect.width + self.left + self.right,
            rect.height + self.top + self.bottom,
        )
    }
}

/// The visible window onto the page
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Inner width in CSS pixels
    pub width: f32,
    /// Inner height in CSS pixels
    pub height: f32,
    /// Vertical scroll offset
    #[serde(default)]
    pub scroll_y: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            scroll_y: 0.0,
        }
    }

    pub fn with_scroll(mut self, scroll_y: f32) -> Self {
        self.scroll_y = scroll_y;
        self
    }

    /// The visible region in page coordinates
    pub fn visible_rect(&self) -> Rect {
        Rect::new(0.0, self.scroll_y, self.width, self.height)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 800.0)
    }
}
