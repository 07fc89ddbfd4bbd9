//! 2D drawing surface used by the particle background

use crate::color::Color;
use crate::geometry::Point;

/// Minimal immediate-mode 2D canvas
pub trait Canvas {
    /// Current surface size in CSS pixels
    fn size(&self) -> (f32, f32);
    /// Set the drawing surface size in CSS pixels
    fn resize(&mut self, width: f32, height: f32);
    /// Clear the whole surface
    fn clear(&mut self);
    /// Fill a circle
    fn fill_circle(&mut self, center: Point, radius: f32, color: Color);
}

/// A recorded canvas command
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Resize { width: f32, height: f32 },
    Clear,
    FillCircle {
        center: Point,
        radius: f32,
        color: Color,
    },
}

/// Canvas that records commands instead of rasterizing them
#[derive(Clone, Debug, Default)]
pub struct RecordingCanvas {
    width: f32,
    height: f32,
    commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Circles drawn since the last clear
    pub fn circles_since_clear(&self) -> usize {
        self.commands
            .iter()
            .rev()
            .take_while(|c| !matches!(c, DrawCommand::Clear))
            .filter(|c| matches!(c, DrawCommand::FillCircle { .. }))
            .count()
    }
}

impl Canvas for RecordingCanvas {
    fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        self.commands.push(DrawCommand::Resize { width, height });
    }

    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }

    fn fill_circle(&mut self, center: Point, radius: f32, color: Color) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            color,
        });
    }
}
