//! Recorded draw commands

use super::{Color, Rect, RenderTarget};
use crate::foundation::math::Vec2;

/// A single draw call captured by [`RecordingSurface`]
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Whole-surface clear
    Clear(Color),
    /// Solid rectangle
    FillRect {
        /// Target rectangle
        rect: Rect,
        /// Fill colour
        color: Color,
    },
    /// Text line
    Text {
        /// Top-left corner
        position: Vec2,
        /// Text content
        text: String,
        /// Text colour
        color: Color,
    },
}

/// Headless render target that records every call.
///
/// Hosts without a window (tests, scripted runs) bind this and inspect what
/// the visible contexts drew.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    /// Create an empty surface of the given size
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    /// Commands recorded since the last [`take_commands`](Self::take_commands)
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drain the recorded commands
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Text lines drawn since the last clear, in draw order
    pub fn texts_since_clear(&self) -> Vec<&str> {
        let start = self
            .commands
            .iter()
            .rposition(|c| matches!(c, DrawCommand::Clear(_)))
            .map_or(0, |i| i + 1);

        self.commands[start..]
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl RenderTarget for RecordingSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn clear(&mut self, color: Color) {
        self.commands.push(DrawCommand::Clear(color));
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    fn draw_text(&mut self, position: Vec2, text: &str, color: Color) {
        self.commands.push(DrawCommand::Text {
            position,
            text: text.to_string(),
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_texts_since_clear_skips_previous_frames() {
        let mut surface = RecordingSurface::new(400, 600);
        surface.draw_text(Vec2::zeros(), "old", Color::BLACK);
        surface.clear(Color::WHITE);
        surface.fill_rect(Rect::new(0.0, 0.0, 10.0, 10.0), Color::BLACK);
        surface.draw_text(Vec2::new(1.0, 2.0), "new", Color::BLACK);

        assert_eq!(surface.texts_since_clear(), vec!["new"]);
        assert_eq!(surface.commands().len(), 4);
        assert_eq!(surface.size(), (400, 600));
    }

    #[test]
    fn test_take_commands_drains() {
        let mut surface = RecordingSurface::new(1, 1);
        surface.clear(Color::BLACK);
        assert_eq!(surface.take_commands(), vec![DrawCommand::Clear(Color::BLACK)]);
        assert!(surface.commands().is_empty());
    }
}
