//! Render target abstraction
//!
//! The core never talks to a graphics API. Contexts draw through
//! [`RenderTarget`], which the host binds to the context manager once. The
//! manager clears it each frame and hands it to every visible context in
//! bottom-to-top order.

mod commands;

pub use commands::{DrawCommand, RecordingSurface};

use crate::foundation::math::Vec2;
use serde::{Deserialize, Serialize};

/// 8-bit RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Color {
    /// Pure white, the default frame background
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    /// Pure black
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// Create a colour from its channels
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Axis-aligned rectangle in surface pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Center point of the rectangle
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Mutable 2D drawing surface
pub trait RenderTarget {
    /// Surface size in pixels (width, height)
    fn size(&self) -> (u32, u32);

    /// Fill the whole surface with `color`
    fn clear(&mut self, color: Color);

    /// Fill a rectangle
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Draw a line of text with its top-left corner at `position`
    fn draw_text(&mut self, position: Vec2, text: &str, color: Color);
}
