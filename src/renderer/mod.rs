//! Rendering module
//!
//! Games paint flat-filled rectangles, circles, wedges and text onto a
//! [`Surface`]. On the web that is a Canvas 2D context; in tests it is a
//! [`DrawList`] that records the calls.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod shapes;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;

use glam::Vec2;

use crate::sim::geom::Rect;

/// RGBA color, channels 0-255 plus alpha 0-1
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    /// Opaque color from `0xRRGGBB`
    pub const fn hex(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xff) as u8,
            g: ((rgb >> 8) & 0xff) as u8,
            b: (rgb & 0xff) as u8,
            a: 1.0,
        }
    }

    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// CSS color string for canvas fill styles
    pub fn css(&self) -> String {
        if self.a >= 1.0 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
        }
    }

    pub const BLACK: Color = Color::hex(0x000000);
    pub const WHITE: Color = Color::hex(0xffffff);
}

/// A 2D drawing target
pub trait Surface {
    fn width(&self) -> f32;
    fn height(&self) -> f32;

    /// Shift everything drawn afterwards by `-offset` (camera scroll)
    fn set_offset(&mut self, offset: Vec2);

    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
    /// Pie slice from `start` to `end` (radians, clockwise on screen)
    fn fill_wedge(&mut self, center: Vec2, radius: f32, start: f32, end: f32, color: Color);
    /// Centered text
    fn fill_text(&mut self, text: &str, center: Vec2, size_px: f32, color: Color);

    /// Fill the whole surface, ignoring any offset
    fn clear(&mut self, color: Color) {
        self.set_offset(Vec2::ZERO);
        let (w, h) = (self.width(), self.height());
        self.fill_rect(Rect::new(0.0, 0.0, w, h), color);
    }
}

/// One recorded drawing call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Offset(Vec2),
    Rect(Rect, Color),
    Circle(Vec2, f32, Color),
    Wedge {
        center: Vec2,
        radius: f32,
        start: f32,
        end: f32,
        color: Color,
    },
    Text(String, Vec2, Color),
}

/// Surface that records commands instead of drawing
#[derive(Debug, Clone)]
pub struct DrawList {
    pub size: (f32, f32),
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: (width, height),
            commands: Vec::new(),
        }
    }

    /// All text drawn, in order
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text(t, _, _) => Some(t.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Circles drawn with exactly this center
    pub fn circles_at(&self, center: Vec2) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle(p, _, _) if *p == center))
            .count()
    }
}

impl Surface for DrawList {
    fn width(&self) -> f32 {
        self.size.0
    }

    fn height(&self) -> f32 {
        self.size.1
    }

    fn set_offset(&mut self, offset: Vec2) {
        self.commands.push(DrawCommand::Offset(offset));
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::Rect(rect, color));
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.commands.push(DrawCommand::Circle(center, radius, color));
    }

    fn fill_wedge(&mut self, center: Vec2, radius: f32, start: f32, end: f32, color: Color) {
        self.commands.push(DrawCommand::Wedge {
            center,
            radius,
            start,
            end,
            color,
        });
    }

    fn fill_text(&mut self, text: &str, center: Vec2, _size_px: f32, color: Color) {
        self.commands
            .push(DrawCommand::Text(text.to_string(), center, color));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_colors() {
        assert_eq!(Color::hex(0x87ceeb).css(), "#87ceeb");
        assert_eq!(Color::BLACK.with_alpha(0.8).css(), "rgba(0, 0, 0, 0.8)");
    }

    #[test]
    fn test_clear_resets_offset() {
        let mut list = DrawList::new(400.0, 300.0);
        list.set_offset(Vec2::new(120.0, 0.0));
        list.clear(Color::BLACK);
        assert_eq!(list.commands[1], DrawCommand::Offset(Vec2::ZERO));
        assert_eq!(
            list.commands[2],
            DrawCommand::Rect(Rect::new(0.0, 0.0, 400.0, 300.0), Color::BLACK)
        );
    }
}
