//! Shape helpers shared by the games

use glam::Vec2;
use std::f32::consts::PI;

use super::{Color, Surface};
use crate::sim::geom::Rect;

/// Half-angle of Pac-Man's open mouth
pub const MOUTH_HALF_ANGLE: f32 = PI / 6.0;

/// Dim the whole surface and print the terminal message in `accent`
pub fn game_over_overlay(surface: &mut dyn Surface, accent: Color) {
    surface.clear(Color::BLACK.with_alpha(0.8));
    let center = Vec2::new(surface.width() / 2.0, surface.height() / 2.0);
    surface.fill_text("GAME OVER", center, 24.0, accent);
    surface.fill_text(
        "Refresh to play again",
        center + Vec2::new(0.0, 30.0),
        16.0,
        accent,
    );
}

/// Puffy three-lobe cloud centred on its left lobe
pub fn cloud(surface: &mut dyn Surface, left: Vec2) {
    surface.fill_circle(left, 20.0, Color::WHITE);
    surface.fill_circle(left + Vec2::new(20.0, 0.0), 25.0, Color::WHITE);
    surface.fill_circle(left + Vec2::new(40.0, 0.0), 20.0, Color::WHITE);
}

/// Fixed pseudo-random starfield (same pattern every frame)
pub fn starfield(surface: &mut dyn Surface, count: u32) {
    let (w, h) = (surface.width() as u32, surface.height() as u32);
    if w == 0 || h == 0 {
        return;
    }
    for i in 0..count {
        let x = (i * 37) % w;
        let y = (i * 23) % h;
        surface.fill_rect(Rect::new(x as f32, y as f32, 1.0, 1.0), Color::WHITE);
    }
}

/// Open-mouth wedge angles for a body facing `facing` radians.
///
/// The wedge is drawn from the upper lip round the back to the lower lip.
pub fn mouth_wedge(facing: f32) -> (f32, f32) {
    (facing + MOUTH_HALF_ANGLE, facing + 2.0 * PI - MOUTH_HALF_ANGLE)
}

/// Two small square eyes at `offsets` from `origin`
pub fn eyes(surface: &mut dyn Surface, origin: Vec2, offsets: [Vec2; 2], size: f32, color: Color) {
    for offset in offsets {
        let p = origin + offset;
        surface.fill_rect(Rect::new(p.x, p.y, size, size), color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::DrawList;

    #[test]
    fn test_overlay_text() {
        let mut list = DrawList::new(400.0, 300.0);
        game_over_overlay(&mut list, Color::hex(0xff4444));
        assert_eq!(list.texts(), vec!["GAME OVER", "Refresh to play again"]);
    }

    #[test]
    fn test_mouth_leaves_gap_around_facing() {
        let (start, end) = mouth_wedge(0.0);
        assert!(start > 0.0);
        assert!(end < 2.0 * PI);
        assert!((end - start - (2.0 * PI - 2.0 * MOUTH_HALF_ANGLE)).abs() < 1e-5);
    }

    #[test]
    fn test_starfield_stays_on_surface() {
        let mut list = DrawList::new(400.0, 300.0);
        starfield(&mut list, 50);
        assert_eq!(list.commands.len(), 50);
    }
}
