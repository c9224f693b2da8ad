//! Collision detection and response
//!
//! Everything here is brute force over small entity lists: AABB overlap,
//! centre-distance contact, and first-match platform landing.

use glam::Vec2;

use super::geom::Rect;

/// Result of resolving an actor against platforms
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Landing {
    /// Index of the platform landed on (creation order)
    pub platform: usize,
    /// New top edge of the actor
    pub y: f32,
}

/// Find the platform a falling actor lands on.
///
/// Platforms are scanned in creation order and the first one that the
/// actor's feet have sunk into (by less than `platform.h + slack`) wins.
/// Only a downward-moving actor can land.
pub fn land_on_platforms(
    actor: &Rect,
    vel_y: f32,
    platforms: &[Rect],
    slack: f32,
) -> Option<Landing> {
    if vel_y <= 0.0 {
        return None;
    }
    let feet = actor.bottom();
    platforms
        .iter()
        .position(|p| actor.overlaps_x(p) && feet > p.y && feet < p.bottom() + slack)
        .map(|i| Landing {
            platform: i,
            y: platforms[i].y - actor.h,
        })
}

/// Whether a walker's feet rest on some platform
pub fn standing_on_any(walker: &Rect, platforms: &[Rect], slack: f32) -> bool {
    let feet = walker.bottom();
    platforms
        .iter()
        .any(|p| walker.overlaps_x(p) && feet >= p.y && feet <= p.bottom() + slack)
}

/// Centre-distance contact test
#[inline]
pub fn within(a: Vec2, b: Vec2, distance: f32) -> bool {
    a.distance(b) < distance
}

/// Index of the first rect in `targets` that `shot` overlaps and `live` accepts
pub fn first_hit<T>(
    shot: &Rect,
    targets: &[T],
    rect: impl Fn(&T) -> Rect,
    live: impl Fn(&T) -> bool,
) -> Option<usize> {
    targets
        .iter()
        .position(|t| live(t) && shot.overlaps(&rect(t)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_landing_rests_on_surface() {
        let platform = Rect::new(0.0, 280.0, 200.0, 20.0);
        let actor = Rect::new(50.0, 255.0, 20.0, 30.0); // feet at 285
        let landing = land_on_platforms(&actor, 2.0, &[platform], 10.0).unwrap();
        assert_eq!(landing.platform, 0);
        assert_eq!(landing.y + actor.h, platform.y);
    }

    #[test]
    fn test_rising_actor_passes_through() {
        let platform = Rect::new(0.0, 280.0, 200.0, 20.0);
        let actor = Rect::new(50.0, 255.0, 20.0, 30.0);
        assert!(land_on_platforms(&actor, -4.0, &[platform], 10.0).is_none());
    }

    #[test]
    fn test_first_platform_wins() {
        // Two overlapping platforms, both penetrated; creation order decides
        let platforms = [
            Rect::new(0.0, 100.0, 100.0, 15.0),
            Rect::new(0.0, 98.0, 100.0, 15.0),
        ];
        let actor = Rect::new(10.0, 72.0, 20.0, 30.0); // feet at 102
        let landing = land_on_platforms(&actor, 1.0, &platforms, 10.0).unwrap();
        assert_eq!(landing.platform, 0);
        assert_eq!(landing.y, 70.0);
    }

    #[test]
    fn test_too_deep_is_not_landing() {
        let platform = Rect::new(0.0, 100.0, 100.0, 15.0);
        let actor = Rect::new(10.0, 100.0, 20.0, 30.0); // feet at 130, limit 125
        assert!(land_on_platforms(&actor, 1.0, &[platform], 10.0).is_none());
    }

    #[test]
    fn test_first_hit_skips_dead_targets() {
        let targets = [
            (Rect::new(0.0, 0.0, 10.0, 10.0), false),
            (Rect::new(0.0, 0.0, 10.0, 10.0), true),
        ];
        let shot = Rect::new(2.0, 2.0, 3.0, 10.0);
        assert_eq!(first_hit(&shot, &targets, |t| t.0, |t| t.1), Some(1));
    }
}
