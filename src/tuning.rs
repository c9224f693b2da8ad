//! Game balance constants
//!
//! Every distance, speed and point value the games use lives here, grouped
//! per game with one preset per [`Variant`]. Presets can be partially
//! overridden from JSON (the web host reads `data-tuning` on the canvas).

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::sim::{GameKind, Variant};

/// Platformer balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformerTuning {
    /// Horizontal speed (px/tick)
    pub run_speed: f32,
    /// Added to vertical velocity every tick
    pub gravity: f32,
    /// Vertical velocity on jump (negative is up)
    pub jump_velocity: f32,
    /// Extra depth below a platform top that still counts as landing
    pub landing_slack: f32,
    /// Width of the scrolling world
    pub world_width: f32,
    /// Centre distance that picks up a coin
    pub coin_radius: f32,
    pub coin_points: u64,
    /// Centre distance that counts as enemy contact
    pub enemy_contact: f32,
    pub stomp_points: u64,
    /// Enemy walking speed (px/tick)
    pub enemy_speed: f32,
}

impl PlatformerTuning {
    pub fn for_variant(variant: Variant) -> Self {
        let enhanced = Self {
            run_speed: 3.0,
            gravity: 0.5,
            jump_velocity: -12.0,
            landing_slack: 10.0,
            world_width: 800.0,
            coin_radius: 20.0,
            coin_points: 100,
            enemy_contact: 25.0,
            stomp_points: 200,
            enemy_speed: 1.0,
        };
        match variant {
            Variant::Enhanced => enhanced,
            Variant::Simple => Self {
                world_width: crate::consts::CANVAS_WIDTH,
                ..enhanced
            },
        }
    }
}

/// Pac-Man balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MazeTuning {
    /// Pac-Man radius, also the pickup distance
    pub pacman_size: f32,
    pub pacman_speed: f32,
    pub ghost_speed: f32,
    /// Extra distance beyond `pacman_size` that counts as ghost contact
    pub ghost_reach: f32,
    /// Chance per tick that a ghost picks a new random direction
    pub ghost_turn_chance: f32,
    pub ghost_count: usize,
    pub dot_points: u64,
    pub pellet_points: u64,
    pub ghost_points: u64,
    /// Whether the four corner power pellets are placed
    pub power_pellets: bool,
    /// Length of the vulnerability window (ticks)
    pub frightened_ticks: u32,
    /// Dot grid spacing
    pub dot_spacing: f32,
    /// Ticks between mouth open/close
    pub mouth_ticks: u32,
}

impl MazeTuning {
    pub fn for_variant(variant: Variant) -> Self {
        let enhanced = Self {
            pacman_size: 15.0,
            pacman_speed: 2.0,
            ghost_speed: 1.0,
            ghost_reach: 10.0,
            ghost_turn_chance: 0.02,
            ghost_count: 3,
            dot_points: 10,
            pellet_points: 50,
            ghost_points: 200,
            power_pellets: true,
            frightened_ticks: 300, // 5 seconds at 60 fps
            dot_spacing: 30.0,
            mouth_ticks: 10,
        };
        match variant {
            Variant::Enhanced => enhanced,
            Variant::Simple => Self {
                ghost_turn_chance: 0.0,
                ghost_count: 2,
                power_pellets: false,
                ..enhanced
            },
        }
    }
}

/// Space Invaders balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvadersTuning {
    pub ship_speed: f32,
    pub shot_speed: f32,
    /// Ticks between player shots
    pub shot_cooldown: u32,
    pub rows: usize,
    pub cols: usize,
    /// Rows above this index are the high-value "small" invaders
    pub small_rows: usize,
    pub small_points: u64,
    pub large_points: u64,
    /// Horizontal march speed at wave one
    pub march_speed: f32,
    /// Speed gained each time the formation hits an edge
    pub edge_speedup: f32,
    /// Speed gained each cleared wave
    pub wave_speedup: f32,
    /// Formation drop at an edge (px)
    pub drop_distance: f32,
    pub enemy_shot_speed: f32,
    /// Minimum ticks between enemy fire attempts
    pub enemy_fire_interval: u32,
    /// Chance per tick of firing once the interval has passed (0 disables fire)
    pub enemy_fire_chance: f32,
    pub barriers: bool,
}

impl InvadersTuning {
    pub fn for_variant(variant: Variant) -> Self {
        let enhanced = Self {
            ship_speed: 3.0,
            shot_speed: 5.0,
            shot_cooldown: 15,
            rows: 5,
            cols: 10,
            small_rows: 2,
            small_points: 30,
            large_points: 10,
            march_speed: 0.5,
            edge_speedup: 0.1,
            wave_speedup: 0.5,
            drop_distance: 20.0,
            enemy_shot_speed: 2.0,
            enemy_fire_interval: 60,
            enemy_fire_chance: 0.02,
            barriers: true,
        };
        match variant {
            Variant::Enhanced => enhanced,
            Variant::Simple => Self {
                rows: 3,
                cols: 8,
                small_rows: 1,
                enemy_fire_chance: 0.0,
                barriers: false,
                ..enhanced
            },
        }
    }
}

/// Tuning for whichever game is being built
#[derive(Debug, Clone, PartialEq)]
pub enum GameTuning {
    Platformer(PlatformerTuning),
    Maze(MazeTuning),
    Invaders(InvadersTuning),
}

impl GameTuning {
    pub fn preset(kind: GameKind, variant: Variant) -> Self {
        match kind {
            GameKind::Platformer => Self::Platformer(PlatformerTuning::for_variant(variant)),
            GameKind::Maze => Self::Maze(MazeTuning::for_variant(variant)),
            GameKind::Invaders => Self::Invaders(InvadersTuning::for_variant(variant)),
        }
    }

    pub fn kind(&self) -> GameKind {
        match self {
            Self::Platformer(_) => GameKind::Platformer,
            Self::Maze(_) => GameKind::Maze,
            Self::Invaders(_) => GameKind::Invaders,
        }
    }

    /// Same game, with `overrides` merged in (see [`apply_overrides`])
    pub fn with_overrides(&self, overrides: &str) -> Result<Self, serde_json::Error> {
        Ok(match self {
            Self::Platformer(t) => Self::Platformer(apply_overrides(t, overrides)?),
            Self::Maze(t) => Self::Maze(apply_overrides(t, overrides)?),
            Self::Invaders(t) => Self::Invaders(apply_overrides(t, overrides)?),
        })
    }
}

/// Overlay the fields present in `overrides` (a JSON object) onto `base`.
///
/// Unknown fields are ignored; a field with the wrong type is an error.
pub fn apply_overrides<T>(base: &T, overrides: &str) -> Result<T, serde_json::Error>
where
    T: Serialize + DeserializeOwned,
{
    let mut merged = serde_json::to_value(base)?;
    let patch: serde_json::Value = serde_json::from_str(overrides)?;
    if let (Some(target), serde_json::Value::Object(fields)) = (merged.as_object_mut(), patch) {
        for (key, value) in fields {
            if target.contains_key(&key) {
                target.insert(key, value);
            }
        }
    }
    serde_json::from_value(merged)
}
