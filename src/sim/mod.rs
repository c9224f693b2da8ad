//! Game simulation module
//!
//! All gameplay logic lives here. Each game is a frame-stepped update/draw
//! loop over small entity lists:
//! - One tick per display frame (fixed step, see [`Session`])
//! - Seeded RNG only
//! - Stable iteration order (creation order, first match wins)
//! - No platform dependencies; drawing goes through [`Surface`]

pub mod collision;
pub mod geom;
pub mod input;
pub mod invaders;
pub mod maze;
pub mod platformer;
pub mod session;
pub mod state;

pub use geom::Rect;
pub use input::{KeyState, TickInput};
pub use invaders::InvadersGame;
pub use maze::MazeGame;
pub use platformer::PlatformerGame;
pub use session::Session;
pub use state::{Direction, GameEvent, GameKind, Scoreboard, Variant};

use crate::renderer::Surface;
use crate::tuning::{GameTuning, InvadersTuning, MazeTuning, PlatformerTuning};

/// A mini-game as seen by its host
pub trait ArcadeGame {
    fn kind(&self) -> GameKind;

    /// Advance the simulation by one tick. Does nothing once terminal.
    fn update(&mut self, input: &TickInput);

    /// Paint the current state, including the game-over overlay
    fn render(&self, surface: &mut dyn Surface);

    fn is_terminal(&self) -> bool;

    fn score(&self) -> u64;

    fn lives(&self) -> u8;

    /// Events since the last drain, oldest first
    fn drain_events(&mut self) -> Vec<GameEvent>;
}

/// Build a game with the preset tuning for `variant`
pub fn new_game(kind: GameKind, variant: Variant, seed: u64) -> Box<dyn ArcadeGame> {
    match kind {
        GameKind::Platformer => Box::new(PlatformerGame::new(
            variant,
            PlatformerTuning::for_variant(variant),
        )),
        GameKind::Maze => Box::new(MazeGame::new(MazeTuning::for_variant(variant), seed)),
        GameKind::Invaders => Box::new(InvadersGame::new(
            InvadersTuning::for_variant(variant),
            seed,
        )),
    }
}

/// Build a game from explicit tuning (layout still follows `variant`)
pub fn new_game_with(variant: Variant, tuning: GameTuning, seed: u64) -> Box<dyn ArcadeGame> {
    match tuning {
        GameTuning::Platformer(t) => Box::new(PlatformerGame::new(variant, t)),
        GameTuning::Maze(t) => Box::new(MazeGame::new(t, seed)),
        GameTuning::Invaders(t) => Box::new(InvadersGame::new(t, seed)),
    }
}
