//! Shared game state types
//!
//! Score, lives and the event log every game keeps, plus the small enums
//! used to pick and steer a game.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::START_LIVES;

/// Which mini-game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameKind {
    /// Super Mario-style platformer
    Platformer,
    /// Pac-Man
    Maze,
    /// Space Invaders
    Invaders,
}

impl GameKind {
    pub const ALL: [GameKind; 3] = [GameKind::Platformer, GameKind::Maze, GameKind::Invaders];

    /// Prefix used by the page for canvas and HUD element ids
    pub fn dom_prefix(&self) -> &'static str {
        match self {
            GameKind::Platformer => "mario",
            GameKind::Maze => "pacman",
            GameKind::Invaders => "invaders",
        }
    }
}

/// Fidelity level of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Variant {
    Simple,
    #[default]
    Enhanced,
}

impl Variant {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "simple" | "basic" => Some(Variant::Simple),
            "enhanced" | "full" => Some(Variant::Enhanced),
            _ => None,
        }
    }
}

/// Cardinal direction, numbered clockwise from right
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    Right,
    Down,
    Left,
    Up,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Right,
        Direction::Down,
        Direction::Left,
        Direction::Up,
    ];

    /// Unit step in screen space
    pub fn delta(&self) -> Vec2 {
        match self {
            Direction::Right => Vec2::X,
            Direction::Down => Vec2::Y,
            Direction::Left => Vec2::NEG_X,
            Direction::Up => Vec2::NEG_Y,
        }
    }

    /// Facing angle in radians (screen space, clockwise)
    pub fn angle(&self) -> f32 {
        (*self as u8) as f32 * std::f32::consts::FRAC_PI_2
    }
}

/// Something the host may want to reflect outside the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    ScoreChanged(u64),
    LivesChanged(u8),
    /// All collectibles taken, level restored
    LevelCleared,
    /// Shooter wave cleared; carries the new wave number (1-based)
    WaveAdvanced(u32),
    GameOver,
}

/// Score, lives and terminal flag for one game instance
#[derive(Debug, Clone)]
pub struct Scoreboard {
    pub score: u64,
    pub lives: u8,
    pub game_over: bool,
    events: Vec<GameEvent>,
}

impl Default for Scoreboard {
    fn default() -> Self {
        Self::new(START_LIVES)
    }
}

impl Scoreboard {
    pub fn new(lives: u8) -> Self {
        Self {
            score: 0,
            lives,
            game_over: false,
            events: Vec::new(),
        }
    }

    pub fn add_points(&mut self, points: u64) {
        self.score += points;
        self.events.push(GameEvent::ScoreChanged(self.score));
    }

    /// Take one life. Returns true if that was the last one.
    pub fn lose_life(&mut self) -> bool {
        self.lives = self.lives.saturating_sub(1);
        self.events.push(GameEvent::LivesChanged(self.lives));
        log::debug!("Life lost, {} remaining", self.lives);
        if self.lives == 0 {
            self.end();
        }
        self.game_over
    }

    /// Enter the terminal state (idempotent)
    pub fn end(&mut self) {
        if !self.game_over {
            self.game_over = true;
            self.events.push(GameEvent::GameOver);
            log::info!("Game over with score {}", self.score);
        }
    }

    pub fn push(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lives_run_out_after_start_count() {
        let mut board = Scoreboard::default();
        assert!(!board.lose_life());
        assert!(!board.lose_life());
        assert!(board.lose_life());
        assert_eq!(board.lives, 0);
        assert!(board.game_over);

        // Stays terminal, no second GameOver event
        board.lose_life();
        let overs = board
            .drain_events()
            .into_iter()
            .filter(|e| *e == GameEvent::GameOver)
            .count();
        assert_eq!(overs, 1);
        assert!(board.game_over);
    }

    #[test]
    fn test_points_emit_running_total() {
        let mut board = Scoreboard::default();
        board.add_points(10);
        board.add_points(50);
        assert_eq!(
            board.drain_events(),
            vec![GameEvent::ScoreChanged(10), GameEvent::ScoreChanged(60)]
        );
        assert!(board.drain_events().is_empty());
    }

    #[test]
    fn test_variant_parsing() {
        assert_eq!(Variant::from_str("Simple"), Some(Variant::Simple));
        assert_eq!(Variant::from_str(" enhanced "), Some(Variant::Enhanced));
        assert_eq!(Variant::from_str("deluxe"), None);
    }

    #[test]
    fn test_direction_angles() {
        assert_eq!(Direction::Right.angle(), 0.0);
        assert!((Direction::Up.angle() - 3.0 * std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }
}
