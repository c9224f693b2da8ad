//! Pac-Man-style maze game
//!
//! Eat every dot and power pellet. Ghosts wander (bounce off walls, turn at
//! random); a pellet opens a vulnerability window in which they can be eaten.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::within;
use super::geom::Rect;
use super::input::TickInput;
use super::state::{Direction, GameEvent, GameKind, Scoreboard};
use super::ArcadeGame;
use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH, CLEAR_BONUS, START_LIVES};
use crate::renderer::{shapes, Color, Surface};
use crate::tuning::MazeTuning;

/// Where Pac-Man starts and respawns
pub const PACMAN_SPAWN: Vec2 = Vec2::new(50.0, 150.0);
/// Where ghosts start and return to when eaten (open floor below the centre block)
pub const GHOST_HOME: Vec2 = Vec2::new(200.0, 210.0);
const GHOST_RADIUS: f32 = 12.0;

const WALL: Color = Color::hex(0x0000ff);
const YELLOW: Color = Color::hex(0xffee07);
const FRIGHTENED: Color = Color::hex(0x0000ff);
const GHOST_COLORS: [Color; 3] = [
    Color::hex(0xff0000),
    Color::hex(0xffb8ff),
    Color::hex(0x00ffff),
];

#[derive(Debug, Clone)]
pub struct PacMan {
    pub pos: Vec2,
    pub direction: Direction,
    pub mouth_open: bool,
    mouth_timer: u32,
}

impl PacMan {
    fn spawn() -> Self {
        Self {
            pos: PACMAN_SPAWN,
            direction: Direction::Right,
            mouth_open: true,
            mouth_timer: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ghost {
    pub pos: Vec2,
    pub direction: Direction,
    pub vulnerable: bool,
    pub color: Color,
}

/// A dot or power pellet
#[derive(Debug, Clone, PartialEq)]
pub struct Pickup {
    pub pos: Vec2,
    pub collected: bool,
}

/// Outer frame plus three inner blocks
pub fn maze_walls() -> Vec<Rect> {
    vec![
        Rect::new(0.0, 0.0, 400.0, 10.0),
        Rect::new(0.0, 290.0, 400.0, 10.0),
        Rect::new(0.0, 0.0, 10.0, 300.0),
        Rect::new(390.0, 0.0, 10.0, 300.0),
        Rect::new(100.0, 50.0, 200.0, 10.0),
        Rect::new(100.0, 240.0, 200.0, 10.0),
        Rect::new(180.0, 120.0, 40.0, 60.0),
    ]
}

/// Complete maze state
#[derive(Debug, Clone)]
pub struct MazeGame {
    pub tuning: MazeTuning,
    pub walls: Vec<Rect>,
    pub pacman: PacMan,
    pub ghosts: Vec<Ghost>,
    pub dots: Vec<Pickup>,
    pub pellets: Vec<Pickup>,
    /// Ticks left in the vulnerability window (0 = ghosts chase)
    pub frightened_ticks: u32,
    pub board: Scoreboard,
    rng: Pcg32,
}

impl MazeGame {
    pub fn new(tuning: MazeTuning, seed: u64) -> Self {
        let walls = maze_walls();
        let mut game = Self {
            tuning,
            walls,
            pacman: PacMan::spawn(),
            ghosts: Vec::new(),
            dots: Vec::new(),
            pellets: Vec::new(),
            frightened_ticks: 0,
            board: Scoreboard::new(START_LIVES),
            rng: Pcg32::seed_from_u64(seed),
        };
        game.dots = game.dot_grid();
        game.pellets = game.pellet_corners();
        game.reset_level();
        game
    }

    pub fn is_wall(&self, p: Vec2) -> bool {
        self.walls.iter().any(|w| w.contains(p))
    }

    fn dot_grid(&self) -> Vec<Pickup> {
        let step = self.tuning.dot_spacing.max(1.0);
        let mut dots = Vec::new();
        let mut x = step;
        while x < CANVAS_WIDTH - step {
            let mut y = step;
            while y < CANVAS_HEIGHT - step {
                let pos = Vec2::new(x, y);
                if !self.is_wall(pos) {
                    dots.push(Pickup {
                        pos,
                        collected: false,
                    });
                }
                y += step;
            }
            x += step;
        }
        dots
    }

    fn pellet_corners(&self) -> Vec<Pickup> {
        if !self.tuning.power_pellets {
            return Vec::new();
        }
        [(30.0, 30.0), (370.0, 30.0), (30.0, 270.0), (370.0, 270.0)]
            .into_iter()
            .map(|(x, y)| Pickup {
                pos: Vec2::new(x, y),
                collected: false,
            })
            .collect()
    }

    fn spawn_ghosts(&self) -> Vec<Ghost> {
        let starts = [
            (Vec2::ZERO, Direction::Right),
            (Vec2::new(-20.0, 0.0), Direction::Left),
            (Vec2::new(20.0, 0.0), Direction::Down),
        ];
        (0..self.tuning.ghost_count)
            .map(|i| {
                let (offset, direction) = starts[i % starts.len()];
                Ghost {
                    pos: GHOST_HOME + offset,
                    direction,
                    vulnerable: false,
                    color: GHOST_COLORS[i % GHOST_COLORS.len()],
                }
            })
            .collect()
    }

    /// Restore every pickup, Pac-Man and the ghosts
    pub fn reset_level(&mut self) {
        for pickup in self.dots.iter_mut().chain(self.pellets.iter_mut()) {
            pickup.collected = false;
        }
        self.pacman = PacMan::spawn();
        self.ghosts = self.spawn_ghosts();
        self.frightened_ticks = 0;
    }

    fn wrap_x(x: f32) -> f32 {
        if x > CANVAS_WIDTH {
            0.0
        } else if x < 0.0 {
            CANVAS_WIDTH
        } else {
            x
        }
    }

    fn move_pacman(&mut self, input: &TickInput) {
        let speed = self.tuning.pacman_speed;
        if let Some(turn) = input.turn {
            if !self.is_wall(self.pacman.pos + turn.delta() * speed) {
                self.pacman.direction = turn;
            }
        }

        let next = self.pacman.pos + self.pacman.direction.delta() * speed;
        if !self.is_wall(next) {
            self.pacman.pos = next;
        }
        self.pacman.pos.x = Self::wrap_x(self.pacman.pos.x);
    }

    fn move_ghosts(&mut self) {
        let speed = self.tuning.ghost_speed;
        let chance = self.tuning.ghost_turn_chance;
        for i in 0..self.ghosts.len() {
            let ghost = &self.ghosts[i];
            let next = ghost.pos + ghost.direction.delta() * speed;
            if self.is_wall(next) || self.rng.random::<f32>() < chance {
                let pick = self.rng.random_range(0..Direction::ALL.len());
                self.ghosts[i].direction = Direction::ALL[pick];
            } else {
                self.ghosts[i].pos = next;
            }
            let ghost = &mut self.ghosts[i];
            ghost.pos.x = Self::wrap_x(ghost.pos.x);
        }
    }

    fn eat_pickups(&mut self) {
        let pos = self.pacman.pos;
        let reach = self.tuning.pacman_size;

        for dot in self.dots.iter_mut().filter(|d| !d.collected) {
            if within(pos, dot.pos, reach) {
                dot.collected = true;
                self.board.add_points(self.tuning.dot_points);
            }
        }

        for pellet in self.pellets.iter_mut().filter(|p| !p.collected) {
            if within(pos, pellet.pos, reach) {
                pellet.collected = true;
                self.board.add_points(self.tuning.pellet_points);
                self.frightened_ticks = self.tuning.frightened_ticks;
                for ghost in &mut self.ghosts {
                    ghost.vulnerable = true;
                }
            }
        }
    }

    fn tick_frightened(&mut self) {
        if self.frightened_ticks > 0 {
            self.frightened_ticks -= 1;
            if self.frightened_ticks == 0 {
                for ghost in &mut self.ghosts {
                    ghost.vulnerable = false;
                }
            }
        }
    }

    fn check_ghosts(&mut self) {
        let reach = self.tuning.pacman_size + self.tuning.ghost_reach;
        for i in 0..self.ghosts.len() {
            if !within(self.pacman.pos, self.ghosts[i].pos, reach) {
                continue;
            }
            if self.ghosts[i].vulnerable {
                let ghost = &mut self.ghosts[i];
                ghost.pos = GHOST_HOME;
                ghost.vulnerable = false;
                self.board.add_points(self.tuning.ghost_points);
            } else {
                self.pacman.pos = PACMAN_SPAWN;
                if self.board.lose_life() {
                    return;
                }
            }
        }
    }
}

impl ArcadeGame for MazeGame {
    fn kind(&self) -> GameKind {
        GameKind::Maze
    }

    fn update(&mut self, input: &TickInput) {
        if self.board.game_over {
            return;
        }

        self.move_pacman(input);
        self.move_ghosts();
        self.eat_pickups();
        self.tick_frightened();
        self.check_ghosts();
        if self.board.game_over {
            return;
        }

        let all_eaten = self
            .dots
            .iter()
            .chain(self.pellets.iter())
            .all(|p| p.collected);
        if all_eaten {
            self.board.add_points(CLEAR_BONUS);
            self.board.push(GameEvent::LevelCleared);
            log::info!("Maze cleared, score {}", self.board.score);
            self.reset_level();
        }

        let pac = &mut self.pacman;
        pac.mouth_timer += 1;
        if pac.mouth_timer > self.tuning.mouth_ticks {
            pac.mouth_open = !pac.mouth_open;
            pac.mouth_timer = 0;
        }
    }

    fn render(&self, surface: &mut dyn Surface) {
        surface.clear(Color::BLACK);

        for wall in &self.walls {
            surface.fill_rect(*wall, WALL);
        }
        for dot in self.dots.iter().filter(|d| !d.collected) {
            surface.fill_circle(dot.pos, 2.0, YELLOW);
        }
        for pellet in self.pellets.iter().filter(|p| !p.collected) {
            surface.fill_circle(pellet.pos, 6.0, YELLOW);
        }

        for ghost in &self.ghosts {
            let body = if ghost.vulnerable { FRIGHTENED } else { ghost.color };
            surface.fill_circle(ghost.pos, GHOST_RADIUS, body);
            shapes::eyes(
                surface,
                ghost.pos,
                [Vec2::new(-4.0, -4.0), Vec2::new(1.0, -4.0)],
                3.0,
                Color::WHITE,
            );
        }

        let pac = &self.pacman;
        if pac.mouth_open {
            let (start, end) = shapes::mouth_wedge(pac.direction.angle());
            surface.fill_wedge(pac.pos, self.tuning.pacman_size, start, end, YELLOW);
        } else {
            surface.fill_circle(pac.pos, self.tuning.pacman_size, YELLOW);
        }

        if self.board.game_over {
            shapes::game_over_overlay(surface, YELLOW);
        }
    }

    fn is_terminal(&self) -> bool {
        self.board.game_over
    }

    fn score(&self) -> u64 {
        self.board.score
    }

    fn lives(&self) -> u8 {
        self.board.lives
    }

    fn drain_events(&mut self) -> Vec<GameEvent> {
        self.board.drain_events()
    }
}
