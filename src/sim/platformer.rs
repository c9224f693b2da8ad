//! Super Mario-style platformer
//!
//! Run, jump, collect every coin, stomp walkers. Gravity plus first-match
//! AABB landing; the world scrolls horizontally with a clamped camera.

use glam::Vec2;

use super::collision::{land_on_platforms, standing_on_any, within};
use super::geom::Rect;
use super::input::TickInput;
use super::state::{GameEvent, GameKind, Scoreboard, Variant};
use super::ArcadeGame;
use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH, CLEAR_BONUS, START_LIVES};
use crate::renderer::{shapes, Color, Surface};
use crate::tuning::PlatformerTuning;

/// Where the player starts and respawns
pub const SPAWN: Vec2 = Vec2::new(50.0, 200.0);
pub const PLAYER_SIZE: Vec2 = Vec2::new(20.0, 30.0);
pub const ENEMY_SIZE: Vec2 = Vec2::new(20.0, 20.0);
/// How far below a platform top a walker's feet may be and still count as on it
const WALKER_SLACK: f32 = 5.0;

const SKY: Color = Color::hex(0x87ceeb);
const DIRT: Color = Color::hex(0x8b4513);
const GRASS: Color = Color::hex(0x228b22);
const GOLD: Color = Color::hex(0xffd700);
const SHINE: Color = Color::hex(0xffff00);
const SUIT: Color = Color::hex(0xff4444);
const HAT: Color = Color::hex(0xcc0000);
const SKIN: Color = Color::hex(0xffdbac);

/// The player character
#[derive(Debug, Clone)]
pub struct Player {
    pub rect: Rect,
    pub vel_y: f32,
    pub on_ground: bool,
    /// 1 facing right, -1 facing left
    pub facing: i8,
}

impl Player {
    fn spawn() -> Self {
        Self {
            rect: Rect::new(SPAWN.x, SPAWN.y, PLAYER_SIZE.x, PLAYER_SIZE.y),
            vel_y: 0.0,
            on_ground: false,
            facing: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Coin {
    pub pos: Vec2,
    pub collected: bool,
}

/// A walker that paces its platform
#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub rect: Rect,
    pub dx: f32,
    pub alive: bool,
}

/// Static layout of one level
#[derive(Debug, Clone)]
pub struct Level {
    pub platforms: Vec<Rect>,
    pub coins: Vec<Vec2>,
    /// Top-left corner and initial walking direction (+1/-1)
    pub enemies: Vec<(Vec2, f32)>,
}

impl Level {
    pub fn for_variant(variant: Variant) -> Self {
        match variant {
            Variant::Enhanced => Self::enhanced(),
            Variant::Simple => Self::simple(),
        }
    }

    /// Two screens wide: ground with gaps, floating and high platforms
    fn enhanced() -> Self {
        Self {
            platforms: vec![
                // Ground
                Rect::new(0.0, 280.0, 200.0, 20.0),
                Rect::new(250.0, 280.0, 150.0, 20.0),
                Rect::new(450.0, 280.0, 200.0, 20.0),
                Rect::new(700.0, 280.0, 100.0, 20.0),
                // Floating
                Rect::new(150.0, 220.0, 80.0, 15.0),
                Rect::new(300.0, 180.0, 100.0, 15.0),
                Rect::new(500.0, 160.0, 80.0, 15.0),
                Rect::new(650.0, 200.0, 120.0, 15.0),
                // High
                Rect::new(200.0, 120.0, 100.0, 15.0),
                Rect::new(400.0, 100.0, 80.0, 15.0),
                Rect::new(600.0, 80.0, 100.0, 15.0),
            ],
            coins: vec![
                Vec2::new(180.0, 190.0),
                Vec2::new(320.0, 150.0),
                Vec2::new(520.0, 130.0),
                Vec2::new(680.0, 170.0),
                Vec2::new(220.0, 90.0),
                Vec2::new(420.0, 70.0),
                Vec2::new(620.0, 50.0),
                Vec2::new(350.0, 250.0),
                Vec2::new(550.0, 250.0),
                Vec2::new(750.0, 250.0),
            ],
            enemies: vec![
                (Vec2::new(300.0, 260.0), -1.0),
                (Vec2::new(500.0, 260.0), 1.0),
                (Vec2::new(650.0, 180.0), -1.0),
            ],
        }
    }

    /// Single screen, one walker
    fn simple() -> Self {
        Self {
            platforms: vec![
                Rect::new(0.0, 280.0, 180.0, 20.0),
                Rect::new(220.0, 280.0, 180.0, 20.0),
                Rect::new(60.0, 220.0, 80.0, 15.0),
                Rect::new(170.0, 170.0, 80.0, 15.0),
                Rect::new(280.0, 120.0, 80.0, 15.0),
            ],
            coins: vec![
                Vec2::new(100.0, 190.0),
                Vec2::new(210.0, 140.0),
                Vec2::new(320.0, 90.0),
                Vec2::new(150.0, 250.0),
                Vec2::new(300.0, 250.0),
            ],
            enemies: vec![(Vec2::new(250.0, 260.0), 1.0)],
        }
    }
}

/// Complete platformer state
#[derive(Debug, Clone)]
pub struct PlatformerGame {
    pub tuning: PlatformerTuning,
    pub level: Level,
    pub player: Player,
    pub coins: Vec<Coin>,
    pub enemies: Vec<Enemy>,
    pub camera_x: f32,
    pub board: Scoreboard,
}

impl PlatformerGame {
    pub fn new(variant: Variant, tuning: PlatformerTuning) -> Self {
        Self::with_level(Level::for_variant(variant), tuning)
    }

    pub fn with_level(level: Level, tuning: PlatformerTuning) -> Self {
        let mut game = Self {
            tuning,
            level,
            player: Player::spawn(),
            coins: Vec::new(),
            enemies: Vec::new(),
            camera_x: 0.0,
            board: Scoreboard::new(START_LIVES),
        };
        game.reset_level();
        game
    }

    /// Restore coins, walkers and the player to the level's start
    pub fn reset_level(&mut self) {
        self.coins = self
            .level
            .coins
            .iter()
            .map(|&pos| Coin {
                pos,
                collected: false,
            })
            .collect();
        self.enemies = self
            .level
            .enemies
            .iter()
            .map(|&(pos, dir)| Enemy {
                rect: Rect::new(pos.x, pos.y, ENEMY_SIZE.x, ENEMY_SIZE.y),
                dx: dir * self.tuning.enemy_speed,
                alive: true,
            })
            .collect();
        self.respawn();
    }

    fn respawn(&mut self) {
        self.player = Player::spawn();
    }

    /// Lose a life and go back to spawn
    fn hurt(&mut self) {
        self.board.lose_life();
        self.respawn();
    }

    fn move_player(&mut self, input: &TickInput) {
        let t = &self.tuning;
        let p = &mut self.player;
        if input.left {
            p.rect.x = (p.rect.x - t.run_speed).max(0.0);
            p.facing = -1;
        }
        if input.right {
            p.rect.x = (p.rect.x + t.run_speed).min(t.world_width - p.rect.w);
            p.facing = 1;
        }
        if input.action && p.on_ground {
            p.vel_y = t.jump_velocity;
            p.on_ground = false;
        }

        p.vel_y += t.gravity;
        p.rect.y += p.vel_y;

        p.on_ground = false;
        if let Some(landing) =
            land_on_platforms(&p.rect, p.vel_y, &self.level.platforms, t.landing_slack)
        {
            p.rect.y = landing.y;
            p.vel_y = 0.0;
            p.on_ground = true;
        }

        let max_camera = (t.world_width - CANVAS_WIDTH).max(0.0);
        self.camera_x = (p.rect.x - CANVAS_WIDTH / 2.0).clamp(0.0, max_camera);
    }

    fn move_enemies(&mut self) {
        let world_width = self.tuning.world_width;
        for enemy in self.enemies.iter_mut().filter(|e| e.alive) {
            enemy.rect.x += enemy.dx;
            let grounded = standing_on_any(&enemy.rect, &self.level.platforms, WALKER_SLACK);
            if !grounded || enemy.rect.x <= 0.0 || enemy.rect.x >= world_width - enemy.rect.w {
                enemy.dx = -enemy.dx;
            }
        }
    }

    fn collect_coins(&mut self) {
        let center = self.player.rect.center();
        for coin in self.coins.iter_mut().filter(|c| !c.collected) {
            if within(center, coin.pos, self.tuning.coin_radius) {
                coin.collected = true;
                self.board.add_points(self.tuning.coin_points);
            }
        }
    }

    fn check_enemies(&mut self) {
        for i in 0..self.enemies.len() {
            let enemy = &self.enemies[i];
            if !enemy.alive {
                continue;
            }
            let p = &self.player;
            if !within(p.rect.center(), enemy.rect.center(), self.tuning.enemy_contact) {
                continue;
            }
            if p.vel_y > 0.0 && p.rect.y < enemy.rect.y {
                self.enemies[i].alive = false;
                self.player.vel_y = self.tuning.jump_velocity / 2.0;
                self.board.add_points(self.tuning.stomp_points);
            } else {
                // Player is back at spawn, nothing else can touch this tick
                self.hurt();
                return;
            }
        }
    }
}

impl ArcadeGame for PlatformerGame {
    fn kind(&self) -> GameKind {
        GameKind::Platformer
    }

    fn update(&mut self, input: &TickInput) {
        if self.board.game_over {
            return;
        }

        self.move_player(input);
        self.move_enemies();
        self.collect_coins();
        self.check_enemies();

        if !self.board.game_over && self.player.rect.y > CANVAS_HEIGHT {
            self.hurt();
        }
        if self.board.game_over {
            return;
        }

        if self.coins.iter().all(|c| c.collected) {
            self.board.add_points(CLEAR_BONUS);
            self.board.push(GameEvent::LevelCleared);
            log::info!("Platformer level cleared, score {}", self.board.score);
            self.reset_level();
        }
    }

    fn render(&self, surface: &mut dyn Surface) {
        surface.clear(SKY);
        surface.set_offset(Vec2::new(self.camera_x, 0.0));

        for i in 0..5 {
            shapes::cloud(surface, Vec2::new(i as f32 * 200.0 + 100.0, 50.0));
        }

        for platform in &self.level.platforms {
            surface.fill_rect(*platform, DIRT);
            surface.fill_rect(Rect::new(platform.x, platform.y - 3.0, platform.w, 3.0), GRASS);
        }

        for coin in self.coins.iter().filter(|c| !c.collected) {
            surface.fill_circle(coin.pos, 8.0, GOLD);
            surface.fill_circle(coin.pos - Vec2::splat(3.0), 3.0, SHINE);
        }

        for enemy in self.enemies.iter().filter(|e| e.alive) {
            let r = enemy.rect;
            surface.fill_rect(r, DIRT);
            shapes::eyes(
                surface,
                Vec2::new(r.x, r.y),
                [Vec2::new(4.0, 4.0), Vec2::new(13.0, 4.0)],
                3.0,
                Color::BLACK,
            );
            // Frown
            surface.fill_rect(Rect::new(r.x + 6.0, r.y + 13.0, 8.0, 2.0), Color::BLACK);
        }

        let r = self.player.rect;
        surface.fill_rect(r, SUIT);
        surface.fill_rect(Rect::new(r.x, r.y, r.w, 8.0), HAT);
        surface.fill_rect(Rect::new(r.x + 2.0, r.y + 8.0, r.w - 4.0, 12.0), SKIN);
        // Mustache leans toward the facing side
        let stache_x = if self.player.facing < 0 { r.x + 4.0 } else { r.x + 8.0 };
        surface.fill_rect(Rect::new(stache_x, r.y + 14.0, 8.0, 3.0), Color::BLACK);

        surface.set_offset(Vec2::ZERO);
        if self.board.game_over {
            shapes::game_over_overlay(surface, SUIT);
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
