//! Space Invaders-style shooter
//!
//! A marching formation drops a row at each edge and speeds up; clearing it
//! starts a faster wave. Shots and barrier cells are plain AABBs.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::first_hit;
use super::geom::Rect;
use super::input::TickInput;
use super::state::{GameEvent, GameKind, Scoreboard};
use super::ArcadeGame;
use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH, CLEAR_BONUS, START_LIVES};
use crate::renderer::{shapes, Color, Surface};
use crate::tuning::InvadersTuning;

pub const SHIP_START: Rect = Rect::new(200.0, 260.0, 30.0, 20.0);
const INVADER_W: f32 = 25.0;
const INVADER_H: f32 = 20.0;
const SHOT_SIZE: (f32, f32) = (3.0, 10.0);
const ENEMY_SHOT_SIZE: (f32, f32) = (3.0, 8.0);
const BARRIER_CELL: f32 = 5.0;

const GREEN: Color = Color::hex(0x00ff00);
const RED: Color = Color::hex(0xff0000);
const YELLOW: Color = Color::hex(0xffff00);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvaderKind {
    /// Top rows, worth more
    Small,
    Large,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Invader {
    pub rect: Rect,
    pub alive: bool,
    pub kind: InvaderKind,
}

/// A projectile; `speed` is applied upward for player shots, downward for enemy shots
#[derive(Debug, Clone, PartialEq)]
pub struct Shot {
    pub rect: Rect,
    pub speed: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarrierCell {
    pub rect: Rect,
    pub destroyed: bool,
}

/// Complete shooter state
#[derive(Debug, Clone)]
pub struct InvadersGame {
    pub tuning: InvadersTuning,
    pub ship: Rect,
    pub invaders: Vec<Invader>,
    pub barriers: Vec<BarrierCell>,
    pub shots: Vec<Shot>,
    pub enemy_shots: Vec<Shot>,
    /// +1 marching right, -1 left
    pub march_dir: f32,
    pub march_speed: f32,
    /// Ticks until the ship may fire again
    pub shot_cooldown: u32,
    /// Ticks since the formation last fired
    pub enemy_fire_timer: u32,
    /// Current wave (1-based)
    pub wave: u32,
    pub board: Scoreboard,
    rng: Pcg32,
}

impl InvadersGame {
    pub fn new(tuning: InvadersTuning, seed: u64) -> Self {
        let mut game = Self {
            ship: SHIP_START,
            invaders: Vec::new(),
            barriers: Vec::new(),
            shots: Vec::new(),
            enemy_shots: Vec::new(),
            march_dir: 1.0,
            march_speed: tuning.march_speed,
            shot_cooldown: 0,
            enemy_fire_timer: 0,
            wave: 1,
            board: Scoreboard::new(START_LIVES),
            rng: Pcg32::seed_from_u64(seed),
            tuning,
        };
        game.invaders = game.formation();
        if game.tuning.barriers {
            game.barriers = Self::build_barriers();
        }
        game
    }

    fn formation(&self) -> Vec<Invader> {
        let t = &self.tuning;
        let mut invaders = Vec::with_capacity(t.rows * t.cols);
        for row in 0..t.rows {
            for col in 0..t.cols {
                invaders.push(Invader {
                    rect: Rect::new(
                        col as f32 * 35.0 + 30.0,
                        row as f32 * 25.0 + 30.0,
                        INVADER_W,
                        INVADER_H,
                    ),
                    alive: true,
                    kind: if row < t.small_rows {
                        InvaderKind::Small
                    } else {
                        InvaderKind::Large
                    },
                });
            }
        }
        invaders
    }

    /// Four bunkers of 3x6 cells
    fn build_barriers() -> Vec<BarrierCell> {
        let mut cells = Vec::with_capacity(4 * 3 * 6);
        for bunker in 0..4 {
            let base_x = 50.0 + bunker as f32 * 80.0;
            for row in 0..3 {
                for col in 0..6 {
                    cells.push(BarrierCell {
                        rect: Rect::new(
                            base_x + col as f32 * BARRIER_CELL,
                            200.0 + row as f32 * BARRIER_CELL,
                            BARRIER_CELL,
                            BARRIER_CELL,
                        ),
                        destroyed: false,
                    });
                }
            }
        }
        cells
    }

    fn points_for(&self, kind: InvaderKind) -> u64 {
        match kind {
            InvaderKind::Small => self.tuning.small_points,
            InvaderKind::Large => self.tuning.large_points,
        }
    }

    /// Fire a shot from the cannon if the cooldown has run out
    pub fn fire(&mut self) -> bool {
        if self.shot_cooldown > 0 {
            return false;
        }
        self.shots.push(Shot {
            rect: Rect::new(
                self.ship.x + self.ship.w / 2.0,
                self.ship.y,
                SHOT_SIZE.0,
                SHOT_SIZE.1,
            ),
            speed: self.tuning.shot_speed,
        });
        self.shot_cooldown = self.tuning.shot_cooldown;
        true
    }

    fn move_shots(&mut self) {
        self.shots.retain_mut(|s| {
            s.rect.y -= s.speed;
            s.rect.y > 0.0
        });
        self.enemy_shots.retain_mut(|s| {
            s.rect.y += s.speed;
            s.rect.y < CANVAS_HEIGHT
        });
    }

    fn march(&mut self) {
        let step = self.march_dir * self.march_speed;
        let mut at_edge = false;
        for invader in self.invaders.iter_mut().filter(|i| i.alive) {
            invader.rect.x += step;
            if invader.rect.x <= 0.0 || invader.rect.x >= CANVAS_WIDTH - invader.rect.w {
                at_edge = true;
            }
        }
        if at_edge {
            self.march_dir = -self.march_dir;
            for invader in self.invaders.iter_mut().filter(|i| i.alive) {
                invader.rect.y += self.tuning.drop_distance;
            }
            self.march_speed += self.tuning.edge_speedup;
        }
    }

    /// Invaders with nothing alive below them in their column
    fn bottom_row(&self) -> Vec<usize> {
        let alive: Vec<&Invader> = self.invaders.iter().filter(|i| i.alive).collect();
        self.invaders
            .iter()
            .enumerate()
            .filter(|(_, inv)| inv.alive)
            .filter(|(_, inv)| {
                !alive
                    .iter()
                    .any(|other| other.rect.x == inv.rect.x && other.rect.y > inv.rect.y)
            })
            .map(|(i, _)| i)
            .collect()
    }

    fn enemy_fire(&mut self) {
        if self.enemy_fire_timer <= self.tuning.enemy_fire_interval {
            return;
        }
        if self.rng.random::<f32>() >= self.tuning.enemy_fire_chance {
            return;
        }
        let shooters = self.bottom_row();
        if !shooters.is_empty() {
            let pick = shooters[self.rng.random_range(0..shooters.len())];
            let r = self.invaders[pick].rect;
            self.enemy_shots.push(Shot {
                rect: Rect::new(
                    r.x + r.w / 2.0,
                    r.bottom(),
                    ENEMY_SHOT_SIZE.0,
                    ENEMY_SHOT_SIZE.1,
                ),
                speed: self.tuning.enemy_shot_speed,
            });
        }
        self.enemy_fire_timer = 0;
    }

    fn resolve_hits(&mut self) {
        // Player shots vs invaders: first live invader in creation order
        let invaders = &mut self.invaders;
        let mut kills = Vec::new();
        self.shots.retain(|shot| {
            match first_hit(&shot.rect, invaders, |i| i.rect, |i| i.alive) {
                Some(idx) => {
                    invaders[idx].alive = false;
                    kills.push(invaders[idx].kind);
                    false
                }
                None => true,
            }
        });
        for kind in kills {
            self.board.add_points(self.points_for(kind));
        }

        // Any shot vs barrier cells
        let barriers = &mut self.barriers;
        let mut absorb = |shot: &Shot| {
            match first_hit(&shot.rect, barriers, |c| c.rect, |c| !c.destroyed) {
                Some(idx) => {
                    barriers[idx].destroyed = true;
                    false
                }
                None => true,
            }
        };
        self.shots.retain(&mut absorb);
        self.enemy_shots.retain(&mut absorb);

        // Enemy shots vs ship
        let ship = self.ship;
        let before = self.enemy_shots.len();
        self.enemy_shots.retain(|s| !s.rect.overlaps(&ship));
        for _ in self.enemy_shots.len()..before {
            if self.board.lose_life() {
                break;
            }
        }
    }

    fn next_wave(&mut self) {
        self.invaders = self.formation();
        self.march_speed += self.tuning.wave_speedup;
        self.shots.clear();
        self.enemy_shots.clear();
        self.wave += 1;
        self.board.push(GameEvent::WaveAdvanced(self.wave));
        log::info!(
            "Wave {} begins, march speed {:.1}",
            self.wave,
            self.march_speed
        );
    }
}

impl ArcadeGame for InvadersGame {
    fn kind(&self) -> GameKind {
        GameKind::Invaders
    }

    fn update(&mut self, input: &TickInput) {
        if self.board.game_over {
            return;
        }

        self.shot_cooldown = self.shot_cooldown.saturating_sub(1);
        self.enemy_fire_timer = self.enemy_fire_timer.saturating_add(1);

        let speed = self.tuning.ship_speed;
        if input.left {
            self.ship.x = (self.ship.x - speed).max(0.0);
        }
        if input.right {
            self.ship.x = (self.ship.x + speed).min(CANVAS_WIDTH - self.ship.w);
        }
        if input.action {
            self.fire();
        }

        self.move_shots();
        self.march();
        self.enemy_fire();
        self.resolve_hits();

        let ship_y = self.ship.y;
        if self
            .invaders
            .iter()
            .any(|i| i.alive && i.rect.bottom() >= ship_y)
        {
            self.board.end();
        }
        if self.board.game_over {
            return;
        }

        if self.invaders.iter().all(|i| !i.alive) {
            self.board.add_points(CLEAR_BONUS);
            self.next_wave();
        }
    }

    fn render(&self, surface: &mut dyn Surface) {
        surface.clear(Color::BLACK);
        shapes::starfield(surface, 50);

        let s = self.ship;
        surface.fill_rect(s, GREEN);
        surface.fill_rect(Rect::new(s.x + s.w / 2.0 - 2.0, s.y - 5.0, 4.0, 5.0), GREEN);

        for shot in &self.shots {
            surface.fill_rect(shot.rect, Color::WHITE);
        }
        for shot in &self.enemy_shots {
            surface.fill_rect(shot.rect, RED);
        }

        for invader in self.invaders.iter().filter(|i| i.alive) {
            let body = match invader.kind {
                InvaderKind::Small => RED,
                InvaderKind::Large => YELLOW,
            };
            surface.fill_rect(invader.rect, body);
            shapes::eyes(
                surface,
                glam::Vec2::new(invader.rect.x, invader.rect.y),
                [glam::Vec2::new(5.0, 5.0), glam::Vec2::new(17.0, 5.0)],
                3.0,
                Color::BLACK,
            );
        }

        for cell in self.barriers.iter().filter(|c| !c.destroyed) {
            surface.fill_rect(cell.rect, GREEN);
        }

        if self.board.game_over {
            shapes::game_over_overlay(surface, GREEN);
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::DrawList;
    use crate::sim::Variant;
    use proptest::prelude::*;

    fn game() -> InvadersGame {
        InvadersGame::new(InvadersTuning::for_variant(Variant::Enhanced), 42)
    }

    fn idle() -> TickInput {
        TickInput::default()
    }

    fn shoot() -> TickInput {
        TickInput {
            action: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_layout() {
        let g = game();
        assert_eq!(g.invaders.len(), 50);
        assert_eq!(g.barriers.len(), 72);
        assert_eq!(g.invaders[0].kind, InvaderKind::Small);
        assert_eq!(g.invaders[20].kind, InvaderKind::Large);

        let simple = InvadersGame::new(InvadersTuning::for_variant(Variant::Simple), 42);
        assert_eq!(simple.invaders.len(), 24);
        assert!(simple.barriers.is_empty());
    }

    #[test]
    fn test_shot_removed_at_top() {
        let mut g = game();
        g.shots.push(Shot {
            rect: Rect::new(5.0, 10.0, 3.0, 10.0),
            speed: 5.0,
        });
        g.update(&idle());
        assert_eq!(g.shots.len(), 1);
        assert_eq!(g.shots[0].rect.y, 5.0);
        g.update(&idle());
        assert!(g.shots.is_empty());
    }

    #[test]
    fn test_fire_rate_limited() {
        let mut g = game();
        // Clear of the bunkers
        g.ship.x = 100.0;
        g.update(&shoot());
        g.update(&shoot());
        assert_eq!(g.shots.len(), 1);
        for _ in 0..14 {
            g.update(&idle());
        }
        g.update(&shoot());
        assert_eq!(g.shots.len(), 2);
    }

    #[test]
    fn test_shot_kills_first_invader_and_scores() {
        let mut g = game();
        let target = g.invaders[0].rect;
        g.shots.push(Shot {
            rect: Rect::new(target.x + 10.0, target.bottom() + 2.0, 3.0, 10.0),
            speed: 5.0,
        });
        g.update(&idle());
        assert!(!g.invaders[0].alive);
        assert!(g.shots.is_empty());
        assert_eq!(g.score(), 30);
    }

    #[test]
    fn test_barrier_absorbs_shot() {
        let mut g = game();
        let cell = g.barriers[0].rect;
        g.enemy_shots.push(Shot {
            rect: Rect::new(cell.x + 1.0, cell.y - 8.0, 3.0, 8.0),
            speed: 2.0,
        });
        g.update(&idle());
        assert!(g.barriers[0].destroyed);
        assert!(g.enemy_shots.is_empty());
        assert_eq!(g.barriers.iter().filter(|c| c.destroyed).count(), 1);
    }

    #[test]
    fn test_enemy_shot_hits_ship() {
        let mut g = game();
        g.enemy_shots.push(Shot {
            rect: Rect::new(g.ship.x + 5.0, g.ship.y - 4.0, 3.0, 8.0),
            speed: 2.0,
        });
        g.update(&idle());
        assert_eq!(g.lives(), 2);
        assert!(g.enemy_shots.is_empty());
    }

    #[test]
    fn test_formation_drops_and_speeds_up_at_edge() {
        let mut g = game();
        let shift = CANVAS_WIDTH - INVADER_W - g.invaders[9].rect.x - 0.25;
        for inv in &mut g.invaders {
            inv.rect.x += shift;
        }
        let y0 = g.invaders[0].rect.y;
        g.update(&idle());
        assert_eq!(g.march_dir, -1.0);
        assert_eq!(g.invaders[0].rect.y, y0 + 20.0);
        assert!((g.march_speed - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_invaders_reaching_ship_end_game() {
        let mut g = game();
        g.invaders[45].rect.y = g.ship.y - INVADER_H;
        g.update(&idle());
        assert!(g.is_terminal());
        assert_eq!(g.lives(), 3);
    }

    #[test]
    fn test_clearing_wave_advances() {
        let mut g = game();
        for inv in g.invaders.iter_mut().skip(1) {
            inv.alive = false;
        }
        let target = g.invaders[0].rect;
        g.shots.push(Shot {
            rect: Rect::new(target.x + 10.0, target.bottom() + 2.0, 3.0, 10.0),
            speed: 5.0,
        });
        g.enemy_shots.push(Shot {
            rect: Rect::new(10.0, 100.0, 3.0, 8.0),
            speed: 2.0,
        });
        g.barriers[5].destroyed = true;
        let speed_before = g.march_speed;
        g.update(&idle());

        assert_eq!(g.wave, 2);
        // Barrier damage carries over
        assert!(g.barriers[5].destroyed);
        assert_eq!(g.barriers.iter().filter(|c| c.destroyed).count(), 1);
        assert!(g.march_speed > speed_before);
        assert!(g.shots.is_empty());
        assert!(g.enemy_shots.is_empty());
        assert!(g.invaders.iter().all(|i| i.alive));
        assert_eq!(g.score(), 30 + CLEAR_BONUS);
        assert!(g.drain_events().contains(&GameEvent::WaveAdvanced(2)));
    }

    #[test]
    fn test_enemy_fires_from_bottom_row() {
        let tuning = InvadersTuning {
            enemy_fire_chance: 1.0,
            enemy_fire_interval: 0,
            ..InvadersTuning::for_variant(Variant::Enhanced)
        };
        let mut g = InvadersGame::new(tuning, 3);
        g.update(&idle());
        assert_eq!(g.enemy_shots.len(), 1);
        let bottom = g.invaders[40].rect.bottom();
        assert_eq!(g.enemy_shots[0].rect.y, bottom);
        assert_eq!(g.enemy_fire_timer, 0);
    }

    #[test]
    fn test_simple_never_fires_back() {
        let mut g = InvadersGame::new(InvadersTuning::for_variant(Variant::Simple), 3);
        for _ in 0..600 {
            g.update(&idle());
            assert!(g.enemy_shots.is_empty());
        }
    }

    #[test]
    fn test_fire_timer_saturates_without_return_fire() {
        let mut g = InvadersGame::new(InvadersTuning::for_variant(Variant::Simple), 3);
        g.enemy_fire_timer = u32::MAX;
        g.update(&idle());
        assert_eq!(g.enemy_fire_timer, u32::MAX);
        assert!(g.enemy_shots.is_empty());
    }

    #[test]
    fn test_render_hides_dead_invaders() {
        let mut g = game();
        g.invaders[0].alive = false;
        let mut list = DrawList::new(CANVAS_WIDTH, CANVAS_HEIGHT);
        g.render(&mut list);
        let dead = g.invaders[0].rect;
        assert!(!list
            .commands
            .iter()
            .any(|c| matches!(c, crate::renderer::DrawCommand::Rect(r, _) if *r == dead)));
    }

    proptest! {
        #[test]
        fn prop_destroyed_flags_never_revert(
            inputs in proptest::collection::vec((any::<bool>(), any::<bool>(), any::<bool>()), 1..400),
            seed in any::<u64>()
        ) {
            let mut g = InvadersGame::new(InvadersTuning::for_variant(Variant::Enhanced), seed);
            for (left, right, action) in inputs {
                let cells: Vec<bool> = g.barriers.iter().map(|c| c.destroyed).collect();
                let alive: Vec<bool> = g.invaders.iter().map(|i| i.alive).collect();
                g.update(&TickInput {
                    left,
                    right,
                    action,
                    ..Default::default()
                });

                for (was, cell) in cells.iter().zip(&g.barriers) {
                    prop_assert!(!*was || cell.destroyed);
                }
                let advanced = g
                    .drain_events()
                    .iter()
                    .any(|e| matches!(e, GameEvent::WaveAdvanced(_)));
                if !advanced {
                    for (was, inv) in alive.iter().zip(&g.invaders) {
                        prop_assert!(*was || !inv.alive);
                    }
                }
            }
        }
    }
}
