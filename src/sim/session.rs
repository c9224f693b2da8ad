//! Host-owned game session
//!
//! Wraps one [`ArcadeGame`] with its keyboard state and a fixed-step
//! accumulator. The host forwards key events and calls [`Session::advance`]
//! once per display refresh, then [`Session::render`].

use super::input::KeyState;
use super::state::{GameEvent, GameKind, Variant};
use super::{ArcadeGame, new_game};
use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::renderer::Surface;

pub struct Session {
    game: Box<dyn ArcadeGame>,
    keys: KeyState,
    /// Set by the first key press
    started: bool,
    accumulator: f32,
    /// Ticks run since creation
    ticks: u64,
}

impl Session {
    pub fn new(kind: GameKind, variant: Variant, seed: u64) -> Self {
        Self::from_game(new_game(kind, variant, seed))
    }

    pub fn from_game(game: Box<dyn ArcadeGame>) -> Self {
        Self {
            game,
            keys: KeyState::new(),
            started: false,
            accumulator: 0.0,
            ticks: 0,
        }
    }

    pub fn kind(&self) -> GameKind {
        self.game.kind()
    }

    pub fn game(&self) -> &dyn ArcadeGame {
        self.game.as_ref()
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_terminal(&self) -> bool {
        self.game.is_terminal()
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Forward a `keydown`. Returns true if the key is bound, so the host
    /// can suppress the browser default (page scrolling).
    pub fn key_down(&mut self, key: &str) -> bool {
        if self.game.is_terminal() {
            return false;
        }
        let bound = self.keys.key_down(key);
        if !self.started {
            self.started = true;
            log::info!("{:?} started", self.game.kind());
        }
        bound
    }

    pub fn key_up(&mut self, key: &str) {
        self.keys.key_up(key);
    }

    /// Forget held keys (the page lost focus and keyups will not arrive)
    pub fn release_all(&mut self) {
        self.keys.clear();
    }

    /// Run the fixed ticks owed for `elapsed` seconds of wall time.
    /// Returns the number of ticks run.
    pub fn advance(&mut self, elapsed: f32) -> u32 {
        if !self.started || self.game.is_terminal() {
            self.accumulator = 0.0;
            return 0;
        }

        self.accumulator += elapsed.clamp(0.0, MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let input = self.keys.take_tick_input();
            self.game.update(&input);
            self.accumulator -= SIM_DT;
            self.ticks += 1;
            substeps += 1;
            if self.game.is_terminal() {
                self.accumulator = 0.0;
                break;
            }
        }
        substeps
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        self.game.render(surface);
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.game.drain_events()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};
    use crate::renderer::{Color, DrawList};
    use crate::sim::TickInput;

    /// Records every tick's input and goes terminal after `limit` ticks
    struct Recorder {
        inputs: Rc<RefCell<Vec<TickInput>>>,
        limit: usize,
    }

    impl ArcadeGame for Recorder {
        fn kind(&self) -> GameKind {
            GameKind::Maze
        }

        fn update(&mut self, input: &TickInput) {
            self.inputs.borrow_mut().push(input.clone());
        }

        fn render(&self, surface: &mut dyn Surface) {
            let count = self.inputs.borrow().len().to_string();
            surface.fill_text(&count, glam::Vec2::ZERO, 10.0, Color::WHITE);
        }

        fn is_terminal(&self) -> bool {
            self.inputs.borrow().len() >= self.limit
        }

        fn score(&self) -> u64 {
            0
        }

        fn lives(&self) -> u8 {
            3
        }

        fn drain_events(&mut self) -> Vec<GameEvent> {
            Vec::new()
        }
    }

    fn recorder(limit: usize) -> (Session, Rc<RefCell<Vec<TickInput>>>) {
        let inputs = Rc::new(RefCell::new(Vec::new()));
        let game = Recorder {
            inputs: inputs.clone(),
            limit,
        };
        (Session::from_game(Box::new(game)), inputs)
    }

    #[test]
    fn test_no_ticks_before_first_key() {
        let (mut session, _) = recorder(100);
        assert_eq!(session.advance(0.05), 0);
        assert!(!session.is_started());

        session.key_down("x");
        assert!(session.is_started());
        assert_eq!(session.advance(SIM_DT * 2.5), 2);
    }

    #[test]
    fn test_substeps_capped_and_elapsed_clamped() {
        let (mut session, _) = recorder(1000);
        session.key_down("d");
        assert_eq!(session.advance(5.0), MAX_SUBSTEPS);
        // The stall is clamped to MAX_FRAME_DT, so little backlog remains
        let mut total = MAX_SUBSTEPS;
        loop {
            let ran = session.advance(0.0);
            if ran == 0 {
                break;
            }
            total += ran;
        }
        assert!(total <= 6);
    }

    #[test]
    fn test_action_reaches_exactly_one_tick() {
        let (mut session, inputs) = recorder(1000);
        session.key_down(" ");
        session.advance(SIM_DT * 3.0 + 0.001);
        session.key_down(" "); // auto-repeat while held
        session.advance(SIM_DT + 0.001);

        let actions: Vec<bool> = inputs.borrow().iter().map(|i| i.action).collect();
        assert_eq!(actions, vec![true, false, false, false]);
    }

    #[test]
    fn test_held_key_seen_every_tick() {
        let (mut session, inputs) = recorder(1000);
        session.key_down("ArrowRight");
        session.advance(SIM_DT * 2.0 + 0.001);
        session.key_up("ArrowRight");
        session.advance(SIM_DT + 0.001);

        let right: Vec<bool> = inputs.borrow().iter().map(|i| i.right).collect();
        assert_eq!(right, vec![true, true, false]);
    }

    #[test]
    fn test_stops_at_terminal_and_ignores_keys() {
        let (mut session, _) = recorder(2);
        session.key_down("d");
        assert_eq!(session.advance(SIM_DT * 4.0), 2);
        assert!(session.is_terminal());
        assert!(!session.key_down("d"));
        assert_eq!(session.advance(1.0), 0);

        // Rendering continues after game over
        let mut list = DrawList::new(CANVAS_WIDTH, CANVAS_HEIGHT);
        session.render(&mut list);
        assert_eq!(list.texts(), vec!["2"]);
    }

    #[test]
    fn test_release_all_drops_held_keys() {
        let (mut session, inputs) = recorder(1000);
        session.key_down("a");
        session.release_all();
        session.advance(SIM_DT + 0.001);
        assert!(!inputs.borrow()[0].left);
    }

    #[test]
    fn test_real_game_runs() {
        let mut session = Session::new(GameKind::Invaders, Variant::Enhanced, 9);
        assert_eq!(session.kind(), GameKind::Invaders);
        session.key_down(" ");
        for _ in 0..10 {
            session.advance(SIM_DT);
        }
        assert!(session.ticks() > 0);
        assert!(!session.is_terminal());
        assert_eq!(session.game().lives(), 3);
    }
}
