//! Pixel Pioneers - three canvas arcade mini-games and the site that hosts them
//!
//! Core modules:
//! - `sim`: Frame-stepped game simulation (Pac-Man, platformer, invaders)
//! - `renderer`: Drawing surface abstraction (Canvas 2D on web)
//! - `platform`: Page glue (element ids, HUD text, mount attributes)
//! - `tuning`: Data-driven game balance
//! - `server`: Static page server (native only)

pub mod platform;
pub mod renderer;
pub mod sim;
pub mod tuning;

#[cfg(not(target_arch = "wasm32"))]
pub mod server;
#[cfg(not(target_arch = "wasm32"))]
pub mod settings;

#[cfg(not(target_arch = "wasm32"))]
pub use settings::Settings;
pub use sim::{ArcadeGame, GameKind, Session, Variant};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (one display frame at 60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;
    /// Longest frame gap fed to the accumulator (tab switches, debugger stops)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Canvas dimensions shared by all three games
    pub const CANVAS_WIDTH: f32 = 400.0;
    pub const CANVAS_HEIGHT: f32 = 300.0;

    /// Lives at the start of every game
    pub const START_LIVES: u8 = 3;
    /// Bonus for clearing a level or wave
    pub const CLEAR_BONUS: u64 = 1000;

    /// Key names as reported by `KeyboardEvent.key`, lowercased
    pub mod keys {
        pub const LEFT: [&str; 2] = ["a", "arrowleft"];
        pub const RIGHT: [&str; 2] = ["d", "arrowright"];
        pub const UP: [&str; 2] = ["w", "arrowup"];
        pub const DOWN: [&str; 2] = ["s", "arrowdown"];
        pub const ACTION: &str = " ";
    }
}
