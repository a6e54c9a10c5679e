//! Don't Touch It - grid puzzle simulation engine
//!
//! Core modules:
//! - `sim`: Level, board objects, action lock, snapshots, reachability
//! - `game`: Fixed timestep session driver with restart
//! - `persistence`: Versioned JSON level files
//! - `settings`: Engine configuration

pub mod dye;
pub mod error;
pub mod game;
pub mod geom;
pub mod persistence;
pub mod settings;
pub mod sim;

pub use dye::Dye;
pub use error::{Error, Result};
pub use game::Game;
pub use geom::{Direction, GridPoint};
pub use settings::Settings;

/// Engine configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame the driver will simulate in one update (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Ball speed in cells per second
    pub const BALL_SPEED: f32 = 3.0;

    /// Undrained level events kept before the oldest half is dropped
    pub const MAX_EVENTS: usize = 4096;

    /// Initial placement depth keys (lower is inserted first on restore)
    pub const PEDESTAL_DEPTH: i32 = 0;
    pub const PLATE_DEPTH: i32 = 0;
    pub const GATE_DEPTH: i32 = 1;
    pub const ARROW_DEPTH: i32 = 1;
    pub const BALL_DEPTH: i32 = 2;
}
