//! Grid simulation module
//!
//! All gameplay logic lives here. This module is pure and single-threaded:
//! - At most one ball moves at a time (the level's action lock)
//! - Broadcasts run in object insertion order
//! - No rendering or platform dependencies

pub mod arrow;
pub mod ball;
pub mod brush;
pub mod checker;
pub mod gate;
pub mod level;
pub mod object;
pub mod plate;
pub mod snapshot;
pub mod tick;

pub use arrow::Arrow;
pub use ball::Ball;
pub use brush::Brush;
pub use checker::{exit_path, is_solvable};
pub use gate::Gate;
pub use level::{Level, LevelEvent};
pub use object::{Effect, LevelObject, ObjectId, ObjectKind, Pedestal, Signal};
pub use plate::PressurePlate;
pub use snapshot::{LevelSnapshot, ObjectSnapshot};
pub use tick::{TickInput, tick};
