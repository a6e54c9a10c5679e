//! Fixed timestep simulation tick
//!
//! Applies the already-resolved player commands, then advances the ball that
//! holds the action lock.

use super::level::Level;
use super::object::ObjectId;
use crate::error::Result;
use crate::geom::Direction;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Flick requests (ball, direction), applied in order
    pub moves: Vec<(ObjectId, Direction)>,
    /// Taps on objects (arrows turn their dye)
    pub activations: Vec<ObjectId>,
}

impl TickInput {
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty() && self.activations.is_empty()
    }

    pub fn clear(&mut self) {
        self.moves.clear();
        self.activations.clear();
    }
}

/// Advance the level by one timestep
pub fn tick(level: &mut Level, input: &TickInput, dt: f32) -> Result<()> {
    for &id in &input.activations {
        level.activate(id)?;
    }
    for &(id, direction) in &input.moves {
        if !level.move_ball(id, direction)? {
            log::trace!("move {:?} of ball {} ignored", direction, id);
        }
    }
    level.advance(dt)
}
