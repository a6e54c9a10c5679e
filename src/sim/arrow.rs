//! Arrow: redirects balls entering its cell, rotates on `Turn` signals

use super::object::Signal;
use crate::error::{Error, Result};
use crate::geom::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arrow {
    direction: Direction,
    /// Quarter turns applied per `Turn` signal
    rotation_speed: i32,
}

impl Arrow {
    pub fn new(direction: Direction, rotation_speed: i32) -> Result<Self> {
        if direction.is_none() {
            return Err(Error::NoneDirection);
        }
        Ok(Self {
            direction,
            rotation_speed,
        })
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn rotation_speed(&self) -> i32 {
        self.rotation_speed
    }

    pub(crate) fn on_signal(&mut self, signal: Signal) {
        if signal == Signal::Turn {
            self.direction = self.direction.plus(self.rotation_speed);
        }
    }

    pub(crate) fn change_parameter(&mut self) {
        self.direction = self.direction.plus(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_direction_rejected() {
        assert!(matches!(
            Arrow::new(Direction::None, 1),
            Err(Error::NoneDirection)
        ));
    }

    #[test]
    fn test_turn_uses_rotation_speed() {
        let mut arrow = Arrow::new(Direction::Top, 2).unwrap();
        arrow.on_signal(Signal::Turn);
        assert_eq!(arrow.direction(), Direction::Bottom);
        arrow.on_signal(Signal::Pressed(true));
        assert_eq!(arrow.direction(), Direction::Bottom);
        arrow.change_parameter();
        assert_eq!(arrow.direction(), Direction::Left);
    }
}
